// Route definitions

use crate::handlers;
use crate::state::AppState;
use std::convert::Infallible;
use std::path::Path;
use std::sync::Arc;
use warp::Filter;

pub fn configure_routes(
    state: Arc<AppState>,
    static_dir: &Path,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    // POST /chat
    let chat = warp::path("chat")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_state(Arc::clone(&state)))
        .and(warp::body::bytes())
        .and_then(handlers::chat_handler);

    // POST /new_chat
    let new_chat = warp::path("new_chat")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_state(Arc::clone(&state)))
        .and(warp::body::bytes())
        .and_then(handlers::new_chat_handler);

    // POST /change_ai_model
    let change_model = warp::path("change_ai_model")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_state(state))
        .and(warp::body::bytes())
        .and_then(handlers::change_model_handler);

    // GET /static/* serves the bundled web app assets
    let assets = warp::path("static").and(warp::fs::dir(static_dir.join("static")));

    // Any other GET or HEAD serves the app shell, which routes client side
    let spa = warp::get()
        .or(warp::head())
        .unify()
        .and(warp::fs::file(static_dir.join("index.html")));

    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_headers(vec!["content-type"]);

    // Combine routes; the API is matched before the static fallbacks
    chat.or(new_chat)
        .or(change_model)
        .or(assets)
        .or(spa)
        .recover(handlers::handle_rejection)
        .with(cors)
}

fn with_state(
    state: Arc<AppState>,
) -> impl Filter<Extract = (Arc<AppState>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&state))
}
