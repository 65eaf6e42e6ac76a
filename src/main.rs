use std::process;
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use hostbot::routes::configure_routes;
use hostbot::settings::Settings;
use hostbot::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            process::exit(1);
        }
    };

    let state = match AppState::new(&settings) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "failed to initialize application state");
            process::exit(1);
        }
    };

    // Open the initial session. On failure the server still comes up;
    // POST /new_chat can establish a session later.
    if let Err(e) = state.reset_session().await {
        tracing::error!(error = %e, "could not create the initial session");
    }

    let addr = settings.bind_addr();
    let routes = configure_routes(Arc::clone(&state), &settings.static_dir);

    tracing::info!(%addr, static_dir = %settings.static_dir.display(), "starting server");
    warp::serve(routes).run(addr).await;
}
