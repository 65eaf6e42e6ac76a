// Handlers module

pub mod change_model;
pub mod chat;
pub mod new_chat;

pub use change_model::change_model_handler;
pub use chat::chat_handler;
pub use new_chat::new_chat_handler;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::convert::Infallible;
use warp::http::StatusCode;

use crate::models::ErrorDetail;

// Single concrete reply type so every branch of a handler lines up
pub(crate) type JsonReply = warp::reply::WithStatus<warp::reply::Json>;

pub(crate) fn json_reply(value: &impl Serialize, status: StatusCode) -> JsonReply {
    warp::reply::with_status(warp::reply::json(value), status)
}

// Error statuses wrap their text in {"detail": ...}
pub(crate) fn error_reply(detail: impl Into<String>, status: StatusCode) -> JsonReply {
    warp::reply::with_status(warp::reply::json(&ErrorDetail::new(detail)), status)
}

// The web app posts JSON under a text/plain content type, so request bodies
// are read as raw bytes and parsed here instead of through the JSON body
// filter (which insists on application/json).
pub(crate) fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, JsonReply> {
    serde_json::from_slice(body)
        .map_err(|e| error_reply(format!("Invalid JSON body: {e}"), StatusCode::BAD_REQUEST))
}

// Maps router-level rejections onto the JSON error envelope
pub async fn handle_rejection(err: warp::Rejection) -> Result<impl warp::Reply, Infallible> {
    let (status, detail) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found")
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
    } else {
        tracing::error!(?err, "unhandled rejection");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    };

    Ok(error_reply(detail, status))
}
