// POST /new_chat handler

use bytes::Bytes;
use std::sync::Arc;
use warp::http::StatusCode;

use crate::models::{ChatResponse, NEW_SESSION_REPLY};
use crate::state::AppState;

use super::{error_reply, json_reply};

// The request body is logged and otherwise ignored; the endpoint always
// starts a fresh session.
pub async fn new_chat_handler(
    state: Arc<AppState>,
    body: Bytes,
) -> Result<impl warp::Reply, warp::Rejection> {
    tracing::info!(body = %String::from_utf8_lossy(&body), "new chat requested");

    match state.reset_session().await {
        Ok(_) => Ok(json_reply(
            &ChatResponse::new(NEW_SESSION_REPLY),
            StatusCode::OK,
        )),
        Err(e) => {
            tracing::error!(error = %e, "session reset failed");
            Ok(error_reply(
                format!("Could not create session: {e}"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}
