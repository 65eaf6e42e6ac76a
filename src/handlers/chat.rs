// POST /chat handler

use bytes::Bytes;
use std::sync::Arc;
use warp::http::StatusCode;

use crate::dispatch::dispatch;
use crate::models::{ChatRequest, ChatResponse};
use crate::state::{AppState, USER_ID};

use super::{error_reply, json_reply, parse_json};

pub async fn chat_handler(
    state: Arc<AppState>,
    body: Bytes,
) -> Result<impl warp::Reply, warp::Rejection> {
    let request: ChatRequest = match parse_json(&body) {
        Ok(request) => request,
        Err(reply) => return Ok(reply),
    };

    tracing::info!(message = %request.message, "received chat message");

    // The turn runs against a snapshot of the bindings, so a concurrent
    // session reset or model change cannot tear it mid-flight.
    let bindings = state.snapshot().await;

    match dispatch(
        &bindings.runner,
        USER_ID,
        &bindings.session_id,
        &request.message,
    )
    .await
    {
        Ok(reply) => Ok(json_reply(&ChatResponse::new(reply), StatusCode::OK)),
        Err(e) => {
            tracing::error!(error = %e, session_id = %bindings.session_id, "chat turn failed");
            Ok(error_reply(
                e.to_string(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}
