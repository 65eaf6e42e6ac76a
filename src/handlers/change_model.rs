// POST /change_ai_model handler

use bytes::Bytes;
use std::sync::Arc;
use warp::http::StatusCode;

use crate::models::{ChangeModelRequest, ChatResponse, MODEL_CHANGED_REPLY};
use crate::runtime::GeminiModel;
use crate::state::AppState;

use super::{error_reply, json_reply, parse_json};

pub async fn change_model_handler(
    state: Arc<AppState>,
    body: Bytes,
) -> Result<impl warp::Reply, warp::Rejection> {
    let request: ChangeModelRequest = match parse_json(&body) {
        Ok(request) => request,
        Err(reply) => return Ok(reply),
    };

    let model = match request.model.parse::<GeminiModel>() {
        Ok(model) => model,
        Err(e) => {
            tracing::warn!(model = %request.model, "rejected model change");
            return Ok(error_reply(e.to_string(), StatusCode::BAD_REQUEST));
        }
    };

    match state.rebind_model(model).await {
        Ok(()) => Ok(json_reply(
            &ChatResponse::new(MODEL_CHANGED_REPLY),
            StatusCode::OK,
        )),
        Err(e) => {
            tracing::error!(error = %e, "model change failed");
            Ok(error_reply(
                e.to_string(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}
