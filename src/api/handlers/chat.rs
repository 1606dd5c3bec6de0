use crate::{
    AppState,
    types::{AppError, ChatRequest, ChatResponse, Result},
};
use axum::{Json, extract::State};
use tracing::Instrument;
use uuid::Uuid;

/// Run one conversation turn.
///
/// The orchestrator requires non-blank input, so trimming and rejection
/// happen here at the boundary. Fatal turn errors convert into
/// [`AppError`] responses whose body names the failing stage; non-fatal
/// warnings ride along on the success payload.
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let message = payload.message.trim();
    if message.is_empty() {
        return Err(AppError::InvalidInput("message is required".to_string()));
    }

    let span = tracing::info_span!("turn", id = %Uuid::new_v4());
    let result = state
        .orchestrator
        .run_turn(
            message,
            &state.config.recallio.user_id,
            &state.config.recallio.project_id,
        )
        .instrument(span)
        .await?;

    Ok(Json(ChatResponse {
        reply: result.reply,
        warnings: result.warnings.iter().map(|w| w.to_string()).collect(),
    }))
}
