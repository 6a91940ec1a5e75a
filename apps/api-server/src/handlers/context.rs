//! Conversation context handlers.

use actix_web::{HttpResponse, web};
use medtrans_shared::dto::StatusResponse;

use crate::middleware::error::AppResult;
use crate::middleware::session::SessionToken;
use crate::state::AppState;

/// POST /api/reset-context
pub async fn reset_context(
    state: web::Data<AppState>,
    token: SessionToken,
) -> AppResult<HttpResponse> {
    let mut session = state.sessions.get(token.as_str()).await?;
    session.reset_context();
    state.sessions.put(token.as_str(), &session).await?;

    tracing::info!("Conversation context reset");

    Ok(HttpResponse::Ok().json(StatusResponse::success()))
}
