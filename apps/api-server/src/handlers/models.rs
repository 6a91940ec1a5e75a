//! Language catalog endpoint.

use actix_web::{HttpResponse, web};
use medtrans_shared::dto::ModelsResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/models
///
/// Only providers with a fixed language table publish a catalog.
pub async fn list_models(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let catalog = state.translator.catalog().ok_or_else(|| {
        AppError::NotFound(format!(
            "Provider '{}' does not publish a model catalog",
            state.translator.provider_name()
        ))
    })?;

    Ok(HttpResponse::Ok().json(ModelsResponse {
        available_languages: catalog.available_languages,
        provider: catalog.provider,
    }))
}
