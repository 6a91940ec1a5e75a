//! Translation handler.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde_json::Value;

use medtrans_core::TranslateError;
use medtrans_core::domain::{Session, TranslationRequest};
use medtrans_shared::dto::{TranslateRequest, TranslateResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::middleware::session::SessionToken;
use crate::observability::RequestId;
use crate::state::AppState;

/// Upper bound on a translate body. Comfortably above 5000 escaped chars.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

const NOT_JSON: &str = "Request must be JSON";
const INVALID_TEXT: &str = "Invalid text format or size";

/// Client message for a body the JSON extractor refused.
fn json_error_message(err: &JsonPayloadError) -> &'static str {
    match err {
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            INVALID_TEXT
        }
        _ => NOT_JSON,
    }
}

/// Extractor config for `/api`: `application/json` only, bounded size,
/// failures rendered as problem bodies.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_BODY_BYTES)
        .content_type_required(true)
        .error_handler(|err, _req| {
            tracing::debug!(error = %err, "Rejected translate body");
            AppError::BadRequest(json_error_message(&err).to_string()).into()
        })
}

/// Turn the decoded body into a validated request.
fn parse_request(value: Value) -> Result<TranslationRequest, TranslateError> {
    if !value.is_object() {
        return Err(TranslateError::bad_request(NOT_JSON));
    }
    let payload: TranslateRequest =
        serde_json::from_value(value).map_err(|_| TranslateError::bad_request(NOT_JSON))?;

    let text = match &payload.text {
        None | Some(Value::Null) => "",
        Some(Value::String(s)) => s.as_str(),
        Some(_) => return Err(TranslateError::bad_request(INVALID_TEXT)),
    };

    let target_language = match &payload.target_language {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.as_str()),
        Some(other) => return Err(TranslateError::UnsupportedLanguage(other.to_string())),
    };

    TranslationRequest::new(text, target_language)
}

/// Everything after the rate-limit gate. The session is mutated in place
/// and persisted by the caller whatever the outcome.
async fn run_translation(
    state: &AppState,
    session: &mut Session,
    request: &TranslationRequest,
) -> Result<String, TranslateError> {
    let translator = &state.translator;

    if !translator.supports_language(&request.target_language) {
        return Err(TranslateError::UnsupportedLanguage(
            request.target_language.clone(),
        ));
    }

    let context = if translator.uses_context() {
        Some(session.build_prompt_context()).filter(|c| !c.is_empty())
    } else {
        None
    };

    let translated = translator
        .translate(&request.text, &request.target_language, context.as_deref())
        .await?;

    if translator.uses_context() {
        session.append_exchange(request.text.clone(), translated.clone());
    }

    Ok(translated)
}

/// POST /api/translate
pub async fn translate(
    state: web::Data<AppState>,
    token: SessionToken,
    request_id: RequestId,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let request = parse_request(body.into_inner())?;
    let fingerprint = request.fingerprint();

    tracing::info!(
        request_id = %request_id.as_str(),
        chars = request.text.chars().count(),
        target = %request.target_language,
        fingerprint = %fingerprint,
        "Translation request"
    );

    let mut session = state.sessions.get(token.as_str()).await?;

    let decision = state.rate_limit.check_and_increment(&mut session, Utc::now());
    if !decision.allowed {
        tracing::warn!(request_id = %request_id.as_str(), "Rate limit exceeded for session");
        return Err(TranslateError::RateLimitExceeded {
            reset_after: decision.reset_after,
        }
        .into());
    }

    let outcome = run_translation(&state, &mut session, &request).await;
    state.sessions.put(token.as_str(), &session).await?;

    let translated_text = outcome.map_err(|e| {
        tracing::error!(
            request_id = %request_id.as_str(),
            fingerprint = %fingerprint,
            error = %e,
            "Translation failed"
        );
        AppError::from(e)
    })?;

    tracing::info!(
        request_id = %request_id.as_str(),
        fingerprint = %fingerprint,
        remaining = decision.remaining,
        "Translation completed"
    );

    Ok(HttpResponse::Ok().json(TranslateResponse {
        original_text: request.text,
        translated_text,
    }))
}
