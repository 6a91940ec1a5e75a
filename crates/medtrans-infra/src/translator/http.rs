//! Error classification shared by the HTTP-based providers.

use medtrans_core::TranslateError;

/// Upstream bodies are cut to this many characters before logging.
const MAX_LOGGED_BODY: usize = 500;

/// Map a transport failure onto the typed error kinds.
pub(crate) fn classify(provider: &str, err: reqwest::Error) -> TranslateError {
    if err.is_timeout() {
        tracing::error!(provider, "Translation request timed out");
        TranslateError::ServiceTimeout
    } else if err.is_connect() {
        tracing::error!(provider, error = %err, "Connection to translation service failed");
        TranslateError::ServiceUnavailable
    } else if err.is_decode() {
        tracing::error!(provider, error = %err, "Undecodable translation response");
        TranslateError::internal(format!("{} returned an undecodable payload", provider))
    } else {
        tracing::error!(provider, error = %err, "Translation request failed");
        TranslateError::internal(format!("{} request failed: {}", provider, err))
    }
}

/// Pass successful responses through; log and reject everything else.
pub(crate) async fn ensure_success(
    provider: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, TranslateError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let body = truncate(&body, MAX_LOGGED_BODY);
    tracing::error!(
        provider,
        status = %status,
        body = %body,
        "Translation provider returned an error"
    );

    Err(TranslateError::UpstreamError {
        status: status.as_u16(),
        body,
    })
}

/// Trim the provider output, rejecting blank results.
pub(crate) fn non_empty(provider: &str, text: &str) -> Result<String, TranslateError> {
    let text = text.trim();
    if text.is_empty() {
        tracing::warn!(provider, "Translation provider returned an empty result");
        return Err(TranslateError::EmptyResult);
    }
    Ok(text.to_string())
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
