//! End-to-end handler tests against a scripted translator.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use async_trait::async_trait;
use serde_json::{Value, json};

use medtrans_core::TranslateError;
use medtrans_core::domain::Language;
use medtrans_core::ports::{ModelCatalog, Translator};
use medtrans_core::session::RateLimitPolicy;

use super::configure_routes;
use crate::middleware::session::SESSION_COOKIE;
use crate::state::AppState;

type Scripted = Result<String, TranslateError>;

/// Translator that replays queued outcomes (default: echo in brackets) and
/// records what it was called with.
struct FakeTranslator {
    uses_context: bool,
    script: Mutex<VecDeque<Scripted>>,
    calls: AtomicUsize,
    contexts: Mutex<Vec<Option<String>>>,
}

impl FakeTranslator {
    fn new(uses_context: bool) -> Arc<Self> {
        Arc::new(Self {
            uses_context,
            script: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            contexts: Mutex::new(Vec::new()),
        })
    }

    fn push(&self, outcome: Scripted) {
        self.script.lock().unwrap().push_back(outcome);
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_context(&self) -> Option<String> {
        self.contexts.lock().unwrap().last().cloned().flatten()
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
        context: Option<&str>,
    ) -> Result<String, TranslateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.contexts
            .lock()
            .unwrap()
            .push(context.map(str::to_string));

        match self.script.lock().unwrap().pop_front() {
            Some(outcome) => outcome,
            None => Ok(format!("[{}] {}", target_language, text)),
        }
    }

    fn supports_language(&self, target_language: &str) -> bool {
        target_language.parse::<Language>().is_ok()
    }

    fn uses_context(&self) -> bool {
        self.uses_context
    }

    fn catalog(&self) -> Option<ModelCatalog> {
        (!self.uses_context).then(|| ModelCatalog {
            available_languages: Language::ALL.iter().map(|l| l.name().to_string()).collect(),
            provider: "Fake".to_string(),
        })
    }

    fn provider_name(&self) -> &str {
        "fake"
    }
}

macro_rules! app_with {
    ($translator:expr, $rate_limit:expr $(,)?) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::for_tests($translator, $rate_limit)))
                .configure(configure_routes),
        )
        .await
    };
}

fn session_cookie<B>(resp: &ServiceResponse<B>) -> Cookie<'static> {
    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned())
        .expect("session cookie issued")
}

fn translate_req(body: Value, cookie: Option<&Cookie<'static>>) -> test::TestRequest {
    let mut req = test::TestRequest::post()
        .uri("/api/translate")
        .set_json(body);
    if let Some(cookie) = cookie {
        req = req.cookie(cookie.clone());
    }
    req
}

#[actix_web::test]
async fn test_translate_success() {
    let translator = FakeTranslator::new(false);
    translator.push(Ok("Tome 5 mg dos veces al día".to_string()));
    let app = app_with!(translator.clone(), RateLimitPolicy::default());

    let resp = test::call_service(
        &app,
        translate_req(
            json!({ "text": "Take 5mg twice daily", "targetLanguage": "Spanish" }),
            None,
        )
        .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    session_cookie(&resp);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["originalText"], "Take 5mg twice daily");
    assert_eq!(body["translatedText"], "Tome 5 mg dos veces al día");
}

#[actix_web::test]
async fn test_original_text_is_trimmed_echo() {
    let app = app_with!(FakeTranslator::new(false), RateLimitPolicy::default());

    let resp = test::call_service(
        &app,
        translate_req(json!({ "text": "   Fever since Monday \n" }), None).to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["originalText"], "Fever since Monday");
    assert_eq!(body["translatedText"], "[Hindi] Fever since Monday");
}

#[actix_web::test]
async fn test_blank_text_is_bad_request() {
    let translator = FakeTranslator::new(false);
    let app = app_with!(translator.clone(), RateLimitPolicy::default());

    for lang in ["Spanish", "Klingon"] {
        let resp = test::call_service(
            &app,
            translate_req(json!({ "text": "  \n ", "targetLanguage": lang }), None).to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "No text provided");
    }
    assert_eq!(translator.calls(), 0);
}

#[actix_web::test]
async fn test_oversized_text_is_bad_request() {
    let app = app_with!(FakeTranslator::new(false), RateLimitPolicy::default());

    let resp = test::call_service(
        &app,
        translate_req(json!({ "text": "a".repeat(5001), "targetLanguage": "French" }), None)
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid text format or size");
}

#[actix_web::test]
async fn test_malformed_body_is_bad_request() {
    let app = app_with!(FakeTranslator::new(false), RateLimitPolicy::default());

    let req = test::TestRequest::post()
        .uri("/api/translate")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"text\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_huge_body_is_invalid_size() {
    let translator = FakeTranslator::new(false);
    let app = app_with!(translator.clone(), RateLimitPolicy::default());

    let body = json!({ "text": "a".repeat(300_000), "targetLanguage": "French" });
    let resp = test::call_service(&app, translate_req(body, None).to_request()).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid text format or size");
    assert_eq!(translator.calls(), 0);
}

#[actix_web::test]
async fn test_non_json_content_type_is_bad_request() {
    let translator = FakeTranslator::new(false);
    let app = app_with!(translator.clone(), RateLimitPolicy::default());

    let req = test::TestRequest::post()
        .uri("/api/translate")
        .insert_header(("content-type", "text/plain"))
        .set_payload(r#"{"text":"hello","targetLanguage":"Spanish"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Request must be JSON");
    assert_eq!(translator.calls(), 0);
}

#[actix_web::test]
async fn test_unsupported_language_never_reaches_translator() {
    let translator = FakeTranslator::new(false);
    let app = app_with!(translator.clone(), RateLimitPolicy::default());

    let resp = test::call_service(
        &app,
        translate_req(json!({ "text": "hello", "targetLanguage": "Klingon" }), None).to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Unsupported target language: Klingon");
    assert_eq!(translator.calls(), 0);
}

#[actix_web::test]
async fn test_upstream_failures_map_to_status_codes() {
    let translator = FakeTranslator::new(false);
    let app = app_with!(translator.clone(), RateLimitPolicy::default());

    let cases = [
        (TranslateError::ServiceTimeout, StatusCode::GATEWAY_TIMEOUT),
        (TranslateError::ServiceUnavailable, StatusCode::SERVICE_UNAVAILABLE),
        (
            TranslateError::UpstreamError {
                status: 401,
                body: "invalid token hf_secret".to_string(),
            },
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
        (TranslateError::EmptyResult, StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (err, expected) in cases {
        translator.push(Err(err));
        let resp = test::call_service(
            &app,
            translate_req(json!({ "text": "hello", "targetLanguage": "German" }), None)
                .to_request(),
        )
        .await;

        assert_eq!(resp.status(), expected);
        let body = test::read_body(resp).await;
        assert!(!String::from_utf8_lossy(&body).contains("hf_secret"));
    }
}

#[actix_web::test]
async fn test_rate_limit_per_session() {
    let app = app_with!(
        FakeTranslator::new(false),
        RateLimitPolicy::new(2, Duration::from_secs(60)),
    );

    let first = test::call_service(
        &app,
        translate_req(json!({ "text": "one", "targetLanguage": "French" }), None).to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);
    let cookie = session_cookie(&first);

    let second = test::call_service(
        &app,
        translate_req(json!({ "text": "two", "targetLanguage": "French" }), Some(&cookie))
            .to_request(),
    )
    .await;
    assert_eq!(second.status(), StatusCode::OK);

    let third = test::call_service(
        &app,
        translate_req(json!({ "text": "three", "targetLanguage": "French" }), Some(&cookie))
            .to_request(),
    )
    .await;
    assert_eq!(third.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(third.headers().contains_key("retry-after"));

    // A different session has its own budget.
    let other = test::call_service(
        &app,
        translate_req(json!({ "text": "four", "targetLanguage": "French" }), None).to_request(),
    )
    .await;
    assert_eq!(other.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_failed_attempts_count_toward_limit() {
    let translator = FakeTranslator::new(false);
    let app = app_with!(
        translator.clone(),
        RateLimitPolicy::new(1, Duration::from_secs(60)),
    );

    translator.push(Err(TranslateError::ServiceUnavailable));
    let first = test::call_service(
        &app,
        translate_req(json!({ "text": "one", "targetLanguage": "Arabic" }), None).to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::SERVICE_UNAVAILABLE);
    let cookie = session_cookie(&first);

    let second = test::call_service(
        &app,
        translate_req(json!({ "text": "two", "targetLanguage": "Arabic" }), Some(&cookie))
            .to_request(),
    )
    .await;
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[actix_web::test]
async fn test_disabled_rate_limit_passes_everything() {
    let app = app_with!(FakeTranslator::new(false), RateLimitPolicy::disabled());

    let first = test::call_service(
        &app,
        translate_req(json!({ "text": "x", "targetLanguage": "Hindi" }), None).to_request(),
    )
    .await;
    let cookie = session_cookie(&first);

    for _ in 0..30 {
        let resp = test::call_service(
            &app,
            translate_req(json!({ "text": "x", "targetLanguage": "Hindi" }), Some(&cookie))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}

#[actix_web::test]
async fn test_context_is_injected_and_bounded() {
    let translator = FakeTranslator::new(true);
    let app = app_with!(translator.clone(), RateLimitPolicy::disabled());

    let first = test::call_service(
        &app,
        translate_req(json!({ "text": "t1", "targetLanguage": "Spanish" }), None).to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(translator.last_context(), None);
    let cookie = session_cookie(&first);

    for i in 2..=7 {
        let resp = test::call_service(
            &app,
            translate_req(
                json!({ "text": format!("t{}", i), "targetLanguage": "Spanish" }),
                Some(&cookie),
            )
            .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    // The 7th call saw exchanges 2..=6, oldest first.
    let context = translator.last_context().unwrap();
    assert!(!context.contains("Original (1): t1\n"));
    assert!(context.starts_with("Original (1): t2\n"));
    assert!(context.contains("Translation (5): [Spanish] t6\n"));
    assert!(!context.contains("Original (6)"));
}

#[actix_web::test]
async fn test_hosted_strategy_does_not_collect_context() {
    let translator = FakeTranslator::new(false);
    let app = app_with!(translator.clone(), RateLimitPolicy::disabled());

    let first = test::call_service(
        &app,
        translate_req(json!({ "text": "one", "targetLanguage": "Spanish" }), None).to_request(),
    )
    .await;
    let cookie = session_cookie(&first);
    test::call_service(
        &app,
        translate_req(json!({ "text": "two", "targetLanguage": "Spanish" }), Some(&cookie))
            .to_request(),
    )
    .await;

    assert_eq!(translator.last_context(), None);
}

#[actix_web::test]
async fn test_reset_context_clears_history_and_is_idempotent() {
    let translator = FakeTranslator::new(true);
    let app = app_with!(translator.clone(), RateLimitPolicy::disabled());

    let first = test::call_service(
        &app,
        translate_req(json!({ "text": "t1", "targetLanguage": "Chinese" }), None).to_request(),
    )
    .await;
    let cookie = session_cookie(&first);

    for _ in 0..2 {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/reset-context")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "status": "success" }));
    }

    test::call_service(
        &app,
        translate_req(json!({ "text": "t2", "targetLanguage": "Chinese" }), Some(&cookie))
            .to_request(),
    )
    .await;
    assert_eq!(translator.last_context(), None);
}

#[actix_web::test]
async fn test_tampered_cookie_starts_fresh_session() {
    let app = app_with!(
        FakeTranslator::new(false),
        RateLimitPolicy::new(1, Duration::from_secs(60)),
    );

    let first = test::call_service(
        &app,
        translate_req(json!({ "text": "a", "targetLanguage": "English" }), None).to_request(),
    )
    .await;
    let cookie = session_cookie(&first);
    let forged = Cookie::new(SESSION_COOKIE, format!("{}x", cookie.value()));

    let resp = test::call_service(
        &app,
        translate_req(json!({ "text": "b", "targetLanguage": "English" }), Some(&forged))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_ne!(session_cookie(&resp).value(), cookie.value());
}

#[actix_web::test]
async fn test_models_endpoint() {
    let app = app_with!(FakeTranslator::new(false), RateLimitPolicy::default());

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/models").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["provider"], "Fake");
    assert_eq!(body["availableLanguages"].as_array().unwrap().len(), 7);
}

#[actix_web::test]
async fn test_models_endpoint_without_catalog() {
    let app = app_with!(FakeTranslator::new(true), RateLimitPolicy::default());

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/models").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_health() {
    let app = app_with!(FakeTranslator::new(false), RateLimitPolicy::default());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.response().cookies().next().is_none());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}
