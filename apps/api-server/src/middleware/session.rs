//! Session cookie middleware and extractor.
//!
//! The cookie only carries an opaque token, signed with the server key.
//! Session contents live in the `SessionStore`.

use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest,
    cookie::{Cookie, CookieJar, Key, SameSite},
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    web,
};
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use uuid::Uuid;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "medtrans_session";

/// Opaque session identifier resolved from the signed cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(pub String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Read and verify the token from a request cookie.
///
/// Tampered, unsigned or malformed values are treated as absent.
fn verified_token(req: &ServiceRequest, key: &Key) -> Option<String> {
    let cookie = req.cookie(SESSION_COOKIE)?;
    let mut jar = CookieJar::new();
    jar.add_original(cookie);

    let value = jar.signed(key).get(SESSION_COOKIE)?.value().to_string();
    Uuid::parse_str(&value).ok().map(|_| value)
}

fn signed_cookie(token: String, key: &Key, secure: bool) -> Option<Cookie<'static>> {
    let mut jar = CookieJar::new();
    jar.signed_mut(key).add(
        Cookie::build(SESSION_COOKIE, token)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(secure)
            .finish(),
    );
    jar.get(SESSION_COOKIE).cloned()
}

/// Middleware that attaches a session token to each request, issuing a new
/// signed cookie when the client has none.
pub struct SessionMiddleware;

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SessionService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionService { service }))
    }
}

pub struct SessionService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for SessionService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
            tracing::error!("AppState not found in app data");
            let fut = self.service.call(req);
            return Box::pin(fut);
        };

        let (token, is_new) = match verified_token(&req, &state.session_key) {
            Some(token) => (token, false),
            None => (Uuid::new_v4().to_string(), true),
        };

        req.extensions_mut().insert(SessionToken(token.clone()));

        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;

            if is_new {
                if let Some(cookie) =
                    signed_cookie(token, &state.session_key, state.secure_cookies)
                {
                    res.response_mut().add_cookie(&cookie)?;
                }
            }

            Ok(res)
        })
    }
}

/// Extractor to get the session token in handlers.
impl FromRequest for SessionToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = req.extensions().get::<SessionToken>().cloned();

        ready(token.ok_or_else(|| {
            AppError::Internal("SessionMiddleware is not installed on this route".to_string())
        }))
    }
}
