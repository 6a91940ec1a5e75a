//! HTTP handlers and route configuration.

mod context;
mod health;
mod models;
mod translate;

#[cfg(test)]
mod tests;

use actix_web::web;

use crate::middleware::session::SessionMiddleware;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .app_data(translate::json_config())
                .wrap(SessionMiddleware)
                .route("/translate", web::post().to(translate::translate))
                .route("/reset-context", web::post().to(context::reset_context))
                .route("/models", web::get().to(models::list_models)),
        );
}
