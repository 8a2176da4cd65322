use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // D400 SALES OVERVIEW DASHBOARD
        // ========================================
        .route(
            "/api/d400/catalogs",
            get(handlers::d400_sales_overview::get_catalogs),
        )
        .route(
            "/api/d400/geojson",
            get(handlers::d400_sales_overview::get_geojson),
        )
        .route(
            "/api/d400/render",
            post(handlers::d400_sales_overview::render),
        )
        // Session selection driven by chart clicks
        .route(
            "/api/d400/session",
            get(handlers::d400_sales_overview::get_session),
        )
        .route(
            "/api/d400/session/events",
            post(handlers::d400_sales_overview::post_event),
        )
        .route(
            "/api/d400/session/clear",
            post(handlers::d400_sales_overview::clear_session),
        )
}
