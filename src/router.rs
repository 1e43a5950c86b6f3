use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_governor::GovernorLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::role::require_admin;
use crate::modules::auth::router::init_auth_router;
use crate::modules::books::router::init_books_router;
use crate::modules::booksellers::router::{
    init_booksellers_admin_router, init_booksellers_router,
};
use crate::modules::favorites::router::init_favorites_router;
use crate::modules::orders::router::init_orders_router;
use crate::modules::stats::router::init_stats_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    let auth_governor = Arc::new(state.rate_limit_config.auth_governor_config());

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest(
                    "/auth",
                    init_auth_router().layer(GovernorLayer::new(auth_governor)),
                )
                .nest("/users", init_users_router())
                .nest(
                    "/booksellers",
                    init_booksellers_router().merge(
                        init_booksellers_admin_router().route_layer(
                            middleware::from_fn_with_state(state.clone(), require_admin),
                        ),
                    ),
                )
                .nest("/books", init_books_router())
                .nest("/favorites", init_favorites_router())
                .nest("/orders", init_orders_router())
                .nest("/stats", init_stats_router()),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
