use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::{metrics_app, metrics_middleware};
use crate::middleware::auth::authenticate;
use crate::middleware::role::{require_admin, require_user};
use crate::modules::auth::router::init_auth_router;
use crate::modules::contacts::router::init_contacts_router;
use crate::modules::health::router::init_health_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

/// Builds the application.
///
/// `/api/v1/signup` and `/api/v1/login` are public, user administration sits
/// behind the admin gate and everything under `/api/v1/users/{user_id}` behind
/// the user gate. `/metrics` is only mounted when a recorder handle is given.
pub fn init_router(state: AppState, metrics: Option<PrometheusHandle>) -> Router {
    let protected = Router::new()
        .merge(
            init_users_router()
                .route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
        )
        .nest(
            "/users/{user_id}/contacts",
            init_contacts_router()
                .route_layer(middleware::from_fn_with_state(state.clone(), require_user)),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let api = Router::new().merge(init_auth_router()).merge(protected);

    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .merge(init_health_router())
        .nest("/api/v1", api)
        .with_state(state.clone());

    if let Some(handle) = metrics {
        router = router.merge(metrics_app(handle));
    }

    router
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}

fn cors_layer(state: &AppState) -> CorsLayer {
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
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}
