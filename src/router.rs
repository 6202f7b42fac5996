use std::sync::Arc;
use axum::{
    Extension,
    Json,
    Router,
    extract::Request,
    http::{HeaderValue, Method, StatusCode, header::{ACCEPT, CONTENT_TYPE}},
    response::IntoResponse,
};
use log::warn;
use tower_http::{cors::{AllowOrigin, Any, CorsLayer}, trace::TraceLayer};
use crate::{
    AppState,
    config::Config,
    dto::ErrorRouting,
    modules::comment::handler::comment_router,
};

async fn not_found(request: Request) -> impl IntoResponse {
    let response = Json(ErrorRouting{
        status: "error".to_string(),
        message: format!("Route {} {} is not exists", request.method(), request.uri().path()),
    });
    (StatusCode::NOT_FOUND, response)
}
async fn not_allowed(request: Request) -> impl IntoResponse {
    let response = Json(ErrorRouting{
        status: "error".to_string(),
        message: format!("{} {} is not valid", request.method(), request.uri().path()),
    });
    (StatusCode::METHOD_NOT_ALLOWED, response)
}

/// Any origin in dev mode, otherwise only the blog's own https origin.
pub fn cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .allow_methods([Method::POST, Method::OPTIONS]);
    if config.dev_mode {
        return cors.allow_origin(Any);
    }
    let origin = format!("https://{}", config.domain);
    match origin.parse::<HeaderValue>() {
        Ok(origin) => cors.allow_origin(AllowOrigin::exact(origin)),
        Err(_) => {
            warn!("COMMENT_DOMAIN {:?} is not a valid origin, cross-origin requests will be refused", config.domain);
            cors.allow_origin(AllowOrigin::list(Vec::<HeaderValue>::new()))
        }
    }
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let cors = cors_layer(&app_state.env);
    let base_path = app_state.env.base_path();
    let api_route = comment_router()
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));
    Router::new().nest(base_path, api_route)
        .fallback(not_found)
        .method_not_allowed_fallback(not_allowed)
        .layer(cors)
}
