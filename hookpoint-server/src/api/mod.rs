//! API implementation for the hookpoint HTTP server

use std::sync::Arc;

use axum::{Router, routing::any};

use crate::{error::ServiceError, state::AppState};

pub mod hooks;

/// Create the main router with all API endpoints
///
/// The recognized surface is exactly the hooks collection and a numeric
/// member below it; the fallback answers for every other path, whatever the
/// method. Method dispatch happens inside the handlers so that unsupported
/// methods on a recognized path report 501 rather than the router's default.
pub fn create_router(state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .route("/hooks", any(hooks::collection))
        .route("/hooks/", any(hooks::collection))
        .route("/hooks/{id}", any(hooks::member))
        .with_state(state);

    Router::new()
        .nest("/api", api_router)
        .fallback(route_not_found)
}

async fn route_not_found() -> ServiceError {
    ServiceError::RouteNotFound
}
