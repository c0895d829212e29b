//! Route registration — module routes plus the system endpoints.

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::response::{IntoResponse, Redirect};
use axum::routing::get;

use auth::api::auth_middleware;
use auth::service::AuthService;

/// Build the complete router with all routes.
pub fn build_router(auth: Arc<AuthService>, module_routes: Vec<(&str, Router)>) -> Router {
    // System endpoints (public).
    let mut app = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/version", get(version));

    // Mount each module's routes under /{module_name}. Module routers
    // already carry their own state.
    for (name, router) in module_routes {
        app = app.nest(&format!("/{}", name), router);
    }

    // The session middleware wraps everything; public paths pass
    // through inside the middleware itself.
    app.layer(middleware::from_fn_with_state(auth, auth_middleware))
}

/// The console has no public content of its own; the root sends the
/// browser to the panel login.
async fn index() -> impl IntoResponse {
    Redirect::temporary("/auth/login")
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "paneld",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
