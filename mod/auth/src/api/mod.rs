mod administradores;
mod login;
mod me;
pub mod middleware;
mod vigilar;

use std::sync::Arc;

use axum::Router;

use crate::service::AuthService;

pub use middleware::{auth_middleware, AdminContexto};

/// Shared application state.
pub type AppState = Arc<AuthService>;

/// Build the auth API router.
///
/// All routes are relative — the server nests them under `/auth` and
/// applies [`auth_middleware`] over the whole app.
pub fn build_router(svc: Arc<AuthService>) -> Router {
    Router::new()
        .merge(login::routes())
        .merge(me::routes())
        .merge(administradores::routes())
        .merge(vigilar::routes())
        .with_state(svc)
}
