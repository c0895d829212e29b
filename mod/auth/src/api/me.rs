use axum::extract::Extension;
use axum::routing::get;
use axum::{Json, Router};

use panel_core::ServiceError;

use crate::api::{AdminContexto, AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/me", get(me))
}

/// GET /auth/me — the caller's administrator profile, as loaded by
/// the middleware for this request.
async fn me(
    Extension(ctx): Extension<AdminContexto>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    Ok(Json(serde_json::to_value(ctx.perfil).unwrap()))
}
