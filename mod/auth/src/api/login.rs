use axum::extract::{Extension, State};
use axum::routing::post;
use axum::{Json, Router};

use panel_core::ServiceError;

use crate::api::{AdminContexto, AppState};
use crate::model::LoginRequest;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/renovar", post(renovar))
}

/// POST /auth/login — exchange credentials for a session token.
async fn login(
    State(svc): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let (token, perfil) = svc
        .login(&input.email, &input.password)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "token": token,
        "perfil": perfil,
    })))
}

/// POST /auth/logout — end the caller's session.
async fn logout(
    State(svc): State<AppState>,
    Extension(ctx): Extension<AdminContexto>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    svc.cerrar_sesion(&ctx.token).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({"mensaje": "Sesión cerrada"})))
}

/// POST /auth/renovar — re-issue the caller's token with a fresh
/// expiry, on the same session.
async fn renovar(
    State(svc): State<AppState>,
    Extension(ctx): Extension<AdminContexto>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let token = svc.renovar(&ctx.token).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({"token": token})))
}
