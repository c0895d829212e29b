use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use panel_core::ServiceError;

use crate::api::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/configuracion",
        get(get_configuracion).put(save_configuracion),
    )
}

/// GET /contenido/configuracion — the single configuration row, or
/// `null` before the first save.
async fn get_configuracion(
    State(svc): State<AppState>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let config = svc.get_configuracion().map_err(ServiceError::from)?;
    Ok(Json(serde_json::to_value(config).unwrap()))
}

/// PUT /contenido/configuracion — merge-patch save. A partial body only
/// touches the fields it names.
async fn save_configuracion(
    State(svc): State<AppState>,
    Json(patch): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let config = svc.save_configuracion(&patch).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "mensaje": "Configuración guardada correctamente",
        "configuracion": config,
    })))
}
