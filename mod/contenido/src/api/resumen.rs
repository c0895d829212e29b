use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use panel_core::ServiceError;

use crate::api::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/resumen", get(resumen_panel))
}

/// GET /contenido/resumen — dashboard counters.
async fn resumen_panel(
    State(svc): State<AppState>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let resumen = svc.resumen_panel().map_err(ServiceError::from)?;
    Ok(Json(serde_json::to_value(resumen).unwrap()))
}
