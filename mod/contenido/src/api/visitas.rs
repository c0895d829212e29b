use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};

use panel_core::ServiceError;

use crate::api::AppState;
use crate::model::VisitaDraft;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/visitas", post(registrar_visita))
        .route("/visitas/resumen", get(resumen_visitas))
}

/// POST /contenido/visitas — the public tracking endpoint. The site's
/// tracker fires and forgets; the response only confirms the recorded
/// id.
async fn registrar_visita(
    State(svc): State<AppState>,
    Json(input): Json<VisitaDraft>,
) -> Result<(axum::http::StatusCode, Json<serde_json::Value>), ServiceError> {
    let visita = svc.registrar_visita(&input).map_err(ServiceError::from)?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(serde_json::json!({ "id": visita.id })),
    ))
}

async fn resumen_visitas(
    State(svc): State<AppState>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let resumen = svc.resumen_visitas().map_err(ServiceError::from)?;
    Ok(Json(serde_json::to_value(resumen).unwrap()))
}
