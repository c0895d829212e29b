use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};

use panel_core::{ListParams, ServiceError};

use crate::api::AppState;
use crate::model::CarreraDraft;
use crate::service::carrera::CarrerasFiltro;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/carreras", get(list_carreras).post(create_carrera))
        .route(
            "/carreras/{id}",
            get(get_carrera).put(update_carrera).delete(delete_carrera),
        )
        .route("/carreras/{id}/desglose", get(desglose_carrera))
}

async fn list_carreras(
    State(svc): State<AppState>,
    Query(filtro): Query<CarrerasFiltro>,
    Query(params): Query<ListParams>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let result = svc
        .list_carreras(&filtro, &params)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "items": result.items,
        "total": result.total,
    })))
}

async fn create_carrera(
    State(svc): State<AppState>,
    Json(input): Json<CarreraDraft>,
) -> Result<(axum::http::StatusCode, Json<serde_json::Value>), ServiceError> {
    let carrera = svc.create_carrera(input).map_err(ServiceError::from)?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(serde_json::json!({
            "mensaje": "Carrera creada correctamente",
            "carrera": carrera,
        })),
    ))
}

async fn get_carrera(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let carrera = svc.get_carrera(&id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::to_value(carrera).unwrap()))
}

async fn update_carrera(
    State(svc): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<CarreraDraft>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let carrera = svc
        .update_carrera(&id, &input)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "mensaje": "Carrera actualizada correctamente",
        "carrera": carrera,
    })))
}

async fn delete_carrera(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    svc.delete_carrera(&id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "mensaje": "Carrera eliminada correctamente",
    })))
}

/// GET /contenido/carreras/{id}/desglose — curriculum hour breakdown
/// for the carrera detail page.
async fn desglose_carrera(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let desglose = svc.desglose_carrera(&id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::to_value(desglose).unwrap()))
}
