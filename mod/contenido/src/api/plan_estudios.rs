use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use panel_core::{ListParams, ServiceError};

use crate::api::AppState;
use crate::model::PlanEstudiosDraft;
use crate::service::plan::PlanFiltro;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/plan-estudios", get(list_plan_estudios).post(create_materia))
        .route("/plan-estudios/lote", post(create_materias_lote))
        .route(
            "/plan-estudios/{id}",
            get(get_materia).put(update_materia).delete(delete_materia),
        )
}

/// Body of the bulk (agregar masivo) endpoint: one carrera, many rows.
#[derive(Debug, Deserialize)]
struct LoteMaterias {
    #[serde(default)]
    carrera_id: String,
    #[serde(default)]
    materias: Vec<PlanEstudiosDraft>,
}

async fn list_plan_estudios(
    State(svc): State<AppState>,
    Query(filtro): Query<PlanFiltro>,
    Query(params): Query<ListParams>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let result = svc
        .list_plan_estudios(&filtro, &params)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "items": result.items,
        "total": result.total,
    })))
}

async fn create_materia(
    State(svc): State<AppState>,
    Json(input): Json<PlanEstudiosDraft>,
) -> Result<(axum::http::StatusCode, Json<serde_json::Value>), ServiceError> {
    let materia = svc.create_materia(&input).map_err(ServiceError::from)?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(serde_json::json!({
            "mensaje": "Materia creada correctamente",
            "materia": materia,
        })),
    ))
}

async fn create_materias_lote(
    State(svc): State<AppState>,
    Json(input): Json<LoteMaterias>,
) -> Result<(axum::http::StatusCode, Json<serde_json::Value>), ServiceError> {
    let (insertadas, mensaje) = svc
        .create_materias_lote(&input.carrera_id, &input.materias)
        .map_err(ServiceError::from)?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(serde_json::json!({
            "mensaje": mensaje,
            "insertadas": insertadas,
        })),
    ))
}

async fn get_materia(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let materia = svc.get_materia(&id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::to_value(materia).unwrap()))
}

async fn update_materia(
    State(svc): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<PlanEstudiosDraft>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let materia = svc
        .update_materia(&id, &input)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "mensaje": "Materia actualizada correctamente",
        "materia": materia,
    })))
}

async fn delete_materia(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    svc.delete_materia(&id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "mensaje": "Materia eliminada correctamente",
    })))
}
