use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use panel_core::{ListParams, ServiceError};

use crate::api::AppState;
use crate::model::PerfilEgresadoDraft;
use crate::service::perfil_egresado::PerfilFiltro;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/perfil-egresado",
            get(list_perfil_egresado).post(create_competencia),
        )
        .route("/perfil-egresado/lote", post(create_competencias_lote))
        .route(
            "/perfil-egresado/{id}",
            get(get_competencia)
                .put(update_competencia)
                .delete(delete_competencia),
        )
}

#[derive(Debug, Deserialize)]
struct LoteCompetencias {
    #[serde(default)]
    carrera_id: String,
    #[serde(default)]
    competencias: Vec<PerfilEgresadoDraft>,
}

async fn list_perfil_egresado(
    State(svc): State<AppState>,
    Query(filtro): Query<PerfilFiltro>,
    Query(params): Query<ListParams>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let result = svc
        .list_perfil_egresado(&filtro, &params)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "items": result.items,
        "total": result.total,
    })))
}

async fn create_competencia(
    State(svc): State<AppState>,
    Json(input): Json<PerfilEgresadoDraft>,
) -> Result<(axum::http::StatusCode, Json<serde_json::Value>), ServiceError> {
    let competencia = svc.create_competencia(&input).map_err(ServiceError::from)?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(serde_json::json!({
            "mensaje": "Competencia creada correctamente",
            "competencia": competencia,
        })),
    ))
}

async fn create_competencias_lote(
    State(svc): State<AppState>,
    Json(input): Json<LoteCompetencias>,
) -> Result<(axum::http::StatusCode, Json<serde_json::Value>), ServiceError> {
    let (insertadas, mensaje) = svc
        .create_competencias_lote(&input.carrera_id, &input.competencias)
        .map_err(ServiceError::from)?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(serde_json::json!({
            "mensaje": mensaje,
            "insertadas": insertadas,
        })),
    ))
}

async fn get_competencia(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let competencia = svc.get_competencia(&id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::to_value(competencia).unwrap()))
}

async fn update_competencia(
    State(svc): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<PerfilEgresadoDraft>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let competencia = svc
        .update_competencia(&id, &input)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "mensaje": "Competencia actualizada correctamente",
        "competencia": competencia,
    })))
}

async fn delete_competencia(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    svc.delete_competencia(&id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "mensaje": "Competencia eliminada correctamente",
    })))
}
