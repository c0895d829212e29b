use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use panel_core::{ListParams, ServiceError};

use crate::api::AppState;
use crate::model::AmbitoDraft;
use crate::service::ambito::AmbitosFiltro;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ambitos", get(list_ambitos).post(create_ambito))
        .route("/ambitos/lote", post(create_ambitos_lote))
        .route(
            "/ambitos/{id}",
            get(get_ambito).put(update_ambito).delete(delete_ambito),
        )
}

#[derive(Debug, Deserialize)]
struct LoteAmbitos {
    #[serde(default)]
    carrera_id: String,
    #[serde(default)]
    ambitos: Vec<AmbitoDraft>,
}

async fn list_ambitos(
    State(svc): State<AppState>,
    Query(filtro): Query<AmbitosFiltro>,
    Query(params): Query<ListParams>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let result = svc
        .list_ambitos(&filtro, &params)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "items": result.items,
        "total": result.total,
    })))
}

async fn create_ambito(
    State(svc): State<AppState>,
    Json(input): Json<AmbitoDraft>,
) -> Result<(axum::http::StatusCode, Json<serde_json::Value>), ServiceError> {
    let ambito = svc.create_ambito(&input).map_err(ServiceError::from)?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(serde_json::json!({
            "mensaje": "Ámbito laboral creado correctamente",
            "ambito": ambito,
        })),
    ))
}

async fn create_ambitos_lote(
    State(svc): State<AppState>,
    Json(input): Json<LoteAmbitos>,
) -> Result<(axum::http::StatusCode, Json<serde_json::Value>), ServiceError> {
    let (insertadas, mensaje) = svc
        .create_ambitos_lote(&input.carrera_id, &input.ambitos)
        .map_err(ServiceError::from)?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(serde_json::json!({
            "mensaje": mensaje,
            "insertadas": insertadas,
        })),
    ))
}

async fn get_ambito(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let ambito = svc.get_ambito(&id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::to_value(ambito).unwrap()))
}

async fn update_ambito(
    State(svc): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<AmbitoDraft>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let ambito = svc
        .update_ambito(&id, &input)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "mensaje": "Ámbito laboral actualizado correctamente",
        "ambito": ambito,
    })))
}

async fn delete_ambito(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    svc.delete_ambito(&id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "mensaje": "Ámbito laboral eliminado correctamente",
    })))
}
