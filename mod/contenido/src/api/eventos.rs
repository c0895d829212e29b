use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};

use panel_core::{ListParams, ServiceError};

use crate::api::AppState;
use crate::model::EventoDraft;
use crate::service::evento::EventosFiltro;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/eventos", get(list_eventos).post(create_evento))
        .route(
            "/eventos/{id}",
            get(get_evento).put(update_evento).delete(delete_evento),
        )
}

async fn list_eventos(
    State(svc): State<AppState>,
    Query(filtro): Query<EventosFiltro>,
    Query(params): Query<ListParams>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let result = svc
        .list_eventos(&filtro, &params)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "items": result.items,
        "total": result.total,
    })))
}

async fn create_evento(
    State(svc): State<AppState>,
    Json(input): Json<EventoDraft>,
) -> Result<(axum::http::StatusCode, Json<serde_json::Value>), ServiceError> {
    let evento = svc.create_evento(&input).map_err(ServiceError::from)?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(serde_json::json!({
            "mensaje": "Evento creado correctamente",
            "evento": evento,
        })),
    ))
}

async fn get_evento(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let evento = svc.get_evento(&id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::to_value(evento).unwrap()))
}

async fn update_evento(
    State(svc): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<EventoDraft>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let evento = svc
        .update_evento(&id, &input)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "mensaje": "Evento actualizado correctamente",
        "evento": evento,
    })))
}

async fn delete_evento(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    svc.delete_evento(&id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "mensaje": "Evento eliminado correctamente",
    })))
}
