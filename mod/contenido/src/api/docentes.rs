use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};

use panel_core::{ListParams, ServiceError};

use crate::api::AppState;
use crate::model::DocenteDraft;
use crate::service::docente::DocentesFiltro;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/docentes", get(list_docentes).post(create_docente))
        .route(
            "/docentes/{id}",
            get(get_docente).put(update_docente).delete(delete_docente),
        )
}

async fn list_docentes(
    State(svc): State<AppState>,
    Query(filtro): Query<DocentesFiltro>,
    Query(params): Query<ListParams>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let result = svc
        .list_docentes(&filtro, &params)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "items": result.items,
        "total": result.total,
    })))
}

async fn create_docente(
    State(svc): State<AppState>,
    Json(input): Json<DocenteDraft>,
) -> Result<(axum::http::StatusCode, Json<serde_json::Value>), ServiceError> {
    let docente = svc.create_docente(&input).map_err(ServiceError::from)?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(serde_json::json!({
            "mensaje": "Docente creado correctamente",
            "docente": docente,
        })),
    ))
}

async fn get_docente(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let docente = svc.get_docente(&id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::to_value(docente).unwrap()))
}

async fn update_docente(
    State(svc): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<DocenteDraft>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let docente = svc
        .update_docente(&id, &input)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "mensaje": "Docente actualizado correctamente",
        "docente": docente,
    })))
}

async fn delete_docente(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    svc.delete_docente(&id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "mensaje": "Docente eliminado correctamente",
    })))
}
