use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};

use panel_core::{ListParams, ServiceError};

use crate::api::AppState;
use crate::model::NoticiaDraft;
use crate::service::noticia::NoticiasFiltro;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/noticias", get(list_noticias).post(create_noticia))
        .route(
            "/noticias/{id}",
            get(get_noticia).put(update_noticia).delete(delete_noticia),
        )
}

async fn list_noticias(
    State(svc): State<AppState>,
    Query(filtro): Query<NoticiasFiltro>,
    Query(params): Query<ListParams>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let result = svc
        .list_noticias(&filtro, &params)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "items": result.items,
        "total": result.total,
    })))
}

async fn create_noticia(
    State(svc): State<AppState>,
    Json(input): Json<NoticiaDraft>,
) -> Result<(axum::http::StatusCode, Json<serde_json::Value>), ServiceError> {
    let noticia = svc.create_noticia(&input).map_err(ServiceError::from)?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(serde_json::json!({
            "mensaje": "Noticia creada correctamente",
            "noticia": noticia,
        })),
    ))
}

async fn get_noticia(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let noticia = svc.get_noticia(&id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::to_value(noticia).unwrap()))
}

async fn update_noticia(
    State(svc): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<NoticiaDraft>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let noticia = svc
        .update_noticia(&id, &input)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "mensaje": "Noticia actualizada correctamente",
        "noticia": noticia,
    })))
}

async fn delete_noticia(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    svc.delete_noticia(&id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "mensaje": "Noticia eliminada correctamente",
    })))
}
