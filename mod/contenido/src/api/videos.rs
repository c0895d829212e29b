use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};

use panel_core::{ListParams, ServiceError};

use crate::api::AppState;
use crate::model::VideoDraft;
use crate::service::video::VideosFiltro;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/videos", get(list_videos).post(create_video))
        .route(
            "/videos/{id}",
            get(get_video).put(update_video).delete(delete_video),
        )
}

async fn list_videos(
    State(svc): State<AppState>,
    Query(filtro): Query<VideosFiltro>,
    Query(params): Query<ListParams>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let result = svc
        .list_videos(&filtro, &params)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "items": result.items,
        "total": result.total,
    })))
}

async fn create_video(
    State(svc): State<AppState>,
    Json(input): Json<VideoDraft>,
) -> Result<(axum::http::StatusCode, Json<serde_json::Value>), ServiceError> {
    let video = svc.create_video(&input).map_err(ServiceError::from)?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(serde_json::json!({
            "mensaje": "Video creado correctamente",
            "video": video,
        })),
    ))
}

async fn get_video(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let video = svc.get_video(&id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::to_value(video).unwrap()))
}

async fn update_video(
    State(svc): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<VideoDraft>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let video = svc.update_video(&id, &input).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "mensaje": "Video actualizado correctamente",
        "video": video,
    })))
}

async fn delete_video(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    svc.delete_video(&id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "mensaje": "Video eliminado correctamente",
    })))
}
