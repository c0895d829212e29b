use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};

use panel_core::{ListParams, ServiceError};

use crate::api::AppState;
use crate::model::{AdministradorCrear, AdministradorEditar};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/administradores",
            get(list_administradores).post(create_administrador),
        )
        .route(
            "/administradores/{id}",
            get(get_administrador)
                .put(update_administrador)
                .delete(delete_administrador),
        )
}

async fn list_administradores(
    State(svc): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let result = svc.list_administradores(&params).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "items": result.items,
        "total": result.total,
    })))
}

async fn create_administrador(
    State(svc): State<AppState>,
    Json(input): Json<AdministradorCrear>,
) -> Result<(axum::http::StatusCode, Json<serde_json::Value>), ServiceError> {
    let perfil = svc.create_administrador(input).map_err(ServiceError::from)?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(serde_json::json!({
            "mensaje": "Administrador creado correctamente",
            "administrador": perfil,
        })),
    ))
}

async fn get_administrador(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let perfil = svc.get_administrador(&id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::to_value(perfil).unwrap()))
}

/// PUT /auth/administradores/{id} — profile update, with an optional
/// password change. The password change is a separate identity
/// operation; when it fails after the profile update went through,
/// the response says so instead of pretending nothing happened.
async fn update_administrador(
    State(svc): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<AdministradorEditar>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let perfil = svc
        .update_administrador(&id, &input)
        .map_err(ServiceError::from)?;

    let mensaje = match input.password_nueva() {
        Some(pw) => match svc.cambiar_password(&id, pw) {
            Ok(()) => "Administrador actualizado correctamente",
            Err(e) => {
                tracing::warn!(admin = %id, error = %e, "password change failed after profile update");
                "Perfil actualizado pero hubo un error al cambiar la contraseña"
            }
        },
        None => "Administrador actualizado correctamente",
    };

    Ok(Json(serde_json::json!({
        "mensaje": mensaje,
        "administrador": perfil,
    })))
}

async fn delete_administrador(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    svc.delete_administrador(&id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "mensaje": "Administrador eliminado correctamente",
    })))
}
