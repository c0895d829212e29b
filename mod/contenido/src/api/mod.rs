mod ambitos;
mod carreras;
mod configuracion;
mod docentes;
mod eventos;
mod noticias;
mod perfil_egresado;
mod plan_estudios;
mod resumen;
mod videos;
mod visitas;

use std::sync::Arc;

use axum::Router;

use crate::service::ContentService;

/// Shared application state.
pub type AppState = Arc<ContentService>;

/// Build the contenido API router.
///
/// All routes are relative — the server nests them under `/contenido`
/// and layers the auth middleware over the whole app. Only
/// `POST /visitas` is on the public list.
pub fn build_router(svc: Arc<ContentService>) -> Router {
    Router::new()
        .merge(carreras::routes())
        .merge(docentes::routes())
        .merge(plan_estudios::routes())
        .merge(eventos::routes())
        .merge(noticias::routes())
        .merge(videos::routes())
        .merge(ambitos::routes())
        .merge(perfil_egresado::routes())
        .merge(configuracion::routes())
        .merge(visitas::routes())
        .merge(resumen::routes())
        .with_state(svc)
}
