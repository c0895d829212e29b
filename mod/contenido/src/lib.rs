//! Contenido module — everything the public faculty site shows.
//!
//! # Resources
//!
//! - **Carrera** — a degree program; parent of docentes, plan de
//!   estudios, videos, ámbitos laborales and perfil del egresado
//! - **Evento / Noticia** — the news section
//! - **ConfiguracionFacultad** — single-row site branding
//! - **Visita** — insert-only page-view log feeding the dashboard
//!
//! Every form saves through the generic lifecycle in
//! [`service::form`]: ordered validation with user-facing Spanish
//! messages, then one insert or update. The three "agregar masivo"
//! screens use its bulk variant, which writes all rows in a single
//! transaction or none at all.
//!
//! # Usage
//!
//! ```ignore
//! use contenido::ContenidoModule;
//!
//! let module = ContenidoModule::new(sql)?;
//! let router = module.routes(); // Mount under /contenido
//! ```

pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use panel_core::Module;

use crate::service::ContentService;

/// Contenido module implementing the Module trait.
pub struct ContenidoModule {
    service: Arc<ContentService>,
}

impl ContenidoModule {
    /// Create a new ContenidoModule over a SQL store.
    pub fn new(sql: Arc<dyn panel_sql::SQLStore>) -> Result<Self, panel_core::ServiceError> {
        let service = ContentService::new(sql).map_err(panel_core::ServiceError::from)?;
        Ok(Self { service })
    }

    /// Get a reference to the underlying ContentService.
    pub fn service(&self) -> &Arc<ContentService> {
        &self.service
    }
}

impl Module for ContenidoModule {
    fn name(&self) -> &str {
        "contenido"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}
