//! Auth module — panel sign-in, session guard, administrator accounts.
//!
//! # Resources
//!
//! - **PerfilAdministrador** — who may enter the panel, with role and
//!   active flag
//! - **Credencial** — login identity (argon2id hash), paired 1:1 with
//!   a profile under the same id
//! - **Sesion** — JWT issuance record; tokens die with their session
//!
//! The [`guard`] module is the heart: every protected request runs
//! through [`guard::SessionGuard`], and long-lived watches on a
//! session come from the same resolution.
//!
//! # Usage
//!
//! ```ignore
//! use auth::{AuthModule, service::AuthConfig};
//!
//! let module = AuthModule::new(sql, AuthConfig::default())?;
//! let router = module.routes(); // Mount under /auth
//! ```

pub mod api;
pub mod guard;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use panel_core::Module;

use crate::service::{AuthConfig, AuthService};

/// Auth module implementing the Module trait.
pub struct AuthModule {
    service: Arc<AuthService>,
}

impl AuthModule {
    /// Create a new AuthModule over a SQL store.
    pub fn new(
        sql: Arc<dyn panel_sql::SQLStore>,
        config: AuthConfig,
    ) -> Result<Self, panel_core::ServiceError> {
        let service = AuthService::new(sql, config).map_err(panel_core::ServiceError::from)?;
        Ok(Self { service })
    }

    /// Get a reference to the underlying AuthService.
    pub fn service(&self) -> &Arc<AuthService> {
        &self.service
    }
}

impl Module for AuthModule {
    fn name(&self) -> &str {
        "auth"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}
