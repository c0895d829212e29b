//! Session resolution for the admin panel.
//!
//! Every entry into the protected area goes through [`SessionGuard::resolve`]:
//! look up the session behind a bearer token, load the administrator
//! profile behind it, and either authorize with a live [`SessionWatch`]
//! or deny with a reason. The guard fails closed: if the provider does
//! not answer within the deadline, the request is denied, never let
//! through on a stale assumption.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::model::PerfilAdministrador;
use crate::service::{AuthError, AuthService};

/// How long a resolution may take before it is denied as timed out.
pub const GUARD_DEADLINE: Duration = Duration::from_secs(10);

/// A session-lifecycle event, broadcast to all subscribers.
#[derive(Debug, Clone)]
pub enum AuthEvent {
    /// A login completed.
    SignedIn {
        admin_id: String,
        session_id: String,
    },
    /// A session ended. `session_id: None` means every session of the
    /// administrator, e.g. on deactivation or deletion.
    SignedOut {
        admin_id: String,
        session_id: Option<String>,
    },
    /// A token was re-issued for an existing session. Watchers must
    /// not treat this as a sign-out.
    TokenRefreshed { session_id: String },
}

/// The session behind a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub admin_id: String,
    pub session_id: String,
}

/// What the guard needs from an auth backend. [`AuthService`] is the
/// in-process implementation; the boundary exists so the guard logic
/// can be exercised against scripted providers.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The session for a bearer token, or `None` when the token does
    /// not map to a live session.
    async fn current_session(&self, token: &str) -> Result<Option<ActiveSession>, AuthError>;

    /// The administrator profile for an id, or `None` when absent.
    async fn admin_profile(&self, id: &str) -> Result<Option<PerfilAdministrador>, AuthError>;

    /// End a session.
    async fn sign_out(&self, session_id: &str) -> Result<(), AuthError>;

    /// Subscribe to session-lifecycle events.
    fn events(&self) -> broadcast::Receiver<AuthEvent>;
}

/// Why a resolution was denied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeniedReason {
    /// No live session behind the token.
    NoSession,
    /// Session is live but its administrator profile is gone.
    ProfileMissing,
    /// The administrator profile is deactivated.
    ProfileInactive,
    /// The provider did not answer within the deadline.
    Timeout,
    /// The provider failed outright.
    Provider(String),
}

impl From<DeniedReason> for panel_core::ServiceError {
    fn from(reason: DeniedReason) -> Self {
        match reason {
            DeniedReason::NoSession => {
                panel_core::ServiceError::Unauthorized("sesión inválida o expirada".into())
            }
            DeniedReason::ProfileMissing => panel_core::ServiceError::PermissionDenied(
                AuthError::SinPermisos.to_string(),
            ),
            DeniedReason::ProfileInactive => panel_core::ServiceError::PermissionDenied(
                AuthError::CuentaDesactivada.to_string(),
            ),
            DeniedReason::Timeout => panel_core::ServiceError::Internal(
                "authorization check timed out".into(),
            ),
            DeniedReason::Provider(msg) => panel_core::ServiceError::Internal(msg),
        }
    }
}

/// Outcome of a resolution.
pub enum GuardState {
    /// The token maps to a live session with an active profile. The
    /// watch is already subscribed; dropping it unsubscribes.
    Authorized {
        session: ActiveSession,
        perfil: PerfilAdministrador,
        watch: SessionWatch,
    },
    Denied(DeniedReason),
}

/// Resolves bearer tokens into [`GuardState`]s against a provider.
pub struct SessionGuard {
    provider: Arc<dyn AuthProvider>,
    deadline: Duration,
}

impl SessionGuard {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self::with_deadline(provider, GUARD_DEADLINE)
    }

    pub fn with_deadline(provider: Arc<dyn AuthProvider>, deadline: Duration) -> Self {
        Self { provider, deadline }
    }

    /// Resolve a bearer token.
    ///
    /// The event subscription is taken before the first provider call,
    /// so a sign-out racing the checks lands in the watch instead of
    /// being lost between "checked" and "watching". If the checks do
    /// not finish within the deadline the token is denied.
    pub async fn resolve(&self, token: &str) -> GuardState {
        let rx = self.provider.events();

        match tokio::time::timeout(self.deadline, self.check(token)).await {
            Ok(Ok((session, perfil))) => GuardState::Authorized {
                watch: SessionWatch {
                    rx,
                    admin_id: session.admin_id.clone(),
                    session_id: session.session_id.clone(),
                },
                session,
                perfil,
            },
            Ok(Err(reason)) => GuardState::Denied(reason),
            Err(_) => GuardState::Denied(DeniedReason::Timeout),
        }
    }

    async fn check(
        &self,
        token: &str,
    ) -> Result<(ActiveSession, PerfilAdministrador), DeniedReason> {
        let session = match self.provider.current_session(token).await {
            Ok(Some(s)) => s,
            Ok(None) => return Err(DeniedReason::NoSession),
            Err(e) => return Err(DeniedReason::Provider(e.to_string())),
        };

        let perfil = match self.provider.admin_profile(&session.admin_id).await {
            Ok(Some(p)) => p,
            Ok(None) => {
                // A live session without a profile must not stay live.
                if let Err(e) = self.provider.sign_out(&session.session_id).await {
                    tracing::warn!(sid = %session.session_id, error = %e, "failed to sign out session without profile");
                }
                return Err(DeniedReason::ProfileMissing);
            }
            Err(e) => return Err(DeniedReason::Provider(e.to_string())),
        };

        if !perfil.activo {
            if let Err(e) = self.provider.sign_out(&session.session_id).await {
                tracing::warn!(sid = %session.session_id, error = %e, "failed to sign out session of inactive profile");
            }
            return Err(DeniedReason::ProfileInactive);
        }

        Ok((session, perfil))
    }
}

/// A live subscription tied to one authorized session. Dropping the
/// watch is the unsubscribe; there is no separate teardown call.
pub struct SessionWatch {
    rx: broadcast::Receiver<AuthEvent>,
    admin_id: String,
    session_id: String,
}

impl SessionWatch {
    /// Wait until this session is signed out.
    ///
    /// Returns on a [`AuthEvent::SignedOut`] naming this session (or
    /// all sessions of its administrator), and also when the event
    /// channel closes or drops events from under us: a watch that can
    /// no longer be sure the session is alive reports it ended.
    /// Sign-ins, token refreshes and other administrators' sign-outs
    /// are ignored.
    pub async fn signed_out(&mut self) {
        loop {
            match self.rx.recv().await {
                Ok(AuthEvent::SignedOut {
                    admin_id,
                    session_id,
                }) => {
                    if admin_id != self.admin_id {
                        continue;
                    }
                    match session_id {
                        Some(sid) if sid != self.session_id => continue,
                        _ => return,
                    }
                }
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        skipped,
                        sid = %self.session_id,
                        "session watch lagged behind the event stream"
                    );
                    return;
                }
                Err(broadcast::error::RecvError::Closed) => return,
            }
        }
    }
}

#[async_trait]
impl AuthProvider for AuthService {
    async fn current_session(&self, token: &str) -> Result<Option<ActiveSession>, AuthError> {
        match self.verify_token(token) {
            Ok(claims) => Ok(Some(ActiveSession {
                admin_id: claims.sub,
                session_id: claims.sid,
            })),
            Err(AuthError::Unauthorized(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn admin_profile(&self, id: &str) -> Result<Option<PerfilAdministrador>, AuthError> {
        match self.get_administrador(id) {
            Ok(p) => Ok(Some(p)),
            Err(AuthError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn sign_out(&self, session_id: &str) -> Result<(), AuthError> {
        match self.revoke_session(session_id) {
            // Already gone is as signed out as it gets.
            Ok(()) | Err(AuthError::NotFound(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn events(&self) -> broadcast::Receiver<AuthEvent> {
        self.subscribe()
    }
}
