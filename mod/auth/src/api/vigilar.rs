use std::time::Duration;

use axum::extract::{Extension, State};
use axum::routing::get;
use axum::{Json, Router};

use panel_core::ServiceError;

use crate::api::{AdminContexto, AppState};
use crate::guard::{GuardState, SessionGuard};

/// How long a poll hangs before answering "still signed in". Kept
/// under common proxy idle timeouts.
const POLL_WINDOW: Duration = Duration::from_secs(25);

pub fn routes() -> Router<AppState> {
    Router::new().route("/sesiones/vigilar", get(vigilar))
}

/// GET /auth/sesiones/vigilar — long poll on the caller's session.
///
/// Answers `{"vigente": false}` the moment the session is signed out
/// (from anywhere), or `{"vigente": true}` when the poll window passes
/// without one. Clients loop on this to drop to the login screen as
/// soon as their session dies elsewhere.
async fn vigilar(
    State(svc): State<AppState>,
    Extension(ctx): Extension<AdminContexto>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let guard = SessionGuard::new(svc.clone());

    match guard.resolve(&ctx.token).await {
        GuardState::Authorized { mut watch, .. } => {
            let vigente = tokio::time::timeout(POLL_WINDOW, watch.signed_out())
                .await
                .is_err();
            Ok(Json(serde_json::json!({"vigente": vigente})))
        }
        // Denied between the middleware check and here: it is over.
        GuardState::Denied(_) => Ok(Json(serde_json::json!({"vigente": false}))),
    }
}
