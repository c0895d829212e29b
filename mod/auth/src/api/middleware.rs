use axum::extract::State;
use axum::http::{Method, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use panel_core::ServiceError;

use crate::api::AppState;
use crate::guard::{ActiveSession, GuardState, SessionGuard};
use crate::model::PerfilAdministrador;

/// Request context for an authorized administrator, inserted by the
/// middleware and read by handlers via `Extension<AdminContexto>`.
#[derive(Clone)]
pub struct AdminContexto {
    pub session: ActiveSession,
    /// Loaded fresh for this request.
    pub perfil: PerfilAdministrador,
    /// The bearer token as presented, for operations on the token
    /// itself (renewal, watching).
    pub token: String,
}

/// Session middleware for the whole server.
///
/// Public routes pass straight through. Everything else needs a
/// Bearer token the [`SessionGuard`] resolves to an authorized
/// session; denials answer with the guard's reason.
pub async fn auth_middleware(
    State(svc): State<AppState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    if is_public(req.method(), req.uri().path()) {
        return next.run(req).await;
    }

    let Some(token) = extract_bearer(req.headers()).map(str::to_string) else {
        return ServiceError::Unauthorized("missing authorization header".into())
            .into_response();
    };

    let guard = SessionGuard::new(svc.clone());

    match guard.resolve(&token).await {
        // The watch is not bound, so it unsubscribes right here;
        // per-request checks do not hold a subscription open.
        GuardState::Authorized {
            session, perfil, ..
        } => {
            req.extensions_mut().insert(AdminContexto {
                session,
                perfil,
                token,
            });
            next.run(req).await
        }
        GuardState::Denied(reason) => ServiceError::from(reason).into_response(),
    }
}

/// Routes served without a session: the landing probes, login itself,
/// and the public visit counter.
fn is_public(method: &Method, path: &str) -> bool {
    if *method == Method::GET {
        matches!(path, "/" | "/health" | "/version")
    } else if *method == Method::POST {
        matches!(path, "/auth/login" | "/contenido/visitas")
    } else {
        false
    }
}

/// Extract the Bearer token from the Authorization header.
fn extract_bearer(headers: &axum::http::HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_routes() {
        assert!(is_public(&Method::GET, "/"));
        assert!(is_public(&Method::GET, "/health"));
        assert!(is_public(&Method::POST, "/auth/login"));
        assert!(is_public(&Method::POST, "/contenido/visitas"));

        assert!(!is_public(&Method::GET, "/auth/me"));
        assert!(!is_public(&Method::GET, "/contenido/visitas"));
        assert!(!is_public(&Method::POST, "/auth/logout"));
        assert!(!is_public(&Method::DELETE, "/contenido/carreras/x"));
    }

    #[test]
    fn test_extract_bearer() {
        let mut headers = axum::http::HeaderMap::new();
        assert_eq!(extract_bearer(&headers), None);

        headers.insert("authorization", "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!(extract_bearer(&headers), Some("abc.def.ghi"));

        headers.insert("authorization", "Basic abc".parse().unwrap());
        assert_eq!(extract_bearer(&headers), None);
    }
}
