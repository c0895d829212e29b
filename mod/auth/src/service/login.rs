use panel_sql::Value;

use crate::guard::AuthEvent;
use crate::model::{Credencial, PerfilAdministrador, TokenSesion};
use crate::service::{password, AuthError, AuthService};

/// Loose shape check for login emails: something before the `@`,
/// a domain with a dot, no whitespace.
pub(crate) fn es_email_valido(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, dominio)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !dominio.is_empty()
        && dominio.contains('.')
        && !dominio.starts_with('.')
        && !dominio.ends_with('.')
}

impl AuthService {
    /// Panel sign-in.
    ///
    /// Checks run in a fixed order so the caller always sees the most
    /// specific failure: empty fields, malformed email, unknown email
    /// or wrong password (indistinguishable), unconfirmed email. Only
    /// then is a session issued; if the credential turns out to have
    /// no usable administrator profile, that fresh session is signed
    /// out again before the denial is returned.
    pub fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(TokenSesion, PerfilAdministrador), AuthError> {
        let email = email.trim();

        if email.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "Por favor completa todos los campos".into(),
            ));
        }

        if !es_email_valido(email) {
            return Err(AuthError::Validation(
                "Por favor, ingresa un correo electrónico válido".into(),
            ));
        }

        let email = email.to_lowercase();

        let credencial = match self.credencial_por_email(&email)? {
            Some(c) => c,
            None => return Err(AuthError::CredencialesInvalidas),
        };

        if !password::verificar_password(password, &credencial.password_hash)? {
            return Err(AuthError::CredencialesInvalidas);
        }

        if !credencial.confirmado {
            return Err(AuthError::EmailNoConfirmado);
        }

        let (tokens, sesion) = self.emitir_sesion(&credencial)?;

        let mut perfil: PerfilAdministrador = match self.get_record("administradores", &credencial.id)
        {
            Ok(p) => p,
            Err(AuthError::NotFound(_)) => {
                if let Err(e) = self.revoke_session(&sesion.id) {
                    tracing::warn!(sid = %sesion.id, error = %e, "failed to revoke session without profile");
                }
                return Err(AuthError::SinPermisos);
            }
            Err(e) => return Err(e),
        };

        if !perfil.activo {
            if let Err(e) = self.revoke_session(&sesion.id) {
                tracing::warn!(sid = %sesion.id, error = %e, "failed to revoke session of deactivated account");
            }
            return Err(AuthError::CuentaDesactivada);
        }

        // Best effort; a login must not fail over a timestamp.
        let now = panel_core::now_rfc3339();
        perfil.ultimo_acceso = Some(now.clone());
        perfil.updated_at = now.clone();
        if let Err(e) = self.update_record(
            "administradores",
            &perfil.id,
            &perfil,
            &[("updated_at", Value::Text(now))],
        ) {
            tracing::warn!(admin = %perfil.id, error = %e, "failed to record last access");
        }

        self.publish(AuthEvent::SignedIn {
            admin_id: perfil.id.clone(),
            session_id: sesion.id.clone(),
        });

        tracing::info!(admin = %perfil.id, "administrator signed in");

        Ok((tokens, perfil))
    }

    pub(crate) fn credencial_por_email(
        &self,
        email: &str,
    ) -> Result<Option<Credencial>, AuthError> {
        let rows = self.sql
            .query(
                "SELECT data FROM credenciales WHERE email = ?1",
                &[Value::Text(email.to_string())],
            )
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        let Some(row) = rows.first() else {
            return Ok(None);
        };
        let data = row
            .get_str("data")
            .ok_or_else(|| AuthError::Internal("missing data column".into()))?;
        let credencial =
            serde_json::from_str(data).map_err(|e| AuthError::Internal(e.to_string()))?;
        Ok(Some(credencial))
    }
}
