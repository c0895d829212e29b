use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use panel_core::new_id;
use panel_sql::Value;

use crate::guard::AuthEvent;
use crate::model::{Claims, Credencial, Sesion, TokenSesion};
use crate::service::{AuthError, AuthService};

impl AuthService {
    /// Issue a signed JWT for a verified credential and record the
    /// session. Callers are responsible for the event that announces
    /// the sign-in; issuance alone is silent.
    pub(crate) fn emitir_sesion(
        &self,
        credencial: &Credencial,
    ) -> Result<(TokenSesion, Sesion), AuthError> {
        let session_id = new_id();
        let now = chrono::Utc::now();
        let exp = now + chrono::Duration::seconds(self.config.token_ttl);

        let claims = Claims {
            sub: credencial.id.clone(),
            email: credencial.email.clone(),
            sid: session_id.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("JWT encode failed: {}", e)))?;

        let sesion = Sesion {
            id: session_id,
            admin_id: credencial.id.clone(),
            issued_at: now.to_rfc3339(),
            expires_at: exp.to_rfc3339(),
            revoked: false,
            user_agent: None,
            ip_address: None,
        };

        self.insert_record(
            "sesiones",
            &sesion.id,
            &sesion,
            &[
                ("admin_id", Value::Text(sesion.admin_id.clone())),
                ("revoked", Value::Integer(0)),
                ("issued_at", Value::Text(sesion.issued_at.clone())),
                ("expires_at", Value::Text(sesion.expires_at.clone())),
            ],
        )?;

        let tokens = TokenSesion {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.config.token_ttl,
        };

        Ok((tokens, sesion))
    }

    /// Verify and decode a JWT. The signature and expiry must check
    /// out AND the session row must still exist unrevoked; a token
    /// whose session is gone is treated exactly like a revoked one.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::default();
        validation.validate_exp = true;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| AuthError::Unauthorized(format!("invalid token: {}", e)))?;

        let claims = token_data.claims;

        let sesion: Sesion = match self.get_record("sesiones", &claims.sid) {
            Ok(s) => s,
            Err(AuthError::NotFound(_)) => {
                return Err(AuthError::Unauthorized("session no longer exists".into()));
            }
            Err(e) => return Err(e),
        };

        if sesion.revoked {
            return Err(AuthError::Unauthorized("session has been revoked".into()));
        }

        Ok(claims)
    }

    /// Re-issue a token for the same session with a fresh expiry.
    /// The session id is unchanged, so open watches on it stay alive.
    pub fn renovar(&self, token: &str) -> Result<TokenSesion, AuthError> {
        let claims = self.verify_token(token)?;

        let now = chrono::Utc::now();
        let exp = now + chrono::Duration::seconds(self.config.token_ttl);

        let new_claims = Claims {
            sub: claims.sub.clone(),
            email: claims.email.clone(),
            sid: claims.sid.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        let access_token = encode(
            &Header::default(),
            &new_claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("JWT encode failed: {}", e)))?;

        // Stretch the session record to match the new expiry.
        let mut sesion: Sesion = self.get_record("sesiones", &claims.sid)?;
        sesion.expires_at = exp.to_rfc3339();
        self.update_record(
            "sesiones",
            &claims.sid,
            &sesion,
            &[("expires_at", Value::Text(sesion.expires_at.clone()))],
        )?;

        self.publish(AuthEvent::TokenRefreshed {
            session_id: claims.sid.clone(),
        });

        Ok(TokenSesion {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.config.token_ttl,
        })
    }

    /// Explicit sign-out for the bearer of `token`.
    pub fn cerrar_sesion(&self, token: &str) -> Result<(), AuthError> {
        let claims = self.verify_token(token)?;
        self.revoke_session(&claims.sid)
    }

    /// Revoke a single session. Watchers of that session are notified.
    pub fn revoke_session(&self, session_id: &str) -> Result<(), AuthError> {
        let mut sesion: Sesion = self.get_record("sesiones", session_id)?;
        sesion.revoked = true;

        self.update_record(
            "sesiones",
            session_id,
            &sesion,
            &[("revoked", Value::Integer(1))],
        )?;

        self.publish(AuthEvent::SignedOut {
            admin_id: sesion.admin_id.clone(),
            session_id: Some(session_id.to_string()),
        });

        Ok(())
    }

    /// Revoke every session of an administrator. One event covers
    /// them all (`session_id: None`).
    pub fn revoke_all(&self, admin_id: &str) -> Result<u64, AuthError> {
        let affected = self.sql
            .exec(
                "UPDATE sesiones SET revoked = 1, data = REPLACE(data, '\"revoked\":false', '\"revoked\":true') WHERE admin_id = ?1 AND revoked = 0",
                &[Value::Text(admin_id.to_string())],
            )
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        self.publish(AuthEvent::SignedOut {
            admin_id: admin_id.to_string(),
            session_id: None,
        });

        Ok(affected)
    }

}
