use serde::{Deserialize, Serialize};

/// A JWT session record, used for revocation checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sesion {
    /// Session id (UUIDv4, no dashes).
    pub id: String,

    /// Administrator id that owns this session.
    pub admin_id: String,

    /// RFC 3339 timestamp when the token was issued.
    pub issued_at: String,

    /// RFC 3339 timestamp when the token expires.
    pub expires_at: String,

    /// Whether this session has been revoked.
    #[serde(default)]
    pub revoked: bool,

    /// User agent at login (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// IP address at login (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

/// JWT claims payload. Tokens carry identity only; the administrator
/// profile (name, role, active flag) is loaded fresh on every request
/// so deactivations take effect immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: administrator id.
    pub sub: String,

    /// Login email.
    pub email: String,

    /// Session id (for revocation).
    pub sid: String,

    /// Issued at (unix timestamp).
    pub iat: i64,

    /// Expiration (unix timestamp).
    pub exp: i64,
}

/// Request body for login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Token returned after login or renewal.
#[derive(Debug, Clone, Serialize)]
pub struct TokenSesion {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}
