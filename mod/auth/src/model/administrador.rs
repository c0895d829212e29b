use serde::{Deserialize, Serialize};

/// Role of a panel administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppRole {
    Admin,
    Editor,
    Viewer,
}

impl Default for AppRole {
    fn default() -> Self {
        Self::Editor
    }
}

impl AppRole {
    /// Wire form of the role, matching its serde spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppRole::Admin => "admin",
            AppRole::Editor => "editor",
            AppRole::Viewer => "viewer",
        }
    }
}

/// Administrator profile — the authorization record for the panel.
///
/// Shares its id with the credential (auth identity). A session is
/// authorized for the admin area iff a profile with the session's
/// subject id exists and `activo` is true.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerfilAdministrador {
    /// Unique identifier, same as the credential id.
    pub id: String,

    pub nombre_completo: String,

    pub email: String,

    pub rol: AppRole,

    /// Inactive profiles are denied access and signed out on sight.
    #[serde(default = "default_true")]
    pub activo: bool,

    /// RFC 3339 timestamp of the last successful login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ultimo_acceso: Option<String>,

    /// RFC 3339 creation timestamp.
    pub created_at: String,

    /// RFC 3339 last update timestamp.
    pub updated_at: String,
}

/// Auth identity backing a profile. Holds the argon2id password hash.
/// Private to the auth service — never serialized into API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credencial {
    /// Unique identifier (UUIDv4, no dashes), shared with the profile.
    pub id: String,

    pub email: String,

    /// PHC-format argon2id hash.
    pub password_hash: String,

    /// Email-confirmed flag. Unconfirmed credentials cannot log in.
    #[serde(default)]
    pub confirmado: bool,

    pub created_at: String,

    pub updated_at: String,
}

/// Input for creating an administrator (identity + profile pair).
#[derive(Debug, Clone, Deserialize)]
pub struct AdministradorCrear {
    pub email: String,
    pub password: String,
    pub nombre_completo: String,
    #[serde(default)]
    pub rol: AppRole,
}

/// Input for editing an administrator's profile, with an optional
/// password change (a separate identity operation).
#[derive(Debug, Clone, Deserialize)]
pub struct AdministradorEditar {
    pub nombre_completo: String,
    pub rol: AppRole,
    #[serde(default = "default_true")]
    pub activo: bool,
    #[serde(default)]
    pub new_password: Option<String>,
    #[serde(default)]
    pub confirm_password: Option<String>,
}

impl AdministradorEditar {
    /// The requested new password, if one was actually entered. Forms
    /// submit an empty string when the field is left blank.
    pub fn password_nueva(&self) -> Option<&str> {
        self.new_password.as_deref().filter(|p| !p.is_empty())
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfil_json_roundtrip() {
        let p = PerfilAdministrador {
            id: "a1b2".into(),
            nombre_completo: "Ana Rojas".into(),
            email: "ana@ueb.edu.bo".into(),
            rol: AppRole::Admin,
            activo: true,
            ultimo_acceso: None,
            created_at: "2025-01-01T00:00:00Z".into(),
            updated_at: "2025-01-01T00:00:00Z".into(),
        };
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"rol\":\"admin\""));
        let back: PerfilAdministrador = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn rol_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AppRole::Viewer).unwrap(), "\"viewer\"");
        let r: AppRole = serde_json::from_str("\"editor\"").unwrap();
        assert_eq!(r, AppRole::Editor);
    }
}
