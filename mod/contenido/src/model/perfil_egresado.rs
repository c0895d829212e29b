use serde::{Deserialize, Serialize};

/// PerfilEgresado — one competency of a carrera's graduate profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerfilEgresado {
    pub id: String,

    pub carrera_id: String,

    pub competencia: String,

    pub orden: i64,

    pub created_at: String,
    pub updated_at: String,
}

/// Form draft for a competency, shared by the single form and the bulk
/// rows.
#[derive(Debug, Clone, Deserialize)]
pub struct PerfilEgresadoDraft {
    #[serde(default)]
    pub carrera_id: String,
    #[serde(default)]
    pub competencia: String,
    #[serde(default)]
    pub orden: i64,
}
