use serde::{Deserialize, Serialize};

/// AmbitoLaboral — a career field where graduates of a carrera work,
/// shown as ordered cards on the carrera page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AmbitoLaboral {
    pub id: String,

    pub carrera_id: String,

    pub titulo: String,

    pub descripcion: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagen: Option<String>,

    pub orden: i64,

    pub created_at: String,
    pub updated_at: String,
}

/// Form draft for an ámbito laboral, shared by the single form and the
/// bulk rows.
#[derive(Debug, Clone, Deserialize)]
pub struct AmbitoDraft {
    #[serde(default)]
    pub carrera_id: String,
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub imagen: Option<String>,
    #[serde(default)]
    pub orden: i64,
}
