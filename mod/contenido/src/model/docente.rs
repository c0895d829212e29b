use serde::{Deserialize, Serialize};

use super::carrera::default_true;

/// Docente — teaching staff, scoped to a carrera and ordered manually
/// within it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Docente {
    pub id: String,

    pub carrera_id: String,

    pub nombre: String,

    pub especialidad: String,

    /// Academic title, e.g. "Ing. de Sistemas, MSc.".
    pub titulo: String,

    pub experiencia: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagen_avatar: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_imagen: Option<String>,

    pub orden: i64,

    pub activo: bool,

    pub created_at: String,
    pub updated_at: String,
}

/// Form draft for creating or editing a docente.
#[derive(Debug, Clone, Deserialize)]
pub struct DocenteDraft {
    #[serde(default)]
    pub carrera_id: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub especialidad: String,
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub experiencia: String,
    #[serde(default)]
    pub imagen_avatar: Option<String>,
    #[serde(default)]
    pub cv_imagen: Option<String>,
    #[serde(default)]
    pub orden: i64,
    #[serde(default = "default_true")]
    pub activo: bool,
}
