use serde::{Deserialize, Serialize};

use super::carrera::default_true;

/// Noticia — a news article. `categoria` is a free string; the panel
/// offers General / Institucional / Académico / Tecnología but does not
/// enforce the list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Noticia {
    pub id: String,

    pub titulo: String,

    pub contenido: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagen_portada: Option<String>,

    pub autor: String,

    /// Publication date (`YYYY-MM-DD`). The listing sorts on this,
    /// descending.
    pub fecha_publicacion: String,

    pub categoria: String,

    pub activo: bool,

    pub created_at: String,
    pub updated_at: String,
}

/// Form draft for creating or editing a noticia.
#[derive(Debug, Clone, Deserialize)]
pub struct NoticiaDraft {
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub contenido: String,
    #[serde(default)]
    pub imagen_portada: Option<String>,
    #[serde(default)]
    pub autor: String,
    #[serde(default)]
    pub fecha_publicacion: String,
    #[serde(default = "default_categoria")]
    pub categoria: String,
    #[serde(default = "default_true")]
    pub activo: bool,
}

fn default_categoria() -> String {
    "General".to_string()
}
