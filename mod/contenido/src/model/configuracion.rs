use serde::{Deserialize, Serialize};

use super::carrera::default_true;

/// ConfiguracionFacultad — the site-wide hero/branding record. The table
/// holds at most one row; saving updates it in place or creates it on
/// first use.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfiguracionFacultad {
    pub id: String,

    pub titulo_hero: String,

    pub subtitulo_hero: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagen_hero: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_facultad: Option<String>,

    pub descripcion_general: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_youtube: Option<String>,

    pub activo: bool,

    pub created_at: String,
    pub updated_at: String,
}

/// Form draft for the configuration. Saves are merge-patched over the
/// stored record, so a partial body only touches the fields it names.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfiguracionDraft {
    #[serde(default)]
    pub titulo_hero: String,
    #[serde(default)]
    pub subtitulo_hero: String,
    #[serde(default)]
    pub imagen_hero: Option<String>,
    #[serde(default)]
    pub logo_facultad: Option<String>,
    #[serde(default)]
    pub descripcion_general: String,
    #[serde(default)]
    pub video_youtube: Option<String>,
    #[serde(default = "default_true")]
    pub activo: bool,
}
