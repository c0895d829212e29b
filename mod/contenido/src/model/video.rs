use serde::{Deserialize, Serialize};

use super::carrera::default_true;

/// VideoPromocional — a promotional YouTube video attached to a carrera.
/// `url_youtube` holds the extracted 11-character video id, never the
/// full URL the form was given.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoPromocional {
    pub id: String,

    pub carrera_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titulo: Option<String>,

    pub url_youtube: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,

    pub activo: bool,

    pub created_at: String,
    pub updated_at: String,
}

/// Form draft for creating or editing a video. `url_youtube` accepts any
/// of the common YouTube URL shapes or a bare id.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoDraft {
    #[serde(default)]
    pub carrera_id: String,
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub url_youtube: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default = "default_true")]
    pub activo: bool,
}
