use serde::{Deserialize, Serialize};

/// Carrera — a degree program of the faculty. The public site addresses
/// carreras by `slug`, everything else by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Carrera {
    pub id: String,

    pub nombre: String,

    /// URL-safe identifier, unique across carreras.
    pub slug: String,

    pub descripcion: String,

    /// Display duration, e.g. "5 años".
    pub duracion: String,

    pub semestres: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagen_hero: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion_docentes: Option<String>,

    /// YouTube video id (11 chars), never a full URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_youtube: Option<String>,

    pub activa: bool,

    pub created_at: String,
    pub updated_at: String,
}

/// Form draft for creating or editing a carrera.
///
/// In create mode a blank `slug` is derived from `nombre`.
#[derive(Debug, Clone, Deserialize)]
pub struct CarreraDraft {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub duracion: String,
    #[serde(default = "default_semestres")]
    pub semestres: i64,
    #[serde(default)]
    pub imagen_hero: Option<String>,
    #[serde(default)]
    pub descripcion_docentes: Option<String>,
    #[serde(default)]
    pub video_youtube: Option<String>,
    #[serde(default = "default_true")]
    pub activa: bool,
}

fn default_semestres() -> i64 {
    10
}

pub(crate) fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carrera_json_roundtrip() {
        let c = Carrera {
            id: "abc123".into(),
            nombre: "Ingeniería de Sistemas".into(),
            slug: "ingenieria-de-sistemas".into(),
            descripcion: "x".repeat(60),
            duracion: "5 años".into(),
            semestres: 10,
            imagen_hero: None,
            descripcion_docentes: None,
            video_youtube: Some("dQw4w9WgXcQ".into()),
            activa: true,
            created_at: "2024-01-01T00:00:00Z".into(),
            updated_at: "2024-01-01T00:00:00Z".into(),
        };
        let json = serde_json::to_string(&c).unwrap();
        assert!(!json.contains("imagen_hero"));
        let back: Carrera = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }

    #[test]
    fn draft_defaults() {
        let d: CarreraDraft = serde_json::from_str("{}").unwrap();
        assert_eq!(d.nombre, "");
        assert_eq!(d.semestres, 10);
        assert!(d.activa);
    }
}
