use serde::{Deserialize, Serialize};

use super::carrera::default_true;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TipoEvento {
    #[serde(rename = "Académico")]
    Academico,
    Cultural,
    Deportivo,
}

impl Default for TipoEvento {
    fn default() -> Self {
        Self::Academico
    }
}

impl TipoEvento {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoEvento::Academico => "Académico",
            TipoEvento::Cultural => "Cultural",
            TipoEvento::Deportivo => "Deportivo",
        }
    }
}

/// Evento — faculty event published on the site, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Evento {
    pub id: String,

    pub titulo: String,

    pub descripcion: String,

    /// RFC 3339. The listing sorts on this, descending.
    pub fecha_inicio: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_fin: Option<String>,

    pub ubicacion: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagen: Option<String>,

    pub tipo: TipoEvento,

    pub activo: bool,

    pub created_at: String,
    pub updated_at: String,
}

/// Form draft for creating or editing an evento. Dates arrive either as
/// RFC 3339 or as the `YYYY-MM-DDTHH:MM` form the datetime picker emits.
#[derive(Debug, Clone, Deserialize)]
pub struct EventoDraft {
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub fecha_inicio: String,
    #[serde(default)]
    pub fecha_fin: Option<String>,
    #[serde(default)]
    pub ubicacion: String,
    #[serde(default)]
    pub imagen: Option<String>,
    #[serde(default)]
    pub tipo: TipoEvento,
    #[serde(default = "default_true")]
    pub activo: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tipo_evento_serializes_with_accents() {
        assert_eq!(
            serde_json::to_string(&TipoEvento::Academico).unwrap(),
            "\"Académico\""
        );
        let t: TipoEvento = serde_json::from_str("\"Deportivo\"").unwrap();
        assert_eq!(t, TipoEvento::Deportivo);
    }
}
