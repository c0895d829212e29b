use serde::{Deserialize, Serialize};

/// Subject category used by the curriculum breakdown chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Categoria {
    #[serde(rename = "Electrónica")]
    Electronica,
    #[serde(rename = "Matemática")]
    Matematica,
    #[serde(rename = "Física")]
    Fisica,
    Control,
    Otros,
}

impl Default for Categoria {
    fn default() -> Self {
        Self::Otros
    }
}

impl Categoria {
    pub fn as_str(&self) -> &'static str {
        match self {
            Categoria::Electronica => "Electrónica",
            Categoria::Matematica => "Matemática",
            Categoria::Fisica => "Física",
            Categoria::Control => "Control",
            Categoria::Otros => "Otros",
        }
    }
}

/// PlanEstudios — one subject (materia) of a carrera's curriculum,
/// placed in a semester and ordered within it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanEstudios {
    pub id: String,

    pub carrera_id: String,

    pub semestre_numero: i64,

    pub materia_nombre: String,

    /// Hex color for the curriculum grid, e.g. "#2563eb".
    pub materia_color: String,

    pub horas_teoria: i64,

    pub horas_practica: i64,

    pub categoria: Categoria,

    pub orden: i64,

    pub created_at: String,
    pub updated_at: String,
}

/// Form draft for a materia, shared by the single form and the bulk
/// (agregar masivo) rows — bulk rows leave `carrera_id` empty and take
/// the carrera from the batch.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanEstudiosDraft {
    #[serde(default)]
    pub carrera_id: String,
    #[serde(default = "default_semestre")]
    pub semestre_numero: i64,
    #[serde(default)]
    pub materia_nombre: String,
    #[serde(default = "default_color")]
    pub materia_color: String,
    #[serde(default)]
    pub horas_teoria: i64,
    #[serde(default)]
    pub horas_practica: i64,
    #[serde(default)]
    pub categoria: Categoria,
    #[serde(default)]
    pub orden: i64,
}

fn default_semestre() -> i64 {
    1
}

fn default_color() -> String {
    "#2563eb".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categoria_serializes_with_accents() {
        assert_eq!(
            serde_json::to_string(&Categoria::Electronica).unwrap(),
            "\"Electrónica\""
        );
        assert_eq!(serde_json::to_string(&Categoria::Otros).unwrap(), "\"Otros\"");
        let c: Categoria = serde_json::from_str("\"Física\"").unwrap();
        assert_eq!(c, Categoria::Fisica);
    }

    #[test]
    fn draft_defaults() {
        let d: PlanEstudiosDraft = serde_json::from_str("{}").unwrap();
        assert_eq!(d.semestre_numero, 1);
        assert_eq!(d.materia_color, "#2563eb");
        assert_eq!(d.categoria, Categoria::Otros);
        assert_eq!(d.horas_teoria, 0);
    }
}
