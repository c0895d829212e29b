use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Page class of a recorded visit, used by the traffic summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoPagina {
    Home,
    Carrera,
    Evento,
    Noticia,
    Otro,
}

impl Default for TipoPagina {
    fn default() -> Self {
        Self::Otro
    }
}

impl TipoPagina {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoPagina::Home => "home",
            TipoPagina::Carrera => "carrera",
            TipoPagina::Evento => "evento",
            TipoPagina::Noticia => "noticia",
            TipoPagina::Otro => "otro",
        }
    }
}

/// Visita — one page view on the public site. Insert-only; rows are
/// never updated, so there is no `updated_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Visita {
    pub id: String,

    /// Visited route, e.g. "/carreras/ingenieria-de-sistemas".
    pub pagina: String,

    pub tipo_pagina: TipoPagina,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrera_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    pub created_at: String,
}

/// Body of the public tracking endpoint. Everything defaults so a
/// malformed tracker never breaks the page it runs on.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VisitaDraft {
    #[serde(default)]
    pub pagina: String,
    #[serde(default)]
    pub tipo_pagina: TipoPagina,
    #[serde(default)]
    pub carrera_id: Option<String>,
    #[serde(default)]
    pub referrer: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

/// Traffic summary: total page views plus a per-type breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumenVisitas {
    pub total: i64,
    pub por_tipo: BTreeMap<String, i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tipo_pagina_is_lowercase_on_the_wire() {
        assert_eq!(serde_json::to_string(&TipoPagina::Home).unwrap(), "\"home\"");
        let t: TipoPagina = serde_json::from_str("\"noticia\"").unwrap();
        assert_eq!(t, TipoPagina::Noticia);
    }

    #[test]
    fn visita_draft_tolerates_empty_body() {
        let d: VisitaDraft = serde_json::from_str("{}").unwrap();
        assert_eq!(d.pagina, "");
        assert_eq!(d.tipo_pagina, TipoPagina::Otro);
        assert!(d.carrera_id.is_none());
    }
}
