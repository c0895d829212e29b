use std::collections::BTreeMap;

use panel_core::{new_id, now_rfc3339};
use panel_sql::Value;

use crate::model::{ResumenVisitas, Visita, VisitaDraft};
use crate::service::form::opcional;
use crate::service::{ContentError, ContentService};

impl ContentService {
    /// Record one public-site page view. The tracker fires on every page
    /// load, so there is no validation beyond normalizing the fields;
    /// an empty body still records an "otro" visit.
    pub fn registrar_visita(&self, draft: &VisitaDraft) -> Result<Visita, ContentError> {
        let visita = Visita {
            id: new_id(),
            pagina: draft.pagina.trim().to_string(),
            tipo_pagina: draft.tipo_pagina,
            carrera_id: opcional(&draft.carrera_id),
            referrer: opcional(&draft.referrer),
            user_agent: opcional(&draft.user_agent),
            created_at: now_rfc3339(),
        };

        let carrera_id = match &visita.carrera_id {
            Some(id) => Value::Text(id.clone()),
            None => Value::Null,
        };
        let indices = vec![
            ("pagina", Value::Text(visita.pagina.clone())),
            ("tipo_pagina", Value::Text(visita.tipo_pagina.as_str().into())),
            ("carrera_id", carrera_id),
            ("created_at", Value::Text(visita.created_at.clone())),
        ];
        self.insert_record("visitas", &visita.id, &visita, &indices)?;
        Ok(visita)
    }

    /// Total recorded page views plus a per-type breakdown.
    pub fn resumen_visitas(&self) -> Result<ResumenVisitas, ContentError> {
        let rows = self
            .sql
            .query(
                "SELECT tipo_pagina, COUNT(*) as cnt FROM visitas GROUP BY tipo_pagina",
                &[],
            )
            .map_err(|e| ContentError::Storage(e.to_string()))?;

        let mut total = 0;
        let mut por_tipo = BTreeMap::new();
        for row in &rows {
            let tipo = row
                .get_str("tipo_pagina")
                .ok_or_else(|| ContentError::Internal("missing tipo_pagina column".into()))?;
            let cnt = row.get_i64("cnt").unwrap_or(0);
            total += cnt;
            por_tipo.insert(tipo.to_string(), cnt);
        }

        Ok(ResumenVisitas { total, por_tipo })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TipoPagina;

    fn test_service() -> std::sync::Arc<ContentService> {
        let sql = std::sync::Arc::new(panel_sql::SqliteStore::open_in_memory().unwrap());
        ContentService::new(sql).unwrap()
    }

    #[test]
    fn test_registrar_visita_normalizes_fields() {
        let svc = test_service();
        let visita = svc
            .registrar_visita(&VisitaDraft {
                pagina: "  /carreras/sistemas  ".into(),
                tipo_pagina: TipoPagina::Carrera,
                carrera_id: Some("c1".into()),
                referrer: Some("".into()),
                user_agent: Some("Mozilla/5.0".into()),
            })
            .unwrap();

        assert_eq!(visita.pagina, "/carreras/sistemas");
        assert_eq!(visita.referrer, None);
        assert_eq!(visita.user_agent.as_deref(), Some("Mozilla/5.0"));

        let guardada: Visita = svc.get_record("visitas", &visita.id).unwrap();
        assert_eq!(guardada, visita);
    }

    #[test]
    fn test_empty_body_still_records() {
        let svc = test_service();
        let visita = svc.registrar_visita(&VisitaDraft::default()).unwrap();
        assert_eq!(visita.tipo_pagina, TipoPagina::Otro);
        assert_eq!(svc.count_records("visitas", &[]).unwrap(), 1);
    }

    #[test]
    fn test_resumen_groups_by_page_type() {
        let svc = test_service();
        for tipo in [
            TipoPagina::Home,
            TipoPagina::Home,
            TipoPagina::Carrera,
            TipoPagina::Noticia,
        ] {
            svc.registrar_visita(&VisitaDraft {
                pagina: "/".into(),
                tipo_pagina: tipo,
                ..VisitaDraft::default()
            })
            .unwrap();
        }

        let resumen = svc.resumen_visitas().unwrap();
        assert_eq!(resumen.total, 4);
        assert_eq!(resumen.por_tipo.get("home"), Some(&2));
        assert_eq!(resumen.por_tipo.get("carrera"), Some(&1));
        assert_eq!(resumen.por_tipo.get("noticia"), Some(&1));
        assert_eq!(resumen.por_tipo.get("evento"), None);
    }
}
