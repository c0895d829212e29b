use serde::Deserialize;

use panel_core::{ListParams, ListResult, new_id, now_rfc3339};
use panel_sql::Value;

use crate::model::{Evento, EventoDraft, TipoEvento};
use crate::service::form::{Formulario, Modo, guardar_formulario, normalizar_fecha, opcional};
use crate::service::{ContentError, ContentService};

impl Formulario for EventoDraft {
    type Entidad = Evento;

    const TABLA: &'static str = "eventos";
    const ETIQUETA: &'static str = "el evento";

    fn validar(&self) -> Result<(), String> {
        if self.titulo.trim().is_empty() || self.titulo.chars().count() < 5 {
            return Err("El título debe tener al menos 5 caracteres".into());
        }
        if self.descripcion.trim().is_empty() || self.descripcion.chars().count() < 20 {
            return Err("La descripción debe tener al menos 20 caracteres".into());
        }
        if self.fecha_inicio.trim().is_empty() {
            return Err("La fecha de inicio es requerida".into());
        }
        if self.ubicacion.trim().is_empty() {
            return Err("La ubicación es requerida".into());
        }
        if let Some(fin) = self.fecha_fin.as_deref().map(str::trim).filter(|f| !f.is_empty()) {
            if fin < self.fecha_inicio.trim() {
                return Err("La fecha de fin debe ser posterior a la de inicio".into());
            }
        }
        Ok(())
    }

    fn construir(&self, existente: Option<&Evento>) -> Evento {
        let now = now_rfc3339();
        Evento {
            id: existente.map(|e| e.id.clone()).unwrap_or_else(new_id),
            titulo: self.titulo.trim().to_string(),
            descripcion: self.descripcion.trim().to_string(),
            fecha_inicio: normalizar_fecha(&self.fecha_inicio),
            fecha_fin: opcional(&self.fecha_fin).map(|f| normalizar_fecha(&f)),
            ubicacion: self.ubicacion.trim().to_string(),
            imagen: opcional(&self.imagen),
            tipo: self.tipo,
            activo: self.activo,
            created_at: existente
                .map(|e| e.created_at.clone())
                .unwrap_or_else(|| now.clone()),
            updated_at: now,
        }
    }

    fn id(entidad: &Evento) -> &str {
        &entidad.id
    }

    fn indices(entidad: &Evento) -> Vec<(&'static str, Value)> {
        vec![
            ("tipo", Value::Text(entidad.tipo.as_str().to_string())),
            ("activo", Value::Integer(entidad.activo as i64)),
            ("fecha_inicio", Value::Text(entidad.fecha_inicio.clone())),
            ("created_at", Value::Text(entidad.created_at.clone())),
            ("updated_at", Value::Text(entidad.updated_at.clone())),
        ]
    }
}

/// Listing filters for eventos.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventosFiltro {
    pub tipo: Option<TipoEvento>,
    pub activo: Option<bool>,
}

impl ContentService {
    pub fn create_evento(&self, draft: &EventoDraft) -> Result<Evento, ContentError> {
        guardar_formulario(self, Modo::Crear, draft)
    }

    pub fn update_evento(&self, id: &str, draft: &EventoDraft) -> Result<Evento, ContentError> {
        guardar_formulario(self, Modo::Editar(id.to_string()), draft)
    }

    pub fn get_evento(&self, id: &str) -> Result<Evento, ContentError> {
        self.get_record("eventos", id)
    }

    pub fn list_eventos(
        &self,
        filtro: &EventosFiltro,
        params: &ListParams,
    ) -> Result<ListResult<Evento>, ContentError> {
        let mut filters = Vec::new();
        if let Some(tipo) = filtro.tipo {
            filters.push(("tipo", Value::Text(tipo.as_str().to_string())));
        }
        if let Some(activo) = filtro.activo {
            filters.push(("activo", Value::Integer(activo as i64)));
        }
        let (items, total) = self.list_records(
            "eventos",
            &filters,
            "fecha_inicio DESC",
            params.limit.min(500),
            params.offset,
        )?;
        Ok(ListResult { items, total })
    }

    pub fn delete_evento(&self, id: &str) -> Result<(), ContentError> {
        self.delete_record("eventos", id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> std::sync::Arc<ContentService> {
        let sql = std::sync::Arc::new(panel_sql::SqliteStore::open_in_memory().unwrap());
        ContentService::new(sql).unwrap()
    }

    fn draft_valido(titulo: &str, inicio: &str) -> EventoDraft {
        EventoDraft {
            titulo: titulo.into(),
            descripcion: "Jornada de puertas abiertas para nuevos estudiantes".into(),
            fecha_inicio: inicio.into(),
            fecha_fin: None,
            ubicacion: "Campus UEB".into(),
            imagen: None,
            tipo: TipoEvento::Academico,
            activo: true,
        }
    }

    #[test]
    fn test_validations_in_order() {
        let svc = test_service();

        let err = svc
            .create_evento(&draft_valido("Open", "2024-05-12T09:00"))
            .unwrap_err();
        assert_eq!(err.to_string(), "El título debe tener al menos 5 caracteres");

        let mut draft = draft_valido("Openhouse 2024", "");
        let err = svc.create_evento(&draft).unwrap_err();
        assert_eq!(err.to_string(), "La fecha de inicio es requerida");

        draft = draft_valido("Openhouse 2024", "2024-05-12T09:00");
        draft.ubicacion = " ".into();
        let err = svc.create_evento(&draft).unwrap_err();
        assert_eq!(err.to_string(), "La ubicación es requerida");

        draft = draft_valido("Openhouse 2024", "2024-05-12T09:00");
        draft.fecha_fin = Some("2024-05-11T09:00".into());
        let err = svc.create_evento(&draft).unwrap_err();
        assert_eq!(
            err.to_string(),
            "La fecha de fin debe ser posterior a la de inicio"
        );

        assert_eq!(svc.count_records("eventos", &[]).unwrap(), 0);
    }

    #[test]
    fn test_dates_are_normalized_to_rfc3339() {
        let svc = test_service();
        let mut draft = draft_valido("Openhouse 2024", "2024-05-12T09:00");
        draft.fecha_fin = Some("2024-05-12T17:30".into());

        let evento = svc.create_evento(&draft).unwrap();
        assert_eq!(evento.fecha_inicio, "2024-05-12T09:00:00+00:00");
        assert_eq!(evento.fecha_fin.as_deref(), Some("2024-05-12T17:30:00+00:00"));
    }

    #[test]
    fn test_list_newest_first_with_filters() {
        let svc = test_service();
        svc.create_evento(&draft_valido("Feria de ciencias", "2024-03-01T09:00"))
            .unwrap();
        svc.create_evento(&draft_valido("Openhouse 2024", "2024-05-12T09:00"))
            .unwrap();
        let mut deportivo = draft_valido("Campeonato interno", "2024-04-20T08:00");
        deportivo.tipo = TipoEvento::Deportivo;
        deportivo.activo = false;
        svc.create_evento(&deportivo).unwrap();

        let todos = svc
            .list_eventos(&EventosFiltro::default(), &ListParams::default())
            .unwrap();
        assert_eq!(todos.total, 3);
        let titulos: Vec<&str> = todos.items.iter().map(|e| e.titulo.as_str()).collect();
        assert_eq!(
            titulos,
            vec!["Openhouse 2024", "Campeonato interno", "Feria de ciencias"]
        );

        let activos = svc
            .list_eventos(
                &EventosFiltro {
                    activo: Some(true),
                    ..Default::default()
                },
                &ListParams::default(),
            )
            .unwrap();
        assert_eq!(activos.total, 2);

        let deportivos = svc
            .list_eventos(
                &EventosFiltro {
                    tipo: Some(TipoEvento::Deportivo),
                    ..Default::default()
                },
                &ListParams::default(),
            )
            .unwrap();
        assert_eq!(deportivos.total, 1);
        assert_eq!(deportivos.items[0].titulo, "Campeonato interno");
    }
}
