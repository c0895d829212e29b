use serde::Deserialize;

use panel_core::{ListParams, ListResult, new_id, now_rfc3339};
use panel_sql::Value;

use crate::model::{Docente, DocenteDraft};
use crate::service::form::{Formulario, Modo, guardar_formulario, opcional};
use crate::service::{ContentError, ContentService};

impl Formulario for DocenteDraft {
    type Entidad = Docente;

    const TABLA: &'static str = "docentes";
    const ETIQUETA: &'static str = "el docente";

    fn validar(&self) -> Result<(), String> {
        if self.carrera_id.trim().is_empty() {
            return Err("Selecciona una carrera".into());
        }
        if self.nombre.trim().is_empty() || self.nombre.chars().count() < 5 {
            return Err("El nombre debe tener al menos 5 caracteres".into());
        }
        if self.especialidad.trim().is_empty() || self.especialidad.chars().count() < 3 {
            return Err("La especialidad debe tener al menos 3 caracteres".into());
        }
        if self.titulo.trim().is_empty() || self.titulo.chars().count() < 5 {
            return Err("El título debe tener al menos 5 caracteres".into());
        }
        if self.experiencia.trim().is_empty() || self.experiencia.chars().count() < 10 {
            return Err("La experiencia debe tener al menos 10 caracteres".into());
        }
        Ok(())
    }

    fn construir(&self, existente: Option<&Docente>) -> Docente {
        let now = now_rfc3339();
        Docente {
            id: existente.map(|d| d.id.clone()).unwrap_or_else(new_id),
            carrera_id: self.carrera_id.trim().to_string(),
            nombre: self.nombre.trim().to_string(),
            especialidad: self.especialidad.trim().to_string(),
            titulo: self.titulo.trim().to_string(),
            experiencia: self.experiencia.trim().to_string(),
            imagen_avatar: opcional(&self.imagen_avatar),
            cv_imagen: opcional(&self.cv_imagen),
            orden: self.orden,
            activo: self.activo,
            created_at: existente
                .map(|d| d.created_at.clone())
                .unwrap_or_else(|| now.clone()),
            updated_at: now,
        }
    }

    fn id(entidad: &Docente) -> &str {
        &entidad.id
    }

    fn indices(entidad: &Docente) -> Vec<(&'static str, Value)> {
        vec![
            ("carrera_id", Value::Text(entidad.carrera_id.clone())),
            ("orden", Value::Integer(entidad.orden)),
            ("activo", Value::Integer(entidad.activo as i64)),
            ("created_at", Value::Text(entidad.created_at.clone())),
            ("updated_at", Value::Text(entidad.updated_at.clone())),
        ]
    }
}

/// Listing filters for docentes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocentesFiltro {
    pub carrera_id: Option<String>,
}

impl ContentService {
    pub fn create_docente(&self, draft: &DocenteDraft) -> Result<Docente, ContentError> {
        guardar_formulario(self, Modo::Crear, draft)
    }

    pub fn update_docente(&self, id: &str, draft: &DocenteDraft) -> Result<Docente, ContentError> {
        guardar_formulario(self, Modo::Editar(id.to_string()), draft)
    }

    pub fn get_docente(&self, id: &str) -> Result<Docente, ContentError> {
        self.get_record("docentes", id)
    }

    pub fn list_docentes(
        &self,
        filtro: &DocentesFiltro,
        params: &ListParams,
    ) -> Result<ListResult<Docente>, ContentError> {
        let mut filters = Vec::new();
        if let Some(carrera_id) = &filtro.carrera_id {
            filters.push(("carrera_id", Value::Text(carrera_id.clone())));
        }
        let (items, total) = self.list_records(
            "docentes",
            &filters,
            "orden ASC, created_at ASC",
            params.limit.min(500),
            params.offset,
        )?;
        Ok(ListResult { items, total })
    }

    pub fn delete_docente(&self, id: &str) -> Result<(), ContentError> {
        self.delete_record("docentes", id)
    }
}
