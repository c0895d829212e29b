use serde::Deserialize;

use panel_core::{ListParams, ListResult, new_id, now_rfc3339};
use panel_sql::Value;

use crate::model::{Carrera, PlanEstudios, PlanEstudiosDraft};
use crate::service::form::{
    Formulario, FormularioLote, Modo, guardar_formulario, guardar_lote,
};
use crate::service::{ContentError, ContentService};

fn construir_materia(
    draft: &PlanEstudiosDraft,
    carrera_id: &str,
    existente: Option<&PlanEstudios>,
) -> PlanEstudios {
    let now = now_rfc3339();
    PlanEstudios {
        id: existente.map(|m| m.id.clone()).unwrap_or_else(new_id),
        carrera_id: carrera_id.to_string(),
        semestre_numero: draft.semestre_numero,
        materia_nombre: draft.materia_nombre.trim().to_string(),
        materia_color: draft.materia_color.trim().to_string(),
        horas_teoria: draft.horas_teoria,
        horas_practica: draft.horas_practica,
        categoria: draft.categoria,
        orden: draft.orden,
        created_at: existente
            .map(|m| m.created_at.clone())
            .unwrap_or_else(|| now.clone()),
        updated_at: now,
    }
}

fn indices_materia(entidad: &PlanEstudios) -> Vec<(&'static str, Value)> {
    vec![
        ("carrera_id", Value::Text(entidad.carrera_id.clone())),
        ("semestre_numero", Value::Integer(entidad.semestre_numero)),
        ("categoria", Value::Text(entidad.categoria.as_str().to_string())),
        ("horas_teoria", Value::Integer(entidad.horas_teoria)),
        ("horas_practica", Value::Integer(entidad.horas_practica)),
        ("orden", Value::Integer(entidad.orden)),
        ("created_at", Value::Text(entidad.created_at.clone())),
        ("updated_at", Value::Text(entidad.updated_at.clone())),
    ]
}

impl Formulario for PlanEstudiosDraft {
    type Entidad = PlanEstudios;

    const TABLA: &'static str = "plan_estudios";
    const ETIQUETA: &'static str = "la materia";

    fn validar(&self) -> Result<(), String> {
        if self.carrera_id.trim().is_empty() {
            return Err("Debes seleccionar una carrera".into());
        }
        if self.materia_nombre.trim().is_empty() || self.materia_nombre.chars().count() < 3 {
            return Err("El nombre de la materia debe tener al menos 3 caracteres".into());
        }
        if self.horas_teoria < 0 || self.horas_practica < 0 {
            return Err("Las horas no pueden ser negativas".into());
        }
        if self.semestre_numero < 1 || self.semestre_numero > 10 {
            return Err("El semestre debe estar entre 1 y 10".into());
        }
        Ok(())
    }

    fn construir(&self, existente: Option<&PlanEstudios>) -> PlanEstudios {
        construir_materia(self, self.carrera_id.trim(), existente)
    }

    fn id(entidad: &PlanEstudios) -> &str {
        &entidad.id
    }

    fn indices(entidad: &PlanEstudios) -> Vec<(&'static str, Value)> {
        indices_materia(entidad)
    }
}

impl FormularioLote for PlanEstudiosDraft {
    type Entidad = PlanEstudios;

    const TABLA: &'static str = "plan_estudios";
    const MENSAJE_VACIO: &'static str = "Debe haber al menos una materia";
    const MENSAJE_INCOMPLETO: &'static str = "Todas las materias deben tener un nombre";
    const MENSAJE_SIN_VALIDAS: &'static str = "No hay materias válidas para guardar";

    fn completa(&self) -> bool {
        !self.materia_nombre.trim().is_empty()
    }

    fn validar_lote(filas: &[Self], carrera: &Carrera) -> Result<(), String> {
        // The single form caps semesters at 10; the bulk screen knows the
        // carrera and uses its real semester count.
        let max = if carrera.semestres > 0 { carrera.semestres } else { 10 };
        if filas
            .iter()
            .any(|f| f.semestre_numero < 1 || f.semestre_numero > max)
        {
            return Err(format!("Los semestres deben estar entre 1 y {}", max));
        }
        Ok(())
    }

    fn construir(&self, carrera_id: &str) -> PlanEstudios {
        construir_materia(self, carrera_id, None)
    }

    fn id(entidad: &PlanEstudios) -> &str {
        &entidad.id
    }

    fn indices(entidad: &PlanEstudios) -> Vec<(&'static str, Value)> {
        indices_materia(entidad)
    }

    fn mensaje_exito(n: u64) -> String {
        format!("{} materia(s) agregada(s) correctamente", n)
    }
}

/// Listing filters for plan_estudios.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanFiltro {
    pub carrera_id: Option<String>,
}

impl ContentService {
    pub fn create_materia(&self, draft: &PlanEstudiosDraft) -> Result<PlanEstudios, ContentError> {
        guardar_formulario(self, Modo::Crear, draft)
    }

    pub fn update_materia(
        &self,
        id: &str,
        draft: &PlanEstudiosDraft,
    ) -> Result<PlanEstudios, ContentError> {
        guardar_formulario(self, Modo::Editar(id.to_string()), draft)
    }

    /// Bulk insert of materias under one carrera. Returns the inserted
    /// count and the success message.
    pub fn create_materias_lote(
        &self,
        carrera_id: &str,
        filas: &[PlanEstudiosDraft],
    ) -> Result<(u64, String), ContentError> {
        guardar_lote(self, carrera_id, filas)
    }

    pub fn get_materia(&self, id: &str) -> Result<PlanEstudios, ContentError> {
        self.get_record("plan_estudios", id)
    }

    pub fn list_plan_estudios(
        &self,
        filtro: &PlanFiltro,
        params: &ListParams,
    ) -> Result<ListResult<PlanEstudios>, ContentError> {
        let mut filters = Vec::new();
        if let Some(carrera_id) = &filtro.carrera_id {
            filters.push(("carrera_id", Value::Text(carrera_id.clone())));
        }
        let (items, total) = self.list_records(
            "plan_estudios",
            &filters,
            "semestre_numero ASC, orden ASC",
            params.limit.min(500),
            params.offset,
        )?;
        Ok(ListResult { items, total })
    }

    pub fn delete_materia(&self, id: &str) -> Result<(), ContentError> {
        self.delete_record("plan_estudios", id)
    }
}
