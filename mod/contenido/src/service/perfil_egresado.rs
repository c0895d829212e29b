use serde::Deserialize;

use panel_core::{ListParams, ListResult, new_id, now_rfc3339};
use panel_sql::Value;

use crate::model::{PerfilEgresado, PerfilEgresadoDraft};
use crate::service::form::{
    Formulario, FormularioLote, Modo, guardar_formulario, guardar_lote,
};
use crate::service::{ContentError, ContentService};

fn construir_competencia(
    draft: &PerfilEgresadoDraft,
    carrera_id: &str,
    existente: Option<&PerfilEgresado>,
) -> PerfilEgresado {
    let now = now_rfc3339();
    PerfilEgresado {
        id: existente.map(|p| p.id.clone()).unwrap_or_else(new_id),
        carrera_id: carrera_id.to_string(),
        competencia: draft.competencia.trim().to_string(),
        orden: draft.orden,
        created_at: existente
            .map(|p| p.created_at.clone())
            .unwrap_or_else(|| now.clone()),
        updated_at: now,
    }
}

fn indices_competencia(entidad: &PerfilEgresado) -> Vec<(&'static str, Value)> {
    vec![
        ("carrera_id", Value::Text(entidad.carrera_id.clone())),
        ("orden", Value::Integer(entidad.orden)),
        ("created_at", Value::Text(entidad.created_at.clone())),
        ("updated_at", Value::Text(entidad.updated_at.clone())),
    ]
}

impl Formulario for PerfilEgresadoDraft {
    type Entidad = PerfilEgresado;

    const TABLA: &'static str = "perfil_egresado";
    const ETIQUETA: &'static str = "la competencia";

    fn validar(&self) -> Result<(), String> {
        if self.carrera_id.trim().is_empty() {
            return Err("Debes seleccionar una carrera".into());
        }
        if self.competencia.trim().is_empty() || self.competencia.chars().count() < 10 {
            return Err("La competencia debe tener al menos 10 caracteres".into());
        }
        Ok(())
    }

    fn construir(&self, existente: Option<&PerfilEgresado>) -> PerfilEgresado {
        construir_competencia(self, self.carrera_id.trim(), existente)
    }

    fn id(entidad: &PerfilEgresado) -> &str {
        &entidad.id
    }

    fn indices(entidad: &PerfilEgresado) -> Vec<(&'static str, Value)> {
        indices_competencia(entidad)
    }
}

impl FormularioLote for PerfilEgresadoDraft {
    type Entidad = PerfilEgresado;

    const TABLA: &'static str = "perfil_egresado";
    const MENSAJE_VACIO: &'static str = "Debe haber al menos una competencia";
    const MENSAJE_INCOMPLETO: &'static str = "Todas las competencias deben tener un texto";
    const MENSAJE_SIN_VALIDAS: &'static str = "No hay competencias válidas para guardar";

    fn completa(&self) -> bool {
        !self.competencia.trim().is_empty()
    }

    fn construir(&self, carrera_id: &str) -> PerfilEgresado {
        construir_competencia(self, carrera_id, None)
    }

    fn id(entidad: &PerfilEgresado) -> &str {
        &entidad.id
    }

    fn indices(entidad: &PerfilEgresado) -> Vec<(&'static str, Value)> {
        indices_competencia(entidad)
    }

    fn mensaje_exito(n: u64) -> String {
        format!("{} competencia(s) agregada(s) correctamente", n)
    }
}

/// Listing filters for perfil del egresado.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PerfilFiltro {
    pub carrera_id: Option<String>,
}

impl ContentService {
    pub fn create_competencia(
        &self,
        draft: &PerfilEgresadoDraft,
    ) -> Result<PerfilEgresado, ContentError> {
        guardar_formulario(self, Modo::Crear, draft)
    }

    pub fn update_competencia(
        &self,
        id: &str,
        draft: &PerfilEgresadoDraft,
    ) -> Result<PerfilEgresado, ContentError> {
        guardar_formulario(self, Modo::Editar(id.to_string()), draft)
    }

    pub fn create_competencias_lote(
        &self,
        carrera_id: &str,
        filas: &[PerfilEgresadoDraft],
    ) -> Result<(u64, String), ContentError> {
        guardar_lote(self, carrera_id, filas)
    }

    pub fn get_competencia(&self, id: &str) -> Result<PerfilEgresado, ContentError> {
        self.get_record("perfil_egresado", id)
    }

    pub fn list_perfil_egresado(
        &self,
        filtro: &PerfilFiltro,
        params: &ListParams,
    ) -> Result<ListResult<PerfilEgresado>, ContentError> {
        let mut filters = Vec::new();
        if let Some(carrera_id) = &filtro.carrera_id {
            filters.push(("carrera_id", Value::Text(carrera_id.clone())));
        }
        let (items, total) = self.list_records(
            "perfil_egresado",
            &filters,
            "orden ASC, created_at ASC",
            params.limit.min(500),
            params.offset,
        )?;
        Ok(ListResult { items, total })
    }

    pub fn delete_competencia(&self, id: &str) -> Result<(), ContentError> {
        self.delete_record("perfil_egresado", id)
    }
}
