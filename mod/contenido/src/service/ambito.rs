use serde::Deserialize;

use panel_core::{ListParams, ListResult, new_id, now_rfc3339};
use panel_sql::Value;

use crate::model::{AmbitoDraft, AmbitoLaboral};
use crate::service::form::{
    Formulario, FormularioLote, Modo, guardar_formulario, guardar_lote, opcional,
};
use crate::service::{ContentError, ContentService};

fn construir_ambito(
    draft: &AmbitoDraft,
    carrera_id: &str,
    existente: Option<&AmbitoLaboral>,
) -> AmbitoLaboral {
    let now = now_rfc3339();
    AmbitoLaboral {
        id: existente.map(|a| a.id.clone()).unwrap_or_else(new_id),
        carrera_id: carrera_id.to_string(),
        titulo: draft.titulo.trim().to_string(),
        descripcion: draft.descripcion.trim().to_string(),
        imagen: opcional(&draft.imagen),
        orden: draft.orden,
        created_at: existente
            .map(|a| a.created_at.clone())
            .unwrap_or_else(|| now.clone()),
        updated_at: now,
    }
}

fn indices_ambito(entidad: &AmbitoLaboral) -> Vec<(&'static str, Value)> {
    vec![
        ("carrera_id", Value::Text(entidad.carrera_id.clone())),
        ("orden", Value::Integer(entidad.orden)),
        ("created_at", Value::Text(entidad.created_at.clone())),
        ("updated_at", Value::Text(entidad.updated_at.clone())),
    ]
}

impl Formulario for AmbitoDraft {
    type Entidad = AmbitoLaboral;

    const TABLA: &'static str = "ambitos_laborales";
    const ETIQUETA: &'static str = "el ámbito laboral";

    fn validar(&self) -> Result<(), String> {
        if self.carrera_id.trim().is_empty() {
            return Err("Debes seleccionar una carrera".into());
        }
        if self.titulo.trim().is_empty() || self.titulo.chars().count() < 3 {
            return Err("El título debe tener al menos 3 caracteres".into());
        }
        if self.descripcion.trim().is_empty() || self.descripcion.chars().count() < 10 {
            return Err("La descripción debe tener al menos 10 caracteres".into());
        }
        Ok(())
    }

    fn construir(&self, existente: Option<&AmbitoLaboral>) -> AmbitoLaboral {
        construir_ambito(self, self.carrera_id.trim(), existente)
    }

    fn id(entidad: &AmbitoLaboral) -> &str {
        &entidad.id
    }

    fn indices(entidad: &AmbitoLaboral) -> Vec<(&'static str, Value)> {
        indices_ambito(entidad)
    }
}

impl FormularioLote for AmbitoDraft {
    type Entidad = AmbitoLaboral;

    const TABLA: &'static str = "ambitos_laborales";
    const MENSAJE_VACIO: &'static str = "Debe haber al menos un ámbito laboral";
    const MENSAJE_INCOMPLETO: &'static str = "Todos los ámbitos deben tener título y descripción";
    const MENSAJE_SIN_VALIDAS: &'static str = "No hay ámbitos válidos para guardar";

    fn completa(&self) -> bool {
        !self.titulo.trim().is_empty() && !self.descripcion.trim().is_empty()
    }

    fn construir(&self, carrera_id: &str) -> AmbitoLaboral {
        construir_ambito(self, carrera_id, None)
    }

    fn id(entidad: &AmbitoLaboral) -> &str {
        &entidad.id
    }

    fn indices(entidad: &AmbitoLaboral) -> Vec<(&'static str, Value)> {
        indices_ambito(entidad)
    }

    fn mensaje_exito(n: u64) -> String {
        format!("{} ámbito(s) laboral(es) agregado(s) correctamente", n)
    }
}

/// Listing filters for ámbitos laborales.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AmbitosFiltro {
    pub carrera_id: Option<String>,
}

impl ContentService {
    pub fn create_ambito(&self, draft: &AmbitoDraft) -> Result<AmbitoLaboral, ContentError> {
        guardar_formulario(self, Modo::Crear, draft)
    }

    pub fn update_ambito(
        &self,
        id: &str,
        draft: &AmbitoDraft,
    ) -> Result<AmbitoLaboral, ContentError> {
        guardar_formulario(self, Modo::Editar(id.to_string()), draft)
    }

    pub fn create_ambitos_lote(
        &self,
        carrera_id: &str,
        filas: &[AmbitoDraft],
    ) -> Result<(u64, String), ContentError> {
        guardar_lote(self, carrera_id, filas)
    }

    pub fn get_ambito(&self, id: &str) -> Result<AmbitoLaboral, ContentError> {
        self.get_record("ambitos_laborales", id)
    }

    pub fn list_ambitos(
        &self,
        filtro: &AmbitosFiltro,
        params: &ListParams,
    ) -> Result<ListResult<AmbitoLaboral>, ContentError> {
        let mut filters = Vec::new();
        if let Some(carrera_id) = &filtro.carrera_id {
            filters.push(("carrera_id", Value::Text(carrera_id.clone())));
        }
        let (items, total) = self.list_records(
            "ambitos_laborales",
            &filters,
            "orden ASC, created_at ASC",
            params.limit.min(500),
            params.offset,
        )?;
        Ok(ListResult { items, total })
    }

    pub fn delete_ambito(&self, id: &str) -> Result<(), ContentError> {
        self.delete_record("ambitos_laborales", id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CarreraDraft;

    fn test_service() -> std::sync::Arc<ContentService> {
        let sql = std::sync::Arc::new(panel_sql::SqliteStore::open_in_memory().unwrap());
        ContentService::new(sql).unwrap()
    }

    fn carrera_id(svc: &ContentService) -> String {
        svc.create_carrera(CarreraDraft {
            nombre: "Ingeniería de Sistemas".into(),
            slug: String::new(),
            descripcion: "Formamos profesionales capaces de diseñar sistemas modernos.".into(),
            duracion: "5 años".into(),
            semestres: 10,
            imagen_hero: None,
            descripcion_docentes: None,
            video_youtube: None,
            activa: true,
        })
        .unwrap()
        .id
    }

    fn fila(titulo: &str, descripcion: &str) -> AmbitoDraft {
        AmbitoDraft {
            carrera_id: String::new(),
            titulo: titulo.into(),
            descripcion: descripcion.into(),
            imagen: None,
            orden: 0,
        }
    }

    #[test]
    fn test_single_form_validations() {
        let svc = test_service();

        let mut draft = fila("Energía", "Diseño de sistemas de potencia");
        draft.carrera_id = "c1".into();
        draft.titulo = "El".into();
        let err = svc.create_ambito(&draft).unwrap_err();
        assert_eq!(err.to_string(), "El título debe tener al menos 3 caracteres");

        draft = fila("Energía", "Corto");
        draft.carrera_id = "c1".into();
        let err = svc.create_ambito(&draft).unwrap_err();
        assert_eq!(
            err.to_string(),
            "La descripción debe tener al menos 10 caracteres"
        );
    }

    #[test]
    fn test_lote_requires_title_and_description_on_every_row() {
        let svc = test_service();
        let carrera = carrera_id(&svc);

        let filas = vec![
            fila("Energía", "Diseño de sistemas de potencia"),
            fila("Telecomunicaciones", ""),
        ];
        let err = svc.create_ambitos_lote(&carrera, &filas).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Todos los ámbitos deben tener título y descripción"
        );
        assert_eq!(svc.count_records("ambitos_laborales", &[]).unwrap(), 0);
    }

    #[test]
    fn test_lote_inserts_all_rows() {
        let svc = test_service();
        let carrera = carrera_id(&svc);

        let filas = vec![
            fila("Energía", "Diseño de sistemas de potencia"),
            fila("Telecomunicaciones", "Redes y transmisión de datos"),
        ];
        let (n, mensaje) = svc.create_ambitos_lote(&carrera, &filas).unwrap();
        assert_eq!(n, 2);
        assert_eq!(mensaje, "2 ámbito(s) laboral(es) agregado(s) correctamente");

        let lista = svc
            .list_ambitos(
                &AmbitosFiltro {
                    carrera_id: Some(carrera.clone()),
                },
                &ListParams::default(),
            )
            .unwrap();
        assert_eq!(lista.total, 2);
        assert!(lista.items.iter().all(|a| a.carrera_id == carrera));
    }
}
