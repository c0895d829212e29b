use serde::Deserialize;

use panel_core::{ListParams, ListResult, extraer_youtube_id, generar_slug, new_id, now_rfc3339};
use panel_sql::Value;

use crate::model::{Carrera, CarreraDraft};
use crate::service::form::{Formulario, Modo, guardar_formulario, opcional};
use crate::service::{ContentError, ContentService};

impl Formulario for CarreraDraft {
    type Entidad = Carrera;

    const TABLA: &'static str = "carreras";
    const ETIQUETA: &'static str = "la carrera";

    fn validar(&self) -> Result<(), String> {
        if self.nombre.trim().is_empty() {
            return Err("El nombre es requerido".into());
        }
        if self.slug.trim().is_empty() {
            return Err("El slug es requerido".into());
        }
        if self.descripcion.trim().is_empty() || self.descripcion.chars().count() < 50 {
            return Err("La descripción debe tener al menos 50 caracteres".into());
        }
        if self.duracion.trim().is_empty() {
            return Err("La duración es requerida".into());
        }
        if self.semestres < 1 || self.semestres > 20 {
            return Err("Los semestres deben estar entre 1 y 20".into());
        }
        Ok(())
    }

    fn construir(&self, existente: Option<&Carrera>) -> Carrera {
        let now = now_rfc3339();
        Carrera {
            id: existente.map(|c| c.id.clone()).unwrap_or_else(new_id),
            nombre: self.nombre.trim().to_string(),
            slug: self.slug.trim().to_string(),
            descripcion: self.descripcion.trim().to_string(),
            duracion: self.duracion.trim().to_string(),
            semestres: self.semestres,
            imagen_hero: opcional(&self.imagen_hero),
            descripcion_docentes: opcional(&self.descripcion_docentes),
            video_youtube: opcional(&self.video_youtube)
                .and_then(|url| extraer_youtube_id(&url)),
            activa: self.activa,
            created_at: existente
                .map(|c| c.created_at.clone())
                .unwrap_or_else(|| now.clone()),
            updated_at: now,
        }
    }

    fn id(entidad: &Carrera) -> &str {
        &entidad.id
    }

    fn indices(entidad: &Carrera) -> Vec<(&'static str, Value)> {
        vec![
            ("nombre", Value::Text(entidad.nombre.clone())),
            ("slug", Value::Text(entidad.slug.clone())),
            ("activa", Value::Integer(entidad.activa as i64)),
            ("created_at", Value::Text(entidad.created_at.clone())),
            ("updated_at", Value::Text(entidad.updated_at.clone())),
        ]
    }
}

/// Listing filters for carreras.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarrerasFiltro {
    pub activa: Option<bool>,
}

impl ContentService {
    /// Create a carrera. A blank slug is derived from the name, the way
    /// the create form does.
    pub fn create_carrera(&self, mut draft: CarreraDraft) -> Result<Carrera, ContentError> {
        if draft.slug.trim().is_empty() && !draft.nombre.trim().is_empty() {
            draft.slug = generar_slug(&draft.nombre);
        }
        guardar_formulario(self, Modo::Crear, &draft).map_err(conflicto_slug)
    }

    pub fn update_carrera(&self, id: &str, draft: &CarreraDraft) -> Result<Carrera, ContentError> {
        guardar_formulario(self, Modo::Editar(id.to_string()), draft).map_err(conflicto_slug)
    }

    pub fn get_carrera(&self, id: &str) -> Result<Carrera, ContentError> {
        self.get_record("carreras", id)
    }

    /// List carreras ordered by name. `q` matches nombre or slug as a
    /// substring.
    pub fn list_carreras(
        &self,
        filtro: &CarrerasFiltro,
        params: &ListParams,
    ) -> Result<ListResult<Carrera>, ContentError> {
        let mut where_clauses = Vec::new();
        let mut sql_params: Vec<Value> = Vec::new();

        if let Some(activa) = filtro.activa {
            sql_params.push(Value::Integer(activa as i64));
            where_clauses.push(format!("activa = ?{}", sql_params.len()));
        }
        if let Some(q) = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let patron = format!("%{}%", q);
            sql_params.push(Value::Text(patron.clone()));
            let nombre_idx = sql_params.len();
            sql_params.push(Value::Text(patron));
            let slug_idx = sql_params.len();
            where_clauses.push(format!(
                "(nombre LIKE ?{} OR slug LIKE ?{})",
                nombre_idx, slug_idx
            ));
        }

        let where_sql = if where_clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", where_clauses.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) as cnt FROM carreras{}", where_sql);
        let count_rows = self.sql
            .query(&count_sql, &sql_params)
            .map_err(|e| ContentError::Storage(e.to_string()))?;
        let total = count_rows
            .first()
            .and_then(|r| r.get_i64("cnt"))
            .unwrap_or(0) as usize;

        let limit_idx = sql_params.len() + 1;
        let offset_idx = sql_params.len() + 2;
        sql_params.push(Value::Integer(params.limit.min(500) as i64));
        sql_params.push(Value::Integer(params.offset as i64));

        let sql = format!(
            "SELECT data FROM carreras{} ORDER BY nombre ASC LIMIT ?{} OFFSET ?{}",
            where_sql, limit_idx, offset_idx,
        );
        let rows = self.sql
            .query(&sql, &sql_params)
            .map_err(|e| ContentError::Storage(e.to_string()))?;

        let mut items = Vec::new();
        for row in &rows {
            let data = row
                .get_str("data")
                .ok_or_else(|| ContentError::Internal("missing data column".into()))?;
            items.push(
                serde_json::from_str(data).map_err(|e| ContentError::Internal(e.to_string()))?,
            );
        }

        Ok(ListResult { items, total })
    }

    pub fn delete_carrera(&self, id: &str) -> Result<(), ContentError> {
        self.delete_record("carreras", id)
    }
}

fn conflicto_slug(e: ContentError) -> ContentError {
    match e {
        ContentError::Conflict(_) => {
            ContentError::Conflict("Ya existe una carrera con ese slug".into())
        }
        otro => otro,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> std::sync::Arc<ContentService> {
        let sql = std::sync::Arc::new(panel_sql::SqliteStore::open_in_memory().unwrap());
        ContentService::new(sql).unwrap()
    }

    fn draft_valida(nombre: &str) -> CarreraDraft {
        CarreraDraft {
            nombre: nombre.into(),
            slug: String::new(),
            descripcion: "Formamos profesionales capaces de diseñar sistemas modernos.".into(),
            duracion: "5 años".into(),
            semestres: 10,
            imagen_hero: None,
            descripcion_docentes: None,
            video_youtube: None,
            activa: true,
        }
    }

    #[test]
    fn test_create_derives_slug_and_extracts_video_id() {
        let svc = test_service();
        let mut draft = draft_valida("Ingeniería de Sistemas");
        draft.video_youtube =
            Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=30s".into());

        let carrera = svc.create_carrera(draft).unwrap();
        assert_eq!(carrera.slug, "ingenieria-de-sistemas");
        assert_eq!(carrera.video_youtube.as_deref(), Some("dQw4w9WgXcQ"));

        let cargada = svc.get_carrera(&carrera.id).unwrap();
        assert_eq!(cargada, carrera);
    }

    #[test]
    fn test_short_description_blocks_insert() {
        let svc = test_service();
        let mut draft = draft_valida("Ingeniería de Sistemas");
        draft.descripcion = "Muy corta.".into();

        let err = svc.create_carrera(draft).unwrap_err();
        assert!(matches!(err, ContentError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "La descripción debe tener al menos 50 caracteres"
        );

        // Nothing was written.
        assert_eq!(svc.count_records("carreras", &[]).unwrap(), 0);
    }

    #[test]
    fn test_validation_order() {
        let svc = test_service();

        let mut draft = draft_valida("");
        draft.descripcion = "corta".into();
        let err = svc.create_carrera(draft).unwrap_err();
        assert_eq!(err.to_string(), "El nombre es requerido");

        let mut draft = draft_valida("Agronomía");
        draft.duracion = "  ".into();
        let err = svc.create_carrera(draft).unwrap_err();
        assert_eq!(err.to_string(), "La duración es requerida");

        let mut draft = draft_valida("Agronomía");
        draft.semestres = 21;
        let err = svc.create_carrera(draft).unwrap_err();
        assert_eq!(err.to_string(), "Los semestres deben estar entre 1 y 20");
    }

    #[test]
    fn test_edit_requires_slug() {
        // Only the create path derives the slug; a blank slug on edit is
        // a validation failure.
        let svc = test_service();
        let carrera = svc.create_carrera(draft_valida("Agronomía")).unwrap();

        let mut draft = draft_valida("Agronomía");
        draft.slug = "".into();
        let err = svc.update_carrera(&carrera.id, &draft).unwrap_err();
        assert_eq!(err.to_string(), "El slug es requerido");
    }

    #[test]
    fn test_duplicate_slug_conflict() {
        let svc = test_service();
        svc.create_carrera(draft_valida("Ingeniería de Sistemas")).unwrap();

        let err = svc
            .create_carrera(draft_valida("Ingeniería de Sistemas"))
            .unwrap_err();
        assert!(matches!(err, ContentError::Conflict(_)));
        assert_eq!(err.to_string(), "Ya existe una carrera con ese slug");
    }

    #[test]
    fn test_update_is_idempotent() {
        let svc = test_service();
        let carrera = svc.create_carrera(draft_valida("Agronomía")).unwrap();

        let mut draft = draft_valida("Agronomía");
        draft.slug = carrera.slug.clone();

        let primera = svc.update_carrera(&carrera.id, &draft).unwrap();
        let segunda = svc.update_carrera(&carrera.id, &draft).unwrap();

        assert_eq!(primera.id, carrera.id);
        assert_eq!(primera.created_at, carrera.created_at);
        // Same stored record apart from updated_at.
        let mut a = serde_json::to_value(&primera).unwrap();
        let mut b = serde_json::to_value(&segunda).unwrap();
        a.as_object_mut().unwrap().remove("updated_at");
        b.as_object_mut().unwrap().remove("updated_at");
        assert_eq!(a, b);
    }

    #[test]
    fn test_update_missing_carrera_is_load_error() {
        let svc = test_service();
        let err = svc
            .update_carrera("nope", &draft_valida("Agronomía"))
            .unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
        assert_eq!(err.to_string(), "Error al cargar la carrera");
    }

    #[test]
    fn test_list_orders_by_name_and_filters() {
        let svc = test_service();
        svc.create_carrera(draft_valida("Telecomunicaciones")).unwrap();
        svc.create_carrera(draft_valida("Agronomía")).unwrap();
        let mut inactiva = draft_valida("Biotecnología");
        inactiva.activa = false;
        svc.create_carrera(inactiva).unwrap();

        let todas = svc
            .list_carreras(&CarrerasFiltro::default(), &ListParams::default())
            .unwrap();
        assert_eq!(todas.total, 3);
        let nombres: Vec<&str> = todas.items.iter().map(|c| c.nombre.as_str()).collect();
        assert_eq!(
            nombres,
            vec!["Agronomía", "Biotecnología", "Telecomunicaciones"]
        );

        let activas = svc
            .list_carreras(
                &CarrerasFiltro { activa: Some(true) },
                &ListParams::default(),
            )
            .unwrap();
        assert_eq!(activas.total, 2);

        let buscadas = svc
            .list_carreras(
                &CarrerasFiltro::default(),
                &ListParams {
                    q: Some("tele".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(buscadas.total, 1);
        assert_eq!(buscadas.items[0].nombre, "Telecomunicaciones");
    }

    #[test]
    fn test_delete_carrera() {
        let svc = test_service();
        let carrera = svc.create_carrera(draft_valida("Agronomía")).unwrap();
        svc.delete_carrera(&carrera.id).unwrap();
        assert!(matches!(
            svc.get_carrera(&carrera.id),
            Err(ContentError::NotFound(_))
        ));
        assert!(matches!(
            svc.delete_carrera(&carrera.id),
            Err(ContentError::NotFound(_))
        ));
    }
}
