use panel_core::{extraer_youtube_id, merge_patch, new_id, now_rfc3339};
use panel_sql::Value;

use crate::model::{ConfiguracionDraft, ConfiguracionFacultad};
use crate::service::form::{Formulario, Modo, guardar_formulario, opcional};
use crate::service::{ContentError, ContentService};

impl Formulario for ConfiguracionDraft {
    type Entidad = ConfiguracionFacultad;

    const TABLA: &'static str = "configuracion_facultad";
    const ETIQUETA: &'static str = "la configuración";

    fn validar(&self) -> Result<(), String> {
        if self.titulo_hero.trim().is_empty() {
            return Err("El título principal es requerido".into());
        }
        if self.subtitulo_hero.trim().is_empty() {
            return Err("El subtítulo es requerido".into());
        }
        if self.descripcion_general.chars().count() < 50 {
            return Err("La descripción general debe tener al menos 50 caracteres".into());
        }
        if let Some(video) = opcional(&self.video_youtube) {
            if extraer_youtube_id(&video).is_none() {
                return Err("URL de YouTube inválida".into());
            }
        }
        Ok(())
    }

    fn construir(&self, existente: Option<&ConfiguracionFacultad>) -> ConfiguracionFacultad {
        let now = now_rfc3339();
        ConfiguracionFacultad {
            id: existente.map(|c| c.id.clone()).unwrap_or_else(new_id),
            titulo_hero: self.titulo_hero.trim().to_string(),
            subtitulo_hero: self.subtitulo_hero.trim().to_string(),
            imagen_hero: opcional(&self.imagen_hero),
            logo_facultad: opcional(&self.logo_facultad),
            descripcion_general: self.descripcion_general.trim().to_string(),
            video_youtube: opcional(&self.video_youtube)
                .and_then(|v| extraer_youtube_id(&v)),
            activo: self.activo,
            created_at: existente
                .map(|c| c.created_at.clone())
                .unwrap_or_else(|| now.clone()),
            updated_at: now,
        }
    }

    fn id(entidad: &ConfiguracionFacultad) -> &str {
        &entidad.id
    }

    fn indices(entidad: &ConfiguracionFacultad) -> Vec<(&'static str, Value)> {
        vec![
            ("activo", Value::Integer(entidad.activo as i64)),
            ("created_at", Value::Text(entidad.created_at.clone())),
            ("updated_at", Value::Text(entidad.updated_at.clone())),
        ]
    }
}

impl ContentService {
    fn primera_configuracion(&self) -> Result<Option<ConfiguracionFacultad>, ContentError> {
        let rows = self
            .sql
            .query(
                "SELECT data FROM configuracion_facultad ORDER BY created_at ASC LIMIT 1",
                &[],
            )
            .map_err(|e| ContentError::Storage(e.to_string()))?;
        let row = match rows.first() {
            Some(r) => r,
            None => return Ok(None),
        };
        let data = row
            .get_str("data")
            .ok_or_else(|| ContentError::Internal("missing data column".into()))?;
        let config = serde_json::from_str(data)
            .map_err(|e| ContentError::Internal(e.to_string()))?;
        Ok(Some(config))
    }

    /// The site configuration, or `None` before the first save.
    pub fn get_configuracion(&self) -> Result<Option<ConfiguracionFacultad>, ContentError> {
        self.primera_configuracion()
    }

    /// Save the site configuration. The body is merge-patched over the
    /// stored record (RFC 7386), so a partial body only touches the
    /// fields it names; the first save creates the single row.
    pub fn save_configuracion(
        &self,
        patch: &serde_json::Value,
    ) -> Result<ConfiguracionFacultad, ContentError> {
        let existente = self.primera_configuracion()?;

        let mut base = match &existente {
            Some(config) => serde_json::to_value(config)
                .map_err(|e| ContentError::Internal(e.to_string()))?,
            None => serde_json::json!({}),
        };
        merge_patch(&mut base, patch);

        let draft: ConfiguracionDraft = serde_json::from_value(base)
            .map_err(|e| ContentError::Validation(format!("Datos inválidos: {}", e)))?;

        match existente {
            Some(config) => guardar_formulario(self, Modo::Editar(config.id), &draft),
            None => guardar_formulario(self, Modo::Crear, &draft),
        }
    }
}
