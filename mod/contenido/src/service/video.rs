use serde::Deserialize;

use panel_core::{ListParams, ListResult, extraer_youtube_id, new_id, now_rfc3339};
use panel_sql::Value;

use crate::model::{VideoDraft, VideoPromocional};
use crate::service::form::{Formulario, Modo, guardar_formulario, opcional};
use crate::service::{ContentError, ContentService};

impl Formulario for VideoDraft {
    type Entidad = VideoPromocional;

    const TABLA: &'static str = "videos_promocionales";
    const ETIQUETA: &'static str = "el video";

    fn validar(&self) -> Result<(), String> {
        if self.carrera_id.trim().is_empty() {
            return Err("Debes seleccionar una carrera".into());
        }
        if self.url_youtube.trim().is_empty() {
            return Err("La URL de YouTube es requerida".into());
        }
        if extraer_youtube_id(&self.url_youtube).is_none() {
            return Err("URL de YouTube inválida".into());
        }
        Ok(())
    }

    fn construir(&self, existente: Option<&VideoPromocional>) -> VideoPromocional {
        let now = now_rfc3339();
        // validar() already proved the id extracts.
        let video_id = extraer_youtube_id(&self.url_youtube).unwrap_or_default();
        VideoPromocional {
            id: existente.map(|v| v.id.clone()).unwrap_or_else(new_id),
            carrera_id: self.carrera_id.trim().to_string(),
            titulo: opcional(&self.titulo),
            url_youtube: video_id,
            descripcion: opcional(&self.descripcion),
            activo: self.activo,
            created_at: existente
                .map(|v| v.created_at.clone())
                .unwrap_or_else(|| now.clone()),
            updated_at: now,
        }
    }

    fn id(entidad: &VideoPromocional) -> &str {
        &entidad.id
    }

    fn indices(entidad: &VideoPromocional) -> Vec<(&'static str, Value)> {
        vec![
            ("carrera_id", Value::Text(entidad.carrera_id.clone())),
            ("activo", Value::Integer(entidad.activo as i64)),
            ("created_at", Value::Text(entidad.created_at.clone())),
            ("updated_at", Value::Text(entidad.updated_at.clone())),
        ]
    }
}

/// Listing filters for videos promocionales.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideosFiltro {
    pub carrera_id: Option<String>,
}

impl ContentService {
    pub fn create_video(&self, draft: &VideoDraft) -> Result<VideoPromocional, ContentError> {
        guardar_formulario(self, Modo::Crear, draft)
    }

    pub fn update_video(
        &self,
        id: &str,
        draft: &VideoDraft,
    ) -> Result<VideoPromocional, ContentError> {
        guardar_formulario(self, Modo::Editar(id.to_string()), draft)
    }

    pub fn get_video(&self, id: &str) -> Result<VideoPromocional, ContentError> {
        self.get_record("videos_promocionales", id)
    }

    pub fn list_videos(
        &self,
        filtro: &VideosFiltro,
        params: &ListParams,
    ) -> Result<ListResult<VideoPromocional>, ContentError> {
        let mut filters = Vec::new();
        if let Some(carrera_id) = &filtro.carrera_id {
            filters.push(("carrera_id", Value::Text(carrera_id.clone())));
        }
        let (items, total) = self.list_records(
            "videos_promocionales",
            &filters,
            "created_at DESC",
            params.limit.min(500),
            params.offset,
        )?;
        Ok(ListResult { items, total })
    }

    pub fn delete_video(&self, id: &str) -> Result<(), ContentError> {
        self.delete_record("videos_promocionales", id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> std::sync::Arc<ContentService> {
        let sql = std::sync::Arc::new(panel_sql::SqliteStore::open_in_memory().unwrap());
        ContentService::new(sql).unwrap()
    }

    fn draft_valido(url: &str) -> VideoDraft {
        VideoDraft {
            carrera_id: "c1".into(),
            titulo: Some("Conoce la carrera".into()),
            url_youtube: url.into(),
            descripcion: None,
            activo: true,
        }
    }

    #[test]
    fn test_stores_extracted_video_id() {
        let svc = test_service();
        let video = svc
            .create_video(&draft_valido("https://youtu.be/dQw4w9WgXcQ"))
            .unwrap();
        assert_eq!(video.url_youtube, "dQw4w9WgXcQ");
        assert_eq!(video.titulo.as_deref(), Some("Conoce la carrera"));
    }

    #[test]
    fn test_rejects_invalid_urls() {
        let svc = test_service();

        let err = svc.create_video(&draft_valido("")).unwrap_err();
        assert_eq!(err.to_string(), "La URL de YouTube es requerida");

        let err = svc
            .create_video(&draft_valido("https://vimeo.com/12345"))
            .unwrap_err();
        assert_eq!(err.to_string(), "URL de YouTube inválida");

        let mut draft = draft_valido("https://youtu.be/dQw4w9WgXcQ");
        draft.carrera_id = " ".into();
        let err = svc.create_video(&draft).unwrap_err();
        assert_eq!(err.to_string(), "Debes seleccionar una carrera");

        assert_eq!(svc.count_records("videos_promocionales", &[]).unwrap(), 0);
    }

    #[test]
    fn test_empty_optional_text_stored_as_absent() {
        let svc = test_service();
        let mut draft = draft_valido("dQw4w9WgXcQ");
        draft.titulo = Some("   ".into());
        draft.descripcion = Some("".into());

        let video = svc.create_video(&draft).unwrap();
        assert_eq!(video.titulo, None);
        assert_eq!(video.descripcion, None);

        let json = serde_json::to_string(&video).unwrap();
        assert!(!json.contains("titulo"));
    }
}
