use serde::Deserialize;

use panel_core::{ListParams, ListResult, new_id, now_rfc3339};
use panel_sql::Value;

use crate::model::{Noticia, NoticiaDraft};
use crate::service::form::{Formulario, Modo, guardar_formulario, opcional};
use crate::service::{ContentError, ContentService};

impl Formulario for NoticiaDraft {
    type Entidad = Noticia;

    const TABLA: &'static str = "noticias";
    const ETIQUETA: &'static str = "la noticia";

    fn validar(&self) -> Result<(), String> {
        if self.titulo.trim().is_empty() || self.titulo.chars().count() < 5 {
            return Err("El título debe tener al menos 5 caracteres".into());
        }
        if self.contenido.trim().is_empty() || self.contenido.chars().count() < 20 {
            return Err("El contenido debe tener al menos 20 caracteres".into());
        }
        if self.autor.trim().is_empty() {
            return Err("El autor es requerido".into());
        }
        if self.fecha_publicacion.trim().is_empty() {
            return Err("La fecha de publicación es requerida".into());
        }
        Ok(())
    }

    fn construir(&self, existente: Option<&Noticia>) -> Noticia {
        let now = now_rfc3339();
        let categoria = self.categoria.trim();
        Noticia {
            id: existente.map(|n| n.id.clone()).unwrap_or_else(new_id),
            titulo: self.titulo.trim().to_string(),
            contenido: self.contenido.trim().to_string(),
            imagen_portada: opcional(&self.imagen_portada),
            autor: self.autor.trim().to_string(),
            fecha_publicacion: self.fecha_publicacion.trim().to_string(),
            categoria: if categoria.is_empty() {
                "General".to_string()
            } else {
                categoria.to_string()
            },
            activo: self.activo,
            created_at: existente
                .map(|n| n.created_at.clone())
                .unwrap_or_else(|| now.clone()),
            updated_at: now,
        }
    }

    fn id(entidad: &Noticia) -> &str {
        &entidad.id
    }

    fn indices(entidad: &Noticia) -> Vec<(&'static str, Value)> {
        vec![
            ("categoria", Value::Text(entidad.categoria.clone())),
            ("activo", Value::Integer(entidad.activo as i64)),
            ("fecha_publicacion", Value::Text(entidad.fecha_publicacion.clone())),
            ("created_at", Value::Text(entidad.created_at.clone())),
            ("updated_at", Value::Text(entidad.updated_at.clone())),
        ]
    }
}

/// Listing filters for noticias.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoticiasFiltro {
    pub categoria: Option<String>,
    pub activo: Option<bool>,
}

impl ContentService {
    pub fn create_noticia(&self, draft: &NoticiaDraft) -> Result<Noticia, ContentError> {
        guardar_formulario(self, Modo::Crear, draft)
    }

    pub fn update_noticia(&self, id: &str, draft: &NoticiaDraft) -> Result<Noticia, ContentError> {
        guardar_formulario(self, Modo::Editar(id.to_string()), draft)
    }

    pub fn get_noticia(&self, id: &str) -> Result<Noticia, ContentError> {
        self.get_record("noticias", id)
    }

    pub fn list_noticias(
        &self,
        filtro: &NoticiasFiltro,
        params: &ListParams,
    ) -> Result<ListResult<Noticia>, ContentError> {
        let mut filters = Vec::new();
        if let Some(categoria) = &filtro.categoria {
            filters.push(("categoria", Value::Text(categoria.clone())));
        }
        if let Some(activo) = filtro.activo {
            filters.push(("activo", Value::Integer(activo as i64)));
        }
        let (items, total) = self.list_records(
            "noticias",
            &filters,
            "fecha_publicacion DESC",
            params.limit.min(500),
            params.offset,
        )?;
        Ok(ListResult { items, total })
    }

    pub fn delete_noticia(&self, id: &str) -> Result<(), ContentError> {
        self.delete_record("noticias", id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> std::sync::Arc<ContentService> {
        let sql = std::sync::Arc::new(panel_sql::SqliteStore::open_in_memory().unwrap());
        ContentService::new(sql).unwrap()
    }

    fn draft_valida(titulo: &str, fecha: &str) -> NoticiaDraft {
        NoticiaDraft {
            titulo: titulo.into(),
            contenido: "La facultad inaugura un nuevo laboratorio de electrónica.".into(),
            imagen_portada: None,
            autor: "Comunicación FCyT".into(),
            fecha_publicacion: fecha.into(),
            categoria: "Institucional".into(),
            activo: true,
        }
    }

    #[test]
    fn test_validations_in_order() {
        let svc = test_service();

        let err = svc.create_noticia(&draft_valida("Hola", "2024-06-01")).unwrap_err();
        assert_eq!(err.to_string(), "El título debe tener al menos 5 caracteres");

        let mut draft = draft_valida("Nuevo laboratorio", "2024-06-01");
        draft.contenido = "Breve".into();
        let err = svc.create_noticia(&draft).unwrap_err();
        assert_eq!(
            err.to_string(),
            "El contenido debe tener al menos 20 caracteres"
        );

        draft = draft_valida("Nuevo laboratorio", "2024-06-01");
        draft.autor = "".into();
        let err = svc.create_noticia(&draft).unwrap_err();
        assert_eq!(err.to_string(), "El autor es requerido");

        draft = draft_valida("Nuevo laboratorio", "");
        let err = svc.create_noticia(&draft).unwrap_err();
        assert_eq!(err.to_string(), "La fecha de publicación es requerida");

        assert_eq!(svc.count_records("noticias", &[]).unwrap(), 0);
    }

    #[test]
    fn test_list_newest_first_with_category_filter() {
        let svc = test_service();
        svc.create_noticia(&draft_valida("Convocatoria becas", "2024-04-10")).unwrap();
        svc.create_noticia(&draft_valida("Nuevo laboratorio", "2024-06-01")).unwrap();
        let mut tech = draft_valida("Semana de la robótica", "2024-05-05");
        tech.categoria = "Tecnología".into();
        svc.create_noticia(&tech).unwrap();

        let todas = svc
            .list_noticias(&NoticiasFiltro::default(), &ListParams::default())
            .unwrap();
        let titulos: Vec<&str> = todas.items.iter().map(|n| n.titulo.as_str()).collect();
        assert_eq!(
            titulos,
            vec!["Nuevo laboratorio", "Semana de la robótica", "Convocatoria becas"]
        );

        let tecnologia = svc
            .list_noticias(
                &NoticiasFiltro {
                    categoria: Some("Tecnología".into()),
                    ..Default::default()
                },
                &ListParams::default(),
            )
            .unwrap();
        assert_eq!(tecnologia.total, 1);
        assert_eq!(tecnologia.items[0].titulo, "Semana de la robótica");
    }

    #[test]
    fn test_blank_category_falls_back_to_general() {
        let svc = test_service();
        let mut draft = draft_valida("Nuevo laboratorio", "2024-06-01");
        draft.categoria = "  ".into();
        let noticia = svc.create_noticia(&draft).unwrap();
        assert_eq!(noticia.categoria, "General");
    }
}
