use panel_sql::Value;

use crate::model::ResumenPanel;
use crate::service::{ContentError, ContentService};

impl ContentService {
    /// Dashboard counters: active records per section plus the page
    /// views recorded in the current calendar month (UTC).
    pub fn resumen_panel(&self) -> Result<ResumenPanel, ContentError> {
        let activa = [("activa", Value::Integer(1))];
        let activo = [("activo", Value::Integer(1))];

        let mes = chrono::Utc::now().format("%Y-%m").to_string();
        let rows = self
            .sql
            .query(
                "SELECT COUNT(*) as cnt FROM visitas WHERE created_at LIKE ?1",
                &[Value::Text(format!("{}%", mes))],
            )
            .map_err(|e| ContentError::Storage(e.to_string()))?;
        let visitas_mes = rows.first().and_then(|r| r.get_i64("cnt")).unwrap_or(0);

        Ok(ResumenPanel {
            carreras: self.count_records("carreras", &activa)?,
            docentes: self.count_records("docentes", &activo)?,
            eventos: self.count_records("eventos", &activo)?,
            noticias: self.count_records("noticias", &activo)?,
            visitas_mes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CarreraDraft, DocenteDraft, NoticiaDraft, VisitaDraft};

    fn test_service() -> std::sync::Arc<ContentService> {
        let sql = std::sync::Arc::new(panel_sql::SqliteStore::open_in_memory().unwrap());
        ContentService::new(sql).unwrap()
    }

    fn carrera(nombre: &str, activa: bool) -> CarreraDraft {
        CarreraDraft {
            nombre: nombre.into(),
            slug: String::new(),
            descripcion: "Formamos profesionales capaces de diseñar sistemas modernos.".into(),
            duracion: "5 años".into(),
            semestres: 10,
            imagen_hero: None,
            descripcion_docentes: None,
            video_youtube: None,
            activa,
        }
    }

    #[test]
    fn test_resumen_counts_only_active_records() {
        let svc = test_service();
        let activa = svc.create_carrera(carrera("Ingeniería de Sistemas", true)).unwrap();
        svc.create_carrera(carrera("Ingeniería Civil", false)).unwrap();

        svc.create_docente(&DocenteDraft {
            carrera_id: activa.id.clone(),
            nombre: "María Fernández".into(),
            especialidad: "Redes".into(),
            titulo: "Ing. de Sistemas".into(),
            experiencia: "Diez años en infraestructura de redes.".into(),
            imagen_avatar: None,
            cv_imagen: None,
            orden: 0,
            activo: true,
        })
        .unwrap();

        svc.create_noticia(&NoticiaDraft {
            titulo: "Nueva convocatoria".into(),
            contenido: "Se abre la convocatoria de admisión para la próxima gestión.".into(),
            imagen_portada: None,
            autor: "Decanato".into(),
            fecha_publicacion: "2026-03-01T09:00".into(),
            categoria: "Institucional".into(),
            activo: true,
        })
        .unwrap();

        let resumen = svc.resumen_panel().unwrap();
        assert_eq!(resumen.carreras, 1);
        assert_eq!(resumen.docentes, 1);
        assert_eq!(resumen.eventos, 0);
        assert_eq!(resumen.noticias, 1);
    }

    #[test]
    fn test_visitas_mes_ignores_older_months() {
        let svc = test_service();
        for _ in 0..3 {
            svc.registrar_visita(&VisitaDraft::default()).unwrap();
        }

        // Age one row out of the current month.
        let vieja = svc
            .sql
            .query("SELECT id FROM visitas LIMIT 1", &[])
            .unwrap();
        let id = vieja.first().and_then(|r| r.get_str("id")).unwrap().to_string();
        svc.sql
            .exec(
                "UPDATE visitas SET created_at = ?1 WHERE id = ?2",
                &[
                    Value::Text("2020-01-15T00:00:00+00:00".into()),
                    Value::Text(id),
                ],
            )
            .unwrap();

        let resumen = svc.resumen_panel().unwrap();
        assert_eq!(resumen.visitas_mes, 2);
    }
}
