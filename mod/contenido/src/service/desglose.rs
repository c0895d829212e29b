use std::collections::BTreeMap;

use panel_sql::Value;

use crate::model::{Carrera, DesgloseCarrera};
use crate::service::{ContentError, ContentService};

impl ContentService {
    /// Hour breakdown of a carrera's curriculum: theory/practice totals
    /// with rounded percentages, semester span and combined hours per
    /// category. A carrera without materias gets an all-zero breakdown.
    pub fn desglose_carrera(&self, carrera_id: &str) -> Result<DesgloseCarrera, ContentError> {
        // Surface a missing carrera before aggregating over nothing.
        let _: Carrera = self.get_record("carreras", carrera_id)?;

        let params = [Value::Text(carrera_id.to_string())];
        let rows = self
            .sql
            .query(
                "SELECT SUM(horas_teoria) as teoria, SUM(horas_practica) as practica, \
                 COUNT(DISTINCT semestre_numero) as semestres \
                 FROM plan_estudios WHERE carrera_id = ?1",
                &params,
            )
            .map_err(|e| ContentError::Storage(e.to_string()))?;

        let (teoria, practica, semestres) = rows
            .first()
            .map(|r| {
                (
                    r.get_i64("teoria").unwrap_or(0),
                    r.get_i64("practica").unwrap_or(0),
                    r.get_i64("semestres").unwrap_or(0),
                )
            })
            .unwrap_or((0, 0, 0));

        let total = teoria + practica;
        let porcentaje_teoria = if total > 0 {
            ((teoria as f64 / total as f64) * 100.0).round() as i64
        } else {
            0
        };
        let porcentaje_practica = if total > 0 { 100 - porcentaje_teoria } else { 0 };

        let rows = self
            .sql
            .query(
                "SELECT categoria, SUM(horas_teoria + horas_practica) as horas \
                 FROM plan_estudios WHERE carrera_id = ?1 GROUP BY categoria",
                &params,
            )
            .map_err(|e| ContentError::Storage(e.to_string()))?;

        let mut desglose_categoria = BTreeMap::new();
        for row in &rows {
            let categoria = row
                .get_str("categoria")
                .ok_or_else(|| ContentError::Internal("missing categoria column".into()))?;
            desglose_categoria.insert(categoria.to_string(), row.get_i64("horas").unwrap_or(0));
        }

        Ok(DesgloseCarrera {
            total_horas_teoria: teoria,
            total_horas_practica: practica,
            porcentaje_teoria,
            porcentaje_practica,
            total_semestres: semestres,
            // Two semesters per academic year, odd counts round up.
            total_anos: (semestres + 1) / 2,
            desglose_categoria,
        })
    }
}
