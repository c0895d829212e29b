use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// DesgloseCarrera — curriculum hour breakdown for one carrera,
/// aggregated over its plan_estudios rows.
///
/// The percentages are integers that always add up to 100 (or are both 0
/// when the carrera has no hours at all). `desglose_categoria` maps each
/// categoria present in the plan to its combined (teoría + práctica)
/// hours.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DesgloseCarrera {
    pub total_horas_teoria: i64,
    pub total_horas_practica: i64,
    pub porcentaje_teoria: i64,
    pub porcentaje_practica: i64,
    /// Distinct semesters with at least one materia.
    pub total_semestres: i64,
    /// Semesters divided by two, rounded up.
    pub total_anos: i64,
    pub desglose_categoria: BTreeMap<String, i64>,
}
