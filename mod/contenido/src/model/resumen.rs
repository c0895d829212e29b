use serde::{Deserialize, Serialize};

/// Dashboard counters: active records per section plus this month's
/// page views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumenPanel {
    pub carreras: i64,
    pub docentes: i64,
    pub eventos: i64,
    pub noticias: i64,
    pub visitas_mes: i64,
}
