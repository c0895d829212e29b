//! The generic form lifecycle.
//!
//! Every content screen goes through the same save path: validate the
//! draft (first failure only, user-facing Spanish message), load the
//! existing record when editing, build the stored entity from the draft,
//! then insert or update. Entities differ only in their [`Formulario`]
//! implementation; the lifecycle itself is written once.
//!
//! The "agregar masivo" screens (plan de estudios, ámbitos laborales,
//! perfil del egresado) share the bulk variant: batch-level checks, then
//! one multi-row insert inside a single transaction.

use serde::Serialize;
use serde::de::DeserializeOwned;

use panel_sql::Value;

use crate::model::Carrera;
use crate::service::{ContentError, ContentService};

/// Save mode: create a new record or edit an existing one by id.
#[derive(Debug, Clone)]
pub enum Modo {
    Crear,
    Editar(String),
}

/// A form draft that can be saved through the generic lifecycle.
pub trait Formulario {
    type Entidad: Serialize + DeserializeOwned;

    /// Target table.
    const TABLA: &'static str;

    /// Display label with article, e.g. "la materia" — used in the
    /// load-failure message `Error al cargar <etiqueta>`.
    const ETIQUETA: &'static str;

    /// Ordered validation; returns the first failing check's message.
    fn validar(&self) -> Result<(), String>;

    /// Build the stored entity from the draft. In edit mode `existente`
    /// supplies the id and `created_at`, which are preserved; everything
    /// else comes from the draft, normalized (trimmed strings, empty
    /// optionals dropped, dates in RFC 3339, YouTube URLs as bare ids).
    fn construir(&self, existente: Option<&Self::Entidad>) -> Self::Entidad;

    fn id(entidad: &Self::Entidad) -> &str;

    /// Indexed columns written alongside the JSON data.
    fn indices(entidad: &Self::Entidad) -> Vec<(&'static str, Value)>;
}

/// Validate and persist one form draft.
///
/// Validation failures never reach the store. In edit mode a vanished
/// record surfaces as `Error al cargar <etiqueta>`; resubmitting an
/// unchanged draft rewrites the same record (only `updated_at` moves).
pub fn guardar_formulario<F: Formulario>(
    svc: &ContentService,
    modo: Modo,
    form: &F,
) -> Result<F::Entidad, ContentError> {
    form.validar().map_err(ContentError::Validation)?;

    let existente = match &modo {
        Modo::Crear => None,
        Modo::Editar(id) => {
            let actual = svc.get_record::<F::Entidad>(F::TABLA, id).map_err(|e| match e {
                ContentError::NotFound(_) => {
                    ContentError::NotFound(format!("Error al cargar {}", F::ETIQUETA))
                }
                otro => otro,
            })?;
            Some(actual)
        }
    };

    let entidad = form.construir(existente.as_ref());
    let indices = F::indices(&entidad);

    match existente {
        Some(_) => svc.update_record(F::TABLA, F::id(&entidad), &entidad, &indices)?,
        None => svc.insert_record(F::TABLA, F::id(&entidad), &entidad, &indices)?,
    }

    Ok(entidad)
}

/// A form draft that can be saved in bulk under one carrera.
pub trait FormularioLote: Sized {
    type Entidad: Serialize;

    const TABLA: &'static str;

    /// Empty-batch message, e.g. "Debe haber al menos una materia".
    const MENSAJE_VACIO: &'static str;

    /// Any-row-incomplete message, e.g. "Todas las materias deben tener
    /// un nombre".
    const MENSAJE_INCOMPLETO: &'static str;

    /// Empty-after-filter message, e.g. "No hay materias válidas para
    /// guardar".
    const MENSAJE_SIN_VALIDAS: &'static str;

    /// Whether the row passes its emptiness rule.
    fn completa(&self) -> bool;

    /// Batch-level check against the parent carrera. Default: none.
    fn validar_lote(filas: &[Self], carrera: &Carrera) -> Result<(), String> {
        let _ = (filas, carrera);
        Ok(())
    }

    /// Build the stored entity for one row under the given carrera.
    fn construir(&self, carrera_id: &str) -> Self::Entidad;

    fn id(entidad: &Self::Entidad) -> &str;

    fn indices(entidad: &Self::Entidad) -> Vec<(&'static str, Value)>;

    /// Success message reporting the inserted count.
    fn mensaje_exito(n: u64) -> String;
}

/// Validate and persist a batch of rows under one carrera.
///
/// The whole batch is rejected when any row fails its emptiness rule or
/// the batch-level check; otherwise all rows are written in a single
/// transaction. Returns the inserted count and the success message.
pub fn guardar_lote<F: FormularioLote>(
    svc: &ContentService,
    carrera_id: &str,
    filas: &[F],
) -> Result<(u64, String), ContentError> {
    let carrera: Carrera = svc.get_record("carreras", carrera_id)?;

    if filas.is_empty() {
        return Err(ContentError::Validation(F::MENSAJE_VACIO.to_string()));
    }
    if filas.iter().any(|f| !f.completa()) {
        return Err(ContentError::Validation(F::MENSAJE_INCOMPLETO.to_string()));
    }
    F::validar_lote(filas, &carrera).map_err(ContentError::Validation)?;

    let validas: Vec<&F> = filas.iter().filter(|f| f.completa()).collect();
    if validas.is_empty() {
        return Err(ContentError::Validation(F::MENSAJE_SIN_VALIDAS.to_string()));
    }

    let entidades: Vec<F::Entidad> = validas
        .iter()
        .map(|f| f.construir(&carrera.id))
        .collect();

    let insertadas = svc.insert_lote(F::TABLA, &entidades, F::id, F::indices)?;
    Ok((insertadas, F::mensaje_exito(insertadas)))
}

/// Trimmed string, or `None` when empty — optional text fields are
/// stored as absent rather than "".
pub(crate) fn opcional(valor: &Option<String>) -> Option<String> {
    valor
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Normalize a date input to RFC 3339 (UTC). Accepts RFC 3339 as-is and
/// the zone-less `YYYY-MM-DDTHH:MM[:SS]` form the datetime picker emits,
/// which is taken as UTC. Anything else is returned unchanged.
pub(crate) fn normalizar_fecha(valor: &str) -> String {
    let valor = valor.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(valor) {
        return dt.to_utc().to_rfc3339();
    }
    for formato in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(valor, formato) {
            return naive.and_utc().to_rfc3339();
        }
    }
    valor.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcional() {
        assert_eq!(opcional(&None), None);
        assert_eq!(opcional(&Some("".into())), None);
        assert_eq!(opcional(&Some("   ".into())), None);
        assert_eq!(opcional(&Some("  hola  ".into())), Some("hola".into()));
    }

    #[test]
    fn test_normalizar_fecha() {
        assert_eq!(
            normalizar_fecha("2024-05-12T14:30"),
            "2024-05-12T14:30:00+00:00"
        );
        assert_eq!(
            normalizar_fecha("2024-05-12T14:30:15"),
            "2024-05-12T14:30:15+00:00"
        );
        assert_eq!(
            normalizar_fecha("2024-05-12T14:30:00-04:00"),
            "2024-05-12T18:30:00+00:00"
        );
        // Bare dates pass through untouched.
        assert_eq!(normalizar_fecha("2024-05-12"), "2024-05-12");
    }
}
