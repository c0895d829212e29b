pub mod ambito;
pub mod carrera;
pub mod configuracion;
pub mod desglose;
pub mod docente;
pub mod evento;
pub mod form;
pub mod noticia;
pub mod perfil_egresado;
pub mod plan;
pub mod resumen;
pub mod schema;
pub mod video;
pub mod visita;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use panel_sql::{SQLStore, Value};

/// Content service error type. Validation messages are user-facing
/// Spanish; handlers surface them verbatim.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Storage(String),

    #[error("{0}")]
    Internal(String),
}

impl From<ContentError> for panel_core::ServiceError {
    fn from(e: ContentError) -> Self {
        match e {
            ContentError::NotFound(m) => panel_core::ServiceError::NotFound(m),
            ContentError::Conflict(m) => panel_core::ServiceError::Conflict(m),
            ContentError::Validation(m) => panel_core::ServiceError::Validation(m),
            ContentError::Storage(m) => panel_core::ServiceError::Storage(m),
            ContentError::Internal(m) => panel_core::ServiceError::Internal(m),
        }
    }
}

/// The content service. One instance owns every public-site resource:
/// carreras and their child records, eventos, noticias, the site
/// configuration and the visit log.
pub struct ContentService {
    pub(crate) sql: Arc<dyn SQLStore>,
}

impl ContentService {
    /// Create a new ContentService, initializing the DB schema.
    pub fn new(sql: Arc<dyn SQLStore>) -> Result<Arc<Self>, ContentError> {
        schema::init_schema(sql.as_ref())?;
        Ok(Arc::new(Self { sql }))
    }

    // ── Generic CRUD helpers ──

    /// Insert a record as JSON into a table with indexed columns.
    pub(crate) fn insert_record<T: Serialize>(
        &self,
        table: &str,
        id: &str,
        record: &T,
        indexes: &[(&str, Value)],
    ) -> Result<(), ContentError> {
        let json = serde_json::to_string(record)
            .map_err(|e| ContentError::Internal(e.to_string()))?;

        let mut cols = vec!["id", "data"];
        let mut placeholders = vec!["?1".to_string(), "?2".to_string()];
        let mut params = vec![Value::Text(id.to_string()), Value::Text(json)];

        for (i, (col, val)) in indexes.iter().enumerate() {
            let idx = i + 3;
            cols.push(col);
            placeholders.push(format!("?{}", idx));
            params.push(val.clone());
        }

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            cols.join(", "),
            placeholders.join(", "),
        );

        self.sql.exec(&sql, &params).map_err(|e| {
            let msg = e.to_string();
            if msg.contains("UNIQUE constraint") {
                ContentError::Conflict(msg)
            } else {
                ContentError::Storage(msg)
            }
        })?;

        Ok(())
    }

    /// Get a record by id, deserializing the JSON `data` column.
    pub(crate) fn get_record<T: DeserializeOwned>(
        &self,
        table: &str,
        id: &str,
    ) -> Result<T, ContentError> {
        let sql = format!("SELECT data FROM {} WHERE id = ?1", table);
        let rows = self.sql
            .query(&sql, &[Value::Text(id.to_string())])
            .map_err(|e| ContentError::Storage(e.to_string()))?;
        let row = rows
            .first()
            .ok_or_else(|| ContentError::NotFound(format!("{}/{}", table, id)))?;
        let data = row
            .get_str("data")
            .ok_or_else(|| ContentError::Internal("missing data column".into()))?;
        serde_json::from_str(data).map_err(|e| ContentError::Internal(e.to_string()))
    }

    /// Update a record's JSON data and indexed columns.
    pub(crate) fn update_record<T: Serialize>(
        &self,
        table: &str,
        id: &str,
        record: &T,
        indexes: &[(&str, Value)],
    ) -> Result<(), ContentError> {
        let json = serde_json::to_string(record)
            .map_err(|e| ContentError::Internal(e.to_string()))?;

        let mut sets = vec!["data = ?1".to_string()];
        let mut params: Vec<Value> = vec![Value::Text(json)];

        for (i, (col, val)) in indexes.iter().enumerate() {
            let idx = i + 2;
            sets.push(format!("{} = ?{}", col, idx));
            params.push(val.clone());
        }

        let id_idx = params.len() + 1;
        params.push(Value::Text(id.to_string()));

        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{}",
            table,
            sets.join(", "),
            id_idx,
        );

        let affected = self.sql.exec(&sql, &params).map_err(|e| {
            let msg = e.to_string();
            if msg.contains("UNIQUE constraint") {
                ContentError::Conflict(msg)
            } else {
                ContentError::Storage(msg)
            }
        })?;

        if affected == 0 {
            return Err(ContentError::NotFound(format!("{}/{}", table, id)));
        }

        Ok(())
    }

    /// Delete a record by id.
    pub(crate) fn delete_record(&self, table: &str, id: &str) -> Result<(), ContentError> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", table);
        let affected = self.sql
            .exec(&sql, &[Value::Text(id.to_string())])
            .map_err(|e| ContentError::Storage(e.to_string()))?;
        if affected == 0 {
            return Err(ContentError::NotFound(format!("{}/{}", table, id)));
        }
        Ok(())
    }

    /// List records with optional equality filters, a per-table sort
    /// order and pagination.
    pub(crate) fn list_records<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, Value)],
        order: &str,
        limit: usize,
        offset: usize,
    ) -> Result<(Vec<T>, usize), ContentError> {
        let mut where_clauses = Vec::new();
        let mut params = Vec::new();

        for (i, (col, val)) in filters.iter().enumerate() {
            let idx = i + 1;
            where_clauses.push(format!("{} = ?{}", col, idx));
            params.push(val.clone());
        }

        let where_sql = if where_clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", where_clauses.join(" AND "))
        };

        // Count
        let count_sql = format!("SELECT COUNT(*) as cnt FROM {}{}", table, where_sql);
        let count_rows = self.sql
            .query(&count_sql, &params)
            .map_err(|e| ContentError::Storage(e.to_string()))?;
        let total = count_rows
            .first()
            .and_then(|r| r.get_i64("cnt"))
            .unwrap_or(0) as usize;

        // Items
        let limit_idx = params.len() + 1;
        let offset_idx = params.len() + 2;
        params.push(Value::Integer(limit as i64));
        params.push(Value::Integer(offset as i64));

        let sql = format!(
            "SELECT data FROM {}{} ORDER BY {} LIMIT ?{} OFFSET ?{}",
            table, where_sql, order, limit_idx, offset_idx,
        );

        let rows = self.sql
            .query(&sql, &params)
            .map_err(|e| ContentError::Storage(e.to_string()))?;

        let mut items = Vec::new();
        for row in &rows {
            let data = row
                .get_str("data")
                .ok_or_else(|| ContentError::Internal("missing data column".into()))?;
            let item: T =
                serde_json::from_str(data).map_err(|e| ContentError::Internal(e.to_string()))?;
            items.push(item);
        }

        Ok((items, total))
    }

    /// Count records matching equality filters.
    pub(crate) fn count_records(
        &self,
        table: &str,
        filters: &[(&str, Value)],
    ) -> Result<i64, ContentError> {
        let mut where_clauses = Vec::new();
        let mut params = Vec::new();

        for (i, (col, val)) in filters.iter().enumerate() {
            where_clauses.push(format!("{} = ?{}", col, i + 1));
            params.push(val.clone());
        }

        let where_sql = if where_clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", where_clauses.join(" AND "))
        };

        let sql = format!("SELECT COUNT(*) as cnt FROM {}{}", table, where_sql);
        let rows = self.sql
            .query(&sql, &params)
            .map_err(|e| ContentError::Storage(e.to_string()))?;
        Ok(rows.first().and_then(|r| r.get_i64("cnt")).unwrap_or(0))
    }

    /// Insert a set of records with one statement inside a single
    /// transaction. All rows are written or none are.
    pub(crate) fn insert_lote<T: Serialize>(
        &self,
        table: &str,
        rows: &[T],
        id_de: impl Fn(&T) -> &str,
        indices_de: impl Fn(&T) -> Vec<(&'static str, Value)>,
    ) -> Result<u64, ContentError> {
        let primero = match rows.first() {
            Some(r) => r,
            None => return Ok(0),
        };

        let mut cols = vec!["id", "data"];
        let mut placeholders = vec!["?1".to_string(), "?2".to_string()];
        for (i, (col, _)) in indices_de(primero).iter().enumerate() {
            cols.push(col);
            placeholders.push(format!("?{}", i + 3));
        }

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            cols.join(", "),
            placeholders.join(", "),
        );

        let mut param_sets = Vec::with_capacity(rows.len());
        for row in rows {
            let json = serde_json::to_string(row)
                .map_err(|e| ContentError::Internal(e.to_string()))?;
            let mut params = vec![Value::Text(id_de(row).to_string()), Value::Text(json)];
            for (_, val) in indices_de(row) {
                params.push(val);
            }
            param_sets.push(params);
        }

        self.sql.exec_many(&sql, &param_sets).map_err(|e| {
            let msg = e.to_string();
            if msg.contains("UNIQUE constraint") {
                ContentError::Conflict(msg)
            } else {
                ContentError::Storage(msg)
            }
        })
    }
}
