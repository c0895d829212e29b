use panel_sql::SQLStore;

use crate::service::ContentError;

/// Initialize the SQLite schema for all content resources.
pub fn init_schema(sql: &dyn SQLStore) -> Result<(), ContentError> {
    let statements = [
        // Degree programs. The public site looks carreras up by slug.
        "CREATE TABLE IF NOT EXISTS carreras (
            id TEXT PRIMARY KEY,
            nombre TEXT NOT NULL,
            slug TEXT NOT NULL,
            activa INTEGER NOT NULL DEFAULT 1,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_carreras_slug ON carreras(slug)",
        "CREATE INDEX IF NOT EXISTS idx_carreras_activa ON carreras(activa)",

        // Teaching staff, ordered within each carrera
        "CREATE TABLE IF NOT EXISTS docentes (
            id TEXT PRIMARY KEY,
            carrera_id TEXT NOT NULL,
            orden INTEGER NOT NULL DEFAULT 0,
            activo INTEGER NOT NULL DEFAULT 1,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_docentes_carrera ON docentes(carrera_id)",

        // Curriculum subjects. The hour columns feed the desglose
        // aggregation, so they live outside the JSON blob.
        "CREATE TABLE IF NOT EXISTS plan_estudios (
            id TEXT PRIMARY KEY,
            carrera_id TEXT NOT NULL,
            semestre_numero INTEGER NOT NULL,
            categoria TEXT NOT NULL,
            horas_teoria INTEGER NOT NULL DEFAULT 0,
            horas_practica INTEGER NOT NULL DEFAULT 0,
            orden INTEGER NOT NULL DEFAULT 0,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_plan_carrera ON plan_estudios(carrera_id)",

        // Events, listed newest first by start date
        "CREATE TABLE IF NOT EXISTS eventos (
            id TEXT PRIMARY KEY,
            tipo TEXT NOT NULL,
            activo INTEGER NOT NULL DEFAULT 1,
            fecha_inicio TEXT NOT NULL,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_eventos_fecha ON eventos(fecha_inicio)",

        // News articles, listed newest first by publication date
        "CREATE TABLE IF NOT EXISTS noticias (
            id TEXT PRIMARY KEY,
            categoria TEXT NOT NULL,
            activo INTEGER NOT NULL DEFAULT 1,
            fecha_publicacion TEXT NOT NULL,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_noticias_fecha ON noticias(fecha_publicacion)",

        // Promotional videos per carrera
        "CREATE TABLE IF NOT EXISTS videos_promocionales (
            id TEXT PRIMARY KEY,
            carrera_id TEXT NOT NULL,
            activo INTEGER NOT NULL DEFAULT 1,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_videos_carrera ON videos_promocionales(carrera_id)",

        // Career fields per carrera
        "CREATE TABLE IF NOT EXISTS ambitos_laborales (
            id TEXT PRIMARY KEY,
            carrera_id TEXT NOT NULL,
            orden INTEGER NOT NULL DEFAULT 0,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_ambitos_carrera ON ambitos_laborales(carrera_id)",

        // Graduate-profile competencies per carrera
        "CREATE TABLE IF NOT EXISTS perfil_egresado (
            id TEXT PRIMARY KEY,
            carrera_id TEXT NOT NULL,
            orden INTEGER NOT NULL DEFAULT 0,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_perfil_carrera ON perfil_egresado(carrera_id)",

        // Site configuration: at most one row by construction
        "CREATE TABLE IF NOT EXISTS configuracion_facultad (
            id TEXT PRIMARY KEY,
            activo INTEGER NOT NULL DEFAULT 1,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",

        // Public-site visit log. Insert-only, no updated_at.
        "CREATE TABLE IF NOT EXISTS visitas (
            id TEXT PRIMARY KEY,
            pagina TEXT NOT NULL,
            tipo_pagina TEXT NOT NULL,
            carrera_id TEXT,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_visitas_tipo ON visitas(tipo_pagina)",
        "CREATE INDEX IF NOT EXISTS idx_visitas_fecha ON visitas(created_at)",
    ];

    for stmt in &statements {
        sql.exec(stmt, &[])
            .map_err(|e| ContentError::Storage(e.to_string()))?;
    }

    Ok(())
}
