use panel_sql::SQLStore;

use crate::service::AuthError;

/// Initialize the SQLite schema for all auth resources.
pub fn init_schema(sql: &dyn SQLStore) -> Result<(), AuthError> {
    let statements = [
        // Administrator profiles: who may enter the panel
        "CREATE TABLE IF NOT EXISTS administradores (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL,
            rol TEXT NOT NULL,
            activo INTEGER NOT NULL DEFAULT 1,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_administradores_email ON administradores(email)",
        "CREATE INDEX IF NOT EXISTS idx_administradores_activo ON administradores(activo)",

        // Credentials: login identities; password hash lives in data
        "CREATE TABLE IF NOT EXISTS credenciales (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL,
            confirmado INTEGER NOT NULL DEFAULT 0,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_credenciales_email ON credenciales(email)",

        // Sessions: JWT issuance records; a token is only honored
        // while its row exists with revoked = 0
        "CREATE TABLE IF NOT EXISTS sesiones (
            id TEXT PRIMARY KEY,
            admin_id TEXT NOT NULL,
            revoked INTEGER NOT NULL DEFAULT 0,
            data TEXT NOT NULL,
            issued_at TEXT NOT NULL,
            expires_at TEXT NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_sesiones_admin ON sesiones(admin_id)",
    ];

    for stmt in &statements {
        sql.exec(stmt, &[])
            .map_err(|e| AuthError::Storage(e.to_string()))?;
    }

    Ok(())
}
