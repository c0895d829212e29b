//! Bootstrap — startup checks and first-administrator seeding.
//!
//! When paneld starts:
//! 1. Verify the config carries the required values — if not, refuse
//!    to start.
//! 2. If the config has a `[seed]` section and the panel has no
//!    administrators yet, create the first one.

use std::sync::Arc;

use panel_core::{new_id, now_rfc3339};
use panel_sql::{SQLStore, Value};
use tracing::info;

use crate::config::{SeedConfig, ServerConfig};

/// Verify server configuration is ready for use.
pub fn verify_config(config: &ServerConfig) -> anyhow::Result<()> {
    if config.storage.data_dir.is_empty() {
        anyhow::bail!("Storage data_dir is empty in configuration.");
    }
    if config.jwt.secret.is_empty() {
        anyhow::bail!("JWT secret is empty in configuration.");
    }
    Ok(())
}

/// Seed the first administrator while the panel has none.
///
/// Writes the credential (password arrives pre-hashed) and the
/// admin-role profile under one id, the paired layout the auth module
/// maintains. A panel that already has any administrator is left
/// alone, so this cannot resurrect a deleted account.
pub fn seed_admin(sql: &Arc<dyn SQLStore>, seed: &SeedConfig) -> anyhow::Result<()> {
    let rows = sql
        .query("SELECT COUNT(*) as cnt FROM administradores", &[])
        .map_err(|e| anyhow::anyhow!("seed check failed: {}", e))?;
    let existentes = rows.first().and_then(|r| r.get_i64("cnt")).unwrap_or(0);
    if existentes > 0 {
        return Ok(());
    }

    let id = new_id();
    let now = now_rfc3339();
    let email = seed.email.trim().to_lowercase();

    let credencial = auth::model::Credencial {
        id: id.clone(),
        email: email.clone(),
        password_hash: seed.password_hash.clone(),
        confirmado: true,
        created_at: now.clone(),
        updated_at: now.clone(),
    };
    sql.exec(
        "INSERT INTO credenciales (id, email, confirmado, data, created_at, updated_at)
         VALUES (?1, ?2, 1, ?3, ?4, ?4)",
        &[
            Value::Text(id.clone()),
            Value::Text(email.clone()),
            Value::Text(serde_json::to_string(&credencial)?),
            Value::Text(now.clone()),
        ],
    )
    .map_err(|e| anyhow::anyhow!("failed to seed credential: {}", e))?;

    let perfil = auth::model::PerfilAdministrador {
        id: id.clone(),
        nombre_completo: seed.nombre_completo.trim().to_string(),
        email: email.clone(),
        rol: auth::model::AppRole::Admin,
        activo: true,
        ultimo_acceso: None,
        created_at: now.clone(),
        updated_at: now.clone(),
    };
    sql.exec(
        "INSERT INTO administradores (id, email, rol, activo, data, created_at, updated_at)
         VALUES (?1, ?2, 'admin', 1, ?3, ?4, ?4)",
        &[
            Value::Text(id),
            Value::Text(email.clone()),
            Value::Text(serde_json::to_string(&perfil)?),
            Value::Text(now),
        ],
    )
    .map_err(|e| anyhow::anyhow!("failed to seed administrator: {}", e))?;

    info!(email = %email, "Seeded first administrator");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{JwtConfig, StorageConfig};

    use auth::service::{AuthConfig, AuthService};
    use panel_core::ListParams;

    fn config(data_dir: &str, secret: &str) -> ServerConfig {
        ServerConfig {
            storage: StorageConfig {
                data_dir: data_dir.to_string(),
            },
            jwt: JwtConfig {
                secret: secret.to_string(),
                expire_secs: 3600,
            },
            seed: None,
            listen: "0.0.0.0:8080".to_string(),
        }
    }

    fn seed() -> SeedConfig {
        SeedConfig {
            email: "Admin@UEB.edu.bo".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string(),
            nombre_completo: "Administrador UEB".to_string(),
        }
    }

    #[test]
    fn test_verify_config_empty_data_dir() {
        assert!(verify_config(&config("", "secreto")).is_err());
    }

    #[test]
    fn test_verify_config_empty_secret() {
        assert!(verify_config(&config("/var/lib/panel", "")).is_err());
    }

    #[test]
    fn test_verify_config_ok() {
        assert!(verify_config(&config("/var/lib/panel", "secreto")).is_ok());
    }

    #[test]
    fn test_seed_admin_only_on_empty_panel() {
        let sql: Arc<dyn SQLStore> =
            Arc::new(panel_sql::SqliteStore::open_in_memory().unwrap());
        let svc = AuthService::new(Arc::clone(&sql), AuthConfig::default()).unwrap();

        seed_admin(&sql, &seed()).unwrap();
        let lista = svc.list_administradores(&ListParams::default()).unwrap();
        assert_eq!(lista.total, 1);
        assert_eq!(lista.items[0].email, "admin@ueb.edu.bo");
        assert_eq!(lista.items[0].rol, auth::model::AppRole::Admin);
        assert!(lista.items[0].activo);

        // A second start must not duplicate or overwrite.
        seed_admin(&sql, &seed()).unwrap();
        let lista = svc.list_administradores(&ListParams::default()).unwrap();
        assert_eq!(lista.total, 1);
    }

    #[test]
    fn test_seed_admin_skips_populated_panel() {
        let sql: Arc<dyn SQLStore> =
            Arc::new(panel_sql::SqliteStore::open_in_memory().unwrap());
        let svc = AuthService::new(Arc::clone(&sql), AuthConfig::default()).unwrap();

        svc.create_administrador(auth::model::AdministradorCrear {
            email: "ana@fcyt.edu.bo".to_string(),
            password: "secreta123".to_string(),
            nombre_completo: "Ana Rojas".to_string(),
            rol: auth::model::AppRole::Editor,
        })
        .unwrap();

        seed_admin(&sql, &seed()).unwrap();
        let lista = svc.list_administradores(&ListParams::default()).unwrap();
        assert_eq!(lista.total, 1);
        assert_eq!(lista.items[0].email, "ana@fcyt.edu.bo");
    }
}
