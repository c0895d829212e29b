//! Server configuration.
//!
//! Loaded from a TOML file resolved by [`ServerConfig::resolve_path`]:
//! a bare name maps to `/etc/panel/<name>.toml`, anything containing a
//! `/` or `.` is taken as a path.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Server-side configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub storage: StorageConfig,

    pub jwt: JwtConfig,

    /// First-administrator seed, applied only while the
    /// administradores table is empty.
    #[serde(default)]
    pub seed: Option<SeedConfig>,

    /// Listen address; `--listen` on the CLI takes precedence.
    #[serde(default = "default_listen")]
    pub listen: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the SQLite database.
    #[serde(default)]
    pub data_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// JWT signing secret.
    #[serde(default)]
    pub secret: String,

    /// Token lifetime in seconds.
    #[serde(default = "default_expire_secs")]
    pub expire_secs: i64,
}

/// First administrator, created on an empty database. The password
/// arrives pre-hashed (PHC argon2id) so the plaintext never touches
/// the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    pub email: String,
    pub password_hash: String,
    pub nombre_completo: String,
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_expire_secs() -> i64 {
    86400 // 24h
}

impl ServerConfig {
    /// Resolve a config name or path to a file path.
    pub fn resolve_path(name_or_path: &str) -> PathBuf {
        if name_or_path.contains('/') || name_or_path.contains('.') {
            PathBuf::from(name_or_path)
        } else {
            PathBuf::from(format!("/etc/panel/{}.toml", name_or_path))
        }
    }

    /// Load config from disk.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
        let config: ServerConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path() {
        assert_eq!(
            ServerConfig::resolve_path("produccion"),
            PathBuf::from("/etc/panel/produccion.toml")
        );
        assert_eq!(
            ServerConfig::resolve_path("./panel.toml"),
            PathBuf::from("./panel.toml")
        );
        assert_eq!(
            ServerConfig::resolve_path("/opt/panel/config.toml"),
            PathBuf::from("/opt/panel/config.toml")
        );
    }

    #[test]
    fn test_load_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panel.toml");
        std::fs::write(
            &path,
            r#"
listen = "127.0.0.1:9090"

[storage]
data_dir = "/var/lib/panel"

[jwt]
secret = "super-secreto"
expire_secs = 7200

[seed]
email = "admin@ueb.edu.bo"
password_hash = "$argon2id$v=19$m=19456,t=2,p=1$abc$def"
nombre_completo = "Administrador UEB"
"#,
        )
        .unwrap();

        let config = ServerConfig::load(&path).unwrap();
        assert_eq!(config.listen, "127.0.0.1:9090");
        assert_eq!(config.storage.data_dir, "/var/lib/panel");
        assert_eq!(config.jwt.secret, "super-secreto");
        assert_eq!(config.jwt.expire_secs, 7200);
        let seed = config.seed.unwrap();
        assert_eq!(seed.email, "admin@ueb.edu.bo");
    }

    #[test]
    fn test_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panel.toml");
        std::fs::write(
            &path,
            r#"
[storage]
data_dir = "/var/lib/panel"

[jwt]
secret = "super-secreto"
"#,
        )
        .unwrap();

        let config = ServerConfig::load(&path).unwrap();
        assert_eq!(config.listen, "0.0.0.0:8080");
        assert_eq!(config.jwt.expire_secs, 86400);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(ServerConfig::load(Path::new("/no/existe/panel.toml")).is_err());
    }
}
