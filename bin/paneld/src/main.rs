//! `paneld` — the admin panel server binary.
//!
//! Usage:
//!   paneld -c <name-or-path> [--listen <addr>]
//!
//! The config name resolves to `/etc/panel/<name>.toml`.
//! If a path with `/` or `.` is given, it's used directly.

mod bootstrap;
mod config;
mod routes;

use std::sync::Arc;

use clap::Parser;
use panel_core::Module;
use tracing::info;

use config::ServerConfig;

/// Admin panel server.
#[derive(Parser, Debug)]
#[command(name = "paneld", about = "UEB FCyT admin panel server")]
struct Cli {
    /// Config name or path to config file.
    #[arg(short = 'c', long = "config", required = true)]
    config: String,

    /// Listen address (overrides the config file).
    #[arg(long = "listen")]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load server configuration.
    let config_path = ServerConfig::resolve_path(&cli.config);
    info!("Loading configuration from {}", config_path.display());
    let server_config = ServerConfig::load(&config_path)?;

    // Verify configuration is valid.
    bootstrap::verify_config(&server_config)?;

    // Initialize storage.
    let data_dir = std::path::PathBuf::from(&server_config.storage.data_dir);
    std::fs::create_dir_all(&data_dir)?;

    let sql: Arc<dyn panel_sql::SQLStore> = Arc::new(
        panel_sql::SqliteStore::open(&data_dir.join("panel.db"))
            .map_err(|e| anyhow::anyhow!("failed to open SQL store: {}", e))?,
    );

    // Initialize modules (each brings up its own schema).
    let auth_config = auth::service::AuthConfig {
        jwt_secret: server_config.jwt.secret.clone(),
        token_ttl: server_config.jwt.expire_secs,
    };
    let auth_module = auth::AuthModule::new(Arc::clone(&sql), auth_config)?;
    info!("Auth module initialized");

    let contenido_module = contenido::ContenidoModule::new(Arc::clone(&sql))?;
    info!("Contenido module initialized");

    // Bootstrap: seed the first administrator on an empty panel.
    if let Some(seed) = &server_config.seed {
        bootstrap::seed_admin(&sql, seed)?;
    }

    let module_routes = vec![
        (auth_module.name(), auth_module.routes()),
        (contenido_module.name(), contenido_module.routes()),
    ];

    // Build router; the session middleware wraps every route.
    let app = routes::build_router(auth_module.service().clone(), module_routes);

    // Start server.
    let listen = cli.listen.unwrap_or_else(|| server_config.listen.clone());
    let listener = tokio::net::TcpListener::bind(&listen).await?;
    info!("Panel server listening on {}", listen);
    axum::serve(listener, app).await?;

    Ok(())
}
