//! Marketplace listing server entry point.
//!
//! # Responsibility
//! - Read settings from flags or environment variables.
//! - Initialize logging, then hand a validated config to the HTTP server.

use clap::{Parser, ValueEnum};
use log::{error, info};
use marketplace_core::{default_log_level, init_logging, logging_status, StorageBackend};
use marketplace_http::{serve, ServerConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StorageMode {
    Json,
    Sqlite,
}

#[derive(Debug, Parser)]
#[command(name = "marketplace", version, about = "Marketplace listing API server")]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 9000)]
    port: u16,

    /// Listen address.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Directory holding uploaded images and `default.jpg`.
    #[arg(long, env = "IMAGE_DIR", default_value = "images")]
    image_dir: PathBuf,

    #[arg(long, env = "STORAGE_MODE", value_enum, default_value_t = StorageMode::Json)]
    storage: StorageMode,

    /// Item document used by the json store.
    #[arg(long, env = "ITEMS_FILE", default_value = "items.json")]
    items_file: PathBuf,

    /// Database file used by the sqlite store.
    #[arg(long, env = "DB_PATH", default_value = "db/mercari.sqlite3")]
    db_path: PathBuf,

    /// Categories created at startup (sqlite store only).
    #[arg(long = "category", env = "SEED_CATEGORIES", value_delimiter = ',')]
    categories: Vec<String>,

    /// Frontend origin allowed by CORS.
    #[arg(long, env = "FRONT_URL", default_value = "http://localhost:3000")]
    front_url: String,

    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,

    /// Write rotated log files here instead of stderr.
    #[arg(long, env = "LOG_DIR")]
    log_dir: Option<PathBuf>,
}

impl Args {
    fn storage_backend(&self) -> StorageBackend {
        match self.storage {
            StorageMode::Json => StorageBackend::JsonFile {
                path: self.items_file.clone(),
            },
            StorageMode::Sqlite => StorageBackend::Sqlite {
                path: self.db_path.clone(),
                categories: self
                    .categories
                    .iter()
                    .map(|name| name.trim())
                    .filter(|name| !name.is_empty())
                    .map(str::to_owned)
                    .collect(),
            },
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let level = args.log_level.as_deref().unwrap_or(default_log_level());
    if let Err(err) = init_logging(level, args.log_dir.as_deref()) {
        eprintln!("marketplace: failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }
    if let Some((active_level, active_dir)) = logging_status() {
        info!(
            "event=logging_ready module=cli status=ok level={} dest={}",
            active_level,
            active_dir.map_or_else(|| "stderr".to_string(), |dir| dir.display().to_string())
        );
    }

    let config = match ServerConfig::new(
        &args.host,
        args.port,
        args.image_dir.clone(),
        &args.front_url,
        args.storage_backend(),
    ) {
        Ok(config) => config,
        Err(err) => {
            error!("event=startup module=cli status=error error={err}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        "event=startup module=cli status=ok version={} backend={}",
        marketplace_core::core_version(),
        config.storage.label()
    );

    match serve(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_exit module=cli status=error error={err}");
            ExitCode::FAILURE
        }
    }
}
