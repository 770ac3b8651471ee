use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Parser;

use pocket_dashboard::{
    clock::SystemClock,
    services,
    settings::{Settings, StorageBackend},
    storage::{FileStore, KeyValueStore, MemoryStore},
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "dashboard.toml")]
    config: String,
    #[arg(long, default_value = "log4rs.yaml")]
    log4rs: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = Settings::new(&args.config)?;

    init_logging(&args.log4rs)?;
    log::info!("Starting dashboard.");

    let store = open_store(&settings)?;
    services::start_services(store, Arc::new(SystemClock), settings).await
}

fn open_store(settings: &Settings) -> Result<Arc<dyn KeyValueStore>> {
    match settings.storage.backend {
        StorageBackend::Memory => {
            log::warn!("Using in-memory storage, nothing will be kept after exit.");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::File => {
            let path = settings
                .storage
                .file_path()
                .ok_or_else(|| anyhow!("Could not determine a storage path."))?;
            let store = FileStore::new(path);
            log::info!("Using storage file {}", store.path().display());
            Ok(Arc::new(store))
        }
    }
}

fn init_logging(path: &str) -> Result<(), anyhow::Error> {
    if !Path::new("logs").exists() {
        fs::create_dir("logs")?;
    }

    match log4rs::init_file(path, Default::default()) {
        Ok(_) => {
            println!("[*] Logging initialized successfully.");
            Ok(())
        }
        Err(e) => {
            println!("[ERROR] Failed to initialize logging: {}", e);
            Err(anyhow!("Could not initialize logging: {}", e))
        }
    }
}
