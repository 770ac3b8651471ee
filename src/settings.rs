use std::path::PathBuf;

use config::{Config, ConfigError, File};
use directories::ProjectDirs;
use serde::Deserialize;

const DEFAULT_LISTEN: &str = "127.0.0.1:8080";
const STORAGE_FILE_NAME: &str = "storage.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    File,
    Memory,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
    pub backend: StorageBackend,
    pub path: Option<String>,
}

impl Storage {
    /// Configured path, or `storage.json` in the platform data directory.
    pub fn file_path(&self) -> Option<PathBuf> {
        match &self.path {
            Some(path) => Some(PathBuf::from(path)),
            None => ProjectDirs::from("com", "pocket", "dashboard")
                .map(|dirs| dirs.data_dir().join(STORAGE_FILE_NAME)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Http {
    pub listen: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub storage: Storage,
    pub http: Http,
}

impl Settings {
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("storage.backend", "file")?
            .set_default("http.listen", DEFAULT_LISTEN)?
            .add_source(File::with_name(path))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn defaults_fill_missing_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.toml");
        fs::write(&path, "[storage]\nbackend = \"memory\"\n").unwrap();

        let settings = Settings::new(path.to_str().unwrap()).unwrap();

        assert_eq!(settings.storage.backend, StorageBackend::Memory);
        assert_eq!(settings.storage.path, None);
        assert_eq!(settings.http.listen, DEFAULT_LISTEN);
    }

    #[test]
    fn explicit_storage_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.toml");
        fs::write(
            &path,
            "[storage]\nbackend = \"file\"\npath = \"data/users.json\"\n\n[http]\nlisten = \"0.0.0.0:9000\"\n",
        )
        .unwrap();

        let settings = Settings::new(path.to_str().unwrap()).unwrap();

        assert_eq!(settings.storage.backend, StorageBackend::File);
        assert_eq!(
            settings.storage.file_path(),
            Some(PathBuf::from("data/users.json"))
        );
        assert_eq!(settings.http.listen, "0.0.0.0:9000");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert!(Settings::new(path.to_str().unwrap()).is_err());
    }
}
