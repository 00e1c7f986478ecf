use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("toml error: {0}")]
  Toml(#[from] toml::de::Error),
  #[error("missing section [{0}]")]
  MissingSection(String),
  #[error("directories error: could not determine home directory")]
  Directories,
  #[error("other: {0}")]
  Other(String),
}

/// Variable de entorno que fuerza un directorio base (modo portable / tests).
pub const BASE_DIR_ENV: &str = "FOLIO_BASE_DIR";

#[derive(Debug, Clone)]
pub struct FolioPaths {
  pub config_file: PathBuf,
}

impl FolioPaths {
  /// `$FOLIO_BASE_DIR/config/folio.toml` o el directorio de configuración
  /// de la plataforma.
  pub fn detect() -> Result<Self, ConfigError> {
    let config_dir = if let Ok(env_base) = std::env::var(BASE_DIR_ENV) {
      PathBuf::from(env_base).join("config")
    } else {
      let proj_dirs = ProjectDirs::from("at", "esser-skala", "folio").ok_or(ConfigError::Directories)?;
      proj_dirs.config_dir().to_path_buf()
    };

    Ok(Self { config_file: config_dir.join("folio.toml") })
  }

  /// Archivo indicado explícitamente (`--config`).
  pub fn from_file(path: impl AsRef<Path>) -> Self {
    Self { config_file: path.as_ref().to_path_buf() }
  }

  pub fn config_file(&self) -> &Path {
    &self.config_file
  }
}
