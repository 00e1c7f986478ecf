use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("yaml error in {path}: {source}")]
  Yaml {
    path: PathBuf,
    #[source]
    source: serde_yaml::Error,
  },
}

fn tmp_path_for(path: &Path) -> PathBuf {
  let mut name = path.file_name().map(OsString::from).unwrap_or_default();
  name.push(".tmp");
  path.with_file_name(name)
}

/// Escribe `contents` en `path` sin dejar nunca un archivo a medias:
/// escribe en un temporal hermano y luego renombra.
///
/// Crea los directorios padre que falten.
pub fn atomic_write_str(path: &Path, contents: &str) -> io::Result<()> {
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent)?;
  }

  let tmp_path = tmp_path_for(path);

  {
    let mut tmp_file = fs::File::create(&tmp_path)?;
    tmp_file.write_all(contents.as_bytes())?;
    tmp_file.sync_all()?;
  }

  fs::rename(&tmp_path, path)?;
  Ok(())
}

/// Lee y deserializa un documento YAML.
pub fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, FsError> {
  let content = fs::read_to_string(path)?;
  serde_yaml::from_str(&content).map_err(|source| FsError::Yaml { path: path.to_path_buf(), source })
}

/// Como [`read_yaml`], pero un archivo inexistente da `Ok(None)`.
pub fn read_optional_yaml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, FsError> {
  match fs::read_to_string(path) {
    Ok(content) => serde_yaml::from_str(&content)
      .map(Some)
      .map_err(|source| FsError::Yaml { path: path.to_path_buf(), source }),
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
    Err(e) => Err(e.into()),
  }
}
