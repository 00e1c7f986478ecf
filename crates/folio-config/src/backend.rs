use std::fs;
use std::io::ErrorKind;

use serde::Serialize;
use serde::de::DeserializeOwned;
use toml_edit::{DocumentMut, Item};

use crate::paths::{ConfigError, FolioPaths};

/// Acceso por secciones a la configuración. Cada crate lee sólo la suya.
pub trait ConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError>;
  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError>;

  /// Archivo o sección ausentes dan `T::default()`.
  fn load_section_or_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default,
  {
    match self.load_section(section) {
      Err(ConfigError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(T::default()),
      Err(ConfigError::MissingSection(_)) => Ok(T::default()),
      other => other,
    }
  }
}

pub struct TomlConfigBackend {
  paths: FolioPaths,
}

impl TomlConfigBackend {
  pub fn new(paths: FolioPaths) -> Self {
    Self { paths }
  }

  pub fn paths(&self) -> &FolioPaths {
    &self.paths
  }
}

impl ConfigBackend for TomlConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError> {
    let path = self.paths.config_file();
    let content = fs::read_to_string(path)?;
    let toml_val: toml::Value = toml::from_str(&content)?;

    let table = toml_val.get(section).ok_or_else(|| ConfigError::MissingSection(section.to_string()))?;

    let t: T = table
      .clone()
      .try_into()
      .map_err(|e| ConfigError::Other(format!("decode section [{section}]: {e}")))?;

    Ok(t)
  }

  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError> {
    let path = self.paths.config_file();

    // Documento actual (con sus comentarios) o uno vacío.
    let mut doc: DocumentMut = match fs::read_to_string(path) {
      Ok(content) => {
        content.parse::<DocumentMut>().map_err(|e| ConfigError::Other(format!("parse {}: {e}", path.display())))?
      }
      Err(e) if e.kind() == ErrorKind::NotFound => DocumentMut::new(),
      Err(e) => return Err(e.into()),
    };

    let section_str =
      toml::to_string(value).map_err(|e| ConfigError::Other(format!("encode section [{section}]: {e}")))?;

    let section_item: Item = section_str
      .parse::<DocumentMut>()
      .map_err(|e| ConfigError::Other(format!("parse section [{section}]: {e}")))?
      .into_item();

    doc[section] = section_item;

    folio_fs::atomic_write_str(path, &doc.to_string())?;

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde::Deserialize;
  use tempfile::tempdir;

  #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
  struct Sample {
    #[serde(default)]
    org: String,
    #[serde(default)]
    strict: bool,
  }

  fn backend_in(dir: &std::path::Path) -> TomlConfigBackend {
    TomlConfigBackend::new(FolioPaths::from_file(dir.join("config").join("folio.toml")))
  }

  #[test]
  fn test_missing_file_or_section_gives_default() {
    let tmp = tempdir().unwrap();
    let backend = backend_in(tmp.path());

    assert_eq!(backend.load_section_or_default::<Sample>("site").unwrap(), Sample::default());
    assert!(matches!(backend.load_section::<Sample>("site"), Err(ConfigError::Io(_))));

    fs::create_dir_all(tmp.path().join("config")).unwrap();
    fs::write(backend.paths().config_file(), "[other]\nx = 1\n").unwrap();
    assert_eq!(backend.load_section_or_default::<Sample>("site").unwrap(), Sample::default());
  }

  #[test]
  fn test_save_section_keeps_comments() {
    let tmp = tempdir().unwrap();
    let backend = backend_in(tmp.path());

    fs::create_dir_all(tmp.path().join("config")).unwrap();
    fs::write(backend.paths().config_file(), "# managed by hand\n[sources]\nrepos_dir = \"repos\"\n").unwrap();

    let value = Sample { org: "edition-esser-skala".into(), strict: true };
    backend.save_section("site", &value).unwrap();

    let written = fs::read_to_string(backend.paths().config_file()).unwrap();
    assert!(written.starts_with("# managed by hand\n"));
    assert!(written.contains("repos_dir = \"repos\""));
    assert_eq!(backend.load_section::<Sample>("site").unwrap(), value);
  }

  #[test]
  fn test_invalid_section_is_an_error() {
    let tmp = tempdir().unwrap();
    let backend = backend_in(tmp.path());

    fs::create_dir_all(tmp.path().join("config")).unwrap();
    fs::write(backend.paths().config_file(), "[site]\nstrict = \"yes\"\n").unwrap();

    assert!(matches!(backend.load_section_or_default::<Sample>("site"), Err(ConfigError::Other(_))));
  }
}
