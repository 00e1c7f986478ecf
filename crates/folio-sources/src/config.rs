use folio_config::{ConfigBackend, ConfigError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Sección `[sources]` de folio.toml.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SourcesConfig {
  /// Directorio con un snapshot por repositorio de obra.
  pub repos_dir: PathBuf,

  /// Repositorios de la organización que no son obras.
  pub ignored_repos: Vec<String>,

  pub collections: Vec<CollectionConfig>,

  /// Páginas de proyecto armadas con obras ya publicadas en sus repositorios.
  pub projects: Vec<ProjectConfig>,
}

/// Proyecto con varias obras (`works/<obra>/`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CollectionConfig {
  /// Nombre del proyecto; también el segmento de URL de sus PDF.
  pub name: String,
  pub path: PathBuf,
  pub title: String,
  #[serde(default)]
  pub intro: String,
  /// Release publicada del proyecto, si se quiere mostrar.
  #[serde(default)]
  pub release: Option<String>,
  /// Si sus obras también aparecen en las páginas de compositor.
  #[serde(default)]
  pub merge_into_composers: bool,
  #[serde(default = "default_ignored_works")]
  pub ignored_works: Vec<String>,
}

/// Selección de repositorios de obra presentada como un proyecto propio.
///
/// No lee nada nuevo: filtra las obras ya agregadas por su repositorio.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProjectConfig {
  pub name: String,
  pub title: String,
  #[serde(default)]
  pub intro: String,
  pub repos: Vec<String>,
}

fn default_ignored_works() -> Vec<String> {
  vec!["template".into()]
}

fn default_ignored_repos() -> Vec<String> {
  [
    "ees-template",
    "ees-tools",
    "eybler-sacred-music",
    "haydn-m-proprium-missae",
    "imslp-lists",
    "misc-analyses",
    "sacral-lyrics",
    "tuma-catalogue-of-works",
    "tuma-collected-works",
    "webpage",
    "werner-catalogue-of-works",
    "werner-collected-works",
  ]
  .into_iter()
  .map(String::from)
  .collect()
}

impl Default for SourcesConfig {
  fn default() -> Self {
    SourcesConfig {
      repos_dir: PathBuf::from("repos"),
      ignored_repos: default_ignored_repos(),
      collections: Vec::new(),
      projects: Vec::new(),
    }
  }
}

impl SourcesConfig {
  pub fn load_from<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    backend.load_section_or_default("sources")
  }

  pub fn save_to<B: ConfigBackend>(&self, backend: &B) -> Result<(), ConfigError> {
    backend.save_section("sources", self)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use folio_config::{FolioPaths, TomlConfigBackend};
  use tempfile::tempdir;

  #[test]
  fn test_partial_section_uses_defaults() {
    let tmp = tempdir().unwrap();
    let file = tmp.path().join("folio.toml");
    std::fs::write(
      &file,
      "[sources]\nrepos_dir = \"/data/repos\"\n\n[[sources.collections]]\nname = \"haydn-m-proprium-missae\"\npath = \"/data/proprium\"\ntitle = \"Proprium Missae\"\n",
    )
    .unwrap();

    let backend = TomlConfigBackend::new(FolioPaths::from_file(&file));
    let cfg = SourcesConfig::load_from(&backend).unwrap();

    assert_eq!(cfg.repos_dir, PathBuf::from("/data/repos"));
    assert!(cfg.ignored_repos.contains(&"ees-tools".to_string()));
    assert_eq!(cfg.collections.len(), 1);
    assert_eq!(cfg.collections[0].ignored_works, ["template"]);
    assert!(!cfg.collections[0].merge_into_composers);
    assert_eq!(cfg.collections[0].release, None);
    assert!(cfg.projects.is_empty());
  }

  #[test]
  fn test_curated_projects() {
    let tmp = tempdir().unwrap();
    let file = tmp.path().join("folio.toml");
    std::fs::write(
      &file,
      "[[sources.projects]]\nname = \"caldara-at-dresden\"\ntitle = \"Caldara@Dresden\"\nrepos = [\"caldara-missa-providentiae\", \"caldara-missa-reformata\"]\n",
    )
    .unwrap();

    let cfg = SourcesConfig::load_from(&TomlConfigBackend::new(FolioPaths::from_file(&file))).unwrap();
    assert_eq!(cfg.projects.len(), 1);
    assert_eq!(cfg.projects[0].name, "caldara-at-dresden");
    assert_eq!(cfg.projects[0].repos, ["caldara-missa-providentiae", "caldara-missa-reformata"]);
    assert_eq!(cfg.projects[0].intro, "");
    assert_eq!(cfg.repos_dir, PathBuf::from("repos"));
  }

  #[test]
  fn test_save_and_reload() {
    let tmp = tempdir().unwrap();
    let backend = TomlConfigBackend::new(FolioPaths::from_file(tmp.path().join("folio.toml")));

    let mut cfg = SourcesConfig::default();
    cfg.collections.push(CollectionConfig {
      name: "tuma-collected-works".into(),
      path: PathBuf::from("tuma"),
      title: "Tůma: Collected Works".into(),
      intro: String::new(),
      release: Some("v1.0.0".into()),
      merge_into_composers: true,
      ignored_works: default_ignored_works(),
    });
    cfg.save_to(&backend).unwrap();

    assert_eq!(SourcesConfig::load_from(&backend).unwrap(), cfg);
  }
}
