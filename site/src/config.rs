use std::collections::BTreeMap;
use std::path::PathBuf;

use folio_config::{ConfigBackend, ConfigError};
use folio_core::domain::Composer;
use serde::{Deserialize, Serialize};

/// Sección `[site]` de folio.toml.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
  /// Organización de GitHub que aloja los repositorios de obras.
  pub org: String,
  /// Base de las URL de partituras publicadas por el sitio.
  pub hosted_base_url: String,
  pub output_dir: PathBuf,
  pub strict: bool,
  /// Compositores con página aunque todavía no tengan obras.
  pub upcoming: Vec<ComposerDto>,
  pub main_menu: Vec<MenuLink>,
  /// Menús fijos adicionales del manifiesto (p. ej. `about`), por nombre.
  pub nav_sections: BTreeMap<String, Vec<NavGroup>>,
  /// Grupos agregados al final del menú `scores`.
  pub scores_extra: Vec<NavGroup>,
  /// Ajustes por página, indexados por slug del compositor.
  pub pages: BTreeMap<String, PageSettings>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ComposerDto {
  pub first: String,
  pub last: String,
  #[serde(default)]
  pub suffix: String,
}

impl From<ComposerDto> for Composer {
  fn from(dto: ComposerDto) -> Self {
    Composer::new(dto.first, dto.last, dto.suffix)
  }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MenuLink {
  pub title: String,
  pub url: String,
}

impl MenuLink {
  pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
    Self { title: title.into(), url: url.into() }
  }
}

/// Grupo de un menú lateral.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct NavGroup {
  pub title: String,
  pub children: Vec<MenuLink>,
}

impl NavGroup {
  pub fn new(title: impl Into<String>, children: Vec<MenuLink>) -> Self {
    Self { title: title.into(), children }
  }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PageSettings {
  /// Imagen bajo `/assets/images/`.
  pub header_image: Option<String>,
  pub page_intro: Option<String>,
}

impl Default for SiteConfig {
  fn default() -> Self {
    SiteConfig {
      org: "edition-esser-skala".into(),
      hosted_base_url: "https://edition.esser-skala.at/assets/pdf".into(),
      output_dir: PathBuf::from("."),
      strict: false,
      upcoming: vec![
        ComposerDto { first: "Gregor Joseph".into(), last: "Werner".into(), suffix: String::new() },
        ComposerDto { first: "František Ignác Antonín".into(), last: "Tůma".into(), suffix: String::new() },
      ],
      main_menu: vec![
        MenuLink::new("Welcome", "/"),
        MenuLink::new("About", "/about"),
        MenuLink::new("News", "/news"),
        MenuLink::new("Scores", "/scores"),
        MenuLink::new("Contact", "/contact"),
      ],
      nav_sections: BTreeMap::from([(
        "about".to_string(),
        vec![NavGroup::new(
          "About",
          vec![
            MenuLink::new("Overview", "/about"),
            MenuLink::new("Sources for digital versions", "/about/sources-for-digital-versions"),
            MenuLink::new("Editorial guidelines", "/about/editorial-guidelines"),
            MenuLink::new("Technical documentation", "/about/technical-documentation"),
          ],
        )],
      )]),
      scores_extra: vec![NavGroup::new(
        "❦ Bonus",
        vec![MenuLink::new("Cantorey Performance Materials", "/scores/cantorey-performance-materials")],
      )],
      pages: BTreeMap::new(),
    }
  }
}

impl SiteConfig {
  pub fn load_from<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    backend.load_section_or_default("site")
  }

  pub fn save_to<B: ConfigBackend>(&self, backend: &B) -> Result<(), ConfigError> {
    backend.save_section("site", self)
  }

  pub fn upcoming_composers(&self) -> Vec<Composer> {
    self.upcoming.iter().cloned().map(Composer::from).collect()
  }

  pub fn page(&self, slug: &str) -> Option<&PageSettings> {
    self.pages.get(slug)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use folio_config::{FolioPaths, TomlConfigBackend};
  use tempfile::tempdir;

  #[test]
  fn test_defaults_and_page_settings() {
    let tmp = tempdir().unwrap();
    let file = tmp.path().join("folio.toml");
    std::fs::write(
      &file,
      "[site]\nstrict = true\n\n[site.pages.michael-haydn]\nheader_image = \"haydn.jpg\"\n",
    )
    .unwrap();

    let cfg = SiteConfig::load_from(&TomlConfigBackend::new(FolioPaths::from_file(&file))).unwrap();
    assert!(cfg.strict);
    assert_eq!(cfg.org, "edition-esser-skala");
    assert_eq!(cfg.main_menu.len(), 5);
    assert_eq!(cfg.page("michael-haydn").unwrap().header_image.as_deref(), Some("haydn.jpg"));
    assert_eq!(cfg.page("michael-haydn").unwrap().page_intro, None);

    let upcoming = cfg.upcoming_composers();
    assert_eq!(upcoming[0].slug(), "gregor-joseph-werner");
  }

  #[test]
  fn test_nav_sections_replace_defaults() {
    let tmp = tempdir().unwrap();
    let file = tmp.path().join("folio.toml");
    std::fs::write(
      &file,
      "[site]\nscores_extra = []\n\n[[site.nav_sections.projects]]\ntitle = \"Projects\"\n\n\
       [[site.nav_sections.projects.children]]\ntitle = \"Caldara@Dresden\"\nurl = \"/projects/caldara-at-dresden/\"\n",
    )
    .unwrap();

    let cfg = SiteConfig::load_from(&TomlConfigBackend::new(FolioPaths::from_file(&file))).unwrap();
    assert!(cfg.scores_extra.is_empty());
    assert!(!cfg.nav_sections.contains_key("about"));
    assert_eq!(
      cfg.nav_sections["projects"],
      [NavGroup::new("Projects", vec![MenuLink::new("Caldara@Dresden", "/projects/caldara-at-dresden/")])]
    );

    let defaults = SiteConfig::default();
    assert_eq!(defaults.nav_sections["about"][0].children.len(), 4);
    assert_eq!(defaults.scores_extra[0].title, "❦ Bonus");
  }
}
