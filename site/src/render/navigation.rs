use std::collections::BTreeMap;

use folio_core::Catalog;
use serde::Serialize;

use crate::config::{MenuLink, NavGroup, SiteConfig};

/// Menús generados aparte; no se aceptan como secciones fijas.
const GENERATED_SECTIONS: [&str; 2] = ["main", "scores"];

/// Contenido de `_data/navigation.yml`. Se reescribe entero en cada ejecución.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationManifest {
  pub main: Vec<MenuLink>,
  #[serde(flatten)]
  pub sections: BTreeMap<String, Vec<NavGroup>>,
  pub scores: Vec<NavGroup>,
}

impl NavigationManifest {
  pub fn build(catalog: &Catalog, site: &SiteConfig) -> Self {
    let mut scores: Vec<NavGroup> = catalog
      .index()
      .into_iter()
      .map(|group| NavGroup {
        title: group.initial,
        children: group.entries.into_iter().map(|e| MenuLink::new(e.title, format!("/scores/{}/", e.slug))).collect(),
      })
      .collect();
    scores.extend(site.scores_extra.iter().cloned());

    let sections = site
      .nav_sections
      .iter()
      .filter(|(name, _)| !GENERATED_SECTIONS.contains(&name.as_str()))
      .map(|(name, groups)| (name.clone(), groups.clone()))
      .collect();

    Self { main: site.main_menu.clone(), sections, scores }
  }

  pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(self)
  }
}
