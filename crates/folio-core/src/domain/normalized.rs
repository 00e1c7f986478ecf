use serde::Serialize;

use crate::domain::{Composer, License};

/// Enlace a un asset con su nombre de parte ya formateado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetLink {
  pub part_name: String,
  /// Enlace Markdown completo, con la clase CSS del asset.
  pub link: String,
}

/// Obra lista para mostrarse.
///
/// Todo el marcado ya está resuelto; las plantillas de página sólo tienen
/// que interpolar estos campos.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
  /// Procedencia del registro (repositorio u obra de colección).
  pub origin: String,
  pub composer: Composer,
  /// ID de la obra, sin modificar respecto a la entrada.
  pub id: String,
  pub id_slug: String,
  pub title: String,
  pub subtitle: String,
  pub scoring: String,
  pub genre: String,
  pub festival: Option<String>,
  pub license: License,
  pub imslp: String,
  /// Release más reciente, ya como enlace.
  pub latest_release: Option<String>,
  /// Releases anteriores separadas por comas, o `(none)`.
  pub old_releases: Option<String>,
  /// Assets en el orden de la fuente (nunca reordenados).
  pub assets: Vec<AssetLink>,
  pub midi_link: Option<String>,
  pub asin: Option<String>,
}

impl NormalizedRecord {
  /// Todos los enlaces de assets separados por espacios.
  pub fn asset_links(&self) -> String {
    self.assets.iter().map(|a| a.link.as_str()).collect::<Vec<_>>().join(" ")
  }

  pub fn license_snippet(&self) -> &'static str {
    self.license.snippet()
  }
}
