//! Páginas Markdown (Jekyll) y manifiesto de navegación.

pub mod navigation;
pub mod page;
pub mod project;

use std::collections::BTreeMap;
use std::path::PathBuf;

use folio_core::aggregate::sort_by_title;
use folio_core::domain::NormalizedRecord;
use folio_core::services::CatalogReport;
use folio_sources::SourcesConfig;

use crate::config::SiteConfig;

pub use navigation::NavigationManifest;
pub use page::ComposerDetails;

/// Archivo generado, con ruta relativa al directorio de salida.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
  pub path: PathBuf,
  pub contents: String,
}

/// Renderiza todo el sitio: una página por compositor, una por colección o
/// proyecto curado y el manifiesto de navegación.
///
/// `details` se indexa por slug del compositor.
pub fn render_site(
  report: &CatalogReport,
  site: &SiteConfig,
  sources: &SourcesConfig,
  details: &BTreeMap<String, ComposerDetails>,
) -> Result<Vec<OutputFile>, serde_yaml::Error> {
  let mut files = Vec::new();

  for entry in report.catalog.entries() {
    let slug = entry.composer.slug();
    files.push(OutputFile {
      path: PathBuf::from("_pages").join("scores").join(format!("{slug}.md")),
      contents: page::render_composer_page(&entry.composer, &entry.works, site.page(&slug), details.get(&slug)),
    });
  }

  for listing in &report.collections {
    let Some(config) = sources.collections.iter().find(|c| c.name == listing.name) else {
      continue;
    };
    files.push(OutputFile {
      path: PathBuf::from("_pages").join("projects").join(format!("{}.md", listing.name)),
      contents: project::render_project_page(config, &listing.works, &site.hosted_base_url),
    });
  }

  for curated in &sources.projects {
    let mut works: Vec<NormalizedRecord> = report
      .catalog
      .entries()
      .iter()
      .flat_map(|entry| entry.works.iter())
      .filter(|work| curated.repos.contains(&work.origin))
      .cloned()
      .collect();
    sort_by_title(&mut works);
    files.push(OutputFile {
      path: PathBuf::from("_pages").join("projects").join(format!("{}.md", curated.name)),
      contents: project::render_curated_page(curated, &works),
    });
  }

  let manifest = NavigationManifest::build(&report.catalog, site);
  files.push(OutputFile { path: PathBuf::from("_data").join("navigation.yml"), contents: manifest.to_yaml()? });

  Ok(files)
}

/// Fila de la tabla resumen.
pub(crate) fn table_row(work: &folio_core::domain::NormalizedRecord) -> String {
  format!("|[{id}](#work-{id_slug})|{title}|{genre}|", id = work.id, id_slug = work.id_slug, title = work.title, genre = work.genre)
}

/// Esqueleto común de página: front matter, intro, tabla y detalles.
pub(crate) fn page_document(front_matter: &str, intro: &str, table_rows: &[String], work_details: &[String]) -> String {
  format!(
    "---\n{front_matter}sidebar:\n  nav: scores\n---\n\n{intro}\n\n## Overview\n\n|ID|Title|Genre|\n|--|-----|-----|\n{rows}\n{{: id=\"toctable\" class=\"overview-table\"}}\n\n\n## Works\n\n{details}\n",
    rows = table_rows.join("\n"),
    details = work_details.join("\n"),
  )
}
