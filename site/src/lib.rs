pub mod config;
pub mod infrastructure;
pub mod render;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use folio_config::{FolioPaths, TomlConfigBackend};
use folio_core::FormatContext;
use folio_core::ports::RecordSource;
use folio_core::services::{CatalogReport, CatalogService, ErrorPolicy};
use folio_sources::{CollectionSource, RepoSnapshotSource, SourcesConfig};

use crate::config::SiteConfig;
use crate::infrastructure::reporter::LogReporter;
use crate::render::{ComposerDetails, OutputFile};

/// Qué hacer con el resultado de la compilación.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  /// Escribe páginas y manifiesto.
  Write,
  /// Sólo valida; no toca el disco.
  Check,
}

#[derive(Debug, Clone, Default)]
pub struct Options {
  pub config: Option<PathBuf>,
  pub output: Option<PathBuf>,
  pub strict: bool,
}

pub struct BuildOutcome {
  pub report: CatalogReport,
  pub files: Vec<OutputFile>,
}

pub fn open_backend(config: Option<&Path>) -> Result<TomlConfigBackend> {
  let paths = match config {
    Some(path) => FolioPaths::from_file(path),
    None => FolioPaths::detect().context("Could not locate the configuration directory")?,
  };
  Ok(TomlConfigBackend::new(paths))
}

/// Compila el catálogo y, en modo `Write`, escribe el sitio.
pub fn run(opts: &Options, mode: Mode) -> Result<BuildOutcome> {
  let backend = open_backend(opts.config.as_deref())?;
  info!("Using configuration {}", backend.paths().config_file().display());

  let site = SiteConfig::load_from(&backend).context("Could not load [site] configuration")?;
  let sources = SourcesConfig::load_from(&backend).context("Could not load [sources] configuration")?;

  let policy = if opts.strict || site.strict { ErrorPolicy::Strict } else { ErrorPolicy::BestEffort };
  let service = CatalogService::new(FormatContext::new(&site.org, &site.hosted_base_url), policy, LogReporter);

  let repos = RepoSnapshotSource::from_config(&sources);
  let collections: Vec<CollectionSource> = sources.collections.iter().cloned().map(CollectionSource::new).collect();

  let mut all_sources: Vec<&dyn RecordSource> = vec![&repos];
  all_sources.extend(collections.iter().map(|c| c as &dyn RecordSource));

  let report = service.build(&all_sources, &site.upcoming_composers())?;

  let out_dir = opts.output.clone().unwrap_or_else(|| site.output_dir.clone());
  let details = load_composer_details(&out_dir, &report)?;
  let files = render::render_site(&report, &site, &sources, &details).context("Could not render navigation")?;

  if mode == Mode::Write {
    write_files(&out_dir, &files)?;
    info!("Wrote {} files to {}", files.len(), out_dir.display());
  }

  Ok(BuildOutcome { report, files })
}

/// Lee `_data/composers/<slug>.yml` de cada compositor del catálogo, si existe.
fn load_composer_details(out_dir: &Path, report: &CatalogReport) -> Result<BTreeMap<String, ComposerDetails>> {
  let data_dir = out_dir.join("_data").join("composers");
  let mut details = BTreeMap::new();

  for entry in report.catalog.entries() {
    let slug = entry.composer.slug();
    let path = data_dir.join(format!("{slug}.yml"));
    let mapping: Option<serde_yaml::Mapping> =
      folio_fs::read_optional_yaml(&path).with_context(|| format!("Could not read {}", path.display()))?;
    if let Some(mapping) = mapping {
      debug!("Composer details for {slug} from {}", path.display());
      details.insert(slug, ComposerDetails::from_mapping(&mapping));
    }
  }

  Ok(details)
}

pub fn write_files(out_dir: &Path, files: &[OutputFile]) -> Result<()> {
  for file in files {
    let path = out_dir.join(&file.path);
    folio_fs::atomic_write_str(&path, &file.contents).with_context(|| format!("Failed to write {}", path.display()))?;
  }
  Ok(())
}

/// Escribe `[site]` y `[sources]` por defecto, conservando el resto del
/// archivo y sus comentarios.
pub fn write_default_config(config: Option<&Path>) -> Result<PathBuf> {
  let backend = open_backend(config)?;
  SiteConfig::default().save_to(&backend).context("Could not write [site]")?;
  SourcesConfig::default().save_to(&backend).context("Could not write [sources]")?;
  Ok(backend.paths().config_file().to_path_buf())
}
