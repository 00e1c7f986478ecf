use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use folio_core::domain::{AssetLayout, RawRecord, Release, SourcedRecord};
use folio_core::errors::{FormatError, RecordError};
use folio_core::ports::{RecordSource, SourceError, SourceItem, SourceKind};
use folio_fs::{FsError, read_optional_yaml, read_yaml};

use crate::config::SourcesConfig;

const METADATA_FILE: &str = "metadata.yaml";
const RELEASES_FILE: &str = "releases.yaml";
const PRINTER_FILE: &str = "print/printer.yaml";

/// `releases.yaml`: releases de la obra (la primera es la última) y los
/// archivos adjuntos a la última.
#[derive(Debug, Default, Deserialize)]
struct ReleaseSnapshot {
  #[serde(default)]
  releases: Vec<Release>,
  #[serde(default)]
  assets: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PrinterInfo {
  asin: String,
}

/// Fuente de obras publicadas: un directorio por repositorio.
pub struct RepoSnapshotSource {
  root: PathBuf,
  ignored: Vec<String>,
}

impl RepoSnapshotSource {
  pub fn new(root: impl Into<PathBuf>, ignored: Vec<String>) -> Self {
    Self { root: root.into(), ignored }
  }

  pub fn from_config(cfg: &SourcesConfig) -> Self {
    Self::new(cfg.repos_dir.clone(), cfg.ignored_repos.clone())
  }

  fn read_repo(&self, repo: &str, dir: &Path, snapshot: ReleaseSnapshot) -> Result<RawRecord, FsError> {
    let mut record: RawRecord = read_yaml(&dir.join(METADATA_FILE))?;

    record.repo = Some(repo.to_string());
    record.releases = Some(snapshot.releases);
    record.assets = Some(snapshot.assets);

    if let Some(printer) = read_optional_yaml::<PrinterInfo>(&dir.join(PRINTER_FILE))? {
      record.asin = Some(printer.asin);
    }

    Ok(record)
  }
}

fn malformed(origin: &str, err: FsError) -> RecordError {
  RecordError::new(origin, FormatError::MalformedRecord(err.to_string()))
}

impl RecordSource for RepoSnapshotSource {
  fn name(&self) -> &str {
    "repositories"
  }

  fn kind(&self) -> SourceKind {
    SourceKind::Repository
  }

  fn records(&self) -> Result<Vec<SourceItem>, SourceError> {
    let dirs = folio_fs::list_dirs(&self.root)
      .map_err(|e| SourceError::Io(format!("{}: {e}", self.root.display())))?;

    let total = dirs.len();
    let mut items = Vec::new();

    for (counter, dir) in dirs.iter().enumerate() {
      let counter_str = format!("({}/{total})", counter + 1);
      let repo = dir.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();

      if self.ignored.contains(&repo) {
        info!("{counter_str} Ignoring {repo} (blacklisted)");
        continue;
      }

      if !dir.join(METADATA_FILE).is_file() {
        info!("{counter_str} Ignoring {repo} (no metadata)");
        continue;
      }

      let snapshot = match read_optional_yaml::<ReleaseSnapshot>(&dir.join(RELEASES_FILE)) {
        Ok(Some(snapshot)) if !snapshot.releases.is_empty() => snapshot,
        Ok(_) => {
          info!("{counter_str} Ignoring {repo} (no releases)");
          continue;
        }
        Err(e) => {
          items.push(Err(malformed(&repo, e)));
          continue;
        }
      };

      info!("{counter_str} Analyzing {repo}");
      let item = self
        .read_repo(&repo, dir, snapshot)
        .map(|record| SourcedRecord::new(repo.as_str(), record, AssetLayout::Release))
        .map_err(|e| malformed(&repo, e));
      items.push(item);
    }

    debug!("Repository snapshot at {} yielded {} records", self.root.display(), items.len());
    Ok(items)
  }
}
