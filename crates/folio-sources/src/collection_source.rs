use std::path::{Path, PathBuf};

use tracing::info;

use folio_core::domain::{AssetLayout, RawRecord, SourcedRecord};
use folio_core::errors::{FormatError, RecordError};
use folio_core::ports::{RecordSource, SourceError, SourceItem, SourceKind};
use folio_fs::{list_dirs, list_files_with_ext, read_yaml};

use crate::config::CollectionConfig;

const WORKS_DIR: &str = "works";
const SCORES_DIR: &str = "scores";
const SCORE_EXT: &str = "ly";

/// Proyecto con varias obras bajo `works/`, cuyas partituras publica el
/// propio sitio.
pub struct CollectionSource {
  config: CollectionConfig,
}

impl CollectionSource {
  pub fn new(config: CollectionConfig) -> Self {
    Self { config }
  }

  fn read_work(&self, dir: &Path) -> Result<RawRecord, RecordError> {
    let origin = self.origin_of(dir);
    let malformed = |e: folio_fs::FsError| RecordError::new(origin.clone(), FormatError::MalformedRecord(e.to_string()));

    let mut record: RawRecord = read_yaml(&dir.join("metadata.yaml")).map_err(malformed)?;

    let scores = list_files_with_ext(&dir.join(SCORES_DIR), SCORE_EXT).map_err(malformed)?;
    record.assets = Some(scores.iter().filter_map(|p| p.file_name()).map(|n| n.to_string_lossy().into_owned()).collect());

    Ok(record)
  }

  fn origin_of(&self, dir: &Path) -> String {
    format!("{}/{}", self.config.name, work_name(dir))
  }
}

fn work_name(dir: &Path) -> String {
  dir.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
}

impl RecordSource for CollectionSource {
  fn name(&self) -> &str {
    &self.config.name
  }

  fn kind(&self) -> SourceKind {
    SourceKind::Collection { merge_into_composers: self.config.merge_into_composers }
  }

  fn records(&self) -> Result<Vec<SourceItem>, SourceError> {
    let works_dir: PathBuf = self.config.path.join(WORKS_DIR);
    let dirs = list_dirs(&works_dir).map_err(|e| SourceError::Io(format!("{}: {e}", works_dir.display())))?;

    let dirs: Vec<_> = dirs.into_iter().filter(|d| !self.config.ignored_works.contains(&work_name(d))).collect();
    let total = dirs.len();

    info!("Preparing project '{}'", self.config.title);

    Ok(
      dirs
        .iter()
        .enumerate()
        .map(|(counter, dir)| {
          let work = work_name(dir);
          info!("({}/{total}) Analyzing {work}", counter + 1);

          let layout = AssetLayout::Hosted { collection: self.config.name.clone(), work };
          self.read_work(dir).map(|record| SourcedRecord::new(self.origin_of(dir), record, layout))
        })
        .collect(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::tempdir;

  const METADATA: &str = "composer: {first: Michael, last: Haydn}\ntitle: Graduale\nscoring: S, A, T, B, org\nlicense: cc-by-sa-4.0\nid: MH 100\nfestival: Dominica I. Adventus\n";

  fn config(root: &Path) -> CollectionConfig {
    CollectionConfig {
      name: "haydn-m-proprium-missae".into(),
      path: root.to_path_buf(),
      title: "Proprium Missae".into(),
      intro: String::new(),
      release: None,
      merge_into_composers: false,
      ignored_works: vec!["template".into()],
    }
  }

  fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
  }

  #[test]
  fn test_works_with_sorted_scores() {
    let tmp = tempdir().unwrap();
    write(tmp.path(), "works/mh-100/metadata.yaml", METADATA);
    for score in ["vl2.ly", "full_score.ly", "vl1.ly", "notes.txt"] {
      write(tmp.path(), &format!("works/mh-100/scores/{score}"), "");
    }
    write(tmp.path(), "works/template/metadata.yaml", "title: TEMPLATE\n");

    let source = CollectionSource::new(config(tmp.path()));
    assert_eq!(source.kind(), SourceKind::Collection { merge_into_composers: false });

    let items = source.records().unwrap();
    assert_eq!(items.len(), 1);

    let sourced = items[0].as_ref().unwrap();
    assert_eq!(sourced.origin, "haydn-m-proprium-missae/mh-100");
    assert_eq!(
      sourced.layout,
      AssetLayout::Hosted { collection: "haydn-m-proprium-missae".into(), work: "mh-100".into() }
    );
    assert_eq!(sourced.record.assets.as_deref().unwrap(), ["full_score.ly", "vl1.ly", "vl2.ly"]);
    assert_eq!(sourced.record.festival.as_deref(), Some("Dominica I. Adventus"));
  }

  #[test]
  fn test_work_without_metadata_fails_alone() {
    let tmp = tempdir().unwrap();
    write(tmp.path(), "works/a-good/metadata.yaml", METADATA);
    fs::create_dir_all(tmp.path().join("works/b-empty/scores")).unwrap();

    let items = CollectionSource::new(config(tmp.path())).records().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items[0].is_ok());
    assert_eq!(items[1].as_ref().unwrap_err().origin, "haydn-m-proprium-missae/b-empty");
  }

  #[test]
  fn test_missing_works_dir_is_a_source_error() {
    let tmp = tempdir().unwrap();
    assert!(matches!(CollectionSource::new(config(tmp.path())).records(), Err(SourceError::Io(_))));
  }
}
