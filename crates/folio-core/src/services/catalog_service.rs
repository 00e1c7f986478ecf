use tracing::{debug, info, warn};

use crate::aggregate::{Aggregator, Catalog, sort_by_title};
use crate::domain::{Composer, NormalizedRecord};
use crate::errors::{CoreError, RecordError};
use crate::formatter::{FormatContext, format_record};
use crate::ports::{ProgressReporter, RecordSource, SourceKind};

/// Qué hacer cuando un registro no se puede normalizar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
  /// Se registra el fallo y se sigue con el resto.
  #[default]
  BestEffort,
  /// El primer fallo aborta la compilación.
  Strict,
}

/// Obras de una colección, ordenadas por título.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionListing {
  pub name: String,
  pub works: Vec<NormalizedRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct CatalogReport {
  pub catalog: Catalog,
  pub collections: Vec<CollectionListing>,
  pub failures: Vec<RecordError>,
}

impl CatalogReport {
  pub fn is_clean(&self) -> bool {
    self.failures.is_empty()
  }
}

pub struct CatalogService<R>
where
  R: ProgressReporter,
{
  context: FormatContext,
  policy: ErrorPolicy,
  reporter: R,
}

impl<R> CatalogService<R>
where
  R: ProgressReporter,
{
  pub fn new(context: FormatContext, policy: ErrorPolicy, reporter: R) -> Self {
    Self { context, policy, reporter }
  }

  /// Compila el catálogo completo:
  /// - lee todas las fuentes (un fallo de fuente aborta)
  /// - normaliza cada registro
  /// - agrupa por compositor y arma los listados de colecciones
  pub fn build(&self, sources: &[&dyn RecordSource], upcoming: &[Composer]) -> Result<CatalogReport, CoreError> {
    let mut batches = Vec::with_capacity(sources.len());
    for source in sources {
      let items = source.records().map_err(|e| CoreError::Source(format!("{}: {e}", source.name())))?;
      debug!("Source {} yielded {} records", source.name(), items.len());
      batches.push((source.name().to_string(), source.kind(), items));
    }

    let total = batches.iter().map(|(_, _, items)| items.len()).sum();
    self.reporter.start(total);

    let mut aggregator = Aggregator::new();
    for composer in upcoming {
      aggregator.register_composer(composer.clone());
    }

    let mut collections = Vec::new();
    let mut failures = Vec::new();

    for (name, kind, items) in batches {
      let mut listing = Vec::new();

      for item in items {
        let formatted = item.and_then(|sourced| {
          format_record(&sourced, &self.context).map_err(|kind| RecordError::new(sourced.origin.clone(), kind))
        });

        let record = match formatted {
          Ok(record) => record,
          Err(err) => {
            self.reporter.on_error(&err.origin, &err.kind.to_string());
            if self.policy == ErrorPolicy::Strict {
              return Err(CoreError::Record(err));
            }
            warn!("Skipping record {err}");
            failures.push(err);
            continue;
          }
        };

        self.reporter.on_success(&record.origin);

        match kind {
          SourceKind::Repository => aggregator.push(record),
          SourceKind::Collection { merge_into_composers } => {
            if merge_into_composers {
              aggregator.push(record.clone());
            }
            listing.push(record);
          }
        }
      }

      if let SourceKind::Collection { .. } = kind {
        sort_by_title(&mut listing);
        collections.push(CollectionListing { name, works: listing });
      }
    }

    let accepted = aggregator.work_count();
    self.reporter.finish(accepted, failures.len());

    let catalog = aggregator.finish();
    info!(
      "Catalog ready: {} composers, {} works, {} rejected records",
      catalog.composer_count(),
      catalog.work_count(),
      failures.len()
    );

    Ok(CatalogReport { catalog, collections, failures })
  }
}

#[cfg(test)]
mod tests {
  use std::cell::RefCell;

  use super::*;
  use crate::domain::{AssetLayout, RawRecord, SourcedRecord};
  use crate::errors::FormatError;
  use crate::ports::{SourceError, SourceItem};

  #[derive(Default)]
  struct Recorder {
    events: RefCell<Vec<String>>,
  }

  impl ProgressReporter for &Recorder {
    fn start(&self, total_records: usize) {
      self.events.borrow_mut().push(format!("start {total_records}"));
    }

    fn on_success(&self, origin: &str) {
      self.events.borrow_mut().push(format!("ok {origin}"));
    }

    fn on_error(&self, origin: &str, error: &str) {
      self.events.borrow_mut().push(format!("err {origin}: {error}"));
    }

    fn finish(&self, accepted: usize, rejected: usize) {
      self.events.borrow_mut().push(format!("finish {accepted}/{rejected}"));
    }
  }

  struct MockSource {
    name: &'static str,
    kind: SourceKind,
    docs: Vec<(&'static str, &'static str)>,
    fail: bool,
  }

  impl MockSource {
    fn repos(docs: Vec<(&'static str, &'static str)>) -> Self {
      Self { name: "repos", kind: SourceKind::Repository, docs, fail: false }
    }
  }

  impl RecordSource for MockSource {
    fn name(&self) -> &str {
      self.name
    }

    fn kind(&self) -> SourceKind {
      self.kind
    }

    fn records(&self) -> Result<Vec<SourceItem>, SourceError> {
      if self.fail {
        return Err(SourceError::Io("permission denied".into()));
      }
      Ok(
        self
          .docs
          .iter()
          .map(|(origin, yaml)| {
            serde_yaml::from_str::<RawRecord>(yaml)
              .map(|raw| SourcedRecord::new(*origin, raw, AssetLayout::Release))
              .map_err(|e| RecordError::new(*origin, FormatError::MalformedRecord(e.to_string())))
          })
          .collect(),
      )
    }
  }

  const MISSA: &str = "composer: {first: Michael, last: Haydn}\ntitle: Missa B\nscoring: S, A, T, B\nlicense: cc-by-sa-4.0\nid: MH 1\n";
  const MISSA_A: &str = "composer: {first: Michael, last: Haydn}\ntitle: Missa A\nscoring: S, A, T, B\nlicense: cc-by-sa-4.0\nid: MH 2\n";
  const TE_DEUM: &str = "composer: {first: Antonio, last: Caldara}\ntitle: Te Deum\nscoring: S, A, T, B\nlicense: cc-by-sa-4.0\nid: C 1\n";
  const BAD_LICENSE: &str = "composer: {first: Antonio, last: Caldara}\ntitle: Magnificat\nscoring: S, A\nlicense: cc-by-4.0\nid: C 2\n";

  fn service(policy: ErrorPolicy, recorder: &Recorder) -> CatalogService<&Recorder> {
    CatalogService::new(FormatContext::new("edition-esser-skala", "https://example.org/pdf"), policy, recorder)
  }

  #[test]
  fn test_best_effort_skips_bad_license() {
    let recorder = Recorder::default();
    let source = MockSource::repos(vec![
      ("haydn-m-missa-b", MISSA),
      ("caldara-magnificat", BAD_LICENSE),
      ("caldara-te-deum", TE_DEUM),
      ("haydn-m-missa-a", MISSA_A),
    ]);

    let report = service(ErrorPolicy::BestEffort, &recorder).build(&[&source], &[]).unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].origin, "caldara-magnificat");
    assert_eq!(report.failures[0].kind, FormatError::UnknownLicense("cc-by-4.0".into()));
    assert_eq!(report.catalog.work_count(), 3);

    let caldara = Composer::new("Antonio", "Caldara", "");
    let haydn = Composer::new("Michael", "Haydn", "");
    let caldara_titles: Vec<_> = report.catalog.works_for(&caldara).unwrap().iter().map(|w| w.title.as_str()).collect();
    assert_eq!(caldara_titles, ["Te Deum"]);
    let haydn_titles: Vec<_> = report.catalog.works_for(&haydn).unwrap().iter().map(|w| w.title.as_str()).collect();
    assert_eq!(haydn_titles, ["Missa A", "Missa B"]);

    let events = recorder.events.borrow();
    assert_eq!(events.first().map(String::as_str), Some("start 4"));
    assert_eq!(events.last().map(String::as_str), Some("finish 3/1"));
    assert!(events.contains(&"err caldara-magnificat: unknown license: cc-by-4.0".to_string()));
  }

  #[test]
  fn test_strict_aborts_on_first_failure() {
    let recorder = Recorder::default();
    let source = MockSource::repos(vec![("haydn-m-missa-b", MISSA), ("caldara-magnificat", BAD_LICENSE)]);

    let err = service(ErrorPolicy::Strict, &recorder).build(&[&source], &[]).unwrap_err();
    match err {
      CoreError::Record(record) => assert_eq!(record.origin, "caldara-magnificat"),
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn test_unreadable_document_is_a_record_failure() {
    let recorder = Recorder::default();
    let source = MockSource::repos(vec![("broken", "title: [unclosed"), ("caldara-te-deum", TE_DEUM)]);

    let report = service(ErrorPolicy::BestEffort, &recorder).build(&[&source], &[]).unwrap();
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].origin, "broken");
    assert_eq!(report.catalog.work_count(), 1);
  }

  #[test]
  fn test_source_failure_aborts() {
    let recorder = Recorder::default();
    let mut source = MockSource::repos(vec![("caldara-te-deum", TE_DEUM)]);
    source.fail = true;

    let err = service(ErrorPolicy::BestEffort, &recorder).build(&[&source], &[]).unwrap_err();
    assert!(matches!(err, CoreError::Source(msg) if msg.starts_with("repos: ")));
    assert!(recorder.events.borrow().is_empty());
  }

  #[test]
  fn test_collections_and_upcoming_composers() {
    let recorder = Recorder::default();
    let repos = MockSource::repos(vec![("caldara-te-deum", TE_DEUM)]);
    let merged = MockSource {
      name: "proprium",
      kind: SourceKind::Collection { merge_into_composers: true },
      docs: vec![("proprium/b", MISSA), ("proprium/a", MISSA_A)],
      fail: false,
    };
    let isolated = MockSource {
      name: "vespers",
      kind: SourceKind::Collection { merge_into_composers: false },
      docs: vec![("vespers/te-deum", TE_DEUM)],
      fail: false,
    };
    let werner = Composer::new("Gregor Joseph", "Werner", "");

    let report = service(ErrorPolicy::BestEffort, &recorder)
      .build(&[&repos, &merged, &isolated], std::slice::from_ref(&werner))
      .unwrap();

    assert_eq!(report.collections.len(), 2);
    assert_eq!(report.collections[0].name, "proprium");
    let proprium: Vec<_> = report.collections[0].works.iter().map(|w| w.title.as_str()).collect();
    assert_eq!(proprium, ["Missa A", "Missa B"]);
    assert_eq!(report.collections[1].works.len(), 1);

    assert_eq!(report.catalog.works_for(&Composer::new("Antonio", "Caldara", "")).unwrap().len(), 1);
    assert_eq!(report.catalog.works_for(&Composer::new("Michael", "Haydn", "")).unwrap().len(), 2);
    assert_eq!(report.catalog.works_for(&werner).unwrap().len(), 0);
    assert_eq!(report.catalog.composer_count(), 3);
  }
}
