//! Agrupación de obras por compositor y orden final de presentación.

use std::collections::HashMap;

use crate::domain::{Composer, NormalizedRecord};

/// Ordena obras por título (orden de código, sensible a mayúsculas).
///
/// El orden es estable: títulos iguales conservan el orden de llegada.
pub fn sort_by_title(works: &mut [NormalizedRecord]) {
  works.sort_by(|a, b| a.title.cmp(&b.title));
}

/// Acumulador `Composer -> obras`.
///
/// Acepta registros en cualquier orden y de cualquier tipo de fuente; el
/// orden sólo se fija en [`Aggregator::finish`].
#[derive(Debug, Default)]
pub struct Aggregator {
  works: HashMap<Composer, Vec<NormalizedRecord>>,
}

impl Aggregator {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registra un compositor aunque todavía no tenga obras ("próximamente").
  pub fn register_composer(&mut self, composer: Composer) {
    self.works.entry(composer).or_default();
  }

  pub fn push(&mut self, record: NormalizedRecord) {
    self.works.entry(record.composer.clone()).or_default().push(record);
  }

  pub fn composer_count(&self) -> usize {
    self.works.len()
  }

  pub fn work_count(&self) -> usize {
    self.works.values().map(Vec::len).sum()
  }

  /// Cierra la agregación: compositores por `(last, suffix, first)` y obras
  /// por título.
  pub fn finish(self) -> Catalog {
    let mut entries: Vec<ComposerEntry> = self
      .works
      .into_iter()
      .map(|(composer, mut works)| {
        sort_by_title(&mut works);
        ComposerEntry { composer, works }
      })
      .collect();
    entries.sort_by(|a, b| a.composer.cmp(&b.composer));
    Catalog { entries }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComposerEntry {
  pub composer: Composer,
  pub works: Vec<NormalizedRecord>,
}

/// Entrada del índice de compositores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
  pub title: String,
  pub slug: String,
}

/// Compositores que comparten la inicial del apellido.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexGroup {
  pub initial: String,
  pub entries: Vec<IndexEntry>,
}

/// Resultado de la agregación, ya ordenado.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
  entries: Vec<ComposerEntry>,
}

impl Catalog {
  pub fn entries(&self) -> &[ComposerEntry] {
    &self.entries
  }

  pub fn works_for(&self, composer: &Composer) -> Option<&[NormalizedRecord]> {
    self.entries.iter().find(|e| &e.composer == composer).map(|e| e.works.as_slice())
  }

  pub fn composer_count(&self) -> usize {
    self.entries.len()
  }

  pub fn work_count(&self) -> usize {
    self.entries.iter().map(|e| e.works.len()).sum()
  }

  /// Índice agrupado por inicial, en el orden de los compositores.
  pub fn index(&self) -> Vec<IndexGroup> {
    let mut groups: Vec<IndexGroup> = Vec::new();

    for entry in &self.entries {
      let initial = entry.composer.initial();
      let item = IndexEntry { title: entry.composer.display_title(), slug: entry.composer.slug() };

      match groups.iter_mut().find(|g| g.initial == initial) {
        Some(group) => group.entries.push(item),
        None => groups.push(IndexGroup { initial, entries: vec![item] }),
      }
    }

    groups
  }
}
