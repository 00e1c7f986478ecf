use crate::domain::SourcedRecord;
use crate::errors::RecordError;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
  #[error("io error: {0}")]
  Io(String),
}

/// Tipo de fuente, que decide a qué listados van sus obras.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
  /// Un repositorio por obra; todo va al catálogo por compositor.
  Repository,
  /// Proyecto con varias obras y su propio listado.
  Collection { merge_into_composers: bool },
}

/// Un registro leído, o el fallo de leerlo con su procedencia.
pub type SourceItem = Result<SourcedRecord, RecordError>;

/// Puerto que abstrae de dónde vienen los registros crudos.
///
/// Un `Err` de `records` significa que la fuente entera no se pudo leer;
/// los fallos por registro van dentro de cada [`SourceItem`].
pub trait RecordSource {
  fn name(&self) -> &str;
  fn kind(&self) -> SourceKind;
  fn records(&self) -> Result<Vec<SourceItem>, SourceError>;
}
