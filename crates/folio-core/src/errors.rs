use thiserror::Error;

/// Motivo por el que un registro no se pudo normalizar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
  #[error("no id and no principal source")]
  MissingIdentifier,

  #[error("unknown license: {0}")]
  UnknownLicense(String),

  #[error("malformed record: {0}")]
  MalformedRecord(String),
}

/// Fallo de un registro concreto, identificado por su procedencia.
///
/// Es un error por registro: quien llama decide si lo registra y sigue o si
/// aborta la ejecución.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{origin}: {kind}")]
pub struct RecordError {
  pub origin: String,
  #[source]
  pub kind: FormatError,
}

impl RecordError {
  pub fn new(origin: impl Into<String>, kind: FormatError) -> Self {
    Self { origin: origin.into(), kind }
  }
}

/// Error genérico del núcleo de Folio.
///
/// Las capas superiores (CLI, escritores de páginas) lo mapean a mensajes
/// de usuario o logs.
#[derive(Debug, Error)]
pub enum CoreError {
  #[error("source error: {0}")]
  Source(String),

  #[error("record rejected in strict mode: {0}")]
  Record(#[from] RecordError),
}
