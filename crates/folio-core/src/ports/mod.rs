pub mod progress;
pub mod source;

pub use progress::ProgressReporter;
pub use source::{RecordSource, SourceError, SourceItem, SourceKind};
