pub mod aggregate;
pub mod domain;
pub mod errors;
pub mod formatter;
pub mod ports;
pub mod services;
pub mod text;

pub use aggregate::{Aggregator, Catalog};
pub use errors::{CoreError, FormatError, RecordError};
pub use formatter::{FormatContext, format_record};
