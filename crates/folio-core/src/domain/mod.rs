pub mod composer;
pub mod license;
pub mod normalized;
pub mod record;

pub use composer::Composer;
pub use license::{License, LicenseParseError};
pub use normalized::{AssetLink, NormalizedRecord};
pub use record::{AssetLayout, RawComposer, RawRecord, RawSource, Release, Sources, SourcedRecord};
