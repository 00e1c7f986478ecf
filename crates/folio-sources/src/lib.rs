pub mod collection_source;
pub mod config;
pub mod repo_source;

pub use collection_source::CollectionSource;
pub use config::{CollectionConfig, ProjectConfig, SourcesConfig};
pub use repo_source::RepoSnapshotSource;
