pub mod aggregator;
pub mod engine;
pub mod export;
pub mod paginator;
pub mod registry;
pub mod report;
pub mod snapshot;

pub use crate::domain::model::{AggregateRow, FetchOutcome, HolderEntry, ManifestEntry, Token};
pub use crate::domain::ports::{ConfigProvider, HolderSource, Storage};
pub use crate::utils::error::Result;
