pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::{http::HolderFetcher, storage::LocalStorage};
pub use crate::config::SnapshotConfig;
pub use crate::core::engine::SnapshotEngine;
pub use crate::utils::error::{Result, SnapshotError};
