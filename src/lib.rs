pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::cli::LocalStorage;
pub use config::toml_config::TomlConfig;
pub use core::normalizer::{normalize, Normalizer};
pub use core::{etl::NormalizeEngine, pipeline::StatementPipeline};
pub use domain::model::{NormalizeReport, TransactionRecord, TransactionType};
pub use utils::error::{NormalizeError, Result};
