pub mod classifier;
pub mod date;
pub mod emit;
pub mod etl;
pub mod extractor;
pub mod header;
pub mod location;
pub mod normalizer;
pub mod pipeline;

pub use crate::domain::model::{NormalizeReport, StatementBatch, TransactionRecord};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
