use crate::core::emit::render_csv;
use crate::core::location::retrieval_location;
use crate::core::normalizer::normalize;
use crate::core::{ConfigProvider, Pipeline, StatementBatch, Storage};
use crate::utils::error::Result;

pub struct StatementPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> StatementPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for StatementPipeline<S, C> {
    async fn extract(&self) -> Result<String> {
        tracing::debug!("Reading statement from: {}", self.config.input_path());
        let bytes = self.storage.read_file(self.config.input_path()).await?;
        tracing::debug!("Read {} bytes", bytes.len());
        Ok(String::from_utf8(bytes)?)
    }

    async fn transform(&self, content: String) -> Result<StatementBatch> {
        Ok(normalize(&content, self.config.debug()))
    }

    async fn load(&self, batch: &StatementBatch) -> Result<String> {
        let file_name = self.config.output_file_name();
        let csv_data = render_csv(&batch.records)?;

        tracing::debug!("Writing {} bytes to {}", csv_data.len(), file_name);
        self.storage.write_file(&file_name, &csv_data).await?;

        match self.config.base_url() {
            Some(base) => Ok(retrieval_location(base, &file_name)?.to_string()),
            None => Ok(self.storage.location_of(&file_name)),
        }
    }
}
