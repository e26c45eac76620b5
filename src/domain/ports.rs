use crate::domain::model::StatementBatch;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    /// Must never leave a partially written file at `path`.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Where a stored artifact can be fetched from.
    fn location_of(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_file_name(&self) -> String;
    fn base_url(&self) -> Option<&str>;
    fn debug(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<String>;
    async fn transform(&self, content: String) -> Result<StatementBatch>;
    async fn load(&self, batch: &StatementBatch) -> Result<String>;
}
