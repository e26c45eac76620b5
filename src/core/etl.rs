use crate::core::{NormalizeReport, Pipeline};
use crate::utils::error::Result;

pub struct NormalizeEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> NormalizeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Read, normalize and publish one statement. Any I/O failure aborts the run.
    pub async fn run(&self) -> Result<NormalizeReport> {
        tracing::info!("Starting statement normalization");

        let content = self.pipeline.extract().await?;

        let batch = self.pipeline.transform(content).await?;
        tracing::info!(
            "Extracted {} transactions ({} rows rejected, {} header rows)",
            batch.records.len(),
            batch.summary.records_rejected,
            batch.summary.headers_seen
        );
        if batch.summary.headers_seen == 0 {
            tracing::warn!("No header row recognized; output will contain the header only");
        }

        let output_location = self.pipeline.load(&batch).await?;
        tracing::info!("Standardized file generated: {}", output_location);

        Ok(NormalizeReport {
            output_location,
            lines_read: batch.summary.lines_read,
            records_emitted: batch.records.len(),
            records_rejected: batch.summary.records_rejected,
            headers_seen: batch.summary.headers_seen,
            card_names: batch.summary.card_names,
            parsed: batch.summary.parsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::normalizer::normalize;
    use crate::core::StatementBatch;
    use crate::utils::error::NormalizeError;
    use std::sync::Mutex;

    struct FixedPipeline {
        content: &'static str,
        fail_load: bool,
        loaded: Mutex<usize>,
    }

    #[async_trait::async_trait]
    impl Pipeline for FixedPipeline {
        async fn extract(&self) -> Result<String> {
            Ok(self.content.to_string())
        }

        async fn transform(&self, content: String) -> Result<StatementBatch> {
            Ok(normalize(&content, false))
        }

        async fn load(&self, batch: &StatementBatch) -> Result<String> {
            if self.fail_load {
                return Err(NormalizeError::IoError(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only output directory",
                )));
            }
            *self.loaded.lock().unwrap() = batch.records.len();
            Ok("out.csv".to_string())
        }
    }

    #[test]
    fn test_run_reports_counts() {
        let engine = NormalizeEngine::new(FixedPipeline {
            content: "CARD X\nDate,Details,Amount\n01-01-23,A B,1\n31-02-2023,C D,2,01-01-2023\n31-02-2023,E F,3\n",
            fail_load: false,
            loaded: Mutex::new(0),
        });

        let report = tokio_test::block_on(engine.run()).unwrap();
        assert_eq!(report.output_location, "out.csv");
        assert_eq!(report.records_emitted, 1);
        assert_eq!(report.records_rejected, 1);
        assert_eq!(report.headers_seen, 1);
        assert_eq!(report.card_names, vec!["CARD X".to_string()]);
        assert_eq!(*engine.pipeline.loaded.lock().unwrap(), 1);
    }

    #[test]
    fn test_run_propagates_io_failure() {
        let engine = NormalizeEngine::new(FixedPipeline {
            content: "",
            fail_load: true,
            loaded: Mutex::new(0),
        });

        let err = tokio_test::block_on(engine.run()).unwrap_err();
        assert!(matches!(err, NormalizeError::IoError(_)));
    }
}
