use tracing::{info, info_span, Instrument};

use crate::config::ExamConfig;
use crate::error::ClassificationError;
use crate::processor::{ConversionEngine, DocumentFormatter};
use crate::record::FileRecord;
use crate::worker::ClassificationChannel;

use super::formatting::FormattingOrchestrator;
use super::progress::ProgressReporter;

/// Classifies a batch, then formats it.
pub struct Pipeline<E: ConversionEngine + 'static = DocumentFormatter> {
    channel: ClassificationChannel,
    formatter: FormattingOrchestrator<E>,
}

impl Pipeline<DocumentFormatter> {
    /// Production constructor: pattern classifier and built-in formatter.
    pub fn new() -> Self {
        Self::with_parts(
            ClassificationChannel::new(),
            FormattingOrchestrator::new(DocumentFormatter::new()),
        )
    }
}

impl Default for Pipeline<DocumentFormatter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ConversionEngine + 'static> Pipeline<E> {
    pub fn with_parts(channel: ClassificationChannel, formatter: FormattingOrchestrator<E>) -> Self {
        Self { channel, formatter }
    }

    pub fn with_engine(engine: E) -> Self {
        Self::with_parts(ClassificationChannel::new(), FormattingOrchestrator::new(engine))
    }

    pub fn channel(&self) -> &ClassificationChannel {
        &self.channel
    }

    pub fn formatter(&self) -> &FormattingOrchestrator<E> {
        &self.formatter
    }

    /// Runs both stages over `files`. A classification failure aborts the
    /// run before any formatting; per-file formatting failures do not.
    pub async fn run(
        &mut self,
        files: &mut [FileRecord],
        config: &ExamConfig,
        progress: &dyn ProgressReporter,
    ) -> Result<(), ClassificationError> {
        let span = info_span!("pipeline", exam = %config.code, files = files.len());

        async {
            self.channel.analyze_documents(files, &config.code).await?;
            self.formatter
                .format_documents(files, config, progress)
                .await;
            info!("Pipeline run finished");
            Ok::<(), ClassificationError>(())
        }
        .instrument(span)
        .await
    }

    /// Stops the classification worker. The next run starts a fresh one.
    pub fn shutdown(&self) {
        self.channel.terminate();
    }
}
