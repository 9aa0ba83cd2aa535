use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, info_span, warn, Instrument};

use crate::categorizer::DocumentType;
use crate::config::ExamConfig;
use crate::error::ConvertError;
use crate::processor::ConversionEngine;
use crate::record::{FileRecord, FormattedOutput};
use crate::sanitize;

use super::progress::ProgressReporter;

/// Drives a conversion engine over a batch, one file at a time.
///
/// A failing file is marked `error` and the batch moves on. Progress is
/// reported before each file and once more with 100 after the last one.
pub struct FormattingOrchestrator<E: ConversionEngine + 'static> {
    engine: Arc<Mutex<E>>,
    initialized: bool,
}

impl<E: ConversionEngine + 'static> FormattingOrchestrator<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            initialized: false,
        }
    }

    /// Shared handle to the engine.
    pub fn engine(&self) -> Arc<Mutex<E>> {
        Arc::clone(&self.engine)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub async fn format_documents(
        &mut self,
        files: &mut [FileRecord],
        config: &ExamConfig,
        progress: &dyn ProgressReporter,
    ) {
        let span = info_span!("format_batch", exam = %config.code, files = files.len());
        self.run_batch(files, config, progress)
            .instrument(span)
            .await
    }

    async fn run_batch(
        &mut self,
        files: &mut [FileRecord],
        config: &ExamConfig,
        progress: &dyn ProgressReporter,
    ) {
        let total = files.len();

        // A failed setup fails every file of this batch with the same message
        let setup = if total == 0 {
            Ok(())
        } else {
            self.prepare(config).await.map_err(|e| e.to_string())
        };

        let mut completed = 0usize;
        for (index, file) in files.iter_mut().enumerate() {
            progress.report((index * 100 / total) as u8);
            file.begin();

            let result = match &setup {
                Ok(()) => self.convert_file(file).await,
                Err(message) => Err(ConvertError::EngineUnavailable(message.clone())),
            };

            match result {
                Ok(bytes) => {
                    let document_type = file.detected_type.unwrap_or(DocumentType::Document);
                    file.formatted = Some(FormattedOutput {
                        bytes,
                        mime_type: config.output_mime_type(document_type).to_string(),
                    });
                    file.complete();
                    completed += 1;
                }
                Err(e) => {
                    warn!(
                        file = %sanitize::redact_name(file.original_name()),
                        error = %e,
                        "Formatting failed"
                    );
                    file.fail(e.to_string());
                }
            }
        }

        progress.report(100);
        info!(total, completed, failed = total - completed, "Formatting batch finished");
    }

    /// Initializes the engine on first use and hands it this batch's config.
    async fn prepare(&mut self, config: &ExamConfig) -> Result<(), ConvertError> {
        let engine = Arc::clone(&self.engine);
        let config = config.clone();
        let initialize = !self.initialized;

        tokio::task::spawn_blocking(move || {
            let mut engine = engine.lock().unwrap_or_else(PoisonError::into_inner);
            if initialize {
                engine.initialize()?;
            }
            engine.set_config(&config);
            Ok::<(), ConvertError>(())
        })
        .await
        .map_err(|e| ConvertError::EngineUnavailable(format!("engine setup failed: {}", e)))??;

        if initialize {
            debug!("Conversion engine initialized");
        }
        self.initialized = true;
        Ok(())
    }

    async fn convert_file(&self, file: &FileRecord) -> Result<Vec<u8>, ConvertError> {
        let name = file.original_name().to_string();
        let span = info_span!("format_file", file = %sanitize::redact_name(&name));

        async {
            let bytes = file.source().read(&name).await?;
            let document_type = file.detected_type.unwrap_or(DocumentType::Document);
            let engine = Arc::clone(&self.engine);

            tokio::task::spawn_blocking(move || {
                let engine = engine.lock().unwrap_or_else(PoisonError::into_inner);
                engine.convert(&bytes, document_type, &name)
            })
            .await
            .map_err(|e| ConvertError::EngineUnavailable(format!("conversion task failed: {}", e)))?
        }
        .instrument(span)
        .await
    }
}
