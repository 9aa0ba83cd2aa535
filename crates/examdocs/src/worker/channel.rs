//! Async façade over the classification worker.
//!
//! One batch request may be outstanding per channel. The worker is spawned
//! on first use and reused; it is replaced after a timeout or crash.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossbeam_channel::TrySendError;
use tokio::sync::oneshot;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::categorizer::{DocumentClassifier, NamingIndex, PatternClassifier};
use crate::error::ClassificationError;
use crate::record::FileRecord;
use crate::sanitize;

use super::isolate::ClassifierWorker;
use super::protocol::{ClassifyEntry, ClassifyRequest, ClassifyResponse};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const MISSING_RESULT_MESSAGE: &str = "no classification result returned";

#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Wall-clock limit for one batch, independent of batch size.
    pub timeout: Duration,
    pub naming: NamingIndex,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            naming: NamingIndex::default(),
        }
    }
}

pub struct ClassificationChannel {
    classifier: Arc<dyn DocumentClassifier>,
    config: ChannelConfig,
    worker: Mutex<Option<ClassifierWorker>>,
    busy: AtomicBool,
}

/// Holds the busy flag for the lifetime of one batch, including when the
/// batch future is dropped.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, ClassificationError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ClassificationError::Busy)?;
        Ok(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Abandons the worker if a batch future is dropped before its reply
/// arrived, so the next batch never queues behind a request nobody awaits.
struct InFlight<'a> {
    channel: &'a ClassificationChannel,
    armed: bool,
}

impl InFlight<'_> {
    fn settle(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            debug!("Classification batch dropped before its reply");
            self.channel.discard_worker();
        }
    }
}

impl ClassificationChannel {
    /// Channel over the built-in pattern classifier with default settings.
    pub fn new() -> Self {
        Self::with_classifier(Arc::new(PatternClassifier::new()), ChannelConfig::default())
    }

    pub fn with_classifier(classifier: Arc<dyn DocumentClassifier>, config: ChannelConfig) -> Self {
        Self {
            classifier,
            config,
            worker: Mutex::new(None),
            busy: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// Classifies and renames every record of the batch.
    ///
    /// Records are only modified once the worker has answered in full. On
    /// any error the batch is rejected and every record is left untouched.
    /// Records missing from the worker's answer are marked as failed.
    pub async fn analyze_documents(
        &self,
        files: &mut [FileRecord],
        exam_code: &str,
    ) -> Result<(), ClassificationError> {
        let _guard = BusyGuard::acquire(&self.busy)?;

        let span = info_span!("classify_batch", files = files.len(), exam_code = %exam_code);
        self.run_batch(files, exam_code).instrument(span).await
    }

    async fn run_batch(
        &self,
        files: &mut [FileRecord],
        exam_code: &str,
    ) -> Result<(), ClassificationError> {
        let entries = files
            .iter()
            .map(|f| ClassifyEntry {
                id: f.id().to_string(),
                name: f.original_name().to_string(),
            })
            .collect();

        let (reply, reply_rx) = oneshot::channel();
        self.dispatch(ClassifyRequest {
            entries,
            exam_code: exam_code.to_string(),
            naming: self.config.naming,
            reply,
        })?;
        let in_flight = InFlight {
            channel: self,
            armed: true,
        };

        // On error the guard discards the worker
        let response = match tokio::time::timeout(self.config.timeout, reply_rx).await {
            Ok(Ok(response)) => response,
            Ok(Err(_)) => {
                warn!("Classification worker dropped the request");
                return Err(ClassificationError::TransportFailure(
                    "worker exited before replying".to_string(),
                ));
            }
            Err(_) => {
                warn!(timeout = ?self.config.timeout, "Classification timed out");
                return Err(ClassificationError::Timeout(self.config.timeout));
            }
        };
        in_flight.settle();

        let missing = apply_results(files, response);
        info!(missing, "Classification batch complete");
        Ok(())
    }

    /// Sends a request, spawning the worker first if there is none alive.
    /// Never blocks: a worker whose inbox is still full is replaced.
    fn dispatch(&self, mut request: ClassifyRequest) -> Result<(), ClassificationError> {
        let mut slot = self
            .worker
            .lock()
            .map_err(|e| ClassificationError::TransportFailure(e.to_string()))?;

        for _ in 0..2 {
            if slot.as_ref().is_some_and(|w| !w.is_alive()) {
                debug!("Classification worker is gone, respawning");
                if let Some(dead) = slot.take() {
                    dead.abandon();
                }
            }

            let worker = match slot.take() {
                Some(worker) => worker,
                None => ClassifierWorker::spawn(Arc::clone(&self.classifier))?,
            };

            match worker.submit(request) {
                Ok(()) => {
                    *slot = Some(worker);
                    return Ok(());
                }
                Err(TrySendError::Full(returned)) => {
                    warn!("Classification worker still holds an earlier request, replacing it");
                    worker.abandon();
                    request = returned;
                }
                Err(TrySendError::Disconnected(_)) => {
                    worker.abandon();
                    return Err(ClassificationError::TransportFailure(
                        "worker inbox closed".to_string(),
                    ));
                }
            }
        }

        Err(ClassificationError::TransportFailure(
            "worker inbox full".to_string(),
        ))
    }

    fn discard_worker(&self) {
        if let Ok(mut slot) = self.worker.lock() {
            if let Some(worker) = slot.take() {
                worker.abandon();
            }
        }
    }

    /// Whether a worker thread is currently up.
    pub fn is_running(&self) -> bool {
        self.worker
            .lock()
            .map(|slot| slot.as_ref().is_some_and(|w| w.is_alive()))
            .unwrap_or(false)
    }

    /// Tears down the worker. The next batch starts a fresh one.
    ///
    /// An idle worker is joined. A worker with a batch in flight is only
    /// signalled, so the caller never waits for that batch to finish.
    pub fn terminate(&self) {
        let worker = match self.worker.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        };
        let Some(worker) = worker else {
            return;
        };

        if self.busy.load(Ordering::Acquire) {
            info!("Terminating classification worker with a batch in flight");
            worker.abandon();
        } else {
            info!("Terminating classification worker");
            worker.terminate();
        }
    }
}

impl Default for ClassificationChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ClassificationChannel {
    fn drop(&mut self) {
        if let Ok(mut slot) = self.worker.lock() {
            if let Some(worker) = slot.take() {
                worker.abandon();
            }
        }
    }
}

/// Merges a worker response onto the records by id. Returns the number of
/// records the response did not cover.
pub(crate) fn apply_results(files: &mut [FileRecord], response: ClassifyResponse) -> usize {
    let mut by_id: HashMap<String, _> = response
        .into_iter()
        .map(|entry| (entry.id.clone(), entry))
        .collect();

    let mut missing = 0;
    for record in files.iter_mut() {
        match by_id.remove(record.id()) {
            Some(entry) => {
                let new_name = match record.extension() {
                    Some(ext) => format!("{}.{}", entry.stem, ext),
                    None => entry.stem,
                };
                debug!(
                    file = %sanitize::redact_name(record.original_name()),
                    detected_type = %entry.detected_type,
                    new_name = %new_name,
                    "Classified"
                );
                record.detected_type = Some(entry.detected_type);
                record.new_name = Some(new_name);
                record.requirement = Some(entry.requirement);
                record.complete();
            }
            None => {
                warn!(
                    file = %sanitize::redact_name(record.original_name()),
                    "Classification result missing for record"
                );
                record.fail(MISSING_RESULT_MESSAGE);
                missing += 1;
            }
        }
    }

    if !by_id.is_empty() {
        debug!(
            unknown = by_id.len(),
            "Ignoring classification results for unknown ids"
        );
    }

    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorizer::requirements::RequirementCheck;
    use crate::categorizer::DocumentType;
    use crate::record::FileStatus;
    use crate::worker::protocol::ClassifiedEntry;

    fn result_for(record: &FileRecord, detected_type: DocumentType, stem: &str) -> ClassifiedEntry {
        ClassifiedEntry {
            id: record.id().to_string(),
            detected_type,
            stem: stem.to_string(),
            requirement: RequirementCheck {
                required: false,
                message: String::new(),
            },
        }
    }

    #[test]
    fn test_apply_results_correlates_by_id() {
        let mut files = vec![
            FileRecord::from_bytes("a.jpg", vec![1u8]),
            FileRecord::from_bytes("b.png", vec![2u8]),
        ];
        // response order reversed
        let response = vec![
            result_for(&files[1], DocumentType::Signature, "x_signature_2"),
            result_for(&files[0], DocumentType::Photo, "x_photograph"),
        ];

        let missing = apply_results(&mut files, response);

        assert_eq!(missing, 0);
        assert_eq!(files[0].detected_type, Some(DocumentType::Photo));
        assert_eq!(files[0].new_name.as_deref(), Some("x_photograph.jpg"));
        assert_eq!(files[1].new_name.as_deref(), Some("x_signature_2.png"));
        assert_eq!(files[1].status, FileStatus::Completed);
    }

    #[test]
    fn test_apply_results_marks_missing() {
        let mut files = vec![
            FileRecord::from_bytes("a.jpg", vec![1u8]),
            FileRecord::from_bytes("b.jpg", vec![2u8]),
        ];
        let response = vec![result_for(&files[0], DocumentType::Photo, "x_photograph")];

        let missing = apply_results(&mut files, response);

        assert_eq!(missing, 1);
        assert_eq!(files[1].status, FileStatus::Error);
        assert_eq!(files[1].error.as_deref(), Some(MISSING_RESULT_MESSAGE));
        assert!(files[1].detected_type.is_none());
    }

    #[test]
    fn test_apply_results_without_extension() {
        let mut files = vec![FileRecord::from_bytes("scan", vec![1u8])];
        let response = vec![result_for(&files[0], DocumentType::Document, "x_document")];
        apply_results(&mut files, response);
        assert_eq!(files[0].new_name.as_deref(), Some("x_document"));
    }

    #[test]
    fn test_busy_guard_releases_on_drop() {
        let flag = AtomicBool::new(false);
        {
            let _guard = BusyGuard::acquire(&flag).unwrap();
            assert!(matches!(
                BusyGuard::acquire(&flag),
                Err(ClassificationError::Busy)
            ));
        }
        assert!(BusyGuard::acquire(&flag).is_ok());
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(ChannelConfig::default().timeout, Duration::from_secs(30));
    }
}
