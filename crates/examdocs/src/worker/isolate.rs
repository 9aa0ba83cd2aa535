use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::{debug, error};

use crate::categorizer::DocumentClassifier;
use crate::error::ClassificationError;

use super::protocol::{classify_batch, ClassifyRequest};

/// A dedicated thread hosting one classifier, reachable only through its
/// request inbox.
pub struct ClassifierWorker {
    request_sender: Sender<ClassifyRequest>,
    handle: JoinHandle<()>,
    shutdown: Arc<AtomicBool>,
}

impl ClassifierWorker {
    pub fn spawn(classifier: Arc<dyn DocumentClassifier>) -> Result<Self, ClassificationError> {
        let (request_sender, request_receiver) = bounded::<ClassifyRequest>(1);
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_flag = Arc::clone(&shutdown);

        let handle = thread::Builder::new()
            .name("examdocs-classifier".into())
            .spawn(move || run_worker(request_receiver, shutdown_flag, classifier))
            .map_err(|e| ClassificationError::SpawnFailed(e.to_string()))?;

        debug!("Classification worker started");

        Ok(Self {
            request_sender,
            handle,
            shutdown,
        })
    }

    /// Hands a request to the worker without blocking. A full inbox returns
    /// the request to the caller.
    pub fn submit(&self, request: ClassifyRequest) -> Result<(), TrySendError<ClassifyRequest>> {
        self.request_sender.try_send(request)
    }

    pub fn is_alive(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Signals the worker to stop and waits for it to exit.
    pub fn terminate(self) {
        self.shutdown.store(true, Ordering::Release);
        drop(self.request_sender);

        if let Err(e) = self.handle.join() {
            error!("Classification worker panicked: {:?}", e);
        } else {
            debug!("Classification worker stopped");
        }
    }

    /// Signals the worker to stop without waiting. Used when the worker is
    /// presumed stuck.
    pub fn abandon(self) {
        self.shutdown.store(true, Ordering::Release);
        debug!("Classification worker abandoned");
    }
}

fn run_worker(
    request_receiver: Receiver<ClassifyRequest>,
    shutdown: Arc<AtomicBool>,
    classifier: Arc<dyn DocumentClassifier>,
) {
    loop {
        if shutdown.load(Ordering::Acquire) {
            debug!("Classification worker received shutdown signal");
            break;
        }

        match request_receiver.recv_timeout(Duration::from_millis(100)) {
            Ok(request) => {
                debug!(
                    "Classifying {} entries for exam '{}'",
                    request.entries.len(),
                    request.exam_code
                );

                let response = classify_batch(
                    classifier.as_ref(),
                    &request.entries,
                    &request.exam_code,
                    request.naming,
                );

                if request.reply.send(response).is_err() {
                    debug!("Classification reply dropped, requester went away");
                }
            }
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => {
                continue;
            }
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
                debug!("Classification worker inbox disconnected");
                break;
            }
        }
    }
}
