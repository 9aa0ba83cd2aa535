//! Test doubles for the classifier and conversion engine seams.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use examdocs::config::ExamConfig;
use examdocs::{ConversionEngine, ConvertError, DocumentClassifier, DocumentType, PatternClassifier};

/// Delegates to the pattern classifier after sleeping.
pub struct SlowClassifier {
    pub delay: Duration,
    /// Only names containing this marker are delayed. `None` delays all.
    marker: Option<&'static str>,
    inner: PatternClassifier,
}

impl SlowClassifier {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            marker: None,
            inner: PatternClassifier::new(),
        }
    }

    pub fn for_names_containing(delay: Duration, marker: &'static str) -> Self {
        Self {
            marker: Some(marker),
            ..Self::new(delay)
        }
    }
}

impl DocumentClassifier for SlowClassifier {
    fn classify(&self, filename: &str) -> DocumentType {
        if self.marker.is_none_or(|m| filename.contains(m)) {
            thread::sleep(self.delay);
        }
        self.inner.classify(filename)
    }
}

/// Panics on any name containing "boom", otherwise behaves normally.
pub struct PanickingClassifier {
    inner: PatternClassifier,
}

impl PanickingClassifier {
    pub fn new() -> Self {
        Self {
            inner: PatternClassifier::new(),
        }
    }
}

impl DocumentClassifier for PanickingClassifier {
    fn classify(&self, filename: &str) -> DocumentType {
        if filename.contains("boom") {
            panic!("classifier crashed on {}", filename);
        }
        self.inner.classify(filename)
    }
}

/// Returns the input bytes prefixed with the document type. Fails for
/// names containing "bad" and panics for names containing "panic".
#[derive(Default)]
pub struct ScriptedEngine {
    pub calls: Arc<Mutex<Vec<String>>>,
    pub initialize_calls: Arc<Mutex<usize>>,
    configured: bool,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConversionEngine for ScriptedEngine {
    fn initialize(&mut self) -> Result<(), ConvertError> {
        *self.initialize_calls.lock().unwrap() += 1;
        Ok(())
    }

    fn set_config(&mut self, _config: &ExamConfig) {
        self.configured = true;
    }

    fn convert(
        &self,
        bytes: &[u8],
        document_type: DocumentType,
        filename: &str,
    ) -> Result<Vec<u8>, ConvertError> {
        assert!(self.configured, "convert called before set_config");
        self.calls.lock().unwrap().push(filename.to_string());

        if filename.contains("panic") {
            panic!("engine crashed on {}", filename);
        }
        if filename.contains("bad") {
            return Err(ConvertError::ImageProcessing("corrupt input".to_string()));
        }

        let mut output = document_type.as_str().as_bytes().to_vec();
        output.push(b':');
        output.extend_from_slice(bytes);
        Ok(output)
    }
}
