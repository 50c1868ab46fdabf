use super::{GenerationObserver, GenerationSummary, ImageGenerationService};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

pub struct MockImageGenerationClient {
    url_responses: Arc<Mutex<Vec<String>>>,
    failure: Arc<Mutex<Option<String>>>,
    titles: Arc<Mutex<Vec<String>>>,
}

impl MockImageGenerationClient {
    pub fn new() -> Self {
        Self {
            url_responses: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
            titles: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_url_response(self, url: String) -> Self {
        self.url_responses.lock().unwrap().push(url);
        self
    }

    /// Every call fails with an upstream error carrying `message`.
    pub fn with_upstream_failure(self, message: String) -> Self {
        *self.failure.lock().unwrap() = Some(message);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.titles.lock().unwrap().len()
    }

    pub fn titles(&self) -> Vec<String> {
        self.titles.lock().unwrap().clone()
    }
}

impl Default for MockImageGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageGenerationClient {
    async fn generate_image(&self, title: &str) -> Result<String> {
        let count = {
            let mut titles = self.titles.lock().unwrap();
            titles.push(title.to_string());
            titles.len()
        };

        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(Error::Upstream {
                status: 500,
                message,
            });
        }

        let responses = self.url_responses.lock().unwrap();
        if responses.is_empty() {
            let slug: String = title
                .to_lowercase()
                .split(|c: char| !c.is_alphanumeric())
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join("-");
            Ok(format!("https://images.example.com/{}.png", slug))
        } else {
            let index = (count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}

/// Observer that counts callbacks, for asserting on diagnostics in tests.
#[derive(Default)]
pub struct RecordingObserver {
    prompts: Mutex<Vec<String>>,
    summaries: Mutex<Vec<GenerationSummary>>,
    failures: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn summaries(&self) -> Vec<GenerationSummary> {
        self.summaries.lock().unwrap().clone()
    }

    pub fn failures(&self) -> usize {
        self.failures.lock().unwrap().len()
    }

    pub fn failure_kinds(&self) -> Vec<String> {
        self.failures.lock().unwrap().clone()
    }
}

impl GenerationObserver for RecordingObserver {
    fn request_sent(&self, prompt: &str) {
        self.prompts.lock().unwrap().push(prompt.to_string());
    }

    fn image_generated(&self, summary: &GenerationSummary) {
        self.summaries.lock().unwrap().push(summary.clone());
    }

    fn generation_failed(&self, error: &Error) {
        self.failures.lock().unwrap().push(error.kind().to_string());
    }
}
