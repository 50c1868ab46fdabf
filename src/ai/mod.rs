//! AI service integration for blog post illustrations
//!
//! Provides the image generation interface, its OpenAI `dall-e-3` backend,
//! and the observer hooks the backend reports through.

pub mod mock;
pub mod openai;

pub use mock::MockImageGenerationClient;
pub use openai::DalleImageClient;

use crate::{Error, Result};
use async_trait::async_trait;

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Generate an illustration for a post title and return its URL.
    async fn generate_image(&self, title: &str) -> Result<String>;
}

/// What gets reported about a successful generation. Never holds the URL
/// itself, since provider URLs are signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub status: u16,
    pub url_host: Option<String>,
    pub url_len: usize,
    pub prompt_revised: bool,
}

impl GenerationSummary {
    pub fn new(status: u16, url: &str, prompt_revised: bool) -> Self {
        let url_host = reqwest::Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string));

        Self {
            status,
            url_host,
            url_len: url.len(),
            prompt_revised,
        }
    }
}

/// Diagnostic hooks invoked during a generation. Implementations must not
/// affect the outcome of the call.
pub trait GenerationObserver: Send + Sync {
    fn request_sent(&self, prompt: &str);
    fn image_generated(&self, summary: &GenerationSummary);
    fn generation_failed(&self, error: &Error);
}

/// Default observer, reports through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl GenerationObserver for TracingObserver {
    fn request_sent(&self, prompt: &str) {
        tracing::info!(prompt = %prompt, "Sending request to DALL-E API");
    }

    fn image_generated(&self, summary: &GenerationSummary) {
        tracing::info!(
            status = summary.status,
            url_host = summary.url_host.as_deref().unwrap_or("<unparsable>"),
            url_len = summary.url_len,
            prompt_revised = summary.prompt_revised,
            "DALL-E API returned an image"
        );
    }

    fn generation_failed(&self, error: &Error) {
        tracing::error!(kind = error.kind(), "Error generating image with DALL-E: {}", error);
    }
}
