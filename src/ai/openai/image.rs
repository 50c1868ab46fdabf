use super::client::OpenAiHttpClient;
use crate::ai::{GenerationObserver, GenerationSummary, ImageGenerationService, TracingObserver};
use crate::config::Config;
use crate::models::{GenerationRequest, ImageGenerationResponse};
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use std::sync::Arc;

const GENERATIONS_PATH: &str = "/v1/images/generations";

/// Generates blog post illustrations with OpenAI `dall-e-3`.
pub struct DalleImageClient {
    http: OpenAiHttpClient,
    observer: Arc<dyn GenerationObserver>,
}

impl DalleImageClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::new_with_client(api_key, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: Option<String>, client: reqwest::Client) -> Self {
        Self {
            http: OpenAiHttpClient::new_with_client(api_key, client),
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let http = OpenAiHttpClient::new(config.api_key.clone(), config.timeout)?
            .with_base_url(config.base_url.clone());

        Ok(Self {
            http,
            observer: Arc::new(TracingObserver),
        })
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn GenerationObserver>) -> Self {
        self.observer = observer;
        self
    }

    async fn request_image(&self, title: &str) -> Result<String> {
        self.http.require_api_key()?;

        let prompt = prompts::blog_image_prompt(title);
        self.observer.request_sent(&prompt);

        let request = GenerationRequest::for_prompt(prompt);
        let (status, body) = self.http.post(GENERATIONS_PATH, &request).await?;

        let response: ImageGenerationResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::debug!("Failed to parse DALL-E response: {}\nBody: {}", e, body);
            Error::MalformedResponse(format!("Failed to parse DALL-E response: {}", e))
        })?;

        // Exactly one image is requested; any other count is not guessed at.
        let image = match response.data.as_slice() {
            [image] => image,
            [] => {
                return Err(Error::MalformedResponse(
                    "No image data in DALL-E response".to_string(),
                ))
            }
            images => {
                return Err(Error::MalformedResponse(format!(
                    "Expected 1 image in DALL-E response, got {}",
                    images.len()
                )))
            }
        };

        let url = image
            .url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| Error::MalformedResponse("No image URL in DALL-E response".to_string()))?;

        let summary = GenerationSummary::new(status, url, image.revised_prompt.is_some());
        self.observer.image_generated(&summary);

        Ok(url.to_string())
    }
}

#[async_trait]
impl ImageGenerationService for DalleImageClient {
    async fn generate_image(&self, title: &str) -> Result<String> {
        let result = self.request_image(title).await;
        if let Err(e) = &result {
            self.observer.generation_failed(e);
        }
        result
    }
}
