//! Generation client: one synchronous request/response per image.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use fashionsd_core::generation::{DEFAULT_HEIGHT, DEFAULT_STEPS, DEFAULT_WIDTH};
use uuid::Uuid;

use crate::config::GenerationConfig;
use crate::error::GenerationError;
use crate::payload::{Txt2ImgPayload, Txt2ImgResponse};

/// Caller-facing parameters of a single generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// What the caller wants avoided. Kept with the design record; the
    /// remote call always uses the fixed negative prompt.
    pub negative_prompt: String,
    pub width: u32,
    pub height: u32,
    pub steps: u32,
}

impl GenerationRequest {
    /// A request with default dimensions (512x1024), 20 steps and an empty
    /// negative prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            negative_prompt: String::new(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            steps: DEFAULT_STEPS,
        }
    }
}

/// Anything that can turn a prompt into an image file on disk.
///
/// The API layer depends on this trait rather than on [`GenerationClient`]
/// so another backend can be injected.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate one image and return the path it was written to.
    async fn generate(&self, request: &GenerationRequest) -> Result<PathBuf, GenerationError>;
}

/// HTTP client for the remote text-to-image service.
pub struct GenerationClient {
    client: reqwest::Client,
    config: GenerationConfig,
}

impl GenerationClient {
    /// Create a client, creating the output directory if it is missing.
    pub fn new(config: GenerationConfig) -> Result<Self, GenerationError> {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        config: GenerationConfig,
    ) -> Result<Self, GenerationError> {
        std::fs::create_dir_all(&config.output_dir)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generate an image from explicit parameters.
    pub async fn generate_image(
        &self,
        prompt: &str,
        negative_prompt: &str,
        width: u32,
        height: u32,
        steps: u32,
    ) -> Result<PathBuf, GenerationError> {
        let request = GenerationRequest {
            prompt: prompt.to_string(),
            negative_prompt: negative_prompt.to_string(),
            width,
            height,
            steps,
        };
        self.generate(&request).await
    }

    // ---- private helpers ----

    /// Send the payload and return the raw body of a 2xx response.
    async fn submit(&self, payload: &Txt2ImgPayload) -> Result<Vec<u8>, GenerationError> {
        let url = self.config.endpoint_url();
        tracing::debug!(
            %url,
            steps = payload.steps,
            width = payload.width,
            height = payload.height,
            "Submitting generation request"
        );

        let response = self.client.post(&url).json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Write image bytes under a unique `{timestamp}_{uuid}.png` name.
    async fn save_image(&self, bytes: &[u8]) -> Result<PathBuf, GenerationError> {
        tokio::fs::create_dir_all(&self.config.output_dir).await?;
        let path = unique_image_path(&self.config.output_dir);
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }
}

#[async_trait]
impl ImageGenerator for GenerationClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<PathBuf, GenerationError> {
        let payload = Txt2ImgPayload::from_request(request);

        let body = self.submit(&payload).await.inspect_err(|e| {
            tracing::error!(error = %e, "Generation request failed");
        })?;
        let image = Txt2ImgResponse::parse(&body)?.first_image().inspect_err(|e| {
            tracing::error!(error = %e, "Generation response unusable");
        })?;

        let path = self.save_image(&image).await?;
        tracing::info!(path = %path.display(), bytes = image.len(), "Generated image saved");
        Ok(path)
    }
}

fn unique_image_path(dir: &Path) -> PathBuf {
    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    dir.join(format!("{timestamp}_{}.png", Uuid::new_v4()))
}
