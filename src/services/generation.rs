//! Generative design client.
//!
//! A style prompt and the source photo go to the external image model. Only
//! inline image data counts as success; a text-only answer, an API error, a
//! network failure or bytes that are not an image all fall back to the local
//! style filter. The external call is never retried.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::GenerationSettings;
use crate::error::{AppError, AppResult};
use crate::models::DesignType;
use crate::services::image_processing;

/// What the external model answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Decoded image bytes
    Image(Vec<u8>),
    /// The model answered with text only
    TextOnly(String),
    /// The service reported an error
    ApiError(String),
}

/// Transport-level failures of the external call.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("unreadable response: {0}")]
    InvalidResponse(String),
}

/// External image generation service.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(
        &self,
        image: &[u8],
        mime_type: &str,
        prompt: &str,
    ) -> Result<GenerationOutcome, GeneratorError>;
}

/// Local replacement used when the external service produced nothing usable.
pub trait FallbackRenderer: Send + Sync {
    fn render(&self, image: &[u8], design_type: DesignType) -> AppResult<Vec<u8>>;
}

/// Fallback backed by [`image_processing::apply_style`]; never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct StyleFilterRenderer;

impl FallbackRenderer for StyleFilterRenderer {
    fn render(&self, image: &[u8], design_type: DesignType) -> AppResult<Vec<u8>> {
        Ok(image_processing::apply_style(image, design_type))
    }
}

/// Where a design image came from. Logged only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Generative,
    Fallback,
}

/// Image produced for one style.
#[derive(Debug, Clone)]
pub struct DesignImage {
    pub bytes: Vec<u8>,
    pub prompt: String,
    pub provenance: Provenance,
}

/// Generator with local fallback.
#[derive(Clone)]
pub struct DesignClient {
    generator: Option<Arc<dyn ImageGenerator>>,
    fallback: Arc<dyn FallbackRenderer>,
}

impl DesignClient {
    pub fn new(
        generator: Option<Arc<dyn ImageGenerator>>,
        fallback: Arc<dyn FallbackRenderer>,
    ) -> Self {
        Self {
            generator,
            fallback,
        }
    }

    /// Build from configuration: Gemini when an API key is set, otherwise
    /// local processing only.
    pub fn from_settings(settings: &GenerationSettings) -> AppResult<Self> {
        let generator: Option<Arc<dyn ImageGenerator>> = match settings.api_key {
            Some(ref key) => Some(Arc::new(GeminiClient::new(
                settings.api_url.clone(),
                key.clone(),
                Duration::from_secs(settings.timeout_secs),
            )?)),
            None => None,
        };
        Ok(Self::new(generator, Arc::new(StyleFilterRenderer)))
    }

    /// Produce one design image for `design_type`.
    ///
    /// Fails only when the fallback itself fails.
    pub async fn generate(
        &self,
        image: &[u8],
        mime_type: &str,
        design_type: DesignType,
        prompt: String,
    ) -> AppResult<DesignImage> {
        let reason = match self.generator {
            Some(ref generator) => match generator.generate(image, mime_type, &prompt).await {
                Ok(GenerationOutcome::Image(bytes)) if image::guess_format(&bytes).is_ok() => {
                    info!(design_type = %design_type, size = bytes.len(), "Generated design image");
                    return Ok(DesignImage {
                        bytes,
                        prompt,
                        provenance: Provenance::Generative,
                    });
                }
                Ok(GenerationOutcome::Image(_)) => "returned data that is not an image".to_string(),
                Ok(GenerationOutcome::TextOnly(text)) => {
                    format!("returned text instead of an image ({} chars)", text.len())
                }
                Ok(GenerationOutcome::ApiError(message)) => format!("API error: {}", message),
                Err(e @ GeneratorError::Timeout) | Err(e @ GeneratorError::Network(_)) => {
                    format!("unreachable: {}", e)
                }
                Err(e) => e.to_string(),
            },
            None => "no API key configured".to_string(),
        };

        warn!(
            design_type = %design_type,
            reason = %reason,
            "Generative image unavailable, using local processing"
        );

        let fallback = self.fallback.clone();
        let source = image.to_vec();
        let bytes = tokio::task::spawn_blocking(move || fallback.render(&source, design_type))
            .await
            .map_err(|e| AppError::GenerationFailed(format!("Fallback task failed: {}", e)))??;

        Ok(DesignImage {
            bytes,
            prompt,
            provenance: Provenance::Fallback,
        })
    }
}

/// Gemini `generateContent` client.
pub struct GeminiClient {
    http: reqwest::Client,
    api_url: String,
    api_key: SecretString,
}

impl GeminiClient {
    pub fn new(api_url: String, api_key: SecretString, timeout: Duration) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::GenerationFailed(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            api_url,
            api_key,
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    Text { text: &'a str },
    Image { inline_data: RequestInlineData<'a> },
}

#[derive(Serialize)]
struct RequestInlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default, rename = "inlineData", alias = "inline_data")]
    inline_data: Option<ResponseInlineData>,
}

#[derive(Debug, Deserialize)]
struct ResponseInlineData {
    data: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Interpret a `generateContent` response body.
fn parse_response(body: &[u8]) -> Result<GenerationOutcome, GeneratorError> {
    let response: GenerateContentResponse = serde_json::from_slice(body)
        .map_err(|e| GeneratorError::InvalidResponse(e.to_string()))?;

    if let Some(error) = response.error {
        return Ok(GenerationOutcome::ApiError(
            error.message.unwrap_or_else(|| "unknown API error".to_string()),
        ));
    }

    let parts: Vec<ResponsePart> = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts)
        .unwrap_or_default();

    if let Some(inline) = parts.iter().find_map(|p| p.inline_data.as_ref()) {
        let bytes = BASE64
            .decode(inline.data.trim())
            .map_err(|e| GeneratorError::InvalidResponse(format!("bad base64 image: {}", e)))?;
        return Ok(GenerationOutcome::Image(bytes));
    }

    let text: String = parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect::<Vec<_>>()
        .join("\n");

    if text.is_empty() {
        Err(GeneratorError::InvalidResponse(
            "no image or text in response".to_string(),
        ))
    } else {
        Ok(GenerationOutcome::TextOnly(text))
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate(
        &self,
        image: &[u8],
        mime_type: &str,
        prompt: &str,
    ) -> Result<GenerationOutcome, GeneratorError> {
        let payload = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart::Text { text: prompt },
                    RequestPart::Image {
                        inline_data: RequestInlineData {
                            mime_type,
                            data: BASE64.encode(image),
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                top_k: 32,
                top_p: 1.0,
            },
        };

        let response = self
            .http
            .post(&self.api_url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        let body = response.bytes().await.map_err(classify)?;

        match parse_response(&body) {
            Ok(outcome) => Ok(outcome),
            Err(_) if !status.is_success() => Ok(GenerationOutcome::ApiError(format!(
                "HTTP {}",
                status.as_u16()
            ))),
            Err(e) => Err(e),
        }
    }
}

fn classify(err: reqwest::Error) -> GeneratorError {
    if err.is_timeout() {
        GeneratorError::Timeout
    } else {
        GeneratorError::Network(err.to_string())
    }
}
