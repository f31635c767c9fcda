use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;

use crate::config;
use crate::models::classification::Classification;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Model loading error: {0}")]
    LoadError(String),

    #[error("Request error: {0}")]
    RequestError(String),

    #[error("Inference error: {0}")]
    InferenceError(String),

    #[error("Unexpected response: {0}")]
    ResponseError(String),
}

impl From<reqwest::Error> for PipelineError {
    fn from(error: reqwest::Error) -> Self {
        PipelineError::RequestError(error.to_string())
    }
}

impl From<ollama_rs::error::OllamaError> for PipelineError {
    fn from(error: ollama_rs::error::OllamaError) -> Self {
        PipelineError::InferenceError(error.to_string())
    }
}

/// Sampling settings handed to the generator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationParams {
    pub max_length: u32,
    pub num_return_sequences: u32,
    pub do_sample: bool,
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        GenerationParams {
            max_length: config::GENERATION_MAX_LENGTH,
            num_return_sequences: config::GENERATION_NUM_SEQUENCES,
            do_sample: config::GENERATION_DO_SAMPLE,
            temperature: config::GENERATION_TEMPERATURE,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Returns the highest scoring class for `text`.
    async fn classify(&self, text: &str) -> Result<Classification, PipelineError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Generator: Send + Sync {
    /// Returns the raw generated text. Backends may or may not echo the prompt.
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, PipelineError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String, PipelineError>;
}

/// The three loaded pipelines. Read-only once built.
#[derive(Clone)]
pub struct Pipelines {
    pub classifier: Arc<dyn Classifier>,
    pub generator: Arc<dyn Generator>,
    pub translator: Arc<dyn Translator>,
}

impl Pipelines {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        generator: Arc<dyn Generator>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        Pipelines { classifier, generator, translator }
    }
}
