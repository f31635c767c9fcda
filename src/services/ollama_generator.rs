use async_trait::async_trait;
use log::info;
use ollama_rs::generation::completion::request::GenerationRequest;
use ollama_rs::generation::options::GenerationOptions;
use ollama_rs::Ollama;

use crate::services::pipeline::{GenerationParams, Generator, PipelineError};

/// Reply generator backed by a local Ollama server.
pub struct OllamaGenerator {
    ollama: Ollama,
    model: String,
}

impl OllamaGenerator {
    pub fn new(host: &str, port: u16, model: &str) -> Self {
        OllamaGenerator {
            ollama: Ollama::new(host.to_string(), port),
            model: model.to_string(),
        }
    }

    /// Fails unless the model has already been pulled on the Ollama server.
    pub async fn ensure_available(&self) -> Result<(), PipelineError> {
        let models = self
            .ollama
            .list_local_models()
            .await
            .map_err(|e| PipelineError::LoadError(format!("Ollama unreachable: {}", e)))?;
        let tagged = format!("{}:", self.model);
        if models.iter().any(|m| m.name == self.model || m.name.starts_with(&tagged)) {
            info!("Ollama model {} is available", self.model);
            Ok(())
        } else {
            Err(PipelineError::LoadError(format!("Ollama model {} is not pulled", self.model)))
        }
    }
}

fn generation_options(params: &GenerationParams) -> GenerationOptions {
    let temperature = if params.do_sample { params.temperature } else { 0.0 };
    GenerationOptions::default()
        .temperature(temperature)
        .num_predict(params.max_length as i32)
}

#[async_trait]
impl Generator for OllamaGenerator {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, PipelineError> {
        let request = GenerationRequest::new(self.model.clone(), prompt.to_string())
            .options(generation_options(params));
        let response = self.ollama.generate(request).await?;
        Ok(response.response)
    }
}
