use std::sync::Arc;
use async_trait::async_trait;
use log::{error, info, warn};
use serde::Deserialize;
use tokio::sync::OnceCell;
use url::Url;

use crate::config::{self, GeneratorBackend, Settings};
use crate::services::hub_pipelines::{HubClassifier, HubGenerator, HubModel, HubTranslator};
use crate::services::ollama_generator::OllamaGenerator;
use crate::services::pipeline::{Generator, PipelineError, Pipelines};

/// Builds a fresh set of pipelines.
#[async_trait]
pub trait PipelineFactory: Send + Sync {
    async fn build(&self) -> Result<Pipelines, PipelineError>;
}

/// Loads the pipelines once and hands out the same instances afterwards.
///
/// A failed load leaves nothing behind, so the next call starts over.
pub struct ModelLoader {
    factory: Arc<dyn PipelineFactory>,
    pipelines: OnceCell<Arc<Pipelines>>,
}

impl ModelLoader {
    pub fn new(factory: Arc<dyn PipelineFactory>) -> Self {
        ModelLoader {
            factory,
            pipelines: OnceCell::new(),
        }
    }

    pub async fn get(&self) -> Result<Arc<Pipelines>, PipelineError> {
        self.pipelines
            .get_or_try_init(|| async {
                info!("Loading pipelines...");
                match self.factory.build().await {
                    Ok(pipelines) => {
                        info!("All 3 pipelines ready");
                        Ok(Arc::new(pipelines))
                    }
                    Err(e) => {
                        error!("Model loading error: {}", e);
                        Err(e)
                    }
                }
            })
            .await
            .map(Arc::clone)
    }

    pub fn is_loaded(&self) -> bool {
        self.pipelines.initialized()
    }
}

#[derive(Debug, Deserialize)]
struct HubModelInfo {
    #[serde(default)]
    pipeline_tag: Option<String>,
}

/// Builds the production pipelines from the Hugging Face Hub (and Ollama, when configured).
pub struct HubPipelineFactory {
    http: reqwest::Client,
    settings: Settings,
}

impl HubPipelineFactory {
    pub fn new(settings: Settings) -> Self {
        HubPipelineFactory {
            http: reqwest::Client::new(),
            settings,
        }
    }

    /// Checks that `model` exists on the Hub and serves the expected task.
    async fn validate(&self, model: &str, task: &str) -> Result<(), PipelineError> {
        let url: Url = config::model_url(&self.settings.hub_url, model)
            .map_err(|e| PipelineError::LoadError(format!("Invalid hub URL for {}: {}", model, e)))?;
        let mut request = self.http.get(url);
        if let Some(token) = &self.settings.api_token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|e| PipelineError::LoadError(format!("Failed to fetch {}: {}", model, e)))?;
        if !response.status().is_success() {
            return Err(PipelineError::LoadError(format!(
                "Failed to fetch {}: HTTP {}",
                model,
                response.status()
            )));
        }
        let info: HubModelInfo = response
            .json()
            .await
            .map_err(|e| PipelineError::LoadError(format!("Invalid metadata for {}: {}", model, e)))?;

        match info.pipeline_tag.as_deref() {
            Some(tag) if tag == task => Ok(()),
            Some(tag) => Err(PipelineError::LoadError(format!(
                "{} is a {} model, expected {}",
                model, tag, task
            ))),
            None => {
                warn!("{} has no pipeline tag; assuming {}", model, task);
                Ok(())
            }
        }
    }

    fn hub_model(&self, model: &str) -> Result<HubModel, PipelineError> {
        HubModel::new(
            self.http.clone(),
            &self.settings.inference_url,
            model,
            self.settings.api_token.clone(),
        )
    }

    async fn build_generator(&self) -> Result<Arc<dyn Generator>, PipelineError> {
        match self.settings.generator_backend {
            GeneratorBackend::Hub => {
                self.validate(config::GENERATOR_MODEL, config::GENERATOR_TASK).await?;
                Ok(Arc::new(HubGenerator::new(self.hub_model(config::GENERATOR_MODEL)?)))
            }
            GeneratorBackend::Ollama => {
                let generator = OllamaGenerator::new(
                    &self.settings.ollama_host,
                    self.settings.ollama_port,
                    &self.settings.ollama_model,
                );
                generator.ensure_available().await?;
                Ok(Arc::new(generator))
            }
        }
    }
}

#[async_trait]
impl PipelineFactory for HubPipelineFactory {
    async fn build(&self) -> Result<Pipelines, PipelineError> {
        info!("Pipeline 1: {}", config::CLASSIFIER_MODEL);
        self.validate(config::CLASSIFIER_MODEL, config::CLASSIFIER_TASK).await?;
        let classifier = HubClassifier::new(self.hub_model(config::CLASSIFIER_MODEL)?);

        info!("Pipeline 2: {} ({} backend)", self.generator_model(), self.settings.generator_backend);
        let generator = self.build_generator().await?;

        info!("Pipeline 3: {}", config::TRANSLATOR_MODEL);
        self.validate(config::TRANSLATOR_MODEL, config::TRANSLATOR_TASK).await?;
        let translator = HubTranslator::new(self.hub_model(config::TRANSLATOR_MODEL)?);

        Ok(Pipelines::new(Arc::new(classifier), generator, Arc::new(translator)))
    }
}

impl HubPipelineFactory {
    pub fn generator_model(&self) -> &str {
        generator_model(&self.settings)
    }
}

/// Name of the generator model the settings select.
pub fn generator_model(settings: &Settings) -> &str {
    match settings.generator_backend {
        GeneratorBackend::Hub => config::GENERATOR_MODEL,
        GeneratorBackend::Ollama => &settings.ollama_model,
    }
}
