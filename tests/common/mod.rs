#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use email_reply_assistant::models::classification::Classification;
use email_reply_assistant::models::session_manager::SessionManager;
use email_reply_assistant::routes::app_state::{AppState, PipelineInfo};
use email_reply_assistant::services::model_loader::{ModelLoader, PipelineFactory};
use email_reply_assistant::services::pipeline::{
    Classifier, GenerationParams, Generator, PipelineError, Pipelines, Translator,
};

pub const SAMPLE_EMAIL: &str = "Subject: Order Issue\n\nMy package arrived damaged.";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Labels everything mentioning "damaged" as a complaint.
pub struct KeywordClassifier;

#[async_trait]
impl Classifier for KeywordClassifier {
    async fn classify(&self, text: &str) -> Result<Classification, PipelineError> {
        if text.to_lowercase().contains("damaged") {
            Ok(Classification::new("Complaint", 0.92))
        } else {
            Ok(Classification::new("Inquiry", 0.61))
        }
    }
}

/// Echoes the prompt back followed by a canned reply, like a hosted text-generation model.
pub struct EchoGenerator {
    pub reply: String,
    pub calls: AtomicUsize,
}

impl EchoGenerator {
    pub fn new(reply: &str) -> Self {
        EchoGenerator { reply: reply.to_string(), calls: AtomicUsize::new(0) }
    }
}

#[async_trait]
impl Generator for EchoGenerator {
    async fn generate(&self, prompt: &str, _params: &GenerationParams) -> Result<String, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("{} {}", prompt, self.reply))
    }
}

pub struct TaggingTranslator {
    pub calls: AtomicUsize,
}

impl TaggingTranslator {
    pub fn new() -> Self {
        TaggingTranslator { calls: AtomicUsize::new(0) }
    }
}

#[async_trait]
impl Translator for TaggingTranslator {
    async fn translate(&self, text: &str) -> Result<String, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!(" 译文：{} ", text))
    }
}

pub struct BrokenTranslator;

#[async_trait]
impl Translator for BrokenTranslator {
    async fn translate(&self, _text: &str) -> Result<String, PipelineError> {
        Err(PipelineError::InferenceError("translation model crashed".to_string()))
    }
}

pub struct StaticFactory {
    pipelines: Pipelines,
}

#[async_trait]
impl PipelineFactory for StaticFactory {
    async fn build(&self) -> Result<Pipelines, PipelineError> {
        Ok(self.pipelines.clone())
    }
}

pub struct FailingFactory;

#[async_trait]
impl PipelineFactory for FailingFactory {
    async fn build(&self) -> Result<Pipelines, PipelineError> {
        Err(PipelineError::LoadError("Failed to fetch byinab/custom-email-classifier: HTTP 404".to_string()))
    }
}

pub fn fake_pipelines(generator: Arc<EchoGenerator>, translator: Arc<dyn Translator>) -> Pipelines {
    Pipelines::new(Arc::new(KeywordClassifier), generator, translator)
}

pub fn pipeline_info() -> PipelineInfo {
    PipelineInfo {
        classifier: "byinab/custom-email-classifier".to_string(),
        generator: "Kunal7370944861/Email-Writer-AI".to_string(),
        translator: "DDDSSS/translation_en-zh".to_string(),
        generator_backend: "hub".to_string(),
    }
}

pub fn app_state(factory: Arc<dyn PipelineFactory>) -> AppState {
    AppState {
        loader: Arc::new(ModelLoader::new(factory)),
        session_manager: SessionManager::new(),
        pipeline_info: pipeline_info(),
    }
}

pub fn state_with(pipelines: Pipelines) -> AppState {
    app_state(Arc::new(StaticFactory { pipelines }))
}
