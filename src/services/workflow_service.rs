use chrono::Utc;
use log::info;
use std::time::Instant;

use crate::models::classification::Classification;
use crate::models::workflow_result::WorkflowResult;
use crate::services::pipeline::{Classifier, GenerationParams, Generator, PipelineError, Pipelines, Translator};
use crate::services::prompt_service::{build_prompt, extract_reply, truncate_for_classifier};

/// A stage failure. The run stops there and nothing after it is produced.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("Classification failed: {0}")]
    Classify(PipelineError),

    #[error("Reply generation failed: {0}")]
    Generate(PipelineError),

    #[error("Translation failed: {0}")]
    Translate(PipelineError),
}

impl WorkflowError {
    pub fn stage(&self) -> &'static str {
        match self {
            WorkflowError::Classify(_) => "classify",
            WorkflowError::Generate(_) => "generate",
            WorkflowError::Translate(_) => "translate",
        }
    }
}

pub async fn classify_email(text: &str, classifier: &dyn Classifier) -> Result<Classification, PipelineError> {
    classifier.classify(truncate_for_classifier(text)).await
}

pub async fn generate_reply(prompt: &str, generator: &dyn Generator) -> Result<String, PipelineError> {
    let generated = generator.generate(prompt, &GenerationParams::default()).await?;
    Ok(extract_reply(&generated, prompt))
}

/// Blank input short-circuits to an empty translation without calling the model.
pub async fn translate_reply(text: &str, translator: &dyn Translator) -> Result<String, PipelineError> {
    if text.trim().is_empty() {
        return Ok(String::new());
    }
    Ok(translator.translate(text).await?.trim().to_string())
}

/// Runs classify -> generate -> translate for one email.
pub async fn run_workflow(email: &str, pipelines: &Pipelines) -> Result<WorkflowResult, WorkflowError> {
    let started = Instant::now();

    let classification = classify_email(email, pipelines.classifier.as_ref())
        .await
        .map_err(WorkflowError::Classify)?;
    info!("Pipeline 1 done: {}", classification);

    let prompt = build_prompt(email, &classification.label);
    let reply_en = generate_reply(&prompt, pipelines.generator.as_ref())
        .await
        .map_err(WorkflowError::Generate)?;
    info!("Pipeline 2 done: {} chars", reply_en.chars().count());

    let reply_zh = translate_reply(&reply_en, pipelines.translator.as_ref())
        .await
        .map_err(WorkflowError::Translate)?;
    info!("Pipeline 3 done: {} chars in {:?}", reply_zh.chars().count(), started.elapsed());

    Ok(WorkflowResult {
        classification,
        prompt,
        reply_en,
        reply_zh,
        generated_at: Utc::now(),
    })
}
