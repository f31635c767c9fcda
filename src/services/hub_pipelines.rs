use async_trait::async_trait;
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use url::Url;

use crate::config;
use crate::models::classification::Classification;
use crate::services::pipeline::{Classifier, GenerationParams, Generator, PipelineError, Translator};

/// A single hosted model on the Hugging Face inference API.
#[derive(Clone)]
pub struct HubModel {
    http: reqwest::Client,
    endpoint: Url,
    model: String,
    api_token: Option<String>,
}

impl HubModel {
    pub fn new(
        http: reqwest::Client,
        inference_url: &Url,
        model: &str,
        api_token: Option<String>,
    ) -> Result<Self, PipelineError> {
        let endpoint = config::model_url(inference_url, model)
            .map_err(|e| PipelineError::LoadError(format!("Invalid endpoint for {}: {}", model, e)))?;
        Ok(HubModel {
            http,
            endpoint,
            model: model.to_string(),
            api_token,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Posts `body` to the model endpoint and decodes the JSON answer.
    async fn infer<T: DeserializeOwned>(&self, body: &Value) -> Result<T, PipelineError> {
        debug!("Calling {} at {}", self.model, self.endpoint);
        let mut request = self.http.post(self.endpoint.clone()).json(body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        let payload: Value = serde_json::from_str(&text).map_err(|e| {
            PipelineError::ResponseError(format!("{} returned non-JSON body ({}): {}", self.model, status, e))
        })?;

        if let Some(error) = payload.get("error") {
            let reason = error.as_str().map(str::to_string).unwrap_or_else(|| error.to_string());
            return Err(PipelineError::InferenceError(format!("{}: {}", self.model, reason)));
        }
        if !status.is_success() {
            return Err(PipelineError::InferenceError(format!("{}: HTTP {}", self.model, status)));
        }

        serde_json::from_value(payload)
            .map_err(|e| PipelineError::ResponseError(format!("{}: {}", self.model, e)))
    }
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

// Single inputs come back either as `[{..}]` or `[[{..}]]` depending on the task head.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassificationPayload {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl ClassificationPayload {
    fn top(self) -> Option<LabelScore> {
        let scores = match self {
            ClassificationPayload::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
            ClassificationPayload::Flat(scores) => scores,
        };
        scores
            .into_iter()
            .max_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal))
    }
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
struct TranslationText {
    translation_text: String,
}

#[derive(Debug, Serialize)]
struct HubGenerationParameters<'a> {
    #[serde(flatten)]
    params: &'a GenerationParams,
    return_full_text: bool,
}

pub struct HubClassifier {
    model: HubModel,
}

impl HubClassifier {
    pub fn new(model: HubModel) -> Self {
        HubClassifier { model }
    }
}

#[async_trait]
impl Classifier for HubClassifier {
    async fn classify(&self, text: &str) -> Result<Classification, PipelineError> {
        let body = json!({ "inputs": text, "options": { "wait_for_model": true } });
        let payload: ClassificationPayload = self.model.infer(&body).await?;
        let top = payload.top().ok_or_else(|| {
            PipelineError::InferenceError(format!("{} returned no labels", self.model.model()))
        })?;
        info!("Classified email as {} ({:.3})", top.label, top.score);
        Ok(Classification::new(top.label, top.score))
    }
}

pub struct HubGenerator {
    model: HubModel,
}

impl HubGenerator {
    pub fn new(model: HubModel) -> Self {
        HubGenerator { model }
    }
}

#[async_trait]
impl Generator for HubGenerator {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, PipelineError> {
        let parameters = HubGenerationParameters {
            params,
            return_full_text: true,
        };
        let body = json!({
            "inputs": prompt,
            "parameters": parameters,
            "options": { "wait_for_model": true }
        });
        let outputs: Vec<GeneratedText> = self.model.infer(&body).await?;
        outputs
            .into_iter()
            .next()
            .map(|o| o.generated_text)
            .ok_or_else(|| PipelineError::ResponseError(format!("{} returned no sequences", self.model.model())))
    }
}

pub struct HubTranslator {
    model: HubModel,
}

impl HubTranslator {
    pub fn new(model: HubModel) -> Self {
        HubTranslator { model }
    }
}

#[async_trait]
impl Translator for HubTranslator {
    async fn translate(&self, text: &str) -> Result<String, PipelineError> {
        let body = json!({ "inputs": text, "options": { "wait_for_model": true } });
        let outputs: Vec<TranslationText> = self.model.infer(&body).await?;
        outputs
            .into_iter()
            .next()
            .map(|o| o.translation_text)
            .ok_or_else(|| PipelineError::ResponseError(format!("{} returned no translation", self.model.model())))
    }
}
