use std::sync::Arc;
use crate::models::session_manager::SessionManager;
use crate::services::model_loader::ModelLoader;

/// Model names shown on the status panel.
#[derive(Clone, Debug, serde::Serialize)]
pub struct PipelineInfo {
    pub classifier: String,
    pub generator: String,
    pub translator: String,
    pub generator_backend: String,
}

#[derive(Clone)]
pub struct AppState {
    pub loader: Arc<ModelLoader>,
    pub session_manager: SessionManager,
    pub pipeline_info: PipelineInfo,
}

impl PipelineInfo {
    pub fn from_settings(settings: &crate::config::Settings) -> Self {
        PipelineInfo {
            classifier: crate::config::CLASSIFIER_MODEL.to_string(),
            generator: crate::services::model_loader::generator_model(settings).to_string(),
            translator: crate::config::TRANSLATOR_MODEL.to_string(),
            generator_backend: settings.generator_backend.to_string(),
        }
    }
}
