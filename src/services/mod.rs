pub mod hub_pipelines;
pub mod model_loader;
pub mod ollama_generator;
pub mod pipeline;
pub mod prompt_service;
pub mod workflow_service;
