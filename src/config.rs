use std::env;
use std::fmt;
use std::str::FromStr;
use url::Url;

pub fn init_logging() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
}

pub const CLASSIFIER_MODEL: &str = "byinab/custom-email-classifier";
pub const GENERATOR_MODEL: &str = "Kunal7370944861/Email-Writer-AI";
pub const TRANSLATOR_MODEL: &str = "DDDSSS/translation_en-zh";

pub const CLASSIFIER_TASK: &str = "text-classification";
pub const GENERATOR_TASK: &str = "text-generation";
pub const TRANSLATOR_TASK: &str = "translation";

/// The classifier only ever sees this many characters of the email.
pub const CLASSIFIER_MAX_CHARS: usize = 512;

pub const GENERATION_MAX_LENGTH: u32 = 300;
pub const GENERATION_NUM_SEQUENCES: u32 = 1;
pub const GENERATION_DO_SAMPLE: bool = true;
pub const GENERATION_TEMPERATURE: f32 = 0.7;

pub const REPLY_MARKER: &str = "Reply:";

/// Request body cap for submitted emails, far above any realistic thread.
pub const MAX_EMAIL_BYTES: usize = 4 * 1024 * 1024;

/// Idle sessions are forgotten after this long.
pub const SESSION_TTL_SECS: u64 = 60 * 60;

pub const ENGLISH_REPLY_FILE: &str = "email_reply_en.txt";
pub const CHINESE_REPLY_FILE: &str = "email_reply_zh.txt";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_INFERENCE_URL: &str = "https://api-inference.huggingface.co/models/";
const DEFAULT_HUB_URL: &str = "https://huggingface.co/api/models/";

const DEFAULT_OLLAMA_HOST: &str = "http://localhost";
const DEFAULT_OLLAMA_PORT: u16 = 11434;
const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

/// Where the reply generator runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorBackend {
    Hub,
    Ollama,
}

impl FromStr for GeneratorBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hub" | "huggingface" => Ok(GeneratorBackend::Hub),
            "ollama" => Ok(GeneratorBackend::Ollama),
            other => Err(ConfigError::InvalidValue("GENERATOR_BACKEND", other.to_string())),
        }
    }
}

impl fmt::Display for GeneratorBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorBackend::Hub => write!(f, "hub"),
            GeneratorBackend::Ollama => write!(f, "ollama"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub inference_url: Url,
    pub hub_url: Url,
    pub api_token: Option<String>,
    pub generator_backend: GeneratorBackend,
    pub ollama_host: String,
    pub ollama_port: u16,
    pub ollama_model: String,
}

impl Settings {
    /// Reads settings from the environment, loading a `.env` file first if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let port = match env::var("ASSISTANT_PORT") {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidValue("ASSISTANT_PORT", value))?,
            Err(_) => DEFAULT_PORT,
        };
        let ollama_port = match env::var("OLLAMA_PORT") {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidValue("OLLAMA_PORT", value))?,
            Err(_) => DEFAULT_OLLAMA_PORT,
        };
        let generator_backend = match env::var("GENERATOR_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => GeneratorBackend::Hub,
        };

        Ok(Settings {
            host: env::var("ASSISTANT_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port,
            inference_url: base_url("HF_INFERENCE_URL", DEFAULT_INFERENCE_URL)?,
            hub_url: base_url("HF_HUB_URL", DEFAULT_HUB_URL)?,
            api_token: env::var("HF_API_TOKEN").ok().filter(|t| !t.trim().is_empty()),
            generator_backend,
            ollama_host: env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_OLLAMA_HOST.to_string()),
            ollama_port,
            ollama_model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_OLLAMA_MODEL.to_string()),
        })
    }
}

/// Parses a base URL, making sure it ends with `/` so model names can be joined onto it.
fn base_url(var: &'static str, default: &str) -> Result<Url, ConfigError> {
    let mut raw = env::var(var).unwrap_or_else(|_| default.to_string());
    if !raw.ends_with('/') {
        raw.push('/');
    }
    Url::parse(&raw).map_err(|e| ConfigError::InvalidValue(var, format!("{}: {}", raw, e)))
}

/// Joins a model name such as `org/model` onto a base URL.
pub fn model_url(base: &Url, model: &str) -> Result<Url, url::ParseError> {
    base.join(model)
}
