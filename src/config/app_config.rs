use serde::Deserialize;

use crate::domain::{InferenceSettings, ParameterNames, ReadinessPolicy};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub aws: AwsConfig,
    pub parameters: ParametersConfig,
    pub generation: GenerationConfig,
    pub index: IndexConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AwsConfig {
    pub region: String,
}

/// Where runtime identifiers are read from
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParameterSource {
    #[default]
    Ssm,
    Env,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParametersConfig {
    pub source: ParameterSource,
    #[serde(flatten)]
    pub names: ParameterNames,
}

/// Model selection and sampling for both query handlers
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub converse_model_id: String,
    pub retrieve_and_generate_model_arn: String,
    pub top_k: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub name: String,
    /// Environment variable holding the collection endpoint
    pub endpoint_env: String,
    pub service: String,
    pub readiness: ReadinessPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: "eu-central-1".to_string(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        let inference = InferenceSettings::default();

        Self {
            converse_model_id: "eu.anthropic.claude-3-5-sonnet-20240620-v1:0".to_string(),
            retrieve_and_generate_model_arn:
                "arn:aws:bedrock:eu-central-1::foundation-model/anthropic.claude-3-5-sonnet-20240620-v1:0"
                    .to_string(),
            top_k: crate::domain::knowledge_base::DEFAULT_TOP_K,
            temperature: inference.temperature,
            top_p: inference.top_p,
            max_tokens: inference.max_tokens,
        }
    }
}

impl GenerationConfig {
    pub fn inference(&self) -> InferenceSettings {
        InferenceSettings {
            temperature: self.temperature,
            top_p: self.top_p,
            max_tokens: self.max_tokens,
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            name: "88-busta".to_string(),
            endpoint_env: "COLLECTION_ENDPOINT".to_string(),
            service: "aoss".to_string(),
            readiness: ReadinessPolicy::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
