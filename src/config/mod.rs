//! Layered application configuration

mod app_config;

pub use app_config::{
    AppConfig, AwsConfig, GenerationConfig, IndexConfig, LogFormat, LoggingConfig,
    ParameterSource, ParametersConfig, ServerConfig,
};
