use secrecy::SecretString;
use service_core::config as core_config;
use service_core::config::get_env;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub common: core_config::Config,
    pub environment: Environment,
    pub service_name: String,
    pub service_version: String,
    pub log_level: String,
    pub mongodb: MongoConfig,
    pub token: TokenConfig,
    pub seed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Dev,
    Prod,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

/// Token signing configuration. The shared symmetric secret is injected
/// at startup and lives for the whole process.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: SecretString,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        let env_str = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string());
        let environment: Environment = env_str
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let is_prod = environment == Environment::Prod;

        Ok(ServiceConfig {
            common,
            environment,
            service_name: get_env("SERVICE_NAME", Some("directory-service"), is_prod)?,
            service_version: get_env("SERVICE_VERSION", Some(env!("CARGO_PKG_VERSION")), is_prod)?,
            log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
            mongodb: MongoConfig {
                uri: get_env("MONGODB_URI", Some("mongodb://localhost:27017"), is_prod)?,
                database: get_env("MONGODB_DATABASE", Some("directory"), is_prod)?,
            },
            // No default: the signing secret must always be provided.
            token: TokenConfig {
                secret: SecretString::new(get_env("TOKEN_SECRET", None, is_prod)?),
            },
            seed: get_env("SEED", Some("false"), is_prod)? == "true",
        })
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}
