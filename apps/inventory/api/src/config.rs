use axum_helpers::SessionConfig;
use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::mongodb::MongoConfig;
use domain_users::VerificationConfig;
use email::SmtpConfig;

pub use core_config::Environment;

/// Application configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub mongodb: MongoConfig,
    pub session: SessionConfig,
    pub smtp: SmtpConfig,
    pub verification: VerificationConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            mongodb: MongoConfig::from_env()?,
            session: SessionConfig::from_env()?,
            smtp: SmtpConfig::from_env()?,
            verification: VerificationConfig::from_env()?,
        })
    }
}
