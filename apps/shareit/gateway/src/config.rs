use core_config::{
    AppInfo, ConfigError, Environment, app_info, env_or_default, env_parse, server::ServerConfig,
};
use std::time::Duration;

/// Port the gateway listens on when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 8080;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:9090";

/// ShareIt gateway configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Base URL of the backend (`SHAREIT_SERVER_URL`)
    pub backend_url: String,
    /// Upper bound for one backend call (`GATEWAY_TIMEOUT_SECS`)
    pub backend_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs: u64 = env_parse("GATEWAY_TIMEOUT_SECS", "30")?;

        Ok(Self {
            app: app_info!(),
            server: ServerConfig::from_env_with_port(DEFAULT_PORT)?,
            environment: Environment::from_env(),
            backend_url: env_or_default("SHAREIT_SERVER_URL", DEFAULT_BACKEND_URL),
            backend_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
