use core_config::{AppInfo, ConfigError, Environment, FromEnv, app_info, env_parse, server::ServerConfig};
use database::postgres::PostgresConfig;

/// Port the backend listens on when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 9090;

/// ShareIt backend configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Apply pending migrations at startup (`RUN_MIGRATIONS`, default true)
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            app: app_info!(),
            database: PostgresConfig::from_env()?,
            server: ServerConfig::from_env_with_port(DEFAULT_PORT)?,
            environment: Environment::from_env(),
            run_migrations: env_parse("RUN_MIGRATIONS", "true")?,
        })
    }
}
