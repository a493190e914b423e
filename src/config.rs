use serde_derive::Deserialize;
use std::env::var;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub listener_address: SocketAddr,
    pub metrics_listener_address: Option<SocketAddr>,
    pub sentry: Option<SentryConfig>,
    pub db: DbConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PingerConfig {
    pub listener_address: SocketAddr,
    pub metrics_listener_address: Option<SocketAddr>,
    pub sentry: Option<SentryConfig>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SentryConfig {
    pub dsn: String,
    pub environment: Option<String>,
}

#[derive(Clone, Deserialize)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub pool: PoolConfig,
}

// Keeps the password out of the startup log line.
impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct PoolConfig {
    pub size: u32,
    pub idle_size: u32,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub max_lifetime: Duration,
}

const DEFAULT_LISTENER_ADDRESS: &str = "0.0.0.0:5000";

/// Plain variables understood for compatibility with the docker-compose setup.
/// They win over both the config file and `APP__DB__*` variables.
const DB_ENV_OVERRIDES: [(&str, &str); 5] = [
    ("db.host", "DB_HOST"),
    ("db.port", "DB_PORT"),
    ("db.name", "DB_NAME"),
    ("db.user", "DB_USER"),
    ("db.password", "DB_PASSWORD"),
];

pub fn load() -> Result<Config, config::ConfigError> {
    let mut builder = builder("study-buddy")?
        .set_default("db.host", "db")?
        .set_default("db.port", 5432_i64)?
        .set_default("db.name", "studybuddy")?
        .set_default("db.user", "postgres")?
        .set_default("db.password", "postgres")?
        .set_default("db.pool.size", 5_i64)?
        .set_default("db.pool.idle_size", 1_i64)?
        .set_default("db.pool.timeout", "5s")?
        .set_default("db.pool.max_lifetime", "30m")?;

    for (key, env) in DB_ENV_OVERRIDES {
        builder = builder.set_override_option(key, var(env).ok())?;
    }

    builder.build()?.try_deserialize::<Config>()
}

pub fn load_pinger() -> Result<PingerConfig, config::ConfigError> {
    builder("pinger")?.build()?.try_deserialize::<PingerConfig>()
}

fn builder(
    name: &str,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
    Ok(config::Config::builder()
        .set_default("listener_address", DEFAULT_LISTENER_ADDRESS)?
        .add_source(config::File::with_name(name).required(false))
        .add_source(config::Environment::with_prefix("APP").separator("__")))
}
