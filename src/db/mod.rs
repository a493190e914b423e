use crate::config::DbConfig;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};

pub mod session;

/// Builds the pool without connecting: an unreachable database shows up as
/// failed requests instead of a failed start.
pub fn new_pool(config: &DbConfig) -> PgPool {
    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.name)
        .username(&config.user)
        .password(&config.password);

    PgPoolOptions::new()
        .max_connections(config.pool.size)
        .min_connections(config.pool.idle_size)
        .acquire_timeout(config.pool.timeout)
        .max_lifetime(config.pool.max_lifetime)
        .connect_lazy_with(options)
}
