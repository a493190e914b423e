use sqlx::{
    pool::PoolConnection,
    postgres::{PgConnectOptions, PgPoolOptions},
    Connection, Executor, PgConnection, PgPool, Postgres,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const SCHEMA: &str = include_str!("../../sql/schema.sql");

static SCHEMA_COUNTER: AtomicUsize = AtomicUsize::new(0);

#[derive(Clone)]
pub struct TestDb {
    pool: PgPool,
}

impl TestDb {
    /// Every instance works in its own Postgres schema, so tests sharing one
    /// server each start from an empty `sessions` table.
    pub async fn new(url: &str) -> Self {
        let schema = format!(
            "test_{}_{}",
            std::process::id(),
            SCHEMA_COUNTER.fetch_add(1, Ordering::SeqCst)
        );

        let mut conn = PgConnection::connect(url)
            .await
            .expect("Failed to connect to the DB");
        conn.execute(format!("CREATE SCHEMA {}", schema).as_str())
            .await
            .expect("Failed to create test schema");
        conn.close().await.expect("Failed to close DB connection");

        let search_path = format!("SET search_path TO {}", schema);
        let pool = PgPoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .after_connect(move |conn, _meta| {
                let search_path = search_path.clone();
                Box::pin(async move {
                    conn.execute(search_path.as_str()).await?;
                    Ok(())
                })
            })
            .connect(url)
            .await
            .expect("Failed to connect to the DB");

        let mut conn = pool.acquire().await.expect("Failed to get DB connection");

        sqlx::query(SCHEMA)
            .execute(&mut conn)
            .await
            .expect("Failed to create sessions table");

        Self { pool }
    }

    /// A pool pointing at a closed port, for paths that must fail or must not
    /// reach the database at all.
    pub fn unreachable() -> Self {
        let options = PgConnectOptions::new().host("127.0.0.1").port(1);

        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(1))
            .connect_lazy_with(options);

        Self { pool }
    }

    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    pub async fn get_conn(&self) -> PoolConnection<Postgres> {
        self.pool
            .acquire()
            .await
            .expect("Failed to get DB connection")
    }
}
