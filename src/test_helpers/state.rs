use crate::{app::state::State, test_helpers::prelude::*};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{pool::PoolConnection, Postgres};

#[derive(Clone)]
pub struct TestState {
    db_pool: TestDb,
}

impl TestState {
    pub fn new(db_pool: TestDb) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl State for TestState {
    async fn get_conn(&self) -> Result<PoolConnection<Postgres>> {
        self.db_pool
            .pool()
            .acquire()
            .await
            .context("Failed to acquire DB connection")
    }
}
