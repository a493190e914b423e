use crate::session::{Minutes, SessionId};
use serde_derive::Serialize;
use sqlx::{postgres::PgRow, FromRow, PgConnection, Row};

/// A row of the externally managed `sessions` table. Its columns are
/// nullable, so rows written by other tools may lack a topic or minutes.
#[derive(Clone, Debug, Serialize)]
pub struct Session {
    pub id: SessionId,
    pub topic: Option<String>,
    pub minutes: Option<Minutes>,
}

impl<'r> FromRow<'r, PgRow> for Session {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let minutes: Option<String> = row.try_get("minutes")?;
        let minutes = minutes
            .map(|minutes| minutes.parse::<Minutes>())
            .transpose()
            .map_err(|err| sqlx::Error::ColumnDecode {
                index: "minutes".to_string(),
                source: Box::new(err),
            })?;

        Ok(Self {
            id: row.try_get("id")?,
            topic: row.try_get("topic")?,
            minutes,
        })
    }
}

pub struct InsertQuery<'a> {
    topic: &'a str,
    minutes: &'a Minutes,
}

impl<'a> InsertQuery<'a> {
    pub fn new(topic: &'a str, minutes: &'a Minutes) -> Self {
        Self { topic, minutes }
    }

    pub async fn execute(&self, conn: &mut PgConnection) -> sqlx::Result<SessionId> {
        sqlx::query_scalar::<_, SessionId>(
            r#"
            INSERT INTO sessions
                (topic, minutes)
            VALUES ($1, $2::numeric)
            RETURNING id
            "#,
        )
        .bind(self.topic)
        .bind(self.minutes.to_string())
        .fetch_one(conn)
        .await
    }
}

#[derive(Default)]
pub struct ListQuery;

impl ListQuery {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(&self, conn: &mut PgConnection) -> sqlx::Result<Vec<Session>> {
        sqlx::query_as::<_, Session>(
            r#"
            SELECT
                id,
                topic,
                minutes::text AS minutes
            FROM sessions
            ORDER BY id
            "#,
        )
        .fetch_all(conn)
        .await
    }
}
