use crate::{
    app::{
        api::{json_response, AppResult},
        error::{ErrorExt, ErrorKind},
        metrics::METRICS,
        state::State,
    },
    db::session::{InsertQuery, ListQuery, Session},
    session::{Minutes, SessionId},
};
use anyhow::Context;
use axum::{body::Bytes, extract::Extension};
use http::StatusCode;
use serde_derive::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("body is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("body is not a JSON object")]
    NotAnObject,
    #[error("topic is missing, empty or not a string")]
    InvalidTopic,
    #[error("minutes is missing or not a number")]
    InvalidMinutes,
}

#[derive(Debug)]
pub struct CreatePayload {
    topic: String,
    minutes: Minutes,
}

impl TryFrom<&[u8]> for CreatePayload {
    type Error = PayloadError;

    fn try_from(body: &[u8]) -> Result<Self, Self::Error> {
        let value: Value = serde_json::from_slice(body)?;
        let object = value.as_object().ok_or(PayloadError::NotAnObject)?;

        let topic = match object.get("topic") {
            Some(Value::String(topic)) if !topic.is_empty() => topic.to_owned(),
            _ => return Err(PayloadError::InvalidTopic),
        };

        let minutes = object
            .get("minutes")
            .and_then(Minutes::from_json)
            .ok_or(PayloadError::InvalidMinutes)?;

        Ok(Self { topic, minutes })
    }
}

#[derive(Serialize)]
pub struct Created {
    message: &'static str,
    id: SessionId,
}

#[derive(Serialize)]
pub struct SessionList {
    count: usize,
    sessions: Vec<Session>,
}

impl From<Vec<Session>> for SessionList {
    fn from(sessions: Vec<Session>) -> Self {
        Self {
            count: sessions.len(),
            sessions,
        }
    }
}

pub async fn create<S: State>(Extension(state): Extension<S>, body: Bytes) -> AppResult {
    do_create(state, &body).await
}

async fn do_create<S: State>(state: S, body: &[u8]) -> AppResult {
    let payload = CreatePayload::try_from(body)
        .map_err(|err| {
            METRICS.sessions_rejected().inc();
            err
        })
        .context("Failed to parse session payload")
        .error(ErrorKind::InvalidInput)?;

    let mut conn = state
        .get_conn()
        .await
        .error(ErrorKind::DbConnAcquisitionFailed)?;

    let id = InsertQuery::new(&payload.topic, &payload.minutes)
        .execute(&mut conn)
        .await
        .context("Failed to insert session")
        .error(ErrorKind::DbQueryFailed)?;

    METRICS.sessions_logged().inc();
    info!(%id, topic = %payload.topic, minutes = %payload.minutes, "Session logged");

    json_response(
        StatusCode::CREATED,
        &Created {
            message: "session logged",
            id,
        },
    )
}

pub async fn list<S: State>(Extension(state): Extension<S>) -> AppResult {
    do_list(state).await
}

async fn do_list<S: State>(state: S) -> AppResult {
    let mut conn = state
        .get_conn()
        .await
        .error(ErrorKind::DbConnAcquisitionFailed)?;

    let sessions = ListQuery::new()
        .execute(&mut conn)
        .await
        .context("Failed to get list of sessions")
        .error(ErrorKind::DbQueryFailed)?;

    json_response(StatusCode::OK, &SessionList::from(sessions))
}
