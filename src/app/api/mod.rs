use crate::app::error::{ErrorExt, ErrorKind};
use anyhow::Context;
use axum::{body, response::Response};
use http::{header, StatusCode};
use serde::Serialize;

pub mod session;
pub mod status;

pub type AppError = crate::app::error::Error;
pub type AppResult = Result<Response, AppError>;

pub(crate) fn json_response<T: Serialize>(status: StatusCode, payload: &T) -> AppResult {
    let body = serde_json::to_string(payload)
        .context("Failed to serialize response body")
        .error(ErrorKind::SerializationFailed)?;

    let resp = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body::boxed(body::Full::from(body)))
        .context("Failed to build response")
        .error(ErrorKind::ResponseBuildFailed)?;

    Ok(resp)
}
