use axum::response::{IntoResponse, Response};
use http::{header, StatusCode};
use serde_json::json;
use std::error::Error as StdError;
use std::fmt;
use svc_error::Error as SvcError;
use tracing::{error, warn};

struct ErrorKindProperties {
    status: StatusCode,
    kind: &'static str,
    title: &'static str,
    is_notify_sentry: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorKind {
    InvalidInput,
    DbConnAcquisitionFailed,
    DbQueryFailed,
    SerializationFailed,
    ResponseBuildFailed,
}

impl ErrorKind {
    pub fn is_notify_sentry(self) -> bool {
        let properties: ErrorKindProperties = self.into();
        properties.is_notify_sentry
    }

    pub fn status(self) -> StatusCode {
        let properties: ErrorKindProperties = self.into();
        properties.status
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let properties: ErrorKindProperties = self.to_owned().into();
        write!(f, "{}", properties.title)
    }
}

impl From<ErrorKind> for ErrorKindProperties {
    fn from(k: ErrorKind) -> Self {
        match k {
            ErrorKind::InvalidInput => ErrorKindProperties {
                status: StatusCode::BAD_REQUEST,
                kind: "invalid_input",
                title: "Invalid input",
                is_notify_sentry: false,
            },
            ErrorKind::DbConnAcquisitionFailed => ErrorKindProperties {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                kind: "database_connection_acquisition_failed",
                title: "Database connection acquisition failed",
                is_notify_sentry: true,
            },
            ErrorKind::DbQueryFailed => ErrorKindProperties {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                kind: "database_query_failed",
                title: "Database query failed",
                is_notify_sentry: true,
            },
            ErrorKind::SerializationFailed => ErrorKindProperties {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                kind: "serialization_failed",
                title: "Serialization failed",
                is_notify_sentry: true,
            },
            ErrorKind::ResponseBuildFailed => ErrorKindProperties {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                kind: "response_build_failed",
                title: "Response build failed",
                is_notify_sentry: true,
            },
        }
    }
}

pub struct Error {
    kind: ErrorKind,
    source: anyhow::Error,
}

impl Error {
    pub fn new<E>(kind: ErrorKind, source: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self {
            kind,
            source: source.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Client-facing problem body. The source chain stays in logs and Sentry.
    pub fn to_svc_error(&self) -> SvcError {
        let properties: ErrorKindProperties = self.kind.into();

        SvcError::builder()
            .status(properties.status)
            .kind(properties.kind, properties.title)
            .detail(properties.title)
            .build()
    }

    pub fn notify_sentry(&self) {
        if !self.kind.is_notify_sentry() {
            return;
        }

        let source: &(dyn StdError + Send + Sync + 'static) = self.source.as_ref();
        sentry::capture_error(source);
    }

    // Clients only learn that their input was rejected, never why.
    fn body(&self) -> String {
        match self.kind {
            ErrorKind::InvalidInput => json!({ "error": "Invalid input" }).to_string(),
            _ => serde_json::to_string(&self.to_svc_error())
                .unwrap_or_else(|_| json!({ "error": self.kind.to_string() }).to_string()),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if self.kind.is_notify_sentry() {
            error!(kind = ?self.kind, error = %format!("{:#}", self.source), "Request failed");
            self.notify_sentry();
        } else {
            warn!(kind = ?self.kind, error = %format!("{:#}", self.source), "Request rejected");
        }

        (
            self.kind.status(),
            [(header::CONTENT_TYPE, "application/json")],
            self.body(),
        )
            .into_response()
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("source", &self.source)
            .finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:#}", self.kind, self.source)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        let source: &(dyn StdError + Send + Sync + 'static) = self.source.as_ref();
        Some(source)
    }
}

pub trait ErrorExt<T> {
    fn error(self, kind: ErrorKind) -> Result<T, Error>;
}

impl<T, E: Into<anyhow::Error>> ErrorExt<T> for Result<T, E> {
    fn error(self, kind: ErrorKind) -> Result<T, Error> {
        self.map_err(|source| Error::new(kind, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use axum::body::HttpBody;

    #[tokio::test]
    async fn invalid_input_hides_details() {
        let resp = Error::new(ErrorKind::InvalidInput, anyhow!("topic is missing")).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = resp.into_body().data().await.unwrap().expect("Failed to get body");
        assert_eq!(body, r#"{"error":"Invalid input"}"#);
    }

    #[tokio::test]
    async fn backend_failure_is_server_error() {
        let resp = Err::<(), _>(anyhow!("connection refused by 10.0.0.7:5432"))
            .error(ErrorKind::DbConnAcquisitionFailed)
            .unwrap_err()
            .into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = resp.into_body().data().await.unwrap().expect("Failed to get body");
        let body: serde_json::Value = serde_json::from_slice(&body).expect("Body is not JSON");
        assert_eq!(body["title"], "Database connection acquisition failed");
        assert_eq!(body["detail"], "Database connection acquisition failed");
        assert!(!body.to_string().contains("10.0.0.7"));
    }
}
