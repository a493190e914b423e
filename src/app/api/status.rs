use crate::app::api::{json_response, AppResult};
use http::StatusCode;
use serde_derive::Serialize;

pub const PINGER: &str = "pinger";
pub const STUDY_BUDDY: &str = "study-buddy";

#[derive(Serialize)]
struct Status {
    status: &'static str,
    service: &'static str,
}

impl Status {
    fn ok(service: &'static str) -> Self {
        Self {
            status: "ok",
            service,
        }
    }
}

/// Liveness check of the pinger service.
pub async fn ping() -> AppResult {
    json_response(StatusCode::OK, &Status::ok(PINGER))
}

/// Liveness check of the study-buddy API. Does not touch the database.
pub async fn health() -> AppResult {
    json_response(StatusCode::OK, &Status::ok(STUDY_BUDDY))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::HttpBody;

    #[tokio::test]
    async fn ping_test() {
        let resp = ping().await.expect("Failed to ping");
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["content-type"], "application/json");

        let body = resp.into_body().data().await.unwrap().expect("Failed to get body");
        assert_eq!(body, r#"{"status":"ok","service":"pinger"}"#);
    }

    #[tokio::test]
    async fn health_test() {
        let resp = health().await.expect("Failed to check health");
        assert_eq!(resp.status(), 200);

        let body = resp.into_body().data().await.unwrap().expect("Failed to get body");
        assert_eq!(body, r#"{"status":"ok","service":"study-buddy"}"#);
    }
}
