use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use ureq::http::{Response, StatusCode};

use crate::error::{Error, Result};
use crate::types::ApiErrorBody;

/// Blocking HTTP transport for the Arrakis REST API. Owns the connection
/// pool and base URL. Clone shares the underlying agent.
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    agent: ureq::Agent,
    base_url: String,
}

impl Transport {
    /// `base_url` is the server root (e.g. `http://localhost:7000`); a
    /// trailing slash is tolerated.
    pub(crate) fn new(base_url: &str) -> Self {
        // Non-2xx statuses are mapped by hand so the error body stays
        // readable (the server puts its message there).
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!(method = "GET", %url, "request");
        let resp = self.agent.get(&url).call().map_err(transport_error)?;
        let body = read_body(resp)?;
        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let text = self.post_raw(path, body)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// POST where the caller only cares about success, not the body.
    pub(crate) fn post_ok<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        self.post_raw(path, body).map(|_| ())
    }

    pub(crate) fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        debug!(method = "DELETE", %url, "request");
        let resp = self.agent.delete(&url).call().map_err(transport_error)?;
        read_body(resp).map(|_| ())
    }

    fn post_raw<B: Serialize>(&self, path: &str, body: &B) -> Result<String> {
        let url = self.url(path);
        debug!(method = "POST", %url, "request");
        let resp = self
            .agent
            .post(&url)
            .send_json(body)
            .map_err(transport_error)?;
        read_body(resp)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// With `http_status_as_error(false)`, any error out of the agent is a
/// transport-level failure (connect, DNS, TLS, timeout, truncated body).
fn transport_error(e: ureq::Error) -> Error {
    Error::Unavailable(e.to_string())
}

/// Read the full body, then split on status: 2xx yields the body text,
/// anything else becomes [`Error::Api`] carrying the server's message.
fn read_body(mut resp: Response<ureq::Body>) -> Result<String> {
    let status = resp.status();
    let body = resp
        .body_mut()
        .read_to_string()
        .map_err(transport_error)?;

    if status.is_success() {
        return Ok(body);
    }
    Err(api_error(status, body))
}

fn api_error(status: StatusCode, body: String) -> Error {
    let message = match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(parsed) => parsed.error.message,
        // Not the documented error shape; fall back to the raw body, or the
        // status line when the server sent nothing at all.
        Err(_) if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
        Err(_) => body,
    };

    Error::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let t = Transport::new("http://localhost:7000/");
        assert_eq!(t.base_url(), "http://localhost:7000");
        assert_eq!(t.url("/v1/vms"), "http://localhost:7000/v1/vms");
    }

    #[test]
    fn api_error_uses_server_message() {
        let err = api_error(
            StatusCode::CONFLICT,
            r#"{"error": {"message": "vm already exists"}}"#.to_string(),
        );
        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message, "vm already exists");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn api_error_falls_back_to_raw_body() {
        let err = api_error(StatusCode::BAD_GATEWAY, "upstream exploded".to_string());
        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream exploded");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn api_error_empty_body_uses_status_line() {
        let err = api_error(StatusCode::NOT_FOUND, String::new());
        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not Found");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
