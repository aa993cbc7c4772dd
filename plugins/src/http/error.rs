use reqwest::{Method, StatusCode};
use thiserror::Error;

const BODY_PREVIEW_LIMIT: usize = 512;

/// Failure of a configuration API call, tied to the method and endpoint path
/// that produced it. Travels inside `anyhow::Error`; recover it with
/// `downcast_ref`.
#[derive(Error, Debug)]
pub enum ApiHttpError {
    #[error("{method} {endpoint}: request not completed: {source}")]
    Transport {
        method: Method,
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {endpoint}: server answered {status}: {body}")]
    Status {
        method: Method,
        endpoint: String,
        status: StatusCode,
        body: String,
    },

    #[error("{method} {endpoint}: response is not the expected JSON: {source} (body: {body})")]
    Decode {
        method: Method,
        endpoint: String,
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiHttpError {
    pub(crate) fn transport(method: Method, url: &str, source: reqwest::Error) -> Self {
        Self::Transport {
            method,
            endpoint: endpoint_of(url),
            source,
        }
    }

    pub(crate) fn status(method: Method, url: &str, status: StatusCode, body: &str) -> Self {
        Self::Status {
            method,
            endpoint: endpoint_of(url),
            status,
            body: preview_body(body),
        }
    }

    pub(crate) fn decode(method: Method, url: &str, body: &str, source: serde_json::Error) -> Self {
        Self::Decode {
            method,
            endpoint: endpoint_of(url),
            body: preview_body(body),
            source,
        }
    }

    /// HTTP status of a rejected call; `None` for transport and decode failures.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn endpoint(&self) -> &str {
        match self {
            Self::Transport { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::Decode { endpoint, .. } => endpoint,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { source, .. } if source.is_timeout())
    }
}

/// Path of `url` without host or query, e.g. `/api/v1/.../configuration`.
fn endpoint_of(url: &str) -> String {
    reqwest::Url::parse(url)
        .map(|parsed| parsed.path().to_string())
        .unwrap_or_else(|_| url.to_string())
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out: String = trimmed.chars().take(BODY_PREVIEW_LIMIT).collect();
    if trimmed.chars().nth(BODY_PREVIEW_LIMIT).is_some() {
        out.push_str("...");
    }
    out
}
