use thiserror::Error;

/// Failures of a round-trip with the document service, or of preparing one.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service answered with a non-2xx status.
    #[error("service responded with status {status}")]
    Status { status: u16, message: Option<String> },

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx body that did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("signature encoding failed: {0}")]
    Encode(String),
}

impl ClientError {
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        ClientError::Status {
            status,
            message: server_message(body),
        }
    }

    /// Message supplied by the service in an `{"error": ...}` body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// What the error display shows: the server's message, else `fallback`.
    /// Transport and decode failures are deliberately not distinguished here.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

fn server_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("error")
        .and_then(|e| e.as_str())
        .filter(|m| !m.is_empty())
        .map(|m| m.to_string())
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid service base url `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}
