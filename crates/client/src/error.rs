// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors surfaced by the gateway and the typed API.
///
/// Cloneable so one refresh failure can be handed to every queued waiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered with a non-success status.
    Status { status: u16, message: Option<String> },
    /// The request never produced a response (connect failure, timeout).
    Transport(String),
    /// A response body could not be decoded.
    Decode(String),
    /// A refresh was requested but no refresh token is stored.
    MissingRefreshToken,
    /// The in-flight refresh was dropped before it settled.
    RefreshAbandoned,
}

impl ApiError {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Status { .. } => "HTTP_STATUS",
            Self::Transport(_) => "TRANSPORT",
            Self::Decode(_) => "DECODE",
            Self::MissingRefreshToken => "MISSING_REFRESH_TOKEN",
            Self::RefreshAbandoned => "REFRESH_ABANDONED",
        }
    }

    /// HTTP status carried by the error, if the server responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Server-provided message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Build a status error from a response body, picking up the server's
    /// `message` (or `error`) field when the body is a JSON error envelope.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ErrorPayload>(body)
            .ok()
            .and_then(|p| p.message.or(p.error))
            .filter(|m| !m.is_empty());
        Self::Status { status, message }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status { status, message: Some(msg) } => write!(f, "HTTP {status}: {msg}"),
            Self::Status { status, message: None } => write!(f, "HTTP {status}"),
            Self::Transport(e) => write!(f, "request failed: {e}"),
            Self::Decode(e) => write!(f, "invalid response: {e}"),
            Self::MissingRefreshToken => f.write_str("no refresh token stored"),
            Self::RefreshAbandoned => f.write_str("token refresh abandoned"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

/// Error envelope returned by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
