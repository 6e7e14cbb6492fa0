// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outbound request descriptors and responses.

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

pub use reqwest::Method;

/// Login endpoint (public).
pub const LOGIN_PATH: &str = "/autenticacao/login";
/// Refresh endpoint (public).
pub const REFRESH_PATH: &str = "/autenticacao/refresh";

/// Paths reachable without a bearer token. Matched by substring.
pub const PUBLIC_ENDPOINTS: &[&str] = &[LOGIN_PATH, REFRESH_PATH];

/// Whether `path` targets an unauthenticated endpoint.
pub fn is_public(path: &str) -> bool {
    PUBLIC_ENDPOINTS.iter().any(|ep| path.contains(ep))
}

/// A backend call: method, path relative to the base URL, query and body.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

/// Request payload.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    /// Single-file multipart upload.
    File(FilePart),
}

/// One file sent as a multipart form field.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl FilePart {
    /// Multipart forms are single-use, so one is built per attempt.
    pub(crate) fn to_form(&self) -> Result<Form, ApiError> {
        let mut part = Part::bytes(self.bytes.to_vec()).file_name(self.file_name.clone());
        if let Some(ref content_type) = self.content_type {
            part = part.mime_str(content_type)?;
        }
        Ok(Form::new().part(self.field.clone(), part))
    }
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: RequestBody::Empty }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_owned(), value.to_string()));
        self
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    pub fn file(mut self, part: FilePart) -> Self {
        self.body = RequestBody::File(part);
        self
    }

    pub fn is_public(&self) -> bool {
        is_public(&self.path)
    }
}

/// A request in flight through the gateway, with its refresh-retry count.
#[derive(Debug, Clone)]
pub struct Outbound {
    pub request: ApiRequest,
    attempts: u32,
}

impl Outbound {
    pub fn new(request: ApiRequest) -> Self {
        Self { request, attempts: 0 }
    }

    /// Number of refresh-and-retry rounds already spent on this request.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// True once the request has been retried after a refresh.
    pub fn is_retried(&self) -> bool {
        self.attempts > 0
    }

    pub fn mark_retried(&mut self) {
        self.attempts += 1;
    }

    pub fn is_public(&self) -> bool {
        self.request.is_public()
    }
}

/// Successful (2xx) response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Bytes,
}

impl ApiResponse {
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Decode the body as JSON. An empty body decodes as `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        if self.body.is_empty() {
            return Ok(serde_json::from_value(serde_json::Value::Null)?);
        }
        Ok(serde_json::from_slice(&self.body)?)
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
