// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Login and refresh wire types, plus the raw refresh call.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::gateway::request::REFRESH_PATH;

/// Body of `POST /autenticacao/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Body of `PUT /autenticacao/refresh`.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// Token response shared by login and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Access token lifetime in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    /// Refresh token lifetime in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_expires_in: Option<u64>,
}

/// Exchange `refresh_token` for a new pair. One attempt, no retries, and no
/// bearer header: the refresh endpoint is public.
pub async fn do_refresh(
    client: &reqwest::Client,
    base_url: &str,
    refresh_token: &str,
) -> Result<TokenResponse, ApiError> {
    let resp = client
        .put(format!("{base_url}{REFRESH_PATH}"))
        .json(&RefreshRequest { refresh_token })
        .send()
        .await?;

    let status = resp.status();
    let body = resp.bytes().await?;
    if !status.is_success() {
        return Err(ApiError::from_response(status.as_u16(), &body));
    }

    let token: TokenResponse = serde_json::from_slice(&body)?;
    Ok(token)
}
