// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Authenticated request gateway.
//!
//! Every backend call goes through [`Gateway::send`]. Protected requests carry
//! the stored access token as a bearer header. A 401 on a protected request
//! triggers one refresh-and-retry; refreshes are single-flight, so callers
//! that fail while one is running wait for it instead of starting their own.
//! When recovery is impossible the session ends: tokens are cleared and the
//! [`LoginRedirect`] fires before the error reaches the caller.

pub mod auth;
pub mod request;
pub mod single_flight;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::gateway::auth::{LoginRequest, TokenResponse};
use crate::gateway::request::{RequestBody, LOGIN_PATH};
use crate::gateway::single_flight::SingleFlight;
use crate::token::{TokenPair, TokenStore};

pub use self::request::{ApiRequest, ApiResponse, FilePart, Method, Outbound};

/// The login boundary. Invoked once per terminal auth failure, after the
/// token store has been cleared.
pub trait LoginRedirect: Send + Sync {
    fn redirect_to_login(&self);
}

impl<F> LoginRedirect for F
where
    F: Fn() + Send + Sync,
{
    fn redirect_to_login(&self) {
        self()
    }
}

/// Authenticated HTTP client for the pet manager backend.
pub struct Gateway {
    http: reqwest::Client,
    base_url: String,
    store: Arc<TokenStore>,
    redirect: Arc<dyn LoginRedirect>,
    refresh: SingleFlight,
}

impl Gateway {
    pub fn new(
        config: &ClientConfig,
        store: Arc<TokenStore>,
        redirect: Arc<dyn LoginRedirect>,
    ) -> anyhow::Result<Arc<Self>> {
        crate::ensure_crypto_provider();
        let http = reqwest::Client::builder().timeout(config.request_timeout()).build()?;
        Ok(Arc::new(Self {
            http,
            base_url: config.api_base().to_owned(),
            store,
            redirect,
            refresh: SingleFlight::new(),
        }))
    }

    pub fn store(&self) -> &Arc<TokenStore> {
        &self.store
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a refresh call is currently outstanding.
    pub fn is_refreshing(&self) -> bool {
        self.refresh.in_flight()
    }

    /// Send a request, recovering transparently from one expired access token.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut outbound = Outbound::new(request);
        let mut token = if outbound.is_public() { None } else { self.store.access_token() };

        loop {
            let err = match self.dispatch(&outbound.request, token.as_deref()).await {
                Ok(resp) => return Ok(resp),
                Err(e) => e,
            };

            if !err.is_unauthorized() || outbound.is_public() {
                return Err(err);
            }
            if outbound.is_retried() {
                warn!(path = %outbound.request.path, "rejected again after refresh");
                self.end_session();
                return Err(err);
            }
            outbound.mark_retried();
            token = match self.fresh_token(token.as_deref()).await? {
                Some(fresh) => Some(fresh),
                None => return Err(err),
            };
        }
    }

    /// Send a request and decode its JSON body.
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        self.send(request).await?.json()
    }

    /// Exchange credentials for a token pair and store it.
    ///
    /// The login endpoint is public: a 401 here is returned as-is and never
    /// triggers a refresh or a redirect.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, ApiError> {
        let body = serde_json::to_value(LoginRequest { username, password })?;
        let token: TokenResponse = self.send_json(ApiRequest::post(LOGIN_PATH).json(body)).await?;
        let refresh_token = token
            .refresh_token
            .ok_or_else(|| ApiError::Decode("login response has no refresh_token".to_owned()))?;

        self.store.save(&token.access_token, &refresh_token);
        info!(username, "logged in");
        Ok(TokenPair { access_token: token.access_token, refresh_token })
    }

    /// User-initiated logout: clear the tokens, no redirect.
    pub fn logout(&self) {
        self.store.clear();
        info!("logged out");
    }

    /// Obtain a new access token, sharing any refresh already in flight.
    ///
    /// On failure the session has already been ended (tokens cleared, login
    /// redirect fired) by whichever caller led the refresh.
    pub async fn refresh(&self) -> Result<String, ApiError> {
        self.refresh.run(|| self.lead_refresh()).await
    }

    async fn lead_refresh(&self) -> Result<String, ApiError> {
        match self.refresh_tokens().await {
            Ok(pair) => {
                self.store.save(&pair.access_token, &pair.refresh_token);
                info!("access token refreshed");
                Ok(pair.access_token)
            }
            Err(e) => {
                warn!(err = %e, "token refresh failed");
                self.end_session();
                Err(e)
            }
        }
    }

    async fn refresh_tokens(&self) -> Result<TokenPair, ApiError> {
        let refresh_token = self.store.refresh_token().ok_or(ApiError::MissingRefreshToken)?;
        let token = auth::do_refresh(&self.http, &self.base_url, &refresh_token).await?;
        Ok(TokenPair {
            access_token: token.access_token,
            // A response without a new refresh token keeps the current one.
            refresh_token: token.refresh_token.unwrap_or(refresh_token),
        })
    }

    /// Token to retry with after a 401 for a request sent with `sent_with`.
    ///
    /// If the stored token already differs, someone refreshed (or logged in)
    /// while this request was in flight and the stored token is used as-is.
    /// `None` means the session ended meanwhile and the 401 stands.
    async fn fresh_token(&self, sent_with: Option<&str>) -> Result<Option<String>, ApiError> {
        match (self.store.access_token(), sent_with) {
            (Some(current), _) if sent_with != Some(current.as_str()) => {
                debug!("access token changed while request was in flight");
                Ok(Some(current))
            }
            (None, Some(_)) => {
                debug!("session ended while request was in flight");
                Ok(None)
            }
            _ => self.refresh().await.map(Some),
        }
    }

    /// Terminal auth failure: clear tokens, then send the user to login.
    fn end_session(&self) {
        self.store.clear();
        self.redirect.redirect_to_login();
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        token: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut req = self.http.request(request.method.clone(), url);
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        req = match request.body {
            RequestBody::Empty => req,
            RequestBody::Json(ref body) => req.json(body),
            RequestBody::File(ref part) => req.multipart(part.to_form()?),
        };
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        if !status.is_success() {
            debug!(method = %request.method, path = %request.path, status = status.as_u16(), "request failed");
            return Err(ApiError::from_response(status.as_u16(), &body));
        }
        Ok(ApiResponse { status: status.as_u16(), body })
    }
}
