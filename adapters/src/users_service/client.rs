use std::time::Duration;

use async_trait::async_trait;
use common::logger::warn_if_slow;
use corelib::{ApiMessage, Credentials, NewUser, RefreshRequest, Registration, TokenPair, User};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::{ApiError, AuthApi, HealthApi, UsersApi};

const SLOW_REQUEST: Duration = Duration::from_secs(1);

/// reqwest-backed client for the users service.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct UsersServiceClient {
    http: Client,
    base_url: String,
}

impl UsersServiceClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request and turns non-2xx answers into `ApiError::Status`.
    async fn send(&self, label: &'static str, req: RequestBuilder) -> Result<Response, ApiError> {
        let resp = warn_if_slow(label, SLOW_REQUEST, req.send()).await?;

        let status = resp.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "users service answered");
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ApiMessage>(&body) {
            Ok(envelope) => envelope.message,
            Err(_) => body,
        };

        debug!(status = status.as_u16(), %message, "users service rejected request");

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl AuthApi for UsersServiceClient {
    #[instrument(skip_all, fields(path = "/auth/register", email = %registration.email), level = "debug")]
    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        let req = self.http.post(self.url("/auth/register")).json(registration);
        self.send("auth_register", req).await?;
        Ok(())
    }

    #[instrument(skip_all, fields(path = "/auth/login", email = %credentials.email), level = "debug")]
    async fn login(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        let req = self.http.post(self.url("/auth/login")).json(credentials);
        let resp = self.send("auth_login", req).await?;
        Self::decode(resp).await
    }

    #[instrument(skip_all, fields(path = "/auth/refresh"), level = "debug")]
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError> {
        let body = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };
        let req = self.http.post(self.url("/auth/refresh")).json(&body);
        let resp = self.send("auth_refresh", req).await?;
        Self::decode(resp).await
    }
}

#[async_trait]
impl UsersApi for UsersServiceClient {
    #[instrument(skip_all, fields(path = "/users"), level = "debug")]
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let resp = self.send("users_list", self.http.get(self.url("/users"))).await?;
        let users: Vec<User> = Self::decode(resp).await?;

        debug!(count = users.len(), "users fetched");
        Ok(users)
    }

    #[instrument(skip_all, fields(path = "/users", email = %user.email), level = "debug")]
    async fn add_user(&self, user: &NewUser) -> Result<Option<User>, ApiError> {
        let req = self.http.post(self.url("/users")).json(user);
        let resp = self.send("users_add", req).await?;
        let bytes = resp.bytes().await?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        if let Ok(created) = serde_json::from_slice::<User>(&bytes) {
            return Ok(Some(created));
        }

        // Message-only success, e.g. {"message": "<email> was added!"}, or
        // any other 2xx body: the user exists either way.
        match serde_json::from_slice::<ApiMessage>(&bytes) {
            Ok(envelope) => debug!(message = %envelope.message, "user added"),
            Err(_) => debug!(
                body = %String::from_utf8_lossy(&bytes),
                "user added; unrecognised response body ignored"
            ),
        }
        Ok(None)
    }
}

#[async_trait]
impl HealthApi for UsersServiceClient {
    #[instrument(skip_all, fields(path = "/ping"), level = "debug")]
    async fn ping(&self) -> Result<ApiMessage, ApiError> {
        let resp = self.send("ping", self.http.get(self.url("/ping"))).await?;
        Self::decode(resp).await
    }
}
