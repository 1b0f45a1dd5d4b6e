//! Login, registration and logout.

use log::{info, warn};
use reqwest::StatusCode;
use serde::Serialize;

use super::client::backend_error;
use super::InventoryApi;
use crate::error::{ApiError, ApiResult};
use crate::forms::validate_registration;
use crate::models::{LoginResponse, NewUser, Role};
use crate::session::Session;

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

impl InventoryApi {
    /// Log in and keep the returned session on this client
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<Session> {
        let url = self.url("/api/auth/login");
        info!("Logging in as {username}");

        let response = self
            .client
            .post(&url)
            .json(&Credentials { username, password })
            .send()
            .await?;

        let status = response.status();
        if matches!(
            status,
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            warn!("Login refused for {username} (status: {status})");
            return Err(ApiError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(backend_error(response, "Login failed").await);
        }

        let body: LoginResponse = super::client::decode(response, "login").await?;
        let session = Session {
            token: body.token,
            role: body.role,
        };
        self.set_session(Some(session.clone())).await;
        info!("Logged in as {username} ({})", session.role);
        Ok(session)
    }

    /// Create an account after the usual form checks. Requires an admin
    /// session; the backend enforces that.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        confirmation: &str,
        role: Role,
    ) -> ApiResult<()> {
        validate_registration(username, password, confirmation)?;
        self.create_user(&NewUser {
            username: username.to_string(),
            password: password.to_string(),
            role,
        })
        .await
    }

    pub async fn logout(&self) {
        self.set_session(None).await;
        info!("Logged out");
    }
}
