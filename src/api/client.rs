//! Request plumbing shared by every endpoint: auth header, status mapping
//! and typed decoding.

use log::{debug, error, warn};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::InventoryApi;
use crate::error::{ApiError, ApiResult};

/// Error body the backend sends with non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Turn a failed response into `ApiError::Backend`, keeping the backend's
/// own message when it sent one.
pub(crate) async fn backend_error(response: Response, fallback: &str) -> ApiError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.error.or(body.message))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());
    error!("Request failed with status {status}: {text}");
    ApiError::Backend { status, message }
}

pub(crate) async fn decode<T: DeserializeOwned>(
    response: Response,
    context: &'static str,
) -> ApiResult<T> {
    let text = response.text().await?;
    debug!("{context} response body: {text}");
    serde_json::from_str(&text).map_err(|source| {
        warn!("Failed to decode {context} response: {source}");
        ApiError::Decode { context, source }
    })
}

impl InventoryApi {
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn bearer_token(&self) -> ApiResult<String> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.token.clone())
            .ok_or(ApiError::NotAuthenticated)
    }

    /// Send an authenticated request and map the status code.
    ///
    /// `fallback` is the message used when a failed response has no
    /// readable error body.
    pub(crate) async fn send(&self, request: RequestBuilder, fallback: &str) -> ApiResult<Response> {
        let token = self.bearer_token().await?;
        let response = request.bearer_auth(token).send().await?;
        let status = response.status();
        debug!("Response status: {status}");

        if status == StatusCode::UNAUTHORIZED {
            warn!("Backend rejected the token, dropping session");
            self.session.write().await.take();
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            return Err(backend_error(response, fallback).await);
        }
        Ok(response)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        context: &'static str,
    ) -> ApiResult<T> {
        let url = self.url(path);
        debug!("GET {url}");
        let response = self
            .send(self.client.get(&url), &format!("Failed to load {context}"))
            .await?;
        decode(response, context).await
    }

    /// Request whose response body is not needed (the views refetch after
    /// every change)
    pub(crate) async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        fallback: &str,
    ) -> ApiResult<()> {
        let url = self.url(path);
        debug!("{method} {url}");
        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.send(request, fallback).await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str, fallback: &str) -> ApiResult<()> {
        self.execute::<()>(Method::DELETE, path, None, fallback).await
    }

    /// Checks that the backend is reachable and the session is accepted
    pub async fn test_connection(&self) -> ApiResult<bool> {
        match self.get_json::<serde_json::Value>("/api/motivos", "reasons").await {
            Ok(_) => Ok(true),
            Err(ApiError::Network(e)) => {
                warn!("Backend not reachable: {e}");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}
