//! HTTP client forwarding gateway requests to the ShareIt server

use std::time::Duration;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method},
    response::{IntoResponse, Response},
};
use reqwest::{Client, RequestBuilder};

use crate::{api::SHARER_USER_ID, config::GatewayConfig, error::AppResult};

#[derive(Clone)]
pub struct ShareItClient {
    client: Client,
    base_url: String,
}

impl ShareItClient {
    pub fn new(config: &GatewayConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.server_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a request to `path` on the server, carrying the acting user when known
    pub fn request(&self, method: Method, path: &str, user_id: Option<i64>) -> RequestBuilder {
        let builder = self.client.request(method, format!("{}{}", self.base_url, path));
        match user_id {
            Some(id) => builder.header(SHARER_USER_ID, id),
            None => builder,
        }
    }

    /// Send the request and hand the server's status and body back unchanged
    pub async fn relay(&self, request: RequestBuilder) -> AppResult<Response> {
        let upstream = request.send().await?;
        let status = upstream.status();
        let content_type = upstream.headers().get(CONTENT_TYPE).cloned();
        tracing::debug!("{} -> {}", upstream.url().path(), status);

        let bytes = upstream.bytes().await?;
        let mut response = Body::from(bytes).into_response();
        *response.status_mut() = status;
        if let Some(content_type) = content_type {
            response.headers_mut().insert(CONTENT_TYPE, content_type);
        }
        Ok(response)
    }

    pub async fn get(&self, path: &str, user_id: Option<i64>) -> AppResult<Response> {
        self.relay(self.request(Method::GET, path, user_id)).await
    }

    pub async fn delete(&self, path: &str, user_id: Option<i64>) -> AppResult<Response> {
        self.relay(self.request(Method::DELETE, path, user_id)).await
    }
}
