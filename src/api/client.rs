//! HTTP client for the REST API under test
//!
//! Wraps `reqwest` so every call carries the API key header and is logged
//! the same way: method and URL, request body, status, response body.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde_json::Value;

use crate::common::{ApiConfig, Error, Result};

/// Header the API reads its key from
const API_KEY_HEADER: &str = "x-api-key";

/// A received response, fully buffered
#[derive(Debug)]
pub struct ApiResponse {
    pub method: Method,
    pub url: String,
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    /// Parse the body as JSON
    pub fn json(&self) -> Result<Value> {
        serde_json::from_str(&self.body).map_err(|e| {
            Error::assertion(format!(
                "{} {} returned a non-JSON body ({}): {:?}",
                self.method, self.url, e, self.body
            ))
        })
    }
}

/// Client bound to one base URL and API key
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.send(Method::GET, path, &[], None).await
    }

    pub async fn get_with_query(&self, path: &str, query: &[(&str, String)]) -> Result<ApiResponse> {
        self.send(Method::GET, path, query, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        self.send(Method::POST, path, &[], Some(body)).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        self.send(Method::PUT, path, &[], Some(body)).await
    }

    pub async fn patch(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        self.send(Method::PATCH, path, &[], Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.send(Method::DELETE, path, &[], None).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<ApiResponse> {
        let mut url = reqwest::Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| Error::Config(format!("Invalid API URL '{}{}': {}", self.base_url, path, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        tracing::info!("{} {}", method, url);
        if let Some(body) = body {
            tracing::debug!("Request body: {}", pretty(body));
        }

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(API_KEY_HEADER, &self.api_key);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        tracing::info!("Status code: {}", status.as_u16());
        match serde_json::from_str::<Value>(&text) {
            Ok(json) => tracing::debug!("Response body: {}", pretty(&json)),
            Err(_) => tracing::debug!("Response body: {:?}", text),
        }

        Ok(ApiResponse {
            method,
            url: url.to_string(),
            status,
            body: text,
        })
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
