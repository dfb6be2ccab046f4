use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// Path of the REST API below the configured PNC URL
const API_PATH: &str = "/pnc-rest/v2";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Error, Debug, Clone)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    RequestError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: Please check your authentication credentials")]
    Unauthorized,

    #[error("Server timeout - please retry")]
    Timeout,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::RequestError(e.to_string())
        }
    }
}

/// HTTP client for the PNC REST API, optionally carrying a bearer token
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();

        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url,
            token,
        }
    }

    /// Build the full API URL
    pub fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PATH, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(t) => request.bearer_auth(t),
            None => request,
        }
    }

    /// Perform a GET request and decode the JSON body
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("GET {url}");
        let response = self.authorize(self.client.get(&url)).send().await?;
        decode(&self.handle_response(response).await?)
    }

    /// Perform a GET request with query parameters and decode the JSON body
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(path);
        debug!("GET {url}");
        let request = self.client.get(&url).query(query);
        let response = self.authorize(request).send().await?;
        decode(&self.handle_response(response).await?)
    }

    /// Perform a POST request with a JSON body and decode the JSON response
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("POST {url}");
        let request = self.client.post(&url).json(body);
        let response = self.authorize(request).send().await?;
        decode(&self.handle_response(response).await?)
    }

    /// Perform a PUT request with a JSON body, ignoring the response body
    pub async fn put<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        debug!("PUT {url}");
        let request = self.client.put(&url).json(body);
        let response = self.authorize(request).send().await?;
        self.handle_response(response).await?;
        Ok(())
    }

    async fn handle_response(&self, response: reqwest::Response) -> Result<String, ApiError> {
        let status = response.status();

        if status.is_success() {
            Ok(response.text().await?)
        } else if status == StatusCode::NOT_FOUND {
            Err(ApiError::NotFound(response.url().path().to_string()))
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Err(ApiError::Unauthorized)
        } else if status == StatusCode::GATEWAY_TIMEOUT || status == StatusCode::REQUEST_TIMEOUT {
            Err(ApiError::Timeout)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::ServerError(format!("HTTP {}: {}", status, body)))
        }
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}
