//! HTTP client for the Event API, used by the calendar view.

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::controllers::events::{EventsResponse, MessageResponse};
use crate::error::ErrorResponse;
use crate::models::{Category, Event, EventPayload};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered {status}: {message}")]
    Status { status: StatusCode, message: String },
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Transport(e) => e.status(),
            ApiError::Status { status, .. } => Some(*status),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, serde::Deserialize)]
struct CategoriesBody {
    categories: Vec<Category>,
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn list_events(&self) -> ApiResult<Vec<Event>> {
        let response = self.http.get(self.url("/events")).send().await?;
        let body: EventsResponse = decode(response).await?;
        debug!("Received {} events", body.events.len());
        Ok(body.events)
    }

    pub async fn create_event(&self, payload: &EventPayload) -> ApiResult<Event> {
        let response = self
            .http
            .post(self.url("/events"))
            .json(payload)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn update_event(&self, id: i64, payload: &EventPayload) -> ApiResult<Event> {
        let response = self
            .http
            .put(self.url(&format!("/events/{id}")))
            .json(payload)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn delete_event(&self, id: i64) -> ApiResult<String> {
        let response = self
            .http
            .delete(self.url(&format!("/events/{id}")))
            .send()
            .await?;
        let body: MessageResponse = decode(response).await?;
        Ok(body.message)
    }

    pub async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        let response = self.http.get(self.url("/categories")).send().await?;
        let body: CategoriesBody = decode(response).await?;
        Ok(body.categories)
    }
}

/// Turns non-2xx answers into [`ApiError::Status`], taking the message from
/// the `{error}` body when there is one.
async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|body| body.error)
        .unwrap_or(text);
    Err(ApiError::Status { status, message })
}
