//! Minimal PocketBase REST client
//!
//! All persistence, authentication, and querying is delegated to a hosted
//! PocketBase instance; this module is the only place that talks HTTP.
//! Lookups that find nothing return `Ok(None)` rather than an error.

use crate::models::AuthUser;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

/// Page size for full-list fetches
const LIST_PAGE_SIZE: usize = 200;

/// ---------------------------------------------------------------------------
/// Configuration
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct PbConfig {
  pub base_url: String,
}

impl PbConfig {
  pub fn from_env() -> Result<Self, PbError> {
    dotenvy::dotenv().ok();

    let base_url = env::var("POCKETBASE_URL")
      .map_err(|_| PbError::MissingConfig("POCKETBASE_URL".into()))?;

    Url::parse(&base_url)
      .map_err(|e| PbError::MissingConfig(format!("POCKETBASE_URL is not a valid URL: {}", e)))?;

    Ok(Self { base_url })
  }
}

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PbError {
  #[error("Missing configuration: {0}")]
  MissingConfig(String),

  #[error("HTTP request failed: {0}")]
  Request(String),

  #[error("PocketBase error {status}: {message}")]
  Api { status: u16, message: String },
}

impl From<reqwest::Error> for PbError {
  fn from(e: reqwest::Error) -> Self {
    PbError::Request(e.to_string())
  }
}

impl Serialize for PbError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// Best available message for a failed store call: the structured `message`
/// field if the body is JSON, else the raw body, else the status, else
/// "unknown error".
pub(crate) fn extract_error_message(status: Option<u16>, body: &str) -> String {
  if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
    if let Some(message) = json.get("message").and_then(|m| m.as_str()) {
      if !message.is_empty() {
        return message.to_string();
      }
    }
  }

  let trimmed = body.trim();
  if !trimmed.is_empty() {
    return trimmed.to_string();
  }

  match status {
    Some(status) => format!("request failed with status {}", status),
    None => "unknown error".to_string(),
  }
}

async fn ensure_success(
  response: reqwest::Response,
  context: &str,
) -> Result<reqwest::Response, PbError> {
  let status = response.status();
  if status.is_success() {
    return Ok(response);
  }

  let body = response.text().await.unwrap_or_default();
  eprintln!("PocketBase {} failed with {}: {}", context, status, body);

  Err(PbError::Api {
    status: status.as_u16(),
    message: extract_error_message(Some(status.as_u16()), &body),
  })
}

/// ---------------------------------------------------------------------------
/// Response Shapes
/// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ListResult<T> {
  #[serde(default)]
  pub page: i64,
  #[serde(rename = "perPage", default)]
  pub per_page: i64,
  #[serde(rename = "totalItems", default)]
  pub total_items: i64,
  pub items: Vec<T>,
}

/// Response from the password auth endpoint
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
  pub token: String,
  pub record: AuthUser,
}

/// ---------------------------------------------------------------------------
/// Client
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct PbClient {
  base_url: String,
  token: Option<String>,
  http: Client,
}

impl PbClient {
  pub fn new(base_url: impl Into<String>) -> Self {
    let base_url = base_url.into();
    Self {
      base_url: base_url.trim_end_matches('/').to_string(),
      token: None,
      http: Client::new(),
    }
  }

  pub fn from_config(config: &PbConfig) -> Self {
    Self::new(config.base_url.clone())
  }

  pub fn set_token(&mut self, token: impl Into<String>) {
    self.token = Some(token.into());
  }

  pub fn clear_token(&mut self) {
    self.token = None;
  }

  pub fn token(&self) -> Option<&str> {
    self.token.as_deref()
  }

  fn request(&self, method: Method, path: &str) -> RequestBuilder {
    let mut builder = self.http.request(method, format!("{}{}", self.base_url, path));
    if let Some(token) = &self.token {
      builder = builder.header("Authorization", token);
    }
    builder
  }

  fn records_path(collection: &str) -> String {
    format!("/api/collections/{}/records", collection)
  }

  /// Find the single record matching `filter`, or `None` if there is none.
  pub async fn first_matching<T: DeserializeOwned>(
    &self,
    collection: &str,
    filter: &str,
  ) -> Result<Option<T>, PbError> {
    let response = self
      .request(Method::GET, &Self::records_path(collection))
      .query(&[("filter", filter), ("perPage", "1"), ("skipTotal", "1")])
      .send()
      .await?;

    let response = ensure_success(response, collection).await?;
    let list: ListResult<T> = response.json().await?;
    Ok(list.items.into_iter().next())
  }

  /// Fetch every record matching `filter`, following pagination.
  pub async fn full_list<T: DeserializeOwned>(
    &self,
    collection: &str,
    filter: &str,
  ) -> Result<Vec<T>, PbError> {
    let mut items = Vec::new();
    let mut page = 1usize;

    loop {
      let response = self
        .request(Method::GET, &Self::records_path(collection))
        .query(&[
          ("filter", filter.to_string()),
          ("page", page.to_string()),
          ("perPage", LIST_PAGE_SIZE.to_string()),
          ("skipTotal", "1".to_string()),
        ])
        .send()
        .await?;

      let response = ensure_success(response, collection).await?;
      let mut list: ListResult<T> = response.json().await?;
      let fetched = list.items.len();
      items.append(&mut list.items);

      if fetched < LIST_PAGE_SIZE {
        return Ok(items);
      }
      page += 1;
    }
  }

  pub async fn create<T, B>(&self, collection: &str, body: &B) -> Result<T, PbError>
  where
    T: DeserializeOwned,
    B: Serialize,
  {
    let response = self
      .request(Method::POST, &Self::records_path(collection))
      .json(body)
      .send()
      .await?;

    let response = ensure_success(response, collection).await?;
    Ok(response.json().await?)
  }

  pub async fn update<T, B>(&self, collection: &str, id: &str, body: &B) -> Result<T, PbError>
  where
    T: DeserializeOwned,
    B: Serialize,
  {
    let path = format!("{}/{}", Self::records_path(collection), id);
    let response = self.request(Method::PATCH, &path).json(body).send().await?;

    let response = ensure_success(response, collection).await?;
    Ok(response.json().await?)
  }

  /// Authenticate against an auth collection; the returned token is kept on
  /// the client for subsequent requests.
  pub async fn auth_with_password(
    &mut self,
    collection: &str,
    identity: &str,
    password: &str,
  ) -> Result<AuthResponse, PbError> {
    let path = format!("/api/collections/{}/auth-with-password", collection);
    let response = self
      .request(Method::POST, &path)
      .json(&serde_json::json!({ "identity": identity, "password": password }))
      .send()
      .await?;

    let response = ensure_success(response, "auth-with-password").await?;
    let auth: AuthResponse = response.json().await?;
    self.token = Some(auth.token.clone());
    Ok(auth)
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
