//! Async HTTP client wrapping the roster JSON API.

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Response};
use roster_core::person::{NewPerson, Person};
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

/// Connection settings for the roster API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the roster JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

/// Error body returned by every failing endpoint.
#[derive(Deserialize)]
struct ErrorBody {
  message: String,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(10))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  pub fn base_url(&self) -> &str { &self.config.base_url }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  /// `GET /api/people`
  pub async fn list_people(&self) -> Result<Vec<Person>> {
    let resp = self
      .client
      .get(self.url("/people"))
      .send()
      .await
      .context("GET /people failed")?;

    if !resp.status().is_success() {
      return Err(failure("GET /people", resp).await);
    }
    resp.json().await.context("deserialising people")
  }

  /// `POST /api/people`
  pub async fn create_person(&self, person: &NewPerson) -> Result<Person> {
    let resp = self
      .client
      .post(self.url("/people"))
      .json(person)
      .send()
      .await
      .context("POST /people failed")?;

    if !resp.status().is_success() {
      return Err(failure("POST /people", resp).await);
    }
    resp.json().await.context("deserialising created person")
  }

  /// `DELETE /api/people/{id}`
  pub async fn delete_person(&self, id: Uuid) -> Result<()> {
    let resp = self
      .client
      .delete(self.url(&format!("/people/{id}")))
      .send()
      .await
      .context("DELETE /people failed")?;

    if !resp.status().is_success() {
      return Err(failure("DELETE /people", resp).await);
    }
    Ok(())
  }
}

/// Turn a non-2xx response into an error, preferring the server's message.
async fn failure(what: &str, resp: Response) -> anyhow::Error {
  let status = resp.status();
  match resp.json::<ErrorBody>().await {
    Ok(body) => anyhow!("{what} → {status}: {}", body.message),
    Err(_) => anyhow!("{what} → {status}"),
  }
}
