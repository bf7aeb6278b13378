//! HTTP implementation of the review store.

use std::time::Duration;

use async_trait::async_trait;
use http::StatusCode;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use url::Url;

use super::{NewReview, Review, ReviewStore};
use crate::error::CatalogError;
use crate::listing::ListingQuery;

const DEFAULT_REVIEWS_PATH: &str = "product/{product_id}/reviews";
const ERROR_BODY_LIMIT: usize = 160;

/// Configuration for [`HttpReviewStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReviewStoreConfig {
    /// Base URL every endpoint is resolved against.
    pub base_url: Url,
    /// HTTP timeout applied to every request.
    pub timeout: Duration,
    /// Path of the review listing endpoint; `{product_id}` is substituted.
    pub reviews_path: String,
}

impl HttpReviewStoreConfig {
    /// Creates configuration for a store rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidUrl`] when `base_url` does not parse or
    /// cannot serve as a base.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let mut normalised = base_url.trim().to_owned();
        if !normalised.ends_with('/') {
            normalised.push('/');
        }
        let parsed = Url::parse(&normalised)
            .map_err(|error| CatalogError::InvalidUrl(format!("{base_url}: {error}")))?;
        if parsed.cannot_be_a_base() {
            return Err(CatalogError::InvalidUrl(format!(
                "{base_url}: URL cannot be used as a base"
            )));
        }
        Ok(Self {
            base_url: parsed,
            timeout,
            reviews_path: DEFAULT_REVIEWS_PATH.to_owned(),
        })
    }

    /// Overrides the review listing path.
    #[must_use]
    pub fn with_reviews_path(mut self, path: impl Into<String>) -> Self {
        self.reviews_path = path.into();
        self
    }
}

/// Review store backed by the catalog's JSON endpoints.
#[derive(Debug, Clone)]
pub struct HttpReviewStore {
    client: Client,
    config: HttpReviewStoreConfig,
}

impl HttpReviewStore {
    /// Creates a store with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Configuration`] when the HTTP client cannot be
    /// built.
    pub fn new(config: HttpReviewStoreConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| CatalogError::Configuration {
                message: format!("failed to configure HTTP client: {error}"),
            })?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> Result<Url, CatalogError> {
        self.config
            .base_url
            .join(path)
            .map_err(|error| CatalogError::InvalidUrl(format!("{path}: {error}")))
    }

    async fn send(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<Response, CatalogError> {
        let response = request
            .send()
            .await
            .map_err(|error| self.transport_error(operation, &error))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.map_or_else(
            |_| "(failed to read error response body)".to_owned(),
            |content| truncate_for_message(content.as_str(), ERROR_BODY_LIMIT),
        );
        Err(rejection(operation, status, body))
    }

    fn transport_error(&self, operation: &str, error: &reqwest::Error) -> CatalogError {
        if error.is_timeout() {
            CatalogError::Timeout {
                operation: operation.to_owned(),
                seconds: self.config.timeout.as_secs(),
            }
        } else {
            CatalogError::Network {
                message: format!("{operation} request failed: {error}"),
            }
        }
    }
}

#[async_trait]
impl ReviewStore for HttpReviewStore {
    async fn create_review(&self, review: &NewReview) -> Result<Option<u64>, CatalogError> {
        let url = self.endpoint("addReview")?;
        let payload = CreateReviewRequest {
            product_id: review.product_id,
            review_text: review.text.as_str(),
        };
        let response = self
            .send("create_review", self.client.post(url).json(&payload))
            .await?;

        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<CreatedReviewResponse>(&body) {
            Ok(created) => Ok(created.id),
            Err(error) => {
                tracing::debug!("create_review response carried no identifier: {error}");
                Ok(None)
            }
        }
    }

    async fn update_review(&self, review_id: u64, text: &str) -> Result<(), CatalogError> {
        let url = self.endpoint(&format!("edit_review/{review_id}"))?;
        let payload = UpdateReviewRequest { review_text: text };
        self.send("update_review", self.client.post(url).json(&payload))
            .await
            .map(drop)
    }

    async fn delete_review(&self, review_id: u64) -> Result<(), CatalogError> {
        let url = self.endpoint(&format!("delete_review/{review_id}"))?;
        self.send("delete_review", self.client.delete(url))
            .await
            .map(drop)
    }

    async fn delete_product(
        &self,
        product_id: u64,
        query: &ListingQuery,
    ) -> Result<(), CatalogError> {
        let mut url = self.endpoint(&format!("delete/{product_id}"))?;
        url.query_pairs_mut().extend_pairs(query.to_query_pairs());
        self.send("delete_product", self.client.delete(url))
            .await
            .map(drop)
    }

    async fn list_reviews(&self, product_id: u64) -> Result<Vec<Review>, CatalogError> {
        let path = self
            .config
            .reviews_path
            .replace("{product_id}", &product_id.to_string());
        let url = self.endpoint(&path)?;
        let response = self.send("list_reviews", self.client.get(url)).await?;

        let listed: Vec<ListedReview> = response
            .json()
            .await
            .map_err(|error| CatalogError::Decode {
                message: format!("list_reviews: {error}"),
            })?;

        Ok(listed
            .into_iter()
            .map(|review| Review {
                id: review.id,
                text: review.text,
                product_id,
            })
            .collect())
    }
}

#[derive(Debug, Serialize)]
struct CreateReviewRequest<'a> {
    product_id: u64,
    review_text: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdateReviewRequest<'a> {
    review_text: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreatedReviewResponse {
    #[serde(default)]
    id: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ListedReview {
    id: u64,
    text: String,
}

fn rejection(operation: &str, status: StatusCode, message: String) -> CatalogError {
    CatalogError::RemoteRejected {
        operation: operation.to_owned(),
        status: status.as_u16(),
        message,
    }
}

fn truncate_for_message(message: &str, max_chars: usize) -> String {
    let mut output = String::new();
    let mut chars = message.chars();

    for _ in 0..max_chars {
        let Some(character) = chars.next() else {
            return output;
        };
        output.push(character);
    }

    if chars.next().is_some() {
        output.push_str("...");
    }

    output
}

#[cfg(test)]
mod tests;
