use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::EntitySpan;

#[derive(Debug, Error)]
pub enum RecognizerError {
    #[error("recognizer request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("recognizer returned status {0}")]
    Status(u16),
}

/// Black-box named-entity recognition: one chunk in, ordered spans out.
///
/// Failures must propagate to the caller; a recognizer that cannot answer is
/// a pipeline failure, never an empty result.
#[async_trait]
pub trait EntityRecognizer: Send + Sync {
    async fn recognize(&self, chunk: &str) -> Result<Vec<EntitySpan>, RecognizerError>;
}

/// Client for an HTTP NER service.
#[derive(Clone)]
pub struct HttpRecognizer {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct NerRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct NerResponse {
    entities: Vec<EntitySpan>,
}

impl HttpRecognizer {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RecognizerError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }
}

#[async_trait]
impl EntityRecognizer for HttpRecognizer {
    async fn recognize(&self, chunk: &str) -> Result<Vec<EntitySpan>, RecognizerError> {
        let url = format!("{}/ner", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&NerRequest { text: chunk })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RecognizerError::Status(response.status().as_u16()));
        }

        let body: NerResponse = response.json().await?;
        Ok(body.entities)
    }
}
