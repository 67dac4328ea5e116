//! Photo-based food identification.
//!
//! The identification service is an opaque capability: image bytes in, a
//! short free-text food label out. Failures are always recoverable; the
//! caller falls back to manual catalog search.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

const PROMPT: &str = "Analyze this food image and identify the dish. Return ONLY the food name \
     in English in this exact format: \"Food: [name]\". Be concise and use common English food names.";

#[async_trait]
pub trait FoodIdentifier: Send + Sync {
    /// Returns a best-guess food name for the image.
    async fn identify(&self, image: &[u8]) -> Result<String, IdentifyError>;
}

#[derive(Serialize)]
struct IdentifyRequest<'a> {
    prompt: &'a str,
    image: String,
}

#[derive(Deserialize)]
struct IdentifyResponse {
    text: String,
}

/// HTTP client for the identification service.
pub struct HttpIdentifier {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpIdentifier {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl FoodIdentifier for HttpIdentifier {
    async fn identify(&self, image: &[u8]) -> Result<String, IdentifyError> {
        let request = IdentifyRequest {
            prompt: PROMPT,
            image: format!("data:image/jpeg;base64,{}", BASE64.encode(image)),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(IdentifyError::Http)?;

        if !response.status().is_success() {
            return Err(IdentifyError::Service(format!(
                "service returned status {}",
                response.status()
            )));
        }

        let body: IdentifyResponse = response.json().await.map_err(IdentifyError::Http)?;
        let label = clean_label(&body.text);
        if label.is_empty() {
            return Err(IdentifyError::Service("empty label".to_string()));
        }
        Ok(label)
    }
}

/// Strips the "Food:" reply prefix and surrounding noise from a service reply.
pub fn clean_label(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_prefix = trimmed
        .strip_prefix("Food:")
        .or_else(|| trimmed.strip_prefix("food:"))
        .unwrap_or(trimmed);
    without_prefix
        .trim()
        .trim_matches('"')
        .trim_end_matches('.')
        .trim()
        .to_string()
}

/// Errors from the identification service. Never fatal to the caller.
#[derive(Debug)]
pub enum IdentifyError {
    /// Network or protocol failure talking to the service.
    Http(reqwest::Error),
    /// The service answered, but not usefully.
    Service(String),
}

impl std::fmt::Display for IdentifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentifyError::Http(e) => write!(f, "identification request failed: {}", e),
            IdentifyError::Service(e) => write!(f, "identification service error: {}", e),
        }
    }
}

impl std::error::Error for IdentifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IdentifyError::Http(e) => Some(e),
            IdentifyError::Service(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_label_strips_prefix() {
        assert_eq!(clean_label("Food: Lentil Soup"), "Lentil Soup");
        assert_eq!(clean_label("food: apple"), "apple");
    }

    #[test]
    fn test_clean_label_strips_quotes_and_period() {
        assert_eq!(clean_label("Food: \"Doner Kebab\"."), "Doner Kebab");
    }

    #[test]
    fn test_clean_label_passes_through_plain_text() {
        assert_eq!(clean_label("  Menemen  "), "Menemen");
    }

    #[test]
    fn test_clean_label_empty() {
        assert_eq!(clean_label("Food: "), "");
    }
}
