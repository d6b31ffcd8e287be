use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    /// Returns raw classifier labels with their scores.
    async fn classify(&self, image: Vec<u8>) -> AppResult<Vec<LabelScore>>;
}

/// Hugging Face image-classification endpoint.
pub struct HostedEmotionClassifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: SecretString,
}

impl HostedEmotionClassifier {
    pub fn new(base_url: &str, model: &str, api_key: SecretString) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/{}", base_url.trim_end_matches('/'), model),
            api_key,
        }
    }
}

#[async_trait]
impl EmotionClassifier for HostedEmotionClassifier {
    async fn classify(&self, image: Vec<u8>) -> AppResult<Vec<LabelScore>> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(image)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("Emotion classifier returned {}: {}", status, body);
            return Err(AppError::ExternalService(format!(
                "classifier returned HTTP {}",
                status.as_u16()
            )));
        }

        let labels: Vec<LabelScore> = response.json().await?;
        Ok(labels)
    }
}

/// Stands in when no Hugging Face key is configured; every call fails.
pub struct DisabledEmotionClassifier;

#[async_trait]
impl EmotionClassifier for DisabledEmotionClassifier {
    async fn classify(&self, _image: Vec<u8>) -> AppResult<Vec<LabelScore>> {
        Err(AppError::ExternalService(
            "no Hugging Face API key is configured".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_model() {
        let classifier = HostedEmotionClassifier::new(
            "https://api-inference.huggingface.co/models/",
            "trpakov/vit-face-expression",
            SecretString::from("key".to_string()),
        );
        assert_eq!(
            classifier.endpoint,
            "https://api-inference.huggingface.co/models/trpakov/vit-face-expression"
        );
    }

    #[tokio::test]
    async fn disabled_classifier_fails() {
        let result = DisabledEmotionClassifier.classify(vec![1, 2, 3]).await;
        assert!(matches!(result, Err(AppError::ExternalService(_))));
    }
}
