use async_openai::{config::OpenAIConfig, Client};
use once_cell::sync::Lazy;
use regex::Regex;
use schemars::{schema_for, JsonSchema};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;

use crate::errors::{AppError, AppResult};

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*```(?:json)?\s*(.*?)\s*```\s*$").expect("CODE_FENCE is a valid regex pattern")
});

#[derive(Debug, Deserialize)]
struct ChatReply {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ChatReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completion client for an OpenAI-compatible endpoint (the Hugging Face router by default).
#[derive(Clone)]
pub struct ModelService {
    client: Client<OpenAIConfig>,
    model: String,
}

impl ModelService {
    pub fn new(api_base: &str, api_key: &SecretString, model: &str) -> Self {
        let config = OpenAIConfig::new()
            .with_api_base(api_base)
            .with_api_key(api_key.expose_secret());

        Self {
            client: Client::with_config(config),
            model: model.to_string(),
        }
    }

    /// Asks the model for a JSON object shaped like `T` and parses the reply.
    pub async fn complete_json<T>(&self, system_prompt: &str, user_prompt: &str) -> AppResult<T>
    where
        T: DeserializeOwned + JsonSchema,
    {
        let schema = serde_json::to_string(&schema_for!(T))?;
        let system = format!(
            "{}\n\nRespond with a single JSON object and nothing else. It must match this JSON Schema:\n{}",
            system_prompt, schema
        );

        let request = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user_prompt },
            ],
            "temperature": 0.3,
        });

        log::debug!("Requesting completion from model {}", self.model);
        let reply: ChatReply = self.client.chat().create_byot(request).await?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| AppError::ExternalService("model returned an empty reply".to_string()))?;

        parse_json_reply(&content)
    }
}

/// Parses a model reply as JSON, tolerating a surrounding markdown code fence.
pub fn parse_json_reply<T: DeserializeOwned>(content: &str) -> AppResult<T> {
    let body = CODE_FENCE
        .captures(content)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
        .unwrap_or_else(|| content.trim());

    serde_json::from_str(body)
        .map_err(|e| AppError::ExternalService(format!("model reply was not valid JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Reply {
        score: f64,
    }

    #[test]
    fn parses_plain_json() {
        let reply: Reply = parse_json_reply(r#" {"score": 0.5} "#).unwrap();
        assert_eq!(reply, Reply { score: 0.5 });
    }

    #[test]
    fn strips_code_fence() {
        let reply: Reply = parse_json_reply("```json\n{\"score\": 0.9}\n```").unwrap();
        assert_eq!(reply.score, 0.9);
    }

    #[test]
    fn rejects_prose() {
        let result = parse_json_reply::<Reply>("I think the score is high");
        assert!(matches!(result, Err(AppError::ExternalService(_))));
    }
}
