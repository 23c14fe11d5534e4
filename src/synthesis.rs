//! Chat-completion collaborator that turns formatted answers into a result.

use crate::{config::Config, domain::ResultSynthesizer, errors::SynthesisError,
            models::SynthesizedResult};
use async_trait::async_trait;
use std::time::Duration;
use tracing;

const SYSTEM_PROMPT: &str = "Responde solo con JSON";

#[derive(Clone)]
pub struct OpenAiSynthesizer {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
    timeout: Duration,
}

impl OpenAiSynthesizer {
    pub fn new(config: &Config, client: reqwest::Client) -> Self {
        Self {
            client,
            api_key: config.openai_api_key.clone(),
            api_base: config.openai_api_base.clone(),
            model: config.openai_model.clone(),
            timeout: config.synthesis_timeout,
        }
    }
}

fn build_prompt(answers: &[String]) -> String {
    format!(
        "Eres un experto en personalidad animal. Basado en estas respuestas, \
         indica con humor y creatividad qué animal representa a la persona. \
         Responde solo un JSON con esta estructura: \
         {{\"animal\": \"nombre\", \"descripcion\": \"texto\", \"lema\": \"frase\"}}\n\
         Respuestas:\n{}",
        answers.join("\n")
    )
}

/// Strips an optional Markdown code fence the model sometimes wraps its
/// JSON answer in.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.trim();
    rest.strip_suffix("```").map(str::trim).unwrap_or(rest)
}

/// Parses `choices[0].message.content` from a chat-completion response body
/// into a `SynthesizedResult`.
fn parse_response(body: &serde_json::Value) -> Result<SynthesizedResult, SynthesisError> {
    let content = body
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .ok_or_else(|| {
            SynthesisError::MalformedOutput("missing choices[0].message.content".to_string())
        })?;

    serde_json::from_str(strip_code_fence(content)).map_err(|e| {
        SynthesisError::MalformedOutput(format!("content is not the expected JSON: {}", e))
    })
}

#[async_trait]
impl ResultSynthesizer for OpenAiSynthesizer {
    async fn synthesize(&self, answers: &[String]) -> Result<SynthesizedResult, SynthesisError> {
        let payload = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": build_prompt(answers)}
            ]
        });

        tracing::debug!(model = %self.model, answer_count = answers.len(), "Requesting synthesis");

        let res = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(SynthesisError::UpstreamStatus { status, body });
        }

        let body: serde_json::Value = res.json().await?;
        let result = parse_response(&body)?;

        tracing::debug!(animal = %result.animal, "Synthesis succeeded");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_json_content() {
        let body = serde_json::json!({
            "choices": [{"message": {"content":
                "{\"animal\":\"Gato\",\"descripcion\":\"Curioso.\",\"lema\":\"Miau.\"}"}}]
        });
        let result = parse_response(&body).unwrap();
        assert_eq!(result.animal, "Gato");
        assert_eq!(result.lema, "Miau.");
    }

    #[test]
    fn parses_fenced_json_content() {
        let body = serde_json::json!({
            "choices": [{"message": {"content":
                "```json\n{\"animal\":\"Lobo\",\"descripcion\":\"Leal.\",\"lema\":\"Aúlla.\"}\n```"}}]
        });
        let result = parse_response(&body).unwrap();
        assert_eq!(result.animal, "Lobo");
    }

    #[test]
    fn missing_content_is_malformed_output() {
        let body = serde_json::json!({"choices": []});
        assert!(matches!(
            parse_response(&body),
            Err(SynthesisError::MalformedOutput(_))
        ));
    }

    #[test]
    fn non_json_content_is_malformed_output() {
        let body = serde_json::json!({
            "choices": [{"message": {"content": "eres un gato, sin duda"}}]
        });
        assert!(matches!(
            parse_response(&body),
            Err(SynthesisError::MalformedOutput(_))
        ));
    }

    #[test]
    fn prompt_includes_every_answer_line() {
        let answers = vec!["1. pregunta -> opción".to_string(), "2. otra -> más".to_string()];
        let prompt = build_prompt(&answers);
        assert!(prompt.contains("1. pregunta -> opción"));
        assert!(prompt.contains("2. otra -> más"));
        assert!(prompt.contains("\"animal\""));
    }

    #[test]
    fn strip_code_fence_leaves_plain_text_alone() {
        assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
        assert_eq!(strip_code_fence("```{\"a\":1}```"), "{\"a\":1}");
    }
}
