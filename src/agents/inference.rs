use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;

const MAX_NEW_TOKENS: u32 = 500;
const SUGGESTION_CHARS: usize = 500;
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

// The model is asked for structured feedback, but its completion is kept as
// free text. Scores below are fixed placeholders, not derived from it.
const PLACEHOLDER_SUMMARY: &str = "Code reviewed using Hugging Face model";
const PLACEHOLDER_READABILITY: u8 = 7;
const PLACEHOLDER_MODULARITY: u8 = 7;
const PLACEHOLDER_BUG_RISK: u8 = 5;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("HF API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HF API failed: upstream returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("HF API failed: malformed response body: {0}")]
    Body(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: Parameters,
}

#[derive(Debug, Serialize)]
struct Parameters {
    max_new_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub category: String,
    pub severity: String,
    pub line: String,
    pub issue: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub summary: String,
    pub readability_score: u8,
    pub modularity_score: u8,
    pub bug_risk_score: u8,
    pub suggestions: Vec<Suggestion>,
}

impl Analysis {
    fn from_generated_text(generated: &str) -> Self {
        Self {
            summary: PLACEHOLDER_SUMMARY.to_string(),
            readability_score: PLACEHOLDER_READABILITY,
            modularity_score: PLACEHOLDER_MODULARITY,
            bug_risk_score: PLACEHOLDER_BUG_RISK,
            suggestions: vec![Suggestion {
                category: "general".to_string(),
                severity: "medium".to_string(),
                line: "general".to_string(),
                issue: "Review generated".to_string(),
                suggestion: truncate_chars(generated, SUGGESTION_CHARS),
            }],
        }
    }
}

pub struct InferenceClient {
    client: Client,
    url: String,
    token: String,
    max_retries: u32,
}

impl InferenceClient {
    pub fn new(config: &Config) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .timeout(config.inference_timeout)
            .build()?;

        Ok(Self {
            client,
            url: config.inference_url.clone(),
            token: config.inference_token.clone(),
            max_retries: config.inference_max_retries,
        })
    }

    pub async fn analyze(
        &self,
        code: &str,
        filename: &str,
        language: &str,
    ) -> Result<Analysis, InferenceError> {
        let prompt = build_prompt(code, filename, language);
        let body = self.generate(&prompt).await?;
        let generated = extract_generated_text(&body);
        info!(
            "Inference for {} produced {} chars",
            filename,
            generated.chars().count()
        );
        Ok(Analysis::from_generated_text(generated))
    }

    /// Posts the prompt and returns the decoded JSON body. Only transient
    /// transport failures are retried; an HTTP error status is final.
    async fn generate(&self, prompt: &str) -> Result<Value, InferenceError> {
        let request = InferenceRequest {
            inputs: prompt,
            parameters: Parameters {
                max_new_tokens: MAX_NEW_TOKENS,
            },
        };

        let mut attempt = 0;
        let response = loop {
            let sent = self
                .client
                .post(&self.url)
                .bearer_auth(&self.token)
                .json(&request)
                .send()
                .await;

            match sent {
                Ok(response) => break response,
                Err(e) if is_transient(&e) && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(
                        "Inference request failed ({}), retry {}/{}",
                        e, attempt, self.max_retries
                    );
                    tokio::time::sleep(RETRY_BACKOFF).await;
                }
                Err(e) => return Err(e.into()),
            }
        };

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(InferenceError::Status {
                status,
                body: truncate_chars(&text, 200),
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

fn is_transient(e: &reqwest::Error) -> bool {
    e.is_connect() || e.is_timeout()
}

pub fn build_prompt(code: &str, filename: &str, language: &str) -> String {
    format!(
        "Review this {language} code from {filename} and provide feedback:\n\n\
         {code}\n\n\
         Provide:\n\
         1. Summary (2-3 sentences)\n\
         2. Readability score (1-10)\n\
         3. Modularity score (1-10)\n\
         4. Bug risk score (1-10)\n\
         5. Top 3 improvement suggestions"
    )
}

/// Pulls `generated_text` out of either `[{..}, ..]` or `{..}`. Anything
/// else, including an empty list or a non-string field, yields `""`.
pub fn extract_generated_text(body: &Value) -> &str {
    let object = match body {
        Value::Array(items) => items.first(),
        other => Some(other),
    };
    object
        .and_then(|o| o.get("generated_text"))
        .and_then(Value::as_str)
        .unwrap_or("")
}

/// Keeps at most `max` characters, never splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn generated_text_from_list_or_object() {
        let list = json!([{"generated_text": "first"}, {"generated_text": "second"}]);
        assert_eq!(extract_generated_text(&list), "first");

        let object = json!({"generated_text": "single"});
        assert_eq!(extract_generated_text(&object), "single");
    }

    #[test]
    fn absent_generated_text_is_empty() {
        for body in [
            json!({"error": "Model is loading"}),
            json!([]),
            json!([{"text": "nope"}]),
            json!({"generated_text": 12}),
            json!("plain string"),
        ] {
            assert_eq!(extract_generated_text(&body), "", "{body}");
        }
    }

    #[test]
    fn analysis_has_one_bounded_suggestion() {
        let long = "x".repeat(2000);
        let analysis = Analysis::from_generated_text(&long);
        assert_eq!(analysis.suggestions.len(), 1);
        assert_eq!(analysis.suggestions[0].suggestion.len(), SUGGESTION_CHARS);
        assert_eq!(analysis.readability_score, 7);
        assert_eq!(analysis.modularity_score, 7);
        assert_eq!(analysis.bug_risk_score, 5);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn prompt_embeds_code_and_language() {
        let prompt = build_prompt("fn main() {}", "main.rs", "Rust");
        assert!(prompt.starts_with("Review this Rust code from main.rs"));
        assert!(prompt.contains("fn main() {}"));
        assert!(prompt.contains("Top 3 improvement suggestions"));
    }
}
