//! Gemini-backed suggestion client.
//!
//! # Responsibility
//! - Issue one structured `generateContent` call per suggestion request.
//! - Parse the schema-constrained response into plain sub-goal names.
//!
//! # Invariants
//! - The credential is resolved at construction; a client without one
//!   never touches the network.
//! - An absent `subGoals` field in a parseable payload degrades to an
//!   empty suggestion list.

use super::{SuggestError, SuggestResult, SuggestionClient};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const MODEL: &str = "gemini-2.5-flash";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

// ── Wire types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct SuggestionPayload {
    #[serde(default, rename = "subGoals")]
    sub_goals: Vec<String>,
}

// ── Client ───────────────────────────────────────────────────────────────

/// Blocking Gemini client generating sub-goal suggestions.
pub struct GeminiSuggestionClient {
    api_key: Option<String>,
    base_url: String,
}

impl GeminiSuggestionClient {
    /// Builds a client from `GEMINI_API_KEY` and optional `GEMINI_BASE_URL`.
    ///
    /// A missing key is not an error here; calls through the client fail
    /// with `SuggestError::MissingCredential` without any network traffic.
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|value| !value.trim().is_empty());
        let base_url = std::env::var("GEMINI_BASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(api_key, base_url)
    }

    /// Builds a client with an explicit credential and endpoint base.
    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
        }
    }

    /// Returns whether a credential is configured.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl SuggestionClient for GeminiSuggestionClient {
    fn suggest_sub_goals(&self, parent_name: &str) -> SuggestResult<Vec<String>> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(SuggestError::MissingCredential);
        };

        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|err| SuggestError::Remote(err.to_string()))?;

        let url = format!(
            "{}/v1beta/models/{MODEL}:generateContent",
            self.base_url.trim_end_matches('/')
        );
        let response = http
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&build_request(parent_name))
            .send()
            .map_err(|err| SuggestError::Remote(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            return Err(SuggestError::Remote(format!("API error {status}: {text}")));
        }

        let envelope: GenerateResponse = response
            .json()
            .map_err(|err| SuggestError::InvalidResponse(err.to_string()))?;
        let names = parse_suggestion_payload(&candidate_text(&envelope)?)?;
        info!(
            "event=suggest module=suggest status=ok count={}",
            names.len()
        );
        Ok(names)
    }
}

fn build_request(parent_name: &str) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: format!(
                    "Break down the following goal into a few smaller, \
                     actionable sub-goals: \"{parent_name}\""
                ),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: json!({
                "type": "OBJECT",
                "properties": {
                    "subGoals": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" }
                    }
                }
            }),
        },
    }
}

fn candidate_text(envelope: &GenerateResponse) -> SuggestResult<String> {
    let text: String = envelope
        .candidates
        .iter()
        .filter_map(|candidate| candidate.content.as_ref())
        .flat_map(|content| content.parts.iter())
        .filter_map(|part| part.text.as_deref())
        .collect();

    if text.trim().is_empty() {
        return Err(SuggestError::InvalidResponse(
            "response contained no candidate text".to_string(),
        ));
    }
    Ok(text)
}

/// Parses the schema-constrained candidate text into suggestion names.
///
/// Blank entries are dropped; an absent `subGoals` field is an empty list.
fn parse_suggestion_payload(text: &str) -> SuggestResult<Vec<String>> {
    let payload: SuggestionPayload = serde_json::from_str(text.trim())
        .map_err(|err| SuggestError::InvalidResponse(format!("not valid JSON: {err}")))?;

    Ok(payload
        .sub_goals
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::{parse_suggestion_payload, GeminiSuggestionClient};
    use crate::suggest::{SuggestError, SuggestionClient};

    #[test]
    fn missing_credential_fails_before_any_request() {
        // Unroutable base URL: a network attempt would fail differently.
        let client = GeminiSuggestionClient::new(None, "http://127.0.0.1:9");
        let err = client.suggest_sub_goals("Get fit").unwrap_err();
        assert!(matches!(err, SuggestError::MissingCredential));
    }

    #[test]
    fn parses_schema_shaped_payload() {
        let names =
            parse_suggestion_payload(r#"{"subGoals": ["Run twice a week", "Stretch daily"]}"#)
                .expect("payload should parse");
        assert_eq!(names, vec!["Run twice a week", "Stretch daily"]);
    }

    #[test]
    fn absent_sub_goals_field_is_an_empty_list() {
        let names = parse_suggestion_payload("{}").expect("payload should parse");
        assert!(names.is_empty());
    }

    #[test]
    fn blank_entries_are_dropped() {
        let names = parse_suggestion_payload(r#"{"subGoals": ["  ", "Walk daily", ""]}"#)
            .expect("payload should parse");
        assert_eq!(names, vec!["Walk daily"]);
    }

    #[test]
    fn non_json_payload_is_invalid_response() {
        let err = parse_suggestion_payload("sure, here are some sub-goals:").unwrap_err();
        assert!(matches!(err, SuggestError::InvalidResponse(_)));
    }
}
