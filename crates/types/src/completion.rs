//! Wire types for the completion endpoint.
//!
//! Requests carry a single `message` string. Responses follow the familiar
//! `choices[].message` envelope; only the first choice is ever read.

use serde::{Deserialize, Serialize};

use crate::form::FormState;
use crate::prompt::compose_prompt;

/// JSON body posted to `/completions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub message: String,
}

impl From<&FormState> for CompletionRequest {
    fn from(form: &FormState) -> Self {
        Self {
            message: compose_prompt(form),
        }
    }
}

/// Generated article as returned in `choices[0].message`.
///
/// A message without `content` is still an article; it renders as empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl Article {
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            role: Some("assistant".into()),
            content: Some(content.into()),
        }
    }

    /// Text shown in the article panel.
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionChoice {
    pub message: Article,
}

/// Response envelope from the completion endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<CompletionChoice>,
}

impl CompletionResponse {
    /// Take the first completion's message, if any.
    pub fn into_first_article(self) -> Option<Article> {
        self.choices.into_iter().next().map(|choice| choice.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_choice_is_the_article() {
        let body = r#"{"choices":[{"message":{"content":"Hello world"}},{"message":{"content":"ignored"}}]}"#;
        let response: CompletionResponse = serde_json::from_str(body).expect("deserialize response");
        let article = response.into_first_article().expect("first choice");
        assert_eq!(article.text(), "Hello world");
    }

    #[test]
    fn missing_content_renders_empty() {
        let body = r#"{"choices":[{"message":{"role":"assistant"}}]}"#;
        let response: CompletionResponse = serde_json::from_str(body).expect("deserialize response");
        let article = response.into_first_article().expect("first choice");
        assert_eq!(article.role.as_deref(), Some("assistant"));
        assert_eq!(article.text(), "");
    }

    #[test]
    fn empty_choices_yield_nothing() {
        let response: CompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).expect("deserialize response");
        assert!(response.into_first_article().is_none());
    }

    #[test]
    fn missing_choices_is_a_decode_error() {
        assert!(serde_json::from_str::<CompletionResponse>(r#"{"error":"busy"}"#).is_err());
    }

    #[test]
    fn request_body_has_single_message_key() {
        let form = FormState {
            topic: "Cats".into(),
            ..FormState::default()
        };
        let value = serde_json::to_value(CompletionRequest::from(&form)).expect("serialize request");
        let object = value.as_object().expect("object body");
        assert_eq!(object.len(), 1);
        assert!(object["message"].as_str().expect("string message").contains("1. Topic: Cats"));
    }
}
