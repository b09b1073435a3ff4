//! Chat-model access for mood assessment.
//!
//! [`MoodModel`] is the seam the analysis pipeline depends on; [`OpenAiMoodModel`] backs
//! it with an OpenAI-compatible chat completions API through [`OpenAiClient`].

pub mod client;
pub mod prompts;
pub mod types;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LlmConfig;
use crate::error::{LlmError, LlmResult};

pub use client::OpenAiClient;
use types::{ChatRequest, Message};

/// What the model says about one piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodAssessment {
    pub mood_detected: String,
    pub empathy_response: String,
    pub recommendation: String,
    pub motivational_quote: String,
}

#[async_trait]
pub trait MoodModel: Send + Sync {
    /// Classify the mood of `text` and write the empathetic response fields.
    async fn assess(&self, text: &str) -> LlmResult<MoodAssessment>;

    /// Comma-separated themes and interests that sharpen book and place selection.
    async fn themes(&self, text: &str, mood: &str) -> LlmResult<String>;
}

pub struct OpenAiMoodModel {
    client: OpenAiClient,
    model: String,
}

impl OpenAiMoodModel {
    pub fn new(config: &LlmConfig) -> LlmResult<Self> {
        Ok(Self {
            client: OpenAiClient::new(config)?,
            model: config.model.clone(),
        })
    }

    pub fn client(&self) -> &OpenAiClient {
        &self.client
    }
}

#[async_trait]
impl MoodModel for OpenAiMoodModel {
    async fn assess(&self, text: &str) -> LlmResult<MoodAssessment> {
        let request = ChatRequest::new(
            &self.model,
            vec![
                Message::system(prompts::MOOD_ANALYSIS_PROMPT),
                Message::user(prompts::mood_analysis_user_prompt(text)),
            ],
        )
        .with_json_output();

        let response = self.client.chat(&request).await?;
        let content = response.content().ok_or_else(|| LlmError::InvalidResponse {
            message: "response has no message content".into(),
        })?;

        let assessment: MoodAssessment =
            serde_json::from_str(content).map_err(|e| LlmError::InvalidResponse {
                message: format!("mood assessment is not valid JSON: {}", e),
            })?;
        debug!(mood = %assessment.mood_detected, "mood assessed");
        Ok(assessment)
    }

    async fn themes(&self, text: &str, mood: &str) -> LlmResult<String> {
        let request = ChatRequest::new(
            &self.model,
            vec![Message::user(prompts::themes_prompt(text, mood))],
        );

        let response = self.client.chat(&request).await?;
        Ok(response.content().unwrap_or_default().trim().to_string())
    }
}
