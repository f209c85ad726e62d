use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Result, SeedError};
use crate::llm::types::{
    ResponseFormat, ResponseText, ResponsesReply, ResponsesRequest, SCHEMA_NAME,
};
use crate::llm::SeedModel;

const OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Client for the OpenAI Responses API with structured output.
#[derive(Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: OPENAI_BASE_URL.to_string(),
            model: model.into(),
        }
    }

    /// Point the client at a compatible server, e.g. a local proxy.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl SeedModel for OpenAiClient {
    async fn complete(&self, prompt: &str, schema: Value, temperature: f32) -> Result<String> {
        let url = format!("{}/v1/responses", self.base_url.trim_end_matches('/'));

        let payload = ResponsesRequest {
            model: &self.model,
            input: prompt,
            temperature,
            text: ResponseText {
                format: ResponseFormat {
                    kind: "json_schema",
                    name: SCHEMA_NAME,
                    schema,
                },
            },
        };

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(SeedError::GenerationFailed { status, body });
        }

        let reply: ResponsesReply = res.json().await?;
        Ok(reply.text())
    }
}
