use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub mod client;
pub mod generator;
pub mod prompts;
pub mod types;

pub use client::*;
pub use generator::*;
pub use types::{seed_response_schema, SeedItem, SeedResponse};

/// A schema-constrained completion surface. The production implementation
/// is [`OpenAiClient`]; tests inject stubs.
#[async_trait]
pub trait SeedModel {
    /// Requests one completion constrained to `schema`, returning the raw
    /// output text. Transport and non-success responses are errors; whether
    /// the text actually parses is the caller's concern.
    async fn complete(&self, prompt: &str, schema: Value, temperature: f32) -> Result<String>;
}
