use log::debug;
use serde_json::Value;

use crate::category::Category;
use crate::config::GeneratorOptions;
use crate::error::Result;
use crate::llm::prompts::{build_primary_prompt, build_verify_prompt};
use crate::llm::types::{seed_response_schema, SeedItem};
use crate::llm::SeedModel;
use crate::schema::Confidence;

/// Verification runs colder than generation regardless of the configured
/// sampling temperature.
const VERIFY_TEMPERATURE_CAP: f32 = 0.2;

/// Issues generation and verification requests for one run and decodes the
/// responses defensively: a response that fails to parse is an empty result,
/// never an error.
pub struct SeedGenerator<'a, M: SeedModel> {
    model: &'a M,
    options: &'a GeneratorOptions,
}

impl<'a, M: SeedModel> SeedGenerator<'a, M> {
    pub fn new(model: &'a M, options: &'a GeneratorOptions) -> Self {
        Self { model, options }
    }

    /// Lists candidate institutions for one (country, category) unit.
    pub async fn generate(&self, country: &str, category: Category) -> Result<Vec<SeedItem>> {
        let prompt = build_primary_prompt(country, category, self.options.max_items);
        let schema = seed_response_schema(self.options.max_items)?;
        let raw = self
            .model
            .complete(&prompt, schema, self.options.temperature)
            .await?;
        Ok(parse_items(&raw))
    }

    /// Confirms or corrects a single candidate. `None` means the response
    /// was empty or unusable; the caller keeps the unverified candidate.
    pub async fn verify(
        &self,
        country: &str,
        category: Category,
        candidate_name: &str,
    ) -> Result<Option<SeedItem>> {
        let prompt = build_verify_prompt(country, category, candidate_name);
        let schema = seed_response_schema(1)?;
        let temperature = self.options.temperature.clamp(0.0, VERIFY_TEMPERATURE_CAP);
        let raw = self.model.complete(&prompt, schema, temperature).await?;
        Ok(parse_items(&raw).into_iter().next())
    }
}

/// Decodes a raw model response into seed items.
///
/// Malformed JSON or a missing/invalid `items` array yields an empty list.
/// Items without a non-empty `name` are dropped; missing or invalid
/// `confidence` is coerced to LOW. All fields are trimmed.
pub fn parse_items(raw: &str) -> Vec<SeedItem> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            debug!("Discarding unparseable model response: {}", err);
            return Vec::new();
        }
    };

    let Some(items) = value.get("items").and_then(Value::as_array) else {
        return Vec::new();
    };

    items.iter().filter_map(item_from_value).collect()
}

fn item_from_value(value: &Value) -> Option<SeedItem> {
    let obj = value.as_object()?;
    let field = |key: &str| {
        obj.get(key)
            .and_then(Value::as_str)
            .unwrap_or("")
            .trim()
            .to_string()
    };

    let name = field("name");
    if name.is_empty() {
        return None;
    }

    Some(SeedItem {
        name,
        also_known_as: field("also_known_as"),
        official_website: field("official_website"),
        confidence: Confidence::parse_or_low(&field("confidence")),
        evidence: field("evidence"),
        comment: field("comment"),
    })
}
