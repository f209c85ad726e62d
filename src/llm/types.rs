use schemars::gen::SchemaSettings;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::Result;
use crate::schema::Confidence;

/// Name under which the response schema is registered with the model API.
pub const SCHEMA_NAME: &str = "institution_seeds";

/// One institution as proposed by the model. Every field is required in the
/// schema; the model is told to use `""` for unknown values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SeedItem {
    #[schemars(description = "Official institution name")]
    pub name: String,

    #[schemars(description = "Acronym or alternative names, comma-separated; empty if none")]
    pub also_known_as: String,

    #[schemars(description = "Official website URL; empty if unknown")]
    pub official_website: String,

    #[schemars(description = "Confidence that this institution matches the category")]
    pub confidence: Confidence,

    #[schemars(description = "Short factual basis for listing this institution")]
    pub evidence: String,

    #[schemars(description = "Caveats or notes for the human reviewer; empty if none")]
    pub comment: String,
}

/// The full structured response: a single `items` array, possibly empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SeedResponse {
    #[schemars(description = "Qualifying institutions, or an empty array if none exists")]
    pub items: Vec<SeedItem>,
}

/// Generates the strict response schema sent with every request: all item
/// fields required, no additional properties, confidence enum-constrained,
/// and the item array capped at `max_items`.
pub fn seed_response_schema(max_items: usize) -> Result<Value> {
    let settings = SchemaSettings::draft07().with(|s| {
        s.inline_subschemas = true;
    });
    let schema = settings
        .into_generator()
        .into_root_schema_for::<SeedResponse>();

    let mut value = serde_json::to_value(schema)?;
    if let Some(obj) = value.as_object_mut() {
        obj.remove("$schema");
        obj.remove("title");
    }
    if let Some(items) = value
        .get_mut("properties")
        .and_then(|p| p.get_mut("items"))
    {
        items["maxItems"] = json!(max_items);
    }

    Ok(value)
}

// Wire types for the Responses API. Only the fields we produce or consume.

#[derive(Debug, Serialize)]
pub(crate) struct ResponsesRequest<'a> {
    pub model: &'a str,
    pub input: &'a str,
    pub temperature: f32,
    pub text: ResponseText,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResponseText {
    pub format: ResponseFormat,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: &'static str,
    pub schema: Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponsesReply {
    #[serde(default)]
    pub output: Vec<ReplyOutput>,
    #[serde(default)]
    pub output_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReplyOutput {
    #[serde(default)]
    pub content: Vec<ReplyContent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReplyContent {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: String,
}

impl ResponsesReply {
    /// The concatenated output text, preferring the convenience field when
    /// the API provides it.
    pub fn text(&self) -> String {
        if let Some(text) = self.output_text.as_deref() {
            if !text.is_empty() {
                return text.to_string();
            }
        }
        self.output
            .iter()
            .flat_map(|o| o.content.iter())
            .filter(|c| c.kind == "output_text")
            .map(|c| c.text.as_str())
            .collect()
    }
}
