use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::text::FieldValues;

/// Model confidence for an LLM-proposed institution.
///
/// Parsing is coercive: anything outside the three-valued enum becomes
/// `Low`, so a sloppy model answer downgrades an item instead of losing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    High,
    Med,
    Low,
}

impl Confidence {
    pub const fn as_str(self) -> &'static str {
        match self {
            Confidence::High => "HIGH",
            Confidence::Med => "MED",
            Confidence::Low => "LOW",
        }
    }

    pub fn parse_or_low(s: &str) -> Confidence {
        match s.trim() {
            "HIGH" => Confidence::High,
            "MED" => Confidence::Med,
            _ => Confidence::Low,
        }
    }
}

/// Which collector produced a seed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedSource {
    Wikidata,
    Chatgpt,
}

/// One retained candidate institution, in output column order.
///
/// Invariant: `name` is never empty; empty-name candidates are dropped
/// before a row is ever constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedRow {
    pub country_label: String,
    pub category: Category,
    pub name: String,
    pub also_known_as: String,
    pub official_website: String,
    pub confidence: Option<Confidence>,
    pub evidence: String,
    pub comment: String,
    pub source: SeedSource,
}

impl FieldValues for SeedRow {
    fn field(&self, name: &str) -> &str {
        match name {
            "country_label" => &self.country_label,
            "category" => self.category.key(),
            "name" => &self.name,
            "also_known_as" => &self.also_known_as,
            "official_website" => &self.official_website,
            "confidence" => self.confidence.map(Confidence::as_str).unwrap_or(""),
            "evidence" => &self.evidence,
            "comment" => &self.comment,
            _ => "",
        }
    }
}

/// One Wikidata-sourced observation, before filtering.
///
/// Only `operator_qid` is guaranteed; the label service and the OPTIONAL
/// clauses can all come back empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphCandidate {
    pub category: Category,
    pub operator_qid: String,
    pub operator_label: Option<String>,
    pub operator_type_qid: Option<String>,
    pub operator_type_label: Option<String>,
    pub country_qid: Option<String>,
    pub country_label: Option<String>,
    pub website: Option<String>,
    pub description_en: Option<String>,
}

impl GraphCandidate {
    /// Label + English description blob used for keyword relevance tests.
    pub fn match_text(&self) -> String {
        let label = self.operator_label.as_deref().unwrap_or("");
        let desc = self.description_en.as_deref().unwrap_or("");
        format!("{} {}", label, desc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::dedupe_rows;

    #[test]
    fn test_confidence_parse_or_low() {
        assert_eq!(Confidence::parse_or_low("HIGH"), Confidence::High);
        assert_eq!(Confidence::parse_or_low("MED"), Confidence::Med);
        assert_eq!(Confidence::parse_or_low("LOW"), Confidence::Low);
        assert_eq!(Confidence::parse_or_low(" HIGH "), Confidence::High);
        // Invalid values coerce rather than reject.
        assert_eq!(Confidence::parse_or_low("high"), Confidence::Low);
        assert_eq!(Confidence::parse_or_low("CERTAIN"), Confidence::Low);
        assert_eq!(Confidence::parse_or_low(""), Confidence::Low);
    }

    fn sample_row(name: &str, country: &str) -> SeedRow {
        SeedRow {
            country_label: country.to_string(),
            category: Category::Tso,
            name: name.to_string(),
            also_known_as: String::new(),
            official_website: String::new(),
            confidence: Some(Confidence::High),
            evidence: String::new(),
            comment: String::new(),
            source: SeedSource::Chatgpt,
        }
    }

    #[test]
    fn test_seed_row_field_lookup() {
        let row = sample_row("KPLC", "Kenya");
        assert_eq!(row.field("name"), "KPLC");
        assert_eq!(row.field("category"), "TSO");
        assert_eq!(row.field("confidence"), "HIGH");
        assert_eq!(row.field("no_such_column"), "");
    }

    #[test]
    fn test_seed_rows_dedupe_on_named_fields() {
        let rows = vec![
            sample_row("KPLC", "Kenya"),
            sample_row("KPLC", "Kenya"),
            sample_row("KPLC", "Peru"),
        ];
        let out = dedupe_rows(rows, &["country_label", "category", "name"]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].country_label, "Kenya");
        assert_eq!(out[1].country_label, "Peru");
    }

    #[test]
    fn test_match_text_with_missing_parts() {
        let candidate = GraphCandidate {
            category: Category::Tso,
            operator_qid: "Q1".to_string(),
            operator_label: Some("Kenya Power".to_string()),
            operator_type_qid: None,
            operator_type_label: None,
            country_qid: None,
            country_label: None,
            website: None,
            description_en: None,
        };
        assert_eq!(candidate.match_text(), "Kenya Power ");
    }
}
