use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SeedError};
use crate::text::normalize_for_match;

/// The five institution categories collected by the pipeline.
///
/// Agencies are deliberately separate categories: a renewables or nuclear
/// agency is never folded into `Regulator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Category {
    #[serde(rename = "TSO")]
    Tso,
    Regulator,
    Ministry,
    RenewablesAgency,
    NuclearAgency,
}

/// Iteration order for a full seeding run, country-major category-minor.
pub const ALL_CATEGORIES: [Category; 5] = [
    Category::Tso,
    Category::Regulator,
    Category::Ministry,
    Category::RenewablesAgency,
    Category::NuclearAgency,
];

/// Categories with a Wikidata type mapping. The agency categories are
/// LLM-only: no instance-of type narrows them usefully.
pub const GRAPH_CATEGORIES: [Category; 3] =
    [Category::Tso, Category::Regulator, Category::Ministry];

/// Wikidata type selectors for one category: strict instance-of QIDs tried
/// first, fallback QIDs to broaden the search, and the keyword list applied
/// to label + English description after the query.
pub struct GraphTypeSelector {
    pub strict: &'static [&'static str],
    pub fallback: &'static [&'static str],
    pub keywords: &'static [&'static str],
}

impl Category {
    pub const fn key(self) -> &'static str {
        match self {
            Category::Tso => "TSO",
            Category::Regulator => "Regulator",
            Category::Ministry => "Ministry",
            Category::RenewablesAgency => "RenewablesAgency",
            Category::NuclearAgency => "NuclearAgency",
        }
    }

    pub fn parse(s: &str) -> Result<Category> {
        match s.trim() {
            "TSO" => Ok(Category::Tso),
            "Regulator" => Ok(Category::Regulator),
            "Ministry" => Ok(Category::Ministry),
            "RenewablesAgency" => Ok(Category::RenewablesAgency),
            "NuclearAgency" => Ok(Category::NuclearAgency),
            other => Err(SeedError::InvalidCategory(other.to_string())),
        }
    }

    /// One-line description used when asking the model for this category.
    pub const fn description(self) -> &'static str {
        match self {
            Category::Tso => {
                "transmission system operator (TSO) / national grid or system operator"
            }
            Category::Regulator => {
                "electricity/energy regulator with formal regulatory authority \
                 (tariffs, licensing, compliance, grid access)"
            }
            Category::Ministry => "cabinet-level ministry responsible for energy/electricity policy",
            Category::RenewablesAgency => {
                "national renewable energy agency (promotion/implementation body, \
                 incentives, programs, certification)"
            }
            Category::NuclearAgency => {
                "national nuclear/atomic agency or nuclear safety regulator (nuclear \
                 governance, safety, licensing, atomic energy commission)"
            }
        }
    }

    /// Membership test block embedded in prompts. The tests are mutually
    /// exclusive across categories and instruct the model to return an empty
    /// set rather than guess.
    pub const fn test_block(self) -> &'static str {
        match self {
            Category::Tso => {
                "- TSO test: entity responsible for transmission system operation/balancing/dispatch \
                 at national or regional level. May be called TSO, ISO, RTO, system operator, \
                 national grid operator. If vertically integrated, state that.\n"
            }
            Category::Regulator => {
                "- Regulator test: formal regulatory authority over electricity/energy (tariffs, \
                 licensing, enforcement, market/grid access). Do NOT include renewables agencies \
                 or nuclear agencies unless they regulate electricity markets.\n"
            }
            Category::Ministry => {
                "- Ministry test: cabinet-level ministry setting national energy/electricity \
                 policy. Do NOT list regulators or implementing agencies.\n"
            }
            Category::RenewablesAgency => {
                "- RenewablesAgency test: national-level public body implementing/promoting \
                 renewable energy programs (incentives, auctions/programs, certification, \
                 deployment support). Do NOT list NGOs or private associations. If none exists, \
                 return empty.\n"
            }
            Category::NuclearAgency => {
                "- NuclearAgency test: national nuclear safety regulator and/or atomic energy \
                 commission/authority with official mandate for nuclear governance (safety, \
                 licensing, oversight, atomic energy development). If none exists, return empty.\n"
            }
        }
    }

    /// Keyword filter applied to already-fetched candidates. `None` means the
    /// category has no keyword narrowing and every candidate passes; this is
    /// the case for the agency categories, which only exist in the LLM path.
    pub const fn relevance_keywords(self) -> Option<&'static [&'static str]> {
        match self {
            Category::Tso => Some(&["transmission", "system operator", "grid operator", "operator"]),
            Category::Regulator => Some(&["regulator", "regulatory", "commission", "authority"]),
            Category::Ministry => Some(&["ministry", "department"]),
            Category::RenewablesAgency | Category::NuclearAgency => None,
        }
    }

    /// Wikidata type selectors for the graph fetch. The agency categories
    /// have no graph mapping and fail with `InvalidCategory`.
    pub fn graph_types(self) -> Result<GraphTypeSelector> {
        match self {
            Category::Tso => Ok(GraphTypeSelector {
                // transmission system operator
                strict: &["Q112046"],
                fallback: &["Q1326624"],
                keywords: &[
                    "transmission",
                    "grid",
                    "system operator",
                    "operator",
                    "electricidad",
                    "energia",
                ],
            }),
            Category::Regulator => Ok(GraphTypeSelector {
                // regulatory agency/body
                strict: &["Q1639780"],
                fallback: &[],
                keywords: &[
                    "energy",
                    "electricity",
                    "power",
                    "grid",
                    "renewable",
                    "renewables",
                    "electricidad",
                    "energia",
                ],
            }),
            Category::Ministry => Ok(GraphTypeSelector {
                // ministry of energy, energy policy
                strict: &["Q19973795"],
                fallback: &["Q1805337"],
                keywords: &["energy", "electricity", "power"],
            }),
            Category::RenewablesAgency | Category::NuclearAgency => {
                Err(SeedError::InvalidCategory(self.key().to_string()))
            }
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Tests whether a label + description blob is relevant to a category.
///
/// The blob is normalized before matching, so callers may pass raw text.
/// Categories without a keyword list accept everything.
pub fn is_relevant(category: Category, text: &str) -> bool {
    let Some(keywords) = category.relevance_keywords() else {
        return true;
    };
    let normalized = normalize_for_match(text);
    keywords
        .iter()
        .any(|kw| normalized.contains(&normalize_for_match(kw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for category in ALL_CATEGORIES {
            assert_eq!(Category::parse(category.key()).unwrap(), category);
        }
    }

    #[test]
    fn test_parse_unknown_category_fails() {
        let err = Category::parse("DistributionOperator").unwrap_err();
        assert!(matches!(err, SeedError::InvalidCategory(_)));
    }

    #[test]
    fn test_tso_keywords() {
        assert!(is_relevant(
            Category::Tso,
            "kenya power electricity transmission operator"
        ));
        assert!(is_relevant(Category::Tso, "National Grid Operator"));
        assert!(!is_relevant(Category::Tso, "wildlife conservation charity"));
    }

    #[test]
    fn test_regulator_keywords() {
        assert!(is_relevant(Category::Regulator, "Energy Regulatory Commission"));
        assert!(is_relevant(Category::Regulator, "utilities authority"));
        assert!(!is_relevant(Category::Regulator, "solar panel manufacturer"));
    }

    #[test]
    fn test_ministry_keywords() {
        assert!(is_relevant(Category::Ministry, "Ministry of Energy"));
        assert!(is_relevant(Category::Ministry, "Department of Power"));
        assert!(!is_relevant(Category::Ministry, "national oil company"));
    }

    #[test]
    fn test_agency_categories_pass_everything() {
        assert!(is_relevant(Category::RenewablesAgency, "anything at all"));
        assert!(is_relevant(Category::NuclearAgency, ""));
    }

    #[test]
    fn test_matching_is_accent_insensitive() {
        assert!(is_relevant(Category::Regulator, "Autorité de régulation"));
    }

    #[test]
    fn test_category_exclusivity_of_tests() {
        // A regulator is never described as an agency and vice versa: the
        // prompt test blocks spell out the exclusions explicitly.
        assert!(Category::Regulator
            .test_block()
            .contains("Do NOT include renewables agencies or nuclear agencies"));
        assert!(Category::Ministry
            .test_block()
            .contains("Do NOT list regulators"));
        assert!(Category::RenewablesAgency
            .test_block()
            .contains("Do NOT list NGOs"));
    }

    #[test]
    fn test_graph_types_for_agencies_fail() {
        assert!(Category::RenewablesAgency.graph_types().is_err());
        assert!(Category::NuclearAgency.graph_types().is_err());
        for category in GRAPH_CATEGORIES {
            assert!(category.graph_types().is_ok());
        }
    }
}
