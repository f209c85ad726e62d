//! # Institution Seed Builder
//!
//! A library for collecting and deduplicating lists of national
//! energy-sector institutions (transmission system operators, regulators,
//! ministries, renewable/nuclear agencies) across countries, by querying the
//! Wikidata SPARQL endpoint and an LLM structured-output API. Results are
//! merged into CSV seed files intended for manual curation, not as a final
//! authoritative dataset.
//!
//! ## Core Concepts
//!
//! - **Seed list**: candidate institutions awaiting human review
//! - **Category**: one of TSO, Regulator, Ministry, RenewablesAgency,
//!   NuclearAgency; categories are never mixed within a unit of work
//! - **Normalized key**: accent/case/punctuation-folded institution name,
//!   the dedup identity across sources
//! - **Unit of work**: one (country, category) pair; the pipeline iterates
//!   countries in input order and categories in declared order, strictly
//!   sequentially
//!
//! ## Example
//!
//! ```rust,ignore
//! use institution_seed_builder::*;
//! use std::collections::HashSet;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let api_key = resolve_api_key("OPENAI_API_KEY", || {
//!         rpassword::prompt_password("Enter your OpenAI API key: ")
//!     })?;
//!
//!     let options = GeneratorOptions::default();
//!     let client = OpenAiClient::new(api_key, options.model.clone());
//!
//!     let countries = load_countries(Path::new("data/country_tiers.csv"))?;
//!     let rows = generate_seed_rows(&client, &options, &countries, &HashSet::new()).await?;
//!
//!     write_seed_csv(Path::new("outputs/chatgpt_seeds.csv"), &rows)
//! }
//! ```

pub mod category;
pub mod config;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod llm;
pub mod pipeline;
pub mod schema;
pub mod text;
pub mod wikidata;

pub use category::{is_relevant, Category, GraphTypeSelector, ALL_CATEGORIES, GRAPH_CATEGORIES};
pub use config::{resolve_api_key, GeneratorOptions};
pub use error::{Result, SeedError};
pub use export::write_seed_csv;
pub use ingestion::*;
pub use llm::*;
pub use pipeline::{fetch_graph_rows, generate_seed_rows};
pub use schema::*;
pub use text::{dedupe_rows, normalize_for_match, FieldValues};
pub use wikidata::*;
