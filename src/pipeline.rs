use std::collections::HashSet;

use log::info;
use tokio::time::sleep;

use crate::category::{Category, ALL_CATEGORIES, GRAPH_CATEGORIES};
use crate::config::GeneratorOptions;
use crate::error::Result;
use crate::ingestion::CountryRef;
use crate::llm::{SeedGenerator, SeedItem, SeedModel};
use crate::schema::{GraphCandidate, SeedRow, SeedSource};
use crate::text::{dedupe_rows, normalize_for_match};
use crate::wikidata::{fetch_candidates, filter_relevant, SparqlEndpoint};

fn llm_row(country: &str, category: Category, item: SeedItem) -> SeedRow {
    SeedRow {
        country_label: country.to_string(),
        category,
        name: item.name,
        also_known_as: item.also_known_as,
        official_website: item.official_website,
        confidence: Some(item.confidence),
        evidence: item.evidence,
        comment: item.comment,
        source: SeedSource::Chatgpt,
    }
}

fn graph_row(fallback_label: &str, candidate: GraphCandidate) -> SeedRow {
    SeedRow {
        country_label: candidate
            .country_label
            .unwrap_or_else(|| fallback_label.to_string()),
        category: candidate.category,
        name: candidate.operator_label.unwrap_or_default(),
        also_known_as: String::new(),
        official_website: candidate.website.unwrap_or_default(),
        confidence: None,
        evidence: String::new(),
        comment: String::new(),
        source: SeedSource::Wikidata,
    }
}

/// Runs the full LLM seeding loop: countries in input order, categories in
/// declared order, one generation call per unit, optional per-item
/// verification, then normalized-key deduplication.
///
/// The seen-key set lives here and spans the whole run, so an institution
/// returned for several countries or categories is emitted once. When
/// `dedupe_against_manual` is set, `manual_keys` pre-seeds the exclusions.
pub async fn generate_seed_rows<M: SeedModel>(
    model: &M,
    options: &GeneratorOptions,
    countries: &[String],
    manual_keys: &HashSet<String>,
) -> Result<Vec<SeedRow>> {
    let generator = SeedGenerator::new(model, options);

    if options.dedupe_against_manual {
        info!("Loaded {} manual seeds for dedupe", manual_keys.len());
    }

    let mut rows: Vec<SeedRow> = Vec::new();
    let mut seen_keys: HashSet<String> = HashSet::new();

    for country in countries {
        for category in ALL_CATEGORIES {
            info!("Seeding {} -> {}", country, category);

            let mut items = generator.generate(country, category).await?;

            if options.verify && !items.is_empty() {
                let mut verified = Vec::with_capacity(items.len());
                for item in items {
                    let replacement = generator.verify(country, category, &item.name).await?;
                    verified.push(replacement.unwrap_or(item));
                    sleep(options.sleep).await;
                }
                items = verified;
            }

            for item in items {
                let key = normalize_for_match(&item.name);
                if key.is_empty() || seen_keys.contains(&key) {
                    continue;
                }
                if options.dedupe_against_manual && manual_keys.contains(&key) {
                    continue;
                }
                seen_keys.insert(key);
                rows.push(llm_row(country, category, item));
            }

            sleep(options.sleep).await;
        }
    }

    info!(
        "Collected {} rows ({} unique keys)",
        rows.len(),
        seen_keys.len()
    );

    Ok(rows)
}

/// Runs the graph fetch loop over the categories with a Wikidata type
/// mapping, in the same country-major category-minor order, and dedupes the
/// result on (country, category, name).
pub async fn fetch_graph_rows(
    endpoint: &(impl SparqlEndpoint + ?Sized),
    countries: &[CountryRef],
    limit: usize,
) -> Result<Vec<SeedRow>> {
    let mut rows: Vec<SeedRow> = Vec::new();

    for country in countries {
        for category in GRAPH_CATEGORIES {
            info!("Fetching {} -> {}", country.country_label, category);

            let candidates =
                fetch_candidates(endpoint, &country.country_qid, category, limit).await?;
            let relevant = filter_relevant(candidates);

            rows.extend(
                relevant
                    .into_iter()
                    .map(|candidate| graph_row(&country.country_label, candidate)),
            );
        }
    }

    let rows = dedupe_rows(rows, &["country_label", "category", "name"]);
    info!("Collected {} graph rows", rows.len());

    Ok(rows)
}
