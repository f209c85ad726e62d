use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use log::warn;
use serde::Deserialize;
use tokio::time::sleep;

use crate::category::{is_relevant, Category};
use crate::error::{Result, SeedError};
use crate::schema::GraphCandidate;
use crate::text::normalize_for_match;

pub const WIKIDATA_SPARQL: &str = "https://query.wikidata.org/sparql";

pub const DEFAULT_USER_AGENT: &str =
    "institution-seed-builder/0.1 (https://github.com/open-energy-transition/institution-seed-builder)";

/// SPARQL JSON results, decoded to the subset of the format we consume.
#[derive(Debug, Clone, Deserialize)]
pub struct SparqlResponse {
    pub results: SparqlResults,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SparqlResults {
    pub bindings: Vec<SparqlBinding>,
}

pub type SparqlBinding = HashMap<String, SparqlValue>;

#[derive(Debug, Clone, Deserialize)]
pub struct SparqlValue {
    #[serde(rename = "type", default)]
    pub value_type: String,
    pub value: String,
}

impl SparqlValue {
    pub fn uri(value: impl Into<String>) -> SparqlValue {
        SparqlValue {
            value_type: "uri".to_string(),
            value: value.into(),
        }
    }

    pub fn literal(value: impl Into<String>) -> SparqlValue {
        SparqlValue {
            value_type: "literal".to_string(),
            value: value.into(),
        }
    }
}

/// A SPARQL query surface. The production implementation is
/// [`WikidataClient`]; tests inject stubs.
#[async_trait]
pub trait SparqlEndpoint {
    async fn query(&self, query: &str) -> Result<SparqlResponse>;
}

/// HTTPS client for the Wikidata query service, with bounded retries,
/// linear backoff and a post-query pause to respect the usage policy.
pub struct WikidataClient {
    client: reqwest::Client,
    endpoint: String,
    user_agent: String,
    timeout: Duration,
    retries: u32,
    backoff: Duration,
    pause: Duration,
}

impl WikidataClient {
    pub fn new() -> WikidataClient {
        WikidataClient {
            client: reqwest::Client::new(),
            endpoint: WIKIDATA_SPARQL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(120),
            retries: 3,
            backoff: Duration::from_secs(2),
            pause: Duration::from_millis(800),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> WikidataClient {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> WikidataClient {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_retries(mut self, retries: u32, backoff: Duration) -> WikidataClient {
        self.retries = retries.max(1);
        self.backoff = backoff;
        self
    }

    pub fn with_pause(mut self, pause: Duration) -> WikidataClient {
        self.pause = pause;
        self
    }

    async fn attempt(&self, query: &str) -> Result<SparqlResponse> {
        let res = self
            .client
            .get(&self.endpoint)
            .query(&[("query", query), ("format", "json")])
            .header("Accept", "application/sparql+json")
            .header("User-Agent", &self.user_agent)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(SeedError::SparqlStatus { status, body });
        }

        Ok(res.json::<SparqlResponse>().await?)
    }
}

impl Default for WikidataClient {
    fn default() -> WikidataClient {
        WikidataClient::new()
    }
}

#[async_trait]
impl SparqlEndpoint for WikidataClient {
    async fn query(&self, query: &str) -> Result<SparqlResponse> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.attempt(query).await {
                Ok(response) => {
                    sleep(self.pause).await;
                    return Ok(response);
                }
                Err(err) if attempt < self.retries => {
                    let wait = self.backoff * attempt;
                    warn!(
                        "SPARQL attempt {}/{} failed: {}. Sleeping {:?}",
                        attempt, self.retries, err, wait
                    );
                    sleep(wait).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Builds the candidate query for one (country, category) unit: entities
/// typed `P31/P279*` into any of `types`, registered in the country (`P17`),
/// with optional website and English description.
pub fn build_candidates_query(country_qid: &str, types: &[&str], limit: usize) -> String {
    let types_values = types
        .iter()
        .map(|qid| format!("wd:{}", qid))
        .collect::<Vec<_>>()
        .join("\n    ");

    format!(
        r#"SELECT ?item ?itemLabel ?country ?countryLabel ?type ?typeLabel ?website ?desc WHERE {{
  VALUES ?country {{ wd:{country_qid} }}
  VALUES ?type {{
    {types_values}
  }}

  ?item wdt:P17 ?country .
  ?item wdt:P31/wdt:P279* ?type .

  OPTIONAL {{ ?item wdt:P856 ?website. }}
  OPTIONAL {{
    ?item schema:description ?desc .
    FILTER(LANG(?desc) = "en")
  }}

  SERVICE wikibase:label {{ bd:serviceParam wikibase:language "en". }}
}}
LIMIT {limit}"#
    )
}

fn binding_str<'a>(binding: &'a SparqlBinding, key: &str) -> Option<&'a str> {
    binding
        .get(key)
        .map(|v| v.value.as_str())
        .filter(|v| !v.is_empty())
}

fn qid_from_uri(uri: &str) -> &str {
    uri.rsplit('/').next().unwrap_or(uri)
}

fn candidate_from_binding(category: Category, binding: &SparqlBinding) -> Option<GraphCandidate> {
    let item = binding_str(binding, "item")?;

    Some(GraphCandidate {
        category,
        operator_qid: qid_from_uri(item).to_string(),
        operator_label: binding_str(binding, "itemLabel").map(str::to_string),
        operator_type_qid: binding_str(binding, "type")
            .map(qid_from_uri)
            .map(str::to_string),
        operator_type_label: binding_str(binding, "typeLabel").map(str::to_string),
        country_qid: binding_str(binding, "country")
            .map(qid_from_uri)
            .map(str::to_string),
        country_label: binding_str(binding, "countryLabel").map(str::to_string),
        website: binding_str(binding, "website").map(str::to_string),
        description_en: binding_str(binding, "desc").map(str::to_string),
    })
}

/// Fetches candidate institutions of `category` registered in `country_qid`.
///
/// One query over strict + fallback types, then a keyword filter on the
/// normalized label + description blob using the category's wikidata
/// keyword list. Retrying and rate limiting live in the endpoint.
/// Fails with `InvalidCategory` for the LLM-only agency categories.
pub async fn fetch_candidates(
    endpoint: &(impl SparqlEndpoint + ?Sized),
    country_qid: &str,
    category: Category,
    limit: usize,
) -> Result<Vec<GraphCandidate>> {
    let selector = category.graph_types()?;

    let mut types: Vec<&str> = Vec::new();
    for qid in selector.strict.iter().chain(selector.fallback.iter()) {
        if !types.contains(qid) {
            types.push(qid);
        }
    }

    let query = build_candidates_query(country_qid, &types, limit);
    let response = endpoint.query(&query).await?;

    let keywords: Vec<String> = selector
        .keywords
        .iter()
        .map(|kw| normalize_for_match(kw))
        .collect();

    let candidates = response
        .results
        .bindings
        .iter()
        .filter_map(|binding| candidate_from_binding(category, binding))
        .filter(|candidate| {
            let text = normalize_for_match(&candidate.match_text());
            keywords.iter().any(|kw| text.contains(kw.as_str()))
        })
        .collect();

    Ok(candidates)
}

/// Retains only candidates registered in one of the allowed countries.
pub fn filter_to_countries(
    candidates: Vec<GraphCandidate>,
    allowed_qids: &HashSet<String>,
) -> Vec<GraphCandidate> {
    candidates
        .into_iter()
        .filter(|c| {
            c.country_qid
                .as_deref()
                .map(str::trim)
                .is_some_and(|qid| !qid.is_empty() && allowed_qids.contains(qid))
        })
        .collect()
}

/// Applies the per-category relevance rules to fetched candidates.
///
/// Candidates with no label are dropped unconditionally; the rest must pass
/// the category keyword test on their label + description blob.
pub fn filter_relevant(candidates: Vec<GraphCandidate>) -> Vec<GraphCandidate> {
    candidates
        .into_iter()
        .filter(|c| {
            c.operator_label
                .as_deref()
                .is_some_and(|label| !label.trim().is_empty())
        })
        .filter(|c| is_relevant(c.category, &c.match_text()))
        .collect()
}
