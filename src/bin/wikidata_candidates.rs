use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use institution_seed_builder::{
    fetch_graph_rows, load_country_refs, write_seed_csv, WikidataClient,
};

/// Fetch candidate institutions from the Wikidata query service, one query
/// per (country, category) unit, written as a CSV for manual curation.
#[derive(Debug, Parser)]
#[command(name = "wikidata_candidates")]
struct Args {
    /// Country list CSV with `country_qid` and `country_label` columns.
    #[arg(long, default_value = "data/country_tiers.csv")]
    countries: PathBuf,

    #[arg(long, default_value = "outputs/wikidata_candidates.csv")]
    out: PathBuf,

    /// Result cap per query.
    #[arg(long, default_value_t = 2000)]
    limit: usize,

    /// Pause after each successful query, in milliseconds.
    #[arg(long, default_value_t = 800)]
    sleep_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    let countries = load_country_refs(&args.countries)?;

    let client = WikidataClient::new().with_pause(Duration::from_millis(args.sleep_ms));

    let rows = fetch_graph_rows(&client, &countries, args.limit).await?;

    write_seed_csv(&args.out, &rows)?;
    println!("Wrote {} rows to {}", rows.len(), args.out.display());

    Ok(())
}
