use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use institution_seed_builder::{
    generate_seed_rows, load_countries, load_manual_seed_keys, resolve_api_key, write_seed_csv,
    GeneratorOptions, OpenAiClient,
};

/// Generate the LLM seed list: one structured-output request per
/// (country, category) unit, written as a CSV for manual curation.
#[derive(Debug, Parser)]
#[command(name = "llm_seeds")]
struct Args {
    #[arg(long, default_value = "gpt-5.2")]
    model: String,

    /// Hard cap per (country, category). Prompt logic prevents overlisting
    /// small countries.
    #[arg(long, default_value_t = 5)]
    max_items: usize,

    /// Lower is more deterministic. Best quality usually 0.0-0.2.
    #[arg(long, default_value_t = 0.1)]
    temperature: f32,

    /// Pause between API calls, in milliseconds.
    #[arg(long, default_value_t = 500)]
    sleep_ms: u64,

    /// Run a second-pass verifier per returned item (best accuracy, more
    /// calls).
    #[arg(long)]
    verify: bool,

    /// Skip institutions already present in the manual seed list.
    #[arg(long)]
    dedupe_against_manual: bool,

    /// Country list CSV with a `country_label` column.
    #[arg(long, default_value = "data/country_tiers.csv")]
    countries: PathBuf,

    /// Manually curated seed CSV with a `name` column.
    #[arg(long, default_value = "data/names_seed.csv")]
    manual_seeds: PathBuf,

    #[arg(long, default_value = "outputs/chatgpt_seeds.csv")]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    let countries = load_countries(&args.countries)?;

    let manual_keys = if args.dedupe_against_manual {
        load_manual_seed_keys(&args.manual_seeds)?
    } else {
        HashSet::new()
    };

    let api_key = resolve_api_key("OPENAI_API_KEY", || {
        rpassword::prompt_password("Enter your OpenAI API key: ")
    })?;

    let options = GeneratorOptions {
        model: args.model,
        max_items: args.max_items,
        temperature: args.temperature,
        sleep: Duration::from_millis(args.sleep_ms),
        verify: args.verify,
        dedupe_against_manual: args.dedupe_against_manual,
    };

    let client = OpenAiClient::new(api_key, options.model.clone());

    let rows = generate_seed_rows(&client, &options, &countries, &manual_keys).await?;

    write_seed_csv(&args.out, &rows)?;
    println!("Wrote {} rows to {}", rows.len(), args.out.display());

    Ok(())
}
