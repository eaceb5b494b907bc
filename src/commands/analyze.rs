//! Single-listing commands: analyze, inspect

use chrono::Utc;
use colored::Colorize;

use carscout::cli::ToleranceArgs;
use carscout::config::Config;
use carscout::error::Result;
use carscout::extract;
use carscout::fetch::{self, HttpFetcher};
use carscout::listing::ListingRecord;
use carscout::search::build_search_url_for;

/// Fetch a listing, extract it and print the market search URL
pub fn cmd_analyze(url: &str, overrides: &ToleranceArgs, json: bool) -> Result<()> {
    let config = Config::load()?;
    let fetcher = HttpFetcher::new(config.fetch.clone());

    if !json {
        println!("\n{} {}", "Fetching".cyan().bold(), url);
    }
    let record = fetch::fetch_listing(&fetcher, url)?;
    report(&config, &record, overrides, json)
}

/// Run the pipeline over a saved HTML document
pub fn cmd_inspect(file: &str, url: Option<&str>, overrides: &ToleranceArgs, json: bool) -> Result<()> {
    let config = Config::load()?;
    let html = std::fs::read_to_string(file)?;

    let source_url = match url {
        Some(u) => fetch::validate_listing_url(u)?.to_string(),
        None => String::new(),
    };
    let record = extract::extract(&html, &source_url)?;
    report(&config, &record, overrides, json)
}

fn report(config: &Config, record: &ListingRecord, overrides: &ToleranceArgs, json: bool) -> Result<()> {
    let tolerances = overrides.apply(&config.tolerances);
    let search_url = build_search_url_for(&config.search, record, &tolerances);

    if json {
        let output = serde_json::json!({
            "listing": record,
            "search_url": search_url,
            "tolerances": tolerances,
            "analyzed_at": Utc::now().to_rfc3339(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_record(record);
    println!("\n  {}", "Similar listings:".bold());
    println!("  {}", search_url.underline());
    println!();
    Ok(())
}

/// Human-readable listing summary; unresolved fields are dimmed
pub fn print_record(record: &ListingRecord) {
    println!("\n{}\n", record.title.bold());
    field("Price", &record.price_display, record.price > 0.0);
    field("Brand", &record.brand, record.has_brand());
    field("Model", &record.model, record.has_model());
    field("Year", &record.year.to_string(), record.year > 0);
    field("Mileage", &format!("{} km", record.mileage_km), record.mileage_km > 0);
    field("Fuel", record.fuel.as_str(), record.fuel.is_known());
    field("Gearbox", record.gearbox.as_str(), record.gearbox.is_known());
    field("Body", record.body.as_str(), record.body.is_known());
    field(
        "Power",
        &record.power_hp.map(|hp| format!("{} hp", hp)).unwrap_or_else(|| "-".into()),
        record.power_hp.is_some(),
    );
    field(
        "Engine",
        &record.engine_size_cc.map(|cc| format!("{} cc", cc)).unwrap_or_else(|| "-".into()),
        record.engine_size_cc.is_some(),
    );
    field("Condition", record.condition.as_str(), record.condition.is_known());
    field("Color", &record.color, record.color != carscout::listing::UNKNOWN);
    if !record.source_url.is_empty() {
        println!("  {:<10} {}", "URL:", record.source_url.dimmed());
    }
}

fn field(label: &str, value: &str, known: bool) {
    let label = format!("{}:", label);
    if known {
        println!("  {:<10} {}", label, value);
    } else {
        println!("  {:<10} {}", label, value.dimmed());
    }
}
