//! Ranking candidates against a reference listing

use chrono::Utc;
use colored::Colorize;
use tracing::warn;

use carscout::config::Config;
use carscout::error::Result;
use carscout::fetch::{self, HttpFetcher};
use carscout::listing::ListingRecord;
use carscout::score::{classify, ScoreResult, Tier};

/// Fetch the reference and every candidate, then print candidates by score
pub fn cmd_compare(reference_url: &str, candidate_urls: &[String], json: bool) -> Result<()> {
    let config = Config::load()?;
    let fetcher = HttpFetcher::new(config.fetch.clone());

    if !json {
        println!("\n{} {}", "Reference".cyan().bold(), reference_url);
    }
    let reference = fetch::fetch_listing(&fetcher, reference_url)?;

    let mut scored: Vec<(ListingRecord, ScoreResult)> = Vec::new();
    let mut failed: Vec<(String, String)> = Vec::new();
    for url in candidate_urls {
        if !json {
            println!("  Fetching {}...", url);
        }
        match fetch::fetch_listing(&fetcher, url) {
            Ok(candidate) => {
                let result = classify(&reference, &candidate);
                scored.push((candidate, result));
            }
            Err(e) => {
                warn!(url = %url, error = %e, "skipping candidate");
                failed.push((url.clone(), e.to_string()));
            }
        }
    }

    rank(&mut scored);

    if json {
        let results: Vec<_> = scored
            .iter()
            .map(|(listing, result)| {
                serde_json::json!({
                    "listing": listing,
                    "tier": result.tier,
                    "score": result.score,
                    "factors": result.factors,
                })
            })
            .collect();
        let failures: Vec<_> = failed
            .iter()
            .map(|(url, error)| serde_json::json!({ "url": url, "error": error }))
            .collect();
        let output = serde_json::json!({
            "reference": reference,
            "results": results,
            "failed": failures,
            "compared_at": Utc::now().to_rfc3339(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "\n{} {} {} ({}, {} km, {})\n",
        "Compared against".bold(),
        reference.brand,
        reference.model,
        reference.year,
        reference.mileage_km,
        reference.price_display
    );

    if scored.is_empty() {
        println!("  No candidates could be scored.");
    }
    for (listing, result) in &scored {
        println!(
            "  {:>4}  {}  {}",
            result.score,
            colored_tier(result.tier),
            listing.title
        );
        println!("        {}", result.rationale().dimmed());
        println!("        {}", listing.source_url.dimmed());
    }

    if !failed.is_empty() {
        println!("\n  {} {} candidate(s) skipped:", "!".yellow(), failed.len());
        for (url, error) in &failed {
            println!("    {} - {}", url, error);
        }
    }
    println!();
    Ok(())
}

/// Highest score first; ties keep input order
fn rank(scored: &mut [(ListingRecord, ScoreResult)]) {
    scored.sort_by(|a, b| b.1.score.cmp(&a.1.score));
}

fn colored_tier(tier: Tier) -> String {
    let label = format!("{:<10}", tier.as_str());
    match tier {
        Tier::Excellent => label.green().bold().to_string(),
        Tier::Good => label.green().to_string(),
        Tier::Acceptable => label.yellow().to_string(),
        Tier::Poor => label.red().to_string(),
        Tier::Excluded => label.dimmed().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(url: &str, score: i64) -> (ListingRecord, ScoreResult) {
        (
            ListingRecord::unknown(url),
            ScoreResult { tier: Tier::for_score(score as f64), score, factors: Vec::new() },
        )
    }

    #[test]
    fn test_rank_by_score_descending() {
        let mut results = vec![scored("a", 85), scored("b", 122), scored("c", 0), scored("d", 85)];
        rank(&mut results);
        let order: Vec<&str> = results.iter().map(|(l, _)| l.source_url.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "d", "c"]);
    }
}
