//! Command handlers. Each loads its input file, runs the engine and returns
//! pretty-printed JSON for `main` to print.

use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use radar_core::{load_input_file, ScoringConfig};
use radar_scoring::build_to_profit::IdeaProfile;
use radar_scoring::{
    calculate_run_scores, calculate_scores, calculate_trend_velocity,
    rank_ideas_by_build_to_profit, rank_ugc_assets, RunCollection, RunData, TrendDataPoint,
    UgcAsset, UgcNormalization,
};

/// Parse an optional RFC 3339 timestamp, falling back to the current time.
///
/// # Errors
///
/// Returns an error if `raw` is present but not valid RFC 3339.
pub(crate) fn parse_now(raw: Option<&str>) -> anyhow::Result<DateTime<Utc>> {
    match raw {
        Some(s) => Ok(DateTime::parse_from_rfc3339(s)
            .with_context(|| format!("invalid --now timestamp '{s}'"))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

pub(crate) fn run_score(
    input: &Path,
    now: Option<&str>,
    shaped: bool,
    config: &ScoringConfig,
) -> anyhow::Result<String> {
    let now = parse_now(now)?;
    let scores = if shaped {
        let run: RunData = load_input_file(input)?;
        calculate_run_scores(&run, now, config)
    } else {
        let collection: RunCollection = load_input_file(input)?;
        tracing::info!(
            ads = collection.ads.len(),
            mentions = collection.mentions.len(),
            "scoring collected run"
        );
        calculate_scores(&collection, now, config)
    };
    Ok(serde_json::to_string_pretty(&scores)?)
}

pub(crate) fn run_trend(input: &Path) -> anyhow::Result<String> {
    let points: Vec<TrendDataPoint> = load_input_file(input)?;
    let velocity = calculate_trend_velocity(&points);
    Ok(serde_json::to_string_pretty(&velocity)?)
}

pub(crate) fn run_rank_ideas(input: &Path, config: &ScoringConfig) -> anyhow::Result<String> {
    let profiles: Vec<IdeaProfile> = load_input_file(input)?;
    let ideas: Vec<_> = profiles.iter().map(|p| p.to_idea(config)).collect();
    let ranked = rank_ideas_by_build_to_profit(&ideas).context("idea ranking failed")?;
    Ok(serde_json::to_string_pretty(&ranked)?)
}

pub(crate) fn run_rank_ugc(input: &Path, now: Option<&str>) -> anyhow::Result<String> {
    let now = parse_now(now)?;
    let assets: Vec<UgcAsset> = load_input_file(input)?;
    let ranked = rank_ugc_assets(&assets, now, &UgcNormalization::default());
    Ok(serde_json::to_string_pretty(&ranked)?)
}
