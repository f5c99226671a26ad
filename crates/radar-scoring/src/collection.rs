//! Shaping of raw collected records into [`RunData`].
//!
//! Collectors deliver ads, Reddit mentions, insight clusters and gap findings
//! as flat record lists. This module reduces them to the counts, ratios and
//! texts the aggregator consumes.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use radar_core::ScoringConfig;
use serde::{Deserialize, Serialize};

use crate::confidence::{tokenize, word_set};
use crate::math::unit;
use crate::run::{
    calculate_run_scores, AdStats, DataWindow, GapStats, RedditStats, RunData, RunScores,
    DEFAULT_SENTIMENT_NEG_RATIO,
};

// ---------------------------------------------------------------------------
// Raw records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdCreative {
    pub advertiser_name: String,
    pub headline: String,
    pub body: String,
    pub days_running: f64,
    pub first_seen: Option<DateTime<Utc>>,
}

impl AdCreative {
    fn text(&self) -> String {
        join_text(&self.headline, &self.body)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedditMention {
    pub title: String,
    pub body: String,
    pub upvotes: i64,
    /// Sentiment in `[-1, 1]` when the collector labelled it.
    pub sentiment: Option<f64>,
    pub posted_at: Option<DateTime<Utc>>,
}

impl RedditMention {
    fn text(&self) -> String {
        join_text(&self.title, &self.body)
    }

    fn is_negative(&self) -> Option<bool> {
        self.sentiment.map(|s| s < 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterKind {
    /// Recurring ad messaging angle.
    Angle,
    /// Recurring user complaint.
    Objection,
    /// Recurring feature request.
    Feature,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightCluster {
    pub kind: ClusterKind,
    pub label: String,
    #[serde(default)]
    pub frequency: u32,
    /// Mean intensity of the clustered items, in `[0, 1]`.
    #[serde(default)]
    pub intensity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapType {
    Product,
    Offer,
    Positioning,
    Trust,
    Pricing,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapOpportunity {
    pub gap_type: GapType,
    #[serde(default)]
    pub title: String,
}

/// Everything collected for one run, before shaping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunCollection {
    pub ads: Vec<AdCreative>,
    pub mentions: Vec<RedditMention>,
    pub clusters: Vec<InsightCluster>,
    pub gaps: Vec<GapOpportunity>,
}

// ---------------------------------------------------------------------------
// Shaping
// ---------------------------------------------------------------------------

/// Reduce raw records to the statistics the aggregator consumes.
#[must_use]
pub fn shape_run_data(collection: &RunCollection) -> RunData {
    let run = RunData {
        ads: shape_ads(collection),
        reddit: shape_reddit(collection),
        gaps: shape_gaps(collection),
        window: data_window(collection),
    };

    tracing::debug!(
        ads = collection.ads.len(),
        mentions = collection.mentions.len(),
        clusters = collection.clusters.len(),
        gaps = collection.gaps.len(),
        unique_advertisers = run.ads.unique_advertisers,
        "shaped run data"
    );

    run
}

/// Shape `collection` and score it in one step.
#[must_use]
pub fn calculate_scores(
    collection: &RunCollection,
    now: DateTime<Utc>,
    config: &ScoringConfig,
) -> RunScores {
    calculate_run_scores(&shape_run_data(collection), now, config)
}

fn shape_ads(collection: &RunCollection) -> AdStats {
    let advertisers: HashSet<String> = collection
        .ads
        .iter()
        .map(|ad| ad.advertiser_name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect();

    let total_creatives = saturating_u32(collection.ads.len());

    let largest_angle = clusters_of(collection, ClusterKind::Angle)
        .map(|c| c.frequency)
        .max();
    let repetition_index = match largest_angle {
        Some(frequency) if total_creatives > 0 => {
            Some(unit(f64::from(frequency) / f64::from(total_creatives)))
        }
        _ => None,
    };

    AdStats {
        unique_advertisers: saturating_u32(advertisers.len()),
        total_creatives,
        repetition_index,
        days_running: collection.ads.iter().map(|ad| ad.days_running).collect(),
        angle_texts: collection
            .ads
            .iter()
            .map(AdCreative::text)
            .filter(|t| !t.is_empty())
            .collect(),
    }
}

fn shape_reddit(collection: &RunCollection) -> RedditStats {
    let objections: Vec<&InsightCluster> =
        clusters_of(collection, ClusterKind::Objection).collect();

    let complaint_frequency: f64 = objections.iter().map(|c| f64::from(c.frequency)).sum();
    let intensity = if objections.is_empty() {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let denom = objections.len() as f64;
        objections.iter().map(|c| unit(c.intensity)).sum::<f64>() / denom
    };

    let labelled: Vec<bool> = collection
        .mentions
        .iter()
        .filter_map(RedditMention::is_negative)
        .collect();
    let sentiment_neg_ratio = if labelled.is_empty() {
        None
    } else {
        let negative = labelled.iter().filter(|&&neg| neg).count();
        #[allow(clippy::cast_precision_loss)]
        let ratio = negative as f64 / labelled.len() as f64;
        Some(ratio)
    };

    // Unlabelled mentions count at the default negative share.
    #[allow(clippy::cast_precision_loss)]
    let weighted_score: f64 = collection
        .mentions
        .iter()
        .map(|m| {
            let weight = match m.is_negative() {
                Some(true) => 1.0,
                Some(false) => 0.0,
                None => DEFAULT_SENTIMENT_NEG_RATIO,
            };
            m.upvotes.max(0) as f64 * weight
        })
        .sum();

    let pain_texts = objections
        .iter()
        .map(|c| c.label.clone())
        .chain(
            collection
                .mentions
                .iter()
                .filter(|m| m.is_negative() != Some(false))
                .map(RedditMention::text),
        )
        .filter(|t| !t.trim().is_empty())
        .collect();

    RedditStats {
        mention_count: saturating_u32(collection.mentions.len()),
        complaint_frequency,
        intensity,
        sentiment_neg_ratio,
        weighted_score,
        pain_texts,
    }
}

fn shape_gaps(collection: &RunCollection) -> GapStats {
    let features: Vec<&InsightCluster> = clusters_of(collection, ClusterKind::Feature).collect();

    let trust_gap = if collection.gaps.is_empty() {
        None
    } else {
        let trust = collection
            .gaps
            .iter()
            .filter(|g| g.gap_type == GapType::Trust)
            .count();
        #[allow(clippy::cast_precision_loss)]
        let share = trust as f64 / collection.gaps.len() as f64;
        Some(share)
    };

    if features.is_empty() {
        return GapStats {
            feature_cluster_count: 0,
            promise_coverage: 0.0,
            missing_feature_rate: 0.0,
            trust_gap,
        };
    }

    let ad_texts: Vec<String> = collection.ads.iter().map(AdCreative::text).collect();
    let ad_words = word_set(&ad_texts);
    let covered: Vec<bool> = features
        .iter()
        .map(|c| tokenize(&c.label).any(|w| ad_words.contains(&w)))
        .collect();

    let covered_count = covered.iter().filter(|&&c| c).count();
    #[allow(clippy::cast_precision_loss)]
    let promise_coverage = covered_count as f64 / features.len() as f64;

    let total_frequency: u64 = features.iter().map(|c| u64::from(c.frequency)).sum();
    let missing_feature_rate = if total_frequency == 0 {
        1.0 - promise_coverage
    } else {
        let uncovered: u64 = features
            .iter()
            .zip(&covered)
            .filter(|(_, &is_covered)| !is_covered)
            .map(|(c, _)| u64::from(c.frequency))
            .sum();
        frequency_share(uncovered, total_frequency)
    };

    GapStats {
        feature_cluster_count: saturating_u32(features.len()),
        promise_coverage,
        missing_feature_rate,
        trust_gap,
    }
}

fn data_window(collection: &RunCollection) -> DataWindow {
    let dates = collection
        .ads
        .iter()
        .filter_map(|ad| ad.first_seen)
        .chain(collection.mentions.iter().filter_map(|m| m.posted_at));

    let mut window = DataWindow::default();
    for date in dates {
        window.oldest = Some(window.oldest.map_or(date, |o| o.min(date)));
        window.newest = Some(window.newest.map_or(date, |n| n.max(date)));
    }
    window
}

fn clusters_of(
    collection: &RunCollection,
    kind: ClusterKind,
) -> impl Iterator<Item = &InsightCluster> {
    collection.clusters.iter().filter(move |c| c.kind == kind)
}

fn join_text(a: &str, b: &str) -> String {
    format!("{} {}", a.trim(), b.trim()).trim().to_string()
}

#[allow(clippy::cast_precision_loss)]
fn frequency_share(part: u64, whole: u64) -> f64 {
    part as f64 / whole as f64
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
