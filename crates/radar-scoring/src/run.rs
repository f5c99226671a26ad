//! Run-level aggregation: one call turns a run's shaped statistics into all
//! six scores.
//!
//! Sparse runs never fail. Missing signals fall back to the neutral defaults
//! below and show up as lower confidence instead.

use chrono::{DateTime, Utc};
use radar_core::ScoringConfig;
use serde::{Deserialize, Serialize};

use crate::components::{
    calculate_average_longevity, calculate_dissatisfaction_score, calculate_misalignment_score,
    calculate_opportunity_score, calculate_saturation_score, DissatisfactionInputs,
    MisalignmentInputs, OpportunityInputs, SaturationInputs,
};
use crate::confidence::{
    calculate_confidence_score, calculate_cross_source_alignment, calculate_recency,
    data_sufficiency_with, ConfidenceInputs,
};
use crate::math::unit;

/// Repetition index assumed when no angle clusters were found.
pub const DEFAULT_REPETITION_INDEX: f64 = 0.5;
/// Negative-sentiment share assumed when no mention carries a sentiment label.
pub const DEFAULT_SENTIMENT_NEG_RATIO: f64 = 0.6;
/// Trust gap assumed when gap analysis produced nothing to measure it from.
pub const DEFAULT_TRUST_GAP: f64 = 0.3;
/// Misalignment reported when there are no feature-request clusters.
pub const DEFAULT_MISALIGNMENT: f64 = 50.0;

// ---------------------------------------------------------------------------
// Shaped run statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdStats {
    pub unique_advertisers: u32,
    pub total_creatives: u32,
    /// `None` means "not measured"; [`DEFAULT_REPETITION_INDEX`] applies.
    pub repetition_index: Option<f64>,
    /// Days each collected ad has been running.
    pub days_running: Vec<f64>,
    /// Ad angle / headline text used for cross-source alignment.
    pub angle_texts: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedditStats {
    pub mention_count: u32,
    pub complaint_frequency: f64,
    pub intensity: f64,
    /// `None` means "not measured"; [`DEFAULT_SENTIMENT_NEG_RATIO`] applies.
    pub sentiment_neg_ratio: Option<f64>,
    pub weighted_score: f64,
    /// Pain-point text used for cross-source alignment.
    pub pain_texts: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GapStats {
    /// Zero means misalignment falls back to [`DEFAULT_MISALIGNMENT`].
    pub feature_cluster_count: u32,
    pub promise_coverage: f64,
    pub missing_feature_rate: f64,
    /// `None` means "not measured"; [`DEFAULT_TRUST_GAP`] applies.
    pub trust_gap: Option<f64>,
}

/// Oldest and newest observed data point of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataWindow {
    pub oldest: Option<DateTime<Utc>>,
    pub newest: Option<DateTime<Utc>>,
}

/// Everything the aggregator needs about one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunData {
    pub ads: AdStats,
    pub reddit: RedditStats,
    pub gaps: GapStats,
    pub window: DataWindow,
}

/// The six scores produced for a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunScores {
    pub saturation: f64,
    pub longevity: f64,
    pub dissatisfaction: f64,
    pub misalignment: f64,
    pub opportunity: f64,
    /// `[0, 1]`, two decimals; everything else is `[0, 100]`, one decimal.
    pub confidence: f64,
}

impl RunData {
    /// Return a copy with every field forced into its documented range.
    ///
    /// Negative or `NaN` amounts become 0 and `+inf` saturates to `f64::MAX`.
    /// Ratios are clamped to `[0, 1]` and a reversed window is swapped. Each
    /// correction is logged.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let mut run = self.clone();

        run.ads.repetition_index = run
            .ads
            .repetition_index
            .map(|r| ratio("ads.repetition_index", r));
        let days_before = run.ads.days_running.len();
        run.ads.days_running.retain(|d| d.is_finite());
        if run.ads.days_running.len() != days_before {
            tracing::warn!(
                dropped = days_before - run.ads.days_running.len(),
                "dropping non-finite ad day counts"
            );
        }
        for days in &mut run.ads.days_running {
            *days = amount("ads.days_running", *days);
        }

        run.reddit.complaint_frequency =
            amount("reddit.complaint_frequency", run.reddit.complaint_frequency);
        run.reddit.intensity = ratio("reddit.intensity", run.reddit.intensity);
        run.reddit.sentiment_neg_ratio = run
            .reddit
            .sentiment_neg_ratio
            .map(|r| ratio("reddit.sentiment_neg_ratio", r));
        run.reddit.weighted_score = amount("reddit.weighted_score", run.reddit.weighted_score);

        run.gaps.promise_coverage = ratio("gaps.promise_coverage", run.gaps.promise_coverage);
        run.gaps.missing_feature_rate =
            ratio("gaps.missing_feature_rate", run.gaps.missing_feature_rate);
        run.gaps.trust_gap = run.gaps.trust_gap.map(|r| ratio("gaps.trust_gap", r));

        if let (Some(oldest), Some(newest)) = (run.window.oldest, run.window.newest) {
            if newest < oldest {
                tracing::warn!(%oldest, %newest, "data window reversed; swapping");
                run.window = DataWindow {
                    oldest: Some(newest),
                    newest: Some(oldest),
                };
            }
        }

        run
    }
}

fn ratio(field: &'static str, value: f64) -> f64 {
    let clamped = unit(value);
    if (clamped - value).abs() > f64::EPSILON || value.is_nan() {
        tracing::warn!(field, value, clamped, "ratio out of range; clamping");
    }
    clamped
}

fn amount(field: &'static str, value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        return value;
    }
    if value.is_infinite() && value > 0.0 {
        tracing::warn!(field, "infinite amount; saturating to f64::MAX");
        return f64::MAX;
    }
    tracing::warn!(field, value, "invalid amount; treating as zero");
    0.0
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Compute all six scores for a run.
///
/// Order: saturation, longevity, dissatisfaction, misalignment, then
/// opportunity from those four. Confidence is an independent branch built
/// from counts, text overlap and the data window.
#[must_use]
pub fn calculate_run_scores(
    run: &RunData,
    now: DateTime<Utc>,
    config: &ScoringConfig,
) -> RunScores {
    let run = run.sanitized();

    let saturation = calculate_saturation_score(&SaturationInputs {
        unique_advertisers: run.ads.unique_advertisers,
        total_creatives: run.ads.total_creatives,
        repetition_index: run
            .ads
            .repetition_index
            .unwrap_or(DEFAULT_REPETITION_INDEX),
    });

    let longevity = calculate_average_longevity(&run.ads.days_running);

    let dissatisfaction = calculate_dissatisfaction_score(&DissatisfactionInputs {
        frequency: run.reddit.complaint_frequency,
        intensity: run.reddit.intensity,
        sentiment_neg_ratio: run
            .reddit
            .sentiment_neg_ratio
            .unwrap_or(DEFAULT_SENTIMENT_NEG_RATIO),
        weighted_score: run.reddit.weighted_score,
    });

    let misalignment = if run.gaps.feature_cluster_count == 0 {
        DEFAULT_MISALIGNMENT
    } else {
        calculate_misalignment_score(&MisalignmentInputs {
            promise_coverage: run.gaps.promise_coverage,
            missing_feature_rate: run.gaps.missing_feature_rate,
            trust_gap: run.gaps.trust_gap.unwrap_or(DEFAULT_TRUST_GAP),
        })
    };

    let opportunity = calculate_opportunity_score(&OpportunityInputs {
        longevity,
        dissatisfaction,
        misalignment,
        saturation,
    });

    let confidence = calculate_confidence_score(&ConfidenceInputs {
        data_sufficiency: data_sufficiency_with(
            config,
            run.ads.total_creatives,
            run.reddit.mention_count,
        ),
        cross_source_alignment: calculate_cross_source_alignment(
            &run.ads.angle_texts,
            &run.reddit.pain_texts,
        ),
        recency: calculate_recency(run.window.oldest, run.window.newest, now, config.max_age_days),
    });

    let scores = RunScores {
        saturation,
        longevity,
        dissatisfaction,
        misalignment,
        opportunity,
        confidence,
    };

    tracing::debug!(
        saturation,
        longevity,
        dissatisfaction,
        misalignment,
        opportunity,
        confidence,
        "run scores calculated"
    );

    scores
}
