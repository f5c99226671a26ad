//! Component score calculators.
//!
//! Each function maps one group of collected signals to a 0-100 score rounded
//! to one decimal place. Inputs outside their documented ranges are clamped,
//! never rejected.

use serde::{Deserialize, Serialize};

use crate::math::{clamp, log1p, round_to, sigmoid, unit};

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

pub const SATURATION_W_ADVERTISERS: f64 = 0.6;
pub const SATURATION_W_CREATIVES: f64 = 0.3;
pub const SATURATION_W_REPETITION: f64 = 0.8;

/// Days running at which an ad's longevity score reaches 100.
pub const LONGEVITY_ANCHOR_DAYS: f64 = 180.0;

pub const DISSATISFACTION_W_FREQUENCY: f64 = 0.5;
pub const DISSATISFACTION_W_INTENSITY: f64 = 0.7;
pub const DISSATISFACTION_W_SENTIMENT: f64 = 0.6;
pub const DISSATISFACTION_W_WEIGHTED: f64 = 0.2;

pub const MISALIGNMENT_W_COVERAGE_GAP: f64 = 0.5;
pub const MISALIGNMENT_W_MISSING_FEATURES: f64 = 0.3;
pub const MISALIGNMENT_W_TRUST_GAP: f64 = 0.2;

pub const OPPORTUNITY_W_LONGEVITY: f64 = 0.35;
pub const OPPORTUNITY_W_DISSATISFACTION: f64 = 0.35;
pub const OPPORTUNITY_W_MISALIGNMENT: f64 = 0.30;
/// Saturation is subtracted: crowded markets are less attractive.
pub const OPPORTUNITY_W_SATURATION: f64 = 0.15;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaturationInputs {
    pub unique_advertisers: u32,
    pub total_creatives: u32,
    /// Share of creatives repeating the same angle, in `[0, 1]`.
    pub repetition_index: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LongevityInputs {
    pub days_running: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DissatisfactionInputs {
    /// Complaint volume (objection-cluster mentions).
    pub frequency: f64,
    /// Mean complaint intensity, in `[0, 1]`.
    pub intensity: f64,
    /// Share of mentions with negative sentiment, in `[0, 1]`.
    pub sentiment_neg_ratio: f64,
    /// Upvote-weighted complaint sum.
    pub weighted_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MisalignmentInputs {
    /// How much of what users ask for the ads already promise, in `[0, 1]`.
    pub promise_coverage: f64,
    pub missing_feature_rate: f64,
    pub trust_gap: f64,
}

/// The four component scores feeding the opportunity composite, each 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpportunityInputs {
    pub longevity: f64,
    pub dissatisfaction: f64,
    pub misalignment: f64,
    pub saturation: f64,
}

// ---------------------------------------------------------------------------
// Calculators
// ---------------------------------------------------------------------------

/// How crowded the ad market is.
///
/// `100 * sigmoid(0.6 ln(1+A) + 0.3 ln(1+C) + 0.8 R)`. All-zero inputs score
/// 50, not 0: the sigmoid is centered at the origin.
#[must_use]
pub fn calculate_saturation_score(inputs: &SaturationInputs) -> f64 {
    let x = SATURATION_W_ADVERTISERS * log1p(f64::from(inputs.unique_advertisers))
        + SATURATION_W_CREATIVES * log1p(f64::from(inputs.total_creatives))
        + SATURATION_W_REPETITION * unit(inputs.repetition_index);
    round_to(100.0 * sigmoid(x), 1)
}

/// Profitability proxy for a single ad based on how long it has run.
///
/// Log-scaled so that [`LONGEVITY_ANCHOR_DAYS`] maps to 100.
#[must_use]
pub fn calculate_longevity_score(inputs: &LongevityInputs) -> f64 {
    let raw = 100.0 * log1p(inputs.days_running) / log1p(LONGEVITY_ANCHOR_DAYS);
    round_to(clamp(raw, 0.0, 100.0), 1)
}

/// Mean of per-ad longevity scores. Returns 0 for an empty slice.
///
/// Averaging happens after per-ad normalization, so one very old ad cannot
/// dominate the way it would if raw days were averaged first.
#[must_use]
pub fn calculate_average_longevity(days_running: &[f64]) -> f64 {
    if days_running.is_empty() {
        return 0.0;
    }
    let sum: f64 = days_running
        .iter()
        .map(|&days| calculate_longevity_score(&LongevityInputs { days_running: days }))
        .sum();
    #[allow(clippy::cast_precision_loss)]
    let denom = days_running.len() as f64;
    round_to(sum / denom, 1)
}

#[must_use]
pub fn calculate_dissatisfaction_score(inputs: &DissatisfactionInputs) -> f64 {
    let x = DISSATISFACTION_W_FREQUENCY * log1p(inputs.frequency)
        + DISSATISFACTION_W_INTENSITY * unit(inputs.intensity)
        + DISSATISFACTION_W_SENTIMENT * unit(inputs.sentiment_neg_ratio)
        + DISSATISFACTION_W_WEIGHTED * log1p(inputs.weighted_score);
    round_to(100.0 * sigmoid(x), 1)
}

/// Gap between what ads promise and what users ask for.
///
/// A plain linear blend whose weights sum to 1, so the result is bounded to
/// `[0, 100]` without a sigmoid.
#[must_use]
pub fn calculate_misalignment_score(inputs: &MisalignmentInputs) -> f64 {
    let raw = MISALIGNMENT_W_COVERAGE_GAP * (1.0 - unit(inputs.promise_coverage))
        + MISALIGNMENT_W_MISSING_FEATURES * unit(inputs.missing_feature_rate)
        + MISALIGNMENT_W_TRUST_GAP * unit(inputs.trust_gap);
    round_to(clamp(100.0 * raw, 0.0, 100.0), 1)
}

/// Composite attractiveness of the gap.
///
/// The weighted sum can leave `[0, 100]` in either direction before clamping.
#[must_use]
pub fn calculate_opportunity_score(inputs: &OpportunityInputs) -> f64 {
    let raw = OPPORTUNITY_W_LONGEVITY * inputs.longevity
        + OPPORTUNITY_W_DISSATISFACTION * inputs.dissatisfaction
        + OPPORTUNITY_W_MISALIGNMENT * inputs.misalignment
        - OPPORTUNITY_W_SATURATION * inputs.saturation;
    round_to(clamp(raw, 0.0, 100.0), 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saturation(a: u32, c: u32, r: f64) -> f64 {
        calculate_saturation_score(&SaturationInputs {
            unique_advertisers: a,
            total_creatives: c,
            repetition_index: r,
        })
    }

    fn dissatisfaction(f: f64, i: f64, s: f64, w: f64) -> f64 {
        calculate_dissatisfaction_score(&DissatisfactionInputs {
            frequency: f,
            intensity: i,
            sentiment_neg_ratio: s,
            weighted_score: w,
        })
    }

    fn misalignment(p: f64, m: f64, t: f64) -> f64 {
        calculate_misalignment_score(&MisalignmentInputs {
            promise_coverage: p,
            missing_feature_rate: m,
            trust_gap: t,
        })
    }

    #[test]
    fn opportunity_weights_sum_with_saturation_penalty() {
        let positive =
            OPPORTUNITY_W_LONGEVITY + OPPORTUNITY_W_DISSATISFACTION + OPPORTUNITY_W_MISALIGNMENT;
        assert!((positive - 1.0).abs() < 1e-12);
    }

    #[test]
    fn saturation_zero_inputs_is_fifty() {
        assert_eq!(saturation(0, 0, 0.0), 50.0);
    }

    #[test]
    fn saturation_increases_with_each_input() {
        let base = saturation(5, 20, 0.2);
        assert!(saturation(15, 20, 0.2) > base);
        assert!(saturation(5, 80, 0.2) > base);
        assert!(saturation(5, 20, 0.8) > base);
    }

    #[test]
    fn saturation_clamps_repetition_index() {
        assert_eq!(saturation(3, 3, 5.0), saturation(3, 3, 1.0));
        assert_eq!(saturation(3, 3, -1.0), saturation(3, 3, 0.0));
    }

    #[test]
    fn saturation_known_value() {
        // x = 0.6 ln 11 + 0.3 ln 51 + 0.8 * 0.5 = 1.4387 + 1.1795 + 0.4 = 3.0183
        let score = saturation(10, 50, 0.5);
        assert!((score - 95.3).abs() < 0.05, "got {score}");
    }

    #[test]
    fn longevity_fixed_points() {
        assert_eq!(calculate_longevity_score(&LongevityInputs { days_running: 0.0 }), 0.0);
        assert_eq!(
            calculate_longevity_score(&LongevityInputs { days_running: 180.0 }),
            100.0
        );
    }

    #[test]
    fn longevity_caps_at_hundred_and_floors_negative() {
        assert_eq!(
            calculate_longevity_score(&LongevityInputs { days_running: 5000.0 }),
            100.0
        );
        assert_eq!(calculate_longevity_score(&LongevityInputs { days_running: -3.0 }), 0.0);
    }

    #[test]
    fn average_longevity_empty_is_zero() {
        assert_eq!(calculate_average_longevity(&[]), 0.0);
    }

    #[test]
    fn average_longevity_averages_scores_not_days() {
        // Scores: 0 and 100 -> mean 50. Averaging days (90) first would give ~86.7.
        assert_eq!(calculate_average_longevity(&[0.0, 180.0]), 50.0);
    }

    #[test]
    fn dissatisfaction_monotonic_in_intensity_and_sentiment() {
        let base = dissatisfaction(10.0, 0.3, 0.3, 40.0);
        assert!(dissatisfaction(10.0, 0.7, 0.3, 40.0) > base);
        assert!(dissatisfaction(10.0, 0.3, 0.7, 40.0) > base);
        assert!(dissatisfaction(40.0, 0.3, 0.3, 40.0) > base);
        assert!(dissatisfaction(10.0, 0.3, 0.3, 400.0) > base);
    }

    #[test]
    fn dissatisfaction_zero_inputs_is_fifty() {
        assert_eq!(dissatisfaction(0.0, 0.0, 0.0, 0.0), 50.0);
    }

    #[test]
    fn misalignment_fixed_points() {
        assert_eq!(misalignment(1.0, 0.0, 0.0), 0.0);
        assert_eq!(misalignment(0.0, 1.0, 1.0), 100.0);
    }

    #[test]
    fn misalignment_decreases_with_coverage() {
        assert!(misalignment(0.2, 0.4, 0.3) > misalignment(0.6, 0.4, 0.3));
    }

    #[test]
    fn misalignment_clamps_out_of_range_ratios() {
        assert_eq!(misalignment(-2.0, 3.0, 9.0), 100.0);
    }

    #[test]
    fn opportunity_composition() {
        let score = calculate_opportunity_score(&OpportunityInputs {
            longevity: 80.0,
            dissatisfaction: 70.0,
            misalignment: 60.0,
            saturation: 40.0,
        });
        assert_eq!(score, 64.5);
    }

    #[test]
    fn opportunity_clamps_negative_to_zero() {
        let score = calculate_opportunity_score(&OpportunityInputs {
            longevity: 0.0,
            dissatisfaction: 0.0,
            misalignment: 0.0,
            saturation: 100.0,
        });
        assert_eq!(score, 0.0);
    }

    #[test]
    fn opportunity_clamps_overflow_to_hundred() {
        let score = calculate_opportunity_score(&OpportunityInputs {
            longevity: 150.0,
            dissatisfaction: 150.0,
            misalignment: 150.0,
            saturation: 0.0,
        });
        assert_eq!(score, 100.0);
    }
}
