//! Build-to-profit ranking of candidate product ideas.
//!
//! `score = (opportunity * tam * margin * time_to_value) / max(cac * complexity * touch, 0.001)`
//!
//! Unlike the other formulas this one validates its inputs: a negative or
//! non-finite factor is reported as [`ScoringError::InvalidInput`] instead of
//! being ranked.

use radar_core::ScoringConfig;
use serde::{Deserialize, Serialize};

use crate::error::ScoringError;
use crate::math::{clamp, unit};

/// Floor applied to the cost product so a zero cost factor cannot divide by zero.
pub const MIN_COST_DENOMINATOR: f64 = 0.001;
/// Time-to-value factor at or beyond the max-days anchor.
pub const TIME_TO_VALUE_FLOOR: f64 = 0.1;
/// Complexity scores are given on a 0-10 scale.
pub const COMPLEXITY_SCALE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildToProfitInputs {
    // Value group.
    pub opportunity: f64,
    pub tam_factor: f64,
    pub margin_factor: f64,
    pub time_to_value_factor: f64,
    // Cost group.
    pub cac_proxy: f64,
    pub complexity: f64,
    pub touch_factor: f64,
}

impl BuildToProfitInputs {
    fn fields(&self) -> [(&'static str, f64); 7] {
        [
            ("opportunity", self.opportunity),
            ("tam_factor", self.tam_factor),
            ("margin_factor", self.margin_factor),
            ("time_to_value_factor", self.time_to_value_factor),
            ("cac_proxy", self.cac_proxy),
            ("complexity", self.complexity),
            ("touch_factor", self.touch_factor),
        ]
    }

    /// Reject negative, infinite or `NaN` factors.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::InvalidInput`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ScoringError> {
        for (field, value) in self.fields() {
            if !value.is_finite() || value < 0.0 {
                return Err(ScoringError::InvalidInput { field, value });
            }
        }
        Ok(())
    }
}

/// How much hands-on human work the idea needs to deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HumanTouchLevel {
    High,
    Medium,
    Low,
}

impl HumanTouchLevel {
    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            HumanTouchLevel::High => 0.9,
            HumanTouchLevel::Medium => 0.5,
            HumanTouchLevel::Low => 0.2,
        }
    }
}

/// Value over cost for one idea. Unbounded above.
///
/// # Errors
///
/// Returns [`ScoringError::InvalidInput`] if any factor is negative, infinite
/// or `NaN`.
pub fn calculate_build_to_profit_score(inputs: &BuildToProfitInputs) -> Result<f64, ScoringError> {
    inputs.validate()?;

    let value = inputs.opportunity
        * inputs.tam_factor
        * inputs.margin_factor
        * inputs.time_to_value_factor;
    let cost = inputs.cac_proxy * inputs.complexity * inputs.touch_factor;

    Ok(value / cost.max(MIN_COST_DENOMINATOR))
}

/// TAM in USD as a fraction of `max_tam_usd`, capped at 1.
#[must_use]
pub fn normalize_tam(tam_usd: f64, max_tam_usd: f64) -> f64 {
    if max_tam_usd <= 0.0 {
        return 0.0;
    }
    unit(tam_usd / max_tam_usd)
}

/// Gross margin percentage (0-100) as a fraction, capped at 1.
#[must_use]
pub fn normalize_margin(margin_percent: f64) -> f64 {
    unit(margin_percent / 100.0)
}

/// Complexity score (0-10) as a fraction, capped at 1.
#[must_use]
pub fn normalize_complexity(complexity_score: f64) -> f64 {
    unit(complexity_score / COMPLEXITY_SCALE)
}

/// 1 for instant value, decaying linearly to [`TIME_TO_VALUE_FLOOR`] at `max_days`.
#[must_use]
pub fn time_to_value_factor(days: f64, max_days: f64) -> f64 {
    if days <= 0.0 {
        return 1.0;
    }
    if max_days <= 0.0 {
        return TIME_TO_VALUE_FLOOR;
    }
    clamp(
        1.0 - (1.0 - TIME_TO_VALUE_FLOOR) * days / max_days,
        TIME_TO_VALUE_FLOOR,
        1.0,
    )
}

/// A candidate idea to rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductIdea {
    pub name: String,
    pub inputs: BuildToProfitInputs,
}

/// An idea described in raw business terms, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdeaProfile {
    pub name: String,
    /// Opportunity score of the underlying niche, 0-100.
    pub opportunity: f64,
    pub tam_usd: f64,
    pub margin_percent: f64,
    pub time_to_value_days: f64,
    /// Relative customer-acquisition cost.
    pub cac_proxy: f64,
    /// Build complexity on a 0-10 scale.
    pub complexity_score: f64,
    pub human_touch: HumanTouchLevel,
}

impl IdeaProfile {
    /// Normalize into a rankable [`ProductIdea`] using the configured anchors.
    ///
    /// Normalizers clamp; `opportunity` and `cac_proxy` pass through untouched
    /// and are validated when the idea is scored.
    #[must_use]
    pub fn to_idea(&self, config: &ScoringConfig) -> ProductIdea {
        ProductIdea {
            name: self.name.clone(),
            inputs: BuildToProfitInputs {
                opportunity: self.opportunity,
                tam_factor: normalize_tam(self.tam_usd, config.max_tam_usd),
                margin_factor: normalize_margin(self.margin_percent),
                time_to_value_factor: time_to_value_factor(
                    self.time_to_value_days,
                    config.max_time_to_value_days,
                ),
                cac_proxy: self.cac_proxy,
                complexity: normalize_complexity(self.complexity_score),
                touch_factor: self.human_touch.factor(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedIdea {
    pub rank: usize,
    pub name: String,
    pub score: f64,
}

/// Score every idea and sort descending; equal scores keep input order.
///
/// # Errors
///
/// Fails on the first idea with an invalid factor; nothing is ranked.
pub fn rank_ideas_by_build_to_profit(
    ideas: &[ProductIdea],
) -> Result<Vec<RankedIdea>, ScoringError> {
    let mut scored = ideas
        .iter()
        .map(|idea| {
            calculate_build_to_profit_score(&idea.inputs)
                .inspect_err(|e| tracing::warn!(idea = %idea.name, error = %e, "rejecting idea"))
                .map(|score| (idea.name.clone(), score))
        })
        .collect::<Result<Vec<_>, _>>()?;

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    Ok(scored
        .into_iter()
        .enumerate()
        .map(|(i, (name, score))| RankedIdea {
            rank: i + 1,
            name,
            score,
        })
        .collect())
}
