//! Scoring of user-generated content for marketing reuse.
//!
//! The asset's [`UgcSource`] picks the formula. Formulas are plain weighted
//! sums of factors that must already be normalized to `[0, 1]`; they do not
//! clamp. [`derive_ugc_factors`] produces such factors from raw counters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::components::{calculate_longevity_score, LongevityInputs};
use crate::confidence::days_between;
use crate::math::{log1p, round_to, unit};

pub const AD_TESTED_W_LONGEVITY: f64 = 0.45;
pub const AD_TESTED_W_REACH: f64 = 0.35;
pub const AD_TESTED_W_ENGAGEMENT: f64 = 0.20;

pub const TREND_W_RECENCY: f64 = 0.6;
pub const TREND_W_RELEVANCE: f64 = 0.4;

pub const CONNECTED_W_SHARES: f64 = 0.4;
pub const CONNECTED_W_COMMENTS: f64 = 0.3;
pub const CONNECTED_W_LIKES: f64 = 0.2;
pub const CONNECTED_W_VIEW_VELOCITY: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UgcSource {
    /// Creative that has been run as a paid ad.
    AdTested,
    /// Organic post riding a current trend.
    Trend,
    /// Post from an account connected by the user.
    Connected,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UgcMetrics {
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub reach: u64,
    pub first_shown: Option<DateTime<Utc>>,
    pub last_shown: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UgcAsset {
    pub id: String,
    pub source: UgcSource,
    #[serde(default)]
    pub metrics: UgcMetrics,
    /// Caller-assessed fit with the niche, in `[0, 1]`. Only trend assets use it.
    #[serde(default)]
    pub relevance_to_niche: f64,
}

/// Normalized factors for one asset, shaped by its source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum UgcFactors {
    AdTested {
        longevity: f64,
        reach: f64,
        engagement_proxy: f64,
    },
    Trend {
        recency: f64,
        relevance_to_niche: f64,
    },
    Connected {
        shares_rate: f64,
        comment_rate: f64,
        like_rate: f64,
        view_velocity: f64,
    },
}

impl UgcFactors {
    /// Weighted score on a 0-100 scale, one decimal.
    #[must_use]
    pub fn score(&self) -> f64 {
        round_to(100.0 * self.weighted_sum(), 1)
    }

    /// Unrounded weighted sum of the factors, `[0, 1]` for normalized input.
    #[must_use]
    pub fn weighted_sum(&self) -> f64 {
        match *self {
            UgcFactors::AdTested {
                longevity,
                reach,
                engagement_proxy,
            } => {
                AD_TESTED_W_LONGEVITY * longevity
                    + AD_TESTED_W_REACH * reach
                    + AD_TESTED_W_ENGAGEMENT * engagement_proxy
            }
            UgcFactors::Trend {
                recency,
                relevance_to_niche,
            } => TREND_W_RECENCY * recency + TREND_W_RELEVANCE * relevance_to_niche,
            UgcFactors::Connected {
                shares_rate,
                comment_rate,
                like_rate,
                view_velocity,
            } => {
                CONNECTED_W_SHARES * shares_rate
                    + CONNECTED_W_COMMENTS * comment_rate
                    + CONNECTED_W_LIKES * like_rate
                    + CONNECTED_W_VIEW_VELOCITY * view_velocity
            }
        }
    }
}

/// Anchors mapping raw counters onto `[0, 1]` factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UgcNormalization {
    /// Reach that maps to a factor of 1 (log-scaled).
    pub reach_anchor: f64,
    /// Engagement rate (interactions per view) that maps to 1.
    pub engagement_rate_anchor: f64,
    /// Age in days at which a trend asset's recency reaches 0.
    pub trend_window_days: f64,
    pub share_rate_anchor: f64,
    pub comment_rate_anchor: f64,
    pub like_rate_anchor: f64,
    /// Views per day that map to a view velocity of 1.
    pub views_per_day_anchor: f64,
}

impl Default for UgcNormalization {
    fn default() -> Self {
        Self {
            reach_anchor: 1_000_000.0,
            engagement_rate_anchor: 0.10,
            trend_window_days: 30.0,
            share_rate_anchor: 0.01,
            comment_rate_anchor: 0.02,
            like_rate_anchor: 0.10,
            views_per_day_anchor: 10_000.0,
        }
    }
}

/// A scored asset, as returned by [`rank_ugc_assets`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredUgcAsset {
    pub id: String,
    pub source: UgcSource,
    pub factors: UgcFactors,
    pub score: f64,
}

/// Turn raw counters into the factor set for the asset's source.
///
/// Every factor is clamped to `[0, 1]`. Assets without view counts get zero
/// rates; assets without timestamps get zero longevity, recency and velocity.
#[must_use]
pub fn derive_ugc_factors(
    asset: &UgcAsset,
    now: DateTime<Utc>,
    norm: &UgcNormalization,
) -> UgcFactors {
    let m = &asset.metrics;
    match asset.source {
        UgcSource::AdTested => {
            let days_shown = match (m.first_shown, m.last_shown) {
                (Some(first), Some(last)) => days_between(first, last),
                (Some(first), None) => days_between(first, now),
                _ => 0.0,
            };
            let interactions = m.likes.saturating_add(m.comments).saturating_add(m.shares);
            UgcFactors::AdTested {
                longevity: calculate_longevity_score(&LongevityInputs {
                    days_running: days_shown,
                }) / 100.0,
                reach: log_anchor(count(m.reach), norm.reach_anchor),
                engagement_proxy: anchored(
                    per_view(interactions, m.views),
                    norm.engagement_rate_anchor,
                ),
            }
        }
        UgcSource::Trend => {
            let recency = match m.last_shown.or(m.first_shown) {
                Some(seen) if norm.trend_window_days > 0.0 => {
                    unit(1.0 - days_between(seen, now).max(0.0) / norm.trend_window_days)
                }
                _ => 0.0,
            };
            UgcFactors::Trend {
                recency,
                relevance_to_niche: unit(asset.relevance_to_niche),
            }
        }
        UgcSource::Connected => {
            let view_velocity = match m.first_shown {
                Some(first) => {
                    // Floor at one day so a fresh post is not divided by ~0.
                    let age_days = days_between(first, now).max(1.0);
                    anchored(count(m.views) / age_days, norm.views_per_day_anchor)
                }
                None => 0.0,
            };
            UgcFactors::Connected {
                shares_rate: anchored(per_view(m.shares, m.views), norm.share_rate_anchor),
                comment_rate: anchored(per_view(m.comments, m.views), norm.comment_rate_anchor),
                like_rate: anchored(per_view(m.likes, m.views), norm.like_rate_anchor),
                view_velocity,
            }
        }
    }
}

#[must_use]
pub fn score_ugc_asset(
    asset: &UgcAsset,
    now: DateTime<Utc>,
    norm: &UgcNormalization,
) -> ScoredUgcAsset {
    let factors = derive_ugc_factors(asset, now, norm);
    ScoredUgcAsset {
        id: asset.id.clone(),
        source: asset.source,
        score: factors.score(),
        factors,
    }
}

/// Score every asset and sort descending by score.
///
/// Ordering uses the unrounded weighted sum, so assets whose displayed scores
/// round alike still rank by their true value. The sort is stable: exact ties
/// keep their input order.
#[must_use]
pub fn rank_ugc_assets(
    assets: &[UgcAsset],
    now: DateTime<Utc>,
    norm: &UgcNormalization,
) -> Vec<ScoredUgcAsset> {
    let mut scored: Vec<(f64, ScoredUgcAsset)> = assets
        .iter()
        .map(|a| {
            let scored = score_ugc_asset(a, now, norm);
            (scored.factors.weighted_sum(), scored)
        })
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().map(|(_, asset)| asset).collect()
}

#[allow(clippy::cast_precision_loss)]
fn count(n: u64) -> f64 {
    n as f64
}

fn per_view(n: u64, views: u64) -> f64 {
    if views == 0 {
        return 0.0;
    }
    count(n) / count(views)
}

fn anchored(value: f64, anchor: f64) -> f64 {
    if anchor <= 0.0 {
        return 0.0;
    }
    unit(value / anchor)
}

fn log_anchor(value: f64, anchor: f64) -> f64 {
    let denom = log1p(anchor);
    if denom <= 0.0 {
        return 0.0;
    }
    unit(log1p(value) / denom)
}
