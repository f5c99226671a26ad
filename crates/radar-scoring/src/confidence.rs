//! Confidence score and the data-quality factors behind it.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use radar_core::ScoringConfig;
use serde::{Deserialize, Serialize};

use crate::math::{clamp, round_to, unit};

pub const CONFIDENCE_W_SUFFICIENCY: f64 = 0.4;
pub const CONFIDENCE_W_ALIGNMENT: f64 = 0.4;
pub const CONFIDENCE_W_RECENCY: f64 = 0.2;

/// Alignment returned when either source has no text to compare.
pub const NEUTRAL_ALIGNMENT: f64 = 0.5;
/// Word-overlap ratios are small in practice; scale them up before clamping.
pub const ALIGNMENT_OVERLAP_SCALE: f64 = 5.0;
/// Recency used when the run carries no timestamps at all.
pub const DEFAULT_RECENCY: f64 = 0.5;

const MIN_TOKEN_LEN: usize = 3;

const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "that", "this", "you", "your", "are", "was", "but", "not",
    "have", "has", "from", "they", "can", "all", "just", "get", "our", "out", "any", "its",
    "it's", "what", "when", "how", "who", "why", "will", "would", "there", "their", "been",
    "more", "than", "then", "them", "about", "into",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInputs {
    pub data_sufficiency: f64,
    pub cross_source_alignment: f64,
    pub recency: f64,
}

/// How far the other scores can be trusted, in `[0, 1]`, rounded to two decimals.
#[must_use]
pub fn calculate_confidence_score(inputs: &ConfidenceInputs) -> f64 {
    let raw = CONFIDENCE_W_SUFFICIENCY * unit(inputs.data_sufficiency)
        + CONFIDENCE_W_ALIGNMENT * unit(inputs.cross_source_alignment)
        + CONFIDENCE_W_RECENCY * unit(inputs.recency);
    round_to(clamp(raw, 0.0, 1.0), 2)
}

/// Mean of the ad and Reddit coverage ratios, each capped at 1.
///
/// A zero threshold counts as already satisfied.
#[must_use]
pub fn calculate_data_sufficiency(
    ad_count: u32,
    reddit_count: u32,
    min_ads: u32,
    min_reddit: u32,
) -> f64 {
    (coverage(ad_count, min_ads) + coverage(reddit_count, min_reddit)) / 2.0
}

/// [`calculate_data_sufficiency`] with thresholds taken from `config`.
#[must_use]
pub fn data_sufficiency_with(config: &ScoringConfig, ad_count: u32, reddit_count: u32) -> f64 {
    calculate_data_sufficiency(ad_count, reddit_count, config.min_ads, config.min_reddit)
}

fn coverage(count: u32, threshold: u32) -> f64 {
    if threshold == 0 {
        return 1.0;
    }
    (f64::from(count) / f64::from(threshold)).min(1.0)
}

/// Bag-of-words agreement between what ads say and what Reddit complains about.
///
/// `overlap = |shared words| / |all words|`, scaled by
/// [`ALIGNMENT_OVERLAP_SCALE`] and clamped to `[0, 1]`. Returns
/// [`NEUTRAL_ALIGNMENT`] when either side has no usable words. This is a crude
/// lexical approximation, not semantic matching.
#[must_use]
pub fn calculate_cross_source_alignment<A, R>(ad_texts: &[A], reddit_texts: &[R]) -> f64
where
    A: AsRef<str>,
    R: AsRef<str>,
{
    let ad_words = word_set(ad_texts);
    let reddit_words = word_set(reddit_texts);

    if ad_words.is_empty() || reddit_words.is_empty() {
        return NEUTRAL_ALIGNMENT;
    }

    let shared = ad_words.intersection(&reddit_words).count();
    let total = ad_words.union(&reddit_words).count();

    #[allow(clippy::cast_precision_loss)]
    let overlap = shared as f64 / total as f64;
    unit(overlap * ALIGNMENT_OVERLAP_SCALE)
}

/// Lowercase content words (length >= 3, stop words removed) across `texts`.
pub(crate) fn word_set<T: AsRef<str>>(texts: &[T]) -> HashSet<String> {
    texts
        .iter()
        .flat_map(|t| tokenize(t.as_ref()))
        .collect()
}

pub(crate) fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|w| w.trim_matches('\'').to_lowercase())
        .filter(|w| w.chars().count() >= MIN_TOKEN_LEN && !STOP_WORDS.contains(&w.as_str()))
}

/// Freshness of the collected data.
///
/// Age is measured from the midpoint of the observed window to `now`:
/// `clamp(1 - age_days / max_age_days, 0, 1)`. A window with only one end
/// known uses that end for both. No dates at all yields [`DEFAULT_RECENCY`].
/// A non-positive or non-finite `max_age_days` falls back to the default.
#[must_use]
pub fn calculate_recency(
    oldest: Option<DateTime<Utc>>,
    newest: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    max_age_days: f64,
) -> f64 {
    let (oldest, newest) = match (oldest, newest) {
        (Some(o), Some(n)) => (o.min(n), o.max(n)),
        (Some(d), None) | (None, Some(d)) => (d, d),
        (None, None) => return DEFAULT_RECENCY,
    };

    let max_age_days = if max_age_days.is_finite() && max_age_days > 0.0 {
        max_age_days
    } else {
        ScoringConfig::DEFAULT_MAX_AGE_DAYS
    };

    let midpoint = oldest + (newest - oldest) / 2;
    let age_days = days_between(midpoint, now).max(0.0);
    clamp(1.0 - age_days / max_age_days, 0.0, 1.0)
}

/// Fractional days from `from` to `to`; negative when `to` precedes `from`.
pub(crate) fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let seconds = (to - from).num_seconds() as f64;
    seconds / 86_400.0
}
