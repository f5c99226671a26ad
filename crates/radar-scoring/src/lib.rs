//! Scoring engine for DemandRadar.
//!
//! Turns collected market signals (ad counts, Reddit complaints, gap findings)
//! into normalized opportunity, saturation, dissatisfaction, misalignment,
//! longevity and confidence scores. Also ranks UGC assets and product ideas
//! and measures score trends over time.
//!
//! Every function is pure and synchronous. Sparse or out-of-range input is
//! clamped to neutral values; only [`build_to_profit`] rejects input.

pub mod build_to_profit;
pub mod collection;
pub mod components;
pub mod confidence;
pub mod error;
pub mod math;
pub mod run;
pub mod trend;
pub mod ugc;

pub use build_to_profit::{
    calculate_build_to_profit_score, rank_ideas_by_build_to_profit, BuildToProfitInputs,
    HumanTouchLevel, IdeaProfile, ProductIdea, RankedIdea,
};
pub use collection::{calculate_scores, shape_run_data, RunCollection};
pub use components::{
    calculate_average_longevity, calculate_dissatisfaction_score, calculate_longevity_score,
    calculate_misalignment_score, calculate_opportunity_score, calculate_saturation_score,
};
pub use confidence::calculate_confidence_score;
pub use error::ScoringError;
pub use run::{calculate_run_scores, RunData, RunScores};
pub use trend::{calculate_trend_velocity, TrendDataPoint, TrendDirection, TrendVelocity};
pub use ugc::{rank_ugc_assets, UgcAsset, UgcNormalization, UgcSource};
