//! Week-over-week trend velocity for a series of score observations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::math::round_to;

/// Velocity reported for growth from exactly zero. A sentinel standing in for
/// "infinite growth", not a measured percentage.
pub const ZERO_BASE_VELOCITY_CAP: f64 = 1000.0;
/// Absolute velocity (percent) below which a trend counts as stable.
pub const STABLE_THRESHOLD_PERCENT: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendDataPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Rising,
    Declining,
    Stable,
}

impl TrendDirection {
    #[must_use]
    pub fn indicator(self) -> &'static str {
        match self {
            TrendDirection::Rising => "↗",
            TrendDirection::Declining => "↘",
            TrendDirection::Stable => "→",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendVelocity {
    pub direction: TrendDirection,
    /// Percent change from the earliest to the latest point, one decimal.
    pub velocity_percent: f64,
    pub indicator: String,
    /// Grows with the number of points, `[0, 1]`.
    pub confidence: f64,
    pub data_points: usize,
}

/// Direction, percent change and confidence for an unordered series.
///
/// Points are sorted by timestamp first. The velocity compares only the first
/// and last values; the percent is taken against `|start|` so that the sign
/// always follows the direction of change.
#[must_use]
pub fn calculate_trend_velocity(points: &[TrendDataPoint]) -> TrendVelocity {
    let mut sorted = points.to_vec();
    sorted.sort_by_key(|p| p.timestamp);

    let change = match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) if sorted.len() >= 2 => percent_change(first.value, last.value),
        _ => 0.0,
    };

    // Classify before rounding: 9.96% is still stable.
    let direction = classify(change);

    TrendVelocity {
        direction,
        velocity_percent: round_to(change, 1),
        indicator: direction.indicator().to_string(),
        confidence: confidence_for(sorted.len()),
        data_points: sorted.len(),
    }
}

fn percent_change(start: f64, end: f64) -> f64 {
    if start == 0.0 {
        return if end > 0.0 {
            ZERO_BASE_VELOCITY_CAP
        } else if end < 0.0 {
            -ZERO_BASE_VELOCITY_CAP
        } else {
            0.0
        };
    }
    let change = (end - start) / start.abs() * 100.0;
    if change.is_finite() {
        change
    } else {
        0.0
    }
}

fn classify(velocity_percent: f64) -> TrendDirection {
    if velocity_percent.abs() < STABLE_THRESHOLD_PERCENT {
        TrendDirection::Stable
    } else if velocity_percent > 0.0 {
        TrendDirection::Rising
    } else {
        TrendDirection::Declining
    }
}

/// More points, more trust: 0, 0.3, 0.5, 0.7, 0.85, then 1.0 from five points.
fn confidence_for(n: usize) -> f64 {
    match n {
        0 => 0.0,
        1 => 0.3,
        2 => 0.5,
        3 => 0.7,
        4 => 0.85,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn series(values: &[f64]) -> Vec<TrendDataPoint> {
        let start = Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap();
        values
            .iter()
            .zip(0_i64..)
            .map(|(&value, week)| TrendDataPoint {
                timestamp: start + Duration::weeks(week),
                value,
            })
            .collect()
    }

    #[test]
    fn empty_series_is_stable_with_no_confidence() {
        let t = calculate_trend_velocity(&[]);
        assert_eq!(t.direction, TrendDirection::Stable);
        assert_eq!(t.velocity_percent, 0.0);
        assert_eq!(t.indicator, "→");
        assert_eq!(t.confidence, 0.0);
    }

    #[test]
    fn single_point_is_stable() {
        let t = calculate_trend_velocity(&series(&[42.0]));
        assert_eq!(t.direction, TrendDirection::Stable);
        assert_eq!(t.velocity_percent, 0.0);
        assert_eq!(t.confidence, 0.3);
    }

    #[test]
    fn doubling_is_rising() {
        let t = calculate_trend_velocity(&series(&[10.0, 20.0]));
        assert_eq!(t.velocity_percent, 100.0);
        assert_eq!(t.direction, TrendDirection::Rising);
        assert_eq!(t.indicator, "↗");
        assert_eq!(t.confidence, 0.5);
    }

    #[test]
    fn small_change_is_stable() {
        let t = calculate_trend_velocity(&series(&[10.0, 10.5]));
        assert_eq!(t.velocity_percent, 5.0);
        assert_eq!(t.direction, TrendDirection::Stable);
    }

    #[test]
    fn change_just_under_threshold_is_stable_even_when_it_rounds_up() {
        let t = calculate_trend_velocity(&series(&[100.0, 109.96]));
        assert_eq!(t.velocity_percent, 10.0);
        assert_eq!(t.direction, TrendDirection::Stable);
        assert_eq!(t.indicator, "→");
    }

    #[test]
    fn decline_is_declining() {
        let t = calculate_trend_velocity(&series(&[80.0, 70.0, 60.0]));
        assert_eq!(t.velocity_percent, -25.0);
        assert_eq!(t.direction, TrendDirection::Declining);
        assert_eq!(t.indicator, "↘");
        assert_eq!(t.confidence, 0.7);
    }

    #[test]
    fn unordered_input_is_sorted_by_timestamp() {
        let mut points = series(&[10.0, 15.0, 20.0]);
        points.reverse();
        let t = calculate_trend_velocity(&points);
        assert_eq!(t.velocity_percent, 100.0);
        assert_eq!(t.direction, TrendDirection::Rising);
    }

    #[test]
    fn growth_from_zero_is_capped() {
        let t = calculate_trend_velocity(&series(&[0.0, 5.0]));
        assert_eq!(t.velocity_percent, ZERO_BASE_VELOCITY_CAP);
        assert_eq!(t.direction, TrendDirection::Rising);
    }

    #[test]
    fn zero_to_zero_is_stable() {
        let t = calculate_trend_velocity(&series(&[0.0, 0.0]));
        assert_eq!(t.velocity_percent, 0.0);
        assert_eq!(t.direction, TrendDirection::Stable);
    }

    #[test]
    fn negative_start_keeps_sign_of_change() {
        let t = calculate_trend_velocity(&series(&[-10.0, -5.0]));
        assert_eq!(t.velocity_percent, 50.0);
        assert_eq!(t.direction, TrendDirection::Rising);
    }

    #[test]
    fn confidence_by_point_count() {
        assert_eq!(calculate_trend_velocity(&series(&[1.0; 4])).confidence, 0.85);
        assert_eq!(calculate_trend_velocity(&series(&[1.0; 5])).confidence, 1.0);
        assert_eq!(calculate_trend_velocity(&series(&[1.0; 12])).confidence, 1.0);
    }

    #[test]
    fn direction_serializes_lowercase() {
        let json = serde_json::to_string(&TrendDirection::Declining).unwrap();
        assert_eq!(json, "\"declining\"");
    }
}
