//! Linear drift forecast.
//!
//! Ordinary least squares of drift score against days elapsed since the
//! first analysis. Confidence decays with the horizon and with how poorly
//! the line fits the history.

use chrono::Duration;
use modelguard_core::constants::MILLIS_PER_DAY;
use modelguard_core::models::{DriftForecast, DriftResult};

/// Fitted line plus the mean squared residual.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub residual_variance: f64,
}

impl LinearFit {
    pub fn at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Least-squares fit. `None` for fewer than two points.
/// A degenerate x spread fits a flat line through the mean.
pub fn fit(points: &[(f64, f64)]) -> Option<LinearFit> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;
    let sxx: f64 = points.iter().map(|p| (p.0 - mean_x).powi(2)).sum();
    let sxy: f64 = points.iter().map(|p| (p.0 - mean_x) * (p.1 - mean_y)).sum();

    let slope = if sxx > f64::EPSILON { sxy / sxx } else { 0.0 };
    let intercept = mean_y - slope * mean_x;
    let residual_variance = points
        .iter()
        .map(|p| (p.1 - (intercept + slope * p.0)).powi(2))
        .sum::<f64>()
        / n;

    Some(LinearFit {
        slope,
        intercept,
        residual_variance,
    })
}

/// Forecast settings, taken from `AnalyticsConfig`.
#[derive(Debug, Clone, Copy)]
pub struct ForecastParams {
    pub min_points: usize,
    pub decay_per_day: f64,
    pub variance_penalty: f64,
}

/// One forecast per day `1..=days_ahead` after the latest result.
/// Empty when the history is shorter than `min_points`. `history` must be oldest first.
pub fn forecast(
    history: &[&DriftResult],
    days_ahead: u32,
    params: ForecastParams,
) -> Vec<DriftForecast> {
    let (first, last) = match (history.first(), history.last()) {
        (Some(first), Some(last)) if history.len() >= params.min_points.max(2) => (first, last),
        _ => return Vec::new(),
    };
    let day_of = |r: &DriftResult| {
        (r.timestamp - first.timestamp).num_milliseconds() as f64 / MILLIS_PER_DAY
    };

    let points: Vec<(f64, f64)> = history.iter().map(|r| (day_of(r), r.drift_score)).collect();
    let Some(line) = fit(&points) else {
        return Vec::new();
    };
    let last_day = day_of(last);

    (1..=days_ahead)
        .map(|d| {
            let confidence = 1.0
                - params.decay_per_day * f64::from(d)
                - params.variance_penalty * line.residual_variance;
            DriftForecast {
                days_ahead: d,
                forecast_date: last.timestamp + Duration::days(i64::from(d)),
                predicted_drift_score: clamp_unit(line.at(last_day + f64::from(d))),
                confidence: clamp_unit(confidence),
            }
        })
        .collect()
}

fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_fixtures::drift_history;

    const PARAMS: ForecastParams = ForecastParams {
        min_points: 3,
        decay_per_day: 0.03,
        variance_penalty: 2.0,
    };

    #[test]
    fn fit_recovers_exact_line() {
        let line = fit(&[(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)]).unwrap();
        assert!((line.slope - 2.0).abs() < 1e-12);
        assert!((line.intercept - 1.0).abs() < 1e-12);
        assert!(line.residual_variance < 1e-12);
    }

    #[test]
    fn fit_flat_for_single_x() {
        let line = fit(&[(1.0, 0.2), (1.0, 0.4)]).unwrap();
        assert_eq!(line.slope, 0.0);
        assert!((line.intercept - 0.3).abs() < 1e-12);
        assert!(fit(&[(0.0, 1.0)]).is_none());
    }

    #[test]
    fn rising_history_projects_forward() {
        let results = drift_history("m", &[0.1, 0.2, 0.3]);
        let refs: Vec<&DriftResult> = results.iter().collect();
        let out = forecast(&refs, 3, PARAMS);
        assert_eq!(out.len(), 3);
        assert!((out[0].predicted_drift_score - 0.4).abs() < 1e-9);
        assert!((out[2].predicted_drift_score - 0.6).abs() < 1e-9);
        assert!((out[0].confidence - 0.97).abs() < 1e-9);
        assert!((out[2].confidence - 0.91).abs() < 1e-9);
        assert_eq!(out[1].forecast_date, results[2].timestamp + Duration::days(2));
    }

    #[test]
    fn projection_is_clamped() {
        let results = drift_history("m", &[0.5, 0.8, 1.0]);
        let refs: Vec<&DriftResult> = results.iter().collect();
        let out = forecast(&refs, 10, PARAMS);
        assert!(out.iter().all(|f| f.predicted_drift_score == 1.0));
        assert!(out.iter().all(|f| (0.0..=1.0).contains(&f.confidence)));
    }

    #[test]
    fn short_history_yields_nothing() {
        let results = drift_history("m", &[0.1, 0.2]);
        let refs: Vec<&DriftResult> = results.iter().collect();
        assert!(forecast(&refs, 7, PARAMS).is_empty());
    }
}
