//! Property tests for analytics bounds.

use chrono::Duration;
use modelguard_analytics::health::health_score;
use modelguard_analytics::{AnalyticsEngine, HealthInputs};
use modelguard_core::models::DateRange;
use proptest::prelude::*;
use test_fixtures::{drift_history, epoch};

proptest! {
    #[test]
    fn prop_health_in_bounds(rate in 0.0f64..=1.0, avg in 0.0f64..=1.0, success in 0.0f64..=1.0, safety in 0.0f64..=1.0) {
        let score = health_score(HealthInputs {
            drift_rate: rate,
            avg_drift_score: avg,
            patch_success_rate: success,
            avg_safety_score: safety,
        });
        prop_assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn prop_forecasts_in_unit_range(scores in prop::collection::vec(0.0f64..=1.0, 0..40), days in 1u32..30) {
        let history = drift_history("m", &scores);
        let forecasts = AnalyticsEngine::default().forecast_drift(&history, days);
        if scores.len() < 3 {
            prop_assert!(forecasts.is_empty());
        } else {
            prop_assert_eq!(forecasts.len(), days as usize);
        }
        for f in forecasts {
            prop_assert!((0.0..=1.0).contains(&f.predicted_drift_score));
            prop_assert!((0.0..=1.0).contains(&f.confidence));
        }
    }

    #[test]
    fn prop_recommendations_sorted(scores in prop::collection::vec(0.0f64..=1.0, 0..30), gap in 0i64..90) {
        let history = drift_history("m", &scores);
        let now = epoch() + Duration::days(scores.len() as i64 + gap);
        let analytics = AnalyticsEngine::default().analyze(
            "m",
            &history,
            &[],
            DateRange::new(epoch(), now),
            now,
        );
        prop_assert!(analytics.recommendations.windows(2).all(|w| w[0].priority >= w[1].priority));
        prop_assert!((0.0..=100.0).contains(&analytics.health_score));
        prop_assert!((0.0..=1.0).contains(&analytics.drift_rate));
    }
}
