//! Actionable recommendations from drift history.
//!
//! Examples: "Persistent drift detected", "No recent drift checks".

use chrono::{DateTime, Utc};
use modelguard_core::models::{DriftTrend, FeatureDriftSummary, Priority, Recommendation};

/// Events inspected by the persistent-drift rule.
pub const RECENT_EVENTS: usize = 10;
/// Drifted events among the recent ones that trigger the rule.
pub const PERSISTENT_DRIFT_EVENTS: usize = 7;
/// Failed patches that trigger a review.
pub const FAILED_PATCH_LIMIT: usize = 3;
/// Average drift above which the top feature is flagged.
pub const FEATURE_DRIFT_LIMIT: f64 = 0.7;

/// What the rules look at.
#[derive(Debug, Clone)]
pub struct RecommendationInputs<'a> {
    /// Detection flags, oldest first.
    pub detections: &'a [bool],
    pub trend: DriftTrend,
    pub failed_patches: usize,
    /// Highest first.
    pub top_features: &'a [FeatureDriftSummary],
    pub last_check: Option<DateTime<Utc>>,
    pub now: DateTime<Utc>,
    pub stale_check_days: i64,
}

/// Generate recommendations, highest priority first.
pub fn generate(inputs: &RecommendationInputs<'_>) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    let recent = &inputs.detections[inputs.detections.len().saturating_sub(RECENT_EVENTS)..];
    let drifted = recent.iter().filter(|d| **d).count();
    if drifted >= PERSISTENT_DRIFT_EVENTS {
        recs.push(Recommendation {
            priority: Priority::High,
            title: "Persistent drift detected".into(),
            description: format!(
                "{drifted} of the last {} drift checks detected drift",
                recent.len()
            ),
            action_items: vec![
                "schedule model retraining on recent data".into(),
                "apply a validated patch in the meantime".into(),
            ],
        });
    }

    if inputs.trend == DriftTrend::Increasing {
        recs.push(Recommendation {
            priority: Priority::Medium,
            title: "Drift is increasing".into(),
            description: "recent drift scores are trending above earlier ones".into(),
            action_items: vec![
                "increase drift check frequency".into(),
                "review upstream data sources for changes".into(),
            ],
        });
    }

    if inputs.failed_patches >= FAILED_PATCH_LIMIT {
        recs.push(Recommendation {
            priority: Priority::Medium,
            title: "Repeated patch failures".into(),
            description: format!("{} patches failed to apply", inputs.failed_patches),
            action_items: vec![
                "review the patch applicator logs".into(),
                "tighten validation thresholds".into(),
            ],
        });
    }

    if let Some(top) = inputs
        .top_features
        .first()
        .filter(|f| f.avg_drift_score > FEATURE_DRIFT_LIMIT)
    {
        recs.push(Recommendation {
            priority: Priority::High,
            title: format!("Feature '{}' is heavily drifted", top.feature_name),
            description: format!(
                "average drift score {:.2} across {} checks",
                top.avg_drift_score, top.occurrences
            ),
            action_items: vec![
                format!("inspect the pipeline producing '{}'", top.feature_name),
                "consider a clipping or normalization patch".into(),
            ],
        });
    }

    let stale = match inputs.last_check {
        Some(last) => (inputs.now - last).num_days() > inputs.stale_check_days,
        None => true,
    };
    if stale {
        let description = match inputs.last_check {
            Some(last) => format!(
                "last drift check was {} days ago",
                (inputs.now - last).num_days()
            ),
            None => "no drift checks recorded".into(),
        };
        recs.push(Recommendation {
            priority: Priority::Low,
            title: "No recent drift checks".into(),
            description,
            action_items: vec!["run a drift check against current production data".into()],
        });
    }

    recs.sort_by(|a, b| b.priority.cmp(&a.priority));
    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use test_fixtures::epoch;

    fn inputs(detections: &[bool]) -> RecommendationInputs<'_> {
        RecommendationInputs {
            detections,
            trend: DriftTrend::Stable,
            failed_patches: 0,
            top_features: &[],
            last_check: Some(epoch()),
            now: epoch() + Duration::days(1),
            stale_check_days: 30,
        }
    }

    #[test]
    fn quiet_history_has_no_recommendations() {
        assert!(generate(&inputs(&[false; 10])).is_empty());
    }

    #[test]
    fn persistent_drift_uses_last_ten() {
        let mut detections = vec![true; 7];
        detections.extend([false; 3]);
        let recs = generate(&inputs(&detections));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, Priority::High);

        detections.push(false);
        assert!(generate(&inputs(&detections)).is_empty());
    }

    #[test]
    fn stale_and_missing_checks() {
        let mut stale = inputs(&[]);
        stale.now = epoch() + Duration::days(31);
        let recs = generate(&stale);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, Priority::Low);

        stale.now = epoch() + Duration::days(30);
        assert!(generate(&stale).is_empty());

        stale.last_check = None;
        assert_eq!(generate(&stale)[0].description, "no drift checks recorded");
    }
}
