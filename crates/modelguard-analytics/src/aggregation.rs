//! Counting and averaging over drift history and patches.

use std::collections::BTreeMap;

use modelguard_core::models::{
    DateRange, DriftResult, DriftType, FeatureDriftSummary, Patch, PatchStats, PatchStatus,
};

/// Results for `model_id` inside `range`, oldest first.
pub fn history<'a>(
    results: &'a [DriftResult],
    model_id: &str,
    range: &DateRange,
) -> Vec<&'a DriftResult> {
    let mut selected: Vec<&DriftResult> = results
        .iter()
        .filter(|r| r.model_id == model_id && range.contains(r.timestamp))
        .collect();
    selected.sort_by_key(|r| r.timestamp);
    selected
}

/// Patches for `model_id` created inside `range`.
pub fn patches_in<'a>(patches: &'a [Patch], model_id: &str, range: &DateRange) -> Vec<&'a Patch> {
    patches
        .iter()
        .filter(|p| p.model_id == model_id && range.contains(p.created_at))
        .collect()
}

/// Rate, mean, min, and max of drift scores. All 0 for an empty history.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DriftStats {
    pub total: usize,
    pub detected: usize,
    pub rate: f64,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

pub fn drift_stats(results: &[&DriftResult]) -> DriftStats {
    if results.is_empty() {
        return DriftStats::default();
    }
    let total = results.len();
    let detected = results.iter().filter(|r| r.is_drift_detected).count();
    let scores = results.iter().map(|r| r.drift_score);
    DriftStats {
        total,
        detected,
        rate: detected as f64 / total as f64,
        avg: scores.clone().sum::<f64>() / total as f64,
        min: scores.clone().fold(f64::INFINITY, f64::min),
        max: scores.fold(f64::NEG_INFINITY, f64::max),
    }
}

pub fn drift_type_distribution(results: &[&DriftResult]) -> BTreeMap<DriftType, usize> {
    let mut distribution = BTreeMap::new();
    for r in results {
        *distribution.entry(r.drift_type).or_insert(0) += 1;
    }
    distribution
}

/// Outcome counts. Success rate only counts patches handed to an applicator.
pub fn patch_stats(patches: &[&Patch]) -> PatchStats {
    let count = |status: PatchStatus| patches.iter().filter(|p| p.status == status).count();
    let applied = count(PatchStatus::Applied);
    let failed = count(PatchStatus::Failed);
    let rolled_back = count(PatchStatus::RolledBack);
    let attempted = patches.iter().filter(|p| p.status.is_attempted()).count();

    let safety: Vec<f64> = patches.iter().filter_map(|p| p.safety_score()).collect();
    PatchStats {
        total: patches.len(),
        applied,
        failed,
        rolled_back,
        success_rate: if attempted == 0 {
            0.0
        } else {
            applied as f64 / attempted as f64
        },
        avg_safety_score: if safety.is_empty() {
            0.0
        } else {
            safety.iter().sum::<f64>() / safety.len() as f64
        },
    }
}

/// Per-feature average drift across the history, highest first, ties by name.
pub fn top_drifted_features(results: &[&DriftResult], limit: usize) -> Vec<FeatureDriftSummary> {
    let mut by_name: BTreeMap<&str, (f64, usize, usize)> = BTreeMap::new();
    for r in results {
        for f in &r.feature_drifts {
            let entry = by_name.entry(f.feature_name.as_str()).or_insert((0.0, 0, 0));
            entry.0 += f.drift_score;
            entry.1 += usize::from(f.is_drifted);
            entry.2 += 1;
        }
    }
    let mut summaries: Vec<FeatureDriftSummary> = by_name
        .into_iter()
        .map(|(name, (sum, drifted, n))| FeatureDriftSummary {
            feature_name: name.to_string(),
            avg_drift_score: sum / n as f64,
            drifted_count: drifted,
            occurrences: n,
        })
        .collect();
    summaries.sort_by(|a, b| {
        b.avg_drift_score
            .total_cmp(&a.avg_drift_score)
            .then_with(|| a.feature_name.cmp(&b.feature_name))
    });
    summaries.truncate(limit);
    summaries
}
