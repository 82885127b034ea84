//! Deterministic data generators for ModelGuard tests.
//!
//! Samples are quantile grids of the target distribution, permuted with a
//! seed-dependent stride so columns are not sorted and two features with
//! different seeds are not perfectly correlated. No RNG: every run produces the
//! same batches.

use chrono::{DateTime, Duration, TimeZone, Utc};
use statrs::distribution::{ContinuousCDF, Normal};

use modelguard_core::models::{
    DistributionShift, DriftResult, DriftType, FeatureDrift, FeatureSample, Patch,
    PatchConfiguration, PatchStatus, PredictionRecord, ThresholdConfig,
};

/// Strides tried in order; the first one coprime with `n` is used.
const STRIDES: [usize; 6] = [7919, 6007, 4409, 3571, 2741, 1231];

/// Fixed reference instant for timestamped fixtures.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid fixture epoch")
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// `n` values following N(mean, std), deterministic for a given `seed`.
///
/// # Panics
/// Panics if `std` is not positive.
pub fn normal_column(n: usize, mean: f64, std: f64, seed: u64) -> Vec<f64> {
    let dist = Normal::new(mean, std).expect("valid normal parameters");
    // Offset inside each quantile cell, in (0.2, 0.8).
    let offset = 0.2 + 0.6 * ((seed % 97) as f64 / 97.0);
    let grid: Vec<f64> = (0..n)
        .map(|i| dist.inverse_cdf((i as f64 + offset) / n as f64))
        .collect();

    let stride = STRIDES
        .iter()
        .copied()
        .cycle()
        .skip((seed as usize) % STRIDES.len())
        .take(STRIDES.len())
        .find(|s| n == 0 || gcd(*s, n) == 1)
        .unwrap_or(1);
    let start = (seed as usize).wrapping_mul(31) % n.max(1);
    (0..n).map(|i| grid[(start + i * stride) % n]).collect()
}

/// Feature names `f0..f{width}`.
pub fn feature_names(width: usize) -> Vec<String> {
    (0..width).map(|i| format!("f{i}")).collect()
}

/// A batch of `n` rows where every feature follows N(mean, std).
pub fn normal_batch(n: usize, width: usize, mean: f64, std: f64, seed: u64) -> FeatureSample {
    let columns = feature_names(width)
        .into_iter()
        .enumerate()
        .map(|(i, name)| (name, normal_column(n, mean, std, seed * 131 + i as u64)))
        .collect();
    FeatureSample::from_columns(columns).expect("fixture batch is well formed")
}

/// A batch with per-feature means, all with unit variance.
pub fn batch_with_means(n: usize, means: &[f64], seed: u64) -> FeatureSample {
    let columns = feature_names(means.len())
        .into_iter()
        .zip(means.iter())
        .enumerate()
        .map(|(i, (name, mean))| (name, normal_column(n, *mean, 1.0, seed * 131 + i as u64)))
        .collect();
    FeatureSample::from_columns(columns).expect("fixture batch is well formed")
}

/// `n` binary predictions for `model_id` where every fifth record is wrong,
/// giving exactly 80% accuracy when `n` is a multiple of 5.
///
/// Correct predictions carry higher confidence than wrong ones.
pub fn eighty_percent_stream(model_id: &str, n: usize) -> Vec<PredictionRecord> {
    (0..n)
        .map(|i| {
            let actual = (i % 2) as u32;
            let correct = i % 5 != 4;
            let predicted = if correct { actual } else { 1 - actual };
            let confidence = if correct {
                0.75 + 0.2 * ((i % 7) as f64 / 7.0)
            } else {
                0.5 + 0.1 * ((i % 3) as f64 / 3.0)
            };
            PredictionRecord::new(model_id, predicted, actual, confidence, vec![i as f64])
                .at(epoch() + Duration::seconds(i as i64))
        })
        .collect()
}

/// Binary predictions with a fixed accuracy pattern: record `i` is correct when
/// `correct(i)` holds.
pub fn stream_with(
    model_id: &str,
    n: usize,
    correct: impl Fn(usize) -> bool,
) -> Vec<PredictionRecord> {
    (0..n)
        .map(|i| {
            let actual = (i % 2) as u32;
            let predicted = if correct(i) { actual } else { 1 - actual };
            PredictionRecord::new(model_id, predicted, actual, 0.8, Vec::new())
                .at(epoch() + Duration::seconds(i as i64))
        })
        .collect()
}

/// One feature entry with the given score; the other fields are neutral.
pub fn feature_drift(name: &str, index: usize, drift_score: f64, is_drifted: bool) -> FeatureDrift {
    FeatureDrift {
        feature_name: name.to_string(),
        feature_index: index,
        drift_score,
        psi_score: 0.0,
        ks_statistic: 0.0,
        p_value: 1.0,
        is_drifted,
        attribution: 0.0,
        distribution_shift: DistributionShift::default(),
        corrupted_values: 0,
    }
}

/// A stored analysis with the given score, one day after `epoch() + day` days.
pub fn drift_result_on(model_id: &str, day: i64, drift_score: f64, threshold: f64) -> DriftResult {
    let detected = drift_score > threshold;
    DriftResult {
        id: uuid::Uuid::new_v4().to_string(),
        model_id: model_id.to_string(),
        timestamp: epoch() + Duration::days(day),
        drift_type: if detected {
            DriftType::CovariateDrift
        } else {
            DriftType::NoDrift
        },
        drift_score,
        threshold,
        is_drift_detected: detected,
        feature_drifts: vec![
            feature_drift("f0", 0, drift_score, detected),
            feature_drift("f1", 1, drift_score / 2.0, false),
        ],
        statistical_tests: Vec::new(),
        corrupted_value_count: 0,
    }
}

/// Daily drift history with one analysis per score, starting at `epoch()`.
pub fn drift_history(model_id: &str, scores: &[f64]) -> Vec<DriftResult> {
    scores
        .iter()
        .enumerate()
        .map(|(day, score)| drift_result_on(model_id, day as i64, *score, 0.2))
        .collect()
}

/// A threshold patch forced into `status`, bypassing lifecycle checks.
pub fn patch_with_status(model_id: &str, status: PatchStatus) -> Patch {
    let mut patch = Patch::new(
        model_id,
        "drift-fixture",
        PatchConfiguration::ThresholdTuning(ThresholdConfig {
            original_threshold: 0.5,
            new_threshold: 0.6,
        }),
    );
    patch.created_at = epoch();
    patch.status = status;
    patch
}
