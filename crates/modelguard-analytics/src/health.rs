//! Model health score.

/// Inputs to the health formula. Rates and scores in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HealthInputs {
    pub drift_rate: f64,
    pub avg_drift_score: f64,
    pub patch_success_rate: f64,
    pub avg_safety_score: f64,
}

/// `100 - 30·(drift_rate + avg_drift) + 20·(success_rate + avg_safety)`, clamped to [0, 100].
pub fn health_score(inputs: HealthInputs) -> f64 {
    let penalty = inputs.drift_rate * 30.0 + inputs.avg_drift_score * 30.0;
    let credit = inputs.patch_success_rate * 20.0 + inputs.avg_safety_score * 20.0;
    let score = 100.0 - penalty + credit;
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 100.0)
}
