//! LinearScoreModel: a logistic reference model over raw features.

use modelguard_core::traits::IInferenceModel;

/// `score = sigmoid(bias + Σ wᵢ·xᵢ)`. Extra features beyond the weights are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScoreModel {
    weights: Vec<f64>,
    bias: f64,
    threshold: f64,
}

impl LinearScoreModel {
    pub fn new(weights: Vec<f64>, bias: f64) -> Self {
        Self {
            weights,
            bias,
            threshold: 0.5,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Predicted class at the model's own threshold.
    pub fn predict(&self, features: &[f64]) -> u32 {
        self.predict_with_threshold(features, self.threshold)
    }
}

impl IInferenceModel for LinearScoreModel {
    fn score(&self, features: &[f64]) -> f64 {
        let z = self.bias
            + self
                .weights
                .iter()
                .zip(features.iter())
                .map(|(w, x)| w * x)
                .sum::<f64>();
        if !z.is_finite() {
            return if z > 0.0 { 1.0 } else { 0.0 };
        }
        1.0 / (1.0 + (-z).exp())
    }

    fn decision_threshold(&self) -> f64 {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_is_sigmoid_of_linear_term() {
        let model = LinearScoreModel::new(vec![1.0, -1.0], 0.0);
        assert!((model.score(&[0.0, 0.0]) - 0.5).abs() < 1e-12);
        assert!(model.score(&[3.0, 0.0]) > 0.95);
        assert!(model.score(&[0.0, 3.0]) < 0.05);
        assert_eq!(model.predict(&[1.0, 0.0]), 1);
        assert_eq!(model.predict(&[0.0, 1.0]), 0);
    }

    #[test]
    fn non_finite_inputs_saturate() {
        let model = LinearScoreModel::new(vec![1.0], 0.0);
        assert_eq!(model.score(&[f64::INFINITY]), 1.0);
        assert_eq!(model.score(&[f64::NEG_INFINITY]), 0.0);
    }
}
