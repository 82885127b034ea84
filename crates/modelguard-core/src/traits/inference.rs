/// Model inference over a single feature vector.
///
/// Host applications wrap their on-device runtime behind this trait; the engine
/// only needs a positive-class score and the active decision threshold.
pub trait IInferenceModel: Send + Sync {
    /// Positive-class score in [0, 1].
    fn score(&self, features: &[f64]) -> f64;

    /// Threshold at or above which a score predicts the positive class.
    fn decision_threshold(&self) -> f64 {
        0.5
    }

    /// Predicted class (0 or 1) at an explicit threshold.
    fn predict_with_threshold(&self, features: &[f64], threshold: f64) -> u32 {
        u32::from(self.score(features) >= threshold)
    }
}
