use crate::errors::PatchError;
use crate::models::PatchConfiguration;

/// Applies a patch configuration to a batch of feature vectors.
pub trait IPatchApplicator: Send + Sync {
    /// Return the patched rows. Never mutates the input.
    fn apply(
        &self,
        configuration: &PatchConfiguration,
        rows: &[Vec<f64>],
    ) -> Result<Vec<Vec<f64>>, PatchError>;

    /// Decision threshold in effect once the patch is applied.
    fn effective_threshold(&self, configuration: &PatchConfiguration, current: f64) -> f64 {
        match configuration {
            PatchConfiguration::ThresholdTuning(t) => t.new_threshold,
            _ => current,
        }
    }
}
