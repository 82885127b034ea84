//! ROC-AUC and PR-AUC by trapezoidal integration (binary labels only).

use modelguard_core::models::PredictionRecord;

/// ROC-AUC when it cannot be computed.
pub const ROC_AUC_FALLBACK: f64 = 0.5;
/// PR-AUC when it cannot be computed.
pub const PR_AUC_FALLBACK: f64 = 0.0;

struct Scored {
    /// (positive-class score, actual is positive), descending by score.
    points: Vec<(f64, bool)>,
    positives: usize,
    negatives: usize,
}

/// Positive-class scores, or `None` for multi-class data, a single class, or fewer
/// than 2 points. A record predicting class 0 with confidence c scores 1 − c.
fn scored<'a, I>(records: I) -> Option<Scored>
where
    I: IntoIterator<Item = &'a PredictionRecord>,
{
    let mut points = Vec::new();
    for r in records {
        if r.predicted_class > 1 || r.actual_class > 1 {
            return None;
        }
        let c = r.confidence.clamp(0.0, 1.0);
        let score = if r.predicted_class == 1 { c } else { 1.0 - c };
        points.push((score, r.actual_class == 1));
    }
    let positives = points.iter().filter(|(_, p)| *p).count();
    let negatives = points.len() - positives;
    if points.len() < 2 || positives == 0 || negatives == 0 {
        return None;
    }
    points.sort_by(|a, b| b.0.total_cmp(&a.0));
    Some(Scored {
        points,
        positives,
        negatives,
    })
}

/// Cumulative (true positive, false positive) counts after each group of tied scores.
fn thresholds(points: &[(f64, bool)]) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let (mut tp, mut fp) = (0usize, 0usize);
    let mut i = 0;
    while i < points.len() {
        let score = points[i].0;
        while i < points.len() && points[i].0 == score {
            if points[i].1 {
                tp += 1;
            } else {
                fp += 1;
            }
            i += 1;
        }
        out.push((tp, fp));
    }
    out
}

/// Area under the ROC curve, [`ROC_AUC_FALLBACK`] when not computable.
pub fn roc_auc<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a PredictionRecord>,
{
    let Some(s) = scored(records) else {
        return ROC_AUC_FALLBACK;
    };
    let (p, n) = (s.positives as f64, s.negatives as f64);
    let mut prev = (0.0, 0.0);
    let mut area = 0.0;
    for (tp, fp) in thresholds(&s.points) {
        let point = (fp as f64 / n, tp as f64 / p);
        area += (point.0 - prev.0) * (point.1 + prev.1) / 2.0;
        prev = point;
    }
    area.clamp(0.0, 1.0)
}

/// Area under the precision-recall curve, starting from (recall 0, precision 1).
/// [`PR_AUC_FALLBACK`] when not computable.
pub fn pr_auc<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a PredictionRecord>,
{
    let Some(s) = scored(records) else {
        return PR_AUC_FALLBACK;
    };
    let p = s.positives as f64;
    let mut prev = (0.0, 1.0);
    let mut area = 0.0;
    for (tp, fp) in thresholds(&s.points) {
        let point = (tp as f64 / p, tp as f64 / (tp + fp) as f64);
        area += (point.0 - prev.0) * (point.1 + prev.1) / 2.0;
        prev = point;
    }
    area.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(predicted: u32, actual: u32, confidence: f64) -> PredictionRecord {
        PredictionRecord::new("m", predicted, actual, confidence, Vec::new())
    }

    #[test]
    fn perfect_ranking() {
        let records = vec![
            record(1, 1, 0.9),
            record(1, 1, 0.8),
            record(0, 0, 0.8),
            record(0, 0, 0.9),
        ];
        assert!((roc_auc(&records) - 1.0).abs() < 1e-12);
        assert!((pr_auc(&records) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn inverted_ranking() {
        let records = vec![record(1, 0, 0.9), record(0, 1, 0.9)];
        assert!(roc_auc(&records).abs() < 1e-12);
    }

    #[test]
    fn all_tied_scores_is_chance() {
        let records = vec![
            record(1, 1, 0.7),
            record(1, 0, 0.7),
            record(1, 1, 0.7),
            record(1, 0, 0.7),
        ];
        assert!((roc_auc(&records) - 0.5).abs() < 1e-12);
        // One point at (recall 1, precision 0.5) joined to (0, 1).
        assert!((pr_auc(&records) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn fallbacks() {
        let one_class = vec![record(1, 1, 0.9), record(0, 1, 0.6)];
        assert_eq!(roc_auc(&one_class), ROC_AUC_FALLBACK);
        assert_eq!(pr_auc(&one_class), PR_AUC_FALLBACK);

        let single = vec![record(1, 1, 0.9)];
        assert_eq!(roc_auc(&single), ROC_AUC_FALLBACK);

        let multiclass = vec![record(2, 1, 0.9), record(0, 0, 0.6)];
        assert_eq!(roc_auc(&multiclass), ROC_AUC_FALLBACK);
        assert_eq!(pr_auc(&multiclass), PR_AUC_FALLBACK);
    }
}
