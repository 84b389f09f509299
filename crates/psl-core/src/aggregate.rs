//! Weighted aggregation of criterion scores into overall and potential.

use crate::calibration::{Calibration, OverallCalibration, Weights};
use crate::types::{Criterion, CriterionScores, OverallResult};

const MIN_OVERALL: f32 = 1.0;
const MAX_OVERALL: f32 = 10.0;
/// Number of weakest criteria the potential projection assumes can improve.
const WEAKEST_COUNT: usize = 2;

fn round1(v: f32) -> f32 {
    (v * 10.0).round() / 10.0
}

fn weight(weights: &Weights, criterion: Criterion) -> f32 {
    match criterion {
        Criterion::Symmetry => weights.symmetry,
        Criterion::FacialThirds => weights.facial_thirds,
        Criterion::Jawline => weights.jawline,
        Criterion::Eyes => weights.eyes,
        Criterion::CanthalTilt => weights.canthal_tilt,
        Criterion::Lips => weights.lips,
        Criterion::DetectionQuality => weights.detection_quality,
    }
}

/// Weighted sum of the published scores, 0–100.
pub fn raw_overall(scores: &CriterionScores, weights: &Weights) -> f32 {
    scores
        .iter()
        .map(|(c, s)| s as f32 * weight(weights, c))
        .sum()
}

/// Map a 0–100 raw score onto 1.0–10.0, one decimal.
///
/// The sub-linear exponent pulls most faces into the middle of the scale.
pub fn overall_score(raw: f32, cal: &OverallCalibration) -> f32 {
    let unit = (raw / 100.0).clamp(0.0, 1.0);
    let mapped = MIN_OVERALL + unit.powf(cal.exponent) * (MAX_OVERALL - MIN_OVERALL);
    round1(mapped.clamp(MIN_OVERALL, MAX_OVERALL))
}

/// Project the score reachable by closing the gap on the weakest criteria.
pub fn potential_score(overall: f32, scores: &CriterionScores, cal: &OverallCalibration) -> f32 {
    let weakest = scores.weakest(WEAKEST_COUNT);
    let gap = weakest
        .iter()
        .map(|&(_, s)| 100.0 - s as f32)
        .sum::<f32>()
        / weakest.len().max(1) as f32;
    let gain = (gap * cal.potential_gain).max(cal.potential_floor);
    round1((overall + gain).min(MAX_OVERALL)).max(overall)
}

/// Combine criterion scores into the final result.
pub fn aggregate(scores: CriterionScores, cal: &Calibration) -> OverallResult {
    let raw = raw_overall(&scores, &cal.weights);
    let overall = overall_score(raw, &cal.overall);
    let potential = potential_score(overall, &scores, &cal.overall);
    tracing::debug!(raw, overall, potential, "aggregated scores");
    OverallResult {
        scores,
        overall,
        potential,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(v: u8) -> CriterionScores {
        CriterionScores {
            symmetry: v,
            facial_thirds: v,
            jawline: v,
            eyes: v,
            canthal_tilt: v,
            lips: v,
            detection_quality: v,
        }
    }

    #[test]
    fn test_raw_overall_uniform() {
        let cal = Calibration::default();
        assert!((raw_overall(&uniform(100), &cal.weights) - 100.0).abs() < 1e-3);
        assert_eq!(raw_overall(&uniform(0), &cal.weights), 0.0);
    }

    #[test]
    fn test_raw_overall_weights() {
        let cal = Calibration::default();
        let mut scores = uniform(0);
        scores.symmetry = 100;
        assert!((raw_overall(&scores, &cal.weights) - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_overall_extremes() {
        let cal = Calibration::default().overall;
        assert_eq!(overall_score(100.0, &cal), 10.0);
        assert_eq!(overall_score(0.0, &cal), 1.0);
        assert_eq!(overall_score(150.0, &cal), 10.0);
        assert_eq!(overall_score(-5.0, &cal), 1.0);
    }

    #[test]
    fn test_overall_exponent_lifts_midrange() {
        let cal = Calibration::default().overall;
        // Linear mapping would give 5.5.
        let mid = overall_score(50.0, &cal);
        assert_eq!(mid, 6.5);
    }

    #[test]
    fn test_overall_one_decimal() {
        let cal = Calibration::default().overall;
        for raw in [3.0, 17.0, 42.5, 63.3, 88.8] {
            let s = overall_score(raw, &cal);
            assert!(((s * 10.0).round() - s * 10.0).abs() < 1e-3, "{s}");
        }
    }

    #[test]
    fn test_potential_floor() {
        let cal = Calibration::default().overall;
        // Weakest gap 10 → 0.18, raised to the 0.3 floor.
        assert_eq!(potential_score(8.0, &uniform(90), &cal), 8.3);
    }

    #[test]
    fn test_potential_uses_two_weakest() {
        let cal = Calibration::default().overall;
        let mut scores = uniform(90);
        scores.eyes = 20;
        scores.lips = 40;
        // Gaps 80 and 60 → mean 70 → 1.26.
        assert_eq!(potential_score(5.0, &scores, &cal), 6.3);
    }

    #[test]
    fn test_potential_capped_at_ten() {
        let cal = Calibration::default().overall;
        assert_eq!(potential_score(9.9, &uniform(0), &cal), 10.0);
        assert_eq!(potential_score(10.0, &uniform(100), &cal), 10.0);
    }

    #[test]
    fn test_potential_never_below_overall() {
        let cal = Calibration::default();
        for v in (0..=100).step_by(5) {
            let result = aggregate(uniform(v as u8), &cal);
            assert!(result.potential >= result.overall, "{result:?}");
            assert!((1.0..=10.0).contains(&result.overall));
            assert!((1.0..=10.0).contains(&result.potential));
        }
    }

    #[test]
    fn test_perfect_scores_top_of_range() {
        let result = aggregate(uniform(100), &Calibration::default());
        assert_eq!(result.overall, 10.0);
        assert_eq!(result.potential, 10.0);
    }
}
