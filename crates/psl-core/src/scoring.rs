//! Criterion scoring. Maps measured ratios onto 0–100 sub-scores.

use crate::calibration::{Calibration, RatioTarget};
use crate::jitter::JitterSource;
use crate::measurements::FacialMeasurements;
use crate::types::CriterionScores;
use serde::Serialize;

const MAX_SCORE: f32 = 100.0;

fn clamp_score(v: f32) -> f32 {
    v.clamp(0.0, MAX_SCORE)
}

/// Linear falloff: 100 at `ideal`, 0 at `ideal ± tolerance` and beyond.
pub fn deviation_score(ratio: f32, ideal: f32, tolerance: f32) -> f32 {
    if !(tolerance > 0.0) {
        return if ratio == ideal { MAX_SCORE } else { 0.0 };
    }
    clamp_score(MAX_SCORE - MAX_SCORE * (ratio - ideal).abs() / tolerance)
}

/// 100 for a zero delta, losing `gain` points per unit of delta.
pub fn symmetry_score(delta: f32, gain: f32) -> f32 {
    MAX_SCORE - clamp_score(delta * gain)
}

fn target_score(ratio: f32, target: RatioTarget) -> f32 {
    deviation_score(ratio, target.ideal, target.tolerance)
}

/// Score a sub-measurement, or 0 when its geometry is degenerate.
fn or_degenerate<T>(value: Option<T>, name: &'static str, score: impl FnOnce(T) -> f32) -> f32 {
    match value {
        Some(v) => score(v),
        None => {
            tracing::debug!(measurement = name, "degenerate geometry, scoring 0");
            0.0
        }
    }
}

/// Every unrounded sub-score behind the published criteria.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub eye_symmetry: f32,
    pub brow_symmetry: f32,
    pub symmetry: f32,
    /// Upper, middle, lower.
    pub thirds: [f32; 3],
    pub facial_thirds: f32,
    pub jaw_ratio: f32,
    pub chin_symmetry: f32,
    pub jawline: f32,
    pub eye_ratio: f32,
    pub eye_spacing: f32,
    pub eye_balance: f32,
    pub eyes: f32,
    pub canthal_tilt: f32,
    pub lips: f32,
    pub detection_quality: f32,
}

/// Score every criterion of one measurement set.
///
/// Draws exactly one sample from `jitter`.
pub fn score_breakdown(
    m: &FacialMeasurements,
    cal: &Calibration,
    jitter: &mut dyn JitterSource,
) -> ScoreBreakdown {
    let sym = &cal.symmetry;
    let eye_symmetry = or_degenerate(m.eye_symmetry_delta(), "eye_symmetry", |d| {
        symmetry_score(d, sym.eye_gain)
    });
    let brow_symmetry = or_degenerate(m.brow_symmetry_delta(), "brow_symmetry", |d| {
        symmetry_score(d, sym.brow_gain)
    });
    let symmetry = eye_symmetry * sym.eye_weight + brow_symmetry * sym.brow_weight;

    let thirds = m
        .thirds_ratios()
        .map(|rs| rs.map(|r| target_score(r, cal.facial_thirds)))
        .unwrap_or_else(|| {
            tracing::debug!(measurement = "facial_thirds", "degenerate geometry, scoring 0");
            [0.0; 3]
        });
    let facial_thirds = thirds.iter().sum::<f32>() / thirds.len() as f32;

    let jaw = &cal.jawline;
    let jaw_ratio = or_degenerate(m.jaw_ratio(), "jaw_ratio", |r| target_score(r, jaw.ratio));
    let chin_symmetry = or_degenerate(m.chin_symmetry_delta(), "chin_symmetry", |d| {
        symmetry_score(d, jaw.chin_gain)
    });
    let jawline = jaw_ratio * jaw.ratio_weight + chin_symmetry * jaw.chin_weight;

    let eyes_cal = &cal.eyes;
    let eye_ratio = or_degenerate(m.eye_ratio(), "eye_ratio", |r| target_score(r, eyes_cal.ratio));
    let eye_spacing = or_degenerate(m.eye_spacing(), "eye_spacing", |r| {
        target_score(r, eyes_cal.spacing)
    });
    let eye_balance = or_degenerate(m.eye_width_asymmetry(), "eye_balance", |d| {
        symmetry_score(d, eyes_cal.symmetry_gain)
    });
    let eyes = eye_ratio * eyes_cal.ratio_weight
        + eye_spacing * eyes_cal.spacing_weight
        + eye_balance * eyes_cal.symmetry_weight;

    let canthal_tilt = or_degenerate(m.canthal_tilt(), "canthal_tilt", |t| {
        clamp_score(cal.canthal_tilt.neutral + t * cal.canthal_tilt.gain)
    });

    let lips = or_degenerate(m.lip_ratio(), "lip_ratio", |r| target_score(r, cal.lips));

    let detection_quality = clamp_score(
        m.confidence * cal.detection.confidence_gain
            + jitter.sample() * cal.detection.jitter_span,
    );

    ScoreBreakdown {
        eye_symmetry,
        brow_symmetry,
        symmetry,
        thirds,
        facial_thirds,
        jaw_ratio,
        chin_symmetry,
        jawline,
        eye_ratio,
        eye_spacing,
        eye_balance,
        eyes,
        canthal_tilt,
        lips,
        detection_quality,
    }
}

fn publish(v: f32) -> u8 {
    // NaN casts to 0.
    clamp_score(v.round()) as u8
}

impl From<&ScoreBreakdown> for CriterionScores {
    fn from(b: &ScoreBreakdown) -> Self {
        CriterionScores {
            symmetry: publish(b.symmetry),
            facial_thirds: publish(b.facial_thirds),
            jawline: publish(b.jawline),
            eyes: publish(b.eyes),
            canthal_tilt: publish(b.canthal_tilt),
            lips: publish(b.lips),
            detection_quality: publish(b.detection_quality),
        }
    }
}
