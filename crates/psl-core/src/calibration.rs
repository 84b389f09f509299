//! Calibration table: every anthropometric ideal, tolerance, gain and weight.
//!
//! The built-in defaults mirror `contrib/calibration/default.toml`. A custom
//! table can be loaded from TOML; it is validated before use.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

const WEIGHT_SUM_EPSILON: f32 = 1e-3;

#[derive(Error, Debug)]
pub enum CalibrationError {
    #[error("failed to read calibration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("bad calibration TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid calibration: {0}")]
    Invalid(String),
}

/// Complete scoring calibration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// Free-form tag so results can be traced to the table that produced them.
    pub version: String,
    pub weights: Weights,
    pub symmetry: SymmetryCalibration,
    pub facial_thirds: RatioTarget,
    pub jawline: JawlineCalibration,
    pub eyes: EyeCalibration,
    pub canthal_tilt: CanthalTiltCalibration,
    pub lips: RatioTarget,
    pub detection: DetectionCalibration,
    pub overall: OverallCalibration,
}

/// Per-criterion aggregation weights; must sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub symmetry: f32,
    pub facial_thirds: f32,
    pub jawline: f32,
    pub eyes: f32,
    pub canthal_tilt: f32,
    pub lips: f32,
    pub detection_quality: f32,
}

impl Weights {
    pub fn sum(&self) -> f32 {
        self.symmetry
            + self.facial_thirds
            + self.jawline
            + self.eyes
            + self.canthal_tilt
            + self.lips
            + self.detection_quality
    }
}

/// An ideal ratio and the deviation at which the score reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioTarget {
    pub ideal: f32,
    pub tolerance: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymmetryCalibration {
    pub eye_weight: f32,
    pub brow_weight: f32,
    /// Penalty per unit of face-width-normalised eye offset.
    pub eye_gain: f32,
    pub brow_gain: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JawlineCalibration {
    pub ratio: RatioTarget,
    pub ratio_weight: f32,
    pub chin_weight: f32,
    pub chin_gain: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EyeCalibration {
    /// Width / height.
    pub ratio: RatioTarget,
    /// Interocular distance / left eye width.
    pub spacing: RatioTarget,
    pub symmetry_gain: f32,
    pub ratio_weight: f32,
    pub spacing_weight: f32,
    pub symmetry_weight: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanthalTiltCalibration {
    /// Score for perfectly level eye corners.
    pub neutral: f32,
    pub gain: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionCalibration {
    pub confidence_gain: f32,
    /// Maximum points added by the jitter source.
    pub jitter_span: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallCalibration {
    /// Exponent applied to the 0–1 raw score before mapping onto 1–10.
    pub exponent: f32,
    pub potential_floor: f32,
    pub potential_gain: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            version: "default-1".to_string(),
            weights: Weights {
                symmetry: 0.25,
                facial_thirds: 0.15,
                jawline: 0.15,
                eyes: 0.20,
                canthal_tilt: 0.10,
                lips: 0.08,
                detection_quality: 0.07,
            },
            symmetry: SymmetryCalibration {
                eye_weight: 0.6,
                brow_weight: 0.4,
                eye_gain: 300.0,
                brow_gain: 200.0,
            },
            facial_thirds: RatioTarget { ideal: 0.333, tolerance: 0.08 },
            jawline: JawlineCalibration {
                ratio: RatioTarget { ideal: 0.70, tolerance: 0.12 },
                ratio_weight: 0.65,
                chin_weight: 0.35,
                chin_gain: 300.0,
            },
            eyes: EyeCalibration {
                ratio: RatioTarget { ideal: 3.0, tolerance: 0.5 },
                spacing: RatioTarget { ideal: 1.0, tolerance: 0.25 },
                symmetry_gain: 200.0,
                ratio_weight: 0.4,
                spacing_weight: 0.4,
                symmetry_weight: 0.2,
            },
            canthal_tilt: CanthalTiltCalibration { neutral: 50.0, gain: 400.0 },
            lips: RatioTarget { ideal: 0.40, tolerance: 0.08 },
            detection: DetectionCalibration {
                confidence_gain: 90.0,
                jitter_span: 10.0,
            },
            overall: OverallCalibration {
                exponent: 0.70,
                potential_floor: 0.3,
                potential_gain: 0.018,
            },
        }
    }
}

impl Calibration {
    /// Parse and validate a TOML calibration table.
    pub fn from_toml_str(src: &str) -> Result<Self, CalibrationError> {
        let calibration: Calibration = toml::from_str(src)?;
        calibration.validate()?;
        Ok(calibration)
    }

    /// Load and validate a calibration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CalibrationError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| CalibrationError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let calibration = Self::from_toml_str(&src)?;
        tracing::info!(
            path = %path.display(),
            version = %calibration.version,
            "loaded calibration"
        );
        Ok(calibration)
    }

    pub fn validate(&self) -> Result<(), CalibrationError> {
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(CalibrationError::Invalid(format!(
                "criterion weights sum to {sum:.4}, expected 1.0"
            )));
        }

        let targets = [
            ("facial_thirds", self.facial_thirds),
            ("jawline.ratio", self.jawline.ratio),
            ("eyes.ratio", self.eyes.ratio),
            ("eyes.spacing", self.eyes.spacing),
            ("lips", self.lips),
        ];
        for (name, target) in targets {
            if !(target.tolerance > 0.0) || !target.ideal.is_finite() {
                return Err(CalibrationError::Invalid(format!(
                    "{name}: tolerance must be positive and ideal finite"
                )));
            }
        }

        if !(self.overall.exponent > 0.0) {
            return Err(CalibrationError::Invalid(format!(
                "overall.exponent must be positive, got {}",
                self.overall.exponent
            )));
        }
        if self.overall.potential_floor < 0.0 {
            return Err(CalibrationError::Invalid(
                "overall.potential_floor must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHIPPED: &str = include_str!("../../../contrib/calibration/default.toml");

    #[test]
    fn test_default_is_valid() {
        Calibration::default().validate().unwrap();
        assert!((Calibration::default().weights.sum() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_shipped_file_matches_builtin() {
        let shipped = Calibration::from_toml_str(SHIPPED).unwrap();
        assert_eq!(shipped, Calibration::default());
    }

    #[test]
    fn test_toml_roundtrip_preserves_table() {
        let cal = Calibration::default();
        let text = cal.to_toml_string().unwrap();
        assert_eq!(Calibration::from_toml_str(&text).unwrap(), cal);
    }

    #[test]
    fn test_rejects_bad_weight_sum() {
        let mut cal = Calibration::default();
        cal.weights.symmetry = 0.5;
        assert!(matches!(cal.validate(), Err(CalibrationError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_tolerance() {
        let mut cal = Calibration::default();
        cal.lips.tolerance = 0.0;
        let err = cal.validate().unwrap_err();
        assert!(err.to_string().contains("lips"), "{err}");
    }

    #[test]
    fn test_rejects_nan_tolerance() {
        let mut cal = Calibration::default();
        cal.eyes.spacing.tolerance = f32::NAN;
        assert!(cal.validate().is_err());
    }

    #[test]
    fn test_parse_error_surfaces() {
        let err = Calibration::from_toml_str("version = 3").unwrap_err();
        assert!(matches!(err, CalibrationError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Calibration::load("/nonexistent/psl-calibration.toml").unwrap_err();
        assert!(matches!(err, CalibrationError::Io { .. }));
    }
}
