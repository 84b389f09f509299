//! Analysis pipeline: landmarks → measurements → scores → result → advice.

use crate::advice::{AdviceEngine, AdviceItem, Profile};
use crate::aggregate::aggregate;
use crate::calibration::{Calibration, CalibrationError};
use crate::jitter::JitterSource;
use crate::landmarks::{Detection, LandmarkError, Point};
use crate::measurements::FacialMeasurements;
use crate::scoring::{score_breakdown, ScoreBreakdown};
use crate::types::{CriterionScores, OverallResult};

/// Stateless scorer bound to one calibration table.
#[derive(Debug, Clone)]
pub struct Analyzer {
    calibration: Calibration,
    advice: AdviceEngine,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self {
            calibration: Calibration::default(),
            advice: AdviceEngine::default(),
        }
    }
}

impl Analyzer {
    /// Validate `calibration` and bind it to a new analyzer.
    pub fn new(calibration: Calibration) -> Result<Self, CalibrationError> {
        calibration.validate()?;
        Ok(Self {
            calibration,
            advice: AdviceEngine::default(),
        })
    }

    /// Swap the advice catalog.
    pub fn with_advice_engine(mut self, advice: AdviceEngine) -> Self {
        self.advice = advice;
        self
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    pub fn measure(&self, detection: &Detection) -> FacialMeasurements {
        FacialMeasurements::extract(&detection.landmarks, detection.confidence)
    }

    /// Unrounded sub-scores, for callers that want the detail.
    pub fn breakdown(&self, detection: &Detection, jitter: &mut dyn JitterSource) -> ScoreBreakdown {
        score_breakdown(&self.measure(detection), &self.calibration, jitter)
    }

    /// Score one detected face.
    pub fn analyze(&self, detection: &Detection, jitter: &mut dyn JitterSource) -> OverallResult {
        let breakdown = self.breakdown(detection, jitter);
        let result = aggregate(CriterionScores::from(&breakdown), &self.calibration);
        tracing::info!(
            overall = result.overall,
            potential = result.potential,
            calibration = %self.calibration.version,
            "analysis complete"
        );
        result
    }

    /// Validate raw detector output, then score it.
    pub fn analyze_points(
        &self,
        points: &[Point],
        confidence: f32,
        jitter: &mut dyn JitterSource,
    ) -> Result<OverallResult, LandmarkError> {
        let detection = Detection::from_points(points, confidence).map_err(|e| {
            tracing::warn!(error = %e, "rejecting landmark input");
            e
        })?;
        Ok(self.analyze(&detection, jitter))
    }

    pub fn advise(&self, result: &OverallResult, profile: &Profile) -> Vec<AdviceItem> {
        self.advice.generate(result, profile)
    }
}
