//! psl-core — geometric scoring and recommendation engine.
//!
//! Turns a 68-point facial landmark set into seven 0–100 criterion scores,
//! a 1–10 overall score with a projected potential, and a prioritised
//! advice list. Every stage is a pure function of its inputs; the only
//! randomness is the injectable detection-quality jitter.

pub mod advice;
pub mod aggregate;
pub mod analyzer;
pub mod calibration;
pub mod jitter;
pub mod landmarks;
pub mod level;
pub mod measurements;
pub mod scoring;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

pub use advice::{AdviceEngine, AdviceItem, Difficulty, Gender, Profile, ProfileError};
pub use analyzer::Analyzer;
pub use calibration::{Calibration, CalibrationError};
pub use jitter::{JitterSource, NoJitter, RandomJitter};
pub use landmarks::{Detection, LandmarkError, Landmarks, Point};
pub use level::{level_for, PslLevel};
pub use types::{Criterion, CriterionScores, OverallResult};
