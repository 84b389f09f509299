//! 68-point facial landmarks as produced by an external detector.
//!
//! Indices follow the iBUG 300-W convention: jaw 0–16, brows 17–26,
//! nose 27–35, eyes 36–47, mouth 48–67. "Left" and "right" are image-left
//! and image-right throughout.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of points in a complete landmark set.
pub const LANDMARK_COUNT: usize = 68;

/// Named landmark indices used by the feature extractor.
pub mod idx {
    pub const JAW_LEFT: usize = 0;
    pub const JAW_LOWER_LEFT: usize = 2;
    pub const JAW_MID_LEFT: usize = 4;
    pub const CHIN: usize = 8;
    pub const JAW_MID_RIGHT: usize = 12;
    pub const JAW_LOWER_RIGHT: usize = 14;
    pub const JAW_RIGHT: usize = 16;

    pub const LEFT_BROW_OUTER: usize = 17;
    pub const LEFT_BROW_PEAK: usize = 19;
    pub const RIGHT_BROW_PEAK: usize = 24;
    pub const RIGHT_BROW_OUTER: usize = 26;

    pub const NOSE_BRIDGE_TOP: usize = 27;
    pub const NOSE_TIP: usize = 33;

    pub const LEFT_EYE_OUTER: usize = 36;
    pub const LEFT_EYE_INNER: usize = 39;
    /// Upper/lower lid pairs measured for eye height.
    pub const LEFT_EYE_LIDS: [(usize, usize); 2] = [(37, 41), (38, 40)];
    pub const RIGHT_EYE_INNER: usize = 42;
    pub const RIGHT_EYE_OUTER: usize = 45;
    pub const RIGHT_EYE_LIDS: [(usize, usize); 2] = [(43, 47), (44, 46)];

    pub const UPPER_LIP_TOP: usize = 51;
    pub const LOWER_LIP_BOTTOM: usize = 57;
    pub const UPPER_LIP_INNER: usize = 62;
    pub const LOWER_LIP_INNER: usize = 66;
}

/// Index of each point's anatomical counterpart across the facial midline.
const MIRROR_INDEX: [usize; LANDMARK_COUNT] = [
    // jaw
    16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0,
    // brows
    26, 25, 24, 23, 22, 21, 20, 19, 18, 17,
    // nose bridge, nostrils
    27, 28, 29, 30, 35, 34, 33, 32, 31,
    // eyes
    45, 44, 43, 42, 47, 46, 39, 38, 37, 36, 41, 40,
    // outer lip
    54, 53, 52, 51, 50, 49, 48, 59, 58, 57, 56, 55,
    // inner lip
    64, 63, 62, 61, 60, 67, 66, 65,
];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LandmarkError {
    #[error("no face detected")]
    NoFaceDetected,
    #[error("insufficient landmarks: expected {expected}, got {actual}")]
    WrongCount { expected: usize, actual: usize },
    #[error("landmark {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

/// A 2-D point in image pixel space (y grows downward).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// A validated, complete 68-point landmark set.
#[derive(Debug, Clone, PartialEq)]
pub struct Landmarks([Point; LANDMARK_COUNT]);

impl Landmarks {
    /// Validate a detector's point list.
    pub fn from_points(points: &[Point]) -> Result<Self, LandmarkError> {
        if points.is_empty() {
            return Err(LandmarkError::NoFaceDetected);
        }
        let array: [Point; LANDMARK_COUNT] =
            points.try_into().map_err(|_| LandmarkError::WrongCount {
                expected: LANDMARK_COUNT,
                actual: points.len(),
            })?;
        if let Some(index) = array
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(LandmarkError::NonFinite { index });
        }
        Ok(Self(array))
    }

    pub fn point(&self, index: usize) -> Point {
        self.0[index]
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.0
    }

    /// Horizontal midline, halfway between the outer jaw points.
    pub fn midline_x(&self) -> f32 {
        (self.0[idx::JAW_LEFT].x + self.0[idx::JAW_RIGHT].x) / 2.0
    }

    /// Reflect the set around its midline and swap left/right indices.
    ///
    /// A perfectly symmetric face is a fixed point of this operation.
    pub fn mirrored(&self) -> Landmarks {
        let mid = self.midline_x();
        let mut out = self.0;
        for (i, &j) in MIRROR_INDEX.iter().enumerate() {
            let src = self.0[j];
            out[i] = Point::new(2.0 * mid - src.x, src.y);
        }
        Landmarks(out)
    }
}

/// One detected face: landmarks plus the detector's confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub landmarks: Landmarks,
    /// Detector confidence, clamped to [0, 1].
    pub confidence: f32,
}

impl Detection {
    pub fn new(landmarks: Landmarks, confidence: f32) -> Self {
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { landmarks, confidence }
    }

    pub fn from_points(points: &[Point], confidence: f32) -> Result<Self, LandmarkError> {
        Ok(Self::new(Landmarks::from_points(points)?, confidence))
    }
}
