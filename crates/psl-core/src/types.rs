use serde::{Deserialize, Serialize};
use std::fmt;

/// One scored facial dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Symmetry,
    FacialThirds,
    Jawline,
    Eyes,
    CanthalTilt,
    Lips,
    DetectionQuality,
}

impl Criterion {
    pub const ALL: [Criterion; 7] = [
        Criterion::Symmetry,
        Criterion::FacialThirds,
        Criterion::Jawline,
        Criterion::Eyes,
        Criterion::CanthalTilt,
        Criterion::Lips,
        Criterion::DetectionQuality,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Symmetry => "symmetry",
            Criterion::FacialThirds => "facial_thirds",
            Criterion::Jawline => "jawline",
            Criterion::Eyes => "eyes",
            Criterion::CanthalTilt => "canthal_tilt",
            Criterion::Lips => "lips",
            Criterion::DetectionQuality => "detection_quality",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Published 0–100 score for each criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionScores {
    pub symmetry: u8,
    pub facial_thirds: u8,
    pub jawline: u8,
    pub eyes: u8,
    pub canthal_tilt: u8,
    pub lips: u8,
    pub detection_quality: u8,
}

impl CriterionScores {
    pub fn get(&self, criterion: Criterion) -> u8 {
        match criterion {
            Criterion::Symmetry => self.symmetry,
            Criterion::FacialThirds => self.facial_thirds,
            Criterion::Jawline => self.jawline,
            Criterion::Eyes => self.eyes,
            Criterion::CanthalTilt => self.canthal_tilt,
            Criterion::Lips => self.lips,
            Criterion::DetectionQuality => self.detection_quality,
        }
    }

    /// Scores paired with their criterion, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Criterion, u8)> + '_ {
        Criterion::ALL.iter().map(move |&c| (c, self.get(c)))
    }

    /// The `n` lowest scores; ties keep declaration order.
    pub fn weakest(&self, n: usize) -> Vec<(Criterion, u8)> {
        let mut all: Vec<_> = self.iter().collect();
        all.sort_by_key(|&(_, score)| score);
        all.truncate(n);
        all
    }
}

/// Final scores of one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverallResult {
    pub scores: CriterionScores,
    /// Composite score in [1.0, 10.0], one decimal.
    pub overall: f32,
    /// Projected achievable score, never below `overall`.
    pub potential: f32,
}
