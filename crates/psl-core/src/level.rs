//! PSL scale bands over the 1–10 overall score.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PslLevel {
    /// Inclusive integer range covered by the band.
    pub range: (u8, u8),
    pub label: &'static str,
    pub name: &'static str,
}

pub static PSL_LEVELS: [PslLevel; 9] = [
    PslLevel { range: (1, 2), label: "1–2", name: "Subhuman" },
    PslLevel { range: (3, 3), label: "3", name: "Below Average" },
    PslLevel { range: (4, 4), label: "4", name: "Average" },
    PslLevel { range: (5, 5), label: "5", name: "Above Average" },
    PslLevel { range: (6, 6), label: "6", name: "Attractive" },
    PslLevel { range: (7, 7), label: "7", name: "Very Attractive" },
    PslLevel { range: (8, 8), label: "8", name: "Model Tier" },
    PslLevel { range: (9, 9), label: "9", name: "Elite" },
    PslLevel { range: (10, 10), label: "10", name: "Godlike" },
];

/// Band for a decimal score, rounded to the nearest integer.
///
/// Out-of-range scores fall back to the lowest band.
pub fn level_for(score: f32) -> &'static PslLevel {
    let rounded = score.round();
    PSL_LEVELS
        .iter()
        .find(|l| rounded >= l.range.0 as f32 && rounded <= l.range.1 as f32)
        .unwrap_or(&PSL_LEVELS[0])
}
