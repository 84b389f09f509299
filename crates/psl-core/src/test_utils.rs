//! Shared fixtures for unit tests.
//!
//! The ideal face is mirror-symmetric around x = 100 and lands every ratio
//! on its default ideal: thirds of 60 px each, jaw 140/200 = 0.70,
//! eyes 30×10 px with a 30 px gap, lips 8/(8+12) = 0.40, level eye corners.

use crate::landmarks::{Detection, Landmarks, Point};

const IDEAL_FACE: [(f32, f32); 68] = [
    // jaw 0–16
    (0.0, 110.0),
    (10.0, 135.0),
    (30.0, 160.0),
    (40.0, 175.0),
    (50.0, 190.0),
    (65.0, 205.0),
    (75.0, 212.0),
    (88.0, 218.0),
    (100.0, 220.0),
    (112.0, 218.0),
    (125.0, 212.0),
    (135.0, 205.0),
    (150.0, 190.0),
    (160.0, 175.0),
    (170.0, 160.0),
    (190.0, 135.0),
    (200.0, 110.0),
    // brows 17–26
    (40.0, 100.0),
    (55.0, 70.0),
    (70.0, 40.0),
    (80.0, 70.0),
    (90.0, 95.0),
    (110.0, 95.0),
    (120.0, 70.0),
    (130.0, 40.0),
    (145.0, 70.0),
    (160.0, 100.0),
    // nose 27–35
    (100.0, 105.0),
    (100.0, 120.0),
    (100.0, 135.0),
    (100.0, 150.0),
    (90.0, 158.0),
    (95.0, 160.0),
    (100.0, 160.0),
    (105.0, 160.0),
    (110.0, 158.0),
    // left eye 36–41
    (55.0, 120.0),
    (65.0, 115.0),
    (75.0, 115.0),
    (85.0, 120.0),
    (75.0, 125.0),
    (65.0, 125.0),
    // right eye 42–47
    (115.0, 120.0),
    (125.0, 115.0),
    (135.0, 115.0),
    (145.0, 120.0),
    (135.0, 125.0),
    (125.0, 125.0),
    // outer lip 48–59
    (75.0, 190.0),
    (85.0, 185.0),
    (93.0, 182.0),
    (100.0, 182.0),
    (107.0, 182.0),
    (115.0, 185.0),
    (125.0, 190.0),
    (115.0, 198.0),
    (107.0, 201.0),
    (100.0, 202.0),
    (93.0, 201.0),
    (85.0, 198.0),
    // inner lip 60–67
    (78.0, 190.0),
    (90.0, 190.0),
    (100.0, 190.0),
    (110.0, 190.0),
    (122.0, 190.0),
    (110.0, 190.0),
    (100.0, 190.0),
    (90.0, 190.0),
];

pub fn ideal_points() -> Vec<Point> {
    IDEAL_FACE.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

pub fn ideal_landmarks() -> Landmarks {
    landmarks_with(&[])
}

/// Ideal face with selected points replaced.
pub fn landmarks_with(edits: &[(usize, Point)]) -> Landmarks {
    let mut points = ideal_points();
    for &(i, p) in edits {
        points[i] = p;
    }
    Landmarks::from_points(&points).expect("fixture has 68 finite points")
}

pub fn ideal_detection(confidence: f32) -> Detection {
    Detection::new(ideal_landmarks(), confidence)
}

/// Ideal face with both eyes collapsed to single points.
pub fn zero_width_eyes() -> Landmarks {
    let mut edits = Vec::new();
    for i in 36..=41 {
        edits.push((i, Point::new(70.0, 120.0)));
    }
    for i in 42..=47 {
        edits.push((i, Point::new(130.0, 120.0)));
    }
    landmarks_with(&edits)
}
