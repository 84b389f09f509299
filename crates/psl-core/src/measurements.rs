//! Geometric feature extraction from a 68-point landmark set.
//!
//! Raw distances are stored in pixels; every derived ratio is exposed as an
//! `Option` that is `None` when its denominator collapses to zero.

use crate::landmarks::{idx, Landmarks, Point};
use serde::Serialize;

/// Width, height and corner offset of one eye.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EyeMeasurement {
    /// Outer corner to inner corner.
    pub width: f32,
    /// Mean of the two lid-to-lid distances.
    pub height: f32,
    /// Outer corner y minus inner corner y, in image space.
    pub canthal_offset: f32,
    pub center: Point,
}

impl EyeMeasurement {
    fn extract(lm: &Landmarks, outer: usize, inner: usize, lids: [(usize, usize); 2]) -> Self {
        let outer = lm.point(outer);
        let inner = lm.point(inner);
        let height = lids
            .iter()
            .map(|&(upper, lower)| lm.point(upper).distance(&lm.point(lower)))
            .sum::<f32>()
            / lids.len() as f32;
        Self {
            width: outer.distance(&inner),
            height,
            canthal_offset: outer.y - inner.y,
            center: outer.midpoint(&inner),
        }
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> Option<f32> {
        ratio(self.width, self.height)
    }

    /// Corner offset normalised by eye width.
    pub fn canthal_tilt(&self) -> Option<f32> {
        ratio(self.canthal_offset, self.width)
    }
}

/// Vertical spans of the three facial thirds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thirds {
    /// Brow line to the approximated hairline.
    pub upper: f32,
    /// Nose tip to brow line.
    pub middle: f32,
    /// Chin to nose tip.
    pub lower: f32,
}

/// Everything the criterion scorers need, computed once per analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacialMeasurements {
    pub face_width: f32,
    pub face_height: f32,
    pub midline_x: f32,
    pub left_eye_offset: f32,
    pub right_eye_offset: f32,
    pub left_brow_height: f32,
    pub right_brow_height: f32,
    pub thirds: Thirds,
    pub jaw_width: f32,
    /// Horizontal distance of the chin from the midline.
    pub chin_offset: f32,
    pub chin_left_span: f32,
    pub chin_right_span: f32,
    pub left_eye: EyeMeasurement,
    pub right_eye: EyeMeasurement,
    pub interocular: f32,
    pub upper_lip_height: f32,
    pub lower_lip_height: f32,
    pub confidence: f32,
}

impl FacialMeasurements {
    pub fn extract(lm: &Landmarks, confidence: f32) -> Self {
        let p = |i: usize| lm.point(i);
        let midline_x = lm.midline_x();

        let left_eye = EyeMeasurement::extract(
            lm,
            idx::LEFT_EYE_OUTER,
            idx::LEFT_EYE_INNER,
            idx::LEFT_EYE_LIDS,
        );
        let right_eye = EyeMeasurement::extract(
            lm,
            idx::RIGHT_EYE_OUTER,
            idx::RIGHT_EYE_INNER,
            idx::RIGHT_EYE_LIDS,
        );

        // No forehead landmarks exist; the left brow peak stands in for the hairline.
        let hairline = p(idx::LEFT_BROW_PEAK).y;
        let brow_line = (p(idx::LEFT_BROW_OUTER).y + p(idx::RIGHT_BROW_OUTER).y) / 2.0;
        let nose_tip = p(idx::NOSE_TIP).y;
        let chin = p(idx::CHIN);

        let measurements = Self {
            face_width: p(idx::JAW_LEFT).distance(&p(idx::JAW_RIGHT)),
            face_height: p(idx::NOSE_BRIDGE_TOP).distance(&chin),
            midline_x,
            left_eye_offset: (midline_x - left_eye.center.x).abs(),
            right_eye_offset: (midline_x - right_eye.center.x).abs(),
            left_brow_height: p(idx::LEFT_BROW_PEAK).y,
            right_brow_height: p(idx::RIGHT_BROW_PEAK).y,
            thirds: Thirds {
                upper: brow_line - hairline,
                middle: nose_tip - brow_line,
                lower: chin.y - nose_tip,
            },
            jaw_width: p(idx::JAW_LOWER_LEFT).distance(&p(idx::JAW_LOWER_RIGHT)),
            chin_offset: (chin.x - midline_x).abs(),
            chin_left_span: chin.distance(&p(idx::JAW_MID_LEFT)),
            chin_right_span: chin.distance(&p(idx::JAW_MID_RIGHT)),
            left_eye,
            right_eye,
            interocular: p(idx::LEFT_EYE_INNER).distance(&p(idx::RIGHT_EYE_INNER)),
            upper_lip_height: p(idx::UPPER_LIP_TOP).distance(&p(idx::UPPER_LIP_INNER)),
            lower_lip_height: p(idx::LOWER_LIP_BOTTOM).distance(&p(idx::LOWER_LIP_INNER)),
            confidence,
        };

        tracing::debug!(
            face_width = measurements.face_width,
            face_height = measurements.face_height,
            jaw_width = measurements.jaw_width,
            interocular = measurements.interocular,
            "extracted facial measurements"
        );

        measurements
    }

    /// Difference between the eyes' distances from the midline, over face width.
    pub fn eye_symmetry_delta(&self) -> Option<f32> {
        ratio((self.left_eye_offset - self.right_eye_offset).abs(), self.face_width)
    }

    pub fn brow_symmetry_delta(&self) -> Option<f32> {
        ratio((self.left_brow_height - self.right_brow_height).abs(), self.face_width)
    }

    /// Chin drift from the midline plus jaw-contour imbalance, over face width.
    pub fn chin_symmetry_delta(&self) -> Option<f32> {
        let contour = (self.chin_left_span - self.chin_right_span).abs();
        ratio(self.chin_offset + contour, self.face_width)
    }

    /// Each third as a share of the total height.
    pub fn thirds_ratios(&self) -> Option<[f32; 3]> {
        let Thirds { upper, middle, lower } = self.thirds;
        let total = upper + middle + lower;
        Some([
            ratio(upper, total)?,
            ratio(middle, total)?,
            ratio(lower, total)?,
        ])
    }

    pub fn jaw_ratio(&self) -> Option<f32> {
        ratio(self.jaw_width, self.face_width)
    }

    /// Width/height averaged over both eyes.
    pub fn eye_ratio(&self) -> Option<f32> {
        Some((self.left_eye.aspect_ratio()? + self.right_eye.aspect_ratio()?) / 2.0)
    }

    pub fn mean_eye_width(&self) -> f32 {
        (self.left_eye.width + self.right_eye.width) / 2.0
    }

    /// Interocular distance in left-eye widths.
    pub fn eye_spacing(&self) -> Option<f32> {
        ratio(self.interocular, self.left_eye.width)
    }

    /// Left/right eye width difference relative to the mean width.
    pub fn eye_width_asymmetry(&self) -> Option<f32> {
        ratio(
            (self.left_eye.width - self.right_eye.width).abs(),
            self.mean_eye_width(),
        )
    }

    /// Canthal tilt averaged over both eyes.
    pub fn canthal_tilt(&self) -> Option<f32> {
        Some((self.left_eye.canthal_tilt()? + self.right_eye.canthal_tilt()?) / 2.0)
    }

    /// Upper lip height over total lip height.
    pub fn lip_ratio(&self) -> Option<f32> {
        ratio(
            self.upper_lip_height,
            self.upper_lip_height + self.lower_lip_height,
        )
    }
}

/// `num / den`, or `None` for a degenerate denominator.
fn ratio(num: f32, den: f32) -> Option<f32> {
    if den.abs() <= f32::EPSILON {
        return None;
    }
    let r = num / den;
    r.is_finite().then_some(r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ideal_landmarks, landmarks_with, zero_width_eyes};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_ideal_face_distances() {
        let m = FacialMeasurements::extract(&ideal_landmarks(), 0.9);
        assert_eq!(m.face_width, 200.0);
        assert_eq!(m.face_height, 115.0);
        assert_eq!(m.jaw_width, 140.0);
        assert_eq!(m.interocular, 30.0);
        assert_eq!(m.left_eye.width, 30.0);
        assert_eq!(m.left_eye.height, 10.0);
        assert_eq!(m.right_eye.height, 10.0);
        assert_eq!(m.thirds, Thirds { upper: 60.0, middle: 60.0, lower: 60.0 });
        assert_eq!(m.confidence, 0.9);
    }

    #[test]
    fn test_ideal_face_ratios() {
        let m = FacialMeasurements::extract(&ideal_landmarks(), 1.0);
        assert!(approx(m.jaw_ratio().unwrap(), 0.70));
        assert!(approx(m.eye_ratio().unwrap(), 3.0));
        assert!(approx(m.eye_spacing().unwrap(), 1.0));
        assert!(approx(m.lip_ratio().unwrap(), 0.40));
        assert_eq!(m.canthal_tilt(), Some(0.0));
        for r in m.thirds_ratios().unwrap() {
            assert!(approx(r, 1.0 / 3.0));
        }
    }

    #[test]
    fn test_ideal_face_symmetry_deltas_are_zero() {
        let m = FacialMeasurements::extract(&ideal_landmarks(), 1.0);
        assert_eq!(m.eye_symmetry_delta(), Some(0.0));
        assert_eq!(m.brow_symmetry_delta(), Some(0.0));
        assert_eq!(m.chin_symmetry_delta(), Some(0.0));
        assert_eq!(m.eye_width_asymmetry(), Some(0.0));
    }

    #[test]
    fn test_lowered_outer_corners_tilt_positive() {
        let lm = landmarks_with(&[
            (36, Point::new(55.0, 123.0)),
            (45, Point::new(145.0, 123.0)),
        ]);
        let m = FacialMeasurements::extract(&lm, 1.0);
        assert!(m.canthal_tilt().unwrap() > 0.0);
        assert_eq!(m.left_eye.canthal_offset, 3.0);
    }

    #[test]
    fn test_raised_outer_corners_tilt_negative() {
        let lm = landmarks_with(&[
            (36, Point::new(55.0, 117.0)),
            (45, Point::new(145.0, 117.0)),
        ]);
        let m = FacialMeasurements::extract(&lm, 1.0);
        assert!(m.canthal_tilt().unwrap() < 0.0);
    }

    #[test]
    fn test_eye_spacing_uses_left_eye_width() {
        // Right inner corner moved outward: right eye 24 px, gap 36 px.
        let lm = landmarks_with(&[(42, Point::new(121.0, 120.0))]);
        let m = FacialMeasurements::extract(&lm, 1.0);
        assert_eq!(m.left_eye.width, 30.0);
        assert_eq!(m.right_eye.width, 24.0);
        assert_eq!(m.interocular, 36.0);
        assert!(approx(m.eye_spacing().unwrap(), 1.2));
    }

    #[test]
    fn test_chin_shift_breaks_symmetry() {
        let lm = landmarks_with(&[(8, Point::new(110.0, 220.0))]);
        let m = FacialMeasurements::extract(&lm, 1.0);
        assert!(m.chin_symmetry_delta().unwrap() > 0.05);
    }

    #[test]
    fn test_zero_width_eyes_are_degenerate() {
        let m = FacialMeasurements::extract(&zero_width_eyes(), 1.0);
        assert_eq!(m.eye_ratio(), None);
        assert_eq!(m.eye_spacing(), None);
        assert_eq!(m.eye_width_asymmetry(), None);
        assert_eq!(m.canthal_tilt(), None);
        // Eye centres still exist, so placement symmetry is measurable.
        assert_eq!(m.eye_symmetry_delta(), Some(0.0));
    }

    #[test]
    fn test_collapsed_face_width_is_degenerate() {
        let lm = landmarks_with(&[(16, Point::new(0.0, 110.0))]);
        let m = FacialMeasurements::extract(&lm, 1.0);
        assert_eq!(m.jaw_ratio(), None);
        assert_eq!(m.brow_symmetry_delta(), None);
    }

    #[test]
    fn test_ratio_guards_zero() {
        assert_eq!(ratio(1.0, 0.0), None);
        assert_eq!(ratio(0.0, 0.0), None);
        assert_eq!(ratio(1.0, 2.0), Some(0.5));
    }
}
