//! Shared value types: marker observations, poses, and the reference frame.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Marker id within the configured dictionary.
pub type MarkerId = u32;

/// One detected marker instance.
///
/// Corners are in the detector's fixed winding order: top-left, top-right,
/// bottom-right, bottom-left. The 4-corner invariant is carried by the array
/// type; use [`MarkerObservation::from_corners`] to discard malformed
/// detector output at the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerObservation {
    pub id: MarkerId,
    pub corners: [Point2<f32>; 4],
}

impl MarkerObservation {
    pub fn new(id: MarkerId, corners: [Point2<f32>; 4]) -> Self {
        Self { id, corners }
    }

    /// Adapt a detector corner polygon; anything but exactly 4 points is
    /// invalid and dropped.
    pub fn from_corners(id: MarkerId, corners: &[Point2<f32>]) -> Option<Self> {
        let corners: [Point2<f32>; 4] = corners.try_into().ok()?;
        Some(Self { id, corners })
    }
}

/// A 2D pose: metric position plus heading in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose2D {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
}

impl Pose2D {
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self { x, y, theta }
    }
}

/// Errors from reference frame validation.
#[derive(thiserror::Error, Debug)]
pub enum ReferenceFrameError {
    #[error("pixel-to-metric scale must be positive (got {0})")]
    NonPositiveScale(f64),
}

/// Process-wide reference against which raw marker poses are normalized.
///
/// Set once at startup and immutable thereafter: the origin offsets and
/// heading offset describe the robot's nominal start pose, and
/// `pixel_to_metric` converts marker pixel coordinates into metres.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferenceFrame {
    pub origin_x: f64,
    pub origin_y: f64,
    /// Heading offset in radians.
    pub heading_offset: f64,
    /// Pixel-to-metric scale, strictly positive.
    pub pixel_to_metric: f64,
}

impl ReferenceFrame {
    pub fn new(
        origin_x: f64,
        origin_y: f64,
        heading_offset: f64,
        pixel_to_metric: f64,
    ) -> Result<Self, ReferenceFrameError> {
        if pixel_to_metric <= 0.0 {
            return Err(ReferenceFrameError::NonPositiveScale(pixel_to_metric));
        }
        Ok(Self {
            origin_x,
            origin_y,
            heading_offset,
            pixel_to_metric,
        })
    }

    /// Identity frame: zero origin and heading, unit scale.
    pub fn identity() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            heading_offset: 0.0,
            pixel_to_metric: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_corners_requires_exactly_four_points() {
        let p = Point2::new(0.0f32, 0.0);
        assert!(MarkerObservation::from_corners(7, &[p; 3]).is_none());
        assert!(MarkerObservation::from_corners(7, &[p; 5]).is_none());
        let obs = MarkerObservation::from_corners(7, &[p; 4]).unwrap();
        assert_eq!(obs.id, 7);
    }

    #[test]
    fn reference_frame_rejects_non_positive_scale() {
        assert!(ReferenceFrame::new(0.0, 0.0, 0.0, 0.0).is_err());
        assert!(ReferenceFrame::new(0.0, 0.0, 0.0, -0.5).is_err());
        assert!(ReferenceFrame::new(3.0, 2.0, 0.0, 0.006).is_ok());
    }

    #[test]
    fn reference_frame_json_round_trip() {
        let frame = ReferenceFrame::new(3.0, 2.0, 0.25, 0.006).unwrap();
        let raw = serde_json::to_string(&frame).unwrap();
        let back: ReferenceFrame = serde_json::from_str(&raw).unwrap();
        assert_eq!(frame, back);
    }
}
