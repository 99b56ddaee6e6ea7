//! Boundary with the external marker-detection routine.

use aruco_locator_core::{GrayFrameView, MarkerObservation};
use serde::{Deserialize, Serialize};

/// Fixed catalog of tag patterns the detector recognizes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TagDictionary {
    Dict4x4_50,
    Dict5x5_100,
    Dict6x6_250,
    Dict7x7_1000,
    AprilTag36h11,
}

impl TagDictionary {
    /// Canonical dictionary name, for logging and config files.
    pub fn name(&self) -> &'static str {
        match self {
            TagDictionary::Dict4x4_50 => "DICT_4X4_50",
            TagDictionary::Dict5x5_100 => "DICT_5X5_100",
            TagDictionary::Dict6x6_250 => "DICT_6X6_250",
            TagDictionary::Dict7x7_1000 => "DICT_7X7_1000",
            TagDictionary::AprilTag36h11 => "DICT_APRILTAG_36h11",
        }
    }
}

/// Corner refinement mode requested from the detector.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum CornerRefinement {
    None,
    Subpix,
    Contour,
}

/// Process-wide detector settings, constructed once at startup.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    pub dictionary: TagDictionary,
    pub corner_refinement: CornerRefinement,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            dictionary: TagDictionary::Dict6x6_250,
            corner_refinement: CornerRefinement::Subpix,
        }
    }
}

/// Everything one detector invocation produced.
///
/// `rejected` carries candidate quads the detector discarded; the server
/// never consumes them, they are only passed through for diagnostics.
#[derive(Clone, Debug, Default)]
pub struct DetectionOutcome {
    pub markers: Vec<MarkerObservation>,
    pub rejected: Vec<MarkerObservation>,
}

/// Error raised by a detector implementation, mapped to a failed task.
#[derive(thiserror::Error, Debug)]
#[error("marker detection failed: {0}")]
pub struct DetectorError(pub String);

/// Black-box marker detection routine.
///
/// Implementations receive the [`DetectorConfig`] at construction time and
/// are expected to honor its dictionary and corner-refinement settings.
/// `detect` runs on the server's worker thread and may block.
pub trait MarkerDetector: Send {
    fn detect(&self, frame: &GrayFrameView<'_>) -> Result<DetectionOutcome, DetectorError>;
}
