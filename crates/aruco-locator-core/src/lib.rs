//! Core types and pose math for marker-based 2D robot localization.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete marker detector or image codec.

mod frame;
mod logger;
mod pose;
mod types;

pub use frame::{GrayFrame, GrayFrameView};
pub use pose::{compute_pose, THETA_WRAP_BOUND, THETA_WRAP_STEP};
pub use types::{MarkerId, MarkerObservation, Pose2D, ReferenceFrame, ReferenceFrameError};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
