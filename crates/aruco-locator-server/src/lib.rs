//! Detection task server for marker-based robot localization.
//!
//! The server accepts one detection request at a time: a caller submits a
//! decoded camera frame plus the robot's marker id, the frame is handed to a
//! black-box [`MarkerDetector`] on a worker thread, and the outcome is
//! reported through [`DetectionServer::poll`]. In-flight requests can be
//! preempted with [`DetectionServer::cancel`]; cancellation is cooperative
//! and a detection result arriving after preemption is discarded.
//!
//! Marker detection itself, image decoding, and any transport that carries
//! requests from remote callers all live outside this crate.

mod annotate;
mod camera;
mod detector;
mod server;
mod task;

pub use annotate::{reference_arrow, AnnotatedFrame, ResultObserver, ARROW_LENGTH_PX};
pub use camera::{CameraIntrinsics, CameraIoError};
pub use detector::{
    CornerRefinement, DetectionOutcome, DetectorConfig, DetectorError, MarkerDetector,
    TagDictionary,
};
pub use server::{DetectionServer, ServerParams, SubmitError};
pub use task::{FailureReason, FrameInput, TaskHandle, TaskStatus};
