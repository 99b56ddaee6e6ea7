//! High-level facade crate for the `aruco-locator-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the core types and the detection task
//!   server
//! - (feature-gated) helpers that decode an image file or buffer into the
//!   gray frame type the server consumes.
//!
//! ## Quickstart
//!
//! ```no_run
//! use aruco_locator::input;
//! use aruco_locator::server::{
//!     CameraIntrinsics, DetectionServer, ServerParams, TaskStatus,
//! };
//! use aruco_locator::ReferenceFrame;
//!
//! # fn start(detector: impl aruco_locator::server::MarkerDetector + 'static)
//! # -> Result<(), Box<dyn std::error::Error>> {
//! let intrinsics = CameraIntrinsics::load_json("config/intrinsics.json")?;
//! let reference = ReferenceFrame::new(3.0, 2.0, 0.0, 0.006)?;
//! let server = DetectionServer::new(detector, ServerParams::new(reference), intrinsics);
//!
//! let handle = server.submit(input::load_frame("frame.png"), 62)?;
//! loop {
//!     match server.poll(&handle) {
//!         TaskStatus::Succeeded(pose) => {
//!             println!("robot at ({:.2}, {:.2}) heading {:.2}", pose.x, pose.y, pose.theta);
//!             break;
//!         }
//!         status if status.is_terminal() => break,
//!         _ => std::thread::sleep(std::time::Duration::from_millis(5)),
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - [`core`](aruco_locator_core): frames, marker observations, reference
//!   frame, `compute_pose`.
//! - [`server`](aruco_locator_server): `DetectionServer` with
//!   `submit`/`cancel`/`poll`, the `MarkerDetector` boundary trait, camera
//!   intrinsics, annotation observer.
//! - [`input`] (feature `image`): decode helpers from files and
//!   `image::GrayImage` buffers.

pub use aruco_locator_core as core;
pub use aruco_locator_server as server;

pub use aruco_locator_core::{
    compute_pose, GrayFrame, GrayFrameView, MarkerId, MarkerObservation, Pose2D, ReferenceFrame,
};
pub use aruco_locator_server::{DetectionServer, FrameInput, TaskStatus};

#[cfg(feature = "image")]
pub mod input;
