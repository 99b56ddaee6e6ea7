//! Minimal end-to-end run against a synthetic detector.
//!
//! A real deployment implements `MarkerDetector` on top of an actual marker
//! detection library; here a stub returns one hard-coded observation so the
//! whole submit/poll lifecycle can be exercised without a camera.

use std::time::Duration;

use nalgebra::Point2;

use aruco_locator::server::{
    CameraIntrinsics, DetectionOutcome, DetectionServer, DetectorError, MarkerDetector,
    ServerParams,
};
use aruco_locator::{FrameInput, GrayFrame, MarkerObservation, ReferenceFrame, TaskStatus};

struct SyntheticDetector;

impl MarkerDetector for SyntheticDetector {
    fn detect(
        &self,
        _frame: &aruco_locator::GrayFrameView<'_>,
    ) -> Result<DetectionOutcome, DetectorError> {
        let marker = MarkerObservation::new(
            62,
            [
                Point2::new(500.0, 300.0),
                Point2::new(560.0, 300.0),
                Point2::new(560.0, 360.0),
                Point2::new(500.0, 360.0),
            ],
        );
        Ok(DetectionOutcome {
            markers: vec![marker],
            rejected: vec![],
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    aruco_locator::core::init_with_level(log::LevelFilter::Info)?;

    let intrinsics = CameraIntrinsics {
        camera_matrix: [[640.0, 0.0, 320.0], [0.0, 640.0, 240.0], [0.0, 0.0, 1.0]],
        distortion: vec![0.0; 5],
    };
    let reference = ReferenceFrame::new(3.0, 2.0, 0.0, 0.006)?;
    let server = DetectionServer::new(SyntheticDetector, ServerParams::new(reference), intrinsics);

    let frame = GrayFrame::from_raw(640, 480, vec![128u8; 640 * 480]).expect("frame buffer");
    let handle = server.submit(FrameInput::Decoded(frame), 62)?;

    loop {
        match server.poll(&handle) {
            TaskStatus::Succeeded(pose) => {
                println!(
                    "robot at ({:.3}, {:.3}) m, heading {:.3} rad",
                    pose.x, pose.y, pose.theta
                );
                break;
            }
            status if status.is_terminal() => {
                println!("no pose: {status:?}");
                break;
            }
            _ => std::thread::sleep(Duration::from_millis(5)),
        }
    }

    Ok(())
}
