//! Camera intrinsics loaded once at startup.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum CameraIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Intrinsic matrix and distortion coefficients for the capture camera.
///
/// Loading these is a precondition for starting the server: a missing or
/// malformed file must abort startup rather than surface as per-request
/// failures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    /// Row-major 3x3 intrinsic matrix.
    pub camera_matrix: [[f64; 3]; 3],
    /// Distortion coefficients in OpenCV order (k1, k2, p1, p2, k3, ...).
    pub distortion: Vec<f64>,
}

impl CameraIntrinsics {
    /// Load intrinsics from a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, CameraIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    #[inline]
    pub fn focal(&self) -> (f64, f64) {
        (self.camera_matrix[0][0], self.camera_matrix[1][1])
    }

    #[inline]
    pub fn principal_point(&self) -> (f64, f64) {
        (self.camera_matrix[0][2], self.camera_matrix[1][2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample() -> CameraIntrinsics {
        CameraIntrinsics {
            camera_matrix: [[640.0, 0.0, 320.0], [0.0, 640.0, 240.0], [0.0, 0.0, 1.0]],
            distortion: vec![0.1, -0.02, 0.0, 0.0, 0.001],
        }
    }

    #[test]
    fn load_json_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let raw = serde_json::to_string_pretty(&sample()).unwrap();
        file.write_all(raw.as_bytes()).unwrap();

        let loaded = CameraIntrinsics::load_json(file.path()).unwrap();
        assert_eq!(loaded, sample());
        assert_eq!(loaded.focal(), (640.0, 640.0));
        assert_eq!(loaded.principal_point(), (320.0, 240.0));
    }

    #[test]
    fn load_json_reports_missing_file() {
        let err = CameraIntrinsics::load_json("/nonexistent/intrinsics.json").unwrap_err();
        assert!(matches!(err, CameraIoError::Io(_)));
    }

    #[test]
    fn load_json_reports_malformed_content() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"camera_matrix\": 42}").unwrap();
        let err = CameraIntrinsics::load_json(file.path()).unwrap_err();
        assert!(matches!(err, CameraIoError::Json(_)));
    }
}
