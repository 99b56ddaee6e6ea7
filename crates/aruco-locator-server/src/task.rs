//! Per-request task record and its observable status.

use std::sync::{Arc, Mutex};

use aruco_locator_core::{GrayFrame, Pose2D};

/// Decoded camera frame handed to `submit`, or the decode failure that
/// produced no frame.
///
/// Either way a task is created; a failed decode or an empty frame resolves
/// it as failed without invoking the detector.
#[derive(Clone, Debug)]
pub enum FrameInput {
    Decoded(GrayFrame),
    DecodeFailed(String),
}

impl From<GrayFrame> for FrameInput {
    fn from(frame: GrayFrame) -> Self {
        FrameInput::Decoded(frame)
    }
}

/// Why a task ended in [`TaskStatus::Failed`].
#[derive(thiserror::Error, Clone, Debug, Eq, PartialEq)]
pub enum FailureReason {
    /// The frame was undecodable or empty.
    #[error("invalid input image: {0}")]
    InvalidInput(String),
    /// The external detection routine raised an error.
    #[error("marker detection failed: {0}")]
    Detector(String),
}

/// Observable state of a detection task.
///
/// `Succeeded`, `NotFound`, `Failed` and `Cancelled` are terminal; once a
/// task reaches one of them it never changes again. `NotFound` is a normal
/// outcome, not an error: the marker may simply not be visible in the frame.
#[derive(Clone, Debug, PartialEq)]
pub enum TaskStatus {
    /// Created, detection not yet dispatched.
    Pending,
    /// Detection routine running.
    Active,
    /// Target marker found, pose computed.
    Succeeded(Pose2D),
    /// Detection ran but no observation carried the target id.
    NotFound,
    /// Frame unusable or detector error.
    Failed(FailureReason),
    /// Preempted by the caller before a terminal outcome was recorded.
    Cancelled,
}

impl TaskStatus {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TaskStatus::Pending | TaskStatus::Active)
    }

    /// The computed pose, when the task succeeded.
    pub fn pose(&self) -> Option<Pose2D> {
        match self {
            TaskStatus::Succeeded(pose) => Some(*pose),
            _ => None,
        }
    }
}

/// The single in-flight request record.
#[derive(Debug)]
pub(crate) struct DetectionTask {
    pub(crate) id: u64,
    pub(crate) status: TaskStatus,
}

pub(crate) type TaskRecord = Arc<Mutex<DetectionTask>>;

/// Handle to one submitted task.
///
/// The handle owns a reference to its task record, so polling a handle that
/// outlived its task keeps returning that task's final status, and
/// cancelling it is a no-op.
#[derive(Clone, Debug)]
pub struct TaskHandle {
    pub(crate) id: u64,
    pub(crate) record: TaskRecord,
}

impl TaskHandle {
    /// Monotonic task sequence number, unique per server.
    pub fn id(&self) -> u64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(!TaskStatus::Pending.is_terminal());
        assert!(!TaskStatus::Active.is_terminal());
        assert!(TaskStatus::NotFound.is_terminal());
        assert!(TaskStatus::Cancelled.is_terminal());
        assert!(TaskStatus::Failed(FailureReason::InvalidInput("empty frame".into())).is_terminal());
        assert!(TaskStatus::Succeeded(Pose2D::new(0.0, 0.0, 0.0)).is_terminal());
    }

    #[test]
    fn pose_only_on_success() {
        let pose = Pose2D::new(1.0, 2.0, 0.5);
        assert_eq!(TaskStatus::Succeeded(pose).pose(), Some(pose));
        assert_eq!(TaskStatus::NotFound.pose(), None);
    }
}
