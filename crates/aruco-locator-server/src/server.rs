//! The detection task server.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use aruco_locator_core::{compute_pose, GrayFrame, MarkerId, MarkerObservation, ReferenceFrame};

use crate::annotate::{annotate, ResultObserver};
use crate::camera::CameraIntrinsics;
use crate::detector::{DetectorConfig, MarkerDetector};
use crate::task::{DetectionTask, FailureReason, FrameInput, TaskHandle, TaskRecord, TaskStatus};

/// Rejected submission under the single-slot policy.
#[derive(thiserror::Error, Debug, Eq, PartialEq)]
pub enum SubmitError {
    #[error("a detection task is already in flight")]
    Busy,
}

/// Immutable server configuration, fixed at startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServerParams {
    /// Frame the computed poses are expressed in.
    pub reference: ReferenceFrame,
    /// Dictionary and refinement settings the detector was built with.
    #[serde(default)]
    pub detector: DetectorConfig,
}

impl ServerParams {
    pub fn new(reference: ReferenceFrame) -> Self {
        Self {
            reference,
            detector: DetectorConfig::default(),
        }
    }
}

struct Job {
    record: TaskRecord,
    input: FrameInput,
    target: MarkerId,
}

type SharedObserver = Arc<Mutex<Option<Box<dyn ResultObserver>>>>;

/// Request/response server around one marker detector.
///
/// Holds the only mutable state in the system: the currently active task.
/// `submit` returns promptly; the detector runs on a dedicated worker thread
/// so `cancel` and `poll` stay responsive while detection is in flight. At
/// most one non-terminal task exists at a time; a submission while one is in
/// flight is rejected with [`SubmitError::Busy`].
pub struct DetectionServer {
    params: ServerParams,
    intrinsics: CameraIntrinsics,
    jobs: Option<Sender<Job>>,
    worker: Option<JoinHandle<()>>,
    active: Mutex<Option<TaskRecord>>,
    next_id: AtomicU64,
    observer: SharedObserver,
}

impl DetectionServer {
    /// Start the server and its worker thread.
    ///
    /// `intrinsics` must already be loaded; failing to load them is a
    /// startup-fatal condition handled by the caller, never a per-request
    /// error.
    pub fn new<D>(detector: D, params: ServerParams, intrinsics: CameraIntrinsics) -> Self
    where
        D: MarkerDetector + 'static,
    {
        let observer: SharedObserver = Arc::new(Mutex::new(None));
        let (tx, rx) = mpsc::channel::<Job>();

        let reference = params.reference;
        let worker_observer = Arc::clone(&observer);
        let worker = thread::spawn(move || worker_loop(rx, detector, reference, worker_observer));

        info!(
            "detection server started (dictionary {}, corner refinement {:?})",
            params.detector.dictionary.name(),
            params.detector.corner_refinement
        );

        Self {
            params,
            intrinsics,
            jobs: Some(tx),
            worker: Some(worker),
            active: Mutex::new(None),
            next_id: AtomicU64::new(0),
            observer,
        }
    }

    /// Attach a sink for annotated frames of completed tasks.
    ///
    /// The observer runs on the worker thread after a task commits its
    /// terminal status; it never affects task outcomes.
    pub fn set_observer<O>(&self, observer: O)
    where
        O: ResultObserver + 'static,
    {
        *self.observer.lock().unwrap() = Some(Box::new(observer));
    }

    pub fn params(&self) -> &ServerParams {
        &self.params
    }

    pub fn intrinsics(&self) -> &CameraIntrinsics {
        &self.intrinsics
    }

    /// Begin a new detection task for `target`.
    ///
    /// Returns [`SubmitError::Busy`] without creating a task while a
    /// non-terminal task exists.
    #[cfg_attr(feature = "tracing", instrument(level = "info", skip(self, input)))]
    pub fn submit(&self, input: FrameInput, target: MarkerId) -> Result<TaskHandle, SubmitError> {
        let mut active = self.active.lock().unwrap();
        if let Some(record) = active.as_ref() {
            if !record.lock().unwrap().status.is_terminal() {
                return Err(SubmitError::Busy);
            }
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let record: TaskRecord = Arc::new(Mutex::new(DetectionTask {
            id,
            status: TaskStatus::Pending,
        }));
        *active = Some(Arc::clone(&record));
        drop(active);

        info!("task {id}: accepted (target marker {target})");

        let job = Job {
            record: Arc::clone(&record),
            input,
            target,
        };
        if let Some(jobs) = self.jobs.as_ref() {
            if jobs.send(job).is_err() {
                warn!("task {id}: detection worker is gone, failing task");
                record.lock().unwrap().status = TaskStatus::Failed(FailureReason::Detector(
                    "detection worker is not running".into(),
                ));
            }
        }

        Ok(TaskHandle { id, record })
    }

    /// Preempt a task. No-op once the task is terminal.
    pub fn cancel(&self, handle: &TaskHandle) {
        let mut task = handle.record.lock().unwrap();
        if task.status.is_terminal() {
            return;
        }
        warn!("task {}: preempted by caller", task.id);
        task.status = TaskStatus::Cancelled;
    }

    /// Snapshot of the task's current status.
    pub fn poll(&self, handle: &TaskHandle) -> TaskStatus {
        handle.record.lock().unwrap().status.clone()
    }
}

impl Drop for DetectionServer {
    fn drop(&mut self) {
        // Disconnect the channel so the worker loop drains and exits.
        drop(self.jobs.take());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn worker_loop<D: MarkerDetector>(
    jobs: Receiver<Job>,
    detector: D,
    reference: ReferenceFrame,
    observer: SharedObserver,
) {
    while let Ok(job) = jobs.recv() {
        run_job(job, &detector, &reference, &observer);
    }
    debug!("detection worker shutting down");
}

fn run_job(
    job: Job,
    detector: &dyn MarkerDetector,
    reference: &ReferenceFrame,
    observer: &SharedObserver,
) {
    let Job {
        record,
        input,
        target,
    } = job;

    let id = {
        let mut task = record.lock().unwrap();
        if task.status.is_terminal() {
            // Cancelled while still queued; the frame is dropped unseen.
            info!("task {}: discarded before dispatch", task.id);
            return;
        }
        task.status = TaskStatus::Active;
        task.id
    };

    let (status, frame, matched) = evaluate(input, target, detector, reference);

    {
        let mut task = record.lock().unwrap();
        if task.status.is_terminal() {
            // Preemption won the race: the late result must not overwrite it.
            info!("task {id}: result arrived after preemption, discarded");
            return;
        }
        match &status {
            TaskStatus::Succeeded(pose) => info!(
                "task {id}: succeeded (x={:.3}, y={:.3}, theta={:.3})",
                pose.x, pose.y, pose.theta
            ),
            TaskStatus::NotFound => info!("task {id}: target marker {target} not visible"),
            TaskStatus::Failed(reason) => warn!("task {id}: failed: {reason}"),
            _ => {}
        }
        task.status = status.clone();
    }

    if let Some(frame) = frame.as_ref() {
        if let Some(observer) = observer.lock().unwrap().as_mut() {
            let annotated = annotate(frame, matched.as_ref(), reference);
            observer.on_result(&status, &annotated);
        }
    }
}

/// Decide the terminal outcome for one request.
///
/// Order is fixed: decode status, empty-frame check, detector invocation,
/// then target-id filtering. Also returns the decoded frame and the matched
/// observation for the annotation side channel.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(input, detector, reference))
)]
fn evaluate(
    input: FrameInput,
    target: MarkerId,
    detector: &dyn MarkerDetector,
    reference: &ReferenceFrame,
) -> (TaskStatus, Option<GrayFrame>, Option<MarkerObservation>) {
    let frame = match input {
        FrameInput::DecodeFailed(msg) => {
            let reason = FailureReason::InvalidInput(format!("image decode failed: {msg}"));
            return (TaskStatus::Failed(reason), None, None);
        }
        FrameInput::Decoded(frame) => frame,
    };

    if frame.is_empty() {
        let reason = FailureReason::InvalidInput("empty frame".into());
        return (TaskStatus::Failed(reason), Some(frame), None);
    }

    let outcome = match detector.detect(&frame.view()) {
        Ok(outcome) => outcome,
        Err(err) => {
            let reason = FailureReason::Detector(err.0);
            return (TaskStatus::Failed(reason), Some(frame), None);
        }
    };
    debug!(
        "detector returned {} markers, {} rejected candidates",
        outcome.markers.len(),
        outcome.rejected.len()
    );

    // First observation carrying the target id, in detector output order.
    // Duplicate detections of the same id are not disambiguated further.
    let matched = outcome.markers.iter().find(|m| m.id == target).copied();

    match matched {
        Some(observation) => {
            let pose = compute_pose(&observation.corners, reference.pixel_to_metric, reference);
            (TaskStatus::Succeeded(pose), Some(frame), Some(observation))
        }
        None => (TaskStatus::NotFound, Some(frame), None),
    }
}
