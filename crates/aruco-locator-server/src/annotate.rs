//! Debug annotation side channel.
//!
//! Completed tasks can be mirrored to an observer together with enough
//! geometry to draw a debug view: the matched marker outline and an arrow
//! marking the configured reference pose. The observer runs after the
//! terminal status is committed and can never change a task's outcome.

use aruco_locator_core::{GrayFrame, MarkerObservation, ReferenceFrame};
use nalgebra::Point2;

use crate::task::TaskStatus;

/// Reference-pose arrow length, in pixels.
pub const ARROW_LENGTH_PX: f32 = 60.0;

/// A completed frame plus drawing primitives for a debug view.
#[derive(Clone, Debug)]
pub struct AnnotatedFrame<'a> {
    pub frame: &'a GrayFrame,
    /// Pixel outline of the matched marker, present only on success.
    pub outline: Option<[Point2<f32>; 4]>,
    /// Reference-pose arrow, base to tip, in pixel coordinates.
    pub arrow: (Point2<f32>, Point2<f32>),
    pub label: &'static str,
}

/// Sink for annotated frames, e.g. an on-screen preview or a file writer.
pub trait ResultObserver: Send {
    fn on_result(&mut self, status: &TaskStatus, frame: &AnnotatedFrame<'_>);
}

impl<F> ResultObserver for F
where
    F: FnMut(&TaskStatus, &AnnotatedFrame<'_>) + Send,
{
    fn on_result(&mut self, status: &TaskStatus, frame: &AnnotatedFrame<'_>) {
        self(status, frame)
    }
}

/// Arrow marking the reference pose in pixel space.
///
/// The base sits at the reference origin mapped back into pixels; the tip is
/// displaced by `ARROW_LENGTH_PX` along `(-sin h, -cos h)` of the configured
/// heading, matching the historical debug rendering.
pub fn reference_arrow(reference: &ReferenceFrame) -> (Point2<f32>, Point2<f32>) {
    let base = Point2::new(
        (reference.origin_x / reference.pixel_to_metric) as f32,
        (reference.origin_y / reference.pixel_to_metric) as f32,
    );
    let heading = reference.heading_offset;
    let tip = Point2::new(
        base.x - ARROW_LENGTH_PX * heading.sin() as f32,
        base.y - ARROW_LENGTH_PX * heading.cos() as f32,
    );
    (base, tip)
}

/// Bundle a completed frame with its drawing primitives.
pub(crate) fn annotate<'a>(
    frame: &'a GrayFrame,
    matched: Option<&MarkerObservation>,
    reference: &ReferenceFrame,
) -> AnnotatedFrame<'a> {
    AnnotatedFrame {
        frame,
        outline: matched.map(|m| m.corners),
        arrow: reference_arrow(reference),
        label: "Robot",
    }
}
