//! Image input helpers (feature `image`).
//!
//! Decoding happens at the submit boundary: any failure is folded into
//! [`FrameInput::DecodeFailed`] so the task still runs its lifecycle and the
//! caller observes a failed task instead of an out-of-band error.

use aruco_locator_core::{GrayFrame, GrayFrameView};
use aruco_locator_server::FrameInput;
use image::ImageReader;
use log::warn;
use std::path::Path;

/// Decode an image file into a submit-ready frame input.
///
/// Unreadable or undecodable files become [`FrameInput::DecodeFailed`].
pub fn load_frame(path: impl AsRef<Path>) -> FrameInput {
    let path = path.as_ref();
    let reader = match ImageReader::open(path) {
        Ok(reader) => reader,
        Err(err) => {
            warn!("could not open {}: {err}", path.display());
            return FrameInput::DecodeFailed(err.to_string());
        }
    };
    match reader.decode() {
        Ok(decoded) => FrameInput::Decoded(frame_from_gray(&decoded.to_luma8())),
        Err(err) => {
            warn!("could not decode {}: {err}", path.display());
            FrameInput::DecodeFailed(err.to_string())
        }
    }
}

/// Decode an encoded in-memory image (e.g. a JPEG from a network camera).
pub fn frame_from_bytes(bytes: &[u8]) -> FrameInput {
    match image::load_from_memory(bytes) {
        Ok(decoded) => FrameInput::Decoded(frame_from_gray(&decoded.to_luma8())),
        Err(err) => FrameInput::DecodeFailed(err.to_string()),
    }
}

/// Copy an `image::GrayImage` into the owned core frame type.
pub fn frame_from_gray(img: &image::GrayImage) -> GrayFrame {
    GrayFrame {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw().clone(),
    }
}

/// Borrow an `image::GrayImage` as the lightweight core view type.
pub fn frame_view(img: &image::GrayImage) -> GrayFrameView<'_> {
    GrayFrameView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}
