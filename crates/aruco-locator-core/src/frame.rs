#[derive(Clone, Copy, Debug)]
pub struct GrayFrameView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

#[derive(Clone, Debug)]
pub struct GrayFrame {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayFrame {
    /// Build a frame from raw row-major bytes.
    ///
    /// Returns `None` when the buffer length does not match `width * height`;
    /// a mismatched buffer is indistinguishable from a botched decode.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        if data.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// A frame with no pixels. Submitting one resolves the task as failed
    /// without running detection.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            data: Vec::new(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.data.is_empty()
    }

    #[inline]
    pub fn view(&self) -> GrayFrameView<'_> {
        GrayFrameView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}
