use anyhow::Result;

use crate::frame::Frame;
use crate::geometry::NormalizedRect;

/// A detected face.
///
/// Face models report boxes relative to the frame (0..1 on each axis); the
/// fusion step converts them to pixels before any overlap test.
#[derive(Clone, Copy, Debug)]
pub struct FaceDetection {
    pub bbox: NormalizedRect,
    pub confidence: f32,
}

/// Face detector backend trait.
///
/// Backends yield at most one face per frame. `Ok(None)` means "no face
/// currently visible" and is a normal outcome, not an error. Implementations
/// must not retain frame pixels beyond the `detect` call.
pub trait FaceDetector: Send {
    /// Backend identifier.
    fn name(&self) -> &'static str;

    /// Run detection on a frame.
    fn detect(&mut self, frame: &Frame) -> Result<Option<FaceDetection>>;

    /// Optional warm-up hook.
    fn warm_up(&mut self) -> Result<()> {
        Ok(())
    }
}
