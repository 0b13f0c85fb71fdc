use anyhow::Result;

use crate::frame::Frame;
use crate::geometry::PixelRect;

/// A detected hand. Hand models report boxes in native pixel coordinates.
#[derive(Clone, Copy, Debug)]
pub struct HandDetection {
    pub bbox: PixelRect,
    pub confidence: f32,
}

/// Hand detector backend trait.
///
/// Backends yield zero or more hands per frame; ordering carries no meaning.
/// Implementations must not retain frame pixels beyond the `detect` call.
pub trait HandDetector: Send {
    /// Backend identifier.
    fn name(&self) -> &'static str;

    /// Run detection on a frame.
    fn detect(&mut self, frame: &Frame) -> Result<Vec<HandDetection>>;

    /// Optional warm-up hook.
    fn warm_up(&mut self) -> Result<()> {
        Ok(())
    }
}
