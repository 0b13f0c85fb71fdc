//! Frame ingestion sources.
//!
//! The monitor pulls one frame per cycle from a `FrameSource`. Real camera
//! acquisition lives outside this crate; deployments plug their capture layer
//! in behind this trait. The built-in `stub://` source generates synthetic
//! frames so the daemon and tests run without hardware.

mod stub;

pub use stub::StubSource;

use anyhow::{anyhow, Result};

use crate::config::CameraSettings;
use crate::frame::Frame;

/// Capture counters surfaced in the periodic health log.
#[derive(Clone, Debug, Default)]
pub struct SourceStats {
    pub frames_captured: u64,
    pub failures: u64,
}

/// A live source of video frames.
pub trait FrameSource: Send {
    /// Source identifier for logs.
    fn name(&self) -> &'static str;

    /// Capture the next frame. A failed capture is a per-cycle error; the
    /// monitor logs it and tries again on the next tick.
    fn next_frame(&mut self) -> Result<Frame>;

    fn stats(&self) -> SourceStats;

    fn is_healthy(&self) -> bool {
        true
    }
}

/// Build a frame source from the configured URL.
///
/// Only the `stub://` scheme is handled here; anything else must be wired in
/// by the embedding application.
pub fn create_source(settings: &CameraSettings) -> Result<Box<dyn FrameSource>> {
    if settings.source.starts_with("stub://") {
        return Ok(Box::new(StubSource::new(settings.width, settings.height)));
    }
    Err(anyhow!(
        "unsupported frame source '{}' (only stub:// is built in)",
        settings.source
    ))
}
