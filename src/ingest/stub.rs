//! Synthetic frame source for tests and hardware-free runs.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::frame::{Frame, FRAME_CHANNELS};

use super::{FrameSource, SourceStats};

/// Generates flat gray frames with per-frame noise so consecutive frames
/// differ, the way a real sensor's output would.
pub struct StubSource {
    width: u32,
    height: u32,
    rng: StdRng,
    stats: SourceStats,
}

impl StubSource {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rng: StdRng::seed_from_u64(0x5eed),
            stats: SourceStats::default(),
        }
    }
}

impl FrameSource for StubSource {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn next_frame(&mut self) -> Result<Frame> {
        let len = self.width as usize * self.height as usize * FRAME_CHANNELS;
        let mut data = vec![0x80u8; len];
        // Sparse noise is enough; full-frame randomness would just burn CPU.
        for _ in 0..64 {
            let at = self.rng.gen_range(0..len);
            data[at] = self.rng.gen();
        }
        let frame = Frame::new(data, self.width, self.height)?;
        self.stats.frames_captured += 1;
        Ok(frame)
    }

    fn stats(&self) -> SourceStats {
        self.stats.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_frames_at_configured_dimensions() {
        let mut source = StubSource::new(64, 48);
        let frame = source.next_frame().unwrap();
        assert_eq!(frame.width(), 64);
        assert_eq!(frame.height(), 48);
        assert_eq!(source.stats().frames_captured, 1);
    }

    #[test]
    fn consecutive_frames_differ() {
        let mut source = StubSource::new(32, 32);
        let a = source.next_frame().unwrap();
        let b = source.next_frame().unwrap();
        assert_ne!(a.pixels(), b.pixels());
    }
}
