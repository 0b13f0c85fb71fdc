//! Video frame container.
//!
//! Frames are produced by the ingestion layer, handed to both detector
//! backends within a single fusion cycle, and dropped afterwards. Nothing in
//! the pipeline retains frame pixels across cycles.

use anyhow::{anyhow, Result};

use crate::geometry::FrameDimensions;

/// Number of color channels per pixel (RGB).
pub const FRAME_CHANNELS: usize = 3;

/// A single RGB video frame.
#[derive(Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Frame {
    /// Wrap raw RGB bytes. Fails when the byte count does not match the
    /// declared dimensions.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        let expected = width as usize * height as usize * FRAME_CHANNELS;
        if data.len() != expected {
            return Err(anyhow!(
                "frame byte count {} does not match {}x{} rgb ({} expected)",
                data.len(),
                width,
                height,
                expected
            ));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> FrameDimensions {
        FrameDimensions {
            width: self.width,
            height: self.height,
        }
    }

    /// Raw RGB pixel data, row-major, three bytes per pixel.
    pub fn pixels(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matching_byte_count() {
        let frame = Frame::new(vec![0u8; 4 * 2 * 3], 4, 2).unwrap();
        assert_eq!(frame.width(), 4);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.pixels().len(), 24);
    }

    #[test]
    fn rejects_mismatched_byte_count() {
        assert!(Frame::new(vec![0u8; 10], 4, 2).is_err());
    }
}
