//! No-op backends.
//!
//! Useful when one half of the pipeline is supplied by the embedding
//! application, or to run the loop with a detector deliberately disabled.

use anyhow::Result;

use crate::frame::Frame;

use super::face::{FaceDetection, FaceDetector};
use super::hand::{HandDetection, HandDetector};

#[derive(Debug, Clone, Copy, Default)]
pub struct NullFaceDetector;

impl FaceDetector for NullFaceDetector {
    fn name(&self) -> &'static str {
        "null"
    }

    fn detect(&mut self, _frame: &Frame) -> Result<Option<FaceDetection>> {
        Ok(None)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullHandDetector;

impl HandDetector for NullHandDetector {
    fn name(&self) -> &'static str {
        "null"
    }

    fn detect(&mut self, _frame: &Frame) -> Result<Vec<HandDetection>> {
        Ok(vec![])
    }
}
