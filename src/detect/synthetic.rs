//! Deterministic model-free backends.
//!
//! These stand in for real face/hand models so the daemon demos end-to-end
//! without model files or hardware. The face sits near the frame center with
//! a slow drift; a hand sweeps across the frame and periodically crosses the
//! face region, which exercises the whole fusion/alert path.

use anyhow::Result;

use crate::frame::Frame;
use crate::geometry::{NormalizedRect, PixelRect};

use super::face::{FaceDetection, FaceDetector};
use super::hand::{HandDetection, HandDetector};

const FACE_CONFIDENCE: f32 = 0.92;
const HAND_CONFIDENCE: f32 = 0.9;
const GHOST_CONFIDENCE: f32 = 0.75;
const SWEEP_PERIOD: u64 = 40;

pub struct SyntheticFaceDetector {
    score_threshold: f32,
    cycle: u64,
}

impl SyntheticFaceDetector {
    pub fn new(score_threshold: f32) -> Self {
        Self {
            score_threshold,
            cycle: 0,
        }
    }
}

impl FaceDetector for SyntheticFaceDetector {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn detect(&mut self, _frame: &Frame) -> Result<Option<FaceDetection>> {
        self.cycle += 1;
        if FACE_CONFIDENCE < self.score_threshold {
            return Ok(None);
        }
        // Slow vertical drift, +-0.02 of frame height over the sweep period.
        let phase = (self.cycle % SWEEP_PERIOD) as f32 / SWEEP_PERIOD as f32;
        let drift = (phase - 0.5).abs() * 0.08 - 0.02;
        Ok(Some(FaceDetection {
            bbox: NormalizedRect::from_edges(0.35, 0.2 + drift, 0.65, 0.55 + drift),
            confidence: FACE_CONFIDENCE,
        }))
    }
}

pub struct SyntheticHandDetector {
    score_threshold: f32,
    iou_threshold: f32,
    max_hands: usize,
    cycle: u64,
}

impl SyntheticHandDetector {
    pub fn new(score_threshold: f32, iou_threshold: f32, max_hands: usize) -> Self {
        Self {
            score_threshold,
            iou_threshold,
            max_hands,
            cycle: 0,
        }
    }
}

impl HandDetector for SyntheticHandDetector {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn detect(&mut self, frame: &Frame) -> Result<Vec<HandDetection>> {
        self.cycle += 1;
        let w = frame.width() as f32;
        let h = frame.height() as f32;
        let hand_w = (w * 0.22).max(1.0);
        let hand_h = (h * 0.3).max(1.0);

        // Triangle-wave sweep: left edge to right edge and back each period.
        let phase = (self.cycle % SWEEP_PERIOD) as f32 / SWEEP_PERIOD as f32;
        let t = 1.0 - (2.0 * phase - 1.0).abs();
        let x = t * (w - hand_w);
        let y = h * 0.3;

        let candidates = [
            HandDetection {
                bbox: PixelRect::from_xywh(x, y, hand_w, hand_h),
                confidence: HAND_CONFIDENCE,
            },
            // Detection models commonly emit a second, weaker box for the
            // same hand; suppression below is what the iou threshold is for.
            HandDetection {
                bbox: PixelRect::from_xywh(x + 8.0, y + 6.0, hand_w, hand_h),
                confidence: GHOST_CONFIDENCE,
            },
        ];

        let mut kept: Vec<HandDetection> = Vec::new();
        for cand in candidates {
            if cand.confidence < self.score_threshold {
                continue;
            }
            if kept.iter().any(|k| k.bbox.iou(&cand.bbox) > self.iou_threshold) {
                continue;
            }
            kept.push(cand);
            if kept.len() == self.max_hands {
                break;
            }
        }
        Ok(kept)
    }
}
