//! Detection adapters.
//!
//! Two independent backend families feed the fusion loop: a face detector
//! (at most one normalized box per frame) and a hand detector (zero or more
//! pixel boxes per frame). Real model backends live outside this crate; the
//! built-in backends are the deterministic synthetic pair and no-op nulls.
//! Each backend runs on a worker thread so both can be sampled concurrently
//! with a bounded per-cycle wait.

mod face;
mod hand;
mod null;
mod scripted;
mod synthetic;
mod worker;

pub use face::{FaceDetection, FaceDetector};
pub use hand::{HandDetection, HandDetector};
pub use null::{NullFaceDetector, NullHandDetector};
pub use scripted::{FaceScript, HandScript, ScriptedFaceDetector, ScriptedHandDetector};
pub use synthetic::{SyntheticFaceDetector, SyntheticHandDetector};
pub use worker::{spawn_face_worker, spawn_hand_worker, DetectorOutcome, WorkerHandle};

use anyhow::{anyhow, Result};

use crate::config::DetectorSettings;

/// Build the configured face backend by name.
pub fn create_face_detector(settings: &DetectorSettings) -> Result<Box<dyn FaceDetector>> {
    match settings.backend.as_str() {
        "synthetic" => Ok(Box::new(SyntheticFaceDetector::new(
            settings.face_score_threshold,
        ))),
        "null" => Ok(Box::new(NullFaceDetector)),
        other => Err(anyhow!("unknown detector backend '{}'", other)),
    }
}

/// Build the configured hand backend by name.
pub fn create_hand_detector(settings: &DetectorSettings) -> Result<Box<dyn HandDetector>> {
    match settings.backend.as_str() {
        "synthetic" => Ok(Box::new(SyntheticHandDetector::new(
            settings.hand_score_threshold,
            settings.iou_threshold,
            settings.max_hands,
        ))),
        "null" => Ok(Box::new(NullHandDetector)),
        other => Err(anyhow!("unknown detector backend '{}'", other)),
    }
}
