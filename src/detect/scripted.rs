//! Scripted backends that replay predetermined per-cycle outputs.
//!
//! Tests drive exact scenarios with these: touch on a given cycle, sustained
//! touch, injected detector failures. Once a script runs out, the detector
//! keeps reporting "nothing detected".

use anyhow::{anyhow, Result};

use crate::frame::Frame;

use super::face::{FaceDetection, FaceDetector};
use super::hand::{HandDetection, HandDetector};

/// One scripted face-detector cycle.
#[derive(Clone, Debug)]
pub enum FaceScript {
    Detect(FaceDetection),
    Absent,
    Fail,
}

pub struct ScriptedFaceDetector {
    script: Vec<FaceScript>,
    cursor: usize,
}

impl ScriptedFaceDetector {
    pub fn new(script: Vec<FaceScript>) -> Self {
        Self { script, cursor: 0 }
    }
}

impl FaceDetector for ScriptedFaceDetector {
    fn name(&self) -> &'static str {
        "scripted-face"
    }

    fn detect(&mut self, _frame: &Frame) -> Result<Option<FaceDetection>> {
        let step = self.script.get(self.cursor).cloned();
        self.cursor += 1;
        match step {
            Some(FaceScript::Detect(face)) => Ok(Some(face)),
            Some(FaceScript::Absent) | None => Ok(None),
            Some(FaceScript::Fail) => Err(anyhow!("scripted face detector failure")),
        }
    }
}

/// One scripted hand-detector cycle.
#[derive(Clone, Debug)]
pub enum HandScript {
    Detect(Vec<HandDetection>),
    Fail,
}

pub struct ScriptedHandDetector {
    script: Vec<HandScript>,
    cursor: usize,
}

impl ScriptedHandDetector {
    pub fn new(script: Vec<HandScript>) -> Self {
        Self { script, cursor: 0 }
    }
}

impl HandDetector for ScriptedHandDetector {
    fn name(&self) -> &'static str {
        "scripted-hand"
    }

    fn detect(&mut self, _frame: &Frame) -> Result<Vec<HandDetection>> {
        let step = self.script.get(self.cursor).cloned();
        self.cursor += 1;
        match step {
            Some(HandScript::Detect(hands)) => Ok(hands),
            None => Ok(vec![]),
            Some(HandScript::Fail) => Err(anyhow!("scripted hand detector failure")),
        }
    }
}
