//! Per-detector worker threads.
//!
//! Each detector backend runs on its own thread so the fusion loop can issue
//! both detector calls concurrently and join them with a bounded wait. Jobs
//! and replies carry a cycle sequence number: when a cycle gives up on a slow
//! detector, the late reply arrives tagged with the old sequence and is
//! drained and discarded by a later cycle instead of being mistaken for a
//! fresh result.
//!
//! Channels are bounded to one slot. A worker that has not yet picked up the
//! previous job simply reports busy for the current cycle; nothing queues up.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};

use crate::frame::Frame;

use super::face::{FaceDetection, FaceDetector};
use super::hand::{HandDetection, HandDetector};

/// Outcome of one detector call within one cycle.
pub enum DetectorOutcome<T> {
    Detected(T),
    /// The backend ran and returned an error.
    Failed(anyhow::Error),
    /// No result this cycle: worker busy, reply timed out, or thread gone.
    Unavailable(&'static str),
}

/// Handle to a detector running on its own thread.
pub struct WorkerHandle<T> {
    name: String,
    job_tx: Sender<(u64, Arc<Frame>)>,
    result_rx: Receiver<(u64, Result<T>)>,
}

impl<T> WorkerHandle<T> {
    /// Offer this cycle's frame to the worker. Returns false when the worker
    /// is still chewing on an earlier frame (or has exited), in which case the
    /// cycle proceeds without this detector.
    pub fn submit(&self, seq: u64, frame: Arc<Frame>) -> bool {
        match self.job_tx.try_send((seq, frame)) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Wait for the reply to `seq`, at most `timeout`. Replies from earlier,
    /// abandoned cycles are drained and dropped along the way.
    pub fn collect(&self, seq: u64, timeout: Duration) -> DetectorOutcome<T> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.result_rx.recv_timeout(remaining) {
                Ok((got, result)) if got == seq => {
                    return match result {
                        Ok(value) => DetectorOutcome::Detected(value),
                        Err(e) => DetectorOutcome::Failed(e),
                    };
                }
                Ok((got, _)) => {
                    log::debug!("{}: discarding stale result from cycle {}", self.name, got);
                }
                Err(RecvTimeoutError::Timeout) => return DetectorOutcome::Unavailable("timed out"),
                Err(RecvTimeoutError::Disconnected) => {
                    return DetectorOutcome::Unavailable("worker exited")
                }
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

fn spawn_worker<T, F>(name: String, mut run: F) -> Result<WorkerHandle<T>>
where
    T: Send + 'static,
    F: FnMut(&Frame) -> Result<T> + Send + 'static,
{
    let (job_tx, job_rx) = bounded::<(u64, Arc<Frame>)>(1);
    let (result_tx, result_rx) = bounded::<(u64, Result<T>)>(1);

    thread::Builder::new().name(name.clone()).spawn(move || {
        for (seq, frame) in job_rx.iter() {
            let result = run(&frame);
            // Loop shut down; drop the in-flight result.
            if result_tx.send((seq, result)).is_err() {
                break;
            }
        }
    })?;

    Ok(WorkerHandle {
        name,
        job_tx,
        result_rx,
    })
}

/// Move a face backend onto its own worker thread.
pub fn spawn_face_worker(
    mut detector: Box<dyn FaceDetector>,
) -> Result<WorkerHandle<Option<FaceDetection>>> {
    detector.warm_up()?;
    let name = format!("face-{}", detector.name());
    spawn_worker(name, move |frame| detector.detect(frame))
}

/// Move a hand backend onto its own worker thread.
pub fn spawn_hand_worker(
    mut detector: Box<dyn HandDetector>,
) -> Result<WorkerHandle<Vec<HandDetection>>> {
    detector.warm_up()?;
    let name = format!("hand-{}", detector.name());
    spawn_worker(name, move |frame| detector.detect(frame))
}
