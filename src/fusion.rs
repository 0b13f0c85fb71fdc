//! Detection fusion and the monitor loop.
//!
//! One fusion cycle: pull a frame, offer it to the face and hand workers
//! concurrently, join both results under a bounded wait, normalize the face
//! box, test overlap against every hand box, then hand the touching signal to
//! the presentation sink and the alert debouncer. Cycles repeat at a fixed
//! cadence until shutdown; a failing cycle is logged and skipped, never fatal.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::alert::{AlertDebouncer, AlertDecision, Notification, NotificationSink};
use crate::config::MonitorConfig;
use crate::detect::{
    spawn_face_worker, spawn_hand_worker, DetectorOutcome, FaceDetection, FaceDetector,
    HandDetection, HandDetector, WorkerHandle,
};
use crate::frame::Frame;
use crate::geometry::{FrameDimensions, PixelRect};
use crate::ingest::FrameSource;
use crate::sink::PresentationSink;

const HEALTH_LOG_INTERVAL: Duration = Duration::from_secs(5);

/// Result of fusing one cycle's detections.
#[derive(Clone, Copy, Debug)]
pub struct CycleEvaluation {
    pub touching: bool,
    /// Face box converted to pixel space, when a face was present.
    pub face_px: Option<PixelRect>,
}

/// Fuse one cycle.
///
/// No face means nothing to touch, so the signal is false no matter what the
/// hand detector saw. With a face present the box is normalized exactly once
/// and the signal is the OR of the overlap test across all hand boxes.
pub fn evaluate(
    face: Option<&FaceDetection>,
    hands: &[HandDetection],
    dims: FrameDimensions,
) -> CycleEvaluation {
    let Some(face) = face else {
        return CycleEvaluation {
            touching: false,
            face_px: None,
        };
    };
    let face_px = face.bbox.to_pixels(dims);
    let touching = hands.iter().any(|hand| face_px.intersects(&hand.bbox));
    CycleEvaluation {
        touching,
        face_px: Some(face_px),
    }
}

/// Everything the presentation sink sees each cycle.
pub struct CycleUpdate<'a> {
    pub touching: bool,
    pub face: Option<FaceDetection>,
    pub face_px: Option<PixelRect>,
    pub hands: &'a [HandDetection],
    pub dims: FrameDimensions,
}

/// Loop-level knobs, split out of `MonitorConfig` so tests can build a
/// monitor without touching files or the environment.
#[derive(Clone, Debug)]
pub struct MonitorSettings {
    pub interval: Duration,
    pub detector_timeout: Duration,
    pub degraded_after: u32,
    pub cooldown: Duration,
    pub notification_title: String,
    pub notification_body: String,
}

impl MonitorSettings {
    pub fn from_config(cfg: &MonitorConfig) -> Self {
        Self {
            interval: cfg.camera.interval,
            detector_timeout: cfg.detector.timeout,
            degraded_after: cfg.health.degraded_after,
            cooldown: cfg.alert.cooldown,
            notification_title: cfg.alert.title.clone(),
            notification_body: cfg.alert.body.clone(),
        }
    }
}

/// The fusion loop. Owns the detector workers, the debouncer, and both sinks;
/// the debouncer's timestamp is the only state carried across cycles besides
/// the health counters.
pub struct Monitor {
    settings: MonitorSettings,
    face_worker: WorkerHandle<Option<FaceDetection>>,
    hand_worker: WorkerHandle<Vec<HandDetection>>,
    debouncer: AlertDebouncer,
    presentation: Box<dyn PresentationSink>,
    notifier: Box<dyn NotificationSink>,
    seq: u64,
    cycles: u64,
    alerts: u64,
    consecutive_failures: u32,
}

impl Monitor {
    pub fn new(
        settings: MonitorSettings,
        face: Box<dyn FaceDetector>,
        hand: Box<dyn HandDetector>,
        presentation: Box<dyn PresentationSink>,
        notifier: Box<dyn NotificationSink>,
    ) -> Result<Self> {
        let face_worker = spawn_face_worker(face)?;
        let hand_worker = spawn_hand_worker(hand)?;
        let debouncer = AlertDebouncer::new(settings.cooldown);
        Ok(Self {
            settings,
            face_worker,
            hand_worker,
            debouncer,
            presentation,
            notifier,
            seq: 0,
            cycles: 0,
            alerts: 0,
            consecutive_failures: 0,
        })
    }

    pub fn alerts_fired(&self) -> u64 {
        self.alerts
    }

    pub fn cycles_run(&self) -> u64 {
        self.cycles
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Run until the shutdown flag is set. In-flight detector calls at
    /// shutdown are left to finish on their worker threads; their results are
    /// dropped when the workers' channels disconnect.
    pub fn run(&mut self, source: &mut dyn FrameSource, shutdown: &AtomicBool) -> Result<()> {
        log::info!(
            "monitor running: source={} interval={:?} cooldown={:?} detector_timeout={:?}",
            source.name(),
            self.settings.interval,
            self.settings.cooldown,
            self.settings.detector_timeout,
        );
        let mut last_health_log = Instant::now();

        while !shutdown.load(Ordering::Relaxed) {
            match source.next_frame() {
                Ok(frame) => self.run_cycle(frame),
                Err(e) => {
                    log::warn!("frame source failed this cycle: {:#}", e);
                    self.record_failure();
                }
            }

            if last_health_log.elapsed() >= HEALTH_LOG_INTERVAL {
                let stats = source.stats();
                log::info!(
                    "health: cycles={} alerts={} consecutive_failures={} source_healthy={} frames_captured={}",
                    self.cycles,
                    self.alerts,
                    self.consecutive_failures,
                    source.is_healthy(),
                    stats.frames_captured,
                );
                last_health_log = Instant::now();
            }

            std::thread::sleep(self.settings.interval);
        }

        log::info!(
            "monitor stopped after {} cycles, {} alerts",
            self.cycles,
            self.alerts
        );
        Ok(())
    }

    /// Execute one fusion cycle against an already-captured frame. Detector
    /// problems degrade to "no detection this cycle" instead of erroring out,
    /// so the loop (or a test) can always proceed to the next frame.
    pub fn run_cycle(&mut self, frame: Frame) {
        self.cycles += 1;
        self.seq += 1;
        let seq = self.seq;
        let dims = frame.dimensions();
        let frame = Arc::new(frame);

        // Offer the frame to both workers before waiting on either, so the
        // detectors run concurrently.
        let face_submitted = self.face_worker.submit(seq, frame.clone());
        let hand_submitted = self.hand_worker.submit(seq, frame);

        let timeout = self.settings.detector_timeout;
        let face_outcome = if face_submitted {
            self.face_worker.collect(seq, timeout)
        } else {
            DetectorOutcome::Unavailable("busy")
        };
        let hand_outcome = if hand_submitted {
            self.hand_worker.collect(seq, timeout)
        } else {
            DetectorOutcome::Unavailable("busy")
        };

        let mut cycle_ok = true;
        let face = match face_outcome {
            DetectorOutcome::Detected(face) => face,
            DetectorOutcome::Failed(e) => {
                log::warn!("{}: detector error: {:#}", self.face_worker.name(), e);
                cycle_ok = false;
                None
            }
            DetectorOutcome::Unavailable(reason) => {
                log::warn!("{}: unavailable: {}", self.face_worker.name(), reason);
                cycle_ok = false;
                None
            }
        };
        let hands = match hand_outcome {
            DetectorOutcome::Detected(hands) => hands,
            DetectorOutcome::Failed(e) => {
                log::warn!("{}: detector error: {:#}", self.hand_worker.name(), e);
                cycle_ok = false;
                vec![]
            }
            DetectorOutcome::Unavailable(reason) => {
                log::warn!("{}: unavailable: {}", self.hand_worker.name(), reason);
                cycle_ok = false;
                vec![]
            }
        };

        if cycle_ok {
            self.consecutive_failures = 0;
        } else {
            self.record_failure();
        }

        let evaluation = evaluate(face.as_ref(), &hands, dims);
        self.presentation.present(&CycleUpdate {
            touching: evaluation.touching,
            face,
            face_px: evaluation.face_px,
            hands: &hands,
            dims,
        });

        if self.debouncer.observe(evaluation.touching, Instant::now()) == AlertDecision::Alert {
            let notification = Notification {
                title: self.settings.notification_title.clone(),
                body: self.settings.notification_body.clone(),
                timeout: self.debouncer.cooldown(),
            };
            self.notifier.notify(&notification);
            self.alerts += 1;
            log::info!("alert #{} fired (cycle {})", self.alerts, self.cycles);
        }
    }

    fn record_failure(&mut self) {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        if self.consecutive_failures >= self.settings.degraded_after {
            self.presentation.degraded(self.consecutive_failures);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::NormalizedRect;

    const DIMS: FrameDimensions = FrameDimensions {
        width: 640,
        height: 480,
    };

    fn face(left: f32, top: f32, right: f32, bottom: f32) -> FaceDetection {
        FaceDetection {
            bbox: NormalizedRect::from_edges(left, top, right, bottom),
            confidence: 0.9,
        }
    }

    fn hand(x: f32, y: f32, w: f32, h: f32) -> HandDetection {
        HandDetection {
            bbox: PixelRect::from_xywh(x, y, w, h),
            confidence: 0.8,
        }
    }

    #[test]
    fn no_face_means_not_touching_even_with_hands() {
        let hands = vec![hand(0.0, 0.0, 640.0, 480.0)];
        let eval = evaluate(None, &hands, DIMS);
        assert!(!eval.touching);
        assert!(eval.face_px.is_none());
    }

    #[test]
    fn face_with_no_hands_is_not_touching() {
        let f = face(0.25, 0.25, 0.75, 0.75);
        let eval = evaluate(Some(&f), &[], DIMS);
        assert!(!eval.touching);
        assert_eq!(
            eval.face_px,
            Some(PixelRect::from_edges(160.0, 120.0, 480.0, 360.0))
        );
    }

    #[test]
    fn overlapping_hand_touches() {
        // Face spans 160..480 x 120..360 in pixels.
        let f = face(0.25, 0.25, 0.75, 0.75);
        let hands = vec![hand(400.0, 300.0, 100.0, 100.0)];
        assert!(evaluate(Some(&f), &hands, DIMS).touching);
    }

    #[test]
    fn disjoint_hand_does_not_touch() {
        let f = face(0.25, 0.25, 0.75, 0.75);
        let hands = vec![hand(500.0, 400.0, 50.0, 50.0)];
        assert!(!evaluate(Some(&f), &hands, DIMS).touching);
    }

    #[test]
    fn any_overlapping_hand_suffices() {
        let f = face(0.25, 0.25, 0.75, 0.75);
        let hands = vec![
            hand(500.0, 400.0, 50.0, 50.0),
            hand(100.0, 100.0, 100.0, 100.0),
        ];
        assert!(evaluate(Some(&f), &hands, DIMS).touching);
    }

    #[test]
    fn overlap_uses_pixel_space_not_normalized_values() {
        // Normalized edges are tiny numbers; the hand box at x=300 only
        // overlaps after the face is scaled up by the frame size.
        let f = face(0.4, 0.4, 0.6, 0.6);
        let hands = vec![hand(300.0, 220.0, 20.0, 20.0)];
        assert!(evaluate(Some(&f), &hands, DIMS).touching);
    }
}
