//! facetouch - webcam face-touch monitoring loop.
//!
//! The crate fuses two independent, differently-shaped detector outputs into
//! a single per-cycle "touching" signal and turns that signal into debounced
//! alerts:
//!
//! 1. A `FrameSource` supplies one frame per cycle at a fixed cadence.
//! 2. A face backend yields at most one box in normalized (0..1) coordinates;
//!    a hand backend yields zero or more boxes in pixel coordinates. Both run
//!    concurrently on worker threads and are joined with a bounded wait.
//! 3. The fusion step converts the face box to pixel space (the only place
//!    the two coordinate systems meet) and tests overlap against every hand.
//! 4. An `AlertDebouncer` rate-limits notifications: a sustained touch fires
//!    once per cooldown window, not once per cycle.
//!
//! Detector failures and timeouts are per-cycle events; the loop logs them,
//! reports a degraded status after enough consecutive failures, and keeps
//! running. Real face/hand models, camera capture, and OS notification
//! delivery plug in behind the `FaceDetector`, `HandDetector`, `FrameSource`,
//! and `NotificationSink` traits.

pub mod alert;
pub mod config;
pub mod detect;
pub mod frame;
pub mod fusion;
pub mod geometry;
pub mod ingest;
pub mod sink;

pub use alert::{AlertDebouncer, AlertDecision, LogNotifier, Notification, NotificationSink};
pub use config::MonitorConfig;
pub use detect::{
    create_face_detector, create_hand_detector, FaceDetection, FaceDetector, HandDetection,
    HandDetector,
};
pub use frame::Frame;
pub use fusion::{evaluate, CycleUpdate, Monitor, MonitorSettings};
pub use geometry::{FrameDimensions, NormalizedRect, PixelRect};
pub use ingest::{create_source, FrameSource, SourceStats, StubSource};
pub use sink::{PresentationSink, TerminalSink, UiMode};
