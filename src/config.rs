use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

const DEFAULT_SOURCE: &str = "stub://webcam";
const DEFAULT_WIDTH: u32 = 640;
const DEFAULT_HEIGHT: u32 = 480;
const DEFAULT_INTERVAL_MS: u64 = 100;
const DEFAULT_BACKEND: &str = "synthetic";
const DEFAULT_FACE_SCORE_THRESHOLD: f32 = 0.5;
const DEFAULT_HAND_SCORE_THRESHOLD: f32 = 0.7;
const DEFAULT_IOU_THRESHOLD: f32 = 0.5;
const DEFAULT_MAX_HANDS: usize = 3;
const DEFAULT_DETECTOR_TIMEOUT_MS: u64 = 1000;
const DEFAULT_COOLDOWN_SECS: u64 = 10;
const DEFAULT_TITLE: &str = "Face Touch Alert";
const DEFAULT_BODY: &str = "Don't touch your face!";
const DEFAULT_DEGRADED_AFTER: u32 = 5;

#[derive(Debug, Deserialize, Default)]
struct MonitorConfigFile {
    camera: Option<CameraConfigFile>,
    detector: Option<DetectorConfigFile>,
    alert: Option<AlertConfigFile>,
    health: Option<HealthConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
struct CameraConfigFile {
    source: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    interval_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct DetectorConfigFile {
    backend: Option<String>,
    face_score_threshold: Option<f32>,
    hand_score_threshold: Option<f32>,
    iou_threshold: Option<f32>,
    max_hands: Option<usize>,
    timeout_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct AlertConfigFile {
    cooldown_secs: Option<u64>,
    title: Option<String>,
    body: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct HealthConfigFile {
    degraded_after: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub camera: CameraSettings,
    pub detector: DetectorSettings,
    pub alert: AlertSettings,
    pub health: HealthSettings,
}

#[derive(Debug, Clone)]
pub struct CameraSettings {
    pub source: String,
    pub width: u32,
    pub height: u32,
    pub interval: Duration,
}

#[derive(Debug, Clone)]
pub struct DetectorSettings {
    pub backend: String,
    pub face_score_threshold: f32,
    pub hand_score_threshold: f32,
    pub iou_threshold: f32,
    pub max_hands: usize,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AlertSettings {
    pub cooldown: Duration,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct HealthSettings {
    pub degraded_after: u32,
}

impl MonitorConfig {
    /// Load configuration: file named by `FACETOUCH_CONFIG` (when set), then
    /// environment overrides, then validation. Invalid configuration is fatal
    /// here, before the loop starts; nothing re-reads config mid-loop.
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("FACETOUCH_CONFIG").ok();
        Self::load_from(config_path.as_deref().map(Path::new))
    }

    /// Same as `load`, with an explicit file path winning over the env var.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let file_cfg = match path {
            Some(path) => Some(read_config_file(path)?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default());
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: MonitorConfigFile) -> Self {
        let camera = CameraSettings {
            source: file
                .camera
                .as_ref()
                .and_then(|camera| camera.source.clone())
                .unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            width: file
                .camera
                .as_ref()
                .and_then(|camera| camera.width)
                .unwrap_or(DEFAULT_WIDTH),
            height: file
                .camera
                .as_ref()
                .and_then(|camera| camera.height)
                .unwrap_or(DEFAULT_HEIGHT),
            interval: Duration::from_millis(
                file.camera
                    .and_then(|camera| camera.interval_ms)
                    .unwrap_or(DEFAULT_INTERVAL_MS),
            ),
        };
        let detector = DetectorSettings {
            backend: file
                .detector
                .as_ref()
                .and_then(|detector| detector.backend.clone())
                .unwrap_or_else(|| DEFAULT_BACKEND.to_string()),
            face_score_threshold: file
                .detector
                .as_ref()
                .and_then(|detector| detector.face_score_threshold)
                .unwrap_or(DEFAULT_FACE_SCORE_THRESHOLD),
            hand_score_threshold: file
                .detector
                .as_ref()
                .and_then(|detector| detector.hand_score_threshold)
                .unwrap_or(DEFAULT_HAND_SCORE_THRESHOLD),
            iou_threshold: file
                .detector
                .as_ref()
                .and_then(|detector| detector.iou_threshold)
                .unwrap_or(DEFAULT_IOU_THRESHOLD),
            max_hands: file
                .detector
                .as_ref()
                .and_then(|detector| detector.max_hands)
                .unwrap_or(DEFAULT_MAX_HANDS),
            timeout: Duration::from_millis(
                file.detector
                    .and_then(|detector| detector.timeout_ms)
                    .unwrap_or(DEFAULT_DETECTOR_TIMEOUT_MS),
            ),
        };
        let alert = AlertSettings {
            cooldown: Duration::from_secs(
                file.alert
                    .as_ref()
                    .and_then(|alert| alert.cooldown_secs)
                    .unwrap_or(DEFAULT_COOLDOWN_SECS),
            ),
            title: file
                .alert
                .as_ref()
                .and_then(|alert| alert.title.clone())
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            body: file
                .alert
                .and_then(|alert| alert.body)
                .unwrap_or_else(|| DEFAULT_BODY.to_string()),
        };
        let health = HealthSettings {
            degraded_after: file
                .health
                .and_then(|health| health.degraded_after)
                .unwrap_or(DEFAULT_DEGRADED_AFTER),
        };
        Self {
            camera,
            detector,
            alert,
            health,
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(backend) = std::env::var("FACETOUCH_BACKEND") {
            if !backend.trim().is_empty() {
                self.detector.backend = backend;
            }
        }
        if let Ok(interval) = std::env::var("FACETOUCH_INTERVAL_MS") {
            let ms: u64 = interval
                .parse()
                .map_err(|_| anyhow!("FACETOUCH_INTERVAL_MS must be an integer millisecond count"))?;
            self.camera.interval = Duration::from_millis(ms);
        }
        if let Ok(cooldown) = std::env::var("FACETOUCH_COOLDOWN_SECS") {
            let secs: u64 = cooldown
                .parse()
                .map_err(|_| anyhow!("FACETOUCH_COOLDOWN_SECS must be an integer number of seconds"))?;
            self.alert.cooldown = Duration::from_secs(secs);
        }
        if let Ok(timeout) = std::env::var("FACETOUCH_DETECTOR_TIMEOUT_MS") {
            let ms: u64 = timeout.parse().map_err(|_| {
                anyhow!("FACETOUCH_DETECTOR_TIMEOUT_MS must be an integer millisecond count")
            })?;
            self.detector.timeout = Duration::from_millis(ms);
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.camera.source.trim().is_empty() {
            return Err(anyhow!("camera source must not be empty"));
        }
        if self.camera.width == 0 || self.camera.height == 0 {
            return Err(anyhow!("camera dimensions must be nonzero"));
        }
        if self.camera.interval.is_zero() {
            return Err(anyhow!("cycle interval must be greater than zero"));
        }
        for (name, value) in [
            ("face_score_threshold", self.detector.face_score_threshold),
            ("hand_score_threshold", self.detector.hand_score_threshold),
            ("iou_threshold", self.detector.iou_threshold),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(anyhow!("{} must lie in (0, 1], got {}", name, value));
            }
        }
        if self.detector.max_hands == 0 {
            return Err(anyhow!("max_hands must be at least 1"));
        }
        if self.detector.timeout.is_zero() {
            return Err(anyhow!("detector timeout must be greater than zero"));
        }
        if self.alert.cooldown.is_zero() {
            return Err(anyhow!("alert cooldown must be greater than zero"));
        }
        if self.health.degraded_after == 0 {
            return Err(anyhow!("degraded_after must be at least 1"));
        }
        Ok(())
    }
}

fn read_config_file(path: &Path) -> Result<MonitorConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}
