use std::sync::Mutex;
use std::time::Duration;

use tempfile::NamedTempFile;

use facetouch::config::MonitorConfig;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    for key in [
        "FACETOUCH_CONFIG",
        "FACETOUCH_BACKEND",
        "FACETOUCH_INTERVAL_MS",
        "FACETOUCH_COOLDOWN_SECS",
        "FACETOUCH_DETECTOR_TIMEOUT_MS",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn loads_defaults_without_a_file() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let cfg = MonitorConfig::load().expect("load config");

    assert_eq!(cfg.camera.source, "stub://webcam");
    assert_eq!(cfg.camera.width, 640);
    assert_eq!(cfg.camera.height, 480);
    assert_eq!(cfg.camera.interval, Duration::from_millis(100));
    assert_eq!(cfg.detector.backend, "synthetic");
    assert_eq!(cfg.detector.face_score_threshold, 0.5);
    assert_eq!(cfg.detector.hand_score_threshold, 0.7);
    assert_eq!(cfg.detector.iou_threshold, 0.5);
    assert_eq!(cfg.detector.max_hands, 3);
    assert_eq!(cfg.detector.timeout, Duration::from_millis(1000));
    assert_eq!(cfg.alert.cooldown, Duration::from_secs(10));
    assert_eq!(cfg.alert.title, "Face Touch Alert");
    assert_eq!(cfg.alert.body, "Don't touch your face!");
    assert_eq!(cfg.health.degraded_after, 5);

    clear_env();
}

#[test]
fn loads_config_from_file_and_env_overrides() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = NamedTempFile::new().expect("temp config");
    let json = r#"{
        "camera": {
            "source": "stub://desk",
            "width": 800,
            "height": 600,
            "interval_ms": 50
        },
        "detector": {
            "backend": "null",
            "hand_score_threshold": 0.6,
            "max_hands": 2,
            "timeout_ms": 250
        },
        "alert": {
            "cooldown_secs": 30,
            "title": "Hands!",
            "body": "Away from the face."
        },
        "health": {
            "degraded_after": 3
        }
    }"#;
    std::io::Write::write_all(&mut file, json.as_bytes()).expect("write config");

    std::env::set_var("FACETOUCH_CONFIG", file.path());
    std::env::set_var("FACETOUCH_BACKEND", "synthetic");
    std::env::set_var("FACETOUCH_COOLDOWN_SECS", "15");

    let cfg = MonitorConfig::load().expect("load config");

    assert_eq!(cfg.camera.source, "stub://desk");
    assert_eq!(cfg.camera.width, 800);
    assert_eq!(cfg.camera.height, 600);
    assert_eq!(cfg.camera.interval, Duration::from_millis(50));
    // Env wins over the file.
    assert_eq!(cfg.detector.backend, "synthetic");
    assert_eq!(cfg.detector.hand_score_threshold, 0.6);
    // Unset fields fall back to defaults.
    assert_eq!(cfg.detector.face_score_threshold, 0.5);
    assert_eq!(cfg.detector.max_hands, 2);
    assert_eq!(cfg.detector.timeout, Duration::from_millis(250));
    assert_eq!(cfg.alert.cooldown, Duration::from_secs(15));
    assert_eq!(cfg.alert.title, "Hands!");
    assert_eq!(cfg.health.degraded_after, 3);

    clear_env();
}

#[test]
fn rejects_out_of_range_threshold() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = NamedTempFile::new().expect("temp config");
    let json = r#"{ "detector": { "iou_threshold": 1.5 } }"#;
    std::io::Write::write_all(&mut file, json.as_bytes()).expect("write config");
    std::env::set_var("FACETOUCH_CONFIG", file.path());

    let err = MonitorConfig::load().unwrap_err();
    assert!(err.to_string().contains("iou_threshold"));

    clear_env();
}

#[test]
fn rejects_zero_cooldown_from_env() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("FACETOUCH_COOLDOWN_SECS", "0");
    assert!(MonitorConfig::load().is_err());

    clear_env();
}

#[test]
fn rejects_non_numeric_env_override() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("FACETOUCH_INTERVAL_MS", "fast");
    assert!(MonitorConfig::load().is_err());

    clear_env();
}

#[test]
fn rejects_malformed_config_file() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = NamedTempFile::new().expect("temp config");
    std::io::Write::write_all(&mut file, b"not json").expect("write config");
    std::env::set_var("FACETOUCH_CONFIG", file.path());

    assert!(MonitorConfig::load().is_err());

    clear_env();
}
