//! facetouchd - face-touch monitoring daemon.
//!
//! Wires the built-in pieces together and runs the fusion loop until
//! interrupted:
//! 1. Loads configuration (file via --config / FACETOUCH_CONFIG, then env)
//! 2. Builds the frame source and the configured detector backends
//! 3. Runs the monitor; alerts land in the log, status on the terminal

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use facetouch::config::MonitorConfig;
use facetouch::detect::{create_face_detector, create_hand_detector};
use facetouch::fusion::{Monitor, MonitorSettings};
use facetouch::ingest::create_source;
use facetouch::sink::{TerminalSink, UiMode};
use facetouch::LogNotifier;

#[derive(Debug, Parser)]
#[command(name = "facetouchd", about = "Webcam face-touch monitor")]
struct Args {
    /// Configuration file (JSON).
    #[arg(long, env = "FACETOUCH_CONFIG")]
    config: Option<PathBuf>,

    /// Detector backend, overriding the configured one.
    #[arg(long)]
    backend: Option<String>,

    /// Force plain log-line status output (no spinner).
    #[arg(long)]
    plain: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut cfg = MonitorConfig::load_from(args.config.as_deref()).context("loading config")?;
    if let Some(backend) = args.backend {
        cfg.detector.backend = backend;
    }

    log::info!(
        "facetouchd {}: source={} backend={} {}x{} @ {:?}",
        env!("CARGO_PKG_VERSION"),
        cfg.camera.source,
        cfg.detector.backend,
        cfg.camera.width,
        cfg.camera.height,
        cfg.camera.interval,
    );

    let mut source = create_source(&cfg.camera).context("building frame source")?;
    let face = create_face_detector(&cfg.detector).context("building face backend")?;
    let hand = create_hand_detector(&cfg.detector).context("building hand backend")?;

    let ui_mode = if args.plain { UiMode::Plain } else { UiMode::Auto };
    let presentation = Box::new(TerminalSink::new(ui_mode));
    let notifier = Box::new(LogNotifier);

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_handler = shutdown.clone();
    ctrlc::set_handler(move || {
        shutdown_handler.store(true, Ordering::Relaxed);
    })
    .context("installing shutdown handler")?;

    let mut monitor = Monitor::new(
        MonitorSettings::from_config(&cfg),
        face,
        hand,
        presentation,
        notifier,
    )?;
    monitor.run(source.as_mut(), &shutdown)
}
