//! Headless driver for the page backgrounds.
//!
//! Plays the browser's part: scrolls a synthetic page, presses the reseed and
//! competition buttons on a schedule, and draws every frame to the terminal.

mod driver;
mod render;
mod telemetry;

use anyhow::{Context, Result};
use lifebg_core::RunnerConfig;
use lifebg_world::{Background, BackgroundConfig};
use parking_lot::RwLock;
use std::io::Write;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::watch;
use tokio::time::{interval, Duration};
use tracing::{error, event, info, Level};

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config()?;

    telemetry::init_telemetry(config.log_json)?;

    info!(
        variant = ?config.variant,
        width = config.viewport.width,
        height = config.viewport.height,
        "Starting lifebg runner"
    );

    let bg_config =
        BackgroundConfig::for_variant(config.variant, config.viewport).with_seed(config.seed);
    let background = Arc::new(RwLock::new(Background::new(bg_config, config.viewport)?));

    // report of the latest completed frame
    let (frame_tx, frame_rx) = watch::channel(None);

    let driver_handle = {
        let background = background.clone();
        let config = config.clone();
        tokio::spawn(async move {
            if let Err(e) = run_driver_loop(background, config, frame_tx).await {
                error!("Driver failed: {}", e);
            }
        })
    };

    let render_handle = {
        let background = background.clone();
        let enabled = config.render_terminal;
        tokio::spawn(async move { run_render_loop(background, frame_rx, enabled).await })
    };

    tokio::select! {
        _ = futures::future::join_all([driver_handle, render_handle]) => {
            info!("Run complete");
        }
        _ = shutdown_signal() => {
            info!("Interrupted");
        }
    }

    if let Some(path) = &config.svg_snapshot {
        let svg = render::svg_document(&background.read());
        std::fs::write(path, svg).with_context(|| format!("writing snapshot to {}", path))?;
        info!(path = %path, "SVG snapshot written");
    }

    let census = background.read().simulation().census();
    event!(
        Level::INFO,
        gauge_name = "final_population",
        species_a = census.species_a,
        species_b = census.species_b,
        "Final population"
    );

    Ok(())
}

/// First CLI argument names a JSON config; defaults otherwise
fn load_config() -> Result<RunnerConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {}", path))?;
            RunnerConfig::from_json(&json).with_context(|| format!("parsing config {}", path))
        }
        None => {
            let config = RunnerConfig::default();
            config.validate()?;
            Ok(config)
        }
    }
}

async fn run_driver_loop(
    background: Arc<RwLock<Background>>,
    config: RunnerConfig,
    frames: watch::Sender<Option<driver::FrameReport>>,
) -> Result<()> {
    let mut ticker = interval(Duration::from_millis(config.frame_interval_ms));
    let mut driver = driver::Driver::new(config);

    while !driver.finished() {
        ticker.tick().await;

        let report = {
            let mut bg = background.write();
            driver.tick(&mut bg)?
        };

        if report.stepped {
            event!(
                Level::TRACE,
                gauge_name = "population",
                gauge_value = report.census.alive(),
                generation = report.generation,
                "Population gauge"
            );
        }

        if frames.send(Some(report)).is_err() {
            break;
        }
    }

    info!(steps = driver.total_steps(), "Driver finished");
    Ok(())
}

async fn run_render_loop(
    background: Arc<RwLock<Background>>,
    mut frames: watch::Receiver<Option<driver::FrameReport>>,
    enabled: bool,
) {
    while frames.changed().await.is_ok() {
        let report = *frames.borrow_and_update();
        let Some(report) = report.filter(|_| enabled) else {
            continue;
        };

        let frame = render::board_frame(&background.read(), report.progress_percent);

        let mut stdout = std::io::stdout().lock();
        if stdout.write_all(frame.as_bytes()).and_then(|_| stdout.flush()).is_err() {
            break;
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
