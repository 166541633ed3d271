//! Configuration types shared by the engine and the runner.

use crate::error::{Error, Result};
use crate::layout::Viewport;
use serde::{Deserialize, Serialize};

/// Cumulative absolute scroll movement (px) that triggers one generation
pub const DEFAULT_SCROLL_THRESHOLD_PX: f64 = 50.0;

/// Probability that a dead cell receives species B when competition starts
pub const DEFAULT_P_GREEN: f64 = 0.10;

/// Which page background to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageVariant {
    /// Square grid, classic B3/S23
    #[default]
    Conway,
    /// Square grid, B36/S23
    HighLife,
    /// Flat-top hex grid on the CV page, B2/S34
    HexCv,
}

/// Headless driver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Background variant to run
    pub variant: PageVariant,
    /// Simulated browser viewport
    pub viewport: Viewport,
    /// Fixed RNG seed; random when absent
    pub seed: Option<u64>,
    /// Delay between frames (milliseconds)
    pub frame_interval_ms: u64,
    /// Synthetic scroll movement per frame (px)
    pub scroll_px_per_frame: f64,
    /// Stop after this many frames; run until Ctrl+C when absent
    pub max_frames: Option<u64>,
    /// Flip competition mode every N generations
    pub toggle_competition_every: Option<u64>,
    /// Reseed every N generations
    pub reseed_every_generations: Option<u64>,
    /// Log a population summary every N generations
    pub progress_every: u64,
    /// Draw frames to the terminal
    pub render_terminal: bool,
    /// Write an SVG of the final frame to this path
    pub svg_snapshot: Option<String>,
    /// Emit JSON log lines instead of human-readable ones
    pub log_json: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            variant: PageVariant::Conway,
            viewport: Viewport::new(1280.0, 720.0),
            seed: None,
            frame_interval_ms: 80,
            scroll_px_per_frame: 12.0,
            max_frames: Some(600),
            toggle_competition_every: Some(150),
            reseed_every_generations: None,
            progress_every: 50,
            render_terminal: true,
            svg_snapshot: None,
            log_json: false,
        }
    }
}

impl RunnerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RunnerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.viewport.validate()?;

        if self.frame_interval_ms == 0 {
            return Err(Error::Validation(
                "frame_interval_ms must be positive".to_string(),
            ));
        }
        if !self.scroll_px_per_frame.is_finite() || self.scroll_px_per_frame < 0.0 {
            return Err(Error::Validation(format!(
                "scroll_px_per_frame must be a non-negative number, got {}",
                self.scroll_px_per_frame
            )));
        }
        if self.progress_every == 0 {
            return Err(Error::Validation("progress_every must be positive".to_string()));
        }
        if self.toggle_competition_every == Some(0) || self.reseed_every_generations == Some(0) {
            return Err(Error::Validation(
                "generation intervals must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Check that a probability lies in `[0, 1]`
pub fn validate_probability(name: &str, p: f64) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "{} must be within [0, 1], got {}",
            name, p
        )))
    }
}
