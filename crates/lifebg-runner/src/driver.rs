//! Stand-in for the browser: synthetic scrolling and button presses.

use anyhow::Result;
use lifebg_core::chrome::{infinite_scroll_min_height, page_progress_percent};
use lifebg_core::{Census, RunnerConfig};
use lifebg_world::Background;
use tracing::{debug, info};

/// Initial document height of the simulated page (px)
const INITIAL_DOCUMENT_HEIGHT: f64 = 6000.0;

/// A page that keeps growing as the reader scrolls down it
#[derive(Debug, Clone)]
pub struct SyntheticPage {
    scroll_y: f64,
    document_height: f64,
    viewport_height: f64,
}

impl SyntheticPage {
    pub fn new(viewport_height: f64) -> Self {
        Self {
            scroll_y: 0.0,
            document_height: INITIAL_DOCUMENT_HEIGHT.max(viewport_height),
            viewport_height,
        }
    }

    /// Scroll down by `px`, extending the page near the bottom
    pub fn advance(&mut self, px: f64) -> f64 {
        let max_scroll = self.document_height - self.viewport_height;
        self.scroll_y = (self.scroll_y + px).min(max_scroll);
        if let Some(height) =
            infinite_scroll_min_height(self.scroll_y, self.viewport_height, self.document_height)
        {
            self.document_height = height;
        }
        self.scroll_y
    }

    pub fn document_height(&self) -> f64 {
        self.document_height
    }

    /// Width of the page progress bar
    pub fn progress_percent(&self) -> f64 {
        page_progress_percent(self.scroll_y, self.document_height - self.viewport_height)
    }
}

/// What happened during one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub stepped: bool,
    pub generation: u64,
    pub competition: bool,
    pub census: Census,
    pub progress_percent: f64,
}

/// Drives a background the way scroll and button events would
pub struct Driver {
    config: RunnerConfig,
    page: SyntheticPage,
    frame: u64,
    total_steps: u64,
}

impl Driver {
    pub fn new(config: RunnerConfig) -> Self {
        let page = SyntheticPage::new(config.viewport.height);
        Self {
            config,
            page,
            frame: 0,
            total_steps: 0,
        }
    }

    pub fn finished(&self) -> bool {
        self.config.max_frames.is_some_and(|max| self.frame >= max)
    }

    /// Scroll one frame's worth and fire any scheduled button presses
    pub fn tick(&mut self, background: &mut Background) -> Result<FrameReport> {
        self.frame += 1;
        let scroll_y = self.page.advance(self.config.scroll_px_per_frame);
        let stepped = background.on_scroll(scroll_y);

        if stepped {
            self.total_steps += 1;

            if let Some(every) = self.config.toggle_competition_every {
                if self.total_steps % every == 0 {
                    let enabled = background.on_toggle_competition();
                    info!(step = self.total_steps, competition = enabled, "Competition toggled");
                }
            }

            if let Some(every) = self.config.reseed_every_generations {
                if self.total_steps % every == 0 {
                    background.on_reseed()?;
                    info!(step = self.total_steps, "Board reseeded");
                }
            }

            if self.total_steps % self.config.progress_every == 0 {
                let census = background.simulation().census();
                info!(
                    step = self.total_steps,
                    generation = background.simulation().generation(),
                    species_a = census.species_a,
                    species_b = census.species_b,
                    scroll_y = scroll_y,
                    document_height = self.page.document_height(),
                    "Progress"
                );
            }
        }

        let simulation = background.simulation();
        let report = FrameReport {
            frame: self.frame,
            stepped,
            generation: simulation.generation(),
            competition: simulation.competition_mode(),
            census: simulation.census(),
            progress_percent: self.page.progress_percent(),
        };
        debug!(frame = report.frame, stepped, "Frame driven");
        Ok(report)
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }
}
