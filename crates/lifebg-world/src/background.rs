//! One page's animated background: a simulation, its scroll pacing and its
//! canvas layout.

use crate::pacer::ScrollPacer;
use crate::rules::RuleSet;
use crate::simulation::{Simulation, SimulationConfig};
use crate::topology::Topology;
use lifebg_core::{
    Error, GridLayout, PageVariant, Result, Shape, Viewport, DEFAULT_CELL_SIZE,
    DEFAULT_SCROLL_THRESHOLD_PX,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Background parameters for one page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundConfig {
    pub simulation: SimulationConfig,
    pub layout: GridLayout,
    /// Extra cells per axis beyond what covers the viewport
    pub overscan: u32,
    /// Scroll movement (px) per generation
    pub scroll_threshold: f64,
}

impl BackgroundConfig {
    /// Square Conway board behind the landing page
    pub fn conway_page() -> Self {
        Self {
            simulation: SimulationConfig {
                rules: RuleSet::Conway,
                topology: Topology::Square,
                p_init: 0.15,
                ..Default::default()
            },
            layout: GridLayout::Square {
                cell_size: DEFAULT_CELL_SIZE,
            },
            overscan: 0,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD_PX,
        }
    }

    /// Square HighLife board, sparser start
    pub fn highlife_page() -> Self {
        Self {
            simulation: SimulationConfig {
                rules: RuleSet::HighLife,
                topology: Topology::Square,
                p_init: 0.10,
                ..Default::default()
            },
            ..Self::conway_page()
        }
    }

    /// Hex board behind the CV page, sized for the viewport
    pub fn hex_cv_page(viewport: Viewport) -> Self {
        Self {
            simulation: SimulationConfig {
                rules: RuleSet::HexLife,
                topology: Topology::Hex,
                p_init: 0.20,
                ..Default::default()
            },
            layout: GridLayout::responsive_hex(viewport),
            overscan: 1,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD_PX,
        }
    }

    pub fn for_variant(variant: PageVariant, viewport: Viewport) -> Self {
        match variant {
            PageVariant::Conway => Self::conway_page(),
            PageVariant::HighLife => Self::highlife_page(),
            PageVariant::HexCv => Self::hex_cv_page(viewport),
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.simulation.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()?;
        self.layout.validate()?;

        let hex_layout = matches!(self.layout, GridLayout::Hex { .. });
        if hex_layout != (self.simulation.topology == Topology::Hex) {
            return Err(Error::Validation(format!(
                "layout {:?} does not match topology {:?}",
                self.layout, self.simulation.topology
            )));
        }
        if !self.scroll_threshold.is_finite() || self.scroll_threshold <= 0.0 {
            return Err(Error::Validation(format!(
                "scroll_threshold must be positive, got {}",
                self.scroll_threshold
            )));
        }
        Ok(())
    }
}

/// A running page background
pub struct Background {
    simulation: Simulation,
    pacer: ScrollPacer,
    layout: GridLayout,
    viewport: Viewport,
}

impl Background {
    pub fn new(config: BackgroundConfig, viewport: Viewport) -> Result<Self> {
        config.validate()?;
        viewport.validate()?;

        let dims = config.layout.dimensions(viewport, config.overscan)?;
        let simulation = Simulation::new(config.simulation, dims)?;

        info!(
            dims = %dims,
            rules = %simulation.base_rules(),
            viewport_width = viewport.width,
            viewport_height = viewport.height,
            "Background created"
        );

        Ok(Self {
            simulation,
            pacer: ScrollPacer::new(config.scroll_threshold),
            layout: config.layout,
            viewport,
        })
    }

    /// Scroll event; steps the board when enough movement has built up
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        let due = self.pacer.observe_position(scroll_y);
        if due {
            self.simulation.step();
        }
        due
    }

    /// Reseed button
    pub fn on_reseed(&mut self) -> Result<()> {
        self.simulation.reseed_default()?;
        debug!(generation = self.simulation.generation(), "Reseed requested");
        Ok(())
    }

    /// Competition toggle button; returns the new mode
    pub fn on_toggle_competition(&mut self) -> bool {
        let enabled = !self.simulation.competition_mode();
        self.simulation.set_competition_mode(enabled);
        enabled
    }

    /// Hand one canvas shape per cell to `sink`
    pub fn render(&self, mut sink: impl FnMut(Shape)) {
        let layout = self.layout;
        self.simulation
            .for_each_cell(|pos, state| sink(layout.cell_shape(pos, state)));
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.simulation
    }

    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifebg_core::Dimensions;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn test_presets_are_valid() {
        for variant in [PageVariant::Conway, PageVariant::HighLife, PageVariant::HexCv] {
            let config = BackgroundConfig::for_variant(variant, viewport());
            assert!(config.validate().is_ok(), "{:?}", variant);
        }
    }

    #[test]
    fn test_board_covers_viewport() {
        let bg = Background::new(BackgroundConfig::conway_page().with_seed(Some(1)), viewport()).unwrap();
        assert_eq!(bg.simulation().dimensions(), Dimensions::new(40, 30));
    }

    #[test]
    fn test_mismatched_layout_rejected() {
        let mut config = BackgroundConfig::conway_page();
        config.layout = GridLayout::Hex { hex_size: 8.0 };
        assert!(matches!(
            Background::new(config, viewport()),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_oversized_viewport_rejected() {
        let huge = Viewport::new(1e12, 600.0);
        let result = Background::new(BackgroundConfig::hex_cv_page(huge).with_seed(Some(1)), huge);
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_scroll_paces_generations() {
        let mut bg = Background::new(BackgroundConfig::highlife_page().with_seed(Some(3)), viewport()).unwrap();

        assert!(!bg.on_scroll(0.0));
        assert!(!bg.on_scroll(30.0));
        assert!(bg.on_scroll(60.0));
        assert_eq!(bg.simulation().generation(), 1);

        assert!(!bg.on_scroll(20.0));
        assert!(bg.on_scroll(0.0));
        assert_eq!(bg.simulation().generation(), 2);
    }

    #[test]
    fn test_toggle_and_reseed() {
        let mut bg = Background::new(BackgroundConfig::conway_page().with_seed(Some(5)), viewport()).unwrap();

        assert!(bg.on_toggle_competition());
        assert!(bg.simulation().competition_mode());
        assert!(bg.on_reseed().is_ok());
        assert!(bg.simulation().census().species_b > 0);

        assert!(!bg.on_toggle_competition());
        assert_eq!(bg.simulation().census().species_b, 0);
    }

    #[test]
    fn test_render_emits_one_shape_per_cell() {
        let bg = Background::new(BackgroundConfig::hex_cv_page(viewport()).with_seed(Some(9)), viewport()).unwrap();
        let census = bg.simulation().census();

        let mut shapes = 0;
        let mut filled = 0;
        bg.render(|shape| {
            shapes += 1;
            if shape.fill().is_some() {
                filled += 1;
            }
            assert!(matches!(shape, Shape::Hexagon { .. }));
        });

        assert_eq!(shapes, bg.simulation().dimensions().cell_count());
        assert_eq!(filled, census.alive() as usize);
    }
}
