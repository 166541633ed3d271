//! Simulation engine for one background board.

use crate::grid::Grid;
use crate::rules::{CompetitionRules, RuleSet};
use crate::topology::Topology;
use lifebg_core::{
    validate_probability, CellState, Census, Dimensions, Error, Position, Result, DEFAULT_P_GREEN,
};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, event, instrument, trace, Level};

/// Simulation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Single-species rule used outside competition mode
    pub rules: RuleSet,
    /// Board adjacency
    pub topology: Topology,
    /// Thresholds used while competition mode is on
    pub competition: CompetitionRules,
    /// Probability that a cell starts alive (0.0 to 1.0)
    pub p_init: f64,
    /// Probability that a dead cell turns green when competition starts (0.0 to 1.0)
    pub p_green: f64,
    /// Random seed for reproducible boards; entropy when absent
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rules: RuleSet::Conway,
            topology: Topology::Square,
            competition: CompetitionRules::default(),
            p_init: 0.15,
            p_green: DEFAULT_P_GREEN,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.rules == RuleSet::Competition {
            return Err(Error::Validation(
                "competition is a runtime mode, not a base rule set".to_string(),
            ));
        }
        validate_probability("p_init", self.p_init)?;
        validate_probability("p_green", self.p_green)?;
        Ok(())
    }
}

fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// A toroidal automaton that exclusively owns its current generation.
///
/// Each [`step`](Simulation::step) builds the next generation from the current
/// one in full before replacing it, so no cell ever sees a half-updated board.
pub struct Simulation {
    grid: Grid,
    topology: Topology,
    base_rules: RuleSet,
    competition_rules: CompetitionRules,
    competition_mode: bool,
    p_init: f64,
    p_green: f64,
    rng: ChaCha8Rng,
    generation: u64,
}

impl Simulation {
    #[instrument(skip(config, dims), fields(dims = %dims, rules = %config.rules, topology = ?config.topology))]
    pub fn new(config: SimulationConfig, dims: Dimensions) -> Result<Self> {
        config.validate()?;

        let mut rng = seeded_rng(config.seed);
        let grid = Grid::random(dims, config.p_init, &mut rng);

        debug!(
            alive = grid.census().alive(),
            cells = dims.cell_count(),
            "Seeded initial board"
        );

        Ok(Self::from_parts(config, grid, rng))
    }

    /// Start from a hand-built board, competition mode off
    pub fn with_grid(config: SimulationConfig, grid: Grid) -> Result<Self> {
        config.validate()?;
        let rng = seeded_rng(config.seed);
        Ok(Self::from_parts(config, grid, rng))
    }

    fn from_parts(config: SimulationConfig, grid: Grid, rng: ChaCha8Rng) -> Self {
        Self {
            grid,
            topology: config.topology,
            base_rules: config.rules,
            competition_rules: config.competition,
            competition_mode: false,
            p_init: config.p_init,
            p_green: config.p_green,
            rng,
            generation: 0,
        }
    }

    /// Advance one generation
    pub fn step(&mut self) {
        let rules = self.active_rules();
        let dims = self.grid.dimensions();
        let mut next = Grid::new(dims);

        for (pos, state) in self.grid.iter() {
            let census = self.topology.census(&self.grid, pos);
            next.set(pos, rules.next_state(state, census, &self.competition_rules));
        }

        self.grid = next;
        self.generation += 1;

        let census = self.grid.census();
        trace!(
            generation = self.generation,
            species_a = census.species_a,
            species_b = census.species_b,
            "Generation computed"
        );
    }

    /// Redraw every cell from fresh random rolls, discarding the current board.
    ///
    /// `p_secondary` is the species B density and only applies in competition mode.
    pub fn reseed(&mut self, p_init: f64, p_secondary: Option<f64>) -> Result<()> {
        validate_probability("p_init", p_init)?;
        let p_b = match p_secondary {
            Some(p) if self.competition_mode => {
                validate_probability("p_secondary", p)?;
                if p_init + p > 1.0 {
                    return Err(Error::Validation(format!(
                        "species densities sum above 1: {} + {}",
                        p_init, p
                    )));
                }
                p
            }
            _ => 0.0,
        };

        self.grid.fill_random(p_init, p_b, &mut self.rng);
        self.generation = 0;

        let census = self.grid.census();
        debug!(
            p_init,
            p_secondary = p_b,
            species_a = census.species_a,
            species_b = census.species_b,
            "Board reseeded"
        );
        Ok(())
    }

    /// Reseed with the configured densities; species B gets whatever share
    /// of `p_green` is left after `p_init`
    pub fn reseed_default(&mut self) -> Result<()> {
        let p_secondary = self.p_green.min(1.0 - self.p_init);
        self.reseed(self.p_init, Some(p_secondary))
    }

    /// Enter or leave competition mode; setting the current value does nothing.
    ///
    /// Entering sprinkles species B over dead cells only. Leaving kills every
    /// species B cell and leaves species A alone.
    pub fn set_competition_mode(&mut self, enabled: bool) {
        if enabled == self.competition_mode {
            return;
        }
        self.competition_mode = enabled;

        if enabled {
            let p_green = self.p_green;
            let rng = &mut self.rng;
            self.grid.map_cells(|state| {
                if state == CellState::Dead && rng.gen::<f64>() < p_green {
                    CellState::SpeciesB
                } else {
                    state
                }
            });
        } else {
            self.grid.map_cells(|state| match state {
                CellState::SpeciesB => CellState::Dead,
                other => other,
            });
        }

        let census = self.grid.census();
        event!(
            Level::DEBUG,
            competition = enabled,
            species_a = census.species_a,
            species_b = census.species_b,
            generation = self.generation,
            "Competition mode changed"
        );
    }

    /// Hand every cell to `draw`, row-major
    pub fn for_each_cell(&self, draw: impl FnMut(Position, CellState)) {
        self.grid.for_each(draw);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn dimensions(&self) -> Dimensions {
        self.grid.dimensions()
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn base_rules(&self) -> RuleSet {
        self.base_rules
    }

    /// Rule set the next step will apply
    pub fn active_rules(&self) -> RuleSet {
        if self.competition_mode {
            RuleSet::Competition
        } else {
            self.base_rules
        }
    }

    pub fn competition_mode(&self) -> bool {
        self.competition_mode
    }

    /// Generations since construction or the last reseed
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn census(&self) -> Census {
        self.grid.census()
    }
}
