//! Generation driver state: grid, generation counter, pause flag and step delay

use crate::cell::{Cell, CellView};
use crate::error::{LifeError, Result};
use crate::grid::{Grid, StepStats};
use log::{debug, info};
use rand::Rng;

/// Shortest allowed delay between generations, in seconds
pub const MIN_STEP_DELAY: f32 = 0.01;
/// Longest allowed delay between generations, in seconds
pub const MAX_STEP_DELAY: f32 = 3.0;
/// Delay used until the caller picks one
pub const DEFAULT_STEP_DELAY: f32 = 0.2;
/// Probability of a live cell when seeding randomly
pub const DEFAULT_DENSITY: f64 = 0.125;
/// Share of immortal cells in mixed mode
pub const DEFAULT_IMMORTAL_FRACTION: f64 = 0.01;

/// Which cell kinds a randomly seeded grid gets
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VariantPolicy {
    /// Standard cells only
    Classic,
    /// Each cell immortal with the given probability
    Mixed { immortal_fraction: f64 },
}

impl VariantPolicy {
    pub fn immortal_fraction(&self) -> f64 {
        match *self {
            VariantPolicy::Classic => 0.0,
            VariantPolicy::Mixed { immortal_fraction } => immortal_fraction,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            VariantPolicy::Classic => "classic",
            VariantPolicy::Mixed { .. } => "immortal",
        }
    }
}

/// Read-only picture of the engine handed to renderers
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub generation: u64,
    pub rows: usize,
    pub cols: usize,
    pub paused: bool,
    pub step_delay: f32,
    pub population: usize,
    pub last_stats: StepStats,
    pub cells: Vec<Vec<CellView>>,
}

impl Snapshot {
    pub fn alive_mask(&self) -> Vec<Vec<bool>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|c| c.alive).collect())
            .collect()
    }
}

fn clamp_delay(delay: f32) -> f32 {
    if delay.is_nan() {
        return DEFAULT_STEP_DELAY;
    }
    delay.clamp(MIN_STEP_DELAY, MAX_STEP_DELAY)
}

/// Owns one grid and advances it a generation at a time.
///
/// `step` runs to completion before returning, so any snapshot taken
/// between steps shows a fully committed generation.
#[derive(Debug, Clone)]
pub struct Engine {
    grid: Grid,
    policy: VariantPolicy,
    generation: u64,
    paused: bool,
    step_delay: f32,
    last_stats: StepStats,
}

impl Engine {
    pub fn new(rows: usize, cols: usize, policy: VariantPolicy) -> Result<Self> {
        let fraction = policy.immortal_fraction();
        if !(0.0..=1.0).contains(&fraction) {
            return Err(LifeError::InvalidProbability {
                name: "immortal_fraction",
                value: fraction,
            });
        }
        Ok(Self {
            grid: Grid::new(rows, cols)?,
            policy,
            generation: 0,
            paused: false,
            step_delay: DEFAULT_STEP_DELAY,
            last_stats: StepStats::default(),
        })
    }

    /// Set the initial delay, clamped to the allowed range
    pub fn with_step_delay(mut self, delay: f32) -> Self {
        self.step_delay = clamp_delay(delay);
        self
    }

    pub fn with_paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn policy(&self) -> VariantPolicy {
        self.policy
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn step_delay(&self) -> f32 {
        self.step_delay
    }

    pub fn last_stats(&self) -> StepStats {
        self.last_stats
    }

    /// Seed every cell at random using the engine's variant policy
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, p_alive: f64) -> Result<()> {
        self.grid.randomize(rng, p_alive, self.policy.immortal_fraction())?;
        self.reset();
        info!(
            "seeded {}x{} {} grid, density {:.3}, population {}",
            self.grid.rows(),
            self.grid.cols(),
            self.policy.name(),
            p_alive,
            self.grid.population()
        );
        Ok(())
    }

    /// Replace the grid with standard cells from a boolean pattern
    pub fn load_pattern(&mut self, pattern: &[Vec<bool>]) -> Result<()> {
        self.grid.load_pattern(pattern)?;
        self.reset();
        info!("loaded {}x{} pattern", self.grid.rows(), self.grid.cols());
        Ok(())
    }

    /// Replace the grid with pre-built cells
    pub fn load_cells(&mut self, cells: Vec<Vec<Cell>>) -> Result<()> {
        self.grid.load_cells(cells)?;
        self.reset();
        info!("loaded {}x{} cell pattern", self.grid.rows(), self.grid.cols());
        Ok(())
    }

    fn reset(&mut self) {
        self.generation = 0;
        self.last_stats = StepStats::default();
    }

    /// Advance one generation unless paused
    pub fn step(&mut self) {
        if !self.paused {
            self.step_once();
        }
    }

    /// Advance one generation regardless of the pause flag
    pub fn step_once(&mut self) {
        self.last_stats = self.grid.step();
        self.generation += 1;
        debug!(
            "gen {}: +{} -{} healed {}",
            self.generation, self.last_stats.births, self.last_stats.deaths, self.last_stats.healed
        );
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Add `delta` seconds to the step delay, clamped; returns the new delay.
    /// A non-finite `delta` leaves the delay as it is.
    pub fn set_step_delay(&mut self, delta: f32) -> f32 {
        if delta.is_finite() {
            self.step_delay = clamp_delay(self.step_delay + delta);
        }
        self.step_delay
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            generation: self.generation,
            rows: self.grid.rows(),
            cols: self.grid.cols(),
            paused: self.paused,
            step_delay: self.step_delay,
            population: self.grid.population(),
            last_stats: self.last_stats,
            cells: self
                .grid
                .cells()
                .iter()
                .map(|row| row.iter().map(|c| c.view()).collect())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellKind;

    #[test]
    fn new_engine_is_running_at_generation_zero() {
        let engine = Engine::new(10, 20, VariantPolicy::Classic).unwrap();
        assert_eq!(engine.generation(), 0);
        assert!(!engine.is_paused());
        assert_eq!(engine.step_delay(), DEFAULT_STEP_DELAY);
        let snap = engine.snapshot();
        assert_eq!((snap.rows, snap.cols), (10, 20));
        assert_eq!(snap.population, 0);
    }

    #[test]
    fn rejects_bad_dimensions_and_policy() {
        assert!(matches!(
            Engine::new(0, 3, VariantPolicy::Classic),
            Err(LifeError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Engine::new(3, 3, VariantPolicy::Mixed { immortal_fraction: 2.0 }),
            Err(LifeError::InvalidProbability { .. })
        ));
    }

    #[test]
    fn paused_step_is_a_no_op() {
        let mut engine = Engine::new(5, 5, VariantPolicy::Classic).unwrap();
        engine.load_pattern(&[
            vec![false, false, false, false, false],
            vec![false, false, true, false, false],
            vec![false, false, true, false, false],
            vec![false, false, true, false, false],
            vec![false, false, false, false, false],
        ]).unwrap();
        engine.toggle_pause();
        let before = engine.snapshot();
        assert!(before.paused);

        engine.step();
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.snapshot(), before);

        engine.toggle_pause();
        engine.step();
        assert_eq!(engine.generation(), 1);
        assert_ne!(engine.snapshot().alive_mask(), before.alive_mask());
    }

    #[test]
    fn step_once_ignores_pause() {
        let mut engine = Engine::new(3, 3, VariantPolicy::Classic).unwrap().with_paused(true);
        engine.step_once();
        assert_eq!(engine.generation(), 1);
        assert!(engine.is_paused());
    }

    #[test]
    fn step_delay_is_additive_and_clamped() {
        let mut engine = Engine::new(3, 3, VariantPolicy::Classic).unwrap();
        assert!((engine.set_step_delay(0.05) - 0.25).abs() < 1e-6);
        assert_eq!(engine.set_step_delay(-10.0), MIN_STEP_DELAY);
        assert_eq!(engine.set_step_delay(100.0), MAX_STEP_DELAY);

        let engine = Engine::new(3, 3, VariantPolicy::Classic).unwrap().with_step_delay(0.0);
        assert_eq!(engine.step_delay(), MIN_STEP_DELAY);
    }

    #[test]
    fn non_finite_delay_change_is_ignored() {
        let mut engine = Engine::new(3, 3, VariantPolicy::Classic).unwrap().with_step_delay(1.5);
        assert_eq!(engine.set_step_delay(f32::NAN), 1.5);
        assert_eq!(engine.set_step_delay(f32::INFINITY), 1.5);
        assert_eq!(engine.set_step_delay(f32::NEG_INFINITY), 1.5);
        assert_eq!(engine.step_delay(), 1.5);
    }

    #[test]
    fn loading_resets_generation() {
        let mut engine = Engine::new(4, 4, VariantPolicy::Classic).unwrap();
        engine.step();
        engine.step();
        assert_eq!(engine.generation(), 2);
        engine.load_cells(vec![vec![Cell::immortal(true), Cell::standard(false)]]).unwrap();
        assert_eq!(engine.generation(), 0);
        let snap = engine.snapshot();
        assert_eq!((snap.rows, snap.cols), (1, 2));
        assert_eq!(snap.cells[0][0].kind, CellKind::Immortal);
    }

    #[test]
    fn failed_load_keeps_state() {
        let mut engine = Engine::new(4, 4, VariantPolicy::Classic).unwrap();
        engine.step();
        let before = engine.snapshot();
        assert!(engine.load_pattern(&[vec![true], vec![true, false]]).is_err());
        assert_eq!(engine.snapshot(), before);
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn snapshot_reports_last_stats() {
        let mut engine = Engine::new(3, 3, VariantPolicy::Classic).unwrap();
        engine.load_pattern(&[vec![true, false, false], vec![false; 3], vec![false; 3]]).unwrap();
        engine.step();
        let snap = engine.snapshot();
        assert_eq!(snap.last_stats.deaths, 1);
        assert_eq!(snap.population, 0);
        assert!(snap.cells[0][0].died_this_gen);
    }
}
