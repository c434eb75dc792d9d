use crate::cell::ColorContext;
use crate::engine::{VariantPolicy, DEFAULT_DENSITY, DEFAULT_IMMORTAL_FRACTION, DEFAULT_STEP_DELAY};
use crate::render::{Glyphs, CELL_WIDTH};
use crate::settings::Settings;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// Smallest grid the driver will run
pub const MIN_ROWS: usize = 10;
pub const MIN_COLS: usize = 20;

/// Which cell kinds a random grid is seeded with
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Standard Conway cells only
    #[default]
    Classic,
    /// Mix in cells that never die once alive
    Immortal,
}

/// Options for `lifeterm run`
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Grid rows (fits the terminal when omitted, minimum 10)
    #[arg(short, long)]
    pub rows: Option<usize>,

    /// Grid columns (fits the terminal when omitted, minimum 20)
    #[arg(short, long)]
    pub cols: Option<usize>,

    /// Random seed for reproducibility
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Stop after this many generations (0 = run until quit)
    #[arg(short, long, default_value = "0")]
    pub generations: u64,

    /// Seconds between generations (0.01-3.0)
    #[arg(short = 't', long)]
    pub delay: Option<f32>,

    /// Probability of a cell starting alive (0-1)
    #[arg(short, long)]
    pub density: Option<f64>,

    /// Probability of a cell being immortal (0-1), implies --mode immortal
    #[arg(short, long)]
    pub immortal: Option<f64>,

    /// Cell mix for random grids
    #[arg(short, long, value_enum, default_value = "classic")]
    pub mode: Mode,

    /// Built-in pattern name or path to a plaintext pattern file
    #[arg(short = 'P', long)]
    pub pattern: Option<String>,

    /// Start paused
    #[arg(long)]
    pub paused: bool,

    /// Print the final generation to stdout (no interactive display)
    #[arg(short, long)]
    pub print: bool,

    /// Character for live standard cells
    #[arg(long)]
    pub char: Option<char>,

    /// Color scheme (0-9, 7 = mono)
    #[arg(long)]
    pub scheme: Option<u8>,

    /// Settings file (default: <config dir>/lifeterm/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write log output to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Fully resolved run configuration
#[derive(Clone, Debug)]
pub struct LifeConfig {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub seed: u64,
    pub generations: u64,
    pub delay: f32,
    pub density: f64,
    pub policy: VariantPolicy,
    pub pattern: Option<String>,
    pub paused: bool,
    pub print: bool,
    pub glyphs: Glyphs,
    pub scheme: u8,
    pub colors: ColorContext,
}

impl LifeConfig {
    /// Merge command line over settings over defaults
    pub fn resolve(args: &RunArgs, settings: &Settings) -> Self {
        let sim = &settings.simulation;
        let display = &settings.display;
        let defaults = Glyphs::default();

        let mode = if args.immortal.is_some() { Mode::Immortal } else { args.mode };
        let policy = match mode {
            Mode::Classic => VariantPolicy::Classic,
            Mode::Immortal => VariantPolicy::Mixed {
                immortal_fraction: args
                    .immortal
                    .or(sim.immortal_fraction)
                    .unwrap_or(DEFAULT_IMMORTAL_FRACTION),
            },
        };

        Self {
            rows: args.rows.or(sim.rows),
            cols: args.cols.or(sim.cols),
            seed: args.seed.unwrap_or_else(rand::random),
            generations: args.generations,
            delay: args.delay.or(sim.delay).unwrap_or(DEFAULT_STEP_DELAY),
            density: args.density.or(sim.density).unwrap_or(DEFAULT_DENSITY),
            policy,
            pattern: args.pattern.clone(),
            paused: args.paused,
            print: args.print,
            glyphs: Glyphs {
                standard: args.char.or(display.standard_char).unwrap_or(defaults.standard),
                immortal: display.immortal_char.unwrap_or(defaults.immortal),
                dead: display.dead_char.unwrap_or(defaults.dead),
            },
            scheme: args.scheme.or(display.scheme).unwrap_or(0).min(9),
            colors: ColorContext {
                elder_age: sim.elder_age.unwrap_or(ColorContext::default().elder_age),
            },
        }
    }

    /// Grid size for a terminal of `term` (width, height): one row is kept
    /// for the status line and each cell is two columns wide. Explicit sizes
    /// win; everything is floored at the minimums.
    pub fn grid_size(&self, term: Option<(u16, u16)>) -> (usize, usize) {
        let rows = self
            .rows
            .or_else(|| term.map(|(_, h)| (h as usize).saturating_sub(1)))
            .unwrap_or(MIN_ROWS);
        let cols = self
            .cols
            .or_else(|| term.map(|(w, _)| w as usize / CELL_WIDTH))
            .unwrap_or(MIN_COLS);
        (rows.max(MIN_ROWS), cols.max(MIN_COLS))
    }
}
