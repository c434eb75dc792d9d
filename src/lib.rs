//! Toroidal Game of Life with immortal cells, rendered to the terminal.
//!
//! The simulation core is [`cell`], [`grid`] and [`engine`]; everything
//! else drives it from a terminal.

pub mod cell;
pub mod colors;
pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod grid;
pub mod help;
pub mod patterns;
pub mod render;
pub mod settings;
pub mod terminal;

pub use cell::{Cell, CellKind, CellView, ColorContext, ColorTag};
pub use engine::{Engine, Snapshot, VariantPolicy};
pub use error::{LifeError, Result};
pub use grid::{Grid, StepStats};
