//! Interactive and print-mode drivers around the engine

use crate::colors::ColorState;
use crate::config::LifeConfig;
use crate::engine::Engine;
use crate::error::Result;
use crate::help::{draw_help, HELP_TEXT};
use crate::patterns;
use crate::render::{self, RenderOptions};
use crate::terminal::Terminal;
use crossterm::event::{KeyCode, KeyModifiers};
use log::info;
use rand::prelude::*;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Step delay change per `+`/`-` press, in seconds
pub const DELAY_STEP: f32 = 0.05;
/// Poll interval while paused
const IDLE_SLEEP: f32 = 0.05;

/// What the loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Reseed,
    Handled,
    Ignored,
}

/// Runtime state for interactive controls that is not engine state
pub struct Controls {
    pub colors: ColorState,
    pub show_help: bool,
    /// Last generation the engine may reach; 0 means no limit
    pub generation_limit: u64,
}

impl Controls {
    pub fn new(scheme: u8) -> Self {
        Self {
            colors: ColorState::new(scheme),
            show_help: false,
            generation_limit: 0,
        }
    }

    pub fn with_generation_limit(mut self, limit: u64) -> Self {
        self.generation_limit = limit;
        self
    }

    pub fn at_limit(&self, engine: &Engine) -> bool {
        self.generation_limit > 0 && engine.generation() >= self.generation_limit
    }

    pub fn handle_key(&mut self, engine: &mut Engine, code: KeyCode, modifiers: KeyModifiers) -> KeyAction {
        if self.show_help {
            // any key closes the overlay; q/Esc still quit
            self.show_help = false;
            return match code {
                KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
                _ => KeyAction::Handled,
            };
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return KeyAction::Quit,
            KeyCode::Char(' ') => engine.toggle_pause(),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                engine.set_step_delay(-DELAY_STEP);
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                engine.set_step_delay(DELAY_STEP);
            }
            KeyCode::Char('s') | KeyCode::Char('.') if engine.is_paused() => {
                if !self.at_limit(engine) {
                    engine.step_once();
                }
            }
            KeyCode::Char('r') => return KeyAction::Reseed,
            KeyCode::Char('?') => self.show_help = true,
            other => {
                if !self.colors.handle_key(other) {
                    return KeyAction::Ignored;
                }
            }
        }
        KeyAction::Handled
    }
}

/// Build the engine for `rows` x `cols` and seed it from the pattern or at random
pub fn build_engine(config: &LifeConfig, rows: usize, cols: usize, rng: &mut StdRng) -> Result<Engine> {
    let mut engine = Engine::new(rows, cols, config.policy)?
        .with_step_delay(config.delay)
        .with_paused(config.paused);

    match &config.pattern {
        Some(name) => load_pattern(&mut engine, name, rows, cols)?,
        None => engine.randomize(rng, config.density)?,
    }
    Ok(engine)
}

/// Load a built-in pattern by name, or a plaintext pattern file by path
fn load_pattern(engine: &mut Engine, name: &str, rows: usize, cols: usize) -> Result<()> {
    let path = Path::new(name);
    if path.is_file() {
        let text = fs::read_to_string(path)?;
        let cells = patterns::parse_plaintext(&text)?;
        info!("pattern file {}", path.display());
        return engine.load_cells(patterns::center_cells(cells, rows, cols));
    }
    let pattern = patterns::find(name)?;
    info!("built-in pattern {}", pattern.name);
    engine.load_pattern(&pattern.to_rows(rows, cols))
}

fn render_options(config: &LifeConfig, controls: &Controls, seed: u64) -> RenderOptions {
    RenderOptions {
        glyphs: config.glyphs,
        scheme: controls.colors.scheme,
        colors: config.colors,
        seed,
    }
}

/// Run the interactive display until the user quits
pub fn run(config: LifeConfig) -> Result<()> {
    let mut term = Terminal::new(true)?;
    term.clear_screen()?;

    let (rows, cols) = config.grid_size(Some(term.size()));
    let mut seed = config.seed;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut engine = build_engine(&config, rows, cols, &mut rng)?;
    let mut controls = Controls::new(config.scheme).with_generation_limit(config.generations);

    loop {
        // Resize only affects the frame; the grid keeps its dimensions
        let (w, h) = crossterm::terminal::size().unwrap_or(term.size());
        if (w, h) != term.size() {
            term.resize(w, h);
            term.clear_screen()?;
        }

        if let Some((code, mods)) = term.check_key()? {
            match controls.handle_key(&mut engine, code, mods) {
                KeyAction::Quit => break,
                KeyAction::Reseed => {
                    seed = rand::random();
                    rng = StdRng::seed_from_u64(seed);
                    engine.randomize(&mut rng, config.density)?;
                }
                KeyAction::Handled | KeyAction::Ignored => {}
            }
        }

        if controls.at_limit(&engine) {
            engine.set_paused(true);
        }

        let running = !engine.is_paused();
        engine.step();

        render::draw(&mut term, &engine.snapshot(), &render_options(&config, &controls, seed));
        if controls.show_help {
            draw_help(&mut term, HELP_TEXT);
        }
        term.present()?;

        term.sleep(if running { engine.step_delay() } else { IDLE_SLEEP });
    }

    Ok(())
}

/// Run `generations` steps without a display and write the last frame to `out`
pub fn print<W: Write>(config: &LifeConfig, out: &mut W) -> Result<()> {
    let detected = crossterm::terminal::size().ok();
    let (rows, cols) = config.grid_size(detected);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut engine = build_engine(config, rows, cols, &mut rng)?;

    for _ in 0..config.generations {
        engine.step_once();
    }

    let snapshot = engine.snapshot();
    let (w, h) = render::frame_size(&snapshot);
    let mut frame = Terminal::offscreen(w, h);
    let controls = Controls::new(config.scheme);
    render::draw(&mut frame, &snapshot, &render_options(config, &controls, config.seed));
    frame.write_ansi(out)?;
    Ok(())
}

/// `print` to stdout
pub fn print_to_stdout(config: &LifeConfig) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    print(config, &mut out)
}
