//! Draws engine snapshots into a terminal back buffer

use crate::cell::{CellKind, CellView, ColorContext, DEAD_GLYPH, IMMORTAL_GLYPH, STANDARD_GLYPH};
use crate::colors::{status_color, tag_color};
use crate::engine::Snapshot;
use crate::terminal::Terminal;

/// Characters used per cell state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub standard: char,
    pub immortal: char,
    pub dead: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            standard: STANDARD_GLYPH,
            immortal: IMMORTAL_GLYPH,
            dead: DEAD_GLYPH,
        }
    }
}

impl Glyphs {
    pub fn for_cell(&self, cell: &CellView) -> char {
        match (cell.alive, cell.kind) {
            (false, _) => self.dead,
            (true, CellKind::Standard) => self.standard,
            (true, CellKind::Immortal) => self.immortal,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub glyphs: Glyphs,
    pub scheme: u8,
    pub colors: ColorContext,
    pub seed: u64,
}

/// Each cell takes its glyph plus a spacer column
pub const CELL_WIDTH: usize = 2;

/// `Seed S | Gen G | [PAUSE] | Speed D.DDs | Pop P`, cut or padded to `width`
pub fn status_line(snapshot: &Snapshot, seed: u64, width: usize) -> String {
    let mut status = format!("Seed {} | Gen {} | ", seed, snapshot.generation);
    if snapshot.paused {
        status.push_str("[PAUSE] | ");
    }
    status.push_str(&format!(
        "Speed {:.2}s | Pop {}",
        snapshot.step_delay, snapshot.population
    ));

    let len = status.chars().count();
    if len > width {
        let keep = width.saturating_sub(3);
        let mut cut: String = status.chars().take(keep).collect();
        cut.push_str(&"..."[..width.min(3)]);
        cut
    } else {
        format!("{:<width$}", status, width = width)
    }
}

/// Status line on row 0, then one terminal row per grid row
pub fn draw(term: &mut Terminal, snapshot: &Snapshot, opts: &RenderOptions) {
    term.clear();

    let width = snapshot.cols * CELL_WIDTH;
    let status = status_line(snapshot, opts.seed, width);
    term.set_str(0, 0, &status, Some(status_color(opts.scheme)), false);

    for (r, row) in snapshot.cells.iter().enumerate() {
        let y = r as i32 + 1;
        for (c, cell) in row.iter().enumerate() {
            let (color, bold) = tag_color(opts.scheme, cell.color_class(&opts.colors));
            term.set((c * CELL_WIDTH) as i32, y, opts.glyphs.for_cell(cell), Some(color), bold);
        }
    }
}

/// Terminal size needed to show a whole snapshot
pub fn frame_size(snapshot: &Snapshot) -> (u16, u16) {
    let w = (snapshot.cols * CELL_WIDTH).min(u16::MAX as usize) as u16;
    let h = (snapshot.rows + 1).min(u16::MAX as usize) as u16;
    (w, h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::engine::{Engine, VariantPolicy};
    use crossterm::style::Color;

    fn engine() -> Engine {
        let mut engine = Engine::new(2, 3, VariantPolicy::Classic).unwrap();
        engine
            .load_cells(vec![
                vec![Cell::standard(true), Cell::immortal(true), Cell::standard(false)],
                vec![Cell::standard(false); 3],
            ])
            .unwrap();
        engine
    }

    fn opts() -> RenderOptions {
        RenderOptions {
            glyphs: Glyphs::default(),
            scheme: crate::colors::MONO_SCHEME,
            colors: ColorContext::default(),
            seed: 42,
        }
    }

    #[test]
    fn status_line_pads_and_truncates() {
        let mut engine = engine();
        engine.toggle_pause();
        let snap = engine.snapshot();

        let line = status_line(&snap, 42, 60);
        assert_eq!(line.chars().count(), 60);
        assert!(line.starts_with("Seed 42 | Gen 0 | [PAUSE] | Speed 0.20s | Pop 2"));

        let short = status_line(&snap, 42, 12);
        assert_eq!(short, "Seed 42 |...");
        assert_eq!(status_line(&snap, 42, 2), "..");
    }

    #[test]
    fn draw_places_cells_two_columns_apart() {
        let snap = engine().snapshot();
        let (w, h) = frame_size(&snap);
        assert_eq!((w, h), (6, 3));

        let mut term = Terminal::offscreen(w, h);
        draw(&mut term, &snap, &opts());
        let at = |x, y| term.get(x, y).cloned().unwrap();

        assert_eq!(at(0, 1).ch, STANDARD_GLYPH);
        assert_eq!(at(0, 1).fg, Some(Color::Green));
        assert_eq!(at(1, 1).ch, ' ');
        assert_eq!(at(2, 1).ch, IMMORTAL_GLYPH);
        assert_eq!(at(4, 1).ch, DEAD_GLYPH);
        assert_eq!(at(4, 1).fg, Some(Color::Grey));
    }

    #[test]
    fn custom_glyphs() {
        let glyphs = Glyphs { standard: '#', ..Glyphs::default() };
        let live = Cell::standard(true).view();
        assert_eq!(glyphs.for_cell(&live), '#');
        assert_eq!(glyphs.for_cell(&Cell::immortal(false).view()), DEAD_GLYPH);
    }
}
