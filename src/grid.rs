//! Toroidal, double-buffered cell grid

use crate::cell::{Cell, CellKind, NEIGHBORHOOD};
use crate::error::{LifeError, Result};
use log::warn;
use rand::Rng;

/// (row, col) offsets of the neighbourhood, row-major from the top-left
pub const NEIGHBOR_OFFSETS: [(isize, isize); NEIGHBORHOOD] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// What happened during one generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    pub births: usize,
    pub deaths: usize,
    /// Buffer slots recreated because their kind disagreed with the grid
    pub healed: usize,
}

/// Rectangular grid whose edges wrap.
///
/// `current` holds the committed generation. `next` is a second buffer of
/// the same shape whose slot kinds mirror `current`; each step writes the
/// new generation into `next` while reading only `current`, then swaps.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    current: Vec<Vec<Cell>>,
    next: Vec<Vec<Cell>>,
}

fn check_dimensions(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || cols == 0 {
        return Err(LifeError::InvalidDimensions { rows, cols });
    }
    Ok(())
}

/// Validate that `pattern` is non-empty and rectangular, returning its shape.
fn check_shape<T>(pattern: &[Vec<T>]) -> Result<(usize, usize)> {
    let rows = pattern.len();
    let cols = pattern.first().map_or(0, Vec::len);
    check_dimensions(rows, cols)?;
    for (row, line) in pattern.iter().enumerate() {
        if line.len() != cols {
            return Err(LifeError::PatternShapeMismatch {
                row,
                expected: cols,
                found: line.len(),
            });
        }
    }
    Ok((rows, cols))
}

/// Dead cells with the same kinds as `cells`
fn shadow_of(cells: &[Vec<Cell>]) -> Vec<Vec<Cell>> {
    cells
        .iter()
        .map(|row| row.iter().map(|c| Cell::new(c.kind(), false)).collect())
        .collect()
}

#[inline]
fn wrap(index: isize, len: usize) -> usize {
    index.rem_euclid(len as isize) as usize
}

fn neighbors_in(buf: &[Vec<Cell>], rows: usize, cols: usize, row: usize, col: usize) -> [&Cell; NEIGHBORHOOD] {
    std::array::from_fn(|i| {
        let (dr, dc) = NEIGHBOR_OFFSETS[i];
        let r = wrap(row as isize + dr, rows);
        let c = wrap(col as isize + dc, cols);
        &buf[r][c]
    })
}

impl Grid {
    /// All-dead grid of standard cells
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        check_dimensions(rows, cols)?;
        let current = vec![vec![Cell::standard(false); cols]; rows];
        let next = shadow_of(&current);
        Ok(Self { rows, cols, current, next })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Committed cells, row by row
    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.current
    }

    /// Cell at a position; indices wrap
    pub fn get(&self, row: usize, col: usize) -> &Cell {
        &self.current[row % self.rows][col % self.cols]
    }

    /// The 8 wrapped neighbours of a cell, in `NEIGHBOR_OFFSETS` order
    pub fn neighbors_of(&self, row: usize, col: usize) -> [&Cell; NEIGHBORHOOD] {
        neighbors_in(&self.current, self.rows, self.cols, row % self.rows, col % self.cols)
    }

    pub fn population(&self) -> usize {
        self.current.iter().flatten().filter(|c| c.is_alive()).count()
    }

    pub fn alive_mask(&self) -> Vec<Vec<bool>> {
        self.current
            .iter()
            .map(|row| row.iter().map(Cell::is_alive).collect())
            .collect()
    }

    /// Replace one cell between generations. Indices wrap.
    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) {
        let (r, c) = (row % self.rows, col % self.cols);
        self.next[r][c] = Cell::new(cell.kind(), false);
        self.current[r][c] = cell;
    }

    /// Refill every cell. Each is immortal with probability
    /// `immortal_fraction` and independently alive with probability `p_alive`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, p_alive: f64, immortal_fraction: f64) -> Result<()> {
        for (name, value) in [("p_alive", p_alive), ("immortal_fraction", immortal_fraction)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(LifeError::InvalidProbability { name, value });
            }
        }

        for cell in self.current.iter_mut().flatten() {
            let kind = if rng.gen_bool(immortal_fraction) {
                CellKind::Immortal
            } else {
                CellKind::Standard
            };
            *cell = Cell::new(kind, rng.gen_bool(p_alive));
        }
        self.next = shadow_of(&self.current);
        Ok(())
    }

    /// Resize to the pattern and replace every cell with a standard cell.
    /// A ragged or empty pattern is rejected and the grid left as it was.
    pub fn load_pattern(&mut self, pattern: &[Vec<bool>]) -> Result<()> {
        check_shape(pattern)?;
        let cells = pattern
            .iter()
            .map(|row| row.iter().map(|&alive| Cell::standard(alive)).collect())
            .collect();
        self.load_cells(cells)
    }

    /// Resize to the given pre-built cells and adopt them as the current generation.
    pub fn load_cells(&mut self, cells: Vec<Vec<Cell>>) -> Result<()> {
        let (rows, cols) = check_shape(&cells)?;
        self.next = shadow_of(&cells);
        self.current = cells;
        self.rows = rows;
        self.cols = cols;
        Ok(())
    }

    /// Advance one generation.
    pub fn step(&mut self) -> StepStats {
        let mut stats = StepStats {
            healed: self.reconcile_kinds(),
            ..StepStats::default()
        };

        let (rows, cols) = (self.rows, self.cols);
        let current = &self.current;
        for (r, next_row) in self.next.iter_mut().enumerate() {
            for (c, slot) in next_row.iter_mut().enumerate() {
                let neighbors = neighbors_in(current, rows, cols, r, c);
                slot.carry_from(&current[r][c]);
                slot.update(&neighbors);
                slot.commit();

                if slot.was_born_this_gen() {
                    stats.births += 1;
                }
                if slot.died_this_gen() {
                    stats.deaths += 1;
                }
            }
        }

        std::mem::swap(&mut self.current, &mut self.next);
        stats
    }

    /// Recreate any `next` slot whose kind differs from its `current` cell.
    fn reconcile_kinds(&mut self) -> usize {
        let mut healed = 0;
        for (r, (cur_row, next_row)) in self.current.iter().zip(self.next.iter_mut()).enumerate() {
            for (c, (cur, slot)) in cur_row.iter().zip(next_row.iter_mut()).enumerate() {
                if slot.kind() != cur.kind() {
                    warn!(
                        "cell kind mismatch at ({}, {}): buffer holds {}, expected {}; recreating dead",
                        r,
                        c,
                        slot.kind().name(),
                        cur.kind().name()
                    );
                    *slot = Cell::new(cur.kind(), false);
                    healed += 1;
                }
            }
        }
        healed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid_from(rows: &[&str]) -> Grid {
        let pattern: Vec<Vec<bool>> = rows
            .iter()
            .map(|line| line.chars().map(|ch| ch == 'O').collect())
            .collect();
        let mut grid = Grid::new(1, 1).unwrap();
        grid.load_pattern(&pattern).unwrap();
        grid
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(matches!(Grid::new(0, 5), Err(LifeError::InvalidDimensions { rows: 0, cols: 5 })));
        assert!(matches!(Grid::new(5, 0), Err(LifeError::InvalidDimensions { .. })));
    }

    #[test]
    fn ragged_pattern_leaves_grid_unchanged() {
        let mut grid = grid_from(&["O..", "...", "..O"]);
        let before = grid.alive_mask();
        let err = grid.load_pattern(&[vec![true, false], vec![true]]).unwrap_err();
        assert!(matches!(err, LifeError::PatternShapeMismatch { row: 1, expected: 2, found: 1 }));
        assert_eq!(grid.alive_mask(), before);
        assert_eq!((grid.rows(), grid.cols()), (3, 3));
    }

    #[test]
    fn empty_pattern_is_invalid() {
        let mut grid = Grid::new(2, 2).unwrap();
        assert!(matches!(grid.load_pattern(&[]), Err(LifeError::InvalidDimensions { .. })));
        assert!(matches!(grid.load_pattern(&[vec![]]), Err(LifeError::InvalidDimensions { .. })));
    }

    #[test]
    fn corner_sees_opposite_corner() {
        let mut grid = Grid::new(4, 5).unwrap();
        grid.set_cell(3, 4, Cell::standard(true));
        let neighbors = grid.neighbors_of(0, 0);
        // top-left neighbour of (0,0) wraps to (rows-1, cols-1)
        assert!(neighbors[0].is_alive());
        assert_eq!(neighbors.iter().filter(|n| n.is_alive()).count(), 1);
    }

    #[test]
    fn neighbor_order_is_row_major() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set_cell(0, 1, Cell::immortal(false));
        grid.set_cell(2, 2, Cell::immortal(false));
        let kinds: Vec<CellKind> = grid.neighbors_of(1, 1).iter().map(|c| c.kind()).collect();
        assert_eq!(kinds[1], CellKind::Immortal);
        assert_eq!(kinds[7], CellKind::Immortal);
        assert_eq!(kinds.iter().filter(|k| **k == CellKind::Immortal).count(), 2);
    }

    #[test]
    fn empty_grid_stays_empty() {
        let mut grid = Grid::new(6, 7).unwrap();
        for _ in 0..5 {
            let stats = grid.step();
            assert_eq!(stats, StepStats::default());
        }
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn blinker_oscillates() {
        let mut grid = grid_from(&[".....", "..O..", "..O..", "..O..", "....."]);
        let vertical = grid.alive_mask();
        let stats = grid.step();
        assert_eq!(stats.births, 2);
        assert_eq!(stats.deaths, 2);
        assert_eq!(
            grid.alive_mask(),
            grid_from(&[".....", ".....", ".OOO.", ".....", "....."]).alive_mask()
        );
        grid.step();
        assert_eq!(grid.alive_mask(), vertical);
    }

    #[test]
    fn triomino_settles_into_block() {
        let mut grid = grid_from(&["....", ".OO.", ".O..", "...."]);
        grid.step();
        assert_eq!(grid.alive_mask(), grid_from(&["....", ".OO.", ".OO.", "...."]).alive_mask());
    }

    #[test]
    fn randomize_is_deterministic_per_seed() {
        let mut a = Grid::new(12, 20).unwrap();
        let mut b = Grid::new(12, 20).unwrap();
        a.randomize(&mut StdRng::seed_from_u64(7), 0.3, 0.1).unwrap();
        b.randomize(&mut StdRng::seed_from_u64(7), 0.3, 0.1).unwrap();
        assert_eq!(a.cells(), b.cells());
    }

    #[test]
    fn randomize_extremes() {
        let mut grid = Grid::new(5, 5).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        grid.randomize(&mut rng, 1.0, 1.0).unwrap();
        assert_eq!(grid.population(), 25);
        assert!(grid.cells().iter().flatten().all(|c| c.kind() == CellKind::Immortal));

        grid.randomize(&mut rng, 0.0, 0.0).unwrap();
        assert_eq!(grid.population(), 0);
        assert!(grid.cells().iter().flatten().all(|c| c.kind() == CellKind::Standard));
    }

    #[test]
    fn randomize_rejects_bad_probability() {
        let mut grid = Grid::new(3, 3).unwrap();
        let before = grid.cells().to_vec();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            grid.randomize(&mut rng, 1.5, 0.0),
            Err(LifeError::InvalidProbability { name: "p_alive", .. })
        ));
        assert!(grid.randomize(&mut rng, 0.5, f64::NAN).is_err());
        assert_eq!(grid.cells(), &before[..]);
    }

    #[test]
    fn kinds_are_stable_across_generations() {
        let mut grid = Grid::new(10, 10).unwrap();
        grid.randomize(&mut StdRng::seed_from_u64(99), 0.4, 0.3).unwrap();
        let kinds: Vec<CellKind> = grid.cells().iter().flatten().map(Cell::kind).collect();
        for _ in 0..8 {
            assert_eq!(grid.step().healed, 0);
            let now: Vec<CellKind> = grid.cells().iter().flatten().map(Cell::kind).collect();
            assert_eq!(now, kinds);
        }
    }

    #[test]
    fn mismatched_buffer_slot_is_healed() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.next[1][1] = Cell::immortal(true);
        let stats = grid.step();
        assert_eq!(stats.healed, 1);
        assert_eq!(grid.get(1, 1).kind(), CellKind::Standard);
        assert!(!grid.get(1, 1).is_alive());
    }

    #[test]
    fn set_cell_keeps_buffers_aligned() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set_cell(5, 6, Cell::immortal(true));
        assert_eq!(grid.get(1, 2).kind(), CellKind::Immortal);
        assert_eq!(grid.step().healed, 0);
        assert!(grid.get(1, 2).is_alive());
        assert_eq!(grid.get(1, 2).age(), 1);
    }
}
