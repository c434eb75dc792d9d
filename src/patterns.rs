//! Built-in patterns and a plaintext pattern reader

use crate::cell::{Cell, CellKind};
use crate::error::{LifeError, Result};

/// A named set of live-cell offsets, (row, col) from the top-left of its bounding box
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "pulsar",
        cells: &[
            (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
            (2, 0), (2, 5), (2, 7), (2, 12),
            (3, 0), (3, 5), (3, 7), (3, 12),
            (4, 0), (4, 5), (4, 7), (4, 12),
            (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
            (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
            (8, 0), (8, 5), (8, 7), (8, 12),
            (9, 0), (9, 5), (9, 7), (9, 12),
            (10, 0), (10, 5), (10, 7), (10, 12),
            (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
        ],
    },
    Pattern {
        name: "r-pentomino",
        cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
    },
    Pattern {
        name: "gosper-gun",
        cells: &[
            (0, 24),
            (1, 22), (1, 24),
            (2, 12), (2, 13), (2, 20), (2, 21), (2, 34), (2, 35),
            (3, 11), (3, 15), (3, 20), (3, 21), (3, 34), (3, 35),
            (4, 0), (4, 1), (4, 10), (4, 16), (4, 20), (4, 21),
            (5, 0), (5, 1), (5, 10), (5, 14), (5, 16), (5, 17), (5, 22), (5, 24),
            (6, 10), (6, 16), (6, 24),
            (7, 11), (7, 15),
            (8, 12), (8, 13),
        ],
    },
];

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Look up a built-in pattern; case, dashes and underscores are ignored
pub fn find(name: &str) -> Result<&'static Pattern> {
    let wanted = normalize(name);
    PATTERNS
        .iter()
        .find(|p| normalize(p.name) == wanted)
        .ok_or_else(|| LifeError::UnknownPattern(name.to_string()))
}

impl Pattern {
    /// (height, width) of the bounding box
    pub fn bounds(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(h, w), &(r, c)| (h.max(r + 1), w.max(c + 1)))
    }

    /// Centre the pattern in a `rows` x `cols` field, grown to fit if needed
    pub fn to_rows(&self, rows: usize, cols: usize) -> Vec<Vec<bool>> {
        let (h, w) = self.bounds();
        let out_rows = rows.max(h);
        let out_cols = cols.max(w);
        let top = (out_rows - h) / 2;
        let left = (out_cols - w) / 2;

        let mut field = vec![vec![false; out_cols]; out_rows];
        for &(r, c) in self.cells {
            field[top + r][left + c] = true;
        }
        field
    }
}

/// Parse plaintext pattern rows.
///
/// `O * @ #` are live standard cells, `.` and space dead ones; `I`/`R` are
/// live immortal cells and `i`/`r` dead immortal slots. Lines starting with
/// `!` are comments. Short lines are padded with dead cells.
pub fn parse_plaintext(text: &str) -> Result<Vec<Vec<Cell>>> {
    let mut rows = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.starts_with('!') {
            continue;
        }
        let row = line
            .trim_end_matches('\r')
            .chars()
            .map(|ch| match ch {
                'O' | '*' | '@' | '#' => Ok(Cell::standard(true)),
                '.' | ' ' => Ok(Cell::standard(false)),
                'I' | 'R' => Ok(Cell::immortal(true)),
                'i' | 'r' => Ok(Cell::immortal(false)),
                other => Err(LifeError::PatternParse {
                    line: idx + 1,
                    message: format!("unexpected character {:?}", other),
                }),
            })
            .collect::<Result<Vec<Cell>>>()?;
        rows.push(row);
    }

    while rows.last().is_some_and(|r: &Vec<Cell>| r.is_empty()) {
        rows.pop();
    }

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if width == 0 {
        return Err(LifeError::PatternParse {
            line: 0,
            message: "pattern has no cells".to_string(),
        });
    }
    for row in &mut rows {
        row.resize(width, Cell::standard(false));
    }
    Ok(rows)
}

/// Centre pre-built cells in a `rows` x `cols` field of dead standard cells,
/// grown to fit if needed
pub fn center_cells(cells: Vec<Vec<Cell>>, rows: usize, cols: usize) -> Vec<Vec<Cell>> {
    let h = cells.len();
    let w = cells.iter().map(Vec::len).max().unwrap_or(0);
    let out_rows = rows.max(h);
    let out_cols = cols.max(w);
    let top = (out_rows - h) / 2;
    let left = (out_cols - w) / 2;

    let mut field = vec![vec![Cell::new(CellKind::Standard, false); out_cols]; out_rows];
    for (r, row) in cells.into_iter().enumerate() {
        for (c, cell) in row.into_iter().enumerate() {
            field[top + r][left + c] = cell;
        }
    }
    field
}
