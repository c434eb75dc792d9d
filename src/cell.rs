//! Cells and their per-variant transition rules

/// Number of neighbours in the 8-connected neighbourhood
pub const NEIGHBORHOOD: usize = 8;

/// Glyph for a live standard cell
pub const STANDARD_GLYPH: char = '@';
/// Glyph for a live immortal cell
pub const IMMORTAL_GLYPH: char = 'R';
/// Glyph for any dead cell
pub const DEAD_GLYPH: char = '.';
/// Cells older than this are drawn as elders
pub const DEFAULT_ELDER_AGE: u32 = 10;

/// Rule set a cell follows. Fixed for the lifetime of the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Conway's B3/S23
    Standard,
    /// Born like a standard cell, never dies once alive
    Immortal,
}

impl CellKind {
    /// Next `(alive, age)` for a cell of this kind given its committed state
    pub fn transition(self, alive: bool, age: u32, live_neighbors: u8) -> (bool, u32) {
        match (self, alive, live_neighbors) {
            (CellKind::Standard, true, 2 | 3) => (true, age.saturating_add(1)),
            (CellKind::Standard, true, _) => (false, 0),
            (CellKind::Immortal, true, _) => (true, age.saturating_add(1)),
            (_, false, 3) => (true, 0),
            (_, false, _) => (false, 0),
        }
    }

    /// Default glyph for a live cell of this kind
    pub fn alive_glyph(self) -> char {
        match self {
            CellKind::Standard => STANDARD_GLYPH,
            CellKind::Immortal => IMMORTAL_GLYPH,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CellKind::Standard => "standard",
            CellKind::Immortal => "immortal",
        }
    }
}

/// Colour class of a cell, chosen from its committed state.
///
/// The renderer maps each class onto a concrete terminal colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorTag {
    Dead,
    JustDied,
    Newborn,
    Alive,
    Elder,
    Immortal,
    ImmortalNewborn,
}

/// Parameters the colour classification depends on
#[derive(Debug, Clone, Copy)]
pub struct ColorContext {
    pub elder_age: u32,
}

impl Default for ColorContext {
    fn default() -> Self {
        Self { elder_age: DEFAULT_ELDER_AGE }
    }
}

/// Read-only copy of a cell's committed state, as handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    pub kind: CellKind,
    pub alive: bool,
    pub age: u32,
    pub was_born_this_gen: bool,
    pub was_alive_last_gen: bool,
    pub died_this_gen: bool,
}

impl CellView {
    pub fn glyph(&self) -> char {
        if self.alive {
            self.kind.alive_glyph()
        } else {
            DEAD_GLYPH
        }
    }

    pub fn color_class(&self, ctx: &ColorContext) -> ColorTag {
        match (self.kind, self.alive) {
            (CellKind::Standard, false) if self.was_alive_last_gen => ColorTag::JustDied,
            (_, false) => ColorTag::Dead,
            (CellKind::Standard, true) if self.was_born_this_gen => ColorTag::Newborn,
            (CellKind::Standard, true) if self.age > ctx.elder_age => ColorTag::Elder,
            (CellKind::Standard, true) => ColorTag::Alive,
            (CellKind::Immortal, true) if self.was_born_this_gen => ColorTag::ImmortalNewborn,
            (CellKind::Immortal, true) => ColorTag::Immortal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    alive: bool,
    age: u32,
}

/// One simulation cell.
///
/// A generation is two phases: `update` stages the next state from the
/// neighbours' committed state, `commit` makes it visible. Neighbours are
/// only ever read, so staging never leaks into the current generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    kind: CellKind,
    alive: bool,
    age: u32,
    was_born_this_gen: bool,
    was_alive_last_gen: bool,
    died_this_gen: bool,
    pending: Option<Pending>,
}

impl Cell {
    pub fn new(kind: CellKind, alive: bool) -> Self {
        Self {
            kind,
            alive,
            age: 0,
            was_born_this_gen: alive,
            was_alive_last_gen: false,
            died_this_gen: false,
            pending: None,
        }
    }

    pub fn standard(alive: bool) -> Self {
        Self::new(CellKind::Standard, alive)
    }

    pub fn immortal(alive: bool) -> Self {
        Self::new(CellKind::Immortal, alive)
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn was_born_this_gen(&self) -> bool {
        self.was_born_this_gen
    }

    pub fn was_alive_last_gen(&self) -> bool {
        self.was_alive_last_gen
    }

    pub fn died_this_gen(&self) -> bool {
        self.died_this_gen
    }

    /// True between `update` and `commit`
    pub fn is_staged(&self) -> bool {
        self.pending.is_some()
    }

    /// Stage the next state from the committed state of the 8 neighbours.
    pub fn update(&mut self, neighbors: &[&Cell; NEIGHBORHOOD]) {
        self.was_alive_last_gen = self.alive;
        let live = neighbors.iter().filter(|n| n.alive).count() as u8;
        let (alive, age) = self.kind.transition(self.alive, self.age, live);
        self.pending = Some(Pending { alive, age });
    }

    /// Apply the staged state and recompute the transition flags.
    pub fn commit(&mut self) {
        if let Some(Pending { alive, age }) = self.pending.take() {
            self.alive = alive;
            self.age = age;
        }
        self.was_born_this_gen = self.alive && !self.was_alive_last_gen;
        self.died_this_gen = !self.alive && self.was_alive_last_gen;
    }

    /// Take over the committed state of `prev`, keeping this slot's kind.
    pub(crate) fn carry_from(&mut self, prev: &Cell) {
        debug_assert_eq!(self.kind, prev.kind);
        self.alive = prev.alive;
        self.age = prev.age;
        self.was_born_this_gen = prev.was_born_this_gen;
        self.was_alive_last_gen = prev.was_alive_last_gen;
        self.died_this_gen = prev.died_this_gen;
        self.pending = None;
    }

    pub fn view(&self) -> CellView {
        CellView {
            kind: self.kind,
            alive: self.alive,
            age: self.age,
            was_born_this_gen: self.was_born_this_gen,
            was_alive_last_gen: self.was_alive_last_gen,
            died_this_gen: self.died_this_gen,
        }
    }

    pub fn display_glyph(&self) -> char {
        self.view().glyph()
    }

    pub fn display_color_class(&self, ctx: &ColorContext) -> ColorTag {
        self.view().color_class(ctx)
    }
}
