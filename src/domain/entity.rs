/// Entities: Player, Baddie, Trap.
/// All three share one struct; the kind decides glyph and behaviour.

/// A cell on the board. Always within `[0, width) × [0, height)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }

    /// Chebyshev distance: king moves between two cells.
    pub fn chebyshev(self, other: Position) -> usize {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EntityKind {
    Player,
    Baddie,
    Trap,
}

impl EntityKind {
    pub fn glyph(self) -> char {
        match self {
            EntityKind::Player => '@',
            EntityKind::Baddie => 'B',
            EntityKind::Trap => '%',
        }
    }
}

#[derive(Clone, Debug)]
pub struct Entity {
    pub kind: EntityKind,
    pub pos: Position,
    pub alive: bool,
}

impl Entity {
    pub fn new(kind: EntityKind, pos: Position) -> Self {
        Entity { kind, pos, alive: true }
    }

    pub fn player(pos: Position) -> Self {
        Self::new(EntityKind::Player, pos)
    }

    pub fn baddie(pos: Position) -> Self {
        Self::new(EntityKind::Baddie, pos)
    }

    pub fn trap(pos: Position) -> Self {
        Self::new(EntityKind::Trap, pos)
    }

    pub fn glyph(&self) -> char {
        self.kind.glyph()
    }

    #[inline]
    pub fn is_at(&self, pos: Position) -> bool {
        self.pos == pos
    }
}
