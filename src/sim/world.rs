/// GameState: the complete state of a running game.
///
/// Entities are the single source of truth. The board grid shown on
/// screen is derived from them each turn (see `snapshot`).
///
/// ## Storage
///   - `player`: singleton, `alive == false` once killed.
///   - `baddies`: never shrink within a level; dead ones stay in place
///     so iteration order is stable.
///   - `traps`: only grow within a level (baddie pile-ups add more).
///
/// Both vectors are cleared and repopulated wholesale by `level::initialize`.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::GameConfig;
use crate::domain::entity::{Entity, Position};

pub struct GameState {
    pub width: usize,
    pub height: usize,

    // ── Entities ──
    pub player: Entity,
    pub baddies: Vec<Entity>,
    pub traps: Vec<Entity>,

    // ── Counters ──
    pub teleports: u32,
    pub zaps: u32,
    pub level: u32,

    // ── Meta ──
    pub config: GameConfig,
    pub rng: StdRng,
    pub message: String,
}

// ── Construction ──

impl GameState {
    /// Empty board sized from `config`. Call `level::initialize` to populate.
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        GameState {
            width: config.board.width,
            height: config.board.height,
            player: Entity::player(Position::new(config.board.width / 2, config.board.height / 2)),
            baddies: vec![],
            traps: vec![],
            teleports: 0,
            zaps: 0,
            level: 1,
            config,
            rng,
            message: String::new(),
        }
    }

    pub fn set_message(&mut self, msg: &str) {
        self.message = msg.to_string();
    }
}

// ── Queries ──

impl GameState {
    /// Board centre, where the player starts every level.
    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Is any entity at `pos`? Dead baddies still count.
    pub fn occupied(&self, pos: Position) -> bool {
        self.player.is_at(pos)
            || self.baddies.iter().any(|b| b.is_at(pos))
            || self.traps.iter().any(|t| t.is_at(pos))
    }

    /// Every cell for which `occupied` is false, row-major.
    pub fn free_cells(&self) -> Vec<Position> {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| Position::new(x, y)))
            .filter(|&p| !self.occupied(p))
            .collect()
    }

    /// A uniformly random free cell, or `None` when the board is full.
    pub fn random_free_cell(&mut self) -> Option<Position> {
        let free = self.free_cells();
        free.choose(&mut self.rng).copied()
    }

    pub fn live_baddies(&self) -> usize {
        self.baddies.iter().filter(|b| b.alive).count()
    }

    /// Victory holds when no baddie is alive.
    pub fn victory(&self) -> bool {
        self.baddies.iter().all(|b| !b.alive)
    }

    pub fn player_dead(&self) -> bool {
        !self.player.alive
    }
}

// ── Test fixtures ──

#[cfg(test)]
impl GameState {
    /// Build a state from a board diagram.
    /// Legend: '@'=Player  'B'=Baddie  '%'=Trap  '*'=Baddie on a trap
    ///         anything else = empty.
    /// Seeded RNG, zap variant abilities, charges set to 0.
    pub fn from_rows(rows: &[&str]) -> Self {
        use crate::config::Variant;

        let mut config = Variant::Zap.preset();
        config.seed = Some(0x5eed);
        config.board.height = rows.len();
        config.board.width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);

        let mut state = GameState::new(config);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let pos = Position::new(x, y);
                match ch {
                    '@' => state.player.pos = pos,
                    'B' => state.baddies.push(Entity::baddie(pos)),
                    '%' => state.traps.push(Entity::trap(pos)),
                    '*' => {
                        state.baddies.push(Entity::baddie(pos));
                        state.traps.push(Entity::trap(pos));
                    }
                    _ => {}
                }
            }
        }
        state
    }
}
