/// Board snapshot: a glyph grid derived from entity positions.
///
/// Rebuilt from scratch every render; never patched. Layer order:
/// empty → player → traps → live baddies, later layers win.

use super::world::GameState;

pub const EMPTY: char = '.';

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub width: usize,
    pub height: usize,
    cells: Vec<char>,
}

impl BoardSnapshot {
    fn blank(width: usize, height: usize) -> Self {
        BoardSnapshot { width, height, cells: vec![EMPTY; width * height] }
    }

    fn set(&mut self, x: usize, y: usize, glyph: char) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = glyph;
        }
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks(self.width.max(1))
    }
}

/// Status panel fields shown under the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub level: u32,
    pub baddies_left: usize,
    pub teleports: Option<u32>,
    pub zaps: Option<u32>,
    pub dead: bool,
    pub won: bool,
    pub message: String,
}

pub fn render_snapshot(world: &GameState) -> BoardSnapshot {
    let mut snap = BoardSnapshot::blank(world.width, world.height);
    let p = &world.player;
    snap.set(p.pos.x, p.pos.y, p.glyph());
    for t in &world.traps {
        snap.set(t.pos.x, t.pos.y, t.glyph());
    }
    for b in world.baddies.iter().filter(|b| b.alive) {
        snap.set(b.pos.x, b.pos.y, b.glyph());
    }
    snap
}

pub fn status(world: &GameState) -> Status {
    let abilities = &world.config.abilities;
    Status {
        level: world.level,
        baddies_left: world.live_baddies(),
        teleports: abilities.teleport.then_some(world.teleports),
        zaps: abilities.zap.then_some(world.zaps),
        dead: world.player_dead(),
        won: world.victory(),
        message: world.message.clone(),
    }
}
