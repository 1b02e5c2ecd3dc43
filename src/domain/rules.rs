/// Input commands and movement rules, table driven.
///
/// Pure functions: no world state, no side effects.
/// These encode "what a key means" and "where a step lands".
///
/// ## Key Table
/// ┌──────┬──────────────┬────────────────────────────┐
/// │ Key  │ Command      │ Steps                      │
/// ├──────┼──────────────┼────────────────────────────┤
/// │ h    │ Move West    │ (-1, 0)                    │
/// │ j    │ Move South   │ (0, +1)                    │
/// │ k    │ Move North   │ (0, -1)                    │
/// │ l    │ Move East    │ (+1, 0)                    │
/// │ u    │ Move NW      │ h then k                   │
/// │ i    │ Move NE      │ l then k                   │
/// │ n    │ Move SW      │ h then j                   │
/// │ m    │ Move SE      │ l then j                   │
/// │ ' '  │ Wait         │ none                       │
/// │ t    │ Teleport     │ random free cell           │
/// │ z    │ Zap          │ kill adjacent baddies      │
/// │ r    │ Restart      │ only while dead            │
/// │ q    │ Quit         │                            │
/// └──────┴──────────────┴────────────────────────────┘
///
/// ## Clamping
/// Each orthogonal step is clamped independently. A step into the
/// board edge leaves that axis unchanged; it is not an error.

use super::entity::Position;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveDir {
    West,
    South,
    North,
    East,
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

const STEP_W: (i32, i32) = (-1, 0);
const STEP_S: (i32, i32) = (0, 1);
const STEP_N: (i32, i32) = (0, -1);
const STEP_E: (i32, i32) = (1, 0);

impl MoveDir {
    /// Orthogonal steps applied in order. Diagonals are two steps,
    /// horizontal first.
    pub fn steps(self) -> &'static [(i32, i32)] {
        match self {
            MoveDir::West => &[STEP_W],
            MoveDir::South => &[STEP_S],
            MoveDir::North => &[STEP_N],
            MoveDir::East => &[STEP_E],
            MoveDir::NorthWest => &[STEP_W, STEP_N],
            MoveDir::NorthEast => &[STEP_E, STEP_N],
            MoveDir::SouthWest => &[STEP_W, STEP_S],
            MoveDir::SouthEast => &[STEP_E, STEP_S],
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Move(MoveDir),
    Wait,
    Teleport,
    Zap,
    Restart,
    Quit,
}

impl Command {
    /// Map a raw key to a command. Unknown keys map to `None`.
    pub fn from_key(key: char) -> Option<Command> {
        let cmd = match key {
            'h' => Command::Move(MoveDir::West),
            'j' => Command::Move(MoveDir::South),
            'k' => Command::Move(MoveDir::North),
            'l' => Command::Move(MoveDir::East),
            'u' => Command::Move(MoveDir::NorthWest),
            'i' => Command::Move(MoveDir::NorthEast),
            'n' => Command::Move(MoveDir::SouthWest),
            'm' => Command::Move(MoveDir::SouthEast),
            ' ' => Command::Wait,
            't' => Command::Teleport,
            'z' => Command::Zap,
            'r' => Command::Restart,
            'q' => Command::Quit,
            _ => return None,
        };
        Some(cmd)
    }
}

/// Apply one orthogonal step, clamped to `[0, width) × [0, height)`.
pub fn clamped_step(pos: Position, (dx, dy): (i32, i32), width: usize, height: usize) -> Position {
    Position {
        x: clamp_axis(pos.x, dx, width),
        y: clamp_axis(pos.y, dy, height),
    }
}

fn clamp_axis(v: usize, d: i32, limit: usize) -> usize {
    if d < 0 {
        v.saturating_sub(1)
    } else if d > 0 && v + 1 < limit {
        v + 1
    } else {
        v
    }
}

/// Apply every step of a move in order.
pub fn apply_move(pos: Position, dir: MoveDir, width: usize, height: usize) -> Position {
    dir.steps()
        .iter()
        .fold(pos, |p, &step| clamped_step(p, step, width, height))
}
