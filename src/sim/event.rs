/// Events emitted during a turn.
/// The loop logs these and turns some into on-screen messages.

use std::fmt;

use crate::domain::entity::Position;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Teleported { to: Position },
    Zapped { killed: usize },
    /// Two baddies met; both died and a trap took their place.
    BaddiesCollided { at: Position },
    BaddieTrapped { at: Position },
    PlayerCaught { at: Position },
    PlayerTrapped { at: Position },
    LevelCleared { level: u32 },
}

impl GameEvent {
    /// Short status-line text, for events worth telling the player about.
    pub fn message(&self) -> Option<String> {
        match self {
            GameEvent::Zapped { killed } => Some(format!("Zap! {killed} down")),
            GameEvent::PlayerCaught { .. } => Some("Caught by a baddie".to_string()),
            GameEvent::PlayerTrapped { .. } => Some("You stepped on a trap".to_string()),
            GameEvent::LevelCleared { level } => Some(format!("Level {level} cleared!")),
            _ => None,
        }
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Teleported { to } => write!(f, "teleported to ({}, {})", to.x, to.y),
            GameEvent::Zapped { killed } => write!(f, "zap killed {killed}"),
            GameEvent::BaddiesCollided { at } => write!(f, "baddies collided at ({}, {})", at.x, at.y),
            GameEvent::BaddieTrapped { at } => write!(f, "baddie trapped at ({}, {})", at.x, at.y),
            GameEvent::PlayerCaught { at } => write!(f, "player caught at ({}, {})", at.x, at.y),
            GameEvent::PlayerTrapped { at } => write!(f, "player trapped at ({}, {})", at.x, at.y),
            GameEvent::LevelCleared { level } => write!(f, "level {level} cleared"),
        }
    }
}
