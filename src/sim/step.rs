/// The turn function: advances the game by one keypress.
///
/// Processing order:
///   1. Player action (move / wait / teleport / zap)
///   2. Baddie movement (greedy chase)
///   3. Collision resolution
///   4. Victory check → level up
///
/// Steps 2–4 only run when step 1 consumed a turn. Unknown keys, empty
/// charges and actions while dead cost nothing.
///
/// A cleared level is replaced by the next one within the same turn, so the
/// player sees the "Level N cleared!" message on the new board rather than
/// the victory banner.

use log::debug;

use crate::domain::ai;
use crate::domain::entity::Entity;
use crate::domain::rules::{self, Command};
use super::event::GameEvent;
use super::level::{self, PlacementError};
use super::world::GameState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Quit,
    /// Key had no effect; nothing moved.
    Ignored,
    Played(Vec<GameEvent>),
}

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn turn(world: &mut GameState, key: char) -> Result<TurnOutcome, PlacementError> {
    let cmd = match Command::from_key(key) {
        Some(Command::Quit) => return Ok(TurnOutcome::Quit),
        Some(Command::Restart) if world.player_dead() => {
            level::new_game(world)?;
            return Ok(TurnOutcome::Played(vec![]));
        }
        Some(cmd) => cmd,
        None => return Ok(TurnOutcome::Ignored),
    };

    let mut events = Vec::new();
    if !apply_input(world, cmd, &mut events) {
        return Ok(TurnOutcome::Ignored);
    }
    world.message.clear();

    advance_enemies(world);
    resolve_collisions(world, &mut events);
    check_victory(world, &mut events)?;

    for e in &events {
        debug!("{e}");
        if let Some(msg) = e.message() {
            world.set_message(&msg);
        }
    }
    Ok(TurnOutcome::Played(events))
}

// ══════════════════════════════════════════════════════════════
// Player action
// ══════════════════════════════════════════════════════════════

/// Perform the player's command. Returns true if it consumed a turn.
pub fn apply_input(world: &mut GameState, cmd: Command, events: &mut Vec<GameEvent>) -> bool {
    if world.player_dead() {
        return false;
    }
    match cmd {
        Command::Move(dir) => {
            world.player.pos = rules::apply_move(world.player.pos, dir, world.width, world.height);
            debug_assert!(world.in_bounds(world.player.pos));
            true
        }
        Command::Wait => true,
        Command::Teleport => teleport(world, events),
        Command::Zap => zap(world, events),
        Command::Restart | Command::Quit => false,
    }
}

fn teleport(world: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    if !world.config.abilities.teleport || world.teleports == 0 {
        return false;
    }
    // Board full: keep the charge.
    let Some(to) = world.random_free_cell() else { return false };
    world.player.pos = to;
    world.teleports -= 1;
    events.push(GameEvent::Teleported { to });
    true
}

fn zap(world: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    if !world.config.abilities.zap || world.zaps == 0 {
        return false;
    }
    world.zaps -= 1;
    let center = world.player.pos;
    let mut killed = 0;
    for b in world.baddies.iter_mut().filter(|b| b.alive) {
        if b.pos.chebyshev(center) <= 1 {
            b.alive = false;
            killed += 1;
        }
    }
    events.push(GameEvent::Zapped { killed });
    true
}

// ══════════════════════════════════════════════════════════════
// Baddie movement
// ══════════════════════════════════════════════════════════════

pub fn advance_enemies(world: &mut GameState) {
    let target = world.player.pos;
    for b in world.baddies.iter_mut().filter(|b| b.alive) {
        b.pos = ai::chase_step(b.pos, target);
    }
}

// ══════════════════════════════════════════════════════════════
// Collisions
//
// Priority: player-vs-baddie, player-vs-trap, then per baddie
// baddie-vs-baddie followed by baddie-vs-trap. A dead player ends
// resolution immediately.
// ══════════════════════════════════════════════════════════════

pub fn resolve_collisions(world: &mut GameState, events: &mut Vec<GameEvent>) {
    let at = world.player.pos;

    if world.baddies.iter().any(|b| b.alive && b.is_at(at)) {
        world.player.alive = false;
        events.push(GameEvent::PlayerCaught { at });
        return;
    }
    if world.traps.iter().any(|t| t.is_at(at)) {
        world.player.alive = false;
        events.push(GameEvent::PlayerTrapped { at });
        return;
    }

    for i in 0..world.baddies.len() {
        if !world.baddies[i].alive {
            continue;
        }
        let pos = world.baddies[i].pos;

        // First live partner on the same cell.
        let partner = (i + 1..world.baddies.len())
            .find(|&j| world.baddies[j].alive && world.baddies[j].is_at(pos));
        if let Some(j) = partner {
            world.baddies[i].alive = false;
            world.baddies[j].alive = false;
            // May stack on an existing trap.
            world.traps.push(Entity::trap(pos));
            events.push(GameEvent::BaddiesCollided { at: pos });
            continue;
        }

        if world.traps.iter().any(|t| t.is_at(pos)) {
            world.baddies[i].alive = false;
            events.push(GameEvent::BaddieTrapped { at: pos });
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Victory
// ══════════════════════════════════════════════════════════════

/// Level up if every baddie is dead. Returns whether it did.
pub fn check_victory(world: &mut GameState, events: &mut Vec<GameEvent>) -> Result<bool, PlacementError> {
    if world.player_dead() || !world.victory() {
        return Ok(false);
    }
    events.push(GameEvent::LevelCleared { level: world.level });
    level::level_up(world)?;
    Ok(true)
}
