/// Level setup: placement, new game, level progression.
///
/// Placement draws each entity from the list of free cells, so it always
/// terminates. When the list runs dry the level cannot be built and
/// `PlacementError::NoFreeCell` is returned instead.

use log::info;
use thiserror::Error;

use crate::domain::entity::{Entity, EntityKind, Position};
use super::world::GameState;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("no free cell left for {kind:?} #{index} ({requested} requested on a {width}x{height} board)")]
    NoFreeCell {
        kind: EntityKind,
        index: usize,
        requested: usize,
        width: usize,
        height: usize,
    },
}

/// Entity and charge counts for one level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelPlan {
    pub baddies: usize,
    pub traps: usize,
    pub teleports: u32,
    pub zaps: u32,
}

/// Reset the player to the centre and repopulate baddies and traps.
/// Prior baddie/trap state is discarded wholesale.
pub fn initialize(world: &mut GameState, plan: LevelPlan) -> Result<(), PlacementError> {
    world.player = Entity::player(world.center());
    world.baddies.clear();
    world.traps.clear();

    for index in 0..plan.baddies {
        let pos = place(world, EntityKind::Baddie, index, plan.baddies)?;
        world.baddies.push(Entity::baddie(pos));
    }
    for index in 0..plan.traps {
        let pos = place(world, EntityKind::Trap, index, plan.traps)?;
        world.traps.push(Entity::trap(pos));
    }

    world.teleports = plan.teleports;
    world.zaps = plan.zaps;
    Ok(())
}

fn place(
    world: &mut GameState,
    kind: EntityKind,
    index: usize,
    requested: usize,
) -> Result<Position, PlacementError> {
    world.random_free_cell().ok_or(PlacementError::NoFreeCell {
        kind,
        index,
        requested,
        width: world.width,
        height: world.height,
    })
}

/// Start (or restart) a game from level 1 with the configured counts.
pub fn new_game(world: &mut GameState) -> Result<(), PlacementError> {
    world.level = 1;
    world.message.clear();
    let lv = &world.config.level;
    let (teleports, zaps) = lv.charges_for(1, &world.config.abilities);
    let plan = LevelPlan {
        baddies: lv.start_baddies,
        traps: lv.start_traps,
        teleports,
        zaps,
    };
    initialize(world, plan)?;
    info!(
        "new game: {}x{} board, {} baddies, {} traps",
        world.width, world.height, plan.baddies, plan.traps,
    );
    Ok(())
}

/// Advance to the next level. Counts grow from the pre-victory storage
/// sizes, so traps spawned by pile-ups carry into the next level's total.
pub fn level_up(world: &mut GameState) -> Result<(), PlacementError> {
    world.level += 1;
    let lv = &world.config.level;
    let (teleports, zaps) = lv.charges_for(world.level, &world.config.abilities);
    let plan = LevelPlan {
        baddies: world.baddies.len() + lv.add_baddies,
        traps: world.traps.len() + lv.add_traps,
        teleports,
        zaps,
    };
    initialize(world, plan)?;
    info!(
        "level {}: {} baddies, {} traps, {} teleports, {} zaps",
        world.level, plan.baddies, plan.traps, plan.teleports, plan.zaps,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Variant;
    use std::collections::HashSet;

    fn seeded(variant: Variant, seed: u64) -> GameState {
        let mut config = variant.preset();
        config.seed = Some(seed);
        GameState::new(config)
    }

    fn plan(baddies: usize, traps: usize) -> LevelPlan {
        LevelPlan { baddies, traps, teleports: 2, zaps: 1 }
    }

    #[test]
    fn initialize_places_without_overlap() {
        for seed in 0..20 {
            let mut w = seeded(Variant::Classic, seed);
            initialize(&mut w, plan(30, 40)).unwrap();
            assert_eq!(w.player.pos, Position::new(12, 12));
            assert!(w.player.alive);
            assert_eq!(w.baddies.len(), 30);
            assert_eq!(w.traps.len(), 40);

            let mut cells = HashSet::new();
            assert!(cells.insert(w.player.pos));
            for e in w.baddies.iter().chain(w.traps.iter()) {
                assert!(w.in_bounds(e.pos));
                assert!(cells.insert(e.pos), "overlap at {:?}", e.pos);
            }
        }
    }

    #[test]
    fn occupancy_matches_starting_cells() {
        let mut w = seeded(Variant::Zap, 3);
        initialize(&mut w, plan(5, 6)).unwrap();
        let starts: HashSet<Position> = std::iter::once(w.player.pos)
            .chain(w.baddies.iter().map(|b| b.pos))
            .chain(w.traps.iter().map(|t| t.pos))
            .collect();
        for y in 0..w.height {
            for x in 0..w.width {
                let p = Position::new(x, y);
                assert_eq!(w.occupied(p), starts.contains(&p), "cell {p:?}");
            }
        }
    }

    #[test]
    fn initialize_fills_board_exactly() {
        let mut w = GameState::from_rows(&["...", "...", "..."]);
        initialize(&mut w, plan(4, 4)).unwrap();
        assert!(w.free_cells().is_empty());
    }

    #[test]
    fn initialize_fails_fast_when_board_is_full() {
        let mut w = GameState::from_rows(&["...", "...", "..."]);
        let err = initialize(&mut w, plan(4, 5)).unwrap_err();
        assert_eq!(
            err,
            PlacementError::NoFreeCell {
                kind: EntityKind::Trap,
                index: 4,
                requested: 5,
                width: 3,
                height: 3,
            }
        );
    }

    #[test]
    fn initialize_revives_player_and_resets_charges() {
        let mut w = GameState::from_rows(&["B....", "..@..", "....."]);
        w.player.alive = false;
        w.teleports = 9;
        initialize(&mut w, LevelPlan { baddies: 1, traps: 1, teleports: 3, zaps: 0 }).unwrap();
        assert!(w.player.alive);
        assert_eq!(w.player.pos, Position::new(2, 1));
        assert_eq!((w.teleports, w.zaps), (3, 0));
    }

    #[test]
    fn new_game_uses_start_counts() {
        let mut w = seeded(Variant::Zap, 11);
        w.level = 5;
        new_game(&mut w).unwrap();
        assert_eq!(w.level, 1);
        assert_eq!(w.baddies.len(), 3);
        assert_eq!(w.traps.len(), 4);
        assert_eq!((w.teleports, w.zaps), (2, 1));
    }

    #[test]
    fn level_up_adds_two_of_each_from_storage_totals() {
        let mut w = seeded(Variant::Classic, 5);
        new_game(&mut w).unwrap();
        // A pile-up spawned one extra trap during the level.
        let extra = w.baddies[0].pos;
        w.traps.push(Entity::trap(extra));
        for b in &mut w.baddies {
            b.alive = false;
        }

        level_up(&mut w).unwrap();
        assert_eq!(w.level, 2);
        assert_eq!(w.baddies.len(), 3 + 2);
        assert_eq!(w.traps.len(), 5 + 2);
        assert!(w.baddies.iter().all(|b| b.alive));
        assert_eq!(w.teleports, 2);
    }

    #[test]
    fn level_up_charges_follow_level_number() {
        let mut w = seeded(Variant::Zap, 8);
        new_game(&mut w).unwrap();
        level_up(&mut w).unwrap();
        level_up(&mut w).unwrap();
        assert_eq!(w.level, 3);
        assert_eq!((w.teleports, w.zaps), (3, 3));
    }
}
