/// Baddie AI: greedy per-axis chase.
///
/// Each axis moves independently one cell toward the target.
/// No pathfinding, no avoidance: baddies may land on each other or on
/// traps, and collision resolution sorts that out afterwards.

use super::entity::Position;

/// Next cell for a chaser at `from` pursuing `target`.
pub fn chase_step(from: Position, target: Position) -> Position {
    Position {
        x: toward(from.x, target.x),
        y: toward(from.y, target.y),
    }
}

fn toward(v: usize, target: usize) -> usize {
    if v > target {
        v - 1
    } else if v < target {
        v + 1
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chases_diagonally_when_both_axes_differ() {
        let next = chase_step(Position::new(0, 0), Position::new(3, 5));
        assert_eq!(next, Position::new(1, 1));
    }

    #[test]
    fn chases_along_single_axis() {
        assert_eq!(chase_step(Position::new(2, 0), Position::new(2, 2)), Position::new(2, 1));
        assert_eq!(chase_step(Position::new(4, 3), Position::new(1, 3)), Position::new(3, 3));
    }

    #[test]
    fn stays_put_on_target() {
        let p = Position::new(7, 7);
        assert_eq!(chase_step(p, p), p);
    }

    #[test]
    fn never_overshoots() {
        let target = Position::new(5, 5);
        let mut p = Position::new(0, 9);
        for _ in 0..20 {
            let next = chase_step(p, target);
            assert!(next.chebyshev(target) <= p.chebyshev(target));
            p = next;
        }
        assert_eq!(p, target);
    }
}
