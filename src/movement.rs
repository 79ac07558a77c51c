use rand::seq::SliceRandom;
use rand::Rng;

use crate::actor::{Actor, Ghost, Pacman};
use crate::constants::JUNCTION_TURN_CHANCE;
use crate::grid::{Dir, Grid};

/// How an actor's position changed during its step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Motion {
    Moved,
    Warped,
    /// Walked into a wall; position unchanged.
    Blocked,
    /// Had no direction to move in.
    Idle,
}

impl Motion {
    /// Whether the actor ended the step on a cell it must be checked on.
    pub fn settled(self) -> bool {
        !matches!(self, Motion::Blocked)
    }
}

pub fn move_pacman(grid: &Grid, pacman: &mut Actor<Pacman>) -> Motion {
    if let Some(next) = pacman.kind.next_dir {
        if grid.can_move(pacman.pos, next) {
            pacman.dir = Some(next);
            pacman.kind.next_dir = None;
        }
    }

    let Some(dir) = pacman.dir else {
        return Motion::Idle;
    };
    if let Some(exit) = grid.warp_exit(pacman.pos, dir) {
        pacman.pos = exit;
        return Motion::Warped;
    }
    if grid.can_move(pacman.pos, dir) {
        pacman.pos = pacman.pos.step(dir);
        Motion::Moved
    } else {
        pacman.dir = None;
        Motion::Blocked
    }
}

/// Picks a direction for a standing ghost and, at junctions, sometimes turns
/// it down a different corridor (never straight back).
pub fn steer_ghost(grid: &Grid, ghost: &mut Actor<Ghost>, rng: &mut impl Rng) {
    if ghost.dir.is_none() {
        if let Some(dir) = grid.open_dirs(ghost.pos).choose(rng) {
            ghost.dir = Some(*dir);
        }
    }

    if grid.is_junction(ghost.pos) && rng.gen::<f64>() < JUNCTION_TURN_CHANCE {
        let reverse = ghost.dir.map(Dir::opposite);
        let options: Vec<Dir> = grid
            .open_dirs(ghost.pos)
            .into_iter()
            .filter(|dir| Some(*dir) != reverse)
            .collect();
        if let Some(dir) = options.choose(rng) {
            ghost.dir = Some(*dir);
        }
    }
}

/// Moves a steered ghost one cell. A ghost that hits a wall stays put and
/// picks any open direction for next time, reverse included.
pub fn move_ghost(grid: &Grid, ghost: &mut Actor<Ghost>, rng: &mut impl Rng) -> Motion {
    let Some(dir) = ghost.dir else {
        return Motion::Idle;
    };
    if let Some(exit) = grid.warp_exit(ghost.pos, dir) {
        ghost.pos = exit;
        return Motion::Warped;
    }
    if grid.can_move(ghost.pos, dir) {
        ghost.pos = ghost.pos.step(dir);
        return Motion::Moved;
    }
    if let Some(dir) = grid.open_dirs(ghost.pos).choose(rng) {
        ghost.dir = Some(*dir);
    }
    Motion::Blocked
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::grid::Pos;
    use crate::map::parse_map;

    const CORRIDOR: &str = "\
#######
<c    >
#######";

    #[test]
    fn pacman_stops_at_wall_without_reversing() {
        let layout = parse_map("#####\n#c  #\n#####").unwrap();
        let mut pacman = Actor::<Pacman>::spawn(layout.pacman_start);
        pacman.request(Dir::Right);
        assert_eq!(move_pacman(&layout.grid, &mut pacman), Motion::Moved);
        assert_eq!(move_pacman(&layout.grid, &mut pacman), Motion::Moved);
        assert_eq!(pacman.pos, Pos::new(1, 3));
        assert_eq!(move_pacman(&layout.grid, &mut pacman), Motion::Blocked);
        assert_eq!(pacman.pos, Pos::new(1, 3));
        assert_eq!(pacman.dir, None);
        assert_eq!(move_pacman(&layout.grid, &mut pacman), Motion::Idle);
        assert_eq!(pacman.pos, Pos::new(1, 3));
    }

    #[test]
    fn blocked_turn_stays_pending() {
        let layout = parse_map("#####\n#c  #\n## ##\n#####").unwrap();
        let mut pacman = Actor::<Pacman>::spawn(layout.pacman_start);
        pacman.dir = Some(Dir::Right);
        pacman.request(Dir::Down);
        move_pacman(&layout.grid, &mut pacman);
        assert_eq!(pacman.pos, Pos::new(1, 2));
        assert_eq!(pacman.kind.next_dir, Some(Dir::Down));
        move_pacman(&layout.grid, &mut pacman);
        assert_eq!(pacman.pos, Pos::new(2, 2));
        assert_eq!(pacman.dir, Some(Dir::Down));
        assert_eq!(pacman.kind.next_dir, None);
    }

    #[test]
    fn pacman_warps_to_opposite_mouth() {
        let layout = parse_map(CORRIDOR).unwrap();
        let mut pacman = Actor::<Pacman>::spawn(layout.pacman_start);
        pacman.request(Dir::Left);
        assert_eq!(move_pacman(&layout.grid, &mut pacman), Motion::Moved);
        assert_eq!(pacman.pos, Pos::new(1, 0));
        assert_eq!(move_pacman(&layout.grid, &mut pacman), Motion::Warped);
        assert_eq!(pacman.pos, Pos::new(1, 6));
        assert_eq!(pacman.dir, Some(Dir::Left));

        pacman.pos = Pos::new(1, 5);
        pacman.dir = Some(Dir::Right);
        assert_eq!(move_pacman(&layout.grid, &mut pacman), Motion::Moved);
        assert_eq!(move_pacman(&layout.grid, &mut pacman), Motion::Warped);
        assert_eq!(pacman.pos, Pos::new(1, 0));
    }

    #[test]
    fn ghost_warps_to_opposite_mouth() {
        let layout = parse_map(CORRIDOR).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mut ghost = Actor::<Ghost>::spawn(Pos::new(1, 0));
        ghost.dir = Some(Dir::Left);
        assert_eq!(move_ghost(&layout.grid, &mut ghost, &mut rng), Motion::Warped);
        assert_eq!(ghost.pos, Pos::new(1, 6));
        assert_eq!(ghost.dir, Some(Dir::Left));

        ghost.dir = Some(Dir::Right);
        assert_eq!(move_ghost(&layout.grid, &mut ghost, &mut rng), Motion::Warped);
        assert_eq!(ghost.pos, Pos::new(1, 0));
    }

    #[test]
    fn ghost_in_corridor_never_turns() {
        let layout = parse_map("#######\n#n   c#\n#######").unwrap();
        let mut ghost = Actor::<Ghost>::spawn(layout.ghost_starts[0]);
        let mut rng = StdRng::seed_from_u64(7);
        steer_ghost(&layout.grid, &mut ghost, &mut rng);
        assert_eq!(ghost.dir, Some(Dir::Right));
        for col in 2..=5 {
            steer_ghost(&layout.grid, &mut ghost, &mut rng);
            assert_eq!(move_ghost(&layout.grid, &mut ghost, &mut rng), Motion::Moved);
            assert_eq!(ghost.pos, Pos::new(1, col));
        }
        steer_ghost(&layout.grid, &mut ghost, &mut rng);
        assert_eq!(move_ghost(&layout.grid, &mut ghost, &mut rng), Motion::Blocked);
        assert_eq!(ghost.pos, Pos::new(1, 5));
        assert_eq!(ghost.dir, Some(Dir::Left));
    }

    #[test]
    fn junction_turn_never_reverses() {
        let layout = parse_map("#####\n#   #\n## ##\n# c #\n#####").unwrap();
        let junction = Pos::new(1, 2);
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut ghost = Actor::<Ghost>::spawn(junction);
            ghost.dir = Some(Dir::Right);
            steer_ghost(&layout.grid, &mut ghost, &mut rng);
            assert_ne!(ghost.dir, Some(Dir::Left), "seed {seed}");
        }
    }

    #[test]
    fn walled_in_ghost_is_idle() {
        let layout = parse_map("###\n#n#\n###\nc").unwrap();
        let mut ghost = Actor::<Ghost>::spawn(layout.ghost_starts[0]);
        let mut rng = StdRng::seed_from_u64(1);
        steer_ghost(&layout.grid, &mut ghost, &mut rng);
        assert_eq!(ghost.dir, None);
        assert_eq!(move_ghost(&layout.grid, &mut ghost, &mut rng), Motion::Idle);
    }

    #[test]
    fn seeded_ghost_walk_is_reproducible() {
        let layout = parse_map("#######\n#     #\n# # # #\n#  n  #\n# # # #\n#c    #\n#######")
            .unwrap();
        let walk = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut ghost = Actor::<Ghost>::spawn(layout.ghost_starts[0]);
            (0..50)
                .map(|_| {
                    steer_ghost(&layout.grid, &mut ghost, &mut rng);
                    move_ghost(&layout.grid, &mut ghost, &mut rng);
                    assert!(layout.grid.is_open(ghost.pos));
                    ghost.pos
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(walk(42), walk(42));
    }
}
