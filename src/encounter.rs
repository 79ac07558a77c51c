use crate::actor::{Actor, Ghost, Pacman};
use crate::grid::Pos;

/// Whether a ghost that just moved from `ghost_before` met Pac-Man, either on
/// the same cell or by swapping cells with him along one edge.
pub fn ghost_meets_pacman(pacman: &Actor<Pacman>, ghost_before: Pos, ghost: &Actor<Ghost>) -> bool {
    if ghost.pos == pacman.pos {
        return true;
    }
    pacman.previous() == ghost.pos && ghost_before == pacman.pos
}

/// First ghost, in roster order, standing on Pac-Man's cell.
pub fn sweep(pacman: &Actor<Pacman>, ghosts: &[Actor<Ghost>]) -> Option<usize> {
    ghosts.iter().position(|ghost| ghost.pos == pacman.pos)
}
