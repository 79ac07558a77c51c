use crate::grid::{Dir, Pos};

/// Something that moves through the maze. `kind` holds what differs between
/// Pac-Man and a ghost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Actor<K> {
    pub pos: Pos,
    pub dir: Option<Dir>,
    pub kind: K,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pacman {
    /// Requested turn, applied once the cell that way is open.
    pub next_dir: Option<Dir>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ghost {
    pub frightened: bool,
}

impl<K: Default> Actor<K> {
    pub fn spawn(pos: Pos) -> Self {
        Self {
            pos,
            dir: None,
            kind: K::default(),
        }
    }

    /// Back to `pos`, standing still, with all per-actor state cleared.
    pub fn respawn(&mut self, pos: Pos) {
        *self = Self::spawn(pos);
    }
}

impl Actor<Pacman> {
    pub fn request(&mut self, dir: Dir) {
        self.kind.next_dir = Some(dir);
    }

    /// Cell occupied before this tick's move, `pos - velocity`.
    pub fn previous(&self) -> Pos {
        self.pos.back(self.dir)
    }
}

impl Actor<Ghost> {
    pub fn frightened(&self) -> bool {
        self.kind.frightened
    }

    pub fn set_frightened(&mut self, frightened: bool) {
        self.kind.frightened = frightened;
    }
}
