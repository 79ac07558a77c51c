#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Open,
}

/// A maze cell. Signed so that the neighbour of an edge cell is still a
/// position, which the grid then reports as wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn step(self, dir: Dir) -> Pos {
        let (dr, dc) = dir.delta();
        Pos {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// Where an actor moving with `dir` came from, `pos - velocity`.
    pub fn back(self, dir: Option<Dir>) -> Pos {
        match dir {
            Some(dir) => self.step(dir.opposite()),
            None => self,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    /// `(Δrow, Δcol)`.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
            Dir::Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

/// Paired tunnel mouths. Leaving `left` leftward lands on `right` and vice versa.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Warp {
    pub left: Pos,
    pub right: Pos,
}

#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<Vec<Tile>>,
    warp: Option<Warp>,
}

impl Grid {
    /// Rows shorter than the widest one are padded with open floor.
    pub fn new(mut tiles: Vec<Vec<Tile>>, warp: Option<Warp>) -> Self {
        let width = tiles.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut tiles {
            row.resize(width, Tile::Open);
        }
        Self {
            width,
            height: tiles.len(),
            tiles,
            warp,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn warp(&self) -> Option<Warp> {
        self.warp
    }

    pub fn tile(&self, pos: Pos) -> Tile {
        if pos.row < 0 || pos.col < 0 {
            return Tile::Wall;
        }
        self.tiles
            .get(pos.row as usize)
            .and_then(|row| row.get(pos.col as usize))
            .copied()
            .unwrap_or(Tile::Wall)
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        self.tile(pos) == Tile::Wall
    }

    pub fn is_open(&self, pos: Pos) -> bool {
        !self.is_wall(pos)
    }

    pub fn can_move(&self, pos: Pos, dir: Dir) -> bool {
        self.is_open(pos.step(dir))
    }

    /// Open neighbour directions, always in `Dir::ALL` order.
    pub fn open_dirs(&self, pos: Pos) -> Vec<Dir> {
        Dir::ALL
            .into_iter()
            .filter(|dir| self.can_move(pos, *dir))
            .collect()
    }

    pub fn is_junction(&self, pos: Pos) -> bool {
        self.open_dirs(pos).len() > 2
    }

    /// The opposite tunnel mouth if `pos` is a mouth and `dir` points out of it.
    pub fn warp_exit(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        let warp = self.warp?;
        match dir {
            Dir::Left if pos == warp.left => Some(warp.right),
            Dir::Right if pos == warp.right => Some(warp.left),
            _ => None,
        }
    }
}
