use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::LoadError;
use crate::grid::{Grid, Pos, Tile, Warp};

/// Everything fixed at load time: walls, tunnel, start cells and the initial
/// placement of every collectible.
#[derive(Clone, Debug)]
pub struct Layout {
    pub grid: Grid,
    pub pellets: HashSet<Pos>,
    pub power: HashSet<Pos>,
    pub pacman_start: Pos,
    pub ghost_starts: Vec<Pos>,
    pub fruit: Option<Pos>,
}

pub fn load_map(path: &Path) -> Result<Layout, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let layout = parse_map(&text)?;
    debug!(
        path = %path.display(),
        width = layout.grid.width(),
        height = layout.grid.height(),
        ghosts = layout.ghost_starts.len(),
        "map loaded"
    );
    Ok(layout)
}

/// `#` is wall; every other character is floor. `.`/`o` place pellets and
/// power pills, `c`/`n` start cells, `@` the fruit, `<`/`>` the tunnel mouths.
pub fn parse_map(text: &str) -> Result<Layout, LoadError> {
    let mut tiles = Vec::new();
    let mut pellets = HashSet::new();
    let mut power = HashSet::new();
    let mut pacman_start = None;
    let mut ghost_starts = Vec::new();
    let mut fruit = None;
    let mut warp_left = None;
    let mut warp_right = None;

    for (row, line) in text.lines().enumerate() {
        let mut tile_row = Vec::new();
        for (col, ch) in line.chars().enumerate() {
            let pos = Pos::new(row as i32, col as i32);
            match ch {
                '#' => {
                    tile_row.push(Tile::Wall);
                    continue;
                }
                '.' => {
                    pellets.insert(pos);
                }
                'o' => {
                    power.insert(pos);
                }
                'c' => pacman_start = Some(pos),
                'n' => ghost_starts.push(pos),
                '@' => fruit = Some(pos),
                '<' => warp_left = Some(pos),
                '>' => warp_right = Some(pos),
                _ => {}
            }
            tile_row.push(Tile::Open);
        }
        tiles.push(tile_row);
    }

    let warp = match (warp_left, warp_right) {
        (Some(left), Some(right)) => Some(Warp { left, right }),
        _ => None,
    };

    Ok(Layout {
        grid: Grid::new(tiles, warp),
        pellets,
        power,
        pacman_start: pacman_start.ok_or(LoadError::MissingPacman)?,
        ghost_starts,
        fruit,
    })
}
