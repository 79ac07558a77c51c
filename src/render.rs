use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::game::{Game, Phase};
use crate::grid::{Pos, Tile};

const CELL_W: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    Pacman,
    Ghost,
    Frightened,
    Fruit,
    Power,
    Pellet,
    Wall,
    Empty,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub glyph: Glyph,
    pub color: Color,
}

impl Cell {
    const fn new(glyph: Glyph, color: Color) -> Self {
        Self { glyph, color }
    }
}

/// Keeps the last frame so only changed cells are written.
pub struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    last_status: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            last: vec![Cell::new(Glyph::Empty, Color::Reset); width * height],
            last_hud: String::new(),
            last_status: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    pub fn render(&mut self, out: &mut impl Write, game: &Game) -> io::Result<()> {
        let (width, height) = (game.grid().width(), game.grid().height());
        let needed_h = (height + 2) as u16;
        let needed_w = (width * CELL_W) as u16;

        out.queue(MoveTo(0, 0))?;

        let (term_w, term_h) = terminal::size()?;
        if term_w < needed_w || term_h < needed_h {
            out.queue(Clear(ClearType::All))?;
            out.queue(Print(format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            )))?;
            out.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            out.queue(Clear(ClearType::All))?;
        }

        let hud = hud_line(game);
        if self.needs_full || hud != self.last_hud {
            out.queue(MoveTo(self.origin_x, self.origin_y - 1))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            out.queue(SetAttribute(Attribute::Bold))?;
            out.queue(Print(&hud))?;
            out.queue(SetAttribute(Attribute::Reset))?;
            self.last_hud = hud;
        }

        for row in 0..height {
            for col in 0..width {
                let cell = cell_for(game, Pos::new(row as i32, col as i32));
                let idx = row * width + col;
                if self.needs_full || cell != self.last[idx] {
                    self.last[idx] = cell;
                    self.draw_cell(out, col, row, cell)?;
                }
            }
        }

        let status = status_line(game.phase()).unwrap_or_default().to_string();
        if self.needs_full || status != self.last_status {
            out.queue(MoveTo(self.origin_x, self.origin_y + height as u16))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            out.queue(SetAttribute(Attribute::Bold))?;
            out.queue(Print(&status))?;
            out.queue(SetAttribute(Attribute::Reset))?;
            self.last_status = status;
        }
        self.needs_full = false;

        out.flush()
    }

    fn draw_cell(
        &self,
        out: &mut impl Write,
        col: usize,
        row: usize,
        cell: Cell,
    ) -> io::Result<()> {
        let text = match cell.glyph {
            Glyph::Pacman => "😃",
            Glyph::Ghost => "👻",
            Glyph::Frightened => "😱",
            Glyph::Fruit => "🍒",
            Glyph::Power => "● ",
            Glyph::Pellet => "· ",
            Glyph::Wall => "██",
            Glyph::Empty => "  ",
        };
        out.queue(MoveTo(
            self.origin_x + (col * CELL_W) as u16,
            self.origin_y + row as u16,
        ))?;
        out.queue(SetForegroundColor(cell.color))?;
        out.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        for _ in w..CELL_W {
            out.queue(Print(' '))?;
        }
        out.queue(ResetColor)?;
        Ok(())
    }
}

pub fn hud_line(game: &Game) -> String {
    format!(
        "Score: {} - Level: {} - Lives: {}",
        game.score(),
        game.level(),
        game.lives()
    )
}

pub fn status_line(phase: Phase) -> Option<&'static str> {
    match phase {
        Phase::Playing => None,
        Phase::GameOver => Some("GAME OVER - r to restart, q to quit"),
        Phase::Won => Some("LEVEL CLEAR - space to continue, q to quit"),
    }
}

/// What occupies `pos`, top layer first: Pac-Man, ghosts, fruit, pills, maze.
pub fn cell_for(game: &Game, pos: Pos) -> Cell {
    if game.pacman().pos == pos {
        return Cell::new(Glyph::Pacman, Color::Yellow);
    }
    if let Some(ghost) = game.ghosts().iter().find(|g| g.pos == pos) {
        return if ghost.frightened() {
            Cell::new(Glyph::Frightened, Color::Cyan)
        } else {
            Cell::new(Glyph::Ghost, Color::Red)
        };
    }
    if game.fruit() == Some(pos) {
        return Cell::new(Glyph::Fruit, Color::Magenta);
    }
    if game.power_pills().contains(&pos) {
        return Cell::new(Glyph::Power, Color::Green);
    }
    if game.pellets().contains(&pos) {
        return Cell::new(Glyph::Pellet, Color::White);
    }
    match game.grid().tile(pos) {
        Tile::Wall => Cell::new(Glyph::Wall, Color::Blue),
        Tile::Open => Cell::new(Glyph::Empty, Color::Reset),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::grid::Dir;
    use crate::map::parse_map;

    #[test]
    fn layers_resolve_top_down() {
        let mut game = Game::new(
            parse_map("######\n#c.on#\n######").unwrap(),
            Duration::from_millis(150),
        );
        assert_eq!(cell_for(&game, Pos::new(1, 1)).glyph, Glyph::Pacman);
        assert_eq!(cell_for(&game, Pos::new(1, 2)).glyph, Glyph::Pellet);
        assert_eq!(cell_for(&game, Pos::new(1, 3)).glyph, Glyph::Power);
        assert_eq!(cell_for(&game, Pos::new(1, 4)).glyph, Glyph::Ghost);
        assert_eq!(cell_for(&game, Pos::new(0, 0)).glyph, Glyph::Wall);

        let mut rng = StdRng::seed_from_u64(0);
        game.request(Dir::Right);
        game.step(&mut rng, Duration::ZERO);
        assert_eq!(cell_for(&game, Pos::new(1, 1)).glyph, Glyph::Empty);
    }

    #[test]
    fn hud_and_status_text() {
        let game = Game::new(parse_map("c.").unwrap(), Duration::from_millis(150));
        assert_eq!(hud_line(&game), "Score: 0 - Level: 1 - Lives: 3");
        assert_eq!(status_line(Phase::Playing), None);
        assert!(status_line(Phase::GameOver).unwrap().starts_with("GAME OVER"));
        assert!(status_line(Phase::Won).unwrap().contains("space"));
    }
}
