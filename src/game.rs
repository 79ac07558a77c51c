use std::collections::HashSet;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use crate::actor::{Actor, Ghost, Pacman};
use crate::constants::{
    EXTRA_LIFE_SCORE, FRUIT_DURATION, FRUIT_SCORE, FRUIT_TRIGGERS, GHOST_SCORE, MIN_TICK_MS,
    PELLET_SCORE, POWER_DURATION, POWER_SCORE, START_LIVES, TICK_DECREMENT_MS,
};
use crate::encounter::{ghost_meets_pacman, sweep};
use crate::grid::{Dir, Grid, Pos};
use crate::map::Layout;
use crate::movement::{move_ghost, move_pacman, steer_ghost};
use crate::pellets::{Item, Pellets};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver,
    /// Board cleared; waits for the next level or a restart.
    Won,
}

/// The whole simulation. Times passed in are offsets from an arbitrary
/// origin that only ever moves forward.
pub struct Game {
    grid: Grid,
    pacman_start: Pos,
    ghost_starts: Vec<Pos>,
    fruit_pos: Option<Pos>,

    pellets: Pellets,
    pacman: Actor<Pacman>,
    ghosts: Vec<Actor<Ghost>>,

    phase: Phase,
    score: u32,
    lives: u32,
    level: u32,
    dots_eaten: u32,
    fruit_triggered: [bool; FRUIT_TRIGGERS.len()],
    fruit_since: Option<Duration>,
    power_since: Option<Duration>,
    extra_life_awarded: bool,
    tick_interval: Duration,
}

impl Game {
    pub fn new(layout: Layout, tick_interval: Duration) -> Self {
        let Layout {
            grid,
            pellets,
            power,
            pacman_start,
            ghost_starts,
            fruit,
        } = layout;
        Self {
            grid,
            pacman_start,
            pacman: Actor::spawn(pacman_start),
            ghosts: ghost_starts.iter().copied().map(Actor::spawn).collect(),
            ghost_starts,
            fruit_pos: fruit,
            pellets: Pellets::new(pellets, power),
            phase: Phase::Playing,
            score: 0,
            lives: START_LIVES,
            level: 1,
            dots_eaten: 0,
            fruit_triggered: [false; FRUIT_TRIGGERS.len()],
            fruit_since: None,
            power_since: None,
            extra_life_awarded: false,
            tick_interval,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pellets(&self) -> &HashSet<Pos> {
        self.pellets.pellets()
    }

    pub fn power_pills(&self) -> &HashSet<Pos> {
        self.pellets.power()
    }

    pub fn remaining(&self) -> usize {
        self.pellets.remaining()
    }

    /// The fruit's cell while it is on the board.
    pub fn fruit(&self) -> Option<Pos> {
        self.fruit_since.and(self.fruit_pos)
    }

    pub fn pacman(&self) -> &Actor<Pacman> {
        &self.pacman
    }

    pub fn ghosts(&self) -> &[Actor<Ghost>] {
        &self.ghosts
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn dots_eaten(&self) -> u32 {
        self.dots_eaten
    }

    pub fn power_active(&self) -> bool {
        self.power_since.is_some()
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Queues a turn; it takes effect on the first step where it is possible.
    pub fn request(&mut self, dir: Dir) {
        self.pacman.request(dir);
    }

    /// One simulation tick: timers, Pac-Man, pickups, ghosts, then the final
    /// sweep. Does nothing unless the game is being played.
    pub fn step(&mut self, rng: &mut impl Rng, now: Duration) {
        if !self.is_playing() {
            return;
        }
        self.expire_timers(now);

        move_pacman(&self.grid, &mut self.pacman);
        self.collect(now);
        // ghosts stay put on the clearing tick so a won round cannot also be lost
        if self.pellets.remaining() == 0 {
            info!(level = self.level, score = self.score, "level cleared");
            self.phase = Phase::Won;
            return;
        }

        self.move_ghosts(rng);
        if self.is_playing() {
            self.check_collisions();
        }
    }

    /// Resolves the first ghost sharing Pac-Man's cell, if any.
    pub fn check_collisions(&mut self) {
        if let Some(idx) = sweep(&self.pacman, &self.ghosts) {
            self.resolve_encounter(idx);
        }
    }

    /// Starts the next level. Only valid once the board is cleared.
    pub fn advance_level(&mut self) -> bool {
        if self.phase != Phase::Won {
            return false;
        }
        self.level += 1;
        let current = self.tick_interval.as_millis() as u64;
        let ms = current
            .saturating_sub(TICK_DECREMENT_MS)
            .max(MIN_TICK_MS.min(current));
        self.tick_interval = Duration::from_millis(ms);
        self.reset_board();
        info!(level = self.level, tick_ms = ms, "level advanced");
        true
    }

    /// Starts over with a fresh score and lives. Level, speed and the extra
    /// life already granted carry over.
    pub fn restart(&mut self) -> bool {
        if self.phase == Phase::Playing {
            return false;
        }
        self.score = 0;
        self.lives = START_LIVES;
        self.reset_board();
        info!(level = self.level, "game restarted");
        true
    }

    fn reset_board(&mut self) {
        self.phase = Phase::Playing;
        self.dots_eaten = 0;
        self.fruit_triggered = [false; FRUIT_TRIGGERS.len()];
        self.fruit_since = None;
        self.pellets.restore();
        self.reset_positions();
    }

    fn reset_positions(&mut self) {
        self.pacman.respawn(self.pacman_start);
        for (ghost, start) in self.ghosts.iter_mut().zip(&self.ghost_starts) {
            ghost.respawn(*start);
        }
        self.power_since = None;
    }

    fn expire_timers(&mut self, now: Duration) {
        if let Some(since) = self.power_since {
            if now.saturating_sub(since) > POWER_DURATION {
                debug!("power mode over");
                self.power_since = None;
                for ghost in &mut self.ghosts {
                    ghost.set_frightened(false);
                }
            }
        }
        if let Some(since) = self.fruit_since {
            if now.saturating_sub(since) > FRUIT_DURATION {
                debug!("fruit expired");
                self.fruit_since = None;
            }
        }
    }

    fn collect(&mut self, now: Duration) {
        let pos = self.pacman.pos;
        match self.pellets.take(pos) {
            Some(Item::Pellet) => self.eat_dot(PELLET_SCORE, now),
            Some(Item::Power) => {
                self.eat_dot(POWER_SCORE, now);
                debug!("power mode on");
                self.power_since = Some(now);
                for ghost in &mut self.ghosts {
                    ghost.set_frightened(true);
                }
            }
            None => {}
        }

        if self.fruit() == Some(pos) {
            debug!("fruit eaten");
            self.score += FRUIT_SCORE;
            self.fruit_since = None;
            self.check_extra_life();
        }
    }

    fn eat_dot(&mut self, points: u32, now: Duration) {
        self.score += points;
        self.dots_eaten += 1;
        self.check_extra_life();

        let trigger = FRUIT_TRIGGERS
            .iter()
            .position(|&count| count == self.dots_eaten);
        if let Some(idx) = trigger {
            if !self.fruit_triggered[idx] {
                self.fruit_triggered[idx] = true;
                if self.fruit_pos.is_some() {
                    debug!(dots = self.dots_eaten, "fruit spawned");
                    self.fruit_since = Some(now);
                }
            }
        }
    }

    fn check_extra_life(&mut self) {
        if !self.extra_life_awarded && self.score >= EXTRA_LIFE_SCORE {
            self.extra_life_awarded = true;
            self.lives += 1;
            debug!(lives = self.lives, "extra life");
        }
    }

    fn move_ghosts(&mut self, rng: &mut impl Rng) {
        for idx in 0..self.ghosts.len() {
            let ghost = &mut self.ghosts[idx];
            let before = ghost.pos;
            steer_ghost(&self.grid, ghost, rng);
            let motion = move_ghost(&self.grid, ghost, rng);
            if !motion.settled() {
                continue;
            }
            if ghost_meets_pacman(&self.pacman, before, &self.ghosts[idx]) {
                self.resolve_encounter(idx);
                if self.phase == Phase::GameOver {
                    return;
                }
            }
        }
    }

    fn resolve_encounter(&mut self, idx: usize) {
        if self.ghosts[idx].frightened() {
            self.score += GHOST_SCORE;
            let start = self.ghost_starts[idx];
            self.ghosts[idx].respawn(start);
            debug!(ghost = idx, score = self.score, "ghost eaten");
            return;
        }

        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            info!(level = self.level, score = self.score, "game over");
            self.phase = Phase::GameOver;
        } else {
            debug!(lives = self.lives, "life lost");
            self.reset_positions();
        }
    }
}
