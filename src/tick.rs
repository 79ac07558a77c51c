use std::time::Duration;

use rand::Rng;

use crate::game::Game;
use crate::input::Command;

/// Remembers when the simulation last stepped so steps stay at least one
/// tick interval apart regardless of how often the loop spins.
#[derive(Clone, Copy, Debug)]
pub struct Ticker {
    last_step: Duration,
}

impl Ticker {
    pub fn new(now: Duration) -> Self {
        Self { last_step: now }
    }

    pub fn due(&self, now: Duration, interval: Duration) -> bool {
        now.saturating_sub(self.last_step) >= interval
    }

    pub fn reset(&mut self, now: Duration) {
        self.last_step = now;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Stepped,
    Idle,
    Quit,
}

/// One pass of the main loop minus I/O: apply the command, then step if the
/// game is live and a tick is due. Rendering is the caller's job either way.
pub fn advance(
    game: &mut Game,
    rng: &mut impl Rng,
    ticker: &mut Ticker,
    command: Option<Command>,
    now: Duration,
) -> Flow {
    match command {
        Some(Command::Quit) => return Flow::Quit,
        Some(Command::Move(dir)) => game.request(dir),
        Some(Command::Restart) => {
            if game.restart() {
                ticker.reset(now);
            }
        }
        Some(Command::NextLevel) => {
            if game.advance_level() {
                ticker.reset(now);
            }
        }
        None => {}
    }

    if game.is_playing() && ticker.due(now, game.tick_interval()) {
        game.step(rng, now);
        ticker.reset(now);
        return Flow::Stepped;
    }
    Flow::Idle
}
