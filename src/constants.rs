use std::time::Duration;

pub const PELLET_SCORE: u32 = 10;
pub const POWER_SCORE: u32 = 50;
pub const GHOST_SCORE: u32 = 200;
pub const FRUIT_SCORE: u32 = 100;

pub const START_LIVES: u32 = 3;
pub const EXTRA_LIFE_SCORE: u32 = 10_000;

/// Dots-eaten counts at which the fruit appears, each once per level.
pub const FRUIT_TRIGGERS: [u32; 2] = [70, 170];

pub const POWER_DURATION: Duration = Duration::from_secs(6);
pub const FRUIT_DURATION: Duration = Duration::from_secs(10);

pub const DEFAULT_TICK_MS: u64 = 150;
pub const TICK_DECREMENT_MS: u64 = 10;
pub const MIN_TICK_MS: u64 = 80;
pub const DEFAULT_RENDER_FPS: u64 = 100;

pub const JUNCTION_TURN_CHANCE: f64 = 0.3;

pub const DEFAULT_MAP_PATH: &str = "pacman-map.txt";
