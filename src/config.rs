use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{DEFAULT_MAP_PATH, DEFAULT_RENDER_FPS, DEFAULT_TICK_MS};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub map_path: PathBuf,
    /// Initial simulation interval; later levels shorten it.
    pub tick_ms: u64,
    pub render_fps: u64,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            map_path: PathBuf::from(DEFAULT_MAP_PATH),
            tick_ms: DEFAULT_TICK_MS,
            render_fps: DEFAULT_RENDER_FPS,
            seed: None,
            log_file: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from `PACMAN_*` variables. Speeds that are missing,
    /// unparsable or zero keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            map_path: lookup("PACMAN_MAP")
                .map(PathBuf::from)
                .unwrap_or(defaults.map_path),
            tick_ms: positive(lookup("PACMAN_TICK_MS")).unwrap_or(defaults.tick_ms),
            render_fps: positive(lookup("PACMAN_FPS")).unwrap_or(defaults.render_fps),
            seed: lookup("PACMAN_SEED").and_then(|v| v.trim().parse().ok()),
            log_file: lookup("PACMAN_LOG").map(PathBuf::from),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn frame_time(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.render_fps.max(1))
    }
}

fn positive(value: Option<String>) -> Option<u64> {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(from_pairs(&[]), Settings::default());
    }

    #[test]
    fn reads_overrides() {
        let s = from_pairs(&[
            ("PACMAN_MAP", "maps/big.txt"),
            ("PACMAN_TICK_MS", "120"),
            ("PACMAN_FPS", "30"),
            ("PACMAN_SEED", "99"),
            ("PACMAN_LOG", "/tmp/pacman.log"),
        ]);
        assert_eq!(s.map_path, PathBuf::from("maps/big.txt"));
        assert_eq!(s.tick_interval(), Duration::from_millis(120));
        assert_eq!(s.render_fps, 30);
        assert_eq!(s.seed, Some(99));
        assert_eq!(s.log_file, Some(PathBuf::from("/tmp/pacman.log")));
    }

    #[test]
    fn bad_speeds_fall_back() {
        let s = from_pairs(&[("PACMAN_TICK_MS", "0"), ("PACMAN_FPS", "fast")]);
        assert_eq!(s.tick_ms, DEFAULT_TICK_MS);
        assert_eq!(s.render_fps, DEFAULT_RENDER_FPS);
    }
}
