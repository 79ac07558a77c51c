use std::collections::HashSet;

use crate::grid::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Item {
    Pellet,
    Power,
}

/// Live pellets and power pills, plus the placement they are restored to on
/// a new level or restart.
#[derive(Clone, Debug)]
pub struct Pellets {
    pellets: HashSet<Pos>,
    power: HashSet<Pos>,
    initial_pellets: HashSet<Pos>,
    initial_power: HashSet<Pos>,
}

impl Pellets {
    pub fn new(pellets: HashSet<Pos>, power: HashSet<Pos>) -> Self {
        Self {
            initial_pellets: pellets.clone(),
            initial_power: power.clone(),
            pellets,
            power,
        }
    }

    pub fn remaining(&self) -> usize {
        self.pellets.len() + self.power.len()
    }

    pub fn pellets(&self) -> &HashSet<Pos> {
        &self.pellets
    }

    pub fn power(&self) -> &HashSet<Pos> {
        &self.power
    }

    /// Removes whatever lies at `pos`. A position yields an item at most once
    /// until the next `restore`.
    pub fn take(&mut self, pos: Pos) -> Option<Item> {
        if self.pellets.remove(&pos) {
            Some(Item::Pellet)
        } else if self.power.remove(&pos) {
            Some(Item::Power)
        } else {
            None
        }
    }

    pub fn restore(&mut self) {
        self.pellets.clone_from(&self.initial_pellets);
        self.power.clone_from(&self.initial_power);
    }
}
