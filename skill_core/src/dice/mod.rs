//! Dice rolling - d20 tests and damage dice behind a swappable roller

mod roll;

pub use roll::{RollBreakdown, RollKind, RollModifier};

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Source of die faces
///
/// Resolution code never touches an RNG directly so tests can script the
/// exact faces a scenario needs.
pub trait DiceRoller {
    /// Roll a single die with `sides` faces, returning 1..=sides
    fn roll_die(&mut self, sides: u32) -> u32;

    /// Roll a d20
    fn d20(&mut self) -> u32 {
        self.roll_die(20)
    }
}

/// Roller backed by any `rand` RNG
#[derive(Debug, Clone)]
pub struct RngRoller<R: Rng> {
    rng: R,
}

impl<R: Rng> RngRoller<R> {
    pub fn new(rng: R) -> Self {
        RngRoller { rng }
    }
}

impl<R: Rng> DiceRoller for RngRoller<R> {
    fn roll_die(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        self.rng.gen_range(1..=sides)
    }
}

/// Roller that replays a fixed sequence of faces
///
/// Faces are clamped into `1..=sides`. Once the queue is empty every roll
/// returns 1.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRoller {
    faces: VecDeque<u32>,
    rolled: Vec<(u32, u32)>,
}

impl ScriptedRoller {
    pub fn new(faces: impl IntoIterator<Item = u32>) -> Self {
        ScriptedRoller {
            faces: faces.into_iter().collect(),
            rolled: Vec::new(),
        }
    }

    /// Faces not yet consumed
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }

    /// Every `(sides, face)` pair handed out so far
    pub fn history(&self) -> &[(u32, u32)] {
        &self.rolled
    }
}

impl DiceRoller for ScriptedRoller {
    fn roll_die(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        let face = match self.faces.pop_front() {
            Some(face) => face.clamp(1, sides),
            None => {
                tracing::warn!(sides, "scripted roller exhausted, returning 1");
                1
            }
        };
        self.rolled.push((sides, face));
        face
    }
}

/// `count` dice with `sides` faces, e.g. 2d6
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiceSpec {
    pub count: u32,
    pub sides: u32,
}

impl DiceSpec {
    /// Most dice one spec rolls
    pub const MAX_COUNT: u32 = 100;
    /// Largest die content may name
    pub const MAX_SIDES: u32 = 1000;

    pub fn new(count: u32, sides: u32) -> Self {
        DiceSpec { count, sides }
    }

    /// No dice at all
    pub fn none() -> Self {
        DiceSpec { count: 0, sides: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0 || self.sides == 0
    }

    /// Within [`Self::MAX_COUNT`] and [`Self::MAX_SIDES`]
    pub fn is_bounded(&self) -> bool {
        self.count <= Self::MAX_COUNT && self.sides <= Self::MAX_SIDES
    }

    /// Roll every die, returning the individual faces. Counts past
    /// [`Self::MAX_COUNT`] are capped.
    pub fn roll(&self, roller: &mut dyn DiceRoller) -> Vec<u32> {
        if self.is_empty() {
            return Vec::new();
        }
        (0..self.count.min(Self::MAX_COUNT))
            .map(|_| roller.roll_die(self.sides))
            .collect()
    }

    /// Average total, for display
    pub fn average(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.count as f64 * (self.sides as f64 + 1.0) / 2.0
    }
}

impl std::fmt::Display for DiceSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}
