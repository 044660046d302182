//! Ghost buster: whack as many ghosts as possible in ten seconds.
//!
//! A ghost appears at the start and every 800 ms after that. Each whacked ghost
//! is worth ten points, capped at 100.

use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::Rng;

use super::{fork_rng, MiniGame, Step};
use crate::constants::*;
use crate::scoring::target_click_score;
use crate::types::GameId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ghost {
    pub id: u32,
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetPhase {
    Ready,
    Active { seconds_left: u32 },
    Over { score: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetTimer {
    Second,
    Spawn,
}

pub struct TargetClickGame {
    rng: SmallRng,
    phase: TargetPhase,
    ghosts: Vec<Ghost>,
    next_id: u32,
    hits: u32,
}

impl TargetClickGame {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            rng: fork_rng(rng),
            phase: TargetPhase::Ready,
            ghosts: Vec::new(),
            next_id: 1,
            hits: 0,
        }
    }

    pub fn phase(&self) -> TargetPhase {
        self.phase
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    fn spawn(&mut self) -> Ghost {
        let range = TARGET_MIN_COORD..TARGET_MIN_COORD + TARGET_COORD_SPAN;
        let ghost = Ghost {
            id: self.next_id,
            x: self.rng.random_range(range.clone()),
            y: self.rng.random_range(range),
        };
        self.next_id += 1;
        self.ghosts.push(ghost);
        ghost
    }

    /// Start the clock. Only valid once.
    pub fn start(&mut self) -> Step<TargetTimer> {
        if self.phase != TargetPhase::Ready {
            return Step::wait();
        }
        self.phase = TargetPhase::Active {
            seconds_left: TARGET_SESSION_SECS,
        };
        self.spawn();
        Step::arm(Duration::from_secs(1), TargetTimer::Second).and_arm(
            Duration::from_millis(TARGET_SPAWN_INTERVAL_MS),
            TargetTimer::Spawn,
        )
    }

    /// Whack the ghost with `id`. Returns `true` if it was hit.
    pub fn whack(&mut self, id: u32) -> bool {
        if !matches!(self.phase, TargetPhase::Active { .. }) {
            return false;
        }
        let before = self.ghosts.len();
        self.ghosts.retain(|g| g.id != id);
        if self.ghosts.len() == before {
            return false;
        }
        self.hits += 1;
        true
    }
}

impl MiniGame for TargetClickGame {
    type Timer = TargetTimer;
    const ID: GameId = GameId::TargetClick;

    fn begin(&mut self) -> Step<TargetTimer> {
        Step::wait()
    }

    fn on_timer(&mut self, timer: TargetTimer, _now: Instant) -> Step<TargetTimer> {
        let TargetPhase::Active { seconds_left } = self.phase else {
            return Step::wait();
        };
        match timer {
            TargetTimer::Second if seconds_left > 1 => {
                self.phase = TargetPhase::Active {
                    seconds_left: seconds_left - 1,
                };
                Step::arm(Duration::from_secs(1), TargetTimer::Second)
            }
            TargetTimer::Second => {
                let score = target_click_score(self.hits);
                self.phase = TargetPhase::Over { score };
                self.ghosts.clear();
                Step::finish(score, Duration::ZERO)
            }
            TargetTimer::Spawn => {
                self.spawn();
                Step::arm(
                    Duration::from_millis(TARGET_SPAWN_INTERVAL_MS),
                    TargetTimer::Spawn,
                )
            }
        }
    }

    fn score(&self) -> Option<u8> {
        match self.phase {
            TargetPhase::Over { score } => Some(score),
            _ => None,
        }
    }
}
