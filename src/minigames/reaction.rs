//! Reaction test: wait for the go-signal, then click as fast as possible.
//!
//! Clicking before the signal is a foul ([`ReactionPhase::Early`]) that scores
//! nothing; the player has to arm a new attempt. Each attempt is numbered and
//! a go-signal from an older attempt is ignored, so a timer that outlives a
//! foul can never turn the next attempt green too early.

use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::Rng;
use tracing::debug;

use super::{fork_rng, MiniGame, Step};
use crate::constants::*;
use crate::scoring::reaction_score;
use crate::types::GameId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionPhase {
    Idle,
    Waiting,
    Ready { since: Instant },
    Early,
    Finished { reaction_ms: u64, score: u8 },
}

/// Go-signal for one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionTimer {
    pub attempt: u32,
}

pub struct ReactionGame {
    rng: SmallRng,
    phase: ReactionPhase,
    attempt: u32,
}

impl ReactionGame {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            rng: fork_rng(rng),
            phase: ReactionPhase::Idle,
            attempt: 0,
        }
    }

    pub fn phase(&self) -> ReactionPhase {
        self.phase
    }

    /// Start an attempt: after a random delay the screen turns green.
    pub fn arm(&mut self) -> Step<ReactionTimer> {
        match self.phase {
            ReactionPhase::Idle | ReactionPhase::Early => {
                self.attempt += 1;
                self.phase = ReactionPhase::Waiting;
                let delay = REACTION_MIN_DELAY_MS + self.rng.random_range(0..REACTION_DELAY_SPREAD_MS);
                debug!(attempt = self.attempt, delay_ms = delay, "reaction armed");
                Step::arm(
                    Duration::from_millis(delay),
                    ReactionTimer {
                        attempt: self.attempt,
                    },
                )
            }
            _ => Step::wait(),
        }
    }

    pub fn click(&mut self, now: Instant) -> Step<ReactionTimer> {
        match self.phase {
            ReactionPhase::Waiting => {
                debug!(attempt = self.attempt, "reaction clicked too early");
                self.phase = ReactionPhase::Early;
                Step::wait()
            }
            ReactionPhase::Ready { since } => {
                let reaction_ms = now.saturating_duration_since(since).as_millis() as u64;
                let score = reaction_score(reaction_ms);
                self.phase = ReactionPhase::Finished { reaction_ms, score };
                Step::finish(score, Duration::from_millis(REACTION_RESULT_HOLD_MS))
            }
            ReactionPhase::Idle | ReactionPhase::Early | ReactionPhase::Finished { .. } => {
                Step::wait()
            }
        }
    }
}

impl MiniGame for ReactionGame {
    type Timer = ReactionTimer;
    const ID: GameId = GameId::Reaction;

    fn begin(&mut self) -> Step<ReactionTimer> {
        Step::wait()
    }

    fn on_timer(&mut self, timer: ReactionTimer, now: Instant) -> Step<ReactionTimer> {
        if self.phase == ReactionPhase::Waiting && timer.attempt == self.attempt {
            self.phase = ReactionPhase::Ready { since: now };
        }
        Step::wait()
    }

    fn score(&self) -> Option<u8> {
        match self.phase {
            ReactionPhase::Finished { score, .. } => Some(score),
            _ => None,
        }
    }
}
