//! The six mini-games as synchronous, event-driven state machines.
//!
//! A game never touches the session. Each event handler returns a [`Step`]
//! telling the driver which timers to arm and whether the game has finished.
//! Time is passed in as `Instant` and randomness comes from a `SmallRng` the
//! game owns, so every game can be replayed deterministically in tests.
//!
//! | Game | Module | Input events | Timer payload |
//! |------|--------|--------------|---------------|
//! | Reaction | [`reaction`] | `arm`, `click` | [`reaction::ReactionTimer`] |
//! | Pattern | [`pattern`] | `toggle`, `submit` | [`pattern::PatternTimer`] |
//! | Number recall | [`number_recall`] | `submit` | [`number_recall::NumberTimer`] |
//! | Color interference | [`color_interference`] | `answer` | none |
//! | Spatial recall | [`spatial_recall`] | `click` | none |
//! | Target click | [`target_click`] | `start`, `whack` | [`target_click::TargetTimer`] |

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::types::GameId;

pub mod color_interference;
pub mod number_recall;
pub mod pattern;
pub mod reaction;
pub mod spatial_recall;
pub mod target_click;

pub use color_interference::ColorInterferenceGame;
pub use number_recall::NumberRecallGame;
pub use pattern::PatternGame;
pub use reaction::ReactionGame;
pub use spatial_recall::SpatialRecallGame;
pub use target_click::TargetClickGame;

/// A game's final score, to be reported once `hold` has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finish {
    pub score: u8,
    pub hold: Duration,
}

/// Directive returned by every game event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step<T> {
    pub timers: Vec<(Duration, T)>,
    pub finish: Option<Finish>,
}

impl<T> Step<T> {
    /// Nothing to do.
    pub fn wait() -> Self {
        Self {
            timers: Vec::new(),
            finish: None,
        }
    }

    /// Arm one timer.
    pub fn arm(after: Duration, timer: T) -> Self {
        Self::wait().and_arm(after, timer)
    }

    pub fn and_arm(mut self, after: Duration, timer: T) -> Self {
        self.timers.push((after, timer));
        self
    }

    /// Report `score` after showing the result for `hold`.
    pub fn finish(score: u8, hold: Duration) -> Self {
        Self {
            timers: Vec::new(),
            finish: Some(Finish { score, hold }),
        }
    }

    pub fn is_wait(&self) -> bool {
        self.timers.is_empty() && self.finish.is_none()
    }
}

/// Behaviour shared by every mini-game.
pub trait MiniGame {
    /// Payload carried by this game's timers. Use `()` if it has none.
    type Timer: Copy + std::fmt::Debug + Send + 'static;

    const ID: GameId;

    /// Called once when the game becomes the active stage.
    fn begin(&mut self) -> Step<Self::Timer>;

    /// A timer armed by an earlier [`Step`] has fired.
    fn on_timer(&mut self, timer: Self::Timer, now: std::time::Instant) -> Step<Self::Timer>;

    /// The final score, once the game has finished.
    fn score(&self) -> Option<u8>;
}

/// Per-game RNG split off a session-level generator.
pub(crate) fn fork_rng<R: Rng + ?Sized>(rng: &mut R) -> SmallRng {
    SmallRng::seed_from_u64(rng.random())
}
