//! Number recall: memorize a number, type it back, get a longer one.
//!
//! Level L shows an (L + 2)-digit number for `1000 + 500 * L` ms. Clearing
//! level 4 is a perfect score; the first wrong answer ends the game with 25
//! points per level already cleared.

use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::Rng;
use tracing::debug;

use super::{fork_rng, MiniGame, Step};
use crate::constants::*;
use crate::scoring::number_recall_score;
use crate::types::GameId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberPhase {
    Show,
    Input,
    /// Correct answer acknowledged; next level follows shortly.
    Feedback,
    Done { score: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberTimer {
    /// Hide the number shown at `level`.
    Hide { level: u32 },
    NextLevel,
}

pub struct NumberRecallGame {
    rng: SmallRng,
    level: u32,
    number: String,
    phase: NumberPhase,
}

/// A uniformly random number with exactly `digits` digits and no leading zero.
fn random_number<R: Rng + ?Sized>(rng: &mut R, digits: u32) -> String {
    let low = 10u64.pow(digits - 1);
    let high = 10u64.pow(digits);
    rng.random_range(low..high).to_string()
}

pub fn digits_for_level(level: u32) -> u32 {
    level + NUMBER_DIGIT_OFFSET
}

pub fn show_time_for_level(level: u32) -> Duration {
    Duration::from_millis(NUMBER_SHOW_BASE_MS + NUMBER_SHOW_PER_LEVEL_MS * level as u64)
}

impl NumberRecallGame {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            rng: fork_rng(rng),
            level: 1,
            number: String::new(),
            phase: NumberPhase::Show,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn phase(&self) -> &NumberPhase {
        &self.phase
    }

    /// The number to memorize; only meaningful while [`NumberPhase::Show`].
    pub fn number(&self) -> &str {
        &self.number
    }

    fn show(&mut self) -> Step<NumberTimer> {
        self.number = random_number(&mut self.rng, digits_for_level(self.level));
        self.phase = NumberPhase::Show;
        debug!(level = self.level, digits = self.number.len(), "number shown");
        Step::arm(
            show_time_for_level(self.level),
            NumberTimer::Hide { level: self.level },
        )
    }

    pub fn submit(&mut self, guess: &str) -> Step<NumberTimer> {
        if self.phase != NumberPhase::Input {
            return Step::wait();
        }
        if guess.trim() == self.number {
            if self.level >= NUMBER_MAX_LEVEL {
                return self.done(number_recall_score(NUMBER_MAX_LEVEL));
            }
            self.phase = NumberPhase::Feedback;
            Step::arm(
                Duration::from_millis(NUMBER_FEEDBACK_MS),
                NumberTimer::NextLevel,
            )
        } else {
            self.done(number_recall_score(self.level - 1))
        }
    }

    fn done(&mut self, score: u8) -> Step<NumberTimer> {
        self.phase = NumberPhase::Done { score };
        Step::finish(score, Duration::ZERO)
    }
}

impl MiniGame for NumberRecallGame {
    type Timer = NumberTimer;
    const ID: GameId = GameId::NumberRecall;

    fn begin(&mut self) -> Step<NumberTimer> {
        self.show()
    }

    fn on_timer(&mut self, timer: NumberTimer, _now: Instant) -> Step<NumberTimer> {
        match timer {
            NumberTimer::Hide { level } if self.phase == NumberPhase::Show && level == self.level => {
                self.phase = NumberPhase::Input;
                Step::wait()
            }
            NumberTimer::NextLevel if self.phase == NumberPhase::Feedback => {
                self.level += 1;
                self.show()
            }
            _ => Step::wait(),
        }
    }

    fn score(&self) -> Option<u8> {
        match self.phase {
            NumberPhase::Done { score } => Some(score),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn game(seed: u64) -> (NumberRecallGame, Step<NumberTimer>) {
        let mut g = NumberRecallGame::new(&mut SmallRng::seed_from_u64(seed));
        let step = g.begin();
        (g, step)
    }

    fn hide(g: &mut NumberRecallGame) {
        let level = g.level();
        g.on_timer(NumberTimer::Hide { level }, Instant::now());
        assert_eq!(*g.phase(), NumberPhase::Input);
    }

    #[test]
    fn test_digit_count_and_show_time() {
        let (g, step) = game(11);
        assert_eq!(g.number().len(), 3);
        assert!(!g.number().starts_with('0'));
        assert_eq!(step.timers, vec![(Duration::from_millis(1500), NumberTimer::Hide { level: 1 })]);
        assert_eq!(show_time_for_level(4), Duration::from_millis(3000));
    }

    #[test]
    fn test_clear_all_levels() {
        let (mut g, _) = game(12);
        for level in 1..NUMBER_MAX_LEVEL {
            assert_eq!(g.number().len() as u32, digits_for_level(level));
            hide(&mut g);
            let answer = g.number().to_string();
            let step = g.submit(&format!(" {answer}\n"));
            assert_eq!(step.timers, vec![(Duration::from_millis(NUMBER_FEEDBACK_MS), NumberTimer::NextLevel)]);
            g.on_timer(NumberTimer::NextLevel, Instant::now());
        }
        assert_eq!(g.level(), NUMBER_MAX_LEVEL);
        assert_eq!(g.number().len(), 6);
        hide(&mut g);
        let answer = g.number().to_string();
        let finish = g.submit(&answer).finish.unwrap();
        assert_eq!(finish.score, 100);
        assert_eq!(finish.hold, Duration::ZERO);
    }

    #[test]
    fn test_fail_at_level_three() {
        let (mut g, _) = game(13);
        for _ in 1..3 {
            hide(&mut g);
            let answer = g.number().to_string();
            g.submit(&answer);
            g.on_timer(NumberTimer::NextLevel, Instant::now());
        }
        assert_eq!(g.level(), 3);
        hide(&mut g);
        assert_eq!(g.submit("nope").finish.unwrap().score, 50);
        assert_eq!(g.score(), Some(50));
    }

    #[test]
    fn test_fail_first_level_scores_zero() {
        let (mut g, _) = game(14);
        hide(&mut g);
        assert_eq!(g.submit("").finish.unwrap().score, 0);
        assert!(g.submit("123").is_wait());
    }

    #[test]
    fn test_input_ignored_while_showing() {
        let (mut g, _) = game(15);
        let answer = g.number().to_string();
        assert!(g.submit(&answer).is_wait());
        assert_eq!(*g.phase(), NumberPhase::Show);
    }

    #[test]
    fn test_stale_hide_ignored() {
        let (mut g, _) = game(16);
        hide(&mut g);
        let answer = g.number().to_string();
        g.submit(&answer);
        g.on_timer(NumberTimer::NextLevel, Instant::now());
        g.on_timer(NumberTimer::Hide { level: 1 }, Instant::now());
        assert_eq!(*g.phase(), NumberPhase::Show);
    }
}
