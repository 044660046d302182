//! Color chaos: name the ink colour of a colour word, not the word itself.

use std::fmt;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::Rng;

use super::{fork_rng, MiniGame, Step};
use crate::constants::COLOR_ROUNDS;
use crate::scoring::color_interference_score;
use crate::types::GameId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InkColor {
    Red,
    Blue,
    Green,
    Yellow,
}

impl InkColor {
    pub const ALL: [InkColor; 4] = [InkColor::Red, InkColor::Blue, InkColor::Green, InkColor::Yellow];

    pub fn name(self) -> &'static str {
        match self {
            InkColor::Red => "Red",
            InkColor::Blue => "Blue",
            InkColor::Green => "Green",
            InkColor::Yellow => "Yellow",
        }
    }

    /// Accepts a colour name or its first letter, case-insensitively.
    pub fn parse(input: &str) -> Option<InkColor> {
        let input = input.trim().to_ascii_lowercase();
        InkColor::ALL.into_iter().find(|c| {
            let name = c.name().to_ascii_lowercase();
            input == name || (input.len() == 1 && name.starts_with(&input))
        })
    }

    fn random<R: Rng + ?Sized>(rng: &mut R) -> InkColor {
        InkColor::ALL[rng.random_range(0..InkColor::ALL.len())]
    }
}

impl fmt::Display for InkColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One prompt: `word` is printed in `ink`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prompt {
    pub word: InkColor,
    pub ink: InkColor,
}

pub struct ColorInterferenceGame {
    rng: SmallRng,
    /// 1-based number of the prompt on screen.
    round: u32,
    correct: u32,
    prompt: Prompt,
    score: Option<u8>,
}

impl ColorInterferenceGame {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut game = Self {
            rng: fork_rng(rng),
            round: 0,
            correct: 0,
            prompt: Prompt {
                word: InkColor::Red,
                ink: InkColor::Red,
            },
            score: None,
        };
        game.next_prompt();
        game
    }

    fn next_prompt(&mut self) {
        self.prompt = Prompt {
            word: InkColor::random(&mut self.rng),
            ink: InkColor::random(&mut self.rng),
        };
        self.round += 1;
    }

    pub fn prompt(&self) -> Prompt {
        self.prompt
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn answer(&mut self, color: InkColor) -> Step<()> {
        if self.score.is_some() {
            return Step::wait();
        }
        if color == self.prompt.ink {
            self.correct += 1;
        }
        if self.round >= COLOR_ROUNDS {
            let score = color_interference_score(self.correct, COLOR_ROUNDS);
            self.score = Some(score);
            return Step::finish(score, std::time::Duration::ZERO);
        }
        self.next_prompt();
        Step::wait()
    }
}

impl MiniGame for ColorInterferenceGame {
    type Timer = ();
    const ID: GameId = GameId::ColorInterference;

    fn begin(&mut self) -> Step<()> {
        Step::wait()
    }

    fn on_timer(&mut self, _timer: (), _now: Instant) -> Step<()> {
        Step::wait()
    }

    fn score(&self) -> Option<u8> {
        self.score
    }
}
