//! Pattern memory: four of nine cells light up for three seconds, then the
//! player marks the cells they remember.

use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::seq::index::sample;
use rand::Rng;

use super::{fork_rng, MiniGame, Step};
use crate::constants::*;
use crate::scoring::pattern_score;
use crate::types::GameId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternPhase {
    /// Pattern visible; seconds left before it is hidden.
    Memorize { remaining: u32 },
    Recall,
    Result { hits: u32, false_positives: u32, score: u8 },
}

/// One-second memorize countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternTimer;

pub struct PatternGame {
    targets: [bool; PATTERN_CELLS],
    marked: [bool; PATTERN_CELLS],
    phase: PatternPhase,
}

impl PatternGame {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut rng: SmallRng = fork_rng(rng);
        let mut targets = [false; PATTERN_CELLS];
        for idx in sample(&mut rng, PATTERN_CELLS, PATTERN_TARGETS) {
            targets[idx] = true;
        }
        Self {
            targets,
            marked: [false; PATTERN_CELLS],
            phase: PatternPhase::Memorize {
                remaining: PATTERN_MEMORIZE_SECS,
            },
        }
    }

    pub fn phase(&self) -> PatternPhase {
        self.phase
    }

    /// Lit cells. The front end should only show these while memorizing or
    /// after the result is in.
    pub fn targets(&self) -> &[bool; PATTERN_CELLS] {
        &self.targets
    }

    pub fn marked(&self) -> &[bool; PATTERN_CELLS] {
        &self.marked
    }

    /// Flip a cell's mark. Returns `false` if the cell is out of range or the
    /// game is not accepting input.
    pub fn toggle(&mut self, cell: usize) -> bool {
        if self.phase != PatternPhase::Recall || cell >= PATTERN_CELLS {
            return false;
        }
        self.marked[cell] = !self.marked[cell];
        true
    }

    pub fn submit(&mut self) -> Step<PatternTimer> {
        if self.phase != PatternPhase::Recall {
            return Step::wait();
        }
        let mut hits = 0;
        let mut false_positives = 0;
        for (&target, &marked) in self.targets.iter().zip(&self.marked) {
            match (target, marked) {
                (true, true) => hits += 1,
                (false, true) => false_positives += 1,
                _ => {}
            }
        }
        let score = pattern_score(hits, false_positives);
        self.phase = PatternPhase::Result {
            hits,
            false_positives,
            score,
        };
        Step::finish(score, Duration::from_millis(PATTERN_RESULT_HOLD_MS))
    }
}

impl MiniGame for PatternGame {
    type Timer = PatternTimer;
    const ID: GameId = GameId::Pattern;

    fn begin(&mut self) -> Step<PatternTimer> {
        Step::arm(Duration::from_secs(1), PatternTimer)
    }

    fn on_timer(&mut self, _timer: PatternTimer, _now: Instant) -> Step<PatternTimer> {
        match self.phase {
            PatternPhase::Memorize { remaining } if remaining > 1 => {
                self.phase = PatternPhase::Memorize {
                    remaining: remaining - 1,
                };
                Step::arm(Duration::from_secs(1), PatternTimer)
            }
            PatternPhase::Memorize { .. } => {
                self.phase = PatternPhase::Recall;
                Step::wait()
            }
            PatternPhase::Recall | PatternPhase::Result { .. } => Step::wait(),
        }
    }

    fn score(&self) -> Option<u8> {
        match self.phase {
            PatternPhase::Result { score, .. } => Some(score),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn recalling(seed: u64) -> PatternGame {
        let mut g = PatternGame::new(&mut SmallRng::seed_from_u64(seed));
        let mut step = g.begin();
        while let Some(&(_, timer)) = step.timers.first() {
            step = g.on_timer(timer, Instant::now());
        }
        assert_eq!(g.phase(), PatternPhase::Recall);
        g
    }

    #[test]
    fn test_exactly_four_targets() {
        for seed in 0..100 {
            let g = PatternGame::new(&mut SmallRng::seed_from_u64(seed));
            assert_eq!(g.targets().iter().filter(|&&t| t).count(), PATTERN_TARGETS);
        }
    }

    #[test]
    fn test_countdown() {
        let mut g = PatternGame::new(&mut SmallRng::seed_from_u64(1));
        assert!(!g.toggle(0));
        let mut ticks = 0;
        let mut step = g.begin();
        while !step.timers.is_empty() {
            ticks += 1;
            step = g.on_timer(PatternTimer, Instant::now());
        }
        assert_eq!(ticks, PATTERN_MEMORIZE_SECS);
        assert_eq!(g.phase(), PatternPhase::Recall);
    }

    #[test]
    fn test_perfect_recall() {
        let mut g = recalling(3);
        let targets = *g.targets();
        for (cell, _) in targets.iter().enumerate().filter(|(_, &t)| t) {
            assert!(g.toggle(cell));
        }
        let finish = g.submit().finish.unwrap();
        assert_eq!(finish.score, 100);
        assert_eq!(finish.hold, Duration::from_millis(PATTERN_RESULT_HOLD_MS));
    }

    #[test]
    fn test_false_positives_cost_points() {
        let mut g = recalling(4);
        let targets = *g.targets();
        let hit_cells: Vec<usize> = (0..PATTERN_CELLS).filter(|&c| targets[c]).take(3).collect();
        let miss_cell = (0..PATTERN_CELLS).find(|&c| !targets[c]).unwrap();
        for cell in hit_cells {
            g.toggle(cell);
        }
        g.toggle(miss_cell);
        assert_eq!(g.submit().finish.unwrap().score, 60);
        assert_eq!(
            g.phase(),
            PatternPhase::Result {
                hits: 3,
                false_positives: 1,
                score: 60
            }
        );
    }

    #[test]
    fn test_toggle_twice_unmarks() {
        let mut g = recalling(5);
        g.toggle(0);
        g.toggle(0);
        assert!(!g.toggle(PATTERN_CELLS));
        assert_eq!(g.submit().finish.unwrap().score, 0);
    }

    #[test]
    fn test_submit_once() {
        let mut g = recalling(6);
        assert!(g.submit().finish.is_some());
        assert!(g.submit().is_wait());
        assert!(!g.toggle(0));
    }
}
