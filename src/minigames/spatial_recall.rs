//! Chimp test: five numbered spots, click them in order from memory.
//!
//! All numbers are visible until spot 1 is clicked; from then on the
//! remaining spots are masked. One wrong click loses the game.

use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::Rng;

use super::{fork_rng, MiniGame, Step};
use crate::constants::*;
use crate::scoring::spatial_recall_score;
use crate::types::GameId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpotState {
    Visible,
    Masked,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spot {
    /// 1-based position in the click order.
    pub number: u32,
    /// Percent of the playfield width.
    pub x: u32,
    /// Percent of the playfield height.
    pub y: u32,
    pub state: SpotState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpatialPhase {
    Memorize,
    Play { next: u32 },
    Lost,
    Won,
}

pub struct SpatialRecallGame {
    spots: Vec<Spot>,
    phase: SpatialPhase,
}

fn collides(a: (u32, u32), b: &Spot) -> bool {
    a.0.abs_diff(b.x) < SPATIAL_MIN_SEPARATION && a.1.abs_diff(b.y) < SPATIAL_MIN_SEPARATION
}

impl SpatialRecallGame {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut rng: SmallRng = fork_rng(rng);
        let range = SPATIAL_MIN_COORD..SPATIAL_MIN_COORD + SPATIAL_COORD_SPAN;
        let mut spots: Vec<Spot> = Vec::with_capacity(SPATIAL_SPOTS);
        while spots.len() < SPATIAL_SPOTS {
            let candidate = (rng.random_range(range.clone()), rng.random_range(range.clone()));
            if spots.iter().any(|s| collides(candidate, s)) {
                continue;
            }
            spots.push(Spot {
                number: spots.len() as u32 + 1,
                x: candidate.0,
                y: candidate.1,
                state: SpotState::Visible,
            });
        }
        Self {
            spots,
            phase: SpatialPhase::Memorize,
        }
    }

    pub fn spots(&self) -> &[Spot] {
        &self.spots
    }

    pub fn phase(&self) -> SpatialPhase {
        self.phase
    }

    fn set_all(&mut self, f: impl Fn(&Spot) -> SpotState) {
        for spot in &mut self.spots {
            spot.state = f(spot);
        }
    }

    /// Click the spot numbered `number`. Unknown numbers are ignored.
    pub fn click(&mut self, number: u32) -> Step<()> {
        if !(1..=SPATIAL_SPOTS as u32).contains(&number) {
            return Step::wait();
        }
        // Cleared spots are off the board.
        if self.spots[number as usize - 1].state == SpotState::Hidden {
            return Step::wait();
        }
        match self.phase {
            SpatialPhase::Memorize if number == 1 => {
                self.set_all(|s| {
                    if s.number == 1 {
                        SpotState::Hidden
                    } else {
                        SpotState::Masked
                    }
                });
                self.phase = SpatialPhase::Play { next: 2 };
                Step::wait()
            }
            SpatialPhase::Play { next } if number == next => {
                self.set_all(|s| if s.number == number { SpotState::Hidden } else { s.state });
                if next == SPATIAL_SPOTS as u32 {
                    self.phase = SpatialPhase::Won;
                    Step::finish(spatial_recall_score(true), Duration::ZERO)
                } else {
                    self.phase = SpatialPhase::Play { next: next + 1 };
                    Step::wait()
                }
            }
            SpatialPhase::Play { .. } => {
                self.set_all(|_| SpotState::Visible);
                self.phase = SpatialPhase::Lost;
                Step::finish(
                    spatial_recall_score(false),
                    Duration::from_millis(SPATIAL_LOSS_HOLD_MS),
                )
            }
            SpatialPhase::Memorize | SpatialPhase::Lost | SpatialPhase::Won => Step::wait(),
        }
    }
}

impl MiniGame for SpatialRecallGame {
    type Timer = ();
    const ID: GameId = GameId::SpatialRecall;

    fn begin(&mut self) -> Step<()> {
        Step::wait()
    }

    fn on_timer(&mut self, _timer: (), _now: Instant) -> Step<()> {
        Step::wait()
    }

    fn score(&self) -> Option<u8> {
        match self.phase {
            SpatialPhase::Won => Some(spatial_recall_score(true)),
            SpatialPhase::Lost => Some(spatial_recall_score(false)),
            SpatialPhase::Memorize | SpatialPhase::Play { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn game(seed: u64) -> SpatialRecallGame {
        SpatialRecallGame::new(&mut SmallRng::seed_from_u64(seed))
    }

    #[test]
    fn test_spots_in_bounds_and_apart() {
        for seed in 0..200 {
            let g = game(seed);
            assert_eq!(g.spots().len(), SPATIAL_SPOTS);
            for (i, a) in g.spots().iter().enumerate() {
                assert_eq!(a.number, i as u32 + 1);
                assert!(a.x >= SPATIAL_MIN_COORD && a.x < SPATIAL_MIN_COORD + SPATIAL_COORD_SPAN);
                assert!(a.y >= SPATIAL_MIN_COORD && a.y < SPATIAL_MIN_COORD + SPATIAL_COORD_SPAN);
                for b in &g.spots()[i + 1..] {
                    assert!(!collides((a.x, a.y), b), "seed {seed}: {a:?} vs {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_in_order_wins() {
        let mut g = game(1);
        for n in 1..SPATIAL_SPOTS as u32 {
            assert!(g.click(n).is_wait());
        }
        let finish = g.click(SPATIAL_SPOTS as u32).finish.unwrap();
        assert_eq!(finish.score, 100);
        assert_eq!(finish.hold, Duration::ZERO);
        assert!(g.spots().iter().all(|s| s.state == SpotState::Hidden));
    }

    #[test]
    fn test_first_click_masks_the_rest() {
        let mut g = game(2);
        assert!(g.click(3).is_wait());
        assert_eq!(g.phase(), SpatialPhase::Memorize);
        g.click(1);
        assert_eq!(g.phase(), SpatialPhase::Play { next: 2 });
        assert_eq!(g.spots()[0].state, SpotState::Hidden);
        assert!(g.spots()[1..].iter().all(|s| s.state == SpotState::Masked));
    }

    #[test]
    fn test_wrong_click_loses() {
        let mut g = game(3);
        g.click(1);
        g.click(2);
        let finish = g.click(4).finish.unwrap();
        assert_eq!(finish.score, 0);
        assert_eq!(finish.hold, Duration::from_millis(SPATIAL_LOSS_HOLD_MS));
        assert!(g.spots().iter().all(|s| s.state == SpotState::Visible));
        assert!(g.click(3).is_wait());
        assert_eq!(g.score(), Some(0));
    }

    #[test]
    fn test_cleared_spot_is_not_clickable() {
        let mut g = game(4);
        g.click(1);
        g.click(2);
        assert!(g.click(2).is_wait());
        assert!(g.click(1).is_wait());
        assert_eq!(g.phase(), SpatialPhase::Play { next: 3 });
        assert_eq!(g.score(), None);
    }

    #[test]
    fn test_out_of_range_ignored() {
        let mut g = game(5);
        g.click(1);
        assert!(g.click(0).is_wait());
        assert!(g.click(9).is_wait());
        assert_eq!(g.phase(), SpatialPhase::Play { next: 2 });
    }
}
