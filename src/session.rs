//! Session orchestrator: the only owner of [`SessionState`].
//!
//! Transitions form a single chain; `restart` is the only way back:
//!
//! ```text
//! Intro --start--> Reaction --complete--> ... --complete--> TargetClick --complete--> Results
//!   ^                                                                                   |
//!   +--------------------------------- restart (from any stage) ------------------------+
//! ```
//!
//! Rejected calls return a [`SessionError`] and leave the state exactly as it
//! was, so a late or duplicated completion can never be credited to the wrong
//! game.

use tracing::{debug, info, warn};

use crate::diagnosis::Diagnosis;
use crate::error::SessionError;
use crate::scoring::clamp_score;
use crate::types::{GameId, ScoreRecord, SessionState, Stage};

#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    /// A fresh session at Intro with all scores at 0.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn stage(&self) -> Stage {
        self.state.stage
    }

    pub fn scores(&self) -> &ScoreRecord {
        &self.state.scores
    }

    /// Intro → first game.
    pub fn start(&mut self) -> Result<Stage, SessionError> {
        if self.state.stage != Stage::Intro {
            warn!(stage = %self.state.stage, "start ignored: session already running");
            return Err(SessionError::NotAtIntro {
                stage: self.state.stage,
            });
        }
        self.state.stage = Stage::Playing(GameId::FIRST);
        info!("session started");
        Ok(self.state.stage)
    }

    /// Record `score` for `game` and advance to the next stage.
    ///
    /// `game` must be the game currently being played. Scores outside
    /// [0, 100] are clamped.
    pub fn complete_game(&mut self, game: GameId, score: i64) -> Result<Stage, SessionError> {
        if self.state.stage != Stage::Playing(game) {
            warn!(
                stage = %self.state.stage,
                reported = %game,
                "completion rejected: out of sequence"
            );
            return Err(SessionError::OutOfSequence {
                expected: self.state.stage,
                reported: game,
            });
        }

        let clamped = clamp_score(score);
        if clamped as i64 != score {
            warn!(%game, score, clamped, "score out of range, clamped");
        }

        self.state.scores.set(game, clamped);
        self.state.stage = Stage::after(game);
        debug!(%game, score = clamped, next = %self.state.stage, "game completed");

        if self.state.stage == Stage::Results {
            let diagnosis = Diagnosis::from_scores(&self.state.scores);
            info!(
                average = diagnosis.average,
                brain_type = diagnosis.brain_type.label,
                "session finished"
            );
        }
        Ok(self.state.stage)
    }

    /// Back to Intro with every score zeroed. Valid from any stage.
    pub fn restart(&mut self) {
        debug!(from = %self.state.stage, "session restarted");
        self.state = SessionState::default();
    }

    /// The diagnosis, once every game has reported.
    pub fn diagnosis(&self) -> Option<Diagnosis> {
        match self.state.stage {
            Stage::Results => Some(Diagnosis::from_scores(&self.state.scores)),
            Stage::Intro | Stage::Playing(_) => None,
        }
    }
}
