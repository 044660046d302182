//! Core data model: games, stages, the score record and the session state.
//!
//! [`GameId::ALL`] fixes the play order. A [`Stage`] is either one of the two
//! sentinels (`Intro`, `Results`) or the game currently being played, so a
//! front end can `match` on it exhaustively instead of comparing strings.

use std::fmt;

use serde::Serialize;

use crate::constants::GAME_COUNT;

/// One of the six mini-games. Declaration order is play order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameId {
    Reaction,
    Pattern,
    NumberRecall,
    ColorInterference,
    SpatialRecall,
    TargetClick,
}

impl GameId {
    pub const ALL: [GameId; GAME_COUNT] = [
        GameId::Reaction,
        GameId::Pattern,
        GameId::NumberRecall,
        GameId::ColorInterference,
        GameId::SpatialRecall,
        GameId::TargetClick,
    ];

    pub const FIRST: GameId = GameId::Reaction;

    /// Position in play order (0-based).
    pub fn index(self) -> usize {
        self as usize
    }

    /// The game played after this one, `None` for the last.
    pub fn next(self) -> Option<GameId> {
        GameId::ALL.get(self.index() + 1).copied()
    }

    /// Stable lowercase key, used in exported cards and logs.
    pub fn key(self) -> &'static str {
        match self {
            GameId::Reaction => "reaction",
            GameId::Pattern => "pattern",
            GameId::NumberRecall => "number_recall",
            GameId::ColorInterference => "color_interference",
            GameId::SpatialRecall => "spatial_recall",
            GameId::TargetClick => "target_click",
        }
    }

    /// Skill label shown on the results screen.
    pub fn skill(self) -> &'static str {
        match self {
            GameId::Reaction => "Reflexes",
            GameId::Pattern => "Patterns",
            GameId::NumberRecall => "Memory",
            GameId::ColorInterference => "Focus",
            GameId::SpatialRecall => "Spatial",
            GameId::TargetClick => "Precision",
        }
    }

    /// Title shown above the game.
    pub fn title(self) -> &'static str {
        match self {
            GameId::Reaction => "Reaction Test",
            GameId::Pattern => "Pattern Memory",
            GameId::NumberRecall => "Number Recall",
            GameId::ColorInterference => "Color Chaos",
            GameId::SpatialRecall => "Chimp Test",
            GameId::TargetClick => "Ghost Buster",
        }
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Current position of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "stage", content = "game")]
pub enum Stage {
    Intro,
    Playing(GameId),
    Results,
}

impl Stage {
    /// The stage that follows a completed `game`.
    pub fn after(game: GameId) -> Stage {
        match game.next() {
            Some(next) => Stage::Playing(next),
            None => Stage::Results,
        }
    }

    pub fn game(self) -> Option<GameId> {
        match self {
            Stage::Playing(game) => Some(game),
            Stage::Intro | Stage::Results => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Intro => f.write_str("intro"),
            Stage::Playing(game) => write!(f, "{game}"),
            Stage::Results => f.write_str("results"),
        }
    }
}

/// Per-game scores for one session. Every game always has an entry; unplayed
/// games hold 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreRecord {
    scores: [u8; GAME_COUNT],
}

impl ScoreRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, game: GameId) -> u8 {
        self.scores[game.index()]
    }

    /// Overwrite one entry. Callers are expected to have clamped `score`.
    pub(crate) fn set(&mut self, game: GameId, score: u8) {
        self.scores[game.index()] = score;
    }

    pub fn total(&self) -> u32 {
        self.scores.iter().map(|&s| s as u32).sum()
    }

    /// `(game, score)` pairs in play order.
    pub fn iter(&self) -> impl Iterator<Item = (GameId, u8)> + '_ {
        GameId::ALL.iter().map(move |&g| (g, self.get(g)))
    }
}

impl FromIterator<(GameId, u8)> for ScoreRecord {
    fn from_iter<I: IntoIterator<Item = (GameId, u8)>>(iter: I) -> Self {
        let mut record = ScoreRecord::new();
        for (game, score) in iter {
            record.set(game, score.min(crate::constants::MAX_SCORE));
        }
        record
    }
}

impl Serialize for ScoreRecord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(GAME_COUNT))?;
        for (game, score) in self.iter() {
            map.serialize_entry(game.key(), &score)?;
        }
        map.end()
    }
}

/// Everything a session owns: where it is and what has been scored so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub stage: Stage,
    pub scores: ScoreRecord,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            stage: Stage::Intro,
            scores: ScoreRecord::new(),
        }
    }
}
