//! # RateMyBrain: six mini-games and a diagnosis
//!
//! A play session walks a fixed chain of stages:
//!
//! ```text
//! Intro → Reaction → Pattern → NumberRecall → ColorInterference → SpatialRecall → TargetClick → Results
//! ```
//!
//! Each mini-game reports exactly one score in [0, 100]. The [`session::Session`]
//! records it, advances the stage, and at Results the unweighted mean of the six
//! scores is mapped to a brain type by [`diagnosis::classify`].
//!
//! | Layer | Module | Description |
//! |-------|--------|-------------|
//! | Data model | [`types`] | `GameId`, `Stage`, `ScoreRecord`, `SessionState` |
//! | Scoring | [`scoring`] | Per-game score formulas, clamping |
//! | Orchestration | [`session`] | `start` / `complete_game` / `restart` |
//! | Classification | [`diagnosis`] | Brain-type table, averaging, meme choice |
//! | Mini-games | [`minigames`] | Six event-driven state machines emitting [`minigames::Step`] |
//! | Timing | [`timer`] | Scoped, abort-on-drop timers on the tokio runtime |
//! | Sharing | [`share`] | Share text, social links, result-card export |
//! | Front end | [`play`] | Line-oriented terminal UI |
//!
//! ## Ownership
//!
//! There is no ambient state. A `Session` is constructed once per play session
//! and handed by reference to whichever front end drives it; mini-games never
//! see it and only return directives.

pub mod constants;
pub mod diagnosis;
pub mod env_config;
pub mod error;
pub mod minigames;
pub mod play;
pub mod scoring;
pub mod session;
pub mod share;
pub mod timer;
pub mod types;
