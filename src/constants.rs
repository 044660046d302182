//! Game constants: score bounds, timings, grid sizes and point values.
//!
//! Millisecond values are plain `u64` so they can be fed straight into
//! `Duration::from_millis`.

/// Number of mini-games in a session.
pub const GAME_COUNT: usize = 6;

/// Upper bound of every per-game score and of the session average.
pub const MAX_SCORE: u8 = 100;

// ── Reaction ────────────────────────────────────────────────────────

/// Shortest wait before the go-signal.
pub const REACTION_MIN_DELAY_MS: u64 = 1500;

/// Width of the random window added to [`REACTION_MIN_DELAY_MS`] (exclusive).
pub const REACTION_DELAY_SPREAD_MS: u64 = 2000;

/// Reaction time that still earns a perfect score.
pub const REACTION_BASELINE_MS: f64 = 200.0;

/// Every this many ms slower than the baseline costs one point.
pub const REACTION_MS_PER_POINT: f64 = 4.0;

/// How long the measured time stays on screen before the score is reported.
pub const REACTION_RESULT_HOLD_MS: u64 = 2000;

// ── Pattern ─────────────────────────────────────────────────────────

/// Cells in the 3×3 grid.
pub const PATTERN_CELLS: usize = 9;

/// Lit cells the player must memorize.
pub const PATTERN_TARGETS: usize = 4;

/// Seconds the lit pattern stays visible.
pub const PATTERN_MEMORIZE_SECS: u32 = 3;

pub const PATTERN_HIT_POINTS: i32 = 25;
pub const PATTERN_FALSE_POSITIVE_PENALTY: i32 = 15;
pub const PATTERN_RESULT_HOLD_MS: u64 = 2000;

// ── Number recall ───────────────────────────────────────────────────

/// Clearing this level without a mistake scores [`MAX_SCORE`].
pub const NUMBER_MAX_LEVEL: u32 = 4;

/// Level L shows L + this many digits.
pub const NUMBER_DIGIT_OFFSET: u32 = 2;

pub const NUMBER_SHOW_BASE_MS: u64 = 1000;
pub const NUMBER_SHOW_PER_LEVEL_MS: u64 = 500;

/// Points banked per fully cleared level.
pub const NUMBER_POINTS_PER_LEVEL: u32 = 25;

/// Pause between a correct answer and the next number.
pub const NUMBER_FEEDBACK_MS: u64 = 1000;

// ── Color interference ──────────────────────────────────────────────

pub const COLOR_ROUNDS: u32 = 5;

// ── Spatial recall ──────────────────────────────────────────────────

pub const SPATIAL_SPOTS: usize = 5;

/// Spot coordinates are drawn from `[SPATIAL_MIN_COORD, SPATIAL_MIN_COORD + SPATIAL_COORD_SPAN)`.
pub const SPATIAL_MIN_COORD: u32 = 10;
pub const SPATIAL_COORD_SPAN: u32 = 80;

/// Two spots collide when they are closer than this on both axes.
pub const SPATIAL_MIN_SEPARATION: u32 = 15;

pub const SPATIAL_LOSS_HOLD_MS: u64 = 1500;

// ── Target click ────────────────────────────────────────────────────

pub const TARGET_SESSION_SECS: u32 = 10;
pub const TARGET_SPAWN_INTERVAL_MS: u64 = 800;
pub const TARGET_POINTS_PER_HIT: u32 = 10;

/// Ghost coordinates share the spatial-recall playfield bounds.
pub const TARGET_MIN_COORD: u32 = 10;
pub const TARGET_COORD_SPAN: u32 = 80;

// ── Results ─────────────────────────────────────────────────────────

/// Averages strictly above this get the high-score meme.
pub const MEME_HIGH_ABOVE: u8 = 75;

/// Averages strictly below this get the low-score meme.
pub const MEME_LOW_BELOW: u8 = 40;

/// App link used in share text when nothing else is configured.
pub const DEFAULT_SHARE_URL: &str = "https://ratemybrain.app";
