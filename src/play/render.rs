//! Text rendering for the terminal front end.
//!
//! Every function returns a `String`; the caller decides where it goes.

use std::fmt::Write;

use crate::constants::*;
use crate::diagnosis::{Diagnosis, Meme};
use crate::minigames::color_interference::{InkColor, Prompt};
use crate::minigames::pattern::{PatternGame, PatternPhase};
use crate::minigames::reaction::ReactionPhase;
use crate::minigames::spatial_recall::{SpatialPhase, SpotState};
use crate::minigames::target_click::{TargetClickGame, TargetPhase};
use crate::minigames::SpatialRecallGame;
use crate::share::{share_text, Platform};
use crate::types::{GameId, ScoreRecord, Stage};

pub const CLEAR: &str = "\x1b[2J\x1b[H";
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const CANVAS_COLS: usize = 40;
const CANVAS_ROWS: usize = 12;

fn ansi(color: InkColor) -> &'static str {
    match color {
        InkColor::Red => "\x1b[1;31m",
        InkColor::Blue => "\x1b[1;34m",
        InkColor::Green => "\x1b[1;32m",
        InkColor::Yellow => "\x1b[1;33m",
    }
}

/// `● ● ○ ○ ○ ○` progress dots for the header.
pub fn progress(stage: Stage) -> String {
    let (done, current) = match stage {
        Stage::Intro => (0, None),
        Stage::Playing(game) => (game.index(), Some(game.index())),
        Stage::Results => (GAME_COUNT, None),
    };
    (0..GAME_COUNT)
        .map(|i| {
            if i < done {
                "●"
            } else if Some(i) == current {
                "◉"
            } else {
                "○"
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn header(stage: Stage) -> String {
    format!("{CLEAR}{BOLD}🧠 RateMyBrain{RESET}   {}\n\n", progress(stage))
}

pub fn intro(meme_url: &str) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "{BOLD}How fast is your brain, really?{RESET}");
    let _ = writeln!(s, "Six tiny games. One brutally honest diagnosis.\n");
    let _ = writeln!(s, "  {meme_url}");
    let _ = writeln!(s, "  {}\n", Meme::Intro.citation());
    let _ = writeln!(s, "Type `restart` at any time to start over, `quit` to leave.");
    let _ = writeln!(s, "Press Enter to start.");
    s
}

pub fn game_title(game: GameId) -> String {
    format!("{BOLD}{}{RESET}\n", game.title())
}

pub fn reaction(phase: ReactionPhase) -> String {
    match phase {
        ReactionPhase::Idle => "Press Enter when the screen says GO!\nPress Enter to begin.\n".into(),
        ReactionPhase::Waiting => "\x1b[1;31mWait for it...\x1b[0m\n".into(),
        ReactionPhase::Ready { .. } => "\x1b[1;32m>>> GO! GO! GO! <<<\x1b[0m\n".into(),
        ReactionPhase::Early => "Too early! Press Enter to try again.\n".into(),
        ReactionPhase::Finished { reaction_ms, score } => {
            format!("{reaction_ms} ms, score {score}/100\n")
        }
    }
}

fn pattern_grid(cells: impl Fn(usize) -> char) -> String {
    let mut s = String::new();
    for row in 0..3 {
        let line: Vec<String> = (0..3).map(|col| format!("[{}]", cells(row * 3 + col))).collect();
        let _ = writeln!(s, "  {}", line.join(" "));
    }
    s
}

pub fn pattern(game: &PatternGame) -> String {
    let targets = game.targets();
    let marked = game.marked();
    match game.phase() {
        PatternPhase::Memorize { remaining } => {
            let grid = pattern_grid(|i| if targets[i] { '#' } else { ' ' });
            format!("Memorize the lit cells! {remaining}...\n\n{grid}")
        }
        PatternPhase::Recall => {
            let grid = pattern_grid(|i| if marked[i] { 'X' } else { char::from(b'1' + i as u8) });
            format!(
                "Which cells were lit?\nType cell numbers to toggle them, empty line to submit.\n\n{grid}"
            )
        }
        PatternPhase::Result {
            hits,
            false_positives,
            score,
        } => {
            let grid = pattern_grid(|i| match (targets[i], marked[i]) {
                (true, true) => '#',
                (true, false) => 'o',
                (false, true) => 'x',
                (false, false) => ' ',
            });
            format!("{grid}\n{hits} hits, {false_positives} wrong, score {score}/100\n")
        }
    }
}

pub fn number_show(number: &str, level: u32) -> String {
    format!("Level {level} / {NUMBER_MAX_LEVEL}\n\n    {BOLD}{number}{RESET}\n")
}

pub fn number_input(level: u32) -> String {
    format!("Level {level} / {NUMBER_MAX_LEVEL}\n\nWhat was the number?\n")
}

pub fn color_prompt(prompt: Prompt, round: u32) -> String {
    let options: Vec<String> = InkColor::ALL
        .iter()
        .map(|c| format!("{}[{}]{}{RESET}", ansi(*c), &c.name()[..1], &c.name()[1..]))
        .collect();
    format!(
        "Type the COLOR of the word, not the text!  Round {round} / {COLOR_ROUNDS}\n\n    {}{}{RESET}\n\n{}\n",
        ansi(prompt.ink),
        prompt.word.name().to_uppercase(),
        options.join("  ")
    )
}

fn canvas(points: impl IntoIterator<Item = (u32, u32, String)>) -> String {
    let mut grid = vec![vec![' '; CANVAS_COLS]; CANVAS_ROWS];
    for (x, y, label) in points {
        let col = (x as usize * CANVAS_COLS / 100).min(CANVAS_COLS - 1);
        let row = (y as usize * CANVAS_ROWS / 100).min(CANVAS_ROWS - 1);
        for (offset, ch) in label.chars().enumerate() {
            if let Some(cell) = grid[row].get_mut(col + offset) {
                *cell = ch;
            }
        }
    }
    let border = format!("+{}+", "-".repeat(CANVAS_COLS));
    let mut s = format!("{border}\n");
    for row in grid {
        let _ = writeln!(s, "|{}|", row.into_iter().collect::<String>());
    }
    let _ = writeln!(s, "{border}");
    s
}

/// `labels[i]` is the letter standing in for spot `i` once numbers are masked.
pub fn spatial(game: &SpatialRecallGame, labels: &[char]) -> String {
    let points = game.spots().iter().zip(labels).filter_map(|(spot, &label)| {
        let text = match spot.state {
            SpotState::Visible => spot.number.to_string(),
            SpotState::Masked => label.to_string(),
            SpotState::Hidden => return None,
        };
        Some((spot.x, spot.y, text))
    });
    let board = canvas(points);
    let hint = match game.phase() {
        SpatialPhase::Memorize => "Memorize the order, then type 1 to begin.".to_string(),
        SpatialPhase::Play { next } => format!("Which letter hides {next}?"),
        SpatialPhase::Lost => "Wrong order! Brain freeze.".to_string(),
        SpatialPhase::Won => "Perfect recall!".to_string(),
    };
    format!("{board}{hint}\n")
}

pub fn target(game: &TargetClickGame) -> String {
    match game.phase() {
        TargetPhase::Ready => {
            "Ghosts appear for 10 seconds. Type a ghost's number to bust it.\nPress Enter to start.\n".into()
        }
        TargetPhase::Active { seconds_left } => {
            let points = game.ghosts().iter().map(|g| (g.x, g.y, format!("@{}", g.id)));
            format!(
                "Time: {seconds_left}s   Busted: {}\n{}",
                game.hits(),
                canvas(points)
            )
        }
        TargetPhase::Over { score } => format!("Time's up! {} ghosts, score {score}/100\n", game.hits()),
    }
}

pub fn results(diagnosis: &Diagnosis, scores: &ScoreRecord, meme_url: &str, app_url: &str) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "{BOLD}Your Diagnosis{RESET}\n");
    let _ = writeln!(
        s,
        "  {BOLD}{}{RESET}  ({})",
        diagnosis.brain_type.label, diagnosis.brain_type.accent
    );
    let _ = writeln!(s, "  \"{}\"\n", diagnosis.brain_type.description);
    let _ = writeln!(s, "  Brain power: {}%\n", diagnosis.average);
    for (game, score) in scores.iter() {
        let _ = writeln!(s, "  {:<10} {:>3}/100", game.skill(), score);
    }
    let _ = writeln!(s, "\n  {meme_url}");
    let _ = writeln!(s, "  {}\n", diagnosis.meme.citation());

    let text = share_text(diagnosis, app_url);
    let _ = writeln!(s, "Share: {text}");
    for platform in Platform::ALL {
        let _ = writeln!(s, "  {:<12} {}", platform.name(), platform.share_url(&text, app_url));
    }
    let _ = writeln!(s, "\n[r] play again   [s] save result card   [q] quit");
    s
}
