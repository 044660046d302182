//! Terminal front end: drives a [`Session`] from stdin lines and game timers.
//!
//! One task owns the [`Player`]. Stdin lines and timer deliveries are merged
//! with `tokio::select!`, and each is handled to completion before the next,
//! so no state is shared between tasks.
//!
//! Every stage change bumps the epoch and replaces the [`TimerScope`]; the old
//! scope is dropped, aborting its timers, and any delivery from it that was
//! already queued is discarded because its epoch no longer matches.

use std::io::{self, Write};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, warn};

use crate::constants::SPATIAL_SPOTS;
use crate::diagnosis::Meme;
use crate::env_config::Config;
use crate::minigames::color_interference::InkColor;
use crate::minigames::number_recall::{NumberPhase, NumberTimer};
use crate::minigames::pattern::{PatternPhase, PatternTimer};
use crate::minigames::reaction::{ReactionPhase, ReactionTimer};
use crate::minigames::spatial_recall::{SpatialPhase, SpotState};
use crate::minigames::target_click::{TargetPhase, TargetTimer};
use crate::minigames::{
    ColorInterferenceGame, MiniGame, NumberRecallGame, PatternGame, ReactionGame,
    SpatialRecallGame, Step, TargetClickGame,
};
use crate::session::Session;
use crate::share::export_session;
use crate::timer::{Stamped, TimerScope};
use crate::types::{GameId, Stage};

pub mod render;

/// Timer payloads of every game, plus the delayed score report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameTimer {
    Reaction(ReactionTimer),
    Pattern(PatternTimer),
    Number(NumberTimer),
    Target(TargetTimer),
    /// Result hold elapsed: hand the score to the session.
    Report,
}

/// The game being played, one variant per [`GameId`].
pub enum ActiveGame {
    Reaction(ReactionGame),
    Pattern(PatternGame),
    NumberRecall(NumberRecallGame),
    ColorInterference(ColorInterferenceGame),
    /// Spot letters used once the numbers are masked, indexed like the spots.
    SpatialRecall(SpatialRecallGame, Vec<char>),
    TargetClick(TargetClickGame),
}

impl ActiveGame {
    fn new(game: GameId, rng: &mut SmallRng) -> Self {
        match game {
            GameId::Reaction => ActiveGame::Reaction(ReactionGame::new(rng)),
            GameId::Pattern => ActiveGame::Pattern(PatternGame::new(rng)),
            GameId::NumberRecall => ActiveGame::NumberRecall(NumberRecallGame::new(rng)),
            GameId::ColorInterference => {
                ActiveGame::ColorInterference(ColorInterferenceGame::new(rng))
            }
            GameId::SpatialRecall => {
                let mut labels: Vec<char> = ('A'..='Z').take(SPATIAL_SPOTS).collect();
                labels.shuffle(rng);
                ActiveGame::SpatialRecall(SpatialRecallGame::new(rng), labels)
            }
            GameId::TargetClick => ActiveGame::TargetClick(TargetClickGame::new(rng)),
        }
    }

    pub fn id(&self) -> GameId {
        match self {
            ActiveGame::Reaction(_) => ReactionGame::ID,
            ActiveGame::Pattern(_) => PatternGame::ID,
            ActiveGame::NumberRecall(_) => NumberRecallGame::ID,
            ActiveGame::ColorInterference(_) => ColorInterferenceGame::ID,
            ActiveGame::SpatialRecall(..) => SpatialRecallGame::ID,
            ActiveGame::TargetClick(_) => TargetClickGame::ID,
        }
    }

    /// Final score once the game has finished.
    pub fn score(&self) -> Option<u8> {
        match self {
            ActiveGame::Reaction(g) => g.score(),
            ActiveGame::Pattern(g) => g.score(),
            ActiveGame::NumberRecall(g) => g.score(),
            ActiveGame::ColorInterference(g) => g.score(),
            ActiveGame::SpatialRecall(g, _) => g.score(),
            ActiveGame::TargetClick(g) => g.score(),
        }
    }

    fn render(&self) -> String {
        match self {
            ActiveGame::Reaction(g) => render::reaction(g.phase()),
            ActiveGame::Pattern(g) => render::pattern(g),
            ActiveGame::NumberRecall(g) => match g.phase() {
                NumberPhase::Show => render::number_show(g.number(), g.level()),
                NumberPhase::Input => render::number_input(g.level()),
                NumberPhase::Feedback => "Correct!\n".to_string(),
                NumberPhase::Done { score } => format!("The number was {}, score {score}/100\n", g.number()),
            },
            ActiveGame::ColorInterference(g) => render::color_prompt(g.prompt(), g.round()),
            ActiveGame::SpatialRecall(g, labels) => render::spatial(g, labels),
            ActiveGame::TargetClick(g) => render::target(g),
        }
    }
}

/// What the caller should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A game in progress together with the timers it armed.
struct Round {
    game: ActiveGame,
    timers: TimerScope<GameTimer>,
    /// Set once the game produced its final score.
    reported: bool,
}

pub struct Player<W: Write> {
    session: Session,
    config: Config,
    rng: SmallRng,
    out: W,
    timer_tx: UnboundedSender<Stamped<GameTimer>>,
    epoch: u64,
    round: Option<Round>,
}

fn wrap<T>(step: Step<T>, f: impl Fn(T) -> GameTimer) -> Step<GameTimer> {
    Step {
        timers: step.timers.into_iter().map(|(d, t)| (d, f(t))).collect(),
        finish: step.finish,
    }
}

impl<W: Write> Player<W> {
    pub fn new(config: Config, out: W, timer_tx: UnboundedSender<Stamped<GameTimer>>) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self {
            session: Session::new(),
            config,
            rng,
            out,
            timer_tx,
            epoch: 0,
            round: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn active(&self) -> Option<&ActiveGame> {
        self.round.as_ref().map(|r| &r.game)
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Redraw the whole screen for the current stage.
    pub fn render(&mut self) -> io::Result<()> {
        let stage = self.session.stage();
        let mut screen = render::header(stage);
        match stage {
            Stage::Intro => screen.push_str(&render::intro(Meme::Intro.display_url(meme_loadable))),
            Stage::Playing(game) => {
                screen.push_str(&render::game_title(game));
                if let Some(round) = &self.round {
                    screen.push_str(&round.game.render());
                }
            }
            Stage::Results => {
                if let Some(diagnosis) = self.session.diagnosis() {
                    screen.push_str(&render::results(
                        &diagnosis,
                        self.session.scores(),
                        diagnosis.meme.display_url(meme_loadable),
                        &self.config.share_url,
                    ));
                }
            }
        }
        self.out.write_all(screen.as_bytes())?;
        self.out.flush()
    }

    fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{message}")?;
        self.out.flush()
    }

    /// Tear down the old round and set up whatever the session's stage needs.
    fn enter_stage(&mut self) -> io::Result<()> {
        self.epoch += 1;
        self.round = None;
        let stage = self.session.stage();
        debug!(%stage, epoch = self.epoch, "entering stage");

        if let Stage::Playing(game) = stage {
            let mut active = ActiveGame::new(game, &mut self.rng);
            let step = match &mut active {
                ActiveGame::Reaction(g) => wrap(g.begin(), GameTimer::Reaction),
                ActiveGame::Pattern(g) => wrap(g.begin(), GameTimer::Pattern),
                ActiveGame::NumberRecall(g) => wrap(g.begin(), GameTimer::Number),
                ActiveGame::ColorInterference(g) => untimed(g.begin()),
                ActiveGame::SpatialRecall(g, _) => untimed(g.begin()),
                ActiveGame::TargetClick(g) => wrap(g.begin(), GameTimer::Target),
            };
            self.round = Some(Round {
                game: active,
                timers: TimerScope::new(self.epoch, self.timer_tx.clone()),
                reported: false,
            });
            self.apply(step)?;
        }
        self.render()
    }

    /// Arm the step's timers and deal with a finished game.
    fn apply(&mut self, step: Step<GameTimer>) -> io::Result<()> {
        let Some(round) = self.round.as_mut() else {
            return Ok(());
        };
        for (delay, timer) in step.timers {
            round.timers.schedule(delay, timer);
        }
        let Some(finish) = step.finish else {
            return Ok(());
        };
        if round.reported {
            warn!(game = %round.game.id(), "game finished twice, ignoring");
            return Ok(());
        }
        round.reported = true;
        debug!(game = %round.game.id(), score = finish.score, "game finished");
        if finish.hold.is_zero() {
            self.report()
        } else {
            round.timers.schedule(finish.hold, GameTimer::Report);
            Ok(())
        }
    }

    fn report(&mut self) -> io::Result<()> {
        let Some(round) = &self.round else {
            return Ok(());
        };
        let game = round.game.id();
        let Some(score) = round.game.score() else {
            warn!(%game, "report requested before the game finished");
            return Ok(());
        };
        match self.session.complete_game(game, score as i64) {
            Ok(_) => self.enter_stage(),
            Err(err) => {
                warn!(%err, "score report rejected");
                Ok(())
            }
        }
    }

    pub fn handle_timer(&mut self, stamped: Stamped<GameTimer>) -> io::Result<()> {
        let owned = match &self.round {
            Some(round) => round.timers.owns(&stamped),
            None => false,
        };
        if !owned {
            debug!(epoch = stamped.epoch, current = self.epoch, "stale timer discarded");
            return Ok(());
        }
        if stamped.payload == GameTimer::Report {
            return self.report();
        }

        let Some(round) = self.round.as_mut() else {
            return Ok(());
        };
        let now = Instant::now();
        let step = match (stamped.payload, &mut round.game) {
            (GameTimer::Reaction(t), ActiveGame::Reaction(g)) => {
                wrap(g.on_timer(t, now), GameTimer::Reaction)
            }
            (GameTimer::Pattern(t), ActiveGame::Pattern(g)) => {
                wrap(g.on_timer(t, now), GameTimer::Pattern)
            }
            (GameTimer::Number(t), ActiveGame::NumberRecall(g)) => {
                wrap(g.on_timer(t, now), GameTimer::Number)
            }
            (GameTimer::Target(t), ActiveGame::TargetClick(g)) => {
                wrap(g.on_timer(t, now), GameTimer::Target)
            }
            (payload, game) => {
                warn!(?payload, game = %game.id(), "timer does not belong to the active game");
                return Ok(());
            }
        };
        self.redraw_after(step)
    }

    /// Apply `step`, then redraw unless the stage changed, since entering a
    /// stage draws it already.
    fn redraw_after(&mut self, step: Step<GameTimer>) -> io::Result<()> {
        let epoch = self.epoch;
        self.apply(step)?;
        if self.epoch == epoch {
            self.render()?;
        }
        Ok(())
    }

    pub fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        let input = line.trim();
        match input {
            "quit" | "exit" => return Ok(Flow::Quit),
            "restart" => {
                self.session.restart();
                self.enter_stage()?;
                return Ok(Flow::Continue);
            }
            _ => {}
        }

        match self.session.stage() {
            Stage::Intro => {
                if self.session.start().is_ok() {
                    self.enter_stage()?;
                }
            }
            Stage::Playing(_) => self.game_input(input)?,
            Stage::Results => match input {
                "r" => {
                    self.session.restart();
                    self.enter_stage()?;
                }
                "s" => match export_session(&self.config.export_dir, &self.session, &self.config.share_url) {
                    Ok(path) => self.say(&format!("Saved {}", path.display()))?,
                    Err(err) => self.say(&format!("Could not save the result card: {err}"))?,
                },
                "q" => return Ok(Flow::Quit),
                _ => self.say("[r] play again   [s] save result card   [q] quit")?,
            },
        }
        Ok(Flow::Continue)
    }

    fn game_input(&mut self, input: &str) -> io::Result<()> {
        let Some(round) = self.round.as_mut() else {
            return Ok(());
        };
        let now = Instant::now();
        let step = match &mut round.game {
            ActiveGame::Reaction(g) => {
                // Enter both starts an attempt and reacts to the signal.
                let step = match g.phase() {
                    ReactionPhase::Idle | ReactionPhase::Early => g.arm(),
                    _ => g.click(now),
                };
                wrap(step, GameTimer::Reaction)
            }
            ActiveGame::Pattern(g) => {
                match g.phase() {
                    PatternPhase::Memorize { .. } => return self.say("Keep memorizing..."),
                    PatternPhase::Result { .. } => return Ok(()),
                    PatternPhase::Recall => {}
                }
                if input.is_empty() || input == "done" {
                    wrap(g.submit(), GameTimer::Pattern)
                } else {
                    for cell in input.split_whitespace().filter_map(|t| t.parse::<usize>().ok()) {
                        if cell >= 1 {
                            g.toggle(cell - 1);
                        }
                    }
                    Step::wait()
                }
            }
            ActiveGame::NumberRecall(g) => {
                if *g.phase() != NumberPhase::Input {
                    return Ok(());
                }
                wrap(g.submit(input), GameTimer::Number)
            }
            ActiveGame::ColorInterference(g) => match InkColor::parse(input) {
                Some(color) => untimed(g.answer(color)),
                None => return self.say("Type r, b, g or y."),
            },
            ActiveGame::SpatialRecall(g, labels) => {
                let number = match g.phase() {
                    SpatialPhase::Memorize => input.parse::<u32>().ok(),
                    SpatialPhase::Play { .. } => {
                        let letter = input.chars().next().map(|c| c.to_ascii_uppercase());
                        labels
                            .iter()
                            .zip(g.spots())
                            .find(|(l, spot)| Some(**l) == letter && spot.state == SpotState::Masked)
                            .map(|(_, spot)| spot.number)
                    }
                    SpatialPhase::Lost | SpatialPhase::Won => None,
                };
                match number {
                    Some(n) => untimed(g.click(n)),
                    None => Step::wait(),
                }
            }
            ActiveGame::TargetClick(g) => match g.phase() {
                TargetPhase::Ready => wrap(g.start(), GameTimer::Target),
                TargetPhase::Active { .. } => {
                    for id in input.split_whitespace().filter_map(|t| t.trim_start_matches('@').parse().ok()) {
                        g.whack(id);
                    }
                    Step::wait()
                }
                TargetPhase::Over { .. } => Step::wait(),
            },
        };
        self.redraw_after(step)
    }
}

/// Games without timers only ever finish.
fn untimed(step: Step<()>) -> Step<GameTimer> {
    Step {
        timers: Vec::new(),
        finish: step.finish,
    }
}

fn meme_loadable(url: &str) -> bool {
    url.starts_with("https://")
}

/// Play one interactive session on stdin/stdout until the player quits or
/// stdin closes.
pub async fn run(config: Config) -> io::Result<()> {
    let (timer_tx, mut timer_rx) = mpsc::unbounded_channel();
    let mut player = Player::new(config, io::stdout(), timer_tx);
    player.render()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => {
                    if player.handle_line(&line)? == Flow::Quit {
                        break;
                    }
                }
                None => break,
            },
            Some(stamped) = timer_rx.recv() => player.handle_timer(stamped)?,
            _ = &mut ctrl_c => break,
        }
    }
    writeln!(io::stdout(), "\nBye!")?;
    Ok(())
}
