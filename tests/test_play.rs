//! Drives the terminal front end through a whole session on a paused tokio
//! clock: typed lines go in through `handle_line`, timer deliveries are pumped
//! through `handle_timer`, output is captured in a `Vec<u8>`.

use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver};

use rate_my_brain::env_config::Config;
use rate_my_brain::minigames::pattern::PatternPhase;
use rate_my_brain::minigames::spatial_recall::SpatialPhase;
use rate_my_brain::play::render::CLEAR;
use rate_my_brain::play::{ActiveGame, Flow, GameTimer, Player};
use rate_my_brain::timer::Stamped;
use rate_my_brain::types::{GameId, Stage};

type Rx = UnboundedReceiver<Stamped<GameTimer>>;

fn player(seed: u64) -> (Player<Vec<u8>>, Rx) {
    let (tx, rx) = mpsc::unbounded_channel();
    let config = Config {
        seed: Some(seed),
        ..Config::default()
    };
    (Player::new(config, Vec::new(), tx), rx)
}

/// Let `ms` of virtual time pass, handling every timer that fires.
async fn pump(player: &mut Player<Vec<u8>>, rx: &mut Rx, ms: u64) {
    let deadline = tokio::time::Instant::now() + Duration::from_millis(ms);
    while let Ok(Some(stamped)) = tokio::time::timeout_at(deadline, rx.recv()).await {
        player.handle_timer(stamped).unwrap();
    }
}

fn screen(player: &Player<Vec<u8>>) -> String {
    String::from_utf8_lossy(player.output()).to_string()
}

fn redraws(player: &Player<Vec<u8>>) -> usize {
    screen(player).matches(CLEAR).count()
}

fn line(player: &mut Player<Vec<u8>>, input: &str) -> Flow {
    player.handle_line(input).unwrap()
}

#[tokio::test(start_paused = true)]
async fn full_session_reaches_results() {
    let (mut p, mut rx) = player(2024);
    line(&mut p, "");
    assert_eq!(p.session().stage(), Stage::Playing(GameId::Reaction));

    // Reaction: arm, wait for GO, react.
    line(&mut p, "");
    pump(&mut p, &mut rx, 4_000).await;
    line(&mut p, "");
    pump(&mut p, &mut rx, 2_500).await;
    assert_eq!(p.session().stage(), Stage::Playing(GameId::Pattern));

    // Pattern: wait out the countdown, mark every lit cell.
    pump(&mut p, &mut rx, 3_500).await;
    let cells: Vec<String> = match p.active() {
        Some(ActiveGame::Pattern(g)) => {
            assert_eq!(g.phase(), PatternPhase::Recall);
            (0..9).filter(|&i| g.targets()[i]).map(|i| (i + 1).to_string()).collect()
        }
        _ => panic!("pattern game not active"),
    };
    line(&mut p, &cells.join(" "));
    line(&mut p, "");
    // Typing during the result hold is ignored quietly.
    line(&mut p, "5");
    assert!(!screen(&p).contains("Keep memorizing"));
    pump(&mut p, &mut rx, 2_500).await;
    assert_eq!(p.session().stage(), Stage::Playing(GameId::NumberRecall));

    // Number recall: four levels.
    for _ in 0..4 {
        let number = match p.active() {
            Some(ActiveGame::NumberRecall(g)) => g.number().to_string(),
            _ => panic!("number game not active"),
        };
        pump(&mut p, &mut rx, 3_500).await;
        line(&mut p, &number);
        pump(&mut p, &mut rx, 1_500).await;
    }
    assert_eq!(p.session().stage(), Stage::Playing(GameId::ColorInterference));

    // Color interference: always name the ink.
    for _ in 0..5 {
        let ink = match p.active() {
            Some(ActiveGame::ColorInterference(g)) => g.prompt().ink,
            _ => panic!("color game not active"),
        };
        let before = redraws(&p);
        line(&mut p, ink.name());
        // One redraw per answer, including the one that switches stage.
        assert_eq!(redraws(&p), before + 1);
    }
    assert_eq!(p.session().stage(), Stage::Playing(GameId::SpatialRecall));

    // Spatial recall: 1 by number, the rest by their masked letters.
    line(&mut p, "1");
    // Spot 1 is gone from the board; its letter does nothing.
    let gone = match p.active() {
        Some(ActiveGame::SpatialRecall(g, labels)) => {
            let idx = g.spots().iter().position(|s| s.number == 1).unwrap();
            labels[idx].to_string()
        }
        _ => panic!("spatial game not active"),
    };
    line(&mut p, &gone);
    match p.active() {
        Some(ActiveGame::SpatialRecall(g, _)) => assert_eq!(g.phase(), SpatialPhase::Play { next: 2 }),
        _ => panic!("spatial game ended on a cleared spot"),
    }
    for n in 2..=5u32 {
        let letter = match p.active() {
            Some(ActiveGame::SpatialRecall(g, labels)) => {
                let idx = g.spots().iter().position(|s| s.number == n).unwrap();
                labels[idx].to_string()
            }
            _ => panic!("spatial game not active"),
        };
        line(&mut p, &letter.to_lowercase());
    }
    assert_eq!(p.session().stage(), Stage::Playing(GameId::TargetClick));

    // Target click: bust everything on screen every spawn interval.
    line(&mut p, "");
    for _ in 0..20 {
        if p.session().stage() == Stage::Results {
            break;
        }
        let ids: Vec<String> = match p.active() {
            Some(ActiveGame::TargetClick(g)) => g.ghosts().iter().map(|g| g.id.to_string()).collect(),
            _ => break,
        };
        line(&mut p, &ids.join(" "));
        pump(&mut p, &mut rx, 800).await;
    }
    assert_eq!(p.session().stage(), Stage::Results);

    let scores = *p.session().scores();
    for (game, score) in scores.iter() {
        assert_eq!(score, 100, "{game} scored {score}");
    }
    let diagnosis = p.session().diagnosis().unwrap();
    assert_eq!(diagnosis.average, 100);
    assert_eq!(diagnosis.brain_type.label, "Lightning CPU");

    let shown = screen(&p);
    assert!(shown.contains("Lightning CPU"));
    assert!(shown.contains("twitter.com/intent/tweet"));

    assert_eq!(line(&mut p, "r"), Flow::Continue);
    assert_eq!(p.session().stage(), Stage::Intro);
    assert_eq!(p.session().scores().total(), 0);
}

#[tokio::test(start_paused = true)]
async fn restart_cancels_pending_timers() {
    let (mut p, mut rx) = player(7);
    line(&mut p, "");
    line(&mut p, "");
    pump(&mut p, &mut rx, 4_000).await;
    line(&mut p, "");
    // Reaction result is on hold; restart before it is reported.
    line(&mut p, "restart");
    assert_eq!(p.session().stage(), Stage::Intro);

    let late = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
    assert!(late.is_err(), "timer survived the restart: {late:?}");
    assert_eq!(p.session().scores().total(), 0);
}

#[tokio::test(start_paused = true)]
async fn stale_timer_is_discarded() {
    let (mut p, _rx) = player(8);
    line(&mut p, "");
    let old_epoch = p.epoch();
    line(&mut p, "restart");
    line(&mut p, "");
    assert_eq!(p.session().stage(), Stage::Playing(GameId::Reaction));

    p.handle_timer(Stamped {
        epoch: old_epoch,
        payload: GameTimer::Report,
    })
    .unwrap();
    assert_eq!(p.session().stage(), Stage::Playing(GameId::Reaction));
    assert_eq!(p.session().scores().get(GameId::Reaction), 0);
}

#[tokio::test(start_paused = true)]
async fn early_click_needs_a_retry() {
    let (mut p, mut rx) = player(9);
    line(&mut p, "");
    line(&mut p, "");
    line(&mut p, "");
    pump(&mut p, &mut rx, 5_000).await;
    assert_eq!(p.session().stage(), Stage::Playing(GameId::Reaction));
    assert!(screen(&p).contains("Too early"));
}

#[tokio::test(start_paused = true)]
async fn quit_from_any_stage() {
    let (mut p, _rx) = player(10);
    assert_eq!(line(&mut p, "quit"), Flow::Quit);
    line(&mut p, "");
    assert_eq!(line(&mut p, "exit"), Flow::Quit);
}
