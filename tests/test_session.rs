use std::path::Path;

use invaders::compute::init_state;
use invaders::config::GameConfig;
use invaders::entities::*;
use invaders::highscore::HighScoreTable;
use invaders::session::{Flow, Session};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn quiet_config() -> GameConfig {
    GameConfig {
        bomb_probability: 0.0,
        ..GameConfig::default()
    }
}

fn idle() -> FrameInput {
    FrameInput::default()
}

fn quit() -> FrameInput {
    FrameInput {
        quit: true,
        ..FrameInput::default()
    }
}

/// Three bombs stacked above the cannon, landing on frames 1, 5 and 9.
fn doomed_state(score: u32) -> GameState {
    let mut s = init_state(quiet_config());
    s.score = score;
    s.bombs = vec![
        Bomb { x: 50, y: 385 },
        Bomb { x: 50, y: 345 },
        Bomb { x: 50, y: 305 },
    ];
    s
}

fn session_in(dir: &Path, state: GameState) -> Session {
    Session::from_state(
        state,
        HighScoreTable::new(5),
        dir.join("highscores.txt"),
        "tester",
    )
}

#[test]
fn third_hit_ends_the_game_and_writes_the_score() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path(), doomed_state(120));
    let mut rng = StdRng::seed_from_u64(1);

    let mut hits = 0;
    let mut frames = 0;
    while session.state().status == GameStatus::Playing {
        let lives_before = session.state().lives;
        assert_eq!(session.step(&idle(), &mut rng), Flow::Continue);
        frames += 1;
        if session.state().lives < lives_before {
            hits += 1;
        }
        assert!(frames < 20, "game should have ended by now");
    }

    assert_eq!(hits, 3);
    assert_eq!(frames, 9);
    assert_eq!(session.state().outcome, Some(Outcome::Defeat));
    assert!(session.placed());

    let saved = std::fs::read_to_string(dir.path().join("highscores.txt")).unwrap();
    assert_eq!(saved, "tester,120\n");
    assert_eq!(session.table().best(), Some(120));
}

#[test]
fn game_over_is_recorded_once() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = init_state(quiet_config());
    state.score = 40;
    state.lives = 1;
    state.bombs = vec![Bomb { x: 50, y: 385 }];
    let mut session = session_in(dir.path(), state);
    let mut rng = StdRng::seed_from_u64(1);

    session.step(&idle(), &mut rng);
    assert_eq!(session.state().status, GameStatus::GameOver);
    for _ in 0..10 {
        session.step(&idle(), &mut rng);
    }
    assert_eq!(session.table().len(), 1);
}

#[test]
fn forfeit_is_not_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = init_state(quiet_config());
    state.score = 500;
    let mut session = session_in(dir.path(), state);
    let mut rng = StdRng::seed_from_u64(1);

    assert_eq!(session.step(&quit(), &mut rng), Flow::Continue);
    assert_eq!(session.state().status, GameStatus::GameOver);
    assert_eq!(session.state().outcome, Some(Outcome::Forfeit));
    assert!(session.table().is_empty());
    assert!(!dir.path().join("highscores.txt").exists());
}

#[test]
fn quit_from_game_over_exits() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path(), init_state(quiet_config()));
    let mut rng = StdRng::seed_from_u64(1);

    session.step(&quit(), &mut rng);
    assert_eq!(session.step(&quit(), &mut rng), Flow::Exit);
}

#[test]
fn unqualified_score_leaves_the_file_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("highscores.txt");
    let mut table = HighScoreTable::new(5);
    for (name, score) in [("a", 900), ("b", 800), ("c", 700), ("d", 600), ("e", 500)] {
        table.add(name, score);
    }

    let mut state = init_state(quiet_config());
    state.score = 10;
    state.lives = 1;
    state.bombs = vec![Bomb { x: 50, y: 385 }];
    let mut session = Session::from_state(state, table, &path, "tester");
    let mut rng = StdRng::seed_from_u64(1);

    session.step(&idle(), &mut rng);
    assert_eq!(session.state().status, GameStatus::GameOver);
    assert!(!session.placed());
    assert!(!path.exists());
}

#[test]
fn restart_after_game_over_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = init_state(quiet_config());
    state.score = 70;
    state.lives = 1;
    state.bombs = vec![Bomb { x: 50, y: 385 }];
    let mut session = session_in(dir.path(), state);
    let mut rng = StdRng::seed_from_u64(1);

    session.step(&idle(), &mut rng);
    assert!(session.placed());

    let restart = FrameInput {
        restart: true,
        ..FrameInput::default()
    };
    assert_eq!(session.step(&restart, &mut rng), Flow::Continue);
    let s = session.state();
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!((s.score, s.lives), (0, 3));
    assert_eq!(s.cues, vec![SoundCue::Background]);
    assert!(!session.placed());
    assert_eq!(session.table().len(), 1, "the leaderboard survives a restart");
}

#[test]
fn new_session_starts_a_default_game() {
    let session = Session::new(
        GameConfig::default(),
        HighScoreTable::default(),
        "unused.txt",
        "tester",
    );
    assert_eq!(session.state().status, GameStatus::Playing);
    assert_eq!(session.state().aliens.len(), 60);
    assert_eq!(session.player_name(), "tester");
    assert_eq!(session.scores_path(), Path::new("unused.txt"));
}

#[test]
fn player_name_cannot_inject_file_lines() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = init_state(quiet_config());
    state.score = 30;
    state.lives = 1;
    state.bombs = vec![Bomb { x: 50, y: 385 }];
    let mut session = Session::from_state(
        state,
        HighScoreTable::new(5),
        dir.path().join("highscores.txt"),
        "x\nevil,999",
    );
    let mut rng = StdRng::seed_from_u64(1);

    session.step(&idle(), &mut rng);
    assert!(session.placed());
    let saved = std::fs::read_to_string(dir.path().join("highscores.txt")).unwrap();
    assert_eq!(saved, "x evil 999,30\n");
}
