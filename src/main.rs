mod audio;
mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use invaders::config::GameConfig;
use invaders::entities::{FrameInput, GameStatus, SoundCue};
use invaders::highscore::HighScoreTable;
use invaders::session::{Flow, Session};

use crate::audio::TerminalAudio;
use crate::display::Viewport;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

#[derive(Parser, Debug)]
#[command(name = "invaders", about = "Space Invaders in the terminal")]
struct Cli {
    /// TOML file overriding any of the game's tunables.
    #[arg(long)]
    config: Option<PathBuf>,

    /// High-score file (default: ~/.invaders_highscores).
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Name recorded on the leaderboard (default: the OS user name).
    #[arg(long)]
    name: Option<String>,

    /// Seed the bomb RNG for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Log file; the terminal itself is taken by the game screen.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Never ring the terminal bell.
    #[arg(long)]
    mute: bool,
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

fn default_scores_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".invaders_highscores")
}

fn default_player_name() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .ok()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| "Player".to_string())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key.  Held keys (movement) stay live while
/// fresh; one-shot keys (fire, pause, quit, restart) act on the press event
/// only.  Keyboard-enhancement terminals also send `Release`, which drops the
/// key at once.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
    audio: &TerminalAudio,
) -> Result<()> {
    let frame_time = Duration::from_millis(session.state().config.frame_millis);
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    audio.play(out, &[SoundCue::Background])?;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut input = FrameInput::default();
        let mut esc = false;
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char(' ') => input.fire = true,
                        KeyCode::Char('p') | KeyCode::Char('P') => input.pause = true,
                        KeyCode::Char('q') | KeyCode::Char('Q') => input.quit = true,
                        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => {
                            input.restart = true
                        }
                        KeyCode::Esc => esc = true,
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }
        // Esc pauses during play and quits from the game-over screen.
        if esc {
            if session.state().status == GameStatus::GameOver {
                input.quit = true;
            } else {
                input.pause = true;
            }
        }

        input.left = any_held(
            &key_frame,
            &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
            frame,
        );
        input.right = any_held(
            &key_frame,
            &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
            frame,
        );
        input.up = any_held(
            &key_frame,
            &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')],
            frame,
        );
        input.down = any_held(
            &key_frame,
            &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')],
            frame,
        );

        if session.step(&input, rng) == Flow::Exit {
            return Ok(());
        }

        audio.play(out, &session.state().cues)?;
        display::render(out, session, Viewport::current()?)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("invaders.log"));
    init_logging(&log_path)?;

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };

    let scores_path = cli.scores.clone().unwrap_or_else(default_scores_path);
    // An unreadable file is fatal: playing on would overwrite it on save.
    let table = HighScoreTable::load(&scores_path, config.max_high_scores)
        .with_context(|| format!("loading high scores {}", scores_path.display()))?;
    let player_name = cli.name.clone().unwrap_or_else(default_player_name);

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(
        player = %player_name,
        scores = %scores_path.display(),
        seed = ?cli.seed,
        "starting"
    );

    let mut session = Session::new(config, table, scores_path, player_name);
    let audio = TerminalAudio::new(cli.mute);

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &mut session, &rx, &mut rng, &audio);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!(final_score = session.state().score, "exiting");
    result
}
