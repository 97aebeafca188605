/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// session.  No game logic is performed; this module only translates
/// state into terminal commands, scaling world units down to cells.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use invaders::compute::game_over_text_visible;
use invaders::entities::{
    Alien, AlienKind, AlienStatus, Barrier, BeamStatus, GameState, GameStatus, Outcome,
};
use invaders::session::Session;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_CANNON: Color = Color::Green;
const C_SQUID: Color = Color::Magenta;
const C_CRAB: Color = Color::Cyan;
const C_OCTOPUS: Color = Color::White;
const C_EXPLOSION: Color = Color::Yellow;
const C_BEAM: Color = Color::Cyan;
const C_BOMB: Color = Color::Red;
const C_BARRIER: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Terminal size in cells.  Row 0 is the HUD, rows 1 and `height - 2` are the
/// border, the last row holds the controls hint.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn current() -> std::io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Viewport { width, height })
    }

    fn inner_width(&self) -> i32 {
        self.width.saturating_sub(2) as i32
    }

    fn inner_height(&self) -> i32 {
        self.height.saturating_sub(4) as i32
    }

    /// Map a world position to a cell inside the border.
    fn cell(&self, state: &GameState, x: i32, y: i32) -> Option<(u16, u16)> {
        let world_w = state.config.window_width;
        let world_h = state.config.window_height;
        if x < 0 || y < 0 || x >= world_w || y >= world_h {
            return None;
        }
        let col = 1 + x * self.inner_width() / world_w;
        let row = 2 + y * self.inner_height() / world_h;
        Some((col as u16, row as u16))
    }

    /// Print `text` at a world position, clipped to the right border.
    fn put<W: Write>(
        &self,
        out: &mut W,
        state: &GameState,
        x: i32,
        y: i32,
        color: Color,
        text: &str,
    ) -> std::io::Result<()> {
        let Some((col, row)) = self.cell(state, x, y) else {
            return Ok(());
        };
        let room = self.width.saturating_sub(1).saturating_sub(col) as usize;
        let clipped: String = text.chars().take(room).collect();
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(clipped))?;
        Ok(())
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, session: &Session, view: Viewport) -> std::io::Result<()> {
    let state = session.state();
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, session, view)?;

    for barrier in &state.barriers {
        draw_barrier(out, state, view, barrier)?;
    }
    for alien in &state.aliens {
        draw_alien(out, state, view, alien)?;
    }
    for bomb in &state.bombs {
        view.put(out, state, bomb.x, bomb.y, C_BOMB, "↓")?;
    }
    if state.beam.status != BeamStatus::Idle {
        view.put(out, state, state.beam.x, state.beam.y, C_BEAM, "║")?;
    }

    draw_cannon(out, state, view)?;
    draw_controls_hint(out, state, view)?;

    match state.status {
        GameStatus::Paused => draw_paused(out, view)?,
        GameStatus::GameOver => draw_game_over(out, session, view)?,
        GameStatus::Playing => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, session: &Session, view: Viewport) -> std::io::Result<()> {
    let state = session.state();

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    match session.table().best() {
        Some(best) => out.queue(Print(format!(
            "Score:{:>6}  Hi:{:>6}",
            state.score,
            best.max(state.score)
        )))?,
        None => out.queue(Print(format!("Score:{:>6}", state.score)))?,
    };

    let lives_str = format!("Lives:{}", "♥".repeat(state.lives as usize));
    let rx = view
        .width
        .saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_cannon<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    let c = &state.cannon;
    if c.hit_flash > 0 {
        view.put(out, state, c.x, c.y, C_EXPLOSION, "x*x")
    } else if state.outcome != Some(Outcome::Defeat) {
        view.put(out, state, c.x, c.y, C_CANNON, "/▲\\")
    } else {
        Ok(())
    }
}

fn draw_alien<W: Write>(
    out: &mut W,
    state: &GameState,
    view: Viewport,
    alien: &Alien,
) -> std::io::Result<()> {
    // Two animation frames per kind, alternating every tick.
    let odd = state.frame % 2 == 1;
    let (sprite, color) = match (alien.status, alien.kind) {
        (AlienStatus::Dead, _) => return Ok(()),
        (AlienStatus::Exploding { .. }, _) => ("*#*", C_EXPLOSION),
        (AlienStatus::Alive, AlienKind::Squid) => (if odd { "}@{" } else { "{@}" }, C_SQUID),
        (AlienStatus::Alive, AlienKind::Crab) => (if odd { "\\M/" } else { "/M\\" }, C_CRAB),
        (AlienStatus::Alive, AlienKind::Octopus) => (if odd { ")W(" } else { "(W)" }, C_OCTOPUS),
    };
    view.put(out, state, alien.x, alien.y, color, sprite)
}

fn draw_barrier<W: Write>(
    out: &mut W,
    state: &GameState,
    view: Viewport,
    barrier: &Barrier,
) -> std::io::Result<()> {
    // Shade thins as the barrier takes hits.
    let full = state.config.barrier_hit_points.max(1) as u32;
    let left = barrier.hits_left as u32;
    let block = match (left * 3).div_ceil(full) {
        0 => return Ok(()),
        1 => "░░░░",
        2 => "▒▒▒▒",
        _ => "▓▓▓▓",
    };
    view.put(out, state, barrier.x, barrier.y, C_BARRIER, block)
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(
    out: &mut W,
    state: &GameState,
    view: Viewport,
) -> std::io::Result<()> {
    let hint = match state.status {
        GameStatus::GameOver => "ENTER / R : Play again   Q / ESC : Quit",
        GameStatus::Paused => "P / ESC : Resume",
        GameStatus::Playing => "← → : Move   ↑ ↓ : Nudge   SPACE : Fire   P : Pause   Q : Give up",
    };
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn print_centered<W: Write>(
    out: &mut W,
    view: Viewport,
    row: u16,
    color: Color,
    text: &str,
) -> std::io::Result<()> {
    let col = (view.width / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_paused<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    print_centered(out, view, view.height / 2, Color::Yellow, "──  PAUSED  ──")
}

fn draw_game_over<W: Write>(out: &mut W, session: &Session, view: Viewport) -> std::io::Result<()> {
    let state = session.state();
    let table = session.table();

    let title = match state.outcome {
        Some(Outcome::Victory) => "║   EARTH IS SAFE    ║",
        _ => "║    GAME  OVER      ║",
    };
    let score_line = format!("Final Score: {:>6}", state.score);
    let total_rows = 6 + table.len() as u16 + 2;
    let mut row = (view.height / 2).saturating_sub(total_rows / 2);

    if game_over_text_visible(state) {
        print_centered(out, view, row, Color::Red, "╔════════════════════╗")?;
        print_centered(out, view, row + 1, Color::Red, title)?;
        print_centered(out, view, row + 2, Color::Red, "╚════════════════════╝")?;
    }
    row += 3;

    print_centered(out, view, row, Color::Yellow, &score_line)?;
    row += 1;
    if session.placed() {
        print_centered(out, view, row, Color::Yellow, "★ NEW HIGH SCORE ★")?;
    }
    row += 2;

    print_centered(out, view, row, Color::White, "High Scores:")?;
    row += 1;
    for (i, entry) in table.entries().iter().enumerate() {
        let line = format!("{}. {}: {}", i + 1, entry.name, entry.score);
        print_centered(out, view, row, Color::DarkGrey, &line)?;
        row += 1;
    }

    row += 1;
    print_centered(out, view, row, Color::White, "ENTER - Play Again   ESC - Quit")?;
    Ok(())
}
