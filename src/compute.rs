/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG; audio cues
/// are recorded in `GameState::cues` for the front end to play.

use rand::Rng;

use crate::config::GameConfig;
use crate::constants::{
    ALIEN_EXPLOSION_FRAMES, BARRIER_SIZE, BEAM_SIZE, CANNON_HIT_FRAMES, CANNON_SIZE,
    GAME_OVER_BLINK_FRAMES, INVASION_MARGIN, MUZZLE_OFFSET,
};
use crate::entities::{
    Alien, AlienKind, AlienStatus, Barrier, Beam, BeamStatus, Bomb, Cannon, FrameInput,
    GameState, GameStatus, Outcome, Rect, SoundCue,
};

// ── Collision ─────────────────────────────────────────────────────────────────

/// Strict AABB overlap.  Rectangles that only share an edge do not collide.
pub fn collides(a: Rect, b: Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Lay out the formation row by row; the row decides kind and point value.
pub fn spawn_formation(config: &GameConfig) -> Vec<Alien> {
    let mut aliens = Vec::with_capacity(config.alien_rows * config.alien_cols);
    for row in 0..config.alien_rows {
        for col in 0..config.alien_cols {
            aliens.push(Alien {
                x: config.alien_start_x + col as i32 * (config.alien_size + config.alien_col_gap),
                y: config.alien_start_y + row as i32 * config.alien_row_spacing,
                kind: AlienKind::for_row(row),
                status: AlienStatus::Alive,
            });
        }
    }
    aliens
}

/// Barriers are spread evenly across the window on `barrier_y`.
pub fn spawn_barriers(config: &GameConfig) -> Vec<Barrier> {
    let slots = config.barrier_count as i32 + 1;
    (1..slots)
        .map(|i| Barrier {
            x: i * config.window_width / slots - BARRIER_SIZE.0 / 2,
            y: config.barrier_y,
            hits_left: config.barrier_hit_points,
        })
        .collect()
}

fn idle_beam(cannon: &Cannon) -> Beam {
    Beam {
        x: cannon.x + MUZZLE_OFFSET,
        y: cannon.y - BEAM_SIZE.1,
        status: BeamStatus::Idle,
    }
}

/// Build the initial game state for a configuration.
pub fn init_state(config: GameConfig) -> GameState {
    let cannon = Cannon {
        x: config.cannon_start_x,
        y: config.cannon_home_y,
        hit_flash: 0,
    };
    GameState {
        beam: idle_beam(&cannon),
        cannon,
        aliens: spawn_formation(&config),
        bombs: Vec::new(),
        barriers: spawn_barriers(&config),
        score: 0,
        lives: config.starting_lives,
        direction: 1,
        status: GameStatus::Playing,
        outcome: None,
        frame: 0,
        game_over_frames: 0,
        cues: Vec::new(),
        config,
    }
}

/// Fresh game with the same configuration; background music restarts.
pub fn restart(state: &GameState) -> GameState {
    let mut next = init_state(state.config.clone());
    next.cues.push(SoundCue::Background);
    next
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_cannon_left(state: &GameState) -> GameState {
    let mut next = state.clone();
    next.cannon.x = (state.cannon.x - state.config.cannon_speed).max(0);
    next
}

pub fn move_cannon_right(state: &GameState) -> GameState {
    let mut next = state.clone();
    let max_x = state.config.window_width - CANNON_SIZE.0;
    next.cannon.x = (state.cannon.x + state.config.cannon_speed).min(max_x);
    next
}

pub fn move_cannon_up(state: &GameState) -> GameState {
    let mut next = state.clone();
    let min_y = state.config.cannon_min_y;
    next.cannon.y = (state.cannon.y - state.config.cannon_vertical_speed).max(min_y);
    next
}

pub fn move_cannon_down(state: &GameState) -> GameState {
    let mut next = state.clone();
    let max_y = state.config.cannon_max_y();
    next.cannon.y = (state.cannon.y + state.config.cannon_vertical_speed).min(max_y);
    next
}

/// Queue a shot.  Only one beam exists; firing while it is busy is a no-op.
pub fn fire(state: &GameState) -> GameState {
    if !state.beam.is_idle() {
        return state.clone();
    }
    let mut next = state.clone();
    next.beam.status = BeamStatus::Fired;
    next.cues.push(SoundCue::Laser);
    next
}

/// Apply one frame of player input while `Playing`.  Pause and quit take
/// effect immediately and suppress the rest of the frame's input.
pub fn apply_input(state: &GameState, input: &FrameInput) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    if input.quit {
        let mut next = state.clone();
        next.status = GameStatus::GameOver;
        next.outcome = Some(Outcome::Forfeit);
        return next;
    }
    if input.pause {
        let mut next = state.clone();
        next.status = GameStatus::Paused;
        return next;
    }

    let mut next = state.clone();
    if input.right {
        next = move_cannon_right(&next);
    }
    if input.left {
        next = move_cannon_left(&next);
    }
    if input.down {
        next = move_cannon_down(&next);
    }
    if input.up {
        next = move_cannon_up(&next);
    }
    if input.fire {
        next = fire(&next);
    }
    next
}

// ── Formation ─────────────────────────────────────────────────────────────────

/// Reverse the formation when its outermost living alien has crossed an edge
/// margin, dropping every alien by `alien_descent`.  Returns the direction to
/// move in this tick.
pub fn check_formation_edges(aliens: &mut [Alien], direction: i32, config: &GameConfig) -> i32 {
    let (min_x, max_x) = aliens
        .iter()
        .filter(|a| a.is_alive())
        .fold((i32::MAX, i32::MIN), |(lo, hi), a| (lo.min(a.x), hi.max(a.x)));
    if min_x > max_x {
        return direction;
    }

    let right_edge = config.window_width - 2 * config.alien_size;
    if min_x < config.alien_size || max_x > right_edge {
        for alien in aliens.iter_mut() {
            alien.y += config.alien_descent;
        }
        -direction
    } else {
        direction
    }
}

fn decay_explosions(state: &mut GameState) {
    for alien in &mut state.aliens {
        if let AlienStatus::Exploding { frames_left } = alien.status {
            alien.status = if frames_left <= 1 {
                AlienStatus::Dead
            } else {
                AlienStatus::Exploding {
                    frames_left: frames_left - 1,
                }
            };
        }
    }
    state.cannon.hit_flash = state.cannon.hit_flash.saturating_sub(1);
}

fn end_game(state: &mut GameState, outcome: Outcome) {
    state.status = GameStatus::GameOver;
    state.outcome = Some(outcome);
    state.cues.push(SoundCue::EndGame);
}

/// Damage the first standing barrier overlapping `rect`.  Returns whether a
/// barrier absorbed the hit.
fn hit_barrier(barriers: &mut [Barrier], rect: Rect) -> bool {
    match barriers
        .iter_mut()
        .find(|b| b.is_standing() && collides(b.rect(), rect))
    {
        Some(barrier) => {
            barrier.hits_left -= 1;
            true
        }
        None => false,
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    if next.status != GameStatus::Playing {
        return next;
    }
    let config = state.config.clone();

    decay_explosions(&mut next);

    // ── 1. Place a freshly fired beam over the cannon ────────────────────────
    if next.beam.status == BeamStatus::Fired {
        next.beam = Beam {
            x: next.cannon.x + MUZZLE_OFFSET,
            y: next.cannon.y - BEAM_SIZE.1,
            status: BeamStatus::InFlight,
        };
    }

    // ── 2. Formation edge check ──────────────────────────────────────────────
    next.direction = check_formation_edges(&mut next.aliens, next.direction, &config);

    // ── 3. Aliens: move, take beam hits, drop bombs ──────────────────────────
    let dx = config.alien_step * next.direction;
    for alien in &mut next.aliens {
        alien.x += dx;
        if !alien.is_alive() {
            continue;
        }
        if next.beam.status == BeamStatus::InFlight && collides(alien.rect(), next.beam.rect()) {
            alien.status = AlienStatus::Exploding {
                frames_left: ALIEN_EXPLOSION_FRAMES,
            };
            next.score += alien.points();
            next.beam = idle_beam(&next.cannon);
            next.cues.push(SoundCue::AlienExplosion);
        } else if rng.gen::<f64>() < config.bomb_probability {
            next.bombs.push(Bomb {
                x: alien.x + MUZZLE_OFFSET,
                y: alien.y,
            });
        }
    }

    // ── 4. Bombs: fall, hit barriers or the cannon, leave the screen ─────────
    let mut bombs = Vec::with_capacity(next.bombs.len());
    for mut bomb in std::mem::take(&mut next.bombs) {
        if next.status != GameStatus::Playing {
            bombs.push(bomb);
            continue;
        }
        bomb.y += config.bomb_speed;
        if hit_barrier(&mut next.barriers, bomb.rect()) {
            continue;
        }
        if collides(bomb.rect(), next.cannon.rect()) {
            next.lives = next.lives.saturating_sub(1);
            next.cannon.hit_flash = CANNON_HIT_FRAMES;
            next.cues.push(SoundCue::ShipExplosion);
            if next.lives == 0 {
                end_game(&mut next, Outcome::Defeat);
            } else {
                next.cannon.y = config.cannon_home_y;
                next.beam = idle_beam(&next.cannon);
            }
            continue;
        }
        if bomb.y > config.window_height {
            continue;
        }
        bombs.push(bomb);
    }
    next.bombs = bombs;

    if next.status == GameStatus::Playing {
        // ── 5. Beam: climb, stop on barriers, expire off the top ─────────────
        if next.beam.status == BeamStatus::InFlight {
            let climbed = next.beam.y - config.beam_speed;
            if climbed < 0 {
                next.beam = idle_beam(&next.cannon);
            } else {
                next.beam.y = climbed;
                if hit_barrier(&mut next.barriers, next.beam.rect()) {
                    next.beam = idle_beam(&next.cannon);
                }
            }
        }

        // ── 6. Terminal conditions ───────────────────────────────────────────
        let invasion_line = next.cannon.y - INVASION_MARGIN;
        if next.alive_aliens().any(|a| a.y > invasion_line) {
            end_game(&mut next, Outcome::Defeat);
        } else if next.alive_aliens().next().is_none() {
            end_game(&mut next, Outcome::Victory);
        }
    }

    next.frame += 1;
    next
}

/// One full frame: dispatch on status, apply input, then tick.
///
/// `quit` during `GameOver` is left to the caller (it ends the process,
/// which is not a state transition).
pub fn update(state: &GameState, input: &FrameInput, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    next.cues.clear();

    match next.status {
        GameStatus::GameOver => {
            if input.restart {
                return restart(&next);
            }
            next.game_over_frames += 1;
            next
        }
        GameStatus::Paused => {
            if input.pause {
                next.status = GameStatus::Playing;
            }
            next
        }
        GameStatus::Playing => {
            let next = apply_input(&next, input);
            if next.status != GameStatus::Playing {
                return next;
            }
            tick(&next, rng)
        }
    }
}

/// The game-over text blinks, starting visible.
pub fn game_over_text_visible(state: &GameState) -> bool {
    (state.game_over_frames / GAME_OVER_BLINK_FRAMES) % 2 == 0
}
