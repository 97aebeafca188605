/// All game entity types — pure data, no game logic.
///
/// Each kind of entity carries only the fields it needs.  Positions are the
/// top-left corner in world units; sizes come from `crate::constants`.

use crate::config::GameConfig;
use crate::constants::{
    BARRIER_SIZE, BEAM_SIZE, BOMB_SIZE, CANNON_SIZE, CRAB_SIZE, OCTOPUS_SIZE, SQUID_SIZE,
};

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, (w, h): (i32, i32)) -> Self {
        Rect { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }
}

// ── Enumerations ──────────────────────────────────────────────────────────────

/// Alien species, one per formation band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlienKind {
    /// Top row.
    Squid,
    /// Rows 1 and 2.
    Crab,
    /// Rows 3 and below.
    Octopus,
}

impl AlienKind {
    pub fn for_row(row: usize) -> Self {
        match row {
            0 => AlienKind::Squid,
            1 | 2 => AlienKind::Crab,
            _ => AlienKind::Octopus,
        }
    }

    /// Score awarded for destroying one alien of this kind.
    pub fn points(&self) -> u32 {
        match self {
            AlienKind::Squid => 30,
            AlienKind::Crab => 20,
            AlienKind::Octopus => 10,
        }
    }

    pub fn size(&self) -> (i32, i32) {
        match self {
            AlienKind::Squid => SQUID_SIZE,
            AlienKind::Crab => CRAB_SIZE,
            AlienKind::Octopus => OCTOPUS_SIZE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlienStatus {
    Alive,
    /// Hit by the beam; still drawn as an explosion for `frames_left` frames.
    Exploding { frames_left: u8 },
    Dead,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BeamStatus {
    /// Not on screen, never collides.
    Idle,
    /// Fire accepted this frame; placed over the cannon at the start of the tick.
    Fired,
    InFlight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Paused,
    GameOver,
}

/// Why the last game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Every alien destroyed.
    Victory,
    /// Out of lives, or the formation reached the cannon.
    Defeat,
    /// The player quit mid-game.  Not recorded on the leaderboard.
    Forfeit,
}

/// Audio cues raised by the simulation for the front end to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    Laser,
    AlienExplosion,
    ShipExplosion,
    EndGame,
    Background,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Key state for one frame.  Movement keys are level-triggered (held);
/// the rest are edge-triggered (pressed since the previous frame).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    pub pause: bool,
    pub quit: bool,
    pub restart: bool,
}

// ── Entities ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Cannon {
    pub x: i32,
    pub y: i32,
    /// Remaining frames of the explosion sprite after a bomb hit.
    pub hit_flash: u8,
}

impl Cannon {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, CANNON_SIZE)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    pub x: i32,
    pub y: i32,
    pub kind: AlienKind,
    pub status: AlienStatus,
}

impl Alien {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.kind.size())
    }

    pub fn is_alive(&self) -> bool {
        self.status == AlienStatus::Alive
    }

    pub fn points(&self) -> u32 {
        self.kind.points()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bomb {
    pub x: i32,
    pub y: i32,
}

impl Bomb {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, BOMB_SIZE)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Beam {
    pub x: i32,
    pub y: i32,
    pub status: BeamStatus,
}

impl Beam {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, BEAM_SIZE)
    }

    pub fn is_idle(&self) -> bool {
        self.status == BeamStatus::Idle
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Barrier {
    pub x: i32,
    pub y: i32,
    pub hits_left: u8,
}

impl Barrier {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, BARRIER_SIZE)
    }

    pub fn is_standing(&self) -> bool {
        self.hits_left > 0
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub cannon: Cannon,
    /// The formation, flat in row-major order.
    pub aliens: Vec<Alien>,
    pub bombs: Vec<Bomb>,
    pub beam: Beam,
    pub barriers: Vec<Barrier>,
    pub score: u32,
    pub lives: u32,
    /// Horizontal direction shared by the whole formation: +1 or -1.
    pub direction: i32,
    pub status: GameStatus,
    /// Set when `status` becomes `GameOver`.
    pub outcome: Option<Outcome>,
    pub frame: u64,
    /// Frames spent on the game-over screen (drives the blinking text).
    pub game_over_frames: u64,
    /// Sound cues raised by the most recent update, oldest first.
    pub cues: Vec<SoundCue>,
    pub config: GameConfig,
}

impl GameState {
    pub fn alive_aliens(&self) -> impl Iterator<Item = &Alien> {
        self.aliens.iter().filter(|a| a.is_alive())
    }
}
