/// Compile-time defaults for every tunable in the game.
///
/// These are the authoritative values behind `GameConfig::default()`.
/// Positions and sizes are in world units: pixels of the 800×600 virtual
/// window the terminal front end scales down to character cells.

// ── Window ────────────────────────────────────────────────────────────────────

pub const WINDOW_WIDTH: i32 = 800;
pub const WINDOW_HEIGHT: i32 = 600;

// ── Alien formation ───────────────────────────────────────────────────────────

pub const ALIEN_ROWS: usize = 5;
pub const ALIEN_COLS: usize = 12;
pub const ALIEN_START_X: i32 = 100;
pub const ALIEN_START_Y: i32 = 30;
/// Nominal alien footprint; also the edge margin for direction reversal.
pub const ALIEN_SIZE: i32 = 30;
/// Horizontal gap added to `ALIEN_SIZE` between columns.
pub const ALIEN_COL_GAP: i32 = 10;
pub const ALIEN_ROW_SPACING: i32 = 30;
/// Horizontal distance every alien travels per tick.
pub const ALIEN_STEP: i32 = 5;
/// Vertical drop applied to the whole formation on each reversal.
pub const ALIEN_DESCENT: i32 = 10;
/// Frames an exploded alien keeps its explosion sprite before vanishing.
pub const ALIEN_EXPLOSION_FRAMES: u8 = 8;

// ── Projectiles ───────────────────────────────────────────────────────────────

pub const BOMB_PROBABILITY: f64 = 0.005;
pub const BOMB_SPEED: i32 = 10;
pub const BEAM_SPEED: i32 = 10;

// ── Cannon ────────────────────────────────────────────────────────────────────

pub const CANNON_SPEED: i32 = 10;
pub const CANNON_VERTICAL_SPEED: i32 = 5;
pub const CANNON_START_X: i32 = 50;
pub const CANNON_HOME_Y: i32 = 400;
pub const CANNON_MIN_Y: i32 = 100;
/// Frames the explosion sprite replaces the cannon after a bomb hit.
pub const CANNON_HIT_FRAMES: u8 = 12;
/// An alien whose Y passes `cannon.y - INVASION_MARGIN` ends the game.
pub const INVASION_MARGIN: i32 = 50;
/// Horizontal offset from a shooter's X to its projectile's X.
pub const MUZZLE_OFFSET: i32 = 7;

// ── Barriers ──────────────────────────────────────────────────────────────────

pub const BARRIER_Y: i32 = 300;
pub const BARRIER_COUNT: usize = 3;
pub const BARRIER_HIT_POINTS: u8 = 4;

// ── Sprite bounding boxes (w, h) ──────────────────────────────────────────────

pub const CANNON_SIZE: (i32, i32) = (18, 12);
pub const SQUID_SIZE: (i32, i32) = (20, 14);
pub const CRAB_SIZE: (i32, i32) = (20, 12);
pub const OCTOPUS_SIZE: (i32, i32) = (20, 13);
pub const BEAM_SIZE: (i32, i32) = (2, 5);
pub const BOMB_SIZE: (i32, i32) = (10, 9);
pub const BARRIER_SIZE: (i32, i32) = (40, 20);

// ── Rules ─────────────────────────────────────────────────────────────────────

pub const STARTING_LIVES: u32 = 3;
/// Upper bound for a configured life count; the HUD draws one heart each.
pub const MAX_STARTING_LIVES: u32 = 9;
pub const MAX_HIGH_SCORES: usize = 5;
/// Frames per blink phase of the game-over text.
pub const GAME_OVER_BLINK_FRAMES: u64 = 60;
pub const FRAME_MILLIS: u64 = 33;
