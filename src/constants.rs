//! World dimensions and physics tuning.
//!
//! The game simulates a fixed 400x600 logical canvas regardless of terminal
//! size; scenes scale world coordinates to cells at draw time. All speeds
//! are px/s and all accelerations px/s^2 in canvas space.

// Canvas
pub const CANVAS_WIDTH: f64 = 400.0;
pub const CANVAS_HEIGHT: f64 = 600.0;

// Player
/// Sprite draw size (square).
pub const PLAYER_SPRITE_SIZE: f64 = 50.0;
/// Collision box, smaller than the sprite and shifted down for forgiving
/// landings.
pub const PLAYER_COLL_WIDTH: f64 = 50.0;
pub const PLAYER_COLL_HEIGHT: f64 = 40.0;
pub const PLAYER_COLL_OFFSET_Y: f64 = 10.0;
/// Downward acceleration.
pub const GRAVITY: f64 = 600.0;
/// Jump impulse (negative = upward).
pub const JUMP_POWER: f64 = -400.0;
/// Horizontal run speed.
pub const MOVE_SPEED: f64 = 180.0;
/// Spawn position: centered, standing on the ground platform.
pub const PLAYER_START_X: f64 = CANVAS_WIDTH / 2.0 - PLAYER_SPRITE_SIZE / 2.0;
pub const PLAYER_START_Y: f64 = CANVAS_HEIGHT - GROUND_HEIGHT - PLAYER_SPRITE_SIZE;

// Platforms
/// Full-width ground platform height.
pub const GROUND_HEIGHT: f64 = 30.0;
pub const PLATFORM_HEIGHT: f64 = 20.0;
pub const PLATFORM_WIDTH_MIN: f64 = 50.0;
pub const PLATFORM_WIDTH_MAX: f64 = 100.0;
/// Vertical gap between stacked platforms.
pub const PLATFORM_SPACING: f64 = 100.0;
/// Platforms generated at session start.
pub const INITIAL_PLATFORM_COUNT: usize = 20;
/// The generator keeps at least this many platforms alive.
pub const MIN_PLATFORM_BUFFER: usize = 10;
/// Kind odds. The starting stack is more dropping-heavy than the stream;
/// dropping is rolled first so the kinds stay mutually exclusive.
pub const DROPPING_CHANCE_INITIAL: f64 = 0.2;
pub const DROPPING_CHANCE_STREAM: f64 = 0.05;
pub const MOVING_CHANCE: f64 = 0.5;
/// Patrol speed for moving platforms.
pub const MOVING_PLATFORM_SPEED: f64 = 60.0;
/// Sink rate of a dropping platform while the player rides it.
pub const DROPPING_FALL_SPEED: f64 = 60.0;
/// A replenish spawn below this line aborts the top-up for the tick.
pub const SPAWN_FLOOR_MARGIN: f64 = 50.0;

// Obstacles
/// Sprite square size.
pub const OBSTACLE_SIZE: f64 = 50.0;
/// Collision box inset per side. Grazing the sprite edge is not a hit.
pub const OBSTACLE_COLLIDER_INSET: f64 = 8.0;
/// Fall speed range, rolled per spawn.
pub const OBSTACLE_SPEED_MIN: i32 = 120;
pub const OBSTACLE_SPEED_MAX: i32 = 240;
/// Spawn interval range in seconds, re-rolled after each spawn.
pub const OBSTACLE_INTERVAL_MIN: f64 = 3.0;
pub const OBSTACLE_INTERVAL_MAX: f64 = 7.0;
/// Obstacles enter one sprite-height above the canvas top.
pub const OBSTACLE_SPAWN_Y: f64 = -50.0;

// Animation
/// Frames per sprite strip.
pub const ANIM_FRAME_COUNT: u32 = 4;
/// Seconds per frame. Jump lingers on each frame longer.
pub const ANIM_IDLE_FRAME_TIME: f64 = 0.15;
pub const ANIM_ROLL_FRAME_TIME: f64 = 0.15;
pub const ANIM_JUMP_FRAME_TIME: f64 = 0.3;
pub const OBSTACLE_ANIM_FRAME_TIME: f64 = 0.2;

// Timing
/// Delta clamp in seconds. Keeps a stalled frame from exploding the physics.
pub const MAX_DELTA: f64 = 0.05;
