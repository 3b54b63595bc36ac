//! The player: physics integration, platform resolution, and the animation
//! state machine that picks which sprite strip the scene draws.

use crate::constants::*;
use crate::game::platform::{Platform, PlatformKind};

/// Which sprite strip the player is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimState {
    Idle,
    Roll,
    Jump,
}

impl AnimState {
    /// Seconds per animation frame.
    pub fn frame_time(&self) -> f64 {
        match self {
            AnimState::Idle => ANIM_IDLE_FRAME_TIME,
            AnimState::Roll => ANIM_ROLL_FRAME_TIME,
            AnimState::Jump => ANIM_JUMP_FRAME_TIME,
        }
    }
}

/// Pick the animation for the current physics state.
///
/// Steering always reads as a roll, airborne or not; airborne without
/// steering is the jump pose; standing still idles.
pub fn select_animation(on_ground: bool, dx: f64) -> AnimState {
    if !on_ground && dx != 0.0 {
        AnimState::Roll
    } else if !on_ground {
        AnimState::Jump
    } else if dx != 0.0 {
        AnimState::Roll
    } else {
        AnimState::Idle
    }
}

/// The player entity. One per session; a restart builds a fresh one.
#[derive(Debug, Clone)]
pub struct Player {
    /// Sprite top-left in world coordinates.
    pub x: f64,
    pub y: f64,
    /// Velocity in px/s. Positive dy is downward.
    pub dx: f64,
    pub dy: f64,
    /// Set by the platform resolution pass each tick.
    pub on_ground: bool,
    /// One mid-air impulse per airtime; re-armed by landing.
    pub double_jump_used: bool,
    /// Edge detector for the jump key. Holding never re-triggers.
    pub jump_key_released: bool,
    pub anim: AnimState,
    pub frame_index: u32,
    pub frame_timer: f64,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// Spawn centered, standing on the ground platform.
    pub fn new() -> Self {
        Self {
            x: PLAYER_START_X,
            y: PLAYER_START_Y,
            dx: 0.0,
            dy: 0.0,
            on_ground: false,
            double_jump_used: false,
            jump_key_released: true,
            anim: AnimState::Idle,
            frame_index: 0,
            frame_timer: 0.0,
        }
    }

    // Collision box edges. The box is narrower than the sprite and shifted
    // down so near-misses still read as landings.

    pub fn collision_left(&self) -> f64 {
        self.x
    }

    pub fn collision_right(&self) -> f64 {
        self.x + PLAYER_COLL_WIDTH
    }

    pub fn collision_top(&self) -> f64 {
        self.y + PLAYER_COLL_OFFSET_Y
    }

    pub fn collision_bottom(&self) -> f64 {
        self.y + PLAYER_COLL_OFFSET_Y + PLAYER_COLL_HEIGHT
    }

    pub fn move_left(&mut self) {
        self.dx = -MOVE_SPEED;
    }

    pub fn move_right(&mut self) {
        self.dx = MOVE_SPEED;
    }

    pub fn stop(&mut self) {
        self.dx = 0.0;
    }

    /// Handle a jump key transition. `pressed` is the key's new state.
    ///
    /// The press edge grants an impulse from the ground, or one mid-air
    /// impulse if the double jump is still available. Holding does nothing
    /// until the key is released; release re-arms the edge.
    pub fn jump(&mut self, pressed: bool) {
        if pressed && self.jump_key_released {
            if self.on_ground {
                self.dy = JUMP_POWER;
                self.on_ground = false;
            } else if !self.double_jump_used {
                self.dy = JUMP_POWER;
                self.double_jump_used = true;
            }
            self.jump_key_released = false;
        }
        if !pressed {
            self.jump_key_released = true;
        }
    }

    /// Advance physics by `delta` seconds and resolve against `platforms`.
    pub fn update(&mut self, platforms: &[Platform], canvas_width: f64, delta: f64) {
        // 1. Gravity and integration
        self.dy += GRAVITY * delta;
        self.y += self.dy * delta;
        self.x += self.dx * delta;

        // 2. Vertical resolution: landing and head bump. Box edges are
        // captured once after integration; the sweep reads dy live, so a
        // platform that already stopped the fall leaves the rest of the
        // pass inert.
        let box_top = self.collision_top();
        let box_bottom = self.collision_bottom();
        let box_left = self.collision_left();
        let box_right = self.collision_right();

        let mut on_platform = false;
        let mut carry = 0.0;

        for platform in platforms {
            if box_right <= platform.x || box_left >= platform.x + platform.width {
                continue;
            }

            // Landing: falling, and the box bottom crossed the platform top
            // this tick.
            if self.dy >= 0.0
                && box_bottom >= platform.y
                && box_bottom - self.dy * delta <= platform.y
            {
                self.dy = if platform.kind == PlatformKind::Dropping {
                    // Ride the sinking platform at its own rate
                    DROPPING_FALL_SPEED
                } else {
                    0.0
                };
                self.y = platform.y - PLAYER_COLL_HEIGHT - PLAYER_COLL_OFFSET_Y;
                on_platform = true;
                self.double_jump_used = false;
                carry = platform.carry_velocity();
            }

            // Head bump: rising into the platform underside.
            let underside = platform.y + platform.height;
            if self.dy < 0.0 && box_top < underside && box_top - self.dy * delta >= underside {
                self.dy = 0.0;
                self.y = underside - PLAYER_COLL_OFFSET_Y;
            }
        }

        self.on_ground = on_platform;
        if on_platform {
            self.x += carry * delta;
        }

        // 3. Side block: walking into a platform face stops at the face
        // instead of clipping through. Runs after the vertical pass so a
        // landing snap wins; the platform under the player's feet never
        // matches the overlap test.
        let box_top = self.collision_top();
        let box_bottom = self.collision_bottom();
        for platform in platforms {
            if box_bottom <= platform.y || box_top >= platform.y + platform.height {
                continue;
            }
            let box_left = self.collision_left();
            let box_right = self.collision_right();
            if self.dx > 0.0 && box_right > platform.x && box_right - self.dx * delta <= platform.x
            {
                self.x = platform.x - PLAYER_COLL_WIDTH;
            } else if self.dx < 0.0
                && box_left < platform.x + platform.width
                && box_left - self.dx * delta >= platform.x + platform.width
            {
                self.x = platform.x + platform.width;
            }
        }

        // 4. Constrain to the canvas
        if self.x < 0.0 {
            self.x = 0.0;
        }
        if self.x + PLAYER_COLL_WIDTH > canvas_width {
            self.x = canvas_width - PLAYER_COLL_WIDTH;
        }

        // 5. Animation
        self.anim = select_animation(self.on_ground, self.dx);
        self.frame_timer += delta;
        if self.frame_timer >= self.anim.frame_time() {
            self.frame_timer = 0.0;
            self.frame_index = (self.frame_index + 1) % ANIM_FRAME_COUNT;
        }
    }
}
