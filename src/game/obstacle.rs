//! Falling obstacles. Spawned above the canvas on a random timer, they
//! descend at a fixed per-obstacle speed and end the run on contact.

use rand::Rng;

use crate::constants::*;
use crate::game::player::Player;
use crate::util;

#[derive(Debug, Clone)]
pub struct Obstacle {
    /// Sprite top-left in world coordinates.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Descent speed in px/s, fixed at spawn.
    pub speed: f64,
    pub frame_index: u32,
    pub frame_timer: f64,
}

impl Obstacle {
    /// Spawn just above the visible canvas at a random column and speed.
    pub fn spawn<R: Rng>(rng: &mut R, canvas_width: f64) -> Self {
        Self {
            x: util::random_float(rng, 0.0, canvas_width - OBSTACLE_SIZE),
            y: OBSTACLE_SPAWN_Y,
            width: OBSTACLE_SIZE,
            height: OBSTACLE_SIZE,
            speed: util::random_int(rng, OBSTACLE_SPEED_MIN, OBSTACLE_SPEED_MAX) as f64,
            frame_index: 0,
            frame_timer: 0.0,
        }
    }

    /// Descend and advance the spin animation.
    pub fn update(&mut self, delta: f64) {
        self.y += self.speed * delta;
        self.frame_timer += delta;
        if self.frame_timer >= OBSTACLE_ANIM_FRAME_TIME {
            self.frame_timer = 0.0;
            self.frame_index = (self.frame_index + 1) % ANIM_FRAME_COUNT;
        }
    }

    /// Contact test against the player's collision box.
    ///
    /// The obstacle's collider is inset from its sprite on every side, and
    /// edge touches do not count, so only a visibly real overlap kills.
    pub fn collides_with(&self, player: &Player) -> bool {
        let left = self.x + OBSTACLE_COLLIDER_INSET;
        let right = self.x + self.width - OBSTACLE_COLLIDER_INSET;
        let top = self.y + OBSTACLE_COLLIDER_INSET;
        let bottom = self.y + self.height - OBSTACLE_COLLIDER_INSET;

        player.collision_right() > left
            && player.collision_left() < right
            && player.collision_bottom() > top
            && player.collision_top() < bottom
    }
}
