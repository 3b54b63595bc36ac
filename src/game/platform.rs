//! Platforms: the ledges the player climbs, including the patrolling and
//! dropping variants.

use crate::constants::*;
use crate::game::player::Player;

/// How close (in px) the player's feet must be to the platform top for the
/// dropping check to count as standing on it.
const CONTACT_SLACK: f64 = 5.0;

/// What a platform does besides holding the player up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformKind {
    Static,
    /// Patrols horizontally, reversing at the canvas edges.
    Moving,
    /// Sinks while the player stands on it. Rendered red as a warning.
    Dropping,
}

/// A single platform in world coordinates.
#[derive(Debug, Clone)]
pub struct Platform {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub kind: PlatformKind,
    /// Patrol direction: +1 right, -1 left. Only meaningful while moving.
    pub direction: f64,
}

impl Platform {
    pub fn new(x: f64, y: f64, width: f64, height: f64, kind: PlatformKind) -> Self {
        Self {
            x,
            y,
            width,
            height,
            kind,
            direction: 1.0,
        }
    }

    /// Horizontal velocity imparted to a player standing on this platform.
    pub fn carry_velocity(&self) -> f64 {
        match self.kind {
            PlatformKind::Moving => MOVING_PLATFORM_SPEED * self.direction,
            _ => 0.0,
        }
    }

    /// Advance platform state by `delta` seconds.
    ///
    /// Moving platforms patrol and reverse at the canvas edges. Dropping
    /// platforms re-check every tick whether the player is standing on top
    /// and sink only while that holds; stepping off stops the fall.
    pub fn update(&mut self, player: &Player, canvas_width: f64, delta: f64) {
        if self.kind == PlatformKind::Moving {
            self.x += MOVING_PLATFORM_SPEED * self.direction * delta;
            if self.x <= 0.0 || self.x + self.width >= canvas_width {
                self.direction = -self.direction;
            }
        }

        if self.kind == PlatformKind::Dropping && self.supports(player) {
            self.y += DROPPING_FALL_SPEED * delta;
        }
    }

    /// True if the player's collision box is resting on this platform's top.
    fn supports(&self, player: &Player) -> bool {
        player.collision_right() > self.x
            && player.collision_left() < self.x + self.width
            && (player.collision_bottom() - self.y).abs() < CONTACT_SLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform(kind: PlatformKind) -> Platform {
        Platform::new(100.0, 300.0, 80.0, PLATFORM_HEIGHT, kind)
    }

    /// Player with its collision box bottom sitting exactly on `p`'s top.
    fn player_standing_on(p: &Platform) -> Player {
        let mut player = Player::new();
        player.x = p.x + 10.0;
        player.y = p.y - PLAYER_COLL_HEIGHT - PLAYER_COLL_OFFSET_Y;
        player
    }

    #[test]
    fn test_static_platform_never_moves() {
        let mut p = platform(PlatformKind::Static);
        let player = player_standing_on(&p);
        p.update(&player, CANVAS_WIDTH, 0.1);
        assert_eq!(p.x, 100.0);
        assert_eq!(p.y, 300.0);
    }

    #[test]
    fn test_moving_platform_patrols() {
        let mut p = platform(PlatformKind::Moving);
        let player = Player::new();
        p.update(&player, CANVAS_WIDTH, 0.1);
        assert!((p.x - 106.0).abs() < 1e-9, "60 px/s for 0.1s moves 6px");
    }

    #[test]
    fn test_moving_platform_reverses_at_right_edge() {
        let mut p = platform(PlatformKind::Moving);
        p.x = CANVAS_WIDTH - p.width - 1.0;
        let player = Player::new();
        p.update(&player, CANVAS_WIDTH, 0.1);
        assert_eq!(p.direction, -1.0);

        // Next tick moves left
        let x_before = p.x;
        p.update(&player, CANVAS_WIDTH, 0.1);
        assert!(p.x < x_before);
    }

    #[test]
    fn test_moving_platform_reverses_at_left_edge() {
        let mut p = platform(PlatformKind::Moving);
        p.x = 1.0;
        p.direction = -1.0;
        let player = Player::new();
        p.update(&player, CANVAS_WIDTH, 0.1);
        assert_eq!(p.direction, 1.0);
    }

    #[test]
    fn test_dropping_platform_sinks_while_ridden() {
        let mut p = platform(PlatformKind::Dropping);
        let player = player_standing_on(&p);
        p.update(&player, CANVAS_WIDTH, 0.1);
        assert!((p.y - 306.0).abs() < 1e-9, "60 px/s for 0.1s sinks 6px");
    }

    #[test]
    fn test_dropping_platform_stops_when_player_leaves() {
        let mut p = platform(PlatformKind::Dropping);
        let mut player = player_standing_on(&p);
        p.update(&player, CANVAS_WIDTH, 0.1);
        let y_after_ride = p.y;

        // Player steps far away horizontally
        player.x = p.x + p.width + 100.0;
        p.update(&player, CANVAS_WIDTH, 0.1);
        assert_eq!(p.y, y_after_ride);
    }

    #[test]
    fn test_dropping_platform_ignores_player_far_above() {
        let mut p = platform(PlatformKind::Dropping);
        let mut player = player_standing_on(&p);
        player.y -= 50.0;
        p.update(&player, CANVAS_WIDTH, 0.1);
        assert_eq!(p.y, 300.0);
    }

    #[test]
    fn test_carry_velocity_by_kind() {
        assert_eq!(platform(PlatformKind::Static).carry_velocity(), 0.0);
        assert_eq!(platform(PlatformKind::Dropping).carry_velocity(), 0.0);

        let mut moving = platform(PlatformKind::Moving);
        assert_eq!(moving.carry_velocity(), MOVING_PLATFORM_SPEED);
        moving.direction = -1.0;
        assert_eq!(moving.carry_velocity(), -MOVING_PLATFORM_SPEED);
    }
}
