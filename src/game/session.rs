//! One run of the game, from the first jump to the game-over screen.
//! The session owns the world and advances it in a fixed order each tick;
//! scenes only read it.

use rand::Rng;

use crate::constants::*;
use crate::game::input::Intent;
use crate::game::level;
use crate::game::obstacle::Obstacle;
use crate::game::platform::Platform;
use crate::game::player::Player;
use crate::util;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// An obstacle hit the player.
    Struck,
    /// The player fell below the canvas.
    Fell,
}

/// Live state for a single run. A restart builds a fresh session.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub obstacles: Vec<Obstacle>,
    /// Total upward distance the camera has scrolled. Never decreases.
    pub camera_y: f64,
    /// Best climb progress seen so far, in world pixels.
    pub highest_progress: f64,
    /// The displayed score: floor of the best progress.
    pub score: u32,
    /// Player spawn height, the zero line for progress.
    pub initial_y: f64,
    pub obstacle_spawn_timer: f64,
    pub next_spawn_interval: f64,
    /// Set once; a finished session never changes again.
    pub outcome: Option<GameOutcome>,
}

impl GameSession {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let player = Player::new();
        let initial_y = player.y;
        Self {
            player,
            platforms: level::generate_platforms(rng, CANVAS_WIDTH, CANVAS_HEIGHT),
            obstacles: Vec::new(),
            camera_y: 0.0,
            highest_progress: 0.0,
            score: 0,
            initial_y,
            obstacle_spawn_timer: 0.0,
            next_spawn_interval: util::random_float(
                rng,
                OBSTACLE_INTERVAL_MIN,
                OBSTACLE_INTERVAL_MAX,
            ),
            outcome: None,
        }
    }

    /// Feed a steering intent to the player. Ignored once the run is over.
    pub fn apply_intent(&mut self, intent: Intent) {
        if self.outcome.is_some() {
            return;
        }
        match intent {
            Intent::MoveLeft => self.player.move_left(),
            Intent::MoveRight => self.player.move_right(),
            Intent::Stop => self.player.stop(),
            Intent::Jump(pressed) => self.player.jump(pressed),
        }
    }

    /// Advance the world by `delta` seconds. Returns true on the tick the
    /// run ends; a finished session ignores further ticks.
    pub fn tick<R: Rng>(&mut self, rng: &mut R, delta: f64) -> bool {
        if self.outcome.is_some() {
            return false;
        }

        // 1. Clamp the frame delta so a stalled frame cannot tunnel the
        // player through a platform
        let delta = delta.min(MAX_DELTA);

        // 2. Camera. Above the midline the whole world shifts down by the
        // player's vertical pace, before physics runs, so the climb reads
        // as platforms streaming past a pinned player
        if self.player.y < CANVAS_HEIGHT / 2.0 {
            let scroll = self.player.dy.abs() * delta;
            self.player.y += scroll;
            for platform in &mut self.platforms {
                platform.y += scroll;
            }
            for obstacle in &mut self.obstacles {
                obstacle.y += scroll;
            }
            self.camera_y += scroll;
        }

        // 3. Score, read off the camera-adjusted position before physics
        // runs. Until the camera first moves, progress is height above the
        // spawn point; afterwards it is the scrolled distance plus the
        // fixed spawn-to-midline climb. Only the best value counts
        let progress = if self.camera_y == 0.0 {
            self.initial_y - self.player.y
        } else {
            (self.initial_y - CANVAS_HEIGHT / 2.0) + self.camera_y
        };
        if progress > self.highest_progress {
            self.highest_progress = progress;
        }
        self.score = self.highest_progress.floor() as u32;

        // 4. Cull platforms that scrolled off the bottom, then top the
        // layout back up, before the player resolves against the set
        self.platforms.retain(|p| p.y < CANVAS_HEIGHT);
        level::replenish_platforms(rng, &mut self.platforms, CANVAS_WIDTH, CANVAS_HEIGHT);

        // 5. Player physics against the current platforms
        self.player.update(&self.platforms, CANVAS_WIDTH, delta);

        // 6. Platform motion: patrols reverse at the walls, held dropping
        // platforms sink under the player
        for platform in &mut self.platforms {
            platform.update(&self.player, CANVAS_WIDTH, delta);
        }

        // 7. Obstacles: spawn on the timer, fall, cull below the canvas
        self.obstacle_spawn_timer += delta;
        if self.obstacle_spawn_timer >= self.next_spawn_interval {
            self.obstacles.push(Obstacle::spawn(rng, CANVAS_WIDTH));
            self.obstacle_spawn_timer = 0.0;
            self.next_spawn_interval =
                util::random_float(rng, OBSTACLE_INTERVAL_MIN, OBSTACLE_INTERVAL_MAX);
        }
        for obstacle in &mut self.obstacles {
            obstacle.update(delta);
        }
        self.obstacles.retain(|o| o.y < CANVAS_HEIGHT + o.height);

        // 8. End conditions. An obstacle strike is checked before the fall
        // so dying mid-air to a hit reports as a hit
        for obstacle in &self.obstacles {
            if obstacle.collides_with(&self.player) {
                self.outcome = Some(GameOutcome::Struck);
                break;
            }
        }
        if self.outcome.is_none() && self.player.y > CANVAS_HEIGHT {
            self.outcome = Some(GameOutcome::Fell);
        }

        self.outcome.is_some()
    }
}
