//! Platform generation: the starting tower and the top-up stream that
//! keeps the climb endless.

use rand::Rng;

use crate::constants::*;
use crate::game::platform::{Platform, PlatformKind};
use crate::util;

/// Roll a platform kind. Dropping wins its roll outright; moving is only
/// considered after, so a platform is never both.
fn roll_kind<R: Rng>(rng: &mut R, dropping_chance: f64) -> PlatformKind {
    if rng.gen_bool(dropping_chance) {
        PlatformKind::Dropping
    } else if rng.gen_bool(MOVING_CHANCE) {
        PlatformKind::Moving
    } else {
        PlatformKind::Static
    }
}

fn random_platform<R: Rng>(
    rng: &mut R,
    y: f64,
    canvas_width: f64,
    dropping_chance: f64,
) -> Platform {
    let width = util::random_float(rng, PLATFORM_WIDTH_MIN, PLATFORM_WIDTH_MAX);
    let x = util::random_float(rng, 0.0, canvas_width - width);
    Platform::new(x, y, width, PLATFORM_HEIGHT, roll_kind(rng, dropping_chance))
}

/// Build the starting layout: a full-width ground slab topped by a tower
/// of random platforms one spacing apart, `INITIAL_PLATFORM_COUNT` in all.
/// Later entries sit higher, so the last platform is always the current
/// ceiling of the layout.
pub fn generate_platforms<R: Rng>(
    rng: &mut R,
    canvas_width: f64,
    canvas_height: f64,
) -> Vec<Platform> {
    let ground_y = canvas_height - GROUND_HEIGHT;
    let mut platforms = vec![Platform::new(
        0.0,
        ground_y,
        canvas_width,
        GROUND_HEIGHT,
        PlatformKind::Static,
    )];

    for i in 1..INITIAL_PLATFORM_COUNT {
        let y = ground_y - i as f64 * PLATFORM_SPACING;
        platforms.push(random_platform(
            rng,
            y,
            canvas_width,
            DROPPING_CHANCE_INITIAL,
        ));
    }

    platforms
}

/// Top the layout back up after culling, one spacing above the current
/// ceiling, until the buffer holds again. A candidate that would land in
/// the floor margin stops the pass; every later candidate would anchor
/// off it and land there too.
pub fn replenish_platforms<R: Rng>(
    rng: &mut R,
    platforms: &mut Vec<Platform>,
    canvas_width: f64,
    canvas_height: f64,
) {
    while platforms.len() < MIN_PLATFORM_BUFFER {
        let anchor = platforms.last().map(|p| p.y).unwrap_or(canvas_height);
        let y = anchor - PLATFORM_SPACING;
        if y > canvas_height - SPAWN_FLOOR_MARGIN {
            break;
        }
        platforms.push(random_platform(rng, y, canvas_width, DROPPING_CHANCE_STREAM));
    }
}
