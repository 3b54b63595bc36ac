//! Random helpers shared by level generation and obstacle spawning.
//!
//! Generic over `Rng` so callers can pass a seeded generator in tests.

use rand::Rng;

/// Random integer in `[min, max]` inclusive.
pub fn random_int<R: Rng>(rng: &mut R, min: i32, max: i32) -> i32 {
    rng.gen_range(min..=max)
}

/// Random float in `[min, max)`.
pub fn random_float<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    rng.gen_range(min..max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_int_stays_in_range() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let v = random_int(&mut rng, 50, 100);
            assert!((50..=100).contains(&v));
        }
    }

    #[test]
    fn test_random_int_degenerate_range() {
        let mut rng = rand::thread_rng();
        assert_eq!(random_int(&mut rng, 7, 7), 7);
    }

    #[test]
    fn test_random_float_stays_in_range() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let v = random_float(&mut rng, 3.0, 7.0);
            assert!((3.0..7.0).contains(&v));
        }
    }
}
