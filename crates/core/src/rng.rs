//! Sampling helpers over the simulation RNG.

use rand_chacha::rand_core::Rng;

use crate::types::Direction;

/// Uniform float in `[0, 1)` built from the top 53 bits of one draw.
pub fn unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    (rng.next_u64() >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
}

pub fn chance<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    unit(rng) < probability
}

/// Uniform index below `len`; `None` for an empty range.
pub fn pick_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Option<usize> {
    (len > 0).then(|| (rng.next_u64() % len as u64) as usize)
}

pub fn pick_direction<R: Rng + ?Sized>(rng: &mut R) -> Direction {
    Direction::ALL[(rng.next_u64() % 4) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    #[test]
    fn unit_stays_in_half_open_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..10_000 {
            let value = unit(&mut rng);
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn chance_extremes_are_exact() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!((0..1000).all(|_| !chance(&mut rng, 0.0)));
        assert!((0..1000).all(|_| chance(&mut rng, 1.0)));
    }

    #[test]
    fn pick_index_handles_empty_and_covers_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(pick_index(&mut rng, 0), None);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let index = pick_index(&mut rng, 4).expect("non-empty");
            seen[index] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }
}
