//! Seedable pseudo-random number generator (xorshift64).
//! Deterministic, fast, no external crates. Used only at construction time
//! for the minor-body belt and the backdrop.

use glam::Vec3;

#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform float in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        // Top 24 bits map exactly onto the f32 mantissa.
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform float in [min, max).
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next_f32()
    }

    /// Uniform float in [-magnitude, magnitude).
    pub fn signed(&mut self, magnitude: f32) -> f32 {
        self.range(-magnitude, magnitude)
    }

    /// Uniformly distributed unit vector.
    pub fn unit_vector(&mut self) -> Vec3 {
        let z = self.range(-1.0, 1.0);
        let theta = self.range(0.0, std::f32::consts::TAU);
        let r = (1.0 - z * z).max(0.0).sqrt();
        Vec3::new(r * theta.cos(), r * theta.sin(), z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_deterministic() {
        let mut rng1 = Rng::new(42);
        let mut rng2 = Rng::new(42);
        for _ in 0..10 {
            assert_eq!(rng1.next_f32(), rng2.next_f32());
        }
    }

    #[test]
    fn rng_zero_seed_handled() {
        let mut rng = Rng::new(0);
        let _ = rng.next_f32();
    }

    #[test]
    fn range_stays_in_bounds() {
        let mut rng = Rng::new(7);
        for _ in 0..1000 {
            let v = rng.range(170.0, 230.0);
            assert!((170.0..230.0).contains(&v), "v = {v}");
        }
    }

    #[test]
    fn unit_vector_is_normalized() {
        let mut rng = Rng::new(9);
        for _ in 0..100 {
            assert!((rng.unit_vector().length() - 1.0).abs() < 1e-4);
        }
    }
}
