use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    fn uniform(&mut self, low: f32, high: f32) -> f32;

    fn bernoulli(&mut self, probability: f32) -> bool {
        self.uniform(0.0, 1.0) < probability
    }
}

#[derive(Debug, Clone)]
pub struct StdRandomSource {
    rng: StdRng,
}

impl StdRandomSource {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for StdRandomSource {
    fn uniform(&mut self, low: f32, high: f32) -> f32 {
        self.rng.gen_range(low..high)
    }
}
