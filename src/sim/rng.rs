//! Seedable random source for spawn decisions

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform randomness the simulation draws from
pub trait RandomSource {
    /// Uniform in [0, 1)
    fn next_f64(&mut self) -> f64;

    /// Fair coin flip
    fn next_bool(&mut self) -> bool {
        self.next_f64() < 0.5
    }
}

/// PCG-backed generator; same seed, same run
#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u64,
    rng: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seeded from the wall clock (seconds since the epoch)
    pub fn from_time() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SimRng {
    fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn next_bool(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }
}

/// Replays a fixed list of values, cycling; used to pin spawn sides in tests
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<f64>,
    index: usize,
}

#[cfg(test)]
impl ScriptedRng {
    pub fn new(values: &[f64]) -> Self {
        assert!(!values.is_empty());
        Self {
            values: values.to_vec(),
            index: 0,
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRng {
    fn next_f64(&mut self) -> f64 {
        let v = self.values[self.index % self.values.len()];
        self.index += 1;
        v
    }
}
