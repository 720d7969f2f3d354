use rand::{Rng, SeedableRng, rngs::StdRng};

mod dfs;
mod stack;

pub use dfs::{DfsGenerator, StepOutcome};
pub use stack::BacktrackStack;

/// Source of uniformly distributed integers, the only randomness the generator depends on.
pub trait UniformSource {
    /// Returns an integer in `0..n`. `n` must be positive.
    fn uniform_int(&mut self, n: usize) -> usize;
}

/// Adapts any `rand` generator to [`UniformSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        RngSource(rng)
    }
}

impl<R: Rng> UniformSource for RngSource<R> {
    fn uniform_int(&mut self, n: usize) -> usize {
        self.0.random_range(0..n)
    }
}

/// Get a random number generator, optionally seeded for reproducibility.
/// Without a seed the generator is keyed from the operating system's entropy source;
/// failing to read it is reported as an error.
pub fn get_rng(seed: Option<u64>) -> std::io::Result<StdRng> {
    match seed {
        Some(s) => Ok(StdRng::seed_from_u64(s)),
        None => StdRng::try_from_os_rng().map_err(std::io::Error::other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = RngSource::new(get_rng(Some(7)).unwrap());
        let mut b = RngSource::new(get_rng(Some(7)).unwrap());
        let xs = (0..32).map(|_| a.uniform_int(4)).collect::<Vec<_>>();
        let ys = (0..32).map(|_| b.uniform_int(4)).collect::<Vec<_>>();
        assert_eq!(xs, ys);
        assert!(xs.iter().all(|&x| x < 4));
    }

    #[test]
    fn test_single_candidate_is_forced() {
        let mut source = RngSource::new(get_rng(None).unwrap());
        for _ in 0..16 {
            assert_eq!(source.uniform_int(1), 0);
        }
    }
}
