// Random number source used for stat growth trials

use rand::rngs::{StdRng, ThreadRng};
use rand::Rng;

/// Uniform integer source
pub trait RandomSource {
    /// Uniform integer in `[0, n)`
    fn below(&mut self, n: u32) -> u32;
}

impl RandomSource for StdRng {
    fn below(&mut self, n: u32) -> u32 {
        self.gen_range(0..n)
    }
}

impl RandomSource for ThreadRng {
    fn below(&mut self, n: u32) -> u32 {
        self.gen_range(0..n)
    }
}
