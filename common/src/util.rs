use serde::{Deserialize, Serialize};

/// Source of uniformly distributed integers for food placement.
pub trait RandomGenerator {
    fn next_u32(&mut self) -> u32;

    /// Uniform-ish value in `0..bound`. `bound` must be non-zero.
    fn next_below(&mut self, bound: u32) -> u32 {
        self.next_u32() % bound
    }
}

// Simple pseudorandom number generator using xorshift algorithm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PseudoRandom {
    state: u64,
}

impl PseudoRandom {
    pub fn new(seed: u64) -> Self {
        // xorshift never leaves the all-zero state
        let state = if seed == 0 { 0x1234567890abcdef } else { seed };
        PseudoRandom { state }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }
}

impl RandomGenerator for PseudoRandom {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }
}
