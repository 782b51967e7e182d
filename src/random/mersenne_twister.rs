//! 64-bit Mersenne Twister PRNG (MT19937-64).
//!
//! The stock [`EntropySource`] of the crate. With a fixed seed the output
//! sequence is fully deterministic, which is what tests and reproducible
//! machine builds rely on.

use super::entropy::EntropySource;

const NN: usize = 312;
const MM: usize = 156;
const MATRIX_A: u64 = 0xB502_6F5A_A966_19E9;
/// Most significant 33 bits.
const UM: u64 = 0xFFFF_FFFF_8000_0000;
/// Least significant 31 bits.
const LM: u64 = 0x7FFF_FFFF;

/// Seed used by the reference implementation when none is given.
pub const DEFAULT_SEED: u64 = 5489;

/// 64-bit Mersenne Twister PRNG with period 2^19937-1.
#[derive(Clone)]
pub struct MersenneTwisterPlus {
    mt: [u64; NN],
    mti: usize,
    seed: u64,
}

impl MersenneTwisterPlus {
    /// Creates a new PRNG seeded from the system clock.
    ///
    /// The chosen seed is available through [`seed`](Self::seed) so that a
    /// run can be replayed with [`with_seed`](Self::with_seed).
    pub fn from_time() -> Self {
        let millis = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(DEFAULT_SEED);
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos() as u64)
            .unwrap_or(0);
        Self::with_seed(millis ^ (nanos << 20))
    }

    /// Creates a new PRNG with a fixed, deterministic seed.
    pub fn with_seed(seed: u64) -> Self {
        let mut mt = MersenneTwisterPlus {
            mt: [0u64; NN],
            mti: NN + 1,
            seed,
        };
        mt.init_genrand64();
        mt
    }

    /// Returns the seed this generator was initialized with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Initializes the state vector from the seed.
    fn init_genrand64(&mut self) {
        self.mt[0] = self.seed;
        for i in 1..NN {
            let prev = self.mt[i - 1];
            self.mt[i] = 6364136223846793005u64
                .wrapping_mul(prev ^ (prev >> 62))
                .wrapping_add(i as u64);
        }
        self.mti = NN;
    }

    /// Regenerates the whole state vector.
    fn twist(&mut self) {
        let mag01: [u64; 2] = [0, MATRIX_A];

        for i in 0..(NN - MM) {
            let x = (self.mt[i] & UM) | (self.mt[i + 1] & LM);
            self.mt[i] = self.mt[i + MM] ^ (x >> 1) ^ mag01[(x & 1) as usize];
        }
        for i in (NN - MM)..(NN - 1) {
            let x = (self.mt[i] & UM) | (self.mt[i + 1] & LM);
            self.mt[i] = self.mt[i + MM - NN] ^ (x >> 1) ^ mag01[(x & 1) as usize];
        }
        let x = (self.mt[NN - 1] & UM) | (self.mt[0] & LM);
        self.mt[NN - 1] = self.mt[MM - 1] ^ (x >> 1) ^ mag01[(x & 1) as usize];
        self.mti = 0;
    }

    /// Generates the next 64-bit pseudorandom value.
    pub fn next_long(&mut self) -> u64 {
        if self.mti >= NN {
            self.twist();
        }

        let mut x = self.mt[self.mti];
        self.mti += 1;

        // Tempering
        x ^= (x >> 29) & 0x5555_5555_5555_5555;
        x ^= (x << 17) & 0x71D6_7FFF_EDA6_0000;
        x ^= (x << 37) & 0xFFF7_EEE0_0000_0000;
        x ^= x >> 43;
        x
    }

    /// Generates a 63-bit non-negative pseudorandom value.
    pub fn next_long_63(&mut self) -> u64 {
        self.next_long() >> 1
    }
}

impl Default for MersenneTwisterPlus {
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }
}

impl EntropySource for MersenneTwisterPlus {
    fn next_u64(&mut self) -> u64 {
        self.next_long()
    }

    /// Bounded draw by rejection over 63-bit values, uniform in `[0, bound)`.
    fn next_below(&mut self, bound: usize) -> usize {
        if bound <= 1 {
            return 0;
        }
        let n = bound as u64;
        if n.is_power_of_two() {
            return ((n as u128 * self.next_long_63() as u128) >> 63) as usize;
        }
        loop {
            let bits = self.next_long_63();
            let val = bits % n;
            let accepted = (bits - val)
                .checked_add(n - 1)
                .is_some_and(|top| top <= i64::MAX as u64);
            if accepted {
                return val as usize;
            }
        }
    }
}

impl Drop for MersenneTwisterPlus {
    /// Clears the generator state on drop.
    fn drop(&mut self) {
        self.mt.fill(0);
        self.mti = 0;
        self.seed = 0;
    }
}
