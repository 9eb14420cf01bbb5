//! Deterministic random rolls.
//!
//! Every roll is a pure function of a seed. Seeds are mixed from the encounter
//! seed, the round, the rolling unit and a per-roll context, so replaying an
//! encounter with the same inputs yields the same decisions.

/// Source of deterministic random numbers.
pub trait RngOracle: Send + Sync {
    /// Derives a u32 from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Rolls a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Returns true with `percent`% probability.
    fn chance(&self, seed: u64, percent: u32) -> bool {
        self.roll_d100(seed) <= percent
    }
}

/// PCG-XSH-RR generator: one LCG step followed by an xorshift and a random
/// rotation of the high bits.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Roll contexts, so independent rolls by the same unit in the same round
/// never share a seed.
pub mod roll_context {
    pub const DEFEND: u32 = 1;
}

/// Mixes encounter seed, round, unit and roll context into one seed.
pub fn compute_seed(encounter_seed: u64, round: u32, unit: u32, context: u32) -> u64 {
    let mut hash = encounter_seed;
    hash ^= u64::from(round).wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(unit).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    // avalanche
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}
