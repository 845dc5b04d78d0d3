//! Randomness seams.
//!
//! A session is reproducible from one master seed. The seed is split into named streams so the
//! wheel, the clock, the sacrifice intro and the presentation flicker each consume their own
//! sequence: adding a draw in one place never shifts the numbers seen in another.

use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use soulbet_types::{SecondsRange, TurnRange, POCKET_COUNT};

const WHEEL_STREAM: u64 = 0x5748_4545_4c00_0001;
const CLOCK_STREAM: u64 = 0x434c_4f43_4b00_0002;
const SACRIFICE_STREAM: u64 = 0x5341_4352_4900_0003;
const PRESENTATION_STREAM: u64 = 0x5052_4553_4500_0004;

/// Source of wheel draws.
pub trait Wheel {
    /// Draw a pocket in `0..=36`.
    fn spin(&mut self) -> u8;
}

/// Uniform wheel backed by any RNG.
#[derive(Clone, Debug)]
pub struct RandomWheel<R> {
    rng: R,
}

impl<R: RngCore> RandomWheel<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore> Wheel for RandomWheel<R> {
    fn spin(&mut self) -> u8 {
        self.rng.gen_range(0..POCKET_COUNT)
    }
}

/// Derives independent RNG streams from a master seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedStreams {
    seed: u64,
}

impl SeedStreams {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn wheel(&self) -> StdRng {
        self.stream(WHEEL_STREAM)
    }

    pub fn clock(&self) -> StdRng {
        self.stream(CLOCK_STREAM)
    }

    pub fn sacrifice(&self) -> StdRng {
        self.stream(SACRIFICE_STREAM)
    }

    pub fn presentation(&self) -> StdRng {
        self.stream(PRESENTATION_STREAM)
    }

    fn stream(&self, tag: u64) -> StdRng {
        StdRng::seed_from_u64(self.seed ^ tag)
    }
}

/// Sample seconds from a range; a fixed range yields its minimum without consuming randomness.
pub fn sample_seconds<R: Rng + ?Sized>(rng: &mut R, range: SecondsRange) -> f64 {
    if range.is_fixed() {
        range.min
    } else {
        rng.gen_range(range.min..range.max)
    }
}

/// Sample a turn number from an inclusive range.
pub fn sample_turn<R: Rng + ?Sized>(rng: &mut R, range: TurnRange) -> u32 {
    if range.min >= range.max {
        range.min
    } else {
        rng.gen_range(range.min..=range.max)
    }
}
