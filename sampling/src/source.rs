use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use rand_core::RngCore;

/// Returns a fresh 32-byte seed drawn from the operating system.
pub fn new_seed() -> [u8; 32] {
    let mut seed: [u8; 32] = [0u8; 32];
    rand::rng().fill_bytes(&mut seed);
    seed
}

/// Seeded source of randomness (ChaCha8).
///
/// Two sources created from the same seed produce the same stream, which makes
/// every key and ciphertext of the crate reproducible from its seeds.
pub struct Source {
    source: ChaCha8Rng,
}

impl Source {
    pub fn new(seed: [u8; 32]) -> Source {
        Source {
            source: ChaCha8Rng::from_seed(seed),
        }
    }

    /// Derives an independent child source, returning the seed it was built from.
    pub fn branch(&mut self) -> ([u8; 32], Self) {
        let seed: [u8; 32] = self.new_seed();
        (seed, Source::new(seed))
    }

    pub fn new_seed(&mut self) -> [u8; 32] {
        let mut seed: [u8; 32] = [0u8; 32];
        self.fill_bytes(&mut seed);
        seed
    }

    /// Returns a uniform value in [0, max) by rejection on `next_u64() & mask`.
    /// `mask` must cover `max - 1`.
    #[inline(always)]
    pub fn next_u64n(&mut self, max: u64, mask: u64) -> u64 {
        debug_assert!(max != 0, "invalid argument max: max = 0");
        debug_assert!(mask >= max - 1, "invalid mask: {} < max-1 = {}", mask, max - 1);
        let mut x: u64 = self.next_u64() & mask;
        while x >= max {
            x = self.next_u64() & mask;
        }
        x
    }

    /// Uniform value in {-1, 0, 1}.
    #[inline(always)]
    pub fn next_ternary(&mut self) -> i64 {
        self.next_u64n(3, 0b11) as i64 - 1
    }
}

impl RngCore for Source {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.source.next_u32()
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.source.next_u64()
    }

    #[inline(always)]
    fn fill_bytes(&mut self, bytes: &mut [u8]) {
        self.source.fill_bytes(bytes)
    }
}
