pub mod barrett;
pub mod impl_u64;
pub mod prime;

pub type REDUCEMOD = u8;

pub const NONE: REDUCEMOD = 0;
pub const ONCE: REDUCEMOD = 1;
pub const TWICE: REDUCEMOD = 2;
pub const FOURTIMES: REDUCEMOD = 3;
pub const BARRETT: REDUCEMOD = 4;
pub const BARRETTLAZY: REDUCEMOD = 5;

pub trait WordOps<O> {
    fn log2(self) -> O;
    fn reverse_bits_msb(self, n: u32) -> O;
    fn mask(self) -> O;
}

impl WordOps<u64> for u64 {
    #[inline(always)]
    fn log2(self) -> u64 {
        (u64::BITS - (self - 1).leading_zeros()) as _
    }
    #[inline(always)]
    fn reverse_bits_msb(self, n: u32) -> u64 {
        self.reverse_bits() >> (u64::BITS - n)
    }
    #[inline(always)]
    fn mask(self) -> u64 {
        (1 << self.log2()) - 1
    }
}

impl WordOps<usize> for usize {
    #[inline(always)]
    fn log2(self) -> usize {
        (usize::BITS - (self - 1).leading_zeros()) as _
    }
    #[inline(always)]
    fn reverse_bits_msb(self, n: u32) -> usize {
        self.reverse_bits() >> (usize::BITS - n)
    }
    #[inline(always)]
    fn mask(self) -> usize {
        (1 << self.log2()) - 1
    }
}

pub trait ReduceOnce<O> {
    /// Assigns self-q to self if self >= q in constant time.
    /// User must ensure that 2q fits in O.
    fn reduce_once_constant_time_assign(&mut self, q: O);
    /// Returns self-q if self >= q else self in constant time.
    /// User must ensure that 2q fits in O.
    fn reduce_once_constant_time(&self, q: O) -> O;
    /// Assigns self-q to self if self >= q.
    /// User must ensure that 2q fits in O.
    fn reduce_once_assign(&mut self, q: O);
    /// Returns self-q if self >= q else self.
    /// User must ensure that 2q fits in O.
    fn reduce_once(&self, q: O) -> O;
}

/// Maps x in [0, q_from) to round(x * q_to / q_from) mod q_to.
/// Ties are rounded up.
///
/// Panics if either modulus is zero.
#[inline(always)]
pub fn mod_switch(x: u64, q_from: u64, q_to: u64) -> u64 {
    assert!(q_from != 0, "invalid modulus: q_from = 0");
    assert!(q_to != 0, "invalid modulus: q_to = 0");
    debug_assert!(x < q_from, "invalid x: {} >= q_from={}", x, q_from);
    let num: u128 = x as u128 * q_to as u128 + (q_from as u128 >> 1);
    ((num / q_from as u128) % q_to as u128) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mod_switch_rounding() {
        // 3 * 4 / 8 = 1.5 rounds up.
        assert_eq!(mod_switch(3, 8, 4), 2);
        // 5 * 4 / 8 = 2.5 rounds up.
        assert_eq!(mod_switch(5, 8, 4), 3);
        // 7 * 4 / 8 = 3.5 wraps to 0.
        assert_eq!(mod_switch(7, 8, 4), 0);
        assert_eq!(mod_switch(1 << 20, 1 << 22, 1024), 256);
        let q: u64 = 134215681;
        assert_eq!(mod_switch(q / 4, q, 1024), 256);
    }

    #[test]
    #[should_panic]
    fn mod_switch_zero_modulus() {
        mod_switch(0, 0, 4);
    }

    #[test]
    fn word_ops() {
        assert_eq!(1024u64.log2(), 10);
        assert_eq!(1000usize.log2(), 10);
        assert_eq!(1000u64.mask(), 1023);
        assert_eq!(1usize.reverse_bits_msb(3), 4);
        assert_eq!(6u64.reverse_bits_msb(3), 3);
    }
}
