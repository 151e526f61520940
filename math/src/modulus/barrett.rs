/// A value prepared for Shoup-style multiplication: (value, floor(value * 2^64 / q)).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Barrett<O>(pub O, pub O);

impl<O> Barrett<O> {
    #[inline(always)]
    pub fn value(&self) -> &O {
        &self.0
    }

    #[inline(always)]
    pub fn quotient(&self) -> &O {
        &self.1
    }
}

/// Barrett constants of a modulus q: floor(2^128 / q) split in (hi, lo) words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BarrettPrecomp<O> {
    pub q: O,
    pub two_q: O,
    pub four_q: O,
    pub lo: O,
    pub hi: O,
    pub one: Barrett<O>,
}
