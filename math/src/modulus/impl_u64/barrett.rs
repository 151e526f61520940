use crate::modulus::barrett::{Barrett, BarrettPrecomp};
use crate::modulus::ReduceOnce;
use crate::modulus::{BARRETT, BARRETTLAZY, FOURTIMES, NONE, ONCE, REDUCEMOD, TWICE};

impl BarrettPrecomp<u64> {
    /// Panics if q < 2, if q is a power of two or if q >= 2^62.
    pub fn new(q: u64) -> BarrettPrecomp<u64> {
        assert!(q > 1, "invalid modulus: q = {} < 2", q);
        assert!(q & (q - 1) != 0, "invalid modulus: q = {} is a power of two", q);
        assert!(q < 1 << 62, "invalid modulus: q = {} >= 2^62", q);
        // q is not a power of two, so floor((2^128-1)/q) = floor(2^128/q).
        let big_r: u128 = u128::MAX / q as u128;
        let lo: u64 = big_r as u64;
        let hi: u64 = (big_r >> 64) as u64;
        let mut precomp: BarrettPrecomp<u64> = Self {
            q,
            two_q: q << 1,
            four_q: q << 2,
            lo,
            hi,
            one: Barrett(0, 0),
        };
        precomp.one = precomp.prepare(1);
        precomp
    }

    #[inline(always)]
    pub fn one(&self) -> Barrett<u64> {
        self.one
    }

    #[inline(always)]
    pub fn reduce_assign<const REDUCE: REDUCEMOD>(&self, x: &mut u64) {
        match REDUCE {
            NONE => {}
            ONCE => x.reduce_once_assign(self.q),
            TWICE => x.reduce_once_assign(self.two_q),
            FOURTIMES => x.reduce_once_assign(self.four_q),
            BARRETT => {
                let mhi: u64 = ((*x as u128 * self.hi as u128) >> 64) as u64;
                *x -= mhi.wrapping_mul(self.q);
                x.reduce_once_assign(self.two_q);
                x.reduce_once_assign(self.q);
            }
            BARRETTLAZY => {
                let mhi: u64 = ((*x as u128 * self.hi as u128) >> 64) as u64;
                *x -= mhi.wrapping_mul(self.q)
            }
            _ => unreachable!("invalid REDUCE argument"),
        }
    }

    #[inline(always)]
    pub fn reduce<const REDUCE: REDUCEMOD>(&self, x: &u64) -> u64 {
        let mut r: u64 = *x;
        self.reduce_assign::<REDUCE>(&mut r);
        r
    }

    /// Returns x mod q for any x < q * 2^64.
    #[inline(always)]
    pub fn reduce_u128(&self, x: u128) -> u64 {
        let x0: u64 = x as u64;
        let x1: u64 = (x >> 64) as u64;
        debug_assert!(x1 < self.q, "invalid x: x >= q * 2^64");
        let carry: u128 = (x0 as u128 * self.lo as u128) >> 64;
        let (mid, c0) =
            (x0 as u128 * self.hi as u128).overflowing_add(x1 as u128 * self.lo as u128);
        let (mid, c1) = mid.overflowing_add(carry);
        let quotient: u128 =
            x1 as u128 * self.hi as u128 + (mid >> 64) + ((c0 as u128 + c1 as u128) << 64);
        // quotient underestimates floor(x/q) by at most 1.
        let mut r: u64 = x.wrapping_sub(quotient.wrapping_mul(self.q as u128)) as u64;
        r.reduce_once_assign(self.two_q);
        r.reduce_once_assign(self.q);
        r
    }

    /// Returns a * b mod q.
    #[inline(always)]
    pub fn mul(&self, a: u64, b: u64) -> u64 {
        self.reduce_u128(a as u128 * b as u128)
    }

    #[inline(always)]
    pub fn prepare(&self, v: u64) -> Barrett<u64> {
        debug_assert!(v < self.q);
        let quotient: u64 = (((v as u128) << 64) / self.q as u128) as _;
        Barrett(v, quotient)
    }

    /// Returns lhs * rhs mod q with the output range selected by REDUCE
    /// ([0, 2q) for NONE).
    #[inline(always)]
    pub fn mul_external<const REDUCE: REDUCEMOD>(&self, lhs: Barrett<u64>, rhs: u64) -> u64 {
        let mut r: u64 = rhs;
        self.mul_external_assign::<REDUCE>(lhs, &mut r);
        r
    }

    #[inline(always)]
    pub fn mul_external_assign<const REDUCE: REDUCEMOD>(&self, lhs: Barrett<u64>, rhs: &mut u64) {
        let t: u64 = ((*lhs.quotient() as u128 * *rhs as u128) >> 64) as _;
        *rhs = (rhs.wrapping_mul(*lhs.value())).wrapping_sub(self.q.wrapping_mul(t));
        self.reduce_assign::<REDUCE>(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barrett_reductions() {
        let q: u64 = 0x1fffffffffe00001;
        let precomp: BarrettPrecomp<u64> = BarrettPrecomp::new(q);
        let values: [u64; 6] = [0, 1, q - 1, q, 0xffff_ffff_ffff_ffff, 0x1234_5678_9abc_def0];
        for &x in values.iter() {
            assert_eq!(precomp.reduce::<BARRETT>(&x), x % q);
        }
        for &a in values.iter() {
            for &b in values.iter() {
                let (a, b) = (a % q, b % q);
                let want: u64 = ((a as u128 * b as u128) % q as u128) as u64;
                assert_eq!(precomp.mul(a, b), want);
                let b_prep: Barrett<u64> = precomp.prepare(b);
                assert_eq!(precomp.mul_external::<ONCE>(b_prep, a), want);
            }
        }
        let x: u128 = (q as u128 - 1) << 64 | 0xffff_ffff_ffff_ffff;
        assert_eq!(precomp.reduce_u128(x), (x % q as u128) as u64);
    }
}
