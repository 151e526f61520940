use crate::modulus::ReduceOnce;
use crate::modulus::barrett::BarrettPrecomp;
use crate::modulus::prime::Prime;

impl Prime<u64> {
    /// Returns a new instance of Prime<u64>.
    /// Panics if q is not a prime > 2 or if q >= 2^62.
    pub fn new(q: u64) -> Self {
        assert!(is_prime(q) && q > 2, "invalid modulus: q = {} is not an odd prime", q);
        Self::new_unchecked(q)
    }

    /// Returns a new instance of Prime<u64>.
    /// Does not check if q is a prime > 2.
    /// Panics if q >= 2^62.
    pub fn new_unchecked(q: u64) -> Self {
        assert!(q.next_power_of_two().ilog2() <= 62, "invalid modulus: q = {} >= 2^62", q);
        Self {
            q,
            phi: q - 1,
            factors: distinct_factors(q - 1),
            barrett: BarrettPrecomp::new(q),
        }
    }

    #[inline(always)]
    pub fn q(&self) -> u64 {
        self.q
    }

    #[inline(always)]
    pub fn add(&self, a: u64, b: u64) -> u64 {
        (a + b).reduce_once(self.q)
    }

    #[inline(always)]
    pub fn sub(&self, a: u64, b: u64) -> u64 {
        (a + self.q - b).reduce_once(self.q)
    }

    #[inline(always)]
    pub fn neg(&self, a: u64) -> u64 {
        (self.q - a).reduce_once(self.q)
    }

    #[inline(always)]
    pub fn mul(&self, a: u64, b: u64) -> u64 {
        self.barrett.mul(a, b)
    }

    /// Maps x in (-q, q) to [0, q).
    #[inline(always)]
    pub fn from_i64(&self, x: i64) -> u64 {
        debug_assert!(x.unsigned_abs() < self.q, "invalid x: |{}| >= q={}", x, self.q);
        if x < 0 { self.q - x.unsigned_abs() } else { x as u64 }
    }

    /// Maps x in [0, q) to its centered representative in (-q/2, q/2].
    #[inline(always)]
    pub fn center(&self, x: u64) -> i64 {
        if x > self.q >> 1 { x as i64 - self.q as i64 } else { x as i64 }
    }

    /// Returns x^exponent mod q.
    pub fn pow(&self, x: u64, exponent: u64) -> u64 {
        let mut y: u64 = 1;
        let mut x: u64 = x % self.q;
        let mut i: u64 = exponent;
        while i > 0 {
            if i & 1 == 1 {
                y = self.mul(y, x);
            }
            x = self.mul(x, x);
            i >>= 1;
        }
        y
    }

    /// Returns x^-1 mod q.
    /// User must ensure that x is not divisible by q.
    #[inline(always)]
    pub fn inv(&self, x: u64) -> u64 {
        self.pow(x, self.phi - 1)
    }

    /// Returns the smallest primitive root of q.
    pub fn primitive_root(&self) -> u64 {
        let mut candidate: u64 = 1u64;
        loop {
            candidate += 1;
            assert!(candidate < self.q, "failed to find a primitive root for q={}", self.q);
            if self
                .factors
                .iter()
                .all(|&factor| self.pow(candidate, self.phi / factor) != 1)
            {
                return candidate;
            }
        }
    }

    /// Returns a primitive nth_root-th root of unity mod q.
    /// Panics if nth_root does not divide q-1.
    pub fn primitive_nth_root(&self, nth_root: u64) -> u64 {
        assert!(
            self.phi % nth_root == 0,
            "invalid prime: q = {} % nth_root = {} = {} != 1",
            self.q,
            nth_root,
            self.q % nth_root
        );

        let psi: u64 = self.pow(self.primitive_root(), self.phi / nth_root);

        assert!(
            self.pow(psi, nth_root) == 1,
            "invalid nth primitive root: psi^nth_root != 1 mod q"
        );
        if nth_root & 1 == 0 {
            assert!(
                self.pow(psi, nth_root >> 1) == self.q - 1,
                "invalid nth primitive root: psi^(nth_root/2) != -1 mod q"
            );
        }

        psi
    }
}

/// Returns the distinct prime factors of x by trial division.
fn distinct_factors(mut x: u64) -> Vec<u64> {
    let mut factors: Vec<u64> = Vec::new();
    let mut p: u64 = 2;
    while p * p <= x {
        if x % p == 0 {
            factors.push(p);
            while x % p == 0 {
                x /= p;
            }
        }
        p += if p == 2 { 1 } else { 2 };
    }
    if x > 1 {
        factors.push(x);
    }
    factors
}

#[inline(always)]
fn pow_mod(x: u64, exponent: u64, q: u64) -> u64 {
    let q128: u128 = q as u128;
    let mut y: u128 = 1;
    let mut x: u128 = x as u128 % q128;
    let mut i: u64 = exponent;
    while i > 0 {
        if i & 1 == 1 {
            y = y * x % q128;
        }
        x = x * x % q128;
        i >>= 1;
    }
    y as u64
}

/// Deterministic Miller-Rabin test, exact for every u64.
pub fn is_prime(q: u64) -> bool {
    const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

    if q < 2 {
        return false;
    }

    for &p in WITNESSES.iter() {
        if q % p == 0 {
            return q == p;
        }
    }

    let s: u32 = (q - 1).trailing_zeros();
    let d: u64 = (q - 1) >> s;

    'witness: for &a in WITNESSES.iter() {
        let mut x: u64 = pow_mod(a, d, q);
        if x == 1 || x == q - 1 {
            continue;
        }
        for _ in 1..s {
            x = ((x as u128 * x as u128) % q as u128) as u64;
            if x == q - 1 {
                continue 'witness;
            }
        }
        return false;
    }

    true
}
