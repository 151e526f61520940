use crate::dft::ntt::Table;
use crate::modulus::barrett::Barrett;
use crate::modulus::prime::Prime;
use crate::modulus::ReduceOnce;
use crate::modulus::ONCE;
use crate::poly::Poly;
use crate::ring::Ring;
use itertools::izip;

impl Ring<u64> {
    /// Panics if n is not a power of two >= 2, if q is not prime or if q != 1 mod 2n.
    pub fn new(n: usize, q: u64) -> Self {
        assert!(
            n >= 2 && n & (n - 1) == 0,
            "invalid n={}: not a power-of-two >= 2",
            n
        );
        let prime: Prime<u64> = Prime::<u64>::new(q);
        Self {
            n,
            modulus: prime.clone(),
            dft: Box::new(Table::<u64>::new(prime, (2 * n) as u64)),
        }
    }

    /// Writes x mod q into a, x being small signed values.
    pub fn from_i64(&self, x: &[i64], a: &mut Poly<u64>) {
        debug_assert!(x.len() == a.n(), "x.len()={} != a.n()={}", x.len(), a.n());
        izip!(x.iter(), a.0.iter_mut()).for_each(|(x, a)| *a = self.modulus.from_i64(*x));
    }
}

impl Ring<u64> {
    pub fn ntt_inplace(&self, poly: &mut Poly<u64>) {
        self.dft.forward_inplace(&mut poly.0)
    }

    pub fn intt_inplace(&self, poly: &mut Poly<u64>) {
        self.dft.backward_inplace(&mut poly.0)
    }

    pub fn ntt(&self, poly_in: &Poly<u64>, poly_out: &mut Poly<u64>) {
        poly_out.0.copy_from_slice(&poly_in.0);
        self.dft.forward_inplace(&mut poly_out.0)
    }

    pub fn intt(&self, poly_in: &Poly<u64>, poly_out: &mut Poly<u64>) {
        poly_out.0.copy_from_slice(&poly_in.0);
        self.dft.backward_inplace(&mut poly_out.0)
    }
}

impl Ring<u64> {
    /// b <- b + a.
    #[inline(always)]
    pub fn add_inplace(&self, a: &Poly<u64>, b: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        let q: u64 = self.q();
        izip!(a.0.iter(), b.0.iter_mut()).for_each(|(a, b)| *b = (*a + *b).reduce_once(q));
    }

    /// c <- a + b.
    #[inline(always)]
    pub fn add(&self, a: &Poly<u64>, b: &Poly<u64>, c: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        debug_assert!(c.n() == self.n(), "c.n()={} != n={}", c.n(), self.n());
        let q: u64 = self.q();
        izip!(a.0.iter(), b.0.iter(), c.0.iter_mut())
            .for_each(|(a, b, c)| *c = (*a + *b).reduce_once(q));
    }

    /// b <- b - a.
    #[inline(always)]
    pub fn sub_inplace(&self, a: &Poly<u64>, b: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        let q: u64 = self.q();
        izip!(a.0.iter(), b.0.iter_mut()).for_each(|(a, b)| *b = (*b + q - *a).reduce_once(q));
    }

    /// c <- a - b.
    #[inline(always)]
    pub fn sub(&self, a: &Poly<u64>, b: &Poly<u64>, c: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        debug_assert!(c.n() == self.n(), "c.n()={} != n={}", c.n(), self.n());
        let q: u64 = self.q();
        izip!(a.0.iter(), b.0.iter(), c.0.iter_mut())
            .for_each(|(a, b, c)| *c = (*a + q - *b).reduce_once(q));
    }

    #[inline(always)]
    pub fn neg_inplace(&self, a: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        let q: u64 = self.q();
        a.0.iter_mut().for_each(|a| *a = (q - *a).reduce_once(q));
    }

    /// c <- a * b, coefficient-wise (a product in evaluation representation).
    #[inline(always)]
    pub fn mul_coeffs(&self, a: &Poly<u64>, b: &Poly<u64>, c: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        debug_assert!(c.n() == self.n(), "c.n()={} != n={}", c.n(), self.n());
        let barrett = &self.modulus.barrett;
        izip!(a.0.iter(), b.0.iter(), c.0.iter_mut())
            .for_each(|(a, b, c)| *c = barrett.mul(*a, *b));
    }

    /// b <- a * b, coefficient-wise.
    #[inline(always)]
    pub fn mul_coeffs_inplace(&self, a: &Poly<u64>, b: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        let barrett = &self.modulus.barrett;
        izip!(a.0.iter(), b.0.iter_mut()).for_each(|(a, b)| *b = barrett.mul(*a, *b));
    }

    /// c <- c + a * b, coefficient-wise.
    #[inline(always)]
    pub fn mul_coeffs_add(&self, a: &Poly<u64>, b: &Poly<u64>, c: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        debug_assert!(c.n() == self.n(), "c.n()={} != n={}", c.n(), self.n());
        let barrett = &self.modulus.barrett;
        izip!(a.0.iter(), b.0.iter(), c.0.iter_mut())
            .for_each(|(a, b, c)| *c = barrett.reduce_u128(*a as u128 * *b as u128 + *c as u128));
    }

    /// a <- a * s.
    #[inline(always)]
    pub fn mul_scalar_inplace(&self, s: u64, a: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        let barrett = &self.modulus.barrett;
        let s: Barrett<u64> = barrett.prepare(s % self.q());
        a.0.iter_mut()
            .for_each(|a| barrett.mul_external_assign::<ONCE>(s, a));
    }

    /// b <- a * X^k mod X^n+1, k in [0, 2n). Coefficient representation.
    pub fn mul_xk(&self, a: &Poly<u64>, k: usize, b: &mut Poly<u64>) {
        let n: usize = self.n();
        debug_assert!(a.n() == n, "a.n()={} != n={}", a.n(), n);
        debug_assert!(b.n() == n, "b.n()={} != n={}", b.n(), n);
        debug_assert!(k < 2 * n, "invalid k={} >= 2n={}", k, 2 * n);
        let q: u64 = self.q();
        a.0.iter().enumerate().for_each(|(i, ai)| {
            let j: usize = (i + k) & (2 * n - 1);
            if j < n {
                b.0[j] = *ai;
            } else {
                b.0[j - n] = (q - *ai).reduce_once(q);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn negacyclic_schoolbook(q: u64, a: &[u64], b: &[u64]) -> Vec<u64> {
        let n: usize = a.len();
        let mut c: Vec<u128> = vec![0; n];
        for i in 0..n {
            for j in 0..n {
                let p: u128 = a[i] as u128 * b[j] as u128 % q as u128;
                if i + j < n {
                    c[i + j] = (c[i + j] + p) % q as u128;
                } else {
                    c[i + j - n] = (c[i + j - n] + q as u128 - p) % q as u128;
                }
            }
        }
        c.iter().map(|x| *x as u64).collect()
    }

    #[test]
    fn ntt_product_matches_schoolbook() {
        let n: usize = 64;
        let q: u64 = 134215681;
        let ring: Ring<u64> = Ring::new(n, q);
        let mut a: Poly<u64> = ring.new_poly();
        let mut b: Poly<u64> = ring.new_poly();
        for i in 0..n {
            a.0[i] = (i as u64 * 7919 + 13) % q;
            b.0[i] = q - 1 - (i as u64 * 104729) % q;
        }
        let want: Vec<u64> = negacyclic_schoolbook(q, &a.0, &b.0);

        let mut a_ntt: Poly<u64> = ring.new_poly();
        let mut b_ntt: Poly<u64> = ring.new_poly();
        ring.ntt(&a, &mut a_ntt);
        ring.ntt(&b, &mut b_ntt);
        let mut c: Poly<u64> = ring.new_poly();
        ring.mul_coeffs(&a_ntt, &b_ntt, &mut c);
        ring.intt_inplace(&mut c);
        assert_eq!(c.0, want);

        let mut d: Poly<u64> = ring.new_poly();
        ring.mul_coeffs_add(&a_ntt, &b_ntt, &mut d);
        ring.mul_coeffs_add(&a_ntt, &b_ntt, &mut d);
        ring.intt_inplace(&mut d);
        let mut twice: Poly<u64> = Poly(want.clone());
        ring.mul_scalar_inplace(2, &mut twice);
        assert_eq!(d, twice);
    }

    #[test]
    fn mul_xk_is_negacyclic() {
        let n: usize = 8;
        let q: u64 = 17;
        let ring: Ring<u64> = Ring::new(n, q);
        let a: Poly<u64> = Poly((1..=n as u64).collect());
        let mut b: Poly<u64> = ring.new_poly();
        ring.mul_xk(&a, 1, &mut b);
        assert_eq!(b.0, vec![q - 8, 1, 2, 3, 4, 5, 6, 7]);
        ring.mul_xk(&a, n, &mut b);
        let mut neg: Poly<u64> = a.clone();
        ring.neg_inplace(&mut neg);
        assert_eq!(b, neg);
        let mut c: Poly<u64> = ring.new_poly();
        ring.mul_xk(&b, n, &mut c);
        assert_eq!(c, a);
    }

    #[test]
    fn add_sub_neg() {
        let ring: Ring<u64> = Ring::new(4, 17);
        let a: Poly<u64> = Poly(vec![1, 16, 0, 8]);
        let b: Poly<u64> = Poly(vec![16, 16, 0, 9]);
        let mut c: Poly<u64> = ring.new_poly();
        ring.add(&a, &b, &mut c);
        assert_eq!(c.0, vec![0, 15, 0, 0]);
        ring.sub_inplace(&b, &mut c);
        assert_eq!(c, a);
        ring.sub(&a, &b, &mut c);
        assert_eq!(c.0, vec![2, 0, 0, 16]);
        ring.add_inplace(&b, &mut c);
        assert_eq!(c, a);
        let mut x: Poly<u64> = ring.new_poly();
        ring.from_i64(&[-1, 0, 1, -8], &mut x);
        assert_eq!(x.0, vec![16, 0, 1, 9]);
    }
}
