use crate::automorphism::AutoPerm;
use crate::modulus::ReduceOnce;
use crate::poly::Poly;
use crate::ring::Ring;

impl Ring<u64> {
    /// b <- a(X^{gal_el}) in coefficient representation.
    pub fn automorphism(&self, a: &Poly<u64>, gal_el: usize, b: &mut Poly<u64>) {
        let n: usize = self.n();
        debug_assert!(
            a.n() == b.n(),
            "invalid inputs: a.n() = {} != b.n() = {}",
            a.n(),
            b.n()
        );
        assert!(
            gal_el & 1 == 1,
            "invalid gal_el={}: not coprime with 2n={}",
            gal_el,
            2 * n
        );
        let mask: usize = 2 * n - 1;
        let q: u64 = self.q();
        a.0.iter().enumerate().for_each(|(i, ai)| {
            let j: usize = (i * gal_el) & mask;
            if j < n {
                b.0[j] = *ai;
            } else {
                b.0[j - n] = (q - *ai).reduce_once(q);
            }
        });
    }

    /// b <- a(X^{perm.gal_el}) using a precomputed permutation.
    /// NTT selects the representation of a and b and must match the one perm was built for.
    pub fn automorphism_from_perm<const NTT: bool>(
        &self,
        a: &Poly<u64>,
        perm: &AutoPerm,
        b: &mut Poly<u64>,
    ) {
        debug_assert!(
            a.n() == b.n(),
            "invalid inputs: a.n() = {} != b.n() = {}",
            a.n(),
            b.n()
        );
        debug_assert!(
            perm.permutation.len() == a.n(),
            "invalid perm: perm.len() = {} != a.n() = {}",
            perm.permutation.len(),
            a.n()
        );
        if NTT {
            b.0.iter_mut()
                .zip(perm.permutation.iter())
                .for_each(|(bi, &j)| *bi = a.0[j]);
        } else {
            let q: u64 = self.q();
            let mask: usize = self.n() - 1;
            a.0.iter()
                .zip(perm.permutation.iter())
                .for_each(|(ai, &j)| {
                    if j >> (usize::BITS - 1) == 1 {
                        b.0[j & mask] = (q - *ai).reduce_once(q);
                    } else {
                        b.0[j & mask] = *ai;
                    }
                });
        }
    }
}
