use crate::modulus::WordOps;
use crate::ring::Ring;
use utils::map::Map;

/// Permutations of the automorphisms X -> X^{gal_el}, keyed by galois element.
pub struct AutoPermMap(Map<usize, AutoPerm>);

impl AutoPermMap {
    pub fn new() -> Self {
        Self(Map::<usize, AutoPerm>::new())
    }

    pub fn insert(&mut self, perm: AutoPerm) {
        self.0.insert(perm.gal_el, perm);
    }

    pub fn generate<const NTT: bool>(
        &mut self,
        ring: &Ring<u64>,
        gen_1: usize,
        gen_2: bool,
    ) -> usize {
        let perm: AutoPerm = AutoPerm::new::<NTT>(ring, gen_1, gen_2);
        let gal_el: usize = perm.gal_el;
        self.insert(perm);
        gal_el
    }

    pub fn get(&self, gal_el: &usize) -> Option<&AutoPerm> {
        self.0.get(gal_el)
    }
}

impl Default for AutoPermMap {
    fn default() -> Self {
        Self::new()
    }
}

pub struct AutoPerm {
    pub gal_el: usize,
    pub permutation: Vec<usize>,
}

impl AutoPerm {
    /// Returns a lookup table for the automorphism X^{i} -> X^{i * gal_el mod 2n}, with
    /// gal_el = 5^gen_1 * (-1)^gen_2.
    ///
    /// - NTT=true: output slot i reads input slot permutation[i].
    /// - NTT=false: input coefficient i moves to permutation[i] & (n-1), negated when the
    ///   most significant bit of permutation[i] is set.
    pub fn new<const NTT: bool>(ring: &Ring<u64>, gen_1: usize, gen_2: bool) -> Self {
        let gal_el: usize = ring.galois_element(gen_1, gen_2);
        Self::from_galois_element::<NTT>(ring.n(), gal_el)
    }

    /// Method will panic if n is not a power-of-two or if gal_el is even.
    pub fn from_galois_element<const NTT: bool>(n: usize, gal_el: usize) -> Self {
        assert!(n & (n - 1) == 0, "invalid n={}: not a power-of-two", n);
        assert!(
            gal_el & 1 == 1,
            "invalid gal_el={}: not coprime with 2n={}",
            gal_el,
            2 * n
        );

        let cyclotomic_order: usize = n << 1;
        let mut permutation: Vec<usize> = Vec::with_capacity(n);

        if NTT {
            let mask: usize = cyclotomic_order - 1;
            let log_cyclotomic_order_half: u32 = cyclotomic_order.log2() as u32 - 1;
            for i in 0..n {
                let i_rev: usize = 2 * i.reverse_bits_msb(log_cyclotomic_order_half) + 1;
                let gal_el_i: usize = ((gal_el * i_rev) & mask) >> 1;
                permutation.push(gal_el_i.reverse_bits_msb(log_cyclotomic_order_half));
            }
        } else {
            let log_n: usize = n.log2();
            let mask: usize = n - 1;
            for i in 0..n {
                let gal_el_i: usize = (i * gal_el) & (cyclotomic_order - 1);
                let sign: usize = (gal_el_i >> log_n) & 1;
                let i_out: usize = (gal_el_i & mask) | (sign << (usize::BITS - 1));
                permutation.push(i_out)
            }
        }

        Self {
            gal_el,
            permutation,
        }
    }
}
