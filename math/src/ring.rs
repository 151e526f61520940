pub mod impl_u64;

use crate::dft::DFT;
use crate::modulus::prime::Prime;
use crate::modulus::WordOps;
use crate::poly::Poly;

/// Z_q[X]/(X^n+1) with q an NTT-friendly prime.
pub struct Ring<O> {
    pub n: usize,
    pub modulus: Prime<O>,
    pub dft: Box<dyn DFT<O>>,
}

impl<O> Ring<O> {
    pub fn log_n(&self) -> usize {
        self.n().log2()
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn cyclotomic_order(&self) -> usize {
        self.n << 1
    }
}

impl Ring<u64> {
    pub fn q(&self) -> u64 {
        self.modulus.q
    }

    pub fn new_poly(&self) -> Poly<u64> {
        Poly::<u64>::new(self.n())
    }

    /// Returns (5^gen_1 * (-1)^gen_2) mod 2n.
    pub fn galois_element(&self, gen_1: usize, gen_2: bool) -> usize {
        let mask: usize = self.cyclotomic_order() - 1;
        let mut gal_el: usize = 1;
        for _ in 0..gen_1 {
            gal_el = (gal_el * 5) & mask;
        }
        if gen_2 {
            gal_el = (self.cyclotomic_order() - gal_el) & mask;
        }
        gal_el
    }
}
