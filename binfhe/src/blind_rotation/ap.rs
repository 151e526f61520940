use math::poly::Poly;
use math::ring::Ring;
use sampling::distributions::Distribution;
use sampling::source::Source;

use crate::lwe::LweSecretKey;
use crate::params::BinFheParams;
use crate::rgsw::{Gadget, RgswCiphertext, RlweCiphertext, external_product_inplace};

/// Method-A refreshing key: RGSW(X^{factor * v * base_r^k * s_i}) for every
/// coordinate i, digit position k and non-zero digit v.
pub struct ApKey {
    base_r: u64,
    digits: usize,
    data: Vec<RgswCiphertext>,
}

impl ApKey {
    #[allow(clippy::too_many_arguments)]
    pub fn generate(
        params: &BinFheParams,
        ring: &Ring<u64>,
        gadget: &Gadget,
        sk: &LweSecretKey,
        sk_n_ntt: &Poly<u64>,
        noise: &Distribution,
        source_xa: &mut Source,
        source_xe: &mut Source,
    ) -> Self {
        let base_r: u64 = params.base_r();
        let digits: usize = params.d_r();
        let two_n: i128 = ring.cyclotomic_order() as i128;
        let factor: i128 = params.factor() as i128;

        let mut data: Vec<RgswCiphertext> =
            Vec::with_capacity(sk.n() * digits * (base_r as usize - 1));
        for s in sk.data.iter() {
            let mut power: i128 = 1;
            for _ in 0..digits {
                for v in 1..base_r as i128 {
                    let k: usize = (factor * v * power * *s as i128).rem_euclid(two_n) as usize;
                    let mut rgsw: RgswCiphertext = RgswCiphertext::new(ring, gadget);
                    rgsw.encrypt_monomial_sk(
                        ring,
                        gadget,
                        sk_n_ntt,
                        k,
                        noise,
                        source_xa,
                        source_xe,
                    );
                    data.push(rgsw);
                }
                power = (power * base_r as i128) % two_n;
            }
        }

        Self {
            base_r,
            digits,
            data,
        }
    }

    #[inline(always)]
    fn at(&self, i: usize, k: usize, v: usize) -> &RgswCiphertext {
        &self.data[(i * self.digits + k) * (self.base_r as usize - 1) + v - 1]
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// acc <- acc * prod_i X^{factor * (-a_i) * s_i}, one external product per
    /// non-zero base_r digit of -a_i.
    pub fn blind_rotate(
        &self,
        params: &BinFheParams,
        ring: &Ring<u64>,
        gadget: &Gadget,
        acc: &mut RlweCiphertext,
        a: &[u64],
    ) {
        let q: u64 = params.q();
        a.iter().enumerate().for_each(|(i, a_i)| {
            let mut x: u64 = (q - *a_i) % q;
            for k in 0..self.digits {
                let v: usize = (x % self.base_r) as usize;
                x /= self.base_r;
                if v != 0 {
                    external_product_inplace(ring, gadget, self.at(i, k, v), acc);
                }
            }
        });
    }
}
