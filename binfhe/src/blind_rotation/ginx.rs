use math::poly::Poly;
use math::ring::Ring;
use sampling::distributions::Distribution;
use sampling::source::Source;

use crate::blind_rotation::rotation;
use crate::lwe::LweSecretKey;
use crate::params::BinFheParams;
use crate::rgsw::{Gadget, RgswCiphertext, RlweCiphertext, external_product};

/// Method-B bootstrapping key: (RGSW([s_i = 1]), RGSW([s_i = -1])) per coordinate.
pub struct GinxKey {
    data: Vec<[RgswCiphertext; 2]>,
}

impl GinxKey {
    /// Panics if sk has a coefficient outside {-1, 0, 1}.
    #[allow(clippy::too_many_arguments)]
    pub fn generate(
        ring: &Ring<u64>,
        gadget: &Gadget,
        sk: &LweSecretKey,
        sk_n_ntt: &Poly<u64>,
        noise: &Distribution,
        source_xa: &mut Source,
        source_xe: &mut Source,
    ) -> Self {
        let one: Poly<u64> = {
            let mut pt: Poly<u64> = ring.new_poly();
            pt.0[0] = 1;
            pt
        };
        let zero: Poly<u64> = ring.new_poly();

        let data: Vec<[RgswCiphertext; 2]> = sk
            .data
            .iter()
            .map(|s| {
                assert!(
                    (-1..=1).contains(s),
                    "invalid sk: coefficient {} not in {{-1, 0, 1}}",
                    s
                );
                let mut plus: RgswCiphertext = RgswCiphertext::new(ring, gadget);
                let mut minus: RgswCiphertext = RgswCiphertext::new(ring, gadget);
                let (pt_plus, pt_minus): (&Poly<u64>, &Poly<u64>) = match *s {
                    1 => (&one, &zero),
                    -1 => (&zero, &one),
                    _ => (&zero, &zero),
                };
                plus.encrypt_sk(ring, gadget, sk_n_ntt, pt_plus, noise, source_xa, source_xe);
                minus.encrypt_sk(
                    ring,
                    gadget,
                    sk_n_ntt,
                    pt_minus,
                    noise,
                    source_xa,
                    source_xe,
                );
                [plus, minus]
            })
            .collect();

        Self { data }
    }

    pub fn size(&self) -> usize {
        2 * self.data.len()
    }

    /// acc <- acc + (X^u - 1) (acc (x) RGSW+) + (X^-u - 1) (acc (x) RGSW-) for
    /// u = factor * (-a_i) and every coordinate i.
    pub fn blind_rotate(
        &self,
        params: &BinFheParams,
        ring: &Ring<u64>,
        gadget: &Gadget,
        acc: &mut RlweCiphertext,
        a: &[u64],
    ) {
        let two_n: usize = ring.cyclotomic_order();
        let mut t_plus: RlweCiphertext = RlweCiphertext::new(ring);
        let mut t_minus: RlweCiphertext = RlweCiphertext::new(ring);
        let mut tmp: Poly<u64> = ring.new_poly();
        a.iter().zip(self.data.iter()).for_each(|(a_i, [plus, minus])| {
            let u: usize = rotation(params, *a_i);
            if u == 0 {
                return;
            }
            external_product(ring, gadget, acc, plus, &mut t_plus);
            external_product(ring, gadget, acc, minus, &mut t_minus);
            add_mul_xk_minus_one(ring, &t_plus, u, acc, &mut tmp);
            add_mul_xk_minus_one(ring, &t_minus, two_n - u, acc, &mut tmp);
        });
    }
}

/// acc <- acc + (X^k - 1) * ct, coefficient representation.
fn add_mul_xk_minus_one(
    ring: &Ring<u64>,
    ct: &RlweCiphertext,
    k: usize,
    acc: &mut RlweCiphertext,
    tmp: &mut Poly<u64>,
) {
    ring.mul_xk(&ct.a, k, tmp);
    ring.sub_inplace(&ct.a, tmp);
    ring.add_inplace(tmp, &mut acc.a);
    ring.mul_xk(&ct.b, k, tmp);
    ring.sub_inplace(&ct.b, tmp);
    ring.add_inplace(tmp, &mut acc.b);
}
