use math::automorphism::{AutoPerm, AutoPermMap};
use math::poly::Poly;
use math::ring::Ring;
use sampling::distributions::Distribution;
use sampling::source::Source;
use utils::map::Map;

use crate::blind_rotation::rotation;
use crate::lwe::LweSecretKey;
use crate::params::BinFheParams;
use crate::rgsw::{
    Gadget, GadgetCiphertext, RgswCiphertext, RlweCiphertext, external_product_inplace,
};

/// Generator of the automorphisms.
pub const GENERATOR: usize = 5;

/// Method-C bootstrapping key: RGSW(X^{s_i}) per coordinate and automorphism
/// keys switching psi_k(z) back to z for k in {g, g^2, ..., g^w, -g}.
pub struct LmkcdeyKey {
    rgsw: Vec<RgswCiphertext>,
    auto_keys: Map<usize, GadgetCiphertext>,
    auto_perms: AutoPermMap,
    /// log_gen[u >> 1] = (u = -g^l, l) for every odd u in [0, 2N).
    log_gen: Vec<(bool, usize)>,
    num_auto_keys: usize,
}

impl LmkcdeyKey {
    #[allow(clippy::too_many_arguments)]
    pub fn generate(
        params: &BinFheParams,
        ring: &Ring<u64>,
        gadget: &Gadget,
        sk: &LweSecretKey,
        sk_n: &Poly<u64>,
        sk_n_ntt: &Poly<u64>,
        noise: &Distribution,
        source_xa: &mut Source,
        source_xe: &mut Source,
    ) -> Self {
        let two_n: i64 = ring.cyclotomic_order() as i64;

        let rgsw: Vec<RgswCiphertext> = sk
            .data
            .iter()
            .map(|s| {
                let mut ct: RgswCiphertext = RgswCiphertext::new(ring, gadget);
                let k: usize = s.rem_euclid(two_n) as usize;
                ct.encrypt_monomial_sk(ring, gadget, sk_n_ntt, k, noise, source_xa, source_xe);
                ct
            })
            .collect();

        let num_auto_keys: usize = params.num_auto_keys();
        let mut auto_perms: AutoPermMap = AutoPermMap::new();
        let mut auto_keys: Map<usize, GadgetCiphertext> = Map::new();

        let mut sk_auto: Poly<u64> = ring.new_poly();
        let mut generators: Vec<(usize, bool)> = (1..=num_auto_keys).map(|k| (k, false)).collect();
        generators.push((1, true));
        generators.iter().for_each(|(gen_1, gen_2)| {
            let gal_el: usize = auto_perms.generate::<false>(ring, *gen_1, *gen_2);
            ring.automorphism(sk_n, gal_el, &mut sk_auto);
            ring.ntt_inplace(&mut sk_auto);
            let mut key: GadgetCiphertext = GadgetCiphertext::new(ring, gadget);
            key.encrypt_sk(
                ring,
                gadget,
                sk_n_ntt,
                &sk_auto,
                noise,
                source_xa,
                source_xe,
            );
            auto_keys.insert(gal_el, key);
        });

        Self {
            rgsw,
            auto_keys,
            auto_perms,
            log_gen: log_gen_table(ring.n()),
            num_auto_keys,
        }
    }

    pub fn size(&self) -> usize {
        self.rgsw.len() + self.auto_keys.len()
    }

    fn perm(&self, gal_el: usize) -> &AutoPerm {
        match self.auto_perms.get(&gal_el) {
            Some(perm) => perm,
            None => panic!("invalid key: missing permutation for gal_el={}", gal_el),
        }
    }

    /// acc <- psi_{gal_el}(acc), switched back to z.
    fn automorphism_inplace(
        &self,
        ring: &Ring<u64>,
        gadget: &Gadget,
        gal_el: usize,
        acc: &mut RlweCiphertext,
    ) {
        let key: &GadgetCiphertext = match self.auto_keys.get(&gal_el) {
            Some(key) => key,
            None => panic!("invalid key: missing automorphism key for gal_el={}", gal_el),
        };
        let perm: &AutoPerm = self.perm(gal_el);

        let mut a_auto: Poly<u64> = ring.new_poly();
        let mut b_auto: Poly<u64> = ring.new_poly();
        ring.automorphism_from_perm::<false>(&acc.a, perm, &mut a_auto);
        ring.automorphism_from_perm::<false>(&acc.b, perm, &mut b_auto);

        key.product(ring, gadget, &a_auto, acc);
        ring.add_inplace(&b_auto, &mut acc.b);
    }

    /// One sweep over the levels l = N/2-1, ..., 1, 0: multiplies by X^{s_j} for
    /// every j in sets[l] then applies psi_g, batching consecutive psi_g into
    /// psi_{g^k} with k at most num_auto_keys.
    fn sweep(
        &self,
        ring: &Ring<u64>,
        gadget: &Gadget,
        sets: &[Vec<usize>],
        acc: &mut RlweCiphertext,
    ) {
        let mut skip: usize = 0;
        for l in (1..sets.len()).rev() {
            for j in sets[l].iter() {
                if skip != 0 {
                    self.automorphism_inplace(ring, gadget, ring.galois_element(skip, false), acc);
                    skip = 0;
                }
                external_product_inplace(ring, gadget, &self.rgsw[*j], acc);
            }
            skip += 1;
            if skip == self.num_auto_keys || l == 1 {
                self.automorphism_inplace(ring, gadget, ring.galois_element(skip, false), acc);
                skip = 0;
            }
        }
        for j in sets[0].iter() {
            external_product_inplace(ring, gadget, &self.rgsw[*j], acc);
        }
    }

    /// acc <- acc * prod_i X^{u_i * s_i} with u_i = factor * (-a_i) rounded up to odd.
    /// acc must be a trivial encryption.
    pub fn blind_rotate(
        &self,
        params: &BinFheParams,
        ring: &Ring<u64>,
        gadget: &Gadget,
        acc: &mut RlweCiphertext,
        a: &[u64],
    ) {
        debug_assert!(acc.a.0.iter().all(|x| *x == 0), "invalid acc: not a trivial encryption");

        let half: usize = ring.n() >> 1;
        let mut neg: Vec<Vec<usize>> = vec![Vec::new(); half];
        let mut pos: Vec<Vec<usize>> = vec![Vec::new(); half];
        a.iter().enumerate().for_each(|(i, a_i)| {
            let u: usize = rotation(params, *a_i) | 1;
            let (is_neg, l) = self.log_gen[u >> 1];
            if is_neg {
                neg[l].push(i);
            } else {
                pos[l].push(i);
            }
        });

        let gal_el_neg_g: usize = ring.galois_element(1, true);
        let mut tmp: Poly<u64> = ring.new_poly();
        ring.automorphism_from_perm::<false>(&acc.b, self.perm(gal_el_neg_g), &mut tmp);
        acc.b.copy_from(&tmp);

        self.sweep(ring, gadget, &neg, acc);
        self.automorphism_inplace(ring, gadget, gal_el_neg_g, acc);
        self.sweep(ring, gadget, &pos, acc);
    }
}

/// Discrete logarithm in base g of the odd residues mod 2n: entry u >> 1 holds
/// (false, l) when u = g^l and (true, l) when u = -g^l.
fn log_gen_table(n: usize) -> Vec<(bool, usize)> {
    let two_n: usize = n << 1;
    let mut table: Vec<(bool, usize)> = vec![(false, 0); n];
    let mut x: usize = 1;
    for l in 0..n >> 1 {
        table[x >> 1] = (false, l);
        table[(two_n - x) >> 1] = (true, l);
        x = (x * GENERATOR) & (two_n - 1);
    }
    table
}
