//! Blind rotation of an accumulator by an encrypted LWE phase.
//!
//! The accumulator is an RLWE encryption of a test vector T. Blind rotation
//! multiplies it by X^{factor * (-<a, s>)} using key material derived from the
//! small LWE secret s and encrypted under the ring secret z, so that the
//! constant coefficient of the result encrypts T evaluated at the phase of the
//! input ciphertext. Three interchangeable algorithms are provided:
//!
//! - [`ApKey`] (Method-A): RGSW(X^{factor v base_r^k s_i}), one external product per
//!   non-zero digit of -a_i.
//! - [`GinxKey`] (Method-B): RGSW([s_i = 1]) and RGSW([s_i = -1]), two external products
//!   per coordinate.
//! - [`LmkcdeyKey`] (Method-C): RGSW(X^{s_i}) and automorphism keys, one external product
//!   per coordinate and batched automorphisms.
//!
//! All three produce the same rotation and differ only in cost and key size.
mod ap;
mod ginx;
mod lmkcdey;
mod lut;

pub use ap::*;
pub use ginx::*;
pub use lmkcdey::*;
pub use lut::*;

use math::poly::Poly;
use math::ring::Ring;
use sampling::distributions::Distribution;
use sampling::source::Source;

use crate::lwe::{LweCiphertext, LweSecretKey};
use crate::params::{BinFheParams, BlindRotationMethod};
use crate::rgsw::{Gadget, RlweCiphertext};

/// Method-specific bootstrapping key, selected once per context.
pub enum BlindRotationKey {
    Ap(ApKey),
    Ginx(GinxKey),
    Lmkcdey(LmkcdeyKey),
}

impl BlindRotationKey {
    /// Generates the key of method for the small secret sk, encrypted under the ring secret sk_n.
    #[allow(clippy::too_many_arguments)]
    pub fn generate(
        method: BlindRotationMethod,
        params: &BinFheParams,
        ring: &Ring<u64>,
        gadget: &Gadget,
        sk: &LweSecretKey,
        sk_n: &LweSecretKey,
        source_xa: &mut Source,
        source_xe: &mut Source,
    ) -> Self {
        assert_eq!(
            sk.n(),
            params.n(),
            "invalid sk: dimension {} != n={}",
            sk.n(),
            params.n()
        );
        assert_eq!(
            sk_n.n(),
            ring.n(),
            "invalid sk_n: dimension {} != N={}",
            sk_n.n(),
            ring.n()
        );

        let noise: Distribution = params.noise();
        let mut z: Poly<u64> = ring.new_poly();
        ring.from_i64(&sk_n.data, &mut z);
        let mut z_ntt: Poly<u64> = ring.new_poly();
        ring.ntt(&z, &mut z_ntt);

        match method {
            BlindRotationMethod::Ap => BlindRotationKey::Ap(ApKey::generate(
                params, ring, gadget, sk, &z_ntt, &noise, source_xa, source_xe,
            )),
            BlindRotationMethod::Ginx => BlindRotationKey::Ginx(GinxKey::generate(
                ring, gadget, sk, &z_ntt, &noise, source_xa, source_xe,
            )),
            BlindRotationMethod::Lmkcdey => BlindRotationKey::Lmkcdey(LmkcdeyKey::generate(
                params, ring, gadget, sk, &z, &z_ntt, &noise, source_xa, source_xe,
            )),
        }
    }

    pub fn method(&self) -> BlindRotationMethod {
        match self {
            BlindRotationKey::Ap(_) => BlindRotationMethod::Ap,
            BlindRotationKey::Ginx(_) => BlindRotationMethod::Ginx,
            BlindRotationKey::Lmkcdey(_) => BlindRotationMethod::Lmkcdey,
        }
    }

    /// Number of RGSW and automorphism key ciphertexts.
    pub fn size(&self) -> usize {
        match self {
            BlindRotationKey::Ap(key) => key.size(),
            BlindRotationKey::Ginx(key) => key.size(),
            BlindRotationKey::Lmkcdey(key) => key.size(),
        }
    }

    /// Returns an RLWE encryption under z of tv * X^{factor * (-<a, s>)}.
    pub fn blind_rotate(
        &self,
        params: &BinFheParams,
        ring: &Ring<u64>,
        gadget: &Gadget,
        tv: &Poly<u64>,
        a: &[u64],
    ) -> RlweCiphertext {
        debug_assert_eq!(
            a.len(),
            params.n(),
            "invalid a: len {} != n={}",
            a.len(),
            params.n()
        );
        let mut acc: RlweCiphertext = RlweCiphertext::trivial(ring, tv);
        match self {
            BlindRotationKey::Ap(key) => key.blind_rotate(params, ring, gadget, &mut acc, a),
            BlindRotationKey::Ginx(key) => key.blind_rotate(params, ring, gadget, &mut acc, a),
            BlindRotationKey::Lmkcdey(key) => {
                key.blind_rotate(params, ring, gadget, &mut acc, a)
            }
        }
        acc
    }
}

/// Rotation exponent factor * (-a_i mod q) mod 2N of coordinate a_i.
#[inline(always)]
pub(crate) fn rotation(params: &BinFheParams, a_i: u64) -> usize {
    let q: u64 = params.q();
    (params.factor() * ((q - a_i % q) % q) as usize) % (2 * params.big_n())
}

/// Extracts the LWE encryption under z of the constant coefficient of acc:
/// a' = [A_0, -A_{N-1}, ..., -A_1], b' = B_0.
pub fn sample_extract(ring: &Ring<u64>, acc: &RlweCiphertext) -> LweCiphertext {
    let n: usize = ring.n();
    let q: u64 = ring.q();
    let mut res: LweCiphertext = LweCiphertext::new(n, q);
    res.a[0] = acc.a.0[0];
    for j in 1..n {
        res.a[j] = (q - acc.a.0[n - j]) % q;
    }
    res.b = acc.b.0[0];
    res
}
