use itertools::izip;
use math::poly::Poly;
use math::ring::Ring;
use sampling::distributions::Distribution;
use sampling::source::Source;

/// RLWE ciphertext (a, b) over Z_Q[X]/(X^N+1) with phase b - a * z.
/// The representation (coefficient or NTT) is tracked by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RlweCiphertext {
    pub a: Poly<u64>,
    pub b: Poly<u64>,
}

impl RlweCiphertext {
    pub fn new(ring: &Ring<u64>) -> Self {
        Self {
            a: ring.new_poly(),
            b: ring.new_poly(),
        }
    }

    /// Noiseless encryption of m: (0, m).
    pub fn trivial(ring: &Ring<u64>, m: &Poly<u64>) -> Self {
        let mut b: Poly<u64> = ring.new_poly();
        b.copy_from(m);
        Self { a: ring.new_poly(), b }
    }

    /// Fills (a, b) in NTT representation with b = a * z + e, a uniform.
    pub(crate) fn encrypt_zero_ntt(
        &mut self,
        ring: &Ring<u64>,
        sk_ntt: &Poly<u64>,
        noise: &Distribution,
        source_xa: &mut Source,
        source_xe: &mut Source,
    ) {
        ring.fill_uniform(source_xa, &mut self.a);
        ring.fill_dist_i64(source_xe, noise, &mut self.b);
        ring.ntt_inplace(&mut self.b);
        ring.mul_coeffs_add(&self.a, sk_ntt, &mut self.b);
    }

    /// Returns b - a * z in coefficient representation, self being in coefficient representation.
    pub fn decrypt(&self, ring: &Ring<u64>, sk_ntt: &Poly<u64>) -> Poly<u64> {
        let mut a_ntt: Poly<u64> = ring.new_poly();
        ring.ntt(&self.a, &mut a_ntt);
        ring.mul_coeffs_inplace(sk_ntt, &mut a_ntt);
        ring.intt_inplace(&mut a_ntt);
        let mut pt: Poly<u64> = ring.new_poly();
        ring.sub(&self.b, &a_ntt, &mut pt);
        pt
    }

    /// self <- self * X^k (coefficient representation), k in [0, 2N).
    pub fn mul_xk_inplace(&mut self, ring: &Ring<u64>, k: usize, tmp: &mut Poly<u64>) {
        ring.mul_xk(&self.a, k, tmp);
        self.a.copy_from(tmp);
        ring.mul_xk(&self.b, k, tmp);
        self.b.copy_from(tmp);
    }
}

/// Signed balanced decomposition in base Bg = 2^log_base.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gadget {
    pub log_base: usize,
    pub digits: usize,
}

impl Gadget {
    pub fn new(log_base: usize, digits: usize) -> Self {
        assert!(log_base > 0, "invalid log_base: 0");
        assert!(digits > 0, "invalid digits: 0");
        Self { log_base, digits }
    }

    pub fn base(&self) -> u64 {
        1 << self.log_base
    }

    /// Returns Bg^k mod q.
    pub fn power(&self, ring: &Ring<u64>, k: usize) -> u64 {
        ring.modulus.pow(self.base(), k as u64)
    }

    /// Decomposes the centered coefficients of a into res[0..digits] with
    /// sum_k res[k] * Bg^k = a. Digits lie in [-Bg/2, Bg/2) except the last
    /// one, which absorbs the remainder.
    pub fn decompose(&self, ring: &Ring<u64>, a: &Poly<u64>, res: &mut [Poly<u64>]) {
        debug_assert!(
            res.len() >= self.digits,
            "invalid res: res.len()={} < digits={}",
            res.len(),
            self.digits
        );
        let base: i64 = self.base() as i64;
        let mask: i64 = base - 1;
        let half_base: i64 = base >> 1;
        let last: usize = self.digits - 1;
        a.0.iter().enumerate().for_each(|(j, x)| {
            let mut t: i64 = ring.modulus.center(*x);
            for res_k in res.iter_mut().take(last) {
                let mut d: i64 = t & mask;
                if d >= half_base {
                    d -= base;
                }
                res_k.0[j] = ring.modulus.from_i64(d);
                t = (t - d) >> self.log_base;
            }
            res[last].0[j] = ring.modulus.from_i64(t);
        });
    }
}

/// Gadget encryption of -mu * z' for some secret z', stored in NTT representation:
/// row k holds (a_k, a_k * z + e_k - mu * Bg^k).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GadgetCiphertext {
    pub rows: Vec<RlweCiphertext>,
}

impl GadgetCiphertext {
    pub fn new(ring: &Ring<u64>, gadget: &Gadget) -> Self {
        Self {
            rows: (0..gadget.digits).map(|_| RlweCiphertext::new(ring)).collect(),
        }
    }

    /// mu_ntt is the NTT of the key being switched from.
    #[allow(clippy::too_many_arguments)]
    pub fn encrypt_sk(
        &mut self,
        ring: &Ring<u64>,
        gadget: &Gadget,
        sk_ntt: &Poly<u64>,
        mu_ntt: &Poly<u64>,
        noise: &Distribution,
        source_xa: &mut Source,
        source_xe: &mut Source,
    ) {
        let mut scaled: Poly<u64> = ring.new_poly();
        self.rows.iter_mut().enumerate().for_each(|(k, row)| {
            row.encrypt_zero_ntt(ring, sk_ntt, noise, source_xa, source_xe);
            scaled.copy_from(mu_ntt);
            ring.mul_scalar_inplace(gadget.power(ring, k), &mut scaled);
            ring.sub_inplace(&scaled, &mut row.b);
        });
    }

    /// Key switches (a', b) where a' is given in coefficient representation:
    /// returns (sum_k D_k(a') * a_k, sum_k D_k(a') * b_k) in coefficient representation.
    pub fn product(
        &self,
        ring: &Ring<u64>,
        gadget: &Gadget,
        a: &Poly<u64>,
        res: &mut RlweCiphertext,
    ) {
        let mut digits: Vec<Poly<u64>> = (0..gadget.digits).map(|_| ring.new_poly()).collect();
        gadget.decompose(ring, a, &mut digits);
        res.a.zero();
        res.b.zero();
        izip!(digits.iter_mut(), self.rows.iter()).for_each(|(d, row)| {
            ring.ntt_inplace(d);
            ring.mul_coeffs_add(d, &row.a, &mut res.a);
            ring.mul_coeffs_add(d, &row.b, &mut res.b);
        });
        ring.intt_inplace(&mut res.a);
        ring.intt_inplace(&mut res.b);
    }
}

/// RGSW(mu) with 2 * digits rows in NTT representation: row k < digits adds
/// mu * Bg^k to a and row digits + k adds mu * Bg^k to b.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgswCiphertext {
    pub rows: Vec<RlweCiphertext>,
}

impl RgswCiphertext {
    pub fn new(ring: &Ring<u64>, gadget: &Gadget) -> Self {
        Self {
            rows: (0..2 * gadget.digits).map(|_| RlweCiphertext::new(ring)).collect(),
        }
    }

    /// pt is the message in coefficient representation.
    #[allow(clippy::too_many_arguments)]
    pub fn encrypt_sk(
        &mut self,
        ring: &Ring<u64>,
        gadget: &Gadget,
        sk_ntt: &Poly<u64>,
        pt: &Poly<u64>,
        noise: &Distribution,
        source_xa: &mut Source,
        source_xe: &mut Source,
    ) {
        let mut pt_ntt: Poly<u64> = ring.new_poly();
        ring.ntt(pt, &mut pt_ntt);
        let mut scaled: Poly<u64> = ring.new_poly();
        let digits: usize = gadget.digits;
        self.rows.iter_mut().enumerate().for_each(|(r, row)| {
            row.encrypt_zero_ntt(ring, sk_ntt, noise, source_xa, source_xe);
            scaled.copy_from(&pt_ntt);
            ring.mul_scalar_inplace(gadget.power(ring, r % digits), &mut scaled);
            if r < digits {
                ring.add_inplace(&scaled, &mut row.a);
            } else {
                ring.add_inplace(&scaled, &mut row.b);
            }
        });
    }

    /// Encrypts the monomial X^k, k in [0, 2N).
    #[allow(clippy::too_many_arguments)]
    pub fn encrypt_monomial_sk(
        &mut self,
        ring: &Ring<u64>,
        gadget: &Gadget,
        sk_ntt: &Poly<u64>,
        k: usize,
        noise: &Distribution,
        source_xa: &mut Source,
        source_xe: &mut Source,
    ) {
        let pt: Poly<u64> = monomial(ring, k);
        self.encrypt_sk(ring, gadget, sk_ntt, &pt, noise, source_xa, source_xe);
    }
}

/// Returns X^k mod X^N+1, k in [0, 2N).
pub fn monomial(ring: &Ring<u64>, k: usize) -> Poly<u64> {
    let n: usize = ring.n();
    debug_assert!(k < 2 * n, "invalid k={} >= 2N={}", k, 2 * n);
    let mut pt: Poly<u64> = ring.new_poly();
    if k < n {
        pt.0[k] = 1;
    } else {
        pt.0[k - n] = ring.q() - 1;
    }
    pt
}

/// res <- acc (x) rgsw, acc and res in coefficient representation.
pub fn external_product(
    ring: &Ring<u64>,
    gadget: &Gadget,
    acc: &RlweCiphertext,
    rgsw: &RgswCiphertext,
    res: &mut RlweCiphertext,
) {
    let d: usize = gadget.digits;
    debug_assert_eq!(rgsw.rows.len(), 2 * d, "invalid rgsw: {} rows != 2 * {}", rgsw.rows.len(), d);
    let mut digits: Vec<Poly<u64>> = (0..2 * d).map(|_| ring.new_poly()).collect();
    {
        let (digits_a, digits_b) = digits.split_at_mut(d);
        gadget.decompose(ring, &acc.a, digits_a);
        gadget.decompose(ring, &acc.b, digits_b);
    }
    res.a.zero();
    res.b.zero();
    izip!(digits.iter_mut(), rgsw.rows.iter()).for_each(|(dk, row)| {
        ring.ntt_inplace(dk);
        ring.mul_coeffs_add(dk, &row.a, &mut res.a);
        ring.mul_coeffs_add(dk, &row.b, &mut res.b);
    });
    ring.intt_inplace(&mut res.a);
    ring.intt_inplace(&mut res.b);
}

/// acc <- acc (x) rgsw.
pub fn external_product_inplace(
    ring: &Ring<u64>,
    gadget: &Gadget,
    rgsw: &RgswCiphertext,
    acc: &mut RlweCiphertext,
) {
    let mut res: RlweCiphertext = RlweCiphertext::new(ring);
    external_product(ring, gadget, acc, rgsw, &mut res);
    *acc = res;
}
