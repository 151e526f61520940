use std::fmt::Display;
use std::str::FromStr;
use std::sync::OnceLock;

use math::modulus::impl_u64::prime_generator::NTTFriendlyPrimesGenerator;
use sampling::distributions::Distribution;
use utils::map::Map;

use crate::{Error, ParametersError, Result};

/// Truncation bound of the error distribution, in multiples of sigma.
pub const SIGMA_BOUND_FACTOR: f64 = 6.0;

/// Named parameter sets of the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SecurityLevel {
    /// Insecure, for tests only.
    Toy,
    Medium,
    Std128,
    Std128Ap,
    Std128Lmkcdey,
    Std192,
    Std256,
    /// Toy dimensions with signed plaintext decoding.
    SignedModTest,
}

impl SecurityLevel {
    pub const ALL: [SecurityLevel; 8] = [
        SecurityLevel::Toy,
        SecurityLevel::Medium,
        SecurityLevel::Std128,
        SecurityLevel::Std128Ap,
        SecurityLevel::Std128Lmkcdey,
        SecurityLevel::Std192,
        SecurityLevel::Std256,
        SecurityLevel::SignedModTest,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SecurityLevel::Toy => "TOY",
            SecurityLevel::Medium => "MEDIUM",
            SecurityLevel::Std128 => "STD128",
            SecurityLevel::Std128Ap => "STD128_AP",
            SecurityLevel::Std128Lmkcdey => "STD128_LMKCDEY",
            SecurityLevel::Std192 => "STD192",
            SecurityLevel::Std256 => "STD256",
            SecurityLevel::SignedModTest => "SIGNED_MOD_TEST",
        }
    }

    fn literal(&self) -> BinFheParamsLiteral {
        match self {
            SecurityLevel::Toy => TOY,
            SecurityLevel::Medium => MEDIUM,
            SecurityLevel::Std128 => STD128,
            SecurityLevel::Std128Ap => STD128_AP,
            SecurityLevel::Std128Lmkcdey => STD128_LMKCDEY,
            SecurityLevel::Std192 => STD192,
            SecurityLevel::Std256 => STD256,
            SecurityLevel::SignedModTest => SIGNED_MOD_TEST,
        }
    }
}

impl Display for SecurityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SecurityLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SecurityLevel::ALL
            .iter()
            .find(|level| level.name() == s)
            .copied()
            .ok_or_else(|| Error::UnknownSecurityLevel(s.to_string()))
    }
}

/// The three interchangeable blind rotation algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlindRotationMethod {
    /// Method-A: Alperin-Sheriff & Peikert accumulator (FHEW).
    Ap,
    /// Method-B: Gama-Izabachene-Nguyen-Xie / CGGI accumulator (TFHE).
    Ginx,
    /// Method-C: Lee-Micciancio-Kim-Choi-Deryabin-Eom-Yoo, automorphism based.
    Lmkcdey,
}

impl Display for BlindRotationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlindRotationMethod::Ap => write!(f, "AP"),
            BlindRotationMethod::Ginx => write!(f, "GINX"),
            BlindRotationMethod::Lmkcdey => write!(f, "LMKCDEY"),
        }
    }
}

impl FromStr for BlindRotationMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "AP" | "A" => Ok(BlindRotationMethod::Ap),
            "GINX" | "B" => Ok(BlindRotationMethod::Ginx),
            "LMKCDEY" | "C" => Ok(BlindRotationMethod::Lmkcdey),
            _ => Err(Error::UnknownMethod(s.to_string())),
        }
    }
}

/// Plain description of a parameter set, from which [BinFheParams] is derived.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BinFheParamsLiteral {
    pub name: &'static str,
    /// Bit size of the ring modulus Q; the largest NTT-friendly prime below 2^q_bits is used.
    pub q_bits: usize,
    pub big_n: usize,
    pub n: usize,
    pub q: u64,
    /// Key switching modulus, Q when None.
    pub q_ks: Option<u64>,
    pub sigma: f64,
    pub base_ks: u64,
    pub base_g: u64,
    pub base_r: u64,
    pub num_auto_keys: usize,
    pub key_dist: Distribution,
    pub signed_mode: bool,
}

pub const TOY: BinFheParamsLiteral = BinFheParamsLiteral {
    name: "TOY",
    q_bits: 27,
    big_n: 512,
    n: 32,
    q: 1024,
    q_ks: None,
    sigma: 3.19,
    base_ks: 8,
    base_g: 1 << 7,
    base_r: 4,
    num_auto_keys: 10,
    key_dist: Distribution::Ternary,
    signed_mode: false,
};

pub const MEDIUM: BinFheParamsLiteral = BinFheParamsLiteral {
    name: "MEDIUM",
    q_bits: 28,
    big_n: 1024,
    n: 256,
    q: 512,
    q_ks: Some(1 << 14),
    sigma: 3.19,
    base_ks: 32,
    base_g: 1 << 10,
    base_r: 32,
    num_auto_keys: 10,
    key_dist: Distribution::Ternary,
    signed_mode: false,
};

pub const STD128: BinFheParamsLiteral = BinFheParamsLiteral {
    name: "STD128",
    q_bits: 27,
    big_n: 1024,
    n: 503,
    q: 1024,
    q_ks: Some(1 << 14),
    sigma: 3.19,
    base_ks: 32,
    base_g: 1 << 7,
    base_r: 32,
    num_auto_keys: 10,
    key_dist: Distribution::Ternary,
    signed_mode: false,
};

pub const STD128_AP: BinFheParamsLiteral = BinFheParamsLiteral {
    name: "STD128_AP",
    q_bits: 27,
    big_n: 1024,
    n: 503,
    q: 1024,
    q_ks: Some(1 << 14),
    sigma: 3.19,
    base_ks: 32,
    base_g: 1 << 9,
    base_r: 32,
    num_auto_keys: 10,
    key_dist: Distribution::Ternary,
    signed_mode: false,
};

pub const STD128_LMKCDEY: BinFheParamsLiteral = BinFheParamsLiteral {
    name: "STD128_LMKCDEY",
    q_bits: 28,
    big_n: 1024,
    n: 446,
    q: 1024,
    q_ks: Some(1 << 14),
    sigma: 3.19,
    base_ks: 32,
    base_g: 1 << 10,
    base_r: 32,
    num_auto_keys: 10,
    key_dist: Distribution::Ternary,
    signed_mode: false,
};

pub const STD192: BinFheParamsLiteral = BinFheParamsLiteral {
    name: "STD192",
    q_bits: 37,
    big_n: 2048,
    n: 805,
    q: 1024,
    q_ks: Some(1 << 15),
    sigma: 3.19,
    base_ks: 32,
    base_g: 1 << 13,
    base_r: 32,
    num_auto_keys: 10,
    key_dist: Distribution::Ternary,
    signed_mode: false,
};

pub const STD256: BinFheParamsLiteral = BinFheParamsLiteral {
    name: "STD256",
    q_bits: 29,
    big_n: 2048,
    n: 990,
    q: 2048,
    q_ks: Some(1 << 14),
    sigma: 3.19,
    base_ks: 32,
    base_g: 1 << 8,
    base_r: 32,
    num_auto_keys: 10,
    key_dist: Distribution::Ternary,
    signed_mode: false,
};

pub const SIGNED_MOD_TEST: BinFheParamsLiteral = BinFheParamsLiteral {
    name: "SIGNED_MOD_TEST",
    signed_mode: true,
    ..TOY
};

static REGISTRY: OnceLock<Map<SecurityLevel, BinFheParams>> = OnceLock::new();

fn registry() -> &'static Map<SecurityLevel, BinFheParams> {
    REGISTRY.get_or_init(|| {
        let mut map: Map<SecurityLevel, BinFheParams> = Map::new();
        SecurityLevel::ALL.iter().for_each(|level| {
            let params: BinFheParams = BinFheParams::new(&level.literal())
                .unwrap_or_else(|e| panic!("invalid {} literal: {}", level, e));
            map.insert(*level, params);
        });
        map
    })
}

/// Immutable parameter set of a binary FHE context.
#[derive(Clone, Debug, PartialEq)]
pub struct BinFheParams {
    name: &'static str,
    n: usize,
    big_n: usize,
    q: u64,
    big_q: u64,
    q_ks: u64,
    sigma: f64,
    base_ks: u64,
    base_g: u64,
    base_r: u64,
    num_auto_keys: usize,
    key_dist: Distribution,
    signed_mode: bool,
}

impl BinFheParams {
    /// Derives the parameter set from its literal description, selecting Q as the
    /// largest prime below 2^q_bits with Q = 1 mod 2N.
    pub fn new(lit: &BinFheParamsLiteral) -> Result<Self> {
        if lit.big_n < 4 || !lit.big_n.is_power_of_two() {
            return Err(ParametersError::InvalidRingDimension(lit.big_n).into());
        }
        if !(8..=61).contains(&lit.q_bits) {
            return Err(ParametersError::InvalidModulus(format!(
                "q_bits={} is not in [8, 61]",
                lit.q_bits
            ))
            .into());
        }

        let mut primes: NTTFriendlyPrimesGenerator =
            NTTFriendlyPrimesGenerator::new(lit.q_bits as u64, 2 * lit.big_n as u64);
        let big_q: u64 = match primes.next_downstream_prime() {
            Some(prime) => prime.q,
            None => {
                return Err(ParametersError::InvalidModulus(format!(
                    "no prime Q < 2^{} with Q = 1 mod {}",
                    lit.q_bits,
                    2 * lit.big_n
                ))
                .into());
            }
        };

        let params: BinFheParams = Self {
            name: lit.name,
            n: lit.n,
            big_n: lit.big_n,
            q: lit.q,
            big_q,
            q_ks: lit.q_ks.unwrap_or(big_q),
            sigma: lit.sigma,
            base_ks: lit.base_ks,
            base_g: lit.base_g,
            base_r: lit.base_r,
            num_auto_keys: lit.num_auto_keys,
            key_dist: lit.key_dist,
            signed_mode: lit.signed_mode,
        };
        params.validate()?;
        Ok(params)
    }

    /// Returns the parameter set registered under level.
    pub fn from_level(level: SecurityLevel) -> Result<Self> {
        registry()
            .get(&level)
            .cloned()
            .ok_or_else(|| Error::UnknownSecurityLevel(level.to_string()))
    }

    pub fn validate(&self) -> std::result::Result<(), ParametersError> {
        if self.big_n < 4 || !self.big_n.is_power_of_two() {
            return Err(ParametersError::InvalidRingDimension(self.big_n));
        }
        if self.n == 0 {
            return Err(ParametersError::InvalidDimension(self.n));
        }
        if self.q < 4 || !self.q.is_power_of_two() || (2 * self.big_n as u64) % self.q != 0 {
            return Err(ParametersError::InvalidModulus(format!(
                "q={} is not a power of two >= 4 dividing 2N={}",
                self.q,
                2 * self.big_n
            )));
        }
        if self.big_q % (2 * self.big_n as u64) != 1 || self.big_q >= 1 << 62 {
            return Err(ParametersError::InvalidModulus(format!(
                "Q={} is not an NTT-friendly prime for N={}",
                self.big_q, self.big_n
            )));
        }
        if self.q_ks < self.q || self.q_ks > self.big_q {
            return Err(ParametersError::InvalidModulus(format!(
                "q_ks={} is not in [q={}, Q={}]",
                self.q_ks, self.q, self.big_q
            )));
        }
        if self.base_g < 2 || !self.base_g.is_power_of_two() || self.base_g >= self.big_q {
            return Err(ParametersError::InvalidBase(format!(
                "base_g={} is not a power of two in [2, Q)",
                self.base_g
            )));
        }
        if self.base_ks < 2 {
            return Err(ParametersError::InvalidBase(format!("base_ks={} < 2", self.base_ks)));
        }
        if self.base_r < 2 {
            return Err(ParametersError::InvalidBase(format!("base_r={} < 2", self.base_r)));
        }
        if self.num_auto_keys == 0 {
            return Err(ParametersError::InvalidBase(
                "num_auto_keys=0, at least one automorphism key is required".to_string(),
            ));
        }
        if !self.sigma.is_finite() || self.sigma <= 0.0 {
            return Err(ParametersError::InvalidNoise(format!(
                "sigma={} is not positive and finite",
                self.sigma
            )));
        }
        Ok(())
    }

    /// Checks that the key distribution is supported by method. GINX keys one RGSW
    /// pair per secret coefficient and only accepts coefficients in {-1, 0, 1}.
    pub fn validate_method(
        &self,
        method: BlindRotationMethod,
    ) -> std::result::Result<(), ParametersError> {
        if method == BlindRotationMethod::Ginx
            && !matches!(self.key_dist, Distribution::Ternary | Distribution::Binary)
        {
            return Err(ParametersError::InvalidNoise(format!(
                "key distribution {:?} is not ternary or binary, required by {}",
                self.key_dist, method
            )));
        }
        Ok(())
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// LWE dimension of the external ciphertexts.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Ring dimension of the accumulator.
    pub fn big_n(&self) -> usize {
        self.big_n
    }

    /// Modulus of the external ciphertexts.
    pub fn q(&self) -> u64 {
        self.q
    }

    /// Ring modulus of the accumulator.
    pub fn big_q(&self) -> u64 {
        self.big_q
    }

    pub fn q_ks(&self) -> u64 {
        self.q_ks
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn base_ks(&self) -> u64 {
        self.base_ks
    }

    pub fn base_g(&self) -> u64 {
        self.base_g
    }

    pub fn log_base_g(&self) -> usize {
        self.base_g.trailing_zeros() as usize
    }

    pub fn base_r(&self) -> u64 {
        self.base_r
    }

    pub fn num_auto_keys(&self) -> usize {
        self.num_auto_keys
    }

    pub fn key_dist(&self) -> Distribution {
        self.key_dist
    }

    pub fn signed_mode(&self) -> bool {
        self.signed_mode
    }

    /// Error distribution of every encryption.
    pub fn noise(&self) -> Distribution {
        Distribution::Gaussian(self.sigma, SIGMA_BOUND_FACTOR * self.sigma)
    }

    /// Number of gadget digits of Q in base Bg.
    pub fn d_g(&self) -> usize {
        let log_q: usize = (u64::BITS - self.big_q.leading_zeros()) as usize;
        log_q.div_ceil(self.log_base_g())
    }

    /// Number of digits of q_ks in base base_ks.
    pub fn d_ks(&self) -> usize {
        digits(self.q_ks, self.base_ks)
    }

    /// Number of digits of q in base base_r.
    pub fn d_r(&self) -> usize {
        digits(self.q, self.base_r)
    }

    /// 2N / q, the stride between test vector slots.
    pub fn factor(&self) -> usize {
        2 * self.big_n / self.q as usize
    }
}

/// Smallest d such that base^d >= q.
fn digits(q: u64, base: u64) -> usize {
    let mut d: usize = 0;
    let mut acc: u128 = 1;
    while acc < q as u128 {
        acc *= base as u128;
        d += 1;
    }
    d
}
