//! Boolean gates on LWE-encrypted bits with gate bootstrapping (FHEW/TFHE).
//!
//! Every two-input gate combines its operands linearly, then bootstraps the
//! combination: the accumulator, an RLWE encryption of a test vector that encodes
//! the gate, is blindly rotated by the encrypted phase, a fresh LWE ciphertext is
//! extracted from its constant coefficient, key switched back to the LWE secret and
//! mod switched back to the external modulus q. The output noise does not depend on
//! the input noise, so circuits of any depth can be evaluated.
//!
//! The pipeline is split as follows:
//! - [params]: the parameter registry ([params::SecurityLevel], [params::BinFheParams])
//!   and the [params::BlindRotationMethod] selector.
//! - [lwe]: LWE secrets and ciphertexts, encoding, key and modulus switching.
//! - [rgsw]: RLWE, gadget and RGSW ciphertexts and the external product.
//! - [blind_rotation]: the three blind rotation keys and algorithms, the test vectors
//!   and sample extraction.
//! - [gates]: gate tags, their pre-combination and their decision windows.
//! - [context]: [context::BinFheContext], the entry point binding one parameter set and
//!   one blind rotation method.
//!
//! # Example
//!
//! ```no_run
//! use binfhe::context::BinFheContext;
//! use binfhe::gates::BinGate;
//! use binfhe::params::{BlindRotationMethod, SecurityLevel};
//! use sampling::source::Source;
//!
//! let mut ctx = BinFheContext::new(SecurityLevel::Toy, BlindRotationMethod::Ginx).unwrap();
//! let mut source_xs = Source::new([0u8; 32]);
//! let mut source_xa = Source::new([1u8; 32]);
//! let mut source_xe = Source::new([2u8; 32]);
//!
//! let sk = ctx.key_gen(&mut source_xs);
//! ctx.bt_key_gen(&sk, &mut source_xs, &mut source_xa, &mut source_xe);
//!
//! let a = ctx.encrypt(&sk, 1, &mut source_xa, &mut source_xe).unwrap();
//! let b = ctx.encrypt(&sk, 0, &mut source_xa, &mut source_xe).unwrap();
//! let c = ctx.eval_bin_gate(BinGate::Nand, &a, &b).unwrap();
//! assert_eq!(ctx.decrypt(&sk, &c), 1);
//! ```

pub mod blind_rotation;
pub mod context;
mod errors;
pub mod gates;
pub mod lwe;
pub mod params;
pub mod rgsw;

pub use errors::{Error, ParametersError, Result};

#[cfg(test)]
mod tests;
