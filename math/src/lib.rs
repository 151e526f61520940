//! Word-sized modular arithmetic over NTT-friendly primes.
//!
//! The crate provides what the bootstrapping layer consumes as a black box:
//! - [modulus::prime::Prime]: prime moduli with Barrett precomputations, roots of unity and a
//!   generator of primes `q = 1 mod 2N`.
//! - [dft::ntt::Table]: the negacyclic number theoretic transform over `Z_q[X]/(X^N+1)`.
//! - [ring::Ring] and [poly::Poly]: polynomial arithmetic in coefficient and evaluation
//!   representation, automorphisms `X -> X^k` and sampling from a [sampling::source::Source].

pub mod automorphism;
pub mod dft;
pub mod modulus;
pub mod poly;
pub mod ring;
