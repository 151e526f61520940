use crate::modulus::barrett::BarrettPrecomp;

/// A prime modulus q with its Barrett constants and the distinct prime factors of q-1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prime<O> {
    pub q: O,
    /// Euler totient of q.
    pub phi: O,
    /// Distinct prime factors of q-1.
    pub factors: Vec<O>,
    pub barrett: BarrettPrecomp<O>,
}
