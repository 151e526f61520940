pub mod ntt;

/// Forward and backward transforms over a fixed modulus and length.
pub trait DFT<O>: Send + Sync {
    fn forward_inplace(&self, a: &mut [O]);
    fn backward_inplace(&self, a: &mut [O]);
}
