use math::poly::Poly;
use math::ring::Ring;

use crate::params::BinFheParams;

/// Amplitude of the test vector, Q/8 + 1.
#[inline(always)]
pub fn amplitude(big_q: u64) -> u64 {
    (big_q >> 3) + 1
}

/// Returns the test vector of a gate for an input ciphertext with body b.
///
/// Slot j (coefficients [j * factor, (j + 1) * factor)) holds -(Q/8 + 1) when
/// (b - j) mod q lies in the window [window_start, window_start + q/2) mod q,
/// and Q/8 + 1 otherwise.
pub fn test_vector(
    params: &BinFheParams,
    ring: &Ring<u64>,
    b: u64,
    window_start: u64,
) -> Poly<u64> {
    let q: u64 = params.q();
    let q_half: u64 = q >> 1;
    let factor: usize = params.factor();
    let amp: u64 = amplitude(ring.q());
    let neg_amp: u64 = ring.q() - amp;

    let mut tv: Poly<u64> = ring.new_poly();
    tv.0.chunks_exact_mut(factor)
        .enumerate()
        .for_each(|(j, slot)| {
            let x: u64 = (b + q - j as u64) % q;
            let in_window: bool = (x + q - window_start) % q < q_half;
            slot.fill(if in_window { neg_amp } else { amp });
        });
    tv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{BinFheParams, SecurityLevel};

    #[test]
    fn test_vector_windows() {
        let params: BinFheParams = BinFheParams::from_level(SecurityLevel::Toy).unwrap();
        let ring: Ring<u64> = Ring::new(params.big_n(), params.big_q());
        let q: u64 = params.q();
        let amp: u64 = amplitude(ring.q());

        // Window [7q/8, 3q/8): slot j is negative when b - j falls inside.
        let tv: Poly<u64> = test_vector(&params, &ring, 0, 7 * q / 8);
        assert_eq!(tv.n(), params.big_n());
        assert_eq!(tv.0[0], ring.q() - amp);
        assert_eq!(tv.0[q as usize / 8], ring.q() - amp);
        assert_eq!(tv.0[q as usize / 8 + 1], amp);
        assert_eq!(tv.0[q as usize / 2 - 1], amp);
    }
}
