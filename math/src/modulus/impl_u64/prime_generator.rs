use crate::modulus::impl_u64::prime::is_prime;
use crate::modulus::prime::Prime;

/// Enumerates primes q = 1 mod nth_root around 2^bit_size.
///
/// Upstream primes are > 2^bit_size and downstream primes are < 2^bit_size; both
/// directions stop once they drift half a bit away from bit_size.
pub struct NTTFriendlyPrimesGenerator {
    size: f64,
    next_prime: u64,
    prev_prime: u64,
    nth_root: u64,
    check_next_prime: bool,
    check_prev_prime: bool,
}

impl NTTFriendlyPrimesGenerator {
    pub fn new(bit_size: u64, nth_root: u64) -> Self {
        assert!(
            nth_root & (nth_root - 1) == 0,
            "invalid argument: nth_root = {} is not a power of two",
            nth_root
        );
        assert!(
            (2..62).contains(&bit_size),
            "invalid argument: bit_size = {} not in [2, 62)",
            bit_size
        );

        let next_prime: u64 = (1 << bit_size) + 1;
        let check_next_prime: bool = next_prime <= nth_root.wrapping_neg();
        let check_prev_prime: bool = next_prime > nth_root;
        let prev_prime: u64 = next_prime.saturating_sub(nth_root);

        Self {
            size: bit_size as f64,
            check_next_prime,
            check_prev_prime,
            nth_root,
            next_prime,
            prev_prime,
        }
    }

    pub fn next_alternating_primes(&mut self, k: usize) -> Vec<Prime<u64>> {
        (0..k).map_while(|_| self.next_alternating_prime()).collect()
    }

    /// Returns the next prime below 2^bit_size, or None once the list is exhausted.
    pub fn next_downstream_prime(&mut self) -> Option<Prime<u64>> {
        while self.check_prev_prime {
            if let Some(q) = self.step_downstream() {
                return Some(Prime::new_unchecked(q));
            }
        }
        None
    }

    pub fn next_alternating_prime(&mut self) -> Option<Prime<u64>> {
        while self.check_next_prime || self.check_prev_prime {
            if self.check_next_prime {
                if let Some(q) = self.step_upstream() {
                    return Some(Prime::new_unchecked(q));
                }
            }
            if self.check_prev_prime {
                if let Some(q) = self.step_downstream() {
                    return Some(Prime::new_unchecked(q));
                }
            }
        }
        None
    }

    fn step_upstream(&mut self) -> Option<u64> {
        if (self.next_prime as f64).log2() - self.size >= 0.5
            || self.next_prime > u64::MAX - self.nth_root
        {
            self.check_next_prime = false;
            return None;
        }
        let candidate: u64 = self.next_prime;
        self.next_prime += self.nth_root;
        is_prime(candidate).then_some(candidate)
    }

    fn step_downstream(&mut self) -> Option<u64> {
        if self.size - (self.prev_prime as f64).log2() >= 0.5 || self.prev_prime < self.nth_root {
            self.check_prev_prime = false;
            return None;
        }
        let candidate: u64 = self.prev_prime;
        self.prev_prime -= self.nth_root;
        is_prime(candidate).then_some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prime_generation() {
        let nth_root: u64 = 1 << 16;
        let mut g: NTTFriendlyPrimesGenerator = NTTFriendlyPrimesGenerator::new(30, nth_root);

        let primes: Vec<Prime<u64>> = g.next_alternating_primes(10);
        assert_eq!(primes.len(), 10);
        for prime in primes.iter() {
            assert!(prime.q() % nth_root == 1);
            assert!(is_prime(prime.q()));
        }
    }

    #[test]
    fn largest_downstream_prime() {
        let mut g: NTTFriendlyPrimesGenerator = NTTFriendlyPrimesGenerator::new(27, 1024);
        let prime: Prime<u64> = g.next_downstream_prime().expect("no prime found");
        assert_eq!(prime.q(), 134215681);
        let next: Prime<u64> = g.next_downstream_prime().expect("no prime found");
        assert!(next.q() < prime.q());
    }

    #[test]
    fn exhausted_list() {
        // The only candidate, 1025, lies more than half a bit below 2^11.
        let mut g: NTTFriendlyPrimesGenerator = NTTFriendlyPrimesGenerator::new(11, 1024);
        assert!(g.next_downstream_prime().is_none());
    }
}
