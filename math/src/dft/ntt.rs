use crate::dft::DFT;
use crate::modulus::barrett::Barrett;
use crate::modulus::prime::Prime;
use crate::modulus::ReduceOnce;
use crate::modulus::WordOps;
use crate::modulus::ONCE;
use itertools::izip;

/// Negacyclic NTT over Z_q[X]/(X^{nth_root/2}+1).
///
/// Twiddles are the powers of a primitive nth_root-th root of unity psi stored in
/// bit-reversed order. The forward transform maps a polynomial a to the vector whose
/// i-th entry is a(psi^{2*rev(i)+1}), with rev the bit reversal over log2(nth_root/2) bits.
pub struct Table<O> {
    prime: Prime<O>,
    psi: O,
    psi_forward_rev: Vec<Barrett<u64>>,
    psi_backward_rev: Vec<Barrett<u64>>,
    n_inv: Barrett<u64>,
    q: O,
}

impl Table<u64> {
    pub fn new(prime: Prime<u64>, nth_root: u64) -> Table<u64> {
        assert!(
            nth_root & (nth_root - 1) == 0,
            "invalid argument: nth_root = {} is not a power of two",
            nth_root
        );
        assert!(nth_root >= 4, "invalid argument: nth_root = {} < 4", nth_root);

        let psi: u64 = prime.primitive_nth_root(nth_root);
        let psi_inv: u64 = prime.inv(psi);

        let n: usize = (nth_root >> 1) as usize;

        let mut psi_forward_rev: Vec<Barrett<u64>> = vec![Barrett(0, 0); n];
        let mut psi_backward_rev: Vec<Barrett<u64>> = vec![Barrett(0, 0); n];

        psi_forward_rev[0] = prime.barrett.prepare(1);
        psi_backward_rev[0] = prime.barrett.prepare(1);

        let log_n: u32 = n.log2() as _;

        let mut powers_forward: u64 = 1u64;
        let mut powers_backward: u64 = 1u64;

        for i in 1..n {
            let i_rev: usize = i.reverse_bits_msb(log_n);
            powers_forward = prime.mul(powers_forward, psi);
            powers_backward = prime.mul(powers_backward, psi_inv);
            psi_forward_rev[i_rev] = prime.barrett.prepare(powers_forward);
            psi_backward_rev[i_rev] = prime.barrett.prepare(powers_backward);
        }

        let n_inv: Barrett<u64> = prime.barrett.prepare(prime.inv(n as u64));
        let q: u64 = prime.q();

        Self {
            prime,
            psi,
            psi_forward_rev,
            psi_backward_rev,
            n_inv,
            q,
        }
    }

    pub fn psi(&self) -> u64 {
        self.psi
    }

    pub fn n(&self) -> usize {
        self.psi_forward_rev.len()
    }
}

impl DFT<u64> for Table<u64> {
    fn forward_inplace(&self, a: &mut [u64]) {
        self.forward_inplace(a)
    }

    fn backward_inplace(&self, a: &mut [u64]) {
        self.backward_inplace(a)
    }
}

impl Table<u64> {
    /// Cooley-Tukey, natural order in, bit-reversed order out. Values in [0, q).
    pub fn forward_inplace(&self, a: &mut [u64]) {
        let n: usize = a.len();
        assert!(
            n == self.n(),
            "invalid a.len()= {} != table size {}",
            n,
            self.n()
        );
        let log_n: u32 = n.log2() as _;

        for layer in 0..log_n {
            let (m, size) = (1 << layer, 1 << (log_n - layer - 1));
            let t: usize = 2 * size;
            izip!(a.chunks_exact_mut(t), &self.psi_forward_rev[m..]).for_each(|(a, psi)| {
                let (a, b) = a.split_at_mut(size);
                izip!(a, b).for_each(|(a, b)| self.dit_inplace(a, b, *psi));
            });
        }
    }

    #[inline(always)]
    fn dit_inplace(&self, a: &mut u64, b: &mut u64, t: Barrett<u64>) {
        debug_assert!(*a < self.q, "a:{} q:{}", a, self.q);
        debug_assert!(*b < self.q, "b:{} q:{}", b, self.q);
        let bt: u64 = self.prime.barrett.mul_external::<ONCE>(t, *b);
        *b = (*a + self.q - bt).reduce_once(self.q);
        *a = (*a + bt).reduce_once(self.q);
    }

    /// Gentleman-Sande, bit-reversed order in, natural order out. Values in [0, q).
    pub fn backward_inplace(&self, a: &mut [u64]) {
        let n: usize = a.len();
        assert!(
            n == self.n(),
            "invalid a.len()= {} != table size {}",
            n,
            self.n()
        );
        let log_n: u32 = n.log2() as _;

        for layer in (0..log_n).rev() {
            let (m, size) = (1 << layer, 1 << (log_n - layer - 1));
            let t: usize = 2 * size;
            izip!(a.chunks_exact_mut(t), &self.psi_backward_rev[m..]).for_each(|(a, psi)| {
                let (a, b) = a.split_at_mut(size);
                izip!(a, b).for_each(|(a, b)| self.dif_inplace(a, b, *psi));
            });
        }

        a.iter_mut()
            .for_each(|a| self.prime.barrett.mul_external_assign::<ONCE>(self.n_inv, a));
    }

    #[inline(always)]
    fn dif_inplace(&self, a: &mut u64, b: &mut u64, t: Barrett<u64>) {
        debug_assert!(*a < self.q, "a:{} q:{}", a, self.q);
        debug_assert!(*b < self.q, "b:{} q:{}", b, self.q);
        let d: u64 = self
            .prime
            .barrett
            .mul_external::<ONCE>(t, *a + self.q - *b);
        *a = (*a + *b).reduce_once(self.q);
        *b = d;
    }
}
