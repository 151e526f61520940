/// Polynomial of Z_q[X]/(X^n+1), in coefficient or evaluation representation.
/// The representation is tracked by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Poly<O>(pub Vec<O>);

impl<O> Poly<O>
where
    O: Default + Clone + Copy,
{
    pub fn new(n: usize) -> Self {
        Self(vec![O::default(); n])
    }

    pub fn n(&self) -> usize {
        self.0.len()
    }

    pub fn log_n(&self) -> usize {
        (usize::BITS - (self.n() - 1).leading_zeros()) as usize
    }

    pub fn set_all(&mut self, v: &O) {
        self.0.fill(*v)
    }

    pub fn zero(&mut self) {
        self.set_all(&O::default())
    }

    pub fn copy_from(&mut self, other: &Poly<O>) {
        if std::ptr::eq(self, other) {
            return;
        }
        self.0.resize(other.n(), O::default());
        self.0.copy_from_slice(&other.0)
    }
}
