use std::io::{Read, Result, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use rand_core::RngCore;
use rand_distr::{Distribution as _, StandardNormal};

use crate::source::Source;

/// Distribution of secret keys and noise terms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Distribution {
    Ternary,            // Uniform over {-1, 0, 1}
    Binary,             // Uniform over {0, 1}
    Gaussian(f64, f64), // Rounded normal (sigma, bound)
    ZERO,               // Debug mod
    NONE,               // Unitialized
}

const TAG_TERNARY: u8 = 0;
const TAG_BINARY: u8 = 1;
const TAG_GAUSSIAN: u8 = 2;
const TAG_ZERO: u8 = 3;
const TAG_NONE: u8 = 4;

impl Distribution {
    /// Draws one signed sample.
    pub fn sample(&self, source: &mut Source) -> i64 {
        match self {
            Distribution::Ternary => source.next_ternary(),
            Distribution::Binary => (source.next_u64() & 1) as i64,
            Distribution::Gaussian(sigma, bound) => sample_gaussian(source, *sigma, *bound),
            Distribution::ZERO | Distribution::NONE => 0,
        }
    }

    pub fn fill(&self, source: &mut Source, a: &mut [i64]) {
        a.iter_mut().for_each(|x| *x = self.sample(source));
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        match self {
            Distribution::Ternary => writer.write_u8(TAG_TERNARY),
            Distribution::Binary => writer.write_u8(TAG_BINARY),
            Distribution::Gaussian(sigma, bound) => {
                writer.write_u8(TAG_GAUSSIAN)?;
                writer.write_f64::<LittleEndian>(*sigma)?;
                writer.write_f64::<LittleEndian>(*bound)
            }
            Distribution::ZERO => writer.write_u8(TAG_ZERO),
            Distribution::NONE => writer.write_u8(TAG_NONE),
        }
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let dist: Distribution = match reader.read_u8()? {
            TAG_TERNARY => Distribution::Ternary,
            TAG_BINARY => Distribution::Binary,
            TAG_GAUSSIAN => {
                let sigma: f64 = reader.read_f64::<LittleEndian>()?;
                let bound: f64 = reader.read_f64::<LittleEndian>()?;
                Distribution::Gaussian(sigma, bound)
            }
            TAG_ZERO => Distribution::ZERO,
            TAG_NONE => Distribution::NONE,
            _ => {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "Invalid tag",
                ));
            }
        };
        Ok(dist)
    }
}

/// Rounded normal sample of standard deviation `sigma`, resampled while |x| > bound.
#[inline(always)]
pub fn sample_gaussian(source: &mut Source, sigma: f64, bound: f64) -> i64 {
    debug_assert!(
        bound >= 0.5 || sigma == 0.0,
        "invalid bound: {} would reject every sample",
        bound
    );
    loop {
        let x: f64 = StandardNormal.sample(source);
        let x: f64 = (x * sigma).round();
        if x.abs() <= bound {
            return x as i64;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaussian_respects_bound() {
        let mut source: Source = Source::new([0u8; 32]);
        let sigma: f64 = 3.19;
        let bound: f64 = 6.0 * sigma;
        let mut sum_sq: f64 = 0.0;
        let samples: usize = 1 << 14;
        for _ in 0..samples {
            let x: i64 = sample_gaussian(&mut source, sigma, bound);
            assert!((x as f64).abs() <= bound);
            sum_sq += (x * x) as f64;
        }
        let std: f64 = (sum_sq / samples as f64).sqrt();
        assert!((std - sigma).abs() < 0.3, "std={} sigma={}", std, sigma);
    }

    #[test]
    fn binary_and_ternary_support() {
        let mut source: Source = Source::new([5u8; 32]);
        let mut a: Vec<i64> = vec![0; 512];
        Distribution::Ternary.fill(&mut source, &mut a);
        assert!(a.iter().all(|x| (-1..=1).contains(x)));
        Distribution::Binary.fill(&mut source, &mut a);
        assert!(a.iter().all(|x| (0..=1).contains(x)));
        Distribution::ZERO.fill(&mut source, &mut a);
        assert!(a.iter().all(|x| *x == 0));
    }

    #[test]
    fn tag_round_trip() {
        for dist in [
            Distribution::Ternary,
            Distribution::Binary,
            Distribution::Gaussian(3.19, 19.14),
            Distribution::ZERO,
            Distribution::NONE,
        ] {
            let mut buf: Vec<u8> = Vec::new();
            dist.write_to(&mut buf).expect("write_to failed");
            let mut reader: &[u8] = &buf;
            assert_eq!(Distribution::read_from(&mut reader).expect("read_from failed"), dist);
        }
        let mut reader: &[u8] = &[0xff];
        assert!(Distribution::read_from(&mut reader).is_err());
    }
}
