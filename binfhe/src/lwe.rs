use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use itertools::izip;
use math::modulus::mod_switch;
use sampling::distributions::Distribution;
use sampling::source::Source;
use utils::serialization::{ReaderFrom, WriterTo};

/// LWE secret key with small signed coefficients, usable at any modulus.
#[derive(Clone, Debug, PartialEq)]
pub struct LweSecretKey {
    pub data: Vec<i64>,
    pub dist: Distribution,
}

impl LweSecretKey {
    pub fn new(n: usize) -> Self {
        Self {
            data: vec![0i64; n],
            dist: Distribution::NONE,
        }
    }

    pub fn n(&self) -> usize {
        self.data.len()
    }

    pub fn fill(&mut self, dist: Distribution, source: &mut Source) {
        dist.fill(source, &mut self.data);
        self.dist = dist;
    }
}

/// LWE ciphertext (a, b) mod q with phase b - <a, s>.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct LweCiphertext {
    pub a: Vec<u64>,
    pub b: u64,
    pub q: u64,
}

impl LweCiphertext {
    pub fn new(n: usize, q: u64) -> Self {
        Self {
            a: vec![0u64; n],
            b: 0,
            q,
        }
    }

    /// Noiseless encryption of the already encoded value mu.
    pub fn trivial(n: usize, q: u64, mu: u64) -> Self {
        Self {
            a: vec![0u64; n],
            b: mu % q,
            q,
        }
    }

    pub fn n(&self) -> usize {
        self.a.len()
    }

    pub fn q(&self) -> u64 {
        self.q
    }

    /// self <- self + other.
    pub fn add_inplace(&mut self, other: &LweCiphertext) {
        debug_assert_eq!(self.q, other.q, "invalid inputs: moduli differ");
        debug_assert_eq!(self.n(), other.n(), "invalid inputs: dimensions differ");
        let q: u64 = self.q;
        izip!(self.a.iter_mut(), other.a.iter()).for_each(|(x, y)| *x = (*x + *y) % q);
        self.b = (self.b + other.b) % q;
    }

    /// self <- self - other.
    pub fn sub_inplace(&mut self, other: &LweCiphertext) {
        debug_assert_eq!(self.q, other.q, "invalid inputs: moduli differ");
        debug_assert_eq!(self.n(), other.n(), "invalid inputs: dimensions differ");
        let q: u64 = self.q;
        izip!(self.a.iter_mut(), other.a.iter()).for_each(|(x, y)| *x = (*x + q - *y) % q);
        self.b = (self.b + q - other.b) % q;
    }

    /// Adds c to the phase.
    pub fn add_constant_inplace(&mut self, c: u64) {
        self.b = (self.b + c % self.q) % self.q;
    }

    pub fn double_inplace(&mut self) {
        let q: u64 = self.q;
        self.a.iter_mut().for_each(|x| *x = (*x << 1) % q);
        self.b = (self.b << 1) % q;
    }

    pub fn neg_inplace(&mut self) {
        let q: u64 = self.q;
        self.a.iter_mut().for_each(|x| *x = (q - *x) % q);
        self.b = (q - self.b) % q;
    }

    /// Returns b - <a, s> mod q.
    pub fn phase(&self, sk: &LweSecretKey) -> u64 {
        debug_assert_eq!(
            self.n(),
            sk.n(),
            "invalid key: ciphertext dimension {} != key dimension {}",
            self.n(),
            sk.n()
        );
        sub_mod(self.b, inner_product(&self.a, &sk.data, self.q), self.q)
    }

    /// Encrypts the encoded value mu: b = <a, s> + mu + e.
    pub fn encrypt_sk(
        &mut self,
        sk: &LweSecretKey,
        mu: u64,
        noise: &Distribution,
        source_xa: &mut Source,
        source_xe: &mut Source,
    ) {
        debug_assert_eq!(
            self.n(),
            sk.n(),
            "invalid key: ciphertext dimension {} != key dimension {}",
            self.n(),
            sk.n()
        );
        let q: u64 = self.q;
        let mask: u64 = q.next_power_of_two() - 1;
        self.a
            .iter_mut()
            .for_each(|a| *a = source_xa.next_u64n(q, mask));
        let e: u64 = signed_to_mod(noise.sample(source_xe), q);
        self.b = (inner_product(&self.a, &sk.data, q) as u128 + (mu % q) as u128 + e as u128)
            .rem_euclid(q as u128) as u64;
    }

    /// Decodes the phase to Z_p, centered into [-p/2, p/2) when signed.
    pub fn decrypt(&self, sk: &LweSecretKey, p: u64, signed: bool) -> i64 {
        decode(self.phase(sk), p, self.q, signed)
    }

    /// Rescales every coordinate to q_to, rounding to nearest with ties up.
    pub fn mod_switch(&self, q_to: u64) -> LweCiphertext {
        let q_from: u64 = self.q;
        LweCiphertext {
            a: self.a.iter().map(|a| mod_switch(*a, q_from, q_to)).collect(),
            b: mod_switch(self.b, q_from, q_to),
            q: q_to,
        }
    }
}

/// Returns round(m * q / p) mod q for m read mod p.
pub fn encode(m: i64, p: u64, q: u64) -> u64 {
    assert!(p != 0, "invalid plaintext modulus: p = 0");
    mod_switch(m.rem_euclid(p as i64) as u64, p, q)
}

/// Returns round(x * p / q) mod p, centered into [-p/2, p/2) when signed.
pub fn decode(x: u64, p: u64, q: u64, signed: bool) -> i64 {
    assert!(p != 0, "invalid plaintext modulus: p = 0");
    let m: u64 = mod_switch(x, q, p);
    if signed && m >= p.div_ceil(2) {
        m as i64 - p as i64
    } else {
        m as i64
    }
}

fn inner_product(a: &[u64], s: &[i64], q: u64) -> u64 {
    let acc: i128 = izip!(a.iter(), s.iter())
        .map(|(a, s)| *a as i128 * *s as i128)
        .sum();
    acc.rem_euclid(q as i128) as u64
}

fn sub_mod(a: u64, b: u64, q: u64) -> u64 {
    (a + q - b) % q
}

fn signed_to_mod(x: i64, q: u64) -> u64 {
    (x as i128).rem_euclid(q as i128) as u64
}

/// Key switching key from a secret z (dimension n_in) to a secret s (dimension
/// n_out) at modulus q, holding LWE_s(v * base^k * z_i) for v in [1, base).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeySwitchKey {
    base: u64,
    digits: usize,
    q: u64,
    n_in: usize,
    n_out: usize,
    data: Vec<LweCiphertext>,
}

impl KeySwitchKey {
    pub fn new(n_in: usize, n_out: usize, q: u64, base: u64, digits: usize) -> Self {
        assert!(base >= 2, "invalid base: {} < 2", base);
        let len: usize = n_in * digits * (base as usize - 1);
        Self {
            base,
            digits,
            q,
            n_in,
            n_out,
            data: vec![LweCiphertext::new(n_out, q); len],
        }
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn digits(&self) -> usize {
        self.digits
    }

    pub fn q(&self) -> u64 {
        self.q
    }

    pub fn n_in(&self) -> usize {
        self.n_in
    }

    pub fn n_out(&self) -> usize {
        self.n_out
    }

    #[inline(always)]
    fn index(&self, i: usize, k: usize, v: usize) -> usize {
        (i * self.digits + k) * (self.base as usize - 1) + v - 1
    }

    pub fn at(&self, i: usize, k: usize, v: usize) -> &LweCiphertext {
        &self.data[self.index(i, k, v)]
    }

    pub fn generate(
        &mut self,
        sk_in: &LweSecretKey,
        sk_out: &LweSecretKey,
        noise: &Distribution,
        source_xa: &mut Source,
        source_xe: &mut Source,
    ) {
        assert_eq!(
            sk_in.n(),
            self.n_in,
            "invalid sk_in: dimension {} != {}",
            sk_in.n(),
            self.n_in
        );
        assert_eq!(
            sk_out.n(),
            self.n_out,
            "invalid sk_out: dimension {} != {}",
            sk_out.n(),
            self.n_out
        );
        let q: i128 = self.q as i128;
        for (i, z) in sk_in.data.iter().enumerate() {
            let mut power: i128 = 1;
            for k in 0..self.digits {
                for v in 1..self.base as usize {
                    let mu: u64 = (*z as i128 * v as i128 * power).rem_euclid(q) as u64;
                    let idx: usize = self.index(i, k, v);
                    self.data[idx].encrypt_sk(sk_out, mu, noise, source_xa, source_xe);
                }
                power = (power * self.base as i128) % q;
            }
        }
    }

    /// Switches ct from z to s. Adds noise, so ct should come straight out of a bootstrap.
    pub fn key_switch(&self, ct: &LweCiphertext) -> LweCiphertext {
        debug_assert_eq!(ct.q, self.q, "invalid ct: modulus {} != {}", ct.q, self.q);
        debug_assert_eq!(ct.n(), self.n_in, "invalid ct: dimension {} != {}", ct.n(), self.n_in);
        let q: u64 = self.q;
        let mut res: LweCiphertext = LweCiphertext::trivial(self.n_out, q, ct.b);
        for (i, a) in ct.a.iter().enumerate() {
            let mut x: u64 = *a;
            for k in 0..self.digits {
                let v: usize = (x % self.base) as usize;
                x /= self.base;
                if v != 0 {
                    res.sub_inplace(self.at(i, k, v));
                }
            }
        }
        res
    }
}

impl WriterTo for LweSecretKey {
    fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        self.dist.write_to(writer)?;
        writer.write_u64::<LittleEndian>(self.data.len() as u64)?;
        for x in self.data.iter() {
            writer.write_i64::<LittleEndian>(*x)?;
        }
        Ok(())
    }
}

impl ReaderFrom for LweSecretKey {
    fn read_from<R: Read>(&mut self, reader: &mut R) -> std::io::Result<()> {
        self.dist = Distribution::read_from(reader)?;
        let len: usize = reader.read_u64::<LittleEndian>()? as usize;
        if len != self.data.len() {
            return Err(invalid_data(format!(
                "self.data.len()={} != read len={}",
                self.data.len(),
                len
            )));
        }
        reader.read_i64_into::<LittleEndian>(&mut self.data)
    }
}

impl WriterTo for LweCiphertext {
    fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_u64::<LittleEndian>(self.q)?;
        writer.write_u64::<LittleEndian>(self.a.len() as u64)?;
        for x in self.a.iter() {
            writer.write_u64::<LittleEndian>(*x)?;
        }
        writer.write_u64::<LittleEndian>(self.b)
    }
}

impl ReaderFrom for LweCiphertext {
    fn read_from<R: Read>(&mut self, reader: &mut R) -> std::io::Result<()> {
        self.q = reader.read_u64::<LittleEndian>()?;
        let len: usize = reader.read_u64::<LittleEndian>()? as usize;
        if len != self.a.len() {
            return Err(invalid_data(format!(
                "self.a.len()={} != read len={}",
                self.a.len(),
                len
            )));
        }
        reader.read_u64_into::<LittleEndian>(&mut self.a)?;
        self.b = reader.read_u64::<LittleEndian>()?;
        Ok(())
    }
}

impl WriterTo for KeySwitchKey {
    fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_u64::<LittleEndian>(self.base)?;
        writer.write_u64::<LittleEndian>(self.digits as u64)?;
        writer.write_u64::<LittleEndian>(self.q)?;
        writer.write_u64::<LittleEndian>(self.n_in as u64)?;
        writer.write_u64::<LittleEndian>(self.n_out as u64)?;
        for ct in self.data.iter() {
            ct.write_to(writer)?;
        }
        Ok(())
    }
}

impl ReaderFrom for KeySwitchKey {
    fn read_from<R: Read>(&mut self, reader: &mut R) -> std::io::Result<()> {
        let base: u64 = reader.read_u64::<LittleEndian>()?;
        let digits: usize = reader.read_u64::<LittleEndian>()? as usize;
        let q: u64 = reader.read_u64::<LittleEndian>()?;
        let n_in: usize = reader.read_u64::<LittleEndian>()? as usize;
        let n_out: usize = reader.read_u64::<LittleEndian>()? as usize;
        if (base, digits, n_in, n_out) != (self.base, self.digits, self.n_in, self.n_out) {
            return Err(invalid_data(format!(
                "shape (base={}, digits={}, n_in={}, n_out={}) != read ({}, {}, {}, {})",
                self.base, self.digits, self.n_in, self.n_out, base, digits, n_in, n_out
            )));
        }
        self.q = q;
        for ct in self.data.iter_mut() {
            ct.read_from(reader)?;
        }
        Ok(())
    }
}

fn invalid_data(msg: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, msg)
}
