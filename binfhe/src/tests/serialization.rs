use std::fmt::Debug;

use sampling::distributions::Distribution;
use sampling::source::Source;
use utils::serialization::{ReaderFrom, WriterTo};

use crate::context::BinFheContext;
use crate::lwe::{KeySwitchKey, LweCiphertext, LweSecretKey};
use crate::params::{BlindRotationMethod, SecurityLevel};
use crate::tests::Sources;

/// Writes original, reads it back into receiver (same shape, different content)
/// and checks both are equal.
pub fn test_reader_writer_interface<T>(original: &T, mut receiver: T)
where
    T: WriterTo + ReaderFrom + PartialEq + Debug,
{
    assert_ne!(*original, receiver, "receiver should start different from original");

    let mut buffer: Vec<u8> = Vec::new();
    original.write_to(&mut buffer).expect("write_to failed");

    let mut reader: &[u8] = &buffer;
    receiver.read_from(&mut reader).expect("read_from failed");
    assert!(reader.is_empty(), "read_from left {} bytes", reader.len());

    assert_eq!(*original, receiver, "serialization round-trip mismatch");
}

#[test]
fn lwe_secret_key() {
    let mut source: Source = Source::new([0u8; 32]);
    let mut sk: LweSecretKey = LweSecretKey::new(64);
    sk.fill(Distribution::Ternary, &mut source);
    test_reader_writer_interface(&sk, LweSecretKey::new(64));
}

#[test]
fn lwe_ciphertext() {
    let mut sources: Sources = Sources::new(1);
    let ctx: BinFheContext =
        BinFheContext::new(SecurityLevel::Toy, BlindRotationMethod::Ap).unwrap();
    let sk: LweSecretKey = ctx.key_gen(&mut sources.xs);
    let ct: LweCiphertext = ctx.encrypt(&sk, 1, &mut sources.xa, &mut sources.xe).unwrap();
    test_reader_writer_interface(&ct, LweCiphertext::new(ctx.params().n(), 0));

    let mut short: LweCiphertext = LweCiphertext::new(ctx.params().n() - 1, ctx.params().q());
    let mut buffer: Vec<u8> = Vec::new();
    ct.write_to(&mut buffer).unwrap();
    let mut reader: &[u8] = &buffer;
    assert_eq!(
        short.read_from(&mut reader).map_err(|e| e.kind()),
        Err(std::io::ErrorKind::InvalidData)
    );
}

#[test]
fn key_switch_key() {
    let mut sources: Sources = Sources::new(2);
    let n_in: usize = 16;
    let n_out: usize = 8;
    let q: u64 = 1 << 16;

    let mut sk_in: LweSecretKey = LweSecretKey::new(n_in);
    sk_in.fill(Distribution::Ternary, &mut sources.xs);
    let mut sk_out: LweSecretKey = LweSecretKey::new(n_out);
    sk_out.fill(Distribution::Ternary, &mut sources.xs);

    let mut ksk: KeySwitchKey = KeySwitchKey::new(n_in, n_out, q, 16, 4);
    ksk.generate(
        &sk_in,
        &sk_out,
        &Distribution::Gaussian(3.19, 19.14),
        &mut sources.xa,
        &mut sources.xe,
    );
    test_reader_writer_interface(&ksk, KeySwitchKey::new(n_in, n_out, q, 16, 4));

    let mut other: KeySwitchKey = KeySwitchKey::new(n_in, n_out, q, 8, 6);
    let mut buffer: Vec<u8> = Vec::new();
    ksk.write_to(&mut buffer).unwrap();
    let mut reader: &[u8] = &buffer;
    assert_eq!(
        other.read_from(&mut reader).map_err(|e| e.kind()),
        Err(std::io::ErrorKind::InvalidData)
    );
}
