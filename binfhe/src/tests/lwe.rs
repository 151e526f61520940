use crate::context::{BinFheContext, EncryptOutput};
use crate::lwe::{KeySwitchKey, LweCiphertext, LweSecretKey};
use crate::params::{BlindRotationMethod, SecurityLevel};
use crate::tests::{METHODS, Sources, sub_test};

#[test]
fn switching() {
    for method in METHODS {
        let mut sources: Sources = Sources::new(32);
        let ctx: BinFheContext = BinFheContext::new(SecurityLevel::Toy, method).unwrap();
        sub_test("test_key_switch", || test_key_switch(&ctx, &mut sources));
        sub_test("test_mod_switch", || test_mod_switch(&ctx, &mut sources));
    }
}

fn test_key_switch(ctx: &BinFheContext, sources: &mut Sources) {
    let sk: LweSecretKey = ctx.key_gen(&mut sources.xs);
    let sk_n: LweSecretKey = ctx.key_gen_n(&mut sources.xs);
    let ksk: KeySwitchKey = ctx.key_switch_gen(&sk_n, &sk, &mut sources.xa, &mut sources.xe);
    assert_eq!(ksk.n_in(), ctx.params().big_n());
    assert_eq!(ksk.n_out(), ctx.params().n());
    assert_eq!(ksk.q(), ctx.params().q_ks());

    let big_q: u64 = ctx.params().big_q();
    for m in [1i64, 0] {
        let ct: LweCiphertext = ctx
            .encrypt_with(
                &sk_n,
                m,
                EncryptOutput::Fresh,
                4,
                big_q,
                &mut sources.xa,
                &mut sources.xe,
            )
            .unwrap();
        let switched: LweCiphertext = ctx.key_switch(&ksk, &ct);
        assert_eq!(switched.n(), ctx.params().n());
        assert_eq!(ctx.decrypt(&sk, &switched), m, "method={} m={}", ctx.method(), m);
    }
}

fn test_mod_switch(ctx: &BinFheContext, sources: &mut Sources) {
    let sk: LweSecretKey = ctx.key_gen(&mut sources.xs);
    let big_q: u64 = ctx.params().big_q();
    let q: u64 = ctx.params().q();
    for m in [1i64, 0] {
        let ct: LweCiphertext = ctx
            .encrypt_with(
                &sk,
                m,
                EncryptOutput::Fresh,
                4,
                big_q,
                &mut sources.xa,
                &mut sources.xe,
            )
            .unwrap();
        let switched: LweCiphertext = ctx.mod_switch(q, &ct);
        assert_eq!(switched.q(), q);
        assert_eq!(ctx.decrypt(&sk, &switched), m, "method={} m={}", ctx.method(), m);
    }
}

#[test]
fn signed_plaintexts() {
    let mut sources: Sources = Sources::new(40);
    let ctx: BinFheContext =
        BinFheContext::new(SecurityLevel::SignedModTest, BlindRotationMethod::Ap).unwrap();
    let sk: LweSecretKey = ctx.key_gen(&mut sources.xs);
    let q: u64 = ctx.params().q();
    for m in -4i64..4 {
        let ct: LweCiphertext = ctx
            .encrypt_with(
                &sk,
                m,
                EncryptOutput::Fresh,
                8,
                q,
                &mut sources.xa,
                &mut sources.xe,
            )
            .unwrap();
        assert_eq!(ctx.decrypt_with(&sk, &ct, 8), m);
    }

    // Without signed mode the same ciphertext decodes to m mod p.
    let unsigned: BinFheContext =
        BinFheContext::new(SecurityLevel::Toy, BlindRotationMethod::Ap).unwrap();
    let ct: LweCiphertext = unsigned
        .encrypt_with(
            &sk,
            -3,
            EncryptOutput::Fresh,
            8,
            q,
            &mut sources.xa,
            &mut sources.xe,
        )
        .unwrap();
    assert_eq!(unsigned.decrypt_with(&sk, &ct, 8), 5);
    assert_eq!(ctx.decrypt_with(&sk, &ct, 8), -3);
}

#[test]
fn determinism() {
    let ctx: BinFheContext =
        BinFheContext::new(SecurityLevel::Toy, BlindRotationMethod::Ginx).unwrap();

    let mut sources_0: Sources = Sources::new(48);
    let mut sources_1: Sources = Sources::new(48);
    let sk_0: LweSecretKey = ctx.key_gen(&mut sources_0.xs);
    let sk_1: LweSecretKey = ctx.key_gen(&mut sources_1.xs);
    assert_eq!(sk_0, sk_1);

    let ct_0: LweCiphertext = ctx.encrypt(&sk_0, 1, &mut sources_0.xa, &mut sources_0.xe).unwrap();
    let ct_1: LweCiphertext = ctx.encrypt(&sk_1, 1, &mut sources_1.xa, &mut sources_1.xe).unwrap();
    assert_eq!(ct_0, ct_1);
    assert_eq!(ctx.decrypt(&sk_0, &ct_0), ctx.decrypt(&sk_0, &ct_0));

    let ct_2: LweCiphertext = ctx.encrypt(&sk_0, 1, &mut sources_0.xa, &mut sources_0.xe).unwrap();
    assert_ne!(ct_0, ct_2);
    assert_eq!(ctx.decrypt(&sk_0, &ct_2), 1);
}

#[test]
fn invalid_encryption_moduli() {
    let mut sources: Sources = Sources::new(56);
    let ctx: BinFheContext =
        BinFheContext::new(SecurityLevel::Toy, BlindRotationMethod::Ap).unwrap();
    let sk: LweSecretKey = ctx.key_gen(&mut sources.xs);
    assert!(
        ctx.encrypt_with(
            &sk,
            1,
            EncryptOutput::Fresh,
            4,
            0,
            &mut sources.xa,
            &mut sources.xe,
        )
        .is_err()
    );
    assert!(
        ctx.encrypt_with(
            &sk,
            1,
            EncryptOutput::Fresh,
            0,
            1024,
            &mut sources.xa,
            &mut sources.xe,
        )
        .is_err()
    );
}
