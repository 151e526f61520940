use binfhe::context::BinFheContext;
use binfhe::gates::BinGate;
use binfhe::lwe::{LweCiphertext, LweSecretKey};
use binfhe::params::{BlindRotationMethod, SecurityLevel};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sampling::source::Source;

fn setup(
    level: SecurityLevel,
    method: BlindRotationMethod,
) -> (BinFheContext, LweCiphertext, LweCiphertext) {
    let mut source_xs: Source = Source::new([0u8; 32]);
    let mut source_xa: Source = Source::new([1u8; 32]);
    let mut source_xe: Source = Source::new([2u8; 32]);

    let mut ctx: BinFheContext = BinFheContext::new(level, method).unwrap();
    let sk: LweSecretKey = ctx.key_gen(&mut source_xs);
    ctx.bt_key_gen(&sk, &mut source_xs, &mut source_xa, &mut source_xe);
    let ct_a: LweCiphertext = ctx.encrypt(&sk, 1, &mut source_xa, &mut source_xe).unwrap();
    let ct_b: LweCiphertext = ctx.encrypt(&sk, 0, &mut source_xa, &mut source_xe).unwrap();
    (ctx, ct_a, ct_b)
}

fn eval_bin_gate(c: &mut Criterion) {
    let mut b: criterion::BenchmarkGroup<'_, criterion::measurement::WallTime> =
        c.benchmark_group("eval_bin_gate");
    b.sample_size(10);

    // Method-A keys at STD128 hold tens of thousands of RGSW ciphertexts, so it is only
    // measured at TOY.
    let configs: [(SecurityLevel, BlindRotationMethod); 5] = [
        (SecurityLevel::Toy, BlindRotationMethod::Ap),
        (SecurityLevel::Toy, BlindRotationMethod::Ginx),
        (SecurityLevel::Toy, BlindRotationMethod::Lmkcdey),
        (SecurityLevel::Std128, BlindRotationMethod::Ginx),
        (SecurityLevel::Std128Lmkcdey, BlindRotationMethod::Lmkcdey),
    ];

    for (level, method) in configs {
        let (ctx, ct_a, ct_b) = setup(level, method);
        for gate in [BinGate::And, BinGate::XorFast] {
            let id: BenchmarkId = BenchmarkId::new(format!("{}/{}", level, method), gate);
            b.bench_with_input(id, &(), |b: &mut criterion::Bencher<'_>, _| {
                b.iter(|| ctx.eval_bin_gate(gate, &ct_a, &ct_b))
            });
        }
    }
}

fn bt_key_gen(c: &mut Criterion) {
    let mut b: criterion::BenchmarkGroup<'_, criterion::measurement::WallTime> =
        c.benchmark_group("bt_key_gen");
    b.sample_size(10);

    for method in [
        BlindRotationMethod::Ap,
        BlindRotationMethod::Ginx,
        BlindRotationMethod::Lmkcdey,
    ] {
        let mut ctx: BinFheContext = BinFheContext::new(SecurityLevel::Toy, method).unwrap();
        let mut source_xs: Source = Source::new([0u8; 32]);
        let mut source_xa: Source = Source::new([1u8; 32]);
        let mut source_xe: Source = Source::new([2u8; 32]);
        let sk: LweSecretKey = ctx.key_gen(&mut source_xs);
        let id: BenchmarkId = BenchmarkId::new(SecurityLevel::Toy.to_string(), method);
        b.bench_with_input(id, &(), |b: &mut criterion::Bencher<'_>, _| {
            b.iter(|| ctx.bt_key_gen(&sk, &mut source_xs, &mut source_xa, &mut source_xe))
        });
    }
}

criterion_group!(benches, eval_bin_gate, bt_key_gen);
criterion_main!(benches);
