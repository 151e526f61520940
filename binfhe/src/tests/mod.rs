mod lwe;
mod serialization;

use sampling::source::Source;

use crate::context::BinFheContext;
use crate::lwe::LweSecretKey;
use crate::params::{BlindRotationMethod, SecurityLevel};

pub(crate) const METHODS: [BlindRotationMethod; 3] = [
    BlindRotationMethod::Ap,
    BlindRotationMethod::Ginx,
    BlindRotationMethod::Lmkcdey,
];

/// Seeded sources for secrets, masks and errors.
pub(crate) struct Sources {
    pub xs: Source,
    pub xa: Source,
    pub xe: Source,
}

impl Sources {
    pub(crate) fn new(seed: u8) -> Self {
        Self {
            xs: Source::new([seed; 32]),
            xa: Source::new([seed.wrapping_add(1); 32]),
            xe: Source::new([seed.wrapping_add(2); 32]),
        }
    }
}

/// Context of level and method with a secret key and its bootstrapping key.
pub(crate) fn setup(
    level: SecurityLevel,
    method: BlindRotationMethod,
    sources: &mut Sources,
) -> (BinFheContext, LweSecretKey) {
    let mut ctx: BinFheContext = BinFheContext::new(level, method).unwrap();
    let sk: LweSecretKey = ctx.key_gen(&mut sources.xs);
    ctx.bt_key_gen(&sk, &mut sources.xs, &mut sources.xa, &mut sources.xe);
    (ctx, sk)
}

pub(crate) fn sub_test<F: FnOnce()>(name: &str, f: F) {
    println!("Running {}", name);
    f();
}
