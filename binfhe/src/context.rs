use math::poly::Poly;
use math::ring::Ring;
use sampling::source::Source;
use tracing::{debug, info, trace};

use crate::blind_rotation::{BlindRotationKey, amplitude, sample_extract, test_vector};
use crate::gates::BinGate;
use crate::lwe::{KeySwitchKey, LweCiphertext, LweSecretKey, encode};
use crate::params::{BinFheParams, BlindRotationMethod, SecurityLevel};
use crate::rgsw::{Gadget, RlweCiphertext};
use crate::{Error, ParametersError, Result};

/// Noise level of a new encryption.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EncryptOutput {
    /// Encryption noise only.
    #[default]
    Fresh,
    /// Refreshed by a bootstrap, so that the noise matches a gate output.
    Bootstrapped,
}

/// Key material consumed read-only by every bootstrap.
pub struct BootstrappingKey {
    pub brk: BlindRotationKey,
    /// Switches extracted ciphertexts from the ring secret back to the LWE secret.
    pub ksk: KeySwitchKey,
}

/// Binary FHE context: one parameter set and one blind rotation method.
pub struct BinFheContext {
    params: BinFheParams,
    method: BlindRotationMethod,
    ring: Ring<u64>,
    gadget: Gadget,
    bt_key: Option<BootstrappingKey>,
}

impl BinFheContext {
    /// Creates a context for a registered security level.
    pub fn new(level: SecurityLevel, method: BlindRotationMethod) -> Result<Self> {
        Self::from_params(BinFheParams::from_level(level)?, method)
    }

    /// Creates a context for a custom parameter set.
    pub fn from_params(params: BinFheParams, method: BlindRotationMethod) -> Result<Self> {
        params.validate()?;
        params.validate_method(method)?;
        let ring: Ring<u64> = Ring::new(params.big_n(), params.big_q());
        let gadget: Gadget = Gadget::new(params.log_base_g(), params.d_g());
        info!(
            params = params.name(),
            method = %method,
            n = params.n(),
            big_n = params.big_n(),
            q = params.q(),
            big_q = params.big_q(),
            "binfhe context created"
        );
        Ok(Self {
            params,
            method,
            ring,
            gadget,
            bt_key: None,
        })
    }

    pub fn params(&self) -> &BinFheParams {
        &self.params
    }

    pub fn method(&self) -> BlindRotationMethod {
        self.method
    }

    pub fn ring(&self) -> &Ring<u64> {
        &self.ring
    }

    pub fn bt_key(&self) -> Option<&BootstrappingKey> {
        self.bt_key.as_ref()
    }

    /// Samples a secret key of the LWE dimension n.
    pub fn key_gen(&self, source_xs: &mut Source) -> LweSecretKey {
        let mut sk: LweSecretKey = LweSecretKey::new(self.params.n());
        sk.fill(self.params.key_dist(), source_xs);
        sk
    }

    /// Samples a secret key of the ring dimension N.
    pub fn key_gen_n(&self, source_xs: &mut Source) -> LweSecretKey {
        let mut sk: LweSecretKey = LweSecretKey::new(self.params.big_n());
        sk.fill(self.params.key_dist(), source_xs);
        sk
    }

    /// Generates the bootstrapping key of sk: a fresh ring secret z, the blind
    /// rotation key of sk under z and the key switching key from z to sk.
    pub fn bt_key_gen(
        &mut self,
        sk: &LweSecretKey,
        source_xs: &mut Source,
        source_xa: &mut Source,
        source_xe: &mut Source,
    ) {
        assert_eq!(
            sk.n(),
            self.params.n(),
            "invalid sk: dimension {} != n={}",
            sk.n(),
            self.params.n()
        );
        let sk_n: LweSecretKey = self.key_gen_n(source_xs);
        let brk: BlindRotationKey = BlindRotationKey::generate(
            self.method,
            &self.params,
            &self.ring,
            &self.gadget,
            sk,
            &sk_n,
            source_xa,
            source_xe,
        );
        let ksk: KeySwitchKey = self.key_switch_gen(&sk_n, sk, source_xa, source_xe);
        debug!(
            method = %self.method,
            brk_size = brk.size(),
            ksk_digits = ksk.digits(),
            ksk_base = ksk.base(),
            "bootstrapping key generated"
        );
        self.bt_key = Some(BootstrappingKey { brk, ksk });
    }

    /// Generates the key switching key from sk_in to sk_out at the key switching modulus.
    pub fn key_switch_gen(
        &self,
        sk_in: &LweSecretKey,
        sk_out: &LweSecretKey,
        source_xa: &mut Source,
        source_xe: &mut Source,
    ) -> KeySwitchKey {
        let mut ksk: KeySwitchKey = KeySwitchKey::new(
            sk_in.n(),
            sk_out.n(),
            self.params.q_ks(),
            self.params.base_ks(),
            self.params.d_ks(),
        );
        ksk.generate(sk_in, sk_out, &self.params.noise(), source_xa, source_xe);
        ksk
    }

    /// Switches ct to the output key of ksk, first rescaling it to the modulus of ksk.
    pub fn key_switch(&self, ksk: &KeySwitchKey, ct: &LweCiphertext) -> LweCiphertext {
        if ct.q() != ksk.q() {
            ksk.key_switch(&ct.mod_switch(ksk.q()))
        } else {
            ksk.key_switch(ct)
        }
    }

    pub fn mod_switch(&self, q_to: u64, ct: &LweCiphertext) -> LweCiphertext {
        ct.mod_switch(q_to)
    }

    /// Encrypts the bit m at modulus q.
    pub fn encrypt(
        &self,
        sk: &LweSecretKey,
        m: i64,
        source_xa: &mut Source,
        source_xe: &mut Source,
    ) -> Result<LweCiphertext> {
        self.encrypt_with(
            sk,
            m,
            EncryptOutput::Fresh,
            4,
            self.params.q(),
            source_xa,
            source_xe,
        )
    }

    /// Encrypts m read mod p at the given modulus. A bootstrapped output requires
    /// p = 4, modulus = q and the bootstrapping key.
    #[allow(clippy::too_many_arguments)]
    pub fn encrypt_with(
        &self,
        sk: &LweSecretKey,
        m: i64,
        output: EncryptOutput,
        p: u64,
        modulus: u64,
        source_xa: &mut Source,
        source_xe: &mut Source,
    ) -> Result<LweCiphertext> {
        if modulus < 2 {
            return Err(ParametersError::InvalidModulus(format!("modulus={} < 2", modulus)).into());
        }
        if p < 2 || p > modulus {
            return Err(ParametersError::InvalidModulus(format!(
                "plaintext modulus p={} is not in [2, {}]",
                p, modulus
            ))
            .into());
        }

        let mut ct: LweCiphertext = LweCiphertext::new(sk.n(), modulus);
        ct.encrypt_sk(
            sk,
            encode(m, p, modulus),
            &self.params.noise(),
            source_xa,
            source_xe,
        );

        match output {
            EncryptOutput::Fresh => Ok(ct),
            EncryptOutput::Bootstrapped => {
                if p != 4 || modulus != self.params.q() {
                    return Err(ParametersError::InvalidModulus(format!(
                        "bootstrapped encryption requires p=4 and modulus=q={}, \
                         got p={} modulus={}",
                        self.params.q(),
                        p,
                        modulus
                    ))
                    .into());
                }
                self.bootstrap(&ct)
            }
        }
    }

    /// Decrypts a bit (plaintext modulus 4).
    pub fn decrypt(&self, sk: &LweSecretKey, ct: &LweCiphertext) -> i64 {
        self.decrypt_with(sk, ct, 4)
    }

    /// Decrypts with plaintext modulus p, centered into [-p/2, p/2) in signed mode.
    pub fn decrypt_with(&self, sk: &LweSecretKey, ct: &LweCiphertext, p: u64) -> i64 {
        ct.decrypt(sk, p, self.params.signed_mode())
    }

    /// Noiseless encryption of a constant bit.
    pub fn eval_constant(&self, bit: bool) -> LweCiphertext {
        let q: u64 = self.params.q();
        LweCiphertext::trivial(self.params.n(), q, encode(bit as i64, 4, q))
    }

    /// NOT: q/4 - ct, no bootstrap.
    pub fn eval_not(&self, ct: &LweCiphertext) -> LweCiphertext {
        let mut res: LweCiphertext = ct.clone();
        res.neg_inplace();
        res.add_constant_inplace(ct.q() >> 2);
        res
    }

    /// Evaluates a two-input gate on independent ciphertexts at modulus q.
    pub fn eval_bin_gate(
        &self,
        gate: BinGate,
        ct_a: &LweCiphertext,
        ct_b: &LweCiphertext,
    ) -> Result<LweCiphertext> {
        if std::ptr::eq(ct_a, ct_b) {
            return Err(Error::IdenticalInputs);
        }
        let key: &BootstrappingKey = self.bt_key.as_ref().ok_or(Error::MissingBootstrappingKey)?;
        debug_assert_eq!(ct_a.q(), self.params.q(), "invalid ct_a: modulus {} != q", ct_a.q());
        debug_assert_eq!(ct_b.q(), self.params.q(), "invalid ct_b: modulus {} != q", ct_b.q());
        Ok(self.eval_bin_gate_with_key(key, gate, ct_a, ct_b))
    }

    fn eval_bin_gate_with_key(
        &self,
        key: &BootstrappingKey,
        gate: BinGate,
        ct_a: &LweCiphertext,
        ct_b: &LweCiphertext,
    ) -> LweCiphertext {
        match gate {
            BinGate::Xor => {
                let or: LweCiphertext = self.eval_bin_gate_with_key(key, BinGate::Or, ct_a, ct_b);
                let nand: LweCiphertext =
                    self.eval_bin_gate_with_key(key, BinGate::Nand, ct_a, ct_b);
                self.eval_bin_gate_with_key(key, BinGate::And, &or, &nand)
            }
            BinGate::Xnor => {
                let xor: LweCiphertext =
                    self.eval_bin_gate_with_key(key, BinGate::Xor, ct_a, ct_b);
                self.eval_not(&xor)
            }
            _ => {
                let combined: LweCiphertext = gate.combine(ct_a, ct_b);
                self.bootstrap_with_key(key, &combined, gate.window_start(self.params.q()))
            }
        }
    }

    /// Refreshes the noise of a bit ciphertext at modulus q.
    pub fn bootstrap(&self, ct: &LweCiphertext) -> Result<LweCiphertext> {
        let key: &BootstrappingKey = self.bt_key.as_ref().ok_or(Error::MissingBootstrappingKey)?;
        debug_assert_eq!(ct.q(), self.params.q(), "invalid ct: modulus {} != q", ct.q());
        let q: u64 = self.params.q();
        let mut shifted: LweCiphertext = ct.clone();
        shifted.add_constant_inplace(q >> 2);
        Ok(self.bootstrap_with_key(key, &shifted, BinGate::And.window_start(q)))
    }

    /// Blind rotation of the test vector of window_start, extraction, key switch and
    /// mod switch back to q.
    fn bootstrap_with_key(
        &self,
        key: &BootstrappingKey,
        ct: &LweCiphertext,
        window_start: u64,
    ) -> LweCiphertext {
        trace!(method = %self.method, window_start, "bootstrap");
        let tv: Poly<u64> = test_vector(&self.params, &self.ring, ct.b, window_start);
        let acc: RlweCiphertext = key
            .brk
            .blind_rotate(&self.params, &self.ring, &self.gadget, &tv, &ct.a);

        let mut extracted: LweCiphertext = sample_extract(&self.ring, &acc);
        extracted.add_constant_inplace(amplitude(self.ring.q()));

        self.key_switch(&key.ksk, &extracted).mod_switch(self.params.q())
    }
}
