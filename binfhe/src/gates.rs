use std::fmt::Display;
use std::str::FromStr;

use crate::lwe::LweCiphertext;
use crate::{Error, Result};

/// Two-input Boolean gates evaluated with a bootstrap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinGate {
    Or,
    And,
    Nor,
    Nand,
    /// AND(OR(a, b), NAND(a, b)), three bootstraps.
    Xor,
    /// NOT(XOR(a, b)).
    Xnor,
    /// Single bootstrap on 2 * (a - b).
    XorFast,
    /// Single bootstrap on 2 * (a - b).
    XnorFast,
}

impl BinGate {
    pub const ALL: [BinGate; 8] = [
        BinGate::Or,
        BinGate::And,
        BinGate::Nor,
        BinGate::Nand,
        BinGate::Xor,
        BinGate::Xnor,
        BinGate::XorFast,
        BinGate::XnorFast,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BinGate::Or => "OR",
            BinGate::And => "AND",
            BinGate::Nor => "NOR",
            BinGate::Nand => "NAND",
            BinGate::Xor => "XOR",
            BinGate::Xnor => "XNOR",
            BinGate::XorFast => "XOR_FAST",
            BinGate::XnorFast => "XNOR_FAST",
        }
    }

    /// Plaintext truth table.
    pub fn evaluate(&self, a: bool, b: bool) -> bool {
        match self {
            BinGate::Or => a | b,
            BinGate::And => a & b,
            BinGate::Nor => !(a | b),
            BinGate::Nand => !(a & b),
            BinGate::Xor | BinGate::XorFast => a ^ b,
            BinGate::Xnor | BinGate::XnorFast => !(a ^ b),
        }
    }

    /// Whether the gate is evaluated by a single bootstrap of a linear combination.
    pub fn is_single_bootstrap(&self) -> bool {
        !matches!(self, BinGate::Xor | BinGate::Xnor)
    }

    /// Start, mod q, of the half-width window of combined phases that map to 0.
    ///
    /// Panics on [BinGate::Xor] and [BinGate::Xnor], which are composed of other gates.
    pub fn window_start(&self, q: u64) -> u64 {
        match self {
            BinGate::Or | BinGate::XorFast => 5 * q / 8,
            BinGate::And => 7 * q / 8,
            BinGate::Nor | BinGate::XnorFast => q / 8,
            BinGate::Nand => 3 * q / 8,
            BinGate::Xor | BinGate::Xnor => panic!("invalid gate: {} has no single window", self),
        }
    }

    /// Linear pre-combination of the operands: ct_a + ct_b, or 2 * (ct_a - ct_b) for
    /// the fast XOR/XNOR.
    pub fn combine(&self, ct_a: &LweCiphertext, ct_b: &LweCiphertext) -> LweCiphertext {
        let mut res: LweCiphertext = ct_a.clone();
        match self {
            BinGate::XorFast | BinGate::XnorFast => {
                res.sub_inplace(ct_b);
                res.double_inplace();
            }
            _ => res.add_inplace(ct_b),
        }
        res
    }
}

impl Display for BinGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for BinGate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        BinGate::ALL
            .iter()
            .find(|gate| gate.name() == s)
            .copied()
            .ok_or_else(|| Error::UnknownGate(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lwe::encode;

    #[test]
    fn names() {
        for gate in BinGate::ALL {
            assert_eq!(gate.to_string().parse::<BinGate>(), Ok(gate));
        }
        assert_eq!("XOR_FAST".parse::<BinGate>(), Ok(BinGate::XorFast));
        assert_eq!("xor".parse::<BinGate>(), Err(Error::UnknownGate("xor".to_string())));
    }

    #[test]
    fn truth_tables() {
        // Rows (1, 1), (0, 1), (1, 0), (0, 0).
        let rows: [(bool, bool); 4] = [(true, true), (false, true), (true, false), (false, false)];
        let tables: [(BinGate, [bool; 4]); 6] = [
            (BinGate::And, [true, false, false, false]),
            (BinGate::Nand, [false, true, true, true]),
            (BinGate::Or, [true, true, true, false]),
            (BinGate::Nor, [false, false, false, true]),
            (BinGate::Xor, [false, true, true, false]),
            (BinGate::Xnor, [true, false, false, true]),
        ];
        for (gate, table) in tables {
            for ((a, b), want) in rows.iter().zip(table.iter()) {
                assert_eq!(gate.evaluate(*a, *b), *want, "{}({}, {})", gate, a, b);
            }
        }
    }

    #[test]
    fn windows_separate_combined_phases() {
        let q: u64 = 1024;
        let in_window = |gate: BinGate, x: u64| (x + q - gate.window_start(q)) % q < q / 2;
        for gate in BinGate::ALL.into_iter().filter(|g| g.is_single_bootstrap()) {
            for a in [false, true] {
                for b in [false, true] {
                    let ct_a: LweCiphertext = LweCiphertext::trivial(4, q, encode(a as i64, 4, q));
                    let ct_b: LweCiphertext = LweCiphertext::trivial(4, q, encode(b as i64, 4, q));
                    let combined: LweCiphertext = gate.combine(&ct_a, &ct_b);
                    assert_eq!(
                        !in_window(gate, combined.b),
                        gate.evaluate(a, b),
                        "{}({}, {})",
                        gate,
                        a,
                        b
                    );
                }
            }
        }
    }
}
