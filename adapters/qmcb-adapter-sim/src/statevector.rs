//! Statevector simulation engine.

use num_complex::Complex64;
use rand::Rng;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use qmcb_ir::{GateSymbol, Operation};

/// A statevector over `n` qubits.
///
/// Amplitude index bit `k` is the value of qubit `k` (little-endian).
/// Reordering into a caller's qubit order happens in the backend.
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Apply a bound gate.
    ///
    /// Operands must already match the gate arity and lie in range.
    pub fn apply(&mut self, op: &Operation) {
        let q: Vec<usize> = op.qubits.iter().map(|q| q.index()).collect();
        match op.gate {
            GateSymbol::X => self.apply_x(q[0]),
            GateSymbol::H => self.apply_h(q[0]),
            GateSymbol::S => self.apply_phase(q[0], FRAC_PI_2),
            GateSymbol::T => self.apply_phase(q[0], FRAC_PI_4),
            GateSymbol::Rx => self.apply_rx(q[0], FRAC_PI_2),
            GateSymbol::Ry => self.apply_ry(q[0], FRAC_PI_2),
            GateSymbol::U => self.apply_u(q[0], FRAC_PI_2, 0.0, PI),
            GateSymbol::Cnot => self.apply_cx(q[0], q[1]),
            GateSymbol::Cz => self.apply_cz(q[0], q[1]),
            GateSymbol::Swap => self.apply_swap(q[0], q[1]),
        }
    }

    // =========================================================================
    // Single-qubit gate implementations
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_phase(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase = Complex64::from_polar(1.0, theta);
        for i in 0..(1 << self.num_qubits) {
            if i & mask != 0 {
                self.amplitudes[i] *= phase;
            }
        }
    }

    fn apply_rx(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        let neg_i_s = Complex64::new(0.0, -s);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a + neg_i_s * b;
                self.amplitudes[j] = neg_i_s * a + c * b;
            }
        }
    }

    fn apply_ry(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a - s * b;
                self.amplitudes[j] = s * a + c * b;
            }
        }
    }

    fn apply_u(&mut self, qubit: usize, theta: f64, phi: f64, lambda: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        let e_il = Complex64::from_polar(1.0, lambda);
        let e_ip = Complex64::from_polar(1.0, phi);
        let e_ipl = Complex64::from_polar(1.0, phi + lambda);

        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a - e_il * s * b;
                self.amplitudes[j] = e_ip * s * a + e_ipl * c * b;
            }
        }
    }

    // =========================================================================
    // Two-qubit gate implementations
    // =========================================================================

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_cz(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask != 0) {
                self.amplitudes[i] = -self.amplitudes[i];
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..(1 << self.num_qubits) {
            let b1 = (i & mask1) != 0;
            let b2 = (i & mask2) != 0;
            if b1 && !b2 {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    /// Amplitudes reordered so that `order[0]` is the most significant bit.
    ///
    /// `order` must be a permutation of `0..num_qubits`.
    pub fn reordered(&self, order: &[usize]) -> Vec<Complex64> {
        let n = order.len();
        (0..1usize << n)
            .map(|big_endian| {
                let little_endian = order.iter().enumerate().fold(0usize, |acc, (pos, &q)| {
                    acc | (((big_endian >> (n - 1 - pos)) & 1) << q)
                });
                self.amplitudes[little_endian]
            })
            .collect()
    }

    /// Sample a basis index according to the Born rule.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let r: f64 = rng.r#gen();

        let mut cumulative = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            cumulative += amp.norm_sqr();
            if r < cumulative {
                return i;
            }
        }

        // Rounding can leave the cumulative sum a hair below one; fall back to
        // the last index that carries any probability.
        self.amplitudes
            .iter()
            .rposition(|a| a.norm_sqr() > 0.0)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qmcb_ir::QubitId;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    fn op(gate: GateSymbol, qubits: &[u32]) -> Operation {
        Operation {
            gate,
            qubits: qubits.iter().copied().map(QubitId).collect(),
        }
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn test_hadamard() {
        let mut sv = Statevector::new(1);
        sv.apply(&op(GateSymbol::H, &[0]));

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_u_matches_hadamard() {
        let mut via_u = Statevector::new(1);
        via_u.apply(&op(GateSymbol::X, &[0]));
        via_u.apply(&op(GateSymbol::U, &[0]));

        let mut via_h = Statevector::new(1);
        via_h.apply(&op(GateSymbol::X, &[0]));
        via_h.apply(&op(GateSymbol::H, &[0]));

        for (a, b) in via_u.amplitudes.iter().zip(&via_h.amplitudes) {
            assert!(approx_eq(*a, *b));
        }
    }

    #[test]
    fn test_bell_state() {
        let mut sv = Statevector::new(2);
        sv.apply(&op(GateSymbol::H, &[0]));
        sv.apply(&op(GateSymbol::Cnot, &[0, 1]));

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_cz_phase() {
        let mut sv = Statevector::new(2);
        sv.apply(&op(GateSymbol::X, &[0]));
        sv.apply(&op(GateSymbol::X, &[1]));
        sv.apply(&op(GateSymbol::Cz, &[0, 1]));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(-1.0, 0.0)));
    }

    #[test]
    fn test_reordered_puts_first_qubit_first() {
        // |q0=1, q1=0⟩ is little-endian index 1
        let mut sv = Statevector::new(2);
        sv.apply(&op(GateSymbol::X, &[0]));

        let big_endian = sv.reordered(&[0, 1]);
        assert!(approx_eq(big_endian[2], Complex64::new(1.0, 0.0)));

        let swapped = sv.reordered(&[1, 0]);
        assert!(approx_eq(swapped[1], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_sample_deterministic() {
        // |1⟩ state should always sample to 1
        let mut sv = Statevector::new(1);
        sv.apply(&op(GateSymbol::X, &[0]));

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(sv.sample(&mut rng), 1);
        }
    }
}
