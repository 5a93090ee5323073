//! What a backend hands back: final statevectors and measurement records.

use num_complex::Complex64;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{HalError, HalResult};

/// Final state of a deterministic evolution.
///
/// Amplitude `i` belongs to the basis ket whose digits, read left to right,
/// are the qubits of the requested qubit order. The first qubit of that
/// order is therefore the most significant bit of `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    num_qubits: usize,
    amplitudes: Vec<Complex64>,
}

impl StateVector {
    /// Wrap amplitudes, checking the length is a power of two.
    pub fn new(amplitudes: Vec<Complex64>) -> HalResult<Self> {
        let len = amplitudes.len();
        if len == 0 || !len.is_power_of_two() {
            return Err(HalError::MalformedResult(format!(
                "statevector length {len} is not a power of two"
            )));
        }
        Ok(Self {
            num_qubits: len.trailing_zeros() as usize,
            amplitudes,
        })
    }

    /// The basis state `index` with amplitude 1.
    pub fn basis(num_qubits: usize, index: usize) -> HalResult<Self> {
        let dim = 1usize << num_qubits;
        if index >= dim {
            return Err(HalError::MalformedResult(format!(
                "basis index {index} out of range for {num_qubits} qubits"
            )));
        }
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); dim];
        amplitudes[index] = Complex64::new(1.0, 0.0);
        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Amplitudes in basis order.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Amplitude of one basis ket.
    pub fn amplitude(&self, index: usize) -> Option<Complex64> {
        self.amplitudes.get(index).copied()
    }

    /// Squared norm of the whole vector.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// Whether the squared norm is within `tolerance` of one.
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.norm_sqr() - 1.0).abs() <= tolerance
    }
}

/// Measurement record of a sampled run: per key, one bit per shot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementOutcome {
    shots: u32,
    records: FxHashMap<String, Vec<u8>>,
}

impl MeasurementOutcome {
    /// Empty record for `shots` shots.
    pub fn new(shots: u32) -> Self {
        Self {
            shots,
            records: FxHashMap::default(),
        }
    }

    /// Number of shots taken.
    pub fn shots(&self) -> u32 {
        self.shots
    }

    /// Record the bits measured under `key`, one per shot.
    pub fn insert(&mut self, key: impl Into<String>, bits: Vec<u8>) {
        self.records.insert(key.into(), bits);
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, bits: Vec<u8>) -> Self {
        self.insert(key, bits);
        self
    }

    /// Bits recorded under `key`.
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.records.get(key).map(Vec::as_slice)
    }

    /// Bit measured under `key` in `shot`.
    pub fn bit(&self, key: &str, shot: usize) -> Option<u8> {
        self.get(key).and_then(|bits| bits.get(shot).copied())
    }

    /// Concatenate the bits of `keys` for one shot, e.g. `"01"`.
    ///
    /// A missing key or shot, or a value other than 0/1, is a
    /// [`HalError::MalformedResult`].
    pub fn bitstring<S: AsRef<str>>(&self, keys: &[S], shot: usize) -> HalResult<String> {
        keys.iter()
            .map(|key| {
                let key = key.as_ref();
                match self.bit(key, shot) {
                    Some(0) => Ok('0'),
                    Some(1) => Ok('1'),
                    Some(other) => Err(HalError::MalformedResult(format!(
                        "measurement '{key}' recorded non-binary value {other}"
                    ))),
                    None => Err(HalError::MalformedResult(format!(
                        "no measurement recorded for key '{key}' in shot {shot}"
                    ))),
                }
            })
            .collect()
    }
}
