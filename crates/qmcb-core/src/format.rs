//! Row label formatting: bit strings (`01`), input kets (`|01>`) and Dirac
//! notation (`0.707|00⟩ + 0.707|11⟩`).

use num_complex::Complex64;

use qmcb_hal::StateVector;
use qmcb_ir::BasisState;

use crate::config::SimulationMode;

/// Label of an input basis state.
///
/// Kets are only used in statevector mode.
pub fn input_label(basis: &BasisState, mode: SimulationMode, input_as_ket: bool) -> String {
    match mode {
        SimulationMode::Statevector if input_as_ket => basis.to_ket(),
        _ => basis.to_bit_string(),
    }
}

/// Render a state in Dirac notation, rounding to `decimals` places.
///
/// Basis kets are written with the most significant amplitude index bit
/// first, matching the order of [`StateVector`] amplitudes.
pub fn dirac_notation(state: &StateVector, decimals: usize) -> String {
    let n = state.num_qubits();
    let terms: Vec<String> = state
        .amplitudes()
        .iter()
        .enumerate()
        .filter_map(|(index, &amp)| {
            let amp = round_complex(amp, decimals);
            if amp.re == 0.0 && amp.im == 0.0 {
                return None;
            }
            let ket = format!("|{}⟩", BasisState::from_index(index, n).to_bit_string());
            if amp.re == 1.0 && amp.im == 0.0 {
                return Some(ket);
            }
            Some(format!("{}{ket}", format_coefficient(amp, decimals)))
        })
        .collect();

    if terms.is_empty() {
        return "0".to_string();
    }
    terms.join(" + ").replace(" + -", " - ")
}

fn round_complex(z: Complex64, decimals: usize) -> Complex64 {
    Complex64::new(round_to(z.re, decimals), round_to(z.im, decimals))
}

fn round_to(x: f64, decimals: usize) -> f64 {
    let rounded: f64 = format!("{x:.decimals$}").parse().unwrap_or(x);
    // Normalise negative zero so it never prints as "-0".
    if rounded == 0.0 { 0.0 } else { rounded }
}

fn format_coefficient(z: Complex64, decimals: usize) -> String {
    if z.im == 0.0 {
        format_number(z.re, decimals)
    } else if z.re == 0.0 {
        format!("{}j", format_number(z.im, decimals))
    } else {
        let sign = if z.im < 0.0 { '-' } else { '+' };
        format!(
            "({}{sign}{}j)",
            format_number(z.re, decimals),
            format_number(z.im.abs(), decimals)
        )
    }
}

fn format_number(x: f64, decimals: usize) -> String {
    let fixed = format!("{x:.decimals$}");
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}
