//! Three-qubit bit-flip and phase-flip codes on the statevector simulator.

use qecc_adapter_sim::StatevectorSimulator;
use qecc_codes::{
    Correction, Experiment, PauliError, QuantumCode, Readout, ThreeQubitBitFlipCode,
    ThreeQubitPhaseFlipCode,
};
use qecc_hal::{Counts, Simulator};
use qecc_ir::{Circuit, QubitState};
use rand::SeedableRng;
use rand::rngs::StdRng;

const SHOTS: u32 = 1024;

fn run(circuit: &Circuit, shots: u32) -> Counts {
    StatevectorSimulator::new()
        .with_seed(42)
        .run(circuit, shots)
        .unwrap()
        .counts
}

/// Assert a single outcome carries every shot.
fn assert_deterministic(counts: &Counts, key: &str) {
    assert_eq!(
        counts.get(key),
        u64::from(SHOTS),
        "expected only '{key}', got {:?}",
        counts.sorted()
    );
}

/// `observed` lies within four binomial standard deviations of `p * shots`.
fn assert_within_band(observed: u64, p: f64, shots: u32) {
    let n = f64::from(shots);
    let sigma = (n * p * (1.0 - p)).sqrt();
    let diff = (observed as f64 - n * p).abs();
    assert!(
        diff <= 4.0 * sigma + 1.0,
        "observed {observed}, expected {:.1} ± {:.1}",
        n * p,
        4.0 * sigma
    );
}

// ============================================================================
// Bit-flip code
// ============================================================================

#[test]
fn test_bit_flip_encode_decode_round_trip() {
    let code = ThreeQubitBitFlipCode::new().unwrap();
    for (state, key) in [(QubitState::ZERO, "000"), (QubitState::ONE, "001")] {
        let circuit = Experiment::new(&code)
            .with_state(state)
            .with_syndrome(false)
            .with_correction(false)
            .with_readout(Readout::All)
            .build()
            .unwrap();
        // ancillas untouched, encoded data returned to |ψ00⟩
        assert_deterministic(&run(&circuit, SHOTS), &format!("00{key}"));
    }
}

#[test]
fn test_bit_flip_syndromes_without_correction() {
    let code = ThreeQubitBitFlipCode::new().unwrap();
    let cases = [
        (QubitState::ZERO, None, "00000"),
        (QubitState::ZERO, Some(0), "01001"),
        (QubitState::ZERO, Some(1), "10010"),
        (QubitState::ZERO, Some(2), "11100"),
        (QubitState::ONE, None, "00111"),
        (QubitState::ONE, Some(0), "01110"),
        (QubitState::ONE, Some(1), "10101"),
        (QubitState::ONE, Some(2), "11011"),
    ];
    for (state, error, expected) in cases {
        let circuit = Experiment::new(&code)
            .with_state(state)
            .with_errors(error.map(PauliError::x))
            .with_correction(false)
            .with_decode(false)
            .with_readout(Readout::All)
            .build()
            .unwrap();
        assert_deterministic(&run(&circuit, SHOTS), expected);
    }
}

#[test]
fn test_bit_flip_correction_before_decode() {
    let code = ThreeQubitBitFlipCode::new().unwrap();
    let circuit = Experiment::new(&code)
        .with_error(PauliError::x(0))
        .with_decode(false)
        .with_readout(Readout::All)
        .build()
        .unwrap();
    let counts = run(&circuit, SHOTS);
    assert_deterministic(&counts, "01000 01");
    assert_eq!(
        code.decode_syndrome("01000 01").unwrap(),
        vec![Correction::x(0)]
    );
}

#[test]
fn test_logical_one_with_error_on_qubit_one() {
    let code = ThreeQubitBitFlipCode::new().unwrap();
    let circuit = Experiment::new(&code)
        .with_state(QubitState::ONE)
        .with_error(PauliError::x(1))
        .build()
        .unwrap();
    let counts = run(&circuit, SHOTS);

    // logical register first, syndrome last
    assert_deterministic(&counts, "1 10");
    assert!((counts.probability("1 10") - 1.0).abs() < f64::EPSILON);
    let (key, _) = counts.most_frequent().unwrap();
    assert_eq!(code.decode_syndrome(key).unwrap(), vec![Correction::x(1)]);
}

#[test]
fn test_bit_flip_syndromes_are_distinct() {
    let code = ThreeQubitBitFlipCode::new().unwrap();
    let mut seen = Vec::new();
    for error in [None, Some(0), Some(1), Some(2)] {
        let circuit = Experiment::new(&code)
            .with_errors(error.map(PauliError::x))
            .build()
            .unwrap();
        let counts = run(&circuit, 64);
        assert_eq!(counts.len(), 1);
        let key = counts.keys()[0].to_string();
        assert!(key.starts_with("0 "), "logical state lost: {key}");
        assert!(!seen.contains(&key));
        seen.push(key);
    }
}

#[test]
fn test_bit_flip_random_state_survives_error() {
    let code = ThreeQubitBitFlipCode::new().unwrap();
    let mut rng = StdRng::seed_from_u64(2024);
    for qubit in 0..3 {
        let state = QubitState::random(&mut rng);
        let (_, p1) = state.probabilities();
        let circuit = Experiment::new(&code)
            .with_state(state)
            .with_error(PauliError::x(qubit))
            .build()
            .unwrap();
        let counts = run(&circuit, 4000);
        let syndrome = format!("{:02b}", qubit + 1);
        let ones = counts.get(&format!("1 {syndrome}"));
        assert_eq!(counts.get(&format!("0 {syndrome}")) + ones, 4000);
        assert_within_band(ones, p1, 4000);
    }
}

// ============================================================================
// Phase-flip code
// ============================================================================

#[test]
fn test_phase_flip_encoding_is_uniform() {
    let code = ThreeQubitPhaseFlipCode::new().unwrap();
    let circuit = Experiment::new(&code)
        .with_syndrome(false)
        .with_correction(false)
        .with_decode(false)
        .with_readout(Readout::All)
        .build()
        .unwrap();
    // |+++⟩ spreads over all eight data patterns
    let counts = run(&circuit, 8000);
    assert_eq!(counts.len(), 8);
    for key in counts.keys() {
        assert!(key.starts_with("00"));
        assert_within_band(counts.get(key), 0.125, 8000);
    }
}

#[test]
fn test_phase_flip_corrects_every_location() {
    let code = ThreeQubitPhaseFlipCode::new().unwrap();
    for (state, data) in [(QubitState::ZERO, "000"), (QubitState::ONE, "001")] {
        for qubit in 0..3 {
            let syndrome = format!("{:02b}", qubit + 1);
            let circuit = Experiment::new(&code)
                .with_state(state)
                .with_error(PauliError::z(qubit))
                .with_readout(Readout::All)
                .build()
                .unwrap();
            let expected = format!("{syndrome}{data} {syndrome}");
            assert_deterministic(&run(&circuit, SHOTS), &expected);
        }
    }
}

#[test]
fn test_phase_flip_hadamard_basis() {
    let code = ThreeQubitPhaseFlipCode::new().unwrap();
    for (state, logical) in [(QubitState::PLUS, "0"), (QubitState::MINUS, "1")] {
        let circuit = Experiment::new(&code)
            .with_state(state)
            .with_error(PauliError::z(2))
            .with_hadamard_readout(true)
            .build()
            .unwrap();
        assert_deterministic(&run(&circuit, SHOTS), &format!("{logical} 11"));
    }
}

#[test]
fn test_phase_flip_ignores_bit_flip_protection() {
    let code = ThreeQubitPhaseFlipCode::new().unwrap();
    assert!(
        code.correctable_errors()
            .iter()
            .all(|e| e.pauli == qecc_codes::Pauli::Z)
    );
}
