//! Seven-qubit Steane code on the statevector simulator.

use qecc_adapter_sim::StatevectorSimulator;
use qecc_codes::{Correction, Experiment, PauliError, QuantumCode, Readout, SevenQubitSteaneCode};
use qecc_hal::{Counts, Simulator};
use qecc_ir::{Circuit, QubitState};

const SHOTS: u32 = 256;

/// The eight |0_L⟩ codewords, written qubit 0 first.
const ZERO_CODEWORDS: [&str; 8] = [
    "0000000", "1010101", "0110011", "1100110", "0001111", "1011010", "0111100", "1101001",
];

fn run(circuit: &Circuit, shots: u32) -> Counts {
    StatevectorSimulator::new()
        .with_seed(3)
        .run(circuit, shots)
        .unwrap()
        .counts
}

fn assert_deterministic(counts: &Counts, key: &str) {
    assert_eq!(
        counts.get(key),
        u64::from(SHOTS),
        "expected only '{key}', got {:?}",
        counts.sorted()
    );
}

/// A codeword as it appears in an outcome key: qubit 6 first.
fn as_key(word: &str, flip: bool) -> String {
    word.chars()
        .rev()
        .map(|c| match (c, flip) {
            ('0', true) => '1',
            ('1', true) => '0',
            (c, _) => c,
        })
        .collect()
}

fn encoded(state: QubitState) -> Circuit {
    let code = SevenQubitSteaneCode::new().unwrap();
    Experiment::new(&code)
        .with_state(state)
        .with_syndrome(false)
        .with_correction(false)
        .with_decode(false)
        .with_readout(Readout::All)
        .build()
        .unwrap()
}

#[test]
fn test_logical_zero_codewords() {
    let counts = run(&encoded(QubitState::ZERO), 4096);
    let expected: Vec<String> = ZERO_CODEWORDS
        .iter()
        .map(|w| format!("000000{}", as_key(w, false)))
        .collect();
    assert_eq!(counts.len(), 8);
    for key in counts.keys() {
        assert!(expected.iter().any(|e| e == key), "unexpected {key}");
    }
}

#[test]
fn test_logical_one_codewords() {
    let counts = run(&encoded(QubitState::ONE), 4096);
    let expected: Vec<String> = ZERO_CODEWORDS
        .iter()
        .map(|w| format!("000000{}", as_key(w, true)))
        .collect();
    assert_eq!(counts.len(), 8);
    for key in counts.keys() {
        assert!(expected.iter().any(|e| e == key), "unexpected {key}");
    }
}

#[test]
fn test_encode_decode_round_trip() {
    let code = SevenQubitSteaneCode::new().unwrap();
    for (state, data) in [(QubitState::ZERO, "0000000"), (QubitState::ONE, "0000001")] {
        let circuit = Experiment::new(&code)
            .with_state(state)
            .with_syndrome(false)
            .with_correction(false)
            .with_readout(Readout::All)
            .build()
            .unwrap();
        assert_deterministic(&run(&circuit, SHOTS), &format!("000000{data}"));
    }
}

#[test]
fn test_plus_round_trip_is_balanced() {
    let code = SevenQubitSteaneCode::new().unwrap();
    let circuit = Experiment::new(&code)
        .with_state(QubitState::PLUS)
        .with_syndrome(false)
        .with_correction(false)
        .build()
        .unwrap();
    let shots = 4000_u32;
    let counts = run(&circuit, shots);
    // 4σ band around 2000 is ±126.5
    let ones = counts.get("1");
    assert_eq!(counts.get("0") + ones, u64::from(shots));
    assert!(ones.abs_diff(2000) <= 127, "ones = {ones}");
}

#[test]
fn test_single_x_errors() {
    let code = SevenQubitSteaneCode::new().unwrap();
    for (state, logical) in [(QubitState::ZERO, "0"), (QubitState::ONE, "1")] {
        for qubit in 0..7_u32 {
            let circuit = Experiment::new(&code)
                .with_state(state)
                .with_error(PauliError::x(qubit))
                .build()
                .unwrap();
            let key = format!("{logical} 000 {:03b}", qubit + 1);
            assert_deterministic(&run(&circuit, SHOTS), &key);
            assert_eq!(code.decode_syndrome(&key).unwrap(), vec![Correction::x(qubit)]);
        }
    }
}

#[test]
fn test_single_z_errors() {
    let code = SevenQubitSteaneCode::new().unwrap();
    for (state, logical) in [(QubitState::PLUS, "0"), (QubitState::MINUS, "1")] {
        for qubit in 0..7_u32 {
            let circuit = Experiment::new(&code)
                .with_state(state)
                .with_error(PauliError::z(qubit))
                .with_hadamard_readout(true)
                .build()
                .unwrap();
            let key = format!("{logical} {:03b} 000", qubit + 1);
            assert_deterministic(&run(&circuit, SHOTS), &key);
        }
    }
}

#[test]
fn test_all_x_z_combinations() {
    let code = SevenQubitSteaneCode::new().unwrap();
    for x in 0..7_u32 {
        for z in 0..7_u32 {
            let circuit = Experiment::new(&code)
                .with_state(QubitState::ONE)
                .with_error(PauliError::x(x))
                .with_error(PauliError::z(z))
                .with_readout(Readout::All)
                .build()
                .unwrap();
            let phase = format!("{:03b}", z + 1);
            let bit = format!("{:03b}", x + 1);
            let key = format!("{phase}{bit}0000001 {phase} {bit}");
            assert_deterministic(&run(&circuit, SHOTS), &key);
        }
    }
}

#[test]
fn test_all_x_z_combinations_keep_phase() {
    let code = SevenQubitSteaneCode::new().unwrap();
    for (state, logical) in [(QubitState::PLUS, "0"), (QubitState::MINUS, "1")] {
        for x in 0..7_u32 {
            for z in 0..7_u32 {
                let circuit = Experiment::new(&code)
                    .with_state(state)
                    .with_error(PauliError::x(x))
                    .with_error(PauliError::z(z))
                    .with_hadamard_readout(true)
                    .build()
                    .unwrap();
                let key = format!("{logical} {:03b} {:03b}", z + 1, x + 1);
                assert_deterministic(&run(&circuit, SHOTS), &key);
            }
        }
    }
}
