//! Run command implementation.

use anyhow::{Context, Result};
use console::style;
use tracing::info;

use qecc_codes::{Pauli, PauliError, QuantumCode};
use qecc_hal::Simulator;

use super::common::{
    CodeKind, ExperimentArgs, StateArg, logical_count, print_results, shots, simulator,
    within_band,
};
use crate::config::Config;

/// Execute the run command.
pub fn execute(
    kind: CodeKind,
    args: &ExperimentArgs,
    shots_flag: Option<u32>,
    seed: Option<u64>,
    json: bool,
    config: &Config,
) -> Result<()> {
    let code = kind.build()?;
    let shots = shots(config, shots_flag)?;
    let circuit = args
        .experiment(code.as_ref())
        .build()
        .with_context(|| format!("Failed to build {} experiment", code.name()))?;

    let simulator = simulator(config, seed);
    info!(
        code = code.name(),
        qubits = circuit.num_qubits(),
        instructions = circuit.len(),
        shots,
        "running experiment"
    );
    let result = simulator.run(&circuit, shots)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "{} Running {} on {} ({} shots)",
        style("→").cyan().bold(),
        style(code.name()).green(),
        style(simulator.name()).yellow(),
        shots
    );
    println!(
        "  Prepared {}, errors: {}",
        args.state.label(),
        describe_errors(&args.errors())
    );
    println!(
        "  Circuit: {} qubits ({}), depth {}",
        circuit.num_qubits(),
        code.layout(),
        circuit.depth()
    );

    let annotate = (!args.no_correct).then_some(code.as_ref());
    print_results(&result, annotate);

    if !recoverable(code.as_ref(), &args.errors(), !args.no_correct) {
        println!(
            "\n  {} errors are not correctable here; logical outcome not checked",
            style("!").yellow().bold()
        );
        return Ok(());
    }

    let ones = logical_count(&result.counts, "1");
    let p1 = check_logical(ones, shots, args.state, config)?;
    println!(
        "\n  {} Logical state recovered (P(1) = {:.3}, expected {:.3})",
        style("✓").green().bold(),
        ones as f64 / f64::from(shots),
        p1
    );

    Ok(())
}

/// Compare the logical readout with `state` in its readout basis and return
/// the expected P(1).
fn check_logical(ones: u64, shots: u32, state: StateArg, config: &Config) -> Result<f64> {
    let p1 = state.expected_one();
    if !within_band(ones, shots, p1, config.run.tolerance_sigmas) {
        anyhow::bail!(
            "logical state {} not recovered: {ones}/{shots} ones, expected P(1) = {p1:.3}",
            state.label()
        );
    }
    Ok(p1)
}

/// Whether the code, as configured, undoes every injected error.
fn recoverable(code: &dyn QuantumCode, errors: &[PauliError], correct: bool) -> bool {
    if errors.is_empty() {
        return true;
    }
    if !correct {
        return false;
    }
    let protects = |p: Pauli| code.protects().contains(&p);
    let mut seen_x = false;
    let mut seen_z = false;
    for error in errors {
        let (x, z) = match error.pauli {
            Pauli::X => (true, false),
            Pauli::Z => (false, true),
            Pauli::Y => (true, true),
        };
        if (x && (seen_x || !protects(Pauli::X))) || (z && (seen_z || !protects(Pauli::Z))) {
            return false;
        }
        seen_x |= x;
        seen_z |= z;
    }
    true
}

fn describe_errors(errors: &[PauliError]) -> String {
    if errors.is_empty() {
        return "none".to_string();
    }
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable() {
        let bit_flip = CodeKind::BitFlip.build().unwrap();
        assert!(recoverable(bit_flip.as_ref(), &[], false));
        assert!(recoverable(bit_flip.as_ref(), &[PauliError::x(1)], true));
        assert!(!recoverable(bit_flip.as_ref(), &[PauliError::x(1)], false));
        assert!(!recoverable(bit_flip.as_ref(), &[PauliError::z(1)], true));
        assert!(!recoverable(
            bit_flip.as_ref(),
            &[PauliError::x(0), PauliError::x(2)],
            true
        ));

        let steane = CodeKind::Steane.build().unwrap();
        assert!(recoverable(
            steane.as_ref(),
            &[PauliError::x(3), PauliError::z(5)],
            true
        ));
        assert!(recoverable(steane.as_ref(), &[PauliError::y(6)], true));
    }

    #[test]
    fn test_describe_errors() {
        assert_eq!(describe_errors(&[]), "none");
        assert_eq!(
            describe_errors(&[PauliError::x(0), PauliError::z(2)]),
            "X0, Z2"
        );
    }

    #[test]
    fn test_execute_corrected_run() {
        let args = ExperimentArgs {
            state: StateArg::One,
            x_error: Some(2),
            z_error: None,
            no_correct: false,
        };
        let mut config = Config::default();
        config.simulator.seed = Some(5);
        execute(CodeKind::BitFlip, &args, Some(64), None, true, &config).unwrap();
        execute(CodeKind::BitFlip, &args, Some(64), None, false, &config).unwrap();
    }

    #[test]
    fn test_check_logical_rejects_wrong_phase() {
        let config = Config::default();
        assert!(check_logical(0, 256, StateArg::Plus, &config).is_ok());
        assert!(check_logical(256, 256, StateArg::Minus, &config).is_ok());
        assert!(check_logical(256, 256, StateArg::Plus, &config).is_err());
        // A coin flip is no longer accepted for superpositions.
        assert!(check_logical(128, 256, StateArg::Plus, &config).is_err());
    }

    #[test]
    fn test_uncorrected_phase_error_fails_check() {
        // The bit-flip code leaves Z untouched, turning |+⟩ into |−⟩.
        let code = CodeKind::BitFlip.build().unwrap();
        let args = ExperimentArgs {
            state: StateArg::Plus,
            x_error: None,
            z_error: Some(0),
            no_correct: false,
        };
        let circuit = args.experiment(code.as_ref()).build().unwrap();
        let result = simulator(&Config::default(), Some(9))
            .run(&circuit, 128)
            .unwrap();
        let ones = logical_count(&result.counts, "1");
        assert_eq!(ones, 128);
        assert!(check_logical(ones, 128, args.state, &Config::default()).is_err());
    }

    #[test]
    fn test_execute_corrected_phase_run() {
        let args = ExperimentArgs {
            state: StateArg::Minus,
            x_error: None,
            z_error: Some(1),
            no_correct: false,
        };
        let mut config = Config::default();
        config.simulator.seed = Some(5);
        execute(CodeKind::PhaseFlip, &args, Some(64), None, false, &config).unwrap();
    }
}
