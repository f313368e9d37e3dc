//! Sweep command implementation.
//!
//! Injects every single error a code is built to correct and checks that the
//! logical state survives. X errors are probed with |0⟩ and |1⟩ in the
//! computational basis, Z errors with |+⟩ and |−⟩ read out in the Hadamard
//! basis.

use anyhow::Result;
use console::style;
use tracing::{debug, warn};

use qecc_codes::{Experiment, Pauli, PauliError, QuantumCode};
use qecc_hal::Simulator;

use super::common::{
    CodeKind, StateArg, create_progress_bar, logical_count, shots, simulator, within_band,
};
use crate::config::Config;

/// One injected error checked against one input state.
#[derive(Debug, Clone)]
pub struct Probe {
    pub error: PauliError,
    pub state: StateArg,
    pub ones: u64,
    pub passed: bool,
}

/// Execute the sweep command.
pub fn execute(
    kind: CodeKind,
    shots_flag: Option<u32>,
    seed: Option<u64>,
    config: &Config,
) -> Result<()> {
    let code = kind.build()?;
    let shots = shots(config, shots_flag)?;

    println!(
        "{} Sweeping {} ({}) with {} shots per probe",
        style("→").cyan().bold(),
        style(code.name()).green(),
        code.layout(),
        shots
    );

    let probes = sweep(code.as_ref(), shots, seed, config)?;
    print_probes(&probes, shots);

    let failed = probes.iter().filter(|p| !p.passed).count();
    if failed > 0 {
        anyhow::bail!("{failed} of {} probes failed", probes.len());
    }

    println!(
        "\n{} All {} probes recovered the logical state",
        style("✓").green().bold(),
        probes.len()
    );
    Ok(())
}

/// Run every correctable error against both states of its probing basis.
pub fn sweep(
    code: &dyn QuantumCode,
    shots: u32,
    seed: Option<u64>,
    config: &Config,
) -> Result<Vec<Probe>> {
    let simulator = simulator(config, seed);
    let errors = code.correctable_errors();
    let pb = create_progress_bar(errors.len() as u64 * 2, code.name())?;

    let mut probes = Vec::with_capacity(errors.len() * 2);
    for error in errors {
        let states = match error.pauli {
            Pauli::X => [StateArg::Zero, StateArg::One],
            Pauli::Z | Pauli::Y => [StateArg::Plus, StateArg::Minus],
        };
        for state in states {
            let circuit = Experiment::new(code)
                .with_state(state.state())
                .with_error(error)
                .with_correction(true)
                .with_hadamard_readout(state.hadamard_basis())
                .build()?;
            let result = simulator.run(&circuit, shots)?;
            let ones = logical_count(&result.counts, "1");

            let passed = within_band(
                ones,
                shots,
                state.expected_one(),
                config.run.tolerance_sigmas,
            );
            if passed {
                debug!(%error, state = state.label(), ones, "probe passed");
            } else {
                warn!(%error, state = state.label(), ones, "probe failed");
            }
            probes.push(Probe {
                error,
                state,
                ones,
                passed,
            });
            pb.inc(1);
        }
    }
    pb.finish_and_clear();

    Ok(probes)
}

fn print_probes(probes: &[Probe], shots: u32) {
    println!("\n  {:<8} {:<6} {:>10}  {}", "Error", "State", "P(1)", "Result");
    for probe in probes {
        let verdict = if probe.passed {
            style("ok").green()
        } else {
            style("FAIL").red().bold()
        };
        println!(
            "  {:<8} {:<6} {:>10.3}  {}",
            probe.error.to_string(),
            probe.state.label(),
            probe.ones as f64 / f64::from(shots),
            verdict
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_flip_sweep_passes() {
        let code = CodeKind::BitFlip.build().unwrap();
        let probes = sweep(code.as_ref(), 32, Some(3), &Config::default()).unwrap();
        assert_eq!(probes.len(), 6);
        assert!(probes.iter().all(|p| p.passed));
        assert!(probes.iter().all(|p| p.state == StateArg::Zero || p.state == StateArg::One));
    }

    #[test]
    fn test_phase_flip_sweep_uses_hadamard_basis() {
        let code = CodeKind::PhaseFlip.build().unwrap();
        let probes = sweep(code.as_ref(), 32, Some(3), &Config::default()).unwrap();
        assert_eq!(probes.len(), 6);
        for probe in &probes {
            assert!(probe.passed, "{} with {}", probe.error, probe.state.label());
            let expected = if probe.state == StateArg::Minus { 32 } else { 0 };
            assert_eq!(probe.ones, expected);
        }
    }

    #[test]
    fn test_steane_sweep_covers_both_paulis() {
        let code = CodeKind::Steane.build().unwrap();
        let probes = sweep(code.as_ref(), 16, Some(11), &Config::default()).unwrap();
        assert_eq!(probes.len(), 28);
        assert!(probes.iter().all(|p| p.passed));
    }
}
