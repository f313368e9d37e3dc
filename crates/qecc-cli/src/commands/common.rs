//! Shared helpers for CLI commands.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use qecc_adapter_sim::StatevectorSimulator;
use qecc_codes::{
    Experiment, NineQubitShorCode, PauliError, QuantumCode, Readout, SevenQubitSteaneCode,
    ShorProtection, ThreeQubitBitFlipCode, ThreeQubitPhaseFlipCode,
};
use qecc_hal::{Counts, ExecutionResult};
use qecc_ir::QubitState;

use crate::config::Config;

/// Codes selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CodeKind {
    /// Three-qubit bit-flip code
    BitFlip,
    /// Three-qubit phase-flip code
    PhaseFlip,
    /// Nine-qubit Shor code correcting one X and one Z
    Shor,
    /// Nine-qubit Shor code, X errors only
    ShorBitFlip,
    /// Nine-qubit Shor code, Z errors only
    ShorPhaseFlip,
    /// Seven-qubit Steane code
    Steane,
}

impl CodeKind {
    /// Construct the code.
    pub fn build(self) -> Result<Box<dyn QuantumCode>> {
        let code: Box<dyn QuantumCode> = match self {
            CodeKind::BitFlip => Box::new(ThreeQubitBitFlipCode::new()?),
            CodeKind::PhaseFlip => Box::new(ThreeQubitPhaseFlipCode::new()?),
            CodeKind::Shor => Box::new(NineQubitShorCode::new(ShorProtection::Complete)?),
            CodeKind::ShorBitFlip => Box::new(NineQubitShorCode::new(ShorProtection::BitFlip)?),
            CodeKind::ShorPhaseFlip => {
                Box::new(NineQubitShorCode::new(ShorProtection::PhaseFlip)?)
            }
            CodeKind::Steane => Box::new(SevenQubitSteaneCode::new()?),
        };
        Ok(code)
    }
}

/// Named logical input states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StateArg {
    /// |0⟩
    Zero,
    /// |1⟩
    One,
    /// |+⟩
    Plus,
    /// |−⟩
    Minus,
}

impl StateArg {
    /// The single-qubit state.
    pub fn state(self) -> QubitState {
        match self {
            StateArg::Zero => QubitState::ZERO,
            StateArg::One => QubitState::ONE,
            StateArg::Plus => QubitState::PLUS,
            StateArg::Minus => QubitState::MINUS,
        }
    }

    /// Ket label for display.
    pub fn label(self) -> &'static str {
        match self {
            StateArg::Zero => "|0⟩",
            StateArg::One => "|1⟩",
            StateArg::Plus => "|+⟩",
            StateArg::Minus => "|−⟩",
        }
    }

    /// Whether the state is read out after a Hadamard on qubit 0.
    pub fn hadamard_basis(self) -> bool {
        matches!(self, StateArg::Plus | StateArg::Minus)
    }

    /// Probability of reading 1 in this state's readout basis. Both bases
    /// are deterministic: |0⟩ and |+⟩ read 0, |1⟩ and |−⟩ read 1.
    pub fn expected_one(self) -> f64 {
        match self {
            StateArg::Zero | StateArg::Plus => 0.0,
            StateArg::One | StateArg::Minus => 1.0,
        }
    }
}

/// Programs `emit` can export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Stage {
    /// Encoder on the data qubits
    Encode,
    /// Decoder on the data qubits
    Decode,
    /// Syndrome extraction onto the ancillas
    Syndrome,
    /// Ancilla measurement and conditional correction
    Correct,
    /// The complete experiment
    Experiment,
}

/// Experiment options shared by `run` and `emit`.
#[derive(Debug, Clone, Args)]
pub struct ExperimentArgs {
    /// Logical input state
    #[arg(long, value_enum, default_value = "zero")]
    pub state: StateArg,

    /// Inject an X error on this data qubit
    #[arg(long)]
    pub x_error: Option<u32>,

    /// Inject a Z error on this data qubit
    #[arg(long)]
    pub z_error: Option<u32>,

    /// Skip syndrome extraction and correction
    #[arg(long)]
    pub no_correct: bool,
}

impl ExperimentArgs {
    /// Injected errors, X before Z.
    pub fn errors(&self) -> Vec<PauliError> {
        self.x_error
            .map(PauliError::x)
            .into_iter()
            .chain(self.z_error.map(PauliError::z))
            .collect()
    }

    /// Build the experiment program with a logical readout, in the
    /// Hadamard basis for |+⟩ and |−⟩.
    pub fn experiment<'a>(&self, code: &'a dyn QuantumCode) -> Experiment<'a> {
        Experiment::new(code)
            .with_state(self.state.state())
            .with_errors(self.errors())
            .with_syndrome(!self.no_correct)
            .with_correction(!self.no_correct)
            .with_hadamard_readout(self.state.hadamard_basis())
            .with_readout(Readout::Logical)
    }
}

/// The reference simulator configured from `config`, with `seed` taking
/// precedence over the configured seed.
pub fn simulator(config: &Config, seed: Option<u64>) -> StatevectorSimulator {
    StatevectorSimulator::with_max_qubits(config.simulator.max_qubits)
        .with_optional_seed(seed.or(config.simulator.seed))
}

/// Shots from the flag, else the configuration.
pub fn shots(config: &Config, flag: Option<u32>) -> Result<u32> {
    let shots = flag.unwrap_or(config.run.shots);
    if shots == 0 {
        anyhow::bail!("shots must be greater than 0");
    }
    Ok(shots)
}

/// Shots whose leading (logical) register field reads `bit`.
pub fn logical_count(counts: &Counts, bit: &str) -> u64 {
    counts
        .sorted()
        .into_iter()
        .filter(|(key, _)| key.split(' ').next() == Some(bit))
        .map(|(_, count)| *count)
        .sum()
}

/// Whether `observed` ones out of `shots` is within `sigmas` binomial standard
/// deviations of probability `p`. Half a shot of slack absorbs the
/// deterministic cases where the deviation is zero.
pub fn within_band(observed: u64, shots: u32, p: f64, sigmas: f64) -> bool {
    let n = f64::from(shots);
    let expected = n * p;
    let sd = (n * p * (1.0 - p)).max(0.0).sqrt();
    (observed as f64 - expected).abs() <= sigmas * sd + 0.5
}

/// Create a progress bar for sweep operations.
pub fn create_progress_bar(len: u64, message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )
        .context("Invalid progress bar template")?
        .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    Ok(pb)
}

/// Print execution results in a table format.
///
/// When `code` is given every outcome is annotated with its decoded syndrome.
pub fn print_results(result: &ExecutionResult, code: Option<&dyn QuantumCode>) {
    println!(
        "\n{} Results ({} shots):",
        style("✓").green().bold(),
        result.shots
    );

    let sorted = result.counts.sorted();

    for (outcome, count) in sorted.iter().take(16) {
        let prob = result.counts.probability(outcome) * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        let meaning = code
            .map(|code| describe_syndrome(code, outcome))
            .unwrap_or_default();

        println!(
            "  {}: {:>6} ({:>5.2}%) {}  {}",
            style(outcome).cyan(),
            count,
            prob,
            style(bar).green(),
            style(meaning).dim()
        );
    }

    if sorted.len() > 16 {
        println!("  ... and {} more outcomes", sorted.len() - 16);
    }

    if let Some(time_ms) = result.execution_time_ms {
        println!("\n  Execution time: {} ms", style(time_ms).yellow());
    }
}

/// Human-readable meaning of the syndrome fields of an outcome key.
pub fn describe_syndrome(code: &dyn QuantumCode, outcome: &str) -> String {
    match code.decode_syndrome(outcome) {
        Ok(corrections) if corrections.is_empty() => "no error detected".to_string(),
        Ok(corrections) => corrections
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
        Err(e) => format!("undecodable: {e}"),
    }
}
