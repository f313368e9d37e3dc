//! Emit command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qecc_ir::Circuit;

use super::common::{CodeKind, ExperimentArgs, Stage};

/// Execute the emit command.
pub fn execute(
    kind: CodeKind,
    stage: Stage,
    args: &ExperimentArgs,
    output: Option<&Path>,
) -> Result<()> {
    let code = kind.build()?;

    let built;
    let circuit: &Circuit = match stage {
        Stage::Encode => code.encoder(),
        Stage::Decode => code.decoder(),
        Stage::Syndrome => code.syndrome_extractor(),
        Stage::Correct => code.corrector(),
        Stage::Experiment => {
            built = args.experiment(code.as_ref()).build()?;
            &built
        }
    };

    let qasm = qecc_qasm3::emit(circuit);

    match output {
        Some(path) => {
            std::fs::write(path, &qasm)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Wrote {} ({} instructions) to {}",
                style("✓").green().bold(),
                style(circuit.name()).cyan(),
                circuit.len(),
                style(path.display()).yellow()
            );
        }
        None => print!("{qasm}"),
    }

    Ok(())
}
