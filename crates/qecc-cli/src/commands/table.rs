//! Table command implementation.

use anyhow::Result;
use console::style;

use qecc_codes::QuantumCode;

use super::common::CodeKind;

/// Execute the table command.
pub fn execute(kind: CodeKind) -> Result<()> {
    let code = kind.build()?;
    print!("{}", render(code.as_ref()));
    Ok(())
}

/// Syndrome tables of `code`, one block per register.
fn render(code: &dyn QuantumCode) -> String {
    let mut out = format!(
        "{} {} ({} data + {} ancilla qubits)\n",
        style("→").cyan().bold(),
        style(code.name()).green(),
        code.layout().data,
        code.layout().ancilla
    );

    for table in code.syndrome_tables() {
        out.push_str(&format!(
            "\n  {} [{} bits]\n",
            style(table.register()).yellow(),
            table.width()
        ));
        out.push_str(&format!("    {}  no correction\n", table.format_pattern(0)));
        for (pattern, correction) in table.entries() {
            out.push_str(&format!(
                "    {}  {}\n",
                table.format_pattern(*pattern),
                correction
            ));
        }
    }
    out
}
