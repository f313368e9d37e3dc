//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum error-correcting codes on a statevector simulator",
        style("qecc").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qecc-ir           Circuit intermediate representation");
    println!("  qecc-codes        Bit-flip, phase-flip, Shor and Steane codes");
    println!("  qecc-hal          Simulator abstraction");
    println!("  qecc-adapter-sim  Statevector simulator");
    println!("  qecc-qasm3        OpenQASM 3 export");
    println!();
    println!("License: {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
