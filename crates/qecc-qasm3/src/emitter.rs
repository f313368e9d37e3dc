//! QASM3 emitter for serializing circuits.

use qecc_ir::{Circuit, ClbitId, Instruction, InstructionKind, QubitId, QubitState};

/// Emit a circuit as QASM3 source code.
pub fn emit(circuit: &Circuit) -> String {
    let mut emitter = Emitter::new(circuit);
    emitter.emit_circuit();
    emitter.output
}

/// QASM3 emitter.
struct Emitter<'a> {
    circuit: &'a Circuit,
    output: String,
    indent: usize,
}

impl<'a> Emitter<'a> {
    fn new(circuit: &'a Circuit) -> Self {
        Self {
            circuit,
            output: String::new(),
            indent: 0,
        }
    }

    fn emit_circuit(&mut self) {
        // Version
        self.writeln("OPENQASM 3.0;");
        self.writeln("include \"stdgates.inc\";");
        self.writeln("");

        // Declarations
        let num_qubits = self.circuit.num_qubits();
        if num_qubits > 0 {
            self.writeln(&format!("qubit[{num_qubits}] q;"));
        }
        for reg in self.circuit.cregs() {
            self.writeln(&format!("bit[{}] {};", reg.width(), reg.name()));
        }
        if num_qubits > 0 || !self.circuit.cregs().is_empty() {
            self.writeln("");
        }

        // Instructions
        for instruction in self.circuit.instructions() {
            self.emit_instruction(instruction);
        }
    }

    fn emit_instruction(&mut self, instruction: &Instruction) {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let qubits = emit_qubits(&instruction.qubits);
                self.writeln(&format!("{} {qubits};", gate.name()));
            }

            InstructionKind::Measure => {
                for (q, c) in instruction.qubits.iter().zip(instruction.clbits.iter()) {
                    let target = self.emit_clbit(*c);
                    self.writeln(&format!("{target} = measure q[{}];", q.0));
                }
            }

            InstructionKind::Initialize(state) => {
                // No QASM3 equivalent; emit as pragma comment
                let qubits = emit_qubits(&instruction.qubits);
                self.writeln(&format!(
                    "// @pragma initialize({}) {qubits};",
                    emit_state(state)
                ));
            }

            InstructionKind::Barrier => {
                let qubits = emit_qubits(&instruction.qubits);
                if qubits.is_empty() {
                    self.writeln("barrier;");
                } else {
                    self.writeln(&format!("barrier {qubits};"));
                }
            }

            InstructionKind::Conditional(op) => {
                self.writeln(&format!("if ({} == {}) {{", op.register, op.value));
                self.indent += 1;
                for inner in &op.body {
                    self.emit_instruction(inner);
                }
                self.indent -= 1;
                self.writeln("}");
            }
        }
    }

    /// `name[k]` for a bit owned by a register, `c[i]` otherwise.
    fn emit_clbit(&self, clbit: ClbitId) -> String {
        match self.circuit.clbit_location(clbit) {
            Some((name, index)) => format!("{name}[{index}]"),
            None => format!("c[{}]", clbit.0),
        }
    }

    fn writeln(&mut self, line: &str) {
        let indent = "    ".repeat(self.indent);
        self.output.push_str(&indent);
        self.output.push_str(line);
        self.output.push('\n');
    }
}

fn emit_qubits(qubits: &[QubitId]) -> String {
    qubits
        .iter()
        .map(|q| format!("q[{}]", q.0))
        .collect::<Vec<_>>()
        .join(", ")
}

fn emit_state(state: &QubitState) -> String {
    let (a, b) = (state.alpha(), state.beta());
    format!(
        "{:.6}{:+.6}i, {:.6}{:+.6}i",
        a.re, a.im, b.re, b.im
    )
}
