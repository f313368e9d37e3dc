//! High-level circuit builder API.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::{ConditionalOp, Instruction, InstructionKind};
use crate::mapping::QubitMap;
use crate::qubit::{ClassicalRegister, ClbitId, QubitId};
use crate::state::QubitState;

/// Name of the register declared by [`Circuit::measure_all`].
pub const MEASURE_ALL_REGISTER: &str = "meas";

/// A quantum circuit program.
///
/// A circuit is a fixed number of qubit lines, an ordered list of classical
/// registers and an ordered sequence of instructions. Every builder method
/// validates its operands before touching the instruction list, so a failed
/// call leaves the circuit unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubit lines.
    num_qubits: u32,
    /// Classical registers in declaration order.
    cregs: Vec<ClassicalRegister>,
    /// Total classical bits across all registers.
    num_clbits: u32,
    /// Instructions in program order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create an empty circuit over `num_qubits` qubit lines.
    pub fn with_size(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            cregs: vec![],
            num_clbits: 0,
            instructions: vec![],
        }
    }

    /// Rename the circuit.
    #[must_use]
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Declare a classical register of `size` bits.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> IrResult<Vec<ClbitId>> {
        let name = name.into();
        if self.register(&name).is_some() {
            return Err(IrError::DuplicateRegister(name));
        }
        let bits: Vec<ClbitId> = (self.num_clbits..self.num_clbits + size)
            .map(ClbitId)
            .collect();
        self.num_clbits += size;
        self.cregs.push(ClassicalRegister::new(name, bits.clone()));
        Ok(bits)
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Append a gate on the given operands.
    pub fn append(&mut self, gate: StandardGate, qubits: &[QubitId]) -> IrResult<&mut Self> {
        let inst = Instruction::gate(gate, qubits.iter().copied());
        self.check_gate(&inst)?;
        self.instructions.push(inst);
        Ok(self)
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(StandardGate::H, &[qubit])
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(StandardGate::X, &[qubit])
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(StandardGate::Z, &[qubit])
    }

    /// Apply CNOT gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(StandardGate::CX, &[control, target])
    }

    // =========================================================================
    // Non-unitary and classical operations
    // =========================================================================

    /// Measure `qubits[i]` into bit `i` of `register`.
    pub fn measure(
        &mut self,
        qubits: impl IntoIterator<Item = QubitId>,
        register: &str,
    ) -> IrResult<&mut Self> {
        let qubits: Vec<QubitId> = qubits.into_iter().collect();
        self.check_operands(&qubits, Some("measure"))?;
        let reg = self
            .register(register)
            .ok_or_else(|| IrError::RegisterNotFound(register.to_string()))?;
        #[allow(clippy::cast_possible_truncation)]
        let got = qubits.len() as u32;
        if reg.width() != got {
            return Err(IrError::RegisterWidthMismatch {
                register: register.to_string(),
                expected: reg.width(),
                got,
            });
        }
        let clbits = reg.bits().to_vec();
        self.instructions.push(Instruction::measure(qubits, clbits));
        Ok(self)
    }

    /// Declare a register `meas` of width `num_qubits` and measure every
    /// qubit `i` into `meas[i]`.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        self.add_creg(MEASURE_ALL_REGISTER, self.num_qubits)?;
        let qubits: Vec<QubitId> = (0..self.num_qubits).map(QubitId).collect();
        self.measure(qubits, MEASURE_ALL_REGISTER)
    }

    /// Apply `body` only when `register` reads `value`.
    pub fn conditional(
        &mut self,
        register: &str,
        value: u64,
        body: Vec<Instruction>,
    ) -> IrResult<&mut Self> {
        let op = ConditionalOp::new(register, value, body);
        self.check_conditional(&op)?;
        self.instructions.push(Instruction::conditional(op));
        Ok(self)
    }

    /// Prepare `qubit` in `state`. The qubit must not have been touched yet
    /// when the circuit is executed.
    pub fn initialize(&mut self, qubit: QubitId, state: QubitState) -> IrResult<&mut Self> {
        self.check_operands(&[qubit], Some("initialize"))?;
        self.instructions.push(Instruction::initialize(qubit, state));
        Ok(self)
    }

    /// Add an ordering marker across `qubits`.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        let qubits: Vec<QubitId> = qubits.into_iter().collect();
        self.check_operands(&qubits, Some("barrier"))?;
        self.instructions.push(Instruction::barrier(qubits));
        Ok(self)
    }

    /// Add a barrier across every qubit.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<QubitId> = (0..self.num_qubits).map(QubitId).collect();
        self.barrier(qubits)
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// Append `other`'s instructions with every qubit rewritten through `map`.
    ///
    /// The map must cover every qubit `other` references and land inside
    /// this circuit. Classical registers are merged by name: a register of
    /// the same width is reused, a missing one is declared. Nothing is
    /// appended unless the whole composition is valid.
    pub fn compose(&mut self, other: &Circuit, map: &QubitMap) -> IrResult<&mut Self> {
        let mut referenced: Vec<QubitId> = Vec::new();
        for inst in &other.instructions {
            for q in inst.referenced_qubits() {
                if !referenced.contains(&q) {
                    referenced.push(q);
                }
            }
        }

        let mut missing: Vec<QubitId> = referenced
            .iter()
            .copied()
            .filter(|&q| map.get(q).is_none())
            .collect();
        if !missing.is_empty() {
            missing.sort_unstable();
            return Err(IrError::DimensionMismatch {
                circuit: other.name.clone(),
                missing,
            });
        }
        for &source in &referenced {
            if let Some(target) = map.get(source) {
                if target.0 >= self.num_qubits {
                    return Err(IrError::QubitNotFound {
                        qubit: target,
                        gate_name: None,
                    });
                }
            }
        }

        // Validate every register before declaring any of them.
        for reg in &other.cregs {
            if let Some(existing) = self.register(reg.name()) {
                if existing.width() != reg.width() {
                    return Err(IrError::RegisterWidthMismatch {
                        register: reg.name().to_string(),
                        expected: existing.width(),
                        got: reg.width(),
                    });
                }
            }
        }

        let mut clbit_map: FxHashMap<ClbitId, ClbitId> = FxHashMap::default();
        for reg in &other.cregs {
            let targets = match self.register(reg.name()) {
                Some(existing) => existing.bits().to_vec(),
                None => self.add_creg(reg.name(), reg.width())?,
            };
            for (&source, target) in reg.bits().iter().zip(targets) {
                clbit_map.insert(source, target);
            }
        }

        let qubit_fn = |q: QubitId| map.get(q).unwrap_or(q);
        let clbit_fn = |c: ClbitId| clbit_map.get(&c).copied().unwrap_or(c);
        self.instructions.extend(
            other
                .instructions
                .iter()
                .map(|inst| inst.remapped(&qubit_fn, &clbit_fn)),
        );
        Ok(self)
    }

    /// The inverse program: instructions reversed, each gate inverted.
    ///
    /// Barriers are kept in place. Measurement, initialization and
    /// conditional blocks have no inverse.
    pub fn inverse(&self) -> IrResult<Circuit> {
        let mut instructions = Vec::with_capacity(self.instructions.len());
        for inst in self.instructions.iter().rev() {
            match &inst.kind {
                InstructionKind::Gate(gate) => {
                    instructions.push(Instruction::gate(gate.inverse(), inst.qubits.clone()));
                }
                InstructionKind::Barrier => instructions.push(inst.clone()),
                InstructionKind::Measure
                | InstructionKind::Initialize(_)
                | InstructionKind::Conditional(_) => {
                    return Err(IrError::NonInvertible(inst.name().to_string()));
                }
            }
        }
        Ok(Circuit {
            name: format!("{}_inv", self.name),
            num_qubits: self.num_qubits,
            cregs: self.cregs.clone(),
            num_clbits: self.num_clbits,
            instructions,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> u32 {
        self.num_clbits
    }

    /// Classical registers in declaration order.
    pub fn cregs(&self) -> &[ClassicalRegister] {
        &self.cregs
    }

    /// Look up a classical register by name.
    pub fn register(&self, name: &str) -> Option<&ClassicalRegister> {
        self.cregs.iter().find(|r| r.name() == name)
    }

    /// Register name and position holding `clbit`.
    pub fn clbit_location(&self, clbit: ClbitId) -> Option<(&str, u32)> {
        self.cregs
            .iter()
            .find_map(|r| r.position(clbit).map(|pos| (r.name(), pos)))
    }

    /// Instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Number of gate instructions, counting conditional bodies.
    pub fn gate_count(&self) -> usize {
        self.instructions
            .iter()
            .map(|inst| match &inst.kind {
                InstructionKind::Gate(_) => 1,
                InstructionKind::Conditional(op) => op.body.len(),
                _ => 0,
            })
            .sum()
    }

    /// Circuit depth.
    ///
    /// Each instruction sits one layer above the deepest qubit or classical
    /// bit it touches; conditionals touch every bit of their register.
    /// Barriers align their qubits without adding a layer.
    pub fn depth(&self) -> usize {
        let mut qubit_depth = vec![0usize; self.num_qubits as usize];
        let mut clbit_depth = vec![0usize; self.num_clbits as usize];

        for inst in &self.instructions {
            let clbits: Vec<ClbitId> = match &inst.kind {
                InstructionKind::Conditional(op) => self
                    .register(&op.register)
                    .map(|r| r.bits().to_vec())
                    .unwrap_or_default(),
                _ => inst.clbits.clone(),
            };
            let start = inst
                .qubits
                .iter()
                .filter_map(|q| qubit_depth.get(q.index()))
                .chain(clbits.iter().filter_map(|c| clbit_depth.get(c.index())))
                .copied()
                .max()
                .unwrap_or(0);
            let level = if inst.is_barrier() { start } else { start + 1 };
            for q in &inst.qubits {
                if let Some(d) = qubit_depth.get_mut(q.index()) {
                    *d = level;
                }
            }
            for c in &clbits {
                if let Some(d) = clbit_depth.get_mut(c.index()) {
                    *d = level;
                }
            }
        }

        qubit_depth.into_iter().chain(clbit_depth).max().unwrap_or(0)
    }

    /// Render a classical bit store as an outcome key.
    ///
    /// Registers appear in reverse declaration order separated by a space,
    /// each written highest bit first. No registers gives the empty key.
    pub fn outcome_key(&self, store: &[bool]) -> String {
        self.cregs
            .iter()
            .rev()
            .map(|r| r.render(store))
            .collect::<Vec<_>>()
            .join(" ")
    }

    // =========================================================================
    // Validation
    // =========================================================================

    fn check_operands(&self, qubits: &[QubitId], gate_name: Option<&str>) -> IrResult<()> {
        for (i, &qubit) in qubits.iter().enumerate() {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: gate_name.map(str::to_string),
                });
            }
            if qubits[..i].contains(&qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name.map(str::to_string),
                });
            }
        }
        Ok(())
    }

    fn check_gate(&self, inst: &Instruction) -> IrResult<()> {
        let InstructionKind::Gate(gate) = &inst.kind else {
            return Err(IrError::InvalidConditionalBody(inst.name().to_string()));
        };
        #[allow(clippy::cast_possible_truncation)]
        let got = inst.qubits.len() as u32;
        if got != gate.num_qubits() {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name().to_string(),
                expected: gate.num_qubits(),
                got,
            });
        }
        self.check_operands(&inst.qubits, Some(gate.name()))
    }

    fn check_conditional(&self, op: &ConditionalOp) -> IrResult<()> {
        let reg = self
            .register(&op.register)
            .ok_or_else(|| IrError::RegisterNotFound(op.register.clone()))?;
        if !reg.fits(op.value) {
            return Err(IrError::ConditionOutOfRange {
                register: op.register.clone(),
                width: reg.width(),
                value: op.value,
            });
        }
        for inst in &op.body {
            self.check_gate(inst)?;
        }
        Ok(())
    }
}
