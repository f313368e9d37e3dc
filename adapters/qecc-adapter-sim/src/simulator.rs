//! Statevector simulator with mid-circuit measurement.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use std::time::Instant;
use tracing::{debug, instrument, trace};

use qecc_hal::{
    Capabilities, Counts, DEFAULT_MAX_QUBITS, ExecutionResult, HalError, HalResult, Simulator,
};
use qecc_ir::{Circuit, ClassicalRegister, Instruction, InstructionKind, QubitState};

use crate::statevector::{DETERMINISTIC_EPS, Statevector};

/// One executable step of a flattened circuit.
enum Op<'a> {
    Gate(&'a Instruction),
    Measure {
        qubit: usize,
        clbit: usize,
    },
    Initialize {
        qubit: usize,
        state: &'a QubitState,
    },
    Conditional {
        register: &'a ClassicalRegister,
        value: u64,
        body: &'a [Instruction],
    },
}

impl Op<'_> {
    fn is_measure(&self) -> bool {
        matches!(self, Op::Measure { .. })
    }
}

/// A group of shots sharing one measurement history.
struct Branch {
    state: Statevector,
    store: Vec<bool>,
    pc: usize,
    shots: u64,
}

/// Local statevector simulator.
///
/// Shots are not simulated one at a time. At each mid-circuit measurement
/// the branch's shot budget is split binomially between the two outcomes
/// and only outcomes with at least one shot are followed, so a
/// deterministic syndrome measurement costs a single pass. Measurements at
/// the end of the program are sampled directly from the final distribution.
#[derive(Debug, Clone)]
pub struct StatevectorSimulator {
    capabilities: Capabilities,
    seed: Option<u64>,
}

impl StatevectorSimulator {
    /// Create a new simulator with default settings.
    pub fn new() -> Self {
        Self::with_max_qubits(DEFAULT_MAX_QUBITS)
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            capabilities: Capabilities::statevector(max_qubits),
            seed: None,
        }
    }

    /// Fix the sampling seed so repeated runs produce identical counts.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set or clear the sampling seed.
    #[must_use]
    pub fn with_optional_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// The configured seed, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Flatten a circuit into single-qubit measurements and resolved registers.
    fn flatten<'a>(circuit: &'a Circuit) -> HalResult<Vec<Op<'a>>> {
        let mut ops = Vec::with_capacity(circuit.len());
        for inst in circuit.instructions() {
            match &inst.kind {
                InstructionKind::Gate(_) => ops.push(Op::Gate(inst)),
                InstructionKind::Measure => {
                    if inst.qubits.len() != inst.clbits.len() {
                        return Err(HalError::InvalidCircuit(format!(
                            "measure of {} qubits into {} bits",
                            inst.qubits.len(),
                            inst.clbits.len()
                        )));
                    }
                    ops.extend(inst.qubits.iter().zip(&inst.clbits).map(|(q, c)| {
                        Op::Measure {
                            qubit: q.index(),
                            clbit: c.index(),
                        }
                    }));
                }
                InstructionKind::Initialize(state) => ops.push(Op::Initialize {
                    qubit: inst.qubits[0].index(),
                    state,
                }),
                InstructionKind::Barrier => {}
                InstructionKind::Conditional(op) => {
                    let register = circuit.register(&op.register).ok_or_else(|| {
                        HalError::InvalidCircuit(format!(
                            "condition reads undeclared register '{}'",
                            op.register
                        ))
                    })?;
                    ops.push(Op::Conditional {
                        register,
                        value: op.value,
                        body: &op.body,
                    });
                }
            }
        }
        Ok(ops)
    }

    fn apply_gate(state: &mut Statevector, inst: &Instruction) {
        if let Some(gate) = inst.as_gate() {
            let qubits: Vec<usize> = inst.qubits.iter().map(|q| q.index()).collect();
            state.apply_gate(gate, &qubits);
        }
    }

    /// Run one branch to completion, pushing any split-off branches.
    fn run_branch<R: Rng>(
        circuit: &Circuit,
        ops: &[Op<'_>],
        mut branch: Branch,
        pending: &mut Vec<Branch>,
        counts: &mut Counts,
        rng: &mut R,
    ) -> HalResult<()> {
        loop {
            if ops[branch.pc..].iter().all(Op::is_measure) {
                Self::sample_trailing(circuit, &ops[branch.pc..], &branch, counts, rng);
                return Ok(());
            }

            match &ops[branch.pc] {
                Op::Gate(inst) => Self::apply_gate(&mut branch.state, inst),
                Op::Initialize { qubit, state } => {
                    if !branch.state.is_zero(*qubit) {
                        return Err(HalError::InvalidCircuit(format!(
                            "initialize on q{qubit} which is no longer in |0⟩"
                        )));
                    }
                    branch.state.initialize(*qubit, state);
                }
                Op::Conditional {
                    register,
                    value,
                    body,
                } => {
                    if register.value_in(&branch.store) == Some(*value) {
                        trace!(register = register.name(), value, "condition satisfied");
                        for inst in body.iter() {
                            Self::apply_gate(&mut branch.state, inst);
                        }
                    }
                }
                Op::Measure { qubit, clbit } => {
                    let p1 = branch.state.probability_one(*qubit);
                    let ones = if p1 < DETERMINISTIC_EPS {
                        0
                    } else if p1 > 1.0 - DETERMINISTIC_EPS {
                        branch.shots
                    } else {
                        (0..branch.shots).filter(|_| rng.gen_bool(p1)).count() as u64
                    };
                    let zeros = branch.shots - ones;

                    if ones > 0 && zeros > 0 {
                        debug!(qubit, p1, ones, zeros, "measurement splits branch");
                        let mut split = Branch {
                            state: branch.state.clone(),
                            store: branch.store.clone(),
                            pc: branch.pc + 1,
                            shots: ones,
                        };
                        split.state.collapse(*qubit, true);
                        split.store[*clbit] = true;
                        pending.push(split);
                        branch.shots = zeros;
                    }

                    let outcome = zeros == 0;
                    branch.state.collapse(*qubit, outcome);
                    branch.store[*clbit] = outcome;
                }
            }
            branch.pc += 1;
        }
    }

    /// Sample a branch's remaining measurements from its final distribution.
    fn sample_trailing<R: Rng>(
        circuit: &Circuit,
        trailing: &[Op<'_>],
        branch: &Branch,
        counts: &mut Counts,
        rng: &mut R,
    ) {
        if trailing.is_empty() {
            counts.insert(circuit.outcome_key(&branch.store), branch.shots);
            return;
        }

        let mut keys: FxHashMap<String, u64> = FxHashMap::default();
        for (index, n) in branch.state.sample_counts(rng, branch.shots) {
            let mut store = branch.store.clone();
            for op in trailing {
                if let Op::Measure { qubit, clbit } = op {
                    store[*clbit] = (index >> qubit) & 1 == 1;
                }
            }
            *keys.entry(circuit.outcome_key(&store)).or_insert(0) += n;
        }
        for (key, n) in keys {
            counts.insert(key, n);
        }
    }
}

impl Default for StatevectorSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator for StatevectorSimulator {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    #[instrument(skip(self, circuit), fields(circuit_name = circuit.name(), qubits = circuit.num_qubits()))]
    fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        self.validate(circuit, shots)?;
        let start = Instant::now();

        let ops = Self::flatten(circuit)?;
        debug!("Circuit flattened to {} steps", ops.len());

        let mut rng = self.rng();
        let mut counts = Counts::new();
        let mut pending = vec![Branch {
            state: Statevector::new(circuit.num_qubits() as usize),
            store: vec![false; circuit.num_clbits() as usize],
            pc: 0,
            shots: u64::from(shots),
        }];
        let mut branches = 0u64;

        while let Some(branch) = pending.pop() {
            branches += 1;
            Self::run_branch(circuit, &ops, branch, &mut pending, &mut counts, &mut rng)?;
        }

        let elapsed = start.elapsed();
        debug!(branches, "Simulation completed in {:?}", elapsed);

        #[allow(clippy::cast_possible_truncation)]
        let ms = elapsed.as_millis() as u64;
        Ok(ExecutionResult::new(counts, shots)
            .with_execution_time(ms)
            .with_metadata("branches", serde_json::json!(branches)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qecc_ir::{QubitId, StandardGate};

    #[test]
    fn test_simulator_capabilities() {
        let sim = StatevectorSimulator::new();
        let caps = sim.capabilities();

        assert_eq!(caps.max_qubits, 20);
        assert!(caps.has_feature("mid_circuit_measurement"));
    }

    #[test]
    fn test_simulator_bell_state() {
        let sim = StatevectorSimulator::new().with_seed(11);

        let mut circuit = Circuit::with_size("bell", 2);
        circuit.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
        circuit.measure_all().unwrap();
        let result = sim.run(&circuit, 1000).unwrap();
        assert_eq!(result.shots, 1000);

        // Bell state should produce only 00 and 11
        let counts = &result.counts;
        assert!(counts.get("00") + counts.get("11") == 1000);
        assert!(counts.get("01") + counts.get("10") == 0);
        assert!(counts.get("00") > 0 && counts.get("11") > 0);
    }

    #[test]
    fn test_no_registers_gives_empty_key() {
        let sim = StatevectorSimulator::new();
        let mut circuit = Circuit::with_size("idle", 1);
        circuit.h(QubitId(0)).unwrap();
        let result = sim.run(&circuit, 50).unwrap();
        assert_eq!(result.counts.get(""), 50);
    }

    #[test]
    fn test_conditional_fires_on_measured_value() {
        let sim = StatevectorSimulator::new().with_seed(3);

        // Measure |1⟩ into a flag, then flip q1 only when the flag is set.
        let mut circuit = Circuit::with_size("feedforward", 2);
        circuit.add_creg("flag", 1).unwrap();
        circuit.x(QubitId(0)).unwrap();
        circuit.measure([QubitId(0)], "flag").unwrap();
        circuit
            .conditional(
                "flag",
                1,
                vec![Instruction::single_qubit_gate(StandardGate::X, QubitId(1))],
            )
            .unwrap();
        circuit.add_creg("out", 1).unwrap();
        circuit.measure([QubitId(1)], "out").unwrap();

        let result = sim.run(&circuit, 200).unwrap();
        assert_eq!(result.counts.get("1 1"), 200);
        assert_eq!(result.metadata["branches"], 1);
    }

    #[test]
    fn test_mid_circuit_split_keeps_shot_total() {
        let sim = StatevectorSimulator::new().with_seed(5);

        // A random mid-circuit bit copied onto q1 through feed-forward.
        let mut circuit = Circuit::with_size("split", 2);
        circuit.add_creg("coin", 1).unwrap();
        circuit.h(QubitId(0)).unwrap();
        circuit.measure([QubitId(0)], "coin").unwrap();
        circuit
            .conditional(
                "coin",
                1,
                vec![Instruction::single_qubit_gate(StandardGate::X, QubitId(1))],
            )
            .unwrap();
        circuit.measure_all().unwrap();

        let result = sim.run(&circuit, 1000).unwrap();
        let counts = &result.counts;
        assert_eq!(counts.total_shots(), 1000);
        assert_eq!(counts.get("00 0") + counts.get("11 1"), 1000);
        assert!(counts.get("00 0") > 400 && counts.get("11 1") > 400);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let mut circuit = Circuit::with_size("plus", 3);
        for q in 0..3 {
            circuit.h(QubitId(q)).unwrap();
        }
        circuit.measure_all().unwrap();

        let a = StatevectorSimulator::new().with_seed(42).run(&circuit, 500).unwrap();
        let b = StatevectorSimulator::new().with_seed(42).run(&circuit, 500).unwrap();
        assert_eq!(a.counts, b.counts);
    }

    #[test]
    fn test_initialize_requires_fresh_qubit() {
        let sim = StatevectorSimulator::new();
        let mut circuit = Circuit::with_size("stale", 1);
        circuit.x(QubitId(0)).unwrap();
        circuit.initialize(QubitId(0), QubitState::PLUS).unwrap();
        assert!(matches!(
            sim.run(&circuit, 10),
            Err(HalError::InvalidCircuit(_))
        ));
    }

    #[test]
    fn test_initialize_one() {
        let sim = StatevectorSimulator::new();
        let mut circuit = Circuit::with_size("one", 1);
        circuit.initialize(QubitId(0), QubitState::ONE).unwrap();
        circuit.measure_all().unwrap();
        assert_eq!(sim.run(&circuit, 10).unwrap().counts.get("1"), 10);
    }

    #[test]
    fn test_simulator_too_many_qubits() {
        let sim = StatevectorSimulator::with_max_qubits(5);

        let circuit = Circuit::with_size("test", 10);
        let result = sim.run(&circuit, 100);

        assert!(matches!(result, Err(HalError::CircuitTooLarge(_))));
    }

    #[test]
    fn test_zero_shots_rejected() {
        let sim = StatevectorSimulator::new();
        let circuit = Circuit::with_size("test", 1);
        assert!(matches!(sim.run(&circuit, 0), Err(HalError::InvalidShots(_))));
    }
}
