//! Simulator capability introspection.

use serde::{Deserialize, Serialize};

use qecc_ir::StandardGate;

/// Default qubit limit for statevector simulation.
pub const DEFAULT_MAX_QUBITS: u32 = 20;

/// Default per-run shot limit.
pub const DEFAULT_MAX_SHOTS: u32 = 1_000_000;

/// What a simulator can execute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the simulator.
    pub name: String,
    /// Largest circuit width accepted.
    pub max_qubits: u32,
    /// Maximum number of shots per run.
    pub max_shots: u32,
    /// Supported gate names (OpenQASM 3 naming).
    pub gates: Vec<String>,
    /// Additional capability flags, e.g. `"statevector"`,
    /// `"mid_circuit_measurement"`, `"conditional"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// Create capabilities for a statevector simulator.
    pub fn statevector(max_qubits: u32) -> Self {
        Self {
            name: "statevector".into(),
            max_qubits,
            max_shots: DEFAULT_MAX_SHOTS,
            gates: StandardGate::all()
                .iter()
                .map(|g| g.name().to_string())
                .collect(),
            features: vec![
                "statevector".into(),
                "mid_circuit_measurement".into(),
                "conditional".into(),
            ],
        }
    }

    /// Set the shot limit.
    #[must_use]
    pub fn with_max_shots(mut self, max_shots: u32) -> Self {
        self.max_shots = max_shots;
        self
    }

    /// Whether the named gate is supported.
    pub fn supports_gate(&self, name: &str) -> bool {
        self.gates.iter().any(|g| g == name)
    }

    /// Whether a capability flag is set.
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}
