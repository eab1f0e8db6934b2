// Copyright contributors to the openqasm-translator project
// SPDX-License-Identifier: Apache-2.0

// A recording backend. Every call is appended to an operation list in
// program order, which is exactly what the end-to-end tests assert on.
// Subprograms share the gate table with their parent, so a handle minted
// while replaying a gate body is valid in the enclosing program.

use std::cell::RefCell;
use std::rc::Rc;

use crate::backend::{
    Backend, Bit, BitRegister, GateHandle, PrimitiveGate, Qubit, QubitRegister, SubProgram,
};

/// The standard gate set this backend can instantiate by name. `U` is the
/// universal single-qubit gate.
const PRIMITIVE_GATES: &[&str] = &[
    "U", "p", "h", "x", "y", "z", "s", "sdg", "t", "tdg", "sx", "rx", "ry", "rz", "id", "cx", "cy",
    "cz", "ch", "cp", "crx", "cry", "crz", "swap", "ccx", "cswap", "u1", "u2", "u3",
];

/// How a gate handle was produced.
#[derive(Clone, Debug, PartialEq)]
pub enum GateSpec {
    Primitive {
        name: String,
        params: Vec<f64>,
    },
    Phase {
        angle: f64,
    },
    Inverse {
        base: GateHandle,
    },
    Power {
        base: GateHandle,
        exponent: f64,
    },
    Control {
        base: GateHandle,
        num_controls: u32,
        negative: bool,
    },
    /// A replayed gate-definition body.
    Composite {
        name: String,
        params: Vec<f64>,
        ops: Vec<TraceOp>,
    },
}

/// One recorded backend call.
#[derive(Clone, Debug, PartialEq)]
pub enum TraceOp {
    AllocateQubitRegister { name: String, size: u32 },
    AllocateBitRegister { name: String, size: u32 },
    Gate { gate: GateHandle, qubits: Vec<Qubit> },
    Reset { qubits: Vec<Qubit> },
    Barrier { qubits: Vec<Qubit> },
    Measure { qubit: Qubit, bit: Bit },
    GlobalPhase { angle: f64 },
}

#[derive(Debug)]
pub struct TraceBackend {
    gates: Rc<RefCell<Vec<GateSpec>>>,
    ops: Vec<TraceOp>,
    next_register: u32,
}

impl TraceBackend {
    pub fn new() -> TraceBackend {
        TraceBackend {
            gates: Rc::new(RefCell::new(Vec::new())),
            ops: Vec::new(),
            next_register: 0,
        }
    }

    fn nested(gates: Rc<RefCell<Vec<GateSpec>>>) -> TraceBackend {
        TraceBackend {
            gates,
            ops: Vec::new(),
            next_register: 0,
        }
    }

    fn push_gate(&mut self, spec: GateSpec) -> GateHandle {
        let mut table = self.gates.borrow_mut();
        table.push(spec);
        GateHandle::new((table.len() - 1) as u64)
    }

    /// The recorded calls, in program order.
    pub fn ops(&self) -> &[TraceOp] {
        &self.ops
    }

    pub fn gate_spec(&self, gate: GateHandle) -> GateSpec {
        self.gates.borrow()[gate.id() as usize].clone()
    }

    /// The base gate name behind a handle, looking through modifiers.
    pub fn gate_name(&self, gate: GateHandle) -> String {
        let spec = self.gate_spec(gate);
        match spec {
            GateSpec::Primitive { name, .. } | GateSpec::Composite { name, .. } => name,
            GateSpec::Phase { .. } => "gphase".to_string(),
            GateSpec::Inverse { base }
            | GateSpec::Power { base, .. }
            | GateSpec::Control { base, .. } => self.gate_name(base),
        }
    }
}

impl Default for TraceBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for TraceBackend {
    fn allocate_qubit_register(&mut self, size: u32, name: &str) -> QubitRegister {
        let id = self.next_register;
        self.next_register += 1;
        self.ops.push(TraceOp::AllocateQubitRegister {
            name: name.to_string(),
            size,
        });
        QubitRegister::new(id, size, name)
    }

    fn allocate_bit_register(&mut self, size: u32, name: &str) -> BitRegister {
        let id = self.next_register;
        self.next_register += 1;
        self.ops.push(TraceOp::AllocateBitRegister {
            name: name.to_string(),
            size,
        });
        BitRegister::new(id, size)
    }

    fn lookup_primitive(&self, name: &str) -> Option<PrimitiveGate> {
        PRIMITIVE_GATES
            .iter()
            .position(|gate| *gate == name)
            .map(|i| PrimitiveGate::new(i as u32))
    }

    fn primitive_gate(&mut self, primitive: PrimitiveGate, params: &[f64]) -> GateHandle {
        let name = PRIMITIVE_GATES[primitive.id() as usize].to_string();
        self.push_gate(GateSpec::Primitive {
            name,
            params: params.to_vec(),
        })
    }

    fn append_gate(&mut self, gate: GateHandle, qubits: &[Qubit]) {
        self.ops.push(TraceOp::Gate {
            gate,
            qubits: qubits.to_vec(),
        });
    }

    fn reset(&mut self, qubits: &[Qubit]) {
        self.ops.push(TraceOp::Reset {
            qubits: qubits.to_vec(),
        });
    }

    fn barrier(&mut self, qubits: &[Qubit]) {
        self.ops.push(TraceOp::Barrier {
            qubits: qubits.to_vec(),
        });
    }

    fn measure(&mut self, qubit: Qubit, bit: Bit) {
        self.ops.push(TraceOp::Measure { qubit, bit });
    }

    fn add_global_phase(&mut self, angle: f64) {
        self.ops.push(TraceOp::GlobalPhase { angle });
    }

    fn phase_gate(&mut self, angle: f64) -> GateHandle {
        self.push_gate(GateSpec::Phase { angle })
    }

    fn inverse_gate(&mut self, gate: GateHandle) -> GateHandle {
        self.push_gate(GateSpec::Inverse { base: gate })
    }

    fn power_gate(&mut self, gate: GateHandle, exponent: f64) -> GateHandle {
        self.push_gate(GateSpec::Power {
            base: gate,
            exponent,
        })
    }

    fn control_gate(&mut self, gate: GateHandle, num_controls: u32, negative: bool) -> GateHandle {
        self.push_gate(GateSpec::Control {
            base: gate,
            num_controls,
            negative,
        })
    }

    fn build_subprogram(&mut self, _qubit_count: u32) -> Box<dyn SubProgram> {
        Box::new(TraceSubProgram {
            backend: TraceBackend::nested(Rc::clone(&self.gates)),
        })
    }
}

struct TraceSubProgram {
    backend: TraceBackend,
}

impl SubProgram for TraceSubProgram {
    fn backend(&mut self) -> &mut dyn Backend {
        &mut self.backend
    }

    fn into_gate(self: Box<Self>, name: &str, params: &[f64]) -> GateHandle {
        let TraceBackend { gates, ops, .. } = self.backend;
        let mut table = gates.borrow_mut();
        table.push(GateSpec::Composite {
            name: name.to_string(),
            params: params.to_vec(),
            ops,
        });
        GateHandle::new((table.len() - 1) as u64)
    }
}
