// Copyright contributors to the openqasm-translator project
// SPDX-License-Identifier: Apache-2.0

// The boundary with the external circuit-building backend, and with include
// resolution. The translator calls exactly the capabilities listed on the
// `Backend` trait and treats every handle as opaque; how registers, gates
// and subprograms are actually represented is the implementor's business.

use hashbrown::HashMap;
use oq3_ast::ast::Program;
use std::path::PathBuf;

/// A backend qubit register of known width. The translator keeps one live
/// handle per declared name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QubitRegister {
    id: u32,
    size: u32,
    name: String,
}

impl QubitRegister {
    pub fn new(id: u32, size: u32, name: impl ToString) -> QubitRegister {
        QubitRegister {
            id,
            size,
            name: name.to_string(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The qubit at `index`; the caller checks bounds.
    pub fn qubit(&self, index: u32) -> Qubit {
        Qubit {
            register: self.id,
            index,
        }
    }

    pub fn qubits(&self) -> Vec<Qubit> {
        (0..self.size).map(|i| self.qubit(i)).collect()
    }
}

/// One qubit of a register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Qubit {
    register: u32,
    index: u32,
}

impl Qubit {
    pub fn new(register: u32, index: u32) -> Qubit {
        Qubit { register, index }
    }

    pub fn register(&self) -> u32 {
        self.register
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

/// A backend classical register, attached to a `bit[n]` variable the first
/// time it is used as a measurement destination and never re-sized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitRegister {
    id: u32,
    size: u32,
}

impl BitRegister {
    pub fn new(id: u32, size: u32) -> BitRegister {
        BitRegister { id, size }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn bit(&self, index: u32) -> Bit {
        Bit {
            register: self.id,
            index,
        }
    }
}

/// One bit of a classical register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bit {
    register: u32,
    index: u32,
}

impl Bit {
    pub fn new(register: u32, index: u32) -> Bit {
        Bit { register, index }
    }

    pub fn register(&self) -> u32 {
        self.register
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

/// Opaque handle to an instantiated gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GateHandle(u64);

impl GateHandle {
    pub fn new(id: u64) -> GateHandle {
        GateHandle(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Opaque token for a builtin gate the backend can instantiate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PrimitiveGate(u32);

impl PrimitiveGate {
    pub fn new(id: u32) -> PrimitiveGate {
        PrimitiveGate(id)
    }

    pub fn id(&self) -> u32 {
        self.0
    }
}

/// The capabilities the translator needs from a circuit builder.
pub trait Backend {
    fn allocate_qubit_register(&mut self, size: u32, name: &str) -> QubitRegister;
    fn allocate_bit_register(&mut self, size: u32, name: &str) -> BitRegister;

    /// Look up a builtin gate by name, e.g. the universal single-qubit
    /// gate `U`. Returns `None` for names the backend does not provide.
    fn lookup_primitive(&self, name: &str) -> Option<PrimitiveGate>;

    /// Instantiate a builtin gate with concrete numeric parameters.
    fn primitive_gate(&mut self, primitive: PrimitiveGate, params: &[f64]) -> GateHandle;

    fn append_gate(&mut self, gate: GateHandle, qubits: &[Qubit]);
    fn reset(&mut self, qubits: &[Qubit]);
    fn barrier(&mut self, qubits: &[Qubit]);
    fn measure(&mut self, qubit: Qubit, bit: Bit);

    fn add_global_phase(&mut self, angle: f64);
    fn phase_gate(&mut self, angle: f64) -> GateHandle;

    fn inverse_gate(&mut self, gate: GateHandle) -> GateHandle;
    fn power_gate(&mut self, gate: GateHandle, exponent: f64) -> GateHandle;
    fn control_gate(&mut self, gate: GateHandle, num_controls: u32, negative: bool) -> GateHandle;

    /// Start a fresh subprogram of the given qubit arity, used to replay a
    /// gate definition's body.
    fn build_subprogram(&mut self, qubit_count: u32) -> Box<dyn SubProgram>;
}

/// A subprogram under construction. Exposes its own `Backend` for the body
/// statements and is consumed into a gate handle valid in the parent.
pub trait SubProgram {
    fn backend(&mut self) -> &mut dyn Backend;
    fn into_gate(self: Box<Self>, name: &str, params: &[f64]) -> GateHandle;
}

/// Resolution of `include "file";` statements: maps a file name to an
/// already-parsed program. Reading and parsing files is outside the core;
/// a resolver that fails reports the directories it searched.
pub trait IncludeResolver {
    fn resolve(&self, file_path: &str) -> Option<Program>;
    fn search_paths(&self) -> &[PathBuf];
}

/// An in-memory resolver over pre-parsed programs, keyed by file name.
#[derive(Debug, Default)]
pub struct StaticIncludes {
    programs: HashMap<String, Program>,
    search_paths: Vec<PathBuf>,
}

impl StaticIncludes {
    pub fn new() -> StaticIncludes {
        StaticIncludes::default()
    }

    pub fn with_search_paths(search_paths: Vec<PathBuf>) -> StaticIncludes {
        StaticIncludes {
            programs: HashMap::new(),
            search_paths,
        }
    }

    pub fn insert(&mut self, file_path: impl ToString, program: Program) {
        self.programs.insert(file_path.to_string(), program);
    }
}

impl IncludeResolver for StaticIncludes {
    fn resolve(&self, file_path: &str) -> Option<Program> {
        self.programs.get(file_path).cloned()
    }

    fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }
}
