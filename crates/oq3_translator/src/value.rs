// Copyright contributors to the openqasm-translator project
// SPDX-License-Identifier: Apache-2.0

// The runtime value space threaded through the evaluator: untyped literal
// values, sized classical values, backend resources, and gate callables.

use hashbrown::HashMap;
use oq3_ast::ast::Statement;
use oq3_classical::{ClassicalValue, Raw};
use std::rc::Rc;

use crate::backend::{GateHandle, PrimitiveGate, Qubit, QubitRegister};
use crate::context::Context;

#[derive(Clone, Debug)]
pub enum Value {
    /// An untyped value from a literal expression.
    Raw(Raw),
    /// A sized classical value.
    Classical(ClassicalValue),
    /// A backend qubit register, bound by a qubit declaration.
    QubitRegister(QubitRegister),
    /// A single resolved qubit.
    Qubit(Qubit),
    /// A resolved list of qubits (selection, slice, concatenation).
    Qubits(Vec<Qubit>),
    /// A callable gate: backend primitive or user definition.
    Gate(GateCallable),
    /// An instantiated gate handle, as returned by a gate-name call.
    GateInstance(GateHandle),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Raw(raw) => raw.type_name(),
            Value::Classical(value) => value.type_name(),
            Value::QubitRegister(..) => "qubit register",
            Value::Qubit(..) => "qubit",
            Value::Qubits(..) => "qubit list",
            Value::Gate(..) => "gate",
            Value::GateInstance(..) => "gate instance",
        }
    }
}

#[derive(Clone, Debug)]
pub enum GateCallable {
    /// A builtin gate the backend knows how to instantiate.
    Primitive {
        name: String,
        primitive: PrimitiveGate,
    },
    /// A gate defined in the program; reference-counted so that clones of
    /// the defining scope stay cheap.
    Defined(Rc<GateClosure>),
}

impl GateCallable {
    pub fn name(&self) -> &str {
        match self {
            GateCallable::Primitive { name, .. } => name,
            GateCallable::Defined(closure) => closure.name(),
        }
    }
}

/// A gate definition captured at the point it was processed: formal
/// parameter names, qubit parameter names with their positions, the body
/// statements, and a snapshot of the scope the definition could see.
/// The body is *not* executed at definition time; invoking the closure
/// replays it against a fresh backend subprogram.
#[derive(Clone, Debug)]
pub struct GateClosure {
    name: String,
    params: Vec<String>,
    qubits: Vec<String>,
    qubit_index: HashMap<String, usize>,
    body: Vec<Statement>,
    captured: Context,
}

impl GateClosure {
    pub fn new(
        name: impl ToString,
        params: Vec<String>,
        qubits: Vec<String>,
        body: Vec<Statement>,
        captured: Context,
    ) -> GateClosure {
        let qubit_index = qubits
            .iter()
            .enumerate()
            .map(|(position, name)| (name.clone(), position))
            .collect();
        GateClosure {
            name: name.to_string(),
            params,
            qubits,
            qubit_index,
            body,
            captured,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn qubits(&self) -> &[String] {
        &self.qubits
    }

    /// Position of a formal qubit parameter within the gate's operand list.
    pub fn qubit_position(&self, name: &str) -> Option<usize> {
        self.qubit_index.get(name).copied()
    }

    pub fn body(&self) -> &[Statement] {
        &self.body
    }

    pub fn captured(&self) -> &Context {
        &self.captured
    }
}
