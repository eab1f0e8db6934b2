// Copyright contributors to the openqasm-translator project
// SPDX-License-Identifier: Apache-2.0

// Resolution of (possibly indexed) references to quantum and classical
// resources: a bare name, a subscript, a multi-index selection, a range
// slice, or a concatenation. Quantum references resolve to concrete qubit
// handles; classical references resolve to a variable name plus bit
// positions, which is what assignment and measurement need.

use oq3_ast::ast::{self, IndexIdentifier};
use oq3_ast::Span;
use oq3_classical::ClassicalValue;

use crate::backend::{Backend, Qubit};
use crate::context::Context;
use crate::error::{err, ErrorKind, Result};
use crate::expressions::{compute_expression, expect_i128, normalize_index};
use crate::value::Value;

/// Resolve a reference to a list of concrete qubits. A bare single qubit
/// is coerced into a one-element list.
pub fn resolve_qubits(
    reference: &IndexIdentifier,
    context: &Context,
    circuit: &mut dyn Backend,
) -> Result<Vec<Qubit>> {
    match reference {
        IndexIdentifier::Identifier(identifier) => {
            match context.lookup(identifier.name(), identifier.span())? {
                Value::QubitRegister(register) => Ok(register.qubits()),
                Value::Qubit(qubit) => Ok(vec![*qubit]),
                Value::Qubits(qubits) => Ok(qubits.clone()),
                other => err(
                    ErrorKind::TypeError(format!(
                        "`{}` of type {} is not a quantum resource",
                        identifier.name(),
                        other.type_name()
                    )),
                    identifier.span(),
                ),
            }
        }

        IndexIdentifier::Subscript(subscript) => {
            let index = eval_index(subscript.index(), context, circuit)?;
            let qubits = named_qubits(subscript.name(), context)?;
            let position = normalize_index(
                index,
                qubits.len() as u32,
                subscript.name().name(),
                subscript.span(),
            )?;
            Ok(vec![qubits[position as usize]])
        }

        IndexIdentifier::Selection(selection) => {
            let qubits = named_qubits(selection.name(), context)?;
            let mut selected = Vec::with_capacity(selection.indices().len());
            for index_expr in selection.indices() {
                let index = eval_index(index_expr, context, circuit)?;
                let position = normalize_index(
                    index,
                    qubits.len() as u32,
                    selection.name().name(),
                    selection.span(),
                )?;
                selected.push(qubits[position as usize]);
            }
            Ok(selected)
        }

        IndexIdentifier::Slice(slice) => {
            let qubits = named_qubits(slice.name(), context)?;
            let positions = range_positions(
                slice.range(),
                qubits.len() as u32,
                slice.name().name(),
                context,
                circuit,
                slice.span(),
            )?;
            Ok(positions.iter().map(|&i| qubits[i as usize]).collect())
        }

        IndexIdentifier::Concatenation(concatenation) => {
            let mut qubits = resolve_qubits(concatenation.lhs(), context, circuit)?;
            qubits.extend(resolve_qubits(concatenation.rhs(), context, circuit)?);
            Ok(qubits)
        }
    }
}

fn named_qubits(identifier: &ast::Identifier, context: &Context) -> Result<Vec<Qubit>> {
    match context.lookup(identifier.name(), identifier.span())? {
        Value::QubitRegister(register) => Ok(register.qubits()),
        Value::Qubits(qubits) => Ok(qubits.clone()),
        Value::Qubit(qubit) => Ok(vec![*qubit]),
        other => err(
            ErrorKind::TypeError(format!(
                "`{}` of type {} is not a quantum resource",
                identifier.name(),
                other.type_name()
            )),
            identifier.span(),
        ),
    }
}

/// A classical lvalue: the variable name and, unless the whole variable is
/// meant, the selected bit positions.
#[derive(Clone, Debug, PartialEq)]
pub struct BitsTarget {
    name: String,
    positions: Option<Vec<u32>>,
}

impl BitsTarget {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `None` means the whole variable.
    pub fn positions(&self) -> Option<&[u32]> {
        self.positions.as_deref()
    }
}

/// Resolve a reference used as a measurement destination. The target must
/// name a `bit`-kind variable.
pub fn resolve_bits(
    reference: &IndexIdentifier,
    context: &Context,
    circuit: &mut dyn Backend,
) -> Result<BitsTarget> {
    match reference {
        IndexIdentifier::Identifier(identifier) => {
            bit_array_size(identifier, context)?;
            Ok(BitsTarget {
                name: identifier.name().to_string(),
                positions: None,
            })
        }

        IndexIdentifier::Subscript(subscript) => {
            let size = bit_array_size(subscript.name(), context)?;
            let index = eval_index(subscript.index(), context, circuit)?;
            let position = normalize_index(index, size, subscript.name().name(), subscript.span())?;
            Ok(BitsTarget {
                name: subscript.name().name().to_string(),
                positions: Some(vec![position]),
            })
        }

        IndexIdentifier::Selection(selection) => {
            let size = bit_array_size(selection.name(), context)?;
            let mut positions = Vec::with_capacity(selection.indices().len());
            for index_expr in selection.indices() {
                let index = eval_index(index_expr, context, circuit)?;
                positions.push(normalize_index(
                    index,
                    size,
                    selection.name().name(),
                    selection.span(),
                )?);
            }
            Ok(BitsTarget {
                name: selection.name().name().to_string(),
                positions: Some(positions),
            })
        }

        IndexIdentifier::Slice(slice) => {
            let size = bit_array_size(slice.name(), context)?;
            let positions = range_positions(
                slice.range(),
                size,
                slice.name().name(),
                context,
                circuit,
                slice.span(),
            )?;
            Ok(BitsTarget {
                name: slice.name().name().to_string(),
                positions: Some(positions),
            })
        }

        IndexIdentifier::Concatenation(..) => err(
            ErrorKind::UnsupportedFeature("concatenated classical target".to_string()),
            reference.span(),
        ),
    }
}

fn bit_array_size(identifier: &ast::Identifier, context: &Context) -> Result<u32> {
    match context.lookup(identifier.name(), identifier.span())? {
        Value::Classical(ClassicalValue::BitArray(bits)) => Ok(bits.size()),
        other => err(
            ErrorKind::TypeError(format!(
                "`{}` of type {} is not a bit register",
                identifier.name(),
                other.type_name()
            )),
            identifier.span(),
        ),
    }
}

fn eval_index(
    expr: &ast::Expression,
    context: &Context,
    circuit: &mut dyn Backend,
) -> Result<i128> {
    let value = compute_expression(expr, context, circuit)?;
    expect_i128(&value, expr.span())
}

/// Expand a slice range over a resource of known length into the list of
/// positions it selects. Missing bounds default to `start = 0` and
/// `end = length`; the end bound is exclusive.
pub(crate) fn range_positions(
    range: &ast::RangeDefinition,
    length: u32,
    name: &str,
    context: &Context,
    circuit: &mut dyn Backend,
    span: Option<&Span>,
) -> Result<Vec<u32>> {
    let start = match range.start() {
        Some(expr) => eval_index(expr, context, circuit)?,
        None => 0,
    };
    let end = match range.end() {
        Some(expr) => eval_index(expr, context, circuit)?,
        None => length as i128,
    };
    let step = match range.step() {
        Some(expr) => eval_index(expr, context, circuit)?,
        None => 1,
    };
    if step == 0 {
        return err(
            ErrorKind::TypeError("range step cannot be zero".to_string()),
            span,
        );
    }

    let mut positions = Vec::new();
    let mut i = start;
    while (step > 0 && i < end) || (step < 0 && i > end) {
        positions.push(normalize_index(i, length, name, span)?);
        i += step;
    }
    Ok(positions)
}
