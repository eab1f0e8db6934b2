// Copyright contributors to the openqasm-translator project
// SPDX-License-Identifier: Apache-2.0

// The statement interpreter. One processing function per statement kind,
// dispatched from `process_statement`; every kind without a processing
// function fails `UnsupportedFeature` naming the kind, which makes the
// supported language subset explicit.
//
// Failures are fatal to the statement being processed and propagate to the
// caller. Effects already committed to the backend by earlier statements
// are not rolled back.

use hashbrown::HashMap;
use oq3_ast::ast::{self, Expression, Statement};
use oq3_ast::Span;
use oq3_classical::{Angle, BitArray, ClassicalValue, Raw, SignedInt, UnsignedInt};
use std::rc::Rc;

use crate::backend::{Backend, BitRegister, GateHandle, IncludeResolver};
use crate::context::Context;
use crate::error::{err, ErrorKind, Result, TranslationError};
use crate::expressions::{
    apply_binary_operator, as_f64, binary_op_kind, cast_source, compute_expression, expect_i128,
    expect_width, truthy,
};
use crate::identifiers::{range_positions, resolve_bits, resolve_qubits};
use crate::modifiers::apply_modifier;
use crate::value::{GateCallable, GateClosure, Value};

/// Translates a program tree into calls on a circuit backend.
pub struct Translator {
    includes: Option<Box<dyn IncludeResolver>>,
}

impl Translator {
    pub fn new() -> Translator {
        Translator { includes: None }
    }

    /// Use `resolver` for `include "file";` statements.
    pub fn with_includes(resolver: Box<dyn IncludeResolver>) -> Translator {
        Translator {
            includes: Some(resolver),
        }
    }

    /// Interpret every top-level statement of `program`, in order, against
    /// `circuit`. Returns the final program-scope context; aborts on the
    /// first failure.
    pub fn translate(&self, program: &ast::Program, circuit: &mut dyn Backend) -> Result<Context> {
        let mut context = Context::new();
        let mut state = TranslationState {
            includes: self.includes.as_deref(),
            measurement_registers: HashMap::new(),
        };
        for stmt in program.statements() {
            process_statement(stmt, circuit, &mut context, &mut state)?;
        }
        Ok(context)
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-translation mutable state that is not lexically scoped: the include
/// resolver and the classical registers attached to measurement targets
/// (one per name, allocated at first use, never re-sized).
struct TranslationState<'a> {
    includes: Option<&'a dyn IncludeResolver>,
    measurement_registers: HashMap<String, BitRegister>,
}

fn process_statement(
    stmt: &Statement,
    circuit: &mut dyn Backend,
    context: &mut Context,
    state: &mut TranslationState<'_>,
) -> Result<()> {
    match stmt {
        Statement::QubitDeclaration(decl) => process_qubit_declaration(decl, circuit, context),
        Statement::ClassicalDeclaration(decl) => {
            process_classical_declaration(decl, circuit, context)
        }
        Statement::ConstantDeclaration(decl) => {
            process_constant_declaration(decl, circuit, context)
        }
        Statement::ClassicalAssignment(assignment) => {
            process_classical_assignment(assignment, circuit, context)
        }
        Statement::GateCall(gate) => process_gate_call(gate, circuit, context),
        Statement::GateDefinition(definition) => process_gate_definition(definition, context),
        Statement::Reset(reset) => {
            let mut qubits = Vec::new();
            for reference in reset.qubits() {
                qubits.extend(resolve_qubits(reference, context, circuit)?);
            }
            circuit.reset(&qubits);
            Ok(())
        }
        Statement::Barrier(barrier) => {
            let mut qubits = Vec::new();
            for reference in barrier.qubits() {
                qubits.extend(resolve_qubits(reference, context, circuit)?);
            }
            circuit.barrier(&qubits);
            Ok(())
        }
        Statement::MeasurementAssignment(measurement) => {
            process_measurement_assignment(measurement, circuit, context, state)
        }
        Statement::Phase(phase) => process_quantum_phase(phase, circuit, context),
        Statement::Branch(branch) => process_branch(branch, circuit, context, state),
        Statement::ForIn(for_in) => process_for_in(for_in, circuit, context, state),
        Statement::Include(include) => process_include(include, circuit, context, state),
        Statement::ExprStmt(expr) => {
            compute_expression(expr, context, circuit)?;
            Ok(())
        }
        // Directives carry no translatable semantics.
        Statement::Pragma(..) => Ok(()),

        unsupported => err(
            ErrorKind::UnsupportedFeature(unsupported.kind_name().to_string()),
            unsupported.span(),
        ),
    }
}

fn eval_width(
    designator: Option<&Expression>,
    context: &Context,
    circuit: &mut dyn Backend,
) -> Result<Option<u32>> {
    match designator {
        Some(expr) => {
            let value = compute_expression(expr, context, circuit)?;
            Ok(Some(expect_width(&value, expr.span())?))
        }
        None => Ok(None),
    }
}

fn process_qubit_declaration(
    decl: &ast::QubitDeclaration,
    circuit: &mut dyn Backend,
    context: &mut Context,
) -> Result<()> {
    let size = eval_width(decl.designator(), context, circuit)?.unwrap_or(1);
    let name = decl.qubit().name();
    let register = circuit.allocate_qubit_register(size, name);
    context.bind(name, Value::QubitRegister(register), decl.span().copied());
    Ok(())
}

fn process_classical_declaration(
    decl: &ast::ClassicalDeclaration,
    circuit: &mut dyn Backend,
    context: &mut Context,
) -> Result<()> {
    let name = decl.identifier().name();
    let span = decl.span();
    let width = eval_width(decl.get_type().designator(), context, circuit)?;

    match decl.get_type() {
        // A bit declaration is register-like: it binds a zero value
        // immediately so its width is known when it becomes a measurement
        // target.
        ast::ClassicalType::Bit { .. } => {
            let size = width.unwrap_or(1);
            let bits = match decl.init_expression() {
                None => BitArray::zeros(size).map_err(|e| TranslationError::from_value(e, span))?,
                Some(init) => {
                    let value = compute_expression(init, context, circuit)?;
                    let source = cast_source(&value, init.span())?;
                    BitArray::cast(&source, Some(size))
                        .map_err(|e| TranslationError::from_value(e, init.span()))?
                }
            };
            context.bind(name, Value::Classical(bits.to_value()), span.copied());
            Ok(())
        }

        ast::ClassicalType::Int { .. }
        | ast::ClassicalType::UInt { .. }
        | ast::ClassicalType::Angle { .. } => match decl.init_expression() {
            None => {
                context.declare(name, span.copied());
                Ok(())
            }
            Some(init) => {
                let value = compute_expression(init, context, circuit)?;
                let source = cast_source(&value, init.span())?;
                let map = |e| TranslationError::from_value(e, init.span());
                let constructed = match decl.get_type() {
                    ast::ClassicalType::Int { .. } => {
                        SignedInt::cast(&source, width).map_err(map)?.to_value()
                    }
                    ast::ClassicalType::UInt { .. } => {
                        UnsignedInt::cast(&source, width).map_err(map)?.to_value()
                    }
                    // An unsized angle gets the machine width.
                    ast::ClassicalType::Angle { .. } => Angle::cast(&source, width.or(Some(32)))
                        .map_err(map)?
                        .to_value(),
                    _ => unreachable!(),
                };
                context.bind(name, Value::Classical(constructed), span.copied());
                Ok(())
            }
        },

        // float is passthrough; bool stays raw.
        ast::ClassicalType::Float { .. } => match decl.init_expression() {
            None => {
                context.declare(name, span.copied());
                Ok(())
            }
            Some(init) => {
                let value = compute_expression(init, context, circuit)?;
                let float = as_f64(&value, init.span())?;
                context.bind(name, Value::Raw(Raw::Float(float)), span.copied());
                Ok(())
            }
        },
        ast::ClassicalType::Bool => match decl.init_expression() {
            None => {
                context.declare(name, span.copied());
                Ok(())
            }
            Some(init) => {
                let value = compute_expression(init, context, circuit)?;
                let condition = truthy(&value, init.span())?;
                context.bind(name, Value::Raw(Raw::Bool(condition)), span.copied());
                Ok(())
            }
        },

        other => err(
            ErrorKind::UnsupportedFeature(format!("declaration of type `{}`", other.name())),
            span,
        ),
    }
}

fn process_constant_declaration(
    decl: &ast::ConstantDeclaration,
    circuit: &mut dyn Backend,
    context: &mut Context,
) -> Result<()> {
    let name = decl.identifier().name();
    match decl.init_expression() {
        None => {
            context.declare(name, decl.span().copied());
            Ok(())
        }
        Some(init) => {
            // Constants bind the evaluated value as-is; a raw literal stays
            // raw until a sized declaration or cast gives it a width.
            let value = compute_expression(init, context, circuit)?;
            context.bind(name, value, decl.span().copied());
            Ok(())
        }
    }
}

fn process_classical_assignment(
    assignment: &ast::ClassicalAssignment,
    circuit: &mut dyn Backend,
    context: &mut Context,
) -> Result<()> {
    let rvalue = compute_expression(assignment.rvalue(), context, circuit)?;
    let compound = match assignment.op().binary_op() {
        None => None,
        Some(op) => Some(binary_op_kind(&op).ok_or_else(|| {
            TranslationError::new(
                ErrorKind::UnsupportedExpressionType(format!(
                    "compound assignment `{}`",
                    assignment.op().symbol()
                )),
                assignment.span().copied(),
            )
        })?),
    };

    match assignment.lvalue() {
        ast::IndexIdentifier::Identifier(identifier) => {
            let name = identifier.name();
            match compound {
                None => assign_named(context, name, rvalue, identifier.span()),
                Some(op) => {
                    let current = context.lookup(name, identifier.span())?.clone();
                    let result =
                        apply_binary_operator(op, &current, &rvalue, assignment.span())?;
                    context.rebind(name, result, identifier.span())
                }
            }
        }

        ast::IndexIdentifier::Subscript(subscript) => {
            let name = subscript.name().name();
            let index_value = compute_expression(subscript.index(), context, circuit)?;
            let index = expect_i128(&index_value, subscript.index().span())?;
            let mut current = lookup_classical(context, name, subscript.name().span())?;
            let position = i64::try_from(index).map_err(|_| {
                TranslationError::new(
                    ErrorKind::IndexOutOfRange {
                        name: name.to_string(),
                        index,
                        size: current.size(),
                    },
                    subscript.span().copied(),
                )
            })?;
            let bit = match compound {
                None => bit_from_value(&rvalue, assignment.span())?,
                Some(op) => {
                    let existing = current
                        .index(position)
                        .map_err(|e| TranslationError::from_value(e, subscript.span()))?;
                    let result = apply_binary_operator(
                        op,
                        &Value::Classical(existing),
                        &rvalue,
                        assignment.span(),
                    )?;
                    bit_from_value(&result, assignment.span())?
                }
            };
            current
                .index_assign(position, bit)
                .map_err(|e| TranslationError::from_value(e, assignment.span()))?;
            context.rebind(name, Value::Classical(current), subscript.span())
        }

        ast::IndexIdentifier::Selection(selection) if compound.is_none() => {
            let name = selection.name().name();
            let current = lookup_classical(context, name, selection.name().span())?;
            let mut positions = Vec::with_capacity(selection.indices().len());
            for index_expr in selection.indices() {
                let value = compute_expression(index_expr, context, circuit)?;
                let index = expect_i128(&value, index_expr.span())?;
                positions.push(crate::expressions::normalize_index(
                    index,
                    current.size(),
                    name,
                    selection.span(),
                )?);
            }
            assign_bit_positions(context, name, current, &positions, &rvalue, assignment.span())
        }

        ast::IndexIdentifier::Slice(slice) if compound.is_none() => {
            let name = slice.name().name();
            let current = lookup_classical(context, name, slice.name().span())?;
            let positions = range_positions(
                slice.range(),
                current.size(),
                name,
                context,
                circuit,
                slice.span(),
            )?;
            assign_bit_positions(context, name, current, &positions, &rvalue, assignment.span())
        }

        other => err(
            ErrorKind::UnsupportedFeature(format!("{} assignment target", other.kind_name())),
            other.span(),
        ),
    }
}

/// Plain assignment to a named variable. If the variable currently holds a
/// sized classical value the strict assignment rules apply: same kind, no
/// wider, or an explicit cast. Anything else simply rebinds.
fn assign_named(
    context: &mut Context,
    name: &str,
    rvalue: Value,
    use_site: Option<&Span>,
) -> Result<()> {
    let holds_classical = matches!(
        context.binding(name).and_then(|b| b.value()),
        Some(Value::Classical(..))
    );
    if !holds_classical {
        return context.rebind(name, rvalue, use_site);
    }
    let mut current = lookup_classical(context, name, use_site)?;
    match &rvalue {
        Value::Classical(source) => current
            .set_value(source)
            .map_err(|e| TranslationError::from_value(e, use_site))?,
        Value::Raw(raw) => current
            .set_raw(raw)
            .map_err(|e| TranslationError::from_value(e, use_site))?,
        other => {
            return err(
                ErrorKind::TypeError(format!(
                    "cannot assign a {} to `{name}`",
                    other.type_name()
                )),
                use_site,
            )
        }
    }
    context.rebind(name, Value::Classical(current), use_site)
}

fn lookup_classical(
    context: &Context,
    name: &str,
    use_site: Option<&Span>,
) -> Result<ClassicalValue> {
    match context.lookup(name, use_site)? {
        Value::Classical(value) => Ok(value.clone()),
        other => err(
            ErrorKind::TypeError(format!(
                "`{name}` of type {} is not a classical variable",
                other.type_name()
            )),
            use_site,
        ),
    }
}

/// A one-bit reading of an evaluated value.
fn bit_from_value(value: &Value, span: Option<&Span>) -> Result<u128> {
    let bit = match value {
        Value::Raw(Raw::Int(i)) if (0..=1).contains(i) => *i as u128,
        Value::Raw(Raw::Bool(b)) => *b as u128,
        Value::Classical(classical) if classical.encoding() <= 1 => classical.encoding(),
        _ => {
            return err(
                ErrorKind::TypeError(format!(
                    "expected a one-bit value, found {}",
                    value.type_name()
                )),
                span,
            )
        }
    };
    Ok(bit)
}

/// Write `rvalue` across the selected bit positions of a classical
/// variable, bit 0 of the source going to the first position.
fn assign_bit_positions(
    context: &mut Context,
    name: &str,
    mut current: ClassicalValue,
    positions: &[u32],
    rvalue: &Value,
    span: Option<&Span>,
) -> Result<()> {
    let source_bits: Vec<u128> = match rvalue {
        Value::Classical(classical) if classical.size() as usize == positions.len() => (0
            ..positions.len())
            .map(|i| (classical.encoding() >> i) & 1)
            .collect(),
        Value::Raw(Raw::Str(bits)) if bits.chars().count() == positions.len() => {
            let parsed = BitArray::new(positions.len() as u32, bits)
                .map_err(|e| TranslationError::from_value(e, span))?;
            (0..positions.len())
                .map(|i| (parsed.as_unsigned() >> i) & 1)
                .collect()
        }
        _ => {
            return err(
                ErrorKind::TypeError(format!(
                    "cannot assign {} to {} selected bit(s) of `{name}`",
                    rvalue.type_name(),
                    positions.len()
                )),
                span,
            )
        }
    };
    for (&position, bit) in positions.iter().zip(source_bits) {
        current
            .index_assign(position as i64, bit)
            .map_err(|e| TranslationError::from_value(e, span))?;
    }
    context.rebind(name, Value::Classical(current), span)
}

fn process_gate_call(
    gate: &ast::QuantumGate,
    circuit: &mut dyn Backend,
    context: &mut Context,
) -> Result<()> {
    let name = gate.name().name();
    let mut arguments = Vec::with_capacity(gate.arguments().len());
    for arg in gate.arguments() {
        arguments.push(compute_expression(arg, context, circuit)?);
    }

    let callable = lookup_gate_callable(context, circuit, name, gate.name().span())?;
    if let GateCallable::Defined(closure) = &callable {
        if closure.qubits().len() != gate.qubits().len() {
            return err(
                ErrorKind::NumGateQubits {
                    name: name.to_string(),
                    expected: closure.qubits().len(),
                    actual: gate.qubits().len(),
                },
                gate.span(),
            );
        }
    }

    let mut handle = instantiate_gate(&callable, &arguments, circuit, gate.span())?;
    for modifier in gate.modifiers() {
        handle = apply_modifier(handle, modifier, context, circuit)?;
    }

    let mut qubits = Vec::new();
    for reference in gate.qubits() {
        qubits.extend(resolve_qubits(reference, context, circuit)?);
    }
    circuit.append_gate(handle, &qubits);
    Ok(())
}

/// Find the callable for a gate name: the context first, then the
/// backend's builtin table. An unknown name keeps the original
/// `UndefinedSymbol` failure.
fn lookup_gate_callable(
    context: &Context,
    circuit: &mut dyn Backend,
    name: &str,
    span: Option<&Span>,
) -> Result<GateCallable> {
    match context.lookup(name, span) {
        Ok(Value::Gate(callable)) => Ok(callable.clone()),
        Ok(other) => err(
            ErrorKind::TypeError(format!(
                "`{name}` of type {} is not a gate",
                other.type_name()
            )),
            span,
        ),
        Err(error) => match error.kind() {
            ErrorKind::UndefinedSymbol(..) => match circuit.lookup_primitive(name) {
                Some(primitive) => Ok(GateCallable::Primitive {
                    name: name.to_string(),
                    primitive,
                }),
                None => Err(error),
            },
            _ => Err(error),
        },
    }
}

/// Instantiate a callable with evaluated arguments: a primitive goes
/// straight to the backend; a defined gate replays its body against a
/// fresh subprogram in a scope derived from its captured context.
pub(crate) fn instantiate_gate(
    callable: &GateCallable,
    arguments: &[Value],
    circuit: &mut dyn Backend,
    span: Option<&Span>,
) -> Result<GateHandle> {
    match callable {
        GateCallable::Primitive { primitive, .. } => {
            let mut params = Vec::with_capacity(arguments.len());
            for argument in arguments {
                params.push(as_f64(argument, span)?);
            }
            Ok(circuit.primitive_gate(*primitive, &params))
        }

        GateCallable::Defined(closure) => {
            if arguments.len() != closure.params().len() {
                return err(
                    ErrorKind::NumGateParams {
                        name: closure.name().to_string(),
                        expected: closure.params().len(),
                        actual: arguments.len(),
                    },
                    span,
                );
            }
            let mut scope = closure.captured().derived_scope();
            for (param, argument) in closure.params().iter().zip(arguments) {
                scope.bind(param, argument.clone(), None);
            }

            let mut params = Vec::with_capacity(arguments.len());
            for argument in arguments {
                params.push(as_f64(argument, span)?);
            }

            let mut sub = circuit.build_subprogram(closure.qubits().len() as u32);
            {
                let sub_backend = sub.backend();
                for qubit_name in closure.qubits() {
                    let register = sub_backend.allocate_qubit_register(1, qubit_name);
                    scope.bind(qubit_name, Value::QubitRegister(register), None);
                }
                let mut sub_state = TranslationState {
                    includes: None,
                    measurement_registers: HashMap::new(),
                };
                for stmt in closure.body() {
                    process_statement(stmt, sub_backend, &mut scope, &mut sub_state)?;
                }
            }
            Ok(sub.into_gate(closure.name(), &params))
        }
    }
}

/// Gate definitions bind a closure; the body is not executed here.
fn process_gate_definition(
    definition: &ast::QuantumGateDefinition,
    context: &mut Context,
) -> Result<()> {
    let name = definition.name().name();
    let params: Vec<String> = definition
        .arguments()
        .iter()
        .map(|arg| arg.name().to_string())
        .collect();
    let qubits: Vec<String> = definition
        .qubits()
        .iter()
        .map(|qubit| qubit.name().to_string())
        .collect();
    let closure = GateClosure::new(
        name,
        params,
        qubits,
        definition.body().to_vec(),
        context.derived_scope(),
    );
    context.bind(
        name,
        Value::Gate(GateCallable::Defined(Rc::new(closure))),
        definition.span().copied(),
    );
    Ok(())
}

fn process_measurement_assignment(
    measurement: &ast::QuantumMeasurementAssignment,
    circuit: &mut dyn Backend,
    context: &mut Context,
    state: &mut TranslationState<'_>,
) -> Result<()> {
    let target = resolve_bits(measurement.lhs(), context, circuit)?;
    let qubits = resolve_qubits(
        measurement.measure_instruction().qubit(),
        context,
        circuit,
    )?;

    let size = match context.lookup(target.name(), measurement.span())? {
        Value::Classical(ClassicalValue::BitArray(bits)) => bits.size(),
        _ => unreachable!("resolve_bits checked the target kind"),
    };

    // Attach the backend register the first time this variable is used as
    // a measurement destination; its width is fixed to the variable's.
    let register = *state
        .measurement_registers
        .entry(target.name().to_string())
        .or_insert_with(|| circuit.allocate_bit_register(size, target.name()));

    let positions: Vec<u32> = match target.positions() {
        Some(positions) => positions.to_vec(),
        None => (0..size).collect(),
    };
    if positions.len() != qubits.len() {
        return err(
            ErrorKind::TypeError(format!(
                "cannot measure {} qubit(s) into {} bit(s) of `{}`",
                qubits.len(),
                positions.len(),
                target.name()
            )),
            measurement.span(),
        );
    }
    for (qubit, position) in qubits.iter().zip(positions) {
        circuit.measure(*qubit, register.bit(position));
    }
    Ok(())
}

fn process_quantum_phase(
    phase: &ast::QuantumPhase,
    circuit: &mut dyn Backend,
    context: &mut Context,
) -> Result<()> {
    let argument = compute_expression(phase.argument(), context, circuit)?;
    let angle = as_f64(&argument, phase.argument().span())?;

    let mut qubits = Vec::new();
    for reference in phase.qubits() {
        qubits.extend(resolve_qubits(reference, context, circuit)?);
    }

    match qubits.len() {
        0 => {
            if !phase.modifiers().is_empty() {
                return err(
                    ErrorKind::UnsupportedFeature("modified global phase".to_string()),
                    phase.span(),
                );
            }
            circuit.add_global_phase(angle);
            Ok(())
        }
        1 => {
            let mut handle = circuit.phase_gate(angle);
            for modifier in phase.modifiers() {
                handle = apply_modifier(handle, modifier, context, circuit)?;
            }
            circuit.append_gate(handle, &qubits);
            Ok(())
        }
        _ => err(
            ErrorKind::UnsupportedFeature("quantum phase on more than one qubit".to_string()),
            phase.span(),
        ),
    }
}

/// Branch bodies run against the current scope: they see and mutate the
/// enclosing bindings directly.
fn process_branch(
    branch: &ast::BranchingStatement,
    circuit: &mut dyn Backend,
    context: &mut Context,
    state: &mut TranslationState<'_>,
) -> Result<()> {
    let condition = compute_expression(branch.condition(), context, circuit)?;
    let block = if truthy(&condition, branch.condition().span())? {
        branch.if_block()
    } else {
        match branch.else_block() {
            Some(block) => block,
            None => return Ok(()),
        }
    };
    for stmt in block {
        process_statement(stmt, circuit, context, state)?;
    }
    Ok(())
}

fn process_for_in(
    for_in: &ast::ForInLoop,
    circuit: &mut dyn Backend,
    context: &mut Context,
    state: &mut TranslationState<'_>,
) -> Result<()> {
    let loop_var = for_in.loop_variable().name();
    let items = iterable_items(for_in.set_declaration(), context, circuit, for_in.span())?;

    // The loop body runs in a derived scope; the loop variable is rebound
    // each iteration in that same scope object.
    let outer_names = context.symbol_names();
    let mut loop_scope = context.derived_scope();
    loop_scope.declare(loop_var, for_in.loop_variable().span().copied());

    for item in items {
        loop_scope.rebind(loop_var, item, for_in.loop_variable().span())?;
        for stmt in for_in.block() {
            process_statement(stmt, circuit, &mut loop_scope, state)?;
        }
    }

    // Updates to names that already existed outside flow back; the loop
    // variable and inner declarations do not.
    for name in outer_names {
        if name == loop_var {
            continue;
        }
        if let Some(value) = loop_scope.binding(&name).and_then(|b| b.value()) {
            let value = value.clone();
            let _ = context.rebind(&name, value, None);
        }
    }
    Ok(())
}

fn iterable_items(
    set_declaration: &ast::SetDeclaration,
    context: &Context,
    circuit: &mut dyn Backend,
    span: Option<&Span>,
) -> Result<Vec<Value>> {
    match set_declaration {
        ast::SetDeclaration::Range(range) => {
            let start_expr = range.start().ok_or_else(|| {
                TranslationError::new(ErrorKind::WrongRange("start"), range.span().copied())
            })?;
            let end_expr = range.end().ok_or_else(|| {
                TranslationError::new(ErrorKind::WrongRange("end"), range.span().copied())
            })?;
            let start = {
                let value = compute_expression(start_expr, context, circuit)?;
                expect_i128(&value, start_expr.span())?
            };
            let end = {
                let value = compute_expression(end_expr, context, circuit)?;
                expect_i128(&value, end_expr.span())?
            };
            let step = match range.step() {
                Some(expr) => {
                    let value = compute_expression(expr, context, circuit)?;
                    expect_i128(&value, expr.span())?
                }
                None => 1,
            };
            if step == 0 {
                return err(
                    ErrorKind::TypeError("range step cannot be zero".to_string()),
                    range.span(),
                );
            }
            let mut items = Vec::new();
            let mut i = start;
            while (step > 0 && i < end) || (step < 0 && i > end) {
                items.push(Value::Raw(Raw::Int(i)));
                i += step;
            }
            Ok(items)
        }

        ast::SetDeclaration::List(expressions) => {
            let mut items = Vec::with_capacity(expressions.len());
            for expr in expressions {
                items.push(compute_expression(expr, context, circuit)?);
            }
            Ok(items)
        }

        ast::SetDeclaration::Identifier(identifier) => {
            match context.lookup(identifier.name(), identifier.span())? {
                Value::QubitRegister(register) => {
                    Ok(register.qubits().into_iter().map(Value::Qubit).collect())
                }
                Value::Qubits(qubits) => Ok(qubits.iter().copied().map(Value::Qubit).collect()),
                Value::Classical(ClassicalValue::BitArray(bits)) => Ok((0..bits.size())
                    .map(|i| {
                        BitArray::from_encoding(1, (bits.as_unsigned() >> i) & 1)
                            .map(|b| Value::Classical(b.to_value()))
                    })
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(|e| TranslationError::from_value(e, span))?),
                other => err(
                    ErrorKind::TypeError(format!(
                        "`{}` of type {} is not iterable",
                        identifier.name(),
                        other.type_name()
                    )),
                    identifier.span(),
                ),
            }
        }
    }
}

fn process_include(
    include: &ast::Include,
    circuit: &mut dyn Backend,
    context: &mut Context,
    state: &mut TranslationState<'_>,
) -> Result<()> {
    let resolver = match state.includes {
        Some(resolver) => resolver,
        None => {
            return err(
                ErrorKind::InvalidIncludePath {
                    file: include.file_path().to_string(),
                    searched: Vec::new(),
                },
                include.span(),
            )
        }
    };
    match resolver.resolve(include.file_path()) {
        Some(program) => {
            // The included program's top-level statements feed the same
            // context, before the rest of the including program.
            for stmt in program.statements() {
                process_statement(stmt, circuit, context, state)?;
            }
            Ok(())
        }
        None => err(
            ErrorKind::InvalidIncludePath {
                file: include.file_path().to_string(),
                searched: resolver.search_paths().to_vec(),
            },
            include.span(),
        ),
    }
}
