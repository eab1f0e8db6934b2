// Copyright contributors to the openqasm-translator project
// SPDX-License-Identifier: Apache-2.0

// The recursive expression evaluator: reduces expression nodes to runtime
// values, or to backend handles for gate-name calls. Dispatch is a closed
// match over the node kinds; anything unhandled fails
// `UnsupportedExpressionType` naming the kind. That escape hatch must never
// silently coerce.
//
// Arithmetic dispatch: if either operand is a sized classical value the
// operation goes through oq3_classical's operators; if both are raw the
// host arithmetic below applies.

use oq3_ast::ast::{self, Expression};
use oq3_ast::Span;
use oq3_classical::{
    apply_binary, apply_binary_raw, apply_binary_raw_lhs, apply_unary, Angle, BinaryOpKind,
    BitArray, CastSource, ClassicalValue, OpOutput, Raw, SignedInt, UnaryOpKind, UnsignedInt,
};

use crate::backend::Backend;
use crate::context::Context;
use crate::error::{err, ErrorKind, Result, TranslationError};
use crate::translator::instantiate_gate;
use crate::value::Value;

/// Evaluate an expression to a value.
pub fn compute_expression(
    expr: &Expression,
    context: &Context,
    circuit: &mut dyn Backend,
) -> Result<Value> {
    match expr {
        Expression::IntegerLiteral(literal) => Ok(Value::Raw(Raw::Int(*literal.value()))),
        Expression::RealLiteral(literal) => Ok(Value::Raw(Raw::Float(*literal.value()))),
        Expression::BooleanLiteral(literal) => Ok(Value::Raw(Raw::Bool(*literal.value()))),
        Expression::StringLiteral(literal) => Ok(Value::Raw(Raw::Str(literal.value().clone()))),

        Expression::DurationLiteral(literal) => err(
            ErrorKind::UnsupportedExpressionType("DurationLiteral".to_string()),
            literal.span(),
        ),

        Expression::Constant(constant) => match context.constant(constant.name()) {
            Some(value) => Ok(Value::Raw(Raw::Float(value))),
            None => err(
                ErrorKind::UnknownConstant {
                    name: constant.name().to_string(),
                    known: context.constant_names(),
                },
                constant.span(),
            ),
        },

        Expression::Identifier(identifier) => context
            .lookup(identifier.name(), identifier.span())
            .map(Clone::clone),

        Expression::Unary(unary) => {
            let operand = compute_expression(unary.expression(), context, circuit)?;
            apply_unary_operator(unary.op(), &operand, unary.span())
        }

        Expression::Binary(binary) => compute_binary(binary, context, circuit),

        Expression::Index(index) => {
            let base = compute_expression(index.expression(), context, circuit)?;
            let subscript = compute_expression(index.index_expression(), context, circuit)?;
            let i = expect_i128(&subscript, index.span())?;
            index_value(&base, i, index.span())
        }

        Expression::Cast(cast) => compute_cast(cast, context, circuit),

        Expression::FunctionCall(call) => {
            let name = call.name().name();
            let callable = match context.lookup(name, call.name().span()) {
                Ok(Value::Gate(callable)) => callable.clone(),
                Ok(other) => {
                    return err(
                        ErrorKind::TypeError(format!(
                            "`{name}` of type {} is not callable",
                            other.type_name()
                        )),
                        call.span(),
                    )
                }
                Err(error) => match error.kind() {
                    ErrorKind::UndefinedSymbol(..) => match circuit.lookup_primitive(name) {
                        Some(primitive) => crate::value::GateCallable::Primitive {
                            name: name.to_string(),
                            primitive,
                        },
                        None => return Err(error),
                    },
                    _ => return Err(error),
                },
            };
            let mut arguments = Vec::with_capacity(call.arguments().len());
            for arg in call.arguments() {
                arguments.push(compute_expression(arg, context, circuit)?);
            }
            let handle = instantiate_gate(&callable, &arguments, circuit, call.span())?;
            Ok(Value::GateInstance(handle))
        }
    }
}

fn compute_binary(
    binary: &ast::BinaryExpression,
    context: &Context,
    circuit: &mut dyn Backend,
) -> Result<Value> {
    use ast::BinaryOperator::{LogicAnd, LogicOr};

    // Short-circuit evaluation is only defined for raw booleans; a typed
    // operand has no chosen semantics yet.
    if matches!(binary.op(), LogicAnd | LogicOr) {
        let unsupported = |span: Option<&Span>| {
            err(
                ErrorKind::UnsupportedExpressionType(format!(
                    "logical operator `{}` with typed operands",
                    binary.op().symbol()
                )),
                span,
            )
        };
        let lhs = compute_expression(binary.lhs(), context, circuit)?;
        let left = match lhs {
            Value::Raw(Raw::Bool(b)) => b,
            _ => return unsupported(binary.span()),
        };
        match (binary.op(), left) {
            (LogicAnd, false) => return Ok(Value::Raw(Raw::Bool(false))),
            (LogicOr, true) => return Ok(Value::Raw(Raw::Bool(true))),
            _ => {}
        }
        let rhs = compute_expression(binary.rhs(), context, circuit)?;
        return match rhs {
            Value::Raw(Raw::Bool(b)) => Ok(Value::Raw(Raw::Bool(b))),
            _ => unsupported(binary.span()),
        };
    }

    let op = binary_op_kind(binary.op()).ok_or_else(|| {
        TranslationError::new(
            ErrorKind::UnsupportedExpressionType(format!(
                "binary operator `{}`",
                binary.op().symbol()
            )),
            binary.span().copied(),
        )
    })?;
    let lhs = compute_expression(binary.lhs(), context, circuit)?;
    let rhs = compute_expression(binary.rhs(), context, circuit)?;
    apply_binary_operator(op, &lhs, &rhs, binary.span())
}

/// Map a syntactic binary operator to a value-level one. `&&`/`||` have no
/// value-level counterpart.
pub(crate) fn binary_op_kind(op: &ast::BinaryOperator) -> Option<BinaryOpKind> {
    use ast::BinaryOperator::*;
    Some(match op {
        Gt => BinaryOpKind::Gt,
        Lt => BinaryOpKind::Lt,
        Ge => BinaryOpKind::Ge,
        Le => BinaryOpKind::Le,
        Eq => BinaryOpKind::Eq,
        Ne => BinaryOpKind::Ne,
        BitOr => BinaryOpKind::BitOr,
        BitXor => BinaryOpKind::BitXor,
        BitAnd => BinaryOpKind::BitAnd,
        Shl => BinaryOpKind::Shl,
        Shr => BinaryOpKind::Shr,
        Add => BinaryOpKind::Add,
        Sub => BinaryOpKind::Sub,
        Mul => BinaryOpKind::Mul,
        Div => BinaryOpKind::Div,
        Mod => BinaryOpKind::Mod,
        Pow => BinaryOpKind::Pow,
        LogicAnd | LogicOr => return None,
    })
}

/// Apply a binary operator to evaluated operands, dispatching between
/// typed and host arithmetic.
pub(crate) fn apply_binary_operator(
    op: BinaryOpKind,
    lhs: &Value,
    rhs: &Value,
    span: Option<&Span>,
) -> Result<Value> {
    let output = match (lhs, rhs) {
        (Value::Classical(a), Value::Classical(b)) => {
            apply_binary(op, a, b).map_err(|e| TranslationError::from_value(e, span))?
        }
        (Value::Classical(a), Value::Raw(b)) => {
            apply_binary_raw(op, a, b).map_err(|e| TranslationError::from_value(e, span))?
        }
        (Value::Raw(a), Value::Classical(b)) => {
            apply_binary_raw_lhs(op, a, b).map_err(|e| TranslationError::from_value(e, span))?
        }
        (Value::Raw(a), Value::Raw(b)) => return host_binary(op, a, b, span),
        _ => {
            return err(
                ErrorKind::Value(oq3_classical::ValueError::InvalidOperation {
                    op: op.symbol(),
                    lhs: lhs.type_name().to_string(),
                    rhs: rhs.type_name().to_string(),
                }),
                span,
            )
        }
    };
    Ok(match output {
        OpOutput::Value(value) => Value::Classical(value),
        OpOutput::Bool(b) => Value::Raw(Raw::Bool(b)),
        OpOutput::Float(f) => Value::Raw(Raw::Float(f)),
    })
}

/// Host arithmetic over raw operands.
fn host_binary(op: BinaryOpKind, lhs: &Raw, rhs: &Raw, span: Option<&Span>) -> Result<Value> {
    use BinaryOpKind::*;

    let invalid = || {
        TranslationError::new(
            ErrorKind::Value(oq3_classical::ValueError::InvalidOperation {
                op: op.symbol(),
                lhs: lhs.type_name().to_string(),
                rhs: rhs.type_name().to_string(),
            }),
            span.copied(),
        )
    };
    let overflow = || {
        TranslationError::new(
            ErrorKind::TypeError(format!(
                "result of `{}` does not fit a host integer",
                op.symbol()
            )),
            span.copied(),
        )
    };

    // Promote bools to integers, and anything numeric to float if a float
    // is involved.
    let as_int = |raw: &Raw| -> Option<i128> {
        match raw {
            Raw::Int(i) => Some(*i),
            Raw::Bool(b) => Some(*b as i128),
            _ => None,
        }
    };
    let as_float = |raw: &Raw| -> Option<f64> {
        match raw {
            Raw::Int(i) => Some(*i as f64),
            Raw::Float(f) => Some(*f),
            Raw::Bool(b) => Some(*b as u8 as f64),
            _ => None,
        }
    };

    if let (Raw::Str(a), Raw::Str(b)) = (lhs, rhs) {
        return match op {
            Eq => Ok(Value::Raw(Raw::Bool(a == b))),
            Ne => Ok(Value::Raw(Raw::Bool(a != b))),
            _ => Err(invalid()),
        };
    }

    if let (Some(a), Some(b)) = (as_int(lhs), as_int(rhs)) {
        if op.is_comparison() {
            return Ok(Value::Raw(Raw::Bool(match op {
                Gt => a > b,
                Lt => a < b,
                Ge => a >= b,
                Le => a <= b,
                Eq => a == b,
                Ne => a != b,
                _ => unreachable!(),
            })));
        }
        let value = match op {
            Add => a.checked_add(b).ok_or_else(overflow)?,
            Sub => a.checked_sub(b).ok_or_else(overflow)?,
            Mul => a.checked_mul(b).ok_or_else(overflow)?,
            Div => {
                if b == 0 {
                    return Err(TranslationError::from_value(
                        oq3_classical::ValueError::DivisionByZero,
                        span,
                    ));
                }
                a / b
            }
            Mod => {
                if b == 0 {
                    return Err(TranslationError::from_value(
                        oq3_classical::ValueError::DivisionByZero,
                        span,
                    ));
                }
                a % b
            }
            Pow => {
                if b < 0 {
                    return Ok(Value::Raw(Raw::Float((a as f64).powf(b as f64))));
                }
                let exp = u32::try_from(b).map_err(|_| overflow())?;
                a.checked_pow(exp).ok_or_else(overflow)?
            }
            BitAnd => a & b,
            BitOr => a | b,
            BitXor => a ^ b,
            Shl => {
                if b < 0 {
                    return Err(invalid());
                }
                let shift = u32::try_from(b).map_err(|_| overflow())?;
                a.checked_shl(shift).ok_or_else(overflow)?
            }
            Shr => {
                if b < 0 {
                    return Err(invalid());
                }
                if b >= 127 {
                    if a < 0 {
                        -1
                    } else {
                        0
                    }
                } else {
                    a >> b
                }
            }
            _ => unreachable!(),
        };
        return Ok(Value::Raw(Raw::Int(value)));
    }

    if let (Some(a), Some(b)) = (as_float(lhs), as_float(rhs)) {
        if op.is_comparison() {
            let result = match op {
                Gt => a > b,
                Lt => a < b,
                Ge => a >= b,
                Le => a <= b,
                Eq => a == b,
                Ne => a != b,
                _ => unreachable!(),
            };
            return Ok(Value::Raw(Raw::Bool(result)));
        }
        let value = match op {
            Add => a + b,
            Sub => a - b,
            Mul => a * b,
            Div => a / b,
            Mod => a % b,
            Pow => a.powf(b),
            _ => return Err(invalid()),
        };
        return Ok(Value::Raw(Raw::Float(value)));
    }

    Err(invalid())
}

fn apply_unary_operator(
    op: &ast::UnaryOperator,
    operand: &Value,
    span: Option<&Span>,
) -> Result<Value> {
    use ast::UnaryOperator::*;
    let kind = match op {
        Neg => UnaryOpKind::Neg,
        BitNot => UnaryOpKind::BitNot,
        Not => UnaryOpKind::Not,
    };
    match operand {
        Value::Classical(value) => {
            let output = apply_unary(kind, value).map_err(|e| TranslationError::from_value(e, span))?;
            Ok(match output {
                OpOutput::Value(v) => Value::Classical(v),
                OpOutput::Bool(b) => Value::Raw(Raw::Bool(b)),
                OpOutput::Float(f) => Value::Raw(Raw::Float(f)),
            })
        }
        Value::Raw(raw) => {
            let invalid = || {
                TranslationError::new(
                    ErrorKind::Value(oq3_classical::ValueError::InvalidOperation {
                        op: op.symbol(),
                        lhs: raw.type_name().to_string(),
                        rhs: String::new(),
                    }),
                    span.copied(),
                )
            };
            let value = match (kind, raw) {
                (UnaryOpKind::Neg, Raw::Int(i)) => Raw::Int(i.checked_neg().ok_or_else(invalid)?),
                (UnaryOpKind::Neg, Raw::Float(f)) => Raw::Float(-f),
                (UnaryOpKind::BitNot, Raw::Int(i)) => Raw::Int(!i),
                (UnaryOpKind::Not, Raw::Bool(b)) => Raw::Bool(!b),
                (UnaryOpKind::Not, Raw::Int(i)) => Raw::Bool(*i == 0),
                (UnaryOpKind::Not, Raw::Float(f)) => Raw::Bool(*f == 0.0),
                _ => return Err(invalid()),
            };
            Ok(Value::Raw(value))
        }
        _ => err(
            ErrorKind::Value(oq3_classical::ValueError::InvalidOperation {
                op: op.symbol(),
                lhs: operand.type_name().to_string(),
                rhs: String::new(),
            }),
            span,
        ),
    }
}

fn compute_cast(
    cast: &ast::CastExpression,
    context: &Context,
    circuit: &mut dyn Backend,
) -> Result<Value> {
    if cast.arguments().is_empty() {
        return err(ErrorKind::MissingExpression("cast"), cast.span());
    }
    if cast.arguments().len() > 1 {
        return err(
            ErrorKind::TypeError("cast takes exactly one argument".to_string()),
            cast.span(),
        );
    }
    let operand = compute_expression(&cast.arguments()[0], context, circuit)?;
    let width = match cast.get_type().designator() {
        Some(designator) => {
            let value = compute_expression(designator, context, circuit)?;
            Some(expect_width(&value, designator.span())?)
        }
        None => None,
    };
    let source = cast_source(&operand, cast.span())?;
    let map = |e| TranslationError::from_value(e, cast.span());
    match cast.get_type() {
        ast::ClassicalType::Int { .. } => Ok(Value::Classical(
            SignedInt::cast(&source, width).map_err(map)?.to_value(),
        )),
        ast::ClassicalType::UInt { .. } => Ok(Value::Classical(
            UnsignedInt::cast(&source, width).map_err(map)?.to_value(),
        )),
        ast::ClassicalType::Bit { .. } => Ok(Value::Classical(
            BitArray::cast(&source, width).map_err(map)?.to_value(),
        )),
        ast::ClassicalType::Angle { .. } => Ok(Value::Classical(
            Angle::cast(&source, width).map_err(map)?.to_value(),
        )),
        // float is passthrough: the value stays raw.
        ast::ClassicalType::Float { .. } => Ok(Value::Raw(Raw::Float(as_f64(
            &operand,
            cast.span(),
        )?))),
        ast::ClassicalType::Bool => Ok(Value::Raw(Raw::Bool(truthy(&operand, cast.span())?))),
        other => err(
            ErrorKind::UnsupportedExpressionType(format!("cast to `{}`", other.name())),
            cast.span(),
        ),
    }
}

/// Build a cast source from an evaluated operand; backend resources have no
/// classical reading.
pub(crate) fn cast_source(value: &Value, span: Option<&Span>) -> Result<CastSource> {
    match value {
        Value::Raw(raw) => Ok(CastSource::Raw(raw.clone())),
        Value::Classical(classical) => Ok(CastSource::Value(classical.clone())),
        other => err(
            ErrorKind::TypeError(format!("cannot cast a {}", other.type_name())),
            span,
        ),
    }
}

/// Index into an evaluated base value.
fn index_value(base: &Value, index: i128, span: Option<&Span>) -> Result<Value> {
    match base {
        Value::Classical(value) => {
            let i = i64::try_from(index).map_err(|_| {
                TranslationError::new(
                    ErrorKind::IndexOutOfRange {
                        name: value.type_name().to_string(),
                        index,
                        size: value.size(),
                    },
                    span.copied(),
                )
            })?;
            value
                .index(i)
                .map(Value::Classical)
                .map_err(|e| TranslationError::from_value(e, span))
        }
        Value::QubitRegister(register) => {
            let position = normalize_index(index, register.size(), register.name(), span)?;
            Ok(Value::Qubit(register.qubit(position)))
        }
        Value::Qubits(qubits) => {
            let position = normalize_index(index, qubits.len() as u32, "qubit list", span)?;
            Ok(Value::Qubit(qubits[position as usize]))
        }
        other => err(
            ErrorKind::TypeError(format!("{} cannot be indexed", other.type_name())),
            span,
        ),
    }
}

/// Normalize an index over a resource of known length, allowing negative
/// indices to count from the end.
pub(crate) fn normalize_index(
    index: i128,
    size: u32,
    name: &str,
    span: Option<&Span>,
) -> Result<u32> {
    let len = size as i128;
    let position = if index < 0 { index + len } else { index };
    if position < 0 || position >= len {
        return err(
            ErrorKind::IndexOutOfRange {
                name: name.to_string(),
                index,
                size,
            },
            span,
        );
    }
    Ok(position as u32)
}

/// An evaluated value read as a host integer, for subscripts, widths and
/// range bounds.
pub(crate) fn expect_i128(value: &Value, span: Option<&Span>) -> Result<i128> {
    match value {
        Value::Raw(Raw::Int(i)) => Ok(*i),
        Value::Raw(Raw::Bool(b)) => Ok(*b as i128),
        Value::Classical(classical) => match classical {
            ClassicalValue::SignedInt(v) => Ok(v.value()),
            ClassicalValue::UnsignedInt(v) => i128::try_from(v.value()).map_err(|_| {
                TranslationError::new(
                    ErrorKind::TypeError("value does not fit a host integer".to_string()),
                    span.copied(),
                )
            }),
            ClassicalValue::BitArray(v) => i128::try_from(v.as_unsigned()).map_err(|_| {
                TranslationError::new(
                    ErrorKind::TypeError("value does not fit a host integer".to_string()),
                    span.copied(),
                )
            }),
            ClassicalValue::Angle(..) => err(
                ErrorKind::TypeError("an angle is not an integer".to_string()),
                span,
            ),
        },
        other => err(
            ErrorKind::TypeError(format!("expected an integer, found {}", other.type_name())),
            span,
        ),
    }
}

/// An evaluated designator read as a width: a strictly positive integer.
pub(crate) fn expect_width(value: &Value, span: Option<&Span>) -> Result<u32> {
    let width = expect_i128(value, span)?;
    if width < 1 || width > 128 {
        return err(
            ErrorKind::TypeError(format!("width must be between 1 and 128, got {width}")),
            span,
        );
    }
    Ok(width as u32)
}

/// An evaluated value read as a float, for gate parameters and phases.
pub(crate) fn as_f64(value: &Value, span: Option<&Span>) -> Result<f64> {
    match value {
        Value::Raw(Raw::Int(i)) => Ok(*i as f64),
        Value::Raw(Raw::Float(f)) => Ok(*f),
        Value::Classical(ClassicalValue::Angle(angle)) => Ok(angle.value()),
        Value::Classical(classical) => Ok(expect_i128(value, span).map(|i| i as f64).map_err(
            |_| {
                TranslationError::new(
                    ErrorKind::TypeError(format!(
                        "`{}` value has no numeric reading",
                        classical.type_name()
                    )),
                    span.copied(),
                )
            },
        )?),
        other => err(
            ErrorKind::TypeError(format!("expected a number, found {}", other.type_name())),
            span,
        ),
    }
}

/// Truthiness of a condition value.
pub(crate) fn truthy(value: &Value, span: Option<&Span>) -> Result<bool> {
    match value {
        Value::Raw(Raw::Bool(b)) => Ok(*b),
        Value::Raw(Raw::Int(i)) => Ok(*i != 0),
        Value::Raw(Raw::Float(f)) => Ok(*f != 0.0),
        Value::Classical(classical) => Ok(!classical.is_zero()),
        other => err(
            ErrorKind::TypeError(format!(
                "expected a condition, found {}",
                other.type_name()
            )),
            span,
        ),
    }
}
