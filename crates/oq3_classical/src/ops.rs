// Copyright contributors to the openqasm-translator project
// SPDX-License-Identifier: Apache-2.0

// Operator application and width promotion for classical values.
//
// The promotion rules grow the result width so the mathematical result of
// an operation always fits: `+`/`-` widen to max+1, `*` to the sum of the
// operand widths, `/` and `%` to the max. The rule width is a floor; when
// the exact result still needs more bits (possible for `**` and for mixed
// signedness at the boundary) the result widens to fit rather than failing.
// Bitwise operators and shifts are defined for `uint`/`bit` operands only,
// and shifts keep the left operand's width, discarding shifted-out bits.

use crate::error::ValueError;
use crate::value::{
    mask, min_signed_width, min_unsigned_width, Angle, BitArray, ClassicalValue, Raw, SignedInt,
    UnsignedInt, MAX_WIDTH,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
    Ne,
}

impl BinaryOpKind {
    pub fn symbol(&self) -> &'static str {
        use BinaryOpKind::*;
        match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Pow => "**",
            BitAnd => "&",
            BitOr => "|",
            BitXor => "^",
            Shl => "<<",
            Shr => ">>",
            Gt => ">",
            Lt => "<",
            Ge => ">=",
            Le => "<=",
            Eq => "==",
            Ne => "!=",
        }
    }

    pub fn is_comparison(&self) -> bool {
        use BinaryOpKind::*;
        matches!(self, Gt | Lt | Ge | Le | Eq | Ne)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOpKind {
    Neg,
    BitNot,
    Not,
}

impl UnaryOpKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOpKind::Neg => "-",
            UnaryOpKind::BitNot => "~",
            UnaryOpKind::Not => "!",
        }
    }
}

/// Result of applying an operator: a new sized value, a raw boolean (from
/// comparisons), or a raw float (when a float operand forces host
/// arithmetic).
#[derive(Clone, Debug, PartialEq)]
pub enum OpOutput {
    Value(ClassicalValue),
    Bool(bool),
    Float(f64),
}

fn invalid(op: BinaryOpKind, lhs: String, rhs: String) -> ValueError {
    ValueError::InvalidOperation {
        op: op.symbol(),
        lhs,
        rhs,
    }
}

fn describe(value: &ClassicalValue) -> String {
    format!("{}[{}]", value.type_name(), value.size())
}

/// Either operand of a binary operation, after the caller has established
/// that at least one side is a sized value.
enum IntOperand<'a> {
    Signed(&'a SignedInt),
    Unsigned(&'a UnsignedInt),
    Bits(&'a BitArray),
}

impl IntOperand<'_> {
    fn from_value(value: &ClassicalValue) -> Option<IntOperand<'_>> {
        match value {
            ClassicalValue::SignedInt(v) => Some(IntOperand::Signed(v)),
            ClassicalValue::UnsignedInt(v) => Some(IntOperand::Unsigned(v)),
            ClassicalValue::BitArray(v) => Some(IntOperand::Bits(v)),
            ClassicalValue::Angle(..) => None,
        }
    }

    fn size(&self) -> u32 {
        match self {
            IntOperand::Signed(v) => v.size(),
            IntOperand::Unsigned(v) => v.size(),
            IntOperand::Bits(v) => v.size(),
        }
    }

    fn is_signed(&self) -> bool {
        matches!(self, IntOperand::Signed(..))
    }

    fn is_bits(&self) -> bool {
        matches!(self, IntOperand::Bits(..))
    }

    fn encoding(&self) -> u128 {
        match self {
            IntOperand::Signed(v) => v.encoding(),
            IntOperand::Unsigned(v) => v.encoding(),
            IntOperand::Bits(v) => v.encoding(),
        }
    }

    fn logical(&self) -> Result<i128, ValueError> {
        match self {
            IntOperand::Signed(v) => Ok(v.value()),
            IntOperand::Unsigned(v) => i128::try_from(v.value()).map_err(|_| ValueError::Overflow {
                type_name: "uint",
                size: v.size(),
                value: v.value().to_string(),
            }),
            IntOperand::Bits(v) => i128::try_from(v.as_unsigned()).map_err(|_| ValueError::Overflow {
                type_name: "bit",
                size: v.size(),
                value: v.as_unsigned().to_string(),
            }),
        }
    }
}

/// Construct an integer result at the promoted width, widening further if
/// the exact value needs it.
fn construct_int(signed: bool, rule_width: u32, value: i128) -> Result<ClassicalValue, ValueError> {
    let needed = if signed || value < 0 {
        min_signed_width(value)
    } else {
        min_unsigned_width(value as u128)
    };
    let width = rule_width.max(needed).max(1);
    if width > MAX_WIDTH {
        return Err(ValueError::Overflow {
            type_name: if signed { "int" } else { "uint" },
            size: MAX_WIDTH,
            value: value.to_string(),
        });
    }
    if signed || value < 0 {
        Ok(SignedInt::new(width, value)?.to_value())
    } else {
        Ok(UnsignedInt::new(width, value as u128)?.to_value())
    }
}

fn int_binary(
    op: BinaryOpKind,
    lhs: &IntOperand<'_>,
    rhs: &IntOperand<'_>,
    lhs_desc: String,
    rhs_desc: String,
) -> Result<OpOutput, ValueError> {
    use BinaryOpKind::*;
    let (sa, sb) = (lhs.size(), rhs.size());
    let a = lhs.logical()?;
    let b = rhs.logical()?;

    if op.is_comparison() {
        return Ok(OpOutput::Bool(match op {
            Gt => a > b,
            Lt => a < b,
            Ge => a >= b,
            Le => a <= b,
            Eq => a == b,
            Ne => a != b,
            _ => unreachable!(),
        }));
    }

    match op {
        BitAnd | BitOr | BitXor => {
            if lhs.is_signed() || rhs.is_signed() {
                return Err(invalid(op, lhs_desc, rhs_desc));
            }
            let width = sa.max(sb);
            let encoding = match op {
                BitAnd => lhs.encoding() & rhs.encoding(),
                BitOr => lhs.encoding() | rhs.encoding(),
                BitXor => lhs.encoding() ^ rhs.encoding(),
                _ => unreachable!(),
            };
            let value = if lhs.is_bits() && rhs.is_bits() {
                BitArray::from_encoding(width, encoding)?.to_value()
            } else {
                UnsignedInt::new(width, encoding)?.to_value()
            };
            Ok(OpOutput::Value(value))
        }

        Shl | Shr => {
            if lhs.is_signed() {
                return Err(invalid(op, lhs_desc, rhs_desc));
            }
            if b < 0 {
                return Err(invalid(op, lhs_desc, rhs_desc));
            }
            let encoding = if b >= sa as i128 {
                0
            } else if matches!(op, Shl) {
                (lhs.encoding() << b) & mask(sa)
            } else {
                lhs.encoding() >> b
            };
            let value = if lhs.is_bits() {
                BitArray::from_encoding(sa, encoding)?.to_value()
            } else {
                UnsignedInt::new(sa, encoding)?.to_value()
            };
            Ok(OpOutput::Value(value))
        }

        Add | Sub | Mul | Div | Mod | Pow => {
            let signed = lhs.is_signed() || rhs.is_signed();
            let overflow = || ValueError::Overflow {
                type_name: if signed { "int" } else { "uint" },
                size: MAX_WIDTH,
                value: format!("{} {} {}", a, op.symbol(), b),
            };
            let (value, rule_width) = match op {
                Add => (a.checked_add(b).ok_or_else(|| overflow())?, sa.max(sb) + 1),
                Sub => (a.checked_sub(b).ok_or_else(|| overflow())?, sa.max(sb) + 1),
                Mul => (a.checked_mul(b).ok_or_else(|| overflow())?, sa + sb),
                Div => {
                    if b == 0 {
                        return Err(ValueError::DivisionByZero);
                    }
                    (a / b, sa.max(sb))
                }
                Mod => {
                    if b == 0 {
                        return Err(ValueError::DivisionByZero);
                    }
                    (a % b, sa.max(sb))
                }
                Pow => {
                    if b < 0 {
                        return Err(invalid(op, lhs_desc, rhs_desc));
                    }
                    let exp = u32::try_from(b).map_err(|_| overflow())?;
                    (a.checked_pow(exp).ok_or_else(|| overflow())?, sa.max(sb))
                }
                _ => unreachable!(),
            };
            if !signed && value < 0 {
                return Err(ValueError::Overflow {
                    type_name: "uint",
                    size: sa.max(sb),
                    value: value.to_string(),
                });
            }
            Ok(OpOutput::Value(construct_int(signed, rule_width, value)?))
        }

        _ => unreachable!(),
    }
}

fn angle_binary(op: BinaryOpKind, lhs: &Angle, rhs: &Angle) -> Result<OpOutput, ValueError> {
    use BinaryOpKind::*;
    if op.is_comparison() {
        if lhs.size() != rhs.size() {
            let (a, b) = (lhs.value(), rhs.value());
            return Ok(OpOutput::Bool(compare_f64(op, a, b)));
        }
        let (a, b) = (lhs.encoding(), rhs.encoding());
        return Ok(OpOutput::Bool(match op {
            Gt => a > b,
            Lt => a < b,
            Ge => a >= b,
            Le => a <= b,
            Eq => a == b,
            Ne => a != b,
            _ => unreachable!(),
        }));
    }
    if lhs.size() != rhs.size() {
        return Err(invalid(
            op,
            format!("angle[{}]", lhs.size()),
            format!("angle[{}]", rhs.size()),
        ));
    }
    // Encodings share a denominator, so angle addition is modular encoding
    // addition; the modulus is 2^size - 1, which encodes a full turn.
    // Written to avoid u128 overflow at size 128.
    let steps = mask(lhs.size()).max(1);
    let (a, b) = (lhs.encoding(), rhs.encoding());
    match op {
        Add => {
            let sum = match a.checked_add(b) {
                Some(s) => s % steps,
                None => (a - (steps - b)) % steps,
            };
            Ok(OpOutput::Value(Angle::new(lhs.size(), sum)?.to_value()))
        }
        Sub => {
            let diff = if a >= b { (a - b) % steps } else { steps - (b - a) };
            Ok(OpOutput::Value(Angle::new(lhs.size(), diff)?.to_value()))
        }
        _ => Err(invalid(
            op,
            format!("angle[{}]", lhs.size()),
            format!("angle[{}]", rhs.size()),
        )),
    }
}

fn compare_f64(op: BinaryOpKind, a: f64, b: f64) -> bool {
    use BinaryOpKind::*;
    match op {
        Gt => a > b,
        Lt => a < b,
        Ge => a >= b,
        Le => a <= b,
        Eq => a == b,
        Ne => a != b,
        _ => unreachable!(),
    }
}

fn float_binary(op: BinaryOpKind, a: f64, b: f64) -> Result<OpOutput, ValueError> {
    use BinaryOpKind::*;
    if op.is_comparison() {
        return Ok(OpOutput::Bool(compare_f64(op, a, b)));
    }
    let value = match op {
        Add => a + b,
        Sub => a - b,
        Mul => a * b,
        Div => a / b,
        Mod => a % b,
        Pow => a.powf(b),
        _ => return Err(invalid(op, a.to_string(), b.to_string())),
    };
    Ok(OpOutput::Float(value))
}

/// Apply `op` to two sized values.
pub fn apply_binary(
    op: BinaryOpKind,
    lhs: &ClassicalValue,
    rhs: &ClassicalValue,
) -> Result<OpOutput, ValueError> {
    use ClassicalValue::Angle as AngleValue;
    match (lhs, rhs) {
        (AngleValue(a), AngleValue(b)) => angle_binary(op, a, b),
        (AngleValue(..), _) | (_, AngleValue(..)) => {
            Err(invalid(op, describe(lhs), describe(rhs)))
        }
        _ => {
            let a = IntOperand::from_value(lhs).expect("integer operand");
            let b = IntOperand::from_value(rhs).expect("integer operand");
            int_binary(op, &a, &b, describe(lhs), describe(rhs))
        }
    }
}

/// Wrap a raw integer in the narrowest sized value that holds it.
fn promote_raw_int(value: i128) -> Result<ClassicalValue, ValueError> {
    if value < 0 {
        Ok(SignedInt::new(min_signed_width(value), value)?.to_value())
    } else {
        Ok(UnsignedInt::new(min_unsigned_width(value as u128), value as u128)?.to_value())
    }
}

/// Apply `op` with a sized left operand and a raw right operand.
pub fn apply_binary_raw(
    op: BinaryOpKind,
    lhs: &ClassicalValue,
    rhs: &Raw,
) -> Result<OpOutput, ValueError> {
    match (lhs, rhs) {
        (ClassicalValue::Angle(a), Raw::Float(f)) => angle_scalar(op, a, *f, false),
        (ClassicalValue::Angle(a), Raw::Int(i)) => angle_scalar(op, a, *i as f64, false),
        (_, Raw::Int(i)) => apply_binary(op, lhs, &promote_raw_int(*i)?),
        (_, Raw::Bool(b)) => apply_binary(op, lhs, &promote_raw_int(*b as i128)?),
        (_, Raw::Float(f)) => float_binary(op, lhs.logical_i128()? as f64, *f),
        (_, Raw::Str(..)) => Err(invalid(op, describe(lhs), rhs.type_name().to_string())),
    }
}

/// Apply `op` with a raw left operand and a sized right operand.
pub fn apply_binary_raw_lhs(
    op: BinaryOpKind,
    lhs: &Raw,
    rhs: &ClassicalValue,
) -> Result<OpOutput, ValueError> {
    match (lhs, rhs) {
        (Raw::Float(f), ClassicalValue::Angle(a)) => angle_scalar(op, a, *f, true),
        (Raw::Int(i), ClassicalValue::Angle(a)) => angle_scalar(op, a, *i as f64, true),
        (Raw::Int(i), _) => apply_binary(op, &promote_raw_int(*i)?, rhs),
        (Raw::Bool(b), _) => apply_binary(op, &promote_raw_int(*b as i128)?, rhs),
        (Raw::Float(f), _) => float_binary(op, *f, rhs.logical_i128()? as f64),
        (Raw::Str(..), _) => Err(invalid(op, lhs.type_name().to_string(), describe(rhs))),
    }
}

/// Angle combined with a host scalar: scaling and shifting act on the
/// radian value and re-quantize at the same width.
fn angle_scalar(
    op: BinaryOpKind,
    angle: &Angle,
    scalar: f64,
    scalar_on_left: bool,
) -> Result<OpOutput, ValueError> {
    use BinaryOpKind::*;
    let theta = angle.value();
    if op.is_comparison() {
        let (a, b) = if scalar_on_left {
            (scalar, theta)
        } else {
            (theta, scalar)
        };
        return Ok(OpOutput::Bool(compare_f64(op, a, b)));
    }
    let radians = match (op, scalar_on_left) {
        (Mul, _) => theta * scalar,
        (Add, _) => theta + scalar,
        (Sub, false) => theta - scalar,
        (Sub, true) => scalar - theta,
        (Div, false) => {
            if scalar == 0.0 {
                return Err(ValueError::DivisionByZero);
            }
            theta / scalar
        }
        _ => {
            let desc = format!("angle[{}]", angle.size());
            let (lhs, rhs) = if scalar_on_left {
                (scalar.to_string(), desc)
            } else {
                (desc, scalar.to_string())
            };
            return Err(invalid(op, lhs, rhs));
        }
    };
    Ok(OpOutput::Value(
        Angle::from_radians(angle.size(), radians)?.to_value(),
    ))
}

/// Apply a unary operator to a sized value.
pub fn apply_unary(op: UnaryOpKind, operand: &ClassicalValue) -> Result<OpOutput, ValueError> {
    use ClassicalValue::*;
    match op {
        UnaryOpKind::Not => Ok(OpOutput::Bool(operand.is_zero())),
        UnaryOpKind::Neg => match operand {
            SignedInt(v) => {
                let value = -v.value();
                Ok(OpOutput::Value(construct_int(true, v.size(), value)?))
            }
            UnsignedInt(..) | BitArray(..) => {
                let value = -operand.logical_i128()?;
                Ok(OpOutput::Value(construct_int(
                    true,
                    operand.size() + 1,
                    value,
                )?))
            }
            Angle(v) => {
                let steps = mask(v.size());
                let neg = (steps - v.encoding()) % steps.max(1);
                Ok(OpOutput::Value(
                    crate::value::Angle::new(v.size(), neg)?.to_value(),
                ))
            }
        },
        UnaryOpKind::BitNot => match operand {
            SignedInt(v) => Ok(OpOutput::Value(
                crate::value::SignedInt::from_encoding(v.size(), v.encoding() ^ mask(v.size()))?
                    .to_value(),
            )),
            UnsignedInt(v) => Ok(OpOutput::Value(
                crate::value::UnsignedInt::new(v.size(), v.encoding() ^ mask(v.size()))?.to_value(),
            )),
            BitArray(v) => Ok(OpOutput::Value(
                crate::value::BitArray::from_encoding(v.size(), v.encoding() ^ mask(v.size()))?
                    .to_value(),
            )),
            Angle(v) => Err(ValueError::InvalidOperation {
                op: "~",
                lhs: format!("angle[{}]", v.size()),
                rhs: String::new(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_addition_promotes_to_signed() {
        let a = UnsignedInt::new(4, 5).unwrap().to_value();
        let s = SignedInt::new(4, 6).unwrap().to_value();
        let out = apply_binary(BinaryOpKind::Add, &a, &s).unwrap();
        assert_eq!(
            out,
            OpOutput::Value(SignedInt::new(5, 11).unwrap().to_value())
        );
    }

    #[test]
    fn test_subtraction_can_go_negative() {
        let a = UnsignedInt::new(4, 5).unwrap().to_value();
        let s = SignedInt::new(4, 6).unwrap().to_value();
        let out = apply_binary(BinaryOpKind::Sub, &a, &s).unwrap();
        assert_eq!(
            out,
            OpOutput::Value(SignedInt::new(5, -1).unwrap().to_value())
        );
    }

    #[test]
    fn test_unsigned_subtraction_below_zero_overflows() {
        let a = UnsignedInt::new(4, 2).unwrap().to_value();
        let b = UnsignedInt::new(4, 5).unwrap().to_value();
        let err = apply_binary(BinaryOpKind::Sub, &a, &b).unwrap_err();
        assert!(matches!(err, ValueError::Overflow { .. }));
    }

    #[test]
    fn test_multiplication_width_is_sum() {
        let a = UnsignedInt::new(3, 5).unwrap().to_value();
        let b = UnsignedInt::new(4, 9).unwrap().to_value();
        let out = apply_binary(BinaryOpKind::Mul, &a, &b).unwrap();
        assert_eq!(
            out,
            OpOutput::Value(UnsignedInt::new(7, 45).unwrap().to_value())
        );
    }

    #[test]
    fn test_bitwise_on_signed_rejected() {
        let a = SignedInt::new(4, 3).unwrap().to_value();
        let b = UnsignedInt::new(4, 1).unwrap().to_value();
        let err = apply_binary(BinaryOpKind::BitAnd, &a, &b).unwrap_err();
        assert!(matches!(err, ValueError::InvalidOperation { .. }));
    }

    #[test]
    fn test_shift_keeps_width() {
        let b = BitArray::new(4, "0011").unwrap().to_value();
        let out = apply_binary_raw(BinaryOpKind::Shl, &b, &Raw::Int(3)).unwrap();
        // 0011 << 3 = 1000 with the high 1 shifted out.
        assert_eq!(
            out,
            OpOutput::Value(BitArray::new(4, "1000").unwrap().to_value())
        );
    }

    #[test]
    fn test_division_by_zero() {
        let a = UnsignedInt::new(4, 5).unwrap().to_value();
        let err = apply_binary_raw(BinaryOpKind::Div, &a, &Raw::Int(0)).unwrap_err();
        assert_eq!(err, ValueError::DivisionByZero);
    }

    #[test]
    fn test_float_operand_forces_host_arithmetic() {
        let a = UnsignedInt::new(10, 2).unwrap().to_value();
        let out = apply_binary_raw(BinaryOpKind::Pow, &a, &Raw::Float(0.5)).unwrap();
        assert_eq!(out, OpOutput::Float(2f64.powf(0.5)));
    }

    #[test]
    fn test_angle_and_int_do_not_mix() {
        let a = Angle::new(4, 3).unwrap().to_value();
        let s = SignedInt::new(4, 1).unwrap().to_value();
        let err = apply_binary(BinaryOpKind::Add, &a, &s).unwrap_err();
        assert!(matches!(err, ValueError::InvalidOperation { .. }));
    }

    #[test]
    fn test_unary_neg_widens_unsigned() {
        let a = UnsignedInt::new(4, 15).unwrap().to_value();
        let out = apply_unary(UnaryOpKind::Neg, &a).unwrap();
        assert_eq!(
            out,
            OpOutput::Value(SignedInt::new(5, -15).unwrap().to_value())
        );
    }

    #[test]
    fn test_unary_bitnot_is_same_width() {
        let s = SignedInt::new(4, 3).unwrap().to_value();
        let out = apply_unary(UnaryOpKind::BitNot, &s).unwrap();
        assert_eq!(
            out,
            OpOutput::Value(SignedInt::new(4, -4).unwrap().to_value())
        );
    }
}
