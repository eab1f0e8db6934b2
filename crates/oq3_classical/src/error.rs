// Copyright contributors to the openqasm-translator project
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Failures raised by construction of, or operations on, classical values.
///
/// All of these are fatal to the statement that triggered them; the
/// translator attaches a source span and propagates.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ValueError {
    #[error("not enough bits in `{type_name}[{size}]` to store value {value}")]
    Overflow {
        type_name: &'static str,
        size: u32,
        value: String,
    },

    #[error("`{type_name}` width must be between 1 and 128, got {size}")]
    InvalidWidth { type_name: &'static str, size: u32 },

    #[error("length of bit string {value:?} does not match declared width {size}")]
    WidthMismatch { size: u32, value: String },

    #[error("expected a bit string of '0' and '1', found {found:?}")]
    InvalidBitString { found: char },

    #[error("bit index {index} is out of range for `{type_name}[{size}]`")]
    IndexOutOfRange {
        type_name: &'static str,
        size: u32,
        index: i64,
    },

    #[error("cannot assign a value of type `{from}` to `{to}` without an explicit cast")]
    InvalidAssignment {
        from: &'static str,
        to: &'static str,
    },

    #[error("operator `{op}` is not defined for operands `{lhs}` and `{rhs}`")]
    InvalidOperation {
        op: &'static str,
        lhs: String,
        rhs: String,
    },

    #[error("cannot cast `{from}` to `{to}`")]
    InvalidCast { from: String, to: &'static str },

    #[error("division by zero")]
    DivisionByZero,
}
