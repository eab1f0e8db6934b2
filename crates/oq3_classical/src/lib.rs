// Copyright contributors to the openqasm-translator project
// SPDX-License-Identifier: Apache-2.0

//! Fixed-width classical values for OpenQASM 3.
//!
//! The language's classical type system is built on four scalar kinds, each
//! occupying a fixed number of bits: `int[n]`, `uint[n]`, `bit[n]` and
//! `angle[n]`. All four store their bit pattern as a non-negative integer
//! *encoding*; the kind determines how the encoding is interpreted as a
//! logical value. This crate implements construction (range-checked),
//! logical-value extraction, bit-level indexing and slicing, the strict
//! assignment rules, explicit casts, and operator application with width
//! promotion.
//!
//! Two invariants hold at every observable point: `1 <= size <= 128` and
//! `encoding < 2^size`. Every mutating operation re-establishes them or
//! fails with a [`ValueError`].

mod cast;
mod error;
mod ops;
mod value;

pub use cast::CastSource;
pub use error::ValueError;
pub use ops::{
    apply_binary, apply_binary_raw, apply_binary_raw_lhs, apply_unary, BinaryOpKind, OpOutput,
    UnaryOpKind,
};
pub use value::{Angle, BitArray, ClassicalValue, Raw, SignedInt, UnsignedInt};
