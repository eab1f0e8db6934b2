// Copyright contributors to the openqasm-translator project
// SPDX-License-Identifier: Apache-2.0

//! The syntax tree consumed by the OpenQASM 3 translator.
//!
//! This crate defines the statement and expression nodes that a parser
//! produces and the translator walks. The tree is purely syntactic: no
//! symbol resolution or type information is recorded here. Every node
//! carries an optional source span used only for diagnostics.
//!
//! The statement set intentionally includes kinds the translator does not
//! (yet) process, such as `while` loops and calibration blocks. Keeping them
//! in the sum type forces the translator's dispatch to name each unsupported
//! kind explicitly instead of failing on an unknown node.

pub mod ast;
pub mod span;

pub use span::Span;
