// Copyright contributors to the openqasm-translator project
// SPDX-License-Identifier: Apache-2.0

//! Semantic evaluation for OpenQASM 3.
//!
//! Given a parsed [`oq3_ast`] tree, this crate resolves symbols, computes
//! classical expression values under the fixed-width type system of
//! [`oq3_classical`], and drives construction of a quantum program through
//! the [`Backend`] trait: register allocation, gate application, reset,
//! barrier, and measurement.
//!
//! Interpretation is single-threaded and strictly in program order. Every
//! failure aborts translation at the first offending statement and carries
//! the source span of the node that triggered it.
//!
//! The API surface is one level of file-structured modules: the symbol
//! table in `context`, expression evaluation in `expressions`, reference
//! resolution in `identifiers`, gate modifiers in `modifiers`, the
//! statement interpreter in `translator`, and the external boundaries in
//! `backend`. A recording [`TraceBackend`] is provided for tests and as a
//! reference consumer of the backend trait.

pub mod backend;
pub mod context;
pub mod error;
pub mod expressions;
pub mod identifiers;
pub mod modifiers;
pub mod trace;
pub mod translator;
mod value;

pub use backend::{
    Backend, Bit, BitRegister, GateHandle, IncludeResolver, PrimitiveGate, Qubit, QubitRegister,
    StaticIncludes, SubProgram,
};
pub use context::{Context, SymbolBinding};
pub use error::{ErrorKind, Result, TranslationError};
pub use trace::{GateSpec, TraceBackend, TraceOp};
pub use translator::Translator;
pub use value::{GateCallable, GateClosure, Value};
