// Copyright contributors to the openqasm-translator project
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// Source location of a node: start and end positions, both one-based.
/// Spans are carried for diagnostics only; they never affect semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    start_line: u32,
    start_column: u32,
    end_line: u32,
    end_column: u32,
}

impl Span {
    pub fn new(start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Span {
        Span {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    /// A zero-length span at a single position.
    pub fn at(line: u32, column: u32) -> Span {
        Span::new(line, column, line, column)
    }

    pub fn start_line(&self) -> u32 {
        self.start_line
    }

    pub fn start_column(&self) -> u32 {
        self.start_column
    }

    pub fn end_line(&self) -> u32 {
        self.end_line
    }

    pub fn end_column(&self) -> u32 {
        self.end_column
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]", self.start_line, self.start_column)
    }
}

#[test]
fn test_span_display() {
    let span = Span::new(3, 14, 3, 20);
    assert_eq!(format!("{span}"), "[3:14]");
}
