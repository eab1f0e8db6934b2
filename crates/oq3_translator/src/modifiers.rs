// Copyright contributors to the openqasm-translator project
// SPDX-License-Identifier: Apache-2.0

// Application of gate modifiers to an instantiated gate handle.

use oq3_ast::ast::{GateModifierName, QuantumGateModifier};

use crate::backend::{Backend, GateHandle};
use crate::context::Context;
use crate::error::{err, ErrorKind, Result};
use crate::expressions::{as_f64, compute_expression, expect_i128};

/// Apply one modifier to `gate`, returning the new handle.
pub fn apply_modifier(
    gate: GateHandle,
    modifier: &QuantumGateModifier,
    context: &Context,
    circuit: &mut dyn Backend,
) -> Result<GateHandle> {
    match modifier.modifier() {
        GateModifierName::Ctrl | GateModifierName::NegCtrl => {
            let num_controls = match modifier.argument() {
                Some(expr) => {
                    let value = compute_expression(expr, context, circuit)?;
                    let count = expect_i128(&value, expr.span())?;
                    if count < 1 {
                        return err(
                            ErrorKind::TypeError(format!(
                                "control count must be positive, got {count}"
                            )),
                            modifier.span(),
                        );
                    }
                    count as u32
                }
                None => 1,
            };
            let negative = matches!(modifier.modifier(), GateModifierName::NegCtrl);
            Ok(circuit.control_gate(gate, num_controls, negative))
        }

        GateModifierName::Inv => Ok(circuit.inverse_gate(gate)),

        GateModifierName::Pow => match modifier.argument() {
            Some(expr) => {
                let value = compute_expression(expr, context, circuit)?;
                let exponent = as_f64(&value, expr.span())?;
                Ok(circuit.power_gate(gate, exponent))
            }
            None => err(ErrorKind::MissingExpression("pow modifier"), modifier.span()),
        },
    }
}
