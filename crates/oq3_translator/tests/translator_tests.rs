// Copyright contributors to the openqasm-translator project
// SPDX-License-Identifier: Apache-2.0

// End-to-end tests: hand-built program trees interpreted against the
// recording backend, with assertions on the ordered backend call sequence
// and on the final symbol bindings.

use oq3_ast::ast::{self, Expression, IndexIdentifier};
use oq3_classical::{ClassicalValue, Raw};
use oq3_translator::{
    Bit, ErrorKind, GateSpec, Qubit, StaticIncludes, TraceBackend, TraceOp, Translator, Value,
};

fn translate(
    statements: Vec<ast::Statement>,
) -> (oq3_translator::Context, TraceBackend) {
    let program = ast::Program::with_statements(statements);
    let mut backend = TraceBackend::new();
    let context = Translator::new()
        .translate(&program, &mut backend)
        .expect("translation should succeed");
    (context, backend)
}

fn translate_err(statements: Vec<ast::Statement>) -> oq3_translator::TranslationError {
    let program = ast::Program::with_statements(statements);
    let mut backend = TraceBackend::new();
    Translator::new()
        .translate(&program, &mut backend)
        .expect_err("translation should fail")
}

fn h_gate(target: &str) -> ast::Statement {
    ast::QuantumGate::new("h", vec![], vec![IndexIdentifier::plain(target)], vec![]).to_stmt()
}

//
// qubit q; bit c; h q; c = measure q;
//

#[test]
fn test_single_qubit_measurement_sequence() {
    let (_, backend) = translate(vec![
        ast::QubitDeclaration::new("q", None).to_stmt(),
        ast::ClassicalDeclaration::new(ast::ClassicalType::bit(None), "c", None).to_stmt(),
        h_gate("q"),
        ast::QuantumMeasurementAssignment::new(
            IndexIdentifier::plain("c"),
            ast::QuantumMeasurement::new(IndexIdentifier::plain("q")),
        )
        .to_stmt(),
    ]);

    let ops = backend.ops();
    assert_eq!(ops.len(), 4);
    assert_eq!(
        ops[0],
        TraceOp::AllocateQubitRegister {
            name: "q".to_string(),
            size: 1
        }
    );
    let gate = match &ops[1] {
        TraceOp::Gate { gate, qubits } => {
            assert_eq!(qubits, &vec![Qubit::new(0, 0)]);
            *gate
        }
        other => panic!("expected a gate, got {other:?}"),
    };
    assert_eq!(backend.gate_name(gate), "h");
    // The classical register is attached at first measurement use.
    assert_eq!(
        ops[2],
        TraceOp::AllocateBitRegister {
            name: "c".to_string(),
            size: 1
        }
    );
    assert_eq!(
        ops[3],
        TraceOp::Measure {
            qubit: Qubit::new(0, 0),
            bit: Bit::new(1, 0)
        }
    );
}

//
// const n = 3; int[n+1] x = 2;
//

#[test]
fn test_constant_feeds_declared_width() {
    let width_expr = ast::BinaryExpression::new(
        ast::BinaryOperator::Add,
        Expression::ident("n"),
        Expression::int(1),
    )
    .to_expr();
    let (context, _) = translate(vec![
        ast::ConstantDeclaration::new("n", Some(Expression::int(3))).to_stmt(),
        ast::ClassicalDeclaration::new(
            ast::ClassicalType::int(Some(width_expr)),
            "x",
            Some(Expression::int(2)),
        )
        .to_stmt(),
    ]);

    match context.lookup("n", None).unwrap() {
        Value::Raw(Raw::Int(3)) => {}
        other => panic!("`n` should stay raw, got {other:?}"),
    }
    match context.lookup("x", None).unwrap() {
        Value::Classical(ClassicalValue::SignedInt(x)) => {
            assert_eq!(x.size(), 4);
            assert_eq!(x.value(), 2);
        }
        other => panic!("`x` should be int[4], got {other:?}"),
    }
}

//
// uint[4] x = 0; for i in [0:3] { x += i; }
//

#[test]
fn test_for_loop_accumulates_and_does_not_leak() {
    let body = vec![ast::ClassicalAssignment::new(
        IndexIdentifier::plain("x"),
        ast::AssignmentOperator::AddAssign,
        Expression::ident("i"),
    )
    .to_stmt()];
    let (context, _) = translate(vec![
        ast::ClassicalDeclaration::new(
            ast::ClassicalType::uint(Some(Expression::int(4))),
            "x",
            Some(Expression::int(0)),
        )
        .to_stmt(),
        ast::ForInLoop::new(
            ast::Identifier::new("i"),
            ast::SetDeclaration::Range(ast::RangeDefinition::new(
                Some(Expression::int(0)),
                Some(Expression::int(3)),
                None,
            )),
            body,
        )
        .to_stmt(),
    ]);

    match context.lookup("x", None).unwrap() {
        Value::Classical(value) => assert_eq!(value.encoding(), 3),
        other => panic!("`x` should be classical, got {other:?}"),
    }
    assert!(!context.is_declared("i"));
}

#[test]
fn test_loop_body_declarations_do_not_leak() {
    let body = vec![ast::ClassicalDeclaration::new(
        ast::ClassicalType::int(Some(Expression::int(4))),
        "t",
        Some(Expression::ident("i")),
    )
    .to_stmt()];
    let (context, _) = translate(vec![ast::ForInLoop::new(
        ast::Identifier::new("i"),
        ast::SetDeclaration::Range(ast::RangeDefinition::new(
            Some(Expression::int(0)),
            Some(Expression::int(2)),
            None,
        )),
        body,
    )
    .to_stmt()]);
    assert!(!context.is_declared("t"));
    assert!(!context.is_declared("i"));
}

#[test]
fn test_for_loop_over_register_iterates_qubits() {
    let (_, backend) = translate(vec![
        ast::QubitDeclaration::new("q", Some(Expression::int(3))).to_stmt(),
        ast::ForInLoop::new(
            ast::Identifier::new("k"),
            ast::SetDeclaration::Identifier(ast::Identifier::new("q")),
            vec![h_gate("k")],
        )
        .to_stmt(),
    ]);
    let gates: Vec<_> = backend
        .ops()
        .iter()
        .filter_map(|op| match op {
            TraceOp::Gate { qubits, .. } => Some(qubits.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(
        gates,
        vec![
            vec![Qubit::new(0, 0)],
            vec![Qubit::new(0, 1)],
            vec![Qubit::new(0, 2)],
        ]
    );
}

//
// Gate definitions and closures
//

#[test]
fn test_gate_definition_replays_body_on_call() {
    let definition = ast::QuantumGateDefinition::new(
        ast::Identifier::new("mygate"),
        vec![ast::ClassicalArgument::new(
            ast::ClassicalType::angle(None),
            "theta",
        )],
        vec![ast::Identifier::new("a")],
        vec![ast::QuantumGate::new(
            "rx",
            vec![Expression::ident("theta")],
            vec![IndexIdentifier::plain("a")],
            vec![],
        )
        .to_stmt()],
    )
    .to_stmt();

    let (_, backend) = translate(vec![
        ast::QubitDeclaration::new("q", None).to_stmt(),
        definition,
        ast::QuantumGate::new(
            "mygate",
            vec![ast::RealLiteral::new(0.5).to_expr()],
            vec![IndexIdentifier::plain("q")],
            vec![],
        )
        .to_stmt(),
    ]);

    // Definition itself produces no backend calls; the call appends one
    // composite gate built from a subprogram.
    let gate = match &backend.ops()[1] {
        TraceOp::Gate { gate, qubits } => {
            assert_eq!(qubits, &vec![Qubit::new(0, 0)]);
            *gate
        }
        other => panic!("expected a gate, got {other:?}"),
    };
    match backend.gate_spec(gate) {
        GateSpec::Composite { name, params, ops } => {
            assert_eq!(name, "mygate");
            assert_eq!(params, vec![0.5]);
            // Subprogram: one formal-qubit allocation, one rx application.
            assert_eq!(ops.len(), 2);
            assert!(matches!(
                ops[0],
                TraceOp::AllocateQubitRegister { size: 1, .. }
            ));
            match &ops[1] {
                TraceOp::Gate { gate, .. } => assert_eq!(backend.gate_name(*gate), "rx"),
                other => panic!("expected rx in body, got {other:?}"),
            }
        }
        other => panic!("expected composite gate, got {other:?}"),
    }
}

#[test]
fn test_gate_closure_captures_definition_scope() {
    let definition = ast::QuantumGateDefinition::new(
        ast::Identifier::new("g"),
        vec![],
        vec![ast::Identifier::new("a")],
        vec![ast::QuantumGate::new(
            "rx",
            vec![Expression::ident("a0")],
            vec![IndexIdentifier::plain("a")],
            vec![],
        )
        .to_stmt()],
    )
    .to_stmt();

    let (_, backend) = translate(vec![
        ast::QubitDeclaration::new("q", None).to_stmt(),
        ast::ConstantDeclaration::new("a0", Some(ast::RealLiteral::new(0.25).to_expr())).to_stmt(),
        definition,
        // Rebinding the constant after the definition must not be seen by
        // the closure.
        ast::ConstantDeclaration::new("a0", Some(ast::RealLiteral::new(0.5).to_expr())).to_stmt(),
        ast::QuantumGate::new("g", vec![], vec![IndexIdentifier::plain("q")], vec![]).to_stmt(),
    ]);

    let gate = match &backend.ops()[1] {
        TraceOp::Gate { gate, .. } => *gate,
        other => panic!("expected a gate, got {other:?}"),
    };
    match backend.gate_spec(gate) {
        GateSpec::Composite { ops, .. } => match &ops[1] {
            TraceOp::Gate { gate, .. } => match backend.gate_spec(*gate) {
                GateSpec::Primitive { name, params } => {
                    assert_eq!(name, "rx");
                    assert_eq!(params, vec![0.25]);
                }
                other => panic!("expected rx primitive, got {other:?}"),
            },
            other => panic!("expected gate op, got {other:?}"),
        },
        other => panic!("expected composite gate, got {other:?}"),
    }
}

#[test]
fn test_gate_arity_is_checked() {
    let definition = ast::QuantumGateDefinition::new(
        ast::Identifier::new("g"),
        vec![ast::ClassicalArgument::new(
            ast::ClassicalType::angle(None),
            "theta",
        )],
        vec![ast::Identifier::new("a")],
        vec![],
    )
    .to_stmt();
    let error = translate_err(vec![
        ast::QubitDeclaration::new("q", None).to_stmt(),
        definition,
        // No parameters supplied for a one-parameter gate.
        ast::QuantumGate::new("g", vec![], vec![IndexIdentifier::plain("q")], vec![]).to_stmt(),
    ]);
    assert_eq!(
        error.kind(),
        &ErrorKind::NumGateParams {
            name: "g".to_string(),
            expected: 1,
            actual: 0
        }
    );
}

//
// Modifiers
//

#[test]
fn test_modifiers_chain_over_the_gate_handle() {
    let (_, backend) = translate(vec![
        ast::QubitDeclaration::new("q", None).to_stmt(),
        ast::QuantumGate::new(
            "x",
            vec![],
            vec![IndexIdentifier::plain("q")],
            vec![
                ast::QuantumGateModifier::new(ast::GateModifierName::Inv, None),
                ast::QuantumGateModifier::new(
                    ast::GateModifierName::Pow,
                    Some(Expression::int(2)),
                ),
            ],
        )
        .to_stmt(),
    ]);

    let gate = match &backend.ops()[1] {
        TraceOp::Gate { gate, .. } => *gate,
        other => panic!("expected a gate, got {other:?}"),
    };
    // Applied left to right: pow wraps inv wraps x.
    match backend.gate_spec(gate) {
        GateSpec::Power { base, exponent } => {
            assert_eq!(exponent, 2.0);
            assert!(matches!(backend.gate_spec(base), GateSpec::Inverse { .. }));
        }
        other => panic!("expected power spec, got {other:?}"),
    }
    assert_eq!(backend.gate_name(gate), "x");
}

#[test]
fn test_pow_modifier_requires_an_argument() {
    let error = translate_err(vec![
        ast::QubitDeclaration::new("q", None).to_stmt(),
        ast::QuantumGate::new(
            "x",
            vec![],
            vec![IndexIdentifier::plain("q")],
            vec![ast::QuantumGateModifier::new(ast::GateModifierName::Pow, None)],
        )
        .to_stmt(),
    ]);
    assert_eq!(error.kind(), &ErrorKind::MissingExpression("pow modifier"));
}

#[test]
fn test_negctrl_takes_a_control_count() {
    let (_, backend) = translate(vec![
        ast::QubitDeclaration::new("q", Some(Expression::int(3))).to_stmt(),
        ast::QuantumGate::new(
            "x",
            vec![],
            vec![ast::Slice::new(
                ast::Identifier::new("q"),
                ast::RangeDefinition::new(None, None, None),
            )
            .to_index_identifier()],
            vec![ast::QuantumGateModifier::new(
                ast::GateModifierName::NegCtrl,
                Some(Expression::int(2)),
            )],
        )
        .to_stmt(),
    ]);
    let gate = match &backend.ops()[1] {
        TraceOp::Gate { gate, qubits } => {
            assert_eq!(qubits.len(), 3);
            *gate
        }
        other => panic!("expected a gate, got {other:?}"),
    };
    assert_eq!(
        backend.gate_spec(gate),
        GateSpec::Control {
            base: oq3_translator::GateHandle::new(0),
            num_controls: 2,
            negative: true
        }
    );
}

//
// Branching
//

#[test]
fn test_branch_runs_in_the_current_scope() {
    let (context, backend) = translate(vec![
        ast::BranchingStatement::new(
            ast::BooleanLiteral::new(true).to_expr(),
            vec![ast::QubitDeclaration::new("q2", None).to_stmt()],
            Some(vec![ast::QubitDeclaration::new("q3", None).to_stmt()]),
        )
        .to_stmt(),
    ]);
    // Branch bodies mutate the enclosing scope directly.
    assert!(context.is_declared("q2"));
    assert!(!context.is_declared("q3"));
    assert_eq!(backend.ops().len(), 1);
}

#[test]
fn test_else_branch_when_condition_is_false() {
    let condition = ast::BinaryExpression::new(
        ast::BinaryOperator::Eq,
        Expression::int(1),
        Expression::int(2),
    )
    .to_expr();
    let (context, _) = translate(vec![
        ast::BranchingStatement::new(
            condition,
            vec![ast::QubitDeclaration::new("q2", None).to_stmt()],
            Some(vec![ast::QubitDeclaration::new("q3", None).to_stmt()]),
        )
        .to_stmt(),
    ]);
    assert!(!context.is_declared("q2"));
    assert!(context.is_declared("q3"));
}

//
// Measurement targets
//

#[test]
fn test_indexed_measurement_attaches_register_once() {
    let measure = |target: ast::IndexIdentifier, source: ast::IndexIdentifier| {
        ast::QuantumMeasurementAssignment::new(target, ast::QuantumMeasurement::new(source))
            .to_stmt()
    };
    let subscript = |name: &str, index: i128| {
        ast::Subscript::new(ast::Identifier::new(name), Expression::int(index))
            .to_index_identifier()
    };
    let (_, backend) = translate(vec![
        ast::QubitDeclaration::new("q", Some(Expression::int(2))).to_stmt(),
        ast::ClassicalDeclaration::new(
            ast::ClassicalType::bit(Some(Expression::int(2))),
            "c",
            None,
        )
        .to_stmt(),
        measure(subscript("c", 1), subscript("q", 0)),
        measure(subscript("c", 0), subscript("q", 1)),
    ]);

    let allocations: Vec<_> = backend
        .ops()
        .iter()
        .filter(|op| matches!(op, TraceOp::AllocateBitRegister { .. }))
        .collect();
    assert_eq!(
        allocations,
        vec![&TraceOp::AllocateBitRegister {
            name: "c".to_string(),
            size: 2
        }]
    );
    let measures: Vec<_> = backend
        .ops()
        .iter()
        .filter_map(|op| match op {
            TraceOp::Measure { qubit, bit } => Some((*qubit, *bit)),
            _ => None,
        })
        .collect();
    assert_eq!(
        measures,
        vec![
            (Qubit::new(0, 0), Bit::new(1, 1)),
            (Qubit::new(0, 1), Bit::new(1, 0)),
        ]
    );
}

//
// Reset, barrier, phase
//

#[test]
fn test_reset_barrier_and_phase() {
    let (_, backend) = translate(vec![
        ast::QubitDeclaration::new("q", Some(Expression::int(2))).to_stmt(),
        ast::QuantumReset::new(vec![IndexIdentifier::plain("q")]).to_stmt(),
        ast::QuantumBarrier::new(vec![IndexIdentifier::plain("q")]).to_stmt(),
        // gphase(pi / 2);
        ast::QuantumPhase::new(
            ast::BinaryExpression::new(
                ast::BinaryOperator::Div,
                ast::Constant::new("pi").to_expr(),
                Expression::int(2),
            )
            .to_expr(),
            vec![],
            vec![],
        )
        .to_stmt(),
    ]);

    assert!(matches!(
        backend.ops()[1],
        TraceOp::Reset { ref qubits } if qubits.len() == 2
    ));
    assert!(matches!(
        backend.ops()[2],
        TraceOp::Barrier { ref qubits } if qubits.len() == 2
    ));
    match backend.ops()[3] {
        TraceOp::GlobalPhase { angle } => {
            assert!((angle - std::f64::consts::FRAC_PI_2).abs() < 1e-12)
        }
        ref other => panic!("expected a global phase, got {other:?}"),
    }
}

#[test]
fn test_single_qubit_phase_appends_a_phase_gate() {
    let (_, backend) = translate(vec![
        ast::QubitDeclaration::new("q", None).to_stmt(),
        ast::QuantumPhase::new(
            ast::RealLiteral::new(0.25).to_expr(),
            vec![IndexIdentifier::plain("q")],
            vec![],
        )
        .to_stmt(),
    ]);
    let gate = match &backend.ops()[1] {
        TraceOp::Gate { gate, qubits } => {
            assert_eq!(qubits, &vec![Qubit::new(0, 0)]);
            *gate
        }
        other => panic!("expected a gate, got {other:?}"),
    };
    assert_eq!(backend.gate_spec(gate), GateSpec::Phase { angle: 0.25 });
}

#[test]
fn test_phase_on_many_qubits_is_unsupported() {
    let error = translate_err(vec![
        ast::QubitDeclaration::new("q", Some(Expression::int(2))).to_stmt(),
        ast::QuantumPhase::new(
            ast::RealLiteral::new(0.25).to_expr(),
            vec![IndexIdentifier::plain("q")],
            vec![],
        )
        .to_stmt(),
    ]);
    assert!(matches!(error.kind(), ErrorKind::UnsupportedFeature(..)));
}

//
// Includes
//

#[test]
fn test_include_feeds_the_same_context() {
    let mut includes = StaticIncludes::new();
    includes.insert(
        "defs.inc",
        ast::Program::with_statements(vec![ast::QubitDeclaration::new("iq", None).to_stmt()]),
    );

    let program = ast::Program::with_statements(vec![
        ast::Include::new("defs.inc").to_stmt(),
        h_gate("iq"),
    ]);
    let mut backend = TraceBackend::new();
    let context = Translator::with_includes(Box::new(includes))
        .translate(&program, &mut backend)
        .unwrap();
    assert!(context.is_declared("iq"));
    assert_eq!(backend.ops().len(), 2);
}

#[test]
fn test_missing_include_reports_search_paths() {
    let includes =
        StaticIncludes::with_search_paths(vec![std::path::PathBuf::from("/usr/share/qasm")]);
    let program =
        ast::Program::with_statements(vec![ast::Include::new("nope.inc").to_stmt()]);
    let mut backend = TraceBackend::new();
    let error = Translator::with_includes(Box::new(includes))
        .translate(&program, &mut backend)
        .unwrap_err();
    match error.kind() {
        ErrorKind::InvalidIncludePath { file, searched } => {
            assert_eq!(file, "nope.inc");
            assert_eq!(searched.len(), 1);
        }
        other => panic!("expected include failure, got {other:?}"),
    }
}

//
// Casts and assignment strictness end to end
//

#[test]
fn test_cast_expression_reinterprets_width() {
    let cast = ast::CastExpression::new(
        ast::ClassicalType::int(Some(Expression::int(4))),
        vec![Expression::ident("u")],
    )
    .to_expr();
    let (context, _) = translate(vec![
        ast::ClassicalDeclaration::new(
            ast::ClassicalType::uint(Some(Expression::int(4))),
            "u",
            Some(Expression::int(14)),
        )
        .to_stmt(),
        ast::ClassicalDeclaration::new(ast::ClassicalType::int(None), "y", Some(cast)).to_stmt(),
    ]);
    match context.lookup("y", None).unwrap() {
        Value::Classical(ClassicalValue::SignedInt(y)) => assert_eq!(y.value(), -2),
        other => panic!("`y` should be int, got {other:?}"),
    }
}

#[test]
fn test_plain_cross_kind_assignment_is_rejected() {
    let error = translate_err(vec![
        ast::ClassicalDeclaration::new(
            ast::ClassicalType::uint(Some(Expression::int(4))),
            "u",
            Some(Expression::int(6)),
        )
        .to_stmt(),
        ast::ClassicalDeclaration::new(
            ast::ClassicalType::int(Some(Expression::int(4))),
            "s",
            Some(Expression::int(0)),
        )
        .to_stmt(),
        ast::ClassicalAssignment::new(
            IndexIdentifier::plain("s"),
            ast::AssignmentOperator::Assign,
            Expression::ident("u"),
        )
        .to_stmt(),
    ]);
    assert!(matches!(
        error.kind(),
        ErrorKind::Value(oq3_classical::ValueError::InvalidAssignment { .. })
    ));
}

//
// Failure taxonomy
//

#[test]
fn test_unknown_gate_name() {
    let error = translate_err(vec![
        ast::QubitDeclaration::new("q", None).to_stmt(),
        ast::QuantumGate::new("nosuchgate", vec![], vec![IndexIdentifier::plain("q")], vec![])
            .to_stmt(),
    ]);
    assert_eq!(
        error.kind(),
        &ErrorKind::UndefinedSymbol("nosuchgate".to_string())
    );
}

#[test]
fn test_unsupported_statement_names_the_kind() {
    let error = translate_err(vec![ast::WhileLoop::new(
        ast::BooleanLiteral::new(true).to_expr(),
        vec![],
    )
    .to_stmt()]);
    assert_eq!(
        error.kind(),
        &ErrorKind::UnsupportedFeature("WhileLoop".to_string())
    );
}

#[test]
fn test_for_range_requires_both_bounds() {
    let error = translate_err(vec![ast::ForInLoop::new(
        ast::Identifier::new("i"),
        ast::SetDeclaration::Range(ast::RangeDefinition::new(
            Some(Expression::int(0)),
            None,
            None,
        )),
        vec![],
    )
    .to_stmt()]);
    assert_eq!(error.kind(), &ErrorKind::WrongRange("end"));
}

#[test]
fn test_uninitialized_use_reports_declaration() {
    let error = translate_err(vec![
        ast::ClassicalDeclaration::new(
            ast::ClassicalType::int(Some(Expression::int(8))),
            "x",
            None,
        )
        .to_stmt(),
        ast::ClassicalDeclaration::new(
            ast::ClassicalType::int(Some(Expression::int(8))),
            "y",
            Some(
                ast::BinaryExpression::new(
                    ast::BinaryOperator::Add,
                    Expression::ident("x"),
                    Expression::int(1),
                )
                .to_expr(),
            ),
        )
        .to_stmt(),
    ]);
    assert!(matches!(
        error.kind(),
        ErrorKind::UninitializedSymbol { name, .. } if name == "x"
    ));
}

#[test]
fn test_unknown_constant_lists_known_names() {
    let error = translate_err(vec![ast::ClassicalDeclaration::new(
        ast::ClassicalType::float(None),
        "f",
        Some(ast::Constant::new("twopi").to_expr()),
    )
    .to_stmt()]);
    match error.kind() {
        ErrorKind::UnknownConstant { name, known } => {
            assert_eq!(name, "twopi");
            assert_eq!(known.len(), 6);
        }
        other => panic!("expected unknown constant, got {other:?}"),
    }
}

#[test]
fn test_duration_literal_is_unsupported() {
    let error = translate_err(vec![ast::ClassicalDeclaration::new(
        ast::ClassicalType::float(None),
        "f",
        Some(ast::DurationLiteral::new(100.0, ast::TimeUnit::NanoSecond).to_expr()),
    )
    .to_stmt()]);
    assert_eq!(
        error.kind(),
        &ErrorKind::UnsupportedExpressionType("DurationLiteral".to_string())
    );
}

//
// Angles as gate parameters
//

#[test]
fn test_angle_declaration_feeds_gate_parameter() {
    let (_, backend) = translate(vec![
        ast::QubitDeclaration::new("q", None).to_stmt(),
        ast::ClassicalDeclaration::new(
            ast::ClassicalType::angle(Some(Expression::int(8))),
            "theta",
            Some(ast::Constant::new("pi").to_expr()),
        )
        .to_stmt(),
        ast::QuantumGate::new(
            "rx",
            vec![Expression::ident("theta")],
            vec![IndexIdentifier::plain("q")],
            vec![],
        )
        .to_stmt(),
    ]);
    let gate = match &backend.ops()[1] {
        TraceOp::Gate { gate, .. } => *gate,
        other => panic!("expected a gate, got {other:?}"),
    };
    match backend.gate_spec(gate) {
        GateSpec::Primitive { name, params } => {
            assert_eq!(name, "rx");
            // pi, quantized into angle[8].
            assert!((params[0] - std::f64::consts::PI).abs() < 0.05);
        }
        other => panic!("expected rx primitive, got {other:?}"),
    }
}
