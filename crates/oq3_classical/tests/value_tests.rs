// Copyright contributors to the openqasm-translator project
// SPDX-License-Identifier: Apache-2.0

use oq3_classical::{
    apply_binary, apply_unary, Angle, BinaryOpKind, BitArray, ClassicalValue, OpOutput, Raw,
    SignedInt, UnaryOpKind, UnsignedInt, ValueError,
};

//
// Construction and range boundaries
//

#[test]
fn test_unsigned_value_round_trip() {
    for size in [1u32, 4, 7, 64] {
        let max = if size >= 128 { u128::MAX } else { (1 << size) - 1 };
        for v in [0u128, 1, max] {
            let u = UnsignedInt::new(size, v).unwrap();
            assert_eq!(u.size(), size);
            assert_eq!(u.value(), v);
        }
    }
}

#[test]
fn test_unsigned_overflow_boundary() {
    assert!(UnsignedInt::new(4, 15).is_ok());
    let err = UnsignedInt::new(4, 16).unwrap_err();
    assert!(matches!(err, ValueError::Overflow { size: 4, .. }));
}

#[test]
fn test_signed_range_boundary_is_exact() {
    // int[4] holds [-8, 7]: 7 succeeds, 8 fails, -8 succeeds, -9 fails.
    assert_eq!(SignedInt::new(4, 7).unwrap().value(), 7);
    assert!(matches!(
        SignedInt::new(4, 8),
        Err(ValueError::Overflow { .. })
    ));
    assert_eq!(SignedInt::new(4, -8).unwrap().value(), -8);
    assert!(matches!(
        SignedInt::new(4, -9),
        Err(ValueError::Overflow { .. })
    ));
}

#[test]
fn test_signed_negative_round_trip() {
    let s = SignedInt::new(4, -6).unwrap();
    assert_eq!(s.value(), -6);
    assert_eq!(s.encoding(), 0b1010);
}

#[test]
fn test_zero_width_rejected() {
    assert!(matches!(
        UnsignedInt::new(0, 0),
        Err(ValueError::InvalidWidth { .. })
    ));
}

#[test]
fn test_bit_array_round_trip() {
    let b = BitArray::new(4, "1101").unwrap();
    assert_eq!(b.size(), 4);
    assert_eq!(b.value(), "1101");
    assert_eq!(b.as_unsigned(), 0b1101);
}

#[test]
fn test_bit_array_length_must_match_width() {
    assert!(matches!(
        BitArray::new(4, "11101"),
        Err(ValueError::WidthMismatch { .. })
    ));
    assert!(matches!(
        BitArray::new(4, "-110"),
        Err(ValueError::InvalidBitString { .. })
    ));
}

#[test]
fn test_angle_value() {
    let angle = Angle::new(4, 3).unwrap();
    let expected = 3.0 * std::f64::consts::TAU / 15.0;
    assert!((angle.value() - expected).abs() < 1e-12);
}

#[test]
fn test_angle_from_radians_wraps() {
    let tau = std::f64::consts::TAU;
    let a = Angle::from_radians(8, tau + 1.0).unwrap();
    let b = Angle::from_radians(8, 1.0).unwrap();
    assert_eq!(a.encoding(), b.encoding());
}

//
// Indexing and slicing (bit 0 is the least significant bit)
//

#[test]
fn test_bit_array_indexing() {
    let b = BitArray::new(3, "110").unwrap().to_value();
    assert_eq!(
        b.index(0).unwrap(),
        BitArray::new(1, "0").unwrap().to_value()
    );
    assert_eq!(
        b.index(1).unwrap(),
        BitArray::new(1, "1").unwrap().to_value()
    );
    assert_eq!(
        b.slice(1, 3).unwrap(),
        BitArray::new(2, "11").unwrap().to_value()
    );
}

#[test]
fn test_unsigned_indexing() {
    let a = UnsignedInt::new(4, 6).unwrap().to_value();
    assert_eq!(
        a.index(2).unwrap(),
        UnsignedInt::new(1, 1).unwrap().to_value()
    );
    assert_eq!(
        a.slice(0, 2).unwrap(),
        UnsignedInt::new(2, 2).unwrap().to_value()
    );
}

#[test]
fn test_signed_indexing_needs_two_bits() {
    let s = SignedInt::new(4, 6).unwrap().to_value();
    assert_eq!(
        s.index(2).unwrap(),
        SignedInt::new(2, 1).unwrap().to_value()
    );
    // A 2-bit slice of a signed value is 3 bits wide: the raw bits plus a
    // zero sign bit.
    assert_eq!(
        s.slice(0, 2).unwrap(),
        SignedInt::new(3, 2).unwrap().to_value()
    );
}

#[test]
fn test_negative_index_counts_from_the_top() {
    let b = BitArray::new(3, "110").unwrap().to_value();
    assert_eq!(
        b.index(-1).unwrap(),
        BitArray::new(1, "1").unwrap().to_value()
    );
    assert!(matches!(
        b.index(3),
        Err(ValueError::IndexOutOfRange { index: 3, .. })
    ));
    assert!(matches!(
        b.index(-4),
        Err(ValueError::IndexOutOfRange { .. })
    ));
}

#[test]
fn test_index_assign() {
    // s = -3 is 1101; clearing bit 0 gives 1100 = -4.
    let mut s = SignedInt::new(4, -3).unwrap().to_value();
    s.index_assign(0, 0).unwrap();
    assert_eq!(s, SignedInt::new(4, -4).unwrap().to_value());

    let mut a = UnsignedInt::new(4, 4).unwrap().to_value();
    a.index_assign(1, 1).unwrap();
    assert_eq!(a, UnsignedInt::new(4, 6).unwrap().to_value());

    assert!(matches!(
        a.index_assign(0, 2),
        Err(ValueError::Overflow { .. })
    ));
}

#[test]
fn test_select_gathers_bits_in_order() {
    let b = BitArray::new(4, "0110").unwrap().to_value();
    let picked = b.select(&[1, 2]).unwrap();
    assert_eq!(picked, BitArray::new(2, "11").unwrap().to_value());
}

//
// Assignment rules
//

#[test]
fn test_same_kind_assignment_checks_width() {
    let mut wide = UnsignedInt::new(8, 0).unwrap().to_value();
    let narrow = UnsignedInt::new(4, 9).unwrap().to_value();
    wide.set_value(&narrow).unwrap();
    assert_eq!(wide.encoding(), 9);

    let mut narrow = UnsignedInt::new(4, 0).unwrap().to_value();
    let wide = UnsignedInt::new(8, 9).unwrap().to_value();
    assert!(matches!(
        narrow.set_value(&wide),
        Err(ValueError::Overflow { .. })
    ));
}

#[test]
fn test_cross_kind_assignment_requires_cast() {
    let mut s = SignedInt::new(4, 0).unwrap().to_value();
    let u = UnsignedInt::new(4, 6).unwrap().to_value();
    assert_eq!(
        s.set_value(&u),
        Err(ValueError::InvalidAssignment {
            from: "uint",
            to: "int"
        })
    );
}

#[test]
fn test_signed_assignment_sign_extends() {
    let mut wide = SignedInt::new(8, 0).unwrap().to_value();
    let narrow = SignedInt::new(4, -3).unwrap().to_value();
    wide.set_value(&narrow).unwrap();
    assert_eq!(wide, SignedInt::new(8, -3).unwrap().to_value());
}

#[test]
fn test_raw_assignment_is_range_checked() {
    let mut s = SignedInt::new(4, 0).unwrap().to_value();
    s.set_raw(&Raw::Int(-3)).unwrap();
    assert_eq!(s, SignedInt::new(4, -3).unwrap().to_value());
    assert!(matches!(
        s.set_raw(&Raw::Int(8)),
        Err(ValueError::Overflow { .. })
    ));

    let mut u = UnsignedInt::new(4, 0).unwrap().to_value();
    assert!(matches!(
        u.set_raw(&Raw::Int(-1)),
        Err(ValueError::Overflow { .. })
    ));

    let mut b = BitArray::zeros(3).unwrap().to_value();
    b.set_raw(&Raw::Str("111".to_string())).unwrap();
    assert_eq!(b, BitArray::new(3, "111").unwrap().to_value());
}

//
// Operator semantics ported from the upstream draft's suite
//

#[test]
fn test_int_uint_operations() {
    let a1 = UnsignedInt::new(4, 5).unwrap().to_value();
    let s1 = SignedInt::new(4, 6).unwrap().to_value();
    let s2 = SignedInt::new(4, -6).unwrap().to_value();

    let c1 = apply_binary(BinaryOpKind::Add, &a1, &s1).unwrap();
    assert_eq!(c1, OpOutput::Value(SignedInt::new(5, 11).unwrap().to_value()));

    let c2 = apply_binary(BinaryOpKind::Add, &a1, &s2).unwrap();
    assert_eq!(c2, OpOutput::Value(SignedInt::new(5, -1).unwrap().to_value()));

    let d1 = apply_binary(BinaryOpKind::Sub, &a1, &s1).unwrap();
    assert_eq!(d1, OpOutput::Value(SignedInt::new(5, -1).unwrap().to_value()));

    let d2 = apply_binary(BinaryOpKind::Sub, &a1, &s2).unwrap();
    assert_eq!(d2, OpOutput::Value(SignedInt::new(5, 11).unwrap().to_value()));
}

#[test]
fn test_pow_with_typed_operands() {
    let u = UnsignedInt::new(10, 2).unwrap().to_value();
    let s = SignedInt::new(3, 3).unwrap().to_value();
    let out = apply_binary(BinaryOpKind::Pow, &u, &s).unwrap();
    assert_eq!(out, OpOutput::Value(SignedInt::new(10, 8).unwrap().to_value()));
}

#[test]
fn test_comparisons_yield_raw_bools() {
    let a = UnsignedInt::new(4, 5).unwrap().to_value();
    let b = SignedInt::new(4, 6).unwrap().to_value();
    assert_eq!(
        apply_binary(BinaryOpKind::Lt, &a, &b).unwrap(),
        OpOutput::Bool(true)
    );
    assert_eq!(
        apply_binary(BinaryOpKind::Eq, &a, &b).unwrap(),
        OpOutput::Bool(false)
    );
}

#[test]
fn test_angle_addition_wraps_a_full_turn() {
    let a = Angle::new(4, 10).unwrap().to_value();
    let b = Angle::new(4, 8).unwrap().to_value();
    let out = apply_binary(BinaryOpKind::Add, &a, &b).unwrap();
    // 10 + 8 = 18 ≡ 3 (mod 15)
    assert_eq!(out, OpOutput::Value(Angle::new(4, 3).unwrap().to_value()));
}

#[test]
fn test_logic_not_tests_for_zero() {
    let zero = UnsignedInt::new(4, 0).unwrap().to_value();
    let one = UnsignedInt::new(4, 1).unwrap().to_value();
    assert_eq!(apply_unary(UnaryOpKind::Not, &zero).unwrap(), OpOutput::Bool(true));
    assert_eq!(apply_unary(UnaryOpKind::Not, &one).unwrap(), OpOutput::Bool(false));
}

#[test]
fn test_is_zero_and_type_names() {
    let b = BitArray::zeros(4).unwrap().to_value();
    assert!(b.is_zero());
    assert_eq!(b.type_name(), "bit");
    let s = SignedInt::new(4, -1).unwrap().to_value();
    assert!(!s.is_zero());
    assert_eq!(s.type_name(), "int");
    assert_eq!(
        ClassicalValue::Angle(Angle::new(4, 0).unwrap()).type_name(),
        "angle"
    );
}
