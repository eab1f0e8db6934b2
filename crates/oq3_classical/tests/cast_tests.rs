// Copyright contributors to the openqasm-translator project
// SPDX-License-Identifier: Apache-2.0

use oq3_classical::{
    Angle, BitArray, CastSource, ClassicalValue, Raw, SignedInt, UnsignedInt, ValueError,
};

fn typed(value: ClassicalValue) -> CastSource {
    CastSource::Value(value)
}

//
// uint <-> int coercion, ported from the upstream draft's suite
//

#[test]
fn test_uint_coerce_from_int() {
    // uint[4] <- int[4] 6 keeps the value.
    let s = SignedInt::new(4, 6).unwrap().to_value();
    let u = UnsignedInt::cast(&typed(s), Some(4)).unwrap();
    assert_eq!(u, UnsignedInt::new(4, 6).unwrap());

    // uint[4] <- int[4] -6 wraps around 2^4.
    let s = SignedInt::new(4, -6).unwrap().to_value();
    let u = UnsignedInt::cast(&typed(s), Some(4)).unwrap();
    assert_eq!(u, UnsignedInt::new(4, 10).unwrap());
}

#[test]
fn test_int_coerce_from_uint() {
    // Widening from uint[3] is a plain widen.
    let a = UnsignedInt::new(3, 5).unwrap().to_value();
    let s = SignedInt::cast(&typed(a), Some(5)).unwrap();
    assert_eq!(s.value(), 5);

    // Equal widths reinterpret the top bit as sign: 14 -> -2.
    let a = UnsignedInt::new(4, 14).unwrap().to_value();
    let s = SignedInt::cast(&typed(a), Some(4)).unwrap();
    assert_eq!(s.value(), -2);

    // A wider target sees the plain value again.
    let a = UnsignedInt::new(4, 14).unwrap().to_value();
    let s = SignedInt::cast(&typed(a), Some(5)).unwrap();
    assert_eq!(s.value(), 14);

    // And 6 < 2^3 stays 6 even at equal width.
    let a = UnsignedInt::new(4, 6).unwrap().to_value();
    let s = SignedInt::cast(&typed(a), Some(4)).unwrap();
    assert_eq!(s.value(), 6);
}

#[test]
fn test_round_trip_without_bit_loss() {
    // int -> uint -> int round-trips when no bits are dropped.
    let s = SignedInt::new(4, 6).unwrap();
    let u = UnsignedInt::cast(&typed(s.clone().to_value()), Some(4)).unwrap();
    let back = SignedInt::cast(&typed(u.to_value()), Some(4)).unwrap();
    assert_eq!(back, s);

    // bit -> uint -> bit likewise.
    let b = BitArray::new(4, "1011").unwrap();
    let u = UnsignedInt::cast(&typed(b.clone().to_value()), None).unwrap();
    let back = BitArray::cast(&typed(u.to_value()), Some(4)).unwrap();
    assert_eq!(back, b);
}

//
// bit casts
//

#[test]
fn test_bits_from_encoding_of_any_kind() {
    let s = SignedInt::new(4, -3).unwrap().to_value();
    let b = BitArray::cast(&typed(s), None).unwrap();
    assert_eq!(b.value(), "1101");

    let a = Angle::new(4, 2).unwrap().to_value();
    let b = BitArray::cast(&typed(a), Some(4)).unwrap();
    assert_eq!(b.value(), "0010");
}

#[test]
fn test_bits_from_raw() {
    let b = BitArray::cast(&CastSource::Raw(Raw::Int(25)), None).unwrap();
    assert_eq!(b.size(), 5);
    assert_eq!(b.value(), "11001");

    let b = BitArray::cast(&CastSource::Raw(Raw::Bool(true)), None).unwrap();
    assert_eq!(b.size(), 1);
    assert_eq!(b.value(), "1");

    assert!(matches!(
        BitArray::cast(&CastSource::Raw(Raw::Int(-25)), None),
        Err(ValueError::InvalidCast { .. })
    ));
    assert!(matches!(
        BitArray::cast(&CastSource::Raw(Raw::Float(25.0)), None),
        Err(ValueError::InvalidCast { .. })
    ));
}

#[test]
fn test_bits_narrowing_checks_dropped_bits() {
    let u = UnsignedInt::new(8, 0b11001).unwrap().to_value();
    assert!(matches!(
        BitArray::cast(&typed(u), Some(4)),
        Err(ValueError::Overflow { .. })
    ));
}

//
// angle casts
//

#[test]
fn test_angle_from_bits_preserves_encoding() {
    let b = BitArray::new(4, "0010").unwrap().to_value();
    let a = Angle::cast(&typed(b), Some(4)).unwrap();
    assert_eq!(a.value(), Angle::new(4, 2).unwrap().value());
}

#[test]
fn test_angle_from_float_wraps() {
    let tau = std::f64::consts::TAU;
    let a = Angle::cast(&CastSource::Raw(Raw::Float(tau / 3.0)), Some(16)).unwrap();
    assert!((a.value() - tau / 3.0).abs() < 1e-3);
    let wrapped = Angle::cast(&CastSource::Raw(Raw::Float(tau + tau / 3.0)), Some(16)).unwrap();
    assert_eq!(a.encoding(), wrapped.encoding());
}

#[test]
fn test_angle_requantizes_across_widths() {
    let a = Angle::new(4, 5).unwrap().to_value();
    let wide = Angle::cast(&typed(a.clone()), Some(8)).unwrap();
    assert!((wide.value() - match a { ClassicalValue::Angle(ref v) => v.value(), _ => unreachable!() }).abs() < 0.05);
}

#[test]
fn test_angle_rejects_numeric_sources() {
    let u = UnsignedInt::new(4, 3).unwrap().to_value();
    assert!(matches!(
        Angle::cast(&typed(u), Some(4)),
        Err(ValueError::InvalidCast { .. })
    ));
    assert!(matches!(
        Angle::cast(&CastSource::Raw(Raw::Int(3)), Some(4)),
        Err(ValueError::InvalidCast { .. })
    ));
}

//
// int/uint from raw values
//

#[test]
fn test_int_from_float_truncates_toward_zero() {
    let s = SignedInt::cast(&CastSource::Raw(Raw::Float(-2.9)), Some(4)).unwrap();
    assert_eq!(s.value(), -2);
    let s = SignedInt::cast(&CastSource::Raw(Raw::Float(2.9)), Some(4)).unwrap();
    assert_eq!(s.value(), 2);
}

#[test]
fn test_int_from_bool() {
    let s = SignedInt::cast(&CastSource::Raw(Raw::Bool(true)), None).unwrap();
    assert_eq!(s.value(), 1);
    let u = UnsignedInt::cast(&CastSource::Raw(Raw::Bool(false)), None).unwrap();
    assert_eq!(u.size(), 1);
    assert_eq!(u.value(), 0);
}

#[test]
fn test_uint_from_negative_float_wraps() {
    let u = UnsignedInt::cast(&CastSource::Raw(Raw::Float(-6.0)), Some(4)).unwrap();
    assert_eq!(u.value(), 10);
}

#[test]
fn test_int_rejects_angle_and_strings() {
    let a = Angle::new(4, 3).unwrap().to_value();
    assert!(matches!(
        SignedInt::cast(&typed(a.clone()), Some(4)),
        Err(ValueError::InvalidCast { .. })
    ));
    assert!(matches!(
        UnsignedInt::cast(&typed(a), Some(4)),
        Err(ValueError::InvalidCast { .. })
    ));
    assert!(matches!(
        SignedInt::cast(&CastSource::Raw(Raw::Str("110".into())), None),
        Err(ValueError::InvalidCast { .. })
    ));
}
