// Copyright contributors to the openqasm-translator project
// SPDX-License-Identifier: Apache-2.0

// Explicit casts between classical value kinds, and from raw host values.
//
// Casting is more permissive than assignment: `uint -> int` reinterprets the
// top bit as sign when the widths are equal and widens plainly otherwise,
// negative values wrap when cast to `uint`, and floats map into an angle's
// [0, 2π) by wraparound. What a cast must never do is silently succeed for a
// source kind with no defined conversion; those fail with `InvalidCast`.
//
// When no target width is supplied it is derived from the source: a typed
// source keeps its own width, a raw numeric source gets the narrowest width
// that holds it (sign bit included for a signed target).

use crate::error::ValueError;
use crate::value::{
    mask, min_signed_width, min_unsigned_width, truncate_f64, Angle, BitArray, ClassicalValue, Raw,
    SignedInt, UnsignedInt, MAX_WIDTH,
};

/// A value being cast: either raw (from a literal) or already sized.
#[derive(Clone, Debug, PartialEq)]
pub enum CastSource {
    Raw(Raw),
    Value(ClassicalValue),
}

impl CastSource {
    fn describe(&self) -> String {
        match self {
            CastSource::Raw(raw) => raw.type_name().to_string(),
            CastSource::Value(value) => format!("{}[{}]", value.type_name(), value.size()),
        }
    }
}

fn reject(source: &CastSource, target: &'static str) -> ValueError {
    ValueError::InvalidCast {
        from: source.describe(),
        to: target,
    }
}

impl SignedInt {
    /// Cast to `int[width]`. Accepts integers, floats (truncated toward
    /// zero), booleans, and `uint`/`bit` values; rejects angles.
    pub fn cast(source: &CastSource, width: Option<u32>) -> Result<SignedInt, ValueError> {
        match source {
            CastSource::Value(ClassicalValue::SignedInt(s)) => {
                SignedInt::new(width.unwrap_or_else(|| s.size()), s.value())
            }
            CastSource::Value(ClassicalValue::UnsignedInt(..))
            | CastSource::Value(ClassicalValue::BitArray(..)) => {
                let (src_size, encoding) = match source {
                    CastSource::Value(v) => (v.size(), v.encoding()),
                    _ => unreachable!(),
                };
                let w = width.unwrap_or(src_size);
                if w == src_size {
                    // Same width: reinterpret the top bit as sign.
                    SignedInt::from_encoding(w, encoding)
                } else {
                    let value = i128::try_from(encoding).map_err(|_| ValueError::Overflow {
                        type_name: "int",
                        size: w,
                        value: encoding.to_string(),
                    })?;
                    SignedInt::new(w, value)
                }
            }
            CastSource::Value(ClassicalValue::Angle(..)) => Err(reject(source, "int")),
            CastSource::Raw(Raw::Int(i)) => {
                SignedInt::new(width.unwrap_or_else(|| min_signed_width(*i)), *i)
            }
            CastSource::Raw(Raw::Float(f)) => {
                let v = truncate_f64(*f, "int", width.unwrap_or(MAX_WIDTH))?;
                SignedInt::new(width.unwrap_or_else(|| min_signed_width(v)), v)
            }
            CastSource::Raw(Raw::Bool(b)) => {
                let v = *b as i128;
                SignedInt::new(width.unwrap_or_else(|| min_signed_width(v)), v)
            }
            CastSource::Raw(Raw::Str(..)) => Err(reject(source, "int")),
        }
    }
}

impl UnsignedInt {
    /// Cast to `uint[width]`. Negative sources wrap by adding `2^width`;
    /// angles are rejected.
    pub fn cast(source: &CastSource, width: Option<u32>) -> Result<UnsignedInt, ValueError> {
        match source {
            CastSource::Value(ClassicalValue::UnsignedInt(u)) => {
                UnsignedInt::new(width.unwrap_or_else(|| u.size()), u.value())
            }
            CastSource::Value(ClassicalValue::BitArray(b)) => {
                UnsignedInt::new(width.unwrap_or_else(|| b.size()), b.as_unsigned())
            }
            CastSource::Value(ClassicalValue::SignedInt(s)) => {
                from_signed_value(s.value(), width.unwrap_or_else(|| s.size()))
            }
            CastSource::Value(ClassicalValue::Angle(..)) => Err(reject(source, "uint")),
            CastSource::Raw(Raw::Int(i)) => {
                let w = width.unwrap_or_else(|| default_unsigned_width(*i));
                from_signed_value(*i, w)
            }
            CastSource::Raw(Raw::Float(f)) => {
                let v = truncate_f64(*f, "uint", width.unwrap_or(MAX_WIDTH))?;
                let w = width.unwrap_or_else(|| default_unsigned_width(v));
                from_signed_value(v, w)
            }
            CastSource::Raw(Raw::Bool(b)) => UnsignedInt::new(width.unwrap_or(1), *b as u128),
            CastSource::Raw(Raw::Str(..)) => Err(reject(source, "uint")),
        }
    }
}

/// `ceil(log2(|v|+1))`, plus one bit when negative so the wrapped value is
/// distinguishable.
fn default_unsigned_width(value: i128) -> u32 {
    if value < 0 {
        min_unsigned_width(value.unsigned_abs()) + 1
    } else {
        min_unsigned_width(value as u128)
    }
}

/// Wrap-on-negative conversion into `uint[width]`.
fn from_signed_value(value: i128, width: u32) -> Result<UnsignedInt, ValueError> {
    if value >= 0 {
        return UnsignedInt::new(width, value as u128);
    }
    // The wrap is only defined when |value| fits the target width.
    if width < MAX_WIDTH && value < -(1i128 << width) {
        return Err(ValueError::Overflow {
            type_name: "uint",
            size: width,
            value: value.to_string(),
        });
    }
    UnsignedInt::new(width, (value as u128) & mask(width))
}

impl BitArray {
    /// Cast to `bit[width]`: the source's raw encoding reinterpreted as
    /// bits. Raw integers must be non-negative; floats have no bit encoding.
    pub fn cast(source: &CastSource, width: Option<u32>) -> Result<BitArray, ValueError> {
        match source {
            CastSource::Value(value) => {
                let w = width.unwrap_or_else(|| value.size());
                BitArray::from_encoding(w, value.encoding())
            }
            CastSource::Raw(Raw::Int(i)) => {
                if *i < 0 {
                    return Err(reject(source, "bit"));
                }
                let w = width.unwrap_or_else(|| min_unsigned_width(*i as u128));
                BitArray::from_encoding(w, *i as u128)
            }
            CastSource::Raw(Raw::Bool(b)) => BitArray::from_encoding(width.unwrap_or(1), *b as u128),
            CastSource::Raw(Raw::Str(bits)) => {
                let w = width.unwrap_or(bits.chars().count() as u32);
                BitArray::new(w, bits)
            }
            CastSource::Raw(Raw::Float(..)) => Err(reject(source, "bit")),
        }
    }
}

impl Angle {
    /// Cast to `angle[width]`. Accepts `bit` (encoding reinterpretation),
    /// `angle` (re-quantized when widths differ), and floats wrapped into
    /// `[0, 2π)`; integer kinds are rejected.
    pub fn cast(source: &CastSource, width: Option<u32>) -> Result<Angle, ValueError> {
        match source {
            CastSource::Value(ClassicalValue::Angle(a)) => {
                let w = width.unwrap_or_else(|| a.size());
                if w == a.size() {
                    Angle::new(w, a.encoding())
                } else {
                    Angle::from_radians(w, a.value())
                }
            }
            CastSource::Value(ClassicalValue::BitArray(b)) => {
                Angle::new(width.unwrap_or_else(|| b.size()), b.as_unsigned())
            }
            CastSource::Value(ClassicalValue::SignedInt(..))
            | CastSource::Value(ClassicalValue::UnsignedInt(..)) => Err(reject(source, "angle")),
            CastSource::Raw(Raw::Float(f)) => match width {
                Some(w) => Angle::from_radians(w, *f),
                // A bare float carries no width information.
                None => Err(reject(source, "angle")),
            },
            CastSource::Raw(..) => Err(reject(source, "angle")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_width_uint_to_int_reinterprets_sign() {
        let u = UnsignedInt::new(4, 14).unwrap().to_value();
        let s = SignedInt::cast(&CastSource::Value(u), Some(4)).unwrap();
        assert_eq!(s.value(), -2);
    }

    #[test]
    fn test_wider_int_target_widens_plainly() {
        let u = UnsignedInt::new(4, 14).unwrap().to_value();
        let s = SignedInt::cast(&CastSource::Value(u), Some(5)).unwrap();
        assert_eq!(s.value(), 14);
    }

    #[test]
    fn test_negative_wraps_into_uint() {
        let s = SignedInt::new(4, -6).unwrap().to_value();
        let u = UnsignedInt::cast(&CastSource::Value(s), Some(4)).unwrap();
        assert_eq!(u.value(), 10);
    }

    #[test]
    fn test_angle_rejects_int_sources() {
        let s = SignedInt::new(4, 3).unwrap().to_value();
        assert!(matches!(
            Angle::cast(&CastSource::Value(s), Some(4)),
            Err(ValueError::InvalidCast { .. })
        ));
    }

    #[test]
    fn test_default_width_from_raw() {
        let s = SignedInt::cast(&CastSource::Raw(Raw::Int(-6)), None).unwrap();
        assert_eq!(s.size(), 4);
        assert_eq!(s.value(), -6);
        let u = UnsignedInt::cast(&CastSource::Raw(Raw::Int(6)), None).unwrap();
        assert_eq!(u.size(), 3);
    }
}
