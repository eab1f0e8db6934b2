// Copyright contributors to the openqasm-translator project
// SPDX-License-Identifier: Apache-2.0

// The four fixed-width value kinds and the bit-level operations they share.
// Casting lives in cast.rs and operator application in ops.rs; everything
// that touches the encoding invariant directly is kept in this file.

use crate::error::ValueError;

/// Largest representable width. Encodings are stored in a `u128`, so a
/// computed width above this is reported as an overflow, not widened further.
pub(crate) const MAX_WIDTH: u32 = 128;

/// Bit mask selecting the low `size` bits. `size` must be `1..=128`.
pub(crate) fn mask(size: u32) -> u128 {
    if size >= MAX_WIDTH {
        u128::MAX
    } else {
        (1u128 << size) - 1
    }
}

pub(crate) fn check_width(type_name: &'static str, size: u32) -> Result<(), ValueError> {
    if size == 0 || size > MAX_WIDTH {
        return Err(ValueError::InvalidWidth { type_name, size });
    }
    Ok(())
}

/// Minimum number of bits needed to store `value` as an unsigned integer,
/// i.e. `ceil(log2(value + 1))`, and at least 1.
pub(crate) fn min_unsigned_width(value: u128) -> u32 {
    (MAX_WIDTH - value.leading_zeros()).max(1)
}

/// Minimum width of a signed value that can hold `value`, sign bit included.
pub(crate) fn min_signed_width(value: i128) -> u32 {
    if value < 0 {
        min_unsigned_width(value.unsigned_abs()) + 1
    } else {
        min_unsigned_width(value as u128) + 1
    }
}

/// An untyped value, as produced by evaluating a literal expression. These
/// are not yet sized; wrapping one in a `ClassicalValue` happens at the
/// declaration or cast that gives it a width.
#[derive(Clone, Debug, PartialEq)]
pub enum Raw {
    Int(i128),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl Raw {
    pub fn type_name(&self) -> &'static str {
        match self {
            Raw::Int(..) => "int literal",
            Raw::Float(..) => "float literal",
            Raw::Bool(..) => "bool literal",
            Raw::Str(..) => "string literal",
        }
    }
}

/// Two's-complement signed integer over `size` bits: `int[size]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SignedInt {
    size: u32,
    encoding: u128,
}

impl SignedInt {
    /// Construct from a logical value, failing if it is outside
    /// `[-2^(size-1), 2^(size-1) - 1]`.
    pub fn new(size: u32, value: i128) -> Result<SignedInt, ValueError> {
        check_width("int", size)?;
        let (lo, hi) = if size == MAX_WIDTH {
            (i128::MIN, i128::MAX)
        } else {
            (-(1i128 << (size - 1)), (1i128 << (size - 1)) - 1)
        };
        if value < lo || value > hi {
            return Err(ValueError::Overflow {
                type_name: "int",
                size,
                value: value.to_string(),
            });
        }
        Ok(SignedInt {
            size,
            encoding: (value as u128) & mask(size),
        })
    }

    /// Construct from a raw bit pattern, reinterpreting the top bit as sign.
    pub fn from_encoding(size: u32, encoding: u128) -> Result<SignedInt, ValueError> {
        check_width("int", size)?;
        if encoding > mask(size) {
            return Err(ValueError::Overflow {
                type_name: "int",
                size,
                value: encoding.to_string(),
            });
        }
        Ok(SignedInt { size, encoding })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn encoding(&self) -> u128 {
        self.encoding
    }

    /// The logical (two's-complement) value.
    pub fn value(&self) -> i128 {
        if self.size == MAX_WIDTH {
            self.encoding as i128
        } else if (self.encoding >> (self.size - 1)) & 1 == 1 {
            (self.encoding as i128) - (1i128 << self.size)
        } else {
            self.encoding as i128
        }
    }

    pub fn to_value(self) -> ClassicalValue {
        ClassicalValue::SignedInt(self)
    }
}

/// Unsigned integer over `size` bits: `uint[size]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UnsignedInt {
    size: u32,
    encoding: u128,
}

impl UnsignedInt {
    pub fn new(size: u32, value: u128) -> Result<UnsignedInt, ValueError> {
        check_width("uint", size)?;
        if value > mask(size) {
            return Err(ValueError::Overflow {
                type_name: "uint",
                size,
                value: value.to_string(),
            });
        }
        Ok(UnsignedInt {
            size,
            encoding: value,
        })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn encoding(&self) -> u128 {
        self.encoding
    }

    pub fn value(&self) -> u128 {
        self.encoding
    }

    pub fn to_value(self) -> ClassicalValue {
        ClassicalValue::UnsignedInt(self)
    }
}

/// Array of classical bits: `bit[size]`. Storage is identical to
/// `UnsignedInt`; the canonical external form is a bit string of exactly
/// `size` characters, most significant bit first. Bit 0 is the least
/// significant bit throughout.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BitArray {
    size: u32,
    encoding: u128,
}

impl BitArray {
    /// Construct from a bit string whose length must equal `size`.
    pub fn new(size: u32, bits: &str) -> Result<BitArray, ValueError> {
        check_width("bit", size)?;
        if bits.chars().count() != size as usize {
            return Err(ValueError::WidthMismatch {
                size,
                value: bits.to_string(),
            });
        }
        let mut encoding = 0u128;
        for ch in bits.chars() {
            let bit = match ch {
                '0' => 0,
                '1' => 1,
                found => return Err(ValueError::InvalidBitString { found }),
            };
            encoding = (encoding << 1) | bit;
        }
        Ok(BitArray { size, encoding })
    }

    pub fn from_encoding(size: u32, encoding: u128) -> Result<BitArray, ValueError> {
        check_width("bit", size)?;
        if encoding > mask(size) {
            return Err(ValueError::Overflow {
                type_name: "bit",
                size,
                value: encoding.to_string(),
            });
        }
        Ok(BitArray { size, encoding })
    }

    /// An all-zero array, e.g. for a freshly declared `bit[n]` variable.
    pub fn zeros(size: u32) -> Result<BitArray, ValueError> {
        check_width("bit", size)?;
        Ok(BitArray { size, encoding: 0 })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn encoding(&self) -> u128 {
        self.encoding
    }

    /// The canonical bit-string form, `size` characters, MSB first.
    pub fn value(&self) -> String {
        (0..self.size)
            .rev()
            .map(|i| if (self.encoding >> i) & 1 == 1 { '1' } else { '0' })
            .collect()
    }

    /// The encoding read as an unsigned integer.
    pub fn as_unsigned(&self) -> u128 {
        self.encoding
    }

    pub fn to_value(self) -> ClassicalValue {
        ClassicalValue::BitArray(self)
    }
}

/// Quantized rotation angle: `angle[size]`. The encoding represents a
/// fraction of a full turn; logical value is `encoding * 2π / (2^size - 1)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Angle {
    size: u32,
    encoding: u128,
}

impl Angle {
    pub fn new(size: u32, encoding: u128) -> Result<Angle, ValueError> {
        check_width("angle", size)?;
        if encoding > mask(size) {
            return Err(ValueError::Overflow {
                type_name: "angle",
                size,
                value: encoding.to_string(),
            });
        }
        Ok(Angle { size, encoding })
    }

    /// Quantize a value in radians, wrapping into `[0, 2π)` first.
    pub fn from_radians(size: u32, radians: f64) -> Result<Angle, ValueError> {
        check_width("angle", size)?;
        if !radians.is_finite() {
            return Err(ValueError::Overflow {
                type_name: "angle",
                size,
                value: radians.to_string(),
            });
        }
        let tau = std::f64::consts::TAU;
        let wrapped = radians.rem_euclid(tau);
        let steps = mask(size) as f64;
        // wrapped < tau, so the rounded encoding is at most `steps`.
        let encoding = (((wrapped / tau) * steps).round() as u128).min(mask(size));
        Ok(Angle { size, encoding })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn encoding(&self) -> u128 {
        self.encoding
    }

    /// The logical value in radians.
    pub fn value(&self) -> f64 {
        self.encoding as f64 * std::f64::consts::TAU / mask(self.size) as f64
    }

    pub fn to_value(self) -> ClassicalValue {
        ClassicalValue::Angle(self)
    }
}

/// Any of the four sized classical values.
///
/// Note the `Variant(Variant)` shape: the outer name is the variant of this
/// enum, the inner name the struct with the actual data.
#[derive(Clone, Debug, PartialEq)]
pub enum ClassicalValue {
    SignedInt(SignedInt),
    UnsignedInt(UnsignedInt),
    BitArray(BitArray),
    Angle(Angle),
}

impl ClassicalValue {
    pub fn size(&self) -> u32 {
        use ClassicalValue::*;
        match self {
            SignedInt(v) => v.size(),
            UnsignedInt(v) => v.size(),
            BitArray(v) => v.size(),
            Angle(v) => v.size(),
        }
    }

    pub fn encoding(&self) -> u128 {
        use ClassicalValue::*;
        match self {
            SignedInt(v) => v.encoding(),
            UnsignedInt(v) => v.encoding(),
            BitArray(v) => v.encoding(),
            Angle(v) => v.encoding(),
        }
    }

    /// The language-level type name, without the width designator.
    pub fn type_name(&self) -> &'static str {
        use ClassicalValue::*;
        match self {
            SignedInt(..) => "int",
            UnsignedInt(..) => "uint",
            BitArray(..) => "bit",
            Angle(..) => "angle",
        }
    }

    pub fn is_zero(&self) -> bool {
        self.encoding() == 0
    }

    /// The logical value as a host integer. Fails for a `uint[128]` value
    /// beyond `i128::MAX` and for angles, which have no integer reading.
    pub(crate) fn logical_i128(&self) -> Result<i128, ValueError> {
        use ClassicalValue::*;
        match self {
            SignedInt(v) => Ok(v.value()),
            UnsignedInt(v) => i128::try_from(v.value()).map_err(|_| ValueError::Overflow {
                type_name: "uint",
                size: v.size(),
                value: v.value().to_string(),
            }),
            BitArray(v) => i128::try_from(v.as_unsigned()).map_err(|_| ValueError::Overflow {
                type_name: "bit",
                size: v.size(),
                value: v.as_unsigned().to_string(),
            }),
            Angle(v) => Err(ValueError::InvalidOperation {
                op: "integer value",
                lhs: format!("angle[{}]", v.size()),
                rhs: String::new(),
            }),
        }
    }

    fn index_out_of_range(&self, index: i64) -> ValueError {
        ValueError::IndexOutOfRange {
            type_name: self.type_name(),
            size: self.size(),
            index,
        }
    }

    /// Normalize an index in `[-size, size)` to a bit position, counting
    /// from the most significant end when negative.
    fn bit_position(&self, index: i64) -> Result<u32, ValueError> {
        let size = self.size() as i64;
        let pos = if index < 0 { index + size } else { index };
        if pos < 0 || pos >= size {
            return Err(self.index_out_of_range(index));
        }
        Ok(pos as u32)
    }

    /// Extract a single bit, returned as a value of the same kind. The
    /// result is 1 bit wide, except for `int`, which needs a second bit to
    /// represent the bit value 1 as a non-negative number.
    pub fn index(&self, index: i64) -> Result<ClassicalValue, ValueError> {
        let pos = self.bit_position(index)?;
        let bit = (self.encoding() >> pos) & 1;
        use ClassicalValue::*;
        Ok(match self {
            SignedInt(..) => SignedInt(crate::value::SignedInt::new(2, bit as i128)?),
            UnsignedInt(..) => UnsignedInt(crate::value::UnsignedInt::new(1, bit)?),
            BitArray(..) => BitArray(crate::value::BitArray::from_encoding(1, bit)?),
            Angle(..) => Angle(crate::value::Angle::new(1, bit)?),
        })
    }

    /// Extract the contiguous bit range `[start, end)` as a narrower value
    /// of the same kind.
    pub fn slice(&self, start: u32, end: u32) -> Result<ClassicalValue, ValueError> {
        let positions: Vec<i64> = (start..end).map(i64::from).collect();
        self.select(&positions)
    }

    /// Gather arbitrary bit positions into a new value of the same kind.
    /// Position order is preserved: the first position becomes bit 0.
    pub fn select(&self, positions: &[i64]) -> Result<ClassicalValue, ValueError> {
        let mut encoding = 0u128;
        for (out_bit, &index) in positions.iter().enumerate() {
            let pos = self.bit_position(index)?;
            encoding |= ((self.encoding() >> pos) & 1) << out_bit;
        }
        let width = positions.len() as u32;
        use ClassicalValue::*;
        Ok(match self {
            // A signed result needs one extra bit so the raw bits stay
            // non-negative.
            SignedInt(..) => SignedInt(crate::value::SignedInt::from_encoding(width + 1, encoding)?),
            UnsignedInt(..) => UnsignedInt(crate::value::UnsignedInt::new(width, encoding)?),
            BitArray(..) => BitArray(crate::value::BitArray::from_encoding(width, encoding)?),
            Angle(..) => Angle(crate::value::Angle::new(width, encoding)?),
        })
    }

    /// Write a single bit in place. The whole-value invariant is preserved
    /// by construction since only one bit below `size` changes.
    pub fn index_assign(&mut self, index: i64, bit: u128) -> Result<(), ValueError> {
        if bit > 1 {
            return Err(ValueError::Overflow {
                type_name: self.type_name(),
                size: 1,
                value: bit.to_string(),
            });
        }
        let pos = self.bit_position(index)?;
        let cleared = self.encoding() & !(1u128 << pos);
        let updated = cleared | (bit << pos);
        use ClassicalValue::*;
        match self {
            SignedInt(v) => v.encoding = updated,
            UnsignedInt(v) => v.encoding = updated,
            BitArray(v) => v.encoding = updated,
            Angle(v) => v.encoding = updated,
        }
        Ok(())
    }

    /// Same-kind assignment. Stricter than casting: the source must be the
    /// same kind and no wider than the destination; assigning across kinds
    /// requires an explicit cast. This is a language rule, not an oversight.
    pub fn set_value(&mut self, rhs: &ClassicalValue) -> Result<(), ValueError> {
        use ClassicalValue::*;
        match (&mut *self, rhs) {
            (SignedInt(dst), SignedInt(src)) => {
                if src.size() > dst.size() {
                    return Err(ValueError::Overflow {
                        type_name: "int",
                        size: dst.size(),
                        value: src.value().to_string(),
                    });
                }
                // Sign-extend into the destination width.
                dst.encoding = (src.value() as u128) & mask(dst.size);
            }
            (UnsignedInt(dst), UnsignedInt(src)) => {
                if src.size() > dst.size() {
                    return Err(ValueError::Overflow {
                        type_name: "uint",
                        size: dst.size(),
                        value: src.value().to_string(),
                    });
                }
                dst.encoding = src.encoding();
            }
            (BitArray(dst), BitArray(src)) => {
                if src.size() > dst.size() {
                    return Err(ValueError::Overflow {
                        type_name: "bit",
                        size: dst.size(),
                        value: src.value(),
                    });
                }
                dst.encoding = src.encoding();
            }
            (Angle(dst), Angle(src)) => {
                if src.size() > dst.size() {
                    return Err(ValueError::Overflow {
                        type_name: "angle",
                        size: dst.size(),
                        value: src.encoding().to_string(),
                    });
                }
                if src.size() == dst.size() {
                    dst.encoding = src.encoding();
                } else {
                    *dst = crate::value::Angle::from_radians(dst.size(), src.value())?;
                }
            }
            (dst, src) => {
                return Err(ValueError::InvalidAssignment {
                    from: src.type_name(),
                    to: dst.type_name(),
                })
            }
        }
        Ok(())
    }

    /// Assign an untyped value, range-checked against this value's width.
    pub fn set_raw(&mut self, raw: &Raw) -> Result<(), ValueError> {
        use ClassicalValue::*;
        match (&mut *self, raw) {
            (SignedInt(dst), Raw::Int(i)) => *dst = crate::value::SignedInt::new(dst.size(), *i)?,
            (SignedInt(dst), Raw::Float(f)) => {
                *dst = crate::value::SignedInt::new(dst.size(), truncate_f64(*f, "int", dst.size())?)?
            }
            (SignedInt(dst), Raw::Bool(b)) => {
                *dst = crate::value::SignedInt::new(dst.size(), *b as i128)?
            }
            (UnsignedInt(dst), Raw::Int(i)) => {
                if *i < 0 {
                    return Err(ValueError::Overflow {
                        type_name: "uint",
                        size: dst.size(),
                        value: i.to_string(),
                    });
                }
                *dst = crate::value::UnsignedInt::new(dst.size(), *i as u128)?;
            }
            (UnsignedInt(dst), Raw::Float(f)) => {
                let v = truncate_f64(*f, "uint", dst.size())?;
                if v < 0 {
                    return Err(ValueError::Overflow {
                        type_name: "uint",
                        size: dst.size(),
                        value: v.to_string(),
                    });
                }
                *dst = crate::value::UnsignedInt::new(dst.size(), v as u128)?;
            }
            (UnsignedInt(dst), Raw::Bool(b)) => {
                *dst = crate::value::UnsignedInt::new(dst.size(), *b as u128)?
            }
            (BitArray(dst), Raw::Str(bits)) => *dst = crate::value::BitArray::new(dst.size(), bits)?,
            (BitArray(dst), Raw::Int(i)) => {
                if *i < 0 || (*i as u128) > mask(dst.size()) {
                    return Err(ValueError::Overflow {
                        type_name: "bit",
                        size: dst.size(),
                        value: i.to_string(),
                    });
                }
                *dst = crate::value::BitArray::from_encoding(dst.size(), *i as u128)?;
            }
            (BitArray(dst), Raw::Bool(b)) => {
                *dst = crate::value::BitArray::from_encoding(dst.size(), *b as u128)?
            }
            (Angle(dst), Raw::Float(f)) => *dst = crate::value::Angle::from_radians(dst.size(), *f)?,
            (dst, raw) => {
                return Err(ValueError::InvalidAssignment {
                    from: raw.type_name(),
                    to: dst.type_name(),
                })
            }
        }
        Ok(())
    }
}

/// Truncate a float toward zero, guarding against values with no integer
/// representation.
pub(crate) fn truncate_f64(
    value: f64,
    type_name: &'static str,
    size: u32,
) -> Result<i128, ValueError> {
    if !value.is_finite() || value.abs() >= (i128::MAX as f64) {
        return Err(ValueError::Overflow {
            type_name,
            size,
            value: value.to_string(),
        });
    }
    Ok(value.trunc() as i128)
}

#[test]
fn test_mask_and_min_widths() {
    assert_eq!(mask(1), 1);
    assert_eq!(mask(4), 15);
    assert_eq!(mask(128), u128::MAX);
    assert_eq!(min_unsigned_width(0), 1);
    assert_eq!(min_unsigned_width(1), 1);
    assert_eq!(min_unsigned_width(6), 3);
    assert_eq!(min_signed_width(-6), 4);
    assert_eq!(min_signed_width(6), 4);
}

#[test]
fn test_signed_encoding_round_trip() {
    let s = SignedInt::new(4, -3).unwrap();
    assert_eq!(s.encoding(), 0b1101);
    assert_eq!(s.value(), -3);
    let s = SignedInt::from_encoding(4, 0b1101).unwrap();
    assert_eq!(s.value(), -3);
}

#[test]
fn test_bit_array_string_form() {
    let b = BitArray::new(3, "110").unwrap();
    assert_eq!(b.as_unsigned(), 6);
    assert_eq!(b.value(), "110");
}
