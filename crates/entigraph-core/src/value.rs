//! Typed value wrapping: lifts host scalars and arrays into tagged [`Value`]s.
//!
//! Mirrors the wire-level `Value`/`Type` contract the engine expects (spec §3,
//! §6): every `Value` carries an explicit [`Type`] tag so the engine never has
//! to guess a payload's shape.

use serde::{Deserialize, Serialize};

/// Primitive scalar kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Int32,
    Int64,
    Float32,
    Float64,
    Bool,
    String,
}

/// Tagged union: either a bare primitive, or a fixed-shape array of one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Primitive(PrimitiveKind),
    Array {
        /// Finite, ordered, non-empty dimension sizes; every entry is positive.
        dimensions: Vec<u32>,
        element_type: PrimitiveKind,
    },
}

impl Type {
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Type::Primitive(kind)
    }

    pub fn array(dimensions: Vec<u32>, element_type: PrimitiveKind) -> Self {
        Type::Array {
            dimensions,
            element_type,
        }
    }

    /// The primitive kind backing this type, whether scalar or array element.
    pub fn element_kind(&self) -> PrimitiveKind {
        match self {
            Type::Primitive(k) => *k,
            Type::Array { element_type, .. } => *element_type,
        }
    }
}

/// A single primitive payload, matching [`PrimitiveKind`] exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Bool(bool),
    String(String),
}

impl Primitive {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Int32(_) => PrimitiveKind::Int32,
            Primitive::Int64(_) => PrimitiveKind::Int64,
            Primitive::Float32(_) => PrimitiveKind::Float32,
            Primitive::Float64(_) => PrimitiveKind::Float64,
            Primitive::Bool(_) => PrimitiveKind::Bool,
            Primitive::String(_) => PrimitiveKind::String,
        }
    }
}

/// A typed value: exactly one scalar [`Primitive`], or a flattened sequence of
/// primitives whose length equals the product of the array type's dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Value {
    pub data_type: Type,
    pub payload: Payload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    Scalar(Primitive),
    Array(Vec<Primitive>),
}

impl Value {
    pub fn scalar(p: Primitive) -> Self {
        let kind = p.kind();
        Value {
            data_type: Type::Primitive(kind),
            payload: Payload::Scalar(p),
        }
    }
}

/// Error raised when a host value cannot be lifted into a [`Value`].
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValueError {
    #[error("wrapping a null/none value as a Value is not supported")]
    NullValue,
    #[error("array is ragged: row {index} has length {actual}, expected {expected}")]
    RaggedArray {
        index: usize,
        expected: usize,
        actual: usize,
    },
    #[error("cannot wrap an empty array: element type is ambiguous")]
    EmptyArray,
}

/// Lift a host `i64` to a [`Value`], choosing `Int32` iff it fits in signed
/// 32 bits, else `Int64` (spec §6).
pub fn wrap_int(v: i64) -> Value {
    if let Ok(v32) = i32::try_from(v) {
        Value::scalar(Primitive::Int32(v32))
    } else {
        Value::scalar(Primitive::Int64(v))
    }
}

pub fn wrap_f64(v: f64) -> Value {
    Value::scalar(Primitive::Float64(v))
}

pub fn wrap_bool(v: bool) -> Value {
    Value::scalar(Primitive::Bool(v))
}

pub fn wrap_str(v: impl Into<String>) -> Value {
    Value::scalar(Primitive::String(v.into()))
}

/// A host-side value prior to wrapping, used so [`wrap`] can accept scalars
/// and nested lists uniformly.
#[derive(Debug, Clone)]
pub enum HostValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    /// A (possibly nested) list of host values, lifted into a flat array.
    List(Vec<HostValue>),
    /// The absence of a value. Always rejected by [`wrap`] (spec §8).
    Null,
}

impl<T: Into<HostValue>> From<Option<T>> for HostValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => HostValue::Null,
        }
    }
}

impl From<i64> for HostValue {
    fn from(v: i64) -> Self {
        HostValue::Int(v)
    }
}
impl From<i32> for HostValue {
    fn from(v: i32) -> Self {
        HostValue::Int(v as i64)
    }
}
impl From<f64> for HostValue {
    fn from(v: f64) -> Self {
        HostValue::Float(v)
    }
}
impl From<bool> for HostValue {
    fn from(v: bool) -> Self {
        HostValue::Bool(v)
    }
}
impl From<&str> for HostValue {
    fn from(v: &str) -> Self {
        HostValue::Str(v.to_owned())
    }
}
impl From<String> for HostValue {
    fn from(v: String) -> Self {
        HostValue::Str(v)
    }
}
impl<T: Into<HostValue>> From<Vec<T>> for HostValue {
    fn from(v: Vec<T>) -> Self {
        HostValue::List(v.into_iter().map(Into::into).collect())
    }
}

fn wrap_primitive(v: &HostValue) -> Option<Primitive> {
    match v {
        HostValue::Int(i) => Some(wrap_int(*i).payload_scalar()),
        HostValue::Float(f) => Some(Primitive::Float64(*f)),
        HostValue::Bool(b) => Some(Primitive::Bool(*b)),
        HostValue::Str(s) => Some(Primitive::String(s.clone())),
        HostValue::List(_) | HostValue::Null => None,
    }
}

impl Value {
    fn payload_scalar(self) -> Primitive {
        match self.payload {
            Payload::Scalar(p) => p,
            Payload::Array(_) => unreachable!("wrap_int always produces a scalar"),
        }
    }
}

/// Lift a host value (scalar or nested list) into a [`Value`], mirroring
/// `bento.value.wrap` (spec §8 property tests):
/// - a bare scalar lifts via [`wrap_int`]/[`wrap_f64`]/[`wrap_bool`]/[`wrap_str`]
/// - a flat list of scalars lifts to a rank-1 array
/// - a nested list lifts to a multi-dimensional array, rejecting ragged rows
/// - an empty list is rejected: there is no element type to infer
pub fn wrap(v: HostValue) -> Result<Value, ValueError> {
    match v {
        HostValue::Null => Err(ValueError::NullValue),
        HostValue::Int(_) | HostValue::Float(_) | HostValue::Bool(_) | HostValue::Str(_) => {
            Ok(wrap_primitive(&v).map(Value::scalar).expect("scalar variant"))
        }
        HostValue::List(items) => wrap_list(&items),
    }
}

fn wrap_list(items: &[HostValue]) -> Result<Value, ValueError> {
    if items.is_empty() {
        return Err(ValueError::EmptyArray);
    }

    // Determine whether this is a leaf row (all scalars) or a row of sub-lists.
    let is_nested = matches!(items[0], HostValue::List(_));
    if is_nested {
        let mut dims = None;
        let mut flat = Vec::new();
        let mut elem_dims: Option<Vec<u32>> = None;
        let mut elem_kind = None;
        for (i, item) in items.iter().enumerate() {
            let HostValue::List(row) = item else {
                return Err(ValueError::RaggedArray {
                    index: i,
                    expected: 0,
                    actual: 0,
                });
            };
            let sub = wrap_list(row)?;
            let Type::Array {
                dimensions,
                element_type,
            } = &sub.data_type
            else {
                unreachable!("wrap_list always returns an Array type")
            };
            if let Some(expected) = &elem_dims {
                if expected != dimensions {
                    return Err(ValueError::RaggedArray {
                        index: i,
                        expected: expected.iter().product::<u32>() as usize,
                        actual: dimensions.iter().product::<u32>() as usize,
                    });
                }
            } else {
                elem_dims = Some(dimensions.clone());
                elem_kind = Some(*element_type);
            }
            dims = Some(items.len() as u32);
            match sub.payload {
                Payload::Array(vals) => flat.extend(vals),
                Payload::Scalar(p) => flat.push(p),
            }
        }
        let mut dimensions = vec![dims.unwrap()];
        dimensions.extend(elem_dims.unwrap());
        Ok(Value {
            data_type: Type::Array {
                dimensions,
                element_type: elem_kind.unwrap(),
            },
            payload: Payload::Array(flat),
        })
    } else {
        let mut primitives = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            match item {
                HostValue::List(_) => {
                    return Err(ValueError::RaggedArray {
                        index: i,
                        expected: 0,
                        actual: 0,
                    });
                }
                HostValue::Null => return Err(ValueError::NullValue),
                other => primitives.push(wrap_primitive(other).expect("scalar variant")),
            }
        }
        let element_type = primitives[0].kind();
        Ok(Value {
            data_type: Type::Array {
                dimensions: vec![items.len() as u32],
                element_type,
            },
            payload: Payload::Array(primitives),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_int_picks_int32_when_it_fits() {
        let v = wrap_int((i32::MAX as i64) - 1);
        assert_eq!(v.data_type, Type::Primitive(PrimitiveKind::Int32));
    }

    #[test]
    fn wrap_int_overflows_to_int64() {
        let v = wrap_int(i32::MAX as i64 + 1);
        assert_eq!(v.data_type, Type::Primitive(PrimitiveKind::Int64));
    }

    #[test]
    fn wrap_flat_list_is_rank_one_float64_array() {
        let v = wrap(HostValue::from(vec![1.0, 2.0])).unwrap();
        assert_eq!(
            v.data_type,
            Type::Array {
                dimensions: vec![2],
                element_type: PrimitiveKind::Float64,
            }
        );
    }

    #[test]
    fn wrap_none_errors() {
        let err = wrap(HostValue::from(None::<i64>)).unwrap_err();
        assert_eq!(err, ValueError::NullValue);
    }

    #[test]
    fn wrap_empty_list_errors() {
        let err = wrap(HostValue::List(vec![])).unwrap_err();
        assert_eq!(err, ValueError::EmptyArray);
    }

    #[test]
    fn wrap_ragged_nested_list_errors() {
        let ragged = HostValue::List(vec![
            HostValue::from(vec![1.0, 2.0]),
            HostValue::from(vec![1.0]),
        ]);
        assert!(matches!(
            wrap(ragged).unwrap_err(),
            ValueError::RaggedArray { .. }
        ));
    }

    #[test]
    fn wrap_nested_list_is_multi_dim_array() {
        let nested = HostValue::List(vec![
            HostValue::from(vec![1, 2]),
            HostValue::from(vec![3, 4]),
        ]);
        let v = wrap(nested).unwrap();
        assert_eq!(
            v.data_type,
            Type::Array {
                dimensions: vec![2, 2],
                element_type: PrimitiveKind::Int32,
            }
        );
    }
}
