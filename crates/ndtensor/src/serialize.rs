// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Conversions between [`Tensor`] and its public representations.
//!
//! # Nested arrays
//! A rank-`d` tensor maps to arrays nested `d` deep, with each level as long
//! as the matching axis:
//! ```text
//! size [2, 3]  <->  [[a, b, c], [d, e, f]]
//! ```
//!
//! # JSON record
//! ```json
//! { "type": "Tensor", "size": [2, 3], "data": [1, 2, 3, 4, 5, 6] }
//! ```
//! `Tensor` implements `serde::Serialize`/`Deserialize` through this record.

use crate::{Shape, Tensor, TensorError};

/// The `type` tag written into every [`TensorRecord`].
pub const RECORD_TYPE: &str = "Tensor";

/// Arbitrarily nested arrays of numbers.
///
/// Serialises untagged, so `NestedArray` reads and writes plain JSON arrays
/// such as `[[1, 2], [3, 4]]`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum NestedArray {
    /// A leaf value.
    Number(f64),
    /// One level of nesting.
    Array(Vec<NestedArray>),
}

impl From<f64> for NestedArray {
    fn from(x: f64) -> Self {
        NestedArray::Number(x)
    }
}

/// Convenience: `NestedArray::from(vec![vec![1.0, 2.0], vec![3.0, 4.0]])`.
impl<T: Into<NestedArray>> From<Vec<T>> for NestedArray {
    fn from(items: Vec<T>) -> Self {
        NestedArray::Array(items.into_iter().map(Into::into).collect())
    }
}

/// The flat serialised form of a tensor.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TensorRecord {
    /// Always [`RECORD_TYPE`].
    #[serde(rename = "type")]
    pub kind: String,
    /// Size of every axis.
    pub size: Vec<usize>,
    /// Row-major entries, `product(size)` of them.
    pub data: Vec<f64>,
}

impl Tensor {
    /// Converts to nested arrays, outermost axis first.
    pub fn to_array(&self) -> NestedArray {
        fn level(data: &[f64], dims: &[usize], strides: &[usize]) -> NestedArray {
            if dims.len() == 1 {
                return NestedArray::Array(data.iter().copied().map(NestedArray::Number).collect());
            }
            NestedArray::Array(
                data.chunks(strides[0])
                    .map(|block| level(block, &dims[1..], &strides[1..]))
                    .collect(),
            )
        }
        level(self.as_slice(), self.dims(), self.strides())
    }

    /// Builds a tensor from nested arrays.
    ///
    /// The shape is read off the first element at each depth; every sibling
    /// must then match it.
    ///
    /// # Errors
    /// * [`TensorError::InvalidData`] if `nested` is a bare number or a leaf
    ///   is not finite.
    /// * [`TensorError::InvalidShape`] if some level is empty.
    /// * [`TensorError::ShapeMismatch`] if siblings differ in length or depth.
    ///
    /// # Examples
    /// ```
    /// use ndtensor::{NestedArray, Tensor};
    /// let nested = NestedArray::from(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    /// let t = Tensor::from_array(&nested).unwrap();
    /// assert_eq!(t.dims(), &[2, 3]);
    /// assert_eq!(t.to_array(), nested);
    /// ```
    pub fn from_array(nested: &NestedArray) -> Result<Tensor, TensorError> {
        let dims = infer_dims(nested)?;
        // `dims` is only a guess from the first elements; the buffer grows
        // with the entries actually present until `flatten` accepts the input.
        let mut data = Vec::new();
        flatten(nested, &dims, &mut data)?;
        Tensor::from_shape_vec(Shape::new(&dims)?, data)
    }

    /// Returns the flat record form.
    ///
    /// # Errors
    /// [`TensorError::InvalidData`] if an entry is NaN or infinite; JSON has
    /// no encoding for those.
    pub fn to_record(&self) -> Result<TensorRecord, TensorError> {
        self.ensure_finite()?;
        Ok(TensorRecord {
            kind: RECORD_TYPE.to_string(),
            size: self.dims().to_vec(),
            data: self.as_slice().to_vec(),
        })
    }

    fn ensure_finite(&self) -> Result<(), TensorError> {
        match self.as_slice().iter().position(|x| !x.is_finite()) {
            Some(key) => Err(TensorError::InvalidData(format!(
                "non-finite entry {} at key {key} cannot be serialised",
                self.as_slice()[key]
            ))),
            None => Ok(()),
        }
    }

    /// Builds a tensor from a typed record.
    pub fn from_record(record: TensorRecord) -> Result<Tensor, TensorError> {
        if record.kind != RECORD_TYPE {
            return Err(TensorError::InvalidData(format!(
                "record type must be \"{RECORD_TYPE}\", got \"{}\"",
                record.kind
            )));
        }
        Tensor::from_vec(&record.size, record.data).map_err(|e| match e {
            TensorError::BufferLengthMismatch {
                expected, actual, ..
            } => TensorError::InvalidData(format!(
                "record holds {actual} values but size requires {expected}"
            )),
            other => other,
        })
    }

    /// Returns the record as a JSON value.
    ///
    /// Fails like [`to_record`](Tensor::to_record) on non-finite entries.
    pub fn to_json(&self) -> Result<serde_json::Value, TensorError> {
        self.ensure_finite()?;
        Ok(serde_json::json!({
            "type": RECORD_TYPE,
            "size": self.dims(),
            "data": self.as_slice(),
        }))
    }

    /// Returns the record as compact JSON text.
    pub fn to_json_string(&self) -> Result<String, TensorError> {
        Ok(self.to_json()?.to_string())
    }

    /// Parses a tensor from JSON text.
    pub fn from_json(text: &str) -> Result<Tensor, TensorError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Tensor::from_json_value(&value)
    }

    /// Builds a tensor from an already parsed JSON record.
    ///
    /// Unlike deserialising straight into [`TensorRecord`], this
    /// distinguishes a bad `size` ([`TensorError::InvalidShape`], e.g.
    /// `[2, 3.5]`) from a malformed payload ([`TensorError::InvalidData`]).
    pub fn from_json_value(value: &serde_json::Value) -> Result<Tensor, TensorError> {
        let object = value
            .as_object()
            .ok_or_else(|| TensorError::InvalidData("tensor record must be an object".into()))?;

        match object.get("type").and_then(|t| t.as_str()) {
            Some(RECORD_TYPE) => {}
            other => {
                return Err(TensorError::InvalidData(format!(
                    "record type must be \"{RECORD_TYPE}\", got {other:?}"
                )))
            }
        }

        let size = numbers(object.get("size"), "size")?;
        let shape = Shape::from_extents(&size)?;

        let data = numbers(object.get("data"), "data")?;
        if data.len() != shape.num_elements() {
            return Err(TensorError::InvalidData(format!(
                "record holds {} values but size {shape} requires {}",
                data.len(),
                shape.num_elements()
            )));
        }
        Tensor::from_shape_vec(shape, data)
    }
}

/// Reads a JSON array of numbers.
fn numbers(value: Option<&serde_json::Value>, field: &str) -> Result<Vec<f64>, TensorError> {
    let items = value
        .and_then(|v| v.as_array())
        .ok_or_else(|| TensorError::InvalidData(format!("\"{field}\" must be an array")))?;
    items
        .iter()
        .map(|item| {
            item.as_f64().ok_or_else(|| {
                TensorError::InvalidData(format!("\"{field}\" holds a non-number: {item}"))
            })
        })
        .collect()
}

/// Follows the first element down to a leaf, recording each level's length.
fn infer_dims(nested: &NestedArray) -> Result<Vec<usize>, TensorError> {
    let mut dims = Vec::new();
    let mut node = nested;
    while let NestedArray::Array(items) = node {
        dims.push(items.len());
        match items.first() {
            Some(first) => node = first,
            None => return Err(TensorError::invalid_shape(&dims, "nested arrays must not be empty")),
        }
    }
    if dims.is_empty() {
        return Err(TensorError::InvalidData(
            "expected a nested array, got a bare number".into(),
        ));
    }
    Ok(dims)
}

fn flatten(node: &NestedArray, dims: &[usize], out: &mut Vec<f64>) -> Result<(), TensorError> {
    match (node, dims.split_first()) {
        (NestedArray::Number(x), None) => {
            if !x.is_finite() {
                return Err(TensorError::InvalidData(format!("non-finite entry {x}")));
            }
            out.push(*x);
            Ok(())
        }
        (NestedArray::Array(items), Some((&len, rest))) if items.len() == len => {
            items.iter().try_for_each(|item| flatten(item, rest, out))
        }
        _ => Err(TensorError::ShapeMismatch {
            op: "from_array",
            lhs: dims.to_vec(),
            rhs: observed_dims(node),
        }),
    }
}

/// Shape as seen from the first elements of `node`; used for error reports.
fn observed_dims(node: &NestedArray) -> Vec<usize> {
    let mut dims = Vec::new();
    let mut node = node;
    while let NestedArray::Array(items) = node {
        dims.push(items.len());
        match items.first() {
            Some(first) => node = first,
            None => break,
        }
    }
    dims
}

impl TryFrom<Tensor> for TensorRecord {
    type Error = TensorError;

    fn try_from(t: Tensor) -> Result<Self, Self::Error> {
        t.ensure_finite()?;
        let size = t.dims().to_vec();
        Ok(TensorRecord {
            kind: RECORD_TYPE.to_string(),
            size,
            data: t.into_vec(),
        })
    }
}

impl TryFrom<TensorRecord> for Tensor {
    type Error = TensorError;

    fn try_from(record: TensorRecord) -> Result<Self, Self::Error> {
        Tensor::from_record(record)
    }
}

impl serde::Serialize for Tensor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let record = self.to_record().map_err(<S::Error as serde::ser::Error>::custom)?;
        serde::Serialize::serialize(&record, serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Tensor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = <TensorRecord as serde::Deserialize>::deserialize(deserializer)?;
        Tensor::from_record(record).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_array() {
        let t = Tensor::from_vec(&[2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(
            t.to_array(),
            NestedArray::from(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])
        );
    }

    #[test]
    fn test_from_array_rank3() {
        let nested = NestedArray::from(vec![
            vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]],
            vec![vec![7.0, 8.0], vec![9.0, 10.0], vec![11.0, 12.0]],
        ]);
        let t = Tensor::from_array(&nested).unwrap();
        assert_eq!(t.dims(), &[2, 3, 2]);
        assert_eq!(t.data_at(&[1, 2, 0]).unwrap(), 11.0);
        assert_eq!(t.to_array(), nested);
    }

    #[test]
    fn test_from_array_ragged() {
        let nested = NestedArray::from(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(
            Tensor::from_array(&nested),
            Err(TensorError::ShapeMismatch { op: "from_array", .. })
        ));
    }

    #[test]
    fn test_from_array_mixed_depth() {
        let nested = NestedArray::Array(vec![
            NestedArray::from(vec![1.0, 2.0]),
            NestedArray::Number(3.0),
        ]);
        assert!(matches!(
            Tensor::from_array(&nested),
            Err(TensorError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_from_array_rejects_bad_leaves_and_levels() {
        let nan = NestedArray::from(vec![1.0, f64::NAN]);
        assert!(matches!(Tensor::from_array(&nan), Err(TensorError::InvalidData(_))));

        let bare = NestedArray::Number(1.0);
        assert!(matches!(Tensor::from_array(&bare), Err(TensorError::InvalidData(_))));

        let empty = NestedArray::from(Vec::<f64>::new());
        assert!(matches!(Tensor::from_array(&empty), Err(TensorError::InvalidShape { .. })));
    }

    #[test]
    fn test_nested_array_json() {
        let nested: NestedArray = serde_json::from_str("[[1, 2], [3, 4.5]]").unwrap();
        let t = Tensor::from_array(&nested).unwrap();
        assert_eq!(t.as_slice(), &[1.0, 2.0, 3.0, 4.5]);
        assert_eq!(serde_json::to_string(&t.to_array()).unwrap(), "[[1.0,2.0],[3.0,4.5]]");
    }

    #[test]
    fn test_to_json() {
        let t = Tensor::from_vec(&[2], vec![1.5, -2.0]).unwrap();
        assert_eq!(
            t.to_json().unwrap(),
            serde_json::json!({"type": "Tensor", "size": [2], "data": [1.5, -2.0]})
        );
    }

    #[test]
    fn test_json_roundtrip() {
        let t = Tensor::from_vec(&[2, 1, 2], vec![0.25, 1.0, -3.0, 8.0]).unwrap();
        let text = t.to_json_string().unwrap();
        let back = Tensor::from_json(&text).unwrap();
        assert!(back.shape().same(t.shape()));
        assert_eq!(back.as_slice(), t.as_slice());
        assert_eq!(back.to_json_string().unwrap(), text);

        let from_value = Tensor::from_json_value(&t.to_json().unwrap()).unwrap();
        assert_eq!(from_value.as_slice(), t.as_slice());
    }

    #[test]
    fn test_serde_impls() {
        let t = Tensor::from_vec(&[3], vec![1.0, 2.0, 3.0]).unwrap();
        let text = serde_json::to_string(&t).unwrap();
        assert_eq!(text, r#"{"type":"Tensor","size":[3],"data":[1.0,2.0,3.0]}"#);
        let back: Tensor = serde_json::from_str(&text).unwrap();
        assert_eq!(back.as_slice(), t.as_slice());

        let bad = r#"{"type":"Tensor","size":[2],"data":[1.0]}"#;
        assert!(serde_json::from_str::<Tensor>(bad).is_err());
    }

    #[test]
    fn test_from_json_errors() {
        let non_integer = r#"{"type":"Tensor","size":[2, 3.5],"data":[]}"#;
        assert!(matches!(
            Tensor::from_json(non_integer),
            Err(TensorError::InvalidShape { .. })
        ));

        let zero = r#"{"type":"Tensor","size":[2, 0],"data":[]}"#;
        assert!(matches!(Tensor::from_json(zero), Err(TensorError::InvalidShape { .. })));

        let wrong_type = r#"{"type":"Matrix","size":[1],"data":[1]}"#;
        assert!(matches!(Tensor::from_json(wrong_type), Err(TensorError::InvalidData(_))));

        let short = r#"{"type":"Tensor","size":[3],"data":[1, 2]}"#;
        assert!(matches!(Tensor::from_json(short), Err(TensorError::InvalidData(_))));

        let null_entry = r#"{"type":"Tensor","size":[2],"data":[1, null]}"#;
        assert!(matches!(Tensor::from_json(null_entry), Err(TensorError::InvalidData(_))));

        assert!(matches!(Tensor::from_json("{not json"), Err(TensorError::Json(_))));
    }

    #[test]
    fn test_record_conversions() {
        let t = Tensor::from_vec(&[2], vec![4.0, 5.0]).unwrap();
        let record = TensorRecord::try_from(t.clone()).unwrap();
        assert_eq!(record, t.to_record().unwrap());
        let back = Tensor::try_from(record).unwrap();
        assert_eq!(back.as_slice(), &[4.0, 5.0]);

        let mislabelled = TensorRecord {
            kind: "Vector".into(),
            size: vec![1],
            data: vec![0.0],
        };
        assert!(Tensor::from_record(mislabelled).is_err());
    }

    #[test]
    fn test_from_array_deep_first_element_with_flat_siblings() {
        // Following first elements suggests 2000^5 entries; the siblings are
        // bare numbers, so the input must be rejected without reserving that.
        let mut node = NestedArray::Array(vec![NestedArray::Number(0.0); 2000]);
        for _ in 0..4 {
            let mut items = vec![node];
            items.extend(std::iter::repeat(NestedArray::Number(1.0)).take(1999));
            node = NestedArray::Array(items);
        }
        assert!(matches!(
            Tensor::from_array(&node),
            Err(TensorError::ShapeMismatch { op: "from_array", .. })
        ));
    }

    #[test]
    fn test_non_finite_entries_refuse_to_serialise() {
        let a = Tensor::from_vec(&[2], vec![1.0, 0.0]).unwrap();
        let b = Tensor::from_vec(&[2], vec![0.0, 1.0]).unwrap();
        let q = a.hadamard_divide(&b).unwrap();
        assert!(q.as_slice()[0].is_infinite());

        assert!(matches!(q.to_json(), Err(TensorError::InvalidData(_))));
        assert!(matches!(q.to_json_string(), Err(TensorError::InvalidData(_))));
        assert!(matches!(q.to_record(), Err(TensorError::InvalidData(_))));
        assert!(TensorRecord::try_from(q.clone()).is_err());
        assert!(serde_json::to_string(&q).is_err());

        let nan = Tensor::from_vec(&[1], vec![f64::NAN]).unwrap();
        assert!(nan.to_json_string().is_err());
    }
}
