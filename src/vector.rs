//! A concrete fixed-length real-vector type.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::norm::{dot as slice_dot, l2_norm, l2_norm_sq};

/// Scalar type used throughout the crate.
pub type Float = f64;

/// An ordered, fixed-length sequence of real components.
///
/// A `Vector` is a value: every operation returns a new vector and leaves
/// its inputs untouched. Construction accepts any component list (the empty
/// vector included); whether a vector can be normalized is decided by
/// [`crate::norm::normalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    #[serde(with = "packed_components")]
    components: Vec<Float>,
}

mod packed_components {
    use super::Float;
    use base64::{engine::general_purpose, Engine as _};
    use bytemuck::cast_slice;
    use serde::{Deserialize, Deserializer, Serializer};

    const FLOAT_BYTES: usize = std::mem::size_of::<Float>();

    pub fn serialize<S: Serializer>(vec: &[Float], serializer: S) -> Result<S::Ok, S::Error> {
        let bytes: &[u8] = cast_slice(vec);
        let b64 = general_purpose::STANDARD.encode(bytes);
        serializer.serialize_str(&b64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Float>, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = general_purpose::STANDARD
            .decode(s)
            .map_err(serde::de::Error::custom)?;
        if bytes.len() % FLOAT_BYTES != 0 {
            return Err(serde::de::Error::custom(format!(
                "packed component payload is {} bytes, not a multiple of {}",
                bytes.len(),
                FLOAT_BYTES
            )));
        }
        Ok(bytes
            .chunks_exact(FLOAT_BYTES)
            .map(|chunk| Float::from_le_bytes(chunk.try_into().unwrap()))
            .collect())
    }
}

impl Vector {
    /// Builds a vector from its components.
    pub fn new(components: Vec<Float>) -> Self {
        Self { components }
    }

    /// The all-zero vector of the given dimension.
    pub fn zeros(dim: usize) -> Self {
        Self {
            components: vec![0.0; dim],
        }
    }

    /// The all-one vector of the given dimension.
    pub fn ones(dim: usize) -> Self {
        Self {
            components: vec![1.0; dim],
        }
    }

    /// Number of components.
    pub fn dim(&self) -> usize {
        self.components.len()
    }

    /// Whether the vector has no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Component at `i`, if in bounds.
    pub fn get(&self, i: usize) -> Option<Float> {
        self.components.get(i).copied()
    }

    /// The components as a slice.
    pub fn as_slice(&self) -> &[Float] {
        &self.components
    }

    /// Iterator over the components.
    pub fn iter(&self) -> impl Iterator<Item = &Float> + '_ {
        self.components.iter()
    }

    /// Component-wise scalar multiple, as a new vector.
    pub fn scaled(&self, k: Float) -> Self {
        Self {
            components: self.components.iter().map(|&x| x * k).collect(),
        }
    }

    /// Euclidean norm.
    pub fn norm(&self) -> Float {
        l2_norm(&self.components)
    }

    /// Squared Euclidean norm (avoids the sqrt).
    pub fn norm_sq(&self) -> Float {
        l2_norm_sq(&self.components)
    }

    /// Dimension-checked dot product.
    pub fn dot(&self, other: &Vector) -> Result<Float> {
        if self.dim() != other.dim() {
            anyhow::bail!(
                "Vector dimension mismatch: {} vs {}",
                self.dim(),
                other.dim()
            );
        }
        Ok(slice_dot(&self.components, &other.components))
    }

    /// Whether the Euclidean norm is within `tol` of 1.
    pub fn is_unit(&self, tol: Float) -> bool {
        (self.norm() - 1.0).abs() <= tol
    }
}

impl From<Vec<Float>> for Vector {
    fn from(components: Vec<Float>) -> Self {
        Self::new(components)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector(dim={})", self.dim())
    }
}
