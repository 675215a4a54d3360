//! In-memory source datasets handed over by the I/O layer.
//!
//! A [`SourceDataset`] mirrors the self-describing array files grids are
//! usually stored in: named dimensions, named variables laid out over those
//! dimensions (row-major), per-variable attributes and global attributes.
//! Nothing is validated on insertion; shape and kind checks happen when a
//! normalizer asks for a variable through [`SourceDataset::floats`] or
//! [`SourceDataset::ints`].

use std::collections::BTreeMap;

use crate::mesh_error::FormatError;

/// Attribute value.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    Text(String),
    Float(f64),
    Int(i64),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Float(v) => Some(*v),
            AttrValue::Int(v) => Some(*v as f64),
            AttrValue::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Integer value; floats are accepted when integral.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttrValue::Int(v) => Some(*v),
            AttrValue::Float(v) if v.fract() == 0.0 => Some(*v as i64),
            AttrValue::Float(_) => None,
            AttrValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

/// Variable payload.
#[derive(Clone, Debug, PartialEq)]
pub enum VariableData {
    Float(Vec<f64>),
    Int(Vec<i64>),
}

impl VariableData {
    pub fn len(&self) -> usize {
        match self {
            VariableData::Float(v) => v.len(),
            VariableData::Int(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named array over named dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceVariable {
    pub dims: Vec<String>,
    pub data: VariableData,
    pub attributes: BTreeMap<String, AttrValue>,
}

impl SourceVariable {
    /// Floating-point variable over `dims`.
    pub fn float<D: Into<String>>(dims: impl IntoIterator<Item = D>, data: Vec<f64>) -> Self {
        Self {
            dims: dims.into_iter().map(Into::into).collect(),
            data: VariableData::Float(data),
            attributes: BTreeMap::new(),
        }
    }

    /// Integer variable over `dims`.
    pub fn int<D: Into<String>>(dims: impl IntoIterator<Item = D>, data: Vec<i64>) -> Self {
        Self {
            dims: dims.into_iter().map(Into::into).collect(),
            data: VariableData::Int(data),
            attributes: BTreeMap::new(),
        }
    }

    /// Dimensionless variable that only carries attributes (e.g. a UGRID
    /// mesh topology container).
    pub fn container() -> Self {
        Self::int(Vec::<String>::new(), vec![0])
    }

    /// Builder-style attribute insertion.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    /// Text attribute, trimmed.
    pub fn text_attribute(&self, name: &str) -> Option<&str> {
        self.attribute(name).and_then(AttrValue::as_str).map(str::trim)
    }
}

/// Checked view of a variable's data and resolved shape.
#[derive(Clone, Debug)]
pub struct ArrayView<'a, T> {
    pub name: &'a str,
    pub data: &'a [T],
    pub shape: Vec<usize>,
    pub dims: &'a [String],
}

impl<T> ArrayView<'_, T> {
    /// Fail unless the shape equals `expected`.
    pub fn expect_shape(&self, expected: &[usize]) -> Result<(), FormatError> {
        if self.shape == expected {
            Ok(())
        } else {
            Err(FormatError::ShapeMismatch {
                variable: self.name.to_string(),
                expected: expected.to_vec(),
                found: self.shape.clone(),
            })
        }
    }

    /// Fail unless the array has `rank` dimensions.
    pub fn expect_rank(&self, rank: usize) -> Result<(), FormatError> {
        if self.shape.len() == rank {
            Ok(())
        } else {
            Err(FormatError::ShapeMismatch {
                variable: self.name.to_string(),
                expected: vec![0; rank],
                found: self.shape.clone(),
            })
        }
    }
}

/// Named dimensions, variables and global attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SourceDataset {
    dimensions: BTreeMap<String, usize>,
    variables: BTreeMap<String, SourceVariable>,
    attributes: BTreeMap<String, AttrValue>,
}

impl SourceDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare (or redeclare) a dimension.
    pub fn add_dimension(&mut self, name: impl Into<String>, len: usize) -> &mut Self {
        self.dimensions.insert(name.into(), len);
        self
    }

    /// Insert a variable, replacing any previous one with the same name.
    pub fn add_variable(&mut self, name: impl Into<String>, variable: SourceVariable) -> &mut Self {
        self.variables.insert(name.into(), variable);
        self
    }

    /// Set a global attribute.
    pub fn add_attribute(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> &mut Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn dimension(&self, name: &str) -> Option<usize> {
        self.dimensions.get(name).copied()
    }

    /// Declared length of dimension `name`, or [`FormatError::MissingDimension`].
    pub fn require_dimension(&self, name: &str) -> Result<usize, FormatError> {
        self.dimension(name)
            .ok_or_else(|| FormatError::MissingDimension(name.to_string()))
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Variables in name order.
    pub fn variables(&self) -> impl Iterator<Item = (&str, &SourceVariable)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Variable `name`, or [`FormatError::MissingVariable`].
    pub fn variable(&self, name: &str) -> Result<&SourceVariable, FormatError> {
        self.variables
            .get(name)
            .ok_or_else(|| FormatError::MissingVariable(name.to_string()))
    }

    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    /// Shape of `name` resolved against the declared dimensions.
    ///
    /// Fails if a dimension is undeclared or the data length disagrees with
    /// the product of the extents.
    pub fn shape(&self, name: &str) -> Result<Vec<usize>, FormatError> {
        let variable = self.variable(name)?;
        let shape = variable
            .dims
            .iter()
            .map(|d| {
                self.dimension(d).ok_or_else(|| FormatError::UndeclaredDimension {
                    variable: name.to_string(),
                    dimension: d.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let expected: usize = shape.iter().product();
        if variable.data.len() != expected {
            return Err(FormatError::ShapeMismatch {
                variable: name.to_string(),
                expected: shape,
                found: vec![variable.data.len()],
            });
        }
        Ok(shape)
    }

    /// Floating-point view of `name`.
    pub fn floats<'a>(&'a self, name: &'a str) -> Result<ArrayView<'a, f64>, FormatError> {
        let shape = self.shape(name)?;
        let variable = self.variable(name)?;
        match &variable.data {
            VariableData::Float(data) => Ok(ArrayView {
                name,
                data,
                shape,
                dims: &variable.dims,
            }),
            VariableData::Int(_) => Err(FormatError::WrongKind {
                variable: name.to_string(),
                expected: "floating-point",
            }),
        }
    }

    /// Integer view of `name`.
    pub fn ints<'a>(&'a self, name: &'a str) -> Result<ArrayView<'a, i64>, FormatError> {
        let shape = self.shape(name)?;
        let variable = self.variable(name)?;
        match &variable.data {
            VariableData::Int(data) => Ok(ArrayView {
                name,
                data,
                shape,
                dims: &variable.dims,
            }),
            VariableData::Float(_) => Err(FormatError::WrongKind {
                variable: name.to_string(),
                expected: "integer",
            }),
        }
    }
}
