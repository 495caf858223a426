//! Value types: scalar kind × shape.
//!
//! Every node carries exactly one [`ValueType`], fixed at construction.
//! Arrays are not part of the value type; array dimensions live on the
//! declaring node (see [`Node::array_dims`](crate::Node)).

use std::fmt;

/// Scalar component kind.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ScalarKind {
    Bool,
    Int,
    Uint,
    Float,
    Double,
}

impl ScalarKind {
    /// GLSL keyword for a single component of this kind.
    pub const fn scalar_name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    /// Prefix used for vector type names (`bvec3`, `ivec2`, `vec4`, ...).
    pub const fn vector_prefix(self) -> &'static str {
        match self {
            Self::Bool => "bvec",
            Self::Int => "ivec",
            Self::Uint => "uvec",
            Self::Float => "vec",
            Self::Double => "dvec",
        }
    }

    /// Prefix used for matrix type names. Only float and double have one.
    pub const fn matrix_prefix(self) -> Option<&'static str> {
        match self {
            Self::Float => Some("mat"),
            Self::Double => Some("dmat"),
            Self::Bool | Self::Int | Self::Uint => None,
        }
    }

    #[inline]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Int | Self::Uint)
    }

    #[inline]
    pub const fn is_floating(self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }

    /// Integer or floating point (everything except bool).
    #[inline]
    pub const fn is_numeric(self) -> bool {
        !matches!(self, Self::Bool)
    }
}

/// Component layout of a value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Shape {
    Scalar,
    /// 2..=4 components.
    Vector(u8),
    /// `cols` column vectors of `rows` components each, both 2..=4.
    Matrix { cols: u8, rows: u8 },
}

impl Shape {
    /// Number of scalar slots this shape occupies.
    pub const fn components(self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Vector(n) => n as usize,
            Self::Matrix { cols, rows } => cols as usize * rows as usize,
        }
    }

    /// Shape of a vector (or scalar) with `n` components.
    ///
    /// Returns `None` outside `1..=4`.
    pub const fn vector(n: usize) -> Option<Shape> {
        match n {
            1 => Some(Self::Scalar),
            2..=4 => Some(Self::Vector(n as u8)),
            _ => None,
        }
    }

    fn is_valid(self) -> bool {
        match self {
            Self::Scalar => true,
            Self::Vector(n) => (2..=4).contains(&n),
            Self::Matrix { cols, rows } => (2..=4).contains(&cols) && (2..=4).contains(&rows),
        }
    }
}

/// A GLSL value type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ValueType {
    pub scalar: ScalarKind,
    pub shape: Shape,
}

impl ValueType {
    pub const BOOL: ValueType = ValueType::scalar(ScalarKind::Bool);
    pub const INT: ValueType = ValueType::scalar(ScalarKind::Int);
    pub const UINT: ValueType = ValueType::scalar(ScalarKind::Uint);
    pub const FLOAT: ValueType = ValueType::scalar(ScalarKind::Float);
    pub const DOUBLE: ValueType = ValueType::scalar(ScalarKind::Double);

    pub const fn scalar(scalar: ScalarKind) -> Self {
        ValueType {
            scalar,
            shape: Shape::Scalar,
        }
    }

    /// Vector type with `n` components (`n == 1` yields the scalar type).
    ///
    /// # Panics
    ///
    /// Panics if `n` is not in `1..=4`.
    pub fn vector(scalar: ScalarKind, n: usize) -> Self {
        let shape = Shape::vector(n)
            .unwrap_or_else(|| panic!("vector arity must be 1..=4, got {n}"));
        ValueType { scalar, shape }
    }

    /// Matrix type with `cols` columns and `rows` rows.
    ///
    /// Returns `None` for non-floating kinds or dimensions outside `2..=4`.
    pub fn matrix(scalar: ScalarKind, cols: usize, rows: usize) -> Option<Self> {
        let shape = Shape::Matrix {
            cols: u8::try_from(cols).ok()?,
            rows: u8::try_from(rows).ok()?,
        };
        (scalar.is_floating() && shape.is_valid()).then_some(ValueType { scalar, shape })
    }

    pub const fn vec2() -> Self {
        ValueType {
            scalar: ScalarKind::Float,
            shape: Shape::Vector(2),
        }
    }

    pub const fn vec3() -> Self {
        ValueType {
            scalar: ScalarKind::Float,
            shape: Shape::Vector(3),
        }
    }

    pub const fn vec4() -> Self {
        ValueType {
            scalar: ScalarKind::Float,
            shape: Shape::Vector(4),
        }
    }

    #[inline]
    pub const fn components(self) -> usize {
        self.shape.components()
    }

    #[inline]
    pub const fn is_scalar(self) -> bool {
        matches!(self.shape, Shape::Scalar)
    }

    #[inline]
    pub const fn is_vector(self) -> bool {
        matches!(self.shape, Shape::Vector(_))
    }

    #[inline]
    pub const fn is_matrix(self) -> bool {
        matches!(self.shape, Shape::Matrix { .. })
    }

    /// Number of components addressable by a swizzle (scalars count as 1).
    pub const fn vector_arity(self) -> Option<usize> {
        match self.shape {
            Shape::Scalar => Some(1),
            Shape::Vector(n) => Some(n as usize),
            Shape::Matrix { .. } => None,
        }
    }

    /// Same scalar kind, different component count.
    pub fn with_components(self, n: usize) -> Option<Self> {
        Shape::vector(n).map(|shape| ValueType {
            scalar: self.scalar,
            shape,
        })
    }

    /// Same shape, different scalar kind. Matrices only convert between
    /// floating kinds.
    pub fn with_scalar(self, scalar: ScalarKind) -> Option<Self> {
        if self.is_matrix() && !scalar.is_floating() {
            return None;
        }
        Some(ValueType {
            scalar,
            shape: self.shape,
        })
    }

    /// Column vector type of a matrix.
    pub fn column_type(self) -> Option<Self> {
        match self.shape {
            Shape::Matrix { rows, .. } => self.with_components(rows as usize),
            Shape::Scalar | Shape::Vector(_) => None,
        }
    }

    /// Type produced by `value[i]`: a matrix column or a vector component.
    pub fn index_type(self) -> Option<Self> {
        match self.shape {
            Shape::Matrix { .. } => self.column_type(),
            Shape::Vector(_) => Some(ValueType::scalar(self.scalar)),
            Shape::Scalar => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shape {
            Shape::Scalar => f.write_str(self.scalar.scalar_name()),
            Shape::Vector(n) => write!(f, "{}{n}", self.scalar.vector_prefix()),
            Shape::Matrix { cols, rows } => {
                // Construction guarantees a floating kind.
                let prefix = self.scalar.matrix_prefix().unwrap_or("mat");
                if cols == rows {
                    write!(f, "{prefix}{cols}")
                } else {
                    write!(f, "{prefix}{cols}x{rows}")
                }
            }
        }
    }
}
