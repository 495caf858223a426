//! Immediate constant payloads.

use smallvec::SmallVec;

use crate::types::ScalarKind;

/// Largest literal: a 4x4 matrix.
pub const MAX_LITERAL_SLOTS: usize = 16;

/// One scalar slot of a literal.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Scalar {
    Bool(bool),
    Int(i32),
    Uint(u32),
    Float(f32),
    Double(f64),
}

impl Scalar {
    pub const fn kind(self) -> ScalarKind {
        match self {
            Self::Bool(_) => ScalarKind::Bool,
            Self::Int(_) => ScalarKind::Int,
            Self::Uint(_) => ScalarKind::Uint,
            Self::Float(_) => ScalarKind::Float,
            Self::Double(_) => ScalarKind::Double,
        }
    }

    /// Additive identity of `kind` (`false` for bool).
    pub const fn zero(kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::Bool => Self::Bool(false),
            ScalarKind::Int => Self::Int(0),
            ScalarKind::Uint => Self::Uint(0),
            ScalarKind::Float => Self::Float(0.0),
            ScalarKind::Double => Self::Double(0.0),
        }
    }

    /// Multiplicative identity of `kind` (`true` for bool).
    pub const fn one(kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::Bool => Self::Bool(true),
            ScalarKind::Int => Self::Int(1),
            ScalarKind::Uint => Self::Uint(1),
            ScalarKind::Float => Self::Float(1.0),
            ScalarKind::Double => Self::Double(1.0),
        }
    }

    /// Whether this slot prints with a leading minus sign.
    pub fn is_negative(self) -> bool {
        match self {
            Self::Int(v) => v < 0,
            Self::Float(v) => v.is_sign_negative() && !v.is_nan(),
            Self::Double(v) => v.is_sign_negative() && !v.is_nan(),
            Self::Bool(_) | Self::Uint(_) => false,
        }
    }
}

/// Constant data of a literal node, one slot per component.
#[derive(Clone, PartialEq, Debug)]
pub struct Literal {
    slots: SmallVec<[Scalar; 4]>,
}

impl Literal {
    /// Builds a literal from its slots.
    ///
    /// Returns `None` when empty, longer than [`MAX_LITERAL_SLOTS`], or when
    /// the slots mix scalar kinds.
    pub fn new(slots: impl IntoIterator<Item = Scalar>) -> Option<Self> {
        let slots: SmallVec<[Scalar; 4]> = slots.into_iter().collect();
        let kind = slots.first()?.kind();
        if slots.len() > MAX_LITERAL_SLOTS || slots.iter().any(|s| s.kind() != kind) {
            return None;
        }
        Some(Literal { slots })
    }

    /// Single-slot literal.
    pub fn scalar(value: Scalar) -> Self {
        Literal {
            slots: smallvec::smallvec![value],
        }
    }

    pub fn slots(&self) -> &[Scalar] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false: construction rejects empty literals.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn kind(&self) -> ScalarKind {
        // `new` guarantees at least one slot.
        self.slots.first().map_or(ScalarKind::Float, |s| s.kind())
    }
}
