//! Result-type rules for operators and constructors.
//!
//! These mirror the GLSL operator rules. They run when a node is built;
//! nothing downstream recomputes a type.

use shade_ir::{BinaryOp, Shape, UnaryOp, ValueType};

use crate::error::BuildError;

/// Result type of `lhs op rhs`.
pub fn binary(op: BinaryOp, lhs: ValueType, rhs: ValueType) -> Result<ValueType, BuildError> {
    let mismatch = || BuildError::BinaryOperands {
        op: op.as_symbol(),
        lhs,
        rhs,
    };

    if op.is_logical() {
        return if lhs == ValueType::BOOL && rhs == ValueType::BOOL {
            Ok(ValueType::BOOL)
        } else {
            Err(mismatch())
        };
    }
    if op.is_equality() {
        return if lhs == rhs {
            Ok(ValueType::BOOL)
        } else {
            Err(mismatch())
        };
    }
    if op.is_relational() {
        return if lhs == rhs && lhs.is_scalar() && lhs.scalar.is_numeric() {
            Ok(ValueType::BOOL)
        } else {
            Err(mismatch())
        };
    }
    if op.is_shift() {
        let ok = lhs.scalar.is_integer()
            && rhs.scalar.is_integer()
            && !lhs.is_matrix()
            && (rhs.is_scalar() || rhs.shape == lhs.shape);
        return if ok { Ok(lhs) } else { Err(mismatch()) };
    }

    // Arithmetic and bitwise: one scalar kind on both sides.
    if lhs.scalar != rhs.scalar || !lhs.scalar.is_numeric() {
        return Err(mismatch());
    }
    let integer_only = op.is_bitwise() || op == BinaryOp::Mod;
    if integer_only && !lhs.scalar.is_integer() {
        return Err(mismatch());
    }
    if op == BinaryOp::Mul {
        if let Some(ty) = linear_algebra(lhs, rhs) {
            return Ok(ty);
        }
    }
    match (lhs.shape, rhs.shape) {
        (l, r) if l == r && !(op == BinaryOp::Mul && lhs.is_matrix()) => Ok(lhs),
        (Shape::Scalar, _) => Ok(rhs),
        (_, Shape::Scalar) => Ok(lhs),
        _ => Err(mismatch()),
    }
}

/// `matrix * vector`, `vector * matrix`, `matrix * matrix`.
fn linear_algebra(lhs: ValueType, rhs: ValueType) -> Option<ValueType> {
    let kind = lhs.scalar;
    match (lhs.shape, rhs.shape) {
        (Shape::Matrix { cols, rows }, Shape::Vector(n)) if n == cols => {
            ValueType::scalar(kind).with_components(rows.into())
        }
        (Shape::Vector(n), Shape::Matrix { cols, rows }) if n == rows => {
            ValueType::scalar(kind).with_components(cols.into())
        }
        (
            Shape::Matrix {
                cols: l_cols,
                rows: l_rows,
            },
            Shape::Matrix {
                cols: r_cols,
                rows: r_rows,
            },
        ) if l_cols == r_rows => ValueType::matrix(kind, r_cols.into(), l_rows.into()),
        _ => None,
    }
}

/// Result type of a unary operator.
pub fn unary(op: UnaryOp, operand: ValueType) -> Result<ValueType, BuildError> {
    let ok = match op {
        UnaryOp::Neg
        | UnaryOp::PreInc
        | UnaryOp::PreDec
        | UnaryOp::PostInc
        | UnaryOp::PostDec => operand.scalar.is_numeric(),
        UnaryOp::Not => operand == ValueType::BOOL,
        UnaryOp::BitNot => operand.scalar.is_integer(),
    };
    if ok {
        Ok(operand)
    } else {
        Err(BuildError::UnaryOperand {
            op: op.as_symbol(),
            operand,
        })
    }
}

/// Checks a constructor call `target(args..)`.
///
/// Accepted forms:
/// - one scalar: broadcast to every component, or the diagonal of a matrix
/// - one vector or matrix with at least as many components: conversion or
///   drop to a prefix
/// - one matrix for a matrix target: resize
/// - several scalars/vectors whose components fill the target, where only
///   the last argument may be partially consumed
pub fn construct(target: ValueType, args: &[ValueType]) -> Result<(), BuildError> {
    let fail = || BuildError::Constructor {
        target,
        args: type_list(args),
    };
    let needed = target.components();

    match args {
        [] => Err(fail()),
        [single] if single.is_scalar() => Ok(()),
        [single] if target.is_matrix() && single.is_matrix() => Ok(()),
        [single] if target.is_matrix() => {
            if single.components() == needed {
                Ok(())
            } else {
                Err(fail())
            }
        }
        [single] => {
            if single.components() >= needed {
                Ok(())
            } else {
                Err(fail())
            }
        }
        _ => {
            if args.iter().any(|a| a.is_matrix()) {
                return Err(fail());
            }
            let total: usize = args.iter().map(|a| a.components()).sum();
            let last = args.last().map_or(0, |a| a.components());
            if total >= needed && total - last < needed {
                Ok(())
            } else {
                Err(fail())
            }
        }
    }
}

/// Comma-separated type list for error messages.
pub fn type_list(types: &[ValueType]) -> String {
    types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
