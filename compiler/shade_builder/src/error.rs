//! Builder errors.
//!
//! Every error is a misuse of the builder API: operand types that no GLSL
//! operator accepts, writes to read-only storage, unknown builtins. The
//! builder refuses the operation instead of recording a node that would
//! print as invalid GLSL.

use shade_builtins::ShaderStage;
use shade_ir::{SwizzleError, ValueType};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("operator `{op}` cannot be applied to `{lhs}` and `{rhs}`")]
    BinaryOperands {
        op: &'static str,
        lhs: ValueType,
        rhs: ValueType,
    },

    #[error("operator `{op}` cannot be applied to `{operand}`")]
    UnaryOperand { op: &'static str, operand: ValueType },

    #[error("cannot assign `{value}` to `{target}`")]
    AssignMismatch { target: String, value: String },

    #[error("cannot construct `{target}` from ({args})")]
    Constructor { target: ValueType, args: String },

    #[error("unknown builtin function `{0}`")]
    UnknownFunction(String),

    #[error("no overload of `{name}` accepts ({args})")]
    NoMatchingOverload { name: String, args: String },

    #[error("`{name}` is not a builtin variable of the {stage:?} stage")]
    UnknownVariable { name: String, stage: ShaderStage },

    #[error(transparent)]
    Swizzle(#[from] SwizzleError),

    #[error("`{0}` cannot be swizzled")]
    NotSwizzlable(String),

    #[error("array `{0}` cannot be used as an operand")]
    ArrayOperand(String),

    #[error("`{0}` cannot be indexed")]
    NotIndexable(ValueType),

    #[error("index must be a scalar int or uint, found `{0}`")]
    BadIndex(ValueType),

    #[error("target is not assignable")]
    NotAssignable,

    #[error("`{0}` is already declared")]
    DuplicateName(String),

    #[error("`{0}` is not a valid identifier")]
    InvalidName(String),

    #[error("literal for `{ty}` needs 1 or {expected} values, found {found}")]
    LiteralArity {
        ty: ValueType,
        expected: usize,
        found: usize,
    },

    #[error("literal values must all be `{0}` components")]
    LiteralKind(ValueType),

    #[error("array dimensions must be non-zero")]
    ZeroSizedArray,

    #[error("handle does not belong to this context")]
    ForeignHandle,

    #[error("only plain locals and local arrays can be renamed")]
    NotNameable,
}
