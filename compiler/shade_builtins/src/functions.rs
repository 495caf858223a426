//! Builtin function signatures.
//!
//! Signatures use GLSL's generic-type notation: every `Gen` parameter of
//! one signature binds the same component count (`genType` is float or
//! `vec2..vec4`, `genIType` the int family, and so on), and every `Mat`
//! parameter binds the same matrix type. Result types are computed from
//! the binding.

use shade_ir::{ScalarKind, Shape, ValueType};
use smallvec::SmallVec;

use crate::version::GlslVersion;

/// One parameter pattern.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Param {
    /// Scalar or vector of the kind; size is bound across the signature.
    Gen(ScalarKind),
    /// Vector (2..=4) of the kind; size is bound like `Gen`.
    Vec(ScalarKind),
    /// Scalar of the kind.
    Scalar(ScalarKind),
    /// Exactly this type.
    Exact(ValueType),
    /// Any matrix of the kind; bound across the signature.
    Mat(ScalarKind),
    /// Square matrix of the kind; bound like `Mat`.
    SquareMat(ScalarKind),
    /// Vector of the kind with an independent size.
    AnyVec(ScalarKind),
}

/// Result pattern.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Ret {
    /// `Gen` of the bound size.
    Gen(ScalarKind),
    Scalar(ScalarKind),
    Exact(ValueType),
    /// The bound matrix type.
    Mat,
    /// The bound matrix type with rows and columns swapped.
    Transposed,
    /// `outerProduct(c, r)`: columns from the second argument, rows from the
    /// first.
    Outer(ScalarKind),
}

/// A builtin function overload.
#[derive(Clone, Debug)]
pub struct Signature {
    pub name: &'static str,
    pub since: GlslVersion,
    pub params: SmallVec<[Param; 3]>,
    pub ret: Ret,
}

#[derive(Default)]
struct Binding {
    size: Option<usize>,
    matrix: Option<ValueType>,
}

impl Binding {
    fn bind_size(&mut self, size: usize) -> bool {
        *self.size.get_or_insert(size) == size
    }

    fn bind_matrix(&mut self, ty: ValueType) -> bool {
        *self.matrix.get_or_insert(ty) == ty
    }
}

impl Signature {
    /// Result type for `args`, or `None` if the arguments do not match.
    pub fn apply(&self, args: &[ValueType]) -> Option<ValueType> {
        if args.len() != self.params.len() {
            return None;
        }
        let mut binding = Binding::default();
        for (param, &arg) in self.params.iter().zip(args) {
            let ok = match *param {
                Param::Gen(kind) => {
                    arg.scalar == kind && !arg.is_matrix() && binding.bind_size(arg.components())
                }
                Param::Vec(kind) => {
                    arg.scalar == kind && arg.is_vector() && binding.bind_size(arg.components())
                }
                Param::Scalar(kind) => arg == ValueType::scalar(kind),
                Param::Exact(ty) => arg == ty,
                Param::Mat(kind) => arg.scalar == kind && arg.is_matrix() && binding.bind_matrix(arg),
                Param::SquareMat(kind) => {
                    matches!(arg.shape, Shape::Matrix { cols, rows } if cols == rows)
                        && arg.scalar == kind
                        && binding.bind_matrix(arg)
                }
                Param::AnyVec(kind) => arg.scalar == kind && arg.is_vector(),
            };
            if !ok {
                return None;
            }
        }
        match self.ret {
            Ret::Gen(kind) => ValueType::scalar(kind).with_components(binding.size.unwrap_or(1)),
            Ret::Scalar(kind) => Some(ValueType::scalar(kind)),
            Ret::Exact(ty) => Some(ty),
            Ret::Mat => binding.matrix,
            Ret::Transposed => match binding.matrix?.shape {
                Shape::Matrix { cols, rows } => {
                    ValueType::matrix(binding.matrix?.scalar, rows.into(), cols.into())
                }
                Shape::Scalar | Shape::Vector(_) => None,
            },
            Ret::Outer(kind) => {
                ValueType::matrix(kind, args[1].components(), args[0].components())
            }
        }
    }
}

fn sig(name: &'static str, since: GlslVersion, params: &[Param], ret: Ret) -> Signature {
    Signature {
        name,
        since,
        params: SmallVec::from_slice(params),
        ret,
    }
}

/// Floating kinds with the version each became available.
const FLOATING: [(ScalarKind, GlslVersion); 2] = [
    (ScalarKind::Float, GlslVersion::V130),
    (ScalarKind::Double, GlslVersion::V400),
];

/// Builds the full signature table.
pub(crate) fn signatures() -> Vec<Signature> {
    use GlslVersion::{V130, V140, V150, V330, V400, V450};
    use Param::{AnyVec, Gen, Mat, Scalar, SquareMat};
    use ScalarKind::{Bool, Double, Float, Int, Uint};

    let mut t = Vec::with_capacity(256);

    // ── Angle and trigonometry ──
    for name in [
        "radians", "degrees", "sin", "cos", "tan", "asin", "acos", "atan", "sinh", "cosh", "tanh",
        "asinh", "acosh", "atanh",
    ] {
        t.push(sig(name, V130, &[Gen(Float)], Ret::Gen(Float)));
    }
    t.push(sig("atan", V130, &[Gen(Float), Gen(Float)], Ret::Gen(Float)));

    // ── Exponential ──
    t.push(sig("pow", V130, &[Gen(Float), Gen(Float)], Ret::Gen(Float)));
    for name in ["exp", "log", "exp2", "log2"] {
        t.push(sig(name, V130, &[Gen(Float)], Ret::Gen(Float)));
    }
    for (k, since) in FLOATING {
        for name in ["sqrt", "inversesqrt"] {
            t.push(sig(name, since, &[Gen(k)], Ret::Gen(k)));
        }
    }

    // ── Common ──
    for (k, since) in FLOATING {
        for name in ["abs", "sign", "floor", "trunc", "round", "roundEven", "ceil", "fract"] {
            t.push(sig(name, since, &[Gen(k)], Ret::Gen(k)));
        }
        t.push(sig("mod", since, &[Gen(k), Gen(k)], Ret::Gen(k)));
        t.push(sig("mod", since, &[Gen(k), Scalar(k)], Ret::Gen(k)));
        t.push(sig("mix", since, &[Gen(k), Gen(k), Gen(k)], Ret::Gen(k)));
        t.push(sig("mix", since, &[Gen(k), Gen(k), Scalar(k)], Ret::Gen(k)));
        t.push(sig("mix", since, &[Gen(k), Gen(k), Gen(Bool)], Ret::Gen(k)));
        t.push(sig("step", since, &[Gen(k), Gen(k)], Ret::Gen(k)));
        t.push(sig("step", since, &[Scalar(k), Gen(k)], Ret::Gen(k)));
        t.push(sig("smoothstep", since, &[Gen(k), Gen(k), Gen(k)], Ret::Gen(k)));
        t.push(sig("smoothstep", since, &[Scalar(k), Scalar(k), Gen(k)], Ret::Gen(k)));
        t.push(sig("isnan", since, &[Gen(k)], Ret::Gen(Bool)));
        t.push(sig("isinf", since, &[Gen(k)], Ret::Gen(Bool)));
        t.push(sig("fma", V400, &[Gen(k), Gen(k), Gen(k)], Ret::Gen(k)));
        t.push(sig("ldexp", V400, &[Gen(k), Gen(Int)], Ret::Gen(k)));
    }
    for name in ["abs", "sign"] {
        t.push(sig(name, V130, &[Gen(Int)], Ret::Gen(Int)));
    }
    for (k, since) in [(Float, V130), (Int, V130), (Uint, V130), (Double, V400)] {
        for name in ["min", "max"] {
            t.push(sig(name, since, &[Gen(k), Gen(k)], Ret::Gen(k)));
            t.push(sig(name, since, &[Gen(k), Scalar(k)], Ret::Gen(k)));
        }
        t.push(sig("clamp", since, &[Gen(k), Gen(k), Gen(k)], Ret::Gen(k)));
        t.push(sig("clamp", since, &[Gen(k), Scalar(k), Scalar(k)], Ret::Gen(k)));
    }
    for k in [Int, Uint, Bool] {
        t.push(sig("mix", V450, &[Gen(k), Gen(k), Gen(Bool)], Ret::Gen(k)));
    }
    t.push(sig("floatBitsToInt", V330, &[Gen(Float)], Ret::Gen(Int)));
    t.push(sig("floatBitsToUint", V330, &[Gen(Float)], Ret::Gen(Uint)));
    t.push(sig("intBitsToFloat", V330, &[Gen(Int)], Ret::Gen(Float)));
    t.push(sig("uintBitsToFloat", V330, &[Gen(Uint)], Ret::Gen(Float)));

    // ── Geometric ──
    for (k, since) in FLOATING {
        t.push(sig("length", since, &[Gen(k)], Ret::Scalar(k)));
        t.push(sig("distance", since, &[Gen(k), Gen(k)], Ret::Scalar(k)));
        t.push(sig("dot", since, &[Gen(k), Gen(k)], Ret::Scalar(k)));
        let vec3 = ValueType::vector(k, 3);
        t.push(sig(
            "cross",
            since,
            &[Param::Exact(vec3), Param::Exact(vec3)],
            Ret::Exact(vec3),
        ));
        t.push(sig("normalize", since, &[Gen(k)], Ret::Gen(k)));
        t.push(sig("faceforward", since, &[Gen(k), Gen(k), Gen(k)], Ret::Gen(k)));
        t.push(sig("reflect", since, &[Gen(k), Gen(k)], Ret::Gen(k)));
        t.push(sig("refract", since, &[Gen(k), Gen(k), Scalar(Float)], Ret::Gen(k)));
    }

    // ── Vector relational ──
    for (k, since) in [(Float, V130), (Int, V130), (Uint, V130), (Double, V400)] {
        for name in ["lessThan", "lessThanEqual", "greaterThan", "greaterThanEqual"] {
            t.push(sig(name, since, &[Param::Vec(k), Param::Vec(k)], Ret::Gen(Bool)));
        }
    }
    for (k, since) in [
        (Float, V130),
        (Int, V130),
        (Uint, V130),
        (Bool, V130),
        (Double, V400),
    ] {
        for name in ["equal", "notEqual"] {
            t.push(sig(name, since, &[Param::Vec(k), Param::Vec(k)], Ret::Gen(Bool)));
        }
    }
    t.push(sig("any", V130, &[Param::Vec(Bool)], Ret::Scalar(Bool)));
    t.push(sig("all", V130, &[Param::Vec(Bool)], Ret::Scalar(Bool)));
    t.push(sig("not", V130, &[Param::Vec(Bool)], Ret::Gen(Bool)));

    // ── Matrix ──
    for (k, since) in FLOATING {
        t.push(sig("matrixCompMult", since, &[Mat(k), Mat(k)], Ret::Mat));
        t.push(sig("outerProduct", since, &[AnyVec(k), AnyVec(k)], Ret::Outer(k)));
        t.push(sig("transpose", since, &[Mat(k)], Ret::Transposed));
        t.push(sig(
            "determinant",
            since.max(V150),
            &[SquareMat(k)],
            Ret::Scalar(k),
        ));
        t.push(sig("inverse", since.max(V140), &[SquareMat(k)], Ret::Mat));
    }

    t
}
