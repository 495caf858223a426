//! Literal spelling.
//!
//! Floating values print with the shortest decimal form that parses back to
//! the same bits (Rust's `{:?}` float formatting), which always keeps a
//! `.` or an exponent so GLSL reads them as floating constants. GLSL has no
//! spelling for NaN or infinities, so those print as constant divisions.

use shade_ir::{Literal, Scalar, ValueType};

/// Prints one slot.
pub(crate) fn scalar(value: Scalar) -> String {
    match value {
        Scalar::Bool(b) => b.to_string(),
        Scalar::Int(i) => i.to_string(),
        Scalar::Uint(u) => format!("{u}u"),
        Scalar::Float(f) => floating(f64::from(f), f.is_finite(), || format!("{f:?}"), ""),
        Scalar::Double(d) => floating(d, d.is_finite(), || format!("{d:?}"), "lf"),
    }
}

fn floating(
    value: f64,
    finite: bool,
    digits: impl FnOnce() -> String,
    suffix: &str,
) -> String {
    if finite {
        return format!("{}{suffix}", digits());
    }
    let numerator = if value.is_nan() {
        "0.0"
    } else if value.is_sign_negative() {
        "-1.0"
    } else {
        "1.0"
    };
    format!("({numerator}{suffix} / 0.0{suffix})")
}

/// Prints a whole literal: the bare slot for scalars, a constructor
/// otherwise.
pub(crate) fn literal(ty: ValueType, literal: &Literal) -> String {
    match literal.slots() {
        [single] => scalar(*single),
        slots => {
            let args: Vec<String> = slots.iter().map(|s| scalar(*s)).collect();
            format!("{ty}({})", args.join(", "))
        }
    }
}

/// Binding strength of a printed literal, on the operator scale: `0` for
/// atoms, `1` for constructors, `2` for negative numbers (a prefix minus).
pub(crate) fn precedence(literal: &Literal) -> u8 {
    match literal.slots() {
        [single] if single.is_negative() && is_finite(*single) => 2,
        [_] => 0,
        _ => 1,
    }
}

fn is_finite(value: Scalar) -> bool {
    match value {
        Scalar::Float(f) => f.is_finite(),
        Scalar::Double(d) => d.is_finite(),
        Scalar::Bool(_) | Scalar::Int(_) | Scalar::Uint(_) => true,
    }
}

#[cfg(test)]
mod tests;
