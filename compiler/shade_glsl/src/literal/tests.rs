use pretty_assertions::assert_eq;
use shade_ir::{Literal, Scalar, ValueType};

use super::*;

#[test]
fn integers_and_bools() {
    assert_eq!(scalar(Scalar::Int(-3)), "-3");
    assert_eq!(scalar(Scalar::Uint(7)), "7u");
    assert_eq!(scalar(Scalar::Bool(true)), "true");
}

#[test]
fn floats_keep_a_decimal_point() {
    assert_eq!(scalar(Scalar::Float(1.0)), "1.0");
    assert_eq!(scalar(Scalar::Float(0.1)), "0.1");
    assert_eq!(scalar(Scalar::Float(-0.0)), "-0.0");
    assert_eq!(scalar(Scalar::Float(1e30)), "1e30");
}

#[test]
fn doubles_carry_suffix() {
    assert_eq!(scalar(Scalar::Double(0.1)), "0.1lf");
    assert_eq!(scalar(Scalar::Double(2.5)), "2.5lf");
}

#[test]
fn non_finite_values_print_as_divisions() {
    assert_eq!(scalar(Scalar::Float(f32::NAN)), "(0.0 / 0.0)");
    assert_eq!(scalar(Scalar::Float(f32::INFINITY)), "(1.0 / 0.0)");
    assert_eq!(scalar(Scalar::Float(f32::NEG_INFINITY)), "(-1.0 / 0.0)");
    assert_eq!(scalar(Scalar::Double(f64::INFINITY)), "(1.0lf / 0.0lf)");
}

#[test]
fn multi_slot_literal_is_a_constructor() {
    let lit = Literal::new([Scalar::Float(1.0), Scalar::Float(0.5), Scalar::Float(0.0)])
        .unwrap_or_else(|| panic!("valid literal"));
    assert_eq!(literal(ValueType::vec3(), &lit), "vec3(1.0, 0.5, 0.0)");
    assert_eq!(precedence(&lit), 1);
}

#[test]
fn negative_scalar_binds_like_prefix_minus() {
    assert_eq!(precedence(&Literal::scalar(Scalar::Float(-2.0))), 2);
    assert_eq!(precedence(&Literal::scalar(Scalar::Float(2.0))), 0);
    assert_eq!(precedence(&Literal::scalar(Scalar::Float(f32::NEG_INFINITY))), 0);
}

#[test]
fn printed_floats_round_trip() {
    for v in [0.1f32, 1e30, -0.0, 3.402_823_5e38, 1.0e-45, 123_456.79] {
        let text = scalar(Scalar::Float(v));
        let back: f32 = text.parse().unwrap_or_else(|e| panic!("{text}: {e}"));
        assert_eq!(back.to_bits(), v.to_bits(), "{text}");
    }
}
