//! End-to-end scenarios: builder calls in, GLSL text out.
//!
//! Each test builds a small shader through the public API and compares the
//! whole generated text, so declaration grouping, statement order, naming
//! and parenthesization are all checked at once.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use shade::{
    generate, AssignOp, BinaryOp, BuiltinCatalog, CodegenConfig, Diagnostic, GeneratedShader,
    Handle, Scalar, ShaderContext, ShaderStage, StorageQualifier, ValueType,
};

fn fragment(build: impl FnOnce(&mut ShaderContext<'_>)) -> GeneratedShader {
    let catalog = BuiltinCatalog::default();
    let mut ctx = ShaderContext::new(&catalog, ShaderStage::Fragment);
    build(&mut ctx);
    generate(&ctx, &CodegenConfig::default()).unwrap()
}

fn body(lines: &[&str]) -> String {
    let mut out = String::from("void main(void)\n{\n");
    for line in lines {
        out.push('\t');
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("}\n");
    out
}

fn floats(ctx: &mut ShaderContext<'_>, ty: ValueType, values: &[f32]) -> Handle {
    let slots: Vec<Scalar> = values.iter().copied().map(Scalar::Float).collect();
    ctx.literal(ty, &slots).unwrap()
}

fn output(ctx: &mut ShaderContext<'_>, ty: ValueType, value: Handle) {
    let o = ctx.declare(StorageQualifier::Out, ty, "o").unwrap();
    ctx.assign(AssignOp::Assign, o, value).unwrap();
}

// ── Scenarios ────────────────────────────────────────────────────────

#[test]
fn dot_product_into_output() {
    let shader = fragment(|ctx| {
        let normal = ctx
            .declare(StorageQualifier::In, ValueType::vec3(), "normal")
            .unwrap();
        let light = ctx
            .declare(StorageQualifier::In, ValueType::vec3(), "light")
            .unwrap();
        let ndotl = ctx
            .declare(StorageQualifier::Out, ValueType::FLOAT, "NdotL")
            .unwrap();
        let d = ctx.call("dot", &[normal, light]).unwrap();
        ctx.assign(AssignOp::Assign, ndotl, d).unwrap();
    });
    let expected = format!(
        "in vec3 normal;\nin vec3 light;\n\nout float NdotL;\n\n{}",
        body(&["float a = dot(normal, light);", "NdotL = a;"])
    );
    assert_eq!(shader.code, expected);
    assert!(!shader.has_diagnostics());
}

#[test]
fn reassigned_local_leaves_no_dead_store() {
    let shader = fragment(|ctx| {
        let a = ctx.local(ValueType::vec3());
        let ones = floats(ctx, ValueType::vec3(), &[1.0]);
        ctx.assign(AssignOp::Assign, a, ones).unwrap();
        let two = ctx.float(2.0);
        let doubled = ctx.binary_op(BinaryOp::Mul, a, two).unwrap();
        ctx.assign(AssignOp::Assign, a, doubled).unwrap();
        output(ctx, ValueType::vec3(), a);
    });
    let expected = format!(
        "out vec3 o;\n\n{}",
        body(&["vec3 a = vec3(1.0, 1.0, 1.0) * 2.0;", "o = a;"])
    );
    assert_eq!(shader.code, expected);
}

#[test]
fn array_write_then_read() {
    let shader = fragment(|ctx| {
        let arr = ctx.local_array(ValueType::vec3(), &[4]).unwrap();
        let zero = ctx.int(0);
        let slot = ctx.index(arr, zero).unwrap();
        let origin = floats(ctx, ValueType::vec3(), &[0.0]);
        ctx.assign(AssignOp::Assign, slot, origin).unwrap();
        let v = ctx.index(arr, zero).unwrap();
        output(ctx, ValueType::vec3(), v);
    });
    let expected = format!(
        "out vec3 o;\n\n{}",
        body(&["vec3 a[4];", "a[0] = vec3(0.0, 0.0, 0.0);", "o = a[0];"])
    );
    assert_eq!(shader.code, expected);
}

#[test]
fn swizzle_writes_compose() {
    let shader = fragment(|ctx| {
        let c = ctx.local(ValueType::vec4());
        let xyz = ctx.member(c, "xyz").unwrap();
        let red = floats(ctx, ValueType::vec3(), &[1.0, 0.0, 0.0]);
        ctx.assign(AssignOp::Assign, xyz, red).unwrap();
        let w = ctx.member(c, "w").unwrap();
        let one = ctx.float(1.0);
        ctx.assign(AssignOp::Assign, w, one).unwrap();
        output(ctx, ValueType::vec4(), c);
    });
    let expected = format!(
        "out vec4 o;\n\n{}",
        body(&[
            "vec4 a;",
            "a.xyz = vec3(1.0, 0.0, 0.0);",
            "a.w = 1.0;",
            "o = a;",
        ])
    );
    assert_eq!(shader.code, expected);
    assert!(!shader.has_diagnostics());
}

// ── Nested aliases ───────────────────────────────────────────────────

#[test]
fn array_of_arrays_element_write() {
    let shader = fragment(|ctx| {
        let grid = ctx.local_array(ValueType::vec3(), &[2, 2]).unwrap();
        let one = ctx.int(1);
        let zero = ctx.int(0);
        let row = ctx.index(grid, one).unwrap();
        let cell = ctx.index(row, zero).unwrap();
        let ones = floats(ctx, ValueType::vec3(), &[1.0]);
        ctx.assign(AssignOp::Assign, cell, ones).unwrap();

        let row = ctx.index(grid, one).unwrap();
        let cell = ctx.index(row, zero).unwrap();
        output(ctx, ValueType::vec3(), cell);
    });
    let expected = format!(
        "out vec3 o;\n\n{}",
        body(&[
            "vec3 a[2][2];",
            "a[1][0] = vec3(1.0, 1.0, 1.0);",
            "o = a[1][0];",
        ])
    );
    assert_eq!(shader.code, expected);
}

#[test]
fn swizzle_of_array_element_write() {
    let shader = fragment(|ctx| {
        let arr = ctx.local_array(ValueType::vec4(), &[2]).unwrap();
        let one = ctx.int(1);
        let element = ctx.index(arr, one).unwrap();
        let yz = ctx.member(element, "yz").unwrap();
        let twos = floats(ctx, ValueType::vec2(), &[2.0]);
        ctx.assign(AssignOp::Assign, yz, twos).unwrap();

        let element = ctx.index(arr, one).unwrap();
        output(ctx, ValueType::vec4(), element);
    });
    let expected = format!(
        "out vec4 o;\n\n{}",
        body(&["vec4 a[2];", "a[1].yz = vec2(2.0, 2.0);", "o = a[1];"])
    );
    assert_eq!(shader.code, expected);
}

// ── Properties ───────────────────────────────────────────────────────

fn mix_inputs(ctx: &mut ShaderContext<'_>) {
    let a = ctx.declare(StorageQualifier::In, ValueType::FLOAT, "a").unwrap();
    let b = ctx.declare(StorageQualifier::In, ValueType::FLOAT, "b").unwrap();
    let sum = ctx.binary_op(BinaryOp::Add, a, b).unwrap();
    let lo = ctx.call("min", &[sum, a]).unwrap();
    let hi = ctx.call("max", &[sum, b]).unwrap();
    let mixed = ctx.binary_op(BinaryOp::Sub, hi, lo).unwrap();
    output(ctx, ValueType::FLOAT, mixed);
}

#[test]
fn identical_calls_print_identical_text() {
    let first = fragment(mix_inputs);
    let second = fragment(mix_inputs);
    assert_eq!(first.code, second.code);
}

#[test]
fn shared_value_is_defined_once() {
    let shader = fragment(mix_inputs);
    let expected = format!(
        "in float a;\nin float b;\n\nout float o;\n\n{}",
        body(&["float c = a + b;", "float d = max(c, b) - min(c, a);", "o = d;"])
    );
    assert_eq!(shader.code, expected);
}

#[test]
fn reads_after_assignment_use_the_assigned_name() {
    let shader = fragment(|ctx| {
        let a = ctx.declare(StorageQualifier::In, ValueType::FLOAT, "a").unwrap();
        let b = ctx.declare(StorageQualifier::In, ValueType::FLOAT, "b").unwrap();
        let x = ctx.declare(StorageQualifier::Out, ValueType::FLOAT, "x").unwrap();
        let y = ctx.declare(StorageQualifier::Out, ValueType::FLOAT, "y").unwrap();
        let sum = ctx.binary_op(BinaryOp::Add, a, b).unwrap();
        ctx.assign(AssignOp::Assign, x, sum).unwrap();
        let two = ctx.float(2.0);
        let doubled = ctx.binary_op(BinaryOp::Mul, x, two).unwrap();
        ctx.assign(AssignOp::Assign, y, doubled).unwrap();
    });
    let expected = format!(
        "in float a;\nin float b;\n\nout float x;\nout float y;\n\n{}",
        body(&["float c = a + b;", "x = c;", "float d = x * 2.0;", "y = d;"])
    );
    assert_eq!(shader.code, expected);
}

#[test]
fn uninitialized_read_is_reported_and_generation_continues() {
    let shader = fragment(|ctx| {
        let x = ctx.local(ValueType::FLOAT);
        output(ctx, ValueType::FLOAT, x);
    });
    assert_eq!(
        shader.code,
        format!("out float o;\n\n{}", body(&["float a; // uninitialized", "o = a;"]))
    );
    assert_eq!(
        shader.diagnostics,
        vec![Diagnostic::UninitializedRead {
            name: "a".to_owned()
        }]
    );
}
