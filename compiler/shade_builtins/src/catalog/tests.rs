use pretty_assertions::assert_eq;
use shade_ir::{ScalarKind, ValueType};

use super::*;
use crate::variables::VariableAccess;

#[test]
fn dot_returns_scalar() {
    let cat = BuiltinCatalog::default();
    let v3 = ValueType::vec3();
    assert_eq!(cat.resolve("dot", &[v3, v3]), Some(ValueType::FLOAT));
}

#[test]
fn gen_type_sizes_must_agree() {
    let cat = BuiltinCatalog::default();
    assert_eq!(
        cat.resolve("max", &[ValueType::vec3(), ValueType::vec2()]),
        None
    );
    assert_eq!(
        cat.resolve("max", &[ValueType::vec3(), ValueType::FLOAT]),
        Some(ValueType::vec3())
    );
}

#[test]
fn mix_with_scalar_weight_and_bool_selector() {
    let cat = BuiltinCatalog::default();
    let v4 = ValueType::vec4();
    assert_eq!(cat.resolve("mix", &[v4, v4, ValueType::FLOAT]), Some(v4));
    let bvec4 = ValueType::vector(ScalarKind::Bool, 4);
    assert_eq!(cat.resolve("mix", &[v4, v4, bvec4]), Some(v4));
}

#[test]
fn integer_mix_needs_450() {
    let ivec2 = ValueType::vector(ScalarKind::Int, 2);
    let bvec2 = ValueType::vector(ScalarKind::Bool, 2);
    let old = BuiltinCatalog::new(GlslVersion::V130);
    let new = BuiltinCatalog::new(GlslVersion::V450);
    assert_eq!(old.resolve("mix", &[ivec2, ivec2, bvec2]), None);
    assert_eq!(new.resolve("mix", &[ivec2, ivec2, bvec2]), Some(ivec2));
}

#[test]
fn versioned_functions() {
    let v130 = BuiltinCatalog::new(GlslVersion::V130);
    let v400 = BuiltinCatalog::new(GlslVersion::V400);
    assert!(!v130.has_function("fma"));
    assert!(v400.has_function("fma"));
    assert!(!v130.has_function("floatBitsToInt"));
    let d = ValueType::DOUBLE;
    assert_eq!(v130.resolve("sqrt", &[d]), None);
    assert_eq!(v400.resolve("sqrt", &[d]), Some(d));
}

#[test]
fn isnan_returns_bool_vector() {
    let cat = BuiltinCatalog::default();
    assert_eq!(
        cat.resolve("isnan", &[ValueType::vec2()]),
        Some(ValueType::vector(ScalarKind::Bool, 2))
    );
}

#[test]
fn relational_functions_need_vectors() {
    let cat = BuiltinCatalog::default();
    let v3 = ValueType::vec3();
    assert_eq!(
        cat.resolve("lessThan", &[v3, v3]),
        Some(ValueType::vector(ScalarKind::Bool, 3))
    );
    assert_eq!(
        cat.resolve("lessThan", &[ValueType::FLOAT, ValueType::FLOAT]),
        None
    );
    let bvec3 = ValueType::vector(ScalarKind::Bool, 3);
    assert_eq!(cat.resolve("any", &[bvec3]), Some(ValueType::BOOL));
}

#[test]
fn matrix_functions() {
    let cat = BuiltinCatalog::new(GlslVersion::V150);
    let m23 = ValueType::matrix(ScalarKind::Float, 2, 3);
    let m32 = ValueType::matrix(ScalarKind::Float, 3, 2);
    let m4 = ValueType::matrix(ScalarKind::Float, 4, 4);
    let (Some(m23), Some(m4)) = (m23, m4) else {
        panic!("valid matrix types");
    };
    assert_eq!(cat.resolve("transpose", &[m23]), m32);
    assert_eq!(cat.resolve("determinant", &[m4]), Some(ValueType::FLOAT));
    assert_eq!(cat.resolve("inverse", &[m23]), None);
    assert_eq!(
        cat.resolve("outerProduct", &[ValueType::vec3(), ValueType::vec2()]),
        Some(m23)
    );
}

#[test]
fn cross_is_vec3_only() {
    let cat = BuiltinCatalog::default();
    let v3 = ValueType::vec3();
    let v4 = ValueType::vec4();
    assert_eq!(cat.resolve("cross", &[v3, v3]), Some(v3));
    assert_eq!(cat.resolve("cross", &[v4, v4]), None);
}

#[test]
fn unknown_function() {
    let cat = BuiltinCatalog::default();
    assert!(!cat.has_function("frobnicate"));
    assert_eq!(cat.resolve("frobnicate", &[]), None);
}

#[test]
fn stage_variables_are_stage_scoped() {
    let cat = BuiltinCatalog::default();
    let pos = cat.variable(ShaderStage::Vertex, "gl_Position");
    assert_eq!(pos.map(|v| (v.ty, v.access)), Some((ValueType::vec4(), VariableAccess::Out)));
    assert_eq!(cat.variable(ShaderStage::Fragment, "gl_Position"), None);
    let coord = cat.variable(ShaderStage::Fragment, "gl_FragCoord");
    assert_eq!(coord.map(|v| v.access), Some(VariableAccess::In));
}

#[test]
fn stage_variables_are_versioned() {
    let v130 = BuiltinCatalog::new(GlslVersion::V130);
    let v140 = BuiltinCatalog::new(GlslVersion::V140);
    assert_eq!(v130.variable(ShaderStage::Vertex, "gl_InstanceID"), None);
    assert!(v140.variable(ShaderStage::Vertex, "gl_InstanceID").is_some());
    assert_eq!(v130.variable(ShaderStage::Compute, "gl_GlobalInvocationID"), None);
}

#[test]
fn constants_accumulate_across_versions() {
    let v130 = BuiltinCatalog::new(GlslVersion::V130);
    let v450 = BuiltinCatalog::new(GlslVersion::V450);
    let draw = v130.variable(ShaderStage::Fragment, "gl_MaxDrawBuffers");
    assert_eq!(draw.map(|v| (v.ty, v.access)), Some((ValueType::INT, VariableAccess::Const)));
    assert_eq!(v130.variable(ShaderStage::Fragment, "gl_MaxSamples"), None);
    assert!(v450.variable(ShaderStage::Vertex, "gl_MaxDrawBuffers").is_some());
    let work = v450.variable(ShaderStage::Compute, "gl_MaxComputeWorkGroupSize");
    assert_eq!(
        work.map(|v| v.ty),
        Some(ValueType::vector(ScalarKind::Int, 3))
    );
}

#[test]
fn function_names_are_sorted() {
    let names = BuiltinCatalog::default().function_names();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
    assert!(names.contains(&"normalize"));
}
