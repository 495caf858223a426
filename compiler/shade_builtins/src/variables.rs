//! Predefined pipeline variables and implementation-limit constants.

use shade_ir::{ScalarKind, ValueType};

use crate::version::GlslVersion::{V130, V140, V150, V400, V410, V430, V450};
use crate::version::{GlslVersion, ShaderStage};
use VariableAccess::{In, Out};

/// How shader code may use a builtin variable.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum VariableAccess {
    /// Read-only stage input.
    In,
    /// Stage output; writing it makes the variable a root of the program.
    Out,
    /// Compile-time constant.
    Const,
}

/// A `gl_*` variable or constant.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct BuiltinVariable {
    pub name: &'static str,
    pub ty: ValueType,
    pub access: VariableAccess,
    pub since: GlslVersion,
    /// `None` for constants, which every stage sees.
    pub stage: Option<ShaderStage>,
}

const INT: ValueType = ValueType::INT;
const UINT: ValueType = ValueType::UINT;
const FLOAT: ValueType = ValueType::FLOAT;
const BOOL: ValueType = ValueType::BOOL;

const fn vec(scalar: ScalarKind, n: u8) -> ValueType {
    ValueType {
        scalar,
        shape: shade_ir::Shape::Vector(n),
    }
}

/// Integer limits, grouped by the version that introduced them.
const CONSTANTS: &[(GlslVersion, &[&str])] = &[
    (
        GlslVersion::V130,
        &[
            "gl_MaxTextureUnits",
            "gl_MaxVertexAttribs",
            "gl_MaxVertexUniformComponents",
            "gl_MaxVaryingComponents",
            "gl_MaxVertexTextureImageUnits",
            "gl_MaxCombinedTextureImageUnits",
            "gl_MaxTextureImageUnits",
            "gl_MaxFragmentUniformComponents",
            "gl_MaxDrawBuffers",
            "gl_MaxClipDistances",
        ],
    ),
    (
        GlslVersion::V150,
        &[
            "gl_MaxVertexOutputComponents",
            "gl_MaxGeometryInputComponents",
            "gl_MaxGeometryOutputComponents",
            "gl_MaxFragmentInputComponents",
            "gl_MaxGeometryTextureImageUnits",
            "gl_MaxGeometryOutputVertices",
            "gl_MaxGeometryTotalOutputComponents",
            "gl_MaxGeometryUniformComponents",
            "gl_MaxGeometryVaryingComponents",
        ],
    ),
    (
        GlslVersion::V400,
        &[
            "gl_MaxTessControlInputComponents",
            "gl_MaxTessControlOutputComponents",
            "gl_MaxTessControlTextureImageUnits",
            "gl_MaxTessControlUniformComponents",
            "gl_MaxTessControlTotalOutputComponents",
            "gl_MaxTessEvaluationInputComponents",
            "gl_MaxTessEvaluationOutputComponents",
            "gl_MaxTessEvaluationTextureImageUnits",
            "gl_MaxTessEvaluationUniformComponents",
            "gl_MaxTessPatchComponents",
            "gl_MaxPatchVertices",
            "gl_MaxTessGenLevel",
        ],
    ),
    (
        GlslVersion::V410,
        &[
            "gl_MaxViewports",
            "gl_MaxVertexUniformVectors",
            "gl_MaxFragmentUniformVectors",
            "gl_MaxVaryingVectors",
        ],
    ),
    (
        GlslVersion::V420,
        &[
            "gl_MaxVertexImageUniforms",
            "gl_MaxVertexAtomicCounters",
            "gl_MaxVertexAtomicCounterBuffers",
            "gl_MaxTessControlImageUniforms",
            "gl_MaxTessControlAtomicCounters",
            "gl_MaxTessControlAtomicCounterBuffers",
            "gl_MaxTessEvaluationImageUniforms",
            "gl_MaxTessEvaluationAtomicCounters",
            "gl_MaxTessEvaluationAtomicCounterBuffers",
            "gl_MaxGeometryImageUniforms",
            "gl_MaxGeometryAtomicCounters",
            "gl_MaxGeometryAtomicCounterBuffers",
            "gl_MaxFragmentImageUniforms",
            "gl_MaxFragmentAtomicCounters",
            "gl_MaxFragmentAtomicCounterBuffers",
            "gl_MaxCombinedImageUniforms",
            "gl_MaxCombinedAtomicCounters",
            "gl_MaxCombinedAtomicCounterBuffers",
            "gl_MaxImageUnits",
            "gl_MaxCombinedImageUnitsAndFragmentOutputs",
            "gl_MaxImageSamples",
            "gl_MaxAtomicCounterBindings",
            "gl_MaxAtomicCounterBufferSize",
            "gl_MinProgramTexelOffset",
            "gl_MaxProgramTexelOffset",
        ],
    ),
    (
        GlslVersion::V430,
        &[
            "gl_MaxComputeUniformComponents",
            "gl_MaxComputeTextureImageUnits",
            "gl_MaxComputeImageUniforms",
            "gl_MaxComputeAtomicCounters",
            "gl_MaxComputeAtomicCounterBuffers",
        ],
    ),
    (
        GlslVersion::V440,
        &[
            "gl_MaxTransformFeedbackBuffers",
            "gl_MaxTransformFeedbackInterleavedComponents",
        ],
    ),
    (
        GlslVersion::V450,
        &[
            "gl_MaxCullDistances",
            "gl_MaxCombinedClipAndCullDistances",
            "gl_MaxSamples",
            "gl_MaxCombinedShaderOutputResources",
        ],
    ),
];

/// Constants whose type is not `int`.
const VECTOR_CONSTANTS: &[(GlslVersion, &str, ValueType)] = &[
    (
        GlslVersion::V430,
        "gl_MaxComputeWorkGroupCount",
        vec(ScalarKind::Int, 3),
    ),
    (
        GlslVersion::V430,
        "gl_MaxComputeWorkGroupSize",
        vec(ScalarKind::Int, 3),
    ),
];

/// Every implementation-limit constant.
pub(crate) fn constants() -> impl Iterator<Item = BuiltinVariable> {
    let ints = CONSTANTS.iter().flat_map(|&(since, names)| {
        names.iter().map(move |&name| BuiltinVariable {
            name,
            ty: INT,
            access: VariableAccess::Const,
            since,
            stage: None,
        })
    });
    let vectors = VECTOR_CONSTANTS
        .iter()
        .map(|&(since, name, ty)| BuiltinVariable {
            name,
            ty,
            access: VariableAccess::Const,
            since,
            stage: None,
        });
    ints.chain(vectors)
}

type StageEntry = (GlslVersion, &'static str, ValueType, VariableAccess);

const VERTEX: &[StageEntry] = &[
    (V130, "gl_VertexID", INT, In),
    (V140, "gl_InstanceID", INT, In),
    (V130, "gl_Position", vec(ScalarKind::Float, 4), Out),
    (V130, "gl_PointSize", FLOAT, Out),
];

const TESS_CONTROL: &[StageEntry] = &[
    (V400, "gl_PatchVerticesIn", INT, In),
    (V400, "gl_PrimitiveID", INT, In),
    (V400, "gl_InvocationID", INT, In),
];

const TESS_EVALUATION: &[StageEntry] = &[
    (V400, "gl_PatchVerticesIn", INT, In),
    (V400, "gl_PrimitiveID", INT, In),
    (V400, "gl_TessCoord", vec(ScalarKind::Float, 3), In),
];

const GEOMETRY: &[StageEntry] = &[
    (V150, "gl_PrimitiveIDIn", INT, In),
    (V400, "gl_InvocationID", INT, In),
    (V150, "gl_PrimitiveID", INT, Out),
    (V150, "gl_Layer", INT, Out),
    (V410, "gl_ViewportIndex", INT, Out),
];

const FRAGMENT: &[StageEntry] = &[
    (V130, "gl_FragCoord", vec(ScalarKind::Float, 4), In),
    (V130, "gl_FrontFacing", BOOL, In),
    (V150, "gl_PointCoord", vec(ScalarKind::Float, 2), In),
    (V150, "gl_PrimitiveID", INT, In),
    (V400, "gl_SampleID", INT, In),
    (V400, "gl_SamplePosition", vec(ScalarKind::Float, 2), In),
    (V430, "gl_Layer", INT, In),
    (V430, "gl_ViewportIndex", INT, In),
    (V450, "gl_HelperInvocation", BOOL, In),
    (V130, "gl_FragDepth", FLOAT, Out),
    (V130, "gl_FragColor", vec(ScalarKind::Float, 4), Out),
];

const COMPUTE: &[StageEntry] = &[
    (V430, "gl_NumWorkGroups", vec(ScalarKind::Uint, 3), In),
    (V430, "gl_WorkGroupSize", vec(ScalarKind::Uint, 3), In),
    (V430, "gl_WorkGroupID", vec(ScalarKind::Uint, 3), In),
    (V430, "gl_LocalInvocationID", vec(ScalarKind::Uint, 3), In),
    (V430, "gl_GlobalInvocationID", vec(ScalarKind::Uint, 3), In),
    (V430, "gl_LocalInvocationIndex", UINT, In),
];

fn stage_table(stage: ShaderStage) -> &'static [StageEntry] {
    match stage {
        ShaderStage::Vertex => VERTEX,
        ShaderStage::TessControl => TESS_CONTROL,
        ShaderStage::TessEvaluation => TESS_EVALUATION,
        ShaderStage::Geometry => GEOMETRY,
        ShaderStage::Fragment => FRAGMENT,
        ShaderStage::Compute => COMPUTE,
    }
}

/// Every pipeline variable of `stage`.
pub(crate) fn stage_variables(stage: ShaderStage) -> impl Iterator<Item = BuiltinVariable> {
    stage_table(stage)
        .iter()
        .map(move |&(since, name, ty, access)| BuiltinVariable {
            name,
            ty,
            access,
            since,
            stage: Some(stage),
        })
}

pub(crate) const ALL_STAGES: [ShaderStage; 6] = [
    ShaderStage::Vertex,
    ShaderStage::TessControl,
    ShaderStage::TessEvaluation,
    ShaderStage::Geometry,
    ShaderStage::Fragment,
    ShaderStage::Compute,
];
