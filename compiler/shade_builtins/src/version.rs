//! Target language versions and pipeline stages.

use std::fmt;

/// GLSL language version. Ordering follows release order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub enum GlslVersion {
    #[default]
    V130,
    V140,
    V150,
    V330,
    V400,
    V410,
    V420,
    V430,
    V440,
    V450,
}

impl GlslVersion {
    pub const ALL: [GlslVersion; 10] = [
        Self::V130,
        Self::V140,
        Self::V150,
        Self::V330,
        Self::V400,
        Self::V410,
        Self::V420,
        Self::V430,
        Self::V440,
        Self::V450,
    ];

    /// Number used in the `#version` directive.
    pub const fn number(self) -> u32 {
        match self {
            Self::V130 => 130,
            Self::V140 => 140,
            Self::V150 => 150,
            Self::V330 => 330,
            Self::V400 => 400,
            Self::V410 => 410,
            Self::V420 => 420,
            Self::V430 => 430,
            Self::V440 => 440,
            Self::V450 => 450,
        }
    }

    pub fn from_number(number: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.number() == number)
    }
}

impl fmt::Display for GlslVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Programmable pipeline stage.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ShaderStage {
    Vertex,
    TessControl,
    TessEvaluation,
    Geometry,
    Fragment,
    Compute,
}
