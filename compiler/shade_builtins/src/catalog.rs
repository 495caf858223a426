//! The assembled, version-filtered catalog.

use rustc_hash::FxHashMap;
use shade_ir::ValueType;

use crate::functions::{signatures, Signature};
use crate::variables::{constants, stage_variables, BuiltinVariable, ALL_STAGES};
use crate::version::{GlslVersion, ShaderStage};

/// Immutable builtin tables for one GLSL version.
///
/// Construct once and lend to every builder that targets the version.
#[derive(Clone, Debug)]
pub struct BuiltinCatalog {
    version: GlslVersion,
    functions: FxHashMap<&'static str, Vec<Signature>>,
    constants: FxHashMap<&'static str, BuiltinVariable>,
    stage_variables: FxHashMap<ShaderStage, FxHashMap<&'static str, BuiltinVariable>>,
}

impl BuiltinCatalog {
    pub fn new(version: GlslVersion) -> Self {
        let mut functions: FxHashMap<&'static str, Vec<Signature>> = FxHashMap::default();
        for sig in signatures().into_iter().filter(|s| s.since <= version) {
            functions.entry(sig.name).or_default().push(sig);
        }

        let constants = constants()
            .filter(|c| c.since <= version)
            .map(|c| (c.name, c))
            .collect();

        let stage_variables = ALL_STAGES
            .into_iter()
            .map(|stage| {
                let vars = stage_variables(stage)
                    .filter(|v| v.since <= version)
                    .map(|v| (v.name, v))
                    .collect();
                (stage, vars)
            })
            .collect();

        BuiltinCatalog {
            version,
            functions,
            constants,
            stage_variables,
        }
    }

    pub fn version(&self) -> GlslVersion {
        self.version
    }

    /// Whether any overload of `name` exists at this version.
    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Result type of calling `name` with arguments of the given types.
    ///
    /// Overloads are tried in table order; the first match wins.
    pub fn resolve(&self, name: &str, args: &[ValueType]) -> Option<ValueType> {
        self.functions
            .get(name)?
            .iter()
            .find_map(|sig| sig.apply(args))
    }

    /// A pipeline variable of `stage`, or an implementation constant.
    pub fn variable(&self, stage: ShaderStage, name: &str) -> Option<&BuiltinVariable> {
        self.stage_variables
            .get(&stage)
            .and_then(|vars| vars.get(name))
            .or_else(|| self.constants.get(name))
    }

    /// Function names available at this version, sorted.
    pub fn function_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.functions.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self::new(GlslVersion::default())
    }
}

#[cfg(test)]
mod tests;
