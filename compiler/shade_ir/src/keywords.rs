//! Words that cannot be used as identifiers in generated GLSL.

/// GLSL keywords and words reserved for future use.
const RESERVED: &[&str] = &[
    // Keywords
    "attribute", "const", "uniform", "varying", "buffer", "shared", "coherent", "volatile",
    "restrict", "readonly", "writeonly", "atomic_uint", "layout", "centroid", "flat", "smooth",
    "noperspective", "patch", "sample", "break", "continue", "do", "for", "while", "switch",
    "case", "default", "if", "else", "subroutine", "in", "out", "inout", "float", "double", "int",
    "void", "bool", "true", "false", "invariant", "precise", "discard", "return", "uint", "lowp",
    "mediump", "highp", "precision", "struct",
    // Reserved
    "common", "partition", "active", "asm", "class", "union", "enum", "typedef", "template",
    "this", "resource", "goto", "inline", "noinline", "public", "static", "extern", "external",
    "interface", "long", "short", "half", "fixed", "unsigned", "superp", "input", "output",
    "filter", "sizeof", "cast", "namespace", "using",
    // Entry point
    "main",
];

/// Whether `word` is a GLSL keyword, reserved word or sized type name
/// (`vec3`, `mat4x2`, `sampler2D`).
pub fn is_reserved(word: &str) -> bool {
    RESERVED.contains(&word) || is_type_name(word)
}

fn is_type_name(word: &str) -> bool {
    const PREFIXES: &[&str] = &[
        "bvec", "ivec", "uvec", "dvec", "vec", "dmat", "mat", "sampler", "isampler", "usampler",
        "image", "iimage", "uimage",
    ];
    PREFIXES.iter().any(|prefix| {
        word.strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
    })
}

#[cfg(test)]
mod tests {
    use super::is_reserved;

    #[test]
    fn keywords_are_reserved() {
        for word in ["in", "out", "do", "if", "for", "int", "main", "struct"] {
            assert!(is_reserved(word), "{word}");
        }
    }

    #[test]
    fn type_names_are_reserved() {
        assert!(is_reserved("vec3"));
        assert!(is_reserved("mat4x3"));
        assert!(is_reserved("sampler2D"));
        assert!(!is_reserved("vector"));
        assert!(!is_reserved("normal"));
        assert!(!is_reserved("a"));
    }
}
