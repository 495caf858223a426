//! Synthetic identifiers.
//!
//! Unnamed statements get `a`, `b`, ..., `z`, `aa`, `ab`, ... in the order
//! they are printed. Words GLSL reserves, `gl_*` names, builtin function
//! names and every explicit name in the graph are skipped.

use rustc_hash::FxHashSet;
use shade_ir::is_reserved;

pub(crate) struct NameAllocator {
    next: u64,
    taken: FxHashSet<String>,
}

impl NameAllocator {
    pub(crate) fn new(taken: impl IntoIterator<Item = String>) -> Self {
        NameAllocator {
            next: 0,
            taken: taken.into_iter().collect(),
        }
    }

    /// Next free synthetic identifier.
    pub(crate) fn fresh(&mut self) -> String {
        loop {
            let candidate = letters(self.next);
            self.next += 1;
            if !self.taken.contains(&candidate) && !is_reserved(&candidate) {
                return candidate;
            }
        }
    }
}

/// Bijective base-26: `0 -> a`, `25 -> z`, `26 -> aa`.
pub(crate) fn letters(mut n: u64) -> String {
    let mut out = Vec::new();
    loop {
        // n % 26 < 26, so the cast cannot truncate.
        #[allow(clippy::cast_possible_truncation)]
        out.push(b'a' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}
