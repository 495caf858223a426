//! Component selection (`v.xyz`, `c.rgba`, `t.stpq`).
//!
//! The three letter sets are synonyms: `x`, `r` and `s` all select
//! component 0. A selection keeps the set it was written in so the
//! printed text matches what the caller asked for.

use std::fmt;

use smallvec::SmallVec;
use thiserror::Error;

/// Letter set a swizzle was written in.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SwizzleSet {
    Xyzw,
    Rgba,
    Stpq,
}

impl SwizzleSet {
    const fn letters(self) -> [char; 4] {
        match self {
            Self::Xyzw => ['x', 'y', 'z', 'w'],
            Self::Rgba => ['r', 'g', 'b', 'a'],
            Self::Stpq => ['s', 't', 'p', 'q'],
        }
    }

    fn classify(c: char) -> Option<(SwizzleSet, u8)> {
        [Self::Xyzw, Self::Rgba, Self::Stpq]
            .into_iter()
            .find_map(|set| {
                let pos = set.letters().iter().position(|&l| l == c)?;
                // Position is below 4.
                Some((set, pos as u8))
            })
    }
}

/// Invalid component selection.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum SwizzleError {
    #[error("empty swizzle")]
    Empty,
    #[error("swizzle `{0}` selects more than 4 components")]
    TooLong(String),
    #[error("`{0}` is not a component letter")]
    UnknownComponent(char),
    #[error("swizzle `{0}` mixes letter sets")]
    MixedSets(String),
    #[error("component `{component}` is out of range for a {arity}-component value")]
    OutOfRange { component: char, arity: usize },
}

/// A validated selection of 1..=4 components.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Swizzle {
    set: SwizzleSet,
    indices: SmallVec<[u8; 4]>,
}

impl Swizzle {
    /// Parses `letters` against a value with `arity` components.
    pub fn parse(letters: &str, arity: usize) -> Result<Self, SwizzleError> {
        let mut set = None;
        let mut indices = SmallVec::new();
        for c in letters.chars() {
            let (this_set, index) =
                SwizzleSet::classify(c).ok_or(SwizzleError::UnknownComponent(c))?;
            match set {
                None => set = Some(this_set),
                Some(s) if s != this_set => {
                    return Err(SwizzleError::MixedSets(letters.to_owned()));
                }
                Some(_) => {}
            }
            if usize::from(index) >= arity {
                return Err(SwizzleError::OutOfRange {
                    component: c,
                    arity,
                });
            }
            indices.push(index);
        }
        let set = set.ok_or(SwizzleError::Empty)?;
        if indices.len() > 4 {
            return Err(SwizzleError::TooLong(letters.to_owned()));
        }
        Ok(Swizzle { set, indices })
    }

    /// Selected component positions, in order.
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Always false: parsing rejects empty selections.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn set(&self) -> SwizzleSet {
        self.set
    }

    /// A selection can be written through only if no component repeats.
    pub fn is_lvalue(&self) -> bool {
        let mut seen = [false; 4];
        self.indices.iter().all(|&i| {
            let fresh = !seen[usize::from(i)];
            seen[usize::from(i)] = true;
            fresh
        })
    }

    /// Component letters as written.
    pub fn letters(&self) -> String {
        let table = self.set.letters();
        self.indices
            .iter()
            .map(|&i| table[usize::from(i)])
            .collect()
    }
}

impl fmt::Display for Swizzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.letters())
    }
}
