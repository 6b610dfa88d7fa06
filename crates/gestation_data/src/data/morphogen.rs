use serde::{Deserialize, Serialize};
use std::fmt;

/// Diffusible signalling species secreted by organiser cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Morphogen {
    /// Rostral signal, patterns ectoderm into head, brain and eyes.
    Anterior,
    /// Midline signal, patterns endoderm and trunk mesoderm.
    Axial,
    /// Caudal signal, patterns kidneys, bladder and limbs.
    Posterior,
}

impl Morphogen {
    pub const COUNT: usize = 3;

    pub const ALL: [Morphogen; Self::COUNT] =
        [Morphogen::Anterior, Morphogen::Axial, Morphogen::Posterior];

    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Morphogen::Anterior => "anterior",
            Morphogen::Axial => "axial",
            Morphogen::Posterior => "posterior",
        }
    }
}

impl fmt::Display for Morphogen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
