//! Jaw side (dental arch) selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which dental arch a scan belongs to.
///
/// The jaw side decides two things downstream: whether the lower-jaw
/// label shift is applied to the model output, and which geometric
/// convention the brace-anchor resolver uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JawSide {
    /// The lower arch (mandible).
    Lower,
    /// The upper arch (maxilla).
    Upper,
}

impl JawSide {
    /// Parse a jaw side from its lowercase name.
    ///
    /// Returns `None` for anything other than `"lower"` or `"upper"`;
    /// the caller decides whether that is fatal.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "lower" => Some(Self::Lower),
            "upper" => Some(Self::Upper),
            _ => None,
        }
    }

    /// The lowercase name used in filenames and artifacts.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lower => "lower",
            Self::Upper => "upper",
        }
    }
}

impl fmt::Display for JawSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
