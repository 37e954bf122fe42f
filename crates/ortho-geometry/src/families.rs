//! Static mapping from tooth label to outer-surface selection rule.
//!
//! A bracket is bonded to the outward-facing (buccal/labial) surface of
//! a tooth, and where that surface sits relative to the scan axes
//! depends on the tooth position:
//!
//! - anterior teeth (positions 1-2 in every quadrant) face forward, so
//!   the outer surface is picked by the vertical normal component;
//! - posterior teeth on the right-side quadrants (1 and 4) face the
//!   negative lateral axis, mirrored on the left-side quadrants (2 and
//!   3);
//! - molars and second premolars (positions 5-8) additionally restrict
//!   the selection to the buccal-most third of the candidate band.
//!
//! Keeping this as one table makes the mapping testable on its own and
//! keeps magic label lists out of the resolver.

use ortho_types::{fdi, Vector3};

/// Which normal-component test selects the outer surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OuterTest {
    /// Keep vertices whose normal has a non-positive vertical (y)
    /// component. Anterior teeth.
    OcclusalDown,
    /// Keep vertices whose normal has a non-positive lateral (x)
    /// component. Right-side posterior teeth.
    LateralNegative,
    /// Keep vertices whose normal has a non-negative lateral (x)
    /// component. Left-side posterior teeth.
    LateralPositive,
}

impl OuterTest {
    /// Whether a vertex normal passes this test.
    #[must_use]
    pub fn accepts(self, normal: &Vector3<f64>) -> bool {
        match self {
            Self::OcclusalDown => normal.y <= 0.0,
            Self::LateralNegative => normal.x <= 0.0,
            Self::LateralPositive => normal.x >= 0.0,
        }
    }
}

/// Outer-surface selection rule for one tooth label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToothFamily {
    /// The normal-component test.
    pub test: OuterTest,
    /// Whether the selection is narrowed to the buccal-most third of
    /// the candidate vertices (by lateral coordinate).
    pub buccal_band: bool,
}

/// Look up the selection rule for a label.
///
/// Returns `None` for the background label and for anything outside
/// the unified FDI label space; such labels get no anchor.
#[must_use]
pub fn family_of(label: i32) -> Option<ToothFamily> {
    let quadrant = fdi::quadrant(label)?;
    let position = fdi::position(label)?;

    let family = match (quadrant, position) {
        (_, 1 | 2) => ToothFamily {
            test: OuterTest::OcclusalDown,
            buccal_band: false,
        },
        (1 | 4, _) => ToothFamily {
            test: OuterTest::LateralNegative,
            buccal_band: position >= 5,
        },
        _ => ToothFamily {
            test: OuterTest::LateralPositive,
            buccal_band: position >= 5,
        },
    };
    Some(family)
}
