//! Fixed label → color palette for colored mesh output.
//!
//! The palette is part of the output contract: downstream viewers rely
//! on these exact RGB values, with upper and lower teeth of the same
//! type sharing a color and the background rendered white.

use crate::Rgb;

/// Color for a semantic label, or `None` if the label is outside the
/// unified label space (background 0 plus FDI codes 11-18, 21-28,
/// 31-38, 41-48).
#[must_use]
pub fn label_color(label: i32) -> Option<Rgb> {
    let rgb = match label {
        0 => (255, 255, 255),
        11 | 31 => (255, 153, 153),
        12 | 32 => (153, 76, 0),
        13 | 33 => (153, 153, 0),
        14 | 34 => (76, 153, 0),
        15 | 35 => (0, 153, 153),
        16 | 36 => (0, 0, 153),
        17 | 37 => (153, 0, 153),
        18 | 38 => (153, 0, 76),
        21 | 41 => (64, 64, 0),
        22 | 42 => (255, 128, 0),
        23 | 43 => (255, 0, 0),
        24 | 44 => (0, 255, 0),
        25 | 45 => (0, 0, 255),
        26 | 46 => (255, 255, 0),
        27 | 47 => (255, 0, 255),
        28 | 48 => (0, 255, 255),
        _ => return None,
    };
    Some(Rgb::new(rgb.0, rgb.1, rgb.2))
}
