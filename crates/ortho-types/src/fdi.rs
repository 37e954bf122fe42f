//! FDI two-digit tooth-code helpers.
//!
//! The segmentation model emits FDI notation: the tens digit is the
//! quadrant (1 = upper right, 2 = upper left, 3 = lower left, 4 = lower
//! right) and the units digit is the position within the quadrant
//! (1 = central incisor through 8 = third molar). Label `0` is the
//! non-tooth background.
//!
//! After the lower-jaw shift (+20 applied to raw labels > 0), lower
//! scans land in quadrants 3 and 4, so the unified label space is
//! 11-18, 21-28, 31-38 and 41-48.

/// The background (non-tooth) label.
pub const BACKGROUND: i32 = 0;

/// Quadrant digit of an FDI code, if the code is a valid tooth label.
#[must_use]
pub fn quadrant(label: i32) -> Option<u8> {
    if is_tooth(label) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some((label / 10) as u8)
    } else {
        None
    }
}

/// Position-in-quadrant digit of an FDI code (1-8), if valid.
#[must_use]
pub fn position(label: i32) -> Option<u8> {
    if is_tooth(label) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some((label % 10) as u8)
    } else {
        None
    }
}

/// Whether a label is a valid FDI tooth code (background excluded).
#[must_use]
pub fn is_tooth(label: i32) -> bool {
    matches!(label / 10, 1..=4) && matches!(label % 10, 1..=8)
}

/// All 32 valid tooth labels in ascending order.
#[must_use]
pub fn all_tooth_labels() -> Vec<i32> {
    (1..=4)
        .flat_map(|q| (1..=8).map(move |p| q * 10 + p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_is_not_a_tooth() {
        assert!(!is_tooth(BACKGROUND));
        assert_eq!(quadrant(BACKGROUND), None);
        assert_eq!(position(BACKGROUND), None);
    }

    #[test]
    fn digits_split_correctly() {
        assert_eq!(quadrant(11), Some(1));
        assert_eq!(position(11), Some(1));
        assert_eq!(quadrant(48), Some(4));
        assert_eq!(position(48), Some(8));
    }

    #[test]
    fn invalid_codes_rejected() {
        for label in [-3, 10, 19, 29, 50, 111, 9] {
            assert!(!is_tooth(label), "label {label} should be invalid");
        }
    }

    #[test]
    fn thirty_two_teeth() {
        let labels = all_tooth_labels();
        assert_eq!(labels.len(), 32);
        assert!(labels.iter().all(|&l| is_tooth(l)));
    }
}
