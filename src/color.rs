//! color
//!
//! Deterministic label colors.
//!
//! # Design
//!
//! A label's display color is a pure function of its name: the character
//! codes are summed, reduced modulo 360 to a hue, and converted from HSL
//! (fixed saturation 0.8, lightness 0.6) to a 6-digit lowercase hex RGB
//! string. The same name always maps to the same color, so repeated runs
//! against the same repository never disagree about what a label should
//! look like.
//!
//! # Example
//!
//! ```
//! use issuesmith::color::color_of;
//!
//! let color = color_of("bug");
//! assert_eq!(color, color_of("bug"));
//! assert_eq!(color.len(), 6);
//! ```

/// Saturation used for all generated colors.
const SATURATION: f64 = 0.8;

/// Lightness used for all generated colors.
const LIGHTNESS: f64 = 0.6;

/// Compute the display color for a label name.
///
/// Returns a 6-hex-digit lowercase RGB string (no leading `#`).
///
/// The empty string hashes to hue 0 and yields a stable red-family color;
/// it is defined, not an error.
pub fn color_of(label: &str) -> String {
    let hash = label
        .chars()
        .fold(0u32, |acc, c| acc.wrapping_add(c as u32));
    let hue = f64::from(hash % 360);
    let (r, g, b) = hsl_to_rgb(hue, SATURATION, LIGHTNESS);
    format!("{:02x}{:02x}{:02x}", r, g, b)
}

/// Convert HSL to RGB bytes.
///
/// `hue` is in degrees [0, 360); saturation and lightness in [0, 1].
/// Channels are truncated (not rounded) to match the hash contract.
fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let second = chroma * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let offset = lightness - chroma / 2.0;

    let (r, g, b) = match hue {
        h if h < 60.0 => (chroma, second, 0.0),
        h if h < 120.0 => (second, chroma, 0.0),
        h if h < 180.0 => (0.0, chroma, second),
        h if h < 240.0 => (0.0, second, chroma),
        h if h < 300.0 => (second, 0.0, chroma),
        _ => (chroma, 0.0, second),
    };

    (
        ((r + offset) * 255.0) as u8,
        ((g + offset) * 255.0) as u8,
        ((b + offset) * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_label_is_defined_and_stable() {
        // Hash 0 -> hue 0 -> red family.
        assert_eq!(color_of(""), "ea4747");
        assert_eq!(color_of(""), color_of(""));
    }

    #[test]
    fn known_labels() {
        // "feature": char codes sum to 748, hue 28.
        assert_eq!(color_of("feature"), "ea9347");
        // "bug": char codes sum to 318, hue 318.
        assert_eq!(color_of("bug"), "ea47b9");
    }

    #[test]
    fn truncation_is_the_contract() {
        // Hue 5: the green channel lands at 84.999..., which truncates to
        // 84. A rounding conversion would give 85; this pins truncation.
        let (r, g, b) = hsl_to_rgb(5.0, SATURATION, LIGHTNESS);
        assert_eq!((r, g, b), (234, 84, 71));
    }

    #[test]
    fn hue_zero_and_hue_360_collapse() {
        // Any label whose hash is a multiple of 360 gets the hue-0 color.
        let (r, g, b) = hsl_to_rgb(0.0, SATURATION, LIGHTNESS);
        assert_eq!((r, g, b), (234, 71, 71));
    }

    proptest! {
        #[test]
        fn deterministic(label in ".*") {
            prop_assert_eq!(color_of(&label), color_of(&label));
        }

        #[test]
        fn always_six_lowercase_hex_digits(label in ".*") {
            let color = color_of(&label);
            prop_assert_eq!(color.len(), 6);
            prop_assert!(color.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }
}
