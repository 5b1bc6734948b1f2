//! Axis label colour utilities
//!
//! Header labels take a user-picked background; the text colour is derived
//! from its YIQ brightness so labels stay readable.

use crate::error::{CrosstabError, Result};

/// Text colour used on light backgrounds
pub const DARK_TEXT: &str = "#000";
/// Text colour used on dark backgrounds
pub const LIGHT_TEXT: &str = "#fff";

/// Parse `#RRGGBB` (or `RRGGBB`) into its channels.
pub fn parse_hex(hex_color: &str) -> Option<(u8, u8, u8)> {
    let hex = hex_color.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
    };
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Normalize a colour to lowercase `#rrggbb`.
pub fn normalize_hex(hex_color: &str) -> Result<String> {
    let (r, g, b) =
        parse_hex(hex_color).ok_or_else(|| CrosstabError::InvalidColor(hex_color.to_string()))?;
    Ok(format!("#{r:02x}{g:02x}{b:02x}"))
}

/// YIQ brightness on a 0..=255 scale, scaled by 1000 to stay in integers.
fn yiq_millis(r: u8, g: u8, b: u8) -> u32 {
    u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114
}

/// Readable text colour for a label background.
pub fn contrast_text_color(bg_color: &str) -> Result<&'static str> {
    let (r, g, b) =
        parse_hex(bg_color).ok_or_else(|| CrosstabError::InvalidColor(bg_color.to_string()))?;
    if yiq_millis(r, g, b) >= 128_000 {
        Ok(DARK_TEXT)
    } else {
        Ok(LIGHT_TEXT)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("#FFFFFF" => DARK_TEXT; "white")]
    #[test_case("#000000" => LIGHT_TEXT; "black")]
    #[test_case("#FFFF00" => DARK_TEXT; "yellow")]
    #[test_case("#0000FF" => LIGHT_TEXT; "blue")]
    #[test_case("#808080" => DARK_TEXT; "mid gray is exactly on the line")]
    #[test_case("#7F7F7F" => LIGHT_TEXT; "just below the line")]
    fn test_contrast_text_color(bg: &str) -> &'static str {
        contrast_text_color(bg).unwrap()
    }

    #[test]
    fn test_normalize_hex() {
        assert_eq!(normalize_hex("#4472C4").unwrap(), "#4472c4");
        assert_eq!(normalize_hex("ed7d31").unwrap(), "#ed7d31");
    }

    #[test]
    fn test_invalid_colors() {
        for bad in ["", "#fff", "#GGGGGG", "#12345678", "red"] {
            assert!(
                matches!(normalize_hex(bad), Err(CrosstabError::InvalidColor(_))),
                "{bad} should be rejected"
            );
        }
    }
}
