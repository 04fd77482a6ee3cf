//! Helvetica advance widths and WinAnsi encoding for footer text.
//!
//! The footer uses the standard Type 1 Helvetica font, so no font program is
//! embedded and widths come from the Adobe font metrics.

/// Glyph used for characters outside WinAnsi.
const REPLACEMENT: u8 = b'?';

/// Advance widths (1/1000 em) for WinAnsi codes `0x20..=0xFF`. Unassigned
/// codes are zero.
#[rustfmt::skip]
const WIDTHS: [u16; 224] = [
    // 0x20
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0x30
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    // 0x40
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    // 0x50
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    // 0x60
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    // 0x70
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 0,
    // 0x80
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    // 0x90
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667,
    // 0xA0
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    // 0xB0
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    // 0xC0
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    // 0xD0
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    // 0xE0
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    // 0xF0
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

/// WinAnsi code for `c`, if it has one.
#[must_use]
pub fn win_ansi_code(c: char) -> Option<u8> {
    let code = match c {
        ' '..='~' | '\u{a0}'..='\u{ff}' => u8::try_from(u32::from(c)).ok()?,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '\u{2014}' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(code)
}

/// Encodes `text` for a WinAnsi font, replacing unsupported characters
/// with `?`.
#[must_use]
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| win_ansi_code(c).unwrap_or(REPLACEMENT))
        .collect()
}

fn advance(code: u8) -> u16 {
    usize::from(code)
        .checked_sub(0x20)
        .and_then(|index| WIDTHS.get(index))
        .copied()
        .unwrap_or(0)
}

/// Width of `text` in points when set in Helvetica at `size`.
#[must_use]
pub fn text_width(text: &str, size: f32) -> f32 {
    let units: u32 = encode_win_ansi(text)
        .into_iter()
        .map(|code| u32::from(advance(code)))
        .sum();
    // Footer strings stay far below f32's exact integer range.
    #[allow(clippy::cast_precision_loss)]
    let units = units as f32;
    units * size / 1000.0
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[rstest::rstest]
    #[case("", 0.0)]
    #[case(" ", 2.78)]
    #[case("Helvetica", 41.12)]
    #[case("©", 7.37)]
    #[case("…", 10.0)]
    fn test_text_width(#[case] text: &str, #[case] expected: f32) {
        assert!((text_width(text, 10.0) - expected).abs() < 0.001);
    }

    #[test]
    fn test_width_scales_with_size() {
        assert!((text_width("AB", 9.0) * 2.0 - text_width("AB", 18.0)).abs() < 0.001);
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("© 2025 …"), b"\xa9 2025 \x85".to_vec());
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
        assert_eq!(encode_win_ansi("\u{2019}é"), b"\x92\xe9".to_vec());
    }

    #[test]
    fn test_unsupported_measured_as_replacement() {
        assert_eq!(text_width("日", 10.0), text_width("?", 10.0));
    }
}
