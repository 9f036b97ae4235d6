//! Visible-width computation for styled terminal lines.
//!
//! "Visible" means what the user perceives after the terminal has eaten the
//! ANSI escape sequences: escape bytes count for nothing, and every UTF-8
//! code point counts as one regardless of how many bytes encode it.

/// Visible width of a line that may embed ANSI SGR sequences.
///
/// An ESC byte starts an escape; everything through the terminating `m` is
/// consumed silently. This covers SGR (`ESC [ ... m`) and tolerates any other
/// sequence that ends the same way. Outside escapes, the scanner advances by
/// the UTF-8 leading-byte length rule (an invalid leading byte advances by
/// one) and adds one to the count per code point. Continuation bytes are not
/// validated.
pub fn visible_width(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut count = 0;
    let mut i = 0;
    let mut in_escape = false;

    while i < bytes.len() {
        let b = bytes[i];

        if in_escape {
            if b == b'm' {
                in_escape = false;
            }
            i += 1;
            continue;
        }
        if b == 0x1b {
            in_escape = true;
            i += 1;
            continue;
        }

        i += utf8_len(b);
        count += 1;
    }

    count
}

/// Whether `s` contains at least one character that is outside an escape
/// sequence and not a space or tab. Used to decide if a trailing fragment
/// deserves an indentation prefix.
pub fn has_visible_content(s: &str) -> bool {
    let mut in_escape = false;
    for b in s.bytes() {
        if b == 0x1b {
            in_escape = true;
        } else if in_escape {
            if b == b'm' {
                in_escape = false;
            }
        } else if b != b' ' && b != b'\t' {
            return true;
        }
    }
    false
}

/// Byte length of a UTF-8 sequence from its leading byte. Invalid leading
/// bytes are treated as a one-byte character (tolerant decoding).
fn utf8_len(b: u8) -> usize {
    if b & 0x80 == 0 {
        1
    } else if b & 0xe0 == 0xc0 {
        2
    } else if b & 0xf0 == 0xe0 {
        3
    } else if b & 0xf8 == 0xf0 {
        4
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_empty() {
        assert_eq!(visible_width(""), 0);
    }

    #[test]
    fn width_ascii() {
        assert_eq!(visible_width("hello"), 5);
    }

    #[test]
    fn width_multibyte_counts_code_points() {
        assert_eq!(visible_width("héllo"), 5);
        assert_eq!(visible_width("你好"), 2);
        assert_eq!(visible_width("🎉"), 1);
    }

    #[test]
    fn width_box_drawing() {
        assert_eq!(visible_width("╔══╗"), 4);
    }

    #[test]
    fn width_strips_sgr() {
        assert_eq!(visible_width("\x1b[36mhello\x1b[0m"), 5);
        assert_eq!(visible_width("\x1b[1m\x1b[35m"), 0);
    }

    #[test]
    fn width_invariant_under_style_wrapping() {
        let s = "todo: héllo ☑";
        let base = visible_width(s);
        let mut wrapped = s.to_string();
        for _ in 0..3 {
            wrapped = format!("\x1b[33m{wrapped}\x1b[0m");
        }
        assert_eq!(visible_width(&wrapped), base);
    }

    #[test]
    fn width_escape_without_csi_bracket() {
        // Anything between ESC and 'm' is swallowed.
        assert_eq!(visible_width("\x1b99mab"), 2);
    }

    #[test]
    fn has_visible_content_tests() {
        assert!(has_visible_content("a"));
        assert!(has_visible_content("  x  "));
        assert!(!has_visible_content(""));
        assert!(!has_visible_content("   \t"));
        assert!(!has_visible_content("\x1b[0m"));
        assert!(!has_visible_content("\x1b[0m  \x1b[1m"));
        assert!(has_visible_content("\x1b[0m . "));
    }
}
