//! WinAnsi (Windows-1252) transcoding for the standard Type1 fonts.

/// Byte for the bullet glyph `•`.
pub(crate) const BULLET: u8 = 0x95;

/// Transcode text to WinAnsi bytes.
///
/// Tabs become spaces; other control characters are dropped. Characters
/// outside the encoding become `?`.
pub(crate) fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars().filter_map(encode_char).collect()
}

fn encode_char(c: char) -> Option<u8> {
    let byte = match c {
        '\t' => b' ',
        c if c.is_control() => return None,
        ' '..='~' | '\u{a0}'..='\u{ff}' => u8::try_from(u32::from(c)).unwrap_or(b'?'),
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8a,
        '‹' => 0x8b,
        'Œ' => 0x8c,
        'Ž' => 0x8e,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => BULLET,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9a,
        '›' => 0x9b,
        'œ' => 0x9c,
        'ž' => 0x9e,
        'Ÿ' => 0x9f,
        // Variation selectors and zero-width joiners carry no glyph.
        '\u{fe00}'..='\u{fe0f}' | '\u{200b}'..='\u{200d}' => return None,
        _ => b'?',
    };
    Some(byte)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(to_win_ansi("Hello (1)"), b"Hello (1)".to_vec());
    }

    #[test]
    fn test_latin1_and_punctuation() {
        assert_eq!(to_win_ansi("é°"), vec![0xe9, 0xb0]);
        assert_eq!(to_win_ansi("“a” – b…"), vec![0x93, b'a', 0x94, b' ', 0x96, b' ', b'b', 0x85]);
        assert_eq!(to_win_ansi("•"), vec![BULLET]);
    }

    #[test]
    fn test_unmappable_becomes_question_mark() {
        assert_eq!(to_win_ansi("○ ✓"), b"? ?".to_vec());
        assert_eq!(to_win_ansi("→"), b"?".to_vec());
    }

    #[test]
    fn test_controls() {
        assert_eq!(to_win_ansi("a\tb\r"), b"a b".to_vec());
        assert_eq!(to_win_ansi("ok\u{fe0f}"), b"ok".to_vec());
    }
}
