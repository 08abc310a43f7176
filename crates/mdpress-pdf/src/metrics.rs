//! Glyph advance widths of the standard fonts (AFM units, 1/1000 em).

use crate::style::Font;

/// Helvetica widths for bytes 0x20..=0x7e.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // digits
    278, 278, 584, 584, 584, 556, 1015, // : ; < = > ? @
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    278, 278, 278, 469, 556, 333, // [ \ ] ^ _ `
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a-m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n-z
    334, 260, 334, 584, // { | } ~
];

/// Helvetica-Bold widths for bytes 0x20..=0x7e.
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // digits
    333, 333, 584, 584, 584, 611, 975, // : ; < = > ? @
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    333, 278, 333, 584, 556, 333, // [ \ ] ^ _ `
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a-m
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n-z
    389, 280, 389, 584, // { | } ~
];

const COURIER_WIDTH: u16 = 600;

/// Advance width of a WinAnsi byte in 1/1000 em.
pub(crate) fn char_width(font: Font, byte: u8) -> u16 {
    if font == Font::Courier {
        return COURIER_WIDTH;
    }
    let bold = font.is_bold();
    match byte {
        0x20..=0x7e => {
            let table = if bold { &HELVETICA_BOLD } else { &HELVETICA };
            table[usize::from(byte - 0x20)]
        }
        0x95 => 350,
        0x85 | 0x97 | 0x99 => 1000,
        0x91 | 0x92 => {
            if bold {
                278
            } else {
                222
            }
        }
        0x93 | 0x94 => {
            if bold {
                500
            } else {
                333
            }
        }
        0xa0 | 0xb7 => 278,
        0xb0 => 400,
        0xd7 => 584,
        0xc0..=0xde => 722,
        _ => 556,
    }
}

/// Width of encoded text at the given font size, in points.
pub(crate) fn text_width(font: Font, text: &[u8], size: f32) -> f32 {
    let units: u32 = text.iter().map(|&b| u32::from(char_width(font, b))).sum();
    units_to_points(units, size)
}

#[allow(clippy::cast_precision_loss)]
fn units_to_points(units: u32, size: f32) -> f32 {
    units as f32 * size / 1000.0
}
