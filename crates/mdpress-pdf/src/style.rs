//! Fonts, colours and paragraph styles of the report layout.

/// Points per centimetre.
pub(crate) const POINTS_PER_CM: f32 = 72.0 / 2.54;

/// Convert centimetres to points.
pub(crate) const fn cm(value: f32) -> f32 {
    value * POINTS_PER_CM
}

/// RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    pub(crate) const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
        }
    }

    /// Components scaled to the 0.0..=1.0 range used by PDF colour operators.
    pub(crate) fn components(self) -> [f32; 3] {
        [self.r, self.g, self.b].map(|c| f32::from(c) / 255.0)
    }
}

pub(crate) const BLACK: Color = Color::hex(0x00_00_00);
pub(crate) const WHITE: Color = Color::hex(0xff_ff_ff);
pub(crate) const TITLE_COLOR: Color = Color::hex(0x2c_3e_50);
pub(crate) const ACCENT: Color = Color::hex(0x34_98_db);
pub(crate) const H2_COLOR: Color = Color::hex(0x34_49_5e);
pub(crate) const H3_COLOR: Color = Color::hex(0x7f_8c_8d);
pub(crate) const CODE_BACKGROUND: Color = Color::hex(0xf8_f8_f8);
pub(crate) const GRID: Color = Color::hex(0xdd_dd_dd);
pub(crate) const ZEBRA: Color = Color::hex(0xf9_f9_f9);
pub(crate) const RULE_COLOR: Color = Color::hex(0x99_99_99);

/// The standard Type1 fonts used by the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Font {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    Courier,
}

impl Font {
    pub(crate) const ALL: [Self; 5] = [
        Self::Helvetica,
        Self::HelveticaBold,
        Self::HelveticaOblique,
        Self::HelveticaBoldOblique,
        Self::Courier,
    ];

    /// Name under which the font is registered in page resources.
    pub(crate) fn resource_name(self) -> &'static str {
        match self {
            Self::Helvetica => "F1",
            Self::HelveticaBold => "F2",
            Self::HelveticaOblique => "F3",
            Self::HelveticaBoldOblique => "F4",
            Self::Courier => "F5",
        }
    }

    pub(crate) fn base_font(self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::HelveticaOblique => "Helvetica-Oblique",
            Self::HelveticaBoldOblique => "Helvetica-BoldOblique",
            Self::Courier => "Courier",
        }
    }

    /// Helvetica variant for the given weight and slant.
    pub(crate) fn helvetica(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (false, false) => Self::Helvetica,
            (true, false) => Self::HelveticaBold,
            (false, true) => Self::HelveticaOblique,
            (true, true) => Self::HelveticaBoldOblique,
        }
    }

    pub(crate) fn is_bold(self) -> bool {
        matches!(self, Self::HelveticaBold | Self::HelveticaBoldOblique)
    }
}

/// Paragraph style: text metrics and vertical spacing in points.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TextStyle {
    pub(crate) font_size: f32,
    pub(crate) leading: f32,
    pub(crate) color: Color,
    pub(crate) bold: bool,
    pub(crate) centered: bool,
    pub(crate) space_before: f32,
    pub(crate) space_after: f32,
    /// Rule drawn under the paragraph: (line width, colour).
    pub(crate) underline: Option<(f32, Color)>,
}

const fn heading(font_size: f32, color: Color, space_before: f32, space_after: f32) -> TextStyle {
    TextStyle {
        font_size,
        leading: font_size * 1.2,
        color,
        bold: true,
        centered: false,
        space_before,
        space_after,
        underline: None,
    }
}

pub(crate) const TITLE: TextStyle = TextStyle {
    centered: true,
    ..heading(24.0, TITLE_COLOR, 0.0, 30.0 + cm(0.2))
};

pub(crate) const HEADING_1: TextStyle = TextStyle {
    underline: Some((2.0, ACCENT)),
    ..heading(18.0, TITLE_COLOR, 20.0, 12.0 + cm(0.2))
};

pub(crate) const HEADING_2: TextStyle = heading(14.0, H2_COLOR, 15.0, 10.0 + cm(0.1));

pub(crate) const HEADING_3: TextStyle = heading(12.0, H3_COLOR, 10.0, 8.0);

pub(crate) const BODY: TextStyle = TextStyle {
    font_size: 10.0,
    leading: 14.0,
    color: BLACK,
    bold: false,
    centered: false,
    space_before: 0.0,
    space_after: 6.0,
    underline: None,
};

/// Style for a heading block of the given level.
pub(crate) fn heading_style(level: u8) -> &'static TextStyle {
    match level {
        1 => &HEADING_1,
        2 => &HEADING_2,
        _ => &HEADING_3,
    }
}

pub(crate) const CODE_FONT_SIZE: f32 = 8.0;
pub(crate) const CODE_LEADING: f32 = 9.6;
pub(crate) const CODE_PADDING: f32 = 10.0;
pub(crate) const CODE_BORDER: f32 = 1.0;

pub(crate) const TABLE_FONT_SIZE: f32 = 8.0;
pub(crate) const TABLE_LEADING: f32 = 9.6;
pub(crate) const CELL_PADDING_X: f32 = 6.0;
pub(crate) const CELL_PADDING_TOP: f32 = 3.0;
pub(crate) const CELL_PADDING_BOTTOM: f32 = 3.0;
pub(crate) const HEADER_PADDING_BOTTOM: f32 = 12.0;
pub(crate) const GRID_WIDTH: f32 = 1.0;

pub(crate) const RULE_WIDTH: f32 = 0.5;
/// Gap between a heading's last line and its underline.
pub(crate) const UNDERLINE_GAP: f32 = 5.0;

/// Space after code blocks, tables and around rules.
pub(crate) const BLOCK_GAP: f32 = cm(0.3);
pub(crate) const SPACER: f32 = cm(0.2);
