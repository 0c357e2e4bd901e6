//! Static font tables
//!
//! [`Font`] implements [`GlyphStore`] over three read-only tables, the
//! layout used by program-memory fonts on small microcontrollers:
//! a width per character code, an offset per character code, and one
//! shared bitmap of column bytes.

mod default;

pub use default::DEFAULT_FONT;

use crate::traits::GlyphStore;

/// Font backed by static width, offset and bitmap tables
#[derive(Debug, Clone, Copy)]
pub struct Font {
    widths: &'static [u8],
    offsets: &'static [u16],
    bitmap: &'static [u8],
}

impl Font {
    /// Create a font from its tables
    ///
    /// `widths` and `offsets` are indexed by character code. Codes past the
    /// end of either table have no glyph.
    pub const fn new(widths: &'static [u8], offsets: &'static [u16], bitmap: &'static [u8]) -> Self {
        Self {
            widths,
            offsets,
            bitmap,
        }
    }

    /// Column bytes of the glyph for `code`, if it has one
    pub fn glyph(&self, code: u8) -> Option<&'static [u8]> {
        let width = self.glyph_width(code) as usize;
        if width == 0 {
            return None;
        }
        let start = self.offset(code) as usize;
        self.bitmap.get(start..start + width)
    }
}

impl GlyphStore for Font {
    fn width(&self, code: u8) -> u8 {
        self.widths.get(code as usize).copied().unwrap_or(0)
    }

    fn offset(&self, code: u8) -> u16 {
        self.offsets.get(code as usize).copied().unwrap_or(0)
    }

    fn bitmap(&self, offset: u16) -> u8 {
        self.bitmap.get(offset as usize).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_tables() {
        static WIDTHS: [u8; 2] = [0, 2];
        static OFFSETS: [u16; 2] = [0, 1];
        static BITMAP: [u8; 3] = [0, 0x11, 0x22];
        let font = Font::new(&WIDTHS, &OFFSETS, &BITMAP);

        assert_eq!(font.glyph(1), Some(&BITMAP[1..3]));
        assert_eq!(font.glyph(0), None);
        assert_eq!(font.width(90), 0);
        assert_eq!(font.bitmap(99), 0);
    }

    #[test]
    fn test_default_font_coverage() {
        for code in 0u8..=255 {
            let width = DEFAULT_FONT.glyph_width(code);
            if (b'!'..=b'~').contains(&code) {
                assert!(width > 0 && width <= 5, "glyph {} width {}", code, width);
                assert!(DEFAULT_FONT.glyph(code).is_some());
            } else if code == b' ' {
                assert_eq!(width, 3);
                assert_eq!(DEFAULT_FONT.glyph(code), Some(&[0u8, 0, 0][..]));
            } else {
                assert_eq!(width, 0);
            }
        }
    }

    #[test]
    fn test_default_font_glyphs_fit_seven_rows() {
        for code in b' '..=b'~' {
            let glyph = DEFAULT_FONT.glyph(code).unwrap();
            assert!(glyph.iter().all(|col| col & 0x80 == 0));
        }
    }
}
