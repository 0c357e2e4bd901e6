//! Glyph and string rendering
//!
//! Characters are drawn column by column from a [`GlyphStore`] with the same
//! vertical shift and masking rules as sprites. Rendering is best-effort:
//! unknown characters are skipped and off-canvas columns are clipped.

use crate::canvas::{shift_rows, Canvas, ROWS};
use crate::traits::GlyphStore;

/// Blank columns between consecutive glyphs
pub const GLYPH_SPACING: u8 = 1;

/// Total width of `text` in columns
///
/// Sum of glyph widths plus one spacing column between characters.
/// Characters without a glyph still count their spacing column.
pub fn measure_string<G: GlyphStore + ?Sized>(font: &G, text: &str) -> u16 {
    let width = text.bytes().fold(0u16, |acc, code| {
        acc.saturating_add(font.glyph_width(code) as u16 + GLYPH_SPACING as u16)
    });

    width.saturating_sub(GLYPH_SPACING as u16)
}

impl<const CHIPS: usize> Canvas<CHIPS> {
    /// Draw one character with its left edge at column `x`
    ///
    /// Returns the glyph width, or 0 if nothing was drawn because the code
    /// is above 127 or has no glyph.
    pub fn draw_char<G: GlyphStore + ?Sized>(&mut self, font: &G, x: i32, y: i8, code: u8) -> u8 {
        let width = font.glyph_width(code);
        if width == 0 {
            return 0;
        }

        let offset = font.offset(code);
        let mask = shift_rows(0xFF, y);

        for j in 0..width {
            let Some(col) = x.checked_add(j as i32) else {
                break;
            };
            if col >= Self::COLUMNS as i32 {
                break;
            }
            if col < 0 {
                continue;
            }
            let pixels = shift_rows(font.bitmap(offset.wrapping_add(j as u16)), y);
            self.blit_column(col, pixels, mask);
        }

        width
    }

    /// Draw `text` left to right starting at column `x`
    ///
    /// Does nothing when `y` puts the whole line off the display. Stops once
    /// the cursor passes the last column. Characters without a glyph do not
    /// advance the cursor.
    pub fn draw_string<G: GlyphStore + ?Sized>(&mut self, font: &G, x: i32, y: i8, text: &str) {
        if !(-(ROWS as i8)..=ROWS as i8).contains(&y) {
            return;
        }

        let mut cursor = x;
        for code in text.bytes() {
            if cursor >= Self::COLUMNS as i32 {
                break;
            }
            let width = self.draw_char(font, cursor, y, code);
            if width > 0 {
                cursor = cursor.saturating_add(width as i32 + GLYPH_SPACING as i32);
            }
        }
    }
}
