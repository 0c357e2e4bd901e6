//! Pixel canvas
//!
//! A row of `CHIPS` 8x8 segments addressed as one linear sequence of
//! columns. Each column is an 8-bit vertical mask: bit `i` lights row `i`.
//! Column `c` belongs to chip `c / 8`, digit register `c % 8 + 1`.

/// Rows per column
pub const ROWS: u8 = 8;

/// Columns driven by one chip
pub const COLUMNS_PER_CHIP: usize = 8;

/// Shift a column mask vertically
///
/// Positive `y` moves bits toward higher rows, negative `y` toward row 0.
/// Bits shifted past either edge are lost.
pub(crate) const fn shift_rows(bits: u8, y: i8) -> u8 {
    match y {
        0..=7 => bits << y,
        -7..=-1 => bits >> (-y),
        _ => 0,
    }
}

/// Mask of the low `h` rows
const fn rows_mask(h: u8) -> u8 {
    if h >= ROWS {
        0xFF
    } else {
        (1u8 << h) - 1
    }
}

/// Linear pixel surface backed by one 8-byte segment per chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas<const CHIPS: usize> {
    segments: [[u8; COLUMNS_PER_CHIP]; CHIPS],
}

impl<const CHIPS: usize> Default for Canvas<CHIPS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CHIPS: usize> Canvas<CHIPS> {
    /// Total number of columns
    pub const COLUMNS: usize = CHIPS * COLUMNS_PER_CHIP;

    /// Create a blank canvas
    pub const fn new() -> Self {
        Self {
            segments: [[0; COLUMNS_PER_CHIP]; CHIPS],
        }
    }

    /// Total number of columns
    pub const fn width(&self) -> usize {
        Self::COLUMNS
    }

    /// Blank every column
    pub fn clear(&mut self) {
        self.segments = [[0; COLUMNS_PER_CHIP]; CHIPS];
    }

    /// Read one column
    ///
    /// # Panics
    /// Panics if `col` is outside the canvas.
    pub fn column(&self, col: usize) -> u8 {
        self.segments[col / COLUMNS_PER_CHIP][col % COLUMNS_PER_CHIP]
    }

    /// Overwrite one column
    ///
    /// # Panics
    /// Panics if `col` is outside the canvas.
    pub fn set_column(&mut self, col: usize, data: u8) {
        self.segments[col / COLUMNS_PER_CHIP][col % COLUMNS_PER_CHIP] = data;
    }

    /// Light pixel `(x, y)`
    ///
    /// # Panics
    /// Panics if `x` is outside the canvas or `y >= 8`.
    pub fn set_pixel(&mut self, x: usize, y: u8) {
        assert!(y < ROWS, "row out of range");
        let data = self.column(x) | (1 << y);
        self.set_column(x, data);
    }

    /// Clear pixel `(x, y)`
    ///
    /// # Panics
    /// Panics if `x` is outside the canvas or `y >= 8`.
    pub fn clear_pixel(&mut self, x: usize, y: u8) {
        assert!(y < ROWS, "row out of range");
        let data = self.column(x) & !(1 << y);
        self.set_column(x, data);
    }

    /// Check pixel `(x, y)`
    pub fn pixel(&self, x: usize, y: u8) -> bool {
        y < ROWS && self.column(x) & (1 << y) != 0
    }

    /// Segment (8 columns) driven by `chip`
    pub fn segment(&self, chip: usize) -> &[u8; COLUMNS_PER_CHIP] {
        &self.segments[chip]
    }

    /// All columns, left to right
    pub fn columns(&self) -> impl Iterator<Item = u8> + '_ {
        self.segments.iter().flat_map(|seg| seg.iter().copied())
    }

    /// Merge shifted source bits into column `col`, clipping outside columns
    ///
    /// Only the rows in `mask` are replaced; the rest of the column is kept.
    pub(crate) fn blit_column(&mut self, col: i32, pixels: u8, mask: u8) {
        if col < 0 || col as usize >= Self::COLUMNS {
            return;
        }
        let col = col as usize;
        let data = (self.column(col) & !mask) | (pixels & mask);
        self.set_column(col, data);
    }

    /// Draw a sprite
    ///
    /// Blits `w` columns of `bitmap` starting at column `x`, each shifted
    /// vertically by `y`. Only the low `h` rows of the source are drawn and
    /// only the destination rows they land on are replaced. Columns outside
    /// the canvas and rows shifted past the edges are dropped.
    pub fn draw_sprite(&mut self, x: i32, y: i8, w: u8, h: u8, bitmap: &[u8]) {
        let clip = rows_mask(h);
        let mask = shift_rows(clip, y);

        for (i, &src) in bitmap.iter().take(w as usize).enumerate() {
            let Some(col) = x.checked_add(i as i32) else {
                break;
            };
            if col >= Self::COLUMNS as i32 {
                break;
            }
            let pixels = shift_rows(src & clip, y);
            self.blit_column(col, pixels, mask);
        }
    }
}
