use crate::palette::Rgb;
use crate::{cp437, Result, XpError, XP_CELL_LEN, XP_HEADER_LEN, XP_VERSION_MARKER};

/// Blue channel value REXPaint files use for pure magenta.
const MAGENTA_BLUE_QUIRK: u8 = 254;

/// The fixed-size header at the start of an `.xp` buffer.
///
/// ```text
/// offset 0:  u32 version      (0xFFFFFFFF)
/// offset 4:  u32 layer count  (1)
/// offset 8:  u32 width
/// offset 12: u32 height
/// ```
///
/// All fields are little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XpHeader {
    /// Number of columns
    pub width: u32,
    /// Number of rows
    pub height: u32,
}

impl XpHeader {
    /// Parses and validates the header.
    ///
    /// # Errors
    ///
    /// - [`XpError::TruncatedInput`] if `data` is shorter than 16 bytes
    /// - [`XpError::UnsupportedVersion`] unless the version field is `0xFFFFFFFF`
    /// - [`XpError::UnsupportedLayerCount`] unless the layer count is `1`
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < XP_HEADER_LEN {
            return Err(XpError::TruncatedInput {
                expected: XP_HEADER_LEN,
                actual: data.len(),
            });
        }

        let version = read_u32_le(data, 0);
        if version != XP_VERSION_MARKER {
            return Err(XpError::UnsupportedVersion(version));
        }
        let layers = read_u32_le(data, 4);
        if layers != 1 {
            return Err(XpError::UnsupportedLayerCount(layers));
        }

        Ok(XpHeader {
            width: read_u32_le(data, 8),
            height: read_u32_le(data, 12),
        })
    }

    /// Number of cells the header announces (saturating).
    pub fn cell_count(&self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Minimum buffer length holding the header and every cell (saturating).
    pub fn expected_len(&self) -> usize {
        self.cell_count()
            .saturating_mul(XP_CELL_LEN)
            .saturating_add(XP_HEADER_LEN)
    }
}

/// One decoded grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    /// Character after CP437 decoding
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

/// A fully populated, immutable grid of cells addressed by (row, column).
///
/// Cells are stored row-major even though the file stores them column-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells, always `width * height`.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the cell at (`row`, `col`), or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.cells.get(row * self.width + col)
    }

    /// Iterates over rows, top to bottom.
    ///
    /// A zero-width grid still yields `height` empty rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        (0..self.height).map(move |row| &self.cells[row * self.width..(row + 1) * self.width])
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

/// Decodes a raw (uncompressed) single-layer `.xp` buffer.
///
/// Cell records follow the header in column-major order, 10 bytes each:
///
/// ```text
/// u32 char code (CP437, must fit in one byte)
/// u8  fg red, fg green, fg blue
/// u8  bg red, bg green, bg blue
/// ```
///
/// A blue channel of exactly 254 is read as 255; REXPaint palettes store
/// pure magenta that way.
///
/// # Example
///
/// ```rust
/// use rex_literal::xp_decode;
///
/// let mut data = vec![];
/// for field in [0xFFFF_FFFFu32, 1, 1, 1, 0xDB] {
///     data.extend_from_slice(&field.to_le_bytes());
/// }
/// data.extend_from_slice(&[255, 0, 254, 0, 0, 0]);
///
/// let grid = xp_decode(&data)?;
/// let cell = grid.get(0, 0).unwrap();
/// assert_eq!(cell.ch, '█');
/// assert_eq!((cell.fg.r, cell.fg.g, cell.fg.b), (255, 0, 255));
/// # Ok::<(), rex_literal::XpError>(())
/// ```
///
/// # Errors
///
/// Any header error from [`XpHeader::parse`], [`XpError::TruncatedInput`]
/// when the cell records run short, and [`XpError::UnsupportedCharacterByte`]
/// for a character code above `0xFF`.
#[must_use = "this returns the decoded Grid"]
pub fn xp_decode(data: &[u8]) -> Result<Grid> {
    let header = XpHeader::parse(data)?;

    // Checked before allocating so a bogus header cannot request a huge grid.
    let expected = header.expected_len();
    if data.len() < expected {
        return Err(XpError::TruncatedInput {
            expected,
            actual: data.len(),
        });
    }
    if data.len() > expected {
        log::warn!("ignoring {} trailing bytes", data.len() - expected);
    }

    let width = header.width as usize;
    let height = header.height as usize;
    log::debug!(
        "xp image {}x{} ({} cells, {} bytes)",
        width,
        height,
        header.cell_count(),
        data.len()
    );

    let mut cells = vec![Cell::default(); header.cell_count()];
    let mut records = data[XP_HEADER_LEN..expected].chunks_exact(XP_CELL_LEN);

    for col in 0..width {
        for row in 0..height {
            let Some(record) = records.next() else {
                // Unreachable once the length check above passed.
                return Err(XpError::TruncatedInput {
                    expected,
                    actual: data.len(),
                });
            };
            cells[row * width + col] = decode_cell(record, row, col)?;
        }
    }

    Ok(Grid {
        width,
        height,
        cells,
    })
}

fn decode_cell(record: &[u8], row: usize, col: usize) -> Result<Cell> {
    let code = read_u32_le(record, 0);
    let ch = cp437::decode_code(code)
        .ok_or(XpError::UnsupportedCharacterByte { code, row, col })?;

    Ok(Cell {
        ch,
        fg: Rgb::new(record[4], record[5], fix_blue(record[6])),
        bg: Rgb::new(record[7], record[8], fix_blue(record[9])),
    })
}

#[inline]
fn fix_blue(b: u8) -> u8 {
    if b == MAGENTA_BLUE_QUIRK {
        255
    } else {
        b
    }
}

#[inline]
fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(width: u32, height: u32) -> Vec<u8> {
        let mut data = Vec::new();
        for field in [XP_VERSION_MARKER, 1, width, height] {
            data.extend_from_slice(&field.to_le_bytes());
        }
        data
    }

    fn push_cell(data: &mut Vec<u8>, code: u32, fg: [u8; 3], bg: [u8; 3]) {
        data.extend_from_slice(&code.to_le_bytes());
        data.extend_from_slice(&fg);
        data.extend_from_slice(&bg);
    }

    #[test]
    fn test_header_too_short() {
        let result = XpHeader::parse(&[0xff; 15]);
        assert!(matches!(
            result,
            Err(XpError::TruncatedInput {
                expected: 16,
                actual: 15
            })
        ));
    }

    #[test]
    fn test_header_fields() {
        let header = XpHeader::parse(&header(80, 25)).unwrap();
        assert_eq!(header.width, 80);
        assert_eq!(header.height, 25);
        assert_eq!(header.cell_count(), 2000);
        assert_eq!(header.expected_len(), 16 + 20000);
    }

    #[test]
    fn test_expected_len_saturates() {
        let header = XpHeader {
            width: u32::MAX,
            height: u32::MAX,
        };
        assert!(header.expected_len() >= header.cell_count());
    }

    #[test]
    fn test_transposes_column_major_records() {
        // 2 columns x 3 rows, records go down each column first
        let mut data = header(2, 3);
        for code in [b'a', b'b', b'c', b'd', b'e', b'f'] {
            push_cell(&mut data, code as u32, [0, 0, 0], [0, 0, 0]);
        }

        let grid = xp_decode(&data).unwrap();
        let rows: Vec<String> = grid
            .rows()
            .map(|row| row.iter().map(|c| c.ch).collect())
            .collect();
        assert_eq!(rows, vec!["ad", "be", "cf"]);
    }

    #[test]
    fn test_blue_quirk_on_both_channels() {
        let mut data = header(1, 1);
        push_cell(&mut data, b'x' as u32, [255, 0, 254], [0, 0, 254]);

        let cell = *xp_decode(&data).unwrap().get(0, 0).unwrap();
        assert_eq!(cell.fg, Rgb::new(255, 0, 255));
        assert_eq!(cell.bg, Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_quirk_only_touches_blue() {
        let mut data = header(1, 1);
        push_cell(&mut data, b'x' as u32, [254, 254, 253], [254, 0, 0]);

        let cell = *xp_decode(&data).unwrap().get(0, 0).unwrap();
        assert_eq!(cell.fg, Rgb::new(254, 254, 253));
        assert_eq!(cell.bg, Rgb::new(254, 0, 0));
    }

    #[test]
    fn test_character_code_above_byte_range() {
        let mut data = header(1, 2);
        push_cell(&mut data, b'x' as u32, [0, 0, 0], [0, 0, 0]);
        push_cell(&mut data, 0x1_41, [0, 0, 0], [0, 0, 0]);

        assert!(matches!(
            xp_decode(&data),
            Err(XpError::UnsupportedCharacterByte {
                code: 0x141,
                row: 1,
                col: 0
            })
        ));
    }

    #[test]
    fn test_get_out_of_range() {
        let mut data = header(1, 1);
        push_cell(&mut data, b'x' as u32, [0, 0, 0], [0, 0, 0]);
        let grid = xp_decode(&data).unwrap();

        assert!(grid.get(0, 0).is_some());
        assert!(grid.get(1, 0).is_none());
        assert!(grid.get(0, 1).is_none());
    }

    #[test]
    fn test_empty_grid() {
        let grid = xp_decode(&header(0, 3)).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.rows().count(), 3);
        assert!(grid.rows().all(|row| row.is_empty()));
    }
}
