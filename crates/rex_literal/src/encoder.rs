//! Literal encoder: turns a decoded [`Grid`] into one line of source code per row.
//!
//! Colors are switched in-band with `\u{001b}` followed by a palette letter,
//! uppercase for the foreground and lowercase for the background. Switches are
//! only emitted when the color actually changes, and the tracked colors carry
//! over from one row to the next.

use std::io;

use crate::decoder::{Cell, Grid};
use crate::palette::{PaletteColor, Rgb};
use crate::{ColorRole, Result, XpError};

/// Color switch marker as it appears in the generated source.
const COLOR_SWITCH: &str = "\\u{001b}";

/// Options for the literal encoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Text written before each row's cell data.
    pub line_prefix: String,

    /// Text written after each row's cell data.
    pub line_suffix: String,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            line_prefix: "write!(context, \"".to_string(),
            line_suffix: "\").unwrap();".to_string(),
        }
    }
}

/// Palette letters last emitted, tracked across the whole traversal.
#[derive(Debug, Default)]
struct ColorState {
    fg: Option<char>,
    bg: Option<char>,
}

impl ColorState {
    fn push_cell(&mut self, out: &mut String, cell: &Cell, row: usize, col: usize) -> Result<()> {
        let fg = lookup(cell.fg, ColorRole::Foreground, row, col)?.fg_letter();
        let bg = lookup(cell.bg, ColorRole::Background, row, col)?.bg_letter();

        if self.fg != Some(fg) {
            out.push_str(COLOR_SWITCH);
            out.push(fg);
            self.fg = Some(fg);
        }
        if self.bg != Some(bg) {
            out.push_str(COLOR_SWITCH);
            out.push(bg);
            self.bg = Some(bg);
        }

        push_char(out, cell.ch);
        Ok(())
    }
}

fn lookup(rgb: Rgb, role: ColorRole, row: usize, col: usize) -> Result<PaletteColor> {
    PaletteColor::from_rgb(rgb).ok_or(XpError::UnknownColor { rgb, role, row, col })
}

/// Code points below 32 become `\u{xxxx}` escapes, everything else is literal.
#[inline]
fn push_char(out: &mut String, ch: char) {
    if (ch as u32) < 32 {
        out.push_str(&format!("\\u{{{:04x}}}", ch as u32));
    } else {
        out.push(ch);
    }
}

/// Walks the grid row by row, handing each finished line to `emit`.
fn encode_rows<F>(grid: &Grid, opts: &EncodeOptions, mut emit: F) -> Result<()>
where
    F: FnMut(String) -> Result<()>,
{
    let mut state = ColorState::default();

    for (row, cells) in grid.rows().enumerate() {
        let mut line = String::with_capacity(
            opts.line_prefix.len() + opts.line_suffix.len() + cells.len() * 4,
        );
        line.push_str(&opts.line_prefix);
        for (col, cell) in cells.iter().enumerate() {
            state.push_cell(&mut line, cell, row, col)?;
        }
        line.push_str(&opts.line_suffix);

        log::trace!("row {}: {}", row, line);
        emit(line)?;
    }

    Ok(())
}

/// Encode a grid into one line per row, without line terminators.
///
/// # Errors
///
/// [`XpError::UnknownColor`] for the first cell whose foreground or
/// background is not an exact palette match.
#[must_use = "this returns the encoded lines"]
pub fn literal_encode_lines(grid: &Grid, opts: &EncodeOptions) -> Result<Vec<String>> {
    let mut lines = Vec::with_capacity(grid.height());
    encode_rows(grid, opts, |line| {
        lines.push(line);
        Ok(())
    })?;
    Ok(lines)
}

/// Encode a grid into a single string, each row terminated by `\n`.
///
/// # Example
/// ```rust
/// use rex_literal::{xp_decode, literal_encode, EncodeOptions};
///
/// let mut data = vec![];
/// for field in [0xFFFF_FFFFu32, 1, 2, 1] {
///     data.extend_from_slice(&field.to_le_bytes());
/// }
/// for ch in [b'h', b'i'] {
///     data.extend_from_slice(&(ch as u32).to_le_bytes());
///     data.extend_from_slice(&[255, 0, 0, 0, 0, 255]);
/// }
///
/// let opts = EncodeOptions {
///     line_prefix: "\"".into(),
///     line_suffix: "\",".into(),
/// };
/// let code = literal_encode(&xp_decode(&data)?, &opts)?;
/// assert_eq!(code, "\"\\u{001b}D\\u{001b}ghi\",\n");
/// # Ok::<(), rex_literal::XpError>(())
/// ```
#[must_use = "this returns the encoded source text"]
pub fn literal_encode(grid: &Grid, opts: &EncodeOptions) -> Result<String> {
    let mut out = String::new();
    encode_rows(grid, opts, |line| {
        out.push_str(&line);
        out.push('\n');
        Ok(())
    })?;
    Ok(out)
}

/// Encode a grid straight into `writer`, one line per row.
///
/// Rows are written as soon as they are complete, so rows preceding a
/// failing cell may already have reached the writer.
pub fn literal_encode_to<W: io::Write>(
    grid: &Grid,
    opts: &EncodeOptions,
    mut writer: W,
) -> Result<()> {
    encode_rows(grid, opts, |line| {
        writeln!(writer, "{line}")?;
        Ok(())
    })?;
    writer.flush()?;
    Ok(())
}
