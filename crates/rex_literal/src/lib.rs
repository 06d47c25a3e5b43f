//! # rex_literal
//!
//! Turns single-layer REXPaint `.xp` images into string literals that
//! redraw the image as colored text.
//!
//! ## Features
//!
//! - **Decoder**: parses the raw (already decompressed) `.xp` layer format into a [`Grid`]
//! - **Encoder**: maps every cell onto the fixed 8-color [`PaletteColor`] set and emits
//!   one literal per row, switching colors only when they change
//!
//! ## Quick Start
//!
//! ```rust
//! use rex_literal::{xp_decode, literal_encode, EncodeOptions};
//!
//! // 1x1 image: 'A', white on black
//! let mut data = vec![];
//! for field in [0xFFFF_FFFFu32, 1, 1, 1, b'A' as u32] {
//!     data.extend_from_slice(&field.to_le_bytes());
//! }
//! data.extend_from_slice(&[255, 255, 255, 0, 0, 0]);
//!
//! let grid = xp_decode(&data)?;
//! let code = literal_encode(&grid, &EncodeOptions::default())?;
//! assert_eq!(code, "write!(context, \"\\u{001b}A\\u{001b}hA\").unwrap();\n");
//! # Ok::<(), rex_literal::XpError>(())
//! ```

use std::fmt;

use thiserror::Error;

pub mod cp437;
pub mod decoder;
pub mod encoder;
pub mod palette;

pub use decoder::{xp_decode, Cell, Grid, XpHeader};
pub use encoder::{literal_encode, literal_encode_lines, literal_encode_to, EncodeOptions};
pub use palette::{PaletteColor, Rgb};

/// Which half of a cell a color belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRole {
    Foreground,
    Background,
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorRole::Foreground => write!(f, "foreground"),
            ColorRole::Background => write!(f, "background"),
        }
    }
}

/// Errors that can occur while decoding an `.xp` image or encoding its literals.
///
/// All of them are fatal: there is no partial result.
#[derive(Debug, Error)]
pub enum XpError {
    /// The buffer ends before the header or the last cell record
    #[error("truncated input: expected {expected} bytes, got {actual}")]
    TruncatedInput { expected: usize, actual: usize },

    /// The version field is not the `0xFFFFFFFF` marker
    #[error("unsupported format version {0:#010x}")]
    UnsupportedVersion(u32),

    /// Only single-layer images are handled
    #[error("unsupported layer count {0}, expected a single layer")]
    UnsupportedLayerCount(u32),

    /// A cell color is not one of the 8 palette entries
    #[error("unknown {role} color {rgb} at row {row}, column {col}")]
    UnknownColor {
        rgb: Rgb,
        role: ColorRole,
        row: usize,
        col: usize,
    },

    /// A character code that does not fit the single-byte code page
    #[error("unsupported character code {code:#x} at row {row}, column {col}")]
    UnsupportedCharacterByte { code: u32, row: usize, col: usize },

    /// Writing the generated literals failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for `.xp` operations.
pub type Result<T> = core::result::Result<T, XpError>;

/// Decode `data` and encode it in one go.
#[must_use = "this returns the generated source text"]
pub fn xp_to_literal(data: &[u8], opts: &EncodeOptions) -> Result<String> {
    let grid = xp_decode(data)?;
    literal_encode(&grid, opts)
}

// Internal constants shared by the decoder and its tests
pub(crate) const XP_VERSION_MARKER: u32 = 0xFFFF_FFFF;
pub(crate) const XP_HEADER_LEN: usize = 16;
pub(crate) const XP_CELL_LEN: usize = 10;
