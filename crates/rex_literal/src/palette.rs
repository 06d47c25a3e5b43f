use std::fmt;

/// A 24-bit RGB color as stored in an `.xp` cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

/// The fixed 8-color palette understood by the consuming renderer.
///
/// Each color is addressed by a single letter: uppercase selects it as the
/// foreground, lowercase as the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteColor {
    White,
    Yellow,
    Magenta,
    Red,
    Cyan,
    Green,
    Blue,
    Black,
}

const PALETTE: [(Rgb, PaletteColor); 8] = [
    (Rgb::new(255, 255, 255), PaletteColor::White),
    (Rgb::new(255, 255, 0), PaletteColor::Yellow),
    (Rgb::new(255, 0, 255), PaletteColor::Magenta),
    (Rgb::new(255, 0, 0), PaletteColor::Red),
    (Rgb::new(0, 255, 255), PaletteColor::Cyan),
    (Rgb::new(0, 255, 0), PaletteColor::Green),
    (Rgb::new(0, 0, 255), PaletteColor::Blue),
    (Rgb::new(0, 0, 0), PaletteColor::Black),
];

impl PaletteColor {
    /// All palette entries, in letter order.
    pub const ALL: [PaletteColor; 8] = [
        PaletteColor::White,
        PaletteColor::Yellow,
        PaletteColor::Magenta,
        PaletteColor::Red,
        PaletteColor::Cyan,
        PaletteColor::Green,
        PaletteColor::Blue,
        PaletteColor::Black,
    ];

    /// Exact-match lookup. There is no nearest-color fallback.
    pub fn from_rgb(rgb: Rgb) -> Option<Self> {
        PALETTE
            .iter()
            .find(|(entry, _)| *entry == rgb)
            .map(|&(_, color)| color)
    }

    pub fn rgb(self) -> Rgb {
        PALETTE[self as usize].0
    }

    /// Letter selecting this color as the foreground (`A`..=`H`).
    #[inline]
    pub fn fg_letter(self) -> char {
        (b'A' + self as u8) as char
    }

    /// Letter selecting this color as the background (`a`..=`h`).
    #[inline]
    pub fn bg_letter(self) -> char {
        self.fg_letter().to_ascii_lowercase()
    }

    pub fn name(self) -> &'static str {
        match self {
            PaletteColor::White => "white",
            PaletteColor::Yellow => "yellow",
            PaletteColor::Magenta => "magenta",
            PaletteColor::Red => "red",
            PaletteColor::Cyan => "cyan",
            PaletteColor::Green => "green",
            PaletteColor::Blue => "blue",
            PaletteColor::Black => "black",
        }
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
