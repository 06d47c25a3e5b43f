//! rex-literal - Turn REXPaint .xp images into colored string literals
//!
//! A command-line tool that reads an uncompressed single-layer `.xp` file and
//! prints one line of source code per image row.

use clap::{Parser, Subcommand};
use rex_literal::{
    literal_encode_to, xp_decode, ColorRole, EncodeOptions, Grid, PaletteColor, XpError,
};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rex-literal")]
#[command(version)]
#[command(about = "Convert REXPaint .xp images into colored string literals", long_about = None)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit one source line per image row
    Convert {
        /// Input .xp file (use - for stdin)
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Text written before each row
        #[arg(long, default_value = "write!(context, \"", allow_hyphen_values = true)]
        prefix: String,

        /// Text written after each row
        #[arg(long, default_value = "\").unwrap();", allow_hyphen_values = true)]
        suffix: String,
    },

    /// Show image dimensions and the palette colors in use
    Info {
        /// Input .xp file (use - for stdin)
        input: PathBuf,
    },
}

fn read_input(input: &Path) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let data = if input.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        fs::read(input).map_err(|e| format!("Failed to read '{}': {}", input.display(), e))?
    };
    log::info!("read {} bytes", data.len());
    Ok(data)
}

/// Palette letters used by the grid. Off-palette colors fail as in `convert`.
fn palette_usage(grid: &Grid) -> rex_literal::Result<(BTreeSet<char>, BTreeSet<char>)> {
    let mut fg = BTreeSet::new();
    let mut bg = BTreeSet::new();
    for (row, cells) in grid.rows().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let f = PaletteColor::from_rgb(cell.fg).ok_or(XpError::UnknownColor {
                rgb: cell.fg,
                role: ColorRole::Foreground,
                row,
                col,
            })?;
            let b = PaletteColor::from_rgb(cell.bg).ok_or(XpError::UnknownColor {
                rgb: cell.bg,
                role: ColorRole::Background,
                row,
                col,
            })?;
            fg.insert(f.fg_letter());
            bg.insert(b.bg_letter());
        }
    }
    Ok((fg, bg))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            prefix,
            suffix,
        } => {
            let data = read_input(&input)?;
            let grid = xp_decode(&data)?;
            log::info!("decoded {}x{} cells", grid.width(), grid.height());

            let opts = EncodeOptions {
                line_prefix: prefix,
                line_suffix: suffix,
            };

            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .map_err(|e| format!("Failed to create '{}': {}", path.display(), e))?;
                    literal_encode_to(&grid, &opts, BufWriter::new(file))?;
                    log::info!("written {} lines to '{}'", grid.height(), path.display());
                }
                None => {
                    literal_encode_to(&grid, &opts, io::stdout().lock())?;
                }
            }
        }

        Commands::Info { input } => {
            let data = read_input(&input)?;
            let grid = xp_decode(&data)?;
            let (fg, bg) = palette_usage(&grid)?;

            println!("size:        {}x{}", grid.width(), grid.height());
            println!("cells:       {}", grid.len());
            println!("foreground:  {}", fg.iter().collect::<String>());
            println!("background:  {}", bg.iter().collect::<String>());
        }
    }

    Ok(())
}
