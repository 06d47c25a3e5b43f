#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rex_literal::{literal_encode, literal_encode_lines, xp_decode, EncodeOptions};

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    width: u8,
    height: u8,
    cells: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let width = input.width as u32 % 64;
    let height = input.height as u32 % 64;

    let mut data = Vec::new();
    for field in [0xFFFF_FFFFu32, 1, width, height] {
        data.extend_from_slice(&field.to_le_bytes());
    }
    data.extend_from_slice(&input.cells);

    let grid = match xp_decode(&data) {
        Ok(grid) => grid,
        Err(_) => return,
    };
    assert_eq!(grid.len(), (width * height) as usize);

    // Encoding may reject colors, but must never panic
    let opts = EncodeOptions::default();
    if let Ok(text) = literal_encode(&grid, &opts) {
        let lines = literal_encode_lines(&grid, &opts).expect("same grid encoded once already");
        assert_eq!(text.lines().count(), lines.len());
    }
});
