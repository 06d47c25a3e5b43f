#![no_main]

use libfuzzer_sys::fuzz_target;
use rex_literal::{xp_decode, XpHeader};

fuzz_target!(|data: &[u8]| {
    // The decoder should never panic, regardless of input
    let Ok(grid) = xp_decode(data) else {
        return;
    };

    // A successful decode covers every position the header announces
    let header = XpHeader::parse(data).expect("header already decoded");
    assert_eq!(grid.width(), header.width as usize);
    assert_eq!(grid.height(), header.height as usize);
    assert_eq!(grid.len(), header.cell_count());
    assert!(data.len() >= header.expected_len());
    assert_eq!(grid.rows().count(), grid.height());
    assert!(grid.rows().all(|row| row.len() == grid.width()));
});
