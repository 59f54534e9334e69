//! Prints the byte-parallel spread table as Rust source.
//!
//! The kernel builds the identical table at compile time
//! (`bhv_core::SPREAD_TABLE`); this tool regenerates it from the rule for
//! inspection or embedding elsewhere, and fails if the two ever diverge.

fn spread(value: u8) -> u64 {
    let mut result = 0u64;
    for bit in 0..8 {
        if (value >> bit) & 1 == 1 {
            result += 1u64 << (bit * 8);
        }
    }
    result
}

fn main() {
    let table: Vec<u64> = (0..=255u8).map(spread).collect();
    assert_eq!(&table[..], &bhv_core::SPREAD_TABLE[..]);

    println!("pub const SPREAD_TABLE: [u64; 256] = [");
    for row in table.chunks(4) {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:#018x},")).collect();
        println!("    {}", cells.join(" "));
    }
    println!("];");
}
