//! Regenerate the short-grid lookup table.
//!
//! Rebuilds every node from the series reference and writes the grid as
//! little-endian f64 values, the layout the crate embeds.
//!
//! ```text
//! cargo run --example generate_boys_table -- src/algorithm/boys/boys_shortgrid.bin
//! ```

use std::path::PathBuf;

use boys::algorithm::boys::{GRID_NODES, GRID_STRIDE};
use boys::prelude::*;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let path: PathBuf = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "boys_shortgrid.bin".to_string())
        .into();

    let table = BoysTable::from_reference();
    let embedded = BoysTable::global();

    let mut worst = 0.0_f64;
    for index in 0..GRID_NODES {
        for (&r, &e) in table.node_values(index).iter().zip(embedded.node_values(index)) {
            worst = worst.max(((r - e) / e).abs());
        }
    }

    std::fs::write(&path, table.to_le_bytes())?;
    println!(
        "wrote {} nodes x {} orders to {}",
        GRID_NODES,
        GRID_STRIDE,
        path.display()
    );
    println!("max rel diff vs embedded table: {worst:e}");
    Ok(())
}
