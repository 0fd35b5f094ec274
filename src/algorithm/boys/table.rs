//! Precomputed short-grid and long-range tables.
//!
//! The grid holds `F_0(x_i) .. F_{GRID_MAX_N}(x_i)` at every node
//! `x_i = i * GRID_SPACING`, node-major. It is generated offline at high
//! precision (see `demos/generate_boys_table.rs`) and embedded as
//! little-endian `f64`.

use std::sync::OnceLock;

use super::{
    GRID_MAX_N, GRID_NODES, GRID_SPACING, GRID_STRIDE, LONG_RANGE_SCALE, MAX_ORDER, TAYLOR_TERMS,
    boys_reference,
};
use crate::error::{Error, Result};

/// Embedded grid table.
static SHORTGRID_BYTES: &[u8] = include_bytes!("boys_shortgrid.bin");

/// Decoded process-wide table.
static BOYS_TABLE: OnceLock<BoysTable> = OnceLock::new();

/// Read-only lookup tables for the short-grid and long-range branches.
#[derive(Clone, Debug, PartialEq)]
pub struct BoysTable {
    grid: Box<[f64]>,
    long_range: [f64; MAX_ORDER + 1],
}

impl BoysTable {
    /// Get the process-wide table, decoding the embedded data on first use.
    #[inline]
    pub fn global() -> &'static BoysTable {
        BOYS_TABLE.get_or_init(|| {
            // The embedded bytes are produced by the table generator with the
            // same layout constants; a length mismatch means the build is broken.
            let table = Self::from_le_bytes(SHORTGRID_BYTES)
                .expect("INTERNAL: boys_shortgrid.bin corrupted - unexpected length");
            log::debug!(
                "decoded Boys grid table: {} nodes x {} orders ({} bytes)",
                GRID_NODES,
                GRID_STRIDE,
                SHORTGRID_BYTES.len()
            );
            table
        })
    }

    /// Build a table from a node-major grid of `GRID_NODES * GRID_STRIDE` values.
    pub fn from_grid(grid: Vec<f64>) -> Result<Self> {
        if grid.len() != GRID_NODES * GRID_STRIDE {
            return Err(Error::shape_mismatch(
                &[GRID_NODES * GRID_STRIDE],
                &[grid.len()],
            ));
        }
        Ok(Self {
            grid: grid.into_boxed_slice(),
            long_range: LONG_RANGE_SCALE,
        })
    }

    /// Decode a grid serialized with [`BoysTable::to_le_bytes`].
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self> {
        const WIDTH: usize = std::mem::size_of::<f64>();
        let expected = GRID_NODES * GRID_STRIDE * WIDTH;
        if bytes.len() != expected {
            return Err(Error::shape_mismatch(&[expected], &[bytes.len()]));
        }

        let grid = bytes
            .chunks_exact(WIDTH)
            .map(|chunk| {
                let mut raw = [0u8; WIDTH];
                raw.copy_from_slice(chunk);
                f64::from_le_bytes(raw)
            })
            .collect();
        Self::from_grid(grid)
    }

    /// Rebuild the grid from the reference series evaluator.
    ///
    /// Matches the embedded table to within the accuracy of the series
    /// (~1e-13 relative); the embedded data itself is correctly rounded.
    pub fn from_reference() -> Self {
        let mut grid = Vec::with_capacity(GRID_NODES * GRID_STRIDE);
        for index in 0..GRID_NODES {
            grid.extend(boys_reference(GRID_MAX_N, node_position(index)));
        }
        Self {
            grid: grid.into_boxed_slice(),
            long_range: LONG_RANGE_SCALE,
        }
    }

    /// Serialize the grid in the embedded format (little-endian, node-major).
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.grid.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    /// Number of grid nodes
    #[inline]
    pub fn num_nodes(&self) -> usize {
        GRID_NODES
    }

    /// Highest order that can be interpolated
    #[inline]
    pub fn max_order(&self) -> usize {
        MAX_ORDER
    }

    /// Abscissa of grid node `index`
    #[inline]
    pub fn node(&self, index: usize) -> f64 {
        node_position(index)
    }

    /// All stored values `F_0 .. F_{GRID_MAX_N}` at node `index`.
    #[inline]
    pub fn node_values(&self, index: usize) -> &[f64] {
        &self.grid[index * GRID_STRIDE..(index + 1) * GRID_STRIDE]
    }

    /// Taylor coefficients for `order` at node `index`.
    ///
    /// These are `F_order .. F_{order+7}` at the node; the caller applies the
    /// reciprocal factorials.
    #[inline]
    pub fn coefficients(&self, index: usize, order: usize) -> &[f64; TAYLOR_TERMS] {
        debug_assert!(
            order <= MAX_ORDER,
            "order {order} exceeds table capacity {MAX_ORDER}"
        );
        debug_assert!(index < GRID_NODES, "grid index {index} out of range");
        let start = index * GRID_STRIDE + order;
        self.grid[start..]
            .first_chunk::<TAYLOR_TERMS>()
            .unwrap_or_else(|| panic!("grid node {index} has no coefficients for order {order}"))
    }

    /// Long-range scale factor `Γ(order+½) / 2`
    #[inline]
    pub fn long_range_scale(&self, order: usize) -> f64 {
        self.long_range[order]
    }
}

#[inline]
fn node_position(index: usize) -> f64 {
    index as f64 * GRID_SPACING
}
