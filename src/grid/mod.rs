//! Address-space decomposition onto a fixed grid of fields
//!
//! A [`Grid`] tiles the profile's address range `[min_address, max_address)`
//! onto `rows * cols` cells in row-major order. Each cell covers
//! `field_size` address units and resolves to one [`Field`].
//!
//! Grids are rebuilt wholesale by [`decompose_heap`] / [`decompose_heat`]
//! and never mutated afterwards.

mod decompose;

pub use decompose::{decompose_heap, decompose_heat};

use crate::profile::AllocationSite;
use std::rc::Rc;
use thiserror::Error;

/// Reasons a decomposition cannot produce a grid
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecomposeError {
    #[error("grid of {rows}x{cols} has no cells")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("address range {min}..{max} is empty")]
    DegenerateRange { min: u64, max: u64 },

    #[error("profile has no heat table")]
    MissingHeatTable,
}

/// Resolved content of one grid cell
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Heap {
        /// Record start address, or the approximate bin start for free fields
        address: f64,
        amount: u64,
        uid: Option<Rc<AllocationSite>>,
    },
    Heat {
        address: f64,
        access: u32,
    },
}

impl Field {
    pub fn free(address: f64) -> Self {
        Field::Heap {
            address,
            amount: 0,
            uid: None,
        }
    }

    pub fn address(&self) -> f64 {
        match self {
            Field::Heap { address, .. } | Field::Heat { address, .. } => *address,
        }
    }

    pub fn site(&self) -> Option<&AllocationSite> {
        match self {
            Field::Heap { uid, .. } => uid.as_deref(),
            Field::Heat { .. } => None,
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Field::Heap { uid: None, .. })
    }
}

/// A rows x cols matrix of fields, stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    field_size: f64,
    fields: Vec<Field>,
}

impl Grid {
    pub(crate) fn from_fields(rows: usize, cols: usize, field_size: f64, fields: Vec<Field>) -> Self {
        debug_assert_eq!(fields.len(), rows * cols);
        Grid {
            rows,
            cols,
            field_size,
            fields,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Address units covered by one cell
    pub fn field_size(&self) -> f64 {
        self.field_size
    }

    /// Field at `(row, col)`, or `None` outside the grid
    pub fn get(&self, row: usize, col: usize) -> Option<&Field> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.fields.get(row * self.cols + col)
    }

    /// All fields in row-major order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

/// Validate the grid shape and range, returning the field size
pub(crate) fn field_size_for(
    min_address: u64,
    max_address: u64,
    rows: usize,
    cols: usize,
) -> Result<f64, DecomposeError> {
    let cells = rows * cols;
    if cells == 0 {
        return Err(DecomposeError::EmptyGrid { rows, cols });
    }
    if max_address <= min_address {
        return Err(DecomposeError::DegenerateRange {
            min: min_address,
            max: max_address,
        });
    }
    Ok((max_address - min_address) as f64 / cells as f64)
}
