//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`column_label`] - The letters naming a 1-based column

mod address;

pub use address::{column_label, CellAddress};
