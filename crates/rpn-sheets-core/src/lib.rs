//! # rpn-sheets-core
//!
//! Core types shared by the rpn-sheets crates.
//!
//! This crate provides:
//! - [`CellAddress`] - A cell's location in a sheet, in A1 notation (e.g. "B4")
//! - [`column_label`] - Bijective base-26 column labels ("A".."Z", "AA", ...)
//!
//! ## Example
//!
//! ```rust
//! use rpn_sheets_core::{column_label, CellAddress};
//!
//! assert_eq!(column_label(28), "AB");
//!
//! let addr = CellAddress::parse("B4").unwrap();
//! assert_eq!(addr.row, 3);
//! assert_eq!(addr.col, 1);
//! assert_eq!(addr.to_string(), "B4");
//! ```

pub mod cell;
pub mod error;

pub use cell::{column_label, CellAddress};
pub use error::{Error, Result};
