//! Parser for encoded formgrid strings.
//!
//! Columns and rows can be described compactly, e.g.
//! `"right:pref, 4dlu, 50dlu:grow"`, and cell constraints as
//! `"1, 3, 5, 1, left, top"`. Built on `nom`.
//!
//! # Example
//!
//! ```
//! use formgrid_parser::{parse_cell_constraints, parse_column_specs};
//!
//! let columns = parse_column_specs("right:pref, 4px, default:grow").unwrap();
//! assert_eq!(columns.len(), 3);
//!
//! let cc = parse_cell_constraints("3, 1").unwrap();
//! assert_eq!(cc.grid_x(), 3);
//! ```

mod cell;
mod grammar;
mod lexer;

pub use cell::{parse_alignments, parse_cell_constraints};
pub use grammar::{
    parse_column_spec, parse_column_specs, parse_row_spec, parse_row_specs, parse_size,
};
