//! Core types for the formgrid layout solver.
//!
//! This crate provides the value types shared by the parser and the solver:
//! - Geometry (item handles, rectangles, insets)
//! - Units and constant sizes, plus the unit converter capability
//! - The size model (constant, component-measured, bounded)
//! - Column and row specifications
//! - Cell constraints and item bounds resolution
//! - Error types

pub mod constraints;
pub mod errors;
pub mod size;
pub mod spec;
pub mod types;
pub mod units;

pub use constraints::*;
pub use errors::*;
pub use size::*;
pub use spec::*;
pub use types::*;
pub use units::*;
