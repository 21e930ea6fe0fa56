//! Error types for formgrid.

use crate::types::ItemId;
use thiserror::Error;

/// Top-level error type for formgrid.
#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error(transparent)]
    Constraints(#[from] ConstraintsError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Errors while building a column or row specification.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecError {
    #[error("The resize weight must be non-negative, got {weight}")]
    NegativeResizeWeight { weight: f64 },

    #[error("The {axis} spec does not accept the default alignment '{alignment}'")]
    InvalidAlignment { alignment: String, axis: String },

    #[error("{unit} value {value} must be an integer")]
    NonIntegerValue { unit: String, value: f64 },
}

/// Errors while building cell constraints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintsError {
    #[error("The grid {field} must be a positive number, got {value}")]
    NonPositive { field: &'static str, value: i64 },

    #[error("The horizontal alignment must be one of: left, center, right, fill, default; got {alignment}")]
    NotHorizontal { alignment: String },

    #[error("The vertical alignment must be one of: top, center, bottom, fill, default; got {alignment}")]
    NotVertical { alignment: String },
}

/// Errors while decoding an encoded spec or constraints string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("The form spec must not be empty")]
    Empty,

    #[error("The form spec '{input}' must provide a size")]
    MissingSize { input: String },

    #[error("Invalid unit name '{unit}'. Must be one of: px, dlu, pt, mm, cm, in")]
    InvalidUnit { unit: String },

    #[error("Invalid number format: {value}")]
    InvalidNumber { value: String },

    #[error("Invalid size '{value}'")]
    InvalidSize { value: String },

    #[error("The resize argument '{token}' is invalid. Must be one of: grow, g, none, n, grow(<double>), g(<double>)")]
    InvalidResize { token: String },

    #[error("Invalid alignment '{token}'. Must be one of: left, center, right, top, bottom, fill, default, l, c, r, t, b, f, d")]
    InvalidAlignment { token: String },

    #[error("Bounded sizes must not be both constants: {input}")]
    BothConstant { input: String },

    #[error("Bounded sizes must not be both logical: {input}")]
    BothLogical { input: String },

    #[error("You must provide 2, 4 or 6 arguments, got {count}")]
    ArgumentCount { count: usize },

    #[error("Cell constraint element {position} must be a number, found {found:?}")]
    ExpectedInteger { position: usize, found: String },

    #[error("Unexpected input '{rest}' in '{input}'")]
    TrailingInput { input: String, rest: String },

    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error(transparent)]
    Constraints(#[from] ConstraintsError),
}

/// Errors while mutating the grid or attaching items to it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("The column index {index} must be in the range [1, {count}]")]
    ColumnOutOfRange { index: usize, count: usize },

    #[error("The row index {index} must be in the range [1, {count}]")]
    RowOutOfRange { index: usize, count: usize },

    #[error("The grid width {width} must be less than or equal to {max}")]
    ColumnSpanTooWide { width: usize, max: usize },

    #[error("The grid height {height} must be less than or equal to {max}")]
    RowSpanTooTall { height: usize, max: usize },

    #[error("The removed column {index} must not contain item origins (item {item:?})")]
    ColumnHasOrigin { index: usize, item: ItemId },

    #[error("The removed row {index} must not contain item origins (item {item:?})")]
    RowHasOrigin { index: usize, item: ItemId },

    #[error("The removed index {index} must not be grouped")]
    GroupedIndex { index: usize },

    #[error("Invalid group index {index} in group {group}")]
    GroupIndexOutOfRange { index: usize, group: usize },

    #[error("Index {index} must not be used in multiple groups")]
    DuplicateGroupIndex { index: usize },

    #[error("Unknown item {item:?}")]
    UnknownItem { item: ItemId },

    #[error(transparent)]
    Constraints(#[from] ConstraintsError),
}
