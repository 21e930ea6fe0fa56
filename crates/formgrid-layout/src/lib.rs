//! Form layout solver.
//!
//! Sizes a grid of columns and rows from their specs and the items placed
//! on it, then places each item inside its cell:
//! - Per-axis sizing with grouping, compression and weighted growth
//! - Multi-cell spans that widen the container's preferred size
//! - Grid mutation with consistent item and group index shifting
//! - Measurement caching across layout passes
//!
//! # Example
//!
//! ```
//! use formgrid_core::{CellConstraints, DefaultUnitConverter, ItemId, Rect};
//! use formgrid_layout::{FormLayout, LayoutContext, LayoutOptions, SizeTable};
//! use glam::IVec2;
//!
//! let mut form = FormLayout::from_encoded("right:pref, 4px, default:grow", "pref").unwrap();
//! form.add(ItemId(1), CellConstraints::xy(1, 1).unwrap()).unwrap();
//! form.add(ItemId(2), CellConstraints::xy(3, 1).unwrap()).unwrap();
//!
//! let sizes = SizeTable::new()
//!     .with(ItemId(1), IVec2::new(20, 10), IVec2::new(40, 12))
//!     .with(ItemId(2), IVec2::new(50, 10), IVec2::new(120, 12));
//! let converter = DefaultUnitConverter::default();
//! let ctx = LayoutContext::new(&sizes, &converter);
//!
//! let mut bounds: Vec<(ItemId, Rect)> = Vec::new();
//! form.layout(&ctx, Rect::sized(300, 12), &LayoutOptions::default(), &mut bounds);
//! assert_eq!(bounds[1].1, Rect::new(44, 0, 256, 12));
//! ```

pub mod cache;
pub mod context;
pub mod grid;
pub mod info;
pub mod measure;
pub mod sizing;

pub use cache::{CachedMeasure, MeasureKind, MeasurementCache};
pub use context::{LayoutContext, LayoutOptions};
pub use grid::FormLayout;
pub use info::LayoutInfo;
pub use measure::{BoundsSink, ItemMeasurer, SizeTable};
pub use sizing::{AxisSizing, Group, ItemList};
