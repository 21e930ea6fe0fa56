//! Per-pass configuration and injected capabilities.

use formgrid_core::{Insets, UnitConverter};

use crate::measure::ItemMeasurer;

/// Options for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutOptions {
    /// Space reserved around the grid inside the container
    pub insets: Insets,
    /// Drop cached measurements before measuring
    pub flush_cache: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            insets: Insets::ZERO,
            flush_cache: false,
        }
    }
}

impl LayoutOptions {
    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    pub fn flushing(mut self) -> Self {
        self.flush_cache = true;
        self
    }
}

/// Host capabilities used during a layout pass.
#[derive(Clone, Copy)]
pub struct LayoutContext<'a> {
    pub measurer: &'a dyn ItemMeasurer,
    pub converter: &'a dyn UnitConverter,
}

impl<'a> LayoutContext<'a> {
    pub fn new(measurer: &'a dyn ItemMeasurer, converter: &'a dyn UnitConverter) -> Self {
        Self { measurer, converter }
    }
}
