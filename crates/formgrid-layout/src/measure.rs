//! Capabilities the host supplies to the solver.

use glam::IVec2;
use indexmap::IndexMap;

use formgrid_core::{ItemId, ItemSizes, Rect};

/// Answers intrinsic size queries for items.
///
/// Answers must stay stable for the duration of a layout pass.
pub trait ItemMeasurer {
    /// Smallest size the item can usefully take.
    fn minimum_size(&self, item: ItemId) -> IVec2;

    /// Size the item would like to take.
    fn preferred_size(&self, item: ItemId) -> IVec2;

    /// Invisible items don't stretch spanned columns/rows.
    fn is_visible(&self, _item: ItemId) -> bool {
        true
    }
}

/// Receives the final bounds of each item.
pub trait BoundsSink {
    fn set_bounds(&mut self, item: ItemId, bounds: Rect);
}

impl BoundsSink for Vec<(ItemId, Rect)> {
    fn set_bounds(&mut self, item: ItemId, bounds: Rect) {
        self.push((item, bounds));
    }
}

impl BoundsSink for IndexMap<ItemId, Rect> {
    fn set_bounds(&mut self, item: ItemId, bounds: Rect) {
        self.insert(item, bounds);
    }
}

/// Precomputed item sizes.
///
/// Unknown items measure as zero.
#[derive(Debug, Clone, Default)]
pub struct SizeTable {
    sizes: IndexMap<ItemId, ItemSizes>,
    hidden: Vec<ItemId>,
}

impl SizeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the sizes of an item, replacing earlier ones.
    pub fn insert(&mut self, item: ItemId, minimum: IVec2, preferred: IVec2) {
        self.sizes.insert(item, ItemSizes::new(minimum, preferred));
    }

    /// Builder form of [`SizeTable::insert`].
    pub fn with(mut self, item: ItemId, minimum: IVec2, preferred: IVec2) -> Self {
        self.insert(item, minimum, preferred);
        self
    }

    pub fn set_visible(&mut self, item: ItemId, visible: bool) {
        self.hidden.retain(|&hidden| hidden != item);
        if !visible {
            self.hidden.push(item);
        }
    }

    pub fn get(&self, item: ItemId) -> Option<&ItemSizes> {
        self.sizes.get(&item)
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

impl ItemMeasurer for SizeTable {
    fn minimum_size(&self, item: ItemId) -> IVec2 {
        self.sizes.get(&item).map_or(IVec2::ZERO, |sizes| sizes.minimum)
    }

    fn preferred_size(&self, item: ItemId) -> IVec2 {
        self.sizes.get(&item).map_or(IVec2::ZERO, |sizes| sizes.preferred)
    }

    fn is_visible(&self, item: ItemId) -> bool {
        !self.hidden.contains(&item)
    }
}
