//! Per-layout cache of item measurements.

use std::cell::RefCell;

use glam::IVec2;
use indexmap::IndexMap;
use log::trace;

use formgrid_core::{ItemId, ItemSizes, Measure};

use crate::measure::ItemMeasurer;

/// Caches minimum and preferred item sizes between layout passes.
///
/// Entries are filled on first use and stay until [`invalidate`] is called
/// or the item is removed. Not thread safe; a layout pass is expected to
/// run on the thread that owns the layout.
///
/// [`invalidate`]: MeasurementCache::invalidate
#[derive(Debug, Clone, Default)]
pub struct MeasurementCache {
    minimum: RefCell<IndexMap<ItemId, IVec2>>,
    preferred: RefCell<IndexMap<ItemId, IVec2>>,
}

impl MeasurementCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn minimum_size(&self, measurer: &dyn ItemMeasurer, item: ItemId) -> IVec2 {
        if let Some(size) = self.minimum.borrow().get(&item) {
            return *size;
        }
        let size = measurer.minimum_size(item);
        trace!("Measured minimum size of {:?}: {}", item, size);
        self.minimum.borrow_mut().insert(item, size);
        size
    }

    pub fn preferred_size(&self, measurer: &dyn ItemMeasurer, item: ItemId) -> IVec2 {
        if let Some(size) = self.preferred.borrow().get(&item) {
            return *size;
        }
        let size = measurer.preferred_size(item);
        trace!("Measured preferred size of {:?}: {}", item, size);
        self.preferred.borrow_mut().insert(item, size);
        size
    }

    pub fn item_sizes(&self, measurer: &dyn ItemMeasurer, item: ItemId) -> ItemSizes {
        ItemSizes::new(
            self.minimum_size(measurer, item),
            self.preferred_size(measurer, item),
        )
    }

    /// Drop every cached measurement.
    pub fn invalidate(&self) {
        self.minimum.borrow_mut().clear();
        self.preferred.borrow_mut().clear();
    }

    /// Drop the measurements of one item.
    pub fn remove(&self, item: ItemId) {
        self.minimum.borrow_mut().shift_remove(&item);
        self.preferred.borrow_mut().shift_remove(&item);
    }

    /// Number of items with a cached measurement.
    pub fn len(&self) -> usize {
        let minimum = self.minimum.borrow();
        let preferred = self.preferred.borrow();
        minimum
            .keys()
            .chain(preferred.keys().filter(|item| !minimum.contains_key(*item)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.minimum.borrow().is_empty() && self.preferred.borrow().is_empty()
    }
}

/// Which dimension of which cached measurement to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureKind {
    MinimumWidth,
    MinimumHeight,
    PreferredWidth,
    PreferredHeight,
}

/// A [`Measure`] reading one dimension through the cache.
pub struct CachedMeasure<'a> {
    cache: &'a MeasurementCache,
    measurer: &'a dyn ItemMeasurer,
    kind: MeasureKind,
}

impl<'a> CachedMeasure<'a> {
    pub fn new(cache: &'a MeasurementCache, measurer: &'a dyn ItemMeasurer, kind: MeasureKind) -> Self {
        Self { cache, measurer, kind }
    }
}

impl Measure for CachedMeasure<'_> {
    fn size_of(&self, item: ItemId) -> i32 {
        match self.kind {
            MeasureKind::MinimumWidth => self.cache.minimum_size(self.measurer, item).x,
            MeasureKind::MinimumHeight => self.cache.minimum_size(self.measurer, item).y,
            MeasureKind::PreferredWidth => self.cache.preferred_size(self.measurer, item).x,
            MeasureKind::PreferredHeight => self.cache.preferred_size(self.measurer, item).y,
        }
    }
}
