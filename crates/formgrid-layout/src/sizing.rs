//! Column width and row height computation.
//!
//! One axis is sized at a time, in this order:
//! 1. Minimum and preferred size of every spec from its items
//! 2. Group equalization of both arrays
//! 3. Compression of default-sized specs when space is short
//! 4. Group equalization of the compressed sizes
//! 5. Distribution of free space by resize weight
//! 6. Conversion of sizes to origins

use log::{debug, trace};
use smallvec::SmallVec;

use formgrid_core::{round_half_up, FormSpec, ItemId, Measure, UnitConverter};

/// Items anchored in one column or row with a span of 1.
pub type ItemList = SmallVec<[ItemId; 4]>;

/// 1-based indices of columns or rows sharing one size.
pub type Group = SmallVec<[usize; 4]>;

/// Everything needed to size one axis.
pub struct AxisSizing<'a, S> {
    pub specs: &'a [S],
    /// Single-span items per spec, same length as `specs`
    pub items: &'a [ItemList],
    pub groups: &'a [Group],
    pub converter: &'a dyn UnitConverter,
    pub min_measure: &'a dyn Measure,
    pub pref_measure: &'a dyn Measure,
}

impl<S: AsRef<FormSpec>> AxisSizing<'_, S> {
    /// Sizes of all specs measuring `ComponentSize::Default` with the
    /// given measure.
    pub fn maximum_sizes(&self, default_measure: &dyn Measure) -> Vec<i32> {
        maximum_sizes(
            self.specs,
            self.items,
            self.converter,
            self.min_measure,
            self.pref_measure,
            default_measure,
        )
    }
}

/// Size every spec from the items it holds.
pub fn maximum_sizes<S: AsRef<FormSpec>>(
    specs: &[S],
    items: &[ItemList],
    converter: &dyn UnitConverter,
    min_measure: &dyn Measure,
    pref_measure: &dyn Measure,
    default_measure: &dyn Measure,
) -> Vec<i32> {
    specs
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            let spec_items = items.get(i).map_or(&[][..], |list| list.as_slice());
            spec.as_ref().size().maximum_size(
                converter,
                spec_items,
                min_measure,
                pref_measure,
                default_measure,
            )
        })
        .collect()
}

/// Give every member of a group the group's largest size.
pub fn grouped_sizes(groups: &[Group], sizes: &[i32]) -> Vec<i32> {
    let mut result = sizes.to_vec();
    for group in groups {
        let group_max = group
            .iter()
            .filter_map(|&index| result.get(index - 1))
            .copied()
            .fold(0, i32::max);
        for &index in group {
            if let Some(size) = result.get_mut(index - 1) {
                *size = group_max;
            }
        }
    }
    result
}

/// Shrink compressible specs towards their minimum when `total` lies
/// between the total minimum and total preferred size.
pub fn compressed_sizes<S: AsRef<FormSpec>>(
    specs: &[S],
    total: i32,
    total_min: i32,
    total_pref: i32,
    min_sizes: &[i32],
    pref_sizes: &[i32],
) -> Vec<i32> {
    if total < total_min {
        return min_sizes.to_vec();
    }
    if total >= total_pref {
        return pref_sizes.to_vec();
    }

    let compression_factor =
        (total_pref as f64 - total as f64) / (total_pref as f64 - total_min as f64);
    debug!(
        "Compressing from {} to {} (factor {:.3})",
        total_pref, total, compression_factor
    );

    specs
        .iter()
        .zip(min_sizes.iter().zip(pref_sizes))
        .map(|(spec, (&min, &pref))| {
            if spec.as_ref().size().compressible() {
                pref.saturating_sub(round_half_up((pref as f64 - min as f64) * compression_factor))
            } else {
                pref
            }
        })
        .collect()
}

/// Hand the space beyond `total_size` to the growing specs, in proportion
/// to their resize weights.
///
/// Rounding errors are carried from one spec to the next so the result
/// sums to exactly `total`.
pub fn distributed_sizes<S: AsRef<FormSpec>>(
    specs: &[S],
    total: i32,
    total_size: i32,
    sizes: &[i32],
) -> Vec<i32> {
    let free_space = total.saturating_sub(total_size);
    if free_space < 0 {
        return sizes.to_vec();
    }
    let total_free_space = free_space as f64;

    let total_weight: f64 = specs.iter().map(|spec| spec.as_ref().resize_weight()).sum();
    if total_weight == 0.0 {
        return sizes.to_vec();
    }

    let mut rest_space = total_free_space;
    let mut rounded_rest_space = free_space;

    specs
        .iter()
        .zip(sizes)
        .map(|(spec, &size)| {
            let weight = spec.as_ref().resize_weight();
            if weight == FormSpec::NO_GROW {
                return size;
            }
            let rounding_correction = rest_space - rounded_rest_space as f64;
            let extra_space = total_free_space * weight / total_weight;
            let rounded_extra_space = round_half_up(extra_space - rounding_correction);
            rest_space -= extra_space;
            rounded_rest_space -= rounded_extra_space;
            size.saturating_add(rounded_extra_space)
        })
        .collect()
}

/// Running sums of `sizes` starting at `offset`; one more entry than sizes.
///
/// Sums saturate at the `i32` range.
pub fn compute_origins(sizes: &[i32], offset: i32) -> Vec<i32> {
    let mut origins = Vec::with_capacity(sizes.len() + 1);
    let mut current = offset;
    origins.push(current);
    for &size in sizes {
        current = current.saturating_add(size);
        origins.push(current);
    }
    origins
}

/// Saturating sum of pixel sizes.
pub fn sum(sizes: &[i32]) -> i32 {
    sizes.iter().fold(0, |total, &size| total.saturating_add(size))
}

/// For every spec, how many specs an item anchored there may span without
/// reaching a growing spec.
///
/// Entries after the last growing spec stay unbounded (`usize::MAX`).
pub fn maximum_fixed_span_table<S: AsRef<FormSpec>>(specs: &[S]) -> Vec<usize> {
    let mut table = vec![0; specs.len()];
    let mut maximum_fixed_span = usize::MAX;
    for (i, spec) in specs.iter().enumerate().rev() {
        if spec.as_ref().can_grow() {
            maximum_fixed_span = 0;
        }
        table[i] = maximum_fixed_span;
        if maximum_fixed_span < usize::MAX {
            maximum_fixed_span += 1;
        }
    }
    table
}

/// Size one axis into `total` pixels and return the origins, starting at
/// `offset`.
pub fn compute_grid_origins<S: AsRef<FormSpec>>(
    axis: &AxisSizing<'_, S>,
    total: i32,
    offset: i32,
) -> Vec<i32> {
    let min_sizes = axis.maximum_sizes(axis.min_measure);
    let pref_sizes = axis.maximum_sizes(axis.pref_measure);

    let grouped_min_sizes = grouped_sizes(axis.groups, &min_sizes);
    let grouped_pref_sizes = grouped_sizes(axis.groups, &pref_sizes);
    let total_min = sum(&grouped_min_sizes);
    let total_pref = sum(&grouped_pref_sizes);
    trace!(
        "Axis sizes: min {:?} (total {}), pref {:?} (total {})",
        grouped_min_sizes,
        total_min,
        grouped_pref_sizes,
        total_pref
    );

    if total < total_min {
        debug!(
            "Available size {} is below the minimum size {}; items will overflow",
            total, total_min
        );
    }

    let compressed = compressed_sizes(
        axis.specs,
        total,
        total_min,
        total_pref,
        &grouped_min_sizes,
        &grouped_pref_sizes,
    );
    let grouped = grouped_sizes(axis.groups, &compressed);
    let sizes = distributed_sizes(axis.specs, total, sum(&grouped), &grouped);
    trace!("Axis final sizes: {:?}", sizes);

    compute_origins(&sizes, offset)
}
