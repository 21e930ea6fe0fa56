//! The form layout engine.
//!
//! A [`FormLayout`] owns the column and row specs, the constraints of every
//! attached item, the column/row groups and a measurement cache. Layout
//! passes size both axes independently and then place each item inside its
//! cell.

use glam::IVec2;
use indexmap::IndexMap;
use log::debug;

use formgrid_core::{
    Axis, CellConstraints, ColumnSpec, FormError, FormSpec, GridError, ItemId, Measure, ParseError,
    Rect, RowSpec,
};
use formgrid_parser::{parse_cell_constraints, parse_column_specs, parse_row_specs};

use crate::cache::{CachedMeasure, MeasureKind, MeasurementCache};
use crate::context::{LayoutContext, LayoutOptions};
use crate::info::LayoutInfo;
use crate::measure::BoundsSink;
use crate::sizing::{
    compute_grid_origins, compute_origins, grouped_sizes, maximum_fixed_span_table, maximum_sizes,
    sum, AxisSizing, Group, ItemList,
};

/// Direction of a grid shape change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shift {
    Insert,
    Remove,
}

/// Grid layout of items over columns and rows.
#[derive(Debug, Clone, Default)]
pub struct FormLayout {
    column_specs: Vec<ColumnSpec>,
    row_specs: Vec<RowSpec>,
    column_groups: Vec<Group>,
    row_groups: Vec<Group>,
    constraints: IndexMap<ItemId, CellConstraints>,
    cache: MeasurementCache,
}

impl FormLayout {
    /// Create an empty layout without columns or rows.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_specs(column_specs: Vec<ColumnSpec>, row_specs: Vec<RowSpec>) -> Self {
        Self {
            column_specs,
            row_specs,
            ..Default::default()
        }
    }

    /// Create a layout from encoded column and row specs, e.g.
    /// `"right:pref, 4dlu, 50dlu"` and `"p, 3dlu, p"`.
    pub fn from_encoded(columns: &str, rows: &str) -> Result<Self, ParseError> {
        Ok(Self::with_specs(
            parse_column_specs(columns)?,
            parse_row_specs(rows)?,
        ))
    }

    /// Create a layout from encoded column specs; rows are appended later.
    pub fn from_encoded_columns(columns: &str) -> Result<Self, ParseError> {
        Ok(Self::with_specs(parse_column_specs(columns)?, Vec::new()))
    }

    // Specs

    pub fn column_count(&self) -> usize {
        self.column_specs.len()
    }

    pub fn row_count(&self) -> usize {
        self.row_specs.len()
    }

    /// The spec of the 1-based column.
    pub fn column_spec(&self, index: usize) -> Option<&ColumnSpec> {
        index.checked_sub(1).and_then(|i| self.column_specs.get(i))
    }

    /// The spec of the 1-based row.
    pub fn row_spec(&self, index: usize) -> Option<&RowSpec> {
        index.checked_sub(1).and_then(|i| self.row_specs.get(i))
    }

    pub fn column_specs(&self) -> &[ColumnSpec] {
        &self.column_specs
    }

    pub fn row_specs(&self) -> &[RowSpec] {
        &self.row_specs
    }

    pub fn set_column_spec(&mut self, index: usize, spec: ColumnSpec) -> Result<(), GridError> {
        check_index(index, self.column_count(), Axis::Horizontal)?;
        self.column_specs[index - 1] = spec;
        Ok(())
    }

    pub fn set_row_spec(&mut self, index: usize, spec: RowSpec) -> Result<(), GridError> {
        check_index(index, self.row_count(), Axis::Vertical)?;
        self.row_specs[index - 1] = spec;
        Ok(())
    }

    // Grid shape

    pub fn append_column(&mut self, spec: ColumnSpec) {
        debug!("Appending column {}: {}", self.column_count() + 1, spec);
        self.column_specs.push(spec);
    }

    pub fn append_row(&mut self, spec: RowSpec) {
        debug!("Appending row {}: {}", self.row_count() + 1, spec);
        self.row_specs.push(spec);
    }

    /// Insert a column before the 1-based `index`.
    ///
    /// Items at or right of `index` move one column right; items spanning
    /// across `index` grow by one column. Group indices shift along.
    pub fn insert_column(&mut self, index: usize, spec: ColumnSpec) -> Result<(), GridError> {
        check_index(index, self.column_count(), Axis::Horizontal)?;
        let constraints = self.shifted_constraints(Axis::Horizontal, index, Shift::Insert)?;
        let groups = shifted_groups(&self.column_groups, index, Shift::Insert)?;

        debug!("Inserting column {}: {}", index, spec);
        self.column_specs.insert(index - 1, spec);
        self.constraints = constraints;
        self.column_groups = groups;
        Ok(())
    }

    /// Insert a row before the 1-based `index`.
    pub fn insert_row(&mut self, index: usize, spec: RowSpec) -> Result<(), GridError> {
        check_index(index, self.row_count(), Axis::Vertical)?;
        let constraints = self.shifted_constraints(Axis::Vertical, index, Shift::Insert)?;
        let groups = shifted_groups(&self.row_groups, index, Shift::Insert)?;

        debug!("Inserting row {}: {}", index, spec);
        self.row_specs.insert(index - 1, spec);
        self.constraints = constraints;
        self.row_groups = groups;
        Ok(())
    }

    /// Remove the 1-based column and return its spec.
    ///
    /// Fails if an item starts in the column or the column is grouped; the
    /// layout is left untouched in that case.
    pub fn remove_column(&mut self, index: usize) -> Result<ColumnSpec, GridError> {
        check_index(index, self.column_count(), Axis::Horizontal)?;
        let constraints = self.shifted_constraints(Axis::Horizontal, index, Shift::Remove)?;
        let groups = shifted_groups(&self.column_groups, index, Shift::Remove)?;

        debug!("Removing column {}", index);
        self.constraints = constraints;
        self.column_groups = groups;
        Ok(self.column_specs.remove(index - 1))
    }

    /// Remove the 1-based row and return its spec.
    pub fn remove_row(&mut self, index: usize) -> Result<RowSpec, GridError> {
        check_index(index, self.row_count(), Axis::Vertical)?;
        let constraints = self.shifted_constraints(Axis::Vertical, index, Shift::Remove)?;
        let groups = shifted_groups(&self.row_groups, index, Shift::Remove)?;

        debug!("Removing row {}", index);
        self.constraints = constraints;
        self.row_groups = groups;
        Ok(self.row_specs.remove(index - 1))
    }

    fn shifted_constraints(
        &self,
        axis: Axis,
        index: usize,
        shift: Shift,
    ) -> Result<IndexMap<ItemId, CellConstraints>, GridError> {
        self.constraints
            .iter()
            .map(|(&item, constraints)| {
                let (origin, span) = constraints.origin_and_span(axis);
                let end = origin + span - 1;
                let (origin, span) = match shift {
                    Shift::Remove if origin == index => {
                        return Err(match axis {
                            Axis::Horizontal => GridError::ColumnHasOrigin { index, item },
                            Axis::Vertical => GridError::RowHasOrigin { index, item },
                        })
                    }
                    Shift::Insert if origin >= index => (origin + 1, span),
                    Shift::Remove if origin > index => (origin - 1, span),
                    Shift::Insert if end >= index => (origin, span + 1),
                    Shift::Remove if end >= index => (origin, span - 1),
                    _ => (origin, span),
                };
                let shifted = match axis {
                    Axis::Horizontal => constraints.clone().with_columns(origin, span)?,
                    Axis::Vertical => constraints.clone().with_rows(origin, span)?,
                };
                Ok((item, shifted))
            })
            .collect()
    }

    // Items

    /// Attach an item, replacing earlier constraints of the same item.
    pub fn add(&mut self, item: ItemId, constraints: CellConstraints) -> Result<(), GridError> {
        constraints.ensure_valid_grid_bounds(self.column_count(), self.row_count())?;
        debug!("Adding {:?} at {}", item, constraints);
        self.constraints.insert(item, constraints);
        Ok(())
    }

    /// Attach an item with encoded constraints, e.g. `"1, 3, 2, 1"`.
    pub fn add_encoded(&mut self, item: ItemId, constraints: &str) -> Result<(), FormError> {
        let constraints = parse_cell_constraints(constraints)?;
        self.add(item, constraints)?;
        Ok(())
    }

    /// A copy of the constraints of an attached item.
    pub fn constraints(&self, item: ItemId) -> Result<CellConstraints, GridError> {
        self.constraints
            .get(&item)
            .cloned()
            .ok_or(GridError::UnknownItem { item })
    }

    /// Detach an item and forget its measurements.
    pub fn remove(&mut self, item: ItemId) -> Option<CellConstraints> {
        self.cache.remove(item);
        self.constraints.shift_remove(&item)
    }

    /// Attached items in insertion order.
    pub fn items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.constraints.keys().copied()
    }

    pub fn item_count(&self) -> usize {
        self.constraints.len()
    }

    // Groups

    /// Column groups as 1-based indices.
    pub fn column_groups(&self) -> Vec<Vec<usize>> {
        self.column_groups.iter().map(|group| group.to_vec()).collect()
    }

    /// Replace the column groups. Every index must name an existing column
    /// and may appear in one group only.
    pub fn set_column_groups<G: AsRef<[usize]>>(&mut self, groups: &[G]) -> Result<(), GridError> {
        self.column_groups = validated_groups(groups, self.column_count())?;
        Ok(())
    }

    /// Add a column to the last group, starting one if there is none.
    pub fn add_grouped_column(&mut self, index: usize) -> Result<(), GridError> {
        let groups = with_grouped_index(self.column_groups(), index);
        self.set_column_groups(&groups)
    }

    /// Row groups as 1-based indices.
    pub fn row_groups(&self) -> Vec<Vec<usize>> {
        self.row_groups.iter().map(|group| group.to_vec()).collect()
    }

    pub fn set_row_groups<G: AsRef<[usize]>>(&mut self, groups: &[G]) -> Result<(), GridError> {
        self.row_groups = validated_groups(groups, self.row_count())?;
        Ok(())
    }

    pub fn add_grouped_row(&mut self, index: usize) -> Result<(), GridError> {
        let groups = with_grouped_index(self.row_groups(), index);
        self.set_row_groups(&groups)
    }

    // Layout

    /// Drop all cached item measurements.
    pub fn invalidate_caches(&self) {
        self.cache.invalidate();
    }

    /// Size the container needs to show every item at its preferred size,
    /// insets included.
    pub fn preferred_layout_size(&self, ctx: &LayoutContext<'_>, options: &LayoutOptions) -> IVec2 {
        self.compute_layout_size(ctx, options, MeasureKind::PreferredWidth, MeasureKind::PreferredHeight)
    }

    /// Size the container needs to show every item at its minimum size,
    /// insets included.
    pub fn minimum_layout_size(&self, ctx: &LayoutContext<'_>, options: &LayoutOptions) -> IVec2 {
        self.compute_layout_size(ctx, options, MeasureKind::MinimumWidth, MeasureKind::MinimumHeight)
    }

    /// Compute column and row origins for the given container.
    pub fn layout_info(
        &self,
        ctx: &LayoutContext<'_>,
        container: Rect,
        options: &LayoutOptions,
    ) -> LayoutInfo {
        if options.flush_cache {
            self.invalidate_caches();
        }

        let insets = options.insets;
        let (column_items, row_items) = self.axis_items();
        let measure = |kind| CachedMeasure::new(&self.cache, ctx.measurer, kind);
        let min_width = measure(MeasureKind::MinimumWidth);
        let pref_width = measure(MeasureKind::PreferredWidth);
        let min_height = measure(MeasureKind::MinimumHeight);
        let pref_height = measure(MeasureKind::PreferredHeight);

        let columns = AxisSizing {
            specs: &self.column_specs,
            items: &column_items,
            groups: &self.column_groups,
            converter: ctx.converter,
            min_measure: &min_width,
            pref_measure: &pref_width,
        };
        let rows = AxisSizing {
            specs: &self.row_specs,
            items: &row_items,
            groups: &self.row_groups,
            converter: ctx.converter,
            min_measure: &min_height,
            pref_measure: &pref_height,
        };

        let total_width = container.width.saturating_sub(insets.horizontal());
        let total_height = container.height.saturating_sub(insets.vertical());
        debug!(
            "Layout pass: {}x{} grid, {} items, {}x{} available",
            self.column_count(),
            self.row_count(),
            self.item_count(),
            total_width,
            total_height
        );

        LayoutInfo::new(
            compute_grid_origins(&columns, total_width, container.x.saturating_add(insets.left)),
            compute_grid_origins(&rows, total_height, container.y.saturating_add(insets.top)),
        )
    }

    /// Lay out every item inside `container` and report the bounds to `sink`.
    pub fn layout(
        &self,
        ctx: &LayoutContext<'_>,
        container: Rect,
        options: &LayoutOptions,
        sink: &mut dyn BoundsSink,
    ) -> LayoutInfo {
        let info = self.layout_info(ctx, container, options);

        for (&item, constraints) in &self.constraints {
            let cell = info.cell_bounds(constraints);
            let column_spec: Option<&FormSpec> = single_span_spec(
                &self.column_specs,
                constraints.origin_and_span(Axis::Horizontal),
            );
            let row_spec: Option<&FormSpec> =
                single_span_spec(&self.row_specs, constraints.origin_and_span(Axis::Vertical));
            let sizes = self.cache.item_sizes(ctx.measurer, item);
            sink.set_bounds(
                item,
                constraints.resolve_bounds(cell, column_spec, row_spec, &sizes),
            );
        }

        info
    }

    fn compute_layout_size(
        &self,
        ctx: &LayoutContext<'_>,
        options: &LayoutOptions,
        default_width: MeasureKind,
        default_height: MeasureKind,
    ) -> IVec2 {
        if options.flush_cache {
            self.invalidate_caches();
        }

        let (column_items, row_items) = self.axis_items();
        let measure = |kind| CachedMeasure::new(&self.cache, ctx.measurer, kind);
        let min_width = measure(MeasureKind::MinimumWidth);
        let pref_width = measure(MeasureKind::PreferredWidth);
        let min_height = measure(MeasureKind::MinimumHeight);
        let pref_height = measure(MeasureKind::PreferredHeight);
        let default_width = measure(default_width);
        let default_height = measure(default_height);

        let column_widths = maximum_sizes(
            &self.column_specs,
            &column_items,
            ctx.converter,
            &min_width,
            &pref_width,
            &default_width,
        );
        let row_heights = maximum_sizes(
            &self.row_specs,
            &row_items,
            ctx.converter,
            &min_height,
            &pref_height,
            &default_height,
        );

        let width = self.spanned_extent(
            ctx,
            Axis::Horizontal,
            &grouped_sizes(&self.column_groups, &column_widths),
            &default_width,
        );
        let height = self.spanned_extent(
            ctx,
            Axis::Vertical,
            &grouped_sizes(&self.row_groups, &row_heights),
            &default_height,
        );

        IVec2::new(
            width.saturating_add(options.insets.horizontal()),
            height.saturating_add(options.insets.vertical()),
        )
    }

    /// Total size of one axis, widened where a visible item spans a growing
    /// column/row and needs more room than the spanned cells give it.
    fn spanned_extent(
        &self,
        ctx: &LayoutContext<'_>,
        axis: Axis,
        sizes: &[i32],
        default_measure: &dyn Measure,
    ) -> i32 {
        let fixed_spans = match axis {
            Axis::Horizontal => maximum_fixed_span_table(&self.column_specs),
            Axis::Vertical => maximum_fixed_span_table(&self.row_specs),
        };
        let origins = compute_origins(sizes, 0);
        let total = sum(sizes);

        self.constraints
            .iter()
            .filter(|&(&item, _)| ctx.measurer.is_visible(item))
            .filter_map(|(&item, constraints)| {
                let (origin, span) = constraints.origin_and_span(axis);
                if span <= 1 || span <= *fixed_spans.get(origin - 1)? {
                    return None;
                }
                let lead = origins.get(origin - 1)?;
                let trail = total.saturating_sub(*origins.get(origin - 1 + span)?);
                Some(
                    lead.saturating_add(default_measure.size_of(item))
                        .saturating_add(trail),
                )
            })
            .fold(total, i32::max)
    }

    /// Single-span items per column and per row.
    fn axis_items(&self) -> (Vec<ItemList>, Vec<ItemList>) {
        let mut columns = vec![ItemList::new(); self.column_count()];
        let mut rows = vec![ItemList::new(); self.row_count()];

        for (&item, constraints) in &self.constraints {
            if constraints.grid_width() == 1 {
                if let Some(list) = columns.get_mut(constraints.grid_x() - 1) {
                    list.push(item);
                }
            }
            if constraints.grid_height() == 1 {
                if let Some(list) = rows.get_mut(constraints.grid_y() - 1) {
                    list.push(item);
                }
            }
        }

        (columns, rows)
    }
}

fn check_index(index: usize, count: usize, axis: Axis) -> Result<(), GridError> {
    if index < 1 || index > count {
        return Err(match axis {
            Axis::Horizontal => GridError::ColumnOutOfRange { index, count },
            Axis::Vertical => GridError::RowOutOfRange { index, count },
        });
    }
    Ok(())
}

fn single_span_spec<S: AsRef<FormSpec>>(specs: &[S], (origin, span): (usize, usize)) -> Option<&FormSpec> {
    if span != 1 {
        return None;
    }
    specs.get(origin - 1).map(|spec| spec.as_ref())
}

fn shifted_groups(groups: &[Group], index: usize, shift: Shift) -> Result<Vec<Group>, GridError> {
    groups
        .iter()
        .map(|group| {
            group
                .iter()
                .map(|&member| match shift {
                    Shift::Remove if member == index => Err(GridError::GroupedIndex { index }),
                    Shift::Insert if member >= index => Ok(member + 1),
                    Shift::Remove if member > index => Ok(member - 1),
                    _ => Ok(member),
                })
                .collect::<Result<Group, _>>()
        })
        .collect()
}

fn validated_groups<G: AsRef<[usize]>>(groups: &[G], count: usize) -> Result<Vec<Group>, GridError> {
    let mut used = vec![false; count];
    let mut result = Vec::with_capacity(groups.len());

    for (group_index, group) in groups.iter().enumerate() {
        let mut members = Group::new();
        for &index in group.as_ref() {
            if index < 1 || index > count {
                return Err(GridError::GroupIndexOutOfRange {
                    index,
                    group: group_index + 1,
                });
            }
            if used[index - 1] {
                return Err(GridError::DuplicateGroupIndex { index });
            }
            used[index - 1] = true;
            members.push(index);
        }
        result.push(members);
    }

    Ok(result)
}

fn with_grouped_index(mut groups: Vec<Vec<usize>>, index: usize) -> Vec<Vec<usize>> {
    match groups.last_mut() {
        Some(last) => last.push(index),
        None => groups.push(vec![index]),
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::SizeTable;
    use formgrid_core::{Alignment, DefaultUnitConverter, Insets, Size};

    fn layout(columns: &str, rows: &str) -> FormLayout {
        FormLayout::from_encoded(columns, rows).unwrap()
    }

    fn at(x: usize, y: usize, w: usize, h: usize) -> CellConstraints {
        CellConstraints::xywh(x, y, w, h).unwrap()
    }

    #[test]
    fn test_construction() {
        let form = layout("p, 4px, d:g", "p");
        assert_eq!(form.column_count(), 3);
        assert_eq!(form.row_count(), 1);
        assert_eq!(form.column_spec(3).unwrap().resize_weight(), 1.0);
        assert!(form.column_spec(0).is_none());
        assert!(form.column_spec(4).is_none());

        let form = FormLayout::from_encoded_columns("p, p").unwrap();
        assert_eq!(form.row_count(), 0);
        assert!(FormLayout::from_encoded("", "p").is_err());
    }

    #[test]
    fn test_add_validates_bounds() {
        let mut form = layout("p, p", "p");
        assert!(form.add(ItemId(1), at(1, 1, 2, 1)).is_ok());
        assert_eq!(
            form.add(ItemId(2), at(2, 1, 2, 1)),
            Err(GridError::ColumnSpanTooWide { width: 2, max: 1 })
        );
        assert_eq!(form.item_count(), 1);
    }

    #[test]
    fn test_add_rejects_huge_span() {
        let mut form = layout("p, p, p", "p");
        let cc = CellConstraints::xyw(2, 1, usize::MAX).unwrap();
        assert_eq!(
            form.add(ItemId(1), cc),
            Err(GridError::ColumnSpanTooWide {
                width: usize::MAX,
                max: 2
            })
        );
        assert_eq!(form.item_count(), 0);
    }

    #[test]
    fn test_readd_replaces_constraints() {
        let mut form = layout("p, p", "p");
        form.add(ItemId(1), at(1, 1, 1, 1)).unwrap();
        form.add(ItemId(1), at(2, 1, 1, 1)).unwrap();
        assert_eq!(form.item_count(), 1);
        assert_eq!(form.constraints(ItemId(1)).unwrap().grid_x(), 2);
    }

    #[test]
    fn test_add_encoded() {
        let mut form = layout("p, p", "p, p");
        form.add_encoded(ItemId(1), "2, 1, 1, 2, r, t").unwrap();
        let cc = form.constraints(ItemId(1)).unwrap();
        assert_eq!(cc.h_align(), Alignment::Right);
        assert_eq!(cc.grid_height(), 2);
        assert!(form.add_encoded(ItemId(2), "3, 1").is_err());
        assert!(form.add_encoded(ItemId(2), "x, 1").is_err());
    }

    #[test]
    fn test_remove_item() {
        let mut form = layout("p", "p");
        form.add(ItemId(1), at(1, 1, 1, 1)).unwrap();
        assert!(form.remove(ItemId(1)).is_some());
        assert!(form.remove(ItemId(1)).is_none());
        assert_eq!(
            form.constraints(ItemId(1)),
            Err(GridError::UnknownItem { item: ItemId(1) })
        );
    }

    #[test]
    fn test_insert_column_shifts_items_and_groups() {
        let mut form = layout("p, p, p", "p");
        form.add(ItemId(1), at(1, 1, 1, 1)).unwrap();
        form.add(ItemId(2), at(1, 1, 3, 1)).unwrap();
        form.add(ItemId(3), at(3, 1, 1, 1)).unwrap();
        form.set_column_groups(&[[1, 3]]).unwrap();

        form.insert_column(2, ColumnSpec::of(Size::pixel(4))).unwrap();

        assert_eq!(form.column_count(), 4);
        assert_eq!(form.column_spec(2).unwrap().size(), &Size::pixel(4));
        assert_eq!(form.constraints(ItemId(1)).unwrap().grid_x(), 1);
        let spanning = form.constraints(ItemId(2)).unwrap();
        assert_eq!((spanning.grid_x(), spanning.grid_width()), (1, 4));
        assert_eq!(form.constraints(ItemId(3)).unwrap().grid_x(), 4);
        assert_eq!(form.column_groups(), vec![vec![1, 4]]);
    }

    #[test]
    fn test_insert_row_range() {
        let mut form = layout("p", "p, p");
        assert_eq!(
            form.insert_row(3, RowSpec::of(Size::PREFERRED)),
            Err(GridError::RowOutOfRange { index: 3, count: 2 })
        );
        assert!(form.insert_row(0, RowSpec::of(Size::PREFERRED)).is_err());
        assert!(form.insert_row(2, RowSpec::of(Size::PREFERRED)).is_ok());
        assert_eq!(form.row_count(), 3);
    }

    #[test]
    fn test_row_insert_and_remove_shift_spans() {
        let mut form = layout("p", "p, p, p");
        form.add(ItemId(1), at(1, 1, 1, 3)).unwrap();
        form.add(ItemId(2), at(1, 3, 1, 1)).unwrap();
        form.add(ItemId(3), at(1, 2, 1, 1)).unwrap();

        form.insert_row(2, RowSpec::of(Size::pixel(4))).unwrap();
        assert_eq!(form.row_count(), 4);
        let spanning = form.constraints(ItemId(1)).unwrap();
        assert_eq!((spanning.grid_y(), spanning.grid_height()), (1, 4));
        assert_eq!(form.constraints(ItemId(2)).unwrap().grid_y(), 4);
        assert_eq!(form.constraints(ItemId(3)).unwrap().grid_y(), 3);

        let removed = form.remove_row(2).unwrap();
        assert_eq!(removed.size(), &Size::pixel(4));
        let spanning = form.constraints(ItemId(1)).unwrap();
        assert_eq!((spanning.grid_y(), spanning.grid_height()), (1, 3));
        assert_eq!(form.constraints(ItemId(2)).unwrap().grid_y(), 3);

        assert_eq!(
            form.remove_row(2),
            Err(GridError::RowHasOrigin {
                index: 2,
                item: ItemId(3)
            })
        );
        assert_eq!(form.row_count(), 3);
        assert_eq!(form.constraints(ItemId(1)).unwrap().grid_height(), 3);
    }

    #[test]
    fn test_remove_column_shrinks_spans() {
        let mut form = layout("p, 4px, p, p", "p");
        form.add(ItemId(1), at(1, 1, 3, 1)).unwrap();
        form.add(ItemId(2), at(4, 1, 1, 1)).unwrap();
        form.set_column_groups(&[vec![1, 4]]).unwrap();

        let removed = form.remove_column(2).unwrap();
        assert_eq!(removed.size(), &Size::pixel(4));
        assert_eq!(form.column_count(), 3);
        assert_eq!(form.constraints(ItemId(1)).unwrap().grid_width(), 2);
        assert_eq!(form.constraints(ItemId(2)).unwrap().grid_x(), 3);
        assert_eq!(form.column_groups(), vec![vec![1, 3]]);
    }

    #[test]
    fn test_remove_column_with_origin_fails_untouched() {
        let mut form = layout("p, p, p", "p");
        form.add(ItemId(1), at(2, 1, 1, 1)).unwrap();
        form.add(ItemId(2), at(3, 1, 1, 1)).unwrap();

        assert_eq!(
            form.remove_column(2),
            Err(GridError::ColumnHasOrigin {
                index: 2,
                item: ItemId(1)
            })
        );
        assert_eq!(form.column_count(), 3);
        assert_eq!(form.constraints(ItemId(2)).unwrap().grid_x(), 3);
    }

    #[test]
    fn test_remove_grouped_row_fails() {
        let mut form = layout("p", "p, p, p");
        form.set_row_groups(&[[1, 2]]).unwrap();
        assert_eq!(form.remove_row(2), Err(GridError::GroupedIndex { index: 2 }));
        assert_eq!(form.row_count(), 3);
        assert!(form.remove_row(3).is_ok());
        assert_eq!(form.row_groups(), vec![vec![1, 2]]);
    }

    #[test]
    fn test_group_validation() {
        let mut form = layout("p, p, p", "p");
        assert_eq!(
            form.set_column_groups(&[vec![1, 4]]),
            Err(GridError::GroupIndexOutOfRange { index: 4, group: 1 })
        );
        assert_eq!(
            form.set_column_groups(&[vec![1, 2], vec![2, 3]]),
            Err(GridError::DuplicateGroupIndex { index: 2 })
        );
        assert!(form.column_groups().is_empty());
    }

    #[test]
    fn test_add_grouped_column() {
        let mut form = layout("p, p, p, p", "p");
        form.add_grouped_column(1).unwrap();
        form.add_grouped_column(3).unwrap();
        assert_eq!(form.column_groups(), vec![vec![1, 3]]);
        assert!(form.add_grouped_column(3).is_err());

        form.set_column_groups(&[vec![1], vec![2]]).unwrap();
        form.add_grouped_column(4).unwrap();
        assert_eq!(form.column_groups(), vec![vec![1], vec![2, 4]]);
    }

    #[test]
    fn test_layout_places_items() {
        let mut form = layout("right:pref, 4px, 50px, 4px, default", "pref");
        form.add(ItemId(1), at(1, 1, 1, 1)).unwrap();
        form.add(
            ItemId(2),
            at(3, 1, 1, 1)
                .with_alignment(Alignment::Fill, Alignment::Default)
                .unwrap(),
        )
        .unwrap();

        let sizes = SizeTable::new()
            .with(ItemId(1), IVec2::new(10, 10), IVec2::new(20, 15))
            .with(ItemId(2), IVec2::new(10, 10), IVec2::new(30, 20));
        let converter = DefaultUnitConverter::default();
        let ctx = LayoutContext::new(&sizes, &converter);

        let mut bounds: IndexMap<ItemId, Rect> = IndexMap::new();
        let info = form.layout(&ctx, Rect::sized(200, 100), &LayoutOptions::default(), &mut bounds);

        assert_eq!(info.column_origins, vec![0, 20, 24, 74, 78, 78]);
        // Row default alignment is center: (20 - 15) / 2
        assert_eq!(bounds[&ItemId(1)], Rect::new(0, 2, 20, 15));
        assert_eq!(bounds[&ItemId(2)], Rect::new(24, 0, 50, 20));
    }

    #[test]
    fn test_layout_applies_insets() {
        let mut form = layout("p:g", "p:g");
        form.add(ItemId(1), at(1, 1, 1, 1)).unwrap();
        let sizes = SizeTable::new().with(ItemId(1), IVec2::ZERO, IVec2::new(10, 10));
        let converter = DefaultUnitConverter::default();
        let ctx = LayoutContext::new(&sizes, &converter);
        let options = LayoutOptions::default().with_insets(Insets::new(5, 10, 5, 10));

        let info = form.layout_info(&ctx, Rect::new(100, 100, 120, 60), &options);
        assert_eq!(info.column_origins, vec![110, 210]);
        assert_eq!(info.row_origins, vec![105, 155]);
    }

    #[test]
    fn test_preferred_size_includes_spanning_items() {
        let mut form = layout("p, 4px, p:g", "p");
        form.add(ItemId(1), at(1, 1, 1, 1)).unwrap();
        form.add(ItemId(2), at(1, 1, 3, 1)).unwrap();
        let sizes = SizeTable::new()
            .with(ItemId(1), IVec2::new(5, 5), IVec2::new(20, 10))
            .with(ItemId(2), IVec2::new(50, 5), IVec2::new(100, 10));
        let converter = DefaultUnitConverter::default();
        let ctx = LayoutContext::new(&sizes, &converter);
        let options = LayoutOptions::default().with_insets(Insets::uniform(2));

        // Columns give 24px; the spanning item needs 100px
        assert_eq!(form.preferred_layout_size(&ctx, &options), IVec2::new(104, 14));
        // Preferred-sized columns and rows keep their preferred size
        assert_eq!(form.minimum_layout_size(&ctx, &options), IVec2::new(54, 14));
    }

    #[test]
    fn test_spanning_fixed_columns_do_not_widen() {
        let mut form = layout("p:g, 4px, p", "p");
        form.add(ItemId(1), at(2, 1, 2, 1)).unwrap();
        let sizes = SizeTable::new().with(ItemId(1), IVec2::ZERO, IVec2::new(300, 10));
        let converter = DefaultUnitConverter::default();
        let ctx = LayoutContext::new(&sizes, &converter);

        // Columns 2..3 never reach a growing column
        let size = form.preferred_layout_size(&ctx, &LayoutOptions::default());
        assert_eq!(size.x, 4);
    }

    #[test]
    fn test_invisible_items_do_not_widen() {
        let mut form = layout("p, p:g", "p");
        form.add(ItemId(1), at(1, 1, 2, 1)).unwrap();
        let mut sizes = SizeTable::new().with(ItemId(1), IVec2::ZERO, IVec2::new(80, 10));
        let converter = DefaultUnitConverter::default();

        let size = form.preferred_layout_size(&LayoutContext::new(&sizes, &converter), &LayoutOptions::default());
        assert_eq!(size.x, 80);

        sizes.set_visible(ItemId(1), false);
        let size = form.preferred_layout_size(
            &LayoutContext::new(&sizes, &converter),
            &LayoutOptions::default().flushing(),
        );
        assert_eq!(size.x, 0);
    }

    #[test]
    fn test_huge_constant_columns_saturate() {
        let mut form = layout("2000000000px, 2000000000px", "p");
        form.add(ItemId(1), at(2, 1, 1, 1)).unwrap();
        let sizes = SizeTable::new().with(ItemId(1), IVec2::new(5, 5), IVec2::new(10, 10));
        let converter = DefaultUnitConverter::default();
        let ctx = LayoutContext::new(&sizes, &converter);
        let options = LayoutOptions::default();

        let info = form.layout_info(&ctx, Rect::sized(100, 10), &options);
        assert_eq!(info.column_origins, vec![0, 2_000_000_000, i32::MAX]);
        assert_eq!(info.width(), i32::MAX);
        assert_eq!(form.preferred_layout_size(&ctx, &options).x, i32::MAX);

        let mut bounds = Vec::new();
        form.layout(&ctx, Rect::sized(100, 10), &options, &mut bounds);
        assert_eq!(bounds[0].1.x, 2_000_000_000);
    }

    #[test]
    fn test_flush_cache_remeasures() {
        let mut form = layout("p", "p");
        form.add(ItemId(1), at(1, 1, 1, 1)).unwrap();
        let converter = DefaultUnitConverter::default();

        let small = SizeTable::new().with(ItemId(1), IVec2::ZERO, IVec2::new(10, 10));
        let large = SizeTable::new().with(ItemId(1), IVec2::ZERO, IVec2::new(40, 40));
        let options = LayoutOptions::default();

        let size = form.preferred_layout_size(&LayoutContext::new(&small, &converter), &options);
        assert_eq!(size, IVec2::new(10, 10));
        // Stale measurements until the cache is flushed
        let size = form.preferred_layout_size(&LayoutContext::new(&large, &converter), &options);
        assert_eq!(size, IVec2::new(10, 10));
        let size = form.preferred_layout_size(
            &LayoutContext::new(&large, &converter),
            &options.flushing(),
        );
        assert_eq!(size, IVec2::new(40, 40));
    }
}
