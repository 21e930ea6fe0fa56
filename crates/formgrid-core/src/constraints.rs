//! Cell constraints: where an item sits on the grid and how it is aligned
//! inside its cell.

use std::fmt;

use glam::IVec2;

use crate::errors::{ConstraintsError, GridError};
use crate::size::{ComponentSize, Size};
use crate::spec::{Axis, DefaultAlignment, FormSpec};
use crate::types::{Insets, Rect};

/// Alignment of an item inside its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    /// Use the column/row default alignment
    #[default]
    Default,
    /// Stretch to fill the cell
    Fill,
    Left,
    Right,
    Center,
    Top,
    Bottom,
}

impl Alignment {
    pub fn name(&self) -> &'static str {
        match self {
            Alignment::Default => "default",
            Alignment::Fill => "fill",
            Alignment::Left => "left",
            Alignment::Right => "right",
            Alignment::Center => "center",
            Alignment::Top => "top",
            Alignment::Bottom => "bottom",
        }
    }

    pub fn abbreviation(&self) -> char {
        self.name().as_bytes()[0] as char
    }

    /// Whether the alignment may be used in the horizontal slot.
    pub fn is_horizontal(&self) -> bool {
        !matches!(self, Alignment::Top | Alignment::Bottom)
    }

    /// Whether the alignment may be used in the vertical slot.
    pub fn is_vertical(&self) -> bool {
        !matches!(self, Alignment::Left | Alignment::Right)
    }
}

impl From<DefaultAlignment> for Alignment {
    fn from(alignment: DefaultAlignment) -> Self {
        match alignment {
            DefaultAlignment::Fill => Alignment::Fill,
            DefaultAlignment::Left => Alignment::Left,
            DefaultAlignment::Center => Alignment::Center,
            DefaultAlignment::Right => Alignment::Right,
            DefaultAlignment::Top => Alignment::Top,
            DefaultAlignment::Bottom => Alignment::Bottom,
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Intrinsic sizes of one item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemSizes {
    pub minimum: IVec2,
    pub preferred: IVec2,
}

impl ItemSizes {
    pub fn new(minimum: IVec2, preferred: IVec2) -> Self {
        Self { minimum, preferred }
    }
}

/// Placement of an item: 1-based grid origin, span, alignment and insets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellConstraints {
    grid_x: usize,
    grid_y: usize,
    grid_width: usize,
    grid_height: usize,
    h_align: Alignment,
    v_align: Alignment,
    insets: Insets,
}

impl Default for CellConstraints {
    fn default() -> Self {
        Self {
            grid_x: 1,
            grid_y: 1,
            grid_width: 1,
            grid_height: 1,
            h_align: Alignment::Default,
            v_align: Alignment::Default,
            insets: Insets::ZERO,
        }
    }
}

impl CellConstraints {
    pub fn new(
        grid_x: usize,
        grid_y: usize,
        grid_width: usize,
        grid_height: usize,
        h_align: Alignment,
        v_align: Alignment,
        insets: Insets,
    ) -> Result<Self, ConstraintsError> {
        positive("x", grid_x)?;
        positive("y", grid_y)?;
        positive("width", grid_width)?;
        positive("height", grid_height)?;
        ensure_valid_orientations(h_align, v_align)?;
        Ok(Self {
            grid_x,
            grid_y,
            grid_width,
            grid_height,
            h_align,
            v_align,
            insets,
        })
    }

    /// Single cell at column `x`, row `y`.
    pub fn xy(x: usize, y: usize) -> Result<Self, ConstraintsError> {
        Self::xywh(x, y, 1, 1)
    }

    /// Cell at column `x`, row `y` spanning `width` columns.
    pub fn xyw(x: usize, y: usize, width: usize) -> Result<Self, ConstraintsError> {
        Self::xywh(x, y, width, 1)
    }

    /// Cell at column `x`, row `y` spanning `width` columns and `height` rows.
    pub fn xywh(x: usize, y: usize, width: usize, height: usize) -> Result<Self, ConstraintsError> {
        Self::new(x, y, width, height, Alignment::Default, Alignment::Default, Insets::ZERO)
    }

    /// Single cell, row first.
    pub fn rc(row: usize, column: usize) -> Result<Self, ConstraintsError> {
        Self::xywh(column, row, 1, 1)
    }

    /// Row first, spanning `column_span` columns.
    pub fn rcw(row: usize, column: usize, column_span: usize) -> Result<Self, ConstraintsError> {
        Self::xywh(column, row, column_span, 1)
    }

    /// Row first, spanning `row_span` rows and `column_span` columns.
    pub fn rchw(
        row: usize,
        column: usize,
        row_span: usize,
        column_span: usize,
    ) -> Result<Self, ConstraintsError> {
        Self::xywh(column, row, column_span, row_span)
    }

    /// Replace both alignments.
    pub fn with_alignment(
        mut self,
        h_align: Alignment,
        v_align: Alignment,
    ) -> Result<Self, ConstraintsError> {
        ensure_valid_orientations(h_align, v_align)?;
        self.h_align = h_align;
        self.v_align = v_align;
        Ok(self)
    }

    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    /// Copy with a new horizontal origin and span.
    pub fn with_columns(mut self, grid_x: usize, grid_width: usize) -> Result<Self, ConstraintsError> {
        positive("x", grid_x)?;
        positive("width", grid_width)?;
        self.grid_x = grid_x;
        self.grid_width = grid_width;
        Ok(self)
    }

    /// Copy with a new vertical origin and span.
    pub fn with_rows(mut self, grid_y: usize, grid_height: usize) -> Result<Self, ConstraintsError> {
        positive("y", grid_y)?;
        positive("height", grid_height)?;
        self.grid_y = grid_y;
        self.grid_height = grid_height;
        Ok(self)
    }

    pub fn grid_x(&self) -> usize {
        self.grid_x
    }

    pub fn grid_y(&self) -> usize {
        self.grid_y
    }

    pub fn grid_width(&self) -> usize {
        self.grid_width
    }

    pub fn grid_height(&self) -> usize {
        self.grid_height
    }

    pub fn h_align(&self) -> Alignment {
        self.h_align
    }

    pub fn v_align(&self) -> Alignment {
        self.v_align
    }

    pub fn insets(&self) -> Insets {
        self.insets
    }

    /// Origin and span along one axis.
    pub fn origin_and_span(&self, axis: Axis) -> (usize, usize) {
        match axis {
            Axis::Horizontal => (self.grid_x, self.grid_width),
            Axis::Vertical => (self.grid_y, self.grid_height),
        }
    }

    /// Check that the span fits a grid of the given size.
    pub fn ensure_valid_grid_bounds(&self, columns: usize, rows: usize) -> Result<(), GridError> {
        if self.grid_x > columns {
            return Err(GridError::ColumnOutOfRange {
                index: self.grid_x,
                count: columns,
            });
        }
        if self.grid_width > columns - self.grid_x + 1 {
            return Err(GridError::ColumnSpanTooWide {
                width: self.grid_width,
                max: columns - self.grid_x + 1,
            });
        }
        if self.grid_y > rows {
            return Err(GridError::RowOutOfRange {
                index: self.grid_y,
                count: rows,
            });
        }
        if self.grid_height > rows - self.grid_y + 1 {
            return Err(GridError::RowSpanTooTall {
                height: self.grid_height,
                max: rows - self.grid_y + 1,
            });
        }
        Ok(())
    }

    /// Compute the item bounds inside its cell.
    ///
    /// `column_spec` and `row_spec` are the specs of the item's column and
    /// row when it spans exactly one of them, `None` otherwise.
    pub fn resolve_bounds(
        &self,
        cell: Rect,
        column_spec: Option<&FormSpec>,
        row_spec: Option<&FormSpec>,
        sizes: &ItemSizes,
    ) -> Rect {
        let h_align = concrete_alignment(self.h_align, column_spec);
        let v_align = concrete_alignment(self.v_align, row_spec);

        let cell = cell.shrink(&self.insets);

        let item_width = item_size(
            column_spec,
            cell.width,
            sizes.minimum.x,
            sizes.preferred.x,
        );
        let item_height = item_size(
            row_spec,
            cell.height,
            sizes.minimum.y,
            sizes.preferred.y,
        );

        Rect::new(
            origin(h_align, cell.x, cell.width, item_width),
            origin(v_align, cell.y, cell.height, item_height),
            extent(h_align, cell.width, item_width),
            extent(v_align, cell.height, item_height),
        )
    }
}

impl fmt::Display for CellConstraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}, {}",
            self.grid_x, self.grid_y, self.grid_width, self.grid_height, self.h_align, self.v_align
        )
    }
}

/// Resolve `Default` against the spec of a single-span item.
///
/// Items spanning several columns/rows have no single spec; for them a
/// remaining `Default` becomes `Fill`.
pub fn concrete_alignment(alignment: Alignment, spec: Option<&FormSpec>) -> Alignment {
    match (alignment, spec) {
        (Alignment::Default, Some(spec)) => spec.default_alignment().into(),
        (Alignment::Default, None) => Alignment::Fill,
        (alignment, _) => alignment,
    }
}

fn item_size(spec: Option<&FormSpec>, cell_size: i32, minimum: i32, preferred: i32) -> i32 {
    match spec.map(FormSpec::size) {
        None => preferred,
        Some(Size::Component(ComponentSize::Minimum)) => minimum,
        Some(Size::Component(ComponentSize::Preferred)) => preferred,
        Some(_) => cell_size.min(preferred),
    }
}

fn origin(alignment: Alignment, cell_origin: i32, cell_size: i32, item_size: i32) -> i32 {
    match alignment {
        Alignment::Right | Alignment::Bottom => cell_origin
            .saturating_add(cell_size)
            .saturating_sub(item_size),
        Alignment::Center => {
            cell_origin.saturating_add(cell_size.saturating_sub(item_size).div_euclid(2))
        }
        _ => cell_origin,
    }
}

fn extent(alignment: Alignment, cell_size: i32, item_size: i32) -> i32 {
    if alignment == Alignment::Fill {
        cell_size
    } else {
        item_size
    }
}

fn positive(field: &'static str, value: usize) -> Result<(), ConstraintsError> {
    if value == 0 {
        return Err(ConstraintsError::NonPositive { field, value: 0 });
    }
    Ok(())
}

fn ensure_valid_orientations(h_align: Alignment, v_align: Alignment) -> Result<(), ConstraintsError> {
    if !h_align.is_horizontal() {
        return Err(ConstraintsError::NotHorizontal {
            alignment: h_align.to_string(),
        });
    }
    if !v_align.is_vertical() {
        return Err(ConstraintsError::NotVertical {
            alignment: v_align.to_string(),
        });
    }
    Ok(())
}
