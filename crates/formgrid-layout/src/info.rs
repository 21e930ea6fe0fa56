//! Computed grid geometry.

use formgrid_core::{CellConstraints, Rect};

/// Column and row origins from a layout pass.
///
/// Each vector holds one more entry than there are columns (rows); the
/// last entry is the far edge of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutInfo {
    pub column_origins: Vec<i32>,
    pub row_origins: Vec<i32>,
}

impl LayoutInfo {
    pub fn new(column_origins: Vec<i32>, row_origins: Vec<i32>) -> Self {
        Self {
            column_origins,
            row_origins,
        }
    }

    pub fn x(&self) -> i32 {
        self.column_origins.first().copied().unwrap_or(0)
    }

    pub fn y(&self) -> i32 {
        self.row_origins.first().copied().unwrap_or(0)
    }

    pub fn width(&self) -> i32 {
        self.column_origins.last().copied().unwrap_or(0).saturating_sub(self.x())
    }

    pub fn height(&self) -> i32 {
        self.row_origins.last().copied().unwrap_or(0).saturating_sub(self.y())
    }

    /// Width of the 1-based column.
    pub fn column_width(&self, column: usize) -> Option<i32> {
        span_extent(&self.column_origins, column, 1)
    }

    /// Height of the 1-based row.
    pub fn row_height(&self, row: usize) -> Option<i32> {
        span_extent(&self.row_origins, row, 1)
    }

    /// Bounds of the cells covered by `constraints`, before alignment and
    /// insets are applied.
    ///
    /// Constraints must fit the grid the info was computed for; cells
    /// outside it collapse to zero size at the grid edge.
    pub fn cell_bounds(&self, constraints: &CellConstraints) -> Rect {
        let x = origin(&self.column_origins, constraints.grid_x());
        let y = origin(&self.row_origins, constraints.grid_y());
        Rect::new(
            x,
            y,
            span_extent(&self.column_origins, constraints.grid_x(), constraints.grid_width())
                .unwrap_or(0),
            span_extent(&self.row_origins, constraints.grid_y(), constraints.grid_height())
                .unwrap_or(0),
        )
    }
}

fn origin(origins: &[i32], index: usize) -> i32 {
    origins
        .get(index - 1)
        .or_else(|| origins.last())
        .copied()
        .unwrap_or(0)
}

fn span_extent(origins: &[i32], start: usize, span: usize) -> Option<i32> {
    let first = origins.get(start.checked_sub(1)?)?;
    let last = origins.get(start - 1 + span)?;
    Some(last.saturating_sub(*first))
}
