use std::collections::BTreeMap;

use crate::geometry::{Edge, Point, Rect, Size, classify_edge};
use crate::grid::{CellIndex, GridModel};
use crate::layout::RowDimensions;

/// Grid mutation a resolved drop asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Insert a new single-cell row before this row index. An index equal
    /// to the row count appends after the last row.
    Row(usize),
    /// Insert a new cell before this index within an existing row. A
    /// column equal to the row's column count appends at the row's end.
    Cell(CellIndex),
}

/// Line segment highlighting the pending insertion boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightLine {
    pub from: Point,
    pub to: Point,
}

impl HighlightLine {
    pub fn horizontal(y: i32, width: i32) -> Self {
        Self {
            from: Point::new(0, y),
            to: Point::new(width, y),
        }
    }

    pub fn vertical(x: i32, top: i32, bottom: i32) -> Self {
        Self {
            from: Point::new(x, top),
            to: Point::new(x, bottom),
        }
    }
}

/// Row and cell extents the resolver walks.
///
/// The panel answers these from its grid and derived row-size table, so
/// resolution never touches the retained layout tree the host owns.
pub trait RowGeometry {
    fn rows(&self) -> usize;
    fn columns(&self, row: usize) -> usize;
    /// Content extent of a row: total width including inter-cell spacing,
    /// and the row's cell height.
    fn row_size(&self, row: usize) -> Size;
    fn cell_size(&self, index: CellIndex) -> Size;
    fn spacing(&self) -> i32;
    /// Width used for boundary lines that span the whole panel.
    fn panel_width(&self) -> i32;
}

/// Resolve where a drop at `point` lands.
///
/// Rows are walked top to bottom accumulating `height + spacing`; a cursor
/// below every row appends a new last row. Within the matched row, columns
/// are walked the same way; a cursor right of every cell appends at the
/// row's end. Otherwise the point is classified against the matched cell's
/// box (cell extent plus trailing spacing): Top and Bottom request a new
/// row before or after the matched row, Left and Right a new cell before
/// or after the matched column.
pub fn resolve(point: Point, geom: &impl RowGeometry) -> Placement {
    if geom.rows() == 0 {
        return Placement::Row(0);
    }

    let spacing = geom.spacing();
    let mut y = 0;
    for row in 0..geom.rows() {
        let row_extent = geom.row_size(row);
        let row_top = y;
        y += row_extent.height + spacing;
        if point.y > y {
            continue;
        }

        let columns = geom.columns(row);
        let mut x = 0;
        for col in 0..columns {
            let cell = geom.cell_size(CellIndex::new(row, col));
            let cell_left = x;
            x += cell.width + spacing;
            if point.x > x {
                continue;
            }

            let relative = Point::new(point.x - cell_left, point.y - row_top);
            let bounds = Size::new(cell.width + spacing, row_extent.height + spacing);
            return match classify_edge(relative, bounds) {
                Edge::Top => Placement::Row(row),
                Edge::Bottom => Placement::Row(row + 1),
                Edge::Left => Placement::Cell(CellIndex::new(row, col)),
                Edge::Right => Placement::Cell(CellIndex::new(row, col + 1)),
            };
        }

        return Placement::Cell(CellIndex::new(row, columns));
    }

    Placement::Row(geom.rows())
}

/// Find the cell whose rendered extent contains `point`, if any.
///
/// Spacing gaps between cells and rows do not belong to any cell, so a
/// press there removes nothing.
pub fn hit_test(point: Point, geom: &impl RowGeometry) -> Option<CellIndex> {
    let spacing = geom.spacing();
    let mut y = 0;
    for row in 0..geom.rows() {
        let row_extent = geom.row_size(row);
        let row_top = y;
        y += row_extent.height + spacing;
        if point.y > y {
            continue;
        }

        let mut x = 0;
        for col in 0..geom.columns(row) {
            let index = CellIndex::new(row, col);
            let cell = geom.cell_size(index);
            let rect = Rect::new(x, row_top, cell.width, row_extent.height);
            if rect.contains(point) {
                return Some(index);
            }
            x += cell.width + spacing;
        }
        return None;
    }
    None
}

/// Derive the drop-preview line for a drag hovering at `point`.
///
/// The segment sits on the exact boundary the resolved placement would
/// insert at, so preview and drop can never disagree.
pub fn preview(point: Point, geom: &impl RowGeometry) -> HighlightLine {
    if geom.rows() == 0 {
        return HighlightLine::horizontal(0, geom.panel_width());
    }

    match resolve(point, geom) {
        Placement::Row(row) => {
            let y = row_top(geom, row);
            let width = if row < geom.rows() {
                geom.row_size(row).width
            } else {
                geom.panel_width()
            };
            HighlightLine::horizontal(y, width)
        }
        Placement::Cell(index) => {
            let top = row_top(geom, index.row);
            let bottom = top + geom.row_size(index.row).height;
            let mut x = 0;
            for col in 0..index.col {
                x += geom.cell_size(CellIndex::new(index.row, col)).width + geom.spacing();
            }
            HighlightLine::vertical(x, top, bottom)
        }
    }
}

fn row_top(geom: &impl RowGeometry, row: usize) -> i32 {
    let spacing = geom.spacing();
    (0..row.min(geom.rows()))
        .map(|r| geom.row_size(r).height + spacing)
        .sum()
}

/// [`RowGeometry`] view over the panel's grid and row-size table.
pub struct GridGeometry<'a> {
    grid: &'a GridModel,
    sizes: &'a BTreeMap<usize, RowDimensions>,
    spacing: i32,
    target_width: i32,
}

impl<'a> GridGeometry<'a> {
    pub fn new(
        grid: &'a GridModel,
        sizes: &'a BTreeMap<usize, RowDimensions>,
        spacing: i32,
        target_width: i32,
    ) -> Self {
        Self {
            grid,
            sizes,
            spacing,
            target_width,
        }
    }
}

impl RowGeometry for GridGeometry<'_> {
    fn rows(&self) -> usize {
        self.grid.row_count()
    }

    fn columns(&self, row: usize) -> usize {
        self.grid.column_count(row)
    }

    fn row_size(&self, row: usize) -> Size {
        let columns = self.grid.column_count(row);
        match self.sizes.get(&row) {
            Some(dims) => Size::new(dims.row_width(columns, self.spacing), dims.cell.height),
            None => Size::default(),
        }
    }

    fn cell_size(&self, index: CellIndex) -> Size {
        let columns = self.grid.column_count(index.row);
        match self.sizes.get(&index.row) {
            Some(dims) => dims.cell_at(index.col, columns),
            None => Size::default(),
        }
    }

    fn spacing(&self) -> i32 {
        self.spacing
    }

    fn panel_width(&self) -> i32 {
        if self.target_width > 0 {
            return self.target_width;
        }
        (0..self.rows())
            .map(|row| self.row_size(row).width)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed geometry: `rows` rows of equal cells, 100x100 each,
    /// spacing 10. Row boundaries fall at multiples of 110.
    struct UniformGeometry {
        rows: usize,
        columns: usize,
    }

    impl RowGeometry for UniformGeometry {
        fn rows(&self) -> usize {
            self.rows
        }

        fn columns(&self, _row: usize) -> usize {
            self.columns
        }

        fn row_size(&self, _row: usize) -> Size {
            Size::new(100 * self.columns as i32 + 10 * (self.columns as i32 - 1), 100)
        }

        fn cell_size(&self, _index: CellIndex) -> Size {
            Size::new(100, 100)
        }

        fn spacing(&self) -> i32 {
            10
        }

        fn panel_width(&self) -> i32 {
            self.row_size(0).width
        }
    }

    #[test]
    fn empty_grid_always_resolves_to_row_zero() {
        let geom = UniformGeometry { rows: 0, columns: 0 };
        for point in [Point::new(0, 0), Point::new(-50, 900), Point::new(400, 3)] {
            assert_eq!(resolve(point, &geom), Placement::Row(0));
        }
    }

    #[test]
    fn cursor_below_all_rows_appends_a_row() {
        let geom = UniformGeometry { rows: 1, columns: 1 };
        assert_eq!(resolve(Point::new(50, 300), &geom), Placement::Row(1));
    }

    #[test]
    fn cursor_right_of_all_cells_appends_in_the_row() {
        let geom = UniformGeometry { rows: 1, columns: 2 };
        assert_eq!(
            resolve(Point::new(500, 50), &geom),
            Placement::Cell(CellIndex::new(0, 2))
        );
    }

    #[test]
    fn left_zone_inserts_before_the_matched_cell() {
        let geom = UniformGeometry { rows: 1, columns: 2 };
        // (5, 50) sits against cell (0, 0)'s left edge.
        assert_eq!(
            resolve(Point::new(5, 50), &geom),
            Placement::Cell(CellIndex::new(0, 0))
        );
    }

    #[test]
    fn right_zone_inserts_after_the_matched_cell() {
        let geom = UniformGeometry { rows: 1, columns: 2 };
        assert_eq!(
            resolve(Point::new(105, 50), &geom),
            Placement::Cell(CellIndex::new(0, 1))
        );
    }

    #[test]
    fn top_and_bottom_zones_insert_rows() {
        let geom = UniformGeometry { rows: 2, columns: 2 };
        assert_eq!(resolve(Point::new(50, 3), &geom), Placement::Row(0));
        assert_eq!(resolve(Point::new(50, 107), &geom), Placement::Row(1));
        // Second row, bottom zone.
        assert_eq!(resolve(Point::new(50, 217), &geom), Placement::Row(2));
    }

    #[test]
    fn hit_test_finds_cells_and_skips_gaps() {
        let geom = UniformGeometry { rows: 2, columns: 2 };
        assert_eq!(
            hit_test(Point::new(50, 50), &geom),
            Some(CellIndex::new(0, 0))
        );
        assert_eq!(
            hit_test(Point::new(150, 170), &geom),
            Some(CellIndex::new(1, 1))
        );
        // Inside the spacing gap between the two cells.
        assert_eq!(hit_test(Point::new(104, 50), &geom), None);
        // Below every row.
        assert_eq!(hit_test(Point::new(50, 400), &geom), None);
    }

    #[test]
    fn preview_marks_row_boundaries() {
        let geom = UniformGeometry { rows: 2, columns: 1 };
        // Top zone of row 1: boundary line at its top edge.
        let line = preview(Point::new(50, 115), &geom);
        assert_eq!(line, HighlightLine::horizontal(110, 100));

        // Below everything: line after the last row, panel wide.
        let line = preview(Point::new(50, 500), &geom);
        assert_eq!(line, HighlightLine::horizontal(220, 100));
    }

    #[test]
    fn preview_marks_cell_boundaries() {
        let geom = UniformGeometry { rows: 1, columns: 2 };
        let line = preview(Point::new(105, 50), &geom);
        assert_eq!(line, HighlightLine::vertical(110, 0, 100));
    }

    #[test]
    fn preview_over_empty_grid_spans_the_panel_top() {
        let geom = UniformGeometry { rows: 0, columns: 0 };
        let line = preview(Point::new(40, 40), &geom);
        assert_eq!(line.from.y, 0);
        assert_eq!(line.to.y, 0);
    }
}
