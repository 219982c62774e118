use std::collections::BTreeMap;

use crate::catalog::ImageId;

/// Position of one cell in the gallery grid.
///
/// The derived ordering is rows first, then columns, which doubles as the
/// grid's iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellIndex {
    pub row: usize,
    pub col: usize,
}

impl CellIndex {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Sparse mapping from cell positions to image handles.
///
/// Two invariants hold after every mutation: columns within a row are
/// contiguous from zero, and rows are numbered contiguously from zero.
/// Mutations rebuild the map with a renumbering pass, which is O(cells);
/// galleries top out at a few hundred images so this stays cheap.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GridModel {
    cells: BTreeMap<CellIndex, ImageId>,
}

impl GridModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// One past the highest occupied row, or zero when empty.
    pub fn row_count(&self) -> usize {
        self.cells
            .keys()
            .next_back()
            .map(|index| index.row + 1)
            .unwrap_or(0)
    }

    /// Number of occupied cells in `row`.
    pub fn column_count(&self, row: usize) -> usize {
        self.cells.keys().filter(|index| index.row == row).count()
    }

    /// Occupant of a cell, or `None` when unoccupied. Never panics.
    pub fn image_at(&self, index: CellIndex) -> Option<ImageId> {
        self.cells.get(&index).copied()
    }

    /// Cells in grid order (rows first, then columns).
    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, ImageId)> + '_ {
        self.cells.iter().map(|(index, id)| (*index, *id))
    }

    /// Insert `image` as a new single-cell row before `row`, shifting every
    /// row at or below the target down by one. A target past the end
    /// appends after the last row.
    pub fn insert_row_before(&mut self, row: usize, image: ImageId) {
        let row = row.min(self.row_count());

        let mut shifted = BTreeMap::new();
        for (index, id) in &self.cells {
            let target = if index.row >= row {
                CellIndex::new(index.row + 1, index.col)
            } else {
                *index
            };
            shifted.insert(target, *id);
        }
        shifted.insert(CellIndex::new(row, 0), image);
        self.cells = shifted;
    }

    /// Insert `image` into an existing row before `index.col`, shifting the
    /// rest of that row right by one. Other rows are untouched. A column
    /// past the end appends at the end of the row; a row past the end falls
    /// back to appending a new row.
    pub fn insert_cell_before(&mut self, index: CellIndex, image: ImageId) {
        if index.row >= self.row_count() {
            self.insert_row_before(self.row_count(), image);
            return;
        }
        let col = index.col.min(self.column_count(index.row));

        let mut shifted = BTreeMap::new();
        for (current, id) in &self.cells {
            let target = if current.row == index.row && current.col >= col {
                CellIndex::new(current.row, current.col + 1)
            } else {
                *current
            };
            shifted.insert(target, *id);
        }
        shifted.insert(CellIndex::new(index.row, col), image);
        self.cells = shifted;
    }

    /// Remove the occupant at `index`, closing the column gap in that row.
    /// Returns the removed image, or `None` when the cell was unoccupied.
    pub fn remove_cell(&mut self, index: CellIndex) -> Option<ImageId> {
        let removed = self.cells.remove(&index)?;

        let mut shifted = BTreeMap::new();
        for (current, id) in &self.cells {
            let target = if current.row == index.row && current.col > index.col {
                CellIndex::new(current.row, current.col - 1)
            } else {
                *current
            };
            shifted.insert(target, *id);
        }
        self.cells = shifted;
        Some(removed)
    }

    /// Remove every cell in `row`, shifting higher rows up by one. Returns
    /// how many cells were dropped.
    pub fn remove_row(&mut self, row: usize) -> usize {
        let mut shifted = BTreeMap::new();
        let mut dropped = 0;
        for (current, id) in &self.cells {
            if current.row == row {
                dropped += 1;
                continue;
            }
            let target = if current.row > row {
                CellIndex::new(current.row - 1, current.col)
            } else {
                *current
            };
            shifted.insert(target, *id);
        }
        self.cells = shifted;
        dropped
    }

    /// Drop every cell.
    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn img(n: u64) -> ImageId {
        ImageId(n)
    }

    fn assert_contiguous(grid: &GridModel) {
        for row in 0..grid.row_count() {
            let cols = grid.column_count(row);
            assert!(cols > 0, "row {row} is empty but inside row_count");
            for col in 0..cols {
                assert!(
                    grid.image_at(CellIndex::new(row, col)).is_some(),
                    "gap at ({row}, {col})"
                );
            }
        }
        let total: usize = (0..grid.row_count()).map(|r| grid.column_count(r)).sum();
        assert_eq!(total, grid.len(), "cells outside the contiguous range");
    }

    fn two_by_grid() -> GridModel {
        let mut grid = GridModel::new();
        grid.insert_row_before(0, img(1));
        grid.insert_cell_before(CellIndex::new(0, 1), img(2));
        grid.insert_row_before(1, img(3));
        grid
    }

    #[test]
    fn empty_grid_has_no_rows() {
        let grid = GridModel::new();
        assert_eq!(grid.row_count(), 0);
        assert_eq!(grid.column_count(0), 0);
        assert!(grid.image_at(CellIndex::new(0, 0)).is_none());
    }

    #[test]
    fn insert_row_shifts_rows_down() {
        let mut grid = two_by_grid();
        grid.insert_row_before(0, img(9));

        assert_eq!(grid.image_at(CellIndex::new(0, 0)), Some(img(9)));
        assert_eq!(grid.image_at(CellIndex::new(1, 0)), Some(img(1)));
        assert_eq!(grid.image_at(CellIndex::new(1, 1)), Some(img(2)));
        assert_eq!(grid.image_at(CellIndex::new(2, 0)), Some(img(3)));
        assert_contiguous(&grid);
    }

    #[test]
    fn insert_row_past_end_appends() {
        let mut grid = two_by_grid();
        grid.insert_row_before(10, img(9));
        assert_eq!(grid.image_at(CellIndex::new(2, 0)), Some(img(9)));
        assert_contiguous(&grid);
    }

    #[test]
    fn insert_cell_shifts_only_its_row() {
        let mut grid = two_by_grid();
        grid.insert_cell_before(CellIndex::new(0, 0), img(9));

        assert_eq!(grid.image_at(CellIndex::new(0, 0)), Some(img(9)));
        assert_eq!(grid.image_at(CellIndex::new(0, 1)), Some(img(1)));
        assert_eq!(grid.image_at(CellIndex::new(0, 2)), Some(img(2)));
        assert_eq!(grid.image_at(CellIndex::new(1, 0)), Some(img(3)));
        assert_contiguous(&grid);
    }

    #[test]
    fn remove_cell_closes_the_gap() {
        let mut grid = GridModel::new();
        grid.insert_row_before(0, img(1));
        grid.insert_cell_before(CellIndex::new(0, 1), img(2));
        grid.insert_cell_before(CellIndex::new(0, 2), img(3));

        let removed = grid.remove_cell(CellIndex::new(0, 1));
        assert_eq!(removed, Some(img(2)));
        assert_eq!(grid.image_at(CellIndex::new(0, 0)), Some(img(1)));
        assert_eq!(grid.image_at(CellIndex::new(0, 1)), Some(img(3)));
        assert_eq!(grid.column_count(0), 2);
        assert_contiguous(&grid);
    }

    #[test]
    fn remove_cell_on_vacant_cell_is_none() {
        let mut grid = two_by_grid();
        assert_eq!(grid.remove_cell(CellIndex::new(5, 5)), None);
        assert_eq!(grid.len(), 3);
    }

    #[test]
    fn remove_row_shifts_rows_up() {
        let mut grid = two_by_grid();
        assert_eq!(grid.remove_row(0), 2);
        assert_eq!(grid.row_count(), 1);
        assert_eq!(grid.image_at(CellIndex::new(0, 0)), Some(img(3)));
        assert_contiguous(&grid);
    }

    #[test]
    fn insert_row_then_remove_row_is_identity() {
        let before = two_by_grid();
        for row in 0..=before.row_count() {
            let mut grid = before.clone();
            grid.insert_row_before(row, img(42));
            grid.remove_row(row);
            assert_eq!(grid, before, "round trip through row {row}");
        }
    }

    #[test]
    fn iteration_is_row_major() {
        let grid = two_by_grid();
        let order: Vec<_> = grid.iter().map(|(index, _)| (index.row, index.col)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0)]);
    }
}
