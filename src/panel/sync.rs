//! Boundary between the grid model and the host's retained layout.
//!
//! Every grid mutation is mirrored to the host as exactly one structural
//! [`LayoutCommand`], followed by one full resize pass, in that order.
//! Size queries the host makes during the resize therefore always see
//! up-to-date item counts, and the data grid and the visual tree cannot
//! drift apart. The command stream doubles as a test artifact:
//! [`RecordingHost`] captures it verbatim.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::geometry::Size;
use crate::grid::{CellIndex, GridModel};
use crate::layout::RowDimensions;
use crate::panel::{Color, HighlightPen};
use crate::placement::HighlightLine;
use crate::catalog::ImageId;

/// Structural or sizing instruction for the host's layout tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutCommand {
    /// Insert a new row container holding `image` before `row`.
    InsertRow { row: usize, image: ImageId },
    /// Remove the row container at `row`.
    RemoveRow { row: usize },
    /// Insert an item for `image` before `index.col` in row `index.row`.
    InsertCell { index: CellIndex, image: ImageId },
    /// Remove the item at `index`.
    RemoveCell { index: CellIndex },
    /// Re-render the item at `index` at the given pixel size.
    ResizeCell { index: CellIndex, size: Size },
}

/// Rendering collaborator owned by the host.
///
/// Structural commands arrive in the same order the grid mutated; repaint
/// requests are advisory and may be coalesced by the host.
pub trait LayoutHost {
    fn apply(&mut self, command: LayoutCommand) -> Result<()>;
    fn fill_background(&mut self, color: Color) -> Result<()>;
    fn draw_highlight(&mut self, line: HighlightLine, pen: HighlightPen) -> Result<()>;
    fn request_repaint(&mut self);
}

/// Push a `ResizeCell` for every occupied cell, in grid order.
///
/// Returns how many commands were issued. Rows absent from the size table
/// (unknown lead image) are left untouched.
pub fn push_resize_pass(
    grid: &GridModel,
    sizes: &BTreeMap<usize, RowDimensions>,
    host: &mut impl LayoutHost,
) -> Result<usize> {
    let mut pushed = 0;
    for (index, _) in grid.iter() {
        let Some(dims) = sizes.get(&index.row) else {
            continue;
        };
        let columns = grid.column_count(index.row);
        host.apply(LayoutCommand::ResizeCell {
            index,
            size: dims.cell_at(index.col, columns),
        })?;
        pushed += 1;
    }
    Ok(pushed)
}

/// Host double that records everything it is told to do.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub commands: Vec<LayoutCommand>,
    pub highlights: Vec<HighlightLine>,
    pub background_fills: usize,
    pub repaints: usize,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands that change the layout tree's structure, resizes excluded.
    pub fn structural(&self) -> Vec<LayoutCommand> {
        self.commands
            .iter()
            .filter(|command| !matches!(command, LayoutCommand::ResizeCell { .. }))
            .copied()
            .collect()
    }

    pub fn resizes(&self) -> Vec<LayoutCommand> {
        self.commands
            .iter()
            .filter(|command| matches!(command, LayoutCommand::ResizeCell { .. }))
            .copied()
            .collect()
    }
}

impl LayoutHost for RecordingHost {
    fn apply(&mut self, command: LayoutCommand) -> Result<()> {
        self.commands.push(command);
        Ok(())
    }

    fn fill_background(&mut self, _color: Color) -> Result<()> {
        self.background_fills += 1;
        Ok(())
    }

    fn draw_highlight(&mut self, line: HighlightLine, _pen: HighlightPen) -> Result<()> {
        self.highlights.push(line);
        Ok(())
    }

    fn request_repaint(&mut self) {
        self.repaints += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ImageCatalog, ImageSource};
    use crate::layout::compute_row_sizes;

    #[test]
    fn resize_pass_covers_every_cell_in_grid_order() {
        let mut catalog = ImageCatalog::new();
        for id in 1..=3 {
            catalog.insert(ImageId(id), Size::new(100, 100));
        }
        let mut grid = GridModel::new();
        grid.insert_row_before(0, ImageId(1));
        grid.insert_cell_before(CellIndex::new(0, 1), ImageId(2));
        grid.insert_row_before(1, ImageId(3));

        let sizes = compute_row_sizes(&grid, &catalog, 210, 10);
        let mut host = RecordingHost::new();
        let pushed = push_resize_pass(&grid, &sizes, &mut host).unwrap();

        assert_eq!(pushed, 3);
        let order: Vec<_> = host
            .commands
            .iter()
            .map(|command| match command {
                LayoutCommand::ResizeCell { index, .. } => (index.row, index.col),
                other => panic!("unexpected command {other:?}"),
            })
            .collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0)]);
    }

    #[test]
    fn resize_pass_skips_rows_without_dimensions() {
        let mut catalog = ImageCatalog::new();
        catalog.insert(ImageId(1), Size::new(100, 100));
        assert!(!catalog.contains(ImageId(2)));

        let mut grid = GridModel::new();
        grid.insert_row_before(0, ImageId(1));
        grid.insert_row_before(1, ImageId(2));

        let sizes = compute_row_sizes(&grid, &catalog, 100, 0);
        let mut host = RecordingHost::new();
        let pushed = push_resize_pass(&grid, &sizes, &mut host).unwrap();
        assert_eq!(pushed, 1);
    }
}
