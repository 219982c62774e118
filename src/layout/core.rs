use std::collections::BTreeMap;

use crate::catalog::ImageSource;
use crate::geometry::Size;
use crate::grid::{CellIndex, GridModel};

/// Derived pixel dimensions for one grid row.
///
/// Every cell in the row renders at `cell`, except the final cell which
/// renders at `last`: integer division leaves remainder pixels and the
/// last cell absorbs them so the row fills its target width exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowDimensions {
    pub cell: Size,
    pub last: Size,
}

impl RowDimensions {
    /// Rendered size of the cell at `col` in a row of `columns` cells.
    pub fn cell_at(&self, col: usize, columns: usize) -> Size {
        if columns > 0 && col + 1 == columns {
            self.last
        } else {
            self.cell
        }
    }

    /// Total width of the row including inter-cell spacing.
    pub fn row_width(&self, columns: usize, spacing: i32) -> i32 {
        if columns == 0 {
            return 0;
        }
        let cells = self.cell.width * (columns as i32 - 1) + self.last.width;
        cells + spacing * (columns as i32 - 1)
    }
}

/// Compute per-row cell dimensions for the whole grid.
///
/// Each row with `k` cells shares `target_width - (k - 1) * spacing`
/// pixels, split evenly with the remainder going to the last cell. Row
/// height follows the aspect ratio of the row's first image. A
/// `target_width` of zero means auto: the first image's native width
/// becomes the shared reference width so rows with different column
/// counts still align.
///
/// Rows whose leading image is unknown to the source are omitted from the
/// result; the caller decides whether that deserves a warning. An empty
/// grid yields an empty map.
pub fn compute_row_sizes(
    grid: &GridModel,
    source: &dyn ImageSource,
    target_width: i32,
    spacing: i32,
) -> BTreeMap<usize, RowDimensions> {
    let mut sizes = BTreeMap::new();
    if grid.is_empty() {
        return sizes;
    }

    let auto_width = if target_width > 0 {
        None
    } else {
        // Shared minimum width comes from the first image in grid order.
        match grid.iter().next().and_then(|(_, id)| source.native_size(id)) {
            Some(native) => Some(native.width),
            None => return sizes,
        }
    };

    for row in 0..grid.row_count() {
        let columns = grid.column_count(row);
        if columns == 0 {
            continue;
        }
        let Some(lead) = grid.image_at(CellIndex::new(row, 0)) else {
            continue;
        };
        let Some(native) = source.native_size(lead) else {
            continue;
        };

        let row_target = auto_width.unwrap_or(target_width);
        let available = row_target - (columns as i32 - 1) * spacing;
        let width = (available / columns as i32).max(1);
        let remainder = (available - width * columns as i32).max(0);
        let height = scale_height(native, width);

        sizes.insert(
            row,
            RowDimensions {
                cell: Size::new(width, height),
                last: Size::new(width + remainder, height),
            },
        );
    }

    sizes
}

fn scale_height(native: Size, width: i32) -> i32 {
    let ratio = native.height as f64 / native.width.max(1) as f64;
    ((ratio * width as f64).round() as i32).max(1)
}
