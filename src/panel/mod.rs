//! Gallery panel runtime.
//!
//! [`GalleryPanel`] owns the grid, the drag state and the derived row-size
//! table, and turns inbound drag/drop/pointer notifications into grid
//! mutations plus [`LayoutCommand`](sync::LayoutCommand) streams for the
//! host. All methods run on the host's event thread; events are handled
//! strictly in delivery order and nothing blocks.

pub mod sync;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::catalog::{ImageId, ImageSource};
use crate::error::Result;
use crate::geometry::Point;
use crate::grid::{CellIndex, GridModel};
use crate::layout::{RowDimensions, compute_row_sizes};
use crate::logging::{LogEvent, LogLevel, Logger, json_kv};
use crate::metrics::{MetricSnapshot, PanelMetrics};
use crate::placement::{GridGeometry, Placement, hit_test, preview, resolve};
use self::sync::{LayoutCommand, LayoutHost, push_resize_pass};

const PANEL_TARGET: &str = "imgrid::panel";
const METRICS_TARGET: &str = "imgrid::panel.metrics";

/// RGB colour handed to the host for fills and pens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLUE: Self = Self { r: 0, g: 0, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Pen used for the drop-preview line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightPen {
    pub color: Color,
    pub width: i32,
}

impl Default for HighlightPen {
    fn default() -> Self {
        Self {
            color: Color::BLUE,
            width: 1,
        }
    }
}

/// Panel configuration.
///
/// `target_width` of zero means auto: rows align on the first image's
/// native width instead of a fixed panel width. `background` of `None`
/// means transparent, no fill is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelConfig {
    pub spacing: i32,
    pub target_width: i32,
    pub highlight: HighlightPen,
    pub background: Option<Color>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            spacing: 10,
            target_width: 0,
            highlight: HighlightPen::default(),
            background: None,
        }
    }
}

/// Drag lifecycle owned by the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// A drag is in progress. The position stays `None` until the first
    /// move notification arrives.
    Tracking { position: Option<Point> },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Tracking { .. })
    }
}

/// Drag-and-drop gallery panel.
pub struct GalleryPanel<S: ImageSource> {
    source: S,
    grid: GridModel,
    sizes: BTreeMap<usize, RowDimensions>,
    drag: DragState,
    config: PanelConfig,
    logger: Option<Logger>,
    metrics: Option<Arc<Mutex<PanelMetrics>>>,
    started: Instant,
}

impl<S: ImageSource> GalleryPanel<S> {
    /// Build a panel over an externally owned image source.
    ///
    /// Negative spacing or target width in the initial config is clamped
    /// to the defaults; later setter calls reject bad values with a
    /// warning instead.
    pub fn new(source: S, mut config: PanelConfig) -> Self {
        if config.spacing < 0 {
            config.spacing = PanelConfig::default().spacing;
        }
        if config.target_width < 0 {
            config.target_width = 0;
        }
        Self {
            source,
            grid: GridModel::new(),
            sizes: BTreeMap::new(),
            drag: DragState::Idle,
            config,
            logger: None,
            metrics: None,
            started: Instant::now(),
        }
    }

    pub fn set_logger(&mut self, logger: Logger) {
        self.logger = Some(logger);
    }

    /// Switch on activity counters if they are not already enabled.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(PanelMetrics::new())));
        }
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<PanelMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn row_sizes(&self) -> &BTreeMap<usize, RowDimensions> {
        &self.sizes
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Occupant of a cell, or `None` when unoccupied.
    pub fn image_at(&self, index: CellIndex) -> Option<ImageId> {
        self.grid.image_at(index)
    }

    /// A drag entered the panel. Tracking starts with no known position.
    pub fn drag_enter(&mut self) {
        self.drag = DragState::Tracking { position: None };
        self.record(PanelMetrics::record_drag);
        self.log(LogLevel::Debug, "drag_entered", []);
    }

    /// The dragged cursor moved; remember the position and ask for a
    /// repaint so the host re-queries the preview highlight.
    pub fn drag_move(&mut self, position: Point, host: &mut impl LayoutHost) {
        self.drag = DragState::Tracking {
            position: Some(position),
        };
        host.request_repaint();
    }

    /// The drag left the panel: unconditional cancellation, whatever stage
    /// the drop was in.
    pub fn drag_leave(&mut self, host: &mut impl LayoutHost) {
        if self.drag.is_dragging() {
            self.record(PanelMetrics::record_cancel);
            self.log(LogLevel::Debug, "drag_cancelled", []);
        }
        self.drag = DragState::Idle;
        host.request_repaint();
    }

    /// Drop the dragged image at the last tracked position.
    ///
    /// An image unknown to the source is rejected with a warning and no
    /// mutation. A drop that never saw a move event places at the origin,
    /// which resolves to the top of the grid.
    pub fn drop_image(&mut self, image: ImageId, host: &mut impl LayoutHost) -> Result<()> {
        let position = match self.drag {
            DragState::Tracking { position } => position.unwrap_or_default(),
            DragState::Idle => {
                self.warn("drop_without_drag", [json_kv("image", json!(image.0))]);
                Point::default()
            }
        };
        self.drag = DragState::Idle;

        if !self.source.contains(image) {
            self.warn("drop_rejected_unknown_image", [json_kv("image", json!(image.0))]);
            self.record(PanelMetrics::record_rejected);
            host.request_repaint();
            return Ok(());
        }

        let placement = resolve(position, &self.geometry());
        let structural = match placement {
            Placement::Row(row) => {
                let row = row.min(self.grid.row_count());
                self.grid.insert_row_before(row, image);
                LayoutCommand::InsertRow { row, image }
            }
            Placement::Cell(index) => {
                self.grid.insert_cell_before(index, image);
                LayoutCommand::InsertCell { index, image }
            }
        };
        host.apply(structural)?;
        self.relayout(host)?;

        self.record(PanelMetrics::record_drop);
        self.log(
            LogLevel::Info,
            "image_dropped",
            [
                json_kv("image", json!(image.0)),
                json_kv("placement", json!(format!("{placement:?}"))),
            ],
        );
        host.request_repaint();
        Ok(())
    }

    /// Click-to-delete: remove the cell under the pointer if one is hit.
    /// Removing a row's last cell removes the row container as well, so
    /// row numbering stays contiguous.
    pub fn pointer_press(&mut self, position: Point, host: &mut impl LayoutHost) -> Result<()> {
        let Some(index) = hit_test(position, &self.geometry()) else {
            return Ok(());
        };

        self.grid.remove_cell(index);
        if self.grid.column_count(index.row) == 0 {
            self.grid.remove_row(index.row);
            host.apply(LayoutCommand::RemoveRow { row: index.row })?;
        } else {
            host.apply(LayoutCommand::RemoveCell { index })?;
        }
        self.relayout(host)?;

        self.record(PanelMetrics::record_removal);
        self.log(
            LogLevel::Info,
            "cell_removed",
            [
                json_kv("row", json!(index.row)),
                json_kv("col", json!(index.col)),
            ],
        );
        host.request_repaint();
        Ok(())
    }

    /// Paint pass: background fill when configured, then the drop-preview
    /// line while a drag with a known position is active.
    pub fn paint(&self, host: &mut impl LayoutHost) -> Result<()> {
        if let Some(background) = self.config.background {
            host.fill_background(background)?;
        }
        if let DragState::Tracking {
            position: Some(position),
        } = self.drag
        {
            let line = preview(position, &self.geometry());
            host.draw_highlight(line, self.config.highlight)?;
        }
        Ok(())
    }

    /// Change inter-item spacing at runtime. Negative values are rejected
    /// with a warning and no re-layout happens.
    pub fn set_spacing(&mut self, spacing: i32, host: &mut impl LayoutHost) -> Result<()> {
        if spacing < 0 {
            self.warn("invalid_spacing", [json_kv("spacing", json!(spacing))]);
            return Ok(());
        }
        if spacing == self.config.spacing {
            return Ok(());
        }
        self.config.spacing = spacing;
        self.relayout(host)?;
        host.request_repaint();
        Ok(())
    }

    /// Change the panel target width. Zero switches to auto width;
    /// negative values are rejected with a warning.
    pub fn set_target_width(&mut self, width: i32, host: &mut impl LayoutHost) -> Result<()> {
        if width < 0 {
            self.warn("invalid_target_width", [json_kv("width", json!(width))]);
            return Ok(());
        }
        if width == self.config.target_width {
            return Ok(());
        }
        self.config.target_width = width;
        self.relayout(host)?;
        host.request_repaint();
        Ok(())
    }

    /// Empty the panel, removing row containers from the bottom up.
    pub fn clear(&mut self, host: &mut impl LayoutHost) -> Result<()> {
        for row in (0..self.grid.row_count()).rev() {
            host.apply(LayoutCommand::RemoveRow { row })?;
            self.record(PanelMetrics::record_removal);
        }
        self.grid.clear();
        self.sizes.clear();
        host.request_repaint();
        Ok(())
    }

    /// Emit a metrics snapshot through the logger, if both are configured.
    pub fn emit_metrics(&self) -> Option<MetricSnapshot> {
        let metrics = self.metrics.as_ref()?;
        let snapshot = metrics
            .lock()
            .ok()?
            .snapshot(self.started.elapsed());
        if let Some(logger) = self.logger.as_ref() {
            let _ = logger.log_event(snapshot.to_log_event(METRICS_TARGET));
        }
        Some(snapshot)
    }

    fn geometry(&self) -> GridGeometry<'_> {
        GridGeometry::new(
            &self.grid,
            &self.sizes,
            self.config.spacing,
            self.config.target_width,
        )
    }

    /// Recompute the row-size table and push one full resize pass.
    fn relayout(&mut self, host: &mut impl LayoutHost) -> Result<()> {
        self.sizes = compute_row_sizes(
            &self.grid,
            &self.source,
            self.config.target_width,
            self.config.spacing,
        );
        for row in 0..self.grid.row_count() {
            if self.grid.column_count(row) > 0 && !self.sizes.contains_key(&row) {
                self.warn("row_size_unavailable", [json_kv("row", json!(row))]);
            }
        }
        push_resize_pass(&self.grid, &self.sizes, host)?;
        self.record(PanelMetrics::record_relayout);
        Ok(())
    }

    fn record(&self, update: impl FnOnce(&mut PanelMetrics)) {
        if let Some(metrics) = self.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                update(&mut guard);
            }
        }
    }

    fn warn(&self, message: &str, fields: impl IntoIterator<Item = (String, Value)>) {
        if let Some(logger) = self.logger.as_ref() {
            logger.warn(PANEL_TARGET, message, fields);
        }
    }

    fn log(
        &self,
        level: LogLevel,
        message: &str,
        fields: impl IntoIterator<Item = (String, Value)>,
    ) {
        if let Some(logger) = self.logger.as_ref() {
            let _ = logger.log_event(LogEvent::with_fields(level, PANEL_TARGET, message, fields));
        }
    }
}
