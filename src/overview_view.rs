//! Overview chart: the aggregate `total` series with a horizontal brush.

use crate::data_types::{
    from_millis, to_millis, AxisFormat, BrushState, Dataset, TimeWindow, ViewConfig,
};
use crate::error::{ChartError, ChartResult};
use crate::rendering::{paint_x_axis, paint_y_axis, AxisSpec, DrawCommand, Frame};
use crate::scales::ChartScale;
use crate::theme::ChartTheme;
use crate::transform::PlotTransform;
use crate::utils::{plot_x, PixelsExt};
use crate::view_controller::ViewController;
use chrono::{DateTime, Utc};
use gpui::*;
use std::rc::Rc;
use tracing::{debug, trace};

/// Name accepted by [`OverviewView::on`].
pub const RANGE_SELECTED: &str = "rangeSelected";

pub type RangeListener = Box<dyn FnMut(TimeWindow)>;

pub struct OverviewView {
    config: ViewConfig,
    theme: ChartTheme,
    dataset: Rc<Dataset>,
    full_extent: TimeWindow,
    transform: PlotTransform,

    brush: BrushState,
    /// Selector in plot pixels.
    selection: Option<(f32, f32)>,
    /// Time range the selector stands for. Kept alongside the pixels so a
    /// programmatic window reads back exactly.
    selected_window: Option<TimeWindow>,
    listener: Option<RangeListener>,
    frame: Frame,
}

impl OverviewView {
    pub fn new(config: ViewConfig) -> Self {
        let dataset = Rc::new(Dataset::empty());
        let full_extent = TimeWindow::instant(DateTime::<Utc>::default());
        let transform = Self::build_transform(&config, full_extent, 0.0);
        Self {
            config,
            theme: ChartTheme::default(),
            dataset,
            full_extent,
            transform,
            brush: BrushState::Idle,
            selection: None,
            selected_window: None,
            listener: None,
            frame: Frame::new(),
        }
    }

    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self
    }

    fn build_transform(config: &ViewConfig, extent: TimeWindow, max_total: f64) -> PlotTransform {
        let x_scale = ChartScale::new_time(extent, (0.0, config.plot_width()));
        let y_scale = ChartScale::new_linear((0.0, max_total), (config.plot_height(), 0.0));
        PlotTransform::new(x_scale, y_scale, config.plot_bounds())
    }

    /// Sizes the scales to `dataset` and redraws. Calling again with another
    /// dataset replaces the previous rendering; the selector keeps the part of
    /// its time range that the new extent still covers.
    pub fn render(&mut self, dataset: Rc<Dataset>) {
        self.full_extent = dataset
            .time_extent()
            .unwrap_or_else(|| TimeWindow::instant(DateTime::<Utc>::default()));
        self.transform = Self::build_transform(&self.config, self.full_extent, dataset.max_total());
        self.dataset = dataset;
        self.selected_window = self
            .selected_window
            .and_then(|w| w.clamp_to(self.full_extent));
        self.selection = self.selected_window.map(|w| self.window_to_pixels(w));
        debug!(
            observations = self.dataset.len(),
            extent = ?self.full_extent,
            "overview rendered"
        );
        self.redraw();
    }

    /// Registers the single range listener. Last registration wins.
    pub fn on_range_selected(&mut self, callback: impl FnMut(TimeWindow) + 'static) {
        self.listener = Some(Box::new(callback));
    }

    /// String-keyed form of [`Self::on_range_selected`].
    pub fn on(&mut self, event: &str, callback: impl FnMut(TimeWindow) + 'static) -> ChartResult<()> {
        match event {
            RANGE_SELECTED => {
                self.on_range_selected(callback);
                Ok(())
            }
            other => Err(ChartError::UnknownEvent(other.to_string())),
        }
    }

    /// Moves the selector to `window` without notifying the listener.
    /// A degenerate window selects the full extent.
    pub fn set_selection(&mut self, window: TimeWindow) {
        let window = window.or_full(self.full_extent);
        self.selection = Some(self.window_to_pixels(window));
        self.selected_window = Some(window);
        trace!(?window, "overview selection set programmatically");
        self.redraw();
    }

    pub fn pointer_down(&mut self, position: Point<Pixels>) {
        let plot = self.config.plot_bounds();
        if !plot.contains(&position) {
            return;
        }
        let x = plot_x(position, &plot);
        self.brush = ViewController::brush_press(self.selection, x);
        if let BrushState::Selecting { .. } = self.brush {
            self.set_selection_pixels(None);
        }
        trace!(x, brush = ?self.brush, "brush started");
        self.redraw();
    }

    /// Emits every non-degenerate intermediate selection while dragging.
    pub fn pointer_move(&mut self, position: Point<Pixels>) {
        if !self.brush.is_active() {
            return;
        }
        let plot = self.config.plot_bounds();
        let x = (position.x - plot.origin.x).as_f32();
        self.set_selection_pixels(ViewController::brush_drag(
            self.brush,
            x,
            self.config.plot_width(),
        ));
        self.redraw();

        if let Some(window) = self.non_degenerate_selection() {
            self.emit(window);
        }
    }

    /// Ends the gesture and fires exactly one final event. A zero-width
    /// selection counts as cleared and reports the full extent.
    pub fn pointer_up(&mut self, position: Point<Pixels>) {
        if !self.brush.is_active() {
            return;
        }
        let plot = self.config.plot_bounds();
        let x = (position.x - plot.origin.x).as_f32();
        self.set_selection_pixels(ViewController::brush_drag(
            self.brush,
            x,
            self.config.plot_width(),
        ));
        self.brush = BrushState::Idle;

        let window = match self.non_degenerate_selection() {
            Some(window) => window,
            None => {
                self.set_selection_pixels(None);
                debug!("brush cleared, selecting full extent");
                self.full_extent
            }
        };
        self.redraw();
        self.emit(window);
    }

    fn set_selection_pixels(&mut self, selection: Option<(f32, f32)>) {
        self.selection = selection;
        self.selected_window =
            selection.map(|(a, b)| TimeWindow::new(self.pixel_to_time(a), self.pixel_to_time(b)));
    }

    fn window_to_pixels(&self, window: TimeWindow) -> (f32, f32) {
        let width = self.config.plot_width();
        let a = self.time_to_pixel(window.start()).clamp(0.0, width);
        let b = self.time_to_pixel(window.end()).clamp(0.0, width);
        (a.min(b), a.max(b))
    }

    fn non_degenerate_selection(&self) -> Option<TimeWindow> {
        match self.selection {
            Some((a, b)) if b - a > f32::EPSILON => self.selected_window,
            _ => None,
        }
    }

    fn emit(&mut self, window: TimeWindow) {
        if let Some(listener) = self.listener.as_mut() {
            trace!(?window, "rangeSelected");
            listener(window);
        }
    }

    /// Plot-local pixel of `t`.
    pub fn time_to_pixel(&self, t: DateTime<Utc>) -> f32 {
        self.transform.x_scale.map(to_millis(t))
    }

    /// Time under plot-local pixel `x`.
    pub fn pixel_to_time(&self, x: f32) -> DateTime<Utc> {
        from_millis(self.transform.x_scale.invert(x))
    }

    /// Selector span in plot pixels.
    pub fn selection_pixels(&self) -> Option<(f32, f32)> {
        self.selection
    }

    pub fn selection_window(&self) -> Option<TimeWindow> {
        self.selected_window
    }

    pub fn is_dragging(&self) -> bool {
        self.brush.is_active()
    }

    pub fn full_extent(&self) -> TimeWindow {
        self.full_extent
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    fn redraw(&mut self) {
        let plot = self.config.plot_bounds();
        let t = &self.transform;
        let mut frame = Frame::new();

        if self.dataset.len() > 1 {
            let baseline = t.y_data_to_screen(0.0);
            let mut upper = Vec::with_capacity(self.dataset.len());
            let mut lower = Vec::with_capacity(self.dataset.len());
            for obs in self.dataset.observations() {
                let x = t.x_data_to_screen(obs.timestamp());
                upper.push(point(x, t.y_data_to_screen(obs.total())));
                lower.push(point(x, baseline));
            }
            frame.push(DrawCommand::Area {
                key: None,
                upper,
                lower,
                color: self.theme.overview_fill,
            });
        }

        paint_x_axis(
            &mut frame,
            plot,
            AxisSpec {
                scale: &t.x_scale,
                format: AxisFormat::Time,
                ticks: 10,
                tz: self.config.time_zone,
            },
            &self.theme,
        );
        paint_y_axis(
            &mut frame,
            plot,
            AxisSpec {
                scale: &t.y_scale,
                format: AxisFormat::Numeric,
                ticks: self.config.y_ticks,
                tz: self.config.time_zone,
            },
            &self.theme,
        );

        if let Some((a, b)) = self.selection {
            if b > a {
                frame.push(DrawCommand::Rect {
                    bounds: Bounds::new(
                        point(plot.origin.x + px(a), plot.origin.y),
                        size(px(b - a), plot.size.height),
                    ),
                    fill: self.theme.brush_fill,
                    border: Some(self.theme.brush_border),
                });
            }
        }

        self.frame = frame;
    }
}

impl Default for OverviewView {
    fn default() -> Self {
        Self::new(ViewConfig::overview())
    }
}
