//! Detail chart: stacked bands with horizontal zoom/pan and series isolation.

use crate::data_types::{
    AxisFormat, Dataset, PanDrag, SelectionState, TimeWindow, ViewConfig, WindowChange,
};
use crate::error::{ChartError, ChartResult};
use crate::rendering::{paint_x_axis, paint_y_axis, AxisSpec, DrawCommand, Frame, TextAnchor};
use crate::scales::ChartScale;
use crate::stack::{StackEngine, StackedBand};
use crate::theme::ChartTheme;
use crate::transform::PlotTransform;
use crate::utils::PixelsExt;
use crate::view_controller::{ViewController, ZoomConstraints, ZoomGesture, ZoomTransform};
use chrono::{DateTime, Utc};
use gpui::*;
use std::rc::Rc;
use tracing::{debug, trace, warn};

/// Name accepted by [`DetailView::on`].
pub const WINDOW_CHANGED: &str = "windowChanged";

/// Pointer travel below which a press/release pair counts as a click.
const CLICK_SLOP: f32 = 3.0;

/// Wheel sensitivity, in scale doublings per pixel.
const WHEEL_SENSITIVITY: f32 = 0.002;

/// Where the hovered series name is drawn, in surface coordinates.
const LABEL_ORIGIN: (f32, f32) = (60.0, 30.0);

pub type WindowListener = Box<dyn FnMut(TimeWindow)>;

pub struct DetailView {
    config: ViewConfig,
    theme: ChartTheme,
    dataset: Option<Rc<Dataset>>,
    full_extent: TimeWindow,

    /// Window set by a zoom step or a setter. `None` shows the full extent.
    window: Option<TimeWindow>,
    zoom: ZoomTransform,
    selection: SelectionState,
    hovered: Option<String>,
    drag: Option<PanDrag>,

    bands: Vec<StackedBand>,
    transform: PlotTransform,
    listener: Option<WindowListener>,
    last_change: Option<WindowChange>,
    frame: Frame,
}

impl DetailView {
    pub fn new(config: ViewConfig) -> Self {
        let full_extent = TimeWindow::instant(DateTime::<Utc>::default());
        let transform = Self::build_transform(&config, full_extent, 0.0);
        Self {
            config,
            theme: ChartTheme::default(),
            dataset: None,
            full_extent,
            window: None,
            zoom: ZoomTransform::IDENTITY,
            selection: SelectionState::All,
            hovered: None,
            drag: None,
            bands: Vec::new(),
            transform,
            listener: None,
            last_change: None,
            frame: Frame::new(),
        }
    }

    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self
    }

    fn build_transform(config: &ViewConfig, window: TimeWindow, y_max: f64) -> PlotTransform {
        let x_scale = ChartScale::new_time(window, (0.0, config.plot_width()));
        let y_scale = ChartScale::new_linear((0.0, y_max), (config.plot_height(), 0.0));
        PlotTransform::new(x_scale, y_scale, config.plot_bounds())
    }

    /// Stores `dataset`, stacks the active keys and redraws.
    ///
    /// On a stacking error nothing is changed: the previous dataset, bands and
    /// frame stay in place.
    pub fn render(&mut self, dataset: Rc<Dataset>) -> ChartResult<()> {
        let keys = self.selection.active_keys(&dataset);
        let bands = StackEngine::compute_stack(&dataset, &keys)?;

        self.full_extent = dataset
            .time_extent()
            .unwrap_or_else(|| TimeWindow::instant(DateTime::<Utc>::default()));
        self.window = self.window.and_then(|w| w.clamp_to(self.full_extent));
        self.zoom = match self.window {
            Some(window) => ZoomTransform::from_window(window, self.full_extent, self.width()),
            None => ZoomTransform::IDENTITY,
        };
        self.dataset = Some(dataset);
        self.bands = bands;
        debug!(
            bands = self.bands.len(),
            window = ?self.window,
            "detail rendered"
        );
        self.redraw();
        Ok(())
    }

    /// Registers the single window listener. Last registration wins.
    pub fn on_visible_window_changed(&mut self, callback: impl FnMut(TimeWindow) + 'static) {
        self.listener = Some(Box::new(callback));
    }

    /// String-keyed form of [`Self::on_visible_window_changed`].
    pub fn on(&mut self, event: &str, callback: impl FnMut(TimeWindow) + 'static) -> ChartResult<()> {
        match event {
            WINDOW_CHANGED => {
                self.on_visible_window_changed(callback);
                Ok(())
            }
            other => Err(ChartError::UnknownEvent(other.to_string())),
        }
    }

    /// Forces the visible window without notifying the listener. The zoom
    /// transform is rebuilt from `window` so later gestures continue from it.
    pub fn set_visible_window(&mut self, window: TimeWindow) -> ChartResult<()> {
        self.apply_window(WindowChange::programmatic(window))
    }

    fn apply_window(&mut self, change: WindowChange) -> ChartResult<()> {
        let window = match self.dataset {
            Some(_) => change.window.or_full(self.full_extent),
            // Clipped once a dataset arrives.
            None => change.window,
        };
        self.window = Some(window);
        if !change.should_notify() {
            self.zoom = ZoomTransform::from_window(window, self.full_extent, self.width());
        }
        self.last_change = Some(WindowChange { window, ..change });
        self.restack()?;

        if change.should_notify() {
            if let Some(listener) = self.listener.as_mut() {
                trace!(?window, "windowChanged");
                listener(window);
            }
        }
        Ok(())
    }

    /// Applies one user zoom/pan step and notifies the listener.
    pub fn zoom(&mut self, gesture: ZoomGesture) -> ChartResult<()> {
        if self.dataset.is_none() || self.full_extent.is_degenerate() {
            return Ok(());
        }
        let constraints = ZoomConstraints {
            scale_extent: self.config.scale_extent,
            width: self.width(),
        };
        self.zoom = ViewController::apply_gesture(self.zoom, gesture, &constraints);
        let window = self.zoom.visible_window(self.full_extent, self.width());
        trace!(?gesture, k = self.zoom.k, x = self.zoom.x, "zoom step");
        self.apply_window(WindowChange::user(window))
    }

    /// Wheel zoom anchored at the pointer. Positive `delta_y` zooms out.
    pub fn scroll(&mut self, position: Point<Pixels>, delta_y: f32) -> ChartResult<()> {
        let plot = self.config.plot_bounds();
        if !plot.contains(&position) || delta_y == 0.0 {
            return Ok(());
        }
        let factor = ViewController::compute_zoom_factor(delta_y, WHEEL_SENSITIVITY);
        let pivot = (position.x - plot.origin.x).as_f32() as f64;
        self.zoom(ZoomGesture::Scale { factor, pivot })
    }

    pub fn pointer_down(&mut self, position: Point<Pixels>) {
        if !self.config.plot_bounds().contains(&position) {
            return;
        }
        let (x, y) = (position.x.as_f32(), position.y.as_f32());
        self.drag = Some(PanDrag {
            press_x: x,
            press_y: y,
            last_x: x,
            last_y: y,
            panning: false,
        });
    }

    /// Pans while a drag is active, otherwise updates the hover label.
    /// Panning starts only once the pointer leaves the click slop.
    pub fn pointer_moved(&mut self, position: Point<Pixels>) -> ChartResult<()> {
        if let Some(drag) = self.drag.as_mut() {
            let (x, y) = (position.x.as_f32(), position.y.as_f32());
            if !drag.panning {
                if (x - drag.press_x).abs() + (y - drag.press_y).abs() < CLICK_SLOP {
                    return Ok(());
                }
                drag.panning = true;
            }
            let dx = x - drag.last_x;
            let dy = y - drag.last_y;
            drag.last_x = x;
            drag.last_y = y;
            if dx != 0.0 {
                return self.zoom(ZoomGesture::Pan {
                    dx: dx as f64,
                    dy: dy as f64,
                });
            }
            return Ok(());
        }

        let hovered = self.hit_test(position);
        if hovered != self.hovered {
            self.hovered = hovered;
            self.redraw();
        }
        Ok(())
    }

    /// Ends a drag. A release before panning started is a click on the band below.
    pub fn pointer_up(&mut self, position: Point<Pixels>) -> ChartResult<()> {
        match self.drag.take() {
            Some(drag) if !drag.panning => self.click(position),
            _ => Ok(()),
        }
    }

    pub fn pointer_left(&mut self) {
        if self.hovered.take().is_some() {
            self.redraw();
        }
    }

    pub fn click(&mut self, position: Point<Pixels>) -> ChartResult<()> {
        match self.hit_test(position) {
            Some(key) => self.toggle_series(&key),
            None => Ok(()),
        }
    }

    /// Isolates `key`, or restores all series if it is already isolated.
    pub fn toggle_series(&mut self, key: &str) -> ChartResult<()> {
        let previous = self.selection.clone();
        self.selection.toggle(key);
        debug!(selected = ?self.selection.selected(), "series selection toggled");
        if let Err(err) = self.restack() {
            warn!(%err, "restack failed, keeping previous selection");
            self.selection = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Key of the band under `position`, if any.
    pub fn hit_test(&self, position: Point<Pixels>) -> Option<String> {
        if !self.config.plot_bounds().contains(&position) {
            return None;
        }
        let (t, value) = self.transform.screen_to_data(position);
        self.bands.iter().find_map(|band| match band.bounds_at(t) {
            Some((lower, upper)) if upper > lower && lower <= value && value <= upper => {
                Some(band.key.clone())
            }
            _ => None,
        })
    }

    fn restack(&mut self) -> ChartResult<()> {
        let Some(dataset) = self.dataset.clone() else {
            return Ok(());
        };
        let keys = self.selection.active_keys(&dataset);
        self.bands = StackEngine::compute_stack(&dataset, &keys)?;
        self.redraw();
        Ok(())
    }

    fn width(&self) -> f64 {
        self.config.plot_width() as f64
    }

    /// Displayed window, `None` before the first render.
    pub fn visible_window(&self) -> Option<TimeWindow> {
        self.dataset
            .as_ref()
            .map(|_| self.window.unwrap_or(self.full_extent))
    }

    pub fn full_extent(&self) -> TimeWindow {
        self.full_extent
    }

    pub fn zoom_transform(&self) -> ZoomTransform {
        self.zoom
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn bands(&self) -> &[StackedBand] {
        &self.bands
    }

    /// Most recent window change with its origin.
    pub fn last_change(&self) -> Option<WindowChange> {
        self.last_change
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Plot-local pixel of `t` under the current window.
    pub fn time_to_pixel(&self, t: DateTime<Utc>) -> f32 {
        (self.transform.x_data_to_screen(t) - self.transform.bounds.origin.x).as_f32()
    }

    fn redraw(&mut self) {
        let window = self.window.unwrap_or(self.full_extent);
        let y_max = StackEngine::stack_max(&self.bands);
        self.transform = Self::build_transform(&self.config, window, y_max);

        let plot = self.config.plot_bounds();
        let t = &self.transform;
        let mut frame = Frame::new();

        let dataset = self.dataset.as_deref();
        let theme = &self.theme;
        let bands = &self.bands;
        frame.clip(plot, |clip| {
            for band in bands {
                let points = band.clipped_to(window);
                if points.len() < 2 {
                    continue;
                }
                let color_index = dataset.and_then(|d| d.key_index(&band.key)).unwrap_or(0);
                clip.push(DrawCommand::Area {
                    key: Some(band.key.clone()),
                    upper: points
                        .iter()
                        .map(|p| t.data_to_screen(p.timestamp, p.upper))
                        .collect(),
                    lower: points
                        .iter()
                        .map(|p| t.data_to_screen(p.timestamp, p.lower))
                        .collect(),
                    color: theme.series_color(color_index),
                });
            }
        });

        paint_x_axis(
            &mut frame,
            plot,
            AxisSpec {
                scale: &t.x_scale,
                format: AxisFormat::Time,
                ticks: 10,
                tz: self.config.time_zone,
            },
            theme,
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
            theme,
        );

        if let Some(key) = &self.hovered {
            frame.push(DrawCommand::Text {
                origin: point(px(LABEL_ORIGIN.0), px(LABEL_ORIGIN.1)),
                text: key.clone(),
                color: theme.tooltip_text,
                size: theme.tooltip_size,
                anchor: TextAnchor::Start,
            });
        }

        self.frame = frame;
    }
}

impl Default for DetailView {
    fn default() -> Self {
        Self::new(ViewConfig::detail())
    }
}
