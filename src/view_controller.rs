use crate::data_types::{BrushState, TimeWindow};

/// Horizontal zoom/pan state relative to the full extent, in plot pixels.
///
/// A base point `p` in `[0, width]` is displayed at `p * k + x`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    pub const IDENTITY: Self = Self { k: 1.0, x: 0.0 };

    /// The time window this transform displays when the full extent spans
    /// `width` pixels.
    pub fn visible_window(&self, full: TimeWindow, width: f64) -> TimeWindow {
        if width <= 0.0 || self.k <= 0.0 {
            return full;
        }
        let (f0, f1) = full.as_millis();
        let to_time = |screen: f64| {
            let base = (screen - self.x) / self.k;
            f0 + (f1 - f0) * base / width
        };
        TimeWindow::from_millis(to_time(0.0), to_time(width))
    }

    /// The transform under which `window` fills the plot exactly.
    pub fn from_window(window: TimeWindow, full: TimeWindow, width: f64) -> Self {
        let (f0, f1) = full.as_millis();
        let (w0, w1) = window.as_millis();
        if width <= 0.0 || f1 <= f0 || w1 <= w0 {
            return Self::IDENTITY;
        }
        let k = (f1 - f0) / (w1 - w0);
        let x = -k * (w0 - f0) / (f1 - f0) * width;
        Self { k, x }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoomGesture {
    /// Multiply the current scale by `factor`, keeping plot pixel `pivot` fixed.
    Scale { factor: f64, pivot: f64 },
    /// Translate by a pointer delta. Only `dx` is honoured.
    Pan { dx: f64, dy: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomConstraints {
    pub scale_extent: (f64, f64),
    pub width: f64,
}

/// ViewController holds the pure interaction logic (zoom, pan, brushing)
/// independently of the GPUI infrastructure to facilitate testing.
pub struct ViewController;

impl ViewController {
    /// Applies one zoom/pan step.
    ///
    /// The scale is clamped to `scale_extent`, widened to include the current
    /// scale so that a window forced outside the extent is not snapped back by
    /// the next gesture. The translation keeps the view inside the full extent.
    pub fn apply_gesture(
        current: ZoomTransform,
        gesture: ZoomGesture,
        constraints: &ZoomConstraints,
    ) -> ZoomTransform {
        let next = match gesture {
            ZoomGesture::Scale { factor, pivot } => {
                if !factor.is_finite() || factor <= 0.0 {
                    return current;
                }
                let (lo, hi) = constraints.scale_extent;
                let lo = lo.min(current.k);
                let hi = hi.max(current.k);
                let k = (current.k * factor).clamp(lo, hi);
                let base = (pivot - current.x) / current.k;
                ZoomTransform { k, x: pivot - base * k }
            }
            ZoomGesture::Pan { dx, dy: _ } => ZoomTransform {
                k: current.k,
                x: current.x + dx,
            },
        };
        Self::constrain(next, constraints.width)
    }

    /// Keeps `[0, width]` of the display covered by the base extent.
    pub fn constrain(t: ZoomTransform, width: f64) -> ZoomTransform {
        let bound = width * (1.0 - t.k);
        let (min_x, max_x) = if bound <= 0.0 { (bound, 0.0) } else { (0.0, bound) };
        ZoomTransform {
            k: t.k,
            x: t.x.clamp(min_x, max_x),
        }
    }

    /// Converts a wheel delta into a scale factor. Scrolling up zooms in.
    pub fn compute_zoom_factor(delta: f32, sensitivity: f32) -> f64 {
        2f64.powf(-(delta as f64) * sensitivity as f64)
    }

    /// Starts a brush gesture at plot pixel `x`. Pressing inside the current
    /// selection moves it; anywhere else starts a new one.
    pub fn brush_press(selection: Option<(f32, f32)>, x: f32) -> BrushState {
        match selection {
            Some((a, b)) if b > a && (a..=b).contains(&x) => BrushState::Moving {
                grab_offset: x - a,
                width: b - a,
            },
            _ => BrushState::Selecting { anchor: x },
        }
    }

    /// Selection produced by dragging to plot pixel `x` in a plot of `width`.
    pub fn brush_drag(state: BrushState, x: f32, width: f32) -> Option<(f32, f32)> {
        let x = x.clamp(0.0, width);
        match state {
            BrushState::Idle => None,
            BrushState::Selecting { anchor } => Some((anchor.min(x), anchor.max(x))),
            BrushState::Moving {
                grab_offset,
                width: sel_width,
            } => {
                let left = (x - grab_offset).clamp(0.0, (width - sel_width).max(0.0));
                Some((left, left + sel_width))
            }
        }
    }
}
