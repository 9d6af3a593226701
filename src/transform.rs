//! Projection from (time, value) data space onto a view's surface.

use crate::data_types::{from_millis, to_millis};
use crate::scales::ChartScale;
use crate::utils::PixelsExt;
use chrono::{DateTime, Utc};
use gpui::*;

#[derive(Clone, Debug)]
pub struct PlotTransform {
    pub x_scale: ChartScale,
    pub y_scale: ChartScale,
    /// Plot area in surface coordinates; scales map into its local space.
    pub bounds: Bounds<Pixels>,
}

impl PlotTransform {
    pub fn new(x_scale: ChartScale, y_scale: ChartScale, bounds: Bounds<Pixels>) -> Self {
        Self {
            x_scale,
            y_scale,
            bounds,
        }
    }

    pub fn data_to_screen(&self, t: DateTime<Utc>, value: f64) -> Point<Pixels> {
        Point::new(self.x_data_to_screen(t), self.y_data_to_screen(value))
    }

    pub fn screen_to_data(&self, point: Point<Pixels>) -> (DateTime<Utc>, f64) {
        (
            self.screen_to_time(point.x),
            self.y_scale
                .invert((point.y - self.bounds.origin.y).as_f32()),
        )
    }

    pub fn screen_to_time(&self, x: Pixels) -> DateTime<Utc> {
        from_millis(self.x_scale.invert((x - self.bounds.origin.x).as_f32()))
    }

    pub fn x_data_to_screen(&self, t: DateTime<Utc>) -> Pixels {
        self.bounds.origin.x + px(self.x_scale.map(to_millis(t)))
    }

    pub fn y_data_to_screen(&self, value: f64) -> Pixels {
        self.bounds.origin.y + px(self.y_scale.map(value))
    }
}
