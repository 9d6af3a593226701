use gpui::{Bounds, Pixels, Point};

pub mod date_formatter;

pub trait PixelsExt {
    fn as_f32(&self) -> f32;
}

impl PixelsExt for Pixels {
    fn as_f32(&self) -> f32 {
        f32::from(*self)
    }
}

/// Window position relative to the top-left corner of `bounds`.
pub fn to_local(position: Point<Pixels>, bounds: &Bounds<Pixels>) -> Point<Pixels> {
    position - bounds.origin
}

/// Horizontal offset from the plot's left edge, clamped to the plot.
pub fn plot_x(position: Point<Pixels>, plot: &Bounds<Pixels>) -> f32 {
    (position.x - plot.origin.x)
        .as_f32()
        .clamp(0.0, plot.size.width.as_f32())
}
