use chrono_tz::Tz;
use eyre::{Result, WrapErr};
use gpui::{px, Bounds, Pixels, Point, Size};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum AxisFormat {
    #[default]
    Numeric,
    /// Millisecond timestamps rendered as dates.
    Time,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 20.0,
            left: 50.0,
        }
    }
}

/// Size and behaviour of one view. `width`/`height` are the outer surface
/// size; the plot area is what remains after the margins.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub width: f32,
    pub height: f32,
    pub margins: Margins,
    pub y_ticks: usize,
    pub time_zone: Tz,
    /// Allowed zoom factors relative to the full extent.
    pub scale_extent: (f64, f64),
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self::detail()
    }
}

impl ViewConfig {
    pub fn overview() -> Self {
        Self {
            width: 650.0,
            height: 100.0,
            margins: Margins::default(),
            y_ticks: 4,
            time_zone: Tz::UTC,
            scale_extent: (1.0, 4.0),
        }
    }

    pub fn detail() -> Self {
        Self {
            width: 650.0,
            height: 500.0,
            margins: Margins::default(),
            y_ticks: 10,
            time_zone: Tz::UTC,
            scale_extent: (1.0, 4.0),
        }
    }

    pub fn plot_width(&self) -> f32 {
        (self.width - self.margins.left - self.margins.right).max(0.0)
    }

    pub fn plot_height(&self) -> f32 {
        (self.height - self.margins.top - self.margins.bottom).max(0.0)
    }

    /// Plot area in surface coordinates.
    pub fn plot_bounds(&self) -> Bounds<Pixels> {
        Bounds::new(
            Point::new(px(self.margins.left), px(self.margins.top)),
            Size::new(px(self.plot_width()), px(self.plot_height())),
        )
    }

    /// Overlays a partial JSON document on `base`. Missing fields keep the
    /// values of `base`.
    pub fn from_json(json: &str, base: Self) -> Result<Self> {
        let patch: serde_json::Value =
            serde_json::from_str(json).wrap_err("view config is not valid JSON")?;
        let mut merged = serde_json::to_value(&base).wrap_err("failed to encode base config")?;
        merge_json(&mut merged, patch);
        serde_json::from_value(merged).wrap_err("view config has invalid fields")
    }
}

fn merge_json(target: &mut serde_json::Value, patch: serde_json::Value) {
    match (target, patch) {
        (serde_json::Value::Object(t), serde_json::Value::Object(p)) => {
            for (k, v) in p {
                match t.get_mut(&k) {
                    Some(existing) => merge_json(existing, v),
                    None => {
                        t.insert(k, v);
                    }
                }
            }
        }
        (t, p) => *t = p,
    }
}
