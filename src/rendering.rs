// Display list shared by the views and the GPUI painter.

use crate::data_types::AxisFormat;
use crate::scales::ChartScale;
use crate::theme::ChartTheme;
use crate::utils::PixelsExt;
use chrono_tz::Tz;
use gpui::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// One drawing primitive, in surface coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Closed region between `upper` (left to right) and `lower` (left to right).
    Area {
        key: Option<String>,
        upper: Vec<Point<Pixels>>,
        lower: Vec<Point<Pixels>>,
        color: Hsla,
    },
    Line {
        from: Point<Pixels>,
        to: Point<Pixels>,
        color: Hsla,
        width: Pixels,
    },
    Rect {
        bounds: Bounds<Pixels>,
        fill: Hsla,
        border: Option<Hsla>,
    },
    Text {
        origin: Point<Pixels>,
        text: String,
        color: Hsla,
        size: Pixels,
        anchor: TextAnchor,
    },
    /// Children are cut at `bounds` when painted.
    Clip {
        bounds: Bounds<Pixels>,
        commands: Vec<DrawCommand>,
    },
}

/// A complete rendering of one view. Replaced wholesale on every redraw.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn clip(&mut self, bounds: Bounds<Pixels>, build: impl FnOnce(&mut Frame)) {
        let mut inner = Frame::new();
        build(&mut inner);
        self.push(DrawCommand::Clip {
            bounds,
            commands: inner.commands,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Every command, descending into clip groups.
    pub fn flatten(&self) -> Vec<&DrawCommand> {
        fn walk<'a>(commands: &'a [DrawCommand], out: &mut Vec<&'a DrawCommand>) {
            for c in commands {
                out.push(c);
                if let DrawCommand::Clip { commands, .. } = c {
                    walk(commands, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.commands, &mut out);
        out
    }

    /// Keys of the keyed areas, in paint order.
    pub fn area_keys(&self) -> Vec<&str> {
        self.flatten()
            .into_iter()
            .filter_map(|c| match c {
                DrawCommand::Area { key: Some(k), .. } => Some(k.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Axis layout parameters shared by both axes.
pub struct AxisSpec<'a> {
    pub scale: &'a ChartScale,
    pub format: AxisFormat,
    pub ticks: usize,
    pub tz: Tz,
}

const TICK_SIZE: f32 = 6.0;

/// Bottom axis along the lower edge of `plot`.
pub fn paint_x_axis(frame: &mut Frame, plot: Bounds<Pixels>, axis: AxisSpec<'_>, theme: &ChartTheme) {
    let y = plot.origin.y + plot.size.height;
    frame.push(DrawCommand::Line {
        from: point(plot.origin.x, y),
        to: point(plot.origin.x + plot.size.width, y),
        color: theme.axis_line,
        width: px(1.0),
    });

    let width = plot.size.width.as_f32();
    for tick in axis.scale.ticks(axis.ticks) {
        let x = axis.scale.map(tick);
        if !(0.0..=width).contains(&x) {
            continue;
        }
        let tick_x = plot.origin.x + px(x);
        frame.push(DrawCommand::Line {
            from: point(tick_x, y),
            to: point(tick_x, y + px(TICK_SIZE)),
            color: theme.axis_line,
            width: px(1.0),
        });
        frame.push(DrawCommand::Text {
            origin: point(tick_x, y + px(TICK_SIZE + 2.0)),
            text: axis.scale.format_tick(tick, axis.format, axis.tz),
            color: theme.axis_label,
            size: theme.axis_label_size,
            anchor: TextAnchor::Middle,
        });
    }
}

/// Left axis along the left edge of `plot`.
pub fn paint_y_axis(frame: &mut Frame, plot: Bounds<Pixels>, axis: AxisSpec<'_>, theme: &ChartTheme) {
    let x = plot.origin.x;
    frame.push(DrawCommand::Line {
        from: point(x, plot.origin.y),
        to: point(x, plot.origin.y + plot.size.height),
        color: theme.axis_line,
        width: px(1.0),
    });

    let height = plot.size.height.as_f32();
    for tick in axis.scale.ticks(axis.ticks) {
        let y = axis.scale.map(tick);
        if !(0.0..=height).contains(&y) {
            continue;
        }
        let tick_y = plot.origin.y + px(y);
        frame.push(DrawCommand::Line {
            from: point(x - px(TICK_SIZE), tick_y),
            to: point(x, tick_y),
            color: theme.axis_line,
            width: px(1.0),
        });
        frame.push(DrawCommand::Text {
            origin: point(x - px(TICK_SIZE + 3.0), tick_y - theme.axis_label_size / 2.0),
            text: axis.scale.format_tick(tick, axis.format, axis.tz),
            color: theme.axis_label,
            size: theme.axis_label_size,
            anchor: TextAnchor::End,
        });
    }
}
