// Replays a view's display list onto a GPUI window.

use crate::rendering::{DrawCommand, Frame, TextAnchor};
use gpui::*;

/// Paints `frame` with its surface origin at `bounds.origin`.
pub fn paint_frame(window: &mut Window, cx: &mut App, bounds: Bounds<Pixels>, frame: &Frame) {
    for command in &frame.commands {
        paint_command(window, cx, bounds, command);
    }
}

fn paint_command(window: &mut Window, cx: &mut App, bounds: Bounds<Pixels>, command: &DrawCommand) {
    let origin = bounds.origin;
    match command {
        DrawCommand::Area {
            upper,
            lower,
            color,
            ..
        } => {
            if upper.len() < 2 {
                return;
            }
            let mut builder = PathBuilder::fill();
            builder.move_to(origin + upper[0]);
            for p in &upper[1..] {
                builder.line_to(origin + *p);
            }
            for p in lower.iter().rev() {
                builder.line_to(origin + *p);
            }
            builder.line_to(origin + upper[0]);
            if let Ok(path) = builder.build() {
                window.paint_path(path, *color);
            }
        }
        DrawCommand::Line {
            from,
            to,
            color,
            width,
        } => {
            let mut builder = PathBuilder::stroke(*width);
            builder.move_to(origin + *from);
            builder.line_to(origin + *to);
            if let Ok(path) = builder.build() {
                window.paint_path(path, *color);
            }
        }
        DrawCommand::Rect {
            bounds: rect,
            fill,
            border,
        } => {
            let rect = Bounds::new(origin + rect.origin, rect.size);
            window.paint_quad(gpui::fill(rect, *fill));
            if let Some(border) = border {
                window.paint_quad(gpui::outline(rect, *border, BorderStyle::Solid));
            }
        }
        DrawCommand::Text {
            origin: text_origin,
            text,
            color,
            size,
            anchor,
        } => {
            if text.is_empty() {
                return;
            }
            let font = TextStyle::default().font();
            let run = TextRun {
                len: text.len(),
                font,
                color: *color,
                background_color: None,
                underline: None,
                strikethrough: None,
            };
            if let Ok(lines) =
                window
                    .text_system()
                    .shape_text(text.clone().into(), *size, &[run], None, None)
            {
                for line in lines {
                    let shift = match anchor {
                        TextAnchor::Start => px(0.0),
                        TextAnchor::Middle => line.width() / 2.0,
                        TextAnchor::End => line.width(),
                    };
                    let at = origin + *text_origin - point(shift, px(0.0));
                    let _ = line.paint(at, *size, TextAlign::Left, Some(bounds), window, cx);
                }
            }
        }
        DrawCommand::Clip {
            bounds: clip,
            commands,
        } => {
            let mask = Bounds::new(origin + clip.origin, clip.size);
            window.with_content_mask(Some(ContentMask { bounds: mask }), |window| {
                for child in commands {
                    paint_command(window, cx, bounds, child);
                }
            });
        }
    }
}
