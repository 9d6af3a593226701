mod common;

use chrono::Duration;
use common::{day, millis_close, ramps, two_series, window};
use gpui::{px, rgb, Hsla, Pixels, Point};
use gpui_linked_chart::rendering::{DrawCommand, TextAnchor};
use gpui_linked_chart::theme::ChartTheme;
use gpui_linked_chart::utils::PixelsExt;
use gpui_linked_chart::view_controller::{ZoomGesture, ZoomTransform};
use gpui_linked_chart::{
    ChartError, Dataset, DetailView, Origin, SelectionState, TimeWindow, ViewConfig,
};
use std::cell::RefCell;
use std::rc::Rc;

const PLOT_WIDTH: f32 = 580.0;
const PLOT_HEIGHT: f32 = 460.0;

fn rendered(dataset: Dataset) -> DetailView {
    let mut view = DetailView::new(ViewConfig::detail());
    view.render(Rc::new(dataset)).unwrap();
    view
}

fn recorder(view: &mut DetailView) -> Rc<RefCell<Vec<TimeWindow>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    view.on_visible_window_changed(move |w| sink.borrow_mut().push(w));
    events
}

/// Surface point at plot pixel `x` and data value `value` on a `[0, y_max]` axis.
fn at(x: f32, value: f64, y_max: f64) -> Point<Pixels> {
    let y = PLOT_HEIGHT * (1.0 - (value / y_max) as f32);
    Point::new(px(50.0 + x), px(20.0 + y))
}

fn area_color(view: &DetailView, key: &str) -> Option<Hsla> {
    view.frame().flatten().into_iter().find_map(|c| match c {
        DrawCommand::Area {
            key: Some(k),
            color,
            ..
        } if k == key => Some(*color),
        _ => None,
    })
}

fn hover_label(view: &DetailView) -> Option<(String, Point<Pixels>)> {
    view.frame().flatten().into_iter().find_map(|c| match c {
        DrawCommand::Text {
            text,
            origin,
            anchor: TextAnchor::Start,
            ..
        } => Some((text.clone(), *origin)),
        _ => None,
    })
}

#[test]
fn test_render_shows_full_extent() {
    let view = rendered(two_series());
    assert_eq!(view.visible_window(), Some(window(0, 2)));
    assert_eq!(view.frame().area_keys(), vec!["A", "B"]);
    assert!(view.last_change().is_none());
}

#[test]
fn test_zoom_is_clamped_to_scale_extent() {
    let mut view = rendered(ramps(9));
    let events = recorder(&mut view);

    view.zoom(ZoomGesture::Scale {
        factor: 6.0,
        pivot: PLOT_WIDTH as f64 / 2.0,
    })
    .unwrap();

    assert!((view.zoom_transform().k - 4.0).abs() < 1e-9);
    let visible = view.visible_window().unwrap();
    let full_span = view.full_extent().span_millis();
    assert!((visible.span_millis() - full_span / 4.0).abs() < 5.0);

    let events = events.borrow();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0], visible);
    assert_eq!(view.last_change().unwrap().origin, Origin::User);
}

#[test]
fn test_zoom_out_never_exceeds_full_extent() {
    let mut view = rendered(ramps(9));
    view.zoom(ZoomGesture::Scale {
        factor: 0.25,
        pivot: 100.0,
    })
    .unwrap();
    assert_eq!(view.visible_window(), Some(view.full_extent()));
}

#[test]
fn test_set_visible_window_is_silent() {
    let mut view = rendered(ramps(11));
    let events = recorder(&mut view);

    view.set_visible_window(window(2, 4)).unwrap();

    let visible = view.visible_window().unwrap();
    assert_eq!(visible, window(2, 4));
    assert!(events.borrow().is_empty());
    assert_eq!(view.last_change().unwrap().origin, Origin::Programmatic);
}

#[test]
fn test_gestures_continue_from_forced_window() {
    let mut view = rendered(ramps(11));
    view.set_visible_window(window(0, 1)).unwrap();
    let events = recorder(&mut view);

    // The forced window is 10x, beyond the 4x limit; zooming in stays put.
    view.zoom(ZoomGesture::Scale {
        factor: 2.0,
        pivot: 0.0,
    })
    .unwrap();
    let visible = view.visible_window().unwrap();
    assert!(millis_close(visible.start(), day(0), 5));
    assert!(millis_close(visible.end(), day(1), 5));

    // Zooming out halves the scale around the left edge.
    view.zoom(ZoomGesture::Scale {
        factor: 0.5,
        pivot: 0.0,
    })
    .unwrap();
    let visible = view.visible_window().unwrap();
    assert!(millis_close(visible.start(), day(0), 5));
    assert!(millis_close(visible.end(), day(2), 5));
    assert_eq!(events.borrow().len(), 2);
}

#[test]
fn test_degenerate_forced_window_shows_everything() {
    let mut view = rendered(two_series());
    view.set_visible_window(window(1, 1)).unwrap();
    assert_eq!(view.visible_window(), Some(window(0, 2)));
}

#[test]
fn test_pan_is_clamped_at_extent() {
    let mut view = rendered(ramps(11));
    view.zoom(ZoomGesture::Pan { dx: 200.0, dy: 0.0 }).unwrap();
    assert_eq!(view.visible_window(), Some(view.full_extent()));
}

#[test]
fn test_drag_pans_window() {
    let mut view = rendered(ramps(11));
    view.set_visible_window(window(2, 4)).unwrap();
    let events = recorder(&mut view);

    view.pointer_down(at(300.0, 1.0, 10.0));
    view.pointer_moved(at(358.0, 1.0, 10.0)).unwrap();
    view.pointer_up(at(358.0, 1.0, 10.0)).unwrap();

    let visible = view.visible_window().unwrap();
    let expected_start = day(1) + Duration::hours(19) + Duration::minutes(12);
    assert!(millis_close(visible.start(), expected_start, 5));
    assert!((visible.span_millis() - Duration::days(2).num_milliseconds() as f64).abs() < 5.0);
    assert_eq!(events.borrow().len(), 1);
    // A drag is not a click.
    assert_eq!(view.selection(), &SelectionState::All);
}

#[test]
fn test_wheel_zooms_at_pointer() {
    let mut view = rendered(ramps(11));
    let events = recorder(&mut view);

    view.scroll(at(290.0, 1.0, 10.0), -100.0).unwrap();
    assert!(view.zoom_transform().k > 1.0);
    assert_eq!(events.borrow().len(), 1);

    // Outside the plot the wheel is ignored.
    view.scroll(Point::new(px(5.0), px(5.0)), -100.0).unwrap();
    assert_eq!(events.borrow().len(), 1);
}

#[test]
fn test_zoom_before_render_is_noop() {
    let mut view = DetailView::new(ViewConfig::detail());
    let events = recorder(&mut view);
    view.zoom(ZoomGesture::Scale {
        factor: 2.0,
        pivot: 10.0,
    })
    .unwrap();
    assert!(events.borrow().is_empty());
    assert!(view.visible_window().is_none());
}

#[test]
fn test_bands_are_clipped_to_plot() {
    let mut view = rendered(two_series());
    view.set_visible_window(TimeWindow::new(day(0) + Duration::hours(6), day(1)))
        .unwrap();

    for command in view.frame().flatten() {
        if let DrawCommand::Area { upper, lower, .. } = command {
            for p in upper.iter().chain(lower) {
                let x = p.x.as_f32();
                assert!((50.0 - 1e-3..=50.0 + PLOT_WIDTH + 1e-3).contains(&x));
            }
        }
    }
    assert!(matches!(view.frame().commands[0], DrawCommand::Clip { .. }));
}

#[test]
fn test_hover_shows_series_name() {
    let mut view = rendered(two_series());

    view.pointer_moved(at(290.0, 1.0, 9.0)).unwrap();
    assert_eq!(view.hovered(), Some("A"));
    let (text, origin) = hover_label(&view).unwrap();
    assert_eq!(text, "A");
    assert_eq!((origin.x.as_f32(), origin.y.as_f32()), (60.0, 30.0));

    view.pointer_moved(at(290.0, 5.0, 9.0)).unwrap();
    assert_eq!(view.hovered(), Some("B"));

    // Above the stack there is nothing to name.
    view.pointer_moved(at(290.0, 8.5, 9.0)).unwrap();
    assert_eq!(view.hovered(), None);
    assert!(hover_label(&view).is_none());
}

#[test]
fn test_pointer_leave_clears_label() {
    let mut view = rendered(two_series());
    view.pointer_moved(at(290.0, 5.0, 9.0)).unwrap();
    view.pointer_left();
    assert_eq!(view.hovered(), None);
    assert!(hover_label(&view).is_none());
}

#[test]
fn test_click_isolates_and_restores() {
    let mut view = rendered(two_series());
    let events = recorder(&mut view);
    let b_color = area_color(&view, "B");

    let on_b = at(290.0, 5.0, 9.0);
    view.pointer_down(on_b);
    view.pointer_up(on_b).unwrap();

    assert_eq!(view.selection(), &SelectionState::Only("B".to_string()));
    assert_eq!(view.frame().area_keys(), vec!["B"]);
    assert_eq!(view.bands()[0].points[1].lower, 0.0);
    // The isolated series keeps its colour.
    assert_eq!(area_color(&view, "B"), b_color);

    // B alone peaks at 6 and spans [0, 5] in the middle.
    let on_b = at(290.0, 3.0, 6.0);
    view.pointer_down(on_b);
    view.pointer_up(on_b).unwrap();
    assert_eq!(view.selection(), &SelectionState::All);
    assert_eq!(view.frame().area_keys(), vec!["A", "B"]);

    // Back to the full stack: the bands partition [0, total] again.
    let data = two_series();
    let bands = view.bands();
    for (i, obs) in data.observations().iter().enumerate() {
        assert_eq!(bands[0].points[i].lower, 0.0);
        assert_eq!(bands[0].points[i].upper, bands[1].points[i].lower);
        assert_eq!(bands[1].points[i].upper, obs.total());
    }

    // Isolation does not move the window.
    assert!(events.borrow().is_empty());
}

#[test]
fn test_click_on_empty_area_keeps_selection() {
    let mut view = rendered(two_series());
    view.click(at(290.0, 8.5, 9.0)).unwrap();
    assert_eq!(view.selection(), &SelectionState::All);
}

#[test]
fn test_series_colors_follow_key_order() {
    let view = rendered(two_series());
    let theme = ChartTheme::default();
    assert_eq!(area_color(&view, "A"), Some(theme.series_color(0)));
    assert_eq!(area_color(&view, "B"), Some(theme.series_color(1)));
}

#[test]
fn test_render_error_keeps_previous_state() {
    let mut view = rendered(two_series());
    view.toggle_series("B").unwrap();
    let frame = view.frame().clone();
    let visible = view.visible_window();

    // The new dataset has no "B" to isolate.
    let err = view.render(Rc::new(ramps(5))).unwrap_err();
    assert_eq!(err, ChartError::InvalidKey("B".to_string()));
    assert_eq!(view.frame(), &frame);
    assert_eq!(view.visible_window(), visible);
}

#[test]
fn test_toggle_unknown_key_reverts() {
    let mut view = rendered(two_series());
    let err = view.toggle_series("nope").unwrap_err();
    assert_eq!(err, ChartError::InvalidKey("nope".to_string()));
    assert_eq!(view.selection(), &SelectionState::All);
}

#[test]
fn test_named_event_api() {
    let mut view = rendered(ramps(11));
    assert!(view.on("windowChanged", |_| {}).is_ok());
    assert_eq!(
        view.on("zoomed", |_| {}).unwrap_err(),
        ChartError::UnknownEvent("zoomed".to_string())
    );
}

#[test]
fn test_small_jitter_is_a_click_not_a_pan() {
    let mut view = rendered(two_series());
    let events = recorder(&mut view);

    view.pointer_down(at(290.0, 5.0, 9.0));
    view.pointer_moved(at(291.5, 5.0, 9.0)).unwrap();
    view.pointer_up(at(291.5, 5.0, 9.0)).unwrap();

    assert_eq!(view.selection(), &SelectionState::Only("B".to_string()));
    assert_eq!(view.zoom_transform(), ZoomTransform::IDENTITY);
    assert!(events.borrow().is_empty());
}

#[test]
fn test_pan_counts_travel_from_press() {
    let mut view = rendered(ramps(11));
    view.set_visible_window(window(2, 4)).unwrap();

    view.pointer_down(at(300.0, 1.0, 10.0));
    view.pointer_moved(at(302.0, 1.0, 10.0)).unwrap();
    assert_eq!(view.visible_window(), Some(window(2, 4)));

    view.pointer_moved(at(358.0, 1.0, 10.0)).unwrap();
    view.pointer_up(at(358.0, 1.0, 10.0)).unwrap();

    let expected_start = day(1) + Duration::hours(19) + Duration::minutes(12);
    assert!(millis_close(view.visible_window().unwrap().start(), expected_start, 5));
    assert_eq!(view.selection(), &SelectionState::All);
}

#[test]
fn test_empty_dataset_renders_axis_frame() {
    let mut view = DetailView::new(ViewConfig::detail());
    view.render(Rc::new(Dataset::empty())).unwrap();
    let events = recorder(&mut view);

    assert!(!view.frame().is_empty());
    assert!(view.frame().area_keys().is_empty());
    assert!(view.bands().is_empty());

    view.zoom(ZoomGesture::Scale {
        factor: 2.0,
        pivot: 100.0,
    })
    .unwrap();
    view.scroll(at(100.0, 0.5, 1.0), -100.0).unwrap();
    view.click(at(100.0, 0.5, 1.0)).unwrap();
    view.pointer_moved(at(100.0, 0.5, 1.0)).unwrap();

    assert!(events.borrow().is_empty());
    assert_eq!(view.selection(), &SelectionState::All);
    assert_eq!(view.hovered(), None);
    assert_eq!(view.zoom_transform(), ZoomTransform::IDENTITY);
}

#[test]
fn test_rerender_resets_unset_window_to_new_extent() {
    let mut view = rendered(ramps(11));
    view.render(Rc::new(two_series())).unwrap();
    assert_eq!(view.visible_window(), Some(window(0, 2)));
    assert_eq!(view.zoom_transform(), ZoomTransform::IDENTITY);
}

#[test]
fn test_rerender_clips_forced_window() {
    let mut view = rendered(ramps(11));
    view.set_visible_window(window(1, 4)).unwrap();

    view.render(Rc::new(two_series())).unwrap();
    assert_eq!(view.visible_window(), Some(window(1, 2)));
    assert!((view.zoom_transform().k - 2.0).abs() < 1e-9);

    // Zooming out still never leaves the data.
    view.zoom(ZoomGesture::Scale {
        factor: 0.1,
        pivot: 0.0,
    })
    .unwrap();
    assert_eq!(view.visible_window(), Some(window(0, 2)));
}

#[test]
fn test_custom_theme_colors_bands() {
    let theme = ChartTheme {
        series_palette: vec![rgb(0xaa3355).into()],
        band_opacity: 0.5,
        ..ChartTheme::default()
    };
    let mut view = DetailView::new(ViewConfig::detail()).with_theme(theme.clone());
    view.render(Rc::new(two_series())).unwrap();

    assert_eq!(area_color(&view, "A"), Some(theme.series_color(0)));
    assert_eq!(area_color(&view, "B"), Some(theme.series_color(0)));
}
