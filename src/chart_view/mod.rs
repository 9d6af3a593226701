pub mod input;
pub mod renderer;

use crate::linked::LinkedCharts;
use crate::theme::ChartTheme;
use gpui::prelude::*;
use gpui::*;
use std::cell::RefCell;
use std::rc::Rc;

use self::renderer::paint_frame;

/// GPUI entity showing the overview above the detail view.
pub struct LinkedChartView {
    pub charts: LinkedCharts,
    pub theme: ChartTheme,

    // Last painted bounds of each canvas, in window coordinates.
    overview_bounds: Rc<RefCell<Bounds<Pixels>>>,
    detail_bounds: Rc<RefCell<Bounds<Pixels>>>,
}

impl LinkedChartView {
    pub fn new(charts: LinkedCharts, _cx: &mut Context<Self>) -> Self {
        Self {
            charts,
            theme: ChartTheme::default(),
            overview_bounds: Rc::new(RefCell::new(Bounds::default())),
            detail_bounds: Rc::new(RefCell::new(Bounds::default())),
        }
    }
}

impl Render for LinkedChartView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let overview = self.charts.overview();
        let detail = self.charts.detail();
        let (ov_w, ov_h) = (overview.config().width, overview.config().height);
        let (dt_w, dt_h) = (detail.config().width, detail.config().height);
        let overview_frame = overview.frame().clone();
        let detail_frame = detail.frame().clone();
        let overview_bounds = self.overview_bounds.clone();
        let detail_bounds = self.detail_bounds.clone();

        div()
            .flex()
            .flex_col()
            .size_full()
            .bg(self.theme.background)
            .child(
                div()
                    .id("overview-chart")
                    .w(px(ov_w))
                    .h(px(ov_h))
                    .on_mouse_down(MouseButton::Left, cx.listener(Self::handle_overview_down))
                    .on_mouse_move(cx.listener(Self::handle_overview_move))
                    .on_mouse_up(MouseButton::Left, cx.listener(Self::handle_overview_up))
                    .on_mouse_up_out(MouseButton::Left, cx.listener(Self::handle_overview_up))
                    .child(
                        canvas(
                            |_bounds, _window, _cx| {},
                            move |bounds, (), window, cx| {
                                *overview_bounds.borrow_mut() = bounds;
                                paint_frame(window, cx, bounds, &overview_frame);
                            },
                        )
                        .size_full(),
                    ),
            )
            .child(
                div()
                    .id("detail-chart")
                    .w(px(dt_w))
                    .h(px(dt_h))
                    .on_mouse_down(MouseButton::Left, cx.listener(Self::handle_detail_down))
                    .on_mouse_move(cx.listener(Self::handle_detail_move))
                    .on_mouse_up(MouseButton::Left, cx.listener(Self::handle_detail_up))
                    .on_mouse_up_out(MouseButton::Left, cx.listener(Self::handle_detail_up))
                    .on_scroll_wheel(cx.listener(Self::handle_detail_scroll))
                    .on_hover(cx.listener(Self::handle_detail_hover))
                    .child(
                        canvas(
                            |_bounds, _window, _cx| {},
                            move |bounds, (), window, cx| {
                                *detail_bounds.borrow_mut() = bounds;
                                paint_frame(window, cx, bounds, &detail_frame);
                            },
                        )
                        .size_full(),
                    ),
            )
    }
}
