use super::LinkedChartView;
use crate::error::ChartResult;
use crate::utils::{to_local, PixelsExt};
use gpui::*;
use tracing::warn;

impl LinkedChartView {
    fn overview_local(&self, position: Point<Pixels>) -> Option<Point<Pixels>> {
        let bounds = *self.overview_bounds.borrow();
        if bounds.is_empty() {
            return None;
        }
        Some(to_local(position, &bounds))
    }

    fn detail_local(&self, position: Point<Pixels>) -> Option<Point<Pixels>> {
        let bounds = *self.detail_bounds.borrow();
        if bounds.is_empty() {
            return None;
        }
        Some(to_local(position, &bounds))
    }

    fn finish(&mut self, result: ChartResult<ChartResult<()>>, cx: &mut Context<Self>) {
        if let Err(err) = result.and_then(|inner| inner) {
            warn!(%err, "chart interaction failed");
        }
        cx.notify();
    }

    pub(super) fn handle_overview_down(
        &mut self,
        event: &MouseDownEvent,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let Some(pos) = self.overview_local(event.position) else {
            return;
        };
        let result = self
            .charts
            .update_overview(|o| o.pointer_down(pos))
            .map(Ok);
        self.finish(result, cx);
    }

    pub(super) fn handle_overview_move(
        &mut self,
        event: &MouseMoveEvent,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if !self.charts.overview().is_dragging() {
            return;
        }
        let Some(pos) = self.overview_local(event.position) else {
            return;
        };
        let result = self
            .charts
            .update_overview(|o| o.pointer_move(pos))
            .map(Ok);
        self.finish(result, cx);
    }

    pub(super) fn handle_overview_up(
        &mut self,
        event: &MouseUpEvent,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if !self.charts.overview().is_dragging() {
            return;
        }
        let Some(pos) = self.overview_local(event.position) else {
            return;
        };
        let result = self.charts.update_overview(|o| o.pointer_up(pos)).map(Ok);
        self.finish(result, cx);
    }

    pub(super) fn handle_detail_down(
        &mut self,
        event: &MouseDownEvent,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let Some(pos) = self.detail_local(event.position) else {
            return;
        };
        let result = self.charts.update_detail(|d| d.pointer_down(pos)).map(Ok);
        self.finish(result, cx);
    }

    pub(super) fn handle_detail_move(
        &mut self,
        event: &MouseMoveEvent,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let Some(pos) = self.detail_local(event.position) else {
            return;
        };
        let result = self.charts.update_detail(|d| d.pointer_moved(pos));
        self.finish(result, cx);
    }

    pub(super) fn handle_detail_up(
        &mut self,
        event: &MouseUpEvent,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let Some(pos) = self.detail_local(event.position) else {
            return;
        };
        let result = self.charts.update_detail(|d| d.pointer_up(pos));
        self.finish(result, cx);
    }

    pub(super) fn handle_detail_scroll(
        &mut self,
        event: &ScrollWheelEvent,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let Some(pos) = self.detail_local(event.position) else {
            return;
        };
        let delta_y = match event.delta {
            ScrollDelta::Pixels(p) => p.y.as_f32(),
            ScrollDelta::Lines(p) => p.y * 20.0,
        };
        // GPUI reports scrolling up as a positive delta; zoom in on it.
        let result = self.charts.update_detail(|d| d.scroll(pos, -delta_y));
        self.finish(result, cx);
    }

    pub(super) fn handle_detail_hover(
        &mut self,
        hovered: &bool,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if *hovered {
            return;
        }
        let result = self.charts.update_detail(|d| d.pointer_left()).map(Ok);
        self.finish(result, cx);
    }
}
