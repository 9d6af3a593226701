//! Wiring between the overview and detail views.
//!
//! Each view reports user changes through its single listener. The listeners
//! installed here only enqueue a message; the queue is drained once the
//! triggering gesture has returned, and every message is applied to the other
//! view through its programmatic setter, which never notifies. A brush drag
//! therefore moves the detail window without the detail view echoing the
//! change back, and vice versa.

use crate::data_types::{Dataset, TimeWindow, ViewConfig};
use crate::detail_view::DetailView;
use crate::error::ChartResult;
use crate::overview_view::OverviewView;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkMessage {
    /// The overview brush produced a window.
    RangeSelected(TimeWindow),
    /// The detail view was zoomed or panned.
    WindowChanged(TimeWindow),
}

type Mailbox = Rc<RefCell<VecDeque<LinkMessage>>>;

pub struct LinkedCharts {
    dataset: Rc<Dataset>,
    overview: OverviewView,
    detail: DetailView,
    mailbox: Mailbox,
    delivered: usize,
}

impl LinkedCharts {
    pub fn new(
        dataset: Dataset,
        overview_config: ViewConfig,
        detail_config: ViewConfig,
    ) -> ChartResult<Self> {
        Self::from_views(
            dataset,
            OverviewView::new(overview_config),
            DetailView::new(detail_config),
        )
    }

    /// Links two already configured views and renders `dataset` into both.
    /// Any listeners previously registered on the views are replaced.
    pub fn from_views(
        dataset: Dataset,
        mut overview: OverviewView,
        mut detail: DetailView,
    ) -> ChartResult<Self> {
        let mailbox: Mailbox = Rc::new(RefCell::new(VecDeque::new()));

        let tx = mailbox.clone();
        overview.on_range_selected(move |window| {
            tx.borrow_mut().push_back(LinkMessage::RangeSelected(window));
        });
        let tx = mailbox.clone();
        detail.on_visible_window_changed(move |window| {
            tx.borrow_mut().push_back(LinkMessage::WindowChanged(window));
        });

        let dataset = Rc::new(dataset);
        overview.render(dataset.clone());
        detail.render(dataset.clone())?;

        Ok(Self {
            dataset,
            overview,
            detail,
            mailbox,
            delivered: 0,
        })
    }

    /// Replaces the shared dataset and re-renders both views.
    pub fn set_dataset(&mut self, dataset: Dataset) -> ChartResult<()> {
        let dataset = Rc::new(dataset);
        self.detail.render(dataset.clone())?;
        self.overview.render(dataset.clone());
        self.dataset = dataset;
        Ok(())
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn overview(&self) -> &OverviewView {
        &self.overview
    }

    pub fn detail(&self) -> &DetailView {
        &self.detail
    }

    /// Runs `f` against the overview, then propagates whatever it emitted.
    pub fn update_overview<R>(&mut self, f: impl FnOnce(&mut OverviewView) -> R) -> ChartResult<R> {
        let out = f(&mut self.overview);
        self.sync()?;
        Ok(out)
    }

    /// Runs `f` against the detail view, then propagates whatever it emitted.
    pub fn update_detail<R>(&mut self, f: impl FnOnce(&mut DetailView) -> R) -> ChartResult<R> {
        let out = f(&mut self.detail);
        self.sync()?;
        Ok(out)
    }

    /// Number of cross-view messages applied so far.
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    fn sync(&mut self) -> ChartResult<()> {
        loop {
            // Release the borrow before touching a view.
            let next = self.mailbox.borrow_mut().pop_front();
            let Some(message) = next else {
                return Ok(());
            };
            trace!(?message, "delivering link message");
            let queued = self.mailbox.borrow().len();
            self.delivered += 1;
            match message {
                LinkMessage::RangeSelected(window) => self.detail.set_visible_window(window)?,
                LinkMessage::WindowChanged(window) => self.overview.set_selection(window),
            }
            debug_assert_eq!(
                self.mailbox.borrow().len(),
                queued,
                "programmatic setters must not notify"
            );
        }
    }
}
