use chrono::{Duration, TimeZone, Utc};
use gpui::prelude::*;
use gpui::*;
use gpui_linked_chart::theme::ChartTheme;
use gpui_linked_chart::{
    Dataset, DetailView, LinkedChartView, LinkedCharts, OverviewView, ViewConfig,
};
use rand::Rng;

const SECTORS: [&str; 6] = [
    "date",
    "Agriculture",
    "Construction",
    "Finance",
    "Manufacturing",
    "Retail",
];

fn monthly_dataset() -> eyre::Result<Dataset> {
    let start = Utc
        .with_ymd_and_hms(2000, 1, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| eyre::eyre!("invalid start date"))?;

    let mut rng = rand::rng();
    let mut levels: Vec<f64> = (1..SECTORS.len()).map(|_| rng.random_range(200.0..900.0)).collect();
    let mut rows = Vec::new();
    for month in 0..120 {
        let date = start + Duration::days(month * 30);
        for level in levels.iter_mut() {
            *level = (*level + rng.random_range(-40.0..40.0)).max(10.0);
        }
        rows.push((date, levels.clone()));
    }

    Ok(Dataset::from_columns(&SECTORS, rows)?)
}

fn main() -> eyre::Result<()> {
    let dataset = monthly_dataset()?;
    let theme = ChartTheme {
        overview_fill: rgb(0x5b8db8).into(),
        band_opacity: 0.8,
        ..ChartTheme::default()
    };
    let charts = LinkedCharts::from_views(
        dataset,
        OverviewView::new(ViewConfig::overview()).with_theme(theme.clone()),
        DetailView::new(ViewConfig::detail()).with_theme(theme),
    )?;

    Application::new().run(move |cx: &mut App| {
        let opened = cx.open_window(WindowOptions::default(), |_window, cx| {
            cx.new(|cx| LinkedChartView::new(charts, cx))
        });
        if let Err(err) = opened {
            eprintln!("failed to open window: {err:?}");
            cx.quit();
        }
    });
    Ok(())
}
