use gpui::*;

/// Tableau10, indexed by a series' position in the dataset.
const SERIES_PALETTE: [u32; 10] = [
    0x4e79a7, 0xf28e2c, 0xe15759, 0x76b7b2, 0x59a14f, 0xedc949, 0xaf7aa1, 0xff9da7, 0x9c755f,
    0xbab0ab,
];

#[derive(Clone, Debug, PartialEq)]
pub struct ChartTheme {
    pub background: Hsla,
    pub axis_line: Hsla,
    pub axis_label: Hsla,
    pub axis_label_size: Pixels,
    pub overview_fill: Hsla,
    pub brush_fill: Hsla,
    pub brush_border: Hsla,
    pub tooltip_text: Hsla,
    pub tooltip_size: Pixels,
    pub band_opacity: f32,
    pub series_palette: Vec<Hsla>,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: gpui::white(),
            axis_line: gpui::black().alpha(0.8),
            axis_label: gpui::black().alpha(0.8),
            axis_label_size: px(10.0),
            overview_fill: rgb(0x4682b4).into(),
            brush_fill: gpui::black().alpha(0.15),
            brush_border: gpui::white(),
            tooltip_text: gpui::black(),
            tooltip_size: px(14.0),
            band_opacity: 0.7,
            series_palette: SERIES_PALETTE.iter().map(|c| rgb(*c).into()).collect(),
        }
    }
}

impl ChartTheme {
    /// Band color for the series at `index`, already faded to `band_opacity`.
    pub fn series_color(&self, index: usize) -> Hsla {
        if self.series_palette.is_empty() {
            return gpui::blue().opacity(self.band_opacity);
        }
        self.series_palette[index % self.series_palette.len()].opacity(self.band_opacity)
    }
}
