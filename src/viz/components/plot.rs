use ratatui::{prelude::*, style::Stylize, widgets::*};

const COLORS: [Color; 4] = [
    Color::Cyan,
    Color::LightRed,
    Color::LightGreen,
    Color::LightYellow,
];

/// Static layout of a learning-curve plot
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub title: String,
    /// What the x axis counts, e.g. "Episode" or "Step"
    pub x_title: String,
    pub y_title: String,
    /// Legend entry of each curve
    pub labels: Vec<String>,
    /// Number of points per curve
    pub len: usize,
    /// Fixed y range, so redraws do not rescale
    pub y_bounds: [f64; 2],
}

/// Line chart of one or more learning curves, replaced wholesale on every update
pub struct Plot {
    config: PlotConfig,
    x_labels: Vec<String>,
    y_labels: Vec<String>,
    series: Vec<Vec<(f64, f64)>>,
}

impl Plot {
    pub fn new(config: PlotConfig) -> Self {
        let x_max = config.len.saturating_sub(1) as f64;
        let [y_min, y_max] = config.y_bounds;
        Self {
            x_labels: [0.0, x_max / 2.0, x_max]
                .iter()
                .map(|x| format!("{x:.0}"))
                .collect(),
            y_labels: [y_min, (y_min + y_max) / 2.0, y_max]
                .iter()
                .map(|y| format!("{y:.2}"))
                .collect(),
            series: vec![Vec::new(); config.labels.len()],
            config,
        }
    }

    pub fn update(&mut self, curves: Vec<Vec<f64>>) {
        self.series = curves
            .into_iter()
            .map(|curve| {
                curve
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (i as f64, v))
                    .collect()
            })
            .collect();
    }
}

impl WidgetRef for Plot {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let datasets = self
            .series
            .iter()
            .zip(&self.config.labels)
            .enumerate()
            .map(|(i, (data, label))| {
                Dataset::default()
                    .name(label.clone())
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(COLORS[i % COLORS.len()]))
                    .data(data)
            })
            .collect();

        let x_axis = Axis::default()
            .title(self.config.x_title.as_str())
            .dark_gray()
            .labels(self.x_labels.iter().map(|l| l.clone().bold()).collect())
            .bounds([0.0, self.config.len.saturating_sub(1) as f64]);

        let y_axis = Axis::default()
            .title(self.config.y_title.as_str())
            .dark_gray()
            .labels(self.y_labels.iter().map(|l| l.clone().bold()).collect())
            .bounds(self.config.y_bounds);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(self.config.title.as_str())
            .padding(Padding::uniform(1));

        Chart::new(datasets)
            .block(block)
            .x_axis(x_axis)
            .y_axis(y_axis)
            .legend_position(Some(LegendPosition::BottomRight))
            .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)))
            .render(area, buf);
    }
}
