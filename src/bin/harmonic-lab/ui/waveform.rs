//! Waveform chart widget

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use super::state::{PlotStyle, TuiPresentation};

/// Render one trace in its own bordered chart
pub fn render_waveform(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    data: &[(f64, f64)],
    color: Color,
    presentation: &TuiPresentation,
) {
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL);

    let (graph_type, marker) = match presentation.style {
        PlotStyle::Line => (GraphType::Line, symbols::Marker::Braille),
        PlotStyle::Scatter => (GraphType::Scatter, symbols::Marker::Dot),
    };

    let dataset = Dataset::default()
        .marker(marker)
        .graph_type(graph_type)
        .style(Style::default().fg(color))
        .data(data);

    let start = presentation.axis.start();
    let stop = presentation.axis.stop();
    let y = presentation.y_bound();

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([start, stop])
                .labels(vec![
                    format!("{start:.1}s"),
                    format!("{:.1}s", 0.5 * (start + stop)),
                    format!("{stop:.1}s"),
                ])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-y, y])
                .labels(vec![format!("{:.1}", -y), "0".to_string(), format!("{y:.1}")])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
