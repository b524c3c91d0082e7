//! Control panel widget - one slider row per parameter plus toggles

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use harmonic_lab::{ParamField, ParameterState};

use super::state::PlotStyle;

/// Character width of the slider track
const TRACK_WIDTH: usize = 24;

/// Slider track with a knob at `value`'s position within `field`'s range
fn slider_track(field: ParamField, value: f64) -> String {
    let range = field.range();
    let span = range.end() - range.start();
    let ratio = if span > 0.0 {
        ((value - range.start()) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let knob = (ratio * (TRACK_WIDTH - 1) as f64).round() as usize;

    (0..TRACK_WIDTH)
        .map(|i| match i.cmp(&knob) {
            std::cmp::Ordering::Less => '━',
            std::cmp::Ordering::Equal => '●',
            std::cmp::Ordering::Greater => '─',
        })
        .collect()
}

/// Render the parameter sliders, noise checkbox and plot style selector
pub fn render_controls(
    frame: &mut Frame,
    area: Rect,
    params: &ParameterState,
    selected: usize,
    style: PlotStyle,
    filter_label: &str,
) {
    let block = Block::default()
        .title(" Controls ")
        .borders(Borders::ALL);

    let mut lines = Vec::with_capacity(ParamField::ALL.len() * 2 + 5);
    for (i, field) in ParamField::ALL.into_iter().enumerate() {
        let value = params.get(field);
        let range = field.range();
        let is_selected = i == selected;

        let label_style = if is_selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        lines.push(Line::from(vec![
            Span::styled(if is_selected { "▸ " } else { "  " }, label_style),
            Span::styled(format!("{:<17}", field.label()), label_style),
            Span::styled(format!("{value:>6.2}"), Style::default().fg(Color::Cyan)),
        ]));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                slider_track(field, value),
                Style::default().fg(if is_selected { Color::Yellow } else { Color::DarkGray }),
            ),
            Span::styled(
                format!(" {:.1}–{:.1}", range.start(), range.end()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    let checkbox = if params.show_noise() { "[x]" } else { "[ ]" };
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled(format!("  {checkbox} "), Style::default().fg(Color::Green)),
        Span::raw("Show Noise"),
    ]));
    lines.push(Line::from(vec![
        Span::raw("  Plot Type: "),
        Span::styled(style.label(), Style::default().fg(Color::Magenta)),
    ]));
    lines.push(Line::from(vec![
        Span::raw("  Filter:    "),
        Span::styled(filter_label.to_string(), Style::default().fg(Color::Blue)),
    ]));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_places_knob_at_ends() {
        let low = slider_track(ParamField::Amplitude, 0.1);
        let high = slider_track(ParamField::Amplitude, 10.0);

        assert_eq!(low.chars().count(), TRACK_WIDTH);
        assert!(low.starts_with('●'));
        assert!(high.ends_with('●'));
    }
}
