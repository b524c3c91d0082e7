//! Status bar widget - shows sampling setup, signal levels, and the last error

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::state::TuiPresentation;

/// Render the status bar
pub fn render_status(frame: &mut Frame, area: Rect, presentation: &TuiPresentation) {
    let block = Block::default()
        .title(" harmonic-lab ")
        .borders(Borders::ALL);

    let axis = &presentation.axis;
    let mut spans = vec![
        Span::styled(
            format!(" {:.0} Hz  ", axis.sample_rate()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{} samples  ", axis.len()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!(
                "Raw peak {:.2} RMS {:.2}  ",
                presentation.raw_stats.peak, presentation.raw_stats.rms
            ),
            Style::default().fg(Color::Red),
        ),
        Span::styled(
            format!(
                "Filtered peak {:.2} RMS {:.2}  ",
                presentation.filtered_stats.peak, presentation.filtered_stats.rms
            ),
            Style::default().fg(Color::Blue),
        ),
    ];

    if let Some(db) = presentation.hf_attenuation_db {
        spans.push(Span::styled(
            format!(">{:.1} Hz {db:+.1} dB  ", presentation.hf_band_edge()),
            Style::default().fg(Color::Magenta),
        ));
    }

    match &presentation.error {
        Some(message) => spans.push(Span::styled(
            format!("⚠ {message}"),
            Style::default().fg(Color::Yellow),
        )),
        None => spans.push(Span::styled(
            format!("frame {}", presentation.frames),
            Style::default().fg(Color::DarkGray),
        )),
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
