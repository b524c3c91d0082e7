//! TUI module for harmonic-lab
//!
//! Sliders on the right, raw and filtered charts on the left. Every key that
//! changes a parameter goes through the controller, which recomputes and
//! pushes the new frame into [`TuiPresentation`] before the next redraw.

mod controls;
pub mod state;
mod status;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};

use harmonic_lab::{ParamField, UiContext, UpdateController};

pub use state::TuiPresentation;

use controls::render_controls;
use status::render_status;
use waveform::render_waveform;

/// Steps moved by PageUp/PageDown
const COARSE_STEPS: i32 = 10;

/// What a key press asks for, before it touches any state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Quit,
    SelectPrevious,
    SelectNext,
    Adjust(i32),
    ToMin,
    ToMax,
    ToggleNoise,
    Reset,
    CycleStyle,
}

fn action_for(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectPrevious),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectNext),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::Adjust(-1)),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::Adjust(1)),
        KeyCode::PageDown => Some(Action::Adjust(-COARSE_STEPS)),
        KeyCode::PageUp => Some(Action::Adjust(COARSE_STEPS)),
        KeyCode::Home => Some(Action::ToMin),
        KeyCode::End => Some(Action::ToMax),
        KeyCode::Char(' ') | KeyCode::Char('n') => Some(Action::ToggleNoise),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Reset),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Action::CycleStyle),
        _ => None,
    }
}

/// UI application state
pub struct UiApp {
    controller: UpdateController,
    ctx: UiContext<TuiPresentation>,
    /// Index into `ParamField::ALL` of the focused slider
    selected: usize,
    filter_label: String,
    /// Whether the app should quit
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        controller: UpdateController,
        ctx: UiContext<TuiPresentation>,
        filter_label: String,
    ) -> Self {
        Self {
            controller,
            ctx,
            selected: 0,
            filter_label,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    ///
    /// Blocks on input between events; nothing is recomputed while idle.
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = action_for(key.code) {
                        self.apply(action);
                    }
                }
            }
        }

        Ok(())
    }

    fn selected_field(&self) -> ParamField {
        ParamField::ALL[self.selected]
    }

    /// Apply one action. Pipeline errors are already on screen via the
    /// presentation, so the result is dropped here.
    fn apply(&mut self, action: Action) {
        let count = ParamField::ALL.len();
        let field = self.selected_field();
        let (controller, ctx) = (&mut self.controller, &mut self.ctx);

        let _ = match action {
            Action::Quit => {
                self.should_quit = true;
                Ok(())
            }
            Action::SelectPrevious => {
                self.selected = (self.selected + count - 1) % count;
                Ok(())
            }
            Action::SelectNext => {
                self.selected = (self.selected + 1) % count;
                Ok(())
            }
            Action::Adjust(steps) => {
                let target = field.stepped(ctx.params.get(field), steps);
                controller.on_parameter_changed(ctx, field, target)
            }
            Action::ToMin => controller.on_parameter_changed(ctx, field, *field.range().start()),
            Action::ToMax => controller.on_parameter_changed(ctx, field, *field.range().end()),
            Action::ToggleNoise => controller.toggle_noise(ctx),
            Action::Reset => controller.reset(ctx),
            Action::CycleStyle => {
                ctx.presentation.style = ctx.presentation.style.next();
                Ok(())
            }
        };
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Main layout: status, charts + controls, help
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(10),   // Charts and controls
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(40), Constraint::Length(42)])
            .split(rows[1]);

        let charts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[0]);

        let presentation = &self.ctx.presentation;

        render_status(frame, rows[0], presentation);
        render_waveform(
            frame,
            charts[0],
            "Harmonic with noise",
            &presentation.raw,
            Color::Red,
            presentation,
        );
        render_waveform(
            frame,
            charts[1],
            "Filtered harmonic",
            &presentation.filtered,
            Color::Blue,
            presentation,
        );
        render_controls(
            frame,
            columns[1],
            &self.ctx.params,
            self.selected,
            presentation.style,
            &self.filter_label,
        );

        let help = Paragraph::new(
            " [↑↓] Select  [←→] Adjust  [PgUp/PgDn] ×10  [Home/End] Min/Max  [Space] Noise  [S] Style  [R] Reset  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, rows[2]);
    }
}
