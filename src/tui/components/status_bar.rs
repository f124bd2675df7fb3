//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::app::{App, Mode};

/// Renders the order total bar.
///
/// The figure shown is the same text the submission payload carries.
pub fn render_total(frame: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled(" Order total: ", Style::default().fg(Color::White)),
        Span::styled(
            app.form.total_display().to_string(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("   {} line(s)", app.form.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}

/// Renders the mode indicator and the latest status message.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let (mode_label, mode_color) = match app.mode {
        Mode::Normal => (" NORMAL ", Color::Cyan),
        Mode::Insert => (" EDIT ", Color::Yellow),
        Mode::PickProduct => (" PICK ", Color::Magenta),
        Mode::Confirm => (" CONFIRM ", Color::Green),
    };

    let mut spans = vec![
        Span::styled(mode_label, Style::default().fg(Color::Black).bg(mode_color)),
        Span::raw(" "),
    ];

    if let Some(ref status) = app.status_message {
        let color = if status.is_error {
            Color::Red
        } else {
            Color::Green
        };
        spans.push(Span::styled(
            status.message.clone(),
            Style::default().fg(color),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Renders the keybindings help line for the current mode.
pub fn render_keybindings(frame: &mut Frame, area: Rect, app: &App) {
    let help = match app.mode {
        Mode::Normal => {
            "[a]dd [d]elete [Enter]edit [Tab]column [c]ustomer s[t]atus [p]ayment [n]otes [s]ubmit [q]uit"
        }
        Mode::Insert => "[Enter]apply [Esc]cancel",
        Mode::PickProduct => "[Up/Down]choose [Enter]select [Esc]cancel",
        Mode::Confirm => "[y]es submit [n]o back",
    };

    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}
