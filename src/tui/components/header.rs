//! Order header component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::app::App;

/// Renders the customer, status, payment method and notes.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let header = app.form.header();
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let customer = match app.form.customer_name() {
        Some(name) => Span::styled(name.to_string(), value),
        None => Span::styled("-- select customer --", Style::default().fg(Color::Yellow)),
    };

    let notes = if header.notes.is_empty() {
        Span::styled("-", label)
    } else {
        Span::raw(header.notes.clone())
    };

    let line = Line::from(vec![
        Span::styled(" Customer: ", label),
        customer,
        Span::styled("  Status: ", label),
        Span::styled(header.status.label(), value),
        Span::styled("  Payment: ", label),
        Span::styled(header.payment_method.label(), value),
        Span::styled("  Notes: ", label),
        notes,
    ]);

    let block = Block::default()
        .title(" New Order ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(Paragraph::new(line).block(block), area);
}
