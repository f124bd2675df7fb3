//! Modal popups: product picker, text entry and submit confirmation.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, EditTarget};

/// Renders the product picker over the table.
pub fn render_product_picker(frame: &mut Frame, app: &App) {
    let catalog = app.form.catalog();
    let height = u16::try_from(catalog.len())
        .unwrap_or(u16::MAX)
        .saturating_add(3)
        .min(frame.area().height.saturating_sub(4));
    let area = centered(frame.area(), 70, height);

    let mut items = Vec::with_capacity(app.picker_len());
    items.push(ListItem::new(Line::from(Span::styled(
        "-- select product --",
        Style::default().fg(Color::DarkGray),
    ))));
    for product in catalog.products() {
        let stock_style = if product.stock_quantity > 0 {
            Style::default()
        } else {
            Style::default().fg(Color::Red)
        };
        items.push(ListItem::new(Line::from(vec![
            Span::styled(product.option_label(), stock_style),
            Span::styled(
                format!("  {:.2}", product.selling_price),
                Style::default().fg(Color::Cyan),
            ),
        ])));
    }

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" Product for row {} ", app.selected_row + 1))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.picker_index));
    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut state);
}

/// Renders the text entry box with the terminal cursor placed in it.
pub fn render_text_input(frame: &mut Frame, app: &App) {
    let title = match app.edit_target {
        Some(EditTarget::Quantity(row)) => format!(" Quantity, row {} ", row + 1),
        Some(EditTarget::UnitPrice(row)) => format!(" Unit price, row {} ", row + 1),
        Some(EditTarget::Notes) => " Notes ".to_string(),
        None => " Edit ".to_string(),
    };
    let area = centered(frame.area(), 50, 3);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let para = Paragraph::new(app.input.as_str()).block(block);

    frame.render_widget(Clear, area);
    frame.render_widget(para, area);

    let before_cursor: String = app.input.as_str().chars().take(app.input.cursor()).collect();
    let x = area.x + 1 + before_cursor.width() as u16;
    frame.set_cursor_position(Position::new(
        x.min(area.right().saturating_sub(2)),
        area.y + 1,
    ));
}

/// Renders the submit confirmation dialog.
pub fn render_confirm(frame: &mut Frame, app: &App) {
    let area = centered(frame.area(), 50, 5);
    let customer = app.form.customer_name().unwrap_or("-");
    let lines = vec![
        Line::from(format!(
            "Submit {} item(s) for {customer}?",
            app.form.len()
        )),
        Line::from(vec![
            Span::raw("Order total: "),
            Span::styled(
                app.form.total_display().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            "[y]es  [n]o",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let para = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Confirm ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(para, area);
}

/// Returns a rectangle of `width_pct` percent width and fixed height
/// centered in `area`.
fn centered(area: Rect, width_pct: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_pct) / 2),
            Constraint::Percentage(width_pct),
            Constraint::Percentage((100 - width_pct) / 2),
        ])
        .split(vertical[1])[1]
}
