//! Order line table component.
//!
//! Shows the line table while the form has rows and the empty-state
//! message otherwise.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};
use unicode_width::UnicodeWidthChar;

use crate::form::OrderLine;
use crate::tui::app::{App, Column, Mode};

/// Message shown in place of the table when there are no lines.
pub const EMPTY_MESSAGE: &str = "No items yet. Press [a] to add an item.";

/// Placeholder shown for a line without a product.
const NO_PRODUCT: &str = "-- select product --";

const QTY_WIDTH: u16 = 8;
const PRICE_WIDTH: u16 = 12;
const SUBTOTAL_WIDTH: u16 = 12;

/// Renders the order lines.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(format!(" Items ({}) ", app.form.len()))
        .borders(Borders::ALL)
        .border_style(if app.mode == Mode::Normal {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    if !app.form.table_visible() {
        let para = Paragraph::new(Line::from(EMPTY_MESSAGE))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(para, area);
        return;
    }

    // Row number, borders and column gaps take the rest.
    let fixed = 4 + QTY_WIDTH + PRICE_WIDTH + SUBTOTAL_WIDTH + 2 + 4;
    let product_width = area.width.saturating_sub(fixed).max(10);

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Product"),
        Cell::from(Line::from("Qty").alignment(Alignment::Right)),
        Cell::from(Line::from("Unit price").alignment(Alignment::Right)),
        Cell::from(Line::from("Subtotal").alignment(Alignment::Right)),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = app.form.lines().iter().enumerate().map(|(i, line)| {
        let selected = i == app.selected_row;
        let cell_style = |column: Column| {
            if selected && app.column == column {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            }
        };

        let product = product_label(app, line);
        let product_style = if line.product_id.is_none() {
            cell_style(Column::Product).fg(Color::Yellow)
        } else {
            cell_style(Column::Product)
        };

        Row::new(vec![
            Cell::from(format!("{}", i + 1)),
            Cell::from(truncate_to_width(&product, product_width as usize)).style(product_style),
            Cell::from(Line::from(line.quantity.clone()).alignment(Alignment::Right))
                .style(cell_style(Column::Quantity)),
            Cell::from(Line::from(line.unit_price.clone()).alignment(Alignment::Right))
                .style(cell_style(Column::UnitPrice)),
            Cell::from(Line::from(line.subtotal_text()).alignment(Alignment::Right)),
        ])
        .style(if selected {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        })
    });

    let widths = [
        Constraint::Length(4),
        Constraint::Min(product_width),
        Constraint::Length(QTY_WIDTH),
        Constraint::Length(PRICE_WIDTH),
        Constraint::Length(SUBTOTAL_WIDTH),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    // Scrolls the viewport so the selected row stays on screen.
    let mut state = TableState::default().with_selected(Some(app.selected_row));
    frame.render_stateful_widget(table, area, &mut state);
}

fn product_label(app: &App, line: &OrderLine) -> String {
    match line.product_id {
        Some(id) => app
            .form
            .catalog()
            .get(id)
            .map_or_else(|| format!("#{id}"), |p| p.option_label()),
        None => NO_PRODUCT.to_string(),
    }
}

/// Cuts `text` to at most `width` terminal columns, marking the cut with `…`.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= width {
        return text.to_string();
    }
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}
