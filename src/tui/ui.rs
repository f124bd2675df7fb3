//! Main UI rendering coordinator.
//!
//! [`render`] is a pure projection of [`App`]: drawing the same state twice
//! produces the same frame.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use super::app::{App, Mode};
use super::components::{header, line_table, popup, status_bar};

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Order header
            Constraint::Min(5),    // Line table or empty message
            Constraint::Length(1), // Order total
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Keybindings help
        ])
        .split(frame.area());

    header::render(frame, main_layout[0], app);
    line_table::render(frame, main_layout[1], app);
    status_bar::render_total(frame, main_layout[2], app);
    status_bar::render(frame, main_layout[3], app);
    status_bar::render_keybindings(frame, main_layout[4], app);

    match app.mode {
        Mode::Normal => {}
        Mode::Insert => popup::render_text_input(frame, app),
        Mode::PickProduct => popup::render_product_picker(frame, app),
        Mode::Confirm => popup::render_confirm(frame, app),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ratatui::{Terminal, backend::TestBackend};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::form::OrderForm;
    use crate::models::catalog::{Catalog, Product};

    fn app() -> App {
        let catalog = Catalog::new(vec![Product {
            id: 1,
            name: "Green tea".to_string(),
            sku: "TEA-1".to_string(),
            selling_price: dec!(19.99),
            stock_quantity: 40,
        }])
        .unwrap();
        App::new(OrderForm::new(Arc::new(catalog), Arc::new(Vec::new())))
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn empty_form_shows_placeholder() {
        let screen = draw(&app());
        assert!(screen.contains(line_table::EMPTY_MESSAGE));
        assert!(screen.contains("Order total: 0.00"));
        assert!(!screen.contains("Subtotal"));
    }

    #[test]
    fn rows_replace_placeholder() {
        let mut app = app();
        app.add_row();
        app.form.select_product(0, Some(1)).unwrap();
        app.form.edit_quantity(0, "3").unwrap();

        let screen = draw(&app);
        assert!(!screen.contains(line_table::EMPTY_MESSAGE));
        assert!(screen.contains("Subtotal"));
        assert!(screen.contains("Green tea (TEA-1) - stock: 40"));
        assert!(screen.contains("59.97"));
        assert!(screen.contains("Order total: 59.97"));
    }

    #[test]
    fn rendering_is_idempotent() {
        let mut app = app();
        app.add_row();
        assert_eq!(draw(&app), draw(&app));
    }

    #[test]
    fn table_scrolls_to_selected_row() {
        let mut app = app();
        for _ in 0..30 {
            app.add_row();
        }
        app.form.edit_quantity(0, "555").unwrap();
        app.form.edit_quantity(29, "777").unwrap();
        assert_eq!(app.selected_row, 29);

        let screen = draw(&app);
        assert!(screen.contains("777"));
        assert!(!screen.contains("555"));

        for _ in 0..29 {
            app.select_previous_row();
        }
        let screen = draw(&app);
        assert!(screen.contains("555"));
    }

    #[test]
    fn picker_fits_oversized_catalog() {
        let products = (0..70_000)
            .map(|id| Product {
                id,
                name: format!("Item {id}"),
                sku: format!("SKU-{id}"),
                selling_price: dec!(1.00),
                stock_quantity: 1,
            })
            .collect();
        let catalog = Catalog::new(products).unwrap();
        let mut app = App::new(OrderForm::new(Arc::new(catalog), Arc::new(Vec::new())));
        app.add_row();
        app.begin_edit();

        let screen = draw(&app);
        assert!(screen.contains("Product for row 1"));
    }

    #[test]
    fn picker_lists_catalog() {
        let mut app = app();
        app.add_row();
        app.begin_edit();
        let screen = draw(&app);
        assert!(screen.contains("Product for row 1"));
        assert!(screen.contains("-- select product --"));
    }
}
