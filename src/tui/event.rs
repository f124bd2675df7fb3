//! Event handling for the TUI.
//!
//! Every key press is handled to completion by [`update`] before the next
//! message is read, so form mutations never interleave.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tracing::debug;

use crate::form::OrderSubmission;

use super::app::{App, Mode};

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),
    /// Request to quit the application.
    Quit,
}

/// Work the main loop performs on behalf of a handler.
#[derive(Debug)]
pub enum Action {
    /// Deliver the confirmed order payload.
    Submit(OrderSubmission),
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            // Poll for events with a 50ms timeout
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) if key.kind != KeyEventKind::Release => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Updates application state based on a message.
pub fn update(app: &mut App, message: Message) -> Option<Action> {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::Quit => {
            app.should_quit = true;
            None
        }
    }
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(_, _) => None,
        Event::Tick => {
            app.clear_stale_messages();
            None
        }
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return None;
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Insert => handle_insert_mode(app, key),
        Mode::PickProduct => handle_picker_mode(app, key),
        Mode::Confirm => handle_confirm_mode(app, key),
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }

        // Row lifecycle
        KeyCode::Char('a') => app.add_row(),
        KeyCode::Char('d') | KeyCode::Delete => app.remove_selected_row(),

        // Cursor movement
        KeyCode::Down | KeyCode::Char('j') => app.select_next_row(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_row(),
        KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => {
            app.column = app.column.next();
        }
        KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => {
            app.column = app.column.previous();
        }
        KeyCode::Enter => app.begin_edit(),

        // Order header
        KeyCode::Char('c') => app.cycle_customer(),
        KeyCode::Char('t') => app.cycle_status(),
        KeyCode::Char('p') => app.cycle_payment_method(),
        KeyCode::Char('n') => app.begin_notes_edit(),

        KeyCode::Char('s') => match app.form.submit() {
            Ok(_) => {
                app.show_info("Order ready, confirm to submit");
                app.mode = Mode::Confirm;
            }
            Err(e) => app.show_error(e.to_string()),
        },

        _ => {}
    }
    None
}

/// Handles keys in insert mode (text input).
fn handle_insert_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter => app.commit_edit(),
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Char(c) => app.input.insert(c),
        KeyCode::Backspace => app.input.backspace(),
        KeyCode::Delete => app.input.delete(),
        KeyCode::Left => app.input.move_left(),
        KeyCode::Right => app.input.move_right(),
        KeyCode::Home => app.input.move_home(),
        KeyCode::End => app.input.move_end(),
        _ => {}
    }
    None
}

/// Handles keys while the product picker is open.
fn handle_picker_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.picker_next(),
        KeyCode::Up | KeyCode::Char('k') => app.picker_previous(),
        KeyCode::Enter => app.confirm_pick(),
        KeyCode::Esc => app.cancel_edit(),
        _ => {}
    }
    None
}

/// Handles keys in confirm mode (submission dialog).
fn handle_confirm_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.mode = Mode::Normal;
            match app.form.submit() {
                Ok(submission) => {
                    debug!(total = %submission.total_amount, "Submission confirmed");
                    return Some(Action::Submit(submission));
                }
                Err(e) => app.show_error(e.to_string()),
            }
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.mode = Mode::Normal;
        }
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::form::{OrderForm, Visibility};
    use crate::models::catalog::{Catalog, Product};
    use crate::models::customer::Customer;
    use crate::models::order::OrderStatus;
    use rust_decimal_macros::dec;

    fn app() -> App {
        let catalog = Catalog::new(vec![
            Product {
                id: 1,
                name: "Green tea".to_string(),
                sku: "TEA-1".to_string(),
                selling_price: dec!(19.99),
                stock_quantity: 40,
            },
            Product {
                id: 2,
                name: "Mug".to_string(),
                sku: "MUG-2".to_string(),
                selling_price: dec!(5),
                stock_quantity: 3,
            },
        ])
        .unwrap();
        let customers = vec![Customer {
            id: 10,
            name: "Acme".to_string(),
            phone: None,
        }];
        App::new(OrderForm::new(Arc::new(catalog), Arc::new(customers)))
    }

    fn press(app: &mut App, code: KeyCode) -> Option<Action> {
        update(
            app,
            Message::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE))),
        )
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn add_and_remove_rows() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.form.len(), 2);
        assert_eq!(app.selected_row, 1);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.form.len(), 1);
        assert_eq!(app.selected_row, 0);

        press(&mut app, KeyCode::Delete);
        assert_eq!(app.form.visibility(), Visibility::Empty);

        // Removing from an empty table is a no-op.
        press(&mut app, KeyCode::Char('d'));
        assert!(app.status_message.is_none());
    }

    #[test]
    fn picker_selects_product() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::PickProduct);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.form.line(0).unwrap().unit_price, "19.99");
        assert_eq!(app.form.total_display(), "19.99");

        // Picking the leading entry clears the product.
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.picker_index, 1);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.form.line(0).unwrap().product_id, None);
        assert_eq!(app.form.total_display(), "0.00");
    }

    #[test]
    fn picker_escape_keeps_row() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.form.line(0).unwrap().product_id, None);
    }

    #[test]
    fn quantity_edit_updates_total() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Insert);
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "3");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.form.line(0).unwrap().quantity, "3");
        assert_eq!(app.form.total_display(), "59.97");
    }

    #[test]
    fn escape_discards_text_edit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "9");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.form.line(0).unwrap().unit_price, "0.00");
    }

    #[test]
    fn submit_requires_valid_form() {
        let mut app = app();
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.status_message.as_ref().is_some_and(|m| m.is_error));
    }

    #[test]
    fn confirmed_submit_returns_payload() {
        let mut app = app();
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        assert!(press(&mut app, KeyCode::Char('s')).is_none());
        assert_eq!(app.mode, Mode::Confirm);
        assert!(app.status_message.as_ref().is_some_and(|m| !m.is_error));

        match press(&mut app, KeyCode::Char('y')) {
            Some(Action::Submit(submission)) => {
                assert_eq!(submission.customer_id, 10);
                assert_eq!(submission.product_id, vec![2]);
                assert_eq!(submission.total_amount, "5.00");
            }
            other => panic!("expected submission, got {other:?}"),
        }
    }

    #[test]
    fn header_keys_cycle_choices() {
        let mut app = app();
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.form.customer_name(), Some("Acme"));
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.form.customer_name(), None);

        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.form.header().status, OrderStatus::Paid);

        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "call first");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.form.header().notes, "call first");
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = self::app();
        update(
            &mut app,
            Message::Input(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
        );
        assert!(app.should_quit);
    }
}
