//! Application state for the TUI.

use std::time::{Duration, Instant};

use crate::form::OrderForm;
use crate::models::order::{OrderStatus, PaymentMethod};

use super::input::TextInput;

/// How long a status message stays on screen.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(5);

/// Central application state container.
pub struct App {
    /// The order being entered.
    pub form: OrderForm,

    // -- Cursor State --
    /// Row that row-level keys act on.
    pub selected_row: usize,
    /// Column that [Enter] edits.
    pub column: Column,

    // -- Input State --
    pub mode: Mode,
    /// Text being typed in insert mode.
    pub input: TextInput,
    /// Field the text input commits to.
    pub edit_target: Option<EditTarget>,
    /// Highlighted picker entry; 0 is the "no product" entry.
    pub picker_index: usize,

    /// Transient message shown in the status line.
    pub status_message: Option<StatusMessage>,
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    pub fn new(form: OrderForm) -> Self {
        Self {
            form,
            selected_row: 0,
            column: Column::Product,
            mode: Mode::Normal,
            input: TextInput::new(),
            edit_target: None,
            picker_index: 0,
            status_message: None,
            should_quit: false,
        }
    }

    /// Adds a line and moves the cursor onto it.
    pub fn add_row(&mut self) {
        self.selected_row = self.form.add_row();
        self.column = Column::Product;
    }

    /// Removes the line under the cursor.
    pub fn remove_selected_row(&mut self) {
        if self.form.is_empty() {
            return;
        }
        match self.form.remove_row(self.selected_row) {
            Ok(_) => self.clamp_selection(),
            Err(e) => self.show_error(e.to_string()),
        }
    }

    pub fn select_next_row(&mut self) {
        if self.selected_row + 1 < self.form.len() {
            self.selected_row += 1;
        }
    }

    pub fn select_previous_row(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    /// Starts editing the focused cell.
    pub fn begin_edit(&mut self) {
        let Some(line) = self.form.line(self.selected_row) else {
            return;
        };
        match self.column {
            Column::Product => {
                self.picker_index = line
                    .product_id
                    .and_then(|id| self.form.catalog().position(id))
                    .map_or(0, |pos| pos + 1);
                self.mode = Mode::PickProduct;
            }
            Column::Quantity => {
                let text = line.quantity.clone();
                self.begin_text_edit(EditTarget::Quantity(self.selected_row), text);
            }
            Column::UnitPrice => {
                let text = line.unit_price.clone();
                self.begin_text_edit(EditTarget::UnitPrice(self.selected_row), text);
            }
        }
    }

    /// Starts editing the order notes.
    pub fn begin_notes_edit(&mut self) {
        let text = self.form.header().notes.clone();
        self.begin_text_edit(EditTarget::Notes, text);
    }

    fn begin_text_edit(&mut self, target: EditTarget, text: String) {
        self.input = TextInput::with_content(text);
        self.edit_target = Some(target);
        self.mode = Mode::Insert;
    }

    /// Writes the text input back into its field.
    pub fn commit_edit(&mut self) {
        let text = self.input.take();
        self.mode = Mode::Normal;
        let result = match self.edit_target.take() {
            Some(EditTarget::Quantity(row)) => self.form.edit_quantity(row, text),
            Some(EditTarget::UnitPrice(row)) => self.form.edit_unit_price(row, text),
            Some(EditTarget::Notes) => {
                self.form.set_notes(text);
                Ok(())
            }
            None => Ok(()),
        };
        if let Err(e) = result {
            self.show_error(e.to_string());
        }
    }

    /// Leaves insert or picker mode without changing the form.
    pub fn cancel_edit(&mut self) {
        self.input.take();
        self.edit_target = None;
        self.mode = Mode::Normal;
    }

    /// Number of entries in the product picker, including "no product".
    pub fn picker_len(&self) -> usize {
        self.form.catalog().len() + 1
    }

    pub fn picker_next(&mut self) {
        if self.picker_index + 1 < self.picker_len() {
            self.picker_index += 1;
        }
    }

    pub fn picker_previous(&mut self) {
        self.picker_index = self.picker_index.saturating_sub(1);
    }

    /// Applies the highlighted picker entry to the focused row.
    pub fn confirm_pick(&mut self) {
        let product_id = self
            .picker_index
            .checked_sub(1)
            .and_then(|pos| self.form.catalog().products().get(pos))
            .map(|p| p.id);
        self.mode = Mode::Normal;
        if let Err(e) = self.form.select_product(self.selected_row, product_id) {
            self.show_error(e.to_string());
        }
    }

    /// Moves the customer selection to the next customer (then to none).
    pub fn cycle_customer(&mut self) {
        let customers = self.form.customers();
        if customers.is_empty() {
            self.show_error("no customers loaded");
            return;
        }
        let next = match self.form.header().customer_id {
            None => customers.first().map(|c| c.id),
            Some(id) => customers
                .iter()
                .position(|c| c.id == id)
                .and_then(|pos| customers.get(pos + 1))
                .map(|c| c.id),
        };
        if let Err(e) = self.form.select_customer(next) {
            self.show_error(e.to_string());
        }
    }

    pub fn cycle_status(&mut self) {
        let next: OrderStatus = self.form.header().status.next();
        self.form.set_status(next);
    }

    pub fn cycle_payment_method(&mut self) {
        let next: PaymentMethod = self.form.header().payment_method.next();
        self.form.set_payment_method(next);
    }

    /// Sets an error message to display.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            message: message.into(),
            is_error: true,
            timestamp: Instant::now(),
        });
    }

    /// Sets an informational message to display.
    pub fn show_info(&mut self, message: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            message: message.into(),
            is_error: false,
            timestamp: Instant::now(),
        });
    }

    /// Clears status messages older than five seconds.
    pub fn clear_stale_messages(&mut self) {
        if let Some(ref status) = self.status_message
            && status.timestamp.elapsed() > STATUS_MESSAGE_TTL
        {
            self.status_message = None;
        }
    }

    fn clamp_selection(&mut self) {
        if self.selected_row >= self.form.len() {
            self.selected_row = self.form.len().saturating_sub(1);
        }
    }
}

/// Editable columns of the line table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Column {
    #[default]
    Product,
    Quantity,
    UnitPrice,
}

impl Column {
    pub fn next(self) -> Self {
        match self {
            Column::Product => Column::Quantity,
            Column::Quantity => Column::UnitPrice,
            Column::UnitPrice => Column::Product,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Column::Product => Column::UnitPrice,
            Column::Quantity => Column::Product,
            Column::UnitPrice => Column::Quantity,
        }
    }
}

/// Input mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Typing into a text field.
    Insert,
    /// Choosing a product for the focused row.
    PickProduct,
    /// Waiting for the user to confirm submission.
    Confirm,
}

/// Field a text edit is written back to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditTarget {
    Quantity(usize),
    UnitPrice(usize),
    Notes,
}

/// Status line message with timestamp for auto-clear.
#[derive(Clone, Debug)]
pub struct StatusMessage {
    pub message: String,
    pub is_error: bool,
    /// When the message was shown.
    pub timestamp: Instant,
}
