//! Order-entry form state.
//!
//! The form is an explicit state object ([`OrderForm`]) whose calculations
//! are pure functions over its lines. Views render it without mutating it.

pub mod line;
pub mod money;
pub mod state;
pub mod submission;

pub use line::{OrderLine, line_subtotal, order_total};
pub use money::{format_money, parse_amount, round_money};
pub use state::{OrderForm, OrderHeader, Visibility};
pub use submission::OrderSubmission;
