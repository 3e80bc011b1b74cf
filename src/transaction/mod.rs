//! Transaction history for the user's premium subscription.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and its validation from the API's JSON records
//! - The subscription expiry computation
//! - The client for the subscription API
//! - The transaction history panel: its fetch state machine, views and handlers

mod client;
mod endpoints;
mod expiry;
mod models;
mod panel;
mod view;

pub use client::{FetchError, TransactionsApi, TransactionsClient};
pub use endpoints::{get_transaction_history, refresh_transactions};
pub use expiry::{active_subscription_display, display_expiry, subscription_end};
pub use models::{Payment, Transaction, TransactionId, TransactionStatus};
pub use panel::initial_state;
pub use view::panel_view;
