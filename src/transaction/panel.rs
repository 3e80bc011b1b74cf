//! The fetch state machine of the transaction history panel.
//!
//! The panel is first rendered from the shared store. If the store has no
//! transactions yet, the panel is rendered in the loading state and the
//! browser requests the list once the placeholder loads, see
//! [load_transactions].

use time::OffsetDateTime;

use crate::{Error, alert::Alert, session::User, store::SharedStore};

use super::{client::TransactionsApi, expiry::active_subscription_display, models::Transaction};

/// The notification shown when the transaction list cannot be fetched.
pub const FETCH_FAILED_MESSAGE: &str = "Gagal menampilkan daftar riwayat transaksi";

/// What the panel shows.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelState {
    /// Waiting for the transaction list.
    Loading,
    /// The list is unavailable or has no transactions.
    Empty,
    /// One card per transaction, in the order the API returned them.
    Populated(Vec<Transaction>),
}

impl PanelState {
    fn from_transactions(transactions: Vec<Transaction>) -> Self {
        if transactions.is_empty() {
            PanelState::Empty
        } else {
            PanelState::Populated(transactions)
        }
    }
}

/// The result of loading the panel: what to show and an optional notification.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelLoad {
    pub state: PanelState,
    pub alert: Option<Alert>,
}

/// The state to render the panel in when its page is first shown.
///
/// Cached transactions are shown as is, even if they may be stale.
pub fn initial_state(
    store: &SharedStore,
    user: &User,
    now: OffsetDateTime,
) -> Result<PanelState, Error> {
    match store.transactions(user.id_token())? {
        Some(transactions) => {
            publish_subscription_display(store, user, &transactions, now)?;
            Ok(PanelState::from_transactions(transactions))
        }
        None => Ok(PanelState::Loading),
    }
}

/// Load the transactions for the panel, fetching them from `api` if they are not cached.
///
/// At most one request is made. A failed request is logged and turned into a
/// destructive notification, and the cache is left empty so that the next
/// load tries again. The returned state is never [PanelState::Loading].
///
/// # Errors
/// Only store and date errors are returned, fetch failures are not.
pub async fn load_transactions<A>(
    store: &SharedStore,
    api: &A,
    user: &User,
    now: OffsetDateTime,
) -> Result<PanelLoad, Error>
where
    A: TransactionsApi,
{
    if let Some(transactions) = store.transactions(user.id_token())? {
        tracing::debug!("Transactions already cached, skipping fetch.");
        publish_subscription_display(store, user, &transactions, now)?;

        return Ok(PanelLoad {
            state: PanelState::from_transactions(transactions),
            alert: None,
        });
    }

    match api.get_transactions(user.id_token()).await {
        Ok(transactions) => {
            tracing::info!("Fetched {} transactions.", transactions.len());
            publish_subscription_display(store, user, &transactions, now)?;
            store.set_transactions(user.id_token(), transactions.clone())?;

            Ok(PanelLoad {
                state: PanelState::from_transactions(transactions),
                alert: None,
            })
        }
        Err(error) => {
            tracing::error!("{}", Error::FetchTransactions(error));

            Ok(PanelLoad {
                state: PanelState::Empty,
                alert: Some(Alert::destructive(FETCH_FAILED_MESSAGE)),
            })
        }
    }
}

/// Store the display text of the active subscription, if there is one.
///
/// When no subscription is active the stored text is left untouched.
fn publish_subscription_display(
    store: &SharedStore,
    user: &User,
    transactions: &[Transaction],
    now: OffsetDateTime,
) -> Result<(), Error> {
    if let Some(display) = active_subscription_display(transactions, now, user.time_zone())? {
        store.set_subs_duration(user.id_token(), display)?;
    }

    Ok(())
}
