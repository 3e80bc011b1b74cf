//! Route handlers for the transaction history panel.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use time::OffsetDateTime;

use crate::{AppState, Error, session::CurrentUser, store::SharedStore};

use super::{
    client::TransactionsClient,
    panel::{PanelState, load_transactions},
    view::{panel_fragment, panel_view},
};

/// The state needed to load the transaction history panel.
#[derive(Debug, Clone)]
pub struct TransactionHistoryState {
    /// The client state shared between pages.
    pub store: SharedStore,
    /// The client for the subscription API.
    pub api: TransactionsClient,
}

impl FromRef<AppState> for TransactionHistoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            api: state.api.clone(),
        }
    }
}

/// Load the transaction list and render the panel in its loaded state.
///
/// This is requested by the panel's loading placeholder.
pub async fn get_transaction_history(
    State(state): State<TransactionHistoryState>,
    user: Result<CurrentUser, Error>,
) -> Response {
    let CurrentUser(user) = match user {
        Ok(user) => user,
        Err(error) => return error.into_fragment_response(),
    };

    let load =
        match load_transactions(&state.store, &state.api, &user, OffsetDateTime::now_utc()).await {
            Ok(load) => load,
            Err(error) => return error.into_fragment_response(),
        };

    match panel_fragment(load, user.time_zone()) {
        Ok(markup) => markup.into_response(),
        Err(error) => error.into_fragment_response(),
    }
}

/// Forget the cached transactions and render the panel in the loading state,
/// which fetches the list again.
pub async fn refresh_transactions(
    State(store): State<SharedStore>,
    user: Result<CurrentUser, Error>,
) -> Response {
    let CurrentUser(user) = match user {
        Ok(user) => user,
        Err(error) => return error.into_fragment_response(),
    };

    if let Err(error) = store.invalidate_transactions(user.id_token()) {
        return error.into_fragment_response();
    }
    tracing::debug!("Invalidated cached transactions.");

    match panel_view(&PanelState::Loading, user.time_zone()) {
        Ok(markup) => markup.into_response(),
        Err(error) => error.into_fragment_response(),
    }
}
