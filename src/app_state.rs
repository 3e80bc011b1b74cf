//! Implements a struct that holds the state of the web server.

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};

use crate::{store::SharedStore, transaction::TransactionsClient};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// The client state shared between pages, keyed by the session's ID token.
    pub store: SharedStore,

    /// The client for the subscription API.
    pub api: TransactionsClient,
}

impl AppState {
    /// Create a new [AppState] with an empty store.
    ///
    /// `api_base_url` is the base URL of the subscription API, e.g.
    /// "https://api.example.com/v1".
    pub fn new(cookie_secret: &str, api_base_url: &str) -> Self {
        Self {
            cookie_key: create_cookie_key(cookie_secret),
            store: SharedStore::new(),
            api: TransactionsClient::new(api_base_url),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

impl FromRef<AppState> for SharedStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

/// Create a signing key for cookies from a `secret`s string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}
