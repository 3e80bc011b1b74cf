//! The client state shared between pages, kept per session.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use time::{Duration, OffsetDateTime};

use crate::{Error, transaction::Transaction};

/// The state one session's pages read and write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientState {
    /// The user's transactions.
    ///
    /// `None` means the list has not been fetched yet, an empty list means it
    /// was fetched and the user has no transactions.
    pub transactions: Option<Vec<Transaction>>,

    /// The display text for when the active subscription ends.
    pub subs_duration: Option<String>,
}

/// How long a session's state is kept after it was last read or written.
///
/// ID tokens are rotated by the identity provider, so state keyed by an old
/// token is never read again once the client has a new one.
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::hours(1);

#[derive(Debug)]
struct Entry {
    state: ClientState,
    last_access: OffsetDateTime,
}

type Sessions = HashMap<String, Entry>;

/// The [ClientState] of every session, keyed by the session's ID token.
///
/// Sessions idle for longer than [SESSION_IDLE_TIMEOUT] are evicted whenever
/// the store is accessed. Cloning the store gives another handle to the same
/// state.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    sessions: Arc<Mutex<Sessions>>,
}

impl SharedStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of the state for `session`.
    ///
    /// Sessions that have never been written to have the default state.
    pub fn get(&self, session: &str) -> Result<ClientState, Error> {
        self.read_at(session, OffsetDateTime::now_utc(), ClientState::clone)
            .map(Option::unwrap_or_default)
    }

    /// Get the cached transactions for `session`, `None` if not fetched yet.
    pub fn transactions(&self, session: &str) -> Result<Option<Vec<Transaction>>, Error> {
        self.read_at(session, OffsetDateTime::now_utc(), |state| {
            state.transactions.clone()
        })
        .map(Option::flatten)
    }

    /// Store the fetched transactions for `session`.
    pub fn set_transactions(
        &self,
        session: &str,
        transactions: Vec<Transaction>,
    ) -> Result<(), Error> {
        self.update(session, |state| state.transactions = Some(transactions))
    }

    /// Forget the cached transactions for `session` so the next panel load fetches them again.
    pub fn invalidate_transactions(&self, session: &str) -> Result<(), Error> {
        self.update(session, |state| state.transactions = None)
    }

    /// Set the display text for when the active subscription ends.
    pub fn set_subs_duration(&self, session: &str, subs_duration: String) -> Result<(), Error> {
        self.update(session, |state| state.subs_duration = Some(subs_duration))
    }

    /// Drop all state for `session`.
    pub fn remove(&self, session: &str) -> Result<(), Error> {
        let mut sessions = self.sessions.lock().map_err(|_| Error::StoreLockError)?;
        sessions.remove(session);

        Ok(())
    }

    fn update(&self, session: &str, apply: impl FnOnce(&mut ClientState)) -> Result<(), Error> {
        self.update_at(session, OffsetDateTime::now_utc(), apply)
    }

    fn update_at(
        &self,
        session: &str,
        now: OffsetDateTime,
        apply: impl FnOnce(&mut ClientState),
    ) -> Result<(), Error> {
        let mut sessions = self.sessions.lock().map_err(|_| Error::StoreLockError)?;
        evict_idle(&mut sessions, now);

        let entry = sessions.entry(session.to_owned()).or_insert_with(|| Entry {
            state: ClientState::default(),
            last_access: now,
        });
        entry.last_access = now;
        apply(&mut entry.state);

        Ok(())
    }

    fn read_at<T>(
        &self,
        session: &str,
        now: OffsetDateTime,
        read: impl FnOnce(&ClientState) -> T,
    ) -> Result<Option<T>, Error> {
        let mut sessions = self.sessions.lock().map_err(|_| Error::StoreLockError)?;
        evict_idle(&mut sessions, now);

        Ok(sessions.get_mut(session).map(|entry| {
            entry.last_access = now;
            read(&entry.state)
        }))
    }
}

fn evict_idle(sessions: &mut Sessions, now: OffsetDateTime) {
    sessions.retain(|_, entry| now - entry.last_access <= SESSION_IDLE_TIMEOUT);
}
