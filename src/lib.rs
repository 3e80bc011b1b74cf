//! Subscriber Portal is a web client for managing a premium subscription.
//!
//! This library provides a server that directly serves HTML pages. Pages are
//! loaded lazily by htmx from fragment endpoints, and the profile page shows
//! the user's transaction history fetched from the subscription API.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod endpoints;
mod error_boundary;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod pages;
mod route_table;
mod routing;
mod session;
mod store;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use route_table::{Page, ROUTE_TABLE, Route, resolve};
pub use routing::build_router;
pub use session::User;
pub use store::{ClientState, SharedStore};
pub use timezone::ViewerTimeZone;
pub use transaction::{
    FetchError, Payment, Transaction, TransactionId, TransactionStatus, TransactionsApi,
    TransactionsClient, active_subscription_display, display_expiry, subscription_end,
};

use crate::{
    error_boundary::error_boundary_placeholder, html::error_view,
    internal_server_error::InternalServerError, not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request has no valid session, i.e. no ID token or time zone.
    ///
    /// The session is opened by the sign-in callback, so the client should
    /// sign in again.
    #[error("no active session")]
    Unauthenticated,

    /// An error occurred while getting a timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The transaction list could not be fetched from the subscription API.
    #[error("failed to get transactions: {0}")]
    FetchTransactions(#[from] FetchError),

    /// Adding the subscription duration to its anchor date overflowed the
    /// supported date range.
    #[error("the subscription end date is out of range")]
    SubscriptionOverflow,

    /// A date could not be formatted for display.
    #[error("could not format date-time: {0}")]
    DateFormatError(String),

    /// Could not acquire the lock on the shared client state.
    #[error("could not acquire the store lock")]
    StoreLockError,

    /// No route in the route table matches the requested path.
    #[error("no route matches the path \"{0}\"")]
    RouteNotFound(String),
}

impl Error {
    /// The status code that should be sent to the client for this error.
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Unauthenticated => StatusCode::UNAUTHORIZED,
            Error::RouteNotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidTimezoneError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert the error into a response for a fragment requested by htmx.
    ///
    /// The body is a placeholder that lazily loads the root error boundary,
    /// which the client swaps in via `hx-target-error`.
    fn into_fragment_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("An unexpected error occurred: {}", self);
        } else {
            tracing::debug!("Rendering error boundary for: {}", self);
        }

        (status, error_boundary_placeholder(status)).into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::RouteNotFound(_) => get_404_not_found_response(),
            Error::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                error_view(
                    "Unauthorized",
                    "401",
                    "You are not signed in.",
                    "Sign in again to continue.",
                ),
            )
                .into_response(),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::BAD_REQUEST,
                error_view(
                    "Invalid Timezone",
                    "400",
                    "Invalid Timezone Settings",
                    &format!(
                        "Could not find the timezone \"{timezone}\". Use a valid, canonical \
                        timezone name, e.g. \"Asia/Jakarta\"."
                    ),
                ),
            )
                .into_response(),
            Error::StoreLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{Error, FetchError};

    #[test]
    fn status_codes() {
        assert_eq!(Error::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            Error::RouteNotFound("/nope".to_owned()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::InvalidTimezoneError("Mars/Olympus".to_owned()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::FetchTransactions(FetchError::UnexpectedStatus(503)).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn fragment_response_keeps_status() {
        let response = Error::Unauthenticated.into_fragment_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn page_response_for_missing_route_is_404() {
        let response = Error::RouteNotFound("/unknown-path".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
