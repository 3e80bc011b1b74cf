//! The root error boundary.
//!
//! The root layout contains an `#error-boundary` element and every fragment
//! request below it targets that element on error (`hx-target-error`). An
//! error response is a placeholder that loads the boundary's content from
//! [endpoints::ERROR_BOUNDARY], so the boundary is loaded lazily like a page.

use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{endpoints, html::error_content};

/// The ID of the element that error content is swapped into.
pub const ERROR_BOUNDARY_ID: &str = "error-boundary";

/// The empty error boundary of the root layout.
pub fn error_boundary_slot() -> Markup {
    html!(div id=(ERROR_BOUNDARY_ID) {})
}

/// A placeholder that loads the error boundary's content for `status`.
pub fn error_boundary_placeholder(status: StatusCode) -> Markup {
    html!(
        div
            id=(ERROR_BOUNDARY_ID)
            hx-get={ (endpoints::ERROR_BOUNDARY) "?status=" (status.as_u16()) }
            hx-trigger="load"
            hx-swap="outerHTML"
        {}
    )
}

/// What the error boundary shows for `status`.
fn boundary_messages(status: StatusCode) -> (&'static str, &'static str) {
    match status {
        StatusCode::UNAUTHORIZED => ("You are not signed in.", "Sign in again to continue."),
        StatusCode::NOT_FOUND => (
            "Page not found.",
            "Check the address or go back to the home page.",
        ),
        _ => (
            "Sorry, something went wrong.",
            "Try again later or check the server logs",
        ),
    }
}

/// The query string of [get_error_boundary].
#[derive(Debug, Deserialize)]
pub struct ErrorBoundaryQuery {
    status: Option<u16>,
}

/// Render the content of the error boundary.
pub async fn get_error_boundary(Query(query): Query<ErrorBoundaryQuery>) -> Response {
    let status = query
        .status
        .and_then(|code| StatusCode::from_u16(code).ok())
        .filter(|status| status.is_client_error() || status.is_server_error())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let (description, fix) = boundary_messages(status);

    html!(
        div id=(ERROR_BOUNDARY_ID) role="alert"
        {
            (error_content(status.as_str(), description, fix))
        }
    )
    .into_response()
}
