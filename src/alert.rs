//! Alert system for displaying error messages to users.
//!
//! Alerts are rendered as toasts. A fragment response carries its alert as an
//! out-of-band swap into the `#alert-container` element of the root layout.

use maud::{Markup, html};

/// A destructive notification, i.e. something the user asked for failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub details: String,
}

impl Alert {
    /// Create an alert without details.
    pub fn destructive(message: &str) -> Self {
        Self {
            message: message.to_owned(),
            details: String::new(),
        }
    }

    pub fn into_html(self) -> Markup {
        html! {
            div
                role="alert"
                class="flex items-start gap-3 p-4 mb-4 text-sm border rounded-lg shadow
                    text-red-800 border-red-300 bg-red-50 dark:bg-gray-800
                    dark:text-red-400 dark:border-red-800"
            {
                span class="font-bold" aria-hidden="true" { "!" }

                div class="flex-1"
                {
                    p class="font-medium" { (self.message) }

                    @if !self.details.is_empty() {
                        p class="mt-1" { (self.details) }
                    }
                }

                button
                    type="button"
                    class="ms-auto bg-transparent border-none cursor-pointer"
                    aria-label="Close"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "×"
                }
            }
        }
    }

    /// Render the alert as an out-of-band swap that replaces the alert container.
    pub fn into_oob_html(self) -> Markup {
        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                (self.into_html())
            }
        }
    }
}
