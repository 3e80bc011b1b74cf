//! The endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/pages/{page}', use [format_endpoint].

/// The home page.
pub const ROOT: &str = "/";
/// The dashboard page, which shows the active subscription.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for verifying the user's phone number.
pub const PHONE_VERIFICATION_VIEW: &str = "/phone-verification";
/// The profile page with the transaction history.
pub const PROFILE_VIEW: &str = "/profile";
/// The lazily loaded content of a page, keyed by the page's slug.
pub const PAGE_FRAGMENT: &str = "/pages/{page}";
/// The lazily loaded content of the root error boundary.
pub const ERROR_BOUNDARY: &str = "/pages/error";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route the identity provider's sign-in callback posts the session to.
pub const SESSION: &str = "/api/session";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/api/log_out";
/// The route that loads the transaction history panel.
pub const TRANSACTION_HISTORY: &str = "/api/transactions";
/// The route that forgets the cached transactions and reloads the panel.
pub const REFRESH_TRANSACTIONS: &str = "/api/transactions/refresh";

/// Replace the parameter in `endpoint_path` with `value`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/pages/{page}', '{page}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, value: &str) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        value,
        &endpoint_path[param_end..]
    )
}
