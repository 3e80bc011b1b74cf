//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState, endpoints,
    error_boundary::get_error_boundary,
    internal_server_error::get_internal_server_error_page,
    pages::{get_page_fragment, get_page_shell},
    route_table::ROUTE_TABLE,
    session::{get_log_out, post_session},
    transaction::{get_transaction_history, refresh_transactions},
};

/// Return a router with all the app's routes.
///
/// Every path in [ROUTE_TABLE] serves a page shell whose content is loaded
/// from [endpoints::PAGE_FRAGMENT]. Paths that match no route are resolved by
/// the fallback, which renders the 404 page.
pub fn build_router(state: AppState) -> Router {
    let page_routes = ROUTE_TABLE.iter().fold(Router::<AppState>::new(), |router, route| {
        router.route(route.path, get(get_page_shell))
    });

    let fragment_routes = Router::new()
        .route(endpoints::PAGE_FRAGMENT, get(get_page_fragment))
        .route(endpoints::ERROR_BOUNDARY, get(get_error_boundary))
        .route(endpoints::TRANSACTION_HISTORY, get(get_transaction_history))
        .route(endpoints::REFRESH_TRANSACTIONS, post(refresh_transactions));

    let session_routes = Router::new()
        .route(endpoints::SESSION, post(post_session))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    page_routes
        .merge(fragment_routes)
        .merge(session_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_page_shell)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::{
        AppState, build_router, endpoints,
        test_utils::{MockApi, MockResponse, sign_in},
    };

    async fn get_test_server() -> TestServer {
        let api = MockApi::spawn(MockResponse::Json(StatusCode::OK, json!([]))).await;
        let state = AppState::new("foobar", &api.base_url());

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn internal_error_page() {
        let server = get_test_server().await;

        server
            .get(endpoints::INTERNAL_ERROR_VIEW)
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn sign_in_then_log_out() {
        let server = get_test_server().await;
        let session = sign_in(&server, "token-123", "Asia/Jakarta").await;
        assert_eq!(
            session.header("location").to_str().unwrap(),
            endpoints::PROFILE_VIEW
        );

        let response = server
            .get(endpoints::LOG_OUT)
            .add_cookies(session.cookies())
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(
            response.header("location").to_str().unwrap(),
            endpoints::ROOT
        );
    }

    #[tokio::test]
    async fn refresh_requires_post() {
        let server = get_test_server().await;

        server
            .get(endpoints::REFRESH_TRANSACTIONS)
            .await
            .assert_status(StatusCode::METHOD_NOT_ALLOWED);
    }
}
