use axum::{body::Body, http::StatusCode, response::Response};
use axum_test::{TestResponse, TestServer};

use crate::endpoints;

#[track_caller]
pub(crate) fn assert_content_type(response: &Response<Body>, content_type: &str) {
    let content_type_header = response
        .headers()
        .get("content-type")
        .expect("content-type header missing")
        .to_str()
        .expect("Could not convert to str");
    assert!(
        content_type_header.starts_with(content_type),
        "want content type {content_type}, got {content_type_header}"
    );
}

/// Open a session on `server` through the sign-in callback.
///
/// Use `.cookies()` on the returned response to authenticate later requests.
pub(crate) async fn sign_in(server: &TestServer, id_token: &str, time_zone: &str) -> TestResponse {
    let response = server
        .post(endpoints::SESSION)
        .form(&[("id_token", id_token), ("time_zone", time_zone)])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);

    response
}
