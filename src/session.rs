//! The signed-in user, kept in encrypted cookies.
//!
//! ID tokens are issued by the identity provider. Its sign-in callback posts
//! the token and the user's time zone to [post_session], which stores them in
//! private cookies. Handlers receive the user through the [CurrentUser]
//! extractor, which rejects requests without a session as
//! [Error::Unauthenticated].

use axum::{
    Form,
    extract::{FromRef, FromRequestParts, State},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, Key, SameSite},
};
use serde::Deserialize;
use time::{Duration, OffsetDateTime};

use crate::{Error, endpoints, store::SharedStore, timezone::ViewerTimeZone};

pub(crate) const COOKIE_ID_TOKEN: &str = "id_token";
pub(crate) const COOKIE_TIME_ZONE: &str = "time_zone";

/// A signed-in user.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id_token: String,
    time_zone: ViewerTimeZone,
}

impl User {
    /// Create a user from their ID token and time zone.
    pub fn new(id_token: impl Into<String>, time_zone: ViewerTimeZone) -> Self {
        Self {
            id_token: id_token.into(),
            time_zone,
        }
    }

    /// The bearer token for the subscription API.
    ///
    /// The token also identifies the user's session in the shared store.
    pub fn id_token(&self) -> &str {
        &self.id_token
    }

    /// The time zone dates are shown in.
    pub fn time_zone(&self) -> ViewerTimeZone {
        self.time_zone
    }
}

/// Extracts the signed-in user from the session cookies.
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    Key: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|never| match never {});

        get_user_from_cookies(&jar).map(CurrentUser)
    }
}

/// Read the user from the session cookies in `jar`.
///
/// # Errors
/// Returns [Error::Unauthenticated] if either cookie is missing or empty, and
/// [Error::InvalidTimezoneError] if the stored time zone is not known.
pub(crate) fn get_user_from_cookies(jar: &PrivateCookieJar) -> Result<User, Error> {
    let id_token = jar
        .get(COOKIE_ID_TOKEN)
        .map(|cookie| cookie.value().to_owned())
        .filter(|token| !token.is_empty())
        .ok_or(Error::Unauthenticated)?;
    let time_zone = jar
        .get(COOKIE_TIME_ZONE)
        .ok_or(Error::Unauthenticated)?;
    let time_zone = ViewerTimeZone::from_name(time_zone.value())?;

    Ok(User::new(id_token, time_zone))
}

/// Add the session cookies for `user` to the cookie jar.
pub(crate) fn set_session_cookies(jar: PrivateCookieJar, user: &User) -> PrivateCookieJar {
    jar.add(session_cookie(COOKIE_ID_TOKEN, user.id_token().to_owned()))
        .add(session_cookie(
            COOKIE_TIME_ZONE,
            user.time_zone().name().to_owned(),
        ))
}

/// Set the session cookies to an invalid value and their max age to zero,
/// which should delete the cookies on the client side.
pub(crate) fn invalidate_session_cookies(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(expired_cookie(COOKIE_ID_TOKEN))
        .add(expired_cookie(COOKIE_TIME_ZONE))
}

fn session_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(true)
        .build()
}

fn expired_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, "deleted"))
        .path("/")
        .expires(OffsetDateTime::UNIX_EPOCH)
        .max_age(Duration::ZERO)
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(true)
        .build()
}

/// The form posted by the identity provider's sign-in callback.
#[derive(Debug, Deserialize)]
pub struct SessionForm {
    id_token: String,
    time_zone: String,
}

/// Open a session for the user in `form` and redirect to their profile.
pub async fn post_session(jar: PrivateCookieJar, Form(form): Form<SessionForm>) -> Response {
    let id_token = form.id_token.trim();
    if id_token.is_empty() {
        tracing::warn!("Rejected sign-in callback without an ID token.");
        return Error::Unauthenticated.into_response();
    }

    let time_zone = match ViewerTimeZone::from_name(form.time_zone.trim()) {
        Ok(time_zone) => time_zone,
        Err(error) => {
            tracing::warn!("Rejected sign-in callback: {error}");
            return error.into_response();
        }
    };

    tracing::info!("Opened session with time zone {}", time_zone.name());
    let user = User::new(id_token, time_zone);

    (
        set_session_cookies(jar, &user),
        Redirect::to(endpoints::PROFILE_VIEW),
    )
        .into_response()
}

/// Close the session, forget its client state and redirect to the home page.
pub async fn get_log_out(State(store): State<SharedStore>, jar: PrivateCookieJar) -> Response {
    if let Some(id_token) = jar.get(COOKIE_ID_TOKEN) {
        if let Err(error) = store.remove(id_token.value()) {
            tracing::error!("Could not clear client state on log out: {error}");
        }
    }

    (
        invalidate_session_cookies(jar),
        Redirect::to(endpoints::ROOT),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        extract::FromRef,
        http::StatusCode,
        routing::{get, post},
    };
    use axum_extra::extract::cookie::Key;
    use axum_test::TestServer;
    use sha2::{Digest, Sha512};

    use crate::{endpoints, store::SharedStore};

    use super::{COOKIE_ID_TOKEN, COOKIE_TIME_ZONE, CurrentUser, get_log_out, post_session};

    #[derive(Clone)]
    struct TestState {
        cookie_key: Key,
        store: SharedStore,
    }

    impl FromRef<TestState> for Key {
        fn from_ref(state: &TestState) -> Self {
            state.cookie_key.clone()
        }
    }

    impl FromRef<TestState> for SharedStore {
        fn from_ref(state: &TestState) -> Self {
            state.store.clone()
        }
    }

    async fn whoami(CurrentUser(user): CurrentUser) -> String {
        format!("{} {}", user.id_token(), user.time_zone().name())
    }

    fn get_test_server(store: SharedStore) -> TestServer {
        let state = TestState {
            cookie_key: Key::from(&Sha512::digest("nafstenoas")),
            store,
        };
        let app = Router::new()
            .route(endpoints::SESSION, post(post_session))
            .route(endpoints::LOG_OUT, get(get_log_out))
            .route("/whoami", get(whoami))
            .with_state(state);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn session_round_trip() {
        let server = get_test_server(SharedStore::new());

        let response = server
            .post(endpoints::SESSION)
            .form(&[("id_token", "token-123"), ("time_zone", "Asia/Jakarta")])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), endpoints::PROFILE_VIEW);
        let cookie = response.cookie(COOKIE_ID_TOKEN);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_ne!(cookie.value(), "token-123", "cookie should be encrypted");

        let response = server
            .get("/whoami")
            .add_cookies(response.cookies())
            .await;

        response.assert_status_ok();
        response.assert_text("token-123 Asia/Jakarta");
    }

    #[tokio::test]
    async fn missing_session_is_unauthenticated() {
        let server = get_test_server(SharedStore::new());

        server
            .get("/whoami")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn rejects_invalid_time_zone() {
        let server = get_test_server(SharedStore::new());

        let response = server
            .post(endpoints::SESSION)
            .form(&[("id_token", "token-123"), ("time_zone", "Mars/Olympus_Mons")])
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.maybe_cookie(COOKIE_TIME_ZONE).is_none());
    }

    #[tokio::test]
    async fn rejects_empty_id_token() {
        let server = get_test_server(SharedStore::new());

        let response = server
            .post(endpoints::SESSION)
            .form(&[("id_token", "  "), ("time_zone", "Asia/Jakarta")])
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn log_out_clears_cookies_and_client_state() {
        let store = SharedStore::new();
        let server = get_test_server(store.clone());
        let response = server
            .post(endpoints::SESSION)
            .form(&[("id_token", "token-123"), ("time_zone", "Etc/UTC")])
            .await;
        store.set_transactions("token-123", vec![]).unwrap();

        let response = server
            .get(endpoints::LOG_OUT)
            .add_cookies(response.cookies())
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), endpoints::ROOT);
        assert_eq!(store.transactions("token-123"), Ok(None));
        let cookie = response.cookie(COOKIE_ID_TOKEN);
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }
}
