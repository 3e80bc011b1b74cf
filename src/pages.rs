//! The page shells of the route table and the lazily loaded content of each page.

use axum::{
    extract::{Path, State},
    http::Uri,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;
use maud::{Markup, html};
use time::OffsetDateTime;

use crate::{
    AppState, Error, endpoints,
    error_boundary::{ERROR_BOUNDARY_ID, error_boundary_slot},
    html::{CARD_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    route_table::{Page, resolve},
    session::CurrentUser,
    transaction::{initial_state, panel_view},
};

/// The root layout: the navigation bar and the error boundary around `content`.
///
/// Errors of any fragment loaded inside `main` replace the error boundary.
fn root_layout(page: Page, content: &Markup) -> Markup {
    let body = html!(
        (NavBar::new(Some(page)).into_html())

        main
            class="pb-24 lg:pb-0"
            hx-target-error={ "#" (ERROR_BOUNDARY_ID) }
        {
            (error_boundary_slot())
            (content)
        }
    );

    base(page.title(), &body)
}

/// The empty placeholder that is replaced by the content of `page` once loaded.
fn suspense_placeholder(page: Page) -> Markup {
    html!(
        div
            hx-get=(endpoints::format_endpoint(endpoints::PAGE_FRAGMENT, page.slug()))
            hx-trigger="load"
            hx-swap="outerHTML"
        {}
    )
}

/// Serve the shell of the page at the request's path.
///
/// This is also the router's fallback, so paths that match no route get the
/// 404 page, or the error boundary placeholder for htmx requests.
pub async fn get_page_shell(HxRequest(is_htmx_request): HxRequest, uri: Uri) -> Response {
    match resolve(uri.path()) {
        Ok(page) => root_layout(page, &suspense_placeholder(page)).into_response(),
        Err(error) if is_htmx_request => error.into_fragment_response(),
        Err(error) => error.into_response(),
    }
}

/// Render the content of the page called `slug`.
pub async fn get_page_fragment(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    user: Result<CurrentUser, Error>,
) -> Response {
    let Some(page) = Page::from_slug(&slug) else {
        return Error::RouteNotFound(slug).into_fragment_response();
    };

    let content = match page {
        Page::Home => Ok(home_content()),
        Page::PhoneVerification => Ok(phone_verification_content()),
        Page::Dashboard => user.and_then(|CurrentUser(user)| {
            let client_state = state.store.get(user.id_token())?;
            Ok(dashboard_content(client_state.subs_duration.as_deref()))
        }),
        Page::Profile => user.and_then(|CurrentUser(user)| {
            let panel_state = initial_state(&state.store, &user, OffsetDateTime::now_utc())?;
            Ok(profile_content(&panel_view(&panel_state, user.time_zone())?))
        }),
    };

    match content {
        Ok(markup) => markup.into_response(),
        Err(error) => error.into_fragment_response(),
    }
}

fn home_content() -> Markup {
    html!(
        section class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="mb-4 text-3xl font-bold" { "Premium" }
            p class="mb-4 text-center" { "Nikmati semua fitur tanpa batas dengan berlangganan Premium." }
            a href=(endpoints::DASHBOARD_VIEW) class=(LINK_STYLE) { "Lihat langganan" }
        }
    )
}

fn phone_verification_content() -> Markup {
    html!(
        section class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="mb-4 text-3xl font-bold" { "Verifikasi Nomor" }
            p class="text-center" { "Verifikasi nomor telepon Anda untuk melanjutkan pembayaran." }
        }
    )
}

/// The dashboard, showing when the active subscription ends.
fn dashboard_content(subs_duration: Option<&str>) -> Markup {
    html!(
        section class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="mb-4 text-3xl font-bold" { "Dashboard" }

            div class={ (CARD_STYLE) " w-full max-w-md" }
            {
                @match subs_duration {
                    Some(subs_duration) => {
                        p data-subs-duration { "Premium aktif hingga " (subs_duration) }
                    }
                    None => {
                        p { "Anda belum berlangganan Premium." }
                        a href=(endpoints::PROFILE_VIEW) class=(LINK_STYLE) { "Lihat riwayat transaksi" }
                    }
                }
            }
        }
    )
}

fn profile_content(panel: &Markup) -> Markup {
    html!(
        section class="flex flex-col py-8 mx-auto max-w-screen-md text-gray-900 dark:text-white"
        {
            h1 class="mb-6 mx-6 text-2xl font-bold" { "Riwayat Transaksi" }
            (panel)
        }
    )
}
