//! The static mapping from URL paths to pages.
//!
//! Every page is served as the root layout with an empty placeholder, and
//! the page's content is loaded afterwards from [endpoints::PAGE_FRAGMENT].

use crate::{Error, endpoints};

/// A page of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// The landing page.
    Home,
    /// The active subscription overview.
    Dashboard,
    /// Phone number verification.
    PhoneVerification,
    /// The user's profile and transaction history.
    Profile,
}

impl Page {
    /// The path the page is served at.
    pub fn path(self) -> &'static str {
        match self {
            Page::Home => endpoints::ROOT,
            Page::Dashboard => endpoints::DASHBOARD_VIEW,
            Page::PhoneVerification => endpoints::PHONE_VERIFICATION_VIEW,
            Page::Profile => endpoints::PROFILE_VIEW,
        }
    }

    /// The name of the page's content fragment.
    pub fn slug(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Dashboard => "dashboard",
            Page::PhoneVerification => "phone-verification",
            Page::Profile => "profile",
        }
    }

    /// The page whose content fragment is called `slug`.
    pub fn from_slug(slug: &str) -> Option<Page> {
        ROUTE_TABLE
            .iter()
            .map(|route| route.page)
            .find(|page| page.slug() == slug)
    }

    /// The document title of the page.
    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Beranda",
            Page::Dashboard => "Dashboard",
            Page::PhoneVerification => "Verifikasi Nomor",
            Page::Profile => "Profil",
        }
    }
}

/// An entry of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// The exact path of the route.
    pub path: &'static str,
    /// The page served at `path`.
    pub page: Page,
}

/// All routes of the application, nested under the root layout.
///
/// There is no catch-all route, unknown paths are resolved to
/// [Error::RouteNotFound].
pub const ROUTE_TABLE: &[Route] = &[
    Route {
        path: endpoints::ROOT,
        page: Page::Home,
    },
    Route {
        path: endpoints::DASHBOARD_VIEW,
        page: Page::Dashboard,
    },
    Route {
        path: endpoints::PHONE_VERIFICATION_VIEW,
        page: Page::PhoneVerification,
    },
    Route {
        path: endpoints::PROFILE_VIEW,
        page: Page::Profile,
    },
];

/// Find the page for `path`.
///
/// Paths must match exactly, although a single trailing slash is ignored for
/// paths other than the root.
///
/// # Errors
/// Returns [Error::RouteNotFound] if no route matches.
pub fn resolve(path: &str) -> Result<Page, Error> {
    let normalized = match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() && !stripped.ends_with('/') => stripped,
        _ => path,
    };

    ROUTE_TABLE
        .iter()
        .find(|route| route.path == normalized)
        .map(|route| route.page)
        .ok_or_else(|| Error::RouteNotFound(path.to_owned()))
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::{Page, ROUTE_TABLE, resolve};

    #[test]
    fn resolves_every_route() {
        assert_eq!(resolve("/"), Ok(Page::Home));
        assert_eq!(resolve("/dashboard"), Ok(Page::Dashboard));
        assert_eq!(resolve("/phone-verification"), Ok(Page::PhoneVerification));
        assert_eq!(resolve("/profile"), Ok(Page::Profile));
    }

    #[test]
    fn root_matches_exactly() {
        assert_eq!(
            resolve("/dashboard/settings"),
            Err(Error::RouteNotFound("/dashboard/settings".to_owned()))
        );
        assert_eq!(resolve("//"), Err(Error::RouteNotFound("//".to_owned())));
    }

    #[test]
    fn ignores_single_trailing_slash() {
        assert_eq!(resolve("/profile/"), Ok(Page::Profile));
    }

    #[test]
    fn unknown_path_is_not_found() {
        assert_eq!(
            resolve("/unknown-path"),
            Err(Error::RouteNotFound("/unknown-path".to_owned()))
        );
    }

    #[test]
    fn slugs_round_trip() {
        for route in ROUTE_TABLE {
            assert_eq!(Page::from_slug(route.page.slug()), Some(route.page));
            assert_eq!(resolve(route.page.path()), Ok(route.page));
        }

        assert_eq!(Page::from_slug("error"), None);
    }
}
