//! This file defines the markup and a convenience function for creating the navigation bar.

use maud::{Markup, html};

use crate::{endpoints, route_table::Page};

/// A link in the navigation bar.
///
/// It will change appearance if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link {
    url: &'static str,
    title: &'static str,
    is_current: bool,
}

impl Link {
    fn page(page: Page, active_page: Option<Page>) -> Self {
        Self {
            url: page.path(),
            title: page.title(),
            is_current: active_page == Some(page),
        }
    }

    fn into_desktop_html(self) -> Markup {
        let style = if self.is_current {
            "block py-2 px-3 text-white bg-[#BF8E50] rounded-sm lg:bg-transparent
        lg:text-[#BF8E50] lg:p-0 dark:text-white"
        } else {
            "block py-2 px-3 text-gray-900 rounded-sm hover:bg-gray-100
        lg:hover:bg-transparent lg:border-0 lg:hover:text-[#BF8E50] lg:p-0
        dark:text-white dark:hover:bg-gray-700
        dark:hover:text-white lg:dark:hover:bg-transparent"
        };

        html!(
            a
                href=(self.url)
                class=(style)
                aria-current=[self.is_current.then_some("page")]
            {
                (self.title)
            }
        )
    }
}

pub struct NavBar {
    links: Vec<Link>,
}

impl NavBar {
    /// Get the navigation bar.
    ///
    /// The link to `active_page`, if any, is marked as active and displayed
    /// differently in the HTML.
    pub fn new(active_page: Option<Page>) -> NavBar {
        let links = vec![
            Link::page(Page::Home, active_page),
            Link::page(Page::Dashboard, active_page),
            Link::page(Page::Profile, active_page),
            Link {
                url: endpoints::LOG_OUT,
                title: "Keluar",
                is_current: false,
            },
        ];

        NavBar { links }
    }

    pub fn into_html(self) -> Markup {
        let bottom_link_class = |is_current: bool| -> &'static str {
            if is_current {
                "flex w-full min-w-0 items-center justify-center rounded-lg \
                bg-[#BF8E50]/10 px-2.5 py-2 text-xs font-semibold leading-tight \
                text-[#BF8E50] shadow-sm sm:px-4 sm:text-sm"
            } else {
                "flex w-full min-w-0 items-center justify-center rounded-lg \
                px-2.5 py-2 text-xs font-semibold leading-tight text-gray-600 \
                sm:px-4 sm:text-sm hover:text-[#BF8E50] dark:text-gray-300"
            }
        };

        // Template adapted from https://flowbite.com/docs/components/navbar/#default-navbar
        html!(
            nav class="bg-white border-gray-200 dark:bg-gray-900"
            {
                div
                    class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4"
                {
                    a
                        href=(endpoints::ROOT)
                        class="flex items-center space-x-3 rtl:space-x-reverse"
                    {
                        img
                            src="/static/favicon-128x128.png"
                            alt="Premium Logo"
                            class="h-8"
                        ;

                        span
                            class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white"
                        {
                            "Premium"
                        }
                    }

                    div class="hidden w-full lg:block lg:w-auto"
                    {
                        ul
                            class="font-medium flex flex-col p-4 lg:p-0 mt-4
                            border border-gray-100 rounded bg-gray-50
                            lg:flex-row lg:space-x-8 rtl:space-x-reverse lg:mt-0
                            lg:border-0 lg:bg-white dark:bg-gray-800
                            lg:dark:bg-gray-900 dark:border-gray-700"
                        {
                            @for link in self.links.clone() {
                                li { (link.into_desktop_html()) }
                            }
                        }
                    }
                }
            }

            nav class="fixed inset-x-0 bottom-0 z-40 lg:hidden"
            {
                div class="mx-auto max-w-screen-xl px-4 pb-4"
                {
                    ul
                        class="grid grid-cols-4 gap-2 px-4 py-3 rounded-xl border
                        border-gray-200 bg-white/95 shadow-lg backdrop-blur
                        dark:border-gray-700 dark:bg-gray-900/95"
                        aria-label="Primary"
                    {
                        @for link in &self.links {
                            li class="min-w-0" {
                                a
                                    href=(link.url)
                                    class=(bottom_link_class(link.is_current))
                                    aria-current=[link.is_current.then_some("page")]
                                {
                                    span class="truncate" { (link.title) }
                                }
                            }
                        }
                    }
                }
            }
        )
    }
}

#[cfg(test)]
mod nav_bar_tests {
    use scraper::Html;

    use crate::{
        endpoints,
        navigation::NavBar,
        route_table::{Page, ROUTE_TABLE},
        test_utils::{assert_valid_html, select_text},
    };

    #[test]
    fn set_active_page() {
        for route in ROUTE_TABLE {
            let nav_bar = NavBar::new(Some(route.page));

            for link in nav_bar.links {
                assert_eq!(
                    link.is_current,
                    link.url == route.page.path(),
                    "Link {} has the wrong active state on {}",
                    link.url,
                    route.path
                );
            }
        }
    }

    #[test]
    fn no_active_link_without_page() {
        let nav_bar = NavBar::new(None);

        assert!(nav_bar.links.iter().all(|link| !link.is_current));
    }

    #[test]
    fn log_out_is_never_active() {
        let nav_bar = NavBar::new(Some(Page::Profile));

        let log_out = nav_bar
            .links
            .iter()
            .find(|link| link.url == endpoints::LOG_OUT)
            .expect("Could not find log out link");
        assert!(!log_out.is_current);
    }

    #[test]
    fn marks_current_link_in_html() {
        let html = Html::parse_fragment(&NavBar::new(Some(Page::Dashboard)).into_html().into_string());

        assert_valid_html(&html);
        assert_eq!(
            select_text(&html, "a[aria-current=page]"),
            vec!["Dashboard", "Dashboard"]
        );
    }
}
