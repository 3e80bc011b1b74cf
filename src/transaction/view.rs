//! HTML rendering for the transaction history panel.

use maud::{Markup, html};

use crate::{
    Error, endpoints,
    html::{BADGE_STYLE, BUTTON_PAY_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE, format_rupiah},
    timezone::ViewerTimeZone,
};

use super::{
    expiry::display_expiry,
    models::{Payment, Transaction},
    panel::{PanelLoad, PanelState},
};

/// The ID of the panel's root element, the target of fetch and refresh swaps.
const PANEL_ID: &str = "transaction-history";

fn status_badge(payment: &Payment) -> Markup {
    let (label, style) = match payment {
        Payment::Paid { .. } => ("Paid", "border-[#67ACE8] text-[#67ACE8]"),
        Payment::Unpaid { .. } => ("Unpaid", "border-[#E89895] text-[#E89895]"),
    };

    html!(
        span class={ (BADGE_STYLE) " " (style) } data-status=(label.to_lowercase()) { (label) }
    )
}

/// Render the card for the transaction at `index` of a list of `tx_len` transactions.
pub fn transaction_card(
    transaction: &Transaction,
    index: usize,
    tx_len: usize,
    zone: ViewerTimeZone,
) -> Result<Markup, Error> {
    let expiry = display_expiry(transaction, zone)?;
    let margin = if index + 1 == tx_len { "mb-0" } else { "mb-4" };

    Ok(html! {
        div
            class={ (margin) " " (CARD_STYLE) }
            data-transaction-id=(transaction.id.as_str())
        {
            div class="flex items-center gap-3"
            {
                span class={ (BADGE_STYLE) " border-transparent bg-[#BF8E50] text-white" }
                {
                    "Premium"
                }

                (status_badge(&transaction.payment))
            }

            p class="text-[#7B7B7B] font-medium text-sm my-4"
            {
                "Berlaku hingga: "
                span data-expiry { (expiry) }
            }

            div class="flex justify-between items-center"
            {
                p class="text-[#363636] font-bold" data-price
                {
                    (format_rupiah(transaction.price))
                }

                @if let Payment::Unpaid { qr_url } = &transaction.payment {
                    a
                        href=(qr_url)
                        target="_blank"
                        rel="noopener noreferrer"
                        class=(BUTTON_PAY_STYLE)
                    {
                        "Bayar"
                    }
                }
            }
        }
    })
}

fn placeholder_message(text: &str, emphasis: &str) -> Markup {
    html!(
        p class={ "text-[#7B7B7B] text-center " (emphasis) " " (CARD_STYLE) } { (text) }
    )
}

fn refresh_button() -> Markup {
    html!(
        div class="flex justify-end mx-6 mb-4"
        {
            button
                type="button"
                class=(BUTTON_SECONDARY_STYLE)
                hx-post=(endpoints::REFRESH_TRANSACTIONS)
                hx-target={ "#" (PANEL_ID) }
                hx-swap="outerHTML"
            {
                "Muat ulang"
            }
        }
    )
}

/// Render the panel in `state`.
///
/// In the loading state the panel requests the transaction list as soon as
/// it is swapped into the page and replaces itself with the response.
pub fn panel_view(state: &PanelState, zone: ViewerTimeZone) -> Result<Markup, Error> {
    let markup = match state {
        PanelState::Loading => html! {
            section
                id=(PANEL_ID)
                aria-busy="true"
                hx-get=(endpoints::TRANSACTION_HISTORY)
                hx-trigger="load"
                hx-swap="outerHTML"
            {
                (placeholder_message("Loading...", "font-bold italic"))
            }
        },
        PanelState::Empty => html! {
            section id=(PANEL_ID)
            {
                (refresh_button())
                (placeholder_message("Belum ada transaksi", "font-medium"))
            }
        },
        PanelState::Populated(transactions) => {
            let tx_len = transactions.len();
            let cards = transactions
                .iter()
                .enumerate()
                .map(|(index, transaction)| transaction_card(transaction, index, tx_len, zone))
                .collect::<Result<Vec<_>, _>>()?;

            html! {
                section id=(PANEL_ID)
                {
                    (refresh_button())

                    @for card in cards {
                        (card)
                    }
                }
            }
        }
    };

    Ok(markup)
}

/// Render the response to a panel load: the panel plus its notification, if any.
pub fn panel_fragment(load: PanelLoad, zone: ViewerTimeZone) -> Result<Markup, Error> {
    let panel = panel_view(&load.state, zone)?;

    Ok(html! {
        (panel)

        @if let Some(alert) = load.alert {
            (alert.into_oob_html())
        }
    })
}
