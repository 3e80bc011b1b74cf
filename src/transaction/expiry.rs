//! Computes when a subscription ends and how that date is shown to the viewer.

use time::{
    Duration, OffsetDateTime, format_description::BorrowedFormatItem,
    macros::format_description,
};

use crate::{Error, timezone::ViewerTimeZone};

use super::models::{Payment, Transaction};

/// The length of a subscription month.
///
/// Months are a fixed 30 days rather than calendar months.
pub const MONTH: Duration = Duration::seconds(30 * 24 * 60 * 60);

/// The display format for dates, e.g. "31/01/2024, 00:00".
const DISPLAY_FORMAT: &[BorrowedFormatItem] =
    format_description!("[day]/[month]/[year], [hour]:[minute]");

/// The instant the subscription duration is counted from.
///
/// This is the payment time for paid transactions and the payment deadline
/// for unpaid transactions.
pub fn anchor(transaction: &Transaction) -> OffsetDateTime {
    match transaction.payment {
        Payment::Paid { paid_at } => paid_at,
        Payment::Unpaid { .. } => transaction.expired_at,
    }
}

/// The instant the subscription bought by `transaction` ends.
///
/// # Errors
/// Returns [Error::SubscriptionOverflow] if the end date cannot be represented.
pub fn subscription_end(transaction: &Transaction) -> Result<OffsetDateTime, Error> {
    let months =
        i32::try_from(transaction.duration_in_months).map_err(|_| Error::SubscriptionOverflow)?;

    MONTH
        .checked_mul(months)
        .and_then(|duration| anchor(transaction).checked_add(duration))
        .ok_or(Error::SubscriptionOverflow)
}

/// Format `instant` in the viewer's time zone as "DD/MM/YYYY, HH:mm".
pub fn format_in_zone(instant: OffsetDateTime, zone: ViewerTimeZone) -> Result<String, Error> {
    zone.convert(instant)
        .format(DISPLAY_FORMAT)
        .map_err(|error| Error::DateFormatError(error.to_string()))
}

/// Whether a subscription ending at `end` is still running at `now`.
///
/// Both instants are compared in whole seconds.
pub fn is_active(end: OffsetDateTime, now: OffsetDateTime) -> bool {
    end.unix_timestamp() > now.unix_timestamp()
}

/// The "valid until" text for a transaction card.
///
/// Paid transactions show when the subscription ends, unpaid transactions
/// show their payment deadline.
pub fn display_expiry(transaction: &Transaction, zone: ViewerTimeZone) -> Result<String, Error> {
    let instant = match transaction.payment {
        Payment::Paid { .. } => subscription_end(transaction)?,
        Payment::Unpaid { .. } => transaction.expired_at,
    };

    format_in_zone(instant, zone)
}

/// The display text for the currently active subscription, if any.
///
/// Every transaction's end instant is evaluated and the latest one that is
/// still active at `now` wins, so the result does not depend on list order.
/// Returns `None` when no subscription is active.
pub fn active_subscription_display(
    transactions: &[Transaction],
    now: OffsetDateTime,
    zone: ViewerTimeZone,
) -> Result<Option<String>, Error> {
    let mut latest_end: Option<OffsetDateTime> = None;

    for transaction in transactions {
        let end = subscription_end(transaction)?;

        if is_active(end, now) {
            latest_end = Some(latest_end.map_or(end, |latest| latest.max(end)));
        }
    }

    latest_end.map(|end| format_in_zone(end, zone)).transpose()
}
