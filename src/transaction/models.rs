//! The transaction model and its validation from the API's JSON records.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::expiry::subscription_end;

/// An opaque identifier for a transaction.
///
/// The API may send the ID as a JSON string or integer, either way it is kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawTransactionId")]
pub struct TransactionId(String);

impl TransactionId {
    /// Create a transaction ID from its text form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The ID as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTransactionId {
    Text(String),
    Number(i64),
}

impl From<RawTransactionId> for TransactionId {
    fn from(value: RawTransactionId) -> Self {
        match value {
            RawTransactionId::Text(text) => Self(text),
            RawTransactionId::Number(number) => Self(number.to_string()),
        }
    }
}

/// Whether a transaction has been paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    /// The subscription has been paid for.
    Paid,
    /// The subscription is waiting for payment.
    Unpaid,
}

/// The JSON record for a transaction as sent by the subscription API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct TransactionRecord {
    id: TransactionId,
    status: TransactionStatus,
    duration_in_months: u32,
    #[serde(default, with = "time::serde::rfc3339::option")]
    paid_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    expired_at: OffsetDateTime,
    price: u64,
    #[serde(default)]
    qr_url: Option<String>,
}

/// The timestamp or link that only applies to one payment status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payment {
    /// The subscription was paid at `paid_at`.
    Paid {
        /// When the payment was made.
        paid_at: OffsetDateTime,
    },
    /// The subscription is still waiting for payment.
    Unpaid {
        /// The URL of the external payment page.
        qr_url: String,
    },
}

/// A purchase of a premium subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord", into = "TransactionRecord")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// How many months the subscription lasts, always at least one.
    pub duration_in_months: u32,
    /// The payment deadline for unpaid transactions.
    pub expired_at: OffsetDateTime,
    /// The price in whole rupiah.
    pub price: u64,
    /// The status specific payment details.
    pub payment: Payment,
}

impl Transaction {
    /// Whether the transaction has been paid.
    pub fn status(&self) -> TransactionStatus {
        match self.payment {
            Payment::Paid { .. } => TransactionStatus::Paid,
            Payment::Unpaid { .. } => TransactionStatus::Unpaid,
        }
    }
}

/// The reasons a transaction record from the API is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidTransaction {
    /// The subscription duration was zero months.
    #[error("transaction {0} has a duration of zero months")]
    ZeroDuration(String),

    /// A paid transaction did not say when it was paid.
    #[error("paid transaction {0} is missing paid_at")]
    MissingPaidAt(String),

    /// An unpaid transaction did not have a payment link.
    #[error("unpaid transaction {0} is missing qr_url")]
    MissingQrUrl(String),

    /// The subscription end date cannot be represented.
    #[error("the subscription end date of transaction {0} is out of range")]
    DurationOutOfRange(String),
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = InvalidTransaction;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        let id = record.id.as_str().to_owned();

        if record.duration_in_months == 0 {
            return Err(InvalidTransaction::ZeroDuration(id));
        }

        let payment = match record.status {
            TransactionStatus::Paid => Payment::Paid {
                paid_at: record
                    .paid_at
                    .ok_or_else(|| InvalidTransaction::MissingPaidAt(id.clone()))?,
            },
            TransactionStatus::Unpaid => match record.qr_url {
                Some(qr_url) if !qr_url.trim().is_empty() => Payment::Unpaid { qr_url },
                _ => return Err(InvalidTransaction::MissingQrUrl(id)),
            },
        };

        let transaction = Transaction {
            id: record.id,
            duration_in_months: record.duration_in_months,
            expired_at: record.expired_at,
            price: record.price,
            payment,
        };

        subscription_end(&transaction).map_err(|_| InvalidTransaction::DurationOutOfRange(id))?;

        Ok(transaction)
    }
}

impl From<Transaction> for TransactionRecord {
    fn from(transaction: Transaction) -> Self {
        let status = transaction.status();
        let (paid_at, qr_url) = match transaction.payment {
            Payment::Paid { paid_at } => (Some(paid_at), None),
            Payment::Unpaid { qr_url } => (None, Some(qr_url)),
        };

        Self {
            id: transaction.id,
            status,
            duration_in_months: transaction.duration_in_months,
            paid_at,
            expired_at: transaction.expired_at,
            price: transaction.price,
            qr_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::datetime;

    use super::{Payment, Transaction, TransactionId, TransactionStatus};

    #[test]
    fn parses_paid_transaction() {
        let value = json!({
            "id": "tx-1",
            "status": "PAID",
            "duration_in_months": 1,
            "paid_at": "2024-01-01T00:00:00Z",
            "expired_at": "2024-01-02T00:00:00Z",
            "price": 150000,
            "qr_url": "https://pay.example.com/qr/tx-1"
        });

        let transaction: Transaction = serde_json::from_value(value).unwrap();

        assert_eq!(transaction.id, TransactionId::new("tx-1"));
        assert_eq!(transaction.status(), TransactionStatus::Paid);
        assert_eq!(
            transaction.payment,
            Payment::Paid {
                paid_at: datetime!(2024-01-01 00:00 UTC)
            }
        );
        assert_eq!(transaction.price, 150_000);
    }

    #[test]
    fn parses_unpaid_transaction_with_numeric_id() {
        let value = json!({
            "id": 42,
            "status": "UNPAID",
            "duration_in_months": 3,
            "paid_at": null,
            "expired_at": "2024-06-15T10:30:00Z",
            "price": 400000,
            "qr_url": "https://pay.example.com/qr/42"
        });

        let transaction: Transaction = serde_json::from_value(value).unwrap();

        assert_eq!(transaction.id.as_str(), "42");
        assert_eq!(
            transaction.payment,
            Payment::Unpaid {
                qr_url: "https://pay.example.com/qr/42".to_owned()
            }
        );
        assert_eq!(transaction.expired_at, datetime!(2024-06-15 10:30 UTC));
    }

    #[test]
    fn rejects_paid_transaction_without_paid_at() {
        let value = json!({
            "id": "tx-1",
            "status": "PAID",
            "duration_in_months": 1,
            "paid_at": null,
            "expired_at": "2024-01-02T00:00:00Z",
            "price": 150000,
            "qr_url": ""
        });

        let error = serde_json::from_value::<Transaction>(value).unwrap_err();

        assert!(error.to_string().contains("missing paid_at"), "{error}");
    }

    #[test]
    fn rejects_unpaid_transaction_without_qr_url() {
        let value = json!({
            "id": "tx-2",
            "status": "UNPAID",
            "duration_in_months": 1,
            "expired_at": "2024-01-02T00:00:00Z",
            "price": 150000
        });

        let error = serde_json::from_value::<Transaction>(value).unwrap_err();

        assert!(error.to_string().contains("missing qr_url"), "{error}");
    }

    #[test]
    fn rejects_zero_duration() {
        let value = json!({
            "id": "tx-3",
            "status": "PAID",
            "duration_in_months": 0,
            "paid_at": "2024-01-01T00:00:00Z",
            "expired_at": "2024-01-02T00:00:00Z",
            "price": 0,
            "qr_url": null
        });

        let error = serde_json::from_value::<Transaction>(value).unwrap_err();

        assert!(error.to_string().contains("zero months"), "{error}");
    }

    #[test]
    fn rejects_unknown_status() {
        let value = json!({
            "id": "tx-4",
            "status": "REFUNDED",
            "duration_in_months": 1,
            "paid_at": "2024-01-01T00:00:00Z",
            "expired_at": "2024-01-02T00:00:00Z",
            "price": 0
        });

        assert!(serde_json::from_value::<Transaction>(value).is_err());
    }

    #[test]
    fn serializes_as_api_record() {
        let transaction = Transaction {
            id: TransactionId::new("tx-5"),
            duration_in_months: 12,
            expired_at: datetime!(2024-03-01 12:00 UTC),
            price: 1_200_000,
            payment: Payment::Paid {
                paid_at: datetime!(2024-02-28 09:15 UTC),
            },
        };

        let value = serde_json::to_value(&transaction).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "tx-5",
                "status": "PAID",
                "duration_in_months": 12,
                "paid_at": "2024-02-28T09:15:00Z",
                "expired_at": "2024-03-01T12:00:00Z",
                "price": 1200000,
                "qr_url": null
            })
        );
    }
}
