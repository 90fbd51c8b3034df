//! Error types for ticket construction and purchase processing.
//!
//! Three layers, from narrowest to widest:
//!
//! - [`TicketError`]: a value could not be constructed (bad category label, bad count)
//! - [`InvalidPurchase`]: a purchase broke a business rule and was rejected before
//!   any collaborator was contacted
//! - [`PurchaseError`]: everything [`TicketService::purchase_tickets`] can return,
//!   including failures raised by the payment and reservation collaborators
//!
//! [`TicketService::purchase_tickets`]: crate::service::TicketService::purchase_tickets

use thiserror::Error;

/// Result alias for value construction.
pub type Result<T> = std::result::Result<T, TicketError>;

/// Errors raised while constructing ticket values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TicketError {
    /// A constructor argument was outside its accepted domain
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl TicketError {
    /// Create an `InvalidArgument` error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

/// A purchase rejected by business rules.
///
/// Every variant maps to a fixed [`reason`](Self::reason) string. The `Display`
/// output adds context (the offending label, the limit that was hit).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPurchase {
    /// Account id was not a positive integer
    #[error("invalid account")]
    InvalidAccount,

    /// More tickets were requested than a single purchase allows
    #[error("ticket limit exceeded: {requested} requested, at most {limit} allowed")]
    TicketLimitExceeded {
        /// Total tickets across all requests
        requested: u64,
        /// Configured maximum per purchase
        limit: u32,
    },

    /// Child or infant tickets were requested without an adult ticket
    #[error("adult required: child and infant tickets need an adult ticket")]
    AdultRequired,

    /// A request named a category outside ADULT, CHILD, INFANT
    #[error("unknown category: {category}")]
    UnknownCategory {
        /// The unrecognised label, as received
        category: String,
    },
}

impl InvalidPurchase {
    /// Short, stable reason for the rejection.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidAccount => "invalid account",
            Self::TicketLimitExceeded { .. } => "ticket limit exceeded",
            Self::AdultRequired => "adult required",
            Self::UnknownCategory { .. } => "unknown category",
        }
    }
}

/// Errors returned by a purchase.
///
/// Collaborator failures carry the collaborator's own error untouched; use
/// [`std::error::Error::source`] or `anyhow::Error::downcast_ref` to get at it.
#[derive(Debug, Error)]
pub enum PurchaseError {
    /// The purchase was rejected by validation
    #[error("Invalid purchase: {0}")]
    Invalid(#[from] InvalidPurchase),

    /// The payment collaborator failed; no seats were reserved
    #[error("Payment failed: {0}")]
    Payment(#[source] anyhow::Error),

    /// The seat reservation collaborator failed after payment was taken
    #[error("Seat reservation failed: {0}")]
    Reservation(#[source] anyhow::Error),
}

impl PurchaseError {
    /// The validation rejection, if this failure is one.
    #[must_use]
    pub const fn as_invalid(&self) -> Option<&InvalidPurchase> {
        match self {
            Self::Invalid(rejection) => Some(rejection),
            Self::Payment(_) | Self::Reservation(_) => None,
        }
    }
}
