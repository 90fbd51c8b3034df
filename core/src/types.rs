//! Domain types for cinema ticket purchases.
//!
//! All values here are request-scoped: built when a purchase comes in, consumed by the
//! same call, and dropped afterwards.

use crate::error::{InvalidPurchase, Result, TicketError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::{IntErrorKind, NonZeroU32};
use std::str::FromStr;

// ============================================================================
// Ticket Category
// ============================================================================

/// Category of a cinema ticket
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TicketCategory {
    /// Adult ticket
    Adult,
    /// Child ticket (requires an adult in the same purchase)
    Child,
    /// Infant ticket (requires an adult, sits on the adult's lap)
    Infant,
}

impl TicketCategory {
    /// Every recognised category
    pub const ALL: [Self; 3] = [Self::Adult, Self::Child, Self::Infant];

    /// Canonical label (`ADULT`, `CHILD`, `INFANT`)
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Adult => "ADULT",
            Self::Child => "CHILD",
            Self::Infant => "INFANT",
        }
    }

    /// Whether a ticket of this category needs a physical seat
    #[must_use]
    pub const fn occupies_seat(self) -> bool {
        !matches!(self, Self::Infant)
    }

    /// Whether this category may only be bought alongside an adult ticket
    #[must_use]
    pub const fn requires_adult(self) -> bool {
        matches!(self, Self::Child | Self::Infant)
    }
}

impl FromStr for TicketCategory {
    type Err = TicketError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.label() == s)
            .ok_or_else(|| {
                TicketError::invalid_argument(format!(
                    "category must be ADULT, CHILD, or INFANT, got {s:?}"
                ))
            })
    }
}

impl fmt::Display for TicketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Ticket Lines
// ============================================================================

/// Anything the validator can read a (category, count) pair from.
///
/// [`TicketRequest`] is the checked form. [`OrderLine`] is the raw form that arrives
/// from outside (deserialized payloads), where the category label has not been
/// checked yet.
pub trait TicketLine {
    /// Category label as supplied
    fn category_label(&self) -> &str;

    /// Number of tickets on this line
    fn ticket_count(&self) -> u32;
}

impl<T: TicketLine + ?Sized> TicketLine for &T {
    fn category_label(&self) -> &str {
        (**self).category_label()
    }

    fn ticket_count(&self) -> u32 {
        (**self).ticket_count()
    }
}

/// Request for `count` tickets of one category
///
/// Immutable once built; the count is always at least one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "OrderLine", into = "OrderLine")]
pub struct TicketRequest {
    category: TicketCategory,
    count: NonZeroU32,
}

impl TicketRequest {
    /// Creates a request for `count` tickets of `category`.
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::InvalidArgument`] if `count` is zero.
    pub fn new(category: TicketCategory, count: u32) -> Result<Self> {
        let count = NonZeroU32::new(count).ok_or_else(|| {
            TicketError::invalid_argument("ticket count must be a positive integer")
        })?;
        Ok(Self { category, count })
    }

    pub(crate) const fn from_parts(category: TicketCategory, count: NonZeroU32) -> Self {
        Self { category, count }
    }

    /// Parses a request from untyped input, such as a form field or prompt answer.
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::InvalidArgument`] if the category is not one of
    /// `ADULT`, `CHILD`, `INFANT`, or if the count is not a positive integer
    /// (zero, negative, fractional and non-numeric values are all rejected).
    pub fn parse(category: &str, count: &str) -> Result<Self> {
        let category = category.parse()?;
        let count = count.trim().parse::<u32>().map_err(|err| {
            let message = if *err.kind() == IntErrorKind::PosOverflow {
                format!("ticket count must be at most {}, got {count:?}", u32::MAX)
            } else {
                format!("ticket count must be a positive integer, got {count:?}")
            };
            TicketError::invalid_argument(message)
        })?;
        Self::new(category, count)
    }

    /// The ticket category
    #[must_use]
    pub const fn category(&self) -> TicketCategory {
        self.category
    }

    /// Number of tickets requested
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count.get()
    }
}

impl TicketLine for TicketRequest {
    fn category_label(&self) -> &str {
        self.category.label()
    }

    fn ticket_count(&self) -> u32 {
        self.count()
    }
}

impl fmt::Display for TicketRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{}", self.category, self.count)
    }
}

/// Unchecked (category label, count) pair from an external payload
///
/// The label may name a category that does not exist; the validator reports that
/// as [`InvalidPurchase::UnknownCategory`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Category label as received
    pub category: String,
    /// Number of tickets
    pub count: NonZeroU32,
}

impl OrderLine {
    /// Creates a raw order line
    #[must_use]
    pub fn new(category: impl Into<String>, count: NonZeroU32) -> Self {
        Self {
            category: category.into(),
            count,
        }
    }
}

impl TicketLine for OrderLine {
    fn category_label(&self) -> &str {
        &self.category
    }

    fn ticket_count(&self) -> u32 {
        self.count.get()
    }
}

impl TryFrom<OrderLine> for TicketRequest {
    type Error = TicketError;

    fn try_from(line: OrderLine) -> Result<Self> {
        Ok(Self {
            category: line.category.parse()?,
            count: line.count,
        })
    }
}

impl From<TicketRequest> for OrderLine {
    fn from(request: TicketRequest) -> Self {
        Self::new(request.category.label(), request.count)
    }
}

// ============================================================================
// Account Identifier
// ============================================================================

/// Identifier of the purchasing account (always positive)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct AccountId(u64);

impl AccountId {
    /// Returns the raw identifier
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for AccountId {
    type Error = InvalidPurchase;

    fn try_from(raw: i64) -> std::result::Result<Self, InvalidPurchase> {
        u64::try_from(raw)
            .ok()
            .filter(|&id| id > 0)
            .map(Self)
            .ok_or(InvalidPurchase::InvalidAccount)
    }
}

impl From<AccountId> for u64 {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

impl FromStr for AccountId {
    type Err = InvalidPurchase;

    fn from_str(s: &str) -> std::result::Result<Self, InvalidPurchase> {
        let raw = s
            .trim()
            .parse::<i64>()
            .map_err(|_| InvalidPurchase::InvalidAccount)?;
        Self::try_from(raw)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Money Value Object
// ============================================================================

/// Amount payable, in whole currency units
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(u64);

impl Money {
    /// Zero amount
    pub const ZERO: Self = Self(0);

    /// Creates an amount of `units` whole currency units
    #[must_use]
    pub const fn from_units(units: u64) -> Self {
        Self(units)
    }

    /// Returns the amount in whole currency units
    #[must_use]
    pub const fn units(&self) -> u64 {
        self.0
    }

    /// Checks if the amount is zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds two amounts, clamping at the maximum representable value
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Multiplies by a quantity, clamping at the maximum representable value
    #[must_use]
    pub fn saturating_mul(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "£{}", self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

// ============================================================================
// Purchase Order
// ============================================================================

/// A purchase that passed validation
///
/// Only [`PurchaseValidator::validate`](crate::validation::PurchaseValidator::validate)
/// builds one, so holding a `PurchaseOrder` means the account id is positive, the
/// total is within the limit, every category is recognised and an adult is present
/// whenever a child or infant is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PurchaseOrder {
    account_id: AccountId,
    requests: Vec<TicketRequest>,
}

impl PurchaseOrder {
    pub(crate) const fn new(account_id: AccountId, requests: Vec<TicketRequest>) -> Self {
        Self {
            account_id,
            requests,
        }
    }

    /// Purchasing account
    #[must_use]
    pub const fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Requests in the order they were supplied
    #[must_use]
    pub fn requests(&self) -> &[TicketRequest] {
        &self.requests
    }

    /// Total tickets across every request
    #[must_use]
    pub fn total_tickets(&self) -> u32 {
        self.requests
            .iter()
            .fold(0, |total, request| total.saturating_add(request.count()))
    }

    /// Whether the order holds no tickets at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}
