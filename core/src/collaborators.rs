//! External collaborators: payment processing and seat reservation.
//!
//! The service talks to both through these traits only, so a real payment gateway or
//! booking system can be substituted without touching validation or pricing. Failures
//! are opaque to the service and are handed back to the caller unchanged.
//!
//! [`LoggingPaymentProcessor`] and [`LoggingSeatReservation`] are stand-ins that accept
//! every call and report it through `tracing`.

use crate::types::{AccountId, Money};
use std::sync::Arc;

/// Takes payment from an account
pub trait PaymentProcessor {
    /// Charge `amount` to `account_id`.
    ///
    /// # Errors
    ///
    /// Returns any processor-specific failure.
    fn make_payment(&self, account_id: AccountId, amount: Money) -> anyhow::Result<()>;
}

/// Reserves seats for an account
pub trait SeatReservation {
    /// Reserve `seats` seats for `account_id`.
    ///
    /// # Errors
    ///
    /// Returns any reservation-system failure.
    fn reserve_seat(&self, account_id: AccountId, seats: u32) -> anyhow::Result<()>;
}

impl<T: PaymentProcessor + ?Sized> PaymentProcessor for &T {
    fn make_payment(&self, account_id: AccountId, amount: Money) -> anyhow::Result<()> {
        (**self).make_payment(account_id, amount)
    }
}

impl<T: PaymentProcessor + ?Sized> PaymentProcessor for Box<T> {
    fn make_payment(&self, account_id: AccountId, amount: Money) -> anyhow::Result<()> {
        (**self).make_payment(account_id, amount)
    }
}

impl<T: PaymentProcessor + ?Sized> PaymentProcessor for Arc<T> {
    fn make_payment(&self, account_id: AccountId, amount: Money) -> anyhow::Result<()> {
        (**self).make_payment(account_id, amount)
    }
}

impl<T: SeatReservation + ?Sized> SeatReservation for &T {
    fn reserve_seat(&self, account_id: AccountId, seats: u32) -> anyhow::Result<()> {
        (**self).reserve_seat(account_id, seats)
    }
}

impl<T: SeatReservation + ?Sized> SeatReservation for Box<T> {
    fn reserve_seat(&self, account_id: AccountId, seats: u32) -> anyhow::Result<()> {
        (**self).reserve_seat(account_id, seats)
    }
}

impl<T: SeatReservation + ?Sized> SeatReservation for Arc<T> {
    fn reserve_seat(&self, account_id: AccountId, seats: u32) -> anyhow::Result<()> {
        (**self).reserve_seat(account_id, seats)
    }
}

/// Payment processor that accepts every payment and logs it
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingPaymentProcessor;

impl LoggingPaymentProcessor {
    /// Creates a new logging payment processor
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PaymentProcessor for LoggingPaymentProcessor {
    fn make_payment(&self, account_id: AccountId, amount: Money) -> anyhow::Result<()> {
        tracing::info!(
            account_id = account_id.get(),
            amount = amount.units(),
            "Payment of {amount} made for account {account_id}"
        );
        Ok(())
    }
}

/// Seat reservation that accepts every reservation and logs it
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingSeatReservation;

impl LoggingSeatReservation {
    /// Creates a new logging seat reservation
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SeatReservation for LoggingSeatReservation {
    fn reserve_seat(&self, account_id: AccountId, seats: u32) -> anyhow::Result<()> {
        tracing::info!(
            account_id = account_id.get(),
            seats,
            "Reserved {seats} seats for account {account_id}"
        );
        Ok(())
    }
}
