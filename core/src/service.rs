//! Ticket purchase service.
//!
//! Coordinates a purchase end to end:
//! 1. Validate the account id and ticket lines (fail fast, nothing is charged)
//! 2. Compute the amount payable and the seats to reserve
//! 3. Take payment
//! 4. Reserve seats
//!
//! Payment always happens before reservation. If reservation fails after payment has
//! been taken, nothing is refunded here; the caller receives
//! [`PurchaseError::Reservation`] and owns any compensation.

use crate::collaborators::{PaymentProcessor, SeatReservation};
use crate::config::PurchasePolicy;
use crate::error::PurchaseError;
use crate::pricing::PriceCalculator;
use crate::types::TicketLine;
use crate::validation::PurchaseValidator;

/// Ticket purchase service
///
/// Generic over the payment and reservation collaborators so that tests can inject
/// recording mocks and production code can inject real integrations.
#[derive(Debug, Clone)]
pub struct TicketService<P, R> {
    validator: PurchaseValidator,
    calculator: PriceCalculator,
    payments: P,
    reservations: R,
}

impl<P: PaymentProcessor, R: SeatReservation> TicketService<P, R> {
    /// Creates a service with the default purchase policy
    #[must_use]
    pub fn new(payments: P, reservations: R) -> Self {
        Self::from_policy(PurchasePolicy::default(), payments, reservations)
    }

    /// Creates a service enforcing `policy`
    #[must_use]
    pub const fn from_policy(policy: PurchasePolicy, payments: P, reservations: R) -> Self {
        Self {
            validator: PurchaseValidator::new(policy.max_tickets),
            calculator: PriceCalculator::new(policy.prices),
            payments,
            reservations,
        }
    }

    /// The validator used for every purchase
    #[must_use]
    pub const fn validator(&self) -> &PurchaseValidator {
        &self.validator
    }

    /// The calculator used for every purchase
    #[must_use]
    pub const fn calculator(&self) -> &PriceCalculator {
        &self.calculator
    }

    /// Purchase tickets for `account_id`.
    ///
    /// # Errors
    ///
    /// - [`PurchaseError::Invalid`] if validation fails; no collaborator is called
    /// - [`PurchaseError::Payment`] if payment fails; no seats are reserved
    /// - [`PurchaseError::Reservation`] if reservation fails after payment
    pub fn purchase_tickets<L: TicketLine>(
        &self,
        account_id: i64,
        lines: &[L],
    ) -> Result<(), PurchaseError> {
        let order = self.validator.validate(account_id, lines).inspect_err(|rejection| {
            tracing::warn!(
                account_id,
                reason = rejection.reason(),
                "Ticket purchase rejected: {rejection}"
            );
        })?;

        let account_id = order.account_id();
        let amount = self.calculator.total_amount(order.requests());
        let seats = self.calculator.total_seats(order.requests());

        tracing::debug!(
            account_id = account_id.get(),
            tickets = order.total_tickets(),
            amount = amount.units(),
            seats,
            "Purchase validated"
        );

        self.payments
            .make_payment(account_id, amount)
            .map_err(|error| {
                tracing::error!(
                    account_id = account_id.get(),
                    amount = amount.units(),
                    "Payment failed: {error:#}"
                );
                PurchaseError::Payment(error)
            })?;

        self.reservations
            .reserve_seat(account_id, seats)
            .map_err(|error| {
                tracing::error!(
                    account_id = account_id.get(),
                    seats,
                    "Seat reservation failed after payment was taken: {error:#}"
                );
                PurchaseError::Reservation(error)
            })?;

        tracing::info!(
            account_id = account_id.get(),
            amount = amount.units(),
            seats,
            "Ticket purchase completed"
        );

        Ok(())
    }
}
