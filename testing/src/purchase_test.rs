//! Ergonomic testing utilities for ticket purchases
//!
//! This module provides a fluent API for testing purchases with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // PurchaseTest is the natural name

use crate::mocks::{Call, recording_collaborators};
use cinema_tickets_core::{OrderLine, PurchaseError, PurchasePolicy, TicketService};

/// Outcome of the purchase under test
pub type Outcome = Result<(), PurchaseError>;

/// Type alias for outcome assertion functions
type OutcomeAssertion = Box<dyn FnOnce(&Outcome)>;

/// Type alias for collaborator call assertion functions
type CallAssertion = Box<dyn FnOnce(&[Call])>;

/// Fluent API for testing purchases with Given-When-Then syntax
///
/// The purchase runs against recording collaborators that share one call log, so
/// assertions can check both what was charged and the order of the calls.
///
/// # Example
///
/// ```
/// use cinema_tickets_testing::{child, infant, PurchaseTest};
///
/// PurchaseTest::new()
///     .given_account(1)
///     .given_requests([child(1), infant(1)])
///     .when_purchased()
///     .then_rejected_with("adult required")
///     .then_no_collaborator_calls()
///     .run();
/// ```
pub struct PurchaseTest {
    policy: PurchasePolicy,
    account_id: Option<i64>,
    lines: Option<Vec<OrderLine>>,
    purchased: bool,
    outcome_assertions: Vec<OutcomeAssertion>,
    call_assertions: Vec<CallAssertion>,
}

impl PurchaseTest {
    /// Create a new purchase test using the default policy
    #[must_use]
    pub fn new() -> Self {
        Self {
            policy: PurchasePolicy::default(),
            account_id: None,
            lines: None,
            purchased: false,
            outcome_assertions: Vec::new(),
            call_assertions: Vec::new(),
        }
    }

    /// Use a custom policy
    #[must_use]
    pub fn with_policy(mut self, policy: PurchasePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the purchasing account (Given)
    #[must_use]
    pub fn given_account(mut self, account_id: i64) -> Self {
        self.account_id = Some(account_id);
        self
    }

    /// Set the requested tickets (Given)
    ///
    /// Accepts checked [`TicketRequest`](cinema_tickets_core::TicketRequest)s or raw
    /// [`OrderLine`]s.
    #[must_use]
    pub fn given_requests<I, T>(mut self, requests: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OrderLine>,
    {
        self.lines = Some(requests.into_iter().map(Into::into).collect());
        self
    }

    /// Purchase the tickets (When)
    #[must_use]
    pub fn when_purchased(mut self) -> Self {
        self.purchased = true;
        self
    }

    /// Add an assertion about the outcome (Then)
    #[must_use]
    pub fn then_outcome<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&Outcome) + 'static,
    {
        self.outcome_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the collaborator calls (Then)
    #[must_use]
    pub fn then_calls<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Call]) + 'static,
    {
        self.call_assertions.push(Box::new(assertion));
        self
    }

    /// Assert that the purchase succeeded
    #[must_use]
    pub fn then_succeeds(self) -> Self {
        self.then_outcome(assertions::assert_succeeded)
    }

    /// Assert that validation rejected the purchase with `reason`
    #[must_use]
    pub fn then_rejected_with(self, reason: &'static str) -> Self {
        self.then_outcome(move |outcome| assertions::assert_rejected_with(outcome, reason))
    }

    /// Assert that exactly one payment of `units` was taken
    #[must_use]
    pub fn then_charged(self, units: u64) -> Self {
        self.then_calls(move |calls| assertions::assert_charged(calls, units))
    }

    /// Assert that exactly one reservation of `seats` was made, after the payment
    #[must_use]
    pub fn then_reserved(self, seats: u32) -> Self {
        self.then_calls(move |calls| assertions::assert_reserved_after_payment(calls, seats))
    }

    /// Assert that neither collaborator was called
    #[must_use]
    pub fn then_no_collaborator_calls(self) -> Self {
        self.then_calls(assertions::assert_no_calls)
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if the account, requests, or `when_purchased()` is not set,
    /// or if any assertions fail.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let account_id = self
            .account_id
            .expect("Account must be set with given_account()");

        let lines = self
            .lines
            .expect("Requests must be set with given_requests()");

        assert!(self.purchased, "Purchase must be triggered with when_purchased()");

        let (log, payments, reservations) = recording_collaborators();
        let service = TicketService::from_policy(self.policy, payments, reservations);

        // Execute purchase
        let outcome = service.purchase_tickets(account_id, &lines);
        let calls = log.calls();

        // Run outcome assertions
        for assertion in self.outcome_assertions {
            assertion(&outcome);
        }

        // Run call assertions
        for assertion in self.call_assertions {
            assertion(&calls);
        }
    }
}

impl Default for PurchaseTest {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper assertions for purchase outcomes and collaborator calls
pub mod assertions {
    use super::Outcome;
    use crate::mocks::Call;

    /// Assert that the purchase succeeded
    ///
    /// # Panics
    ///
    /// Panics if the outcome is an error.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_succeeded(outcome: &Outcome) {
        if let Err(err) = outcome {
            panic!("Expected purchase to succeed, but it failed: {err}");
        }
    }

    /// Assert that validation rejected the purchase with `reason`
    ///
    /// # Panics
    ///
    /// Panics if the purchase succeeded, failed in a collaborator, or was rejected
    /// for another reason.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_rejected_with(outcome: &Outcome, reason: &str) {
        match outcome {
            Ok(()) => panic!("Expected rejection {reason:?}, but purchase succeeded"),
            Err(err) => match err.as_invalid() {
                Some(rejection) => assert_eq!(
                    rejection.reason(),
                    reason,
                    "Rejected for the wrong reason: {rejection}"
                ),
                None => panic!("Expected rejection {reason:?}, but a collaborator failed: {err}"),
            },
        }
    }

    /// Assert that exactly one payment of `units` was made
    ///
    /// # Panics
    ///
    /// Panics if the number of payments or the amount doesn't match.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_charged(calls: &[Call], units: u64) {
        let payments: Vec<u64> = calls
            .iter()
            .filter_map(|call| match call {
                Call::Payment { amount, .. } => Some(amount.units()),
                Call::Reservation { .. } => None,
            })
            .collect();
        assert_eq!(payments, vec![units], "Expected one payment of {units}");
    }

    /// Assert that exactly one reservation of `seats` was made, after a payment
    ///
    /// # Panics
    ///
    /// Panics if the calls are not exactly payment then reservation, or the seat
    /// count doesn't match.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_reserved_after_payment(calls: &[Call], seats: u32) {
        match calls {
            [Call::Payment { account_id: paid, .. }, Call::Reservation { account_id, seats: reserved }] =>
            {
                assert_eq!(*reserved, seats, "Reserved the wrong number of seats");
                assert_eq!(paid, account_id, "Payment and reservation accounts differ");
            }
            _ => panic!("Expected payment then reservation, but found {calls:?}"),
        }
    }

    /// Assert that no collaborator was called
    ///
    /// # Panics
    ///
    /// Panics if any call was recorded.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_calls(calls: &[Call]) {
        assert!(
            calls.is_empty(),
            "Expected no collaborator calls, but found {}: {:?}",
            calls.len(),
            calls
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::{adult, child, infant, raw_line};

    #[test]
    fn test_purchase_test_success() {
        PurchaseTest::new()
            .given_account(1)
            .given_requests([adult(10), child(5), infant(2)])
            .when_purchased()
            .then_succeeds()
            .then_charged(325)
            .then_reserved(15)
            .run();
    }

    #[test]
    fn test_purchase_test_rejection() {
        PurchaseTest::new()
            .given_account(1)
            .given_requests([
                OrderLine::from(adult(1)),
                OrderLine::from(child(1)),
                raw_line("VIP", 1),
            ])
            .when_purchased()
            .then_rejected_with("unknown category")
            .then_no_collaborator_calls()
            .run();
    }

    #[test]
    fn test_purchase_test_custom_assertions() {
        PurchaseTest::new()
            .given_account(8)
            .given_requests([adult(2)])
            .when_purchased()
            .then_outcome(|outcome| assert!(outcome.is_ok()))
            .then_calls(|calls| assert_eq!(calls.len(), 2))
            .run();
    }

    #[test]
    #[should_panic(expected = "Account must be set")]
    fn test_purchase_test_requires_account() {
        PurchaseTest::new()
            .given_requests([adult(1)])
            .when_purchased()
            .run();
    }

    #[test]
    fn test_assertions_no_calls() {
        assertions::assert_no_calls(&[]);
    }
}
