//! # Cinema Tickets Testing
//!
//! Testing utilities and helpers for cinema ticket purchases.
//!
//! This crate provides:
//! - Recording and failing implementations of the collaborator traits
//! - Request builders
//! - A Given-When-Then purchase harness ([`PurchaseTest`])
//! - Property-based testing strategies
//!
//! ## Example
//!
//! ```
//! use cinema_tickets_testing::{adult, child, PurchaseTest};
//!
//! PurchaseTest::new()
//!     .given_account(1)
//!     .given_requests([adult(2), child(1)])
//!     .when_purchased()
//!     .then_charged(65)
//!     .then_reserved(3)
//!     .run();
//! ```

pub mod purchase_test;

pub use purchase_test::PurchaseTest;

/// Mock implementations of the collaborator traits
pub mod mocks {
    use cinema_tickets_core::{AccountId, Money, PaymentProcessor, SeatReservation};
    use std::sync::{Arc, Mutex, PoisonError};

    /// A single collaborator call
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Call {
        /// `make_payment(account_id, amount)`
        Payment {
            /// Charged account
            account_id: AccountId,
            /// Amount charged
            amount: Money,
        },
        /// `reserve_seat(account_id, seats)`
        Reservation {
            /// Account the seats are for
            account_id: AccountId,
            /// Seats reserved
            seats: u32,
        },
    }

    /// Shared, ordered record of collaborator calls
    ///
    /// Cloning shares the underlying log, so one log can be handed to both recording
    /// collaborators to observe the order of payment and reservation.
    #[derive(Debug, Clone, Default)]
    pub struct CallLog {
        calls: Arc<Mutex<Vec<Call>>>,
    }

    impl CallLog {
        /// Create an empty log
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        fn record(&self, call: Call) {
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(call);
        }

        /// Snapshot of every call so far, oldest first
        #[must_use]
        pub fn calls(&self) -> Vec<Call> {
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// Payments recorded so far
        #[must_use]
        pub fn payments(&self) -> Vec<(AccountId, Money)> {
            self.calls()
                .into_iter()
                .filter_map(|call| match call {
                    Call::Payment { account_id, amount } => Some((account_id, amount)),
                    Call::Reservation { .. } => None,
                })
                .collect()
        }

        /// Reservations recorded so far
        #[must_use]
        pub fn reservations(&self) -> Vec<(AccountId, u32)> {
            self.calls()
                .into_iter()
                .filter_map(|call| match call {
                    Call::Reservation { account_id, seats } => Some((account_id, seats)),
                    Call::Payment { .. } => None,
                })
                .collect()
        }

        /// Whether no collaborator has been called
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.calls().is_empty()
        }
    }

    /// Payment processor that records every call and succeeds
    #[derive(Debug, Clone, Default)]
    pub struct RecordingPaymentProcessor {
        log: CallLog,
    }

    impl RecordingPaymentProcessor {
        /// Record into `log`
        #[must_use]
        pub const fn new(log: CallLog) -> Self {
            Self { log }
        }
    }

    impl PaymentProcessor for RecordingPaymentProcessor {
        fn make_payment(&self, account_id: AccountId, amount: Money) -> anyhow::Result<()> {
            self.log.record(Call::Payment { account_id, amount });
            Ok(())
        }
    }

    /// Seat reservation that records every call and succeeds
    #[derive(Debug, Clone, Default)]
    pub struct RecordingSeatReservation {
        log: CallLog,
    }

    impl RecordingSeatReservation {
        /// Record into `log`
        #[must_use]
        pub const fn new(log: CallLog) -> Self {
            Self { log }
        }
    }

    impl SeatReservation for RecordingSeatReservation {
        fn reserve_seat(&self, account_id: AccountId, seats: u32) -> anyhow::Result<()> {
            self.log.record(Call::Reservation { account_id, seats });
            Ok(())
        }
    }

    /// Error returned by the failing collaborators
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SimulatedFailure(pub String);

    impl std::fmt::Display for SimulatedFailure {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "simulated failure: {}", self.0)
        }
    }

    impl std::error::Error for SimulatedFailure {}

    /// Payment processor that records the call, then fails
    #[derive(Debug, Clone)]
    pub struct FailingPaymentProcessor {
        log: CallLog,
        message: String,
    }

    impl FailingPaymentProcessor {
        /// Record into `log` and fail with `message`
        #[must_use]
        pub fn new(log: CallLog, message: impl Into<String>) -> Self {
            Self {
                log,
                message: message.into(),
            }
        }
    }

    impl PaymentProcessor for FailingPaymentProcessor {
        fn make_payment(&self, account_id: AccountId, amount: Money) -> anyhow::Result<()> {
            self.log.record(Call::Payment { account_id, amount });
            Err(SimulatedFailure(self.message.clone()).into())
        }
    }

    /// Seat reservation that records the call, then fails
    #[derive(Debug, Clone)]
    pub struct FailingSeatReservation {
        log: CallLog,
        message: String,
    }

    impl FailingSeatReservation {
        /// Record into `log` and fail with `message`
        #[must_use]
        pub fn new(log: CallLog, message: impl Into<String>) -> Self {
            Self {
                log,
                message: message.into(),
            }
        }
    }

    impl SeatReservation for FailingSeatReservation {
        fn reserve_seat(&self, account_id: AccountId, seats: u32) -> anyhow::Result<()> {
            self.log.record(Call::Reservation { account_id, seats });
            Err(SimulatedFailure(self.message.clone()).into())
        }
    }

    /// A payment/reservation pair sharing one [`CallLog`]
    #[must_use]
    pub fn recording_collaborators() -> (CallLog, RecordingPaymentProcessor, RecordingSeatReservation)
    {
        let log = CallLog::new();
        (
            log.clone(),
            RecordingPaymentProcessor::new(log.clone()),
            RecordingSeatReservation::new(log),
        )
    }
}

/// Request builders and test setup
pub mod helpers {
    use cinema_tickets_core::{OrderLine, TicketCategory, TicketRequest};
    use std::num::NonZeroU32;

    fn build(category: TicketCategory, count: u32) -> TicketRequest {
        match TicketRequest::new(category, count) {
            Ok(request) => request,
            Err(err) => unreachable_request(&err.to_string()),
        }
    }

    #[allow(clippy::panic)]
    fn unreachable_request(message: &str) -> ! {
        panic!("invalid request in test setup: {message}")
    }

    /// `count` adult tickets
    ///
    /// # Panics
    ///
    /// Panics if `count` is zero.
    #[must_use]
    pub fn adult(count: u32) -> TicketRequest {
        build(TicketCategory::Adult, count)
    }

    /// `count` child tickets
    ///
    /// # Panics
    ///
    /// Panics if `count` is zero.
    #[must_use]
    pub fn child(count: u32) -> TicketRequest {
        build(TicketCategory::Child, count)
    }

    /// `count` infant tickets
    ///
    /// # Panics
    ///
    /// Panics if `count` is zero.
    #[must_use]
    pub fn infant(count: u32) -> TicketRequest {
        build(TicketCategory::Infant, count)
    }

    /// Raw order line with an arbitrary label
    ///
    /// # Panics
    ///
    /// Panics if `count` is zero.
    #[must_use]
    pub fn raw_line(category: &str, count: u32) -> OrderLine {
        match NonZeroU32::new(count) {
            Some(count) => OrderLine::new(category, count),
            None => unreachable_request("order line count must be positive"),
        }
    }

    /// Install a test subscriber so `tracing` output shows up with `--nocapture`.
    ///
    /// Safe to call from many tests; only the first call installs it.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "cinema_tickets_core=debug".into()),
            )
            .try_init();
    }
}

/// Property-based testing strategies using proptest
pub mod properties {
    use cinema_tickets_core::{TicketCategory, TicketRequest};
    use proptest::prelude::*;

    /// Any ticket category
    pub fn category() -> impl Strategy<Value = TicketCategory> {
        prop::sample::select(TicketCategory::ALL.to_vec())
    }

    /// A single request of 1..=`max_count` tickets
    pub fn request(max_count: u32) -> impl Strategy<Value = TicketRequest> {
        (category(), 1..=max_count.max(1))
            .prop_filter_map("count must be positive", |(category, count)| {
                TicketRequest::new(category, count).ok()
            })
    }

    /// Requests that satisfy every rule at the default limit: total of at most 25
    /// tickets, starting with an adult request
    pub fn valid_requests() -> impl Strategy<Value = Vec<TicketRequest>> {
        (1_u32..=25, prop::collection::vec(request(25), 0..6)).prop_map(|(adults, rest)| {
            let mut remaining = 25 - adults;
            let mut requests: Vec<TicketRequest> =
                TicketRequest::new(TicketCategory::Adult, adults).into_iter().collect();
            for extra in rest {
                let count = extra.count().min(remaining);
                if let Ok(request) = TicketRequest::new(extra.category(), count) {
                    remaining -= count;
                    requests.push(request);
                }
            }
            requests
        })
    }

    /// Requests totalling more than 25 tickets (still including an adult)
    pub fn oversized_requests() -> impl Strategy<Value = Vec<TicketRequest>> {
        (26_u32..=200, prop::collection::vec(request(50), 0..4)).prop_map(|(adults, rest)| {
            TicketRequest::new(TicketCategory::Adult, adults)
                .into_iter()
                .chain(rest)
                .collect()
        })
    }

    /// Non-empty requests made only of children and infants
    pub fn unaccompanied_requests() -> impl Strategy<Value = Vec<TicketRequest>> {
        let minor = prop::sample::select(vec![TicketCategory::Child, TicketCategory::Infant]);
        prop::collection::vec((minor, 1_u32..=5), 1..5).prop_map(|lines| {
            lines
                .into_iter()
                .filter_map(|(category, count)| TicketRequest::new(category, count).ok())
                .collect()
        })
    }

    /// Account ids that are not positive
    pub fn invalid_account_id() -> impl Strategy<Value = i64> {
        i64::MIN..=0
    }
}

// Re-export commonly used items
pub use helpers::{adult, child, infant, init_test_tracing, raw_line};
pub use mocks::{
    Call, CallLog, FailingPaymentProcessor, FailingSeatReservation, RecordingPaymentProcessor,
    RecordingSeatReservation, recording_collaborators,
};
