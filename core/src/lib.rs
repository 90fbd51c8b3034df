//! # Cinema Tickets Core
//!
//! Validation, pricing and purchase orchestration for cinema ticket requests.
//!
//! ## Core Concepts
//!
//! - **`TicketRequest`**: immutable (category, count) pair
//! - **`PurchaseValidator`**: account id, ticket limit and composition rules
//! - **`PriceCalculator`**: amount payable and seats to reserve
//! - **`TicketService`**: validates, prices, then calls the payment and seat
//!   reservation collaborators, in that order
//!
//! ## Rules
//!
//! | Rule                                   | Rejection reason        |
//! |----------------------------------------|-------------------------|
//! | Account id must be a positive integer  | `invalid account`       |
//! | At most 25 tickets per purchase        | `ticket limit exceeded` |
//! | Child/infant tickets need an adult     | `adult required`        |
//! | Category must be ADULT, CHILD, INFANT  | `unknown category`      |
//!
//! Prices: ADULT 25, CHILD 15, INFANT 0. Infants do not get a seat.
//!
//! ## Example
//!
//! ```
//! use cinema_tickets_core::{
//!     LoggingPaymentProcessor, LoggingSeatReservation, TicketCategory, TicketRequest,
//!     TicketService,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let service = TicketService::new(LoggingPaymentProcessor, LoggingSeatReservation);
//!
//! let requests = [
//!     TicketRequest::new(TicketCategory::Adult, 2)?,
//!     TicketRequest::new(TicketCategory::Child, 1)?,
//! ];
//! service.purchase_tickets(1, &requests)?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod collaborators;
pub mod config;
pub mod error;
pub mod pricing;
pub mod service;
pub mod types;
pub mod validation;

pub use collaborators::{
    LoggingPaymentProcessor, LoggingSeatReservation, PaymentProcessor, SeatReservation,
};
pub use config::{PriceTable, PurchasePolicy};
pub use error::{InvalidPurchase, PurchaseError, TicketError};
pub use pricing::PriceCalculator;
pub use service::TicketService;
pub use types::{
    AccountId, Money, OrderLine, PurchaseOrder, TicketCategory, TicketLine, TicketRequest,
};
pub use validation::PurchaseValidator;
