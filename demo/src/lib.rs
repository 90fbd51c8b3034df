//! # Cinema Tickets Demo
//!
//! A fixed script of purchases run against any pair of collaborators.
//!
//! Each [`Scenario`] carries an account id and a JSON order payload. Payloads are
//! decoded as untrusted [`OrderLine`]s so that unknown categories reach the validator,
//! the same way a real front end would hand them over.

use cinema_tickets_core::{
    OrderLine, PaymentProcessor, PurchaseError, SeatReservation, TicketLine, TicketService,
};

/// One scripted purchase
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    /// Short description printed before the purchase
    pub title: &'static str,
    /// Purchasing account
    pub account_id: i64,
    /// JSON array of `{"category": ..., "count": ...}` lines
    pub order: &'static str,
}

/// The canonical walkthrough
pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        title: "Family purchase: 10 adults, 5 children, 2 infants",
        account_id: 1,
        order: r#"[{"category":"ADULT","count":10},{"category":"CHILD","count":5},{"category":"INFANT","count":2}]"#,
    },
    Scenario {
        title: "Over the limit: 26 adults",
        account_id: 1,
        order: r#"[{"category":"ADULT","count":26}]"#,
    },
    Scenario {
        title: "Unaccompanied: 1 child, 1 infant",
        account_id: 1,
        order: r#"[{"category":"CHILD","count":1},{"category":"INFANT","count":1}]"#,
    },
    Scenario {
        title: "Invalid account id 0",
        account_id: 0,
        order: r#"[{"category":"ADULT","count":1}]"#,
    },
    Scenario {
        title: "Unknown category",
        account_id: 1,
        order: r#"[{"category":"ADULT","count":1},{"category":"INVALID_TYPE","count":1}]"#,
    },
    Scenario {
        title: "Empty order",
        account_id: 1,
        order: "[]",
    },
];

/// What happened to a scenario
#[derive(Debug)]
pub enum ScenarioOutcome {
    /// Payment taken and seats reserved
    Purchased {
        /// Tickets bought
        tickets: u32,
    },
    /// Nothing was requested; the service was not called
    NoTickets,
    /// The payload could not be decoded
    MalformedOrder(serde_json::Error),
    /// The service refused or failed the purchase
    Failed(PurchaseError),
}

impl std::fmt::Display for ScenarioOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Purchased { tickets } => {
                write!(f, "Ticket purchase successful ({tickets} tickets)")
            }
            Self::NoTickets => f.write_str("No tickets requested"),
            Self::MalformedOrder(err) => write!(f, "Malformed order: {err}"),
            Self::Failed(err) => write!(f, "Purchase failed: {err}"),
        }
    }
}

/// Run one scenario through `service`.
pub fn run_scenario<P, R>(service: &TicketService<P, R>, scenario: &Scenario) -> ScenarioOutcome
where
    P: PaymentProcessor,
    R: SeatReservation,
{
    let lines: Vec<OrderLine> = match serde_json::from_str(scenario.order) {
        Ok(lines) => lines,
        Err(err) => return ScenarioOutcome::MalformedOrder(err),
    };

    if lines.is_empty() {
        tracing::debug!(account_id = scenario.account_id, "Empty order, skipping purchase");
        return ScenarioOutcome::NoTickets;
    }

    match service.purchase_tickets(scenario.account_id, &lines) {
        Ok(()) => ScenarioOutcome::Purchased {
            tickets: lines.iter().map(TicketLine::ticket_count).sum(),
        },
        Err(err) => ScenarioOutcome::Failed(err),
    }
}
