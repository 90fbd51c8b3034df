//! Cinema tickets demo binary
//!
//! Runs the scripted purchases against collaborators that log instead of charging
//! or booking anything.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=cinema_tickets_core=debug cargo run --bin cinema-tickets-demo
//! ```

use cinema_tickets_core::{
    LoggingPaymentProcessor, LoggingSeatReservation, PurchasePolicy, TicketService,
};
use cinema_tickets_demo::{SCENARIOS, run_scenario};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinema_tickets_core=debug,cinema_tickets_demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let policy = PurchasePolicy::from_env();
    tracing::info!(
        max_tickets = policy.max_tickets,
        adult = %policy.prices.adult,
        child = %policy.prices.child,
        infant = %policy.prices.infant,
        "Purchase policy loaded"
    );

    let service =
        TicketService::from_policy(policy, LoggingPaymentProcessor, LoggingSeatReservation);

    println!("=== Cinema Tickets: Purchase Walkthrough ===");

    for scenario in SCENARIOS {
        println!("\n>>> {} (account {})", scenario.title, scenario.account_id);
        let outcome = run_scenario(&service, scenario);
        println!("{outcome}");
    }

    println!("\n=== Walkthrough Complete ===");
}
