//! Purchase policy: the ticket limit and the price table.
//!
//! Loads from environment variables with sensible defaults.

use crate::types::{Money, TicketCategory};
use serde::{Deserialize, Serialize};
use std::env;

/// Default maximum number of tickets in a single purchase
pub const DEFAULT_MAX_TICKETS: u32 = 25;

/// Unit price for each ticket category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTable {
    /// Price of one adult ticket
    pub adult: Money,
    /// Price of one child ticket
    pub child: Money,
    /// Price of one infant ticket
    pub infant: Money,
}

impl PriceTable {
    /// Unit price for `category`
    #[must_use]
    pub const fn price_of(&self, category: TicketCategory) -> Money {
        match category {
            TicketCategory::Adult => self.adult,
            TicketCategory::Child => self.child,
            TicketCategory::Infant => self.infant,
        }
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            adult: Money::from_units(25),
            child: Money::from_units(15),
            infant: Money::ZERO,
        }
    }
}

/// Business rules applied to every purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchasePolicy {
    /// Maximum tickets per purchase (inclusive)
    pub max_tickets: u32,
    /// Unit prices
    pub prices: PriceTable,
}

impl Default for PurchasePolicy {
    fn default() -> Self {
        Self {
            max_tickets: DEFAULT_MAX_TICKETS,
            prices: PriceTable::default(),
        }
    }
}

impl PurchasePolicy {
    /// Load the policy from environment variables.
    ///
    /// | Variable              | Default |
    /// |-----------------------|---------|
    /// | `CINEMA_MAX_TICKETS`  | 25      |
    /// | `CINEMA_ADULT_PRICE`  | 25      |
    /// | `CINEMA_CHILD_PRICE`  | 15      |
    /// | `CINEMA_INFANT_PRICE` | 0       |
    ///
    /// Missing or unparsable values fall back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the policy from an arbitrary key lookup (used by `from_env`).
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parse_u64 = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u64>().ok());

        Self {
            max_tickets: lookup("CINEMA_MAX_TICKETS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.max_tickets),
            prices: PriceTable {
                adult: parse_u64("CINEMA_ADULT_PRICE")
                    .map_or(defaults.prices.adult, Money::from_units),
                child: parse_u64("CINEMA_CHILD_PRICE")
                    .map_or(defaults.prices.child, Money::from_units),
                infant: parse_u64("CINEMA_INFANT_PRICE")
                    .map_or(defaults.prices.infant, Money::from_units),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let policy = PurchasePolicy::default();

        assert_eq!(policy.max_tickets, 25);
        assert_eq!(policy.prices.price_of(TicketCategory::Adult), Money::from_units(25));
        assert_eq!(policy.prices.price_of(TicketCategory::Child), Money::from_units(15));
        assert_eq!(policy.prices.price_of(TicketCategory::Infant), Money::ZERO);
    }

    #[test]
    fn test_lookup_overrides_defaults() {
        let vars: HashMap<&str, &str> = [
            ("CINEMA_MAX_TICKETS", "10"),
            ("CINEMA_ADULT_PRICE", "30"),
            ("CINEMA_INFANT_PRICE", " 2 "),
        ]
        .into_iter()
        .collect();

        let policy = PurchasePolicy::from_lookup(|key| vars.get(key).map(ToString::to_string));

        assert_eq!(policy.max_tickets, 10);
        assert_eq!(policy.prices.adult, Money::from_units(30));
        assert_eq!(policy.prices.child, Money::from_units(15));
        assert_eq!(policy.prices.infant, Money::from_units(2));
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let policy = PurchasePolicy::from_lookup(|key| match key {
            "CINEMA_MAX_TICKETS" => Some("lots".to_string()),
            "CINEMA_CHILD_PRICE" => Some("-5".to_string()),
            _ => None,
        });

        assert_eq!(policy, PurchasePolicy::default());
    }
}
