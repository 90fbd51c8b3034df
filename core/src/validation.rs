//! Business rules for ticket purchases.
//!
//! Checks run in a fixed order and the first violation wins:
//!
//! 1. account id must be a positive integer
//! 2. total tickets must not exceed the limit
//! 3. child or infant tickets need at least one adult ticket
//! 4. every category label must be recognised

use crate::config::DEFAULT_MAX_TICKETS;
use crate::error::InvalidPurchase;
use crate::types::{AccountId, PurchaseOrder, TicketCategory, TicketLine, TicketRequest};
use std::num::NonZeroU32;

/// Validates purchases against the ticket limit and composition rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseValidator {
    max_tickets: u32,
}

impl PurchaseValidator {
    /// Creates a validator allowing at most `max_tickets` per purchase
    #[must_use]
    pub const fn new(max_tickets: u32) -> Self {
        Self { max_tickets }
    }

    /// Maximum tickets allowed in one purchase
    #[must_use]
    pub const fn max_tickets(&self) -> u32 {
        self.max_tickets
    }

    /// Validates a purchase and returns the typed order.
    ///
    /// An empty list of lines is valid and yields an empty order.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidPurchase`] rule that the purchase breaks.
    pub fn validate<L: TicketLine>(
        &self,
        account_id: i64,
        lines: &[L],
    ) -> Result<PurchaseOrder, InvalidPurchase> {
        let account_id = AccountId::try_from(account_id)?;

        // Zero-ticket lines carry nothing to buy and take no part in any rule
        let lines: Vec<(&L, NonZeroU32)> = lines
            .iter()
            .filter_map(|line| NonZeroU32::new(line.ticket_count()).map(|count| (line, count)))
            .collect();

        let requested: u64 = lines.iter().map(|(_, count)| u64::from(count.get())).sum();
        if requested > u64::from(self.max_tickets) {
            return Err(InvalidPurchase::TicketLimitExceeded {
                requested,
                limit: self.max_tickets,
            });
        }

        let categories: Vec<Option<TicketCategory>> = lines
            .iter()
            .map(|(line, _)| line.category_label().parse().ok())
            .collect();

        let has_adult = categories.contains(&Some(TicketCategory::Adult));
        let needs_adult = categories.iter().flatten().any(|c| c.requires_adult());
        if needs_adult && !has_adult {
            return Err(InvalidPurchase::AdultRequired);
        }

        let mut requests = Vec::with_capacity(lines.len());
        for ((line, count), category) in lines.into_iter().zip(categories) {
            let Some(category) = category else {
                return Err(InvalidPurchase::UnknownCategory {
                    category: line.category_label().to_string(),
                });
            };
            requests.push(TicketRequest::from_parts(category, count));
        }

        Ok(PurchaseOrder::new(account_id, requests))
    }
}

impl Default for PurchaseValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TICKETS)
    }
}
