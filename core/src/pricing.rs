//! Totals for a validated purchase: amount payable and seats to reserve.

use crate::config::PriceTable;
use crate::types::{Money, TicketCategory, TicketRequest};

/// Computes payment totals and seat counts from ticket requests
///
/// Pure: the same requests always give the same totals. Assumes the requests have
/// already been validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceCalculator {
    prices: PriceTable,
}

impl PriceCalculator {
    /// Creates a calculator using `prices`
    #[must_use]
    pub const fn new(prices: PriceTable) -> Self {
        Self { prices }
    }

    /// Unit price of `category`
    #[must_use]
    pub const fn unit_price(&self, category: TicketCategory) -> Money {
        self.prices.price_of(category)
    }

    /// Sum of count × unit price over every request
    #[must_use]
    pub fn total_amount(&self, requests: &[TicketRequest]) -> Money {
        requests
            .iter()
            .map(|request| {
                self.unit_price(request.category())
                    .saturating_mul(request.count())
            })
            .sum()
    }

    /// Seats to reserve; infants sit on an adult's lap and need none
    #[must_use]
    pub fn total_seats(&self, requests: &[TicketRequest]) -> u32 {
        requests
            .iter()
            .filter(|request| request.category().occupies_seat())
            .fold(0, |seats, request| seats.saturating_add(request.count()))
    }
}
