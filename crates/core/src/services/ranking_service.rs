use crate::models::account::Order;
use crate::models::snapshot::{MarketMover, RecentTransaction, TopHolding};
use crate::models::valuation::PortfolioValuation;

/// Every ranked listing is capped at this many entries.
pub const RANKED_LIST_LEN: usize = 5;

/// Three independent projections over the aggregated data: top holdings
/// by market value, market movers by absolute day-change percentage, and
/// recent completed transactions by recency.
///
/// All three use stable sorts (or no sort at all), so ties keep their
/// input order.
pub struct RankingService;

impl RankingService {
    pub fn new() -> Self {
        Self
    }

    /// The five largest holdings by market value, descending. Holdings
    /// without a quote were dropped during aggregation and never appear.
    pub fn top_holdings(&self, valuation: &PortfolioValuation) -> Vec<TopHolding> {
        let mut ranked: Vec<TopHolding> = valuation
            .holdings
            .iter()
            .map(|h| TopHolding {
                symbol: h.symbol.clone(),
                name: h.name.clone(),
                shares: h.shares,
                price: h.price,
                change: h.change,
                change_percent: h.change_percent,
                value: h.value,
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.value
                .partial_cmp(&a.value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(RANKED_LIST_LEN);
        ranked
    }

    /// The five most volatile instruments by |day-change %|, descending,
    /// drawn from holdings and positions alike.
    pub fn market_movers(&self, valuation: &PortfolioValuation) -> Vec<MarketMover> {
        let mut ranked: Vec<MarketMover> = valuation
            .mover_candidates
            .iter()
            .map(|c| MarketMover {
                symbol: c.symbol.clone(),
                change: c.change,
                change_percent: c.change_percent,
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.change_percent
                .abs()
                .partial_cmp(&a.change_percent.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(RANKED_LIST_LEN);
        ranked
    }

    /// The five most recent completed orders, in the order received.
    /// The broker sends the order book newest first, so no re-sort.
    pub fn recent_transactions(&self, orders: &[Order]) -> Vec<RecentTransaction> {
        orders
            .iter()
            .filter(|o| o.is_complete())
            .take(RANKED_LIST_LEN)
            .map(|o| RecentTransaction {
                transaction_type: o.transaction_type.clone(),
                symbol: o.symbol.clone(),
                shares: o.quantity,
                price: o.average_price,
                date: o.timestamp.date(),
                total: f64::from(o.quantity) * o.average_price,
            })
            .collect()
    }
}

impl Default for RankingService {
    fn default() -> Self {
        Self::new()
    }
}
