use std::collections::{BTreeMap, HashMap};

use crate::models::account::{Holding, Position};
use crate::models::instrument::InstrumentIndex;
use crate::models::quote::Quote;
use crate::models::snapshot::AssetAllocation;
use crate::models::valuation::{HoldingValuation, MoverCandidate, PortfolioValuation};
use crate::services::categories;

/// Bucket key that always carries the cash balance, force-set after the
/// instrument passes so cash is represented exactly once even if a
/// catalog category collides with it.
const CASH_BUCKET: &str = "CASH";

/// Reconciles holdings, positions, cash and quotes into portfolio totals,
/// allocation buckets and the per-instrument valuations the ranking
/// derivers consume.
///
/// Pure business logic — no I/O. Inputs are immutable and the result is
/// built fresh on every call; running twice on identical inputs yields an
/// identical valuation (buckets accumulate in a `BTreeMap`, so allocation
/// order is deterministic).
///
/// **Note on precision**: all monetary values are `f64` (~15-17
/// significant digits), matching what the broker's JSON carries.
pub struct AggregationService;

impl AggregationService {
    pub fn new() -> Self {
        Self
    }

    /// One aggregation pass over the account data.
    ///
    /// An instrument present in holdings or positions but absent from the
    /// quote map contributes nothing anywhere: best-effort with missing
    /// market data, never an error. Zero or negative totals are permitted;
    /// every ratio degrades to 0 instead of dividing by zero.
    pub fn aggregate(
        &self,
        holdings: &[Holding],
        positions: &[Position],
        cash: f64,
        index: &InstrumentIndex,
        quotes: &HashMap<String, Quote>,
    ) -> PortfolioValuation {
        let mut total_value = cash;
        let mut total_invested = 0.0;
        let mut day_change = 0.0;
        let mut buckets: BTreeMap<String, f64> = BTreeMap::new();
        let mut holding_valuations = Vec::new();
        let mut mover_candidates = Vec::new();

        // Holdings: the only contributors to cost basis.
        for holding in holdings {
            let Some(quote) = quotes.get(&holding.identifier) else {
                continue;
            };
            let shares = f64::from(holding.quantity);
            let value = shares * quote.last_price;

            total_value += value;
            total_invested += shares * holding.average_price;
            day_change += shares * quote.change();
            *buckets
                .entry(index.category_for(&holding.identifier).to_string())
                .or_insert(0.0) += value;

            holding_valuations.push(HoldingValuation {
                symbol: holding.symbol.clone(),
                name: holding
                    .company_name
                    .clone()
                    .unwrap_or_else(|| holding.symbol.clone()),
                shares: holding.quantity,
                price: quote.last_price,
                change: quote.change(),
                change_percent: quote.change_percent(),
                value,
            });

            if quote.close_price != 0.0 {
                mover_candidates.push(MoverCandidate {
                    symbol: holding.symbol.clone(),
                    change: quote.change(),
                    change_percent: quote.change_percent(),
                });
            }
        }

        // Positions: valued and counted toward day change, never invested.
        for position in positions {
            let Some(quote) = quotes.get(&position.identifier) else {
                continue;
            };
            let quantity = f64::from(position.quantity);
            let value = quantity * quote.last_price;

            total_value += value;
            day_change += quantity * quote.change();
            *buckets
                .entry(index.category_for(&position.identifier).to_string())
                .or_insert(0.0) += value;

            if quote.close_price != 0.0 {
                mover_candidates.push(MoverCandidate {
                    symbol: index.symbol_for(&position.identifier).to_string(),
                    change: quote.change(),
                    change_percent: quote.change_percent(),
                });
            }
        }

        // Overwrite, not add: cash appears exactly once regardless of any
        // category-code collision.
        buckets.insert(CASH_BUCKET.to_string(), cash);

        let total_gain = total_value - total_invested - cash;
        let total_gain_percent = if total_invested > 0.0 {
            (total_gain / total_invested) * 100.0
        } else {
            0.0
        };

        let previous_value = total_value - day_change;
        let day_change_percent = if previous_value > 0.0 {
            (day_change / previous_value) * 100.0
        } else {
            0.0
        };

        let allocations = buckets
            .into_iter()
            .map(|(code, amount)| AssetAllocation {
                name: categories::display_name(&code),
                percent: if total_value == 0.0 {
                    0.0
                } else {
                    (amount / total_value) * 100.0
                },
                amount,
                color: categories::color(&code).to_string(),
            })
            .collect();

        PortfolioValuation {
            total_value,
            total_invested,
            total_gain,
            total_gain_percent,
            day_change,
            day_change_percent,
            allocations,
            holdings: holding_valuations,
            mover_candidates,
        }
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new()
    }
}
