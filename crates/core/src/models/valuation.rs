use serde::{Deserialize, Serialize};

use super::snapshot::AssetAllocation;

/// Per-holding market valuation, produced by the aggregation pass for
/// every holding with a present quote. The top-holdings ranking is a
/// sort-and-cap over these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingValuation {
    pub symbol: String,
    /// Company name, or the symbol when the broker sent none
    pub name: String,
    pub shares: u32,
    /// Current market price per unit
    pub price: f64,
    /// Absolute change since the previous close
    pub change: f64,
    /// Change as a percentage of the previous close (0 when close is 0)
    pub change_percent: f64,
    /// Market value: shares × price
    pub value: f64,
}

/// A volatility candidate for the market-movers ranking: one entry per
/// holding and per position that has a quote with a non-zero previous
/// close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoverCandidate {
    pub symbol: String,
    pub change: f64,
    pub change_percent: f64,
}

/// The aggregation result for one run: reconciled totals, allocation
/// buckets, and the per-instrument intermediates the ranking derivers
/// consume. Built fresh from immutable inputs on every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioValuation {
    /// cash + Σ(holding value) + Σ(position value), quoted instruments only
    pub total_value: f64,

    /// Σ(holding quantity × average price): the holdings cost basis
    pub total_invested: f64,

    /// total_value − total_invested − cash
    pub total_gain: f64,

    /// total_gain / total_invested × 100 (0 when nothing is invested)
    pub total_gain_percent: f64,

    /// Σ(quantity × (last − close)) over quoted holdings and positions
    pub day_change: f64,

    /// day_change / (total_value − day_change) × 100 when the previous
    /// value is positive, else 0
    pub day_change_percent: f64,

    /// Category buckets, cash always present exactly once
    pub allocations: Vec<AssetAllocation>,

    /// One entry per quoted holding, in input order
    pub holdings: Vec<HoldingValuation>,

    /// Mover candidates: quoted holdings first, then quoted positions
    pub mover_candidates: Vec<MoverCandidate>,
}
