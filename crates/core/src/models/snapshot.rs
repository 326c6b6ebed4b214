use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One asset-class bucket of the allocation breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetAllocation {
    /// Display name (e.g., "Stocks", "Bonds", "Cash")
    pub name: String,

    /// This bucket's share of total value, in percent
    pub percent: f64,

    /// Absolute amount in this bucket
    pub amount: f64,

    /// Presentation color token (hex)
    pub color: String,
}

/// A ranked holding. Derived only from holdings, never positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopHolding {
    pub symbol: String,
    pub name: String,
    pub shares: u32,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub value: f64,
}

/// A completed order surfaced in the recent-transactions listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentTransaction {
    pub transaction_type: String,
    pub symbol: String,
    pub shares: u32,
    pub price: f64,
    pub date: NaiveDate,
    /// shares × price
    pub total: f64,
}

/// An instrument ranked by absolute day-change percentage. Drawn from
/// both holdings and positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketMover {
    pub symbol: String,
    pub change: f64,
    pub change_percent: f64,
}

/// The complete, atomically-published result of one aggregation run.
///
/// A snapshot is recomputed wholesale on every refresh and replaces the
/// previous one in full, or not at all; it is never partially updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub total_value: f64,
    pub total_gain: f64,
    pub total_gain_percent: f64,
    pub day_change: f64,
    pub day_change_percent: f64,
    pub asset_allocation: Vec<AssetAllocation>,
    pub top_holdings: Vec<TopHolding>,
    pub recent_transactions: Vec<RecentTransaction>,
    pub market_movers: Vec<MarketMover>,
}

impl PortfolioSnapshot {
    /// Static demonstration snapshot, shown before any live run has
    /// published and retained as the fallback when a run aborts with no
    /// prior publication.
    #[must_use]
    pub fn sample() -> Self {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        Self {
            total_value: 58_500.0,
            total_gain: 8_500.0,
            total_gain_percent: 17.0,
            day_change: 245.67,
            day_change_percent: 0.42,
            asset_allocation: vec![
                AssetAllocation {
                    name: "Stocks".into(),
                    percent: 65.0,
                    amount: 38_025.0,
                    color: "#3b82f6".into(),
                },
                AssetAllocation {
                    name: "Bonds".into(),
                    percent: 20.0,
                    amount: 11_700.0,
                    color: "#10b981".into(),
                },
                AssetAllocation {
                    name: "ETFs".into(),
                    percent: 10.0,
                    amount: 5_850.0,
                    color: "#f59e0b".into(),
                },
                AssetAllocation {
                    name: "Cash".into(),
                    percent: 5.0,
                    amount: 2_925.0,
                    color: "#6b7280".into(),
                },
            ],
            top_holdings: vec![
                TopHolding {
                    symbol: "AAPL".into(),
                    name: "Apple Inc.".into(),
                    shares: 50,
                    price: 175.43,
                    change: 2.34,
                    change_percent: 1.35,
                    value: 8_771.5,
                },
                TopHolding {
                    symbol: "MSFT".into(),
                    name: "Microsoft Corp.".into(),
                    shares: 30,
                    price: 378.85,
                    change: -1.23,
                    change_percent: -0.32,
                    value: 11_365.5,
                },
                TopHolding {
                    symbol: "GOOGL".into(),
                    name: "Alphabet Inc.".into(),
                    shares: 25,
                    price: 142.56,
                    change: 3.45,
                    change_percent: 2.48,
                    value: 3_564.0,
                },
                TopHolding {
                    symbol: "TSLA".into(),
                    name: "Tesla Inc.".into(),
                    shares: 15,
                    price: 248.42,
                    change: -5.67,
                    change_percent: -2.23,
                    value: 3_726.3,
                },
                TopHolding {
                    symbol: "NVDA".into(),
                    name: "NVIDIA Corp.".into(),
                    shares: 20,
                    price: 875.28,
                    change: 12.45,
                    change_percent: 1.44,
                    value: 17_505.6,
                },
            ],
            recent_transactions: vec![
                RecentTransaction {
                    transaction_type: "BUY".into(),
                    symbol: "AAPL".into(),
                    shares: 10,
                    price: 175.43,
                    date: date(2024, 1, 15),
                    total: 1_754.3,
                },
                RecentTransaction {
                    transaction_type: "SELL".into(),
                    symbol: "MSFT".into(),
                    shares: 5,
                    price: 378.85,
                    date: date(2024, 1, 14),
                    total: 1_894.25,
                },
                RecentTransaction {
                    transaction_type: "BUY".into(),
                    symbol: "GOOGL".into(),
                    shares: 15,
                    price: 142.56,
                    date: date(2024, 1, 13),
                    total: 2_138.4,
                },
                RecentTransaction {
                    transaction_type: "DIVIDEND".into(),
                    symbol: "AAPL".into(),
                    shares: 40,
                    price: 0.24,
                    date: date(2024, 1, 12),
                    total: 9.6,
                },
            ],
            market_movers: vec![
                MarketMover {
                    symbol: "NVDA".into(),
                    change: 12.45,
                    change_percent: 1.44,
                },
                MarketMover {
                    symbol: "GOOGL".into(),
                    change: 3.45,
                    change_percent: 2.48,
                },
                MarketMover {
                    symbol: "AAPL".into(),
                    change: 2.34,
                    change_percent: 1.35,
                },
                MarketMover {
                    symbol: "MSFT".into(),
                    change: -1.23,
                    change_percent: -0.32,
                },
                MarketMover {
                    symbol: "TSLA".into(),
                    change: -5.67,
                    change_percent: -2.23,
                },
            ],
        }
    }
}
