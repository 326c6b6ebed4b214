use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Order status value that marks an order as executed. Only completed
/// orders appear in the recent-transactions listing.
pub const ORDER_STATUS_COMPLETE: &str = "complete";

/// A long-term position lot: quantity owned plus the recorded cost basis.
///
/// Holdings are the only source of cost basis; gain/loss is computed
/// from them and from nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Instrument identifier (join key into catalog and quotes)
    pub identifier: String,

    /// Exchange trading symbol
    pub symbol: String,

    /// Optional company display name; the symbol is used when absent
    #[serde(default)]
    pub company_name: Option<String>,

    /// Number of units held
    pub quantity: u32,

    /// Average acquisition price per unit
    pub average_price: f64,
}

/// A short-term/intraday position. No cost basis is tracked, so
/// positions contribute to total value and day change but never to
/// gain/loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Instrument identifier (join key into catalog and quotes)
    pub identifier: String,

    /// Signed quantity; negative for short positions
    pub quantity: i32,
}

/// Available cash/margin balance for the account.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Funds {
    pub cash: f64,
}

/// One historical order from the account's order book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// BUY / SELL / DIVIDEND / broker-specific values
    pub transaction_type: String,

    /// Exchange trading symbol
    pub symbol: String,

    /// Number of units in the order
    pub quantity: u32,

    /// Average fill price per unit
    pub average_price: f64,

    /// When the order was placed
    pub timestamp: NaiveDateTime,

    /// Broker status string; only "complete" orders are surfaced
    pub status: String,
}

impl Order {
    /// Whether this order executed to completion.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == ORDER_STATUS_COMPLETE
    }
}
