use serde::{Deserialize, Serialize};

/// Latest market data for one instrument: the current price and the
/// previous session's close.
///
/// Quotes are keyed by instrument identifier in a map fetched per run.
/// An instrument with no entry in that map has no tradable quote this
/// run and is excluded from every valuation and ranking computation;
/// absence is a policy, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Last traded price
    pub last_price: f64,

    /// Previous session close price
    pub close_price: f64,
}

impl Quote {
    /// Absolute change since the previous close.
    #[must_use]
    pub fn change(&self) -> f64 {
        self.last_price - self.close_price
    }

    /// Change since the previous close as a percentage of the close.
    /// Yields 0 when the close is 0 rather than dividing by zero.
    #[must_use]
    pub fn change_percent(&self) -> f64 {
        if self.close_price == 0.0 {
            0.0
        } else {
            (self.change() / self.close_price) * 100.0
        }
    }
}
