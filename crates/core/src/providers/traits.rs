use async_trait::async_trait;
use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::account::{Funds, Holding, Order, Position};
use crate::models::instrument::Instrument;
use crate::models::quote::Quote;

/// Trait abstraction over the brokerage account API.
///
/// The live implementation talks to the broker's REST endpoints; tests
/// substitute an in-memory mock. If the broker changes its API, only the
/// one implementation changes; the aggregation pipeline is untouched.
///
/// The credential is an opaque bearer string supplied by the caller on
/// every request; this layer never acquires or stores it.
#[async_trait]
pub trait BrokerageApi: Send + Sync {
    /// Human-readable name of this broker (for logs/errors).
    fn name(&self) -> &str;

    /// The full instrument catalog.
    async fn fetch_instruments(&self, credential: &str) -> Result<Vec<Instrument>, CoreError>;

    /// Long-term holdings with cost basis.
    async fn fetch_holdings(&self, credential: &str) -> Result<Vec<Holding>, CoreError>;

    /// Short-term/intraday positions.
    async fn fetch_positions(&self, credential: &str) -> Result<Vec<Position>, CoreError>;

    /// Available cash/margin balance.
    async fn fetch_funds(&self, credential: &str) -> Result<Funds, CoreError>;

    /// Order history, newest first.
    async fn fetch_orders(&self, credential: &str) -> Result<Vec<Order>, CoreError>;

    /// Current quotes for exactly the given identifier set. Identifiers
    /// with no tradable quote are simply absent from the result; the
    /// caller excludes them from that run, it is not an error.
    async fn fetch_quotes(
        &self,
        credential: &str,
        identifiers: &[String],
    ) -> Result<HashMap<String, Quote>, CoreError>;
}
