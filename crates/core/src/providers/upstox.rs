use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

use super::http::{HttpClient, RetryPolicy};
use super::traits::BrokerageApi;
use crate::errors::CoreError;
use crate::models::account::{Funds, Holding, Order, Position};
use crate::models::instrument::Instrument;
use crate::models::quote::Quote;

const BASE_URL: &str = "https://api.upstox.com/v2";

/// Timestamp format used by the order book endpoint.
const ORDER_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Upstox v2 REST API client.
///
/// - **Auth**: opaque bearer credential per request; never stored here.
/// - **Endpoints**: `/market/instruments`, `/portfolio/long-term-holdings`,
///   `/portfolio/short-term-positions`, `/user/get-funds-and-margin`,
///   `/order/retrieve-all`, `/market-quote/quotes`.
/// - Every response arrives wrapped in a `{ "data": ... }` envelope.
pub struct UpstoxClient {
    http: HttpClient,
    base_url: String,
}

impl UpstoxClient {
    pub fn new() -> Self {
        Self::with_config(BASE_URL, RetryPolicy::default())
    }

    /// Build against a non-default base URL and retry policy
    /// (sandbox environments, tests).
    pub fn with_config(base_url: impl Into<String>, policy: RetryPolicy) -> Self {
        Self {
            http: HttpClient::new(policy),
            base_url: base_url.into(),
        }
    }
}

impl Default for UpstoxClient {
    fn default() -> Self {
        Self::new()
    }
}

// ── Upstox API response types ───────────────────────────────────────

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct InstrumentRecord {
    instrument_token: String,
    tradingsymbol: String,
    #[serde(default)]
    instrument_type: Option<String>,
}

#[derive(Deserialize)]
struct HoldingRecord {
    instrument_token: String,
    tradingsymbol: String,
    #[serde(default)]
    company_name: Option<String>,
    quantity: u32,
    average_price: f64,
}

#[derive(Deserialize)]
struct PositionRecord {
    instrument_token: String,
    quantity: i32,
}

#[derive(Deserialize)]
struct FundsRecord {
    equity: EquityFunds,
}

#[derive(Deserialize)]
struct EquityFunds {
    available_margin: f64,
}

#[derive(Deserialize)]
struct OrderRecord {
    transaction_type: String,
    tradingsymbol: String,
    quantity: u32,
    average_price: f64,
    order_timestamp: String,
    status: String,
}

#[derive(Deserialize)]
struct QuoteRecord {
    last_price: f64,
    close: f64,
}

#[async_trait]
impl BrokerageApi for UpstoxClient {
    fn name(&self) -> &str {
        "Upstox"
    }

    async fn fetch_instruments(&self, credential: &str) -> Result<Vec<Instrument>, CoreError> {
        let url = format!("{}/market/instruments", self.base_url);
        let resp: Envelope<Vec<InstrumentRecord>> = self.http.get_json(&url, credential).await?;
        debug!(count = resp.data.len(), "fetched instrument catalog");

        Ok(resp
            .data
            .into_iter()
            .map(|r| Instrument {
                identifier: r.instrument_token,
                symbol: r.tradingsymbol,
                category: r.instrument_type.unwrap_or_default(),
            })
            .collect())
    }

    async fn fetch_holdings(&self, credential: &str) -> Result<Vec<Holding>, CoreError> {
        let url = format!("{}/portfolio/long-term-holdings", self.base_url);
        let resp: Envelope<Vec<HoldingRecord>> = self.http.get_json(&url, credential).await?;

        Ok(resp
            .data
            .into_iter()
            .map(|r| Holding {
                identifier: r.instrument_token,
                symbol: r.tradingsymbol,
                company_name: r.company_name,
                quantity: r.quantity,
                average_price: r.average_price,
            })
            .collect())
    }

    async fn fetch_positions(&self, credential: &str) -> Result<Vec<Position>, CoreError> {
        let url = format!("{}/portfolio/short-term-positions", self.base_url);
        let resp: Envelope<Vec<PositionRecord>> = self.http.get_json(&url, credential).await?;

        Ok(resp
            .data
            .into_iter()
            .map(|r| Position {
                identifier: r.instrument_token,
                quantity: r.quantity,
            })
            .collect())
    }

    async fn fetch_funds(&self, credential: &str) -> Result<Funds, CoreError> {
        let url = format!("{}/user/get-funds-and-margin", self.base_url);
        let resp: Envelope<FundsRecord> = self.http.get_json(&url, credential).await?;

        Ok(Funds {
            cash: resp.data.equity.available_margin,
        })
    }

    async fn fetch_orders(&self, credential: &str) -> Result<Vec<Order>, CoreError> {
        let url = format!("{}/order/retrieve-all", self.base_url);
        let resp: Envelope<Vec<OrderRecord>> = self.http.get_json(&url, credential).await?;

        resp.data
            .into_iter()
            .map(|r| {
                let timestamp =
                    NaiveDateTime::parse_from_str(&r.order_timestamp, ORDER_TIMESTAMP_FORMAT)
                        .map_err(|e| {
                            CoreError::Decode(format!(
                                "order timestamp '{}': {e}",
                                r.order_timestamp
                            ))
                        })?;
                Ok(Order {
                    transaction_type: r.transaction_type,
                    symbol: r.tradingsymbol,
                    quantity: r.quantity,
                    average_price: r.average_price,
                    timestamp,
                    status: r.status,
                })
            })
            .collect()
    }

    async fn fetch_quotes(
        &self,
        credential: &str,
        identifiers: &[String],
    ) -> Result<HashMap<String, Quote>, CoreError> {
        if identifiers.is_empty() {
            return Ok(HashMap::new());
        }

        let url = format!(
            "{}/market-quote/quotes?instrument_key={}",
            self.base_url,
            identifiers.join(",")
        );
        let resp: Envelope<HashMap<String, QuoteRecord>> =
            self.http.get_json(&url, credential).await?;
        debug!(
            requested = identifiers.len(),
            returned = resp.data.len(),
            "fetched quotes"
        );

        Ok(resp
            .data
            .into_iter()
            .map(|(identifier, r)| {
                (
                    identifier,
                    Quote {
                        last_price: r.last_price,
                        close_price: r.close,
                    },
                )
            })
            .collect())
    }
}
