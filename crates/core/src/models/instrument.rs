use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fallback category for instruments with a missing or unresolvable
/// asset-class code.
pub const OTHER_CATEGORY: &str = "Other";

/// One tradable security from the broker's instrument catalog.
///
/// The `identifier` is the join key for everything else: holdings,
/// positions and quotes all reference instruments by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Broker-assigned unique identifier
    pub identifier: String,

    /// Exchange trading symbol (e.g., "AAPL")
    pub symbol: String,

    /// Raw asset-class code from the catalog (e.g., "EQUITY", "DEBT", "ETF")
    pub category: String,
}

/// Resolved display data for one instrument: trading symbol plus
/// asset-class code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentInfo {
    pub symbol: String,
    pub category: String,
}

/// Lookup from instrument identifier to `(symbol, category)`, built once
/// per refresh run from the full catalog.
///
/// The index is total over the catalog, and lookups degrade gracefully:
/// an identifier absent from the catalog resolves to the raw identifier
/// as its symbol and `"Other"` as its category, never an error.
#[derive(Debug, Clone, Default)]
pub struct InstrumentIndex {
    entries: HashMap<String, InstrumentInfo>,
}

impl InstrumentIndex {
    /// Build the index from the raw catalog. Entries with an empty or
    /// whitespace-only category default to `"Other"`.
    pub fn build(catalog: &[Instrument]) -> Self {
        let entries = catalog
            .iter()
            .map(|inst| {
                let category = if inst.category.trim().is_empty() {
                    OTHER_CATEGORY.to_string()
                } else {
                    inst.category.clone()
                };
                (
                    inst.identifier.clone(),
                    InstrumentInfo {
                        symbol: inst.symbol.clone(),
                        category,
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Exact lookup; `None` if the identifier is not in the catalog.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&InstrumentInfo> {
        self.entries.get(identifier)
    }

    /// Display symbol for an identifier, falling back to the raw
    /// identifier when the catalog doesn't know it.
    #[must_use]
    pub fn symbol_for<'a>(&'a self, identifier: &'a str) -> &'a str {
        self.entries
            .get(identifier)
            .map(|info| info.symbol.as_str())
            .unwrap_or(identifier)
    }

    /// Category code for an identifier, falling back to `"Other"` when
    /// the catalog doesn't know it.
    #[must_use]
    pub fn category_for(&self, identifier: &str) -> &str {
        self.entries
            .get(identifier)
            .map(|info| info.category.as_str())
            .unwrap_or(OTHER_CATEGORY)
    }

    /// Number of catalog entries in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
