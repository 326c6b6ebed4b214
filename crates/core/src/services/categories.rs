//! Asset-class presentation tables.
//!
//! Both functions are total: every category code maps to an output, and
//! unknown codes fall through to a defined default rather than an error.
//! The catalog resolver already rewrites missing codes to `"Other"`, which
//! intentionally takes the identity/neutral branch here.

/// Map a raw asset-class code to its display name. Unknown codes pass
/// through unchanged.
#[must_use]
pub fn display_name(category: &str) -> String {
    match category {
        "EQUITY" => "Stocks".to_string(),
        "DEBT" => "Bonds".to_string(),
        "ETF" => "ETFs".to_string(),
        "CASH" => "Cash".to_string(),
        other => other.to_string(),
    }
}

/// Map a raw asset-class code to its presentation color. Unknown codes
/// fall to a neutral gray.
#[must_use]
pub fn color(category: &str) -> &'static str {
    match category {
        "EQUITY" => "#3b82f6",
        "DEBT" => "#10b981",
        "ETF" => "#f59e0b",
        "CASH" => "#6b7280",
        _ => "#d1d5db",
    }
}
