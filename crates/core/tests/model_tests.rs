use chrono::{NaiveDate, NaiveDateTime};
use portfolio_dashboard_core::models::account::Order;
use portfolio_dashboard_core::models::instrument::{Instrument, InstrumentIndex, OTHER_CATEGORY};
use portfolio_dashboard_core::models::quote::Quote;
use portfolio_dashboard_core::models::snapshot::PortfolioSnapshot;
use portfolio_dashboard_core::services::categories;

fn instrument(identifier: &str, symbol: &str, category: &str) -> Instrument {
    Instrument {
        identifier: identifier.into(),
        symbol: symbol.into(),
        category: category.into(),
    }
}

// ═══════════════════════════════════════════════════════════════════
//  InstrumentIndex
// ═══════════════════════════════════════════════════════════════════

mod instrument_index {
    use super::*;

    #[test]
    fn resolves_symbol_and_category() {
        let index = InstrumentIndex::build(&[
            instrument("NSE_EQ|INE009A01021", "INFY", "EQUITY"),
            instrument("NSE_EQ|INE467B01029", "TCS", "EQUITY"),
        ]);

        assert_eq!(index.symbol_for("NSE_EQ|INE009A01021"), "INFY");
        assert_eq!(index.category_for("NSE_EQ|INE467B01029"), "EQUITY");
        assert_eq!(index.len(), 2);
        assert!(!index.is_empty());
    }

    #[test]
    fn empty_category_defaults_to_other() {
        let index = InstrumentIndex::build(&[instrument("X1", "XYZ", "")]);
        assert_eq!(index.category_for("X1"), OTHER_CATEGORY);
    }

    #[test]
    fn whitespace_category_defaults_to_other() {
        let index = InstrumentIndex::build(&[instrument("X1", "XYZ", "   ")]);
        assert_eq!(index.category_for("X1"), OTHER_CATEGORY);
    }

    #[test]
    fn unknown_identifier_degrades_gracefully() {
        let index = InstrumentIndex::build(&[instrument("K1", "ABC", "ETF")]);

        // Absent identifiers are not an error: raw identifier as symbol,
        // "Other" as category.
        assert_eq!(index.symbol_for("MISSING"), "MISSING");
        assert_eq!(index.category_for("MISSING"), OTHER_CATEGORY);
        assert!(index.get("MISSING").is_none());
    }

    #[test]
    fn empty_catalog() {
        let index = InstrumentIndex::build(&[]);
        assert!(index.is_empty());
        assert_eq!(index.symbol_for("ANY"), "ANY");
        assert_eq!(index.category_for("ANY"), OTHER_CATEGORY);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Category mapper
// ═══════════════════════════════════════════════════════════════════

mod category_mapper {
    use super::*;

    #[test]
    fn display_names_for_known_codes() {
        assert_eq!(categories::display_name("EQUITY"), "Stocks");
        assert_eq!(categories::display_name("DEBT"), "Bonds");
        assert_eq!(categories::display_name("ETF"), "ETFs");
        assert_eq!(categories::display_name("CASH"), "Cash");
    }

    #[test]
    fn unknown_code_passes_through() {
        assert_eq!(categories::display_name("COMMODITY"), "COMMODITY");
        assert_eq!(categories::display_name("Other"), "Other");
        assert_eq!(categories::display_name(""), "");
    }

    #[test]
    fn colors_for_known_codes() {
        assert_eq!(categories::color("EQUITY"), "#3b82f6");
        assert_eq!(categories::color("DEBT"), "#10b981");
        assert_eq!(categories::color("ETF"), "#f59e0b");
        assert_eq!(categories::color("CASH"), "#6b7280");
    }

    #[test]
    fn unknown_code_falls_to_neutral_gray() {
        assert_eq!(categories::color("COMMODITY"), "#d1d5db");
        assert_eq!(categories::color("Other"), "#d1d5db");
        assert_eq!(categories::color(""), "#d1d5db");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Quote
// ═══════════════════════════════════════════════════════════════════

mod quote {
    use super::*;

    #[test]
    fn change_is_last_minus_close() {
        let q = Quote {
            last_price: 175.43,
            close_price: 173.0,
        };
        assert!((q.change() - 2.43).abs() < 1e-9);
    }

    #[test]
    fn change_percent_relative_to_close() {
        let q = Quote {
            last_price: 110.0,
            close_price: 100.0,
        };
        assert!((q.change_percent() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn change_percent_zero_when_close_is_zero() {
        let q = Quote {
            last_price: 42.0,
            close_price: 0.0,
        };
        assert_eq!(q.change_percent(), 0.0);
    }

    #[test]
    fn serde_roundtrip() {
        let q = Quote {
            last_price: 12.5,
            close_price: 12.0,
        };
        let json = serde_json::to_string(&q).unwrap();
        let back: Quote = serde_json::from_str(&json).unwrap();
        assert_eq!(q, back);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Order
// ═══════════════════════════════════════════════════════════════════

mod order {
    use super::*;

    fn order_with_status(status: &str) -> Order {
        Order {
            transaction_type: "BUY".into(),
            symbol: "AAPL".into(),
            quantity: 10,
            average_price: 175.43,
            timestamp: NaiveDateTime::parse_from_str("2024-01-15 10:30:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            status: status.into(),
        }
    }

    #[test]
    fn complete_status() {
        assert!(order_with_status("complete").is_complete());
    }

    #[test]
    fn other_statuses_are_not_complete() {
        assert!(!order_with_status("open").is_complete());
        assert!(!order_with_status("rejected").is_complete());
        assert!(!order_with_status("cancelled").is_complete());
    }

    #[test]
    fn status_match_is_exact() {
        // The broker sends lowercase; anything else doesn't count.
        assert!(!order_with_status("Complete").is_complete());
        assert!(!order_with_status("COMPLETE").is_complete());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Sample snapshot
// ═══════════════════════════════════════════════════════════════════

mod sample_snapshot {
    use super::*;

    #[test]
    fn allocation_amounts_sum_to_total_value() {
        let sample = PortfolioSnapshot::sample();
        let sum: f64 = sample.asset_allocation.iter().map(|a| a.amount).sum();
        assert!((sum - sample.total_value).abs() < 1e-6);
    }

    #[test]
    fn allocation_percents_sum_to_one_hundred() {
        let sample = PortfolioSnapshot::sample();
        let sum: f64 = sample.asset_allocation.iter().map(|a| a.percent).sum();
        assert!((sum - 100.0).abs() < 1e-6);
    }

    #[test]
    fn ranked_lists_within_cap() {
        let sample = PortfolioSnapshot::sample();
        assert!(sample.top_holdings.len() <= 5);
        assert!(sample.market_movers.len() <= 5);
        assert!(sample.recent_transactions.len() <= 5);
    }

    #[test]
    fn transactions_carry_consistent_totals() {
        let sample = PortfolioSnapshot::sample();
        for tx in &sample.recent_transactions {
            assert!((tx.total - f64::from(tx.shares) * tx.price).abs() < 1e-6);
        }
    }

    #[test]
    fn transaction_dates_are_descending() {
        let sample = PortfolioSnapshot::sample();
        let dates: Vec<NaiveDate> = sample.recent_transactions.iter().map(|t| t.date).collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
    }

    #[test]
    fn serde_roundtrip() {
        let sample = PortfolioSnapshot::sample();
        let json = serde_json::to_string(&sample).unwrap();
        let back: PortfolioSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(sample, back);
    }
}
