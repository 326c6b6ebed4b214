// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, classification
// ═══════════════════════════════════════════════════════════════════

use portfolio_dashboard_core::errors::{CoreError, ErrorKind};

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn request_failed() {
        let err = CoreError::RequestFailed("connection refused".into());
        assert_eq!(err.to_string(), "Request failed: connection refused");
    }

    #[test]
    fn request_failed_empty_message() {
        let err = CoreError::RequestFailed(String::new());
        assert_eq!(err.to_string(), "Request failed: ");
    }

    #[test]
    fn retries_exhausted() {
        let err = CoreError::RetriesExhausted {
            attempts: 3,
            last: "HTTP 503".into(),
        };
        assert_eq!(
            err.to_string(),
            "Retries exhausted after 3 attempts: HTTP 503"
        );
    }

    #[test]
    fn decode() {
        let err = CoreError::Decode("missing field `data`".into());
        assert_eq!(err.to_string(), "Decode error: missing field `data`");
    }

    #[test]
    fn cancelled() {
        assert_eq!(
            CoreError::Cancelled.to_string(),
            "Refresh cancelled — credential changed while the run was in flight"
        );
    }
}

// ── Kind classification ─────────────────────────────────────────────

mod kind {
    use super::*;

    #[test]
    fn maps_each_variant() {
        assert_eq!(
            CoreError::RequestFailed("x".into()).kind(),
            ErrorKind::RequestFailed
        );
        assert_eq!(
            CoreError::RetriesExhausted {
                attempts: 1,
                last: "x".into()
            }
            .kind(),
            ErrorKind::RetriesExhausted
        );
        assert_eq!(CoreError::Decode("x".into()).kind(), ErrorKind::Decode);
        assert_eq!(CoreError::Cancelled.kind(), ErrorKind::Cancelled);
    }

    #[test]
    fn kind_display() {
        assert_eq!(ErrorKind::RequestFailed.to_string(), "RequestFailed");
        assert_eq!(ErrorKind::RetriesExhausted.to_string(), "RetriesExhausted");
        assert_eq!(ErrorKind::Decode.to_string(), "Decode");
        assert_eq!(ErrorKind::Cancelled.to_string(), "Cancelled");
    }
}

// ── Retryability ────────────────────────────────────────────────────

mod transient {
    use super::*;

    #[test]
    fn only_request_failures_are_transient() {
        assert!(CoreError::RequestFailed("timeout".into()).is_transient());
        assert!(!CoreError::Decode("bad json".into()).is_transient());
        assert!(!CoreError::Cancelled.is_transient());
        assert!(!CoreError::RetriesExhausted {
            attempts: 3,
            last: "x".into()
        }
        .is_transient());
    }
}

// ── Conversions ─────────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn serde_json_errors_become_decode() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Decode(_)));
    }
}
