use thiserror::Error;

/// Unified error type for the entire portfolio-dashboard-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// Note the deliberate absence of a "missing quote" variant: an instrument
/// without a tradable quote is excluded from valuation for that run, it is
/// never an error.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Network ─────────────────────────────────────────────────────
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Retries exhausted after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: String },

    #[error("Decode error: {0}")]
    Decode(String),

    // ── Run lifecycle ───────────────────────────────────────────────
    #[error("Refresh cancelled — credential changed while the run was in flight")]
    Cancelled,
}

/// Coarse classification of a `CoreError`, carried by failure notifications
/// so subscribers don't need the full error value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    RequestFailed,
    RetriesExhausted,
    Decode,
    Cancelled,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::RequestFailed => write!(f, "RequestFailed"),
            ErrorKind::RetriesExhausted => write!(f, "RetriesExhausted"),
            ErrorKind::Decode => write!(f, "Decode"),
            ErrorKind::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl CoreError {
    /// The coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::RequestFailed(_) => ErrorKind::RequestFailed,
            CoreError::RetriesExhausted { .. } => ErrorKind::RetriesExhausted,
            CoreError::Decode(_) => ErrorKind::Decode,
            CoreError::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// Whether this error is transient and worth retrying.
    ///
    /// Only `RequestFailed` qualifies: a decode failure indicates a contract
    /// mismatch with the broker, and repeating the request cannot fix it.
    pub fn is_transient(&self) -> bool {
        matches!(self, CoreError::RequestFailed(_))
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs so
        // instrument keys and any credential material never leak into
        // error text. reqwest errors often contain full URLs.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::RequestFailed(sanitized)
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Decode(e.to_string())
    }
}
