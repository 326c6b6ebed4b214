pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tokio::sync::{broadcast, Notify};
use tracing::{info, warn};

use errors::{CoreError, ErrorKind};
use models::account::{Holding, Position};
use models::instrument::InstrumentIndex;
use models::snapshot::PortfolioSnapshot;
use providers::traits::BrokerageApi;
use providers::upstox::UpstoxClient;
use services::aggregation_service::AggregationService;
use services::ranking_service::RankingService;

/// Lifecycle notification for one refresh run.
///
/// Exactly one `Started` followed by exactly one of `Succeeded`/`Failed`
/// is emitted per run. The presentation layer drives its transient state
/// (spinners, toasts) from these.
#[derive(Debug, Clone)]
pub enum RunEvent {
    Started,
    Succeeded(PortfolioSnapshot),
    Failed(ErrorKind),
}

/// Refresh run state machine: `Idle → Running → Idle`. A trigger that
/// arrives while a run is active is rejected as a no-op rather than
/// interleaving two runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
}

/// What a refresh trigger did.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// A run completed and its snapshot was published.
    Refreshed(PortfolioSnapshot),
    /// A run was already in flight; this trigger was discarded.
    AlreadyRunning,
    /// No credential is set; nothing was fetched.
    NoCredential,
}

struct TrackerState {
    /// Opaque bearer credential; supplied externally, never interpreted.
    credential: Option<String>,
    /// Bumped whenever the credential changes. An in-flight run whose
    /// generation no longer matches publishes nothing.
    generation: u64,
    run: RunState,
    /// Last atomically-published snapshot; read-only between runs.
    snapshot: Option<PortfolioSnapshot>,
}

/// Main entry point for the portfolio dashboard core.
///
/// Owns the brokerage API client, the last published snapshot and the
/// refresh lifecycle. One logical aggregation run at a time: holdings,
/// positions, funds, the instrument catalog and the order book are
/// fetched concurrently, quotes are fetched for the union of referenced
/// instruments, and the whole snapshot is derived and published
/// atomically, or not at all.
#[must_use]
pub struct PortfolioTracker {
    api: Arc<dyn BrokerageApi>,
    aggregation_service: AggregationService,
    ranking_service: RankingService,
    state: Mutex<TrackerState>,
    events: broadcast::Sender<RunEvent>,
    cancel: Notify,
}

impl std::fmt::Debug for PortfolioTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock_state();
        f.debug_struct("PortfolioTracker")
            .field("broker", &self.api.name())
            .field("run", &state.run)
            .field("has_credential", &state.credential.is_some())
            .field("has_published", &state.snapshot.is_some())
            .finish()
    }
}

impl PortfolioTracker {
    /// Tracker against the default broker client.
    pub fn new() -> Self {
        Self::with_api(Arc::new(UpstoxClient::new()))
    }

    /// Tracker against any `BrokerageApi` implementation (alternate
    /// broker, sandbox, test double).
    pub fn with_api(api: Arc<dyn BrokerageApi>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            api,
            aggregation_service: AggregationService::new(),
            ranking_service: RankingService::new(),
            state: Mutex::new(TrackerState {
                credential: None,
                generation: 0,
                run: RunState::Idle,
                snapshot: None,
            }),
            events,
            cancel: Notify::new(),
        }
    }

    // ── Credential ──────────────────────────────────────────────────

    /// Set the bearer credential. Invalidates any run still in flight:
    /// its results are discarded, never published.
    pub fn set_credential(&self, credential: impl Into<String>) {
        {
            let mut state = self.lock_state();
            state.credential = Some(credential.into());
            state.generation += 1;
        }
        self.cancel.notify_waiters();
    }

    /// Clear the bearer credential. Invalidates any run still in flight.
    pub fn clear_credential(&self) {
        {
            let mut state = self.lock_state();
            state.credential = None;
            state.generation += 1;
        }
        self.cancel.notify_waiters();
    }

    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.lock_state().credential.is_some()
    }

    // ── Snapshot access ─────────────────────────────────────────────

    /// The last published snapshot, or the static sample snapshot if no
    /// run has published yet.
    #[must_use]
    pub fn current_snapshot(&self) -> PortfolioSnapshot {
        self.lock_state()
            .snapshot
            .clone()
            .unwrap_or_else(PortfolioSnapshot::sample)
    }

    /// Whether any live run has published a snapshot.
    #[must_use]
    pub fn has_published(&self) -> bool {
        self.lock_state().snapshot.is_some()
    }

    #[must_use]
    pub fn run_state(&self) -> RunState {
        self.lock_state().run
    }

    /// Subscribe to run lifecycle notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<RunEvent> {
        self.events.subscribe()
    }

    // ── Refresh ─────────────────────────────────────────────────────

    /// Trigger one aggregation run.
    ///
    /// No-ops (without events) when a run is already active or when no
    /// credential is set. Otherwise emits `Started`, runs the pipeline,
    /// and either publishes the new snapshot and emits `Succeeded`, or
    /// keeps the previous snapshot and emits `Failed`: exactly one
    /// terminal event either way. A failed run is not re-attempted
    /// automatically; the next attempt is caller-triggered.
    pub async fn refresh(&self) -> Result<RefreshOutcome, CoreError> {
        let (credential, generation) = {
            let mut state = self.lock_state();
            if state.run == RunState::Running {
                return Ok(RefreshOutcome::AlreadyRunning);
            }
            let Some(credential) = state.credential.clone() else {
                return Ok(RefreshOutcome::NoCredential);
            };
            state.run = RunState::Running;
            (credential, state.generation)
        };

        info!(broker = self.api.name(), "portfolio refresh started");
        let _ = self.events.send(RunEvent::Started);

        // Abandon in-flight fetches as soon as the credential changes.
        let result = tokio::select! {
            res = self.compute_snapshot(&credential) => res,
            () = self.wait_invalidated(generation) => Err(CoreError::Cancelled),
        };

        let result = {
            let mut state = self.lock_state();
            state.run = RunState::Idle;
            match result {
                // Publication is atomic: the whole snapshot replaces the
                // previous one, or nothing changes.
                Ok(snapshot) if state.generation == generation => {
                    state.snapshot = Some(snapshot.clone());
                    Ok(snapshot)
                }
                Ok(_) => Err(CoreError::Cancelled),
                Err(e) => Err(e),
            }
        };

        match result {
            Ok(snapshot) => {
                info!(
                    total_value = snapshot.total_value,
                    "portfolio refresh succeeded"
                );
                let _ = self.events.send(RunEvent::Succeeded(snapshot.clone()));
                Ok(RefreshOutcome::Refreshed(snapshot))
            }
            Err(e) => {
                warn!(error = %e, "portfolio refresh failed, keeping last published snapshot");
                let _ = self.events.send(RunEvent::Failed(e.kind()));
                Err(e)
            }
        }
    }

    /// Run the full pipeline once: fetch account data, resolve the
    /// catalog, fetch quotes for the referenced instruments, aggregate
    /// and rank. Stateless with respect to the tracker; `refresh()`
    /// layers the run lifecycle on top of this.
    pub async fn compute_snapshot(
        &self,
        credential: &str,
    ) -> Result<PortfolioSnapshot, CoreError> {
        // The five account-data fetches have no mutual data dependency.
        let (catalog, holdings, positions, funds, orders) = tokio::try_join!(
            self.api.fetch_instruments(credential),
            self.api.fetch_holdings(credential),
            self.api.fetch_positions(credential),
            self.api.fetch_funds(credential),
            self.api.fetch_orders(credential),
        )?;

        // The quote fetch depends on the holdings+positions key set and
        // must be sequenced after them.
        let identifiers = quote_key_set(&holdings, &positions);
        let quotes = self.api.fetch_quotes(credential, &identifiers).await?;

        let index = InstrumentIndex::build(&catalog);
        let valuation =
            self.aggregation_service
                .aggregate(&holdings, &positions, funds.cash, &index, &quotes);

        let top_holdings = self.ranking_service.top_holdings(&valuation);
        let market_movers = self.ranking_service.market_movers(&valuation);
        let recent_transactions = self.ranking_service.recent_transactions(&orders);

        Ok(PortfolioSnapshot {
            total_value: valuation.total_value,
            total_gain: valuation.total_gain,
            total_gain_percent: valuation.total_gain_percent,
            day_change: valuation.day_change,
            day_change_percent: valuation.day_change_percent,
            asset_allocation: valuation.allocations,
            top_holdings,
            recent_transactions,
            market_movers,
        })
    }

    // ── Internal ────────────────────────────────────────────────────

    fn lock_state(&self) -> std::sync::MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Resolves once the tracker's generation moves past `generation`
    /// (credential set or cleared while a run is in flight).
    async fn wait_invalidated(&self, generation: u64) {
        loop {
            let notified = self.cancel.notified();
            if self.lock_state().generation != generation {
                return;
            }
            notified.await;
        }
    }
}

impl Default for PortfolioTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Deduplicated union of the instrument identifiers referenced by
/// holdings and positions, in first-seen order.
fn quote_key_set(holdings: &[Holding], positions: &[Position]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut identifiers = Vec::new();
    for identifier in holdings
        .iter()
        .map(|h| &h.identifier)
        .chain(positions.iter().map(|p| &p.identifier))
    {
        if seen.insert(identifier.clone()) {
            identifiers.push(identifier.clone());
        }
    }
    identifiers
}
