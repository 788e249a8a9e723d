//! Keyed fetch cache with in-flight request coalescing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::errors::FetchError;
use crate::source::{AccountSource, RawAccount};

/// Parsed view of a fetched account.
#[derive(Debug, Clone)]
pub struct Parsed<T> {
    pub raw: Arc<RawAccount>,
    pub info: T,
}

/// Cache tuning knobs.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long a non-static entry stays fresh before the next fetch reloads
    /// it from the backend.
    pub refresh_after: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            refresh_after: Duration::from_secs(30),
        }
    }
}

type LoadOutcome = Result<Option<Arc<RawAccount>>, FetchError>;
type LoadFuture = Shared<BoxFuture<'static, LoadOutcome>>;

struct CachedEntry {
    /// `None` records a known-absent account.
    account: Option<Arc<RawAccount>>,
    fetched_at: Instant,
    is_static: bool,
}

/// Fetch cache over an [`AccountSource`] with at most one outstanding backend
/// load per address. Concurrent callers for the same address await the same
/// shared future; completed loads are served from the cache until they go
/// stale (static entries never do).
pub struct AccountFetchCache<S> {
    source: Arc<S>,
    config: CacheConfig,
    entries: Mutex<HashMap<String, CachedEntry>>,
    in_flight: Mutex<HashMap<String, LoadFuture>>,
    closed: AtomicBool,
}

impl<S: AccountSource> AccountFetchCache<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, CacheConfig::default())
    }

    pub fn with_config(source: S, config: CacheConfig) -> Self {
        Self {
            source: Arc::new(source),
            config,
            entries: Mutex::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
            closed: AtomicBool::new(false),
        }
    }

    /// Mark the cache unavailable. Subsequent fetches fail with
    /// [`FetchError::CacheUnavailable`]; loads already in flight settle
    /// normally for their current waiters.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Fetch the raw account at `address`, deduplicating concurrent loads.
    pub async fn fetch_raw(
        &self,
        address: &str,
        is_static: bool,
    ) -> Result<Arc<RawAccount>, FetchError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(FetchError::CacheUnavailable);
        }

        if let Some(cached) = self.cached(address) {
            return cached.ok_or_else(|| FetchError::AccountNotFound(address.to_string()));
        }

        let load = self.begin_or_join(address);
        let outcome = load.await;
        self.settle(address, is_static, &outcome);

        outcome?.ok_or_else(|| FetchError::AccountNotFound(address.to_string()))
    }

    /// Cached, parsed view of the account at `address`.
    ///
    /// `parser` runs on every call against the cached snapshot, so callers
    /// always observe the snapshot through their own typed lens. `is_static`
    /// marks accounts whose data never changes; those are fetched once.
    pub async fn fetch_typed_account<T, P>(
        &self,
        address: Option<&str>,
        parser: P,
        is_static: bool,
    ) -> Result<Parsed<T>, FetchError>
    where
        P: Fn(&str, &RawAccount) -> anyhow::Result<T>,
    {
        let address = address.ok_or(FetchError::MissingAddress)?;
        let raw = self.fetch_raw(address, is_static).await?;
        let info = parser(address, &raw).map_err(|e| {
            warn!(%address, error = %e, "account parse failed");
            FetchError::Parse {
                address: address.to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(Parsed { raw, info })
    }

    /// Fresh cached outcome for `address`, if any. The inner `Option` is the
    /// known-absent marker.
    fn cached(&self, address: &str) -> Option<Option<Arc<RawAccount>>> {
        let entries = self.entries.lock();
        let entry = entries.get(address)?;
        if entry.is_static || entry.fetched_at.elapsed() < self.config.refresh_after {
            Some(entry.account.clone())
        } else {
            None
        }
    }

    /// Join the in-flight load for `address`, starting one if none exists.
    fn begin_or_join(&self, address: &str) -> LoadFuture {
        let mut in_flight = self.in_flight.lock();
        if let Some(pending) = in_flight.get(address) {
            return pending.clone();
        }

        debug!(%address, "loading account");
        let source = Arc::clone(&self.source);
        let addr = address.to_string();
        let load = async move {
            let loaded = source.load(&addr).await?;
            Ok(loaded.map(Arc::new))
        }
        .boxed()
        .shared();

        in_flight.insert(address.to_string(), load.clone());
        load
    }

    /// Record a completed load. Only the first settling waiter writes the
    /// cache entry; failures are not cached.
    fn settle(&self, address: &str, is_static: bool, outcome: &LoadOutcome) {
        if self.in_flight.lock().remove(address).is_none() {
            return;
        }
        if let Ok(account) = outcome {
            self.entries.lock().insert(
                address.to_string(),
                CachedEntry {
                    account: account.clone(),
                    fetched_at: Instant::now(),
                    // absent accounts may be created later; never pin them
                    is_static: is_static && account.is_some(),
                },
            );
        }
    }
}
