// Memoizing cache for per-player lookups, keyed by (lookup kind, player name).
//
// Each key owns a `OnceCell`, so concurrent requests for the same key share a
// single in-flight fetch. A fetch that fails leaves its cell empty and the
// next request for that key runs the fetch again.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::OnceCell;
use tracing::debug;

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Image,
    Team,
    HeatMaps,
}

impl LookupKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            LookupKind::Image => "image",
            LookupKind::Team => "team",
            LookupKind::HeatMaps => "heatmaps",
        }
    }
}

/// Composite cache key. Displays as `"{kind}-{player}"`, e.g. `image-Smith, John`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub kind: LookupKind,
    pub player: String,
}

impl CacheKey {
    pub fn new(kind: LookupKind, player: impl Into<String>) -> Self {
        CacheKey {
            kind,
            player: player.into(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind.prefix(), self.player)
    }
}

// ---------------------------------------------------------------------------
// LookupCache
// ---------------------------------------------------------------------------

struct Slots<V> {
    map: HashMap<CacheKey, Arc<OnceCell<V>>>,
    /// Keys from least to most recently used.
    order: VecDeque<CacheKey>,
}

pub struct LookupCache<V> {
    slots: Mutex<Slots<V>>,
    capacity: Option<NonZeroUsize>,
}

impl<V: Clone> LookupCache<V> {
    /// A cache that never evicts.
    pub fn unbounded() -> Self {
        Self::with_capacity(0)
    }

    /// A cache holding at most `capacity` keys, evicting the least recently
    /// used one when full. A capacity of 0 means unbounded.
    pub fn with_capacity(capacity: usize) -> Self {
        LookupCache {
            slots: Mutex::new(Slots {
                map: HashMap::new(),
                order: VecDeque::new(),
            }),
            capacity: NonZeroUsize::new(capacity),
        }
    }

    /// Return the cached value for `key`, or run `fetch` and cache its
    /// result. Errors are returned to the caller and not cached.
    pub async fn get_or_try_fetch<F, Fut, E>(&self, key: CacheKey, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let cell = self.slot(&key);
        if let Some(value) = cell.get() {
            debug!(%key, "cache hit");
            return Ok(value.clone());
        }
        debug!(%key, "cache miss");
        cell.get_or_try_init(fetch).await.cloned()
    }

    /// Whether a completed value is cached for `key`.
    pub fn is_cached(&self, key: &CacheKey) -> bool {
        self.lock()
            .map
            .get(key)
            .is_some_and(|cell| cell.initialized())
    }

    pub fn len(&self) -> usize {
        self.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Slots<V>> {
        // The map is never left half-updated, so a poisoned lock is still usable.
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Find or create the cell for `key`, marking it most recently used.
    fn slot(&self, key: &CacheKey) -> Arc<OnceCell<V>> {
        let mut slots = self.lock();

        if let Some(cell) = slots.map.get(key).cloned() {
            if let Some(pos) = slots.order.iter().position(|k| k == key) {
                slots.order.remove(pos);
            }
            slots.order.push_back(key.clone());
            return cell;
        }

        let cell = Arc::new(OnceCell::new());
        slots.map.insert(key.clone(), Arc::clone(&cell));
        slots.order.push_back(key.clone());

        if let Some(capacity) = self.capacity {
            while slots.map.len() > capacity.get() {
                let Some(oldest) = slots.order.pop_front() else {
                    break;
                };
                slots.map.remove(&oldest);
                debug!(key = %oldest, "evicted from cache");
            }
        }

        cell
    }
}

impl<V: Clone> Default for LookupCache<V> {
    fn default() -> Self {
        Self::unbounded()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
