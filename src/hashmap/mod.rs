//! StripedHashMap - A fixed capacity, lock striped concurrent HashMap
//!
//! The table is an array of `capacity` buckets, each a chain of entries.
//! Rather than one lock over the whole table, the buckets are divided into
//! contiguous stripes and each stripe has its own mutex. An operation hashes
//! its key to a bucket, takes the single mutex owning that bucket, and does
//! its work on that one chain. Operations on keys in different stripes run
//! in parallel; operations in the same stripe are serialised in the order
//! the mutex grants them.
//!
//! The table never grows. Pick a capacity near the number of keys you
//! expect, since chains get longer (and lookups slower) as the load rises.
//!
//! Most reads hand back a clone of the value with `get_copy`. When a clone is
//! too expensive, `get` returns a [`ValueGuard`] that keeps the stripe locked
//! while you use the value in place. Everything else mapped to that stripe
//! waits until the guard is gone, so keep it brief.

#[macro_use]
mod macros;
mod guard;

pub use guard::ValueGuard;

use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_utils::CachePadded;
use lock_api::{Mutex, MutexGuard, RawMutex, RawMutexTimed};
use tracing::{debug, trace};

use crate::error::MapError;
use crate::internals::chain::Chain;
use crate::internals::stripe::StripeLayout;
use crate::utils::{DefaultHashBuilder, DefaultRawMutex, DEFAULT_CONCURRENCY_LEVEL};

type Stripe<R, K, V> = CachePadded<Mutex<R, Vec<Chain<K, V>>>>;

/// A concurrent map with a fixed number of buckets, protected by a fixed
/// number of striped mutexes.
///
/// This can be used where you would otherwise reach for
/// `Mutex<HashMap<K, V>>`, but many threads need to work on the map at the
/// same time. Threads only contend when their keys fall in the same stripe.
///
/// # Examples
/// ```
/// use stripedmap::StripedHashMap;
///
/// let map = StripedHashMap::with_concurrency_level(64, 8).unwrap();
/// assert_eq!(map.lock_count(), 8);
///
/// map.insert("a", 1);
/// map.insert("a", 2);
/// assert_eq!(map.size(), 1);
/// assert_eq!(map.get_copy(&"a"), Ok(2));
///
/// map.erase(&"a");
/// assert!(!map.find(&"a"));
/// ```
pub struct StripedHashMap<K, V, S = DefaultHashBuilder, R: RawMutex = DefaultRawMutex> {
    layout: StripeLayout,
    concurrency_level: usize,
    build_hasher: S,
    size: CachePadded<AtomicUsize>,
    stripes: Box<[Stripe<R, K, V>]>,
}

impl<K: Hash + Eq, V> StripedHashMap<K, V> {
    /// Create a map of `capacity` buckets with the default concurrency level
    /// of 16 stripes. Fails if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, MapError> {
        Self::with_concurrency_level(capacity, DEFAULT_CONCURRENCY_LEVEL)
    }

    /// Create a map of `capacity` buckets spread over `concurrency_level`
    /// stripes. The real number of stripes is capped at `capacity`.
    pub fn with_concurrency_level(
        capacity: usize,
        concurrency_level: usize,
    ) -> Result<Self, MapError> {
        Self::with_hasher(capacity, concurrency_level, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> StripedHashMap<K, V, S> {
    /// Create a map using `hasher` to place keys into buckets.
    ///
    /// Supplying a hasher that sends every key to the same bucket is a
    /// handy way to force contention and long chains in tests.
    pub fn with_hasher(
        capacity: usize,
        concurrency_level: usize,
        hasher: S,
    ) -> Result<Self, MapError> {
        Self::with_raw_mutex(capacity, concurrency_level, hasher)
    }
}

impl<K, V, S, R> StripedHashMap<K, V, S, R>
where
    K: Hash + Eq,
    S: BuildHasher,
    R: RawMutex,
{
    /// Create a map that uses `R` for its stripe locks. Name the lock type
    /// with a turbofish, for example
    /// `StripedHashMap::<u64, String, _, parking_lot::RawFairMutex>::with_raw_mutex(..)`.
    pub fn with_raw_mutex(
        capacity: usize,
        concurrency_level: usize,
        hasher: S,
    ) -> Result<Self, MapError> {
        let layout = StripeLayout::new(capacity, concurrency_level)?;

        let stripes: Box<[Stripe<R, K, V>]> = (0..layout.lock_count())
            .map(|lock| {
                let chains = layout.buckets_for(lock).map(|_| Chain::new()).collect();
                CachePadded::new(Mutex::new(chains))
            })
            .collect();

        debug!(
            capacity,
            concurrency_level,
            lock_count = layout.lock_count(),
            indices_per_lock = layout.indices_per_lock(),
            "striped hashmap created"
        );

        Ok(StripedHashMap {
            layout,
            concurrency_level,
            build_hasher: hasher,
            size: CachePadded::new(AtomicUsize::new(0)),
            stripes,
        })
    }

    /// The number of buckets in the table. This never changes.
    pub fn capacity(&self) -> usize {
        self.layout.capacity()
    }

    /// The number of stripe locks, `min(concurrency_level, capacity)`.
    pub fn lock_count(&self) -> usize {
        self.layout.lock_count()
    }

    /// The concurrency level that was requested at construction.
    pub fn concurrency_level(&self) -> usize {
        self.concurrency_level
    }

    /// The hasher used to place keys.
    pub fn hasher(&self) -> &S {
        &self.build_hasher
    }

    /// The number of live entries. This is read without taking any lock, so
    /// under concurrent writes it is only a snapshot of some recent state.
    pub fn size(&self) -> usize {
        self.size.load(Ordering::Acquire)
    }

    /// Returns true if the map held no entries at the time of the check.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    #[inline]
    fn slot<Q>(&self, k: &Q) -> (&Stripe<R, K, V>, usize)
    where
        Q: Hash + ?Sized,
    {
        let hash = hash_key!(self, k);
        let (lock, offset) = self.layout.slot(hash);
        (&self.stripes[lock], offset)
    }

    /// Returns true if `k` was present while its stripe was locked. The lock
    /// is released before returning, so another thread may have removed (or
    /// added) the key by the time you act on the answer.
    pub fn find<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (stripe, offset) = self.slot(k);
        let chains = stripe.lock();
        chains[offset].find(k).is_some()
    }

    /// Insert `v` under `k`. If `k` is already present its value is
    /// replaced in place and the size is unchanged.
    pub fn insert(&self, k: K, v: V) {
        let (stripe, offset) = self.slot(&k);
        let mut chains = stripe.lock();
        if chains[offset].insert(k, v) {
            self.size.fetch_add(1, Ordering::AcqRel);
        }
    }

    /// Remove `k` if it is present. Removing an absent key does nothing.
    pub fn erase<Q>(&self, k: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (stripe, offset) = self.slot(k);
        let mut chains = stripe.lock();
        if chains[offset].erase(k) {
            self.size.fetch_sub(1, Ordering::AcqRel);
        }
    }

    /// Return a clone of the value for `k`. The stripe is only locked for
    /// the duration of the clone.
    pub fn get_copy<Q>(&self, k: &Q) -> Result<V, MapError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        let (stripe, offset) = self.slot(k);
        let chains = stripe.lock();
        chains[offset]
            .find(k)
            .map(|entry| entry.value.clone())
            .ok_or(MapError::KeyNotFound)
    }

    /// Borrow the value for `k` in place, keeping its stripe locked until
    /// the returned [`ValueGuard`] is dropped. Nothing is cloned.
    ///
    /// If the key is absent the stripe is unlocked again before
    /// `KeyNotFound` is returned.
    ///
    /// Calling any other method of this map that lands on the same stripe
    /// from the thread holding the guard will deadlock.
    pub fn get<Q>(&self, k: &Q) -> Result<ValueGuard<'_, R, V>, MapError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (stripe, offset) = self.slot(k);
        Self::escape(stripe.lock(), offset, k)
    }

    /// As [`get`](Self::get), but fails with `LockUnavailable` instead of
    /// waiting if the stripe is currently locked.
    pub fn try_get<Q>(&self, k: &Q) -> Result<ValueGuard<'_, R, V>, MapError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (stripe, offset) = self.slot(k);
        let chains = stripe.try_lock().ok_or_else(|| {
            trace!("try_get found stripe locked");
            MapError::LockUnavailable
        })?;
        Self::escape(chains, offset, k)
    }

    fn escape<'a, Q>(
        chains: MutexGuard<'a, R, Vec<Chain<K, V>>>,
        offset: usize,
        k: &Q,
    ) -> Result<ValueGuard<'a, R, V>, MapError>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        MutexGuard::try_map(chains, |chains| {
            chains[offset].find_mut(k).map(|entry| &mut entry.value)
        })
        .map(|inner| {
            trace!("stripe lock handed to caller");
            ValueGuard::new(inner)
        })
        // Dropping the returned guard unlocks the stripe.
        .map_err(|_chains| MapError::KeyNotFound)
    }
}

impl<K, V, S, R> StripedHashMap<K, V, S, R>
where
    K: Hash + Eq,
    S: BuildHasher,
    R: RawMutexTimed,
{
    /// As [`get`](Self::get), but waits at most `timeout` for the stripe
    /// lock before failing with `LockUnavailable`.
    pub fn try_get_for<Q>(
        &self,
        k: &Q,
        timeout: R::Duration,
    ) -> Result<ValueGuard<'_, R, V>, MapError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (stripe, offset) = self.slot(k);
        let chains = stripe.try_lock_for(timeout).ok_or_else(|| {
            trace!("try_get_for timed out waiting on stripe");
            MapError::LockUnavailable
        })?;
        Self::escape(chains, offset, k)
    }
}

impl<K, V, S, R: RawMutex> fmt::Debug for StripedHashMap<K, V, S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripedHashMap")
            .field("capacity", &self.layout.capacity())
            .field("lock_count", &self.layout.lock_count())
            .field("indices_per_lock", &self.layout.indices_per_lock())
            .field("size", &self.size.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
