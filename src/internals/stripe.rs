//! Stripe layout arithmetic.
//!
//! A table of `capacity` buckets is split into `lock_count` contiguous runs of
//! `indices_per_lock` buckets, one run per mutex. The stride is the ceiling of
//! `capacity / lock_count`, so the final stripe may be short, and when the
//! stride overshoots, trailing stripes may own no buckets at all. That skew is
//! kept as is so stripe ownership is a pure function of the configuration.

use std::ops::Range;

use crate::error::MapError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StripeLayout {
    capacity: usize,
    lock_count: usize,
    indices_per_lock: usize,
}

impl StripeLayout {
    pub(crate) fn new(capacity: usize, concurrency_level: usize) -> Result<Self, MapError> {
        if capacity == 0 {
            return Err(MapError::InvalidCapacity);
        }
        if concurrency_level == 0 {
            return Err(MapError::InvalidConcurrencyLevel);
        }

        let lock_count = concurrency_level.min(capacity);
        let indices_per_lock = capacity.div_ceil(lock_count);

        Ok(StripeLayout {
            capacity,
            lock_count,
            indices_per_lock,
        })
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub(crate) fn lock_count(&self) -> usize {
        self.lock_count
    }

    #[inline]
    pub(crate) fn indices_per_lock(&self) -> usize {
        self.indices_per_lock
    }

    #[inline]
    pub(crate) fn bucket_index(&self, hash: u64) -> usize {
        // The remainder is < capacity, so it always fits back into usize.
        (hash % self.capacity as u64) as usize
    }

    #[inline]
    pub(crate) fn lock_index(&self, bucket: usize) -> usize {
        bucket / self.indices_per_lock
    }

    /// Map a hash to (stripe, offset of the bucket within that stripe).
    #[inline]
    pub(crate) fn slot(&self, hash: u64) -> (usize, usize) {
        let bucket = self.bucket_index(hash);
        let lock = self.lock_index(bucket);
        (lock, bucket - lock * self.indices_per_lock)
    }

    /// The bucket indices owned by stripe `lock`.
    pub(crate) fn buckets_for(&self, lock: usize) -> Range<usize> {
        let start = lock
            .saturating_mul(self.indices_per_lock)
            .min(self.capacity);
        let end = start
            .saturating_add(self.indices_per_lock)
            .min(self.capacity);
        start..end
    }
}
