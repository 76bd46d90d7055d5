/// The raw mutex used for stripe locks unless one is named explicitly.
pub type DefaultRawMutex = parking_lot::RawMutex;

/// The hasher builder used unless one is supplied at construction.
#[cfg(feature = "foldhash")]
pub type DefaultHashBuilder = foldhash::fast::RandomState;

/// The hasher builder used unless one is supplied at construction.
#[cfg(all(feature = "ahash", not(feature = "foldhash")))]
pub type DefaultHashBuilder = ahash::RandomState;

/// The hasher builder used unless one is supplied at construction.
#[cfg(all(not(feature = "ahash"), not(feature = "foldhash")))]
pub type DefaultHashBuilder = std::collections::hash_map::RandomState;

/// Number of stripes requested when no concurrency level is given.
pub const DEFAULT_CONCURRENCY_LEVEL: usize = 16;
