//! StripedMap - A lock striped concurrent HashMap
//!
//! A `Mutex<HashMap<K, V>>` serialises every access to the map, even when the
//! threads involved are touching entirely different keys. This crate provides
//! a fixed capacity hash table where the buckets are split into stripes, and
//! each stripe has its own mutex. Threads only wait on each other when their
//! keys land in the same stripe.
//!
//! The capacity (number of buckets) and the concurrency level (number of
//! stripes) are chosen at construction and never change. There is no
//! resizing, so the table is best suited to workloads where the number of
//! keys is known ahead of time.
//!
//! Values can be read either by clone, with `get_copy`, or in place with
//! `get`. The latter returns a [`ValueGuard`] that holds the stripe lock for
//! as long as it lives. This avoids copying large values, at the cost of
//! blocking every other operation on that stripe until the guard is dropped.
//!
//! # Features
//! The default hasher can be selected with features.
//!
//! * `foldhash` - use the foldhash crate (default)
//! * `ahash` - use the cpu accelerated ahash crate
//!
//! With neither enabled, std's `RandomState` is used. Any `BuildHasher` can
//! also be supplied directly with `StripedHashMap::with_hasher`.

#![deny(warnings)]
#![warn(unused_extern_crates)]
#![warn(missing_docs)]

mod error;
// This is where the chains and stripe arithmetic live.
mod internals;
mod utils;

pub mod hashmap;

pub use error::MapError;
pub use hashmap::{StripedHashMap, ValueGuard};
pub use utils::{DefaultHashBuilder, DefaultRawMutex, DEFAULT_CONCURRENCY_LEVEL};
