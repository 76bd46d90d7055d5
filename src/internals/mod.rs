//! The storage behind `StripedHashMap`: bucket chains, and the arithmetic
//! that assigns buckets to stripe locks. Nothing here synchronises on its
//! own, the public map owns the locks.

pub(crate) mod chain;
pub(crate) mod stripe;
