use std::fmt;
use std::ops::{Deref, DerefMut};

use lock_api::{MappedMutexGuard, RawMutex};

/// A value borrowed out of a [`StripedHashMap`](crate::StripedHashMap)
/// together with the stripe lock that protects it.
///
/// The guard owns the stripe lock for as long as it lives. While it exists
/// no other operation can touch *any* key mapped to the same stripe, even
/// keys unrelated to this one, so keep it short lived. The lock is released
/// when the guard is dropped or [`unlock`](ValueGuard::unlock)ed.
///
/// ```
/// use stripedmap::StripedHashMap;
///
/// let map = StripedHashMap::new(8).unwrap();
/// map.insert(1, vec![0u8; 4096]);
/// {
///     let mut value = map.get(&1).unwrap();
///     value[0] = 7;
/// }
/// assert_eq!(map.get_copy(&1).unwrap()[0], 7);
/// ```
#[must_use = "if unused the stripe lock is released immediately"]
pub struct ValueGuard<'a, R: RawMutex, V> {
    inner: MappedMutexGuard<'a, R, V>,
}

impl<'a, R: RawMutex, V> ValueGuard<'a, R, V> {
    pub(crate) fn new(inner: MappedMutexGuard<'a, R, V>) -> Self {
        ValueGuard { inner }
    }

    /// Release the stripe lock now rather than at the end of scope.
    pub fn unlock(self) {
        drop(self)
    }
}

impl<R: RawMutex, V> Deref for ValueGuard<'_, R, V> {
    type Target = V;

    #[inline(always)]
    fn deref(&self) -> &V {
        &self.inner
    }
}

impl<R: RawMutex, V> DerefMut for ValueGuard<'_, R, V> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut V {
        &mut self.inner
    }
}

impl<R: RawMutex, V: fmt::Debug> fmt::Debug for ValueGuard<'_, R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValueGuard").field(&*self.inner).finish()
    }
}
