//! A bucket chain. This is a singly linked list of entries that all hash to
//! the same bucket index.
//!
//! The chain has no synchronisation of its own. It is only ever reached
//! through the stripe mutex that owns it, so every method here assumes it
//! has exclusive (or shared, for `find`) access already.

use std::borrow::Borrow;
use std::fmt;

pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    next: Option<Box<Entry<K, V>>>,
}

pub(crate) struct Chain<K, V> {
    head: Option<Box<Entry<K, V>>>,
}

impl<K, V> Chain<K, V> {
    pub(crate) const fn new() -> Self {
        Chain { head: None }
    }

    #[allow(dead_code)]
    pub(crate) fn len(&self) -> usize {
        let mut count = 0;
        let mut cursor = self.head.as_deref();
        while let Some(entry) = cursor {
            count += 1;
            cursor = entry.next.as_deref();
        }
        count
    }

    #[allow(dead_code)]
    pub(crate) fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}

impl<K: Eq, V> Chain<K, V> {
    pub(crate) fn find<Q>(&self, k: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let mut cursor = self.head.as_deref();
        while let Some(entry) = cursor {
            if k.eq(entry.key.borrow()) {
                return Some(entry);
            }
            cursor = entry.next.as_deref();
        }
        None
    }

    pub(crate) fn find_mut<Q>(&mut self, k: &Q) -> Option<&mut Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let mut cursor = self.head.as_deref_mut();
        while let Some(entry) = cursor {
            if k.eq(entry.key.borrow()) {
                return Some(entry);
            }
            cursor = entry.next.as_deref_mut();
        }
        None
    }

    /// Insert or overwrite. Returns true if a new entry was linked, false if
    /// an existing entry had its value replaced.
    pub(crate) fn insert(&mut self, k: K, v: V) -> bool {
        if let Some(entry) = self.find_mut(&k) {
            entry.value = v;
            return false;
        }

        let next = self.head.take();
        self.head = Some(Box::new(Entry {
            key: k,
            value: v,
            next,
        }));
        true
    }

    /// Unlink the entry for `k`. Returns true if something was removed.
    pub(crate) fn erase<Q>(&mut self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let mut link = &mut self.head;
        // Only a shared borrow is taken to test the key, so advancing the
        // cursor doesn't hold a loan on `*link` past the loop.
        while link.as_ref().is_some_and(|entry| k.ne(entry.key.borrow())) {
            match link {
                Some(entry) => link = &mut entry.next,
                None => break,
            }
        }

        match link.take() {
            Some(entry) => {
                *link = entry.next;
                true
            }
            None => false,
        }
    }
}

impl<K, V> Drop for Chain<K, V> {
    fn drop(&mut self) {
        // Unlink iteratively, a recursive Box drop can blow the stack on
        // long (colliding) chains.
        let mut link = self.head.take();
        while let Some(mut entry) = link {
            link = entry.next.take();
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Chain<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        let mut cursor = self.head.as_deref();
        while let Some(entry) = cursor {
            list.entry(&entry.key);
            cursor = entry.next.as_deref();
        }
        list.finish()
    }
}
