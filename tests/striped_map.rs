use std::collections::HashMap;
use std::hash::{BuildHasherDefault, Hasher};

use proptest::prelude::*;
use stripedmap::{MapError, StripedHashMap};

#[derive(Debug, Clone)]
enum Op {
    Insert(u8, u16),
    Erase(u8),
    Find(u8),
    GetCopy(u8),
    Get(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<u8>(), any::<u16>()).prop_map(|(k, v)| Op::Insert(k, v)),
        any::<u8>().prop_map(Op::Erase),
        any::<u8>().prop_map(Op::Find),
        any::<u8>().prop_map(Op::GetCopy),
        any::<u8>().prop_map(Op::Get),
    ]
}

/// Folds every key into a handful of hashes so chains get long.
#[derive(Default)]
struct NarrowHasher(u64);

impl Hasher for NarrowHasher {
    fn finish(&self) -> u64 {
        self.0 % 3
    }

    fn write(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.0 = self.0.wrapping_mul(31).wrapping_add(u64::from(*b));
        }
    }
}

fn check_against_std<S>(map: &StripedHashMap<u8, u16, S>, ops: Vec<Op>)
where
    S: std::hash::BuildHasher,
{
    let mut model: HashMap<u8, u16> = HashMap::new();

    for op in ops {
        match op {
            Op::Insert(k, v) => {
                map.insert(k, v);
                model.insert(k, v);
            }
            Op::Erase(k) => {
                map.erase(&k);
                model.remove(&k);
            }
            Op::Find(k) => {
                assert_eq!(map.find(&k), model.contains_key(&k));
            }
            Op::GetCopy(k) => {
                assert_eq!(
                    map.get_copy(&k),
                    model.get(&k).copied().ok_or(MapError::KeyNotFound)
                );
            }
            Op::Get(k) => match (map.get(&k), model.get(&k)) {
                (Ok(guard), Some(v)) => assert_eq!(*guard, *v),
                (Err(e), None) => assert_eq!(e, MapError::KeyNotFound),
                (got, expected) => panic!(
                    "get mismatch on {}: got {:?}, expected {:?}",
                    k,
                    got.map(|g| *g),
                    expected
                ),
            },
        }
        assert_eq!(map.size(), model.len());
    }

    for k in 0..=u8::MAX {
        assert_eq!(map.find(&k), model.contains_key(&k));
    }
}

proptest::proptest! {
    #[test]
    fn striped_map_consistent(
        capacity in 1usize..64,
        level in 1usize..24,
        ops in proptest::collection::vec(op_strategy(), 0..256)
    ) {
        let map = StripedHashMap::with_concurrency_level(capacity, level).unwrap();
        prop_assert_eq!(map.lock_count(), level.min(capacity));
        check_against_std(&map, ops);
    }

    #[test]
    fn striped_map_consistent_colliding(
        capacity in 1usize..16,
        ops in proptest::collection::vec(op_strategy(), 0..256)
    ) {
        let map = StripedHashMap::with_hasher(
            capacity,
            4,
            BuildHasherDefault::<NarrowHasher>::default(),
        )
        .unwrap();
        check_against_std(&map, ops);
    }

    #[test]
    fn striped_map_rejects_zero(capacity in 0usize..4, level in 0usize..4) {
        let r = StripedHashMap::<u8, u16>::with_concurrency_level(capacity, level);
        match (capacity, level) {
            (0, _) => prop_assert_eq!(r.unwrap_err(), MapError::InvalidCapacity),
            (_, 0) => prop_assert_eq!(r.unwrap_err(), MapError::InvalidConcurrencyLevel),
            _ => prop_assert!(r.is_ok()),
        }
    }
}

#[test]
fn striped_map_insert_erase_reinsert() {
    let map = StripedHashMap::new(4).unwrap();
    for round in 0..3u32 {
        for k in 0..100u32 {
            map.insert(k, k + round);
        }
        assert_eq!(map.size(), 100);
        for k in (0..100u32).step_by(2) {
            map.erase(&k);
        }
        assert_eq!(map.size(), 50);
        assert_eq!(map.get_copy(&1), Ok(1 + round));
        assert_eq!(map.get_copy(&2), Err(MapError::KeyNotFound));
        for k in (1..100u32).step_by(2) {
            map.erase(&k);
        }
        assert!(map.is_empty());
    }
}
